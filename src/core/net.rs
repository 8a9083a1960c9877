// src/core/net.rs
//
// One best-effort GET per call: no retries, body fully buffered.
use std::error::Error as StdError;
use std::io::{self, Read};

use crate::config::options::FetchOptions;
use crate::error::FetchError;

/// Where page bytes come from. The engine only talks to this.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// True when a declared content type is some kind of HTML/XML.
pub fn is_markup_content_type(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.contains("html") || ct.contains("xml")
}

/// Reject anything that isn't markup, even if the transport succeeded.
pub fn check_content_type(url: &str, content_type: Option<&str>) -> Result<(), FetchError> {
    match content_type {
        Some(ct) if is_markup_content_type(ct) => Ok(()),
        other => Err(FetchError::NotMarkup {
            url: s!(url),
            content_type: s!(other.unwrap_or("")),
        }),
    }
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(opts: &FetchOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(opts.connect_timeout)
            .timeout_read(opts.read_timeout)
            .user_agent(&opts.user_agent)
            .build();
        Self { agent }
    }

    fn classify(url: &str, error: ureq::Error) -> FetchError {
        match error {
            ureq::Error::Status(status, _) => FetchError::Status { url: s!(url), status },
            ureq::Error::Transport(transport) => {
                if caused_by_timeout(&transport) {
                    FetchError::Timeout { url: s!(url) }
                } else {
                    FetchError::Transport { url: s!(url), message: transport.to_string() }
                }
            }
        }
    }

    fn read_body(url: &str, resp: ureq::Response) -> Result<Vec<u8>, FetchError> {
        let mut buf = Vec::new();
        match resp.into_reader().read_to_end(&mut buf) {
            Ok(_) => Ok(buf),
            Err(e) if is_timeout_kind(e.kind()) => Err(FetchError::Timeout { url: s!(url) }),
            Err(source) => Err(FetchError::Body { url: s!(url), source }),
        }
    }
}

fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Walks the source chain for an io timeout.
fn caused_by_timeout(transport: &ureq::Transport) -> bool {
    let mut cause = transport.source();
    while let Some(err) = cause {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if is_timeout_kind(io_err.kind()) {
                return true;
            }
        }
        cause = err.source();
    }
    false
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&FetchOptions::default())
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        logd!("GET {url}");
        let result = self
            .agent
            .get(url)
            .call()
            .map_err(|e| Self::classify(url, e))
            .and_then(|resp| {
                check_content_type(url, resp.header("Content-Type"))?;
                Self::read_body(url, resp)
            });

        match &result {
            Ok(body) => logd!("GET {url} -> {} bytes", body.len()),
            Err(e) => loge!("{e}"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Answers one request with `response`, then holds the socket open for `hold`.
    fn serve_once(response: &'static [u8], hold: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut req = Vec::new();
            let mut chunk = [0u8; 512];
            while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => req.extend_from_slice(&chunk[..n]),
                }
            }
            let _ = stream.write_all(response);
            let _ = stream.flush();
            thread::sleep(hold);
        });
        format!("http://{addr}/people/185")
    }

    fn fetcher(timeout_secs: u64) -> HttpFetcher {
        let mut opts = FetchOptions::default();
        opts.set_timeout(timeout_secs);
        HttpFetcher::new(&opts)
    }

    #[test]
    fn fetch_returns_markup_body() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=UTF-8\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<html></html>",
            Duration::ZERO,
        );
        assert_eq!(fetcher(5).fetch(&url).unwrap(), b"<html></html>");
    }

    #[test]
    fn fetch_rejects_json_on_200() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
            Duration::ZERO,
        );
        match fetcher(5).fetch(&url) {
            Err(FetchError::NotMarkup { url: u, content_type }) => {
                assert_eq!(u, url);
                assert_eq!(content_type, "application/json");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fetch_tags_http_errors_with_status() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Type: text/html\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            Duration::ZERO,
        );
        assert!(matches!(
            fetcher(5).fetch(&url),
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn stalled_body_is_a_timeout() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 1000\r\n\r\n<html>",
            Duration::from_secs(4),
        );
        match fetcher(1).fetch(&url) {
            Err(FetchError::Timeout { url: u }) => assert_eq!(u, url),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stalled_headers_are_a_timeout() {
        let url = serve_once(b"", Duration::from_secs(4));
        assert!(matches!(
            fetcher(1).fetch(&url),
            Err(FetchError::Timeout { .. })
        ));
    }

    #[test]
    fn refused_connection_is_transport() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let url = format!("http://{addr}/x");
        assert!(matches!(
            fetcher(2).fetch(&url),
            Err(FetchError::Transport { .. })
        ));
    }

    #[test]
    fn markup_content_types_pass() {
        assert!(is_markup_content_type("text/html; charset=UTF-8"));
        assert!(is_markup_content_type("TEXT/HTML"));
        assert!(is_markup_content_type("application/xhtml+xml"));
        assert!(is_markup_content_type("application/xml"));
    }

    #[test]
    fn json_is_rejected_even_on_success() {
        assert!(!is_markup_content_type("application/json"));
        let err = check_content_type("https://x/y", Some("application/json")).unwrap_err();
        match err {
            FetchError::NotMarkup { url, content_type } => {
                assert_eq!(url, "https://x/y");
                assert_eq!(content_type, "application/json");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_content_type_is_rejected() {
        assert!(matches!(
            check_content_type("u", None),
            Err(FetchError::NotMarkup { .. })
        ));
    }
}
