// tests/common/mod.rs
//
// In-memory page source serving fixtures by url.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use seiyuu_scrape::config::options::SiteOptions;
use seiyuu_scrape::core::net::{check_content_type, PageSource};
use seiyuu_scrape::engine::Engine;
use seiyuu_scrape::FetchError;

pub const ORIGIN: &str = "https://myanimelist.net";

pub fn fixture(name: &str) -> Vec<u8> {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests/fixtures");
    p.push(name);
    fs::read(&p).unwrap_or_else(|e| panic!("read {}: {e}", p.display()))
}

enum Reply {
    Page { content_type: String, body: Vec<u8> },
    Timeout,
    Status(u16),
}

#[derive(Default)]
pub struct StubSource {
    pages: HashMap<String, Reply>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(mut self, url: &str, body: Vec<u8>) -> Self {
        self.pages.insert(
            url.to_string(),
            Reply::Page { content_type: "text/html; charset=UTF-8".into(), body },
        );
        self
    }

    pub fn typed(mut self, url: &str, content_type: &str, body: &[u8]) -> Self {
        self.pages.insert(
            url.to_string(),
            Reply::Page { content_type: content_type.into(), body: body.to_vec() },
        );
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Reply::Timeout);
        self
    }

    pub fn status(mut self, url: &str, code: u16) -> Self {
        self.pages.insert(url.to_string(), Reply::Status(code));
        self
    }

    pub fn engine(self) -> Engine<StubSource> {
        Engine::with_source(self, SiteOptions::new(ORIGIN))
    }
}

impl PageSource for StubSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.pages.get(url) {
            Some(Reply::Page { content_type, body }) => {
                check_content_type(url, Some(content_type.as_str()))?;
                Ok(body.clone())
            }
            Some(Reply::Timeout) => Err(FetchError::Timeout { url: url.to_string() }),
            Some(Reply::Status(code)) => Err(FetchError::Status { url: url.to_string(), status: *code }),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}
