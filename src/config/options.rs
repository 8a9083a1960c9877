// src/config/options.rs
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub fetch: FetchOptions,
    pub site: SiteOptions,
}

/// Everything the fetcher attaches to or enforces on an outbound request.
/// Bound once into an `HttpFetcher`; never read from global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }
}

impl FetchOptions {
    /// Apply one timeout to both connect and read.
    pub fn set_timeout(&mut self, secs: u64) {
        self.connect_timeout = Duration::from_secs(secs);
        self.read_timeout = Duration::from_secs(secs);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteOptions {
    origin: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self { origin: s!(ORIGIN) }
    }
}

impl SiteOptions {
    pub fn new(origin: &str) -> Self {
        let mut site = Self::default();
        site.set_origin(origin);
        site
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Stored without a trailing slash so paths can be appended verbatim.
    pub fn set_origin(&mut self, origin: &str) {
        self.origin = s!(origin.trim().trim_end_matches('/'));
    }

    pub fn catalog_url(&self, username: &str) -> String {
        join!(&self.origin, CATALOG_PATH, username.trim())
    }

    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query.trim());
        join!(&self.origin, SEARCH_PATH, &encoded, SEARCH_SUFFIX)
    }

    /// Resolve a site-relative href against the origin. Absolute hrefs pass through.
    pub fn absolutize(&self, href: &str) -> String {
        let href = href.trim();
        if href.starts_with("http://") || href.starts_with("https://") {
            return s!(href);
        }
        if let Some(rest) = href.strip_prefix("//") {
            let scheme = self.origin.split("//").next().unwrap_or("https:");
            return join!(scheme, "//", rest);
        }
        if href.starts_with('/') {
            join!(&self.origin, href)
        } else {
            join!(&self.origin, "/", href)
        }
    }
}
