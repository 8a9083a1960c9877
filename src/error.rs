// src/error.rs
use thiserror::Error;

/// Why a page could not be fetched. Every variant names the URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned non-markup content type '{content_type}'")]
    NotMarkup { url: String, content_type: String },

    #[error("failed reading body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::NotMarkup { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// A structural assumption about the page markup did not hold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("marker '{0}' not found in page")]
    MarkerNotFound(&'static str),

    #[error("no closing delimiter for {0}")]
    Unterminated(&'static str),

    #[error("none of the {total} records could be read")]
    NoValidRecords { total: usize },

    #[error("{0} table not found")]
    MissingTable(&'static str),

    #[error("page has no <title>")]
    MissingTitle,

    #[error("single-profile page lacks its {0}")]
    MissingProfile(&'static str),

    #[error("invalid selector '{0}'")]
    Selector(&'static str),
}

/// One malformed row or record. Reported per row; never aborts a page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no cell at position {0}")]
    MissingCell(usize),

    #[error("cell {0} has no link with text")]
    MissingLink(usize),

    #[error("entity cell has no role label")]
    MissingRole,

    #[error("record is not an object: {0}")]
    Malformed(String),

    #[error("record lacks field '{0}'")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
