// src/specs/catalog.rs
//! Scraping *spec* for a user's list page (`/animelist/<user>`).
//!
//! Purpose:
//! - The visible table is rendered client-side; the ground truth is a JSON-ish
//!   array serialized into the `data-items` attribute.
//! - Pull that attribute out textually, decode entities, normalize the dialect
//!   to strict JSON, then read each record on its own.
//!
//! Responsibilities:
//! - Structural failures (no marker, no closing delimiter) are `ParseError`s.
//! - A malformed record is a `RowError` for that record only.
//! - Relative `anime_url` paths are resolved against the site origin.
//!
//! Non-Responsibilities:
//! - **No networking.** Callers hand in page bytes.
//! - **No validity flag.** `CatalogList` construction lives in the engine.
use serde::Deserialize;

use crate::config::consts::{CATALOG_MARKER, CATALOG_TITLE_FIELD, CATALOG_URL_FIELD};
use crate::config::options::SiteOptions;
use crate::core::html::attr_value_after;
use crate::core::sanitize::decode_entities;
use crate::error::{ParseError, RowError};
use crate::model::CatalogEntry;

/// Bare tokens the list data uses that strict JSON doesn't know.
const DIALECT: &[(&str, &str)] = &[
    ("None", "null"),
    ("True", "true"),
    ("False", "false"),
    ("undefined", "null"),
    ("NaN", "null"),
];

#[derive(Deserialize)]
#[serde(untagged)]
enum TitleValue {
    Text(String),
    // all-digit titles come through as numbers
    Number(serde_json::Number),
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "anime_title")]
    title: Option<TitleValue>,
    #[serde(rename = "anime_url")]
    url: Option<String>,
}

/// Parse a list page into entries. Bad records are logged and skipped.
pub fn parse_catalog_list(page: &[u8], site: &SiteOptions) -> Result<Vec<CatalogEntry>, ParseError> {
    let records = parse_catalog_records(&String::from_utf8_lossy(page), site)?;
    let total = records.len();

    let mut entries = Vec::with_capacity(total);
    for (i, record) in records.into_iter().enumerate() {
        match record {
            Ok(entry) => entries.push(entry),
            Err(e) => logw!("Catalog record {i} skipped: {e}"),
        }
    }

    if total > 0 && entries.is_empty() {
        return Err(ParseError::NoValidRecords { total });
    }
    logd!("Catalog parsed: {}/{} records", entries.len(), total);
    Ok(entries)
}

/// One outcome per record in the embedded array, in document order.
pub fn parse_catalog_records(
    doc: &str,
    site: &SiteOptions,
) -> Result<Vec<Result<CatalogEntry, RowError>>, ParseError> {
    let raw = attr_value_after(doc, CATALOG_MARKER)?;
    let json = normalize_dialect(&decode_entities(raw));
    let array = top_level_array(&json)?;

    Ok(split_top_level(array)
        .into_iter()
        .map(|rec| read_record(rec, site))
        .collect())
}

fn read_record(rec: &str, site: &SiteOptions) -> Result<CatalogEntry, RowError> {
    if !rec.starts_with('{') {
        return Err(RowError::Malformed(snippet(rec)));
    }
    let raw: RawRecord =
        serde_json::from_str(rec).map_err(|e| RowError::Malformed(e.to_string()))?;

    let title = match raw.title {
        Some(TitleValue::Text(t)) if !t.trim().is_empty() => s!(t.trim()),
        Some(TitleValue::Number(n)) => n.to_string(),
        _ => return Err(RowError::MissingField(CATALOG_TITLE_FIELD)),
    };
    let url = match raw.url {
        Some(u) if !u.trim().is_empty() => site.absolutize(&u),
        _ => return Err(RowError::MissingField(CATALOG_URL_FIELD)),
    };
    Ok(CatalogEntry { title, url })
}

fn snippet(s: &str) -> String {
    s.chars().take(40).collect()
}

/// Rewrite the list data's dialect into strict JSON.
///
/// Outside strings: `DIALECT` tokens are substituted and trailing commas before
/// `]`/`}` are dropped. Single-quoted strings become double-quoted; raw control
/// characters inside strings are escaped.
pub fn normalize_dialect(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    while i < chars.len() {
        let c = chars[i];
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                    if c == '\'' {
                        out.push('\'');
                    } else {
                        out.push('\\');
                        out.push(c);
                    }
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    out.push('"');
                    quote = None;
                } else if c == '"' {
                    out.push_str("\\\"");
                } else if c == '\n' {
                    out.push_str("\\n");
                } else if c == '\r' {
                    out.push_str("\\r");
                } else if c == '\t' {
                    out.push_str("\\t");
                } else {
                    out.push(c);
                }
                i += 1;
            }
            None => match c {
                '"' | '\'' => {
                    out.push('"');
                    quote = Some(c);
                    i += 1;
                }
                ',' => {
                    let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                    if !matches!(next, Some(']') | Some('}')) {
                        out.push(',');
                    }
                    i += 1;
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    let start = i;
                    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                        i += 1;
                    }
                    let word: String = chars[start..i].iter().collect();
                    match DIALECT.iter().find(|(from, _)| *from == word) {
                        Some((_, to)) => out.push_str(to),
                        None => out.push_str(&word),
                    }
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            },
        }
    }
    out
}

/// The first `[`…`]` span with brackets balanced and paired by kind, strings respected.
fn top_level_array(s: &str) -> Result<&str, ParseError> {
    let start = s.find('[').ok_or(ParseError::MarkerNotFound("["))?;
    let mut open: Vec<char> = Vec::new();
    let mut in_str = false;
    let mut escaped = false;

    for (off, c) in s[start..].char_indices() {
        if in_str {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '[' => open.push(']'),
            '{' => open.push('}'),
            ']' | '}' => {
                if open.pop() != Some(c) {
                    return Err(ParseError::Unterminated("catalog array"));
                }
                if open.is_empty() {
                    return Ok(&s[start..start + off + 1]);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::Unterminated("catalog array"))
}

/// Elements of a JSON array, split on depth-0 commas. Empty array → empty vec.
fn split_top_level(array: &str) -> Vec<&str> {
    let inner = &array[1..array.len() - 1];
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escaped = false;
    let mut from = 0usize;

    for (off, c) in inner.char_indices() {
        if in_str {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_str = true,
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                out.push(inner[from..off].trim());
                from = off + 1;
            }
            _ => {}
        }
    }
    let last = inner[from..].trim();
    if !last.is_empty() || !out.is_empty() {
        out.push(last);
    }
    out
}
