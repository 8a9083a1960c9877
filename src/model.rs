// src/model.rs
//! In-memory records built from scraped pages.
//!
//! Nothing here is mutated once a load finishes; a new load yields new values.
use std::collections::HashSet;
use std::fmt;

/// One item on a user's list. Identity is `url`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub title: String,
    pub url: String,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }
}

/// A user's list as loaded from their list page.
///
/// `valid == false` means the load failed; `entries()` is then empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogList {
    pub owner_handle: String,
    entries: Vec<CatalogEntry>,
    pub valid: bool,
}

impl CatalogList {
    /// Entries are de-duplicated by url, first occurrence wins.
    pub fn new(owner_handle: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.url.clone()))
            .collect();
        Self { owner_handle: owner_handle.into(), entries, valid: true }
    }

    pub fn invalid(owner_handle: impl Into<String>) -> Self {
        Self { owner_handle: owner_handle.into(), entries: Vec::new(), valid: false }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        if self.valid { &self.entries[..] } else { &[] }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.entries().iter().any(|e| e.url == url)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Main,
    Supporting,
    Other(String),
}

impl Role {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "main" => Role::Main,
            "supporting" => Role::Supporting,
            _ => Role::Other(s!(label)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Main => f.write_str("Main"),
            Role::Supporting => f.write_str("Supporting"),
            Role::Other(s) => f.write_str(s),
        }
    }
}

/// A character (or other role) a performer portrays. Identity is `canonical_url`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerformedEntity {
    pub name: String,
    pub role: Role,
    pub canonical_url: String,
    /// Unique by url, in the order first seen on the performer page.
    pub appears_in: Vec<CatalogEntry>,
}

impl PerformedEntity {
    /// The part of `appears_in` that is also on `catalog`, in `appears_in` order.
    pub fn shared_entries<'a>(&'a self, catalog: &CatalogList) -> Vec<&'a CatalogEntry> {
        let urls: HashSet<&str> = catalog.entries().iter().map(|e| e.url.as_str()).collect();
        self.appears_in
            .iter()
            .filter(|e| urls.contains(e.url.as_str()))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Performer {
    pub profile_url: String,
    /// Unique by `canonical_url`.
    pub roles: Vec<PerformedEntity>,
}

/// Display name → profile url, from one search.
///
/// Keys are unique. A repeated name overwrites the earlier url in place
/// (last write wins); the overwritten urls are kept in `shadowed`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameIndex {
    pairs: Vec<(String, String)>,
    shadowed: Vec<(String, String)>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(name: impl Into<String>, url: impl Into<String>) -> Self {
        let mut index = Self::new();
        index.insert(name, url);
        index
    }

    /// Returns the url that was overwritten, if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) -> Option<String> {
        let name = name.into();
        let url = url.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => {
                let prev = std::mem::replace(old, url);
                self.shadowed.push((name, prev.clone()));
                Some(prev)
            }
            None => {
                self.pairs.push((name, url));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs.iter().find(|(n, _)| n == name).map(|(_, u)| u.as_str())
    }

    /// Positional lookup, in insertion order.
    pub fn nth(&self, i: usize) -> Option<(&str, &str)> {
        self.pairs.get(i).map(|(n, u)| (n.as_str(), u.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    /// (name, url) pairs lost to a later row with the same name.
    pub fn shadowed(&self) -> &[(String, String)] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
