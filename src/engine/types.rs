// src/engine/types.rs
//
// Declarative descriptions of where the data sits in each page template.
use crate::config::consts::*;

/// How to find a table on a page. Tried in order by the parsers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableLocator {
    /// First table matching a CSS selector.
    Selector(&'static str),
    /// N-th `<table>` in document order.
    Index(usize),
}

/// The performer page's role table.
#[derive(Clone, Copy, Debug)]
pub struct RoleTable {
    pub locators: &'static [TableLocator],
    /// Cell holding the catalog-entry link.
    pub entry_cell: usize,
    /// Cell holding the entity link and its role label.
    pub entity_cell: usize,
}

pub const ROLE_TABLE: RoleTable = RoleTable {
    locators: &[
        TableLocator::Selector(ROLE_TABLE_SELECTOR),
        TableLocator::Index(ROLE_TABLE_INDEX),
    ],
    entry_cell: ROLE_ENTRY_CELL,
    entity_cell: ROLE_ENTITY_CELL,
};

/// The people-search page, in both of its shapes.
#[derive(Clone, Copy, Debug)]
pub struct SearchPage {
    /// `<title>` of a results listing; anything else is a single profile.
    pub listing_title: &'static str,
    /// Where a single profile's own url can be read, in preference order: (selector, attribute).
    pub profile_url_sources: &'static [(&'static str, &'static str)],
    /// Anchor positions in a listing row.
    pub url_anchor: usize,
    pub name_anchor: usize,
}

pub const SEARCH_PAGE: SearchPage = SearchPage {
    listing_title: SEARCH_LISTING_TITLE,
    profile_url_sources: &[
        (r#"link[rel="canonical"]"#, "href"),
        (r#"meta[property="og:url"]"#, "content"),
    ],
    url_anchor: 0,
    name_anchor: 1,
};
