// src/config/consts.rs

// Site
pub const ORIGIN: &str = "https://myanimelist.net";
pub const CATALOG_PATH: &str = "/animelist/";
pub const SEARCH_PATH: &str = "/people.php?q=";
pub const SEARCH_SUFFIX: &str = "&cat=person";

// Net config
// The site rejects default client identification, so pose as a browser.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:52.0) Gecko/20100101 Firefox/52.0";
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const READ_TIMEOUT_SECS: u64 = 15;

// Catalog page: list data lives in an attribute, not the visible table
pub const CATALOG_MARKER: &str = "data-items=";
pub const CATALOG_TITLE_FIELD: &str = "anime_title";
pub const CATALOG_URL_FIELD: &str = "anime_url";

// Performer page
pub const ROLE_TABLE_SELECTOR: &str = "table.js-table-people-character";
pub const ROLE_TABLE_INDEX: usize = 1;
pub const ROLE_ENTRY_CELL: usize = 1;
pub const ROLE_ENTITY_CELL: usize = 2;

// Search page
pub const SEARCH_LISTING_TITLE: &str = "Search People - MyAnimeList.net";
