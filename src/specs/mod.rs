// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! This module hosts the **page-specific scraping rules** for the site.
//! Each spec focuses on a single page and encodes *where the ground truth lives
//! in the markup* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure parsing** of fetched bytes: list page, performer page, search page.
//! - **Selector choice & precedence** (semantic selector first, template
//!   position as fallback; see `engine::types`).
//! - **Per-row outcomes**: a malformed row/record is a `RowError` for that row
//!   only. Structural failures (marker or table missing) are `ParseError`s.
//!
//! ## What does **not** live here
//! - **Networking**: the engine fetches, specs only read bytes.
//! - **Cross-page logic**: filtering a performer against a list lives in `filter`.
//!
//! ## Typical call chain
//! ```text
//! caller → Engine::load_* → PageSource::fetch → specs::<page>::parse_*
//!                                              ↘ link::RoleLinker (performer page)
//! ```
//!
//! ## Testing notes
//! - Specs are tested **offline** against inline markup and `tests/fixtures/`.
pub mod catalog;
pub mod performer;
pub mod search;

pub use catalog::parse_catalog_list;
pub use performer::parse_performer_page;
pub use search::parse_search_page;
