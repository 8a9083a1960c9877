// src/lib.rs
//! Cross-reference a user's tracked list with a performer's roles, both
//! scraped from the catalog site.
//!
//! Three operations, all on [`engine::Engine`]: load a list by username,
//! search a performer by name, load a performer's roles filtered against a
//! previously loaded list.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod filter;
pub mod link;
pub mod model;
pub mod specs;

pub use engine::Engine;
pub use error::{EngineError, FetchError, ParseError, Result, RowError};
pub use model::{CatalogEntry, CatalogList, NameIndex, PerformedEntity, Performer, Role};
