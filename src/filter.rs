// src/filter.rs
use std::collections::HashSet;

use crate::model::{CatalogList, PerformedEntity};

/// Keep the entities that share at least one entry url with `catalog`.
///
/// `None` means no catalog was loaded and returns `roles` as is. An invalid
/// catalog reads as empty, so nothing survives it. Order is preserved and kept
/// entities are returned whole (`appears_in` untrimmed).
pub fn filter_by_catalog(
    roles: Vec<PerformedEntity>,
    catalog: Option<&CatalogList>,
) -> Vec<PerformedEntity> {
    let Some(catalog) = catalog else {
        return roles;
    };

    let urls: HashSet<&str> = catalog.entries().iter().map(|e| e.url.as_str()).collect();
    roles
        .into_iter()
        .filter(|r| r.appears_in.iter().any(|e| urls.contains(e.url.as_str())))
        .collect()
}
