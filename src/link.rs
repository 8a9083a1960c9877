// src/link.rs
//! Identity & linking for one performer page.
//!
//! Rows arrive in document order. Each distinct entity url becomes one
//! `PerformedEntity`; every further row for that url only adds its catalog
//! entry to `appears_in` (once per entry url).
use std::collections::HashMap;

use crate::model::{CatalogEntry, PerformedEntity, Role};

/// One row of a performer's role table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRow {
    pub entry: CatalogEntry,
    pub entity_name: String,
    pub role: Role,
    pub entity_url: String,
}

#[derive(Debug, Default)]
pub struct RoleLinker {
    roles: Vec<PerformedEntity>,
    by_url: HashMap<String, usize>,
}

impl RoleLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the row introduced a new entity.
    pub fn push(&mut self, row: RoleRow) -> bool {
        if let Some(&i) = self.by_url.get(&row.entity_url) {
            let entity = &mut self.roles[i];
            if !entity.appears_in.iter().any(|e| e.url == row.entry.url) {
                entity.appears_in.push(row.entry);
            }
            return false;
        }

        self.by_url.insert(row.entity_url.clone(), self.roles.len());
        self.roles.push(PerformedEntity {
            name: row.entity_name,
            role: row.role,
            canonical_url: row.entity_url,
            appears_in: vec![row.entry],
        });
        true
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn finish(self) -> Vec<PerformedEntity> {
        self.roles
    }
}

pub fn link_rows<I>(rows: I) -> Vec<PerformedEntity>
where
    I: IntoIterator<Item = RoleRow>,
{
    let mut linker = RoleLinker::new();
    for row in rows {
        linker.push(row);
    }
    linker.finish()
}
