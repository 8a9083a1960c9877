// src/specs/performer.rs
//! Scraping *spec* for a performer's profile page.
//!
//! Purpose:
//! - Read the role table: one row per (catalog entry, portrayed entity) pair.
//! - Link rows into one `PerformedEntity` per entity url (see `link`).
//!
//! Table choice follows `ROLE_TABLE.locators`: the semantic class selector
//! first, then the positional fallback (second table on the page). Cells are
//! read by position; inside a cell the first anchor with text wins.
//!
//! Each row is its own outcome. Header rows (no `<td>`) and placeholder rows
//! (no link at all, e.g. "No voice acting roles have been added") are skipped
//! silently, so a performer without roles is an empty list. Malformed rows are
//! logged and dropped, the rest of the page still loads.
use scraper::{ElementRef, Html, Selector};

use crate::config::options::SiteOptions;
use crate::core::html::{child_cells, first_text_link, selector, table_rows, text_of};
use crate::engine::types::{ROLE_TABLE, RoleTable, TableLocator};
use crate::error::{ParseError, RowError};
use crate::link::{RoleLinker, RoleRow};
use crate::model::{CatalogEntry, PerformedEntity, Role};

pub fn parse_performer_page(page: &[u8], site: &SiteOptions) -> Result<Vec<PerformedEntity>, ParseError> {
    let rows = parse_role_rows(&String::from_utf8_lossy(page), site, &ROLE_TABLE)?;
    let total = rows.len();

    let mut linker = RoleLinker::new();
    let mut good = 0usize;
    for (i, row) in rows.into_iter().enumerate() {
        match row {
            Ok(row) => {
                linker.push(row);
                good += 1;
            }
            Err(e) => logw!("Role row {i} skipped: {e}"),
        }
    }

    if total > 0 && good == 0 {
        return Err(ParseError::NoValidRecords { total });
    }
    logd!("Performer page: {good}/{total} rows, {} entities", linker.len());
    Ok(linker.finish())
}

/// One outcome per data row of the role table, in document order.
pub fn parse_role_rows(
    doc: &str,
    site: &SiteOptions,
    template: &RoleTable,
) -> Result<Vec<Result<RoleRow, RowError>>, ParseError> {
    let html = Html::parse_document(doc);
    let table = locate_table(&html, template.locators)?;

    let anchors = selector("a[href]")?;
    let divs = selector("div")?;

    Ok(table_rows(table)
        .into_iter()
        .filter_map(|tr| {
            let cells = child_cells(tr);
            if cells.is_empty() || tr.select(&anchors).next().is_none() {
                return None;
            }
            Some(read_row(&cells, template, &anchors, &divs, site))
        })
        .collect())
}

fn locate_table<'a>(html: &'a Html, locators: &[TableLocator]) -> Result<ElementRef<'a>, ParseError> {
    let tables = selector("table")?;
    for loc in locators {
        let found = match *loc {
            TableLocator::Selector(css) => {
                let sel = selector(css)?;
                html.select(&sel).next()
            }
            TableLocator::Index(n) => html.select(&tables).nth(n),
        };
        if let Some(table) = found {
            logd!("Role table located by {loc:?}");
            return Ok(table);
        }
    }
    Err(ParseError::MissingTable("role"))
}

fn read_row(
    cells: &[ElementRef<'_>],
    template: &RoleTable,
    anchors: &Selector,
    divs: &Selector,
    site: &SiteOptions,
) -> Result<RoleRow, RowError> {
    let entry_cell = *cells
        .get(template.entry_cell)
        .ok_or(RowError::MissingCell(template.entry_cell))?;
    let entity_cell = *cells
        .get(template.entity_cell)
        .ok_or(RowError::MissingCell(template.entity_cell))?;

    let (entry_title, entry_href) =
        first_text_link(entry_cell, anchors).ok_or(RowError::MissingLink(template.entry_cell))?;
    let (entity_name, entity_href) =
        first_text_link(entity_cell, anchors).ok_or(RowError::MissingLink(template.entity_cell))?;
    let role = role_label(entity_cell, anchors, divs).ok_or(RowError::MissingRole)?;

    Ok(RoleRow {
        entry: CatalogEntry::new(entry_title, site.absolutize(&entry_href)),
        entity_name,
        role: Role::from_label(&role),
        entity_url: site.absolutize(&entity_href),
    })
}

/// First `<div>` in the cell that carries text but no link.
fn role_label(cell: ElementRef<'_>, anchors: &Selector, divs: &Selector) -> Option<String> {
    cell.select(divs)
        .filter(|div| div.select(anchors).next().is_none())
        .map(text_of)
        .find(|t| !t.is_empty())
}
