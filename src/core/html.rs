// src/core/html.rs
//
// Markup-query helpers. DOM work goes through `scraper`; the catalog blob is
// pulled out by a plain textual scan since it sits inside an attribute.
use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use super::sanitize::normalize_ws;

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Raw value of the first attribute introduced by `marker` (e.g. `data-items=`),
/// case-insensitive on the marker. Handles `"…"` and `'…'` quoting.
pub fn attr_value_after<'a>(s: &'a str, marker: &'static str) -> Result<&'a str, ParseError> {
    // ASCII lowering keeps byte offsets aligned with `s`
    let lc = to_lower(s);
    let m = lc.find(&to_lower(marker)).ok_or(ParseError::MarkerNotFound(marker))?;
    let after = &s[m + marker.len()..];
    let after = after.trim_start();

    let quote = match after.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(ParseError::Unterminated(marker)),
    };
    let body = &after[1..];
    let close = body.find(quote).ok_or(ParseError::Unterminated(marker))?;
    Ok(&body[..close])
}

pub fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::Selector(css))
}

/// Whitespace-normalized text content.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn page_title(doc: &Html) -> Result<Option<String>, ParseError> {
    let sel = selector("title")?;
    Ok(doc.select(&sel).next().map(text_of))
}

/// First `<a>` under `el` that has both an href and visible text.
/// `anchors` is expected to be `a[href]`, compiled once by the caller.
pub fn first_text_link(el: ElementRef<'_>, anchors: &Selector) -> Option<(String, String)> {
    el.select(anchors).find_map(|a| {
        let text = text_of(a);
        let href = a.value().attr("href")?.trim();
        if text.is_empty() || href.is_empty() {
            None
        } else {
            Some((text, href.to_string()))
        }
    })
}

/// Rows of `table` itself (direct or via thead/tbody/tfoot), not of nested tables.
pub fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match to_lower(child.value().name()).as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name().eq_ignore_ascii_case("tr")),
            ),
            _ => {}
        }
    }
    rows
}

/// Direct `<td>` children of a row, skipping cells of nested tables.
pub fn child_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name().eq_ignore_ascii_case("td"))
        .collect()
}

/// Value of `attr` on the first element matching `css`.
pub fn first_attr(doc: &Html, css: &'static str, attr: &str) -> Result<Option<String>, ParseError> {
    let sel = selector(css)?;
    Ok(doc
        .select(&sel)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_value_double_and_single_quotes() {
        let s = r#"<table data-items="[{&quot;a&quot;:1}]" class="x">"#;
        assert_eq!(attr_value_after(s, "data-items=").unwrap(), "[{&quot;a&quot;:1}]");

        let s = "<table DATA-ITEMS= '[]'>";
        assert_eq!(attr_value_after(s, "data-items=").unwrap(), "[]");
    }

    #[test]
    fn attr_value_errors() {
        assert_eq!(
            attr_value_after("<table>", "data-items="),
            Err(ParseError::MarkerNotFound("data-items="))
        );
        assert_eq!(
            attr_value_after(r#"<table data-items="[{"#, "data-items="),
            Err(ParseError::Unterminated("data-items="))
        );
    }

    #[test]
    fn first_text_link_skips_image_links() {
        let doc = Html::parse_fragment(
            r#"<div><a href="/img"><img src="x.png"></a><a href="/anime/1"> Bebop </a></div>"#,
        );
        let sel = selector("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        let anchors = selector("a[href]").unwrap();
        assert_eq!(
            first_text_link(div, &anchors),
            Some((s!("Bebop"), s!("/anime/1")))
        );
    }

    #[test]
    fn child_cells_ignores_nested_tables() {
        let doc = Html::parse_document(
            "<table><tr><td>a</td><td><table><tr><td>inner</td></tr></table></td><td>c</td></tr></table>",
        );
        let sel = selector("tr").unwrap();
        let row = doc.select(&sel).next().unwrap();
        let cells = child_cells(row);
        assert_eq!(cells.len(), 3);
        assert_eq!(text_of(cells[2]), "c");
    }

    #[test]
    fn table_rows_stay_in_their_table() {
        let doc = Html::parse_document(
            "<table id=outer><tr><td>1</td></tr><tr><td><table><tr><td>x</td></tr></table></td></tr></table>",
        );
        let sel = selector("table").unwrap();
        let outer = doc.select(&sel).next().unwrap();
        assert_eq!(table_rows(outer).len(), 2);
    }

    #[test]
    fn title_is_trimmed() {
        let doc = Html::parse_document("<html><head><title>\nSearch People - MyAnimeList.net\n</title></head></html>");
        assert_eq!(page_title(&doc).unwrap().as_deref(), Some("Search People - MyAnimeList.net"));
    }
}
