// src/specs/search.rs
//! Scraping *spec* for the people-search page.
//!
//! The same url answers in two shapes:
//! - a **results listing** (title is exactly `SEARCH_PAGE.listing_title`): one
//!   row per hit, anchor 0 carries the profile href, anchor 1 the name;
//! - a **single profile**, when the query matched exactly one person and the
//!   site jumped straight to it.
//!
//! "No results" is an empty `NameIndex`, never an error.
use scraper::{ElementRef, Html, Selector};

use crate::config::options::SiteOptions;
use crate::core::html::{first_attr, page_title, selector, table_rows, text_of};
use crate::engine::types::{SEARCH_PAGE, SearchPage};
use crate::error::ParseError;
use crate::model::NameIndex;

pub fn parse_search_page(page: &[u8], site: &SiteOptions) -> Result<NameIndex, ParseError> {
    parse_search_doc(&String::from_utf8_lossy(page), site, &SEARCH_PAGE)
}

pub fn parse_search_doc(doc: &str, site: &SiteOptions, template: &SearchPage) -> Result<NameIndex, ParseError> {
    let html = Html::parse_document(doc);
    let title = page_title(&html)?.ok_or(ParseError::MissingTitle)?;

    if title != template.listing_title {
        logd!("Search landed on a profile page: '{title}'");
        return single_profile(&html, site, template);
    }
    listing(&html, site, template)
}

fn single_profile(html: &Html, site: &SiteOptions, template: &SearchPage) -> Result<NameIndex, ParseError> {
    let h1 = selector("h1")?;
    let name = html
        .select(&h1)
        .map(text_of)
        .find(|t| !t.is_empty())
        .ok_or(ParseError::MissingProfile("name"))?;

    let mut url = None;
    for &(css, attr) in template.profile_url_sources {
        url = first_attr(html, css, attr)?;
        if url.is_some() {
            break;
        }
    }
    let url = match url {
        Some(u) => u,
        None => positional_profile_url(html)?.ok_or(ParseError::MissingProfile("url"))?,
    };

    Ok(NameIndex::singleton(name, site.absolutize(&url)))
}

/// Legacy location: first table, second cell, third div, its link.
fn positional_profile_url(html: &Html) -> Result<Option<String>, ParseError> {
    let tables = selector("table")?;
    let tds = selector("td")?;
    let divs = selector("div")?;
    let anchors = selector("a[href]")?;

    Ok(html
        .select(&tables)
        .next()
        .and_then(|t| t.select(&tds).nth(1))
        .and_then(|td| td.select(&divs).nth(2))
        .and_then(|div| div.select(&anchors).next())
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string))
}

fn listing(html: &Html, site: &SiteOptions, template: &SearchPage) -> Result<NameIndex, ParseError> {
    let tables = selector("table")?;
    let anchors = selector("a[href]")?;
    let table = html
        .select(&tables)
        .next()
        .ok_or(ParseError::MissingTable("search results"))?;

    let mut index = NameIndex::new();
    for (i, tr) in table_rows(table).into_iter().enumerate() {
        let Some((name, href)) = read_row(tr, &anchors, template) else {
            logd!("Search row {i} has no result link");
            continue;
        };
        let url = site.absolutize(&href);
        if let Some(prev) = index.insert(name.clone(), url.clone()) {
            logw!("Search name collision for '{name}': {prev} replaced by {url}");
        }
    }
    Ok(index)
}

fn read_row(tr: ElementRef<'_>, anchors: &Selector, template: &SearchPage) -> Option<(String, String)> {
    let links: Vec<ElementRef<'_>> = tr.select(anchors).collect();
    let href = links.get(template.url_anchor)?.value().attr("href")?.trim();
    let name = text_of(*links.get(template.name_anchor)?);
    if href.is_empty() || name.is_empty() {
        return None;
    }
    Some((name, s!(href)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::SEARCH_LISTING_TITLE;

    fn site() -> SiteOptions {
        SiteOptions::default()
    }

    fn listing_page(rows: &str) -> String {
        format!(
            "<html><head><title>\n{SEARCH_LISTING_TITLE}\n</title></head><body><table>{rows}</table></body></html>"
        )
    }

    fn hit(id: u32, name: &str) -> String {
        format!(
            r#"<tr><td><a href="/people/{id}/x"><img src="i.jpg"></a></td><td><a href="/people/{id}/x">{name}</a></td></tr>"#
        )
    }

    #[test]
    fn listing_maps_names_to_profiles() {
        let doc = listing_page(&[hit(185, "Hanazawa, Kana"), hit(7, "Kana Ueda")].concat());
        let idx = parse_search_page(doc.as_bytes(), &site()).unwrap();
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.get("Hanazawa, Kana"), Some("https://myanimelist.net/people/185/x"));
        assert_eq!(idx.nth(1).map(|(n, _)| n), Some("Kana Ueda"));
    }

    #[test]
    fn header_only_listing_is_empty() {
        let doc = listing_page("<tr><td>No results found</td></tr>");
        let idx = parse_search_page(doc.as_bytes(), &site()).unwrap();
        assert!(idx.is_empty());
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let doc = listing_page(&[hit(1, "Sato"), hit(2, "Sato")].concat());
        let idx = parse_search_page(doc.as_bytes(), &site()).unwrap();
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("Sato"), Some("https://myanimelist.net/people/2/x"));
        assert_eq!(idx.shadowed().len(), 1);
    }

    #[test]
    fn single_profile_short_circuits() {
        let doc = r#"<html><head><title>Kana Hanazawa - MyAnimeList.net</title>
            <link rel="canonical" href="https://myanimelist.net/people/185/Kana_Hanazawa"></head>
            <body><h1 class="title-name"> Hanazawa,  Kana </h1>
            <table><tr><td>a</td><td>b</td></tr><tr><td><a href="/people/1/other">Other</a></td><td>c</td></tr></table>
            </body></html>"#;
        let idx = parse_search_page(doc.as_bytes(), &site()).unwrap();
        assert_eq!(idx.len(), 1);
        assert_eq!(
            idx.get("Hanazawa, Kana"),
            Some("https://myanimelist.net/people/185/Kana_Hanazawa")
        );
    }

    #[test]
    fn single_profile_positional_fallback() {
        let doc = r#"<html><head><title>Kana Hanazawa - MyAnimeList.net</title></head>
            <body><h1>Kana Hanazawa</h1>
            <table><tr><td>left</td><td><div>x</div><div>y</div><div><a href="/people/185/Kana_Hanazawa">Kana</a></div></td></tr></table>
            </body></html>"#;
        let idx = parse_search_page(doc.as_bytes(), &site()).unwrap();
        assert_eq!(idx.get("Kana Hanazawa"), Some("https://myanimelist.net/people/185/Kana_Hanazawa"));
    }

    #[test]
    fn single_profile_without_url_fails() {
        let doc = "<html><head><title>Someone</title></head><body><h1>Someone</h1></body></html>";
        let err = parse_search_page(doc.as_bytes(), &site()).unwrap_err();
        assert_eq!(err, ParseError::MissingProfile("url"));
    }

    #[test]
    fn no_title_fails() {
        let err = parse_search_page(b"<html><body><table></table></body></html>", &site()).unwrap_err();
        assert_eq!(err, ParseError::MissingTitle);
    }
}
