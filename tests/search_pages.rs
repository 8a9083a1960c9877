// tests/search_pages.rs
mod common;

use common::{fixture, StubSource};
use seiyuu_scrape::config::options::SiteOptions;
use seiyuu_scrape::specs::parse_search_page;

const SEARCH_URL: &str = "https://myanimelist.net/people.php?q=Kana%20Hanazawa&cat=person";

#[test]
fn single_hit_short_circuits_to_profile() {
    // the site answers an exact match with the profile itself
    let engine = StubSource::new()
        .html(SEARCH_URL, fixture("performer.html"))
        .engine();
    let hits = engine.search_performer("Kana Hanazawa").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits.get("Hanazawa, Kana"),
        Some("https://myanimelist.net/people/185/Kana_Hanazawa")
    );
}

#[test]
fn query_is_percent_encoded() {
    let engine = StubSource::new()
        .html(SEARCH_URL, fixture("search_empty.html"))
        .engine();
    engine.search_performer("  Kana Hanazawa ").unwrap();
}

#[test]
fn no_results_is_empty_not_error() {
    let hits = parse_search_page(&fixture("search_empty.html"), &SiteOptions::default()).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn listing_fixture_parses_every_row() {
    let hits = parse_search_page(&fixture("search_listing.html"), &SiteOptions::default()).unwrap();
    let got: Vec<(&str, &str)> = hits.iter().collect();
    assert_eq!(
        got,
        vec![
            ("Hanazawa, Kana", "https://myanimelist.net/people/185/Kana_Hanazawa"),
            ("Ueda, Kana", "https://myanimelist.net/people/612/Kana_Ueda"),
            ("Asumi, Kana", "https://myanimelist.net/people/11297/Kana_Asumi"),
        ]
    );
    assert!(hits.shadowed().is_empty());
}
