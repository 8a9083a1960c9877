// src/engine/engine.rs
//
// The three operations a front-end calls. Each runs start to finish on the
// caller's thread: one fetch, one parse, no state kept between calls.
use crate::config::options::{EngineOptions, SiteOptions};
use crate::core::net::{HttpFetcher, PageSource};
use crate::error::Result;
use crate::filter::filter_by_catalog;
use crate::model::{CatalogList, NameIndex, PerformedEntity, Performer};
use crate::specs;

pub struct Engine<S: PageSource = HttpFetcher> {
    source: S,
    site: SiteOptions,
}

impl Engine<HttpFetcher> {
    pub fn new(opts: &EngineOptions) -> Self {
        Self::with_source(HttpFetcher::new(&opts.fetch), opts.site.clone())
    }
}

impl<S: PageSource> Engine<S> {
    pub fn with_source(source: S, site: SiteOptions) -> Self {
        Self { source, site }
    }

    pub fn site(&self) -> &SiteOptions {
        &self.site
    }

    /// Load a user's list. Failures come back as an invalid list.
    pub fn load_catalog(&self, username: &str) -> CatalogList {
        match self.try_load_catalog(username) {
            Ok(list) => list,
            Err(e) => {
                loge!("Catalog for '{}' unavailable: {e}", username.trim());
                CatalogList::invalid(username.trim())
            }
        }
    }

    pub fn try_load_catalog(&self, username: &str) -> Result<CatalogList> {
        let username = username.trim();
        let url = self.site.catalog_url(username);
        logf!("Loading list of '{username}'");

        let page = self.source.fetch(&url)?;
        let entries = specs::parse_catalog_list(&page, &self.site)?;
        let list = CatalogList::new(username, entries);
        logf!("List of '{username}': {} entries", list.len());
        Ok(list)
    }

    /// Name search. An empty index means nothing matched.
    pub fn search_performer(&self, query: &str) -> Result<NameIndex> {
        let url = self.site.search_url(query);
        logf!("Searching for '{}'", query.trim());

        let page = self.source.fetch(&url)?;
        let index = specs::parse_search_page(&page, &self.site)?;
        logf!("Search '{}': {} result(s)", query.trim(), index.len());
        Ok(index)
    }

    pub fn load_performer_profile(&self, profile_url: &str) -> Result<Performer> {
        let profile_url = self.site.absolutize(profile_url);
        logf!("Loading performer {profile_url}");

        let page = self.source.fetch(&profile_url)?;
        let roles = specs::parse_performer_page(&page, &self.site)?;
        logf!("Performer {profile_url}: {} roles", roles.len());
        Ok(Performer { profile_url, roles })
    }

    /// A performer's roles, narrowed to `catalog` when one is given.
    pub fn load_performer(
        &self,
        profile_url: &str,
        catalog: Option<&CatalogList>,
    ) -> Result<Vec<PerformedEntity>> {
        let performer = self.load_performer_profile(profile_url)?;
        let total = performer.roles.len();
        let kept = filter_by_catalog(performer.roles, catalog);
        if let Some(list) = catalog {
            logf!("{}/{} roles overlap the list of '{}'", kept.len(), total, list.owner_handle);
        }
        Ok(kept)
    }
}
