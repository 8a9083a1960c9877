// src/cli.rs
use std::error::Error;

use crate::config::options::{EngineOptions, SiteOptions};
use crate::core::net::PageSource;
use crate::engine::Engine;
use crate::model::{CatalogList, NameIndex, PerformedEntity};

pub type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pick {
    /// 1-based position in the search listing.
    Position(usize),
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Search { query: String, pick: Option<Pick> },
    Profile(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub user: Option<String>,
    pub target: Target,
    pub options: EngineOptions,
    pub verbose: bool,
}

/// What a run should do after parsing, `Help` short-circuits everything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Params),
}

pub fn help_text() -> &'static str {
    include_str!("cli_help.txt")
}

pub fn parse_args<I>(args: I) -> CliResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut user = None;
    let mut query = None;
    let mut pick = None;
    let mut profile = None;
    let mut options = EngineOptions::default();
    let mut verbose = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-u" | "--user" => user = Some(args.next().ok_or("Missing value for --user")?),
            "-s" | "--search" => query = Some(args.next().ok_or("Missing value for --search")?),
            "-p" | "--pick" => {
                let v = args.next().ok_or("Missing value for --pick")?;
                pick = Some(parse_pick(&v)?);}
            "--profile" => profile = Some(args.next().ok_or("Missing value for --profile")?),
            "--origin" => {
                let v = args.next().ok_or("Missing value for --origin")?;
                options.site = SiteOptions::new(&v);}
            "--user-agent" => options.fetch.user_agent = args.next().ok_or("Missing value for --user-agent")?,
            "--timeout" => {
                let v: u64 = args.next().ok_or("Missing value for --timeout")?.parse()?;
                if v == 0 { return Err("Timeout must be at least 1 second".into()); }
                options.fetch.set_timeout(v);}
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    // A blank username means "no list", same as leaving it out.
    let user = user.filter(|u| !u.trim().is_empty());

    let target = match (query, profile) {
        (Some(_), Some(_)) => return Err("Use either --search or --profile, not both".into()),
        (Some(q), None) if q.trim().is_empty() => return Err("Search query is empty".into()),
        (Some(query), None) => Target::Search { query, pick },
        (None, Some(url)) => {
            if pick.is_some() { return Err("--pick only applies to --search".into()); }
            Target::Profile(url)
        }
        (None, None) => return Err("Specify --search <query> or --profile <url>".into()),
    };

    Ok(Command::Run(Params { user, target, options, verbose }))
}

fn parse_pick(v: &str) -> CliResult<Pick> {
    let v = v.trim();
    if v.is_empty() { return Err("Empty --pick".into()); }
    match v.parse::<usize>() {
        Ok(0) => Err("--pick positions start at 1".into()),
        Ok(n) => Ok(Pick::Position(n)),
        Err(_) => Ok(Pick::Name(s!(v))),
    }
}

/// Choose a profile url from search hits. `Ok(None)` means the caller has to
/// pick: several hits and no `--pick`.
pub fn choose(index: &NameIndex, pick: Option<&Pick>) -> CliResult<Option<String>> {
    if index.is_empty() {
        return Err("No performers found".into());
    }
    match pick {
        None if index.len() == 1 => Ok(index.nth(0).map(|(_, url)| s!(url))),
        None => Ok(None),
        Some(Pick::Position(n)) => n
            .checked_sub(1)
            .and_then(|i| index.nth(i))
            .map(|(_, url)| Some(s!(url)))
            .ok_or_else(|| format!("--pick {} out of range (1..={})", n, index.len()).into()),
        Some(Pick::Name(name)) => index
            .get(name)
            .map(|url| Some(s!(url)))
            .ok_or_else(|| format!("No search result named '{}'", name).into()),
    }
}

pub fn run<S: PageSource>(engine: &Engine<S>, params: &Params) -> CliResult<String> {
    let catalog = match &params.user {
        Some(user) => {
            let list = engine.load_catalog(user);
            if !list.valid {
                return Err(format!("Invalid username '{}'", user.trim()).into());
            }
            Some(list)
        }
        None => None,
    };

    let profile_url = match &params.target {
        Target::Profile(url) => url.clone(),
        Target::Search { query, pick } => {
            let index = engine.search_performer(query)?;
            match choose(&index, pick.as_ref())? {
                Some(url) => url,
                None => return Ok(render_hits(&index)),
            }
        }
    };

    let roles = engine.load_performer(&profile_url, catalog.as_ref())?;
    Ok(render_roles(&roles, catalog.as_ref()))
}

pub fn render_hits(index: &NameIndex) -> String {
    let mut out = s!("Several performers match; re-run with --pick <n|name>:\n");
    for (i, (name, url)) in index.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}  <{}>\n", i + 1, name, url));
    }
    out
}

/// One line per entity, then its entries. With a list, only shared entries are shown.
pub fn render_roles(roles: &[PerformedEntity], catalog: Option<&CatalogList>) -> String {
    if roles.is_empty() {
        return s!("No matching characters.\n");
    }
    let mut out = s!();
    for entity in roles {
        out.push_str(&format!("{} ({})\n", entity.name, entity.role));
        let entries = match catalog {
            Some(list) => entity.shared_entries(list),
            None => entity.appears_in.iter().collect(),
        };
        for entry in entries {
            out.push_str(&join!("    ", &entry.title, "\n"));
        }
    }
    out
}
