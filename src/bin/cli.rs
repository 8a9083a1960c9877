// src/bin/cli.rs
use color_eyre::eyre::{eyre, Result};
use log::LevelFilter;

use seiyuu_scrape::cli::{self, Command};
use seiyuu_scrape::engine::Engine;

fn main() -> Result<()> {
    color_eyre::install()?;

    let params = match cli::parse_args(std::env::args().skip(1)).map_err(|e| eyre!("{e}"))? {
        Command::Help => {
            eprintln!("{}", cli::help_text());
            return Ok(());
        }
        Command::Run(params) => params,
    };

    let mut clog = colog::default_builder();
    clog.filter(None, if params.verbose { LevelFilter::Debug } else { LevelFilter::Info });
    clog.init();

    let engine = Engine::new(&params.options);
    let out = cli::run(&engine, &params).map_err(|e| eyre!("{e}"))?;
    print!("{out}");
    Ok(())
}
