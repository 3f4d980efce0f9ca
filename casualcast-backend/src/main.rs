// #![deny(missing_docs)]
#![deny(unused_results)]
#![deny(unreachable_pub)]
#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![deny(bad_style)]
#![deny(unused)]
#![deny(clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod config;
mod export;
mod fetch;
mod pages;

use cli::{Cli, Command};
use config::Config;
use fetch::HttpFeed;
use pages::Site;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is for page props
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.feed_url {
        config.feed.url = url;
    }
    tracing::debug!("{:?}", config);

    let site = Site::new(HttpFeed::from_config(&config.feed)?, config.site);
    match cli.command {
        Command::Index => print_json(&site.index().await?)?,
        Command::Episode { id } => print_json(&site.episode(&id).await?)?,
        Command::Paths => print_json(&site.paths().await?)?,
        Command::Export { out } => export::export(&site, &out).await?,
        Command::Watch { out } => export::watch(&site, &out).await?,
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
