use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Looked up in the working directory when no `--config` is given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "casualcast.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) feed: FeedConfig,
    pub(crate) site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct FeedConfig {
    pub(crate) url: String,
    pub(crate) timeout_secs: u64,
    pub(crate) user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://anchor.fm/s/2d4d2588/podcast/rss".to_owned(),
            timeout_secs: 30,
            user_agent: concat!("casualcast/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl FeedConfig {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct SiteConfig {
    pub(crate) title: String,
    pub(crate) tagline: String,
    pub(crate) description: String,
    /// Seconds a feed snapshot, and every page derived from it, stays fresh
    pub(crate) revalidate_secs: u64,
    /// Characters of boilerplate signature at the end of every description
    pub(crate) signature_len: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Casual Commentary".to_owned(),
            tagline: "Conversations about modern media.".to_owned(),
            description: "Unscripted discussions about modern media.".to_owned(),
            revalidate_secs: 10,
            signature_len: casualcast_data::projector::DEFAULT_SIGNATURE_LEN,
        }
    }
}

impl SiteConfig {
    pub(crate) fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

impl Config {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config")
    }

    /// Read `path` if given, otherwise the default file if it exists, otherwise use defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.site.revalidate(), Duration::from_secs(10));
        assert_eq!(config.site.signature_len, 7);
        assert_eq!(config.feed.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [feed]
            url = "https://example.com/feed.xml"

            [site]
            revalidate_secs = 60
            signature_len = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.url, "https://example.com/feed.xml");
        assert_eq!(config.feed.timeout_secs, 30);
        assert_eq!(config.site.title, "Casual Commentary");
        assert_eq!(config.site.revalidate_secs, 60);
        assert_eq!(config.site.signature_len, 0);
    }

    #[test]
    fn bad_types_are_rejected() {
        assert!(Config::parse("[site]\nrevalidate_secs = \"soon\"").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Config::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
