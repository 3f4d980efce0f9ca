use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "casualcast",
    version,
    about = "Generate the pages of the Casual Commentary podcast site from its feed"
)]
pub(crate) struct Cli {
    /// Configuration file [default: casualcast.toml, if present]
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Feed to read instead of the configured one
    #[arg(long, global = true)]
    pub(crate) feed_url: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the props of the episode list
    Index,
    /// Print the props of one episode page
    Episode {
        /// Episode id, `1` being the oldest episode
        id: String,
    },
    /// Print the episode ids to pre-generate
    Paths,
    /// Write every page into a directory
    Export {
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Export, then export again whenever the pages go stale
    Watch {
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_episode_with_global_flags() {
        let cli = Cli::parse_from([
            "casualcast",
            "episode",
            "12",
            "--feed-url",
            "https://example.com/rss",
        ]);
        assert_eq!(cli.feed_url.as_deref(), Some("https://example.com/rss"));
        assert!(cli.config.is_none());
        assert!(matches!(cli.command, Command::Episode { ref id } if id == "12"));
    }

    #[test]
    fn export_needs_a_directory() {
        assert!(Cli::try_parse_from(["casualcast", "export"]).is_err());
        let cli = Cli::parse_from(["casualcast", "export", "-o", "site"]);
        assert!(matches!(cli.command, Command::Export { ref out } if out == &PathBuf::from("site")));
    }
}
