use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Channel bridge: hosts a channel page and relays its events to native code.
#[derive(Parser, Debug)]
#[command(name = "channel-bridge", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. "debug", "channel_webview=trace").
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a window hosting the channel page for a token.
    Run {
        /// Channel token passed to the page.
        #[arg(short, long)]
        token: String,

        /// Directory containing the bundled page (overrides `page.bundle_dir`).
        #[arg(short, long)]
        bundle: Option<PathBuf>,
    },
    /// Feed queued-message strings from a file (or `-` for stdin) through the bridge.
    Replay {
        /// One queued message per line.
        input: PathBuf,
    },
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_token() {
        let args = Args::try_parse_from(["channel-bridge", "run", "--token", "abc"]).unwrap();
        match args.command {
            Command::Run { token, bundle } => {
                assert_eq!(token, "abc");
                assert!(bundle.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_replay_with_global_flags() {
        let args = Args::try_parse_from([
            "channel-bridge",
            "replay",
            "messages.txt",
            "--log-level",
            "debug",
            "--config",
            "/tmp/c.toml",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(args.command, Command::Replay { input } if input == PathBuf::from("messages.txt")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["channel-bridge"]).is_err());
    }
}
