//! Command-line interface for online_tictactoe.

use clap::{Parser, Subcommand};

/// Online Tic-Tac-Toe - play a matched opponent over a realtime socket
#[derive(Parser, Debug)]
#[command(name = "online_tictactoe")]
#[command(about = "Two-player tic-tac-toe with online matchmaking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the matchmaking server and play in the terminal
    Play {
        /// Matchmaking server websocket URL (overrides config and environment)
        #[arg(long)]
        server_url: Option<String>,

        /// Your display name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_overrides() {
        let cli = Cli::parse_from([
            "online_tictactoe",
            "play",
            "--server-url",
            "ws://example.test:8000",
            "--name",
            "alice",
        ]);
        let Command::Play { server_url, name, config } = cli.command;
        assert_eq!(server_url.as_deref(), Some("ws://example.test:8000"));
        assert_eq!(name.as_deref(), Some("alice"));
        assert!(config.is_none());
    }
}
