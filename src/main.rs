//! Online Tic-Tac-Toe - terminal client
//!
//! Connects to a matchmaking server and plays one match in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use online_tictactoe::{ClientConfig, run_tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            server_url,
            name,
            config,
        } => {
            let mut resolved = ClientConfig::load(config.as_deref())?;
            if let Some(url) = server_url {
                resolved = resolved.with_server_url(url);
            }
            if let Some(name) = name {
                resolved = resolved.with_player_name(name);
            }
            run_tui(resolved).await
        }
    }
}
