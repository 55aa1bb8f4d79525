//! Terminal UI for online tic-tac-toe

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, BufRead, Stdout, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::controller::MatchController;
use crate::games::tictactoe::Position;
use crate::matchmaking;
use crate::session::{GameSession, PlayerName};
use crate::view::Screen;
use app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the terminal client against the configured server.
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    init_logging(config.log_file())?;
    info!(server_url = %config.server_url(), "Starting online tic-tac-toe");

    let preset = config.player_name().as_deref().and_then(|raw| PlayerName::parse(raw).ok());
    let name = match preset {
        Some(name) => name,
        None => {
            let stdin = io::stdin();
            match prompt_name(&mut stdin.lock(), &mut io::stdout())? {
                Some(name) => name,
                None => {
                    info!("Name prompt cancelled");
                    return Ok(());
                }
            }
        }
    };

    let mut terminal = setup_terminal()?;
    let res = play(&mut terminal, &config, name).await;
    restore_terminal(&mut terminal)?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        return Err(err);
    }
    Ok(())
}

/// Shows the connecting screen, connects, and plays until the user quits.
async fn play(terminal: &mut Term, config: &ClientConfig, name: PlayerName) -> Result<()> {
    terminal.draw(|f| ui::draw(f, &Screen::Connecting, Position::Center))?;

    let (client, inbound) = matchmaking::connect(config.server_url()).await?;
    let controller = MatchController::start(GameSession::new(name), client, inbound)?;
    let mut app = App::new(controller);

    let res = run_app(terminal, &mut app);
    app.into_controller().shutdown().await;
    res
}

/// Enters raw mode and the alternate screen, undoing both if either step fails.
fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Logs go to a file so they don't tear the alternate screen.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Asks for a display name until a non-blank one is entered.
///
/// Returns `None` on end of input.
pub fn prompt_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<PlayerName>> {
    write!(output, "Enter your name: ")?;
    output.flush()?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match PlayerName::parse(&line) {
            Ok(name) => return Ok(Some(name)),
            Err(e) => {
                write!(output, "{} Enter your name: ", e)?;
                output.flush()?;
            }
        }
    }
}

#[instrument(skip_all)]
fn run_app(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        app.pump();
        let screen = app.screen();
        let cursor = app.cursor();
        terminal.draw(|f| ui::draw(f, &screen, cursor))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(command) = input::command_for(key.code) else {
                continue;
            };
            if !app.handle(command) {
                info!("User quit");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reasks_on_blank() {
        let mut input = Cursor::new("   \n  carol \n");
        let mut output = Vec::new();
        let name = prompt_name(&mut input, &mut output).unwrap().unwrap();
        assert_eq!(name.as_str(), "carol");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("You need to write something!"));
    }

    #[test]
    fn test_prompt_cancelled_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt_name(&mut input, &mut output).unwrap().is_none());
    }
}
