use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use textgrid::{app::App, logging, EditorSession, EditorSettings};

/// A minimal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "textgrid", version, about)]
struct Cli {
    /// File to open; created on first save if it does not exist
    file: Option<PathBuf>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "textgrid=trace" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_level.as_deref())?;

    let settings = EditorSettings::load(cli.settings.as_deref())?;
    let session = match &cli.file {
        Some(path) => EditorSession::open(path, settings)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => EditorSession::new("", settings),
    };

    let mut terminal = setup_terminal()?;
    let result = App::new(session).run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!("Exited with error: {:#}", e);
    }
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
