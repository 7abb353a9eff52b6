//! Reflow TUI Entry Point
//!
//! Launches the reorder console in the terminal.
//!
//! Usage:
//!   reflow
//!
//! Environment:
//!   REFLOW_CONFIG   Config file (default: ~/.config/reflow/reflow.toml)
//!   RUST_LOG        Log filter; logs go to stderr

use std::io;
use std::panic;
use std::path::PathBuf;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reflow_core::config::{default_config_path, load_config_from_path};
use reflow_core::SceneConfig;
use reflow_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: reflow requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or the session");
        eprintln!("has no terminal (CI, ssh without -t).");
        std::process::exit(1);
    }

    // Load config before touching the terminal so errors print normally
    let config = load()?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

fn load() -> anyhow::Result<SceneConfig> {
    let path = std::env::var_os("REFLOW_CONFIG")
        .map(PathBuf::from)
        .or_else(default_config_path);
    Ok(load_config_from_path(path)?)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &SceneConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await
}
