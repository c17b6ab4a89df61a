use anyhow::Result;
use clap::Parser;
use crossterm::event::EventStream;
use futures::StreamExt;
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod ui;
mod utils;

use crate::ui::{ChatUI, Control, CrosstermBackend, Terminal};
use chatflow::{config::Settings, Session};

/// Command line arguments for ChatFlow
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ChatFlow: a terminal chat demo with simulated contacts.",
    long_about = "ChatFlow is a terminal chat client demo. Sign-in, contacts and messages are \
    simulated in memory; nothing is sent anywhere and nothing is saved.\n\n\
    Settings are read from --config, or from <config dir>/chatflow/settings.json if present."
)]
struct Args {
    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where log records are written, overrides the settings file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace; overrides the settings file
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(path) = args.log_file {
        settings.log_file = path;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }

    utils::setup_logging(&settings.log_file, settings.level_filter()?)?;
    info!("ChatFlow starting up");
    info!("System information: {} {}", std::env::consts::OS, std::env::consts::ARCH);
    info!("Logging to file: {}", settings.log_file.display());

    let mut terminal = ui::setup_terminal()?;
    let result = run_main_loop(&mut terminal, &settings).await;

    // Restore the terminal even if the loop failed
    ui::restore_terminal(terminal)?;

    if let Err(e) = &result {
        error!("ChatFlow stopped with an error: {}", e);
    }
    info!("ChatFlow shut down");
    result
}

/// Run the main event loop
async fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
) -> Result<()> {
    let mut session = Session::new(settings);
    let mut chat_ui = ChatUI::new();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(settings.tick_ms.max(50)));

    loop {
        terminal.draw(|f| chat_ui.draw(f, &session))?;

        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Control::Quit = chat_ui.handle_event(&mut session, &event) {
                        info!("Quit requested");
                        break;
                    }
                }
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}
