mod config;
mod controller;
mod error;
mod gateway;
mod logging;
mod model;
mod view;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;

use config::Cli;
use controller::{SyncLoop, SyncSettings};
use gateway::{CommandGateway, HttpTransport};
use view::AppView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (file_config, config_note) = config::load(cli.config.as_deref());
    let config = file_config.merge_cli(&cli);

    if let Err(e) = logging::init_logging(&config.logging.directory) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    if let Some(note) = config_note {
        tracing::info!("{}", note);
    }

    tracing::info!(base_url = %config.device.base_url, "=== Renderer Remote Starting ===");

    let transport = HttpTransport::new(
        &config.device.base_url,
        Duration::from_millis(config.device.request_timeout_ms),
    )
    .context("could not create HTTP client")?;
    let mut sync = SyncLoop::new(CommandGateway::new(transport), SyncSettings::from(&config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut sync).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Renderer Remote shutting down");
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sync: &SyncLoop<HttpTransport>,
) -> io::Result<()> {
    let playback = sync.playback_info();
    terminal.draw(|f| {
        AppView::render(
            f,
            &playback,
            sync.window(),
            sync.library(),
            sync.ui_state(),
            sync.store().last_error(),
        );
    })?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sync: &mut SyncLoop<HttpTransport>,
) -> io::Result<()> {
    let mut events = EventStream::new();

    let mut ticker = tokio::time::interval(sync.settings().poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; initialize stands in for it
    ticker.tick().await;

    sync.initialize();
    tracing::info!(
        phase = ?sync.phase(),
        in_flight = sync.in_flight(),
        "Initial refresh dispatched"
    );

    loop {
        draw(terminal, sync)?;

        tokio::select! {
            _ = ticker.tick() => sync.tick(),
            Some(done) = sync.next_reply(), if sync.has_pending() => sync.apply_reply(done),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => sync.handle_key_event(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }

        // Stopping here is the teardown: no further ticks are issued
        if sync.should_quit() {
            break;
        }
    }

    Ok(())
}
