use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use visual_console_config::ConsoleConfig;

mod app;
mod demo;
mod keymap;
mod log_reader;
mod logger;

use app::App;

/// Visual console: styled, grouped and foldable log entries in the terminal
#[derive(Debug, Parser)]
#[command(name = "visual-console", version, about)]
struct Args {
    /// Tail this file; lines may use the `::group id=..::` command syntax
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (defaults to .visual-console.toml in CWD or HOME)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run scripted demo producers
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The logger needs the configured level, so config problems are only
    // reported once it is up
    let (config, config_error) = match &args.config {
        Some(path) => (ConsoleConfig::load_from(path)?, None),
        None => match ConsoleConfig::load() {
            Ok(config) => (config, None),
            Err(e) => (ConsoleConfig::default(), Some(e)),
        },
    };

    let log_file = logger::init(&config.log_level)?;
    log::info!("Starting visual-console (log file {})", log_file.display());
    if let Some(e) = config_error {
        log::warn!("{:#}, using defaults", e);
    }

    let (handle, engine) = visual_console_layout::console(config.palette());
    logger::attach(handle.clone());

    if let Some(path) = args.file {
        log_reader::spawn_tail(path, handle.clone());
    }
    if args.demo {
        demo::spawn(handle.clone());
    }

    let mut app = App::new(engine, config.double_activation_window());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app, config.tick_interval());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Console loop failed: {:#}", err);
    }

    log::info!("Exiting visual-console");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_interval: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Render
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.render(area, frame.buffer_mut());
            })
            .context("Failed to draw frame")?;

        // Check if we should quit
        if !app.running {
            break;
        }

        // Handle events until the next frame is due
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        if last_tick.elapsed() >= tick_interval {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
