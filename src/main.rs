mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::messages::UiEvent;
use anyhow::Context;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use de_brackets::DoubleElimination;
use de_brackets::hover::HoverState;
use de_brackets::style::BracketStyle;
use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(cli) = handle_cli_args() else {
        return Ok(());
    };

    let bracket_path = cli
        .bracket_path
        .or_else(|| std::env::var("DETUI_BRACKET_JSON").ok().map(PathBuf::from));

    if let Some(out) = cli.export_svg {
        let path = bracket_path.context("--export-svg requires a bracket JSON path")?;
        let bracket = load_bracket(&path)?;
        let svg = de_brackets::svg::render_svg(
            &bracket,
            &BracketStyle::default(),
            &HoverState::default(),
        );
        std::fs::write(&out, svg)
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Wrote {}", out.display());
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = Arc::new(Mutex::new(App::new()));

    if let Some(path) = bracket_path {
        let mut guard = app.lock().await;
        match load_bracket(&path) {
            Ok(bracket) => guard.on_bracket_loaded(bracket, path.display().to_string()),
            Err(err) => guard.on_error(format!("{err:#}")),
        }
    }

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    main_ui_loop(terminal, app, ui_event_rx).await;

    input_handler.abort();

    Ok(())
}

struct CliArgs {
    bracket_path: Option<PathBuf>,
    export_svg: Option<PathBuf>,
}

/// Returns `None` when the invocation was fully handled (help/version).
fn handle_cli_args() -> Option<CliArgs> {
    let mut cli = CliArgs { bracket_path: None, export_svg: None };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("detui {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--export-svg" => {
                let Some(out) = args.next() else {
                    eprintln!("--export-svg requires an output path\n\n{}", usage_text());
                    std::process::exit(2);
                };
                cli.export_svg = Some(PathBuf::from(out));
            }
            _ if arg.starts_with('-') => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
            _ => cli.bracket_path = Some(PathBuf::from(arg)),
        }
    }

    Some(cli)
}

fn usage_text() -> &'static str {
    "detui - double-elimination bracket terminal viewer

Usage:
  detui [BRACKET_JSON]
  detui BRACKET_JSON --export-svg OUT.svg
  detui --help
  detui --version

Environment:
  DETUI_BRACKET_JSON   Bracket JSON path used when no argument is given
  DETUI_LOG            Log level for the in-app log overlay (error..trace)"
}

fn load_bracket(path: &PathBuf) -> anyhow::Result<DoubleElimination> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let bracket = DoubleElimination::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(bracket)
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
) {
    {
        let mut app_guard = app.lock().await;
        draw::draw(&mut terminal, &mut app_guard);
    }

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard);
                }
            }
        }
    }
}

async fn handle_ui_event(ui_event: UiEvent, app: &Arc<Mutex<App>>) -> bool {
    match ui_event {
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide).unwrap();
    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();
    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();
    terminal::disable_raw_mode().unwrap();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
