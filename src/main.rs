// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
        KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pricelens::app::{App, Command, Completion};
use pricelens::config::Config;
use pricelens::core::picker::{load_pending_file, parse_dropped_paths};
use pricelens::core::preview::read_as_data_uri;
use pricelens::core::render::Action;
use pricelens::core::submitter::Submitter;
use pricelens::core::page::Page;
use pricelens::logging::initialize_logging;
use ratatui::prelude::*;
use std::io::stdout;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

mod ui;

use ui::{HitMap, Target};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = initialize_logging()?;
    let config = Config::load()?;
    let submitter = Arc::new(Submitter::new(config.endpoint_url()?)?);
    info!(log = %log_path.display(), endpoint = %submitter.endpoint(), "Starting.");

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    stdout().execute(EnableBracketedPaste)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, submitter).await;

    // --- Restore Terminal ---
    disable_raw_mode()?;
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    info!("Stopped.");
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, submitter: Arc<Submitter>) -> Result<()> {
    let mut app = App::new(Page::default());
    let (tx, mut rx) = mpsc::channel(16);
    let mut tick: usize = 0;
    let mut host = Host::default();

    while !app.should_quit {
        terminal.draw(|frame| host.hits = ui::render(frame, &app, tick))?;
        tick = tick.wrapping_add(1);

        // The highlight raised by the drop has been drawn once; now handle the file.
        if let Some(payload) = host.pending_drop.take() {
            dispatch(finish_drop(&mut app, &payload), &submitter, &tx);
        }

        if event::poll(Duration::from_millis(100))? {
            let commands = handle_event(&mut app, &mut host, event::read()?);
            dispatch(commands, &submitter, &tx);
        }

        while let Ok(completion) = rx.try_recv() {
            app.apply(completion);
        }
    }
    Ok(())
}

/// Runs each command on its own task; completions come back through `tx`.
fn dispatch(commands: Vec<Command>, submitter: &Arc<Submitter>, tx: &mpsc::Sender<Completion>) {
    for command in commands {
        let tx = tx.clone();
        match command {
            Command::ReadPreview { token, file } => {
                tokio::spawn(async move {
                    let outcome = read_as_data_uri(&file).await;
                    let _ = tx.send(Completion::Preview { token, outcome }).await;
                });
            }
            Command::Submit { token, file } => {
                let submitter = Arc::clone(submitter);
                tokio::spawn(async move {
                    let outcome = submitter.submit(&file).await;
                    let _ = tx.send(Completion::Analysis { token, outcome }).await;
                });
            }
        }
    }
}

/// Host-side state carried from one frame to the next.
#[derive(Debug, Default)]
struct Host {
    hits: HitMap,
    /// A drop whose highlight has not been drawn yet.
    pending_drop: Option<String>,
}

fn handle_event(app: &mut App, host: &mut Host, event: Event) -> Vec<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(payload) => {
            handle_paste(app, host, payload);
            Vec::new()
        }
        Event::Mouse(mouse) => handle_mouse(app, &host.hits, mouse),
        _ => Vec::new(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Command> {
    // A notification blocks the page until it is acknowledged.
    if app.surface.notification().is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.surface.dismiss_notification();
        }
        return Vec::new();
    }

    if app.picker.open {
        return match key.code {
            KeyCode::Char(c) => {
                app.picker.push(c);
                Vec::new()
            }
            KeyCode::Backspace => {
                app.picker.pop();
                Vec::new()
            }
            KeyCode::Esc => {
                app.picker.close();
                Vec::new()
            }
            KeyCode::Enter => match app.picker.submit() {
                Some(path) => pick(app, &path),
                None => app.select_file(None),
            },
            _ => Vec::new(),
        };
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            Vec::new()
        }
        KeyCode::Char('o') | KeyCode::Enter => {
            app.picker.open();
            Vec::new()
        }
        KeyCode::Char('r') => app.reanalyze(),
        KeyCode::Char('c') => {
            app.clear();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Terminals deliver a dropped file as a paste of its path. The drop zone
/// lights up now; the file is loaded by [`finish_drop`] after the next frame.
fn handle_paste(app: &mut App, host: &mut Host, payload: String) {
    if app.surface.notification().is_some() {
        return;
    }
    if app.picker.open {
        app.picker.push_str(payload.trim());
        return;
    }
    app.drag_over();
    host.pending_drop = Some(payload);
}

fn finish_drop(app: &mut App, payload: &str) -> Vec<Command> {
    let paths = parse_dropped_paths(payload);
    debug!(count = paths.len(), "Paste received as drop.");
    let Some(path) = paths.first() else {
        app.drag_leave();
        return Vec::new();
    };
    match load_pending_file(path) {
        Ok(file) => app.drop_file(Some(file)),
        Err(e) => {
            app.drag_leave();
            app.report_unreadable(&e);
            Vec::new()
        }
    }
}

fn handle_mouse(app: &mut App, hits: &HitMap, mouse: MouseEvent) -> Vec<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Vec::new();
    }
    match hits.target_at(mouse.column, mouse.row) {
        Some(Target::DropZone) => {
            app.picker.open();
            Vec::new()
        }
        Some(Target::Button(Action::Reanalyze)) => app.reanalyze(),
        Some(Target::Button(Action::Clear)) => {
            app.clear();
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn pick(app: &mut App, path: &Path) -> Vec<Command> {
    match load_pending_file(path) {
        Ok(file) => app.select_file(Some(file)),
        Err(e) => {
            app.report_unreadable(&e);
            Vec::new()
        }
    }
}
