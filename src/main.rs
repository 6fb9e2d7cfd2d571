use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

use qboard::app::{App, AppMessage, Route};
use qboard::config::Config;
use qboard::ui;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::from_env();
    init_logging(&config);
    tracing::info!(api = %config.api_base_url, "starting qboard");

    let (mut app, mut rx) = App::new(&config);
    let mut terminal = setup_terminal()?;
    app.navigate(Route::TodoList { page: 1 });

    let result = run(&mut terminal, &mut app, &mut rx).await;
    restore_terminal()?;
    result
}

async fn run(
    terminal: &mut Term,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(_)) => {} // resize and mouse events redraw on the next pass
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                }
            }
            Some(message) = rx.recv() => {
                app.handle_message(message);
                // Drain whatever else is already queued before redrawing.
                while let Ok(message) = rx.try_recv() {
                    app.handle_message(message);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Put the terminal into raw mode on the alternate screen, and make sure a
/// panic restores it before the report prints.
fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));

    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Log to a file so the TUI screen stays clean. Logging is best-effort:
/// failures to set it up are ignored.
fn init_logging(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let Some(dir) = &config.log_dir else {
        return;
    };
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("qboard.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("qboard=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
