//! Terminal setup, teardown and the refresh loop.

use std::io::{self, Stdout};
use std::panic;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::app::{Action, App};
use crate::client::ApiClient;
use crate::ui;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug)]
enum Event {
    Key(KeyEvent),
    Resize,
}

pub fn init_terminal() -> Result<Tui> {
    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Reads crossterm events on a plain thread and forwards them to the async loop.
fn spawn_event_reader() -> mpsc::UnboundedReceiver<Event> {
    let (sender, receiver) = mpsc::unbounded_channel();
    thread::spawn(move || loop {
        match event::poll(Duration::from_millis(250)) {
            Ok(true) => {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => sender.send(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(_, _)) => sender.send(Event::Resize),
                    Ok(_) => Ok(()),
                    Err(_) => return,
                };
                if forwarded.is_err() {
                    return;
                }
            }
            Ok(false) => {
                if sender.is_closed() {
                    return;
                }
            }
            Err(_) => return,
        }
    });
    receiver
}

/// Polls the API every `interval` and redraws until the user quits.
pub async fn run(client: &ApiClient, app: &mut App, interval: Duration) -> Result<()> {
    let mut terminal = init_terminal()?;
    let outcome = event_loop(&mut terminal, client, app, interval).await;
    restore_terminal()?;
    outcome
}

async fn event_loop(
    terminal: &mut Tui,
    client: &ApiClient,
    app: &mut App,
    interval: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader();
    let mut next_fetch = Instant::now();
    info!(
        "Dashboard polling {} every {}s",
        client.base_url(),
        interval.as_secs()
    );

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = sleep_until(next_fetch) => {
                debug!("Refreshing dashboard");
                app.apply(client.fetch_snapshot().await);
                next_fetch = Instant::now() + interval;
            }
            event = events.recv() => match event {
                Some(Event::Key(key)) => match app.handle_key(key) {
                    Action::Refresh => next_fetch = Instant::now(),
                    Action::Quit | Action::None => {}
                },
                Some(Event::Resize) => {}
                None => app.should_quit = true,
            },
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
