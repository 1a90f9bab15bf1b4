//! Dashboard state

use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::client::ClientError;
use crate::snapshot::Snapshot;

/// What a key press asks the run loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

pub struct App {
    pub api_url: String,
    pub snapshot: Option<Snapshot>,
    /// Error from the most recent refresh, cleared by the next success
    pub last_error: Option<String>,
    pub last_attempt: Option<NaiveDateTime>,
    pub refresh_secs: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(api_url: impl Into<String>, refresh_secs: u64) -> Self {
        Self {
            api_url: api_url.into(),
            snapshot: None,
            last_error: None,
            last_attempt: None,
            refresh_secs,
            should_quit: false,
        }
    }

    /// Records a refresh result. A failed refresh keeps the previous snapshot on screen.
    pub fn apply(&mut self, result: Result<Snapshot, ClientError>) {
        self.last_attempt = Some(Local::now().naive_local());
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                warn!("Refresh failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Action::Quit
            }
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }
}
