//! Terminal dashboard for the Finboard API.

pub mod app;
pub mod client;
pub mod snapshot;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use client::{ApiClient, ClientError};
pub use snapshot::Snapshot;
