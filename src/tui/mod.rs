//! Terminal user interface.

pub mod app;
pub mod player_app;
pub mod status;
pub mod widgets;

pub use app::{App, InputResult};
pub use player_app::PlayerApp;
pub use status::{StatusKind, StatusLine};
