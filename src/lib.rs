//! braille-reader: turn photographed or typed text into timed braille
//! cell playback, optionally mirrored to a serial dot actuator.

pub mod actuator;
pub mod braille;
pub mod camera;
pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod recognition;
pub mod theme;
pub mod tui;

pub use config::Config;
