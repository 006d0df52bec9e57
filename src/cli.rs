//! Command-line interface definition.
//!
//! Lives in the library so the xtask crate can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::Config;

/// Version with build metadata, as shown by `--version`.
#[cfg(not(feature = "release"))]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("BRAILLE_READER_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BRAILLE_READER_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "braille-reader",
    version,
    long_version = LONG_VERSION,
    about = "Read text aloud in braille, one cell at a time",
    long_about = "Recognize text from a photo (or take it from the command line) and show it \
                  as braille cells one character at a time. Each character can also be sent \
                  to a serial braille actuator."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play text as braille
    #[command(long_about = "Play text as braille.\n\n\
        The text is upper-cased and every character without a braille cell \
        (punctuation, symbols) is dropped before playback.\n\n\
        EXAMPLE:\n  braille-reader play \"Hello world\" --plain")]
    Play {
        /// Text to play
        text: String,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Recognize text in an image and play it
    Read {
        /// Image file to read
        image: PathBuf,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Take a photo with the camera, recognize its text and play it
    Capture {
        /// Where to save the photo (defaults to a timestamped file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Print the braille symbol table
    Table {
        /// Draw each cell as a dot grid
        #[arg(long)]
        cells: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Open the configuration file in $EDITOR
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Flags shared by every command that plays text.
#[derive(Args, Debug, Clone, Default)]
pub struct PlaybackArgs {
    /// Serial device of the braille actuator (e.g. /dev/ttyACM0)
    #[arg(short, long, value_name = "PATH")]
    pub device: Option<PathBuf>,

    /// Serial baud rate
    #[arg(long, value_name = "N")]
    pub baud: Option<u32>,

    /// How long each character is shown, in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Delay before the first character, in milliseconds
    #[arg(long, value_name = "MS")]
    pub initial_delay_ms: Option<u64>,

    /// Keep the last character up for one more interval before completing
    #[arg(long)]
    pub hold_last: bool,

    /// Print one line per event instead of the interactive view
    #[arg(long)]
    pub plain: bool,

    /// Print events as JSON lines (implies --plain)
    #[arg(long)]
    pub json: bool,
}

impl PlaybackArgs {
    /// Overlay the flags on the loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(device) = &self.device {
            config.actuator.device = Some(device.clone());
            config.actuator.auto_connect = true;
        }
        if let Some(baud) = self.baud {
            config.actuator.baud_rate = baud;
        }
        if let Some(ms) = self.interval_ms {
            config.playback.char_interval_ms = ms;
        }
        if let Some(ms) = self.initial_delay_ms {
            config.playback.initial_delay_ms = ms;
        }
        if self.hold_last {
            config.playback.hold_last = true;
        }
        config
    }

    /// Whether playback should use line output rather than the TUI.
    pub fn line_output(&self) -> bool {
        self.plain || self.json || !atty::is(atty::Stream::Stdout)
    }
}

impl Commands {
    /// Whether this command takes over the terminal.
    pub fn uses_tui(&self) -> bool {
        match self {
            Commands::Play { playback, .. }
            | Commands::Read { playback, .. }
            | Commands::Capture { playback, .. } => !playback.line_output(),
            _ => false,
        }
    }
}
