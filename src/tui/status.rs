//! Status messages shown under the braille cell.
//!
//! Maps player events and actuator outcomes to a one-line message with a
//! severity. Both the TUI and the plain runner use these.

use ratatui::style::Color;

use crate::player::PlayerEvent;
use crate::recognition::RecognitionError;
use crate::theme::Theme;

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    /// Long-running work (OCR, capture) in progress
    Processing,
}

impl StatusKind {
    pub fn color(self, theme: &Theme) -> Color {
        match self {
            Self::Info => theme.text_primary,
            Self::Success => theme.success,
            Self::Warning => theme.warning,
            Self::Error => theme.error,
            Self::Processing => theme.processing,
        }
    }

    /// Short tag for line-oriented output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "ok",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::Processing => "busy",
        }
    }
}

/// A message and its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Processing, message)
    }

    /// Status for a recognition outcome with nothing to play.
    pub fn from_recognition(error: &RecognitionError) -> Self {
        Self::warning(format!("{}. {}", error, error.guidance()))
    }

    /// `"<label>: <message>"` in the kind's color, for stderr output.
    pub fn to_ansi(&self, theme: &Theme) -> String {
        let text = format!("{}: {}", self.kind.label(), self.message);
        theme.colored_text(self.kind.color(theme), &text)
    }

    /// Status after `event`, given whether the actuator is connected.
    pub fn from_event(event: &PlayerEvent, actuator_connected: bool) -> Self {
        match event {
            PlayerEvent::Loaded { total } => {
                Self::success(format!("Loaded {} character(s).", total))
            }
            PlayerEvent::CharacterShown {
                character,
                index,
                total,
                ..
            } => {
                let shown = format!("Showing '{}' ({}/{}).", display_char(*character), index, total);
                if actuator_connected {
                    Self::info(format!("{} Sent to actuator.", shown))
                } else {
                    Self::warning(format!("{} Actuator not connected.", shown))
                }
            }
            PlayerEvent::Completed => Self::success("Braille text completed."),
            PlayerEvent::Reset => Self::info("Reset. Ready for new text."),
            PlayerEvent::ActuatorSendFailed { character, reason } => Self::error(format!(
                "Could not send '{}' to actuator: {}",
                display_char(*character),
                reason
            )),
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::info("Ready.")
    }
}

/// Printable form of a sequence character. Space is not visible on its own.
pub fn display_char(character: char) -> String {
    if character == ' ' {
        "␣".to_string()
    } else {
        character.to_string()
    }
}
