//! Events emitted by the sequence player.

use serde::Serialize;

use crate::braille::DotPattern;

/// Something observable happened in the player.
///
/// Subscribers receive events synchronously, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// A new sequence replaced the previous one.
    Loaded { total: usize },
    /// A character is now displayed. `index` is 1-based.
    CharacterShown {
        character: char,
        pattern: DotPattern,
        index: usize,
        total: usize,
    },
    /// Every character of the sequence has been shown.
    Completed,
    /// The player returned to idle.
    Reset,
    /// A character could not be handed to the actuator. Playback continues.
    ActuatorSendFailed { character: char, reason: String },
}
