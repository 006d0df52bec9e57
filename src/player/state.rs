//! Player state management
//!
//! Contains the `PlaybackState` owned by the sequence player, plus the
//! phase and timing types shared with the rendering layer.

use std::time::Duration;

use crate::braille::DotPattern;
use crate::recognition::RecognizedSequence;

/// Where the player is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPhase {
    /// No sequence loaded
    #[default]
    Idle,
    /// Sequence loaded, waiting for the next tick
    AwaitingStep,
    /// Every character has been shown
    Completed,
}

/// Delays between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    /// Delay between `load` and the first character
    pub initial_delay: Duration,
    /// How long each character stays up
    pub char_interval: Duration,
    /// Keep the last character up for one more interval before completing
    pub hold_last: bool,
}

impl PlaybackTiming {
    pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
    pub const DEFAULT_CHAR_INTERVAL: Duration = Duration::from_millis(3000);

    pub fn new(initial_delay: Duration, char_interval: Duration) -> Self {
        Self {
            initial_delay,
            char_interval,
            hold_last: false,
        }
    }

    /// Same timing with the last character held for one interval.
    pub fn holding_last(mut self) -> Self {
        self.hold_last = true;
        self
    }
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_DELAY, Self::DEFAULT_CHAR_INTERVAL)
    }
}

/// Playback state of one player.
///
/// `current_char`/`current_pattern` describe `sequence[position - 1]` after
/// a step, and are empty before the first step and after completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    pub(super) phase: PlayerPhase,
    pub(super) sequence: RecognizedSequence,
    pub(super) position: usize,
    pub(super) current_char: Option<char>,
    pub(super) current_pattern: DotPattern,
}

impl PlaybackState {
    /// Nothing loaded.
    pub fn idle() -> Self {
        Self {
            phase: PlayerPhase::Idle,
            sequence: RecognizedSequence::empty(),
            position: 0,
            current_char: None,
            current_pattern: DotPattern::EMPTY,
        }
    }

    /// `sequence` loaded, nothing shown yet.
    pub(super) fn loaded(sequence: RecognizedSequence) -> Self {
        Self {
            phase: PlayerPhase::AwaitingStep,
            sequence,
            ..Self::idle()
        }
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    pub fn sequence(&self) -> &RecognizedSequence {
        &self.sequence
    }

    /// Number of characters already shown.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    pub fn current_char(&self) -> Option<char> {
        self.current_char
    }

    pub fn current_pattern(&self) -> DotPattern {
        self.current_pattern
    }

    /// Fraction of the sequence shown, in `0.0..=1.0`. Empty sequences
    /// count as fully shown.
    pub fn progress(&self) -> f64 {
        if self.sequence.is_empty() {
            1.0
        } else {
            self.position as f64 / self.sequence.len() as f64
        }
    }

    pub(super) fn clear_current(&mut self) {
        self.current_char = None;
        self.current_pattern = DotPattern::EMPTY;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::idle()
    }
}
