//! The sequence player state machine.
//!
//! The player is driven by its owner: call [`SequencePlayer::poll`] with the
//! current time from the event loop (or [`SequencePlayer::advance`] to step
//! without waiting). All mutation happens on that single timeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use super::events::PlayerEvent;
use super::state::{PlaybackState, PlaybackTiming, PlayerPhase};
use super::timer::{TickId, TickTimer};
use crate::actuator::ActuatorSink;
use crate::braille::{SymbolTable, CLEAR_SENTINEL};
use crate::recognition::RecognizedSequence;

/// Callback receiving every player event.
pub type Subscriber = Box<dyn FnMut(&PlayerEvent)>;

/// Plays a recognized sequence one character per tick.
pub struct SequencePlayer {
    table: &'static SymbolTable,
    timing: PlaybackTiming,
    sink: Arc<dyn ActuatorSink>,
    state: PlaybackState,
    timer: TickTimer,
    subscribers: Vec<Subscriber>,
}

impl SequencePlayer {
    /// Create an idle player using the standard symbol table.
    pub fn new(sink: Arc<dyn ActuatorSink>, timing: PlaybackTiming) -> Self {
        Self::with_table(SymbolTable::standard(), sink, timing)
    }

    pub fn with_table(
        table: &'static SymbolTable,
        sink: Arc<dyn ActuatorSink>,
        timing: PlaybackTiming,
    ) -> Self {
        Self {
            table,
            timing,
            sink,
            state: PlaybackState::idle(),
            timer: TickTimer::new(),
            subscribers: Vec::new(),
        }
    }

    /// Register a callback for all future events.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&PlayerEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlayerPhase {
        self.state.phase
    }

    pub fn timing(&self) -> PlaybackTiming {
        self.timing
    }

    /// The actuator this player forwards to.
    pub fn sink(&self) -> &Arc<dyn ActuatorSink> {
        &self.sink
    }

    /// When the next tick is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Time left until the next tick, if one is scheduled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Id of the scheduled tick, for owners that run their own timers.
    pub fn pending_tick(&self) -> Option<TickId> {
        self.timer.pending()
    }

    /// Replace whatever is playing with `sequence`.
    ///
    /// Cancels the pending tick before scheduling the first step after the
    /// initial delay. An empty sequence completes immediately.
    pub fn load(&mut self, sequence: RecognizedSequence, now: Instant) {
        self.timer.cancel();
        let total = sequence.len();
        self.state = PlaybackState::loaded(sequence);
        debug!(total, "sequence loaded");
        self.emit(PlayerEvent::Loaded { total });

        if total == 0 {
            self.complete();
        } else {
            self.timer.arm(now + self.timing.initial_delay);
        }
    }

    /// Play the current sequence again from the start.
    ///
    /// Does nothing when idle.
    pub fn replay(&mut self, now: Instant) {
        if self.state.phase == PlayerPhase::Idle {
            return;
        }
        let sequence = self.state.sequence.clone();
        self.load(sequence, now);
    }

    /// Return to idle, cancelling any pending tick and clearing the actuator.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.state = PlaybackState::idle();
        debug!("player reset");
        self.forward(CLEAR_SENTINEL);
        self.emit(PlayerEvent::Reset);
    }

    /// Run the pending tick if it is due at `now`.
    ///
    /// Returns true if a tick ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.timer.take_due(now) {
            Some(_) => {
                self.step(now);
                true
            }
            None => false,
        }
    }

    /// Run the pending tick now, regardless of its deadline.
    ///
    /// Returns false if nothing was scheduled.
    pub fn advance(&mut self, now: Instant) -> bool {
        match self.timer.cancel() {
            Some(_) => {
                self.step(now);
                true
            }
            None => false,
        }
    }

    /// Run the tick identified by `id`.
    ///
    /// Ids from a schedule that has since been cancelled or replaced are
    /// ignored and return false.
    pub fn fire(&mut self, id: TickId, now: Instant) -> bool {
        if !self.timer.take_matching(id) {
            trace!(?id, "ignoring stale tick");
            return false;
        }
        self.step(now);
        true
    }

    fn step(&mut self, now: Instant) {
        let position = self.state.position;
        let Some(character) = self.state.sequence.get(position) else {
            self.complete();
            return;
        };

        let pattern = self.table.pattern_for(character);
        let total = self.state.sequence.len();
        self.state.current_char = Some(character);
        self.state.current_pattern = pattern;
        self.emit(PlayerEvent::CharacterShown {
            character,
            pattern,
            index: position + 1,
            total,
        });
        self.forward(character);
        self.state.position = position + 1;

        if self.state.position < total || self.timing.hold_last {
            self.timer.arm(now + self.timing.char_interval);
        } else {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.timer.cancel();
        self.state.phase = PlayerPhase::Completed;
        self.state.clear_current();
        debug!(total = self.state.total(), "sequence completed");
        self.forward(CLEAR_SENTINEL);
        self.emit(PlayerEvent::Completed);
    }

    /// Best-effort hand-off to the actuator. Failures become events.
    fn forward(&mut self, character: char) {
        if !self.sink.is_connected() {
            trace!(?character, "actuator not connected, skipping");
            return;
        }
        if let Err(e) = self.sink.send(character) {
            warn!(?character, error = %e, "actuator send failed");
            self.emit(PlayerEvent::ActuatorSendFailed {
                character,
                reason: e.to_string(),
            });
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }
}
