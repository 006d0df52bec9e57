//! Cancellable single-slot tick schedule.
//!
//! A player owns one `TickTimer`. Arming always cancels whatever was
//! pending, and every arm gets a fresh `TickId`, so a tick taken from an
//! older schedule can be recognised as stale and ignored.

use std::time::{Duration, Instant};

/// Identifies one arming of a [`TickTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TickId,
    due: Instant,
}

/// At most one pending tick.
#[derive(Debug, Default)]
pub struct TickTimer {
    last_id: u64,
    pending: Option<Pending>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick at `due`, cancelling any pending tick.
    pub fn arm(&mut self, due: Instant) -> TickId {
        self.cancel();
        self.last_id += 1;
        let id = TickId(self.last_id);
        self.pending = Some(Pending { id, due });
        id
    }

    /// Cancel the pending tick, returning its id.
    pub fn cancel(&mut self) -> Option<TickId> {
        self.pending.take().map(|p| p.id)
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending tick's id, if any.
    pub fn pending(&self) -> Option<TickId> {
        self.pending.map(|p| p.id)
    }

    /// When the pending tick is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Time left until the pending tick, zero if already due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|due| due.saturating_duration_since(now))
    }

    /// Take the pending tick if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<TickId> {
        match self.pending {
            Some(p) if p.due <= now => self.cancel(),
            _ => None,
        }
    }

    /// Take the pending tick only if it is `id`.
    pub fn take_matching(&mut self, id: TickId) -> bool {
        if self.pending() == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
