//! Braille sequence player module
//!
//! Plays a recognized sequence one character at a time:
//!
//! - `state`: `PlaybackState`, `PlayerPhase` and `PlaybackTiming`
//! - `timer`: the cancellable single-slot tick schedule
//! - `events`: `PlayerEvent`, delivered to subscribers
//! - `sequence`: the `SequencePlayer` state machine
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//! use braille_reader::actuator::NoActuator;
//! use braille_reader::braille::SymbolTable;
//! use braille_reader::player::{PlaybackTiming, PlayerEvent, SequencePlayer};
//! use braille_reader::recognition::recognize;
//!
//! let mut player = SequencePlayer::new(Arc::new(NoActuator), PlaybackTiming::default());
//! player.subscribe(|event| {
//!     if let PlayerEvent::CharacterShown { character, index, total, .. } = event {
//!         println!("{} ({}/{})", character, index, total);
//!     }
//! });
//!
//! let sequence = recognize("Hi", SymbolTable::standard()).unwrap();
//! let now = Instant::now();
//! player.load(sequence, now);
//! while player.advance(now) {}
//! ```

mod events;
mod sequence;
pub mod state;
mod timer;

pub use events::PlayerEvent;
pub use sequence::{SequencePlayer, Subscriber};
pub use state::{PlaybackState, PlaybackTiming, PlayerPhase};
pub use timer::{TickId, TickTimer};
