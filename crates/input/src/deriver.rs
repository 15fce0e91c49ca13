//! Held-key diffing: raw bursts to press/release events.

use arrayvec::ArrayVec;

use crate::decode::Keys;
use crate::source::{RawInputSource, RawModeScope};
use crate::types::{KeyCode, KeyEvent, Result, EVENT_QUEUE_CAPACITY, HELD_KEY_CAPACITY};

/// Keys decoded from one poll, in arrival order.
///
/// A key the terminal delivered twice in one burst appears twice.
pub type HeldKeys = ArrayVec<KeyCode, HELD_KEY_CAPACITY>;

type EventQueue = ArrayVec<KeyEvent, EVENT_QUEUE_CAPACITY>;

/// Derives discrete key events from successive held-key snapshots.
///
/// Each [`poll`](Self::poll) produces a fresh queue: presses first (keys held now
/// that were not held last poll), then releases (keys held last poll that are no
/// longer held). Consumers drain it with [`pop_event`](Self::pop_event).
///
/// Quirk: a key decoded more than once in the same burst produces no press event
/// for that poll, even when it was not held before.
#[derive(Debug, Default)]
pub struct InputDeriver {
    previous: HeldKeys,
    current: HeldKeys,
    events: EventQueue,
    cursor: usize,
    raw: [u8; HELD_KEY_CAPACITY],
}

impl InputDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the pending bytes from `source` and rebuild the event queue.
    ///
    /// Raw mode is held only for the read and is restored before returning, on
    /// error paths too. Returns the number of events queued.
    pub fn poll<S: RawInputSource + ?Sized>(&mut self, source: &mut S) -> Result<usize> {
        let n = {
            let mut scope = RawModeScope::acquire(&mut *source)?;
            let n = scope.read_available(&mut self.raw)?;
            scope.finish()?;
            n
        };
        source.discard_pending()?;

        let raw = self.raw;
        let count = self.advance(&raw[..n]).len();
        tracing::trace!(
            bytes = n,
            held = self.current.len(),
            events = count,
            "input polled"
        );
        Ok(count)
    }

    /// Rotate generations, decode `burst` into the current one, and diff.
    ///
    /// Bytes past [`HELD_KEY_CAPACITY`] are dropped, as the raw read bound would.
    pub fn advance(&mut self, burst: &[u8]) -> &[KeyEvent] {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();

        let burst = &burst[..burst.len().min(HELD_KEY_CAPACITY)];
        for key in Keys::new(burst) {
            // Every key consumes at least one byte, so this never overflows.
            if self.current.try_push(key).is_err() {
                break;
            }
        }

        self.rebuild_events();
        &self.events
    }

    fn rebuild_events(&mut self) {
        self.events.clear();
        self.cursor = 0;

        for &key in &self.current {
            let occurrences = self.current.iter().filter(|&&k| k == key).count();
            if occurrences > 1 || self.previous.contains(&key) {
                continue;
            }
            self.events.push(KeyEvent::pressed(key));
        }

        for (i, &key) in self.previous.iter().enumerate() {
            if self.previous[..i].contains(&key) || self.current.contains(&key) {
                continue;
            }
            self.events.push(KeyEvent::released(key));
        }
    }

    /// Next unconsumed event, or `None` once the queue is drained.
    pub fn pop_event(&mut self) -> Option<KeyEvent> {
        let ev = self.events.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ev)
    }

    /// Events from the last poll, consumed or not.
    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// Keys held as of the last poll.
    pub fn held(&self) -> &[KeyCode] {
        &self.current
    }

    /// Keys held as of the poll before that.
    pub fn previous(&self) -> &[KeyCode] {
        &self.previous
    }
}
