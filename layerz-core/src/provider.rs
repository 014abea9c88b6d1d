//! The pull/push boundary between the core and the outside world.

use crate::event::Event;

/// Supplies events to, and accepts events from, `Keyboard`. Implementations
/// own the actual file descriptor, pipe, or in-memory script; the core
/// only ever calls these two methods.
///
/// `write_event` has no return value by design: a provider failure is
/// unrecoverable and the implementation is expected to log and terminate
/// the process itself rather than propagate a `Result` the core would have
/// nowhere useful to send.
pub trait EventProvider {
    /// Returns the next event, or `None` on timeout or end-of-stream.
    /// `timeout_ms == 0` means "wait indefinitely" — the only mode the
    /// core itself ever requests.
    fn read_event(&mut self, timeout_ms: u32) -> Option<Event>;

    fn write_event(&mut self, event: Event);
}

/// In-memory provider driven by a prepared, timestamped script. Used by
/// every test in this crate and by integration tests downstream.
///
/// Events are scripted with a virtual millisecond timestamp (distinct from
/// the `Event`'s own `time_sec`/`time_us`, which a test author sets
/// directly on each `Event` to drive timing-sensitive handlers like
/// `LayerHold`). The virtual clock only matters for non-zero timeouts;
/// since the core always calls `read_event(0)`, in practice this behaves
/// as a plain queue that reports end-of-stream once exhausted.
pub struct ScriptedProvider {
    pending: std::collections::VecDeque<(u64, Event)>,
    clock_ms: u64,
    pub emitted: Vec<Event>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<(u64, Event)>) -> Self {
        Self {
            pending: script.into_iter().collect(),
            clock_ms: 0,
            emitted: Vec::new(),
        }
    }

    /// Convenience constructor for scripts where the virtual scheduling
    /// timestamp doesn't matter (almost every test — `LayerHold` timing
    /// comes from the `Event`s' own fields, not this clock).
    pub fn immediate(events: Vec<Event>) -> Self {
        Self::new(events.into_iter().map(|e| (0, e)).collect())
    }
}

impl EventProvider for ScriptedProvider {
    fn read_event(&mut self, timeout_ms: u32) -> Option<Event> {
        let (ts, _) = *self.pending.front()?;
        if timeout_ms != 0 && ts > self.clock_ms + timeout_ms as u64 {
            self.clock_ms += timeout_ms as u64;
            return None;
        }
        let (ts, event) = self.pending.pop_front().unwrap();
        self.clock_ms = ts;
        Some(event)
    }

    fn write_event(&mut self, event: Event) {
        self.emitted.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerz_keys::{EV_KEY, KEY_PRESS};

    fn ev(code: u16) -> Event {
        Event {
            time_sec: 0,
            time_us: 0,
            kind: EV_KEY,
            code,
            value: KEY_PRESS,
        }
    }

    #[test]
    fn exhausted_script_reports_end_of_stream() {
        let mut provider = ScriptedProvider::immediate(vec![ev(16)]);
        assert_eq!(provider.read_event(0), Some(ev(16)));
        assert_eq!(provider.read_event(0), None);
    }

    #[test]
    fn writes_are_recorded_in_order() {
        let mut provider = ScriptedProvider::immediate(vec![]);
        provider.write_event(ev(16));
        provider.write_event(ev(17));
        assert_eq!(provider.emitted, vec![ev(16), ev(17)]);
    }
}
