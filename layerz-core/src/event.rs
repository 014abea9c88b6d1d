//! The fixed-size record flowing through the whole pipeline.

use bytemuck::{Pod, Zeroable};
use layerz_keys::{EV_KEY, EV_MSC, EV_SYN, KEY_PRESS, KEY_RELEASE, KEY_REPEAT, MSC_SCAN};

/// One input event, byte-compatible with the kernel's `input_event` record
/// so it can be read from / written to an evdev device or a raw pipe
/// without reinterpretation.
///
/// `time_sec`/`time_us` are both `u32` here, matching the layout produced
/// by 32-bit kernels (and by every upstream tool this is meant to chain
/// behind on a typical embedded/desktop Linux target). A 64-bit-time ABI
/// would widen `time_sec`; that's a target-specific concern for the evdev
/// adapter, not for the core's semantics, which only look at deltas.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Event {
    pub time_sec: u32,
    pub time_us: u32,
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl Event {
    pub const SIZE: usize = std::mem::size_of::<Event>();

    pub fn from_bytes(bytes: &[u8]) -> Option<Event> {
        bytemuck::try_from_bytes::<Event>(bytes).ok().copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn is_key_event(&self) -> bool {
        self.kind == EV_KEY
    }

    pub fn is_scan_code(&self) -> bool {
        self.kind == EV_MSC && self.code == MSC_SCAN
    }

    pub fn is_sync(&self) -> bool {
        self.kind == EV_SYN
    }

    /// Builds an event carrying this event's timestamp but a different
    /// code/value — used by every action handler to stamp an emitted event
    /// with the timestamp of whatever triggered it.
    pub fn retimed(&self, kind: u16, code: u16, value: i32) -> Event {
        Event {
            time_sec: self.time_sec,
            time_us: self.time_us,
            kind,
            code,
            value,
        }
    }

    pub fn microseconds(&self) -> u64 {
        self.time_sec as u64 * 1_000_000 + self.time_us as u64
    }
}

pub const PRESS: i32 = KEY_PRESS;
pub const RELEASE: i32 = KEY_RELEASE;
pub const REPEAT: i32 = KEY_REPEAT;
