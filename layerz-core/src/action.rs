//! The closed set of things a `(layer, keycode)` cell can do.

use std::fmt;

/// Error returned by a `Hook` action. Boxed so a hook can report whatever
/// went wrong (device I/O, a failed subprocess, ...) without the core
/// caring about the details — it only ever logs it.
#[derive(Debug)]
pub struct HookError(pub String);

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook failed: {}", self.0)
    }
}

impl std::error::Error for HookError {}

/// A hook is a plain function pointer, not a closure — this keeps `Action`
/// `Copy`, the same way every action-carrying type in the teacher codebase
/// (`KeyAction<T>`, `KeyActionSet<T>`) stays `Copy`.
pub type HookFn = fn() -> Result<(), HookError>;

/// The axis a `MouseMove` cell drives. `Cursor` uses both `step_x`/`step_y`
/// for relative pointer motion; the others carry a single delta each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Cursor,
    Wheel,
    HWheel,
    Dial,
}

/// What a single `(layer, keycode)` cell does when struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Emit one key with the incoming value, rewritten to `key`.
    Tap { key: u16 },
    /// Emit `modifier` then `key` on press; on release, emit `key`'s
    /// release (the modifier was already released during the press).
    ModTap { key: u16, modifier: u16 },
    /// On press, switch the active layer to `layer`, or back to the base
    /// layer if `layer` is already active. Release is a no-op.
    LayerToggle { layer: u8 },
    /// Dual-purpose: a quick tap behaves as `Tap(key)`; holding past
    /// `delay_ms` (or until another key is pressed) activates `layer` for
    /// the duration of the hold.
    LayerHold { key: u16, layer: u8, delay_ms: u32 },
    /// Swallow the event.
    Disabled,
    /// Defer to the base layer's action at this keycode.
    Transparent,
    /// Invoke a side-effecting function on press only; emits nothing.
    Hook { handler: HookFn },
    /// Synthesize relative-motion events on press/repeat.
    MouseMove { axis: Axis, step_x: i32, step_y: i32 },
}

impl Default for Action {
    fn default() -> Self {
        Action::Transparent
    }
}
