//! Small DSL for building a `Layout` out of symbolic key names instead of
//! raw keycodes. Every helper here is pure: it produces plain `Action` or
//! `Layer` data and never touches a provider. Unknown key names panic at
//! construction time — a layout is compiled into the binary, so a typo is
//! a build-time mistake, not a runtime condition to recover from.

use layerz_core::{Action, Layer};
use layerz_keys::KEY_LEFTSHIFT;

/// Disabled cell — swallows the event.
#[allow(non_upper_case_globals)]
pub const xx: Action = Action::Disabled;

/// Transparent cell — defers to the base layer.
#[allow(non_upper_case_globals)]
pub const __: Action = Action::Transparent;

/// A layer filled entirely with `Transparent`; the starting point for
/// every layer built with `ansi`.
pub const PASSTHROUGH: Layer = Layer::filled(Action::Transparent);

fn resolve(name: &str) -> u16 {
    layerz_keys::resolve(name).unwrap_or_else(|| {
        log::error!("unknown key name {name:?} used while building a layout");
        panic!("unknown key name {name:?}")
    })
}

/// Plain tap: the cell emits `name` with the incoming event's value.
pub fn k(name: &str) -> Action {
    Action::Tap { key: resolve(name) }
}

/// Chorded with a modifier: press emits `modifier` then `name`, release
/// emits `name`'s release (see `layerz_core::Action::ModTap`).
pub fn mod_tap(name: &str, modifier: &str) -> Action {
    Action::ModTap {
        key: resolve(name),
        modifier: resolve(modifier),
    }
}

/// Shift-chorded tap — the common case of `mod_tap`.
pub fn s(name: &str) -> Action {
    mod_tap(name, "LEFTSHIFT")
}

/// Ctrl-chorded tap.
pub fn ctrl(name: &str) -> Action {
    mod_tap(name, "LEFTCTRL")
}

/// AltGr-chorded tap.
pub fn altgr(name: &str) -> Action {
    mod_tap(name, "RIGHTALT")
}

/// Toggle the given layer index on press; toggle back to base on a
/// second press of the same cell.
pub fn lt(layer: u8) -> Action {
    Action::LayerToggle { layer }
}

/// Default hold delay used by `lh`.
pub const DEFAULT_HOLD_DELAY_MS: u32 = 200;

/// Tap-or-hold cell: a quick tap of `name` behaves as `k(name)`; holding
/// past the default 200 ms delay (or until another key is pressed)
/// activates `layer`.
pub fn lh(name: &str, layer: u8) -> Action {
    lh_with_delay(name, layer, DEFAULT_HOLD_DELAY_MS)
}

/// `lh` with an explicit hold delay, for layouts that need something
/// other than the 200 ms default.
pub fn lh_with_delay(name: &str, layer: u8, delay_ms: u32) -> Action {
    Action::LayerHold {
        key: resolve(name),
        layer,
        delay_ms,
    }
}

/// Assigns one cell of `layer` to `action`, keyed by symbolic name.
pub fn map(layer: &mut Layer, name: &str, action: Action) {
    layer.set(resolve(name), action);
}

/// Builds a layer from the four standard ANSI rows, each a fixed-length
/// slice of symbolic key names read left to right as laid out on the
/// physical keyboard: 13 in the number row, 14 in the top letter row, 13
/// in the home row, 12 in the bottom row. Unlisted cells stay
/// `Transparent` (the `PASSTHROUGH` default).
pub fn ansi(
    number_row: [&str; 13],
    top_row: [&str; 14],
    middle_row: [&str; 13],
    bottom_row: [&str; 12],
) -> Layer {
    let mut layer = PASSTHROUGH;
    for name in number_row {
        map(&mut layer, name, k(name));
    }
    for name in top_row {
        map(&mut layer, name, k(name));
    }
    for name in middle_row {
        map(&mut layer, name, k(name));
    }
    for name in bottom_row {
        map(&mut layer, name, k(name));
    }
    layer
}
