//! The compiled-in example layout, in the spirit of `vkwrty_map`'s
//! `build_mapper`: CAPSLOCK taps as ESC, held it activates a navigation
//! layer with vim-style arrow keys, and one cell demonstrates wiring a
//! `Hook` action to a real side effect.

use layerz_core::{Action, Layer, Layout};
use layerz_layout::{ansi, k, lh, map, PASSTHROUGH};

use crate::hooks::reset_downstream_device;

const LAYER_BASE: u8 = 0;
const LAYER_NAV: u8 = 1;

pub fn build() -> Layout {
    let mut base = ansi(
        ["ESC", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "MINUS", "EQUAL"],
        ["TAB", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "LEFTBRACE", "RIGHTBRACE", "BACKSLASH"],
        ["CAPSLOCK", "A", "S", "D", "F", "G", "H", "J", "K", "L", "SEMICOLON", "APOSTROPHE", "ENTER"],
        ["LEFTSHIFT", "Z", "X", "C", "V", "B", "N", "M", "COMMA", "DOT", "SLASH", "RIGHTSHIFT"],
    );
    map(&mut base, "CAPSLOCK", lh("ESC", LAYER_NAV));

    let mut nav = nav_layer();
    map(&mut nav, "R", Action::Hook { handler: reset_downstream_device });

    Layout::new(vec![base, nav])
}

fn nav_layer() -> Layer {
    let mut layer = PASSTHROUGH;
    map(&mut layer, "H", k("LEFT"));
    map(&mut layer, "J", k("DOWN"));
    map(&mut layer, "K", k("UP"));
    map(&mut layer, "L", k("RIGHT"));
    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capslock_on_base_layer_holds_into_nav() {
        let layout = build();
        assert_eq!(
            layout.action_at(LAYER_BASE, layerz_keys::KEY_CAPSLOCK),
            lh("ESC", LAYER_NAV)
        );
    }

    #[test]
    fn nav_layer_maps_hjkl_to_arrows() {
        let layout = build();
        assert_eq!(layout.action_at(LAYER_NAV, layerz_keys::KEY_H), k("LEFT"));
        assert_eq!(layout.action_at(LAYER_NAV, layerz_keys::KEY_L), k("RIGHT"));
    }
}
