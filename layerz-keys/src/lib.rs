//! Keycode registry: symbolic key names to kernel `input-event-codes.h`
//! keycodes.
//!
//! `resolve` and `resolve_name` are plain runtime lookups rather than a
//! `const fn` table — `str` equality isn't available in `const` contexts on
//! stable Rust, and the lookup only ever runs once per DSL cell at layout
//! construction time, so there is no reason to fight the compiler for it.

#![allow(non_upper_case_globals)]

/// HID/evdev event-type codes (`EV_*` in `input-event-codes.h`).
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_MSC: u16 = 0x04;

/// `EV_SYN` sub-codes.
pub const SYN_REPORT: u16 = 0;
pub const SYN_DROPPED: u16 = 3;

/// `EV_MSC` sub-codes.
pub const MSC_SCAN: u16 = 4;

/// `EV_REL` sub-codes.
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;
pub const REL_DIAL: u16 = 0x07;

/// Key event values.
pub const KEY_RELEASE: i32 = 0;
pub const KEY_PRESS: i32 = 1;
pub const KEY_REPEAT: i32 = 2;

// Row 1 and the standard modifiers/whitespace keys.
pub const KEY_ESC: u16 = 1;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;
pub const KEY_5: u16 = 6;
pub const KEY_6: u16 = 7;
pub const KEY_7: u16 = 8;
pub const KEY_8: u16 = 9;
pub const KEY_9: u16 = 10;
pub const KEY_0: u16 = 11;
pub const KEY_MINUS: u16 = 12;
pub const KEY_EQUAL: u16 = 13;
pub const KEY_BACKSPACE: u16 = 14;
pub const KEY_TAB: u16 = 15;
pub const KEY_Q: u16 = 16;
pub const KEY_W: u16 = 17;
pub const KEY_E: u16 = 18;
pub const KEY_R: u16 = 19;
pub const KEY_T: u16 = 20;
pub const KEY_Y: u16 = 21;
pub const KEY_U: u16 = 22;
pub const KEY_I: u16 = 23;
pub const KEY_O: u16 = 24;
pub const KEY_P: u16 = 25;
pub const KEY_LEFTBRACE: u16 = 26;
pub const KEY_RIGHTBRACE: u16 = 27;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTCTRL: u16 = 29;
pub const KEY_A: u16 = 30;
pub const KEY_S: u16 = 31;
pub const KEY_D: u16 = 32;
pub const KEY_F: u16 = 33;
pub const KEY_G: u16 = 34;
pub const KEY_H: u16 = 35;
pub const KEY_J: u16 = 36;
pub const KEY_K: u16 = 37;
pub const KEY_L: u16 = 38;
pub const KEY_SEMICOLON: u16 = 39;
pub const KEY_APOSTROPHE: u16 = 40;
pub const KEY_GRAVE: u16 = 41;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_BACKSLASH: u16 = 43;
pub const KEY_Z: u16 = 44;
pub const KEY_X: u16 = 45;
pub const KEY_C: u16 = 46;
pub const KEY_V: u16 = 47;
pub const KEY_B: u16 = 48;
pub const KEY_N: u16 = 49;
pub const KEY_M: u16 = 50;
pub const KEY_COMMA: u16 = 51;
pub const KEY_DOT: u16 = 52;
pub const KEY_SLASH: u16 = 53;
pub const KEY_RIGHTSHIFT: u16 = 54;
pub const KEY_KPASTERISK: u16 = 55;
pub const KEY_LEFTALT: u16 = 56;
pub const KEY_SPACE: u16 = 57;
pub const KEY_CAPSLOCK: u16 = 58;
pub const KEY_F1: u16 = 59;
pub const KEY_F2: u16 = 60;
pub const KEY_F3: u16 = 61;
pub const KEY_F4: u16 = 62;
pub const KEY_F5: u16 = 63;
pub const KEY_F6: u16 = 64;
pub const KEY_F7: u16 = 65;
pub const KEY_F8: u16 = 66;
pub const KEY_F9: u16 = 67;
pub const KEY_F10: u16 = 68;
pub const KEY_NUMLOCK: u16 = 69;
pub const KEY_SCROLLLOCK: u16 = 70;
pub const KEY_KP7: u16 = 71;
pub const KEY_KP8: u16 = 72;
pub const KEY_KP9: u16 = 73;
pub const KEY_KPMINUS: u16 = 74;
pub const KEY_KP4: u16 = 75;
pub const KEY_KP5: u16 = 76;
pub const KEY_KP6: u16 = 77;
pub const KEY_KPPLUS: u16 = 78;
pub const KEY_KP1: u16 = 79;
pub const KEY_KP2: u16 = 80;
pub const KEY_KP3: u16 = 81;
pub const KEY_KP0: u16 = 82;
pub const KEY_KPDOT: u16 = 83;
pub const KEY_102ND: u16 = 86;
pub const KEY_F11: u16 = 87;
pub const KEY_F12: u16 = 88;
pub const KEY_KPENTER: u16 = 96;
pub const KEY_RIGHTCTRL: u16 = 97;
pub const KEY_KPSLASH: u16 = 98;
pub const KEY_SYSRQ: u16 = 99;
pub const KEY_RIGHTALT: u16 = 100;
pub const KEY_HOME: u16 = 102;
pub const KEY_UP: u16 = 103;
pub const KEY_PAGEUP: u16 = 104;
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;
pub const KEY_END: u16 = 107;
pub const KEY_DOWN: u16 = 108;
pub const KEY_PAGEDOWN: u16 = 109;
pub const KEY_INSERT: u16 = 110;
pub const KEY_DELETE: u16 = 111;
pub const KEY_KPEQUAL: u16 = 117;
pub const KEY_LEFTMETA: u16 = 125;
pub const KEY_RIGHTMETA: u16 = 126;
pub const KEY_COMPOSE: u16 = 127;

/// Resolve a symbolic key name (e.g. `"Q"`, `"LEFTSHIFT"`) to its kernel
/// keycode. Names match `input-event-codes.h` with the `KEY_` prefix
/// stripped, as that's what reads best in a layout DSL.
pub fn resolve(name: &str) -> Option<u16> {
    let code = match name {
        "ESC" => KEY_ESC,
        "1" => KEY_1,
        "2" => KEY_2,
        "3" => KEY_3,
        "4" => KEY_4,
        "5" => KEY_5,
        "6" => KEY_6,
        "7" => KEY_7,
        "8" => KEY_8,
        "9" => KEY_9,
        "0" => KEY_0,
        "MINUS" => KEY_MINUS,
        "EQUAL" => KEY_EQUAL,
        "BACKSPACE" => KEY_BACKSPACE,
        "TAB" => KEY_TAB,
        "Q" => KEY_Q,
        "W" => KEY_W,
        "E" => KEY_E,
        "R" => KEY_R,
        "T" => KEY_T,
        "Y" => KEY_Y,
        "U" => KEY_U,
        "I" => KEY_I,
        "O" => KEY_O,
        "P" => KEY_P,
        "LEFTBRACE" => KEY_LEFTBRACE,
        "RIGHTBRACE" => KEY_RIGHTBRACE,
        "ENTER" => KEY_ENTER,
        "LEFTCTRL" => KEY_LEFTCTRL,
        "A" => KEY_A,
        "S" => KEY_S,
        "D" => KEY_D,
        "F" => KEY_F,
        "G" => KEY_G,
        "H" => KEY_H,
        "J" => KEY_J,
        "K" => KEY_K,
        "L" => KEY_L,
        "SEMICOLON" => KEY_SEMICOLON,
        "APOSTROPHE" => KEY_APOSTROPHE,
        "GRAVE" => KEY_GRAVE,
        "LEFTSHIFT" => KEY_LEFTSHIFT,
        "BACKSLASH" => KEY_BACKSLASH,
        "Z" => KEY_Z,
        "X" => KEY_X,
        "C" => KEY_C,
        "V" => KEY_V,
        "B" => KEY_B,
        "N" => KEY_N,
        "M" => KEY_M,
        "COMMA" => KEY_COMMA,
        "DOT" => KEY_DOT,
        "SLASH" => KEY_SLASH,
        "RIGHTSHIFT" => KEY_RIGHTSHIFT,
        "KPASTERISK" => KEY_KPASTERISK,
        "LEFTALT" => KEY_LEFTALT,
        "SPACE" => KEY_SPACE,
        "CAPSLOCK" => KEY_CAPSLOCK,
        "F1" => KEY_F1,
        "F2" => KEY_F2,
        "F3" => KEY_F3,
        "F4" => KEY_F4,
        "F5" => KEY_F5,
        "F6" => KEY_F6,
        "F7" => KEY_F7,
        "F8" => KEY_F8,
        "F9" => KEY_F9,
        "F10" => KEY_F10,
        "NUMLOCK" => KEY_NUMLOCK,
        "SCROLLLOCK" => KEY_SCROLLLOCK,
        "KP7" => KEY_KP7,
        "KP8" => KEY_KP8,
        "KP9" => KEY_KP9,
        "KPMINUS" => KEY_KPMINUS,
        "KP4" => KEY_KP4,
        "KP5" => KEY_KP5,
        "KP6" => KEY_KP6,
        "KPPLUS" => KEY_KPPLUS,
        "KP1" => KEY_KP1,
        "KP2" => KEY_KP2,
        "KP3" => KEY_KP3,
        "KP0" => KEY_KP0,
        "KPDOT" => KEY_KPDOT,
        "102ND" => KEY_102ND,
        "F11" => KEY_F11,
        "F12" => KEY_F12,
        "KPENTER" => KEY_KPENTER,
        "RIGHTCTRL" => KEY_RIGHTCTRL,
        "KPSLASH" => KEY_KPSLASH,
        "SYSRQ" => KEY_SYSRQ,
        "RIGHTALT" => KEY_RIGHTALT,
        "HOME" => KEY_HOME,
        "UP" => KEY_UP,
        "PAGEUP" => KEY_PAGEUP,
        "LEFT" => KEY_LEFT,
        "RIGHT" => KEY_RIGHT,
        "END" => KEY_END,
        "DOWN" => KEY_DOWN,
        "PAGEDOWN" => KEY_PAGEDOWN,
        "INSERT" => KEY_INSERT,
        "DELETE" => KEY_DELETE,
        "KPEQUAL" => KEY_KPEQUAL,
        "LEFTMETA" => KEY_LEFTMETA,
        "RIGHTMETA" => KEY_RIGHTMETA,
        "COMPOSE" => KEY_COMPOSE,
        _ => return None,
    };
    Some(code)
}

/// Reverse lookup, used only for debug formatting (e.g. logging a layout
/// dump). Linear, since it's never on a hot path.
pub fn resolve_name(code: u16) -> Option<&'static str> {
    // Small names list kept in the same order as `resolve` above so the
    // two stay easy to keep in sync by eye.
    const NAMES: &[(&str, u16)] = &[
        ("ESC", KEY_ESC),
        ("1", KEY_1),
        ("2", KEY_2),
        ("3", KEY_3),
        ("4", KEY_4),
        ("5", KEY_5),
        ("6", KEY_6),
        ("7", KEY_7),
        ("8", KEY_8),
        ("9", KEY_9),
        ("0", KEY_0),
        ("MINUS", KEY_MINUS),
        ("EQUAL", KEY_EQUAL),
        ("BACKSPACE", KEY_BACKSPACE),
        ("TAB", KEY_TAB),
        ("Q", KEY_Q),
        ("W", KEY_W),
        ("E", KEY_E),
        ("R", KEY_R),
        ("T", KEY_T),
        ("Y", KEY_Y),
        ("U", KEY_U),
        ("I", KEY_I),
        ("O", KEY_O),
        ("P", KEY_P),
        ("LEFTBRACE", KEY_LEFTBRACE),
        ("RIGHTBRACE", KEY_RIGHTBRACE),
        ("ENTER", KEY_ENTER),
        ("LEFTCTRL", KEY_LEFTCTRL),
        ("A", KEY_A),
        ("S", KEY_S),
        ("D", KEY_D),
        ("F", KEY_F),
        ("G", KEY_G),
        ("H", KEY_H),
        ("J", KEY_J),
        ("K", KEY_K),
        ("L", KEY_L),
        ("SEMICOLON", KEY_SEMICOLON),
        ("APOSTROPHE", KEY_APOSTROPHE),
        ("GRAVE", KEY_GRAVE),
        ("LEFTSHIFT", KEY_LEFTSHIFT),
        ("BACKSLASH", KEY_BACKSLASH),
        ("Z", KEY_Z),
        ("X", KEY_X),
        ("C", KEY_C),
        ("V", KEY_V),
        ("B", KEY_B),
        ("N", KEY_N),
        ("M", KEY_M),
        ("COMMA", KEY_COMMA),
        ("DOT", KEY_DOT),
        ("SLASH", KEY_SLASH),
        ("RIGHTSHIFT", KEY_RIGHTSHIFT),
        ("KPASTERISK", KEY_KPASTERISK),
        ("LEFTALT", KEY_LEFTALT),
        ("SPACE", KEY_SPACE),
        ("CAPSLOCK", KEY_CAPSLOCK),
        ("F1", KEY_F1),
        ("F2", KEY_F2),
        ("F3", KEY_F3),
        ("F4", KEY_F4),
        ("F5", KEY_F5),
        ("F6", KEY_F6),
        ("F7", KEY_F7),
        ("F8", KEY_F8),
        ("F9", KEY_F9),
        ("F10", KEY_F10),
        ("NUMLOCK", KEY_NUMLOCK),
        ("SCROLLLOCK", KEY_SCROLLLOCK),
        ("KP7", KEY_KP7),
        ("KP8", KEY_KP8),
        ("KP9", KEY_KP9),
        ("KPMINUS", KEY_KPMINUS),
        ("KP4", KEY_KP4),
        ("KP5", KEY_KP5),
        ("KP6", KEY_KP6),
        ("KPPLUS", KEY_KPPLUS),
        ("KP1", KEY_KP1),
        ("KP2", KEY_KP2),
        ("KP3", KEY_KP3),
        ("KP0", KEY_KP0),
        ("KPDOT", KEY_KPDOT),
        ("102ND", KEY_102ND),
        ("F11", KEY_F11),
        ("F12", KEY_F12),
        ("KPENTER", KEY_KPENTER),
        ("RIGHTCTRL", KEY_RIGHTCTRL),
        ("KPSLASH", KEY_KPSLASH),
        ("SYSRQ", KEY_SYSRQ),
        ("RIGHTALT", KEY_RIGHTALT),
        ("HOME", KEY_HOME),
        ("UP", KEY_UP),
        ("PAGEUP", KEY_PAGEUP),
        ("LEFT", KEY_LEFT),
        ("RIGHT", KEY_RIGHT),
        ("END", KEY_END),
        ("DOWN", KEY_DOWN),
        ("PAGEDOWN", KEY_PAGEDOWN),
        ("INSERT", KEY_INSERT),
        ("DELETE", KEY_DELETE),
        ("KPEQUAL", KEY_KPEQUAL),
        ("LEFTMETA", KEY_LEFTMETA),
        ("RIGHTMETA", KEY_RIGHTMETA),
        ("COMPOSE", KEY_COMPOSE),
    ];
    NAMES.iter().find(|(_, c)| *c == code).map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_round_trips_through_resolve_name() {
        for name in ["Q", "LEFTSHIFT", "ENTER", "F12", "KP0", "SPACE"] {
            let code = resolve(name).expect("known name should resolve");
            assert_eq!(resolve_name(code), Some(name));
        }
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(resolve("NOT_A_KEY"), None);
    }

    #[test]
    fn codes_are_all_below_extended_key_range() {
        for name in ["Q", "LEFTSHIFT", "ENTER", "F12", "KP0", "COMPOSE"] {
            let code = resolve(name).unwrap();
            assert!(code < 256, "{name} should be an addressable layer cell");
        }
    }
}
