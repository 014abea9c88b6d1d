//! The layered key-event transformer: a deterministic, pull-driven state
//! machine that consumes a stream of timestamped key events and emits a
//! transformed stream. See the crate's sibling `layerz-layout` for the DSL
//! used to build `Layout` values, and `layerz` for the evdev/uinput and
//! stdio adapters that feed a `Keyboard` in production.

mod action;
mod event;
mod keyboard;
mod layer;
mod provider;

pub use action::{Axis, HookError, HookFn, Action};
pub use event::{Event, PRESS, RELEASE, REPEAT};
pub use keyboard::Keyboard;
pub use layer::{Layer, Layout, LAYER_SIZE, MAX_LAYERS};
pub use provider::{EventProvider, ScriptedProvider};

#[cfg(test)]
mod tests {
    use super::*;
    use layerz_keys::{EV_KEY, EV_MSC, EV_REL, EV_SYN, KEY_ENTER, MSC_SCAN, REL_X, REL_Y, SYN_REPORT};

    fn key(time_sec: u32, time_us: u32, code: u16, value: i32) -> Event {
        Event {
            time_sec,
            time_us,
            kind: EV_KEY,
            code,
            value,
        }
    }

    fn press(t: f64, code: u16) -> Event {
        key(t as u32, (t.fract() * 1_000_000.0).round() as u32, code, PRESS)
    }

    fn release(t: f64, code: u16) -> Event {
        key(t as u32, (t.fract() * 1_000_000.0).round() as u32, code, RELEASE)
    }

    /// Strips the init preamble (ENTER release + SYN_REPORT) that every
    /// `Keyboard::new` emits, so assertions can compare against the literal
    /// event lists a scenario expects without restating the preamble in
    /// every test.
    fn drop_preamble(emitted: &[Event]) -> &[Event] {
        &emitted[2..]
    }

    fn emitted_of(keyboard: Keyboard<ScriptedProvider>) -> Vec<Event> {
        keyboard.into_provider().emitted
    }

    fn run(layout: Layout, base_layer: u8, script: Vec<Event>) -> Vec<Event> {
        let provider = ScriptedProvider::immediate(script);
        let mut keyboard = Keyboard::new(provider, layout, base_layer);
        keyboard.run();
        emitted_of(keyboard)
    }

    #[test]
    fn init_preamble_releases_enter() {
        let layout = Layout::new(vec![Layer::default()]);
        let provider = ScriptedProvider::immediate(vec![]);
        let keyboard = Keyboard::new(provider, layout, 0);
        let emitted = emitted_of(keyboard);
        assert_eq!(emitted[0], key(0, 0, KEY_ENTER, RELEASE));
        assert_eq!(
            emitted[1],
            Event {
                time_sec: 0,
                time_us: 0,
                kind: EV_SYN,
                code: SYN_REPORT,
                value: 0,
            }
        );
    }

    // A layout built entirely from default (transparent) layers must be a
    // no-op: every event comes out exactly as it went in.
    #[test]
    fn all_transparent_layout_is_identity() {
        let layout = Layout::new(vec![Layer::default(), Layer::default()]);
        let script = vec![press(0.0, 16), release(0.1, 16), press(0.2, 30)];
        let emitted = run(layout, 0, script.clone());
        assert_eq!(drop_preamble(&emitted), script.as_slice());
    }

    // A release must resolve against the layer that was active when the
    // matching press happened, not whatever layer is active now — otherwise
    // a layer switch between press and release would remap the release to
    // the wrong code.
    #[test]
    fn release_routes_through_press_time_layer() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerToggle { layer: 1 }); // TAB
        let mut layer1 = Layer::default();
        layer1.set(16, Action::Tap { key: 30 }); // Q -> A, while layer 1 active
        let layout = Layout::new(vec![layer0, layer1]);

        let script = vec![
            press(0.2, 15),    // TAB press -> switch to layer 1
            release(0.3, 15),  // TAB release -> toggle is release-is-noop
            press(0.4, 16),    // Q pressed while on layer 1 -> resolves to A
            press(0.5, 15),    // TAB press again -> back to base layer 0
            release(0.6, 15),
            release(0.7, 16),  // Q released while current layer is 0 again
        ];
        let emitted = run(layout, 0, script);
        let emitted = drop_preamble(&emitted);
        assert_eq!(emitted[0], press(0.4, 30)); // A press
        assert_eq!(emitted[1], release(0.7, 30)); // still A release, not Q
    }

    // Every modifier press a ModTap emits must be balanced by exactly one
    // release before the next unrelated press.
    #[test]
    fn mod_tap_modifier_is_balanced() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::ModTap { key: 10, modifier: 42 }); // Q -> shift+9
        let layout = Layout::new(vec![layer0]);

        let script = vec![press(0.0, 16), release(0.1, 16)];
        let emitted = run(layout, 0, script);
        let emitted = drop_preamble(&emitted);
        assert_eq!(
            emitted,
            &[
                press(0.0, 42),
                press(0.0, 10),
                release(0.0, 42),
                release(0.1, 10),
            ]
        );
    }

    #[test]
    fn transparent_on_base_layer_is_identity() {
        let layout = Layout::new(vec![Layer::default()]);
        let script = vec![press(0.0, 16)];
        let emitted = run(layout, 0, script.clone());
        assert_eq!(drop_preamble(&emitted), script.as_slice());
    }

    #[test]
    fn transparent_on_non_base_layer_defers_to_base() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::Tap { key: 99 });
        let layer1 = Layer::default(); // all Transparent
        let layout = Layout::new(vec![layer0, layer1]);

        let provider = ScriptedProvider::immediate(vec![]);
        let mut keyboard = Keyboard::new(provider, layout, 0);
        keyboard.set_layer_for_test(1);
        keyboard.handle(press(0.0, 16));
        let emitted = emitted_of(keyboard);
        assert_eq!(drop_preamble(&emitted), &[press(0.0, 99)]);
    }

    // Toggling the same layer a second time must return to the base layer.
    #[test]
    fn toggle_twice_returns_to_base() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerToggle { layer: 1 });
        let layer1 = Layer::default();
        let layout = Layout::new(vec![layer0, layer1]);

        let provider = ScriptedProvider::immediate(vec![]);
        let mut keyboard = Keyboard::new(provider, layout, 0);
        keyboard.handle(press(0.0, 15));
        assert_eq!(keyboard.layer_for_test(), 1);
        keyboard.handle(press(0.1, 15));
        assert_eq!(keyboard.layer_for_test(), 0);
    }

    #[test]
    fn quick_release_of_a_layer_hold_key_is_a_tap() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerHold { key: 15, layer: 1, delay_ms: 200 });
        let layout = Layout::new(vec![layer0, Layer::default()]);

        let script = vec![press(0.2, 15), release(0.3, 15)]; // 100ms
        let emitted = run(layout, 0, script.clone());
        assert_eq!(drop_preamble(&emitted), script.as_slice());
    }

    #[test]
    fn pressing_another_key_commits_a_layer_hold() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerHold { key: 15, layer: 1, delay_ms: 200 });
        let mut layer1 = Layer::default();
        layer1.set(16, Action::Tap { key: 30 });
        let layout = Layout::new(vec![layer0, layer1]);

        let script = vec![
            press(0.0, 15),
            press(0.1, 16),
            release(0.1, 16),
            release(0.2, 15),
        ];
        let emitted = run(layout, 0, script);
        let emitted = drop_preamble(&emitted);
        assert_eq!(emitted, &[press(0.1, 30), release(0.1, 30)]);
    }

    #[test]
    fn repeat_on_tap_emits_nothing() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::Tap { key: 30 });
        let layout = Layout::new(vec![layer0]);

        let script = vec![press(0.0, 16), key(0, 200_000, 16, REPEAT), release(0.3, 16)];
        let emitted = run(layout, 0, script);
        let emitted = drop_preamble(&emitted);
        assert_eq!(emitted, &[press(0.0, 30), release(0.3, 30)]);
    }

    #[test]
    fn repeat_on_mod_tap_emits_nothing() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::ModTap { key: 10, modifier: 42 });
        let layout = Layout::new(vec![layer0]);

        let provider = ScriptedProvider::immediate(vec![]);
        let mut keyboard = Keyboard::new(provider, layout, 0);
        keyboard.handle(press(0.0, 16));
        keyboard.handle(key(0, 100_000, 16, REPEAT));
        let emitted = emitted_of(keyboard);
        // press emits shift down, 9 down, and (since read_event after the
        // press pulls the repeat as lookahead) shift up; the repeat itself,
        // once handled recursively, emits nothing.
        assert_eq!(
            drop_preamble(&emitted),
            &[press(0.0, 42), press(0.0, 10), release(0.0, 42)]
        );
    }

    #[test]
    fn shift_chorded_remap() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::ModTap { key: 10, modifier: 42 }); // Q -> shift+9
        let layout = Layout::new(vec![layer0]);

        let script = vec![press(0.0, 16), release(0.1, 16)];
        let emitted = run(layout, 0, script);
        assert_eq!(
            drop_preamble(&emitted),
            &[press(0.0, 42), press(0.0, 10), release(0.0, 42), release(0.1, 10)]
        );
    }

    // The modifier of a ModTap must not leak onto a key pressed and
    // released while the ModTap key is still held.
    #[test]
    fn modifier_does_not_leak_onto_an_overlapping_key() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::ModTap { key: 10, modifier: 42 }); // Q -> shift+9
        let layout = Layout::new(vec![layer0]);

        let script = vec![press(0.0, 16), press(0.1, 17), release(0.2, 17), release(0.3, 16)];
        let emitted = run(layout, 0, script);
        assert_eq!(
            drop_preamble(&emitted),
            &[
                press(0.0, 42),
                press(0.0, 10),
                release(0.0, 42),
                press(0.1, 17),
                release(0.2, 17),
                release(0.3, 10),
            ]
        );
    }

    #[test]
    fn layer_toggle_remaps_only_while_active() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerToggle { layer: 1 }); // TAB
        let mut layer1 = Layer::default();
        layer1.set(15, Action::LayerToggle { layer: 1 });
        layer1.set(16, Action::Tap { key: 30 }); // Q -> A
        let layout = Layout::new(vec![layer0, layer1]);

        let script = vec![
            press(0.0, 16),
            release(0.1, 16),
            press(0.2, 15),
            release(0.3, 15),
            press(0.4, 16),
            release(0.5, 16),
            press(0.6, 15),
            release(0.7, 15),
            press(0.8, 16),
            release(0.9, 16),
        ];
        let emitted = run(layout, 0, script);
        assert_eq!(
            drop_preamble(&emitted),
            &[
                press(0.0, 16),
                release(0.1, 16),
                press(0.4, 30),
                release(0.5, 30),
                press(0.8, 16),
                release(0.9, 16),
            ]
        );
    }

    #[test]
    fn layer_hold_key_alone_behaves_as_a_tap() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerHold { key: 15, layer: 1, delay_ms: 200 });
        let layout = Layout::new(vec![layer0, Layer::default()]);

        let script = vec![press(0.2, 15), release(0.3, 15)];
        let emitted = run(layout, 0, script.clone());
        assert_eq!(drop_preamble(&emitted), script.as_slice());
    }

    #[test]
    fn layer_hold_activates_the_held_layer_for_an_overlapping_key() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerHold { key: 15, layer: 1, delay_ms: 200 });
        let mut layer1 = Layer::default();
        layer1.set(16, Action::Tap { key: 30 });
        let layout = Layout::new(vec![layer0, layer1]);

        let script = vec![press(0.4, 15), press(0.5, 16), release(0.6, 16), release(0.7, 15)];
        let emitted = run(layout, 0, script);
        assert_eq!(drop_preamble(&emitted), &[press(0.5, 30), release(0.6, 30)]);
    }

    // The Q release still arrives after the hold key's own release, yet it
    // must keep mapping through the held layer because that's where its
    // press resolved.
    #[test]
    fn layer_hold_release_does_not_affect_an_already_resolved_key() {
        let mut layer0 = Layer::default();
        layer0.set(15, Action::LayerHold { key: 15, layer: 1, delay_ms: 200 });
        let mut layer1 = Layer::default();
        layer1.set(16, Action::Tap { key: 30 });
        let layout = Layout::new(vec![layer0, layer1]);

        let script = vec![press(2.0, 15), press(2.5, 16), release(2.6, 15), release(2.7, 16)];
        let emitted = run(layout, 0, script);
        assert_eq!(drop_preamble(&emitted), &[press(2.5, 30), release(2.7, 30)]);
    }

    // Disabled swallows everything.
    #[test]
    fn disabled_action_swallows_the_event() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::Disabled);
        let layout = Layout::new(vec![layer0]);
        let emitted = run(layout, 0, vec![press(0.0, 16), release(0.1, 16)]);
        assert_eq!(drop_preamble(&emitted), &[]);
    }

    // Non-key events (SYN, REL) pass through untouched.
    #[test]
    fn non_key_events_pass_through() {
        let layout = Layout::new(vec![Layer::default()]);
        let rel = Event {
            time_sec: 0,
            time_us: 0,
            kind: EV_REL,
            code: REL_X,
            value: 5,
        };
        let emitted = run(layout, 0, vec![rel]);
        assert_eq!(drop_preamble(&emitted), &[rel]);
    }

    // MSC_SCAN auxiliary events pass through untouched even though their
    // type isn't EV_KEY.
    #[test]
    fn scan_code_events_pass_through() {
        let layout = Layout::new(vec![Layer::default()]);
        let scan = Event {
            time_sec: 0,
            time_us: 0,
            kind: EV_MSC,
            code: MSC_SCAN,
            value: 0x1e,
        };
        let emitted = run(layout, 0, vec![scan]);
        assert_eq!(drop_preamble(&emitted), &[scan]);
    }

    // Extended keycodes (>= 256) have no layer cell to resolve against, so
    // they pass through untouched.
    #[test]
    fn extended_keycodes_pass_through() {
        let layout = Layout::new(vec![Layer::default()]);
        let extended = key(0, 0, 300, PRESS);
        let emitted = run(layout, 0, vec![extended]);
        assert_eq!(drop_preamble(&emitted), &[extended]);
    }

    // Unknown key values are dropped with a warning, not forwarded.
    #[test]
    fn unknown_key_value_is_dropped() {
        let layout = Layout::new(vec![Layer::default()]);
        let weird = key(0, 0, 16, 7);
        let emitted = run(layout, 0, vec![weird]);
        assert_eq!(drop_preamble(&emitted), &[]);
    }

    // MouseMove on a cursor axis emits both deltas; repeats keep moving;
    // releases are suppressed.
    #[test]
    fn mouse_move_cursor_axis() {
        let mut layer0 = Layer::default();
        layer0.set(16, Action::MouseMove { axis: Axis::Cursor, step_x: 3, step_y: -2 });
        let layout = Layout::new(vec![layer0]);

        let script = vec![press(0.0, 16), key(0, 100_000, 16, REPEAT), release(0.2, 16)];
        let emitted = run(layout, 0, script);
        assert_eq!(
            drop_preamble(&emitted),
            &[
                press(0.0, 16).retimed(EV_REL, REL_X, 3),
                press(0.0, 16).retimed(EV_REL, REL_Y, -2),
                key(0, 100_000, 16, REPEAT).retimed(EV_REL, REL_X, 3),
                key(0, 100_000, 16, REPEAT).retimed(EV_REL, REL_Y, -2),
            ]
        );
    }
}
