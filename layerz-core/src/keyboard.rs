//! The layered key-event transformer. Holds the active layer, the
//! per-keycode "layer of press" table, and drives the pull loop.

use layerz_keys::{EV_KEY, EV_REL, EV_SYN, KEY_ENTER, REL_DIAL, REL_HWHEEL, REL_WHEEL, REL_X, REL_Y, SYN_REPORT};

use crate::action::{Action, Axis};
use crate::event::{Event, PRESS, RELEASE, REPEAT};
use crate::layer::{Layout, LAYER_SIZE};
use crate::provider::EventProvider;

pub struct Keyboard<P: EventProvider> {
    provider: P,
    layout: Layout,
    base_layer: u8,
    layer: u8,
    /// For each keycode, the layer it was last *pressed* on. Read on
    /// release so the release always routes through the same layer the
    /// press did, regardless of the layer active now — a layer switch
    /// between a key's press and its release must not remap the release.
    key_state: [u8; LAYER_SIZE],
}

impl<P: EventProvider> Keyboard<P> {
    /// Builds the machine and emits the init preamble: a synthetic ENTER
    /// release followed by a `SYN_REPORT`, to clear a stuck ENTER left over
    /// from the launching shell before the upstream adapter grabs the
    /// device.
    pub fn new(provider: P, layout: Layout, base_layer: u8) -> Self {
        assert!(
            (base_layer as usize) < layout.len(),
            "base_layer {base_layer} is out of range for a {}-layer layout",
            layout.len()
        );
        let mut keyboard = Self {
            provider,
            layout,
            base_layer,
            layer: base_layer,
            key_state: [base_layer; LAYER_SIZE],
        };
        keyboard.emit_init_preamble();
        keyboard
    }

    fn emit_init_preamble(&mut self) {
        let release = Event {
            time_sec: 0,
            time_us: 0,
            kind: EV_KEY,
            code: KEY_ENTER,
            value: RELEASE,
        };
        self.provider.write_event(release);
        let sync = Event {
            time_sec: 0,
            time_us: 0,
            kind: EV_SYN,
            code: SYN_REPORT,
            value: 0,
        };
        self.provider.write_event(sync);
    }

    /// Pulls events from the provider until end-of-stream.
    pub fn run(&mut self) {
        while let Some(event) = self.provider.read_event(0) {
            self.handle(event);
        }
    }

    /// Consumes one event: scan-code and non-key events pass through
    /// unchanged; key events resolve to an action and get dispatched.
    pub fn handle(&mut self, event: Event) {
        if event.is_scan_code() {
            self.provider.write_event(event);
            return;
        }
        if !event.is_key_event() || event.code as usize >= LAYER_SIZE {
            self.provider.write_event(event);
            return;
        }

        let resolving_layer = match event.value {
            PRESS | REPEAT => {
                self.key_state[event.code as usize] = self.layer;
                self.layer
            }
            RELEASE => self.key_state[event.code as usize],
            other => {
                log::warn!(
                    "dropping key event for code {} with unknown value {other}",
                    event.code
                );
                return;
            }
        };

        let action = self.layout.action_at(resolving_layer, event.code);
        self.dispatch(action, event, resolving_layer);
    }

    fn dispatch(&mut self, action: Action, event: Event, resolving_layer: u8) {
        match action {
            Action::Tap { key } => self.dispatch_tap(key, event),
            Action::ModTap { key, modifier } => self.dispatch_mod_tap(key, modifier, event),
            Action::LayerToggle { layer } => self.dispatch_layer_toggle(layer, event),
            Action::LayerHold { key, layer, delay_ms } => {
                self.dispatch_layer_hold(key, layer, delay_ms, event)
            }
            Action::Disabled => {}
            Action::Transparent => self.dispatch_transparent(event, resolving_layer),
            Action::Hook { handler } => self.dispatch_hook(handler, event),
            Action::MouseMove { axis, step_x, step_y } => {
                self.dispatch_mouse_move(axis, step_x, step_y, event)
            }
        }
    }

    fn dispatch_tap(&mut self, key: u16, event: Event) {
        if event.value == REPEAT {
            return;
        }
        self.provider.write_event(event.retimed(EV_KEY, key, event.value));
    }

    fn dispatch_mod_tap(&mut self, key: u16, modifier: u16, event: Event) {
        match event.value {
            PRESS => {
                self.provider.write_event(event.retimed(EV_KEY, modifier, PRESS));
                self.provider.write_event(event.retimed(EV_KEY, key, PRESS));
                // Pull one lookahead event before releasing the modifier,
                // so the modifier release lands strictly between the key
                // press and whatever the user typed next — never leaking
                // onto it.
                let next = self.provider.read_event(0);
                self.provider
                    .write_event(event.retimed(EV_KEY, modifier, RELEASE));
                if let Some(next_event) = next {
                    self.handle(next_event);
                }
            }
            RELEASE => {
                self.provider.write_event(event.retimed(EV_KEY, key, RELEASE));
            }
            REPEAT => {}
            _ => {}
        }
    }

    fn dispatch_layer_toggle(&mut self, layer: u8, event: Event) {
        if event.value != PRESS {
            return;
        }
        self.layer = if self.layer != layer { layer } else { self.base_layer };
    }

    fn dispatch_layer_hold(&mut self, key: u16, layer: u8, delay_ms: u32, event: Event) {
        if event.value == RELEASE {
            if self.layer == layer {
                self.layer = self.base_layer;
            } else {
                // The press already resolved as a tap (handled entirely
                // inside the lookahead loop below); this release is the
                // half that loop didn't consume.
                self.provider.write_event(event.retimed(EV_KEY, key, RELEASE));
            }
            return;
        }

        let press_event = event;
        loop {
            let next = match self.provider.read_event(0) {
                Some(next) => next,
                None => return, // unresolved: stream ended mid-hold
            };

            let same_key = next.is_key_event() && next.code == press_event.code;
            if same_key {
                match next.value {
                    RELEASE => {
                        let held_us = next.microseconds().saturating_sub(press_event.microseconds());
                        if held_us < delay_ms as u64 * 1_000 {
                            self.provider
                                .write_event(press_event.retimed(EV_KEY, key, PRESS));
                            self.provider.write_event(next.retimed(EV_KEY, key, RELEASE));
                        }
                        // else: a hold with no consequence — nothing to emit.
                        return;
                    }
                    REPEAT => continue,
                    other => {
                        log::warn!(
                            "unexpected value {other} for the watched key during layer-hold disambiguation; treating as a repeat"
                        );
                        continue;
                    }
                }
            } else if next.is_key_event() && next.value == PRESS {
                self.layer = layer;
                self.handle(next);
                return;
            } else {
                self.handle(next);
                // stay in the loop: still waiting on the watched key
            }
        }
    }

    fn dispatch_transparent(&mut self, event: Event, resolving_layer: u8) {
        if resolving_layer == self.base_layer {
            self.provider.write_event(event);
            return;
        }
        let base_action = self.layout.action_at(self.base_layer, event.code);
        self.dispatch(base_action, event, self.base_layer);
    }

    fn dispatch_hook(&mut self, handler: crate::action::HookFn, event: Event) {
        if event.value != PRESS {
            return;
        }
        if let Err(err) = handler() {
            log::warn!("{err}");
        }
    }

    #[cfg(test)]
    pub(crate) fn into_provider(self) -> P {
        self.provider
    }

    #[cfg(test)]
    pub(crate) fn layer_for_test(&self) -> u8 {
        self.layer
    }

    #[cfg(test)]
    pub(crate) fn set_layer_for_test(&mut self, layer: u8) {
        self.layer = layer;
    }

    fn dispatch_mouse_move(&mut self, axis: Axis, step_x: i32, step_y: i32, event: Event) {
        if event.value == RELEASE {
            return;
        }
        match axis {
            Axis::Cursor => {
                if step_x != 0 {
                    self.provider.write_event(event.retimed(EV_REL, REL_X, step_x));
                }
                if step_y != 0 {
                    self.provider.write_event(event.retimed(EV_REL, REL_Y, step_y));
                }
            }
            Axis::Wheel => {
                self.provider.write_event(event.retimed(EV_REL, REL_WHEEL, step_x));
            }
            Axis::Dial => {
                self.provider.write_event(event.retimed(EV_REL, REL_DIAL, step_x));
            }
            Axis::HWheel => {
                self.provider.write_event(event.retimed(EV_REL, REL_HWHEEL, step_y));
            }
        }
    }
}
