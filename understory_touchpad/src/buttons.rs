// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button state machine for touchpad clicks.
//!
//! This module turns the library's "these buttons went down, these went up"
//! reports into the ordered transitions the motion protocol expects.
//!
//! ## Transition Rules
//!
//! For a change with pressed buttons `D` and released buttons `U`:
//!
//! 1. **Envelope down**: if nothing was held and `D` is non-empty, a `Down`
//!    carrying the combined state comes first.
//! 2. **Presses**: one `ButtonPress` per bit of `D`, in priority order
//!    (primary, secondary, tertiary, back, forward), each carrying the state
//!    accumulated so far.
//! 3. **Releases**: one `ButtonRelease` per held bit of `U`, in the same
//!    order, each carrying the state without that bit.
//! 4. **Envelope up**: if a release emptied the state, a trailing `Up`.
//!
//! A chord is never collapsed: pressing left and right at once yields two
//! press steps, so per-button consumers always observe monotonic state.
//!
//! ```
//! use understory_touchpad::buttons::ButtonTracker;
//! use understory_touchpad::gesture::GestureButtons;
//! use understory_touchpad::motion::{ButtonState, MotionAction};
//!
//! let mut tracker = ButtonTracker::new();
//! let steps = tracker.on_change(GestureButtons::LEFT | GestureButtons::RIGHT, GestureButtons::empty());
//! let actions: Vec<_> = steps.iter().map(|s| s.action).collect();
//! assert_eq!(actions, [MotionAction::Down, MotionAction::ButtonPress, MotionAction::ButtonPress]);
//! assert_eq!(tracker.state(), ButtonState::PRIMARY | ButtonState::SECONDARY);
//! ```

use alloc::vec::Vec;

use crate::gesture::GestureButtons;
use crate::motion::{ButtonState, MotionAction};

/// Library buttons and their protocol counterparts, in emission order.
const PRIORITY: [(GestureButtons, ButtonState); 5] = [
    (GestureButtons::LEFT, ButtonState::PRIMARY),
    (GestureButtons::RIGHT, ButtonState::SECONDARY),
    (GestureButtons::MIDDLE, ButtonState::TERTIARY),
    (GestureButtons::BACK, ButtonState::BACK),
    (GestureButtons::FORWARD, ButtonState::FORWARD),
];

/// Map library button bits to protocol button bits.
pub fn map_buttons(buttons: GestureButtons) -> ButtonState {
    PRIORITY
        .iter()
        .filter(|(library, _)| buttons.contains(*library))
        .fold(ButtonState::empty(), |acc, (_, button)| acc | *button)
}

/// One transition produced by [`ButtonTracker::on_change`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonStep {
    /// `Down`, `ButtonPress`, `ButtonRelease` or `Up`.
    pub action: MotionAction,
    /// Button that changed; empty for the envelope events.
    pub action_button: ButtonState,
    /// Buttons held after this step.
    pub button_state: ButtonState,
}

impl ButtonStep {
    /// Contact pressure for the event built from this step.
    pub fn pressure(&self) -> f32 {
        if self.action == MotionAction::Up {
            0.0
        } else {
            1.0
        }
    }
}

/// Tracks which buttons are held across gestures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonTracker {
    state: ButtonState,
}

impl ButtonTracker {
    /// A tracker with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buttons currently held.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Returns `true` if any button is held.
    pub fn is_pressed(&self) -> bool {
        !self.state.is_empty()
    }

    /// Apply one button change report and return the ordered transitions.
    ///
    /// `down` and `up` are expected to be disjoint unless the change is a tap,
    /// in which case the same buttons are pressed and then released. Releases
    /// of buttons that are not held are dropped.
    pub fn on_change(&mut self, down: GestureButtons, up: GestureButtons) -> Vec<ButtonStep> {
        let pressed = map_buttons(down);
        let released = map_buttons(up);
        let mut state = self.state;
        let mut steps = Vec::new();

        if state.is_empty() && !pressed.is_empty() {
            steps.push(ButtonStep {
                action: MotionAction::Down,
                action_button: ButtonState::empty(),
                button_state: state | pressed,
            });
        }

        for (_, button) in PRIORITY.iter().filter(|(_, b)| pressed.contains(*b)) {
            state |= *button;
            steps.push(ButtonStep {
                action: MotionAction::ButtonPress,
                action_button: *button,
                button_state: state,
            });
        }

        let mut any_released = false;
        for (_, button) in PRIORITY.iter().filter(|(_, b)| released.contains(*b)) {
            if !state.contains(*button) {
                tracing::debug!(?button, "ignoring release of a button that is not held");
                continue;
            }
            state.remove(*button);
            any_released = true;
            steps.push(ButtonStep {
                action: MotionAction::ButtonRelease,
                action_button: *button,
                button_state: state,
            });
        }

        if any_released && state.is_empty() {
            steps.push(ButtonStep {
                action: MotionAction::Up,
                action_button: ButtonState::empty(),
                button_state: state,
            });
        }

        self.state = state;
        steps
    }

    /// Release every held button, as if the library reported them all up.
    pub fn release_all(&mut self) -> Vec<ButtonStep> {
        let held = PRIORITY
            .iter()
            .filter(|(_, b)| self.state.contains(*b))
            .fold(GestureButtons::empty(), |acc, (library, _)| acc | *library);
        self.on_change(GestureButtons::empty(), held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(steps: &[ButtonStep]) -> Vec<MotionAction> {
        steps.iter().map(|s| s.action).collect()
    }

    #[test]
    fn maps_library_bits_to_protocol_bits() {
        assert_eq!(map_buttons(GestureButtons::RIGHT), ButtonState::SECONDARY);
        assert_eq!(map_buttons(GestureButtons::MIDDLE), ButtonState::TERTIARY);
        assert_eq!(
            map_buttons(GestureButtons::all()),
            ButtonState::all(),
            "every library button has a protocol counterpart"
        );
    }

    #[test]
    fn chord_press_emits_down_then_one_press_per_button() {
        let mut tracker = ButtonTracker::new();
        let steps = tracker.on_change(
            GestureButtons::LEFT | GestureButtons::RIGHT,
            GestureButtons::empty(),
        );

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].action, MotionAction::Down);
        assert_eq!(
            steps[0].button_state,
            ButtonState::PRIMARY | ButtonState::SECONDARY
        );
        assert_eq!(steps[1].action_button, ButtonState::PRIMARY);
        assert_eq!(steps[1].button_state, ButtonState::PRIMARY);
        assert_eq!(steps[2].action_button, ButtonState::SECONDARY);
        assert_eq!(
            steps[2].button_state,
            ButtonState::PRIMARY | ButtonState::SECONDARY
        );
    }

    #[test]
    fn partial_release_keeps_contact() {
        let mut tracker = ButtonTracker::new();
        tracker.on_change(
            GestureButtons::LEFT | GestureButtons::RIGHT,
            GestureButtons::empty(),
        );

        let steps = tracker.on_change(GestureButtons::empty(), GestureButtons::LEFT);
        assert_eq!(
            steps,
            [ButtonStep {
                action: MotionAction::ButtonRelease,
                action_button: ButtonState::PRIMARY,
                button_state: ButtonState::SECONDARY,
            }]
        );

        let steps = tracker.on_change(GestureButtons::empty(), GestureButtons::RIGHT);
        assert_eq!(
            actions(&steps),
            [MotionAction::ButtonRelease, MotionAction::Up]
        );
        assert_eq!(steps[0].action_button, ButtonState::SECONDARY);
        assert!(steps.iter().all(|s| s.button_state.is_empty()));
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn additional_press_has_no_envelope() {
        let mut tracker = ButtonTracker::new();
        tracker.on_change(GestureButtons::LEFT, GestureButtons::empty());

        let steps = tracker.on_change(GestureButtons::MIDDLE, GestureButtons::empty());
        assert_eq!(actions(&steps), [MotionAction::ButtonPress]);
        assert_eq!(
            steps[0].button_state,
            ButtonState::PRIMARY | ButtonState::TERTIARY
        );
    }

    #[test]
    fn tap_is_not_collapsed() {
        let mut tracker = ButtonTracker::new();
        let steps = tracker.on_change(GestureButtons::LEFT, GestureButtons::LEFT);

        assert_eq!(
            actions(&steps),
            [
                MotionAction::Down,
                MotionAction::ButtonPress,
                MotionAction::ButtonRelease,
                MotionAction::Up,
            ]
        );
        assert_eq!(steps[3].pressure(), 0.0);
        assert_eq!(steps[0].pressure(), 1.0);
        assert_eq!(tracker.state(), ButtonState::empty());
    }

    #[test]
    fn release_of_unheld_button_is_dropped() {
        let mut tracker = ButtonTracker::new();
        assert!(
            tracker
                .on_change(GestureButtons::empty(), GestureButtons::LEFT)
                .is_empty()
        );
    }

    #[test]
    fn release_all_ends_contact() {
        let mut tracker = ButtonTracker::new();
        tracker.on_change(
            GestureButtons::BACK | GestureButtons::LEFT,
            GestureButtons::empty(),
        );

        let steps = tracker.release_all();
        assert_eq!(
            actions(&steps),
            [
                MotionAction::ButtonRelease,
                MotionAction::ButtonRelease,
                MotionAction::Up,
            ]
        );
        assert_eq!(steps[0].action_button, ButtonState::PRIMARY);
        assert_eq!(steps[1].action_button, ButtonState::BACK);
        assert!(tracker.release_all().is_empty());
    }
}
