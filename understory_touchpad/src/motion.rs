// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion events emitted by the converter.
//!
//! ## Overview
//!
//! A [`MotionEvent`] is interpretable on its own: it always carries the full
//! current pointer list, not only the pointer that changed. Pointer indices in
//! [`MotionAction::PointerDown`] and [`MotionAction::PointerUp`] are positions
//! in that list, in acquisition order.
//!
//! ## Wire codes
//!
//! [`MotionAction::code`] yields the integer action used by the generic
//! multi-touch protocol, with the pointer index packed above
//! [`POINTER_INDEX_SHIFT`]:
//!
//! ```
//! use understory_touchpad::motion::MotionAction;
//!
//! assert_eq!(MotionAction::Down.code(), 0);
//! assert_eq!(MotionAction::PointerDown { index: 2 }.code(), 5 | (2 << 8));
//! assert_eq!(MotionAction::ButtonRelease.code(), 12);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Bit position of the pointer index inside a packed action code.
pub const POINTER_INDEX_SHIFT: u32 = 8;

/// Largest number of pointers a single event can carry.
pub const MAX_POINTERS: usize = 4;

bitflags::bitflags! {
    /// Buttons held while an event was generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonState: u32 {
        /// Primary (usually left) button.
        const PRIMARY   = 1 << 0;
        /// Secondary (usually right) button.
        const SECONDARY = 1 << 1;
        /// Tertiary (usually middle) button.
        const TERTIARY  = 1 << 2;
        /// Back button.
        const BACK      = 1 << 3;
        /// Forward button.
        const FORWARD   = 1 << 4;
    }
}

/// What a motion event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer went down.
    Down,
    /// Last pointer went up.
    Up,
    /// Pointers moved while in contact.
    Move,
    /// Pointer moved without contact.
    HoverMove,
    /// An additional pointer went down at `index`.
    PointerDown {
        /// Position of the new pointer in the event's pointer list.
        index: u8,
    },
    /// A non-last pointer went up at `index`.
    PointerUp {
        /// Position of the departing pointer in the event's pointer list.
        index: u8,
    },
    /// A button was pressed; see [`MotionEvent::action_button`].
    ButtonPress,
    /// A button was released; see [`MotionEvent::action_button`].
    ButtonRelease,
}

impl MotionAction {
    /// Packed protocol action code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
            Self::Move => 2,
            Self::PointerDown { index } => 5 | ((index as i32) << POINTER_INDEX_SHIFT),
            Self::PointerUp { index } => 6 | ((index as i32) << POINTER_INDEX_SHIFT),
            Self::HoverMove => 7,
            Self::ButtonPress => 11,
            Self::ButtonRelease => 12,
        }
    }

    /// Pointer index for pointer-down and pointer-up actions.
    pub const fn pointer_index(self) -> Option<u8> {
        match self {
            Self::PointerDown { index } | Self::PointerUp { index } => Some(index),
            _ => None,
        }
    }
}

/// How downstream consumers should interpret a stream of events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionClassification {
    /// Ordinary pointer input.
    #[default]
    None,
    /// Synthetic fingers of a three or four finger swipe.
    MultiFingerSwipe,
    /// Synthetic finger of a two finger scroll.
    TwoFingerSwipe,
    /// Synthetic fingers of a pinch.
    Pinch,
}

/// Classification-specific auxiliary payload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureData {
    /// Swipe motion for this event, as a fraction of the touchpad size.
    SwipeOffset(Vec2),
    /// Scroll distance for this event.
    ScrollDistance(Vec2),
    /// Relative change of the pinch separation for this event.
    PinchScale(f64),
}

/// Kind of tool that produced a pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolType {
    /// A finger on the touchpad surface.
    #[default]
    Finger,
}

/// Per-pointer sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerCoords {
    /// Stable pointer identifier within the current stream.
    pub id: u8,
    /// Absolute position in display space.
    pub position: Point,
    /// Relative motion since the previous sample.
    pub relative: Vec2,
    /// Contact pressure, `0.0` when hovering.
    pub pressure: f32,
    /// Tool that produced the pointer.
    pub tool_type: ToolType,
}

impl PointerCoords {
    /// A finger pointer at `position` with no relative motion.
    pub const fn finger(id: u8, position: Point, pressure: f32) -> Self {
        Self {
            id,
            position,
            relative: Vec2::ZERO,
            pressure,
            tool_type: ToolType::Finger,
        }
    }
}

/// Ordered pointer list of one event.
pub type Pointers = SmallVec<[PointerCoords; MAX_POINTERS]>;

/// One event of the generic motion protocol.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    /// Device that produced the gesture.
    pub device_id: i32,
    /// When the gesture happened, in nanoseconds.
    pub event_time: i64,
    /// When the gesture was read from the device, in nanoseconds.
    pub read_time: i64,
    /// Event time of the `Down` that opened the current stream.
    pub down_time: i64,
    /// What this event reports.
    pub action: MotionAction,
    /// Button whose transition caused a press or release event.
    pub action_button: ButtonState,
    /// All buttons held after this event.
    pub button_state: ButtonState,
    /// Stream classification.
    pub classification: MotionClassification,
    /// Payload for classified streams.
    pub gesture_data: Option<GestureData>,
    /// Cursor position for cursor-driven events, `None` for synthetic fingers.
    pub cursor_position: Option<Point>,
    /// Current pointers in acquisition order.
    pub pointers: Pointers,
}

impl MotionEvent {
    /// Number of pointers carried by the event.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Swipe offset for this event, or zero when none was attached.
    pub fn gesture_offset(&self) -> Vec2 {
        match self.gesture_data {
            Some(GestureData::SwipeOffset(offset)) => offset,
            _ => Vec2::ZERO,
        }
    }

    /// Scroll distance for this event, or zero when none was attached.
    pub fn scroll_distance(&self) -> Vec2 {
        match self.gesture_data {
            Some(GestureData::ScrollDistance(distance)) => distance,
            _ => Vec2::ZERO,
        }
    }

    /// Pinch scale factor for this event, if any.
    pub fn pinch_scale(&self) -> Option<f64> {
        match self.gesture_data {
            Some(GestureData::PinchScale(scale)) => Some(scale),
            _ => None,
        }
    }
}

/// Per-call stamping shared by every event the converter emits in one call.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EventStamp {
    pub(crate) device_id: i32,
    pub(crate) event_time: i64,
    pub(crate) read_time: i64,
    pub(crate) down_time: i64,
    pub(crate) button_state: ButtonState,
}

impl EventStamp {
    /// Start a new event with the stamp applied and neutral defaults elsewhere.
    pub(crate) fn event(&self, action: MotionAction, pointers: &[PointerCoords]) -> MotionEvent {
        MotionEvent {
            device_id: self.device_id,
            event_time: self.event_time,
            read_time: self.read_time,
            down_time: self.down_time,
            action,
            action_button: ButtonState::empty(),
            button_state: self.button_state,
            classification: MotionClassification::None,
            gesture_data: None,
            cursor_position: None,
            pointers: SmallVec::from_slice(pointers),
        }
    }

    /// An event for synthetic fingers with a stream classification.
    ///
    /// The payload is dropped for unclassified streams.
    pub(crate) fn classified(
        &self,
        action: MotionAction,
        pointers: &[PointerCoords],
        classification: MotionClassification,
        data: GestureData,
    ) -> MotionEvent {
        let mut event = self.event(action, pointers);
        event.classification = classification;
        if classification != MotionClassification::None {
            event.gesture_data = Some(data);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_codes_pack_pointer_index() {
        assert_eq!(MotionAction::Up.code(), 1);
        assert_eq!(MotionAction::Move.code(), 2);
        assert_eq!(MotionAction::HoverMove.code(), 7);
        assert_eq!(MotionAction::ButtonPress.code(), 11);
        assert_eq!(MotionAction::PointerDown { index: 1 }.code(), 0x105);
        assert_eq!(MotionAction::PointerUp { index: 3 }.code(), 0x306);
        assert_eq!(MotionAction::PointerUp { index: 3 }.pointer_index(), Some(3));
        assert_eq!(MotionAction::Down.pointer_index(), None);
    }

    #[test]
    fn payload_accessors_default_to_zero() {
        let stamp = EventStamp {
            device_id: 1,
            event_time: 10,
            read_time: 11,
            down_time: 10,
            button_state: ButtonState::PRIMARY,
        };
        let plain = stamp.classified(
            MotionAction::Move,
            &[],
            MotionClassification::None,
            GestureData::PinchScale(2.0),
        );
        assert_eq!(plain.gesture_data, None, "unclassified events carry no payload");
        assert_eq!(plain.button_state, ButtonState::PRIMARY);

        let mut event = stamp.event(MotionAction::Move, &[]);
        assert_eq!(event.gesture_offset(), Vec2::ZERO);
        assert_eq!(event.scroll_distance(), Vec2::ZERO);
        assert_eq!(event.pinch_scale(), None);

        event.gesture_data = Some(GestureData::SwipeOffset(Vec2::new(0.5, 0.0)));
        assert_eq!(event.gesture_offset(), Vec2::new(0.5, 0.0));
        assert_eq!(event.scroll_distance(), Vec2::ZERO);
    }
}
