// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-finger swipe synthesis.
//!
//! ## Overview
//!
//! The touchpad library reports three and four finger swipes as a single
//! aggregate delta. Downstream consumers expect real multi-touch streams, so
//! this module fabricates one synthetic finger per swiping finger and moves
//! them together.
//!
//! ## Lifecycle
//!
//! - **Start**: fingers are acquired in a row around the cursor and announced
//!   one at a time: `Down` with one pointer, then `PointerDown { index: i }`
//!   with `i + 1` pointers.
//! - **Continue**: one `Move` carrying every finger. The whole-pixel part of
//!   the accumulated delta is applied; the fractional rest waits in
//!   [`AccumulatedOffset`]. The event's payload is this call's delta as a
//!   fraction of the touchpad size.
//! - **Lift**: `PointerUp { index: i }` from the last finger down to index 1,
//!   each with `i + 1` pointers, then `Up` with the first finger.
//!
//! ## Axis lock
//!
//! The library locks a swipe to the axis it starts moving in and keeps
//! reporting only that axis until the fingers lift. [`AxisLock`] mirrors this:
//! the first non-zero delta picks the axis and the other component is
//! ignored until the family ends.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::cursor::Rotation;
use crate::motion::{
    EventStamp, GestureData, MotionAction, MotionClassification, MotionEvent,
};
use crate::pointers::VirtualPointerSet;

/// Axis a swipe is locked to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeAxis {
    /// Only horizontal motion is honored.
    Horizontal,
    /// Only vertical motion is honored.
    Vertical,
}

/// Dominant-axis lock for one swipe family.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisLock {
    axis: Option<SwipeAxis>,
}

impl AxisLock {
    /// The locked axis, once motion has been observed.
    pub fn axis(&self) -> Option<SwipeAxis> {
        self.axis
    }

    /// Lock on the first non-zero delta and project `delta` onto the locked axis.
    ///
    /// When both components of the first delta are non-zero the larger one
    /// wins; ties lock horizontally.
    pub fn apply(&mut self, delta: Vec2) -> Vec2 {
        if self.axis.is_none() && (delta.x != 0.0 || delta.y != 0.0) {
            self.axis = Some(if delta.x.abs() >= delta.y.abs() {
                SwipeAxis::Horizontal
            } else {
                SwipeAxis::Vertical
            });
        }
        match self.axis {
            None => delta,
            Some(SwipeAxis::Horizontal) => Vec2::new(delta.x, 0.0),
            Some(SwipeAxis::Vertical) => Vec2::new(0.0, delta.y),
        }
    }
}

/// Fractional pixel motion not yet applied to the synthetic fingers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AccumulatedOffset {
    remainder: Vec2,
}

impl AccumulatedOffset {
    /// Motion received but not yet applied.
    pub fn remainder(&self) -> Vec2 {
        self.remainder
    }

    /// Add `delta` and take out the whole pixels, keeping the fraction.
    pub fn take_whole(&mut self, delta: Vec2) -> Vec2 {
        let total = self.remainder + delta;
        let whole = total.round();
        self.remainder = total - whole;
        whole
    }
}

/// Continuation state of an active swipe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeState {
    finger_count: u8,
    lock: AxisLock,
    offset: AccumulatedOffset,
}

impl SwipeState {
    /// Number of synthetic fingers in this family.
    pub fn finger_count(&self) -> u8 {
        self.finger_count
    }

    /// Current axis lock.
    pub fn axis_lock(&self) -> AxisLock {
        self.lock
    }

    /// Pixels received but not yet applied.
    pub fn pending(&self) -> Vec2 {
        self.offset.remainder()
    }
}

/// Acquire `finger_count` fingers around `center` and announce them.
pub(crate) fn start(
    finger_count: u8,
    pointers: &mut VirtualPointerSet,
    center: Point,
    spacing: f64,
    bounds: Rect,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) -> SwipeState {
    pointers.acquire_row(center, usize::from(finger_count), spacing, bounds);
    tracing::debug!(finger_count, "multi-finger swipe started");

    out.push(stamp.classified(
        MotionAction::Down,
        pointers.prefix(1),
        MotionClassification::MultiFingerSwipe,
        GestureData::SwipeOffset(Vec2::ZERO),
    ));
    for index in 1..finger_count {
        out.push(stamp.classified(
            MotionAction::PointerDown { index },
            pointers.prefix(usize::from(index) + 1),
            MotionClassification::MultiFingerSwipe,
            GestureData::SwipeOffset(Vec2::ZERO),
        ));
    }

    SwipeState {
        finger_count,
        lock: AxisLock::default(),
        offset: AccumulatedOffset::default(),
    }
}

/// Apply the library's axis lock to a raw swipe delta.
pub(crate) fn lock(state: &mut SwipeState, raw: Vec2) -> Vec2 {
    state.lock.apply(raw)
}

/// Move every finger by an already locked delta and emit one `Move`.
///
/// `surface` is the touchpad size in device units, used to normalize the
/// reported offset.
pub(crate) fn advance(
    state: &mut SwipeState,
    pointers: &mut VirtualPointerSet,
    delta: Vec2,
    rotation: Rotation,
    surface: Vec2,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) {
    // Library Y grows towards the user; finger Y grows down the screen.
    let finger_delta = rotation.rotate(Vec2::new(delta.x, -delta.y));
    pointers.translate(state.offset.take_whole(finger_delta));

    let offset = Vec2::new(delta.x / surface.x, -delta.y / surface.y);
    out.push(stamp.classified(
        MotionAction::Move,
        pointers.as_slice(),
        MotionClassification::MultiFingerSwipe,
        GestureData::SwipeOffset(offset),
    ));
}

/// Release the fingers in reverse acquisition order.
pub(crate) fn lift(
    state: &SwipeState,
    pointers: &mut VirtualPointerSet,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) {
    for index in (1..state.finger_count).rev() {
        out.push(stamp.classified(
            MotionAction::PointerUp { index },
            pointers.prefix(usize::from(index) + 1),
            MotionClassification::MultiFingerSwipe,
            GestureData::SwipeOffset(Vec2::ZERO),
        ));
    }
    out.push(stamp.classified(
        MotionAction::Up,
        pointers.prefix(1),
        MotionClassification::MultiFingerSwipe,
        GestureData::SwipeOffset(Vec2::ZERO),
    ));
    pointers.clear();
    tracing::debug!(finger_count = state.finger_count, "multi-finger swipe lifted");
}
