// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two finger scroll and fling.
//!
//! A scroll is represented by a single synthetic finger that starts under the
//! cursor and follows the scroll delta. The first scroll of a family emits
//! `Down` followed by `Move`; later scrolls emit `Move`. A fling start ends the
//! family with `Up`.
//!
//! Unlike swipes there is no axis lock and no fractional carry: the finger
//! follows the reported delta exactly. With [`ScrollMode::Legacy`] the
//! events are unclassified and carry no scroll distance.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use crate::config::ScrollMode;
use crate::cursor::{Rotation, clamp_to};
use crate::motion::{EventStamp, GestureData, MotionAction, MotionClassification, MotionEvent};
use crate::pointers::VirtualPointerSet;

/// Continuation state of an active scroll.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollState {
    classification: MotionClassification,
}

impl ScrollState {
    /// Classification stamped on this family's events.
    pub fn classification(&self) -> MotionClassification {
        self.classification
    }
}

fn classification_for(mode: ScrollMode) -> MotionClassification {
    match mode {
        ScrollMode::Classified => MotionClassification::TwoFingerSwipe,
        ScrollMode::Legacy => MotionClassification::None,
    }
}

/// Put one finger under the cursor and emit `Down`.
pub(crate) fn start(
    mode: ScrollMode,
    pointers: &mut VirtualPointerSet,
    cursor: Point,
    bounds: Rect,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) -> ScrollState {
    let state = ScrollState {
        classification: classification_for(mode),
    };
    pointers.acquire_row(clamp_to(cursor, bounds), 1, 0.0, bounds);
    out.push(stamp.classified(
        MotionAction::Down,
        pointers.as_slice(),
        state.classification,
        GestureData::ScrollDistance(Vec2::ZERO),
    ));
    tracing::debug!(classification = ?state.classification, "scroll started");
    state
}

/// Move the finger by the rotated scroll delta and emit `Move`.
pub(crate) fn advance(
    state: &ScrollState,
    pointers: &mut VirtualPointerSet,
    delta: Vec2,
    rotation: Rotation,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) {
    pointers.translate(rotation.rotate(delta));
    out.push(stamp.classified(
        MotionAction::Move,
        pointers.as_slice(),
        state.classification,
        GestureData::ScrollDistance(-delta),
    ));
}

/// Lift the finger and emit `Up`.
pub(crate) fn end(
    state: &ScrollState,
    pointers: &mut VirtualPointerSet,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) {
    out.push(stamp.classified(
        MotionAction::Up,
        pointers.as_slice(),
        state.classification,
        GestureData::ScrollDistance(Vec2::ZERO),
    ));
    pointers.clear();
    tracing::debug!("scroll ended");
}
