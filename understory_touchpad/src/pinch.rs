// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two finger pinch.
//!
//! A pinch places two synthetic fingers on a horizontal line through the
//! cursor. Each update multiplies their separation by the reported zoom
//! factor and keeps them centred on the starting point. The payload of every
//! event is the scale factor for that event (`1.0` on start and end).

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::motion::{EventStamp, GestureData, MotionAction, MotionClassification, MotionEvent};
use crate::pointers::VirtualPointerSet;

/// Continuation state of an active pinch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchState {
    center: Point,
    separation: f64,
}

impl PinchState {
    /// Current distance between the two fingers.
    pub fn separation(&self) -> f64 {
        self.separation
    }
}

fn event(
    stamp: &EventStamp,
    action: MotionAction,
    pointers: &VirtualPointerSet,
    count: usize,
    scale: f64,
) -> MotionEvent {
    stamp.classified(
        action,
        pointers.prefix(count),
        MotionClassification::Pinch,
        GestureData::PinchScale(scale),
    )
}

/// Acquire two fingers around the cursor and emit `Down` and `PointerDown`.
pub(crate) fn start(
    pointers: &mut VirtualPointerSet,
    cursor: Point,
    separation: f64,
    bounds: Rect,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) -> PinchState {
    pointers.acquire_row(cursor, 2, separation, bounds);
    let [first, second] = [pointers.as_slice()[0].position, pointers.as_slice()[1].position];

    out.push(event(stamp, MotionAction::Down, pointers, 1, 1.0));
    out.push(event(stamp, MotionAction::PointerDown { index: 1 }, pointers, 2, 1.0));
    tracing::debug!("pinch started");

    PinchState {
        center: first.midpoint(second),
        separation: second.x - first.x,
    }
}

/// Scale the separation by `dz` and emit `Move`.
pub(crate) fn update(
    state: &mut PinchState,
    pointers: &mut VirtualPointerSet,
    dz: f64,
    stamp: &EventStamp,
    out: &mut Vec<MotionEvent>,
) {
    state.separation *= dz;
    pointers.spread_around(state.center, state.separation);
    out.push(event(stamp, MotionAction::Move, pointers, 2, dz));
}

/// Lift both fingers and emit `PointerUp` and `Up`.
pub(crate) fn end(pointers: &mut VirtualPointerSet, stamp: &EventStamp, out: &mut Vec<MotionEvent>) {
    out.push(event(stamp, MotionAction::PointerUp { index: 1 }, pointers, 2, 1.0));
    out.push(event(stamp, MotionAction::Up, pointers, 1, 1.0));
    pointers.clear();
    tracing::debug!("pinch ended");
}
