// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture dispatcher.
//!
//! ## Overview
//!
//! [`GestureConverter::handle`] consumes one recognized gesture and returns
//! the ordered motion events representing it. Between calls the converter
//! remembers held buttons and the active synthetic-finger family (swipe,
//! scroll or pinch) so that continuations and lifts produce well-formed
//! streams.
//!
//! ## Ordering guarantees
//!
//! - Pointer downs precede every move or button event referencing them.
//! - Button presses follow the `Down` that established contact.
//! - Pointer ups are emitted in reverse acquisition order, after everything
//!   else for that family.
//! - Starting a family while another is active first closes the active one.
//! - Cursor motion and button changes close an active family before their
//!   own events, so cursor and synthetic-finger streams never interleave.
//!
//! ## Unsupported gestures
//!
//! Gestures the converter does not represent (contact initiation, metrics,
//! mouse wheel) and continuations without an active family yield an empty
//! sequence. Input keeps flowing; nothing is treated as an error.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_touchpad::config::ConverterConfig;
//! use understory_touchpad::converter::GestureConverter;
//! use understory_touchpad::cursor::PointerPosition;
//! use understory_touchpad::device::{AxisInfo, TouchpadInfo};
//! use understory_touchpad::gesture::{Gesture, GestureKind};
//! use understory_touchpad::motion::MotionAction;
//!
//! let pad = TouchpadInfo::new(1, AxisInfo::new(-500.0, 500.0), AxisInfo::new(-500.0, 500.0));
//! let cursor = PointerPosition::for_display(800.0, 480.0, Point::new(100.0, 200.0));
//! let mut converter = GestureConverter::new(&pad, cursor, ConverterConfig::default()).unwrap();
//!
//! let events = converter.handle(0, 0, &Gesture::new(1.2, 1.2, GestureKind::Swipe { dx: 0.0, dy: 10.0 }));
//! let actions: Vec<_> = events.iter().map(|e| e.action).collect();
//! assert_eq!(
//!     actions,
//!     [
//!         MotionAction::Down,
//!         MotionAction::PointerDown { index: 1 },
//!         MotionAction::PointerDown { index: 2 },
//!         MotionAction::Move,
//!     ]
//! );
//!
//! let events = converter.handle(1, 1, &Gesture::new(1.3, 1.3, GestureKind::SwipeLift));
//! assert_eq!(events.len(), 3);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::buttons::{ButtonStep, ButtonTracker};
use crate::config::ConverterConfig;
use crate::cursor::{CursorAuthority, Rotation, move_cursor};
use crate::device::{Axis, DeviceContext};
use crate::error::ConverterError;
use crate::gesture::{FlingState, Gesture, GestureButtons, GestureKind, ZoomState};
use crate::motion::{
    ButtonState, EventStamp, MotionAction, MotionClassification, MotionEvent, PointerCoords,
};
use crate::pinch::{self, PinchState};
use crate::pointers::VirtualPointerSet;
use crate::scroll::{self, ScrollState};
use crate::swipe::{self, SwipeState};

/// Synthetic-finger family currently in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum ActiveGesture {
    /// No synthetic fingers are held.
    #[default]
    Idle,
    /// A three or four finger swipe.
    Swipe(SwipeState),
    /// A two finger scroll.
    Scroll(ScrollState),
    /// A two finger pinch.
    Pinch(PinchState),
}

impl ActiveGesture {
    /// Classification of the events this family emits.
    pub fn classification(&self) -> MotionClassification {
        match self {
            Self::Idle => MotionClassification::None,
            Self::Swipe(_) => MotionClassification::MultiFingerSwipe,
            Self::Scroll(state) => state.classification(),
            Self::Pinch(_) => MotionClassification::Pinch,
        }
    }
}

/// Event and read time of the gesture being handled.
#[derive(Copy, Clone, Debug)]
struct Times {
    event: i64,
    read: i64,
}

/// Converts recognized touchpad gestures into motion events.
///
/// ## Usage
///
/// - Build with [`GestureConverter::new`] from a [`DeviceContext`], a
///   [`CursorAuthority`] and a [`ConverterConfig`].
/// - Call [`GestureConverter::set_orientation`] whenever the display rotates.
/// - Feed every gesture to [`GestureConverter::handle`] in arrival order and
///   forward the returned events downstream, preserving their order.
/// - Call [`GestureConverter::reset`] when the device goes away to close any
///   open stream.
#[derive(Debug)]
pub struct GestureConverter<C> {
    device_id: i32,
    /// Touchpad size in device units, for normalizing swipe offsets.
    surface: Vec2,
    config: ConverterConfig,
    orientation: Rotation,
    cursor: C,
    buttons: ButtonTracker,
    pointers: VirtualPointerSet,
    active: ActiveGesture,
    /// Event time of the button `Down` opening the cursor stream.
    cursor_down_time: i64,
    /// Event time of the `Down` opening the active family.
    family_down_time: i64,
}

impl<C: CursorAuthority> GestureConverter<C> {
    /// Create a converter for `device`, driving `cursor`.
    ///
    /// Fails if the configuration is invalid or the device lacks usable
    /// calibration for either position axis.
    pub fn new<D: DeviceContext + ?Sized>(
        device: &D,
        cursor: C,
        config: ConverterConfig,
    ) -> Result<Self, ConverterError> {
        config.validate()?;
        let surface = Vec2::new(axis_range(device, Axis::X)?, axis_range(device, Axis::Y)?);
        Ok(Self {
            device_id: device.device_id(),
            surface,
            orientation: config.orientation,
            config,
            cursor,
            buttons: ButtonTracker::new(),
            pointers: VirtualPointerSet::new(),
            active: ActiveGesture::Idle,
            cursor_down_time: 0,
            family_down_time: 0,
        })
    }

    /// Device identifier stamped on emitted events.
    pub fn device_id(&self) -> i32 {
        self.device_id
    }

    /// Current display rotation.
    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Set the display rotation used for subsequent deltas.
    pub fn set_orientation(&mut self, orientation: Rotation) {
        self.orientation = orientation;
    }

    /// Buttons currently held.
    pub fn button_state(&self) -> ButtonState {
        self.buttons.state()
    }

    /// Classification of the family in progress, or `None` when idle.
    pub fn classification(&self) -> MotionClassification {
        self.active.classification()
    }

    /// Family in progress.
    pub fn active_gesture(&self) -> &ActiveGesture {
        &self.active
    }

    /// Synthetic fingers currently held, in acquisition order.
    pub fn virtual_pointers(&self) -> &[PointerCoords] {
        self.pointers.as_slice()
    }

    /// The cursor authority.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Mutable access to the cursor authority.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// Convert one gesture into motion events.
    ///
    /// `event_time` and `read_time` are in nanoseconds and are stamped on
    /// every returned event. They are expected to be non-decreasing across
    /// calls but this is not checked.
    pub fn handle(&mut self, event_time: i64, read_time: i64, gesture: &Gesture) -> Vec<MotionEvent> {
        let times = Times {
            event: event_time,
            read: read_time,
        };
        let mut out = Vec::new();

        match gesture.kind {
            GestureKind::Move { dx, dy } => self.handle_move(times, Vec2::new(dx, dy), &mut out),
            GestureKind::ButtonsChange { down, up, .. } => {
                self.handle_buttons_change(times, down, up, &mut out);
            }
            GestureKind::Swipe { dx, dy } => {
                self.handle_swipe(times, 3, Vec2::new(dx, dy), &mut out);
            }
            GestureKind::FourFingerSwipe { dx, dy } => {
                self.handle_swipe(times, 4, Vec2::new(dx, dy), &mut out);
            }
            GestureKind::SwipeLift | GestureKind::FourFingerSwipeLift => {
                self.handle_swipe_lift(times, &mut out);
            }
            GestureKind::Scroll { dx, dy } => self.handle_scroll(times, Vec2::new(dx, dy), &mut out),
            GestureKind::Fling { state, .. } => self.handle_fling(times, state, &mut out),
            GestureKind::Pinch { dz, state } => self.handle_pinch(times, dz, state, &mut out),
            GestureKind::ContactInitiated | GestureKind::Metrics | GestureKind::MouseWheel { .. } => {
                tracing::debug!(kind = ?gesture.kind, "ignoring unsupported gesture");
            }
        }

        tracing::trace!(count = out.len(), "gesture converted");
        out
    }

    /// Close any open stream: lift synthetic fingers and release held buttons.
    pub fn reset(&mut self, event_time: i64, read_time: i64) -> Vec<MotionEvent> {
        let times = Times {
            event: event_time,
            read: read_time,
        };
        let mut out = Vec::new();
        self.end_active(times, &mut out);
        let steps = self.buttons.release_all();
        self.emit_button_steps(times, &steps, &mut out);
        out
    }

    /// Stamp for events of the active family.
    fn stamp(&self, times: Times) -> EventStamp {
        self.stamp_with(times, self.family_down_time)
    }

    /// Stamp for cursor-driven events.
    fn cursor_stamp(&self, times: Times) -> EventStamp {
        self.stamp_with(times, self.cursor_down_time)
    }

    fn stamp_with(&self, times: Times, down_time: i64) -> EventStamp {
        EventStamp {
            device_id: self.device_id,
            event_time: times.event,
            read_time: times.read,
            down_time,
            button_state: self.buttons.state(),
        }
    }

    fn cursor_event(
        &self,
        stamp: &EventStamp,
        action: MotionAction,
        position: Point,
        relative: Vec2,
        pressure: f32,
    ) -> MotionEvent {
        let coords = PointerCoords {
            relative,
            ..PointerCoords::finger(0, position, pressure)
        };
        let mut event = stamp.event(action, &[coords]);
        event.cursor_position = Some(position);
        event
    }

    fn handle_move(&mut self, times: Times, delta: Vec2, out: &mut Vec<MotionEvent>) {
        // Cursor events never share a stream with synthetic fingers.
        self.end_active(times, out);
        let relative = move_cursor(&mut self.cursor, self.orientation, delta);
        let position = self.cursor.position();
        let (action, pressure) = if self.buttons.is_pressed() {
            (MotionAction::Move, 1.0)
        } else {
            (MotionAction::HoverMove, 0.0)
        };
        let stamp = self.cursor_stamp(times);
        out.push(self.cursor_event(&stamp, action, position, relative, pressure));
    }

    fn handle_buttons_change(
        &mut self,
        times: Times,
        down: GestureButtons,
        up: GestureButtons,
        out: &mut Vec<MotionEvent>,
    ) {
        self.end_active(times, out);
        let steps = self.buttons.on_change(down, up);
        self.emit_button_steps(times, &steps, out);
    }

    fn emit_button_steps(
        &mut self,
        times: Times,
        steps: &[ButtonStep],
        out: &mut Vec<MotionEvent>,
    ) {
        if steps.first().is_some_and(|s| s.action == MotionAction::Down) {
            self.cursor_down_time = times.event;
        }
        let stamp = self.cursor_stamp(times);
        let position = self.cursor.position();
        for step in steps {
            let mut event =
                self.cursor_event(&stamp, step.action, position, Vec2::ZERO, step.pressure());
            event.action_button = step.action_button;
            event.button_state = step.button_state;
            out.push(event);
        }
    }

    fn handle_swipe(
        &mut self,
        times: Times,
        finger_count: u8,
        raw: Vec2,
        out: &mut Vec<MotionEvent>,
    ) {
        let continuing = matches!(
            &self.active,
            ActiveGesture::Swipe(state) if state.finger_count() == finger_count
        );
        if !continuing {
            self.end_active(times, out);
            self.family_down_time = times.event;
            let stamp = self.stamp(times);
            let state = swipe::start(
                finger_count,
                &mut self.pointers,
                self.cursor.position(),
                self.config.swipe_finger_spacing,
                self.cursor.bounds(),
                &stamp,
                out,
            );
            self.active = ActiveGesture::Swipe(state);
        }

        let stamp = self.stamp(times);
        let ActiveGesture::Swipe(state) = &mut self.active else {
            return;
        };
        let delta = swipe::lock(state, raw);
        if !continuing && delta == Vec2::ZERO {
            return;
        }
        swipe::advance(
            state,
            &mut self.pointers,
            delta,
            self.orientation,
            self.surface,
            &stamp,
            out,
        );
    }

    fn handle_swipe_lift(&mut self, times: Times, out: &mut Vec<MotionEvent>) {
        if matches!(self.active, ActiveGesture::Swipe(_)) {
            self.end_active(times, out);
        } else {
            tracing::debug!("ignoring swipe lift without an active swipe");
        }
    }

    fn handle_scroll(&mut self, times: Times, delta: Vec2, out: &mut Vec<MotionEvent>) {
        if !matches!(self.active, ActiveGesture::Scroll(_)) {
            self.end_active(times, out);
            self.family_down_time = times.event;
            let stamp = self.stamp(times);
            let state = scroll::start(
                self.config.scroll_mode,
                &mut self.pointers,
                self.cursor.position(),
                self.cursor.bounds(),
                &stamp,
                out,
            );
            self.active = ActiveGesture::Scroll(state);
        }

        let stamp = self.stamp(times);
        if let ActiveGesture::Scroll(state) = &self.active {
            scroll::advance(state, &mut self.pointers, delta, self.orientation, &stamp, out);
        }
    }

    fn handle_fling(&mut self, times: Times, state: FlingState, out: &mut Vec<MotionEvent>) {
        if state == FlingState::Start && matches!(self.active, ActiveGesture::Scroll(_)) {
            self.end_active(times, out);
        } else {
            tracing::debug!(?state, "ignoring fling outside of a scroll");
        }
    }

    fn handle_pinch(&mut self, times: Times, dz: f64, zoom: ZoomState, out: &mut Vec<MotionEvent>) {
        match zoom {
            ZoomState::Start => {
                self.end_active(times, out);
                self.family_down_time = times.event;
                let stamp = self.stamp(times);
                let state = pinch::start(
                    &mut self.pointers,
                    self.cursor.position(),
                    self.config.pinch_initial_separation,
                    self.cursor.bounds(),
                    &stamp,
                    out,
                );
                self.active = ActiveGesture::Pinch(state);
            }
            ZoomState::Update => {
                let stamp = self.stamp(times);
                if let ActiveGesture::Pinch(state) = &mut self.active {
                    pinch::update(state, &mut self.pointers, dz, &stamp, out);
                } else {
                    tracing::debug!("ignoring pinch update without an active pinch");
                }
            }
            ZoomState::End => {
                if matches!(self.active, ActiveGesture::Pinch(_)) {
                    self.end_active(times, out);
                } else {
                    tracing::debug!("ignoring pinch end without an active pinch");
                }
            }
        }
    }

    /// Emit the terminating events of the active family and return to idle.
    fn end_active(&mut self, times: Times, out: &mut Vec<MotionEvent>) {
        let stamp = self.stamp(times);
        match core::mem::take(&mut self.active) {
            ActiveGesture::Idle => {}
            ActiveGesture::Swipe(state) => swipe::lift(&state, &mut self.pointers, &stamp, out),
            ActiveGesture::Scroll(state) => scroll::end(&state, &mut self.pointers, &stamp, out),
            ActiveGesture::Pinch(_) => pinch::end(&mut self.pointers, &stamp, out),
        }
    }
}

fn axis_range<D: DeviceContext + ?Sized>(device: &D, axis: Axis) -> Result<f64, ConverterError> {
    let device_id = device.device_id();
    let info = device
        .axis_info(axis)
        .ok_or(ConverterError::MissingAxis { device_id, axis })?;
    let range = info.range();
    if range.is_finite() && range > 0.0 {
        Ok(range)
    } else {
        Err(ConverterError::DegenerateAxis {
            device_id,
            axis,
            min: info.min,
            max: info.max,
        })
    }
}
