// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Touchpad: touchpad gesture to motion event conversion.
//!
//! A touchpad gesture library reports high-level gestures: cursor moves,
//! button changes, two finger scrolls, multi-finger swipes and pinches. Most
//! consumers understand a lower-level protocol instead: streams of
//! [`MotionEvent`]s with pointer downs, moves and ups. This crate bridges the
//! two.
//!
//! - Cursor motion and button changes become single-pointer events positioned
//!   at a shared, clamped cursor ([`CursorAuthority`]).
//! - Swipes, scrolls and pinches become streams of synthetic fingers with a
//!   [`MotionClassification`] and per-event [`GestureData`] so consumers can
//!   tell them apart from real touches.
//!
//! The converter is a deterministic state machine. It does no I/O, keeps no
//! clock and reads nothing global: the same gestures with the same
//! timestamps always produce the same events.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_touchpad::{
//!     AxisInfo, ButtonState, ConverterConfig, Gesture, GestureButtons, GestureConverter,
//!     GestureKind, MotionAction, PointerPosition, TouchpadInfo,
//! };
//!
//! let pad = TouchpadInfo::new(7, AxisInfo::new(-500.0, 500.0), AxisInfo::new(-500.0, 500.0));
//! let cursor = PointerPosition::for_display(800.0, 480.0, Point::new(100.0, 200.0));
//! let mut converter = GestureConverter::new(&pad, cursor, ConverterConfig::default()).unwrap();
//!
//! // Press the left button.
//! let click = GestureKind::ButtonsChange {
//!     down: GestureButtons::LEFT,
//!     up: GestureButtons::empty(),
//!     is_tap: false,
//! };
//! let events = converter.handle(1_000, 1_000, &Gesture::new(0.0, 0.0, click));
//! assert_eq!(events[0].action, MotionAction::Down);
//! assert_eq!(events[1].action, MotionAction::ButtonPress);
//!
//! // Drag: the move carries the held button.
//! let drag = GestureKind::Move { dx: 5.0, dy: 0.0 };
//! let events = converter.handle(2_000, 2_000, &Gesture::new(0.1, 0.1, drag));
//! assert_eq!(events[0].action, MotionAction::Move);
//! assert_eq!(events[0].button_state, ButtonState::PRIMARY);
//! assert_eq!(events[0].pointers[0].position, Point::new(105.0, 200.0));
//! ```
//!
//! ## Structure
//!
//! - [`gesture`]: inbound gesture vocabulary.
//! - [`motion`]: outbound motion events.
//! - [`device`]: touchpad calibration ([`DeviceContext`]).
//! - [`cursor`]: shared cursor and display rotation.
//! - [`buttons`]: button chord tracking.
//! - [`swipe`], [`scroll`], [`pinch`]: synthetic-finger families.
//! - [`converter`]: the dispatcher tying them together.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo` and `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`ConverterConfig`] and its parts.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod buttons;
pub mod config;
pub mod converter;
pub mod cursor;
pub mod device;
pub mod error;
pub mod gesture;
pub mod motion;
pub mod pinch;
pub mod pointers;
pub mod scroll;
pub mod swipe;

pub use buttons::{ButtonStep, ButtonTracker, map_buttons};
pub use config::{ConverterConfig, ScrollMode};
pub use converter::{ActiveGesture, GestureConverter};
pub use cursor::{CursorAuthority, PointerPosition, Rotation, move_cursor};
pub use device::{Axis, AxisInfo, DeviceContext, TouchpadInfo};
pub use error::{ConfigError, ConverterError};
pub use gesture::{FlingState, Gesture, GestureButtons, GestureKind, ZoomState};
pub use motion::{
    ButtonState, GestureData, MotionAction, MotionClassification, MotionEvent, PointerCoords,
    ToolType,
};
pub use pointers::VirtualPointerSet;
