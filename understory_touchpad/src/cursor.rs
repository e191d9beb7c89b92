// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor authority and display rotation.
//!
//! ## Overview
//!
//! The absolute cursor position is owned outside the converter, typically by
//! a pointer controller shared between all pointing devices. The converter
//! reads and adjusts it through [`CursorAuthority`]; callers guarantee that no
//! one else mutates it while one gesture is being handled.
//!
//! Relative deltas arrive in the touchpad's native orientation. They are
//! rotated with [`Rotation::rotate`] so that a library-reported "move left"
//! moves the cursor left on the rotated display, then applied and clamped to
//! the authority's bounds.
//!
//! ```
//! use kurbo::{Point, Rect, Vec2};
//! use understory_touchpad::cursor::{move_cursor, PointerPosition, Rotation};
//!
//! let mut cursor = PointerPosition::new(Point::new(100.0, 200.0), Rect::new(0.0, 0.0, 799.0, 479.0));
//! let rotated = move_cursor(&mut cursor, Rotation::Deg90, Vec2::new(-5.0, 10.0));
//! assert_eq!(rotated, Vec2::new(10.0, 5.0));
//! assert_eq!(cursor.position, Point::new(110.0, 205.0));
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Point, Rect, Vec2};

use crate::error::ConfigError;

/// Display rotation relative to the touchpad's native orientation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// Natural orientation.
    #[default]
    Deg0,
    /// Rotated a quarter turn.
    Deg90,
    /// Upside down.
    Deg180,
    /// Rotated three quarter turns.
    Deg270,
}

impl Rotation {
    /// Parse a rotation from an angle in degrees.
    pub fn from_degrees(degrees: u32) -> Result<Self, ConfigError> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(ConfigError::InvalidRotation { degrees }),
        }
    }

    /// Angle in degrees.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Rotate a relative delta from device orientation into display orientation.
    ///
    /// Length is preserved for every rotation.
    pub fn rotate(self, delta: Vec2) -> Vec2 {
        match self {
            Self::Deg0 => delta,
            Self::Deg90 => Vec2::new(delta.y, -delta.x),
            Self::Deg180 => Vec2::new(-delta.x, -delta.y),
            Self::Deg270 => Vec2::new(-delta.y, delta.x),
        }
    }
}

/// Owner of the absolute cursor position.
pub trait CursorAuthority {
    /// Current cursor position.
    fn position(&self) -> Point;

    /// Move the cursor to `position`.
    fn set_position(&mut self, position: Point);

    /// Inclusive bounds the cursor may occupy, for example `(0, 0, width - 1, height - 1)`.
    fn bounds(&self) -> Rect;
}

/// A standalone cursor authority: a position and its bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerPosition {
    /// Current position.
    pub position: Point,
    /// Inclusive bounds.
    pub bounds: Rect,
}

impl PointerPosition {
    /// Create an authority at `position`, clamped into `bounds`.
    pub fn new(position: Point, bounds: Rect) -> Self {
        Self {
            position: clamp_to(position, bounds),
            bounds,
        }
    }

    /// Authority for a `width` × `height` display, starting at `position`.
    pub fn for_display(width: f64, height: f64, position: Point) -> Self {
        Self::new(position, Rect::new(0.0, 0.0, width - 1.0, height - 1.0))
    }
}

impl CursorAuthority for PointerPosition {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl<T: CursorAuthority + ?Sized> CursorAuthority for &mut T {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn set_position(&mut self, position: Point) {
        (**self).set_position(position);
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// Shared authority; the caller must not hold a borrow across `handle`.
impl<T: CursorAuthority + ?Sized> CursorAuthority for Rc<RefCell<T>> {
    fn position(&self) -> Point {
        self.borrow().position()
    }

    fn set_position(&mut self, position: Point) {
        self.borrow_mut().set_position(position);
    }

    fn bounds(&self) -> Rect {
        self.borrow().bounds()
    }
}

/// Clamp `point` into the inclusive `bounds`.
pub(crate) fn clamp_to(point: Point, bounds: Rect) -> Point {
    let bounds = bounds.abs();
    Point::new(
        point.x.max(bounds.x0).min(bounds.x1),
        point.y.max(bounds.y0).min(bounds.y1),
    )
}

/// Apply a device-space delta to the cursor and return the rotated delta.
pub fn move_cursor<C: CursorAuthority + ?Sized>(
    cursor: &mut C,
    rotation: Rotation,
    delta: Vec2,
) -> Vec2 {
    let rotated = rotation.rotate(delta);
    let target = clamp_to(cursor.position() + rotated, cursor.bounds());
    cursor.set_position(target);
    rotated
}
