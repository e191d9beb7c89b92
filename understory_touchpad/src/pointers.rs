// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic finger table shared by swipe, scroll and pinch.
//!
//! A [`VirtualPointerSet`] holds up to [`MAX_POINTERS`] fingers in a fixed
//! array, indexed by acquisition order. It is filled when a gesture family
//! starts, translated by every continuation and cleared on lift, so a busy
//! gesture stream never allocates for its pointers.

use kurbo::{Point, Rect, Vec2};

use crate::cursor::clamp_to;
use crate::motion::{MAX_POINTERS, PointerCoords};

const RELEASED: PointerCoords = PointerCoords::finger(0, Point::ORIGIN, 0.0);

/// Fixed-capacity set of synthetic fingers in acquisition order.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualPointerSet {
    coords: [PointerCoords; MAX_POINTERS],
    len: usize,
}

impl VirtualPointerSet {
    /// An empty set.
    pub const fn new() -> Self {
        Self {
            coords: [RELEASED; MAX_POINTERS],
            len: 0,
        }
    }

    /// Number of fingers currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no finger is held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Held fingers in acquisition order.
    pub fn as_slice(&self) -> &[PointerCoords] {
        &self.coords[..self.len]
    }

    /// Release every finger.
    pub fn clear(&mut self) {
        self.coords = [RELEASED; MAX_POINTERS];
        self.len = 0;
    }

    /// Acquire `count` fingers in a horizontal row centred on `center`.
    ///
    /// The row is narrowed and shifted as needed so that every finger starts
    /// inside `bounds`. When `bounds` has no width the fingers form a vertical
    /// column instead. `count` is capped at [`MAX_POINTERS`].
    pub fn acquire_row(&mut self, center: Point, count: usize, spacing: f64, bounds: Rect) {
        let count = count.min(MAX_POINTERS);
        let bounds = bounds.abs();
        let center = clamp_to(center, bounds);
        let vertical = bounds.width() <= 0.0 && bounds.height() > 0.0;
        let (along, lo, hi) = if vertical {
            (center.y, bounds.y0, bounds.y1)
        } else {
            (center.x, bounds.x0, bounds.x1)
        };

        let gaps = count.saturating_sub(1) as f64;
        let spacing = if gaps > 0.0 {
            spacing.min((hi - lo) / gaps)
        } else {
            0.0
        };
        let width = spacing * gaps;
        let start = (along - width / 2.0).max(lo).min(hi - width);

        self.clear();
        for (id, slot) in (0_u8..).zip(self.coords.iter_mut().take(count)) {
            let offset = start + spacing * f64::from(id);
            let position = if vertical {
                Point::new(center.x, offset)
            } else {
                Point::new(offset, center.y)
            };
            *slot = PointerCoords::finger(id, position, 1.0);
        }
        self.len = count;
    }

    /// Move every held finger by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for coords in &mut self.coords[..self.len] {
            coords.position += delta;
        }
    }

    /// Place held fingers on a horizontal line through `center`, `separation` apart.
    ///
    /// Used for two finger layouts whose spread changes over time.
    pub fn spread_around(&mut self, center: Point, separation: f64) {
        let gaps = self.len.saturating_sub(1) as f64;
        let start_x = center.x - separation * gaps / 2.0;
        for (i, coords) in (0_u8..).zip(&mut self.coords[..self.len]) {
            coords.position = Point::new(start_x + separation * f64::from(i), center.y);
        }
    }

    /// The first `count` held fingers, for staged acquisition and release.
    pub fn prefix(&self, count: usize) -> &[PointerCoords] {
        &self.coords[..count.min(self.len)]
    }
}

impl Default for VirtualPointerSet {
    fn default() -> Self {
        Self::new()
    }
}
