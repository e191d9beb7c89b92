// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognized gestures, as delivered by the touchpad gesture library.
//!
//! These values are already classified: a [`GestureKind::Swipe`] means the
//! library decided three fingers are swiping. The converter only decides how
//! to represent each gesture as motion events.
//!
//! ```
//! use understory_touchpad::gesture::{Gesture, GestureButtons, GestureKind};
//!
//! let click = Gesture::new(
//!     1.2,
//!     1.2,
//!     GestureKind::ButtonsChange {
//!         down: GestureButtons::LEFT,
//!         up: GestureButtons::LEFT,
//!         is_tap: true,
//!     },
//! );
//! assert!(click.kind.is_tap());
//! ```

bitflags::bitflags! {
    /// Button bits as reported by the gesture library.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GestureButtons: u32 {
        /// Left (primary) button.
        const LEFT    = 1;
        /// Middle button.
        const MIDDLE  = 2;
        /// Right button.
        const RIGHT   = 4;
        /// Back side button.
        const BACK    = 8;
        /// Forward side button.
        const FORWARD = 16;
    }
}

/// Phase of a fling gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlingState {
    /// Fingers left the pad with velocity; ends an active scroll.
    Start,
    /// A finger touched down and stopped any ongoing fling.
    TapDown,
}

/// Phase of a pinch gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZoomState {
    /// Two fingers started pinching.
    Start,
    /// Separation changed by the reported factor.
    Update,
    /// Fingers lifted.
    End,
}

/// Variant-specific gesture payload.
///
/// The library may grow new gesture types; the converter ignores anything it
/// does not understand.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureKind {
    /// A finger made contact; no motion yet.
    ContactInitiated,
    /// Single finger cursor motion.
    Move {
        /// Horizontal motion in screen pixels.
        dx: f64,
        /// Vertical motion in screen pixels.
        dy: f64,
    },
    /// Two finger scroll.
    Scroll {
        /// Horizontal scroll distance.
        dx: f64,
        /// Vertical scroll distance.
        dy: f64,
    },
    /// Fling at the end of (or interrupting) a scroll.
    Fling {
        /// Horizontal velocity.
        vx: f64,
        /// Vertical velocity.
        vy: f64,
        /// Fling phase.
        state: FlingState,
    },
    /// Physical or tap-to-click button transitions.
    ButtonsChange {
        /// Buttons that went down.
        down: GestureButtons,
        /// Buttons that went up.
        up: GestureButtons,
        /// Whether the transition was synthesized from a tap.
        is_tap: bool,
    },
    /// Three finger swipe start or continuation.
    Swipe {
        /// Horizontal motion in device units.
        dx: f64,
        /// Vertical motion in device units.
        dy: f64,
    },
    /// End of a multi-finger swipe.
    SwipeLift,
    /// Four finger swipe start or continuation.
    FourFingerSwipe {
        /// Horizontal motion in device units.
        dx: f64,
        /// Vertical motion in device units.
        dy: f64,
    },
    /// End of a four finger swipe.
    FourFingerSwipeLift,
    /// Two finger pinch.
    Pinch {
        /// Relative change of the finger separation (1.0 means unchanged).
        dz: f64,
        /// Pinch phase.
        state: ZoomState,
    },
    /// Library metrics; carries no pointer motion.
    Metrics,
    /// Mouse wheel motion reported through the touchpad stack.
    MouseWheel {
        /// Horizontal wheel motion.
        dx: f64,
        /// Vertical wheel motion.
        dy: f64,
    },
}

impl GestureKind {
    /// Returns `true` for button changes synthesized from a tap.
    pub fn is_tap(&self) -> bool {
        matches!(self, Self::ButtonsChange { is_tap: true, .. })
    }
}

/// One recognized gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gesture {
    /// Start of the interval covered by this gesture, in seconds.
    pub start_time: f64,
    /// End of the interval covered by this gesture, in seconds.
    pub end_time: f64,
    /// What happened.
    pub kind: GestureKind,
}

impl Gesture {
    /// Create a gesture covering `start_time..=end_time`.
    pub const fn new(start_time: f64, end_time: f64, kind: GestureKind) -> Self {
        Self {
            start_time,
            end_time,
            kind,
        }
    }
}
