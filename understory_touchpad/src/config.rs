// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Converter configuration.
//!
//! All fields are public and have sensible defaults; start from
//! [`ConverterConfig::default`] and override what you need:
//!
//! ```
//! use understory_touchpad::config::{ConverterConfig, ScrollMode};
//!
//! let config = ConverterConfig {
//!     scroll_mode: ScrollMode::Legacy,
//!     ..ConverterConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::cursor::Rotation;
use crate::error::ConfigError;

/// How two finger scrolls are represented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScrollMode {
    /// Scroll fingers carry the two finger swipe classification and scroll distances.
    #[default]
    Classified,
    /// Scroll fingers look like plain touches, without classification or payload.
    Legacy,
}

/// Tunables for a [`GestureConverter`](crate::converter::GestureConverter).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    /// Horizontal distance between synthetic swipe fingers, in pixels.
    pub swipe_finger_spacing: f64,
    /// Initial distance between the two synthetic pinch fingers, in pixels.
    pub pinch_initial_separation: f64,
    /// Representation of two finger scrolls.
    pub scroll_mode: ScrollMode,
    /// Display rotation at construction; change later with
    /// [`GestureConverter::set_orientation`](crate::converter::GestureConverter::set_orientation).
    pub orientation: Rotation,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            swipe_finger_spacing: 100.0,
            pinch_initial_separation: 200.0,
            scroll_mode: ScrollMode::Classified,
            orientation: Rotation::Deg0,
        }
    }
}

impl ConverterConfig {
    /// Check that every distance is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("swipe_finger_spacing", self.swipe_finger_spacing)?;
        positive("pinch_initial_separation", self.pinch_initial_separation)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
