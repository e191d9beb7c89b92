// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction and configuration errors.
//!
//! Gesture handling itself never fails: unsupported or out-of-sequence
//! gestures produce an empty event sequence. Only building a converter or
//! parsing configuration values can return an error.

use thiserror::Error;

use crate::device::Axis;

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Display rotation that is not a multiple of 90 degrees in `0..360`.
    #[error("unsupported display rotation: {degrees} degrees")]
    InvalidRotation {
        /// The rejected angle.
        degrees: u32,
    },

    /// A spacing or separation that must be a finite, positive number of pixels.
    #[error("{field} must be finite and positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Failure to build a [`GestureConverter`](crate::converter::GestureConverter).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConverterError {
    /// The device did not report calibration for a required axis.
    #[error("device {device_id} has no calibration for the {axis:?} axis")]
    MissingAxis {
        /// Device that was queried.
        device_id: i32,
        /// The axis without calibration.
        axis: Axis,
    },

    /// The device reported an axis whose range is empty or inverted.
    #[error("device {device_id} reports an empty {axis:?} range ({min}..={max})")]
    DegenerateAxis {
        /// Device that was queried.
        device_id: i32,
        /// The offending axis.
        axis: Axis,
        /// Reported minimum.
        min: f64,
        /// Reported maximum.
        max: f64,
    },

    /// The converter configuration failed validation.
    #[error("invalid converter configuration: {0}")]
    Config(#[from] ConfigError),
}
