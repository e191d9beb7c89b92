// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device identity and raw axis calibration.
//!
//! The converter reads calibration once, at construction, through
//! [`DeviceContext`]. Swipe offsets are reported as fractions of the touchpad
//! surface, so both position axes must have a non-empty range.

/// A touchpad position axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal multi-touch position.
    X,
    /// Vertical multi-touch position.
    Y,
}

/// Raw calibration of one absolute axis, in device units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisInfo {
    /// Smallest value the device reports.
    pub min: f64,
    /// Largest value the device reports.
    pub max: f64,
}

impl AxisInfo {
    /// Create calibration from the reported bounds.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the axis in device units.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Read-only view of the device a converter is attached to.
pub trait DeviceContext {
    /// Stable identifier stamped on every emitted event.
    fn device_id(&self) -> i32;

    /// Calibration for `axis`, or `None` if the device does not report it.
    fn axis_info(&self, axis: Axis) -> Option<AxisInfo>;
}

/// Plain description of a touchpad, for hosts that already know its calibration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchpadInfo {
    /// Device identifier.
    pub id: i32,
    /// Horizontal calibration.
    pub x_axis: Option<AxisInfo>,
    /// Vertical calibration.
    pub y_axis: Option<AxisInfo>,
}

impl TouchpadInfo {
    /// Describe a touchpad with both axes calibrated.
    pub const fn new(id: i32, x_axis: AxisInfo, y_axis: AxisInfo) -> Self {
        Self {
            id,
            x_axis: Some(x_axis),
            y_axis: Some(y_axis),
        }
    }
}

impl DeviceContext for TouchpadInfo {
    fn device_id(&self) -> i32 {
        self.id
    }

    fn axis_info(&self, axis: Axis) -> Option<AxisInfo> {
        match axis {
            Axis::X => self.x_axis,
            Axis::Y => self.y_axis,
        }
    }
}

impl<T: DeviceContext + ?Sized> DeviceContext for &T {
    fn device_id(&self) -> i32 {
        (**self).device_id()
    }

    fn axis_info(&self, axis: Axis) -> Option<AxisInfo> {
        (**self).axis_info(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_spans_both_bounds() {
        assert_eq!(AxisInfo::new(-500.0, 500.0).range(), 1000.0);
    }

    #[test]
    fn touchpad_info_reports_axes() {
        let info = TouchpadInfo::new(7, AxisInfo::new(0.0, 10.0), AxisInfo::new(0.0, 20.0));
        assert_eq!(info.device_id(), 7);
        assert_eq!(info.axis_info(Axis::Y), Some(AxisInfo::new(0.0, 20.0)));

        let missing = TouchpadInfo {
            y_axis: None,
            ..info
        };
        assert_eq!((&missing).axis_info(Axis::Y), None);
    }
}
