// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a scripted touchpad session through a `GestureConverter`.
//!
//! The session clicks, drags, swipes with three fingers, scrolls and
//! pinches, printing every motion event produced along the way.
//!
//! Run:
//! - `cargo run -p understory_examples --example touchpad_replay`
//! - `RUST_LOG=understory_touchpad=trace cargo run -p understory_examples --example touchpad_replay`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_touchpad::{
    AxisInfo, ConverterConfig, FlingState, Gesture, GestureButtons, GestureConverter,
    GestureKind, MotionEvent, PointerPosition, Rotation, TouchpadInfo, ZoomState,
};

/// Nanoseconds between scripted gestures.
const FRAME_NS: i64 = 8_000_000;

fn script() -> Vec<GestureKind> {
    vec![
        GestureKind::Move { dx: 12.0, dy: -4.0 },
        GestureKind::ButtonsChange {
            down: GestureButtons::LEFT,
            up: GestureButtons::empty(),
            is_tap: false,
        },
        GestureKind::Move { dx: 20.0, dy: 0.0 },
        GestureKind::ButtonsChange {
            down: GestureButtons::empty(),
            up: GestureButtons::LEFT,
            is_tap: false,
        },
        GestureKind::Swipe { dx: 0.0, dy: 6.5 },
        GestureKind::Swipe { dx: 1.0, dy: 3.25 },
        GestureKind::SwipeLift,
        GestureKind::Scroll { dx: 0.0, dy: -15.0 },
        GestureKind::Fling {
            vx: 0.0,
            vy: -300.0,
            state: FlingState::Start,
        },
        GestureKind::Pinch {
            dz: 1.0,
            state: ZoomState::Start,
        },
        GestureKind::Pinch {
            dz: 1.25,
            state: ZoomState::Update,
        },
        GestureKind::Pinch {
            dz: 1.0,
            state: ZoomState::End,
        },
        GestureKind::MouseWheel { dx: 0.0, dy: 1.0 },
    ]
}

fn describe(event: &MotionEvent) -> String {
    let pointers: Vec<String> = event
        .pointers
        .iter()
        .map(|p| format!("#{}@({:.1}, {:.1})", p.id, p.position.x, p.position.y))
        .collect();
    format!(
        "{:>14?} code={:#06x} class={:?} buttons={:?} data={:?} [{}]",
        event.action,
        event.action.code(),
        event.classification,
        event.button_state,
        event.gesture_data,
        pointers.join(", ")
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let pad = TouchpadInfo::new(
        4,
        AxisInfo::new(-500.0, 500.0),
        AxisInfo::new(-500.0, 500.0),
    );
    let cursor = PointerPosition::for_display(1280.0, 800.0, Point::new(640.0, 400.0));
    let config = ConverterConfig {
        orientation: Rotation::Deg0,
        ..ConverterConfig::default()
    };
    let mut converter = match GestureConverter::new(&pad, cursor, config) {
        Ok(converter) => converter,
        Err(err) => {
            tracing::error!(%err, "cannot build converter");
            return;
        }
    };

    let mut now = 0_i64;
    for kind in script() {
        now += FRAME_NS;
        let gesture = Gesture::new(now as f64 / 1e9, now as f64 / 1e9, kind);
        let events = converter.handle(now, now, &gesture);
        println!("{kind:?} -> {} event(s)", events.len());
        for event in &events {
            println!("    {}", describe(event));
        }
    }

    let leftovers = converter.reset(now + FRAME_NS, now + FRAME_NS);
    tracing::info!(
        leftovers = leftovers.len(),
        cursor = ?converter.cursor().position,
        "session replayed"
    );
}
