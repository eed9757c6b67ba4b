//! Gesture events
//!
//! Raw input already recognized by the host toolkit, reduced to the handful
//! of signals a peelable card reacts to.

use crate::layer::{Point, Size};
use serde::{Deserialize, Serialize};

/// Event type identifier
pub type EventType = u32;

/// Gesture event types
pub mod event_types {
    use super::EventType;

    /// Drag moved (pointer down + move)
    pub const DRAG: EventType = 6;
    /// Drag ended (pointer up after drag)
    pub const DRAG_END: EventType = 7;
    /// Pointer down + up without movement
    pub const TAP: EventType = 8;
    pub const RESIZE: EventType = 40;
}

/// One pointer-move sample of an active horizontal drag.
///
/// `translation_x` is the signed distance since the gesture started; negative
/// values move right-to-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DragSample {
    pub translation_x: f32,
}

impl DragSample {
    pub const fn new(translation_x: f32) -> Self {
        Self { translation_x }
    }
}

/// A gesture addressed to a single card, in card-local coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    Drag(DragSample),
    DragEnd,
    Tap(Point),
    Resize(Size),
}

impl GestureEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            GestureEvent::Drag(_) => event_types::DRAG,
            GestureEvent::DragEnd => event_types::DRAG_END,
            GestureEvent::Tap(_) => event_types::TAP,
            GestureEvent::Resize(_) => event_types::RESIZE,
        }
    }
}

impl From<DragSample> for GestureEvent {
    fn from(sample: DragSample) -> Self {
        GestureEvent::Drag(sample)
    }
}
