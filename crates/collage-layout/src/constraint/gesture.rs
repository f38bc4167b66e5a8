//! Per-object state remembered across the frames of one gesture.
//!
//! State lives in a side table keyed by [`ObjectId`], never on the
//! objects themselves. A gesture creates its entry with
//! [`GestureTable::begin`] and drops it with [`GestureTable::end`]; the
//! constraint functions also create an entry lazily on their first call.

use std::collections::HashMap;

use super::search::Interpolate;
use crate::object::{ObjectId, Transform, TransformPatch};

/// Last accepted state of a scale gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    pub scale_x: f64,
    pub scale_y: f64,
    pub left: f64,
    pub top: f64,
}

impl ScaleState {
    pub fn capture(transform: &Transform) -> Self {
        Self {
            scale_x: transform.scale_x,
            scale_y: transform.scale_y,
            left: transform.left,
            top: transform.top,
        }
    }

    pub fn patch(&self) -> TransformPatch {
        TransformPatch::position(self.left, self.top).with_scale(self.scale_x, self.scale_y)
    }
}

impl Interpolate for ScaleState {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        Self {
            scale_x: self.scale_x.interpolate(&target.scale_x, t),
            scale_y: self.scale_y.interpolate(&target.scale_y, t),
            left: self.left.interpolate(&target.left, t),
            top: self.top.interpolate(&target.top, t),
        }
    }
}

/// Last accepted state of a skew gesture.
///
/// Skewing moves and resizes the bounding box together, so position and
/// scale are blended along with the skew angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewState {
    pub skew_x: f64,
    pub skew_y: f64,
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl SkewState {
    pub fn capture(transform: &Transform) -> Self {
        Self {
            skew_x: transform.skew_x,
            skew_y: transform.skew_y,
            left: transform.left,
            top: transform.top,
            scale_x: transform.scale_x,
            scale_y: transform.scale_y,
        }
    }

    pub fn patch(&self) -> TransformPatch {
        TransformPatch::position(self.left, self.top)
            .with_scale(self.scale_x, self.scale_y)
            .with_skew(self.skew_x, self.skew_y)
    }
}

impl Interpolate for SkewState {
    fn interpolate(&self, target: &Self, t: f64) -> Self {
        Self {
            skew_x: self.skew_x.interpolate(&target.skew_x, t),
            skew_y: self.skew_y.interpolate(&target.skew_y, t),
            left: self.left.interpolate(&target.left, t),
            top: self.top.interpolate(&target.top, t),
            scale_x: self.scale_x.interpolate(&target.scale_x, t),
            scale_y: self.scale_y.interpolate(&target.scale_y, t),
        }
    }
}

/// Direction of a rotation drag (canvas y axis points down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Direction of a signed angle delta, `None` for no movement
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(RotationDirection::Clockwise)
        } else if delta < 0.0 {
            Some(RotationDirection::CounterClockwise)
        } else {
            None
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationPhase {
    /// Rotation follows the pointer
    Unblocked,
    /// Rotation is held at the last valid angle until the drag reverses
    Blocked {
        pinned_angle: f64,
        direction: RotationDirection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub phase: RotationPhase,
    /// Most recent angle known to fit the margin
    pub last_angle: f64,
}

impl RotationState {
    pub fn unblocked(angle: f64) -> Self {
        Self {
            phase: RotationPhase::Unblocked,
            last_angle: angle,
        }
    }

    pub fn blocked(pinned_angle: f64, direction: RotationDirection) -> Self {
        Self {
            phase: RotationPhase::Blocked {
                pinned_angle,
                direction,
            },
            last_angle: pinned_angle,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.phase, RotationPhase::Blocked { .. })
    }
}

/// Everything remembered about one object during a gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    pub scale: Option<ScaleState>,
    pub rotation: Option<RotationState>,
    pub skew: Option<SkewState>,
}

/// Gesture state for every object currently being manipulated
#[derive(Debug, Clone, Default)]
pub struct GestureTable {
    states: HashMap<ObjectId, GestureState>,
}

impl GestureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture, discarding anything left over from an earlier one
    pub fn begin(&mut self, id: ObjectId) {
        self.states.insert(id, GestureState::default());
    }

    /// Finish a gesture and hand back its final state
    pub fn end(&mut self, id: ObjectId) -> Option<GestureState> {
        self.states.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GestureState> {
        self.states.get(&id)
    }

    /// State for `id`, created empty if the gesture was never begun
    pub fn state_mut(&mut self, id: ObjectId) -> &mut GestureState {
        self.states.entry(id).or_default()
    }

    pub fn is_active(&self, id: ObjectId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
