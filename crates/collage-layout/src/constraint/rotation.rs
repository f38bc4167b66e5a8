//! Frame-by-frame constraint for rotation drags
//!
//! Each object tracks a two-state machine:
//! - `Unblocked`: rotation follows the pointer and every accepted angle is
//!   remembered as the last valid one
//! - `Blocked`: an earlier frame hit the margin; the angle stays pinned at
//!   the boundary until the user rotates back the other way
//!
//! Large jumps between two pointer samples are walked in small steps so a
//! fast drag cannot skip over an invalid stretch of angles.

use log::debug;

use super::gesture::{GestureTable, RotationDirection, RotationPhase, RotationState};
use super::margin::{constrain_scale, is_object_within_margin};
use super::search::find_largest_valid;
use crate::constants::{FAST_ROTATION_THRESHOLD_DEG, ROTATION_STEP_DEG};
use crate::geometry::{normalize_angle, shortest_angle_delta};
use crate::object::{CanvasObject, TransformPatch};
use crate::types::MarginRect;

/// Where a rotation attempt ended up
#[derive(Debug, Clone, Copy, PartialEq)]
enum Advance {
    /// The whole path to the proposed angle is valid
    Free(f64),
    /// The path hit the margin; `pinned` is the last valid angle on it
    Hit {
        pinned: f64,
        direction: RotationDirection,
    },
}

/// Constrain one frame of an interactive rotation.
///
/// The object's current angle is the proposed angle; `direction` is the
/// direction the pointer is moving in.
pub fn constrain_rotation_gesture<O: CanvasObject + ?Sized>(
    obj: &mut O,
    margin: &MarginRect,
    direction: RotationDirection,
    gestures: &mut GestureTable,
) {
    let proposed = obj.transform().angle;
    let state = gestures.state_mut(obj.id());

    let Some(rotation) = state.rotation else {
        // First frame: accept the starting angle, fitting the object if needed
        constrain_scale(obj, margin);
        state.rotation = Some(RotationState::unblocked(proposed));
        return;
    };

    let next = match rotation.phase {
        RotationPhase::Unblocked => {
            if angle_fits(obj, margin, rotation.last_angle) {
                resolve(advance(obj, margin, rotation.last_angle, proposed))
            } else {
                // The margin changed under the gesture; start over from here
                set_angle(obj, proposed);
                constrain_scale(obj, margin);
                RotationState::unblocked(proposed)
            }
        }
        RotationPhase::Blocked {
            pinned_angle,
            direction: blocked_direction,
        } => {
            let delta = shortest_angle_delta(pinned_angle, proposed);
            // A claimed reversal only counts when the measured delta agrees;
            // an angle wrap can report the opposite direction spuriously
            let reversing = direction != blocked_direction
                && RotationDirection::from_delta(delta) == Some(direction);
            if reversing {
                debug!("rotation of {:?} reversed, releasing pin", obj.id());
                resolve(advance(obj, margin, pinned_angle, proposed))
            } else {
                RotationState::blocked(pinned_angle, blocked_direction)
            }
        }
    };

    set_angle(obj, next.last_angle);
    state.rotation = Some(next);
}

fn resolve(advance: Advance) -> RotationState {
    match advance {
        Advance::Free(angle) => RotationState::unblocked(angle),
        Advance::Hit { pinned, direction } => RotationState::blocked(pinned, direction),
    }
}

/// Rotate from the valid angle `from` towards `to` along the shortest path
fn advance<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect, from: f64, to: f64) -> Advance {
    let delta = shortest_angle_delta(from, to);
    let Some(direction) = RotationDirection::from_delta(delta) else {
        return Advance::Free(normalize_angle(to));
    };

    let steps = if delta.abs() > FAST_ROTATION_THRESHOLD_DEG {
        (delta.abs() / ROTATION_STEP_DEG).ceil() as usize
    } else {
        1
    };
    let step = delta / steps as f64;

    // Angles here are unwrapped (from + k * step) so interpolation never
    // crosses the 0/360 seam the long way round
    let mut last_valid = from;
    for i in 1..=steps {
        let candidate = from + step * i as f64;
        if angle_fits(obj, margin, candidate) {
            last_valid = candidate;
            continue;
        }

        let pinned = find_largest_valid(last_valid, candidate, |angle| {
            angle_fits(obj, margin, *angle)
        });
        debug!(
            "rotation of {:?} blocked at {:.2} deg (proposed {:.2})",
            obj.id(),
            normalize_angle(pinned),
            normalize_angle(to)
        );
        return Advance::Hit {
            pinned: normalize_angle(pinned),
            direction,
        };
    }

    Advance::Free(normalize_angle(to))
}

fn set_angle<O: CanvasObject + ?Sized>(obj: &mut O, angle: f64) {
    obj.update(TransformPatch::angle(angle));
}

fn angle_fits<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect, angle: f64) -> bool {
    set_angle(obj, angle);
    is_object_within_margin(obj, margin)
}
