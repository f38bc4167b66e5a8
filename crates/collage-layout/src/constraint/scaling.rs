//! Frame-by-frame constraint for scale drags

use super::gesture::{GestureTable, ScaleState};
use super::margin::{constrain_scale, is_object_within_margin};
use super::search::find_largest_valid;
use crate::object::CanvasObject;
use crate::types::MarginRect;

/// Constrain one frame of an interactive scale.
///
/// The object's current transform is the proposed state. A proposal that
/// fits is remembered as the last valid state. One that does not is
/// replaced by the closest state between the last valid one and the
/// proposal, so the object slides up to the margin instead of snapping.
pub fn constrain_scaling_gesture<O: CanvasObject + ?Sized>(
    obj: &mut O,
    margin: &MarginRect,
    gestures: &mut GestureTable,
) {
    let proposed = ScaleState::capture(&obj.transform());
    let state = gestures.state_mut(obj.id());

    if is_object_within_margin(obj, margin) {
        state.scale = Some(proposed);
        return;
    }

    let resolved = match state.scale {
        Some(last_valid) if state_fits(obj, margin, &last_valid) => {
            let best = find_largest_valid(last_valid, proposed, |candidate| {
                state_fits(obj, margin, candidate)
            });
            obj.update(best.patch());
            best
        }
        // Nothing valid to fall back on (first frame, or the margin changed)
        _ => {
            obj.update(proposed.patch());
            constrain_scale(obj, margin);
            ScaleState::capture(&obj.transform())
        }
    };

    state.scale = Some(resolved);
}

fn state_fits<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect, state: &ScaleState) -> bool {
    obj.update(state.patch());
    is_object_within_margin(obj, margin)
}
