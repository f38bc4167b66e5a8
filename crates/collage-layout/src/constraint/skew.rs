//! Frame-by-frame constraint for skew drags

use super::gesture::{GestureTable, SkewState};
use super::margin::{constrain_scale, is_object_within_margin};
use super::search::find_largest_valid;
use crate::object::CanvasObject;
use crate::types::MarginRect;

/// Constrain one frame of an interactive skew.
///
/// Works like [`constrain_scaling_gesture`](super::constrain_scaling_gesture)
/// but blends skew, position and scale jointly.
pub fn constrain_skew_gesture<O: CanvasObject + ?Sized>(
    obj: &mut O,
    margin: &MarginRect,
    gestures: &mut GestureTable,
) {
    let proposed = SkewState::capture(&obj.transform());
    let state = gestures.state_mut(obj.id());

    if is_object_within_margin(obj, margin) {
        state.skew = Some(proposed);
        return;
    }

    let resolved = match state.skew {
        Some(last_valid) if state_fits(obj, margin, &last_valid) => {
            let best = find_largest_valid(last_valid, proposed, |candidate| {
                state_fits(obj, margin, candidate)
            });
            obj.update(best.patch());
            best
        }
        _ => {
            obj.update(proposed.patch());
            constrain_scale(obj, margin);
            SkewState::capture(&obj.transform())
        }
    };

    state.skew = Some(resolved);
}

fn state_fits<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect, state: &SkewState) -> bool {
    obj.update(state.patch());
    is_object_within_margin(obj, margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ImageObject, ObjectId, TransformPatch};

    #[test]
    fn test_skew_stops_at_margin() {
        let margin = MarginRect::new(0.0, 0.0, 500.0, 400.0).unwrap();
        let mut obj = ImageObject::new(ObjectId(1), 200.0, 200.0);
        obj.update(TransformPatch::position(250.0, 200.0));
        let mut gestures = GestureTable::new();
        constrain_skew_gesture(&mut obj, &margin, &mut gestures);

        // skewX 60 would make the box 200 + 200*tan(60) ≈ 546px wide; the
        // 500px margin allows up to ~56.3 degrees
        obj.update(TransformPatch::default().with_skew(60.0, 0.0));
        constrain_skew_gesture(&mut obj, &margin, &mut gestures);

        let t = obj.transform();
        assert!(t.skew_x > 40.0 && t.skew_x < 60.0);
        assert!(is_object_within_margin(&obj, &margin));
        assert_eq!(gestures.get(obj.id()).unwrap().skew.unwrap().skew_x, t.skew_x);
    }

    #[test]
    fn test_valid_skew_passes_through() {
        let margin = MarginRect::new(0.0, 0.0, 400.0, 400.0).unwrap();
        let mut obj = ImageObject::new(ObjectId(1), 100.0, 100.0);
        obj.update(TransformPatch::position(200.0, 200.0).with_skew(20.0, 10.0));
        let mut gestures = GestureTable::new();

        constrain_skew_gesture(&mut obj, &margin, &mut gestures);

        assert_eq!(obj.transform().skew_x, 20.0);
        assert_eq!(obj.transform().skew_y, 10.0);
    }
}
