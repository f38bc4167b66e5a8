//! One-shot margin corrections

use log::{debug, warn};

use crate::constants::MARGIN_EPSILON;
use crate::object::{CanvasObject, Origin, TransformPatch};
use crate::types::MarginRect;

/// Whether the object's bounding box lies inside the margin
pub fn is_object_within_margin<O: CanvasObject + ?Sized>(obj: &O, margin: &MarginRect) -> bool {
    margin.contains(&obj.bounding_box())
}

/// Translate the object by the smallest offset that brings every corner
/// back inside the margin.
///
/// Each axis is handled independently. When an object is wider (or
/// taller) than the margin, the left (or top) edge wins.
pub fn constrain_position<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect) {
    let mut push_x: f64 = 0.0;
    let mut pull_x: f64 = 0.0;
    let mut push_y: f64 = 0.0;
    let mut pull_y: f64 = 0.0;

    for p in obj.corner_points().points() {
        if p.x < margin.left - MARGIN_EPSILON {
            push_x = push_x.max(margin.left - p.x);
        }
        if p.x > margin.right() + MARGIN_EPSILON {
            pull_x = pull_x.min(margin.right() - p.x);
        }
        if p.y < margin.top - MARGIN_EPSILON {
            push_y = push_y.max(margin.top - p.y);
        }
        if p.y > margin.bottom() + MARGIN_EPSILON {
            pull_y = pull_y.min(margin.bottom() - p.y);
        }
    }

    let dx = if push_x > 0.0 { push_x } else { pull_x };
    let dy = if push_y > 0.0 { push_y } else { pull_y };
    if dx == 0.0 && dy == 0.0 {
        return;
    }

    let t = obj.transform();
    obj.update(TransformPatch::position(t.left + dx, t.top + dy));
}

/// Shrink the object until its bounding box fits the margin, then move
/// it inside.
///
/// Never enlarges the object. Objects that already fit are untouched.
pub fn constrain_scale<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect) {
    if is_object_within_margin(obj, margin) {
        return;
    }

    let bounds = obj.bounding_box();
    let factor = (margin.width / bounds.width).min(margin.height / bounds.height);
    if factor < 1.0 {
        let t = obj.transform();
        debug!(
            "scaling object {:?} by {:.4} to fit {:.0}x{:.0} margin",
            obj.id(),
            factor,
            margin.width,
            margin.height
        );
        obj.update(TransformPatch::scale(t.scale_x * factor, t.scale_y * factor));
    }

    constrain_position(obj, margin);

    if !is_object_within_margin(obj, margin) {
        warn!(
            "object {:?} still exceeds the margin after fitting",
            obj.id()
        );
    }
}

/// Straighten the object (angle and skew back to zero) and fit it again
pub fn reset_rotation<O: CanvasObject + ?Sized>(obj: &mut O, margin: &MarginRect) {
    obj.update(
        TransformPatch::angle(0.0)
            .with_skew(0.0, 0.0)
            .with_origin(Origin::Center),
    );
    constrain_scale(obj, margin);
}
