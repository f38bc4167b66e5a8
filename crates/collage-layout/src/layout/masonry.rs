//! Masonry layouts
//!
//! Columns collage fixes the width of every item to the column width and
//! lets heights float; rows collage is the same algorithm with the axes
//! swapped. Items are dealt tallest (or widest) first into the shortest
//! lane, then any lane that overflows the margin is shrunk to fit.

use std::cmp::Ordering;

use log::{debug, warn};

use crate::arrangement::ArrangementStatus;
use crate::constants::{MASONRY_GAP_PX, MASONRY_MIN_LANES};
use crate::object::{CanvasObject, Origin, TransformPatch};
use crate::types::MarginRect;

/// Direction the lanes run in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    /// Vertical lanes, fixed width
    Columns,
    /// Horizontal lanes, fixed height
    Rows,
}

impl Axis {
    /// Split a (width, height) pair into (cross, main) for this axis
    fn split(self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Axis::Columns => (width, height),
            Axis::Rows => (height, width),
        }
    }

    /// Join (cross, main) back into (x, y)
    fn join(self, cross: f64, main: f64) -> (f64, f64) {
        match self {
            Axis::Columns => (cross, main),
            Axis::Rows => (main, cross),
        }
    }

    fn status(self) -> ArrangementStatus {
        match self {
            Axis::Columns => ArrangementStatus::ColumnsCollage,
            Axis::Rows => ArrangementStatus::RowsCollage,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Axis::Columns => "column",
            Axis::Rows => "row",
        }
    }
}

/// One item assigned to a lane
#[derive(Debug, Clone, Copy)]
struct Placed {
    index: usize,
    scale: f64,
    /// Scaled extent along the lane
    main: f64,
}

/// Number of lanes used for `count` items
pub fn masonry_lane_count(count: usize) -> usize {
    ((count as f64).sqrt().floor() as usize).max(MASONRY_MIN_LANES)
}

/// Arrange items in fixed-width columns.
///
/// Returns `None` without touching anything when `items` is empty.
pub fn arrange_masonry_columns<O: CanvasObject>(
    items: &mut [O],
    margin: &MarginRect,
) -> Option<ArrangementStatus> {
    arrange_lanes(items, margin, Axis::Columns)
}

/// Arrange items in fixed-height rows.
///
/// Returns `None` without touching anything when `items` is empty.
pub fn arrange_masonry_rows<O: CanvasObject>(
    items: &mut [O],
    margin: &MarginRect,
) -> Option<ArrangementStatus> {
    arrange_lanes(items, margin, Axis::Rows)
}

fn arrange_lanes<O: CanvasObject>(
    items: &mut [O],
    margin: &MarginRect,
    axis: Axis,
) -> Option<ArrangementStatus> {
    if items.is_empty() {
        return None;
    }

    let (cross_extent, main_extent) = axis.split(margin.width, margin.height);
    let (cross_start, main_start) = axis.split(margin.left, margin.top);

    let lanes = masonry_lane_count(items.len());
    let mut gap = MASONRY_GAP_PX;
    let mut lane_size = (cross_extent - (lanes - 1) as f64 * gap) / lanes as f64;
    if lane_size <= 0.0 {
        warn!(
            "margin too narrow for {} {}s with gaps, dropping the gap",
            lanes,
            axis.name()
        );
        gap = 0.0;
        lane_size = cross_extent / lanes as f64;
    }
    debug!(
        "masonry: {} items in {} {}s of {:.1}px",
        items.len(),
        lanes,
        axis.name(),
        lane_size
    );

    // Fix the cross extent of every item to the lane size
    let mut placed: Vec<Placed> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (width, height) = item.intrinsic_size();
            let (cross_src, main_src) = axis.split(width, height);
            let scale = lane_size / cross_src;
            Placed {
                index,
                scale,
                main: main_src * scale,
            }
        })
        .collect();

    // Longest first, ties broken by id so reruns are identical
    placed.sort_by(|a, b| {
        b.main
            .partial_cmp(&a.main)
            .unwrap_or(Ordering::Equal)
            .then_with(|| items[a.index].id().cmp(&items[b.index].id()))
    });

    let mut lane_items: Vec<Vec<Placed>> = vec![Vec::new(); lanes];
    let mut lane_lengths = vec![0.0_f64; lanes];
    for item in placed {
        let shortest = shortest_lane(&lane_lengths);
        if !lane_items[shortest].is_empty() {
            lane_lengths[shortest] += gap;
        }
        lane_lengths[shortest] += item.main;
        lane_items[shortest].push(item);
    }

    for (lane, members) in lane_items.iter_mut().enumerate() {
        if members.is_empty() {
            continue;
        }
        let lane_gap = fit_lane(members, main_extent, gap, axis);

        let lane_center = cross_start + lane as f64 * (lane_size + gap) + lane_size / 2.0;
        let mut cursor = main_start;
        for member in members.iter() {
            let main_center = cursor + member.main / 2.0;
            cursor += member.main + lane_gap;

            let (x, y) = axis.join(lane_center, main_center);
            items[member.index].update(
                TransformPatch::position(x, y)
                    .with_scale(member.scale, member.scale)
                    .with_angle(0.0)
                    .with_skew(0.0, 0.0)
                    .with_origin(Origin::Center),
            );
        }
    }

    Some(axis.status())
}

/// Index of the first lane with the smallest accumulated length
fn shortest_lane(lengths: &[f64]) -> usize {
    let mut best = 0;
    for (i, &length) in lengths.iter().enumerate() {
        if length < lengths[best] {
            best = i;
        }
    }
    best
}

/// Shrink the members of an overflowing lane so that they and their gaps
/// fit `main_extent`. Returns the gap to use between members.
fn fit_lane(members: &mut [Placed], main_extent: f64, gap: f64, axis: Axis) -> f64 {
    let total: f64 = members.iter().map(|m| m.main).sum();
    let gaps = (members.len() - 1) as f64 * gap;
    if total + gaps <= main_extent {
        return gap;
    }

    let mut gap = gap;
    let mut available = main_extent - gaps;
    if available <= 0.0 {
        warn!(
            "{} of {} items cannot fit with gaps, dropping the gap",
            axis.name(),
            members.len()
        );
        gap = 0.0;
        available = main_extent;
    }

    let factor = available / total;
    debug!("shrinking {} by {:.4} to fit", axis.name(), factor);
    for member in members.iter_mut() {
        member.scale *= factor;
        member.main *= factor;
    }
    gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ImageObject, ObjectId};

    fn images(sizes: &[(f64, f64)]) -> Vec<ImageObject> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| ImageObject::new(ObjectId(i as u64), w, h))
            .collect()
    }

    #[test]
    fn test_lane_count() {
        assert_eq!(masonry_lane_count(1), 2);
        assert_eq!(masonry_lane_count(5), 2);
        assert_eq!(masonry_lane_count(9), 3);
        assert_eq!(masonry_lane_count(17), 4);
    }

    #[test]
    fn test_five_images_two_columns() {
        let margin = MarginRect::new(0.0, 0.0, 600.0, 2000.0).unwrap();
        let mut items = images(&[(100.0, 100.0); 5]);

        let status = arrange_masonry_columns(&mut items, &margin);
        assert_eq!(status, Some(ArrangementStatus::ColumnsCollage));

        for item in &items {
            let bounds = item.bounding_box();
            assert!((bounds.width - 295.0).abs() < 1e-9);
            assert!(margin.contains(&bounds));
        }
        // Equal heights: ids 0, 2, 4 in the first column, 1, 3 in the second
        assert_eq!(items[0].transform().left, 147.5);
        assert_eq!(items[1].transform().left, 452.5);
        assert!((items[2].transform().top - (295.0 + 10.0 + 147.5)).abs() < 1e-9);
    }

    #[test]
    fn test_tallest_goes_first() {
        let margin = MarginRect::new(0.0, 0.0, 410.0, 5000.0).unwrap();
        let mut items = images(&[(100.0, 100.0), (100.0, 300.0), (100.0, 200.0)]);

        arrange_masonry_columns(&mut items, &margin);

        // Tallest occupies the top of the first column
        let tall = items[1].bounding_box();
        assert!((tall.left - 0.0).abs() < 1e-9);
        assert!((tall.top - 0.0).abs() < 1e-9);
        // Next two share the second column
        assert!((items[2].bounding_box().top - 0.0).abs() < 1e-9);
        assert!(items[0].bounding_box().top > items[2].bounding_box().bottom());
    }

    #[test]
    fn test_overflowing_column_is_shrunk() {
        let margin = MarginRect::new(50.0, 50.0, 600.0, 400.0).unwrap();
        let mut items = images(&[(100.0, 400.0); 4]);

        arrange_masonry_columns(&mut items, &margin);

        let mut column_extent = [0.0_f64; 2];
        for item in &items {
            let bounds = item.bounding_box();
            assert!(margin.contains(&bounds), "{bounds:?}");
            let lane = if bounds.center_x() < margin.center_x() { 0 } else { 1 };
            column_extent[lane] += bounds.height;
        }
        for extent in column_extent {
            assert!(extent + MASONRY_GAP_PX <= margin.height + 1e-6);
        }
    }

    #[test]
    fn test_rows_variant_fixes_height() {
        let margin = MarginRect::new(0.0, 0.0, 3000.0, 410.0).unwrap();
        let mut items = images(&[(300.0, 100.0), (200.0, 200.0), (100.0, 50.0), (80.0, 40.0)]);

        let status = arrange_masonry_rows(&mut items, &margin);
        assert_eq!(status, Some(ArrangementStatus::RowsCollage));

        for item in &items {
            let bounds = item.bounding_box();
            assert!((bounds.height - 200.0).abs() < 1e-9);
            assert!(margin.contains(&bounds));
        }
    }

    #[test]
    fn test_clears_rotation_and_skew() {
        let margin = MarginRect::new(0.0, 0.0, 800.0, 800.0).unwrap();
        let mut items = images(&[(100.0, 150.0), (120.0, 90.0)]);
        items[0].update(TransformPatch::angle(30.0).with_skew(10.0, 5.0));

        arrange_masonry_columns(&mut items, &margin);

        let t = items[0].transform();
        assert_eq!((t.angle, t.skew_x, t.skew_y), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_deterministic() {
        let margin = MarginRect::new(0.0, 0.0, 900.0, 700.0).unwrap();
        let sizes = [(120.0, 300.0), (200.0, 100.0), (150.0, 150.0), (90.0, 240.0), (300.0, 200.0)];
        let mut first = images(&sizes);
        let mut second = images(&sizes);

        arrange_masonry_rows(&mut first, &margin);
        arrange_masonry_rows(&mut second, &margin);

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_returns_none() {
        let margin = MarginRect::new(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut items: Vec<ImageObject> = Vec::new();
        assert_eq!(arrange_masonry_columns(&mut items, &margin), None);
        assert_eq!(arrange_masonry_rows(&mut items, &margin), None);
    }
}
