//! Grid layout calculation
//!
//! This module handles splitting the margin into equal cells and fitting
//! one item into each cell, centered, with spacing.

use log::{debug, warn};

use super::{GridDimensions, GridOptions, LayoutOrientation};
use crate::arrangement::ArrangementStatus;
use crate::constants::ANGLE_DECIMALS;
use crate::geometry::{normalize_angle, round_to_decimals};
use crate::object::{CanvasObject, Origin, TransformPatch};
use crate::types::{MarginRect, Rect};

/// Smallest per-cell extent an item is fitted into (pixels)
const MIN_CELL_EXTENT: f64 = 1.0;

// =============================================================================
// Grid Dimensions
// =============================================================================

/// Work out how many rows and columns hold `count` items.
///
/// Overrides given for both axes are used verbatim; the caller is
/// responsible for them covering `count`. A single override fixes that
/// axis and derives the other. Otherwise `Rows` puts `ceil(sqrt(n))`
/// items in each row and `Cols` the same number in each column, so the
/// long axis of the grid follows the orientation's name.
pub fn calculate_grid_dimensions(
    count: usize,
    orientation: LayoutOrientation,
    custom_rows: Option<usize>,
    custom_cols: Option<usize>,
) -> GridDimensions {
    let count = count.max(1);

    match (custom_rows, custom_cols) {
        (Some(rows), Some(cols)) => return GridDimensions::new(rows, cols),
        (Some(rows), None) => {
            let rows = rows.max(1);
            return GridDimensions::new(rows, count.div_ceil(rows));
        }
        (None, Some(cols)) => {
            let cols = cols.max(1);
            return GridDimensions::new(count.div_ceil(cols), cols);
        }
        (None, None) => {}
    }

    match orientation {
        LayoutOrientation::Rows => {
            let cols = ceil_sqrt(count);
            GridDimensions::new(count.div_ceil(cols), cols)
        }
        LayoutOrientation::Cols => {
            let rows = ceil_sqrt(count);
            GridDimensions::new(rows, count.div_ceil(rows))
        }
        LayoutOrientation::SingleRow => GridDimensions::new(1, count),
        LayoutOrientation::SingleCol => GridDimensions::new(count, 1),
    }
}

fn ceil_sqrt(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Bounds of every cell of a grid spanning the margin, row by row
pub fn grid_cells(dims: GridDimensions, area: &Rect) -> Vec<Rect> {
    let cell_width = area.width / dims.cols as f64;
    let cell_height = area.height / dims.rows as f64;
    (0..dims.rows)
        .flat_map(|row| {
            (0..dims.cols).map(move |col| {
                Rect::new(
                    area.left + col as f64 * cell_width,
                    area.top + row as f64 * cell_height,
                    cell_width,
                    cell_height,
                )
            })
        })
        .collect()
}

/// Snap an angle to the orthogonal angle it already has, or 0.
///
/// Grid cells only support 0/90/180/270 degree rotation.
pub fn orthogonal_angle(angle: f64) -> f64 {
    let rounded = round_to_decimals(normalize_angle(angle), ANGLE_DECIMALS);
    if rounded >= 360.0 || rounded % 90.0 != 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Whether an orthogonal angle turns the item on its side
pub fn is_sideways(angle: f64) -> bool {
    angle == 90.0 || angle == 270.0
}

/// Uniform scale that fits an item into a cell, leaving `spacing` free
pub fn fit_scale(
    item_width: f64,
    item_height: f64,
    cell_width: f64,
    cell_height: f64,
    spacing: f64,
) -> f64 {
    let available_width = (cell_width - spacing).max(MIN_CELL_EXTENT);
    let available_height = (cell_height - spacing).max(MIN_CELL_EXTENT);
    (available_width / item_width).min(available_height / item_height)
}

// =============================================================================
// Grid Arrangement
// =============================================================================

/// Arrange items in a grid filling the margin.
///
/// Items keep any orthogonal rotation they have (sideways items swap
/// width and height for fitting); other rotations and all skew are
/// cleared. Returns `None` without touching anything when `items` is empty.
pub fn arrange_grid<O: CanvasObject>(
    items: &mut [O],
    margin: &MarginRect,
    options: &GridOptions,
) -> Option<ArrangementStatus> {
    if items.is_empty() {
        return None;
    }

    let count = items.len();
    let mut dims = calculate_grid_dimensions(count, options.orientation, options.rows, options.cols);
    if dims.rows == 0 || dims.cols == 0 || !dims.covers(count) {
        warn!(
            "grid override {}x{} cannot hold {} items, using automatic dimensions",
            dims.rows, dims.cols, count
        );
        dims = calculate_grid_dimensions(count, options.orientation, None, None);
    }

    let cell_width = margin.width / dims.cols as f64;
    let cell_height = margin.height / dims.rows as f64;
    debug!(
        "grid {}x{} ({}), cells {:.1}x{:.1}",
        dims.rows,
        dims.cols,
        options.orientation.as_str(),
        cell_width,
        cell_height
    );

    let row_major = options.orientation.is_row_major();
    for (slot, index) in options.order.sequence(count).into_iter().enumerate() {
        let pos = dims.position(slot, row_major);
        let item = &mut items[index];

        let angle = orthogonal_angle(item.transform().angle);
        let (width, height) = item.intrinsic_size();
        let (effective_width, effective_height) = if is_sideways(angle) {
            (height, width)
        } else {
            (width, height)
        };

        let scale = fit_scale(
            effective_width,
            effective_height,
            cell_width,
            cell_height,
            options.spacing,
        );
        let center_x = margin.left + pos.col as f64 * cell_width + cell_width / 2.0;
        let center_y = margin.top + pos.row as f64 * cell_height + cell_height / 2.0;

        item.update(
            TransformPatch::position(center_x, center_y)
                .with_scale(scale, scale)
                .with_angle(angle)
                .with_skew(0.0, 0.0)
                .with_origin(Origin::Center),
        );
    }

    Some(ArrangementStatus::Grid)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ItemOrder;
    use crate::object::{ImageObject, ObjectId};

    fn squares(count: usize, side: f64) -> Vec<ImageObject> {
        (0..count)
            .map(|i| ImageObject::new(ObjectId(i as u64), side, side))
            .collect()
    }

    #[test]
    fn test_dimensions_rows_and_cols() {
        assert_eq!(
            calculate_grid_dimensions(4, LayoutOrientation::Rows, None, None),
            GridDimensions::new(2, 2)
        );
        // 5 items: three per row for rows, three per column for cols
        assert_eq!(
            calculate_grid_dimensions(5, LayoutOrientation::Rows, None, None),
            GridDimensions::new(2, 3)
        );
        assert_eq!(
            calculate_grid_dimensions(5, LayoutOrientation::Cols, None, None),
            GridDimensions::new(3, 2)
        );
        assert_eq!(
            calculate_grid_dimensions(1, LayoutOrientation::Rows, None, None),
            GridDimensions::new(1, 1)
        );
    }

    #[test]
    fn test_dimensions_single_lines() {
        assert_eq!(
            calculate_grid_dimensions(6, LayoutOrientation::SingleRow, None, None),
            GridDimensions::new(1, 6)
        );
        assert_eq!(
            calculate_grid_dimensions(6, LayoutOrientation::SingleCol, None, None),
            GridDimensions::new(6, 1)
        );
    }

    #[test]
    fn test_dimensions_overrides() {
        // Both given: verbatim
        assert_eq!(
            calculate_grid_dimensions(10, LayoutOrientation::Rows, Some(1), Some(2)),
            GridDimensions::new(1, 2)
        );
        // One given: the other is derived
        assert_eq!(
            calculate_grid_dimensions(10, LayoutOrientation::Rows, Some(3), None),
            GridDimensions::new(3, 4)
        );
        assert_eq!(
            calculate_grid_dimensions(10, LayoutOrientation::Cols, None, Some(4)),
            GridDimensions::new(3, 4)
        );
    }

    #[test]
    fn test_dimensions_always_cover() {
        for count in 1..200 {
            for orientation in [
                LayoutOrientation::Rows,
                LayoutOrientation::Cols,
                LayoutOrientation::SingleRow,
                LayoutOrientation::SingleCol,
            ] {
                let dims = calculate_grid_dimensions(count, orientation, None, None);
                assert!(dims.covers(count), "{count} items in {dims:?}");
            }
        }
    }

    #[test]
    fn test_orthogonal_angle() {
        assert_eq!(orthogonal_angle(90.0), 90.0);
        assert_eq!(orthogonal_angle(269.999), 270.0);
        assert_eq!(orthogonal_angle(-90.0), 270.0);
        assert_eq!(orthogonal_angle(45.0), 0.0);
        assert_eq!(orthogonal_angle(359.999), 0.0);
    }

    #[test]
    fn test_four_squares_fill_cells() {
        let margin = MarginRect::new(0.0, 0.0, 1000.0, 1000.0).unwrap();
        let mut items = squares(4, 200.0);
        let options = GridOptions {
            spacing: 20.0,
            ..Default::default()
        };

        let status = arrange_grid(&mut items, &margin, &options);
        assert_eq!(status, Some(ArrangementStatus::Grid));

        let centers: Vec<(f64, f64)> = items
            .iter()
            .map(|i| (i.transform().left, i.transform().top))
            .collect();
        assert_eq!(
            centers,
            vec![(250.0, 250.0), (750.0, 250.0), (250.0, 750.0), (750.0, 750.0)]
        );
        for item in &items {
            assert!((item.transform().scale_x - 2.4).abs() < 1e-12);
            assert!((item.transform().scale_y - 2.4).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cols_orientation_fills_column_major() {
        let margin = MarginRect::new(0.0, 0.0, 1000.0, 1000.0).unwrap();
        let mut items = squares(4, 100.0);
        let options = GridOptions {
            orientation: LayoutOrientation::Cols,
            ..Default::default()
        };

        arrange_grid(&mut items, &margin, &options);

        // Second item goes below the first rather than beside it
        assert_eq!(items[1].transform().left, 250.0);
        assert_eq!(items[1].transform().top, 750.0);
    }

    #[test]
    fn test_reverse_order() {
        let margin = MarginRect::new(0.0, 0.0, 1000.0, 500.0).unwrap();
        let mut items = squares(2, 100.0);
        let options = GridOptions {
            orientation: LayoutOrientation::SingleRow,
            order: ItemOrder::Reverse,
            ..Default::default()
        };

        arrange_grid(&mut items, &margin, &options);

        assert_eq!(items[1].transform().left, 250.0);
        assert_eq!(items[0].transform().left, 750.0);
    }

    #[test]
    fn test_sideways_items_swap_dimensions() {
        let margin = MarginRect::new(0.0, 0.0, 1000.0, 500.0).unwrap();
        let mut items = vec![ImageObject::new(ObjectId(0), 400.0, 100.0)];
        items[0].update(TransformPatch::angle(90.0));
        let options = GridOptions {
            spacing: 0.0,
            ..Default::default()
        };

        arrange_grid(&mut items, &margin, &options);

        // Sideways the item is 100 wide and 400 tall: limited by the 500px height
        let t = items[0].transform();
        assert_eq!(t.angle, 90.0);
        assert!((t.scale_x - 1.25).abs() < 1e-12);
        assert!(margin.contains(&items[0].bounding_box()));
    }

    #[test]
    fn test_odd_rotation_is_cleared() {
        let margin = MarginRect::new(0.0, 0.0, 1000.0, 1000.0).unwrap();
        let mut items = squares(3, 300.0);
        items[2].update(TransformPatch::angle(33.0).with_skew(12.0, 0.0));

        arrange_grid(&mut items, &margin, &GridOptions::default());

        let t = items[2].transform();
        assert_eq!(t.angle, 0.0);
        assert_eq!(t.skew_x, 0.0);
        for item in &items {
            assert!(margin.contains(&item.bounding_box()));
        }
    }

    #[test]
    fn test_undersized_override_falls_back() {
        let margin = MarginRect::new(0.0, 0.0, 900.0, 900.0).unwrap();
        let mut items = squares(5, 100.0);
        let options = GridOptions {
            rows: Some(1),
            cols: Some(2),
            ..Default::default()
        };

        arrange_grid(&mut items, &margin, &options);
        for item in &items {
            assert!(margin.contains(&item.bounding_box()));
        }
    }

    #[test]
    fn test_empty_grid_returns_none() {
        let margin = MarginRect::new(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut items: Vec<ImageObject> = Vec::new();
        assert_eq!(arrange_grid(&mut items, &margin, &GridOptions::default()), None);
    }

    #[test]
    fn test_grid_cells() {
        let cells = grid_cells(GridDimensions::new(2, 3), &Rect::new(10.0, 20.0, 300.0, 200.0));
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Rect::new(10.0, 20.0, 100.0, 100.0));
        assert_eq!(cells[5], Rect::new(210.0, 120.0, 100.0, 100.0));
    }
}
