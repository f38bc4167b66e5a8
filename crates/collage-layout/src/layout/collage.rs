//! Random collage layout
//!
//! Three phases, each bounded:
//! 1. Rejection sampling places every item at a jittered target size
//!    without overlaps. Failed layouts are retried at lower density; after
//!    [`COLLAGE_MAX_ATTEMPTS`] the items fall back to a grid-like placement.
//! 2. Directional growth enlarges each item from its corners into the
//!    space sampling left free.
//! 3. Centering nudges items towards the middle of the margin, then
//!    growth runs once more.
//!
//! All work happens on axis-aligned rectangles; rotation and skew are
//! cleared when the result is applied to the items.

use std::cmp::Ordering;

use log::{debug, warn};
use rand::Rng;

use super::LayoutOrientation;
use super::grid::calculate_grid_dimensions;
use crate::arrangement::ArrangementStatus;
use crate::constants::*;
use crate::geometry::check_overlap;
use crate::object::{CanvasObject, Origin, TransformPatch};
use crate::types::{MarginRect, Point, Rect};

/// Padding used while placing; slightly above the nominal padding so the
/// final layout still passes an overlap check at exactly the nominal value
const PLACEMENT_PADDING: f64 = COLLAGE_PADDING_PX + MARGIN_EPSILON;

/// Arrange items in a random non-overlapping collage using the thread RNG.
///
/// Returns `None` without touching anything when `items` is empty.
pub fn arrange_random_collage<O: CanvasObject>(
    items: &mut [O],
    margin: &MarginRect,
) -> Option<ArrangementStatus> {
    arrange_random_collage_with_rng(items, margin, &mut rand::rng())
}

/// Arrange items in a random non-overlapping collage drawing from `rng`.
///
/// Seeding `rng` makes the layout reproducible.
pub fn arrange_random_collage_with_rng<O: CanvasObject, R: Rng>(
    items: &mut [O],
    margin: &MarginRect,
    rng: &mut R,
) -> Option<ArrangementStatus> {
    if items.is_empty() {
        return None;
    }

    let sizes: Vec<(f64, f64)> = items.iter().map(|item| item.intrinsic_size()).collect();
    let area = margin.rect();

    let mut rects = place_with_retries(&sizes, &area, rng);
    let grown = grow_items(&mut rects, &area);
    let moved = center_items(&mut rects, &area);
    let regrown = grow_items(&mut rects, &area);
    debug!(
        "collage: {} items, {} growth steps, {} centering iterations, {} regrowth steps",
        items.len(),
        grown,
        moved,
        regrown
    );

    for ((item, rect), (width, height)) in items.iter_mut().zip(&rects).zip(&sizes) {
        let center = rect.center();
        item.update(
            TransformPatch::position(center.x, center.y)
                .with_scale(rect.width / width, rect.height / height)
                .with_angle(0.0)
                .with_skew(0.0, 0.0)
                .with_origin(Origin::Center),
        );
    }

    Some(ArrangementStatus::Collage)
}

// =============================================================================
// Phase 1: Rejection Sampling
// =============================================================================

fn place_with_retries<R: Rng>(sizes: &[(f64, f64)], area: &Rect, rng: &mut R) -> Vec<Rect> {
    let mut density = 1.0;
    for attempt in 1..=COLLAGE_MAX_ATTEMPTS {
        if let Some(rects) = try_place_all(sizes, area, density, rng) {
            debug!(
                "collage placed on attempt {} at density {:.3}",
                attempt, density
            );
            return rects;
        }
        density *= COLLAGE_DENSITY_REDUCTION;
    }

    warn!(
        "collage could not place {} items after {} attempts, using grid placement",
        sizes.len(),
        COLLAGE_MAX_ATTEMPTS
    );
    fallback_rects(sizes, area)
}

/// Width over height, or square when the source size is unusable
fn aspect_ratio(width: f64, height: f64) -> f64 {
    let aspect = width / height;
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

/// One layout attempt. `None` when some item cannot be placed even at
/// the minimum size.
fn try_place_all<R: Rng>(
    sizes: &[(f64, f64)],
    area: &Rect,
    density: f64,
    rng: &mut R,
) -> Option<Vec<Rect>> {
    let ideal_area = area.area() * COLLAGE_TARGET_COVERAGE * density / sizes.len() as f64;
    let max_side = area.width.min(area.height) * COLLAGE_MAX_SIDE_RATIO;
    let (jitter_min, jitter_max) = COLLAGE_AREA_JITTER;

    let mut targets: Vec<(usize, f64, f64)> = sizes
        .iter()
        .enumerate()
        .map(|(index, &(width, height))| {
            let aspect = aspect_ratio(width, height);
            let target = ideal_area * rng.random_range(jitter_min..=jitter_max);
            let mut w = (target * aspect).sqrt();
            let mut h = w / aspect;
            let longest = w.max(h);
            if longest > max_side {
                let factor = max_side / longest;
                w *= factor;
                h *= factor;
            }
            (index, w, h)
        })
        .collect();

    // Largest first, index as tie-break
    targets.sort_by(|a, b| {
        (b.1 * b.2)
            .partial_cmp(&(a.1 * a.2))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut slots: Vec<Option<Rect>> = vec![None; sizes.len()];
    let mut placed: Vec<Rect> = Vec::with_capacity(sizes.len());
    for (index, mut w, mut h) in targets {
        loop {
            if w.min(h) < COLLAGE_MIN_SIDE_PX {
                return None;
            }
            if let Some(rect) = sample_position(w, h, area, &placed, rng) {
                slots[index] = Some(rect);
                placed.push(rect);
                break;
            }
            w *= COLLAGE_SHRINK_FACTOR;
            h *= COLLAGE_SHRINK_FACTOR;
        }
    }

    slots.into_iter().collect()
}

fn sample_position<R: Rng>(
    width: f64,
    height: f64,
    area: &Rect,
    placed: &[Rect],
    rng: &mut R,
) -> Option<Rect> {
    let free_x = area.width - width;
    let free_y = area.height - height;
    if free_x < 0.0 || free_y < 0.0 {
        return None;
    }

    (0..COLLAGE_PLACEMENT_TRIES).find_map(|_| {
        let candidate = Rect::new(
            area.left + rng.random::<f64>() * free_x,
            area.top + rng.random::<f64>() * free_y,
            width,
            height,
        );
        placed
            .iter()
            .all(|other| !check_overlap(&candidate, other, PLACEMENT_PADDING))
            .then_some(candidate)
    })
}

/// Each item fitted into its own grid cell, used when sampling keeps failing
fn fallback_rects(sizes: &[(f64, f64)], area: &Rect) -> Vec<Rect> {
    let dims = calculate_grid_dimensions(sizes.len(), LayoutOrientation::Rows, None, None);
    let cell_width = area.width / dims.cols as f64;
    let cell_height = area.height / dims.rows as f64;
    let available_width = (cell_width - COLLAGE_FALLBACK_SPACING_PX).max(cell_width * 0.25);
    let available_height = (cell_height - COLLAGE_FALLBACK_SPACING_PX).max(cell_height * 0.25);

    sizes
        .iter()
        .enumerate()
        .map(|(slot, &(width, height))| {
            let pos = dims.position(slot, true);
            let aspect = aspect_ratio(width, height);
            let (w, h) = if available_width / available_height > aspect {
                (available_height * aspect, available_height)
            } else {
                (available_width, available_width / aspect)
            };
            let center = Point::new(
                area.left + (pos.col as f64 + 0.5) * cell_width,
                area.top + (pos.row as f64 + 0.5) * cell_height,
            );
            Rect::from_center(center, w, h)
        })
        .collect()
}

/// Whether `candidate` can replace the rectangle at `index`
fn fits(candidate: &Rect, index: usize, rects: &[Rect], area: &Rect) -> bool {
    area.contains_rect(candidate, MARGIN_EPSILON * 0.5)
        && rects
            .iter()
            .enumerate()
            .all(|(i, other)| i == index || !check_overlap(candidate, other, PLACEMENT_PADDING))
}

// =============================================================================
// Phase 2: Directional Growth
// =============================================================================

/// Corner an item grows from; the opposite corner stays fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    fn grow(self, rect: &Rect, factor: f64) -> Rect {
        let width = rect.width * factor;
        let height = rect.height * factor;
        let left = match self {
            Corner::TopLeft | Corner::BottomLeft => rect.right() - width,
            Corner::TopRight | Corner::BottomRight => rect.left,
        };
        let top = match self {
            Corner::TopLeft | Corner::TopRight => rect.bottom() - height,
            Corner::BottomLeft | Corner::BottomRight => rect.top,
        };
        Rect::new(left, top, width, height)
    }
}

/// Grow items into free space. Returns the number of accepted steps.
fn grow_items(rects: &mut [Rect], area: &Rect) -> usize {
    let mut total = 0;
    for _ in 0..GROWTH_PASSES {
        let mut order: Vec<usize> = (0..rects.len()).collect();
        order.sort_by(|&a, &b| {
            rects[a]
                .area()
                .partial_cmp(&rects[b].area())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });

        let mut grown = 0;
        for index in order {
            for corner in Corner::ALL {
                for _ in 0..GROWTH_MAX_STEPS {
                    let candidate = corner.grow(&rects[index], 1.0 + GROWTH_STEP);
                    if !fits(&candidate, index, rects, area) {
                        break;
                    }
                    rects[index] = candidate;
                    grown += 1;
                }
            }
        }

        total += grown;
        if grown == 0 {
            break;
        }
    }
    total
}

// =============================================================================
// Phase 3: Centering
// =============================================================================

/// Signed step of at most [`CENTERING_STEP_PX`] covering `diff`
fn centering_step(diff: f64) -> f64 {
    diff.signum() * diff.abs().min(CENTERING_STEP_PX)
}

/// Nudge items towards the margin center. Returns the iterations used.
fn center_items(rects: &mut [Rect], area: &Rect) -> usize {
    let target = area.center();
    for iteration in 0..CENTERING_MAX_ITERATIONS {
        let mut moved = false;
        for index in 0..rects.len() {
            let current = rects[index];
            let dx = centering_step(target.x - current.center_x());
            let dy = centering_step(target.y - current.center_y());

            for (step_x, step_y) in [(dx, 0.0), (0.0, dy)] {
                if step_x == 0.0 && step_y == 0.0 {
                    continue;
                }
                let candidate = rects[index].translate(step_x, step_y);
                if fits(&candidate, index, rects, area) {
                    rects[index] = candidate;
                    moved = true;
                }
            }
        }
        if !moved {
            return iteration;
        }
    }
    CENTERING_MAX_ITERATIONS
}
