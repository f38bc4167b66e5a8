//! Shared constants for page arrangement
//!
//! This module centralizes magic numbers and constants used throughout
//! the layout and constraint code. The iteration caps below bound every
//! loop that runs inside a single user action.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Default output resolution (dots per inch)
pub const DEFAULT_DPI: f64 = 300.0;

/// Default printable margin on every side, in inches
pub const DEFAULT_MARGIN_IN: f64 = 0.2;

/// Convert inches to pixels
#[inline]
pub fn in_to_px(inches: f64, dpi: f64) -> f64 {
    inches * dpi
}

/// Convert millimeters to pixels
#[inline]
pub fn mm_to_px(mm: f64, dpi: f64) -> f64 {
    mm / MM_PER_INCH * dpi
}

// =============================================================================
// Geometry
// =============================================================================

/// Slack allowed when testing containment, absorbs floating-point noise
pub const MARGIN_EPSILON: f64 = 1e-6;

/// Decimal places used when comparing angles
pub const ANGLE_DECIMALS: u32 = 2;

// =============================================================================
// Constraint Search
// =============================================================================

/// Binary search stops once the interpolation interval is this narrow
pub const SEARCH_TOLERANCE: f64 = 0.005;

/// Hard cap on binary-search halvings
pub const MAX_SEARCH_ITERATIONS: usize = 32;

/// Angle deltas larger than this are treated as a fast drag (degrees)
pub const FAST_ROTATION_THRESHOLD_DEG: f64 = 5.0;

/// Largest increment used when stepping through a fast drag (degrees)
pub const ROTATION_STEP_DEG: f64 = 2.0;

// =============================================================================
// Grid and Masonry
// =============================================================================

/// Default spacing between grid cells (pixels)
pub const DEFAULT_SPACING_PX: u32 = 20;

/// Gap between items in columns/rows collages (pixels)
pub const MASONRY_GAP_PX: f64 = 10.0;

/// Minimum number of masonry columns/rows
pub const MASONRY_MIN_LANES: usize = 2;

// =============================================================================
// Random Collage
// =============================================================================

/// Share of the margin area the collage aims to cover
pub const COLLAGE_TARGET_COVERAGE: f64 = 0.8;

/// Per-item area jitter range
pub const COLLAGE_AREA_JITTER: (f64, f64) = (0.55, 1.65);

/// Longest item side relative to the shorter margin dimension
pub const COLLAGE_MAX_SIDE_RATIO: f64 = 0.7;

/// Random placements tried before an item is shrunk
pub const COLLAGE_PLACEMENT_TRIES: usize = 150;

/// Shrink factor applied after a failed placement round
pub const COLLAGE_SHRINK_FACTOR: f64 = 0.92;

/// Items may not shrink below this side length (pixels)
pub const COLLAGE_MIN_SIDE_PX: f64 = 20.0;

/// Target area reduction after a failed layout attempt
pub const COLLAGE_DENSITY_REDUCTION: f64 = 0.92;

/// Layout attempts before falling back to a grid-like placement
pub const COLLAGE_MAX_ATTEMPTS: usize = 50;

/// Padding added around every item for overlap tests (pixels)
pub const COLLAGE_PADDING_PX: f64 = 2.0;

/// Spacing between cells of the fallback placement (pixels)
pub const COLLAGE_FALLBACK_SPACING_PX: f64 = 10.0;

/// Growth optimization passes
pub const GROWTH_PASSES: usize = 3;

/// Growth per step (fraction of current size)
pub const GROWTH_STEP: f64 = 0.02;

/// Growth steps tried per corner
pub const GROWTH_MAX_STEPS: usize = 100;

/// Centering iterations
pub const CENTERING_MAX_ITERATIONS: usize = 1000;

/// Centering step (pixels)
pub const CENTERING_STEP_PX: f64 = 1.0;
