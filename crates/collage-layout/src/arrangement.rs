//! Arrangement state and strategy dispatch
//!
//! A page remembers which managed layout its items are in, plus the grid
//! orientation/order and spacing used for it. The "cycle layout" action
//! walks a fixed table of eight orientation/order states.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::constants::DEFAULT_SPACING_PX;
use crate::layout::{
    GridOptions, ItemOrder, LayoutOrientation, arrange_grid, arrange_masonry_columns,
    arrange_masonry_rows, arrange_random_collage_with_rng,
};
use crate::object::CanvasObject;
use crate::types::{LayoutError, MarginRect};

/// Named layout currently applied to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArrangementStatus {
    /// Items were placed or edited by hand
    #[default]
    None,
    Grid,
    ColumnsCollage,
    RowsCollage,
    Collage,
}

impl ArrangementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrangementStatus::None => "none",
            ArrangementStatus::Grid => "grid",
            ArrangementStatus::ColumnsCollage => "columns-collage",
            ArrangementStatus::RowsCollage => "rows-collage",
            ArrangementStatus::Collage => "collage",
        }
    }
}

impl fmt::Display for ArrangementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four layout strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArrangementMode {
    #[default]
    Grid,
    MasonryColumns,
    MasonryRows,
    RandomCollage,
}

impl ArrangementMode {
    /// Strategy that produces the given status, if any
    pub fn from_status(status: ArrangementStatus) -> Option<Self> {
        match status {
            ArrangementStatus::None => None,
            ArrangementStatus::Grid => Some(ArrangementMode::Grid),
            ArrangementStatus::ColumnsCollage => Some(ArrangementMode::MasonryColumns),
            ArrangementStatus::RowsCollage => Some(ArrangementMode::MasonryRows),
            ArrangementStatus::Collage => Some(ArrangementMode::RandomCollage),
        }
    }

    pub fn status(self) -> ArrangementStatus {
        match self {
            ArrangementMode::Grid => ArrangementStatus::Grid,
            ArrangementMode::MasonryColumns => ArrangementStatus::ColumnsCollage,
            ArrangementMode::MasonryRows => ArrangementStatus::RowsCollage,
            ArrangementMode::RandomCollage => ArrangementStatus::Collage,
        }
    }
}

impl FromStr for ArrangementMode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(ArrangementMode::Grid),
            "columns" | "columns-collage" | "masonry-columns" => Ok(ArrangementMode::MasonryColumns),
            "rows" | "rows-collage" | "masonry-rows" => Ok(ArrangementMode::MasonryRows),
            "collage" | "random" | "random-collage" => Ok(ArrangementMode::RandomCollage),
            other => Err(LayoutError::Config(format!("Unknown layout mode: {}", other))),
        }
    }
}

/// Everything a layout strategy needs besides the items and margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    pub mode: ArrangementMode,
    pub grid: GridOptions,
}

impl LayoutRequest {
    pub fn new(mode: ArrangementMode) -> Self {
        Self {
            mode,
            grid: GridOptions::default(),
        }
    }

    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }
}

/// Run the strategy named by `request.mode`.
///
/// Returns the resulting status, or `None` when `items` is empty.
pub fn arrange<O: CanvasObject, R: Rng>(
    items: &mut [O],
    margin: &MarginRect,
    request: &LayoutRequest,
    rng: &mut R,
) -> Option<ArrangementStatus> {
    match request.mode {
        ArrangementMode::Grid => arrange_grid(items, margin, &request.grid),
        ArrangementMode::MasonryColumns => arrange_masonry_columns(items, margin),
        ArrangementMode::MasonryRows => arrange_masonry_rows(items, margin),
        ArrangementMode::RandomCollage => arrange_random_collage_with_rng(items, margin, rng),
    }
}

/// The eight states visited by the cycle action, in order
const CYCLE: [(LayoutOrientation, ItemOrder); 8] = [
    (LayoutOrientation::Rows, ItemOrder::Forward),
    (LayoutOrientation::Rows, ItemOrder::Reverse),
    (LayoutOrientation::Cols, ItemOrder::Forward),
    (LayoutOrientation::Cols, ItemOrder::Reverse),
    (LayoutOrientation::SingleRow, ItemOrder::Forward),
    (LayoutOrientation::SingleRow, ItemOrder::Reverse),
    (LayoutOrientation::SingleCol, ItemOrder::Forward),
    (LayoutOrientation::SingleCol, ItemOrder::Reverse),
];

/// Arrangement bookkeeping for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrangementState {
    pub status: ArrangementStatus,
    pub orientation: LayoutOrientation,
    pub order: ItemOrder,
    /// Grid cell spacing (pixels)
    pub spacing: u32,
}

impl Default for ArrangementState {
    fn default() -> Self {
        Self {
            status: ArrangementStatus::None,
            orientation: LayoutOrientation::Rows,
            order: ItemOrder::Forward,
            spacing: DEFAULT_SPACING_PX,
        }
    }
}

impl ArrangementState {
    /// Step to the next orientation/order pair of the cycle
    pub fn advance_cycle(&mut self) {
        let current = CYCLE
            .iter()
            .position(|&state| state == (self.orientation, self.order))
            .unwrap_or(CYCLE.len() - 1);
        let (orientation, order) = CYCLE[(current + 1) % CYCLE.len()];
        self.orientation = orientation;
        self.order = order;
    }

    /// Items were moved, scaled, rotated or skewed by hand
    pub fn mark_manual_edit(&mut self) {
        self.status = ArrangementStatus::None;
    }

    /// The grid options matching this state
    pub fn grid_options(&self, rows: Option<usize>, cols: Option<usize>) -> GridOptions {
        GridOptions {
            orientation: self.orientation,
            order: self.order,
            rows,
            cols,
            spacing: self.spacing as f64,
        }
    }
}
