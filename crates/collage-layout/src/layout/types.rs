//! Layout data types
//!
//! These types describe how a grid is shaped and scanned; they are shared
//! by the grid layout, the collage fallback and the arrangement state.

use crate::constants::DEFAULT_SPACING_PX;

/// Which way a grid is biased and scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LayoutOrientation {
    /// More columns than rows, filled row by row
    #[default]
    Rows,
    /// More rows than columns, filled column by column
    Cols,
    /// Everything in one row
    SingleRow,
    /// Everything in one column
    SingleCol,
}

impl LayoutOrientation {
    /// Whether items are assigned to cells row by row
    pub fn is_row_major(self) -> bool {
        matches!(self, LayoutOrientation::Rows | LayoutOrientation::SingleRow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutOrientation::Rows => "rows",
            LayoutOrientation::Cols => "cols",
            LayoutOrientation::SingleRow => "single-row",
            LayoutOrientation::SingleCol => "single-col",
        }
    }
}

/// Sequence in which items are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ItemOrder {
    #[default]
    Forward,
    Reverse,
}

impl ItemOrder {
    pub fn toggled(self) -> Self {
        match self {
            ItemOrder::Forward => ItemOrder::Reverse,
            ItemOrder::Reverse => ItemOrder::Forward,
        }
    }

    /// Item indices in layout order
    pub fn sequence(self, count: usize) -> Vec<usize> {
        match self {
            ItemOrder::Forward => (0..count).collect(),
            ItemOrder::Reverse => (0..count).rev().collect(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemOrder::Forward => "forward",
            ItemOrder::Reverse => "reverse",
        }
    }
}

/// Number of rows and columns in a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub rows: usize,
    pub cols: usize,
}

impl GridDimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether every one of `count` items gets its own cell
    pub fn covers(&self, count: usize) -> bool {
        self.cell_count() >= count
    }

    /// Cell of the `slot`-th item for the given scan order
    pub fn position(&self, slot: usize, row_major: bool) -> GridPosition {
        if row_major {
            GridPosition::new(slot / self.cols, slot % self.cols)
        } else {
            GridPosition::new(slot % self.rows, slot / self.rows)
        }
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Parameters of a grid arrangement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub orientation: LayoutOrientation,
    pub order: ItemOrder,
    /// Row count override
    pub rows: Option<usize>,
    /// Column count override
    pub cols: Option<usize>,
    /// Space left free inside every cell (pixels)
    pub spacing: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            orientation: LayoutOrientation::Rows,
            order: ItemOrder::Forward,
            rows: None,
            cols: None,
            spacing: DEFAULT_SPACING_PX as f64,
        }
    }
}
