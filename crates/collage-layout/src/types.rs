use std::ops::Deref;
use thiserror::Error;

use crate::constants::{MARGIN_EPSILON, mm_to_px};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid margin rectangle: {width} x {height} (both dimensions must be positive)")]
    InvalidMargin { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }
}

/// Supported paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    Letter,
    Legal,
    A4,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Page size in whole pixels at the given resolution
    pub fn dimensions_px(self, orientation: Orientation, dpi: f64) -> (f64, f64) {
        let (w, h) = self.dimensions_with_orientation(orientation);
        (mm_to_px(w, dpi).round(), mm_to_px(h, dpi).round())
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::A4 => "A4",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// A point in canvas pixels (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub left: f64,
    /// Y position (top edge)
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Smallest rectangle enclosing all points
    pub fn enclosing(points: &[Point]) -> Self {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Grow the rectangle by `amount` on every side
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Whether `other` lies inside this rectangle, allowing `tolerance` of overhang
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.left >= self.left - tolerance
            && other.top >= self.top - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

/// The printable area of a page.
///
/// Margins are only ever replaced, never edited: there is no mutable
/// access to the inner rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarginRect(Rect);

impl MarginRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        Self::from_rect(Rect::new(left, top, width, height))
    }

    pub fn from_rect(rect: Rect) -> Result<Self> {
        let valid = rect.width.is_finite()
            && rect.height.is_finite()
            && rect.left.is_finite()
            && rect.top.is_finite();
        if !valid || rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(LayoutError::InvalidMargin {
                width: rect.width,
                height: rect.height,
            });
        }
        Ok(Self(rect))
    }

    pub fn rect(&self) -> Rect {
        self.0
    }

    /// Whether a bounding box lies fully inside the margin
    pub fn contains(&self, bounds: &Rect) -> bool {
        self.0.contains_rect(bounds, MARGIN_EPSILON)
    }
}

impl Deref for MarginRect {
    type Target = Rect;

    fn deref(&self) -> &Rect {
        &self.0
    }
}

/// The four transformed corners of an object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corners {
    pub tl: Point,
    pub tr: Point,
    pub br: Point,
    pub bl: Point,
}

impl Corners {
    pub fn points(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::enclosing(&self.points())
    }
}
