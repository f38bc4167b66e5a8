//! Per-page state
//!
//! Each page owns its paper configuration, the margin derived from it, the
//! arrangement bookkeeping, the gesture side table and its objects. The
//! margin is replaced wholesale whenever the paper changes and is read
//! fresh by every layout and constraint call.

use log::{debug, info};
use rand::Rng;

use crate::arrangement::{ArrangementMode, ArrangementState, ArrangementStatus, LayoutRequest, arrange};
use crate::constants::{DEFAULT_DPI, DEFAULT_MARGIN_IN, in_to_px};
use crate::constraint::{
    GestureState, GestureTable, RotationDirection, constrain_position, constrain_rotation_gesture,
    constrain_scale, constrain_scaling_gesture, constrain_skew_gesture, reset_rotation,
};
use crate::layout::{ItemOrder, LayoutOrientation};
use crate::object::{Canvas, CanvasObject, ImageObject, ObjectId, TransformPatch};
use crate::types::{LayoutError, MarginRect, Orientation, PaperSize, Rect, Result};

/// Physical page setup
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaperConfig {
    pub size: PaperSize,
    pub orientation: Orientation,
    /// Resolution used to convert physical units to pixels
    pub dpi: f64,
    /// Printable margin on every side, in inches
    pub margin_in: f64,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self::new(PaperSize::Letter, Orientation::Portrait)
    }
}

impl PaperConfig {
    pub fn new(size: PaperSize, orientation: Orientation) -> Self {
        Self {
            size,
            orientation,
            dpi: DEFAULT_DPI,
            margin_in: DEFAULT_MARGIN_IN,
        }
    }

    /// Page size in pixels with orientation applied
    pub fn page_size_px(&self) -> (f64, f64) {
        self.size.dimensions_px(self.orientation, self.dpi)
    }

    /// The printable rectangle, inset from the page edges by the margin
    pub fn margin_rect(&self) -> Result<MarginRect> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(LayoutError::Config(format!("DPI must be positive, got {}", self.dpi)));
        }
        if !(self.margin_in.is_finite() && self.margin_in >= 0.0) {
            return Err(LayoutError::Config(format!(
                "Margin must be non-negative, got {}",
                self.margin_in
            )));
        }

        let (width, height) = self.page_size_px();
        let inset = in_to_px(self.margin_in, self.dpi);
        MarginRect::from_rect(Rect::new(inset, inset, width - 2.0 * inset, height - 2.0 * inset))
    }
}

/// State of one page
#[derive(Debug, Clone)]
pub struct PageState<O = ImageObject> {
    paper: PaperConfig,
    margin: MarginRect,
    arrangement: ArrangementState,
    custom_rows: Option<usize>,
    custom_cols: Option<usize>,
    gestures: GestureTable,
    canvas: Canvas<O>,
}

impl<O: CanvasObject> PageState<O> {
    pub fn new(paper: PaperConfig) -> Result<Self> {
        Ok(Self {
            margin: paper.margin_rect()?,
            paper,
            arrangement: ArrangementState::default(),
            custom_rows: None,
            custom_cols: None,
            gestures: GestureTable::new(),
            canvas: Canvas::new(),
        })
    }

    pub fn paper(&self) -> &PaperConfig {
        &self.paper
    }

    pub fn margin(&self) -> &MarginRect {
        &self.margin
    }

    pub fn arrangement(&self) -> &ArrangementState {
        &self.arrangement
    }

    pub fn status(&self) -> ArrangementStatus {
        self.arrangement.status
    }

    pub fn gestures(&self) -> &GestureTable {
        &self.gestures
    }

    pub fn canvas(&self) -> &Canvas<O> {
        &self.canvas
    }

    /// Direct access to the objects. Changes made through here are not
    /// tracked; call [`record_manual_edit`](Self::record_manual_edit).
    pub fn canvas_mut(&mut self) -> &mut Canvas<O> {
        &mut self.canvas
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.arrangement.spacing = spacing;
    }

    /// Grid orientation and item order used by the next grid arrangement
    pub fn set_layout(&mut self, orientation: LayoutOrientation, order: ItemOrder) {
        self.arrangement.orientation = orientation;
        self.arrangement.order = order;
    }

    /// Fix the grid's row and/or column count
    pub fn set_grid_overrides(&mut self, rows: Option<usize>, cols: Option<usize>) {
        self.custom_rows = rows;
        self.custom_cols = cols;
    }

    fn request(&self, mode: ArrangementMode) -> LayoutRequest {
        LayoutRequest::new(mode)
            .with_grid(self.arrangement.grid_options(self.custom_rows, self.custom_cols))
    }

    // =========================================================================
    // Arrangement
    // =========================================================================

    /// Apply a layout strategy to every object on the page
    pub fn arrange(&mut self, mode: ArrangementMode) -> Option<ArrangementStatus> {
        self.arrange_with_rng(mode, &mut rand::rng())
    }

    pub fn arrange_with_rng<R: Rng>(
        &mut self,
        mode: ArrangementMode,
        rng: &mut R,
    ) -> Option<ArrangementStatus> {
        let request = self.request(mode);
        let status = arrange(self.canvas.objects_mut(), &self.margin, &request, rng)?;
        debug!("page arranged as {}", status);
        self.arrangement.status = status;
        // Layouts move everything; remembered gesture states no longer apply
        self.gestures.clear();
        Some(status)
    }

    /// Advance the orientation/order cycle and lay the page out as a grid
    pub fn cycle_layout(&mut self) -> Option<ArrangementStatus> {
        self.cycle_layout_with_rng(&mut rand::rng())
    }

    pub fn cycle_layout_with_rng<R: Rng>(&mut self, rng: &mut R) -> Option<ArrangementStatus> {
        self.arrangement.advance_cycle();
        debug!(
            "layout cycled to {} / {}",
            self.arrangement.orientation.as_str(),
            self.arrangement.order.as_str()
        );
        self.arrange_with_rng(ArrangementMode::Grid, rng)
    }

    /// Forget the managed arrangement after a manual change
    pub fn record_manual_edit(&mut self) {
        self.arrangement.mark_manual_edit();
    }

    /// Replace the paper and margin, then bring the objects in line with it.
    ///
    /// A managed arrangement is re-applied; otherwise every object is
    /// fitted into the new margin individually.
    pub fn set_paper(&mut self, paper: PaperConfig) -> Result<()> {
        self.set_paper_with_rng(paper, &mut rand::rng())
    }

    pub fn set_paper_with_rng<R: Rng>(&mut self, paper: PaperConfig, rng: &mut R) -> Result<()> {
        let margin = paper.margin_rect()?;
        info!(
            "paper changed to {} {:?} ({:.0}x{:.0} printable)",
            paper.size.name(),
            paper.orientation,
            margin.width,
            margin.height
        );
        self.paper = paper;
        self.margin = margin;
        self.gestures.clear();

        match ArrangementMode::from_status(self.arrangement.status) {
            Some(mode) => {
                self.arrange_with_rng(mode, rng);
            }
            None => {
                for object in self.canvas.objects_mut() {
                    constrain_scale(object, &self.margin);
                }
            }
        }
        Ok(())
    }

    /// Switch between portrait and landscape
    pub fn toggle_orientation(&mut self) -> Result<()> {
        let mut paper = self.paper;
        paper.orientation = paper.orientation.toggled();
        self.set_paper(paper)
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Add an object, fitted into the margin
    pub fn add_object(&mut self, mut object: O) -> ObjectId {
        constrain_scale(&mut object, &self.margin);
        let id = object.id();
        self.canvas.add(object);
        self.record_manual_edit();
        id
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Option<O> {
        self.gestures.end(id);
        self.canvas.remove(id)
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    pub fn begin_gesture(&mut self, id: ObjectId) {
        self.gestures.begin(id);
    }

    pub fn end_gesture(&mut self, id: ObjectId) -> Option<GestureState> {
        self.gestures.end(id)
    }

    /// Move an object and keep it inside the margin
    pub fn move_object(&mut self, id: ObjectId, left: f64, top: f64) -> bool {
        let Some(object) = self.canvas.get_mut(id) else {
            return false;
        };
        object.update(TransformPatch::position(left, top));
        constrain_position(object, &self.margin);
        self.arrangement.mark_manual_edit();
        true
    }

    /// One frame of a scale drag; `patch` carries the proposed scale and
    /// position
    pub fn scale_object(&mut self, id: ObjectId, patch: TransformPatch) -> bool {
        let Some(object) = self.canvas.get_mut(id) else {
            return false;
        };
        object.update(patch);
        constrain_scaling_gesture(object, &self.margin, &mut self.gestures);
        self.arrangement.mark_manual_edit();
        true
    }

    /// One frame of a rotation drag
    pub fn rotate_object(&mut self, id: ObjectId, angle: f64, direction: RotationDirection) -> bool {
        let Some(object) = self.canvas.get_mut(id) else {
            return false;
        };
        object.update(TransformPatch::angle(angle));
        constrain_rotation_gesture(object, &self.margin, direction, &mut self.gestures);
        self.arrangement.mark_manual_edit();
        true
    }

    /// One frame of a skew drag
    pub fn skew_object(&mut self, id: ObjectId, patch: TransformPatch) -> bool {
        let Some(object) = self.canvas.get_mut(id) else {
            return false;
        };
        object.update(patch);
        constrain_skew_gesture(object, &self.margin, &mut self.gestures);
        self.arrangement.mark_manual_edit();
        true
    }

    /// Straighten an object
    pub fn reset_object_rotation(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.canvas.get_mut(id) else {
            return false;
        };
        reset_rotation(object, &self.margin);
        self.arrangement.mark_manual_edit();
        true
    }
}

impl PageState<ImageObject> {
    /// Add an image of the given pixel size
    pub fn add_image(&mut self, width: f64, height: f64) -> ObjectId {
        let id = self.canvas.allocate_id();
        let center = self.margin.center();
        let mut image = ImageObject::new(id, width, height);
        image.update(TransformPatch::position(center.x, center.y));
        self.add_object(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::is_object_within_margin;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn letter() -> PageState {
        PageState::new(PaperConfig::default()).unwrap()
    }

    #[test]
    fn test_letter_margin() {
        let margin = PaperConfig::default().margin_rect().unwrap();
        assert_eq!(margin.rect(), Rect::new(60.0, 60.0, 2430.0, 3180.0));
    }

    #[test]
    fn test_landscape_swaps_margin() {
        let margin = PaperConfig::new(PaperSize::A4, Orientation::Landscape)
            .margin_rect()
            .unwrap();
        assert_eq!(margin.rect(), Rect::new(60.0, 60.0, 3508.0 - 120.0, 2480.0 - 120.0));
    }

    #[test]
    fn test_oversized_margin_is_rejected() {
        let paper = PaperConfig {
            margin_in: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            paper.margin_rect(),
            Err(LayoutError::InvalidMargin { .. })
        ));

        let paper = PaperConfig {
            dpi: 0.0,
            ..Default::default()
        };
        assert!(matches!(paper.margin_rect(), Err(LayoutError::Config(_))));
    }

    #[test]
    fn test_added_images_are_fitted() {
        let mut page = letter();
        let id = page.add_image(10_000.0, 500.0);
        let image = page.canvas().get(id).unwrap();
        assert!(is_object_within_margin(image, page.margin()));
    }

    #[test]
    fn test_arrange_sets_status() {
        let mut page = letter();
        assert_eq!(page.arrange(ArrangementMode::Grid), None);

        page.add_image(400.0, 300.0);
        page.add_image(300.0, 400.0);
        assert_eq!(page.arrange(ArrangementMode::Grid), Some(ArrangementStatus::Grid));
        assert_eq!(page.status(), ArrangementStatus::Grid);
    }

    #[test]
    fn test_manual_gesture_resets_status() {
        let mut page = letter();
        let id = page.add_image(400.0, 300.0);
        page.arrange(ArrangementMode::MasonryColumns);

        page.begin_gesture(id);
        assert!(page.move_object(id, 5000.0, 5000.0));
        assert_eq!(page.status(), ArrangementStatus::None);
        assert!(is_object_within_margin(page.canvas().get(id).unwrap(), page.margin()));
        assert!(page.end_gesture(id).is_some());

        assert!(!page.move_object(ObjectId(99), 0.0, 0.0));
    }

    #[test]
    fn test_paper_change_reapplies_arrangement() {
        let mut page = letter();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..4 {
            page.add_image(800.0, 600.0);
        }
        page.arrange_with_rng(ArrangementMode::Grid, &mut rng);

        let mut paper = *page.paper();
        paper.orientation = Orientation::Landscape;
        page.set_paper_with_rng(paper, &mut rng).unwrap();

        assert_eq!(page.status(), ArrangementStatus::Grid);
        assert_eq!(page.margin().width, 3300.0 - 120.0);
        for object in page.canvas().objects() {
            assert!(is_object_within_margin(object, page.margin()));
        }
    }

    #[test]
    fn test_paper_change_without_arrangement_fits_objects() {
        let mut page: PageState =
            PageState::new(PaperConfig::new(PaperSize::Letter, Orientation::Landscape)).unwrap();
        let id = page.add_image(3000.0, 1000.0);
        assert_eq!(page.status(), ArrangementStatus::None);
        assert_eq!(page.canvas().get(id).unwrap().transform().scale_x, 1.0);

        page.toggle_orientation().unwrap();

        let image = page.canvas().get(id).unwrap();
        assert_eq!(page.paper().orientation, Orientation::Portrait);
        assert!(image.transform().scale_x < 1.0);
        assert!(is_object_within_margin(image, page.margin()));
    }

    #[test]
    fn test_cycle_layout_runs_grid() {
        let mut page = letter();
        page.add_image(100.0, 100.0);
        page.add_image(100.0, 100.0);

        assert_eq!(page.cycle_layout(), Some(ArrangementStatus::Grid));
        assert_eq!(page.arrangement().orientation, LayoutOrientation::Rows);
        assert_eq!(page.arrangement().order, ItemOrder::Reverse);
    }

    #[test]
    fn test_set_layout_changes_grid() {
        let mut page = letter();
        let a = page.add_image(100.0, 100.0);
        let b = page.add_image(100.0, 100.0);
        page.set_layout(LayoutOrientation::SingleCol, ItemOrder::Forward);
        page.arrange(ArrangementMode::Grid);

        let first = page.canvas().get(a).unwrap().transform();
        let second = page.canvas().get(b).unwrap().transform();
        assert_eq!(first.left, second.left);
        assert!(first.top < second.top);
    }
}
