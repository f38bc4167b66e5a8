use crate::arrangement::{ArrangementMode, LayoutRequest};
use crate::constants::{DEFAULT_DPI, DEFAULT_MARGIN_IN, DEFAULT_SPACING_PX};
use crate::layout::{GridOptions, ItemOrder, LayoutOrientation};
use crate::object::CanvasObject;
use crate::page::{PageState, PaperConfig};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page and layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollageOptions {
    // Paper
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub dpi: f64,
    pub margin_in: f64,

    // Grid
    pub spacing: u32,
    pub layout_orientation: LayoutOrientation,
    pub order: ItemOrder,
    pub rows: Option<usize>,
    pub cols: Option<usize>,

    // Strategy
    pub mode: ArrangementMode,

    /// Seed for the random collage; unseeded runs differ every time
    pub seed: Option<u64>,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            orientation: Orientation::Portrait,
            dpi: DEFAULT_DPI,
            margin_in: DEFAULT_MARGIN_IN,
            spacing: DEFAULT_SPACING_PX,
            layout_orientation: LayoutOrientation::Rows,
            order: ItemOrder::Forward,
            rows: None,
            cols: None,
            mode: ArrangementMode::Grid,
            seed: None,
        }
    }
}

impl CollageOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(LayoutError::Config(format!(
                "DPI must be positive, got {}",
                self.dpi
            )));
        }

        if !(self.margin_in.is_finite() && self.margin_in >= 0.0) {
            return Err(LayoutError::Config(format!(
                "Margin must be non-negative, got {}",
                self.margin_in
            )));
        }

        if let PaperSize::Custom {
            width_mm,
            height_mm,
        } = self.paper_size
        {
            if !(width_mm > 0.0 && height_mm > 0.0) {
                return Err(LayoutError::Config(format!(
                    "Custom paper must have a positive size, got {} x {} mm",
                    width_mm, height_mm
                )));
            }
        }

        if self.rows == Some(0) || self.cols == Some(0) {
            return Err(LayoutError::Config(
                "Row and column overrides must be at least 1".to_string(),
            ));
        }

        // The margin must leave something printable
        self.paper_config().margin_rect()?;

        Ok(())
    }

    pub fn paper_config(&self) -> PaperConfig {
        PaperConfig {
            size: self.paper_size,
            orientation: self.orientation,
            dpi: self.dpi,
            margin_in: self.margin_in,
        }
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            orientation: self.layout_orientation,
            order: self.order,
            rows: self.rows,
            cols: self.cols,
            spacing: self.spacing as f64,
        }
    }

    pub fn layout_request(&self) -> LayoutRequest {
        LayoutRequest::new(self.mode).with_grid(self.grid_options())
    }

    /// An empty page set up with these options
    pub fn page_state<O: CanvasObject>(&self) -> Result<PageState<O>> {
        self.validate()?;
        let mut page = PageState::new(self.paper_config())?;
        page.set_spacing(self.spacing);
        page.set_layout(self.layout_orientation, self.order);
        page.set_grid_overrides(self.rows, self.cols);
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = CollageOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.spacing, 20);
        assert_eq!(options.dpi, 300.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let options = CollageOptions {
            dpi: -1.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = CollageOptions {
            cols: Some(0),
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let options = CollageOptions {
            paper_size: PaperSize::Custom {
                width_mm: 0.0,
                height_mm: 100.0,
            },
            ..Default::default()
        };
        assert!(options.validate().is_err());

        // 4.5 inches on each side of an 8.5 inch page leaves nothing
        let options = CollageOptions {
            margin_in: 4.5,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(LayoutError::InvalidMargin { .. })
        ));
    }

    #[test]
    fn test_page_state_carries_grid_settings() {
        let options = CollageOptions {
            spacing: 5,
            layout_orientation: LayoutOrientation::Cols,
            order: ItemOrder::Reverse,
            ..Default::default()
        };
        let page: PageState = options.page_state().unwrap();
        assert_eq!(page.arrangement().spacing, 5);
        assert_eq!(page.arrangement().orientation, LayoutOrientation::Cols);
        assert_eq!(page.arrangement().order, ItemOrder::Reverse);
    }
}
