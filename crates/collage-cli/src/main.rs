use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use collage_layout::{
    ArrangementMode, ArrangementStatus, CanvasObject, CollageOptions, ImageObject, ItemOrder,
    LayoutOrientation, ObjectId, Orientation, PageState, PaperSize, Rect, Transform,
    TransformPatch, calculate_grid_dimensions,
};
use log::{LevelFilter, debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod logger;

use logger::CliLogger;

#[derive(Parser)]
#[command(name = "collage", about = "Arrange images on printable pages", version)]
struct Cli {
    /// JSON options file; command-line flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arrange a list of image sizes on one page
    Arrange {
        /// JSON array of { "width", "height", "angle"? } entries
        #[arg(short, long)]
        input: PathBuf,

        /// Layout strategy
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        #[command(flatten)]
        paper: PaperArgs,

        #[command(flatten)]
        grid: GridArgs,

        /// Spacing left free in every grid cell (pixels)
        #[arg(long)]
        spacing: Option<u32>,

        /// Lay items out in reverse order
        #[arg(long)]
        reverse: bool,

        /// Seed for the random collage
        #[arg(long)]
        seed: Option<u64>,

        /// Write placed objects here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the grid dimensions used for a number of items
    GridDims {
        /// Number of items
        #[arg(long)]
        count: usize,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Show the printable rectangle of a page
    Margin {
        #[command(flatten)]
        paper: PaperArgs,

        /// Resolution in dots per inch
        #[arg(long)]
        dpi: Option<f64>,

        /// Margin on every side in inches
        #[arg(long)]
        margin_in: Option<f64>,
    },
}

#[derive(Args)]
struct PaperArgs {
    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Paper orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,
}

#[derive(Args)]
struct GridArgs {
    /// Grid orientation
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Fixed number of grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Fixed number of grid columns
    #[arg(long)]
    cols: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Grid,
    Columns,
    Rows,
    Collage,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    Letter,
    Legal,
    A4,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Rows,
    Cols,
    SingleRow,
    SingleCol,
}

impl From<ModeArg> for ArrangementMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Grid => Self::Grid,
            ModeArg::Columns => Self::MasonryColumns,
            ModeArg::Rows => Self::MasonryRows,
            ModeArg::Collage => Self::RandomCollage,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::A4 => Self::A4,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<LayoutArg> for LayoutOrientation {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Rows => Self::Rows,
            LayoutArg::Cols => Self::Cols,
            LayoutArg::SingleRow => Self::SingleRow,
            LayoutArg::SingleCol => Self::SingleCol,
        }
    }
}

impl PaperArgs {
    fn apply(&self, options: &mut CollageOptions) {
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
    }
}

impl GridArgs {
    fn apply(&self, options: &mut CollageOptions) {
        if let Some(layout) = self.layout {
            options.layout_orientation = layout.into();
        }
        if self.rows.is_some() {
            options.rows = self.rows;
        }
        if self.cols.is_some() {
            options.cols = self.cols;
        }
    }
}

/// One entry of the input file
#[derive(Deserialize)]
struct ItemSpec {
    width: f64,
    height: f64,
    #[serde(default)]
    angle: f64,
}

#[derive(Serialize)]
struct PlacedItem {
    id: ObjectId,
    width: f64,
    height: f64,
    transform: Transform,
    bounds: Rect,
}

#[derive(Serialize)]
struct ArrangeOutput {
    status: ArrangementStatus,
    page_width: f64,
    page_height: f64,
    margin: Rect,
    items: Vec<PlacedItem>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    CliLogger::new(level).init()?;

    let mut options = match &cli.config {
        Some(path) => CollageOptions::load(path).await?,
        None => CollageOptions::default(),
    };

    match cli.command {
        Commands::Arrange {
            input,
            mode,
            paper,
            grid,
            spacing,
            reverse,
            seed,
            output,
        } => {
            paper.apply(&mut options);
            grid.apply(&mut options);
            if let Some(mode) = mode {
                options.mode = mode.into();
            }
            if let Some(spacing) = spacing {
                options.spacing = spacing;
            }
            if reverse {
                options.order = ItemOrder::Reverse;
            }
            if seed.is_some() {
                options.seed = seed;
            }
            options.validate()?;

            let bytes = tokio::fs::read(&input).await?;
            let specs: Vec<ItemSpec> = serde_json::from_slice(&bytes)?;
            if specs.is_empty() {
                bail!("{} contains no items to arrange", input.display());
            }
            if let Some(bad) = specs.iter().find(|s| !(s.width > 0.0 && s.height > 0.0)) {
                bail!(
                    "item sizes must be positive, got {} x {}",
                    bad.width,
                    bad.height
                );
            }

            let mut page: PageState<ImageObject> = options.page_state()?;
            for spec in &specs {
                let id = page.add_image(spec.width, spec.height);
                if spec.angle != 0.0 {
                    if let Some(image) = page.canvas_mut().get_mut(id) {
                        image.update(TransformPatch::angle(spec.angle));
                    }
                }
            }
            debug!("loaded {} items from {}", specs.len(), input.display());

            let mut rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let Some(status) = page.arrange_with_rng(options.mode, &mut rng) else {
                bail!("nothing to arrange");
            };

            let (page_width, page_height) = page.paper().page_size_px();
            let result = ArrangeOutput {
                status,
                page_width,
                page_height,
                margin: page.margin().rect(),
                items: page
                    .canvas()
                    .objects()
                    .iter()
                    .map(|image| PlacedItem {
                        id: image.id(),
                        width: image.width(),
                        height: image.height(),
                        transform: image.transform(),
                        bounds: image.bounding_box(),
                    })
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&result)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json).await?;
                    info!("Arranged {} items as {} → {}", specs.len(), status, path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::GridDims { count, grid } => {
            grid.apply(&mut options);
            if count == 0 {
                bail!("count must be at least 1");
            }
            let dims =
                calculate_grid_dimensions(count, options.layout_orientation, options.rows, options.cols);
            println!("{} rows x {} cols", dims.rows, dims.cols);
            if !dims.covers(count) {
                println!("  warning: {} cells cannot hold {} items", dims.cell_count(), count);
            }
        }

        Commands::Margin {
            paper,
            dpi,
            margin_in,
        } => {
            paper.apply(&mut options);
            if let Some(dpi) = dpi {
                options.dpi = dpi;
            }
            if let Some(margin_in) = margin_in {
                options.margin_in = margin_in;
            }
            options.validate()?;

            let config = options.paper_config();
            let (width, height) = config.page_size_px();
            let margin = config.margin_rect()?;
            println!(
                "{} {:?} at {} dpi: {:.0} x {:.0} px",
                config.size.name(),
                config.orientation,
                config.dpi,
                width,
                height
            );
            println!(
                "  printable: left {:.0}, top {:.0}, {:.0} x {:.0} px",
                margin.left, margin.top, margin.width, margin.height
            );
        }
    }

    Ok(())
}
