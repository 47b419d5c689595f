//! One-shot paint entry point.
//!
//! A run seeds one generator and makes every random choice from it in a fixed
//! order: palette, composition, shape kind, then per-region fills and per-shape
//! color jitter. Regions are painted back to front: the full-canvas background
//! first, then the composition's regions in declaration order.
use glam::Vec2;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::color::Hsl;
use crate::composition::{Composition, CompositionSet};
use crate::error::{Error, Result};
use crate::events::{EventSink, PaintEvent, PaintEventKind};
use crate::fill::{fill_polygon, FillSettings, LightSource, Shape, ShapeKind};
use crate::geometry::to_absolute;
use crate::palette::{Palette, PaletteCursor};
use crate::render::raster::RasterSurface;
use crate::render::{draw_shapes, Surface};

/// Name of the region covering the whole canvas.
pub const CANVAS_BACKGROUND: &str = "canvas_background";

/// Default canvas size in pixels.
pub const DEFAULT_DIMENSIONS: (u32, u32) = (2048, 2048);

/// Color the canvas is cleared to before any region is painted.
pub const CLEAR_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Options for a paint run. Unset fields fall back to random or default choices.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PaintOptions {
    /// Canvas size used by [`paint_to_image`]. [`paint`] uses the surface's own size.
    pub dimensions: (u32, u32),
    /// Generator seed; a fresh random seed when `None`.
    pub seed: Option<u64>,
    /// Composition name; picked at random when `None`.
    pub composition: Option<String>,
    /// Composition document; the bundled set when `None`.
    pub compositions: Option<CompositionSet>,
    /// Palette colors used in the given order; a shuffled bundled palette when `None`.
    pub palette: Option<Vec<String>>,
    /// Shape kind for every region; drawn at random when `None`.
    pub shape_kind: Option<ShapeKind>,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            seed: None,
            composition: None,
            compositions: None,
            palette: None,
            shape_kind: None,
        }
    }
}

impl PaintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = (width, height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_composition(mut self, name: impl Into<String>) -> Self {
        self.composition = Some(name.into());
        self
    }

    pub fn with_compositions(mut self, compositions: CompositionSet) -> Self {
        self.compositions = Some(compositions);
        self
    }

    pub fn with_palette(mut self, colors: Vec<String>) -> Self {
        self.palette = Some(colors);
        self
    }

    pub fn with_shape_kind(mut self, kind: ShapeKind) -> Self {
        self.shape_kind = Some(kind);
        self
    }

    /// Validates the options, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.dimensions;
        if w == 0 || h == 0 {
            return Err(Error::InvalidConfig(
                "dimensions must be > 0 in both components".into(),
            ));
        }
        if let Some(colors) = &self.palette {
            for color in colors {
                Hsl::from_hex(color)?;
            }
        }
        Ok(())
    }
}

/// A polygon to paint, its color and the shapes filling it.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    /// Hex color assigned from the palette.
    pub color: String,
    pub shapes: Vec<Shape>,
    /// Candidate points that fell outside the polygon.
    pub rejected: usize,
}

/// Per-region outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub name: String,
    pub color: String,
    pub shapes: usize,
    pub rejected: usize,
}

/// What a run chose and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintReport {
    pub seed: u64,
    pub composition: String,
    pub shape_kind: ShapeKind,
    pub dimensions: (u32, u32),
    pub palette: Vec<String>,
    /// Regions in paint order.
    pub regions: Vec<RegionSummary>,
}

impl PaintReport {
    pub fn total_shapes(&self) -> usize {
        self.regions.iter().map(|r| r.shapes).sum()
    }
}

/// Build the regions of `composition` in paint order and fill each with shapes.
///
/// The background region takes the first palette color; named regions follow
/// in declaration order, each taking the next color from the cursor.
pub fn plan_regions(
    composition: &Composition,
    palette: &Palette,
    dimensions: (u32, u32),
    kind: ShapeKind,
    rng: &mut dyn RngCore,
) -> Vec<Region> {
    let (width, height) = (dimensions.0 as f32, dimensions.1 as f32);
    let light = LightSource::from_ratios(
        composition.light_source.x_ratio,
        composition.light_source.y_ratio,
        width,
        height,
    );

    let mut regions = Vec::with_capacity(composition.shapes.len() + 1);

    let background = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(width, 0.0),
        Vec2::new(width, height),
        Vec2::new(0.0, height),
    ];
    let (color, mut cursor) = PaletteCursor::new().advance(palette);
    let color = color.to_owned();
    let filled = fill_polygon(
        &background,
        &light,
        kind,
        &FillSettings::background(),
        rng,
    );
    regions.push(Region {
        name: CANVAS_BACKGROUND.into(),
        color,
        shapes: filled.shapes,
        rejected: filled.rejected,
    });

    for named in &composition.shapes {
        let polygon = to_absolute(&named.points, width, height);
        let (color, next) = cursor.advance(palette);
        cursor = next;
        let color = color.to_owned();
        let filled = fill_polygon(&polygon, &light, kind, &FillSettings::default(), rng);
        regions.push(Region {
            name: named.name.clone(),
            color,
            shapes: filled.shapes,
            rejected: filled.rejected,
        });
    }

    regions
}

/// Run one paint pass onto `surface`.
///
/// The canvas size is taken from the surface; `options.dimensions` only
/// sizes the surface created by [`paint_to_image`].
pub fn paint<S>(
    options: &PaintOptions,
    surface: &mut S,
    sink: &mut dyn EventSink,
) -> Result<PaintReport>
where
    S: Surface + ?Sized,
{
    options.validate()?;
    run(options, surface, sink)
}

fn run<S>(options: &PaintOptions, surface: &mut S, sink: &mut dyn EventSink) -> Result<PaintReport>
where
    S: Surface + ?Sized,
{
    let dimensions = surface.dimensions();
    if dimensions.0 == 0 || dimensions.1 == 0 {
        return Err(Error::InvalidConfig("surface has zero area".into()));
    }

    let seed = options.seed.unwrap_or_else(|| rand::rng().next_u64());
    let mut rng = StdRng::seed_from_u64(seed);

    let palette = match &options.palette {
        Some(colors) => Palette::new(colors.clone())?,
        None => Palette::pick_shuffled(&mut rng),
    };

    let bundled;
    let compositions = match &options.compositions {
        Some(set) => set,
        None => {
            bundled = CompositionSet::bundled()?;
            &bundled
        }
    };
    let composition = match &options.composition {
        Some(name) => compositions.get(name)?,
        None => compositions.pick(&mut rng),
    };

    let kind = options
        .shape_kind
        .unwrap_or_else(|| ShapeKind::choose(&mut rng));

    info!(
        "Painting '{}' at {}x{} | seed: {} | shape: {}.",
        composition.name,
        dimensions.0,
        dimensions.1,
        seed,
        kind.as_str()
    );
    debug!("Palette: {:?}.", palette.colors());

    if sink.wants(PaintEventKind::RunStarted) {
        sink.send(PaintEvent::RunStarted {
            seed,
            composition: composition.name.clone(),
            shape_kind: kind,
            region_count: composition.shapes.len() + 1,
        });
    }

    surface.fill_background(CLEAR_COLOR);

    let regions = plan_regions(composition, &palette, dimensions, kind, &mut rng);

    for (index, region) in regions.iter().enumerate() {
        info!(
            "Region {}: '{}' | color: {} | shapes: {} | rejected: {}.",
            index,
            region.name,
            region.color,
            region.shapes.len(),
            region.rejected
        );
        if sink.wants(PaintEventKind::RegionFilled) {
            sink.send(PaintEvent::RegionFilled {
                index,
                name: region.name.clone(),
                color: region.color.clone(),
                shapes: region.shapes.len(),
                rejected: region.rejected,
            });
        }
        if region.shapes.is_empty() {
            warn!("Region '{}' produced no shapes.", region.name);
            if sink.wants(PaintEventKind::Warning) {
                sink.send(PaintEvent::Warning {
                    context: format!("region:{}", region.name),
                    message: "Region produced no shapes".into(),
                });
            }
        }
    }

    for (index, region) in regions.iter().enumerate() {
        let base = Hsl::from_hex(&region.color)?;
        draw_shapes(&mut *surface, &region.shapes, base, &mut rng);
        if sink.wants(PaintEventKind::RegionPainted) {
            sink.send(PaintEvent::RegionPainted {
                index,
                name: region.name.clone(),
            });
        }
    }

    let report = PaintReport {
        seed,
        composition: composition.name.clone(),
        shape_kind: kind,
        dimensions,
        palette: palette.colors().to_vec(),
        regions: regions
            .iter()
            .map(|r| RegionSummary {
                name: r.name.clone(),
                color: r.color.clone(),
                shapes: r.shapes.len(),
                rejected: r.rejected,
            })
            .collect(),
    };

    if sink.wants(PaintEventKind::RunFinished) {
        sink.send(PaintEvent::RunFinished {
            report: report.clone(),
        });
    }

    Ok(report)
}

/// Paint onto a fresh [`RasterSurface`] of `options.dimensions` and return the frame.
pub fn paint_to_image(
    options: &PaintOptions,
    sink: &mut dyn EventSink,
) -> Result<(RgbaImage, PaintReport)> {
    options.validate()?;
    let (width, height) = options.dimensions;
    let mut surface = RasterSurface::new(width, height)?;
    let report = run(options, &mut surface, sink)?;
    Ok((surface.into_image()?, report))
}
