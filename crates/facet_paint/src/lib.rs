#![forbid(unsafe_code)]
//! facet_paint: generative still images built from polygonal regions flooded with lit shapes.
//!
//! Modules:
//! - color: hex to HSL conversion and per-shape color adjustment
//! - geometry: polygon bounds and point-in-polygon tests
//! - fill: rejection-sampled shape placement with height and light attributes
//! - render: the drawing surface seam, shape painting and the raster surface
//! - palette, composition: the bundled static inputs
//! - paint: the one-shot entry point that ties everything together
pub mod color;
pub mod composition;
pub mod error;
pub mod events;
pub mod fill;
pub mod geometry;
pub mod paint;
pub mod palette;
pub mod random;
pub mod render;

/// Convenient re-exports for common types. Import with `use facet_paint::prelude::*;`.
pub mod prelude {
    pub use crate::color::{adjust_color, create_color_variation, stroke_base, Hsl};
    pub use crate::composition::{Composition, CompositionSet, LightRatios};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, PaintEvent, PaintEventKind, VecSink};
    pub use crate::fill::{
        fill_polygon, FillResult, FillSettings, LightSource, Shape, ShapeKind, ATTEMPTS,
    };
    pub use crate::geometry::{is_point_in_polygon, polygon_bounds, to_absolute, Bounds};
    pub use crate::paint::{
        paint, paint_to_image, plan_regions, PaintOptions, PaintReport, Region, RegionSummary,
    };
    pub use crate::palette::{Palette, PaletteCursor};
    pub use crate::render::raster::RasterSurface;
    pub use crate::render::{draw_shapes, Surface};
}
