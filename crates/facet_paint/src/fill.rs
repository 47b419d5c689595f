//! Shape filler: floods a polygon with lit triangles or circles.
//!
//! Candidate points are drawn uniformly inside the polygon's bounding box and
//! kept only when they fall inside the polygon itself. The loop runs a fixed
//! number of attempts, so the number of emitted shapes depends on how much of
//! the bounding box the polygon covers.
use std::f32::consts::TAU;

use glam::Vec2;
use rand::RngCore;
use tracing::{debug, warn};

use crate::geometry::{is_point_in_polygon, polygon_bounds, Bounds};
use crate::random;

/// Number of candidate points drawn for every region.
pub const ATTEMPTS: usize = 3000;

/// Floor for light intensity; no shape is left fully unlit.
pub const MIN_LIGHT_INTENSITY: f32 = 0.2;

/// Stroke width range in pixels.
pub const STROKE_WIDTH_RANGE: (f32, f32) = (1.0, 3.0);

/// The kind of shape emitted for the whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Triangle,
    Circle,
}

impl ShapeKind {
    /// Single draw: above 0.5 paints triangles, otherwise circles.
    pub fn choose(rng: &mut dyn RngCore) -> Self {
        if random::rand01(rng) > 0.5 {
            ShapeKind::Triangle
        } else {
            ShapeKind::Circle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
        }
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" | "triangles" => Ok(ShapeKind::Triangle),
            "circle" | "circles" => Ok(ShapeKind::Circle),
            _ => Err(format!(
                "unknown shape kind '{s}', expected 'triangle' or 'circle'"
            )),
        }
    }
}

/// A single emitted shape with its lighting attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle {
        vertices: [Vec2; 3],
        height: f32,
        light_intensity: f32,
        stroke_width: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        height: f32,
        light_intensity: f32,
        stroke_width: f32,
    },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Triangle { .. } => ShapeKind::Triangle,
            Shape::Circle { .. } => ShapeKind::Circle,
        }
    }

    /// Proximity to the region's bounding-box center, 1 at the center.
    pub fn height(&self) -> f32 {
        match self {
            Shape::Triangle { height, .. } | Shape::Circle { height, .. } => *height,
        }
    }

    /// Proximity to the light source, in [0.2, 1].
    pub fn light_intensity(&self) -> f32 {
        match self {
            Shape::Triangle {
                light_intensity, ..
            }
            | Shape::Circle {
                light_intensity, ..
            } => *light_intensity,
        }
    }

    pub fn stroke_width(&self) -> f32 {
        match self {
            Shape::Triangle { stroke_width, .. } | Shape::Circle { stroke_width, .. } => {
                *stroke_width
            }
        }
    }

    /// The sampled anchor point: the circle center or the triangle centroid.
    pub fn anchor(&self) -> Vec2 {
        match self {
            Shape::Triangle { vertices, .. } => (vertices[0] + vertices[1] + vertices[2]) / 3.0,
            Shape::Circle { center, .. } => *center,
        }
    }
}

/// Size configuration for filling one region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSettings {
    /// Requested shape count. Carried for configuration parity; the fill loop
    /// always runs [`ATTEMPTS`] attempts.
    pub num_shapes: usize,
    /// Smallest shape diameter in pixels.
    pub min_size: f32,
    /// Largest shape diameter in pixels.
    pub max_size: f32,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            num_shapes: ATTEMPTS,
            min_size: 30.0,
            max_size: 120.0,
        }
    }
}

impl FillSettings {
    /// Larger shapes used for the full-canvas background region.
    pub fn background() -> Self {
        Self {
            num_shapes: 2000,
            min_size: 40.0,
            max_size: 150.0,
        }
    }

    pub fn with_size_range(mut self, min_size: f32, max_size: f32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    pub fn with_num_shapes(mut self, num_shapes: usize) -> Self {
        self.num_shapes = num_shapes;
        self
    }
}

/// Absolute position of the single light source for a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub position: Vec2,
}

impl LightSource {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    /// Place the light at `(x_ratio * width, y_ratio * height)`.
    pub fn from_ratios(x_ratio: f32, y_ratio: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(width * x_ratio, height * y_ratio))
    }
}

/// Shapes emitted for one region along with attempt bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct FillResult {
    pub shapes: Vec<Shape>,
    /// Candidate points drawn.
    pub attempts: usize,
    /// Candidate points that fell outside the polygon.
    pub rejected: usize,
}

/// Height of a point: 1 at the bounds center, falling to 0 at the bounds corners.
pub fn height_at(point: Vec2, bounds: &Bounds) -> f32 {
    1.0 - point.distance(bounds.center()) / bounds.half_diagonal()
}

/// Light intensity of a point, clamped to [0.2, 1].
pub fn light_intensity_at(point: Vec2, light: &LightSource, bounds: &Bounds) -> f32 {
    let reach = bounds.half_diagonal() * 2.0;
    (1.0 - point.distance(light.position) / reach).clamp(MIN_LIGHT_INTENSITY, 1.0)
}

/// Fill `polygon` using the standard [`ATTEMPTS`] loop bound.
pub fn fill_polygon(
    polygon: &[Vec2],
    light: &LightSource,
    kind: ShapeKind,
    settings: &FillSettings,
    rng: &mut dyn RngCore,
) -> FillResult {
    if settings.num_shapes != ATTEMPTS {
        debug!(
            "Requested {} shapes; fill loop runs {} attempts.",
            settings.num_shapes, ATTEMPTS
        );
    }
    fill_polygon_with_attempts(polygon, light, kind, settings, ATTEMPTS, rng)
}

/// Fill `polygon` with an explicit attempt count.
pub fn fill_polygon_with_attempts(
    polygon: &[Vec2],
    light: &LightSource,
    kind: ShapeKind,
    settings: &FillSettings,
    attempts: usize,
    rng: &mut dyn RngCore,
) -> FillResult {
    let bounds = polygon_bounds(polygon);
    if bounds.is_degenerate() {
        warn!(
            "Polygon with {} points has degenerate bounds; emitting no shapes.",
            polygon.len()
        );
        return FillResult::default();
    }

    let mut shapes = Vec::new();
    let mut rejected = 0;

    for _ in 0..attempts {
        let x = random::range(rng, bounds.min_x, bounds.max_x);
        let y = random::range(rng, bounds.min_y, bounds.max_y);
        let point = Vec2::new(x, y);

        if !is_point_in_polygon(point, polygon) {
            rejected += 1;
            continue;
        }

        let size = random::range(rng, settings.min_size, settings.max_size);
        let rotation = random::range(rng, 0.0, TAU);

        let height = height_at(point, &bounds);
        let light_intensity = light_intensity_at(point, light, &bounds);

        let radius = size / 2.0;
        let shape = match kind {
            ShapeKind::Triangle => {
                let vertices = std::array::from_fn(|j| {
                    let angle = rotation + j as f32 * TAU / 3.0;
                    point + Vec2::new(angle.cos(), angle.sin()) * radius
                });
                Shape::Triangle {
                    vertices,
                    height,
                    light_intensity,
                    stroke_width: random::range(rng, STROKE_WIDTH_RANGE.0, STROKE_WIDTH_RANGE.1),
                }
            }
            ShapeKind::Circle => Shape::Circle {
                center: point,
                radius,
                height,
                light_intensity,
                stroke_width: random::range(rng, STROKE_WIDTH_RANGE.0, STROKE_WIDTH_RANGE.1),
            },
        };
        shapes.push(shape);
    }

    FillResult {
        shapes,
        attempts,
        rejected,
    }
}
