//! Polygon helpers: bounds, containment and coordinate conversion.
//!
//! Polygons are ordered vertex lists that close implicitly (the last vertex
//! connects back to the first).
use glam::Vec2;

use crate::error::{Error, Result};

/// Axis-aligned bounding box of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Center of the box.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Half the length of the box diagonal.
    pub fn half_diagonal(&self) -> f32 {
        Vec2::new(self.width(), self.height()).length() / 2.0
    }

    /// True when the box has no area to sample from (or is not finite).
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0) || !self.half_diagonal().is_finite()
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Compute the bounding box of `polygon` in a single pass.
///
/// An empty polygon yields an inverted box (min at +inf, max at -inf) which
/// reports itself as degenerate.
pub fn polygon_bounds(polygon: &[Vec2]) -> Bounds {
    polygon.iter().fold(
        Bounds {
            min_x: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            min_y: f32::INFINITY,
            max_y: f32::NEG_INFINITY,
        },
        |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        },
    )
}

/// Even-odd ray casting test.
///
/// A horizontal ray is cast towards +x. An edge counts when exactly one of its
/// endpoints lies strictly above the point's y, so shared vertices are counted
/// once and horizontal edges never count. Points on a left edge report inside,
/// points on a right edge report outside.
pub fn is_point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Scale relative `[0, 1]` coordinate pairs onto a `width` x `height` canvas.
pub fn to_absolute(points: &[[f32; 2]], width: f32, height: f32) -> Vec<Vec2> {
    points
        .iter()
        .map(|&[x, y]| Vec2::new(x * width, y * height))
        .collect()
}

/// Reject polygons that cannot bound a region: fewer than 3 vertices or non-finite coordinates.
pub fn validate_polygon(name: &str, polygon: &[[f32; 2]]) -> Result<()> {
    if polygon.len() < 3 {
        return Err(Error::InvalidPolygon {
            name: name.into(),
            reason: format!("needs at least 3 points, got {}", polygon.len()),
        });
    }
    if let Some(idx) = polygon
        .iter()
        .position(|[x, y]| !x.is_finite() || !y.is_finite())
    {
        return Err(Error::InvalidPolygon {
            name: name.into(),
            reason: format!("point {idx} is not finite"),
        });
    }
    Ok(())
}
