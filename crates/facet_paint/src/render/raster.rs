//! CPU raster surface backed by `vello_cpu`.
//!
//! Paths are accumulated as a `kurbo` [`BezPath`]; arcs are appended as cubic
//! segments. Fills and strokes go straight to the render context, which does
//! stroke expansion and anti-aliased coverage. The frame is resolved to an
//! [`image::RgbaImage`] on demand.
use std::f64::consts::TAU;

use image::RgbaImage;
use mint::Point2;
use vello_cpu::kurbo::{Arc, BezPath, Cap, Join, Point, Rect, Stroke, Vec2};
use vello_cpu::peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

use crate::color::Hsl;
use crate::error::{Error, Result};
use crate::render::Surface;

/// Flattening tolerance for arcs, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

/// Canvas default miter limit.
const MITER_LIMIT: f64 = 10.0;

#[derive(Debug, Clone, Copy)]
struct DrawState {
    fill: [u8; 4],
    stroke: [u8; 4],
    line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: [0, 0, 0, 255],
            stroke: [0, 0, 0, 255],
            line_width: 1.0,
        }
    }
}

/// A [`Surface`] that rasterizes on the CPU.
pub struct RasterSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
    state: DrawState,
    saved: Vec<DrawState>,
    path: BezPath,
    /// Current point of the open subpath.
    current: Option<Point>,
    /// Start of the open subpath.
    subpath_start: Option<Point>,
    /// Start of the last closed subpath; the next segment begins there.
    reopen_at: Option<Point>,
}

impl RasterSurface {
    /// Create a transparent surface of `width` x `height` pixels.
    ///
    /// Both sides must fit in `u16`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| Error::InvalidConfig(format!("surface width {width} exceeds u16")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| Error::InvalidConfig(format!("surface height {height} exceeds u16")))?;

        Ok(Self {
            ctx: RenderContext::new(w, h),
            width: w,
            height: h,
            state: DrawState::default(),
            saved: Vec::new(),
            path: BezPath::new(),
            current: None,
            subpath_start: None,
            reopen_at: None,
        })
    }

    /// Render everything drawn so far into a straight-alpha RGBA image.
    pub fn to_image(&mut self) -> Result<RgbaImage> {
        self.ctx.flush();
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);

        let mut rgba = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_in_place(&mut rgba);
        RgbaImage::from_raw(self.width.into(), self.height.into(), rgba)
            .ok_or_else(|| Error::from("rendered buffer does not match the surface size"))
    }

    pub fn into_image(mut self) -> Result<RgbaImage> {
        self.to_image()
    }

    /// Extend the open subpath to `p`, starting one if needed.
    fn connect(&mut self, p: Point) {
        if self.current.is_some() {
            self.path.line_to(p);
        } else if let Some(start) = self.reopen_at.take() {
            self.path.move_to(start);
            self.path.line_to(p);
            self.subpath_start = Some(start);
        } else {
            self.path.move_to(p);
            self.subpath_start = Some(p);
        }
        self.current = Some(p);
    }
}

fn to_point(p: Point2<f32>) -> Point {
    Point::new(p.x.into(), p.y.into())
}

fn to_color(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width.into(), self.height.into())
    }

    fn fill_background(&mut self, rgba: [u8; 4]) {
        self.ctx.set_paint(to_color(rgba));
        self.ctx.fill_rect(&Rect::new(
            0.0,
            0.0,
            self.width.into(),
            self.height.into(),
        ));
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.current = None;
        self.subpath_start = None;
        self.reopen_at = None;
    }

    fn move_to(&mut self, p: Point2<f32>) {
        let p = to_point(p);
        self.path.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
        self.reopen_at = None;
    }

    fn line_to(&mut self, p: Point2<f32>) {
        self.connect(to_point(p));
    }

    fn arc(&mut self, center: Point2<f32>, radius: f32, start_angle: f32, end_angle: f32) {
        let center = to_point(center);
        let radius = f64::from(radius);
        let start = f64::from(start_angle);
        let sweep = f64::from(end_angle - start_angle).clamp(-TAU, TAU);

        let from = center + Vec2::from_angle(start) * radius;
        self.connect(from);

        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        self.path.extend(arc.append_iter(ARC_TOLERANCE));
        self.current = Some(center + Vec2::from_angle(start + sweep) * radius);
    }

    fn close_path(&mut self) {
        if self.current.take().is_some() {
            self.path.close_path();
            self.reopen_at = self.subpath_start;
        }
    }

    fn set_fill_style(&mut self, color: Hsl) {
        self.state.fill = color.to_rgba8();
    }

    fn set_stroke_style(&mut self, color: Hsl) {
        self.state.stroke = color.to_rgba8();
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn fill(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        self.ctx.set_paint(to_color(self.state.fill));
        self.ctx.fill_path(&self.path);
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let stroke = Stroke::new(self.state.line_width.into())
            .with_join(Join::Miter)
            .with_miter_limit(MITER_LIMIT)
            .with_caps(Cap::Butt);
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(to_color(self.state.stroke));
        self.ctx.stroke_path(&self.path);
    }
}
