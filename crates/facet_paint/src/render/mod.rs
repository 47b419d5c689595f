//! Shape renderer and the drawing-surface seam it paints through.
//!
//! [`Surface`] is a small immediate-mode 2D context in the style of an HTML
//! canvas: build a path, set styles, fill and stroke. [`draw_shapes`] turns
//! filler output into calls against it; [`raster::RasterSurface`] is the
//! concrete CPU implementation.
use std::f32::consts::TAU;

use mint::Point2;
use rand::RngCore;

use crate::color::{adjust_color, stroke_base, Hsl};
use crate::fill::Shape;

pub mod raster;

/// Immediate-mode 2D drawing context.
pub trait Surface {
    /// Canvas size in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Paint every pixel with `rgba`, ignoring the current path.
    fn fill_background(&mut self, rgba: [u8; 4]);

    /// Push the current styles.
    fn save(&mut self);
    /// Pop styles pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point2<f32>);
    fn line_to(&mut self, p: Point2<f32>);
    /// Clockwise arc from `start_angle` to `end_angle` (radians), connected to the current point.
    fn arc(&mut self, center: Point2<f32>, radius: f32, start_angle: f32, end_angle: f32);
    fn close_path(&mut self);

    fn set_fill_style(&mut self, color: Hsl);
    fn set_stroke_style(&mut self, color: Hsl);
    fn set_line_width(&mut self, width: f32);

    fn fill(&mut self);
    fn stroke(&mut self);
}

/// Paint `shapes` in order with colors derived from `base`.
///
/// Each shape is filled with a lit variation of `base` and outlined with a lit
/// variation of the darker stroke base, using the shape's own stroke width.
/// Styles are scoped per shape with save/restore.
pub fn draw_shapes<S>(surface: &mut S, shapes: &[Shape], base: Hsl, rng: &mut dyn RngCore)
where
    S: Surface + ?Sized,
{
    let outline = stroke_base(base);

    for shape in shapes {
        surface.save();
        surface.begin_path();

        match shape {
            Shape::Triangle { vertices, .. } => {
                surface.move_to(vertices[0].into());
                surface.line_to(vertices[1].into());
                surface.line_to(vertices[2].into());
            }
            Shape::Circle { center, radius, .. } => {
                surface.arc((*center).into(), *radius, 0.0, TAU);
            }
        }

        surface.close_path();

        let height = shape.height();
        let light = shape.light_intensity();

        surface.set_fill_style(adjust_color(base, height, light, rng));
        surface.fill();

        surface.set_line_width(shape.stroke_width());
        surface.set_stroke_style(adjust_color(outline, height, light, rng));
        surface.stroke();

        surface.restore();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Records every call for later inspection.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        Background([u8; 4]),
        Save,
        Restore,
        BeginPath,
        MoveTo(Vec2),
        LineTo(Vec2),
        Arc(Vec2, f32),
        ClosePath,
        FillStyle(Hsl),
        StrokeStyle(Hsl),
        LineWidth(f32),
        Fill,
        Stroke,
    }

    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn dimensions(&self) -> (u32, u32) {
            (200, 100)
        }
        fn fill_background(&mut self, rgba: [u8; 4]) {
            self.ops.push(Op::Background(rgba));
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::BeginPath);
        }
        fn move_to(&mut self, p: Point2<f32>) {
            self.ops.push(Op::MoveTo(p.into()));
        }
        fn line_to(&mut self, p: Point2<f32>) {
            self.ops.push(Op::LineTo(p.into()));
        }
        fn arc(&mut self, center: Point2<f32>, radius: f32, _start: f32, _end: f32) {
            self.ops.push(Op::Arc(center.into(), radius));
        }
        fn close_path(&mut self) {
            self.ops.push(Op::ClosePath);
        }
        fn set_fill_style(&mut self, color: Hsl) {
            self.ops.push(Op::FillStyle(color));
        }
        fn set_stroke_style(&mut self, color: Hsl) {
            self.ops.push(Op::StrokeStyle(color));
        }
        fn set_line_width(&mut self, width: f32) {
            self.ops.push(Op::LineWidth(width));
        }
        fn fill(&mut self) {
            self.ops.push(Op::Fill);
        }
        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }
    }

    fn triangle() -> Shape {
        Shape::Triangle {
            vertices: [
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(5.0, 8.0),
            ],
            height: 1.0,
            light_intensity: 1.0,
            stroke_width: 2.5,
        }
    }

    fn circle() -> Shape {
        Shape::Circle {
            center: Vec2::new(40.0, 40.0),
            radius: 12.0,
            height: 0.5,
            light_intensity: 0.2,
            stroke_width: 1.5,
        }
    }

    #[test]
    fn triangle_is_traced_filled_then_stroked() {
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(1);
        draw_shapes(
            &mut surface,
            &[triangle()],
            Hsl::new(100.0, 50.0, 60.0),
            &mut rng,
        );

        let kinds: Vec<_> = surface
            .ops
            .iter()
            .map(|op| std::mem::discriminant(op))
            .collect();
        let expected = [
            Op::Save,
            Op::BeginPath,
            Op::MoveTo(Vec2::ZERO),
            Op::LineTo(Vec2::ZERO),
            Op::LineTo(Vec2::ZERO),
            Op::ClosePath,
            Op::FillStyle(Hsl::new(0.0, 0.0, 0.0)),
            Op::Fill,
            Op::LineWidth(0.0),
            Op::StrokeStyle(Hsl::new(0.0, 0.0, 0.0)),
            Op::Stroke,
            Op::Restore,
        ]
        .iter()
        .map(std::mem::discriminant)
        .collect::<Vec<_>>();
        assert_eq!(kinds, expected);

        assert_eq!(surface.ops[2], Op::MoveTo(Vec2::new(0.0, 0.0)));
        assert_eq!(surface.ops[4], Op::LineTo(Vec2::new(5.0, 8.0)));
        assert_eq!(surface.ops[8], Op::LineWidth(2.5));
    }

    #[test]
    fn circle_uses_full_arc_and_darker_stroke() {
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(2);
        let base = Hsl::new(200.0, 40.0, 70.0);
        draw_shapes(&mut surface, &[circle()], base, &mut rng);

        assert_eq!(surface.ops[2], Op::Arc(Vec2::new(40.0, 40.0), 12.0));

        let fill_l = surface
            .ops
            .iter()
            .find_map(|op| match op {
                Op::FillStyle(c) => Some(c.l),
                _ => None,
            })
            .unwrap();
        let stroke_l = surface
            .ops
            .iter()
            .find_map(|op| match op {
                Op::StrokeStyle(c) => Some(c.l),
                _ => None,
            })
            .unwrap();
        // height 0.5 -> 0.65, light 0.2 -> 0.6
        assert!((fill_l - 70.0 * 0.65 * 0.6).abs() < 1e-3);
        assert!((stroke_l - 50.0 * 0.65 * 0.6).abs() < 1e-3);
    }

    #[test]
    fn every_style_draws_its_own_jitter() {
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(4);
        let base = Hsl::new(120.0, 50.0, 60.0);
        draw_shapes(&mut surface, &[triangle(), triangle()], base, &mut rng);

        let fills: Vec<Hsl> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::FillStyle(c) => Some(*c),
                _ => None,
            })
            .collect();
        let strokes: Vec<Hsl> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::StrokeStyle(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!((fills.len(), strokes.len()), (2, 2));

        // Identical shapes still get distinct colors.
        assert_ne!((fills[0].h, fills[0].s), (fills[1].h, fills[1].s));
        assert_ne!((strokes[0].h, strokes[0].s), (strokes[1].h, strokes[1].s));

        // Fill and outline of one shape jitter independently.
        let outline = stroke_base(base);
        for (fill, stroke) in fills.iter().zip(&strokes) {
            let fill_offset = (fill.h - base.h, fill.s - base.s);
            let stroke_offset = (stroke.h - outline.h, stroke.s - outline.s);
            assert_ne!(fill_offset, stroke_offset);
        }
    }

    #[test]
    fn shapes_paint_in_emission_order() {
        let mut surface = RecordingSurface::default();
        let mut rng = StdRng::seed_from_u64(3);
        draw_shapes(
            &mut surface,
            &[circle(), triangle(), circle()],
            Hsl::new(0.0, 0.0, 50.0),
            &mut rng,
        );

        let path_starts: Vec<_> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Arc(..) | Op::MoveTo(_)))
            .collect();
        assert_eq!(path_starts.len(), 3);
        assert!(matches!(path_starts[0], Op::Arc(..)));
        assert!(matches!(path_starts[1], Op::MoveTo(_)));
        assert!(matches!(path_starts[2], Op::Arc(..)));

        let saves = surface.ops.iter().filter(|op| **op == Op::Save).count();
        let restores = surface.ops.iter().filter(|op| **op == Op::Restore).count();
        assert_eq!((saves, restores), (3, 3));
    }
}
