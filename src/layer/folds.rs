//! Folds layer: the central fissure and the sulci arcs.

use palette::Srgb;

use super::geometry::Hemisphere;
use super::{LayerEffect, RenderContext, shapes};

/// Strokes the decorative lines across the glyph.
///
/// Uses the background color, so each stroke reads as a gap in the glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldsLayer {
    pub color: Srgb<u8>,
}

impl FoldsLayer {
    pub fn new(color: Srgb<u8>) -> Self {
        Self { color }
    }
}

impl LayerEffect for FoldsLayer {
    fn name(&self) -> &'static str {
        "folds"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let g = ctx.geometry;
        let width = g.stroke_width as f32;

        let (from, to) = g.fissure();
        if let Some(path) = shapes::line(from, to) {
            shapes::stroke(&mut ctx.canvas, &path, self.color, width);
        }

        for side in [Hemisphere::Left, Hemisphere::Right] {
            for bounds in g.folds(side) {
                if let Some(path) = shapes::lower_half_arc(bounds) {
                    shapes::stroke(&mut ctx.canvas, &path, self.color, width);
                }
            }
        }
    }
}
