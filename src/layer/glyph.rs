//! Brain glyph layer: two overlapping hemispheres and a stem.

use palette::Srgb;

use super::{LayerEffect, RenderContext, shapes};

/// Paints the solid brain silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphLayer {
    pub color: Srgb<u8>,
}

impl GlyphLayer {
    pub fn new(color: Srgb<u8>) -> Self {
        Self { color }
    }
}

impl LayerEffect for GlyphLayer {
    fn name(&self) -> &'static str {
        "glyph"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let g = ctx.geometry;

        for bounds in [g.left_hemisphere(), g.right_hemisphere(), g.stem()] {
            if let Some(path) = shapes::ellipse(bounds) {
                shapes::fill(&mut ctx.canvas, &path, self.color);
            }
        }
    }
}
