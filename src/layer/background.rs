//! Rounded-square background layer.

use palette::Srgb;

use super::geometry::Bounds;
use super::{LayerEffect, RenderContext, shapes};

/// Fills the canvas with a rounded square.
///
/// Pixels outside the rounded corners are left transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
    pub color: Srgb<u8>,

    /// Corner radius as a fraction of the edge.
    pub corner_radius: f32,
}

impl BackgroundLayer {
    pub fn new(color: Srgb<u8>, corner_radius: f32) -> Self {
        Self {
            color,
            corner_radius: corner_radius.clamp(0.0, 0.5),
        }
    }
}

impl LayerEffect for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let edge = ctx.geometry.edge as f32;
        let radius = ctx.geometry.corner_radius(self.corner_radius);

        if let Some(path) = shapes::rounded_rect(Bounds::new(0.0, 0.0, edge, edge), radius) {
            shapes::fill(&mut ctx.canvas, &path, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_center_and_keeps_corners_clear() {
        let mut ctx = RenderContext::new(32).unwrap();
        BackgroundLayer::new(Srgb::new(217, 119, 87), 0.22).transform(&mut ctx);

        let center = ctx.canvas.pixel(16, 16).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (217, 119, 87));
        assert_eq!(center.alpha(), 255);

        for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31)] {
            assert_eq!(ctx.canvas.pixel(x, y).unwrap().alpha(), 0);
        }
    }

    #[test]
    fn square_corners_without_radius() {
        let mut ctx = RenderContext::new(16).unwrap();
        BackgroundLayer::new(Srgb::new(0, 0, 0), 0.0).transform(&mut ctx);
        assert_eq!(ctx.canvas.pixel(0, 0).unwrap().alpha(), 255);
    }
}
