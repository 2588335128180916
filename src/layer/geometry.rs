//! Glyph layout derived from the icon edge.
//!
//! All measurements come from a single scale factor `s = edge / 100`. Each
//! `k * s` term is truncated toward zero before use, so small icons snap to
//! whole pixels the same way at every size.

use crate::icon::RectPx;

/// Relative vertical positions of the three folds in each hemisphere.
pub const FOLD_OFFSETS: [f64; 3] = [0.25, 0.5, 0.7];

/// An axis-aligned box in canvas coordinates, used as an ellipse bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Which side of the central fissure a fold belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    Left,
    Right,
}

/// Every length needed to draw the brain glyph at one edge size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphGeometry {
    pub edge: u32,
    /// `edge / 100`.
    pub scale: f64,
    pub cx: f64,
    pub cy: f64,
    /// Horizontal inset of the hemispheres from each canvas side.
    pub padding: f64,
    pub width: f64,
    pub height: f64,
    /// Top edge of the hemispheres.
    pub top: f64,
    /// How far each hemisphere crosses the vertical center line.
    pub overlap: f64,
    pub stroke_width: f64,
}

/// `int(k * s)` for positive `k * s`.
fn trunc(value: f64) -> f64 {
    value.trunc()
}

impl GlyphGeometry {
    pub fn new(edge: u32) -> Self {
        let size = f64::from(edge);
        let s = size / 100.0;
        let padding = trunc(20.0 * s);
        let width = size - padding * 2.0;
        let height = trunc(width * 0.85);
        let cx = size / 2.0;
        let cy = size / 2.0;
        let top = cy - (height / 2.0).floor() + trunc(5.0 * s);

        Self {
            edge,
            scale: s,
            cx,
            cy,
            padding,
            width,
            height,
            top,
            overlap: trunc(5.0 * s),
            stroke_width: trunc(2.0 * s).max(1.0),
        }
    }

    /// Bottom edge of the hemispheres.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn units(&self, k: f64) -> f64 {
        trunc(k * self.scale)
    }

    /// Radius of the rounded background square.
    pub fn corner_radius(&self, ratio: f32) -> f32 {
        trunc(f64::from(self.edge) * f64::from(ratio)) as f32
    }

    pub fn left_hemisphere(&self) -> Bounds {
        bounds(self.padding, self.top, self.cx + self.overlap, self.bottom())
    }

    pub fn right_hemisphere(&self) -> Bounds {
        bounds(
            self.cx - self.overlap,
            self.top,
            f64::from(self.edge) - self.padding,
            self.bottom(),
        )
    }

    /// The stem hangs below the hemispheres, overlapping them slightly.
    pub fn stem(&self) -> Bounds {
        let half_width = (self.units(12.0) / 2.0).floor();
        bounds(
            self.cx - half_width,
            self.bottom() - self.units(10.0),
            self.cx + half_width,
            self.bottom() + self.units(15.0),
        )
    }

    /// Start and end points of the central fissure.
    pub fn fissure(&self) -> ((f32, f32), (f32, f32)) {
        let x = self.cx as f32;
        (
            (x, (self.top + self.units(10.0)) as f32),
            (x, (self.bottom() - self.units(15.0)) as f32),
        )
    }

    /// Bounding boxes of the fold arcs on one hemisphere, top to bottom.
    pub fn folds(&self, side: Hemisphere) -> [Bounds; 3] {
        let (left, right) = match side {
            Hemisphere::Left => (self.padding + self.overlap, self.cx - self.overlap),
            Hemisphere::Right => (
                self.cx + self.overlap,
                f64::from(self.edge) - self.padding - self.overlap,
            ),
        };
        let band = self.units(10.0);

        FOLD_OFFSETS.map(|offset| {
            let y = self.top + trunc(self.height * offset);
            bounds(left, y - band, right, y + band)
        })
    }

    /// The glyph's hemisphere region in whole pixels.
    pub fn content_bounds(&self) -> RectPx {
        RectPx::new(
            self.padding as u32,
            self.top.max(0.0) as u32,
            self.width as u32,
            self.height as u32,
        )
    }
}

fn bounds(left: f64, top: f64, right: f64, bottom: f64) -> Bounds {
    Bounds::new(left as f32, top as f32, right as f32, bottom as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_at_100() {
        let g = GlyphGeometry::new(100);
        assert_eq!(g.scale, 1.0);
        assert_eq!(g.padding, 20.0);
        assert_eq!(g.width, 60.0);
        assert_eq!(g.height, 51.0);
        // 50 - 25 + 5
        assert_eq!(g.top, 30.0);
        assert_eq!(g.overlap, 5.0);
        assert_eq!(g.stroke_width, 2.0);

        assert_eq!(g.left_hemisphere(), Bounds::new(20.0, 30.0, 55.0, 81.0));
        assert_eq!(g.right_hemisphere(), Bounds::new(45.0, 30.0, 80.0, 81.0));
        assert_eq!(g.stem(), Bounds::new(44.0, 71.0, 56.0, 96.0));
        assert_eq!(g.fissure(), ((50.0, 40.0), (50.0, 66.0)));
    }

    #[test]
    fn folds_sit_inside_their_hemisphere() {
        let g = GlyphGeometry::new(512);
        for (side, hemi) in [
            (Hemisphere::Left, g.left_hemisphere()),
            (Hemisphere::Right, g.right_hemisphere()),
        ] {
            let folds = g.folds(side);
            for fold in folds {
                assert!(fold.left >= hemi.left && fold.right <= hemi.right);
                assert!(fold.height() > 0.0);
            }
            assert!(folds[0].top < folds[1].top && folds[1].top < folds[2].top);
        }
    }

    #[test]
    fn small_edges_keep_a_visible_stroke() {
        let g = GlyphGeometry::new(16);
        assert_eq!(g.stroke_width, 1.0);
        assert_eq!(g.overlap, 0.0);
        assert_eq!(g.padding, 3.0);
    }

    #[test]
    fn corner_radius_truncates() {
        assert_eq!(GlyphGeometry::new(16).corner_radius(0.22), 3.0);
        assert_eq!(GlyphGeometry::new(1024).corner_radius(0.22), 225.0);
    }

    #[test]
    fn content_bounds_cover_hemispheres() {
        let g = GlyphGeometry::new(100);
        assert_eq!(g.content_bounds(), RectPx::new(20, 30, 60, 51));
    }
}
