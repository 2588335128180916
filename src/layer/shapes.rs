//! Path construction and pixmap helpers on top of tiny-skia.
//!
//! Shapes are filled and stroked without anti-aliasing: every pixel is
//! either fully inside a shape or untouched, so the rounded corners stay
//! exactly transparent and renders are reproducible bit for bit.

use image::{Rgba, RgbaImage};
use palette::Srgb;
use resvg::tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use super::geometry::Bounds;

/// Cubic Bezier control distance for a quarter ellipse, relative to the radius.
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// Paths
// ============================================================================

/// Builds a rectangle with circular corners of radius `radius`.
///
/// Returns `None` for an empty rectangle.
pub fn rounded_rect(bounds: Bounds, radius: f32) -> Option<Path> {
    let radius = radius.min(bounds.width() / 2.0).min(bounds.height() / 2.0);
    if radius <= 0.0 {
        let rect = Rect::from_ltrb(bounds.left, bounds.top, bounds.right, bounds.bottom)?;
        return Some(PathBuilder::from_rect(rect));
    }

    let Bounds {
        left,
        top,
        right,
        bottom,
    } = bounds;
    let k = radius * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(left + radius, top);
    pb.line_to(right - radius, top);
    pb.cubic_to(right - radius + k, top, right, top + radius - k, right, top + radius);
    pb.line_to(right, bottom - radius);
    pb.cubic_to(
        right,
        bottom - radius + k,
        right - radius + k,
        bottom,
        right - radius,
        bottom,
    );
    pb.line_to(left + radius, bottom);
    pb.cubic_to(left + radius - k, bottom, left, bottom - radius + k, left, bottom - radius);
    pb.line_to(left, top + radius);
    pb.cubic_to(left, top + radius - k, left + radius - k, top, left + radius, top);
    pb.close();
    pb.finish()
}

/// Builds a closed ellipse inscribed in `bounds`.
pub fn ellipse(bounds: Bounds) -> Option<Path> {
    let rect = Rect::from_ltrb(bounds.left, bounds.top, bounds.right, bounds.bottom)?;
    PathBuilder::from_oval(rect)
}

/// Builds the lower half of the ellipse inscribed in `bounds`, running from
/// its rightmost point through the bottom to its leftmost point.
pub fn lower_half_arc(bounds: Bounds) -> Option<Path> {
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return None;
    }

    let (cx, cy) = bounds.center();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;
    let kx = rx * KAPPA;
    let ky = ry * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(cx + rx, cy);
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    pb.finish()
}

/// Builds an open straight segment.
pub fn line(from: (f32, f32), to: (f32, f32)) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    pb.finish()
}

// ============================================================================
// Painting
// ============================================================================

fn solid_paint(color: Srgb<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, 255);
    paint.anti_alias = false;
    paint
}

/// Fills `path` with an opaque color.
pub fn fill(pixmap: &mut Pixmap, path: &Path, color: Srgb<u8>) {
    pixmap.fill_path(
        path,
        &solid_paint(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

/// Strokes `path` with an opaque color and butt caps.
pub fn stroke(pixmap: &mut Pixmap, path: &Path, color: Srgb<u8>, width: f32) {
    let stroke = Stroke {
        width,
        line_cap: LineCap::Butt,
        ..Stroke::default()
    };
    pixmap.stroke_path(path, &solid_paint(color), &stroke, Transform::identity(), None);
}

// ============================================================================
// Conversion
// ============================================================================

/// Converts a tiny-skia Pixmap to an image::RgbaImage.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let i = i as u32;
        // tiny-skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(i % width, i / width, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Srgb<u8> = Srgb::new(255, 0, 0);

    fn alpha(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn rounded_rect_leaves_corners_empty() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let path = rounded_rect(Bounds::new(0.0, 0.0, 20.0, 20.0), 5.0).unwrap();
        fill(&mut pixmap, &path, RED);

        for (x, y) in [(0, 0), (19, 0), (0, 19), (19, 19)] {
            assert_eq!(alpha(&pixmap, x, y), 0, "corner ({x}, {y}) should be empty");
        }
        assert_eq!(alpha(&pixmap, 10, 10), 255);
        assert_eq!(alpha(&pixmap, 10, 0), 255);
    }

    #[test]
    fn zero_radius_is_a_plain_rect() {
        let mut pixmap = Pixmap::new(8, 8).unwrap();
        let path = rounded_rect(Bounds::new(0.0, 0.0, 8.0, 8.0), 0.0).unwrap();
        fill(&mut pixmap, &path, RED);
        assert_eq!(alpha(&pixmap, 0, 0), 255);
        assert_eq!(alpha(&pixmap, 7, 7), 255);
    }

    #[test]
    fn ellipse_fills_center_only() {
        let mut pixmap = Pixmap::new(20, 10).unwrap();
        let path = ellipse(Bounds::new(0.0, 0.0, 20.0, 10.0)).unwrap();
        fill(&mut pixmap, &path, RED);
        assert_eq!(alpha(&pixmap, 10, 5), 255);
        assert_eq!(alpha(&pixmap, 0, 0), 0);
    }

    #[test]
    fn lower_half_arc_stays_below_center() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        let path = lower_half_arc(Bounds::new(5.0, 5.0, 35.0, 35.0)).unwrap();
        stroke(&mut pixmap, &path, RED, 2.0);

        // bottom of the arc is painted, top of the ellipse is not
        assert_eq!(alpha(&pixmap, 20, 34), 255);
        assert_eq!(alpha(&pixmap, 20, 5), 0);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        assert!(lower_half_arc(Bounds::new(5.0, 5.0, 5.0, 10.0)).is_none());
        assert!(ellipse(Bounds::new(5.0, 5.0, 1.0, 10.0)).is_none());
    }

    #[test]
    fn conversion_unpremultiplies() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        let path = PathBuilder::from_rect(Rect::from_ltrb(0.0, 0.0, 1.0, 1.0).unwrap());
        fill(&mut pixmap, &path, Srgb::new(10, 20, 30));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn unpremultiply_half_alpha() {
        assert_eq!(unpremultiply(0, 0, 128, 128), (0, 0, 255, 128));
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
    }
}
