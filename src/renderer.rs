//! Icon renderer with a per-edge cache.

use std::collections::HashMap;

use crate::error::Result;
use crate::icon::IconImage;
use crate::layer::LayerPipeline;
use crate::theme::IconTheme;

/// Renders one icon without caching.
///
/// The output is fully determined by `edge` and `theme`.
pub fn render_icon(edge: u32, theme: &IconTheme) -> Result<IconImage> {
    LayerPipeline::from_theme(theme).render(edge)
}

// ============================================================================
// CacheKey
// ============================================================================

/// Key for cached renders.
///
/// Renders depend only on the pixel edge; the display scale is applied to a
/// copy on the way out, so a 32px image serves both `32x32` and `16x16@2x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    edge: u32,
}

impl CacheKey {
    pub fn new(edge: u32) -> Self {
        Self { edge }
    }
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders the brain icon at arbitrary edges for one theme.
///
/// # Example
///
/// ```
/// use brain_icon::{IconRenderer, IconTheme};
///
/// let mut renderer = IconRenderer::new(IconTheme::default());
/// let icon = renderer.render(64).unwrap();
/// assert_eq!(icon.dimensions().width, 64);
/// ```
pub struct IconRenderer {
    theme: IconTheme,
    pipeline: LayerPipeline,
    cache: HashMap<CacheKey, IconImage>,
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new(IconTheme::default())
    }
}

impl IconRenderer {
    pub fn new(theme: IconTheme) -> Self {
        Self {
            pipeline: LayerPipeline::from_theme(&theme),
            theme,
            cache: HashMap::new(),
        }
    }

    pub fn theme(&self) -> &IconTheme {
        &self.theme
    }

    /// Replaces the theme. Returns true if it changed.
    ///
    /// Clears the cache only when the new theme renders differently.
    pub fn set_theme(&mut self, theme: IconTheme) -> bool {
        if !self.theme.differs_from(&theme) {
            return false;
        }
        self.theme = theme;
        self.pipeline = LayerPipeline::from_theme(&theme);
        self.cache.clear();
        true
    }

    /// Renders an `edge x edge` icon at 1x scale.
    pub fn render(&mut self, edge: u32) -> Result<IconImage> {
        self.render_scaled(edge, 1.0)
    }

    /// Renders an `edge x edge` icon tagged with a display scale.
    pub fn render_scaled(&mut self, edge: u32, scale: f32) -> Result<IconImage> {
        let key = CacheKey::new(edge);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(edge, "render cache hit");
            return Ok(cached.clone().with_scale(scale));
        }

        let image = self.pipeline.render(edge)?;
        self.cache.insert(key, image.clone());
        Ok(image.with_scale(scale))
    }

    /// Number of cached renders.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Clears the render cache. Useful for freeing memory.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use palette::Srgb;

    const EDGES: [u32; 11] = [16, 32, 64, 128, 256, 512, 1024, 17, 33, 100, 101];

    #[test]
    fn renders_exact_square_sizes() {
        let mut renderer = IconRenderer::default();
        for edge in EDGES {
            let icon = renderer.render(edge).unwrap();
            assert_eq!(icon.dimensions().width, edge);
            assert_eq!(icon.dimensions().height, edge);
        }
    }

    #[test]
    fn corners_transparent_center_opaque() {
        let mut renderer = IconRenderer::default();
        for edge in EDGES {
            let icon = renderer.render(edge).unwrap();
            let last = edge - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert!(icon.is_transparent_at(x, y), "{edge}px corner ({x}, {y})");
            }
            assert!(!icon.is_transparent_at(edge / 2, edge / 2), "{edge}px center");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let theme = IconTheme::default();
        let a = render_icon(128, &theme).unwrap();
        let b = render_icon(128, &theme).unwrap();
        assert_eq!(a.data.as_raw(), b.data.as_raw());
    }

    #[test]
    fn cached_render_matches_fresh_render() {
        let mut renderer = IconRenderer::default();
        let first = renderer.render(64).unwrap();
        let second = renderer.render(64).unwrap();
        let fresh = render_icon(64, &IconTheme::default()).unwrap();

        assert_eq!(renderer.cached_len(), 1);
        assert_eq!(first, second);
        assert_eq!(first.data.as_raw(), fresh.data.as_raw());
    }

    #[test]
    fn scale_is_applied_without_rerendering() {
        let mut renderer = IconRenderer::default();
        let one = renderer.render_scaled(32, 1.0).unwrap();
        let two = renderer.render_scaled(32, 2.0).unwrap();

        assert_eq!(renderer.cached_len(), 1);
        assert_eq!(one.data, two.data);
        assert_eq!(two.logical_size(), (16.0, 16.0));
    }

    #[test]
    fn uses_both_theme_colors() {
        let mut renderer = IconRenderer::default();
        let icon = renderer.render(256).unwrap();
        let pixels: Vec<_> = icon.data.pixels().map(|p| p.0).collect();

        assert!(pixels.contains(&[217, 119, 87, 255]));
        assert!(pixels.contains(&[255, 255, 255, 255]));
        // nothing but transparent, background, or foreground
        assert!(pixels.iter().all(|p| {
            *p == [0, 0, 0, 0] || *p == [217, 119, 87, 255] || *p == [255, 255, 255, 255]
        }));
    }

    #[test]
    fn theme_change_invalidates_cache() {
        let mut renderer = IconRenderer::default();
        let before = renderer.render(64).unwrap();

        assert!(!renderer.set_theme(IconTheme::default()));
        assert_eq!(renderer.cached_len(), 1);

        let theme = IconTheme::default().with_background(Srgb::new(30, 60, 90));
        assert!(renderer.set_theme(theme));
        assert_eq!(renderer.cached_len(), 0);

        let after = renderer.render(64).unwrap();
        assert_ne!(before.data, after.data);
        // top middle is background, above the glyph
        assert_eq!(after.data.get_pixel(32, 2).0, [30, 60, 90, 255]);
    }

    #[test]
    fn tiny_edges_are_rejected() {
        let mut renderer = IconRenderer::default();
        assert!(matches!(
            renderer.render(0),
            Err(Error::InvalidSize { edge: 0, .. })
        ));
        assert!(matches!(
            renderer.render(9),
            Err(Error::InvalidSize { edge: 9, min: 10, .. })
        ));
        assert_eq!(renderer.cached_len(), 0);

        let icon = renderer.render(10).unwrap();
        assert!(icon.is_transparent_at(0, 0));
        assert!(icon.is_transparent_at(9, 9));
    }

    #[test]
    fn clear_cache_empties() {
        let mut renderer = IconRenderer::default();
        renderer.render(16).unwrap();
        renderer.render(32).unwrap();
        assert_eq!(renderer.cached_len(), 2);
        renderer.clear_cache();
        assert_eq!(renderer.cached_len(), 0);
    }
}
