//! Drawing pipeline for the brain icon.
//!
//! A render owns one [`RenderContext`] holding the canvas and the glyph
//! geometry for the requested edge. The context is handed through a fixed
//! sequence of layers, each of which paints onto the same canvas:
//!
//! ```text
//! empty canvas (transparent)
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── rounded square, background color
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   Glyph    │ ◄── two hemispheres + stem, foreground color
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   Folds    │ ◄── fissure + arcs, stroked in the background color
//! └─────┬──────┘
//!       ▼
//!   IconImage
//! ```

pub mod background;
pub mod folds;
pub mod geometry;
pub mod glyph;
pub mod shapes;

pub use background::BackgroundLayer;
pub use folds::FoldsLayer;
pub use geometry::{Bounds, GlyphGeometry, Hemisphere};
pub use glyph::GlyphLayer;

use resvg::tiny_skia::Pixmap;

use crate::error::{Error, Result};
use crate::icon::IconImage;
use crate::theme::IconTheme;

/// Smallest edge the renderer accepts.
///
/// Below this the truncated corner radius drops under two pixels and the
/// corner pixels are no longer cut away.
pub const MIN_EDGE: u32 = 10;

/// Largest edge the renderer accepts.
pub const MAX_EDGE: u32 = 16384;

// ============================================================================
// Render Context
// ============================================================================

/// The canvas being drawn plus the layout it is drawn with.
pub struct RenderContext {
    /// Premultiplied RGBA canvas, transparent until the first layer runs.
    pub canvas: Pixmap,

    /// Layout for this edge.
    pub geometry: GlyphGeometry,
}

impl RenderContext {
    /// Creates a transparent square canvas.
    ///
    /// Fails for an edge below [`MIN_EDGE`] or above [`MAX_EDGE`].
    pub fn new(edge: u32) -> Result<Self> {
        let invalid = || Error::InvalidSize {
            edge,
            min: MIN_EDGE,
            max: MAX_EDGE,
        };
        if !(MIN_EDGE..=MAX_EDGE).contains(&edge) {
            return Err(invalid());
        }
        let canvas = Pixmap::new(edge, edge).ok_or_else(invalid)?;

        Ok(Self {
            canvas,
            geometry: GlyphGeometry::new(edge),
        })
    }

    /// Consumes the context and returns the finished image at 1x scale.
    pub fn finish(self) -> IconImage {
        let data = shapes::pixmap_to_rgba_image(&self.canvas);
        IconImage::new(data, 1.0, self.geometry.content_bounds())
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// One drawing step of the pipeline.
pub trait LayerEffect {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Paints onto `ctx.canvas`.
    fn transform(&self, ctx: &mut RenderContext);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The three layers of the icon, configured from an [`IconTheme`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPipeline {
    pub background: BackgroundLayer,
    pub glyph: GlyphLayer,
    pub folds: FoldsLayer,
}

impl Default for LayerPipeline {
    fn default() -> Self {
        Self::from_theme(&IconTheme::default())
    }
}

impl LayerPipeline {
    /// Builds the pipeline for a theme.
    ///
    /// The folds are cut with the background color so they read as gaps in
    /// the glyph.
    pub fn from_theme(theme: &IconTheme) -> Self {
        Self {
            background: BackgroundLayer::new(theme.background, theme.corner_radius),
            glyph: GlyphLayer::new(theme.foreground),
            folds: FoldsLayer::new(theme.background),
        }
    }

    fn layers(&self) -> [&dyn LayerEffect; 3] {
        [&self.background, &self.glyph, &self.folds]
    }

    /// Renders a fresh icon of the given edge.
    pub fn render(&self, edge: u32) -> Result<IconImage> {
        let mut ctx = RenderContext::new(edge)?;
        tracing::debug!(edge, geometry = ?ctx.geometry, "rendering icon");

        for layer in self.layers() {
            tracing::trace!(edge, layer = layer.name(), "applying layer");
            layer.transform(&mut ctx);
        }

        Ok(ctx.finish())
    }
}

// ============================================================================
// Tests
// ============================================================================
