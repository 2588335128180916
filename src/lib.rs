//! brain-icon: procedural macOS app icon generator
//!
//! This crate draws a stylized brain glyph on a rounded-square background at
//! any pixel size, writes the images into an asset-catalog icon-set with its
//! `Contents.json`, and packages them into an `.icns` bundle through an
//! external compiler such as `iconutil`.
//!
//! # Example
//!
//! ```
//! use brain_icon::{IconRenderer, IconTheme};
//!
//! let mut renderer = IconRenderer::new(IconTheme::default());
//! let icon = renderer.render(128).unwrap();
//!
//! // corners are cut away, the middle is painted
//! assert!(icon.is_transparent_at(0, 0));
//! assert!(!icon.is_transparent_at(64, 64));
//! ```
//!
//! # Icon-sets
//!
//! ```no_run
//! use brain_icon::{IconRenderer, IconSetWriter, Iconutil, package_icns};
//! use std::path::Path;
//!
//! let mut renderer = IconRenderer::default();
//! let report = IconSetWriter::default()
//!     .write(&mut renderer, Path::new("AppIcon.appiconset"))
//!     .unwrap();
//!
//! let outcome = package_icns(&report, &Iconutil::default(), Path::new("App.icns"), "App").unwrap();
//! if !outcome.success {
//!     eprintln!("{}", outcome.diagnostics);
//! }
//! ```

mod compiler;
mod error;
mod icon;
mod iconset;
pub mod layer;
mod renderer;
mod theme;

pub use compiler::{CompileOutcome, IconCompiler, Iconutil, package_icns, stage_iconset};
pub use error::{Error, Result};
pub use icon::{IconImage, RectPx, SizePx};
pub use iconset::{
    IconSetPlan, IconSetReport, IconSetWriter, IconVariant, MAC_SLOTS, MANIFEST_FILE, Manifest,
    ManifestImage, ManifestInfo, STANDARD_EDGES, Scale,
};
pub use layer::{LayerPipeline, MAX_EDGE, MIN_EDGE};
pub use renderer::{CacheKey, IconRenderer, render_icon};
pub use theme::{ACCENT, DEFAULT_CORNER_RADIUS, IconTheme, WHITE, parse_hex, to_hex};
