//! Asset-catalog icon-set generation.
//!
//! Writes every variant of the [`IconSetPlan`] as a PNG into an
//! `AppIcon.appiconset` directory together with the `Contents.json`
//! manifest Xcode reads:
//!
//! ```json
//! {
//!   "images": [
//!     { "filename": "icon_16x16.png", "idiom": "mac", "scale": "1x", "size": "16x16" },
//!     ...
//!   ],
//!   "info": { "author": "xcode", "version": 1 }
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::renderer::IconRenderer;

/// Nominal edges rendered by [`IconSetPlan::standard`].
pub const STANDARD_EDGES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Largest nominal edge that also gets an @2x variant.
pub const MAX_RETINA_EDGE: u32 = 512;

/// Nominal edges with a slot in a macOS app icon-set.
pub const MAC_SLOTS: [u32; 5] = [16, 32, 128, 256, 512];

/// Name of the manifest file inside the icon-set directory.
pub const MANIFEST_FILE: &str = "Contents.json";

// ============================================================================
// Variants
// ============================================================================

/// Pixel density of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    #[serde(rename = "1x")]
    One,
    #[serde(rename = "2x")]
    Two,
}

impl Scale {
    pub fn factor(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// One image of an icon-set: a nominal edge at a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconVariant {
    /// Nominal (point) edge.
    pub edge: u32,
    pub scale: Scale,
}

impl IconVariant {
    pub fn new(edge: u32, scale: Scale) -> Self {
        Self { edge, scale }
    }

    /// Edge of the rendered image in pixels, saturating at `u32::MAX`.
    pub fn pixel_edge(&self) -> u32 {
        self.edge.saturating_mul(self.scale.factor())
    }

    /// `icon_{N}x{N}.png` or `icon_{N}x{N}@2x.png`.
    pub fn filename(&self) -> String {
        match self.scale {
            Scale::One => format!("icon_{0}x{0}.png", self.edge),
            Scale::Two => format!("icon_{0}x{0}@2x.png", self.edge),
        }
    }

    /// `{N}x{N}`, as used in the manifest.
    pub fn size_label(&self) -> String {
        format!("{0}x{0}", self.edge)
    }
}

// ============================================================================
// Plan
// ============================================================================

/// The ordered list of variants to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSetPlan {
    variants: Vec<IconVariant>,
}

impl Default for IconSetPlan {
    fn default() -> Self {
        Self::standard()
    }
}

impl IconSetPlan {
    /// 1x for every edge in `edges`, plus 2x for edges up to 512.
    pub fn from_edges(edges: &[u32]) -> Self {
        let variants = edges
            .iter()
            .flat_map(|&edge| Self::variants_for(edge))
            .collect();
        Self { variants }
    }

    /// The plan for [`STANDARD_EDGES`]: fourteen images.
    pub fn standard() -> Self {
        Self::from_edges(&STANDARD_EDGES)
    }

    /// The variants rendered for one nominal edge.
    pub fn variants_for(edge: u32) -> Vec<IconVariant> {
        let mut variants = vec![IconVariant::new(edge, Scale::One)];
        if edge <= MAX_RETINA_EDGE {
            variants.push(IconVariant::new(edge, Scale::Two));
        }
        variants
    }

    pub fn variants(&self) -> &[IconVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

// ============================================================================
// Manifest
// ============================================================================

/// One entry of `Contents.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestImage {
    pub filename: String,
    pub idiom: String,
    pub scale: Scale,
    pub size: String,
}

impl ManifestImage {
    pub fn for_variant(variant: &IconVariant) -> Self {
        Self {
            filename: variant.filename(),
            idiom: "mac".to_string(),
            scale: variant.scale,
            size: variant.size_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

/// The `Contents.json` of an app icon-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ManifestImage>,
    #[serde(default)]
    pub info: ManifestInfo,
}

impl Manifest {
    /// Lists the variants of `plan` that have a macOS slot.
    ///
    /// Variants outside [`MAC_SLOTS`] (64 and 1024 in the standard plan) are
    /// rendered but not listed.
    pub fn for_plan(plan: &IconSetPlan) -> Self {
        let images = plan
            .variants()
            .iter()
            .filter(|v| MAC_SLOTS.contains(&v.edge))
            .map(ManifestImage::for_variant)
            .collect();
        Self {
            images,
            info: ManifestInfo::default(),
        }
    }

    /// Filenames referenced by the manifest, in order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.filename.as_str())
    }

    /// Serializes with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Writer
// ============================================================================

/// What [`IconSetWriter::write`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSetReport {
    /// The icon-set directory.
    pub dir: PathBuf,
    /// Every PNG written, in plan order.
    pub images: Vec<PathBuf>,
    /// Path of `Contents.json`.
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

impl IconSetReport {
    /// Paths of the PNGs listed in the manifest.
    pub fn manifest_images(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.manifest.filenames().map(|name| self.dir.join(name))
    }
}

/// Renders a plan into an icon-set directory.
#[derive(Debug, Clone, Default)]
pub struct IconSetWriter {
    plan: IconSetPlan,
}

impl IconSetWriter {
    pub fn new(plan: IconSetPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &IconSetPlan {
        &self.plan
    }

    /// Creates `dir`, writes every variant as PNG, then writes the manifest.
    ///
    /// Existing files with the same names are overwritten.
    pub fn write(&self, renderer: &mut IconRenderer, dir: &Path) -> Result<IconSetReport> {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        let mut images = Vec::with_capacity(self.plan.len());
        for variant in self.plan.variants() {
            let icon = renderer.render_scaled(variant.pixel_edge(), variant.scale.factor() as f32)?;
            let path = dir.join(variant.filename());
            icon.data
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|source| Error::Image {
                    path: path.clone(),
                    source,
                })?;

            let edge = variant.pixel_edge();
            tracing::info!("created {edge}x{edge} icon: {}", path.display());
            tracing::debug!(
                logical = ?icon.logical_size(),
                content = ?icon.content_bounds,
                "{}",
                variant.filename()
            );
            images.push(path);
        }

        let manifest = Manifest::for_plan(&self.plan);
        let manifest_path = dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, manifest.to_json_pretty()?)
            .map_err(|e| Error::io(&manifest_path, e))?;
        tracing::info!("updated {}", manifest_path.display());

        Ok(IconSetReport {
            dir: dir.to_path_buf(),
            images,
            manifest_path,
            manifest,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
