//! Serializable rendering theme.
//!
//! An [`IconTheme`] holds every color and ratio the renderer needs, so no
//! drawing code reads global state. Themes round-trip through JSON with
//! colors written as `#rrggbb` hex strings:
//!
//! ```json
//! {
//!   "background": "#d97757",
//!   "foreground": "#ffffff",
//!   "cornerRadius": 0.22
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use brain_icon::IconTheme;
//! use palette::Srgb;
//!
//! let theme = IconTheme::default().with_background(Srgb::new(40, 90, 200));
//! let json = theme.to_json().unwrap();
//! let restored = IconTheme::from_json(&json).unwrap();
//! assert_eq!(restored, theme);
//! ```

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// The accent color used for the rounded background and the folds (#D97757).
pub const ACCENT: Srgb<u8> = Srgb::new(217, 119, 87);

/// The glyph color.
pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);

/// macOS-style corner radius as a fraction of the icon edge.
pub const DEFAULT_CORNER_RADIUS: f32 = 0.22;

/// Colors and proportions for a rendered icon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconTheme {
    /// Fill of the rounded square and stroke color of the folds.
    #[serde(with = "hex_color")]
    pub background: Srgb<u8>,

    /// Fill of the hemispheres and stem.
    #[serde(with = "hex_color")]
    pub foreground: Srgb<u8>,

    /// Corner radius as a fraction of the edge (0.0-0.5).
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
}

fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            background: ACCENT,
            foreground: WHITE,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

impl IconTheme {
    /// Sets the background color.
    pub fn with_background(mut self, color: Srgb<u8>) -> Self {
        self.background = color;
        self
    }

    /// Sets the foreground color.
    pub fn with_foreground(mut self, color: Srgb<u8>) -> Self {
        self.foreground = color;
        self
    }

    /// Sets the corner radius ratio. The value is clamped to 0.0-0.5.
    pub fn with_corner_radius(mut self, ratio: f32) -> Self {
        self.corner_radius = ratio.clamp(0.0, 0.5);
        self
    }

    /// Returns true if this theme would render differently from `other`.
    pub fn differs_from(&self, other: &Self) -> bool {
        self.background != other.background
            || self.foreground != other.foreground
            || (self.corner_radius - other.corner_radius).abs() > 0.0001
    }

    /// Serializes the theme to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the theme to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a theme from a JSON string.
    ///
    /// An out-of-range corner radius is clamped rather than rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let theme: Self = serde_json::from_str(json)?;
        Ok(theme.with_corner_radius(theme.corner_radius))
    }
}

/// Formats a color as `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Parses `#rrggbb` or `rrggbb` (also the 3-digit shorthand).
pub fn parse_hex(value: &str) -> Result<Srgb<u8>, crate::Error> {
    value
        .trim()
        .parse::<Srgb<u8>>()
        .map_err(|e| crate::Error::Theme(format!("bad color {value:?}: {e}")))
}

mod hex_color {
    use palette::Srgb;
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgb<u8>, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_hex(&value).map_err(D::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
