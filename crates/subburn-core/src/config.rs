//! Burn job configuration.
//!
//! [`BurnConfig`] is deserialized from JSON and carries the pinned engine
//! artifact base URL, the font location, and the subtitle style. Every field
//! defaults sensibly so a completely empty `{}` file is valid, and tests can
//! point individual fields at fixture servers.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// BurnConfig
// ---------------------------------------------------------------------------

/// Configuration for one burn orchestrator.
///
/// The defaults reproduce the production setup: a version-pinned engine core
/// served from a CDN, a `Yahei.ttf` font on the local origin, and a white
/// text / black outline subtitle style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnConfig {
    /// Base URL the engine core artifacts are fetched from. Version-pinned;
    /// the JS glue and wasm binary must come from the same build.
    pub core_base_url: String,
    /// Origin used to resolve origin-relative URLs such as the default
    /// `font_url`.
    pub origin: String,
    /// URL of the TrueType font staged for the burn filter. May be absolute
    /// or origin-relative (leading `/`).
    pub font_url: String,
    /// Directory inside the engine's virtual filesystem that the burn filter
    /// scans for fonts.
    pub fonts_dir: String,
    /// Virtual filesystem path the fetched font is written to. Must live
    /// inside `fonts_dir`.
    pub font_mount: String,
    /// Subtitle rendering style forced onto the burned text.
    pub style: SubtitleStyle,
}

impl Default for BurnConfig {
    fn default() -> Self {
        Self {
            core_base_url: "https://unpkg.com/@ffmpeg/core@0.12.6/dist/esm".to_string(),
            origin: "http://localhost:8080".to_string(),
            font_url: "/Yahei.ttf".to_string(),
            fonts_dir: "/tmp".to_string(),
            font_mount: "/tmp/yahei".to_string(),
            style: SubtitleStyle::default(),
        }
    }
}

impl BurnConfig {
    /// Deserialize a `BurnConfig` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Internal(format!("config parse error: {e}")))
    }

    /// URL of the engine's JS glue module.
    pub fn core_js_url(&self) -> String {
        format!("{}/ffmpeg-core.js", self.core_base_url.trim_end_matches('/'))
    }

    /// URL of the engine's wasm binary.
    pub fn core_wasm_url(&self) -> String {
        format!("{}/ffmpeg-core.wasm", self.core_base_url.trim_end_matches('/'))
    }

    /// The font URL with an origin-relative path resolved against `origin`.
    pub fn resolved_font_url(&self) -> String {
        if self.font_url.starts_with('/') {
            format!("{}{}", self.origin.trim_end_matches('/'), self.font_url)
        } else {
            self.font_url.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// SubtitleStyle
// ---------------------------------------------------------------------------

/// Style forced onto every rendered subtitle line.
///
/// Colours use the `&HBBGGRR` hex form the subtitle renderer expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    pub font_name: String,
    pub primary_colour: String,
    pub outline_colour: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_name: "Microsoft YaHei".to_string(),
            primary_colour: "&HFFFFFF".to_string(),
            outline_colour: "&H000000".to_string(),
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
        }
    }
}

impl SubtitleStyle {
    /// Render the `force_style` clause for the burn filter.
    pub fn force_style(&self) -> String {
        format!(
            "Fontname={},PrimaryColour={},OutlineColour={},Bold={},Italic={},Underline={},StrikeOut={}",
            self.font_name,
            self.primary_colour,
            self.outline_colour,
            self.bold as u8,
            self.italic as u8,
            self.underline as u8,
            self.strikeout as u8,
        )
    }
}
