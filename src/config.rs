//! Render configuration
//!
//! Everything that shapes a generated document lives in [`RenderConfig`],
//! which is built once per batch and passed by reference to the renderer.
//! Configs can be loaded from YAML; missing keys fall back to defaults.

use crate::error::{ConvertError, ConvertResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Points per inch
pub const INCH: f32 = 72.0;

pub const DEFAULT_PREFIX: &str = "row";
pub const DEFAULT_OUTPUT_DIR: &str = "pdf_output";
pub const ARTIFACT_EXTENSION: &str = "pdf";
/// Space reserved under the title before the table starts
pub const TITLE_SPACING: f32 = 30.0;

//==============================================================================
// Page Geometry
//==============================================================================

/// Page dimensions, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSize {
    Named(NamedPageSize),
    Custom { width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedPageSize {
    A4,
    Letter,
    Legal,
}

impl PageSize {
    pub const A4: PageSize = PageSize::Named(NamedPageSize::A4);
    pub const LETTER: PageSize = PageSize::Named(NamedPageSize::Letter);
    pub const LEGAL: PageSize = PageSize::Named(NamedPageSize::Legal);

    /// (width, height) in points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Named(NamedPageSize::A4) => (595.2756, 841.8898),
            PageSize::Named(NamedPageSize::Letter) => (612.0, 792.0),
            PageSize::Named(NamedPageSize::Legal) => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

impl FromStr for PageSize {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::LETTER),
            "legal" => Ok(PageSize::LEGAL),
            other => Err(ConvertError::Config(format!(
                "Unknown page size '{}' (expected a4, letter or legal)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: INCH,
            right: INCH,
            top: INCH,
            bottom: 18.0,
        }
    }
}

//==============================================================================
// Fonts & Colors
//==============================================================================

/// Standard PDF Type1 families (no embedding needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Helvetica,
    Courier,
}

impl FontFamily {
    pub fn regular_name(&self) -> &'static [u8] {
        match self {
            FontFamily::Helvetica => b"Helvetica",
            FontFamily::Courier => b"Courier",
        }
    }

    pub fn bold_name(&self) -> &'static [u8] {
        match self {
            FontFamily::Helvetica => b"Helvetica-Bold",
            FontFamily::Courier => b"Courier-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: FontFamily,
    pub size: f32,
    pub title_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: FontFamily::Helvetica,
            size: 10.0,
            title_size: 16.0,
        }
    }
}

/// RGB color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GREY: Color = Color::rgb(0xD3, 0xD3, 0xD3);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components in 0.0..=1.0, as PDF color operators expect
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl FromStr for Color {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || ConvertError::Config(format!("Invalid color '{}' (expected #RRGGBB)", s));
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Field-name column background
    pub label_background: Color,
    /// Value column background
    pub value_background: Color,
    pub text: Color,
    pub border: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            label_background: Color::LIGHT_GREY,
            value_background: Color::WHITE,
            text: Color::BLACK,
            border: Color::BLACK,
        }
    }
}

//==============================================================================
// RenderConfig
//==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub prefix: String,
    pub page_size: PageSize,
    pub margins: Margins,
    pub font: FontConfig,
    pub colors: ColorScheme,
    /// Padding on the top, left and right of each cell
    pub cell_padding: f32,
    /// Padding below the last line of each cell
    pub cell_padding_bottom: f32,
    pub border_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            page_size: PageSize::default(),
            margins: Margins::default(),
            font: FontConfig::default(),
            colors: ColorScheme::default(),
            cell_padding: 6.0,
            cell_padding_bottom: 12.0,
            border_width: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn new<P: AsRef<Path>>(output_dir: P, prefix: &str) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }

    /// Load a config from a YAML file. Unspecified keys keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> ConvertResult<Self> {
        let config: RenderConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Reject geometry that leaves no room to draw
    pub fn validate(&self) -> ConvertResult<()> {
        let (width, height) = self.page_size.dimensions();
        if width <= 0.0 || height <= 0.0 {
            return Err(ConvertError::Config(format!(
                "Page size must be positive, got {}x{}",
                width, height
            )));
        }
        let m = &self.margins;
        if [m.left, m.right, m.top, m.bottom].iter().any(|v| *v < 0.0) {
            return Err(ConvertError::Config("Margins cannot be negative".to_string()));
        }
        if self.usable_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(ConvertError::Config(
                "Margins leave no printable area".to_string(),
            ));
        }
        if self.font.size <= 0.0 || self.font.title_size <= 0.0 {
            return Err(ConvertError::Config("Font sizes must be positive".to_string()));
        }
        if self.cell_padding < 0.0 || self.cell_padding_bottom < 0.0 || self.border_width < 0.0 {
            return Err(ConvertError::Config(
                "Padding and border width cannot be negative".to_string(),
            ));
        }
        if self.usable_width() <= 2.0 * self.cell_padding {
            return Err(ConvertError::Config(format!(
                "Printable width {:.1}pt leaves no room inside {:.1}pt cell padding",
                self.usable_width(),
                self.cell_padding
            )));
        }
        let needed = self.title_block_height() + self.min_cell_height();
        if self.usable_height() < needed {
            return Err(ConvertError::Config(format!(
                "Printable height {:.1}pt cannot hold the title and one table line ({:.1}pt)",
                self.usable_height(),
                needed
            )));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(ConvertError::Config(format!(
                "Filename prefix '{}' cannot contain path separators",
                self.prefix
            )));
        }
        Ok(())
    }

    pub fn usable_width(&self) -> f32 {
        let (width, _) = self.page_size.dimensions();
        width - self.margins.left - self.margins.right
    }

    pub fn usable_height(&self) -> f32 {
        let (_, height) = self.page_size.dimensions();
        height - self.margins.top - self.margins.bottom
    }

    /// Vertical distance between two lines of cell text
    pub fn line_height(&self) -> f32 {
        self.font.size * 1.2
    }

    /// Height of the title line plus the gap before the table
    pub fn title_block_height(&self) -> f32 {
        self.font.title_size * 1.2 + TITLE_SPACING
    }

    /// Height of a cell holding a single line of text
    pub fn min_cell_height(&self) -> f32 {
        self.cell_padding + self.cell_padding_bottom + self.line_height()
    }

    /// Deterministic artifact name for a 1-based record index.
    ///
    /// Zero-padded to three digits; wider indices widen the field.
    pub fn artifact_name(&self, index: usize) -> String {
        format!("{}_{:03}.{}", self.prefix, index, ARTIFACT_EXTENSION)
    }

    pub fn artifact_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(self.artifact_name(index))
    }
}
