//! The quote settings model.
//!
//! A [`QuoteSettings`] value is the single source of truth consumed by the
//! renderer. Settings serialize as camelCase JSON so template files written
//! by the original web editor load unchanged; unknown fields (legacy
//! `signatureColor`, `name`, ...) are ignored.
//!
//! All pixel-valued fields are logical pixels on the canonical 1080-unit
//! canvas.

use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};

/// Everything the renderer needs to draw a quote image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSettings {
    /// Template identity.
    #[serde(default)]
    pub id: String,

    // --- Content ---
    /// Optional heading rendered above the quote. Empty means absent.
    #[serde(default)]
    pub title: String,
    /// The quote body. May contain user line breaks (`\n`), which are hard
    /// breaks.
    #[serde(default)]
    pub quote_text: String,
    /// Attribution line anchored near the bottom of the canvas.
    #[serde(default)]
    pub signature_text: String,
    /// Show/hide toggle for the signature.
    #[serde(default = "default_true")]
    pub signature_visible: bool,

    // --- Typography ---
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Additional spacing between glyphs in logical pixels.
    #[serde(default)]
    pub letter_spacing: f32,
    #[serde(default)]
    pub text_style: TextStyle,
    #[serde(default)]
    pub text_alignment: TextAlignment,

    // --- Signature typography ---
    /// Defaults to `font_family` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_font_family: Option<String>,
    #[serde(default = "default_signature_size")]
    pub signature_size: f32,
    #[serde(default)]
    pub signature_alignment: BlockAlignment,
    /// Distance from the canvas bottom to the signature baseline.
    #[serde(default = "default_signature_bottom_margin")]
    pub signature_bottom_margin: f32,

    // --- Color / paint ---
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// When present, overrides `background_color`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<GradientSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_gradient: Option<TextGradient>,

    // --- Effects ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<TextShadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_outline: Option<TextOutline>,

    // --- Background extras ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<BackgroundImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,

    // --- Curved text ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_path: Option<TextPath>,

    // --- Geometry ---
    /// Horizontal inset of the text block, logical pixels at 1080.
    #[serde(default = "default_padding")]
    pub padding: f32,
}

/// Bold/italic/underline toggles.
///
/// `underline` is carried for schema compatibility but has no rendering
/// effect in the active design.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

/// Horizontal alignment of the quote and title blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

/// Horizontal alignment of the signature block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Linear or radial gradient selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// A two-stop gradient. Extra colors are ignored; a missing second color is
/// substituted with white at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientSpec {
    #[serde(rename = "type", default)]
    pub kind: GradientKind,
    pub colors: Vec<String>,
    /// CSS gradient angle in degrees (linear only).
    #[serde(default)]
    pub angle: f32,
}

/// Gradient fill for the text itself, computed over the full canvas extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGradient {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(rename = "type", default)]
    pub kind: GradientKind,
    pub colors: Vec<String>,
    #[serde(default)]
    pub angle: f32,
}

/// Drop shadow behind the text fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShadow {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub color: String,
    #[serde(default)]
    pub blur: f32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
}

/// Stroke drawn around glyph edges, under the fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextOutline {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub color: String,
    #[serde(default = "default_outline_width")]
    pub width: f32,
}

/// Procedural background pattern, drawn over the fill at 10% alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Dots,
    Lines,
    Waves,
}

/// Photo or texture composited over the background fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    /// File path, `http(s)://` URL, or `data:` URL.
    #[serde(alias = "url")]
    pub source: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub position: ImagePosition,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub repeat: ImageRepeat,
    #[serde(default = "default_blend_mode")]
    pub blend_mode: String,
}

/// Anchor of the background image inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImagePosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Sizing mode of the background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "cover")]
    Cover,
    #[serde(rename = "contain")]
    Contain,
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "100%")]
    Percent100,
    #[serde(rename = "200%")]
    Percent200,
    #[serde(rename = "50%")]
    Percent50,
}

/// Tiling mode of the background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageRepeat {
    #[default]
    NoRepeat,
    Repeat,
    RepeatX,
    RepeatY,
}

/// Color wash over the background (and under the text).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub color: String,
    #[serde(default = "default_overlay_opacity")]
    pub opacity: f32,
    #[serde(default = "default_blend_mode")]
    pub blend_mode: String,
}

/// Circular-arc text placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPath {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Arc radius in logical pixels at 1080.
    #[serde(default = "default_path_radius")]
    pub radius: f32,
    /// Center angle of the text in degrees.
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub direction: PathDirection,
}

/// Travel direction along the arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDirection {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl PathDirection {
    /// Signed angular step multiplier: +1 clockwise, -1 counterclockwise.
    pub fn sign(&self) -> f32 {
        match self {
            PathDirection::Clockwise => 1.0,
            PathDirection::Counterclockwise => -1.0,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_font_family() -> String {
    "Poppins".to_string()
}
fn default_font_size() -> f32 {
    50.0
}
fn default_line_height() -> f32 {
    1.2
}
fn default_signature_size() -> f32 {
    50.0
}
fn default_signature_bottom_margin() -> f32 {
    100.0
}
fn default_text_color() -> String {
    "#000000".to_string()
}
fn default_background_color() -> String {
    "#ffff00".to_string()
}
fn default_padding() -> f32 {
    100.0
}
fn default_outline_width() -> f32 {
    2.0
}
fn default_opacity() -> f32 {
    1.0
}
fn default_overlay_opacity() -> f32 {
    0.3
}
fn default_blend_mode() -> String {
    "normal".to_string()
}
fn default_path_radius() -> f32 {
    200.0
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            quote_text: String::new(),
            signature_text: String::new(),
            signature_visible: true,
            font_family: default_font_family(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            letter_spacing: 0.0,
            text_style: TextStyle::default(),
            text_alignment: TextAlignment::default(),
            signature_font_family: None,
            signature_size: default_signature_size(),
            signature_alignment: BlockAlignment::default(),
            signature_bottom_margin: default_signature_bottom_margin(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            background_gradient: None,
            text_gradient: None,
            text_shadow: None,
            text_outline: None,
            pattern: None,
            background_image: None,
            overlay: None,
            text_path: None,
            padding: default_padding(),
        }
    }
}

impl QuoteSettings {
    /// Parse settings from JSON and validate every color at the boundary,
    /// so malformed values never reach the drawing routine.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate all color strings and geometry values.
    pub fn validate(&self) -> RenderResult<()> {
        check_color("textColor", &self.text_color)?;
        check_color("backgroundColor", &self.background_color)?;

        // Short gradient color lists are tolerated (the renderer
        // substitutes white); the colors that are present must parse
        if let Some(gradient) = &self.background_gradient {
            for color in &gradient.colors {
                check_color("backgroundGradient.colors", color)?;
            }
        }
        if let Some(gradient) = &self.text_gradient {
            for color in &gradient.colors {
                check_color("textGradient.colors", color)?;
            }
        }
        if let Some(shadow) = &self.text_shadow {
            check_color("textShadow.color", &shadow.color)?;
        }
        if let Some(outline) = &self.text_outline {
            check_color("textOutline.color", &outline.color)?;
        }
        if let Some(overlay) = &self.overlay {
            check_color("overlay.color", &overlay.color)?;
        }

        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "fontSize must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        if let Some(path) = &self.text_path {
            if path.enabled && !(path.radius.is_finite() && path.radius > 0.0) {
                return Err(RenderError::InvalidSettings(format!(
                    "textPath.radius must be positive, got {}",
                    path.radius
                )));
            }
        }

        Ok(())
    }

    /// The signature font family: explicit, or the quote's own family.
    pub fn signature_family(&self) -> &str {
        self.signature_font_family
            .as_deref()
            .unwrap_or(&self.font_family)
    }
}

fn check_color(field: &str, value: &str) -> RenderResult<()> {
    csscolorparser::parse(value)
        .map(|_| ())
        .map_err(|e| RenderError::InvalidSettings(format!("{}: {} ({})", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_template() {
        let settings = QuoteSettings::default();
        assert_eq!(settings.font_family, "Poppins");
        assert_eq!(settings.font_size, 50.0);
        assert_eq!(settings.text_alignment, TextAlignment::Center);
        assert_eq!(settings.padding, 100.0);
        assert_eq!(settings.background_color, "#ffff00");
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.line_height, 1.2);
        assert!(settings.signature_visible);
        assert!(settings.background_gradient.is_none());
        assert!(settings.text_path.is_none());
        settings.validate().unwrap();
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = r##"{
            "quoteText": "Stay hungry",
            "fontSize": 64,
            "textAlignment": "justify",
            "signatureText": "anon",
            "signatureBottomMargin": 120,
            "textShadow": {"enabled": true, "color": "#00000080", "blur": 6, "offsetX": 2, "offsetY": 3},
            "textPath": {"enabled": true, "radius": 250, "angle": 90, "direction": "counterclockwise"}
        }"##;
        let settings = QuoteSettings::from_json(json).unwrap();
        assert_eq!(settings.quote_text, "Stay hungry");
        assert_eq!(settings.font_size, 64.0);
        assert_eq!(settings.text_alignment, TextAlignment::Justify);
        assert_eq!(settings.signature_bottom_margin, 120.0);
        let shadow = settings.text_shadow.unwrap();
        assert_eq!(shadow.offset_y, 3.0);
        let path = settings.text_path.unwrap();
        assert_eq!(path.direction, PathDirection::Counterclockwise);
        assert_eq!(path.direction.sign(), -1.0);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // Legacy template files carry fields the canonical schema dropped
        let json = r##"{
            "name": "Default Template",
            "signatureColor": "#123456",
            "quoteText": "hello"
        }"##;
        let settings = QuoteSettings::from_json(json).unwrap();
        assert_eq!(settings.quote_text, "hello");
    }

    #[test]
    fn test_background_image_url_alias() {
        let json = r#"{
            "quoteText": "x",
            "backgroundImage": {"url": "photo.png", "opacity": 0.8, "size": "contain", "repeat": "repeat-x"}
        }"#;
        let settings = QuoteSettings::from_json(json).unwrap();
        let image = settings.background_image.unwrap();
        assert_eq!(image.source, "photo.png");
        assert_eq!(image.size, ImageSize::Contain);
        assert_eq!(image.repeat, ImageRepeat::RepeatX);
        assert_eq!(image.position, ImagePosition::Center);
    }

    #[test]
    fn test_invalid_color_rejected_at_boundary() {
        let json = r##"{"quoteText": "x", "textColor": "#zzzzzz"}"##;
        let err = QuoteSettings::from_json(json).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSettings(_)));
    }

    #[test]
    fn test_invalid_shadow_color_rejected() {
        let json = r#"{
            "quoteText": "x",
            "textShadow": {"enabled": true, "color": "nope", "blur": 1}
        }"#;
        assert!(QuoteSettings::from_json(json).is_err());
    }

    #[test]
    fn test_negative_font_size_rejected() {
        let json = r#"{"quoteText": "x", "fontSize": -5}"#;
        assert!(QuoteSettings::from_json(json).is_err());
    }

    #[test]
    fn test_signature_family_fallback() {
        let mut settings = QuoteSettings::default();
        assert_eq!(settings.signature_family(), "Poppins");
        settings.signature_font_family = Some("Lora".to_string());
        assert_eq!(settings.signature_family(), "Lora");
    }
}
