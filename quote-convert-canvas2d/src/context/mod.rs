//! Canvas rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::drawing_state::DrawingState;
use crate::error::{CanvasError, CanvasResult};
use crate::font_config::{font_config_to_fontdb, FontConfig, ResolvedFontConfig};
use crate::geometry::{CanvasColor, RadialGradientParams};
use crate::gradient::{CanvasGradient, GradientType};
use crate::style::{FillStyle, LineCap, LineJoin};
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Canvas rendering context.
///
/// Owns the pixel buffer and a cloneable [`DrawingState`] with a
/// save/restore stack, mirroring the Canvas 2D state machine. Paint state
/// mutations made between `save()` and `restore()` never leak into
/// subsequent drawing, which is what keeps effects from bleeding between
/// text blocks.
#[derive(Debug)]
pub struct CanvasContext {
    /// Width of the canvas in pixels.
    pub(crate) width: u32,
    /// Height of the canvas in pixels.
    pub(crate) height: u32,
    /// Pixel buffer.
    pub(crate) pixmap: Pixmap,
    /// Font system for text shaping.
    pub(crate) font_system: FontSystem,
    /// Swash cache for glyph outline retrieval.
    pub(crate) swash_cache: SwashCache,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path builder.
    pub(crate) path_builder: tiny_skia::PathBuilder,
    /// Current path position (for tracking subpath start).
    pub(crate) current_x: f32,
    pub(crate) current_y: f32,
    /// Subpath start position (for closePath).
    pub(crate) subpath_start_x: f32,
    pub(crate) subpath_start_y: f32,
    /// Whether the path has a current point.
    pub(crate) has_current_point: bool,
}

impl CanvasContext {
    /// Create a new CanvasContext with the specified dimensions.
    ///
    /// Uses `FontConfig::default()` which loads system fonts and sets up
    /// standard generic family mappings (sans-serif, serif, monospace).
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let config = FontConfig::default();
        let db = font_config_to_fontdb(&config);
        Self::new_internal(width, height, db)
    }

    /// Create a new CanvasContext with the specified dimensions and font configuration.
    pub fn with_config(width: u32, height: u32, config: &FontConfig) -> CanvasResult<Self> {
        let db = font_config_to_fontdb(config);
        Self::new_internal(width, height, db)
    }

    /// Create a new CanvasContext using a pre-resolved font configuration.
    ///
    /// This clones the cached font database from the [`ResolvedFontConfig`]
    /// rather than rebuilding it from scratch, avoiding repeated system font
    /// scanning when rendering the same settings at several output sizes.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> CanvasResult<Self> {
        Self::new_internal(width, height, resolved.fontdb.clone())
    }

    fn new_internal(width: u32, height: u32, font_db: fontdb::Database) -> CanvasResult<Self> {
        // Validate dimensions
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        // Create pixmap
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;

        // Create font system from the provided (already-configured) fontdb
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), font_db);

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path_builder: tiny_skia::PathBuilder::new(),
            current_x: 0.0,
            current_y: 0.0,
            subpath_start_x: 0.0,
            subpath_start_y: 0.0,
            has_current_point: false,
        })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Run a drawing closure inside a save/restore scope.
    ///
    /// All paint-state mutations made by the closure are rolled back when it
    /// returns, so one visual effect cannot leak into the next.
    pub fn scoped<R>(&mut self, draw: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        let result = draw(self);
        self.restore();
        result
    }

    // --- Style setters ---

    /// Set the fill style from a CSS color string.
    pub fn set_fill_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = parse_color(style)?;
        self.state.fill_style = FillStyle::Color(color.into());
        Ok(())
    }

    /// Set the fill style from a CanvasColor.
    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = FillStyle::Color(color.into());
    }

    /// Set the stroke style from a CSS color string.
    pub fn set_stroke_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = parse_color(style)?;
        self.state.stroke_style = FillStyle::Color(color.into());
        Ok(())
    }

    /// Set the stroke style from a CanvasColor.
    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = FillStyle::Color(color.into());
    }

    /// Set the line width.
    /// Per spec: ignore non-finite or values <= 0.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Set the line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Set the line join style.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Set the miter limit.
    /// Per spec: ignore non-finite or values <= 0.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    /// Set the global alpha (opacity).
    /// Per spec: ignore non-finite or values outside [0.0, 1.0].
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Set the global composite operation (blend mode).
    /// Per spec: ignore invalid values, preserve previous mode.
    /// Returns true if the value was accepted.
    pub fn set_global_composite_operation(&mut self, op: &str) -> bool {
        let Some(mode) = parse_blend_mode(op) else {
            return false;
        };
        self.state.global_composite_operation = mode;
        true
    }

    // --- Shadows ---

    /// Set the shadow color from a CSS color string.
    pub fn set_shadow_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.shadow_color = parse_color(color)?.into();
        Ok(())
    }

    /// Set the shadow blur amount.
    /// Per spec: ignore non-finite or negative values.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow_blur = blur;
        }
    }

    /// Set the shadow offset.
    /// Per spec: ignore non-finite values (each axis independently).
    pub fn set_shadow_offset(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() {
            self.state.shadow_offset_x = dx;
        }
        if dy.is_finite() {
            self.state.shadow_offset_y = dy;
        }
    }

    /// Clear the shadow state (transparent color, zero blur and offsets).
    pub fn clear_shadow(&mut self) {
        self.state.shadow_color = tiny_skia::Color::TRANSPARENT;
        self.state.shadow_blur = 0.0;
        self.state.shadow_offset_x = 0.0;
        self.state.shadow_offset_y = 0.0;
    }

    // --- Gradients ---

    /// Create a linear gradient.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }

    /// Create a radial gradient.
    pub fn create_radial_gradient(&self, params: &RadialGradientParams) -> CanvasGradient {
        CanvasGradient::new_radial(params)
    }

    /// Set the fill style to a gradient.
    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        match gradient.gradient_type {
            GradientType::Linear { .. } => {
                self.state.fill_style = FillStyle::LinearGradient(gradient);
            }
            GradientType::Radial { .. } => {
                self.state.fill_style = FillStyle::RadialGradient(gradient);
            }
        }
    }

    /// Set the stroke style to a gradient.
    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        match gradient.gradient_type {
            GradientType::Linear { .. } => {
                self.state.stroke_style = FillStyle::LinearGradient(gradient);
            }
            GradientType::Radial { .. } => {
                self.state.stroke_style = FillStyle::RadialGradient(gradient);
            }
        }
    }
}

/// Parse a CSS color string into a backend-neutral color.
pub fn parse_color(s: &str) -> CanvasResult<CanvasColor> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| CanvasError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    Ok(CanvasColor::from_rgba_f32(r, g, b, a))
}

/// Map a CSS blend-mode keyword to a tiny-skia blend mode.
pub(crate) fn parse_blend_mode(op: &str) -> Option<tiny_skia::BlendMode> {
    let mode = match op {
        "normal" | "source-over" => tiny_skia::BlendMode::SourceOver,
        "multiply" => tiny_skia::BlendMode::Multiply,
        "screen" => tiny_skia::BlendMode::Screen,
        "overlay" => tiny_skia::BlendMode::Overlay,
        "darken" => tiny_skia::BlendMode::Darken,
        "lighten" => tiny_skia::BlendMode::Lighten,
        "color-dodge" => tiny_skia::BlendMode::ColorDodge,
        "color-burn" => tiny_skia::BlendMode::ColorBurn,
        "hard-light" => tiny_skia::BlendMode::HardLight,
        "soft-light" => tiny_skia::BlendMode::SoftLight,
        "difference" => tiny_skia::BlendMode::Difference,
        "exclusion" => tiny_skia::BlendMode::Exclusion,
        "hue" => tiny_skia::BlendMode::Hue,
        "saturation" => tiny_skia::BlendMode::Saturation,
        "color" => tiny_skia::BlendMode::Color,
        "luminosity" => tiny_skia::BlendMode::Luminosity,
        _ => return None,
    };
    Some(mode)
}
