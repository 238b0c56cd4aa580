//! Drawing state that can be saved and restored.

use crate::font_parser::ParsedFont;
use crate::style::{FillStyle, LineCap, LineJoin, TextAlign, TextBaseline};
use tiny_skia::Transform;

/// Drawing state that can be saved and restored.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current fill style.
    pub fill_style: FillStyle,
    /// Current stroke style.
    pub stroke_style: FillStyle,
    /// Current line width.
    pub line_width: f32,
    /// Current line cap style.
    pub line_cap: LineCap,
    /// Current line join style.
    pub line_join: LineJoin,
    /// Current miter limit.
    pub miter_limit: f32,
    /// Current font specification.
    pub font: ParsedFont,
    /// Current text alignment.
    pub text_align: TextAlign,
    /// Current text baseline.
    pub text_baseline: TextBaseline,
    /// Current global alpha.
    pub global_alpha: f32,
    /// Current global composite operation (blend mode).
    pub global_composite_operation: tiny_skia::BlendMode,
    /// Current transform matrix.
    pub transform: Transform,
    /// Letter spacing for text rendering (in pixels).
    pub letter_spacing: f32,
    /// Shadow color. Fully transparent means no shadow.
    pub shadow_color: tiny_skia::Color,
    /// Shadow blur amount (Canvas 2D semantics: Gaussian sigma is half of this).
    pub shadow_blur: f32,
    /// Horizontal shadow offset in pixels.
    pub shadow_offset_x: f32,
    /// Vertical shadow offset in pixels.
    pub shadow_offset_y: f32,
}

impl DrawingState {
    /// Whether the current shadow state produces visible output.
    pub fn shadow_active(&self) -> bool {
        self.shadow_color.alpha() > 0.0
            && (self.shadow_blur > 0.0
                || self.shadow_offset_x != 0.0
                || self.shadow_offset_y != 0.0)
    }
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            global_alpha: 1.0,
            global_composite_operation: tiny_skia::BlendMode::SourceOver,
            transform: Transform::identity(),
            letter_spacing: 0.0,
            shadow_color: tiny_skia::Color::TRANSPARENT,
            shadow_blur: 0.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
        }
    }
}
