//! The text effects compositor.
//!
//! Paint state for a text block (font, fill, shadow) is configured once,
//! inside a save/restore scope owned by the renderer; each run is then
//! drawn shadow first, outline second, fill last. Shadows never apply to
//! the outline, so an offset shadow cannot double the stroke.

use crate::background::build_canvas_gradient;
use crate::error::RenderResult;
use crate::settings::{QuoteSettings, TextOutline, TextShadow};
use quote_convert_canvas2d::{parse_color, CanvasColor, CanvasContext, LineJoin};

/// Outline parameters resolved to device pixels.
#[derive(Debug, Clone, Copy)]
pub struct OutlineParams {
    pub color: CanvasColor,
    pub width: f32,
}

/// Resolve the configured outline, scaling its width to the target canvas.
pub fn outline_params(settings: &QuoteSettings, scale: f32) -> RenderResult<Option<OutlineParams>> {
    let Some(TextOutline {
        enabled: true,
        color,
        width,
    }) = &settings.text_outline
    else {
        return Ok(None);
    };
    Ok(Some(OutlineParams {
        color: parse_color(color)?,
        width: (width * scale).max(0.0),
    }))
}

/// Set the context fill for text: the solid text color, or the text
/// gradient computed over the full canvas extent so gradient position stays
/// consistent across wrapped lines.
pub fn apply_text_fill(
    ctx: &mut CanvasContext,
    settings: &QuoteSettings,
    size: f32,
) -> RenderResult<()> {
    if let Some(gradient) = &settings.text_gradient {
        if gradient.enabled {
            let gradient =
                build_canvas_gradient(gradient.kind, &gradient.colors, gradient.angle, size, size)?;
            ctx.set_fill_style_gradient(gradient);
            return Ok(());
        }
    }
    ctx.set_fill_style(&settings.text_color)?;
    Ok(())
}

/// Configure the block's shadow state, all spatial values scaled to the
/// target canvas so shadow softness is resolution-invariant.
pub fn apply_block_shadow(
    ctx: &mut CanvasContext,
    shadow: Option<&TextShadow>,
    scale: f32,
) -> RenderResult<()> {
    match shadow {
        Some(shadow) if shadow.enabled => {
            ctx.set_shadow_color(&shadow.color)?;
            ctx.set_shadow_blur(shadow.blur * scale);
            ctx.set_shadow_offset(shadow.offset_x * scale, shadow.offset_y * scale);
        }
        _ => ctx.clear_shadow(),
    }
    Ok(())
}

/// The title's fallback shadow, used when no explicit shadow is configured:
/// a soft dark halo for legibility on busy backgrounds.
pub fn default_title_shadow() -> TextShadow {
    TextShadow {
        enabled: true,
        color: "rgba(0, 0, 0, 0.35)".to_string(),
        blur: 8.0,
        offset_x: 0.0,
        offset_y: 2.0,
    }
}

/// Draw one glyph run with the block's configured effects.
///
/// Order is load-bearing: shadow silhouette, then outline stroke, then
/// fill. Filling first would hide the outline; stroking after the fill
/// would cover glyph interiors.
pub fn draw_run(
    ctx: &mut CanvasContext,
    outline: Option<OutlineParams>,
    text: &str,
    x: f32,
    y: f32,
) {
    ctx.draw_text_shadow(text, x, y);

    if let Some(outline) = outline {
        ctx.scoped(|ctx| {
            ctx.set_stroke_style_color(outline.color);
            ctx.set_line_width(outline.width);
            // Round joins with a tight miter cap avoid spiky corners on
            // small glyphs
            ctx.set_line_join(LineJoin::Round);
            ctx.set_miter_limit(2.0);
            ctx.stroke_text(text, x, y);
        });
    }

    ctx.fill_text(text, x, y);
}
