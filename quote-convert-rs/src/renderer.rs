//! The quote renderer.
//!
//! [`render_quote`] is the single drawing routine used at every output
//! size. The interactive preview is a 1080 render; an export is the same
//! call with a larger `canvas_size`. Every pixel-valued setting is scaled
//! by `canvas_size / 1080` here and nowhere else, which is what keeps
//! preview and export visually identical.

use crate::background;
use crate::color;
use crate::curved;
use crate::effects::{self, OutlineParams};
use crate::error::RenderResult;
use crate::layout::{self, Line};
use crate::settings::{BlockAlignment, QuoteSettings, TextAlignment};
use crate::REFERENCE_CANVAS_SIZE;
use quote_convert_canvas2d::{CanvasContext, ResolvedFontConfig, TextAlign};

/// Render the settings onto a fresh square canvas of the given pixel size.
pub fn render_quote(
    settings: &QuoteSettings,
    canvas_size: u32,
    fonts: &ResolvedFontConfig,
) -> RenderResult<CanvasContext> {
    settings.validate()?;

    let mut ctx = CanvasContext::with_resolved(canvas_size, canvas_size, fonts)?;
    let size = canvas_size as f32;
    let scale = size / REFERENCE_CANVAS_SIZE;
    log::debug!("render_quote size={} scale={}", canvas_size, scale);

    background::paint_background(&mut ctx, settings, size, scale)?;

    let padding = settings.padding * scale;
    let max_width = size - padding * 2.0;
    let outline = effects::outline_params(settings, scale)?;

    // Lay out the quote block with its own font metrics
    let quote_font = font_string(settings, settings.font_size * scale);
    ctx.set_font(&quote_font)?;
    ctx.set_letter_spacing(settings.letter_spacing * scale);
    let quote_lines =
        layout::wrap_text(&settings.quote_text, max_width, |s| ctx.measure_text(s).width);
    let quote_line_height = settings.font_size * scale * settings.line_height;

    // Lay out the title block at 90% of the quote's font size
    let title_present = !settings.title.trim().is_empty();
    let title_font_size = settings.font_size * 0.9 * scale;
    let title_font = font_string(settings, title_font_size);
    let title_lines = if title_present {
        ctx.set_font(&title_font)?;
        layout::wrap_text(&settings.title, max_width, |s| ctx.measure_text(s).width)
    } else {
        Vec::new()
    };
    let title_line_height = title_font_size * settings.line_height;
    let title_gap = if title_present {
        title_line_height * 1.2
    } else {
        0.0
    };

    // Title + quote form one vertically centered block
    let title_height = title_lines.len() as f32 * title_line_height;
    let quote_height = quote_lines.len() as f32 * quote_line_height;
    let mut y = (size - (title_height + title_gap + quote_height)) / 2.0;

    if title_present {
        y = ctx.scoped(|ctx| -> RenderResult<f32> {
            ctx.set_font(&title_font)?;
            ctx.set_letter_spacing(settings.letter_spacing * scale);
            effects::apply_text_fill(ctx, settings, size)?;
            // The title always carries a shadow for legibility; a small
            // default stands in when none is configured
            let shadow = match &settings.text_shadow {
                Some(shadow) if shadow.enabled => shadow.clone(),
                _ => effects::default_title_shadow(),
            };
            effects::apply_block_shadow(ctx, Some(&shadow), scale)?;
            draw_text_block(
                ctx,
                settings,
                &title_lines,
                y,
                title_line_height,
                padding,
                max_width,
                size,
                outline,
            )
        })?;
        y += title_gap;
    }

    // Quote block: curved placement overrides normal line drawing
    let curved_path = settings
        .text_path
        .as_ref()
        .filter(|path| path.enabled)
        .cloned();
    ctx.scoped(|ctx| -> RenderResult<()> {
        ctx.set_font(&quote_font)?;
        ctx.set_letter_spacing(settings.letter_spacing * scale);
        effects::apply_text_fill(ctx, settings, size)?;
        effects::apply_block_shadow(ctx, settings.text_shadow.as_ref(), scale)?;

        if let Some(path) = &curved_path {
            curved::draw_curved_text(ctx, path, &quote_lines, outline, size, scale);
        } else {
            draw_text_block(
                ctx,
                settings,
                &quote_lines,
                y,
                quote_line_height,
                padding,
                max_width,
                size,
                outline,
            )?;
        }
        Ok(())
    })?;

    // Signature renders last, with a clean paint state
    if settings.signature_visible && !settings.signature_text.trim().is_empty() {
        draw_signature(&mut ctx, settings, size, scale)?;
    }

    Ok(ctx)
}

/// Render the settings and encode the canvas as PNG bytes.
pub fn quote_to_png(
    settings: &QuoteSettings,
    canvas_size: u32,
    fonts: &ResolvedFontConfig,
    ppi: Option<f32>,
) -> RenderResult<Vec<u8>> {
    let ctx = render_quote(settings, canvas_size, fonts)?;
    Ok(ctx.to_png(ppi)?)
}

/// Draw wrapped lines from `start_y`, one `line_height` apart, honoring the
/// configured alignment. Returns the y past the last line.
#[allow(clippy::too_many_arguments)]
fn draw_text_block(
    ctx: &mut CanvasContext,
    settings: &QuoteSettings,
    lines: &[Line],
    start_y: f32,
    line_height: f32,
    padding: f32,
    max_width: f32,
    size: f32,
    outline: Option<OutlineParams>,
) -> RenderResult<f32> {
    let mut y = start_y;
    for line in lines {
        if line.is_empty() {
            y += line_height;
            continue;
        }

        if settings.text_alignment == TextAlignment::Justify && line.words.len() > 1 {
            let gap = layout::justify_gap(line, max_width, |s| ctx.measure_text(s).width)
                .unwrap_or(0.0);
            ctx.set_text_align(TextAlign::Left);
            let mut x = padding;
            for word in &line.words {
                effects::draw_run(ctx, outline, word, x, y);
                x += ctx.measure_text(word).width + gap;
            }
        } else {
            let (align, x) = match settings.text_alignment {
                TextAlignment::Left => (TextAlign::Left, padding),
                TextAlignment::Right => (TextAlign::Right, size - padding),
                TextAlignment::Center => (TextAlign::Center, size / 2.0),
                // Single-word justified lines sit flush left
                TextAlignment::Justify => (TextAlign::Left, padding),
            };
            ctx.set_text_align(align);
            effects::draw_run(ctx, outline, &line.text, x, y);
        }
        y += line_height;
    }
    Ok(y)
}

/// Draw the signature anchored to its fixed bottom margin, in a color
/// derived from the background's luminance.
fn draw_signature(
    ctx: &mut CanvasContext,
    settings: &QuoteSettings,
    size: f32,
    scale: f32,
) -> RenderResult<()> {
    let signature_size = (settings.signature_size * scale).round();
    let bottom_margin = (settings.signature_bottom_margin * scale).round();
    let padding = settings.padding * scale;
    let color = signature_color(settings);

    ctx.scoped(|ctx| -> RenderResult<()> {
        ctx.set_font(&format!("{}px {}", signature_size, settings.signature_family()))?;
        ctx.set_letter_spacing(0.0);
        ctx.set_fill_style(color)?;

        let (align, x) = match settings.signature_alignment {
            BlockAlignment::Left => (TextAlign::Left, padding.round()),
            BlockAlignment::Center => (TextAlign::Center, (size / 2.0).round()),
            BlockAlignment::Right => (TextAlign::Right, (size - padding).round()),
        };
        ctx.set_text_align(align);

        let y = (size - bottom_margin).round();
        ctx.fill_text(&settings.signature_text, x, y);
        Ok(())
    })
}

/// The smart-contrast signature color for the configured background.
///
/// Solid backgrounds use their own luminance; gradient backgrounds average
/// the luminance of their two stops.
pub fn signature_color(settings: &QuoteSettings) -> &'static str {
    let luminance = match &settings.background_gradient {
        Some(gradient) => {
            let values: Vec<f32> = gradient
                .colors
                .iter()
                .take(2)
                .filter_map(|c| csscolorparser::parse(c).ok())
                .map(|c| color::relative_luminance(&c))
                .collect();
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f32>() / values.len() as f32
            }
        }
        None => csscolorparser::parse(&settings.background_color)
            .map(|c| color::relative_luminance(&c))
            .unwrap_or(0.0),
    };
    color::smart_contrast_color(luminance)
}

/// Build the CSS font string for the quote typography at a device pixel
/// size, the same shape a browser canvas `font` property takes.
fn font_string(settings: &QuoteSettings, size_px: f32) -> String {
    let style = if settings.text_style.italic {
        "italic"
    } else {
        "normal"
    };
    let weight = if settings.text_style.bold {
        "bold"
    } else {
        "normal"
    };
    format!("{} {} {}px {}", style, weight, size_px, settings.font_family)
}
