//! Text measurement helpers built on cosmic-text.

use crate::font_parser::ParsedFont;
use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by `measure_text()`.
#[derive(Debug, Clone, Default)]
pub struct TextMetrics {
    /// Width of the text in pixels.
    pub width: f32,
    /// Font ascent above the alphabetic baseline.
    pub font_bounding_box_ascent: f32,
    /// Font descent below the alphabetic baseline.
    pub font_bounding_box_descent: f32,
}

/// Resolve a CSS family name against the font database.
///
/// Generic names map to their configured generic family; a concrete name
/// that is not present in the database falls back to sans-serif, matching
/// the silent web-font degradation the renderer expects.
pub(crate) fn resolve_family<'a>(font_system: &FontSystem, name: &'a str) -> Family<'a> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => {
            let known = font_system
                .db()
                .faces()
                .any(|face| face.families.iter().any(|(fam, _lang)| fam == name));
            if known {
                Family::Name(name)
            } else {
                Family::SansSerif
            }
        }
    }
}

/// Build cosmic-text attributes for a parsed font.
///
/// Hinting is disabled so glyph outlines are resolution-independent: the
/// same text rendered at 1080 and 4096 must scale linearly.
pub(crate) fn attrs_for_font<'a>(
    font_system: &FontSystem,
    font: &'a ParsedFont,
    letter_spacing: f32,
) -> Attrs<'a> {
    let family = font
        .families
        .first()
        .map(|f| resolve_family(font_system, f))
        .unwrap_or(Family::SansSerif);

    Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style)
        .letter_spacing(letter_spacing)
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING)
}

/// Measure text using cosmic-text.
///
/// Letter spacing participates in measurement so that wrap decisions and
/// justify math see the same widths the draw path produces.
pub(crate) fn measure_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    letter_spacing: f32,
) -> TextMetrics {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let attrs = attrs_for_font(font_system, font, letter_spacing);
    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);

    // Calculate width from layout runs
    let mut width: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
    }

    TextMetrics {
        width,
        font_bounding_box_ascent: font.size_px * 0.8,
        font_bounding_box_descent: font.size_px * 0.2,
    }
}

/// Calculate X offset for text alignment.
pub(crate) fn calculate_text_x_offset(width: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => -width,
        TextAlign::Center => -width / 2.0,
    }
}

/// Calculate Y offset for text baseline.
pub(crate) fn calculate_text_y_offset(
    ascent: f32,
    descent: f32,
    baseline: TextBaseline,
) -> f32 {
    match baseline {
        TextBaseline::Top => ascent,
        TextBaseline::Middle => ascent / 2.0 - descent / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Bottom => -descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_offset_by_alignment() {
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Left), 0.0);
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Right), -100.0);
        assert_eq!(calculate_text_x_offset(100.0, TextAlign::Center), -50.0);
    }

    #[test]
    fn test_y_offset_by_baseline() {
        assert_eq!(calculate_text_y_offset(40.0, 10.0, TextBaseline::Alphabetic), 0.0);
        assert_eq!(calculate_text_y_offset(40.0, 10.0, TextBaseline::Top), 40.0);
        assert_eq!(calculate_text_y_offset(40.0, 10.0, TextBaseline::Middle), 15.0);
        assert_eq!(calculate_text_y_offset(40.0, 10.0, TextBaseline::Bottom), -10.0);
    }
}
