//! The curved text placer: maps characters onto a circular arc.
//!
//! Spacing is based on character count, not measured glyph width, so
//! proportional fonts show slightly uneven visual spacing. This is the
//! established behavior for existing images; do not replace it with
//! width-accurate placement.

use crate::effects::{self, OutlineParams};
use crate::layout::Line;
use crate::settings::TextPath;
use quote_convert_canvas2d::{CanvasContext, TextAlign};
use std::f32::consts::FRAC_PI_2;

/// Draw the wrapped lines along a circular arc centered on the canvas.
///
/// Each character is placed by rotating to its running angle, translating
/// outward by the radius, and rotating a quarter turn so the glyph faces
/// tangentially outward. Wrapped lines are separated by a 3x character gap.
pub fn draw_curved_text(
    ctx: &mut CanvasContext,
    path: &TextPath,
    lines: &[Line],
    outline: Option<OutlineParams>,
    size: f32,
    scale: f32,
) {
    let total_chars: usize = lines.iter().map(|line| line.text.chars().count()).sum();
    if total_chars == 0 {
        return;
    }

    // Fixed spacing heuristic: a quarter circle shared across all characters
    let angle_per_char = FRAC_PI_2 / (total_chars as f32 * 0.8);
    let direction = path.direction.sign();
    let radius = path.radius * scale;
    let center = size / 2.0;

    // Center the first line on the configured angle
    let first_line_span = lines
        .first()
        .map(|line| line.text.chars().count() as f32 * angle_per_char)
        .unwrap_or(0.0);
    let mut theta = path.angle.to_radians() - direction * first_line_span / 2.0;

    ctx.scoped(|ctx| {
        ctx.set_text_align(TextAlign::Center);

        let mut buf = [0u8; 4];
        for line in lines {
            for ch in line.text.chars() {
                let glyph = &*ch.encode_utf8(&mut buf);
                ctx.scoped(|ctx| {
                    ctx.translate(center, center);
                    ctx.rotate(theta);
                    ctx.translate(radius, 0.0);
                    ctx.rotate(FRAC_PI_2);
                    effects::draw_run(ctx, outline, glyph, 0.0, 0.0);
                });
                theta += direction * angle_per_char;
            }
            // Larger angular gap between wrapped lines
            theta += direction * angle_per_char * 3.0;
        }
    });
}

/// Angular step per character for a given total character count.
///
/// Exposed for tests; the renderer itself goes through
/// [`draw_curved_text`].
pub fn angle_per_char(total_chars: usize) -> f32 {
    FRAC_PI_2 / (total_chars as f32 * 0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_per_char_formula() {
        // 10 characters: (pi/2) / 8
        let step = angle_per_char(10);
        assert!((step - FRAC_PI_2 / 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_per_char_shrinks_with_length() {
        assert!(angle_per_char(40) < angle_per_char(10));
    }
}
