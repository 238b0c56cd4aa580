//! Color math: luminance and the smart-contrast heuristic that picks the
//! signature color from the background.

use csscolorparser::Color;

/// Relative luminance of a color per the WCAG 2.0 formula (sRGB
/// linearization, 0.0 = black, 1.0 = white).
pub fn relative_luminance(color: &Color) -> f32 {
    let [r, g, b, _] = color.to_array();
    let linearize = |c: f32| {
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratio between two colors (1.0 to 21.0).
pub fn contrast_ratio(a: &Color, b: &Color) -> f32 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick a legible tint for the given background luminance.
///
/// Light backgrounds get a near-black tint, dark backgrounds a near-white
/// tint; the mid band falls back to pure black or white, whichever
/// contrasts more.
pub fn smart_contrast_color(background_luminance: f32) -> &'static str {
    if background_luminance > 0.6 {
        "#1a1a1a"
    } else if background_luminance < 0.4 {
        "#f5f5f5"
    } else if background_luminance > 0.5 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}
