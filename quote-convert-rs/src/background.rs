//! The background renderer: solid fill, gradients, photo layers, overlay
//! washes, and procedural patterns. Everything here runs before any text is
//! drawn.

use crate::error::RenderResult;
use crate::image_loading::{self, LoadedImage};
use crate::settings::{
    BackgroundImage, GradientKind, ImagePosition, ImageRepeat, ImageSize, Overlay, Pattern,
    QuoteSettings,
};
use quote_convert_canvas2d::{
    parse_color, CanvasColor, CanvasContext, CanvasGradient, CanvasImageDataRef,
    RadialGradientParams, RectParams,
};

const WHITE: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 255);
const BLACK: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);

/// Fill the surface from the settings: base color or gradient, then the
/// optional image, overlay, and pattern layers in that order.
pub fn paint_background(
    ctx: &mut CanvasContext,
    settings: &QuoteSettings,
    size: f32,
    scale: f32,
) -> RenderResult<()> {
    // Gradient presence overrides the solid color
    if let Some(gradient) = &settings.background_gradient {
        let gradient =
            build_canvas_gradient(gradient.kind, &gradient.colors, gradient.angle, size, size)?;
        ctx.set_fill_style_gradient(gradient);
    } else {
        ctx.set_fill_style(&settings.background_color)?;
    }
    ctx.fill_rect(&RectParams {
        x: 0.0,
        y: 0.0,
        width: size,
        height: size,
    });

    if let Some(image) = &settings.background_image {
        paint_background_image(ctx, image, size, scale);
    }

    if let Some(overlay) = &settings.overlay {
        paint_overlay(ctx, overlay, size)?;
    }

    if let Some(pattern) = settings.pattern {
        paint_pattern(ctx, pattern, size, scale);
    }

    Ok(())
}

/// Build a two-stop canvas gradient covering the full canvas extent.
///
/// Linear gradients follow CSS angle semantics: the gradient line passes
/// through the canvas center at `(angle - 90)` degrees, and its length is
/// the diagonal projection `|w*cos| + |h*sin|` so the gradient never clips
/// at corners regardless of angle. Radial gradients run from the center to
/// half the canvas width.
///
/// A missing second color falls back to white rather than erroring.
pub fn build_canvas_gradient(
    kind: GradientKind,
    colors: &[String],
    angle: f32,
    width: f32,
    height: f32,
) -> RenderResult<CanvasGradient> {
    let first = colors
        .first()
        .map(|c| parse_color(c))
        .transpose()?
        .unwrap_or(WHITE);
    let second = colors
        .get(1)
        .map(|c| parse_color(c))
        .transpose()?
        .unwrap_or(WHITE);

    let center_x = width / 2.0;
    let center_y = height / 2.0;

    let mut gradient = match kind {
        GradientKind::Linear => {
            let radian = (angle - 90.0).to_radians();
            let length = (width * radian.cos()).abs() + (height * radian.sin()).abs();
            let start_x = center_x - length / 2.0 * radian.cos();
            let start_y = center_y - length / 2.0 * radian.sin();
            let end_x = center_x + length / 2.0 * radian.cos();
            let end_y = center_y + length / 2.0 * radian.sin();
            CanvasGradient::new_linear(start_x, start_y, end_x, end_y)
        }
        GradientKind::Radial => CanvasGradient::new_radial(&RadialGradientParams {
            x0: center_x,
            y0: center_y,
            r0: 0.0,
            x1: center_x,
            y1: center_y,
            r1: width / 2.0,
        }),
    };

    gradient.add_color_stop(0.0, first);
    gradient.add_color_stop(1.0, second);
    Ok(gradient)
}

/// Composite the background photo over the base fill.
///
/// A failed load logs a warning and the render proceeds without the image,
/// matching how a broken image element degrades in a browser.
fn paint_background_image(ctx: &mut CanvasContext, image: &BackgroundImage, size: f32, scale: f32) {
    let loaded = match image_loading::load_image(&image.source) {
        Ok(loaded) => loaded,
        Err(err) => {
            log::warn!("Skipping background image: {}", err);
            return;
        }
    };

    let (dw, dh) = dest_size(image.size, &loaded, size, scale);
    if dw <= 0.0 || dh <= 0.0 {
        return;
    }
    let (dx, dy) = anchor_offset(image.position, size, dw, dh);

    ctx.scoped(|ctx| {
        ctx.set_global_alpha(image.opacity.clamp(0.0, 1.0));
        if !ctx.set_global_composite_operation(&image.blend_mode) {
            log::warn!("Unknown blend mode '{}', using normal", image.blend_mode);
        }

        let data = CanvasImageDataRef {
            data: &loaded.data,
            width: loaded.width,
            height: loaded.height,
        };

        let (tile_x, tile_y) = match image.repeat {
            ImageRepeat::NoRepeat => (false, false),
            ImageRepeat::Repeat => (true, true),
            ImageRepeat::RepeatX => (true, false),
            ImageRepeat::RepeatY => (false, true),
        };

        let xs = tile_positions(dx, dw, size, tile_x);
        let ys = tile_positions(dy, dh, size, tile_y);
        for &y in &ys {
            for &x in &xs {
                ctx.draw_image_data_scaled(&data, x, y, dw, dh);
            }
        }
    });
}

/// Destination size of the background image for a sizing mode.
fn dest_size(mode: ImageSize, image: &LoadedImage, size: f32, scale: f32) -> (f32, f32) {
    let iw = image.width as f32;
    let ih = image.height as f32;
    if iw <= 0.0 || ih <= 0.0 {
        return (0.0, 0.0);
    }
    match mode {
        ImageSize::Cover => {
            let s = (size / iw).max(size / ih);
            (iw * s, ih * s)
        }
        ImageSize::Contain => {
            let s = (size / iw).min(size / ih);
            (iw * s, ih * s)
        }
        // Natural size in logical pixels, rescaled with the canvas
        ImageSize::Auto => (iw * scale, ih * scale),
        ImageSize::Percent100 => (size, size * ih / iw),
        ImageSize::Percent200 => (size * 2.0, size * 2.0 * ih / iw),
        ImageSize::Percent50 => (size * 0.5, size * 0.5 * ih / iw),
    }
}

/// Top-left corner of the (first) image tile for an anchor position.
fn anchor_offset(position: ImagePosition, size: f32, dw: f32, dh: f32) -> (f32, f32) {
    let center_x = (size - dw) / 2.0;
    let center_y = (size - dh) / 2.0;
    let right = size - dw;
    let bottom = size - dh;
    match position {
        ImagePosition::Center => (center_x, center_y),
        ImagePosition::Top => (center_x, 0.0),
        ImagePosition::Bottom => (center_x, bottom),
        ImagePosition::Left => (0.0, center_y),
        ImagePosition::Right => (right, center_y),
        ImagePosition::TopLeft => (0.0, 0.0),
        ImagePosition::TopRight => (right, 0.0),
        ImagePosition::BottomLeft => (0.0, bottom),
        ImagePosition::BottomRight => (right, bottom),
    }
}

/// Tile start positions along one axis: just the anchor when not
/// repeating, otherwise every step needed to cover `0..size`.
fn tile_positions(anchor: f32, step: f32, size: f32, repeat: bool) -> Vec<f32> {
    if !repeat || step <= 0.0 {
        return vec![anchor];
    }
    let mut start = anchor;
    while start > 0.0 {
        start -= step;
    }
    let mut positions = Vec::new();
    let mut pos = start;
    while pos < size {
        positions.push(pos);
        pos += step;
    }
    positions
}

/// Color wash over the background, under the text.
fn paint_overlay(ctx: &mut CanvasContext, overlay: &Overlay, size: f32) -> RenderResult<()> {
    let color = overlay.color.clone();
    let opacity = overlay.opacity.clamp(0.0, 1.0);
    let blend = overlay.blend_mode.clone();
    ctx.scoped(|ctx| -> RenderResult<()> {
        ctx.set_global_alpha(opacity);
        if !ctx.set_global_composite_operation(&blend) {
            log::warn!("Unknown blend mode '{}', using normal", blend);
        }
        ctx.set_fill_style(&color)?;
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
        });
        Ok(())
    })
}

/// Procedural pattern layer at 10% alpha: dot grids, horizontal rules, or
/// sine-perturbed rows. All metrics scale linearly with the canvas.
fn paint_pattern(ctx: &mut CanvasContext, pattern: Pattern, size: f32, scale: f32) {
    let spacing = 20.0 * scale;
    ctx.scoped(|ctx| {
        ctx.set_global_alpha(0.1);
        ctx.set_fill_style_color(BLACK);
        ctx.set_stroke_style_color(BLACK);
        ctx.set_line_width(scale);

        match pattern {
            Pattern::Dots => {
                ctx.begin_path();
                let mut y = spacing;
                while y < size {
                    let mut x = spacing;
                    while x < size {
                        ctx.circle(x, y, scale);
                        x += spacing * 2.0;
                    }
                    y += spacing * 2.0;
                }
                ctx.fill();
            }
            Pattern::Lines => {
                let mut y = spacing;
                while y < size {
                    ctx.begin_path();
                    ctx.move_to(0.0, y);
                    ctx.line_to(size, y);
                    ctx.stroke();
                    y += spacing;
                }
            }
            Pattern::Waves => {
                let amplitude = 5.0 * scale;
                let frequency = 0.02 / scale;
                let mut y = spacing;
                while y < size {
                    ctx.begin_path();
                    ctx.move_to(0.0, y);
                    let mut x = 1.0;
                    while x < size {
                        ctx.line_to(x, y + (x * frequency).sin() * amplitude);
                        x += 1.0;
                    }
                    ctx.stroke();
                    y += spacing * 2.0;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GradientKind;
    use quote_convert_canvas2d::GradientType;

    #[test]
    fn test_gradient_missing_second_color_falls_back_to_white() {
        let colors = vec!["#ff0000".to_string()];
        let gradient =
            build_canvas_gradient(GradientKind::Linear, &colors, 0.0, 1080.0, 1080.0).unwrap();
        assert_eq!(gradient.stops.len(), 2);
        assert_eq!(gradient.stops[1].color, WHITE);
    }

    #[test]
    fn test_gradient_extra_colors_ignored() {
        let colors = vec![
            "#ff0000".to_string(),
            "#00ff00".to_string(),
            "#0000ff".to_string(),
        ];
        let gradient =
            build_canvas_gradient(GradientKind::Linear, &colors, 45.0, 1080.0, 1080.0).unwrap();
        assert_eq!(gradient.stops.len(), 2);
    }

    #[test]
    fn test_linear_gradient_line_is_centered() {
        let colors = vec!["#000000".to_string(), "#ffffff".to_string()];
        let gradient =
            build_canvas_gradient(GradientKind::Linear, &colors, 37.0, 1080.0, 1080.0).unwrap();
        let GradientType::Linear { x0, y0, x1, y1 } = gradient.gradient_type else {
            panic!("expected linear gradient");
        };
        // The line's midpoint is the canvas center for any angle
        assert!(((x0 + x1) / 2.0 - 540.0).abs() < 1e-3);
        assert!(((y0 + y1) / 2.0 - 540.0).abs() < 1e-3);
    }

    #[test]
    fn test_vertical_gradient_spans_full_height() {
        let colors = vec!["#000000".to_string(), "#ffffff".to_string()];
        // Angle 0 runs vertically, so the line covers the full height
        let gradient =
            build_canvas_gradient(GradientKind::Linear, &colors, 0.0, 1080.0, 1080.0).unwrap();
        let GradientType::Linear { y0, y1, .. } = gradient.gradient_type else {
            panic!("expected linear gradient");
        };
        assert!(((y0 - y1).abs() - 1080.0).abs() < 1e-2);
    }

    #[test]
    fn test_radial_gradient_geometry() {
        let colors = vec!["#000000".to_string(), "#ffffff".to_string()];
        let gradient =
            build_canvas_gradient(GradientKind::Radial, &colors, 0.0, 1080.0, 1080.0).unwrap();
        let GradientType::Radial(params) = gradient.gradient_type else {
            panic!("expected radial gradient");
        };
        assert_eq!(params.x0, 540.0);
        assert_eq!(params.r0, 0.0);
        assert_eq!(params.r1, 540.0);
    }

    fn image(width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            data: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    #[test]
    fn test_dest_size_cover_fills_canvas() {
        let (dw, dh) = dest_size(ImageSize::Cover, &image(200, 100), 1000.0, 1.0);
        assert!(dw >= 1000.0 && dh >= 1000.0);
        // Aspect ratio preserved
        assert!((dw / dh - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_dest_size_contain_fits_canvas() {
        let (dw, dh) = dest_size(ImageSize::Contain, &image(200, 100), 1000.0, 1.0);
        assert!(dw <= 1000.0 && dh <= 1000.0);
        assert!((dw - 1000.0).abs() < 1e-4 || (dh - 1000.0).abs() < 1e-4);
    }

    #[test]
    fn test_dest_size_auto_scales_with_canvas() {
        let (dw, dh) = dest_size(ImageSize::Auto, &image(200, 100), 2160.0, 2.0);
        assert_eq!((dw, dh), (400.0, 200.0));
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(
            anchor_offset(ImagePosition::Center, 100.0, 40.0, 20.0),
            (30.0, 40.0)
        );
        assert_eq!(
            anchor_offset(ImagePosition::TopLeft, 100.0, 40.0, 20.0),
            (0.0, 0.0)
        );
        assert_eq!(
            anchor_offset(ImagePosition::BottomRight, 100.0, 40.0, 20.0),
            (60.0, 80.0)
        );
        assert_eq!(
            anchor_offset(ImagePosition::Top, 100.0, 40.0, 20.0),
            (30.0, 0.0)
        );
    }

    #[test]
    fn test_tile_positions_cover_axis() {
        let positions = tile_positions(30.0, 40.0, 100.0, true);
        // First tile starts at or before 0, last covers the far edge
        assert!(*positions.first().unwrap() <= 0.0);
        assert!(*positions.last().unwrap() + 40.0 >= 100.0);
        // Consecutive tiles are one step apart
        for pair in positions.windows(2) {
            assert!((pair[1] - pair[0] - 40.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tile_positions_no_repeat() {
        assert_eq!(tile_positions(30.0, 40.0, 100.0, false), vec![30.0]);
    }
}
