//! Fill, stroke, and paint helper operations for CanvasContext.

use super::CanvasContext;
use crate::geometry::RectParams;
use crate::gradient::{CanvasGradient, GradientType};
use crate::style::FillStyle;
use tiny_skia::Transform;

impl CanvasContext {
    /// Fill the current path using the non-zero winding rule.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        // Clone the path builder so we don't consume it - stroke() may follow
        let path = self.path_builder.clone().finish();

        if let Some(path) = path {
            // Path coordinates are already in device space (pre-transformed)
            let _ = self.with_fill_paint(|ctx, paint| {
                ctx.pixmap.fill_path(
                    &path,
                    paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            });
        }
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        // Clone the path builder so we don't consume it - fill() may have been called or may follow
        let path = self.path_builder.clone().finish();

        if let Some(path) = path {
            // Scale line width by the average axis scale of the CTM, since
            // path coordinates are pre-transformed but stroke width is in
            // user space
            let t = &self.state.transform;
            let scale =
                ((t.sx * t.sx + t.ky * t.ky).sqrt() + (t.kx * t.kx + t.sy * t.sy).sqrt()) / 2.0;
            let stroke = tiny_skia::Stroke {
                width: self.state.line_width * scale,
                line_cap: self.state.line_cap.into(),
                line_join: self.state.line_join.into(),
                miter_limit: self.state.miter_limit,
                dash: None,
            };

            let _ = self.with_stroke_paint(|ctx, paint| {
                ctx.pixmap
                    .stroke_path(&path, paint, &stroke, Transform::identity(), None);
            });
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        // Use path-based approach for proper transform handling
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Stroke a rectangle.
    pub fn stroke_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.stroke();
    }

    // --- Private paint helpers ---

    pub(crate) fn with_fill_paint<R>(
        &mut self,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let style = self.state.fill_style.clone();
        self.with_paint_from_style(style, draw)
    }

    pub(crate) fn with_stroke_paint<R>(
        &mut self,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let style = self.state.stroke_style.clone();
        self.with_paint_from_style(style, draw)
    }

    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            blend_mode: self.state.global_composite_operation,
            ..Default::default()
        };

        match style {
            FillStyle::Color(color) => {
                let mut color = color;
                // Apply global alpha
                if self.state.global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
                }
                paint.set_color(color);
                Some(draw(self, &paint))
            }
            FillStyle::LinearGradient(gradient) | FillStyle::RadialGradient(gradient) => {
                let shader = self.create_gradient_shader(&gradient)?;
                paint.shader = shader;
                Some(draw(self, &paint))
            }
        }
    }

    pub(crate) fn create_gradient_shader(
        &self,
        gradient: &CanvasGradient,
    ) -> Option<tiny_skia::Shader<'static>> {
        if gradient.stops.is_empty() {
            return None;
        }

        let stops: Vec<tiny_skia::GradientStop> = gradient
            .stops
            .iter()
            .map(|stop| {
                let mut color: tiny_skia::Color = stop.color.into();
                if self.state.global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
                }
                tiny_skia::GradientStop::new(stop.offset as f32, color)
            })
            .collect();

        match &gradient.gradient_type {
            GradientType::Linear { x0, y0, x1, y1 } => tiny_skia::LinearGradient::new(
                tiny_skia::Point { x: *x0, y: *y0 },
                tiny_skia::Point { x: *x1, y: *y1 },
                stops,
                tiny_skia::SpreadMode::Pad,
                self.state.transform,
            ),
            GradientType::Radial(params) => tiny_skia::RadialGradient::new(
                tiny_skia::Point {
                    x: params.x0,
                    y: params.y0,
                },
                tiny_skia::Point {
                    x: params.x1,
                    y: params.y1,
                },
                params.r1,
                stops,
                tiny_skia::SpreadMode::Pad,
                self.state.transform,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::geometry::{CanvasColor, RectParams};
    use crate::CanvasContext;

    fn test_context() -> CanvasContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        CanvasContext::with_config(100, 100, &config).unwrap()
    }

    #[test]
    fn test_stroke_rect_pixels() {
        let mut ctx = test_context();
        ctx.set_stroke_style("#0000ff").unwrap();
        ctx.set_line_width(2.0);
        ctx.stroke_rect(&RectParams {
            x: 20.0,
            y: 20.0,
            width: 60.0,
            height: 60.0,
        });

        let data = ctx.get_image_data(0, 0, 100, 100);
        // On the top edge at (50, 20): should have blue pixels
        let idx = (20 * 100 + 50) * 4;
        assert!(data[idx + 2] > 200); // B channel
        assert!(data[idx + 3] > 0); // A

        // Center of rect (50, 50): should be transparent (stroke only)
        let idx_center = (50 * 100 + 50) * 4;
        assert_eq!(data[idx_center + 3], 0);
    }

    #[test]
    fn test_global_alpha_applies_to_fill() {
        let mut ctx = test_context();
        ctx.set_fill_style("#ff0000").unwrap();
        ctx.set_global_alpha(0.5);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        });

        let data = ctx.get_image_data(0, 0, 100, 100);
        let idx = (50 * 100 + 50) * 4;
        // Alpha should be ~128, not 255
        assert!((data[idx + 3] as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_linear_gradient_fill() {
        let mut ctx = test_context();
        let mut gradient = ctx.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
        gradient.add_color_stop(0.0, CanvasColor::from_rgba8(255, 0, 0, 255));
        gradient.add_color_stop(1.0, CanvasColor::from_rgba8(0, 0, 255, 255));
        ctx.set_fill_style_gradient(gradient);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        });

        let data = ctx.get_image_data(0, 0, 100, 100);
        // Left side is mostly red, right side mostly blue
        let left = (50 * 100 + 2) * 4;
        let right = (50 * 100 + 97) * 4;
        assert!(data[left] > data[left + 2]);
        assert!(data[right + 2] > data[right]);
    }

    #[test]
    fn test_gradient_without_stops_draws_nothing() {
        let mut ctx = test_context();
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
        ctx.set_fill_style_gradient(gradient);
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        });
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }
}
