//! Text rendering operations for CanvasContext.

use super::CanvasContext;
use crate::error::CanvasResult;
use crate::font_parser::parse_font;
use crate::shadow::gaussian_blur_rgba;
use crate::style::{TextAlign, TextBaseline};
use crate::text::{self, TextMetrics};
use cosmic_text::{Buffer, Command, Metrics, Shaping};
use tiny_skia::Transform;

impl CanvasContext {
    /// Set the font from a CSS font string.
    pub fn set_font(&mut self, font: &str) -> CanvasResult<()> {
        self.state.font = parse_font(font)?;
        Ok(())
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Set the letter spacing for text rendering (in pixels).
    pub fn set_letter_spacing(&mut self, spacing: f32) {
        if spacing.is_finite() {
            self.state.letter_spacing = spacing;
        }
    }

    /// Measure text with the current font and letter spacing.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        text::measure_text(
            &mut self.font_system,
            text,
            &self.state.font,
            self.state.letter_spacing,
        )
    }

    /// Fill text at the specified position.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        let glyphs = self.layout_glyph_paths(text, x, y);
        let transform = self.state.transform;
        let _ = self.with_fill_paint(|ctx, paint| {
            for (path, gx, gy) in &glyphs {
                let glyph_transform =
                    Transform::from_translate(*gx, *gy).post_concat(transform);
                ctx.pixmap.fill_path(
                    path,
                    paint,
                    tiny_skia::FillRule::Winding,
                    glyph_transform,
                    None,
                );
            }
        });
    }

    /// Stroke text at the specified position.
    ///
    /// Strokes never cast shadows; see [`CanvasContext::draw_text_shadow`].
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText \"{}\" {} {}", text, x, y);
        let glyphs = self.layout_glyph_paths(text, x, y);
        let transform = self.state.transform;
        let stroke = tiny_skia::Stroke {
            width: self.state.line_width,
            line_cap: self.state.line_cap.into(),
            line_join: self.state.line_join.into(),
            miter_limit: self.state.miter_limit,
            dash: None,
        };
        let _ = self.with_stroke_paint(|ctx, paint| {
            for (path, gx, gy) in &glyphs {
                let glyph_transform =
                    Transform::from_translate(*gx, *gy).post_concat(transform);
                ctx.pixmap
                    .stroke_path(path, paint, &stroke, glyph_transform, None);
            }
        });
    }

    /// Draw the shadow of the given text, using the current shadow state.
    ///
    /// Renders the glyph silhouette in the shadow color into a scratch
    /// layer, offset by the shadow offsets (in device space, unaffected by
    /// the transform), blurs it with `sigma = shadow_blur / 2`, and
    /// composites the layer onto the canvas. A separate operation rather
    /// than a side effect of `fill_text` so callers control z-order: shadow
    /// below outline below fill.
    pub fn draw_text_shadow(&mut self, text: &str, x: f32, y: f32) {
        if !self.state.shadow_active() {
            return;
        }
        log::debug!(target: "canvas", "textShadow \"{}\" {} {}", text, x, y);

        let glyphs = self.layout_glyph_paths(text, x, y);
        if glyphs.is_empty() {
            return;
        }

        let Some(mut layer) = tiny_skia::Pixmap::new(self.width, self.height) else {
            return;
        };

        let mut color = self.state.shadow_color;
        if self.state.global_alpha < 1.0 {
            color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
        }
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(color);

        let transform = self.state.transform;
        let dx = self.state.shadow_offset_x;
        let dy = self.state.shadow_offset_y;
        for (path, gx, gy) in &glyphs {
            let glyph_transform = Transform::from_translate(*gx, *gy)
                .post_concat(transform)
                .post_translate(dx, dy);
            layer.fill_path(
                path,
                &paint,
                tiny_skia::FillRule::Winding,
                glyph_transform,
                None,
            );
        }

        if self.state.shadow_blur > 0.0 {
            let sigma = self.state.shadow_blur / 2.0;
            let (w, h) = (self.width as usize, self.height as usize);
            gaussian_blur_rgba(layer.data_mut(), w, h, sigma);
        }

        self.pixmap.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &tiny_skia::PixmapPaint {
                opacity: 1.0,
                blend_mode: self.state.global_composite_operation,
                quality: tiny_skia::FilterQuality::Nearest,
            },
            Transform::identity(),
            None,
        );
    }

    /// Shape `text` with the current font and return one outline path per
    /// glyph together with its sub-pixel position. Alignment and baseline
    /// offsets are already applied; the caller composes the context
    /// transform.
    fn layout_glyph_paths(&mut self, text: &str, x: f32, y: f32) -> Vec<(tiny_skia::Path, f32, f32)> {
        if text.is_empty() {
            return Vec::new();
        }

        let font = self.state.font.clone();
        let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = text::attrs_for_font(&self.font_system, &font, self.state.letter_spacing);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);

        // Get text dimensions for alignment
        let mut text_width: f32 = 0.0;
        let mut text_ascent: f32 = 0.0;
        let mut text_descent: f32 = 0.0;
        for run in buffer.layout_runs() {
            text_width = text_width.max(run.line_w);
            text_ascent = text_ascent.max(run.line_y - run.line_top);
            text_descent = text_descent.max((run.line_top + run.line_height) - run.line_y);
        }
        if text_ascent == 0.0 && text_descent == 0.0 {
            text_ascent = font.size_px * 0.8;
            text_descent = font.size_px * 0.2;
        }

        let x_offset = text::calculate_text_x_offset(text_width, self.state.text_align);
        let y_offset =
            text::calculate_text_y_offset(text_ascent, text_descent, self.state.text_baseline);

        let base_x = x + x_offset;
        let base_y = y + y_offset;

        let mut paths = Vec::new();
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                // The cache key for outline retrieval
                let physical_glyph = glyph.physical((base_x, base_y), 1.0);

                // Floating-point glyph position for sub-pixel precision
                let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, physical_glyph.cache_key)
                else {
                    continue;
                };

                // Font outlines have Y pointing up, screen has Y pointing
                // down, so Y coordinates are negated while building
                let mut path_builder = tiny_skia::PathBuilder::new();
                for cmd in commands {
                    match cmd {
                        Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                        Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                        Command::QuadTo(ctrl, end) => {
                            path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                        }
                        Command::CurveTo(c1, c2, end) => {
                            path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                        }
                        Command::Close => path_builder.close(),
                    }
                }

                if let Some(path) = path_builder.finish() {
                    paths.push((path, glyph_x, glyph_y));
                }
            }
        }
        paths
    }
}
