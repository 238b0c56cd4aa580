//! Image drawing, pixel data, and PNG output operations for CanvasContext.

use super::CanvasContext;
use crate::error::CanvasResult;
use crate::geometry::CanvasImageDataRef;

impl CanvasContext {
    /// Draw non-premultiplied RGBA image data scaled to the destination
    /// rectangle, honoring global alpha and the current blend mode.
    pub fn draw_image_data_scaled(
        &mut self,
        image: &CanvasImageDataRef<'_>,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) {
        log::debug!(target: "canvas", "drawImage {}x{} at {} {} scaled {}x{}", image.width, image.height, dx, dy, dw, dh);
        if image.width == 0 || image.height == 0 || dw <= 0.0 || dh <= 0.0 {
            return;
        }
        if image.data.len() < (image.width * image.height * 4) as usize {
            return;
        }

        // tiny-skia pixmaps hold premultiplied alpha, image data is straight
        let Some(mut source) = tiny_skia::Pixmap::new(image.width, image.height) else {
            return;
        };
        let dst = source.data_mut();
        for (src_px, dst_px) in image.data.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
            let a = src_px[3];
            let (r, g, b) = match a {
                255 => (src_px[0], src_px[1], src_px[2]),
                0 => (0, 0, 0),
                _ => {
                    let a16 = a as u16;
                    (
                        ((src_px[0] as u16 * a16 + 127) / 255) as u8,
                        ((src_px[1] as u16 * a16 + 127) / 255) as u8,
                        ((src_px[2] as u16 * a16 + 127) / 255) as u8,
                    )
                }
            };
            dst_px[0] = r;
            dst_px[1] = g;
            dst_px[2] = b;
            dst_px[3] = a;
        }

        let paint = tiny_skia::PixmapPaint {
            opacity: self.state.global_alpha,
            blend_mode: self.state.global_composite_operation,
            quality: tiny_skia::FilterQuality::Bilinear,
        };

        let scale_x = dw / image.width as f32;
        let scale_y = dh / image.height as f32;
        let transform = self
            .state
            .transform
            .pre_translate(dx, dy)
            .pre_scale(scale_x, scale_y);

        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    /// Get image data for a region of the canvas (straight alpha RGBA).
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];

        for dy in 0..height {
            for dx in 0..width {
                let src_x = x + dx as i32;
                let src_y = y + dy as i32;

                let dst_idx = ((dy * width + dx) * 4) as usize;

                if src_x >= 0
                    && src_x < self.width as i32
                    && src_y >= 0
                    && src_y < self.height as i32
                {
                    let src_idx = (src_y as u32 * self.width + src_x as u32) as usize;
                    let pixel = &self.pixmap.data()[src_idx * 4..src_idx * 4 + 4];

                    // Convert from premultiplied alpha to straight alpha
                    let a = pixel[3];
                    if a == 0 {
                        data[dst_idx..dst_idx + 4].copy_from_slice(&[0, 0, 0, 0]);
                    } else if a == 255 {
                        data[dst_idx..dst_idx + 4].copy_from_slice(pixel);
                    } else {
                        let alpha_f = a as f32 / 255.0;
                        data[dst_idx] = (pixel[0] as f32 / alpha_f).min(255.0) as u8;
                        data[dst_idx + 1] = (pixel[1] as f32 / alpha_f).min(255.0) as u8;
                        data[dst_idx + 2] = (pixel[2] as f32 / alpha_f).min(255.0) as u8;
                        data[dst_idx + 3] = a;
                    }
                }
            }
        }

        data
    }

    /// Export the canvas as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> CanvasResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;

            // Convert from premultiplied to straight alpha for PNG
            let data = self.get_image_data(0, 0, self.width, self.height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::geometry::{CanvasImageDataRef, RectParams};
    use crate::CanvasContext;

    fn test_context(w: u32, h: u32) -> CanvasContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        CanvasContext::with_config(w, h, &config).unwrap()
    }

    #[test]
    fn test_to_png_signature_and_size() {
        let mut ctx = test_context(16, 16);
        ctx.set_fill_style("#336699").unwrap();
        ctx.fill_rect(&RectParams {
            x: 0.0,
            y: 0.0,
            width: 16.0,
            height: 16.0,
        });

        let png_data = ctx.to_png(None).unwrap();
        // PNG magic bytes
        assert_eq!(&png_data[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_draw_image_data_scaled() {
        let mut ctx = test_context(40, 40);
        // 2x2 opaque red source image
        let src = vec![255, 0, 0, 255].repeat(4);
        let image = CanvasImageDataRef {
            data: &src,
            width: 2,
            height: 2,
        };
        ctx.draw_image_data_scaled(&image, 10.0, 10.0, 20.0, 20.0);

        let data = ctx.get_image_data(0, 0, 40, 40);
        let inside = (20 * 40 + 20) * 4;
        assert_eq!(data[inside], 255);
        assert_eq!(data[inside + 3], 255);
        let outside = (5 * 40 + 5) * 4;
        assert_eq!(data[outside + 3], 0);
    }

    #[test]
    fn test_draw_image_premultiplies_straight_alpha() {
        let mut ctx = test_context(10, 10);
        // Single half-transparent white pixel
        let src = vec![255, 255, 255, 128];
        let image = CanvasImageDataRef {
            data: &src,
            width: 1,
            height: 1,
        };
        ctx.draw_image_data_scaled(&image, 0.0, 0.0, 10.0, 10.0);

        let data = ctx.get_image_data(0, 0, 10, 10);
        let idx = (5 * 10 + 5) * 4;
        // Un-premultiplied read-back is near-white with ~50% alpha
        assert!(data[idx] > 240);
        assert!((data[idx + 3] as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_get_image_data_out_of_bounds_is_transparent() {
        let ctx = test_context(8, 8);
        let data = ctx.get_image_data(-4, -4, 8, 8);
        assert!(data.iter().all(|&b| b == 0));
    }
}
