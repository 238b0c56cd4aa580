//! Transform operations for CanvasContext.

use super::CanvasContext;
use tiny_skia::Transform;

impl CanvasContext {
    /// Translate the canvas.
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    /// Rotate the canvas by an angle in radians.
    pub fn rotate(&mut self, angle: f32) {
        log::debug!(target: "canvas", "rotate {}", angle);
        let cos = angle.cos();
        let sin = angle.sin();
        let rotation = Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0);
        self.state.transform = self.state.transform.pre_concat(rotation);
    }

    /// Scale the canvas.
    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.transform = self.state.transform.pre_scale(x, y);
    }

    /// Reset the transform to identity.
    pub fn reset_transform(&mut self) {
        log::debug!(target: "canvas", "resetTransform");
        self.state.transform = Transform::identity();
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::CanvasContext;

    fn test_context() -> CanvasContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        CanvasContext::with_config(64, 64, &config).unwrap()
    }

    #[test]
    fn test_translate_accumulates() {
        let mut ctx = test_context();
        ctx.translate(5.0, 7.0);
        ctx.translate(3.0, 1.0);
        assert_eq!(ctx.state.transform.tx, 8.0);
        assert_eq!(ctx.state.transform.ty, 8.0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut ctx = test_context();
        ctx.rotate(std::f32::consts::FRAC_PI_2);
        let t = ctx.state.transform;
        // cos(pi/2) ~ 0, sin(pi/2) = 1
        assert!(t.sx.abs() < 1e-6);
        assert!((t.ky - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_transform() {
        let mut ctx = test_context();
        ctx.translate(10.0, 10.0);
        ctx.rotate(1.0);
        ctx.reset_transform();
        assert_eq!(ctx.state.transform, tiny_skia::Transform::identity());
    }
}
