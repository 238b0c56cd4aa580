//! Path building operations for CanvasContext.
//!
//! Path coordinates are transformed into device space as they are added,
//! matching the Canvas 2D contract that the transform in effect at
//! path-building time (not at fill/stroke time) positions each segment.

use super::CanvasContext;
use crate::geometry::RectParams;
use tiny_skia::Transform;

impl CanvasContext {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path_builder = tiny_skia::PathBuilder::new();
        self.has_current_point = false;
    }

    /// Transform a point by the current transformation matrix.
    pub(crate) fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        Self::map_point_with_transform(&self.state.transform, x, y)
    }

    pub(crate) fn map_point_with_transform(transform: &Transform, x: f32, y: f32) -> (f32, f32) {
        (
            transform.sx * x + transform.kx * y + transform.tx,
            transform.ky * x + transform.sy * y + transform.ty,
        )
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        let (tx, ty) = self.transform_point(x, y);
        self.path_builder.move_to(tx, ty);
        self.current_x = tx;
        self.current_y = ty;
        self.subpath_start_x = tx;
        self.subpath_start_y = ty;
        self.has_current_point = true;
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        let (tx, ty) = self.transform_point(x, y);
        if !self.has_current_point {
            self.path_builder.move_to(tx, ty);
            self.subpath_start_x = tx;
            self.subpath_start_y = ty;
        } else {
            self.path_builder.line_to(tx, ty);
        }
        self.current_x = tx;
        self.current_y = ty;
        self.has_current_point = true;
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        if self.has_current_point {
            self.path_builder.close();
            self.current_x = self.subpath_start_x;
            self.current_y = self.subpath_start_y;
        }
    }

    /// Add a rectangle subpath.
    pub fn rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "rect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.move_to(params.x, params.y);
        self.line_to(params.x + params.width, params.y);
        self.line_to(params.x + params.width, params.y + params.height);
        self.line_to(params.x, params.y + params.height);
        self.close_path();
    }

    /// Add a full circle subpath centered at (x, y).
    ///
    /// Covers the arc(x, y, r, 0, 2π) usage; partial arcs are not needed by
    /// any caller, so the general elliptical-arc machinery was dropped.
    pub fn circle(&mut self, x: f32, y: f32, radius: f32) {
        log::debug!(target: "canvas", "circle {} {} {}", x, y, radius);
        if !(radius.is_finite() && radius > 0.0) {
            return;
        }

        let mut pb = tiny_skia::PathBuilder::new();
        pb.push_circle(x, y, radius);
        let Some(circle) = pb.finish() else {
            return;
        };

        // Append the circle to the current path, pre-transformed like every
        // other segment.
        let transform = self.state.transform;
        for segment in circle.segments() {
            match segment {
                tiny_skia::PathSegment::MoveTo(p) => {
                    let (tx, ty) = Self::map_point_with_transform(&transform, p.x, p.y);
                    self.path_builder.move_to(tx, ty);
                    self.subpath_start_x = tx;
                    self.subpath_start_y = ty;
                    self.current_x = tx;
                    self.current_y = ty;
                    self.has_current_point = true;
                }
                tiny_skia::PathSegment::LineTo(p) => {
                    let (tx, ty) = Self::map_point_with_transform(&transform, p.x, p.y);
                    self.path_builder.line_to(tx, ty);
                    self.current_x = tx;
                    self.current_y = ty;
                }
                tiny_skia::PathSegment::QuadTo(c, p) => {
                    let (cx, cy) = Self::map_point_with_transform(&transform, c.x, c.y);
                    let (tx, ty) = Self::map_point_with_transform(&transform, p.x, p.y);
                    self.path_builder.quad_to(cx, cy, tx, ty);
                    self.current_x = tx;
                    self.current_y = ty;
                }
                tiny_skia::PathSegment::CubicTo(c1, c2, p) => {
                    let (c1x, c1y) = Self::map_point_with_transform(&transform, c1.x, c1.y);
                    let (c2x, c2y) = Self::map_point_with_transform(&transform, c2.x, c2.y);
                    let (tx, ty) = Self::map_point_with_transform(&transform, p.x, p.y);
                    self.path_builder.cubic_to(c1x, c1y, c2x, c2y, tx, ty);
                    self.current_x = tx;
                    self.current_y = ty;
                }
                tiny_skia::PathSegment::Close => {
                    self.path_builder.close();
                    self.current_x = self.subpath_start_x;
                    self.current_y = self.subpath_start_y;
                }
            }
        }
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
        CanvasContext::with_config(100, 100, &config).unwrap()
    }

    #[test]
    fn test_line_path_fill() {
        let mut ctx = test_context();
        ctx.set_fill_style("#00ff00").unwrap();
        ctx.begin_path();
        ctx.move_to(10.0, 10.0);
        ctx.line_to(90.0, 10.0);
        ctx.line_to(90.0, 90.0);
        ctx.line_to(10.0, 90.0);
        ctx.close_path();
        ctx.fill();

        let data = ctx.get_image_data(0, 0, 100, 100);
        let idx = (50 * 100 + 50) * 4;
        assert_eq!(data[idx + 1], 255); // G
        assert_eq!(data[idx + 3], 255); // A
    }

    #[test]
    fn test_circle_fill() {
        let mut ctx = test_context();
        ctx.set_fill_style("#0000ff").unwrap();
        ctx.begin_path();
        ctx.circle(50.0, 50.0, 20.0);
        ctx.fill();

        let data = ctx.get_image_data(0, 0, 100, 100);
        // Center is inside the circle
        let center = (50 * 100 + 50) * 4;
        assert_eq!(data[center + 2], 255);
        // Corner is outside
        let corner = (5 * 100 + 5) * 4;
        assert_eq!(data[corner + 3], 0);
    }

    #[test]
    fn test_circle_respects_transform() {
        let mut ctx = test_context();
        ctx.set_fill_style("#0000ff").unwrap();
        ctx.translate(30.0, 0.0);
        ctx.begin_path();
        ctx.circle(20.0, 50.0, 10.0);
        ctx.fill();

        let data = ctx.get_image_data(0, 0, 100, 100);
        // Device-space center is (50, 50)
        let center = (50 * 100 + 50) * 4;
        assert_eq!(data[center + 2], 255);
        // Untranslated position stays empty
        let original = (50 * 100 + 20) * 4;
        assert_eq!(data[original + 3], 0);
    }

    #[test]
    fn test_zero_radius_circle_is_noop() {
        let mut ctx = test_context();
        ctx.set_fill_style("#0000ff").unwrap();
        ctx.begin_path();
        ctx.circle(50.0, 50.0, 0.0);
        ctx.fill();
        assert!(ctx.pixmap.data().iter().all(|&b| b == 0));
    }
}
