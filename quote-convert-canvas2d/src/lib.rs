//! Canvas 2D style drawing surface using tiny-skia and cosmic-text.
//!
//! This crate provides the subset of the Canvas 2D API that the quote
//! renderer draws against, without a browser or JavaScript runtime:
//! - `tiny-skia` for 2D rasterization
//! - `cosmic-text` for text shaping, measurement, and glyph outlines
//! - `fontdb` for font database management
//!
//! Beyond the browser API subset it also implements text shadows
//! (blurred, offset glyph silhouettes) as an explicit drawing operation,
//! see [`CanvasContext::draw_text_shadow`].
//!
//! # Example
//!
//! ```rust,ignore
//! use quote_convert_canvas2d::CanvasContext;
//!
//! let mut ctx = CanvasContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png(None)?;
//! ```

mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod shadow;
mod style;
mod text;

// Re-export public API
pub use context::{parse_color, CanvasContext};
pub use drawing_state::DrawingState;
pub use error::{CanvasError, CanvasResult};
pub use font_config::{font_config_to_fontdb, CustomFont, FontConfig, GenericFamilyMap, ResolvedFontConfig};
pub use font_parser::{parse_font, ParsedFont};
pub use geometry::{CanvasColor, CanvasImageDataRef, RadialGradientParams, RectParams};
pub use gradient::{CanvasGradient, GradientStop, GradientType};
pub use style::{FillStyle, LineCap, LineJoin, TextAlign, TextBaseline};
pub use text::TextMetrics;
