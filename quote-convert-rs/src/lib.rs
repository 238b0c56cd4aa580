//! quote-convert-rs: headless rendering of styled quote images.
//!
//! A [`QuoteSettings`] value describes everything about a quote image:
//! text content, typography, colors, gradients, shadows, outlines,
//! backgrounds, and curved-text placement. [`render_quote`] turns settings
//! into pixels on a canvas at any square resolution, and the export helpers
//! write PNG files.
//!
//! All pixel-valued settings are defined against a canonical 1080-unit
//! square canvas and rescaled by `target_size / 1080` at render time, so the
//! same routine serves preview-size and export-size output and the two can
//! never drift apart.

pub mod background;
pub mod color;
pub mod curved;
pub mod effects;
pub mod error;
pub mod export;
pub mod image_loading;
pub mod layout;
pub mod renderer;
pub mod settings;

pub use error::{RenderError, RenderResult};
pub use export::{export_quote, ExportResolution};
pub use renderer::{quote_to_png, render_quote};
pub use settings::QuoteSettings;

// Re-export the canvas surface so callers can configure fonts without
// depending on the canvas crate directly.
pub use quote_convert_canvas2d::{CanvasContext, CustomFont, FontConfig, ResolvedFontConfig};

/// Side length of the canonical reference canvas all pixel-valued settings
/// are defined against.
pub const REFERENCE_CANVAS_SIZE: f32 = 1080.0;
