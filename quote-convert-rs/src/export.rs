//! Export orchestration: render at a target resolution and write a PNG.
//!
//! Exports never upscale a preview bitmap; they re-run the full rendering
//! routine at the target pixel size so text stays crisp (see
//! [`crate::render_quote`]).

use crate::error::{RenderError, RenderResult};
use crate::renderer;
use crate::settings::QuoteSettings;
use quote_convert_canvas2d::ResolvedFontConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output resolution of an export: the preview size, a named preset, or a
/// custom square pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResolution {
    /// 1080 x 1080, the canonical preview size.
    Preview,
    /// 1920 x 1920.
    Hd,
    /// 2560 x 2560.
    TwoK,
    /// 4096 x 4096.
    FourK,
    /// An arbitrary square pixel size.
    Custom(u32),
}

impl ExportResolution {
    /// Side length in pixels.
    pub fn pixels(&self) -> u32 {
        match self {
            ExportResolution::Preview => 1080,
            ExportResolution::Hd => 1920,
            ExportResolution::TwoK => 2560,
            ExportResolution::FourK => 4096,
            ExportResolution::Custom(px) => *px,
        }
    }
}

impl Default for ExportResolution {
    fn default() -> Self {
        ExportResolution::Preview
    }
}

impl FromStr for ExportResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preview" | "1080" => Ok(ExportResolution::Preview),
            "hd" | "1920" => Ok(ExportResolution::Hd),
            "2k" | "2560" => Ok(ExportResolution::TwoK),
            "4k" | "4096" => Ok(ExportResolution::FourK),
            other => match other.parse::<u32>() {
                Ok(px) if px > 0 => Ok(ExportResolution::Custom(px)),
                _ => Err(format!(
                    "invalid resolution '{}' (expected 1080, hd, 2k, 4k, or a pixel size)",
                    s
                )),
            },
        }
    }
}

/// The default export filename: `quote-<size>px-<timestamp>.png`.
pub fn default_filename(resolution: ExportResolution, timestamp_ms: i64) -> String {
    format!("quote-{}px-{}.png", resolution.pixels(), timestamp_ms)
}

/// Render the settings at the requested resolution and write a PNG file.
///
/// When `output` is None the file lands in the current directory under the
/// default timestamped name. The PNG is fully encoded in memory before
/// anything touches the filesystem, so a failed render leaves no partial
/// file behind. Returns the path written.
pub fn export_quote(
    settings: &QuoteSettings,
    resolution: ExportResolution,
    fonts: &ResolvedFontConfig,
    output: Option<&Path>,
    ppi: Option<f32>,
) -> RenderResult<PathBuf> {
    let png_data = renderer::quote_to_png(settings, resolution.pixels(), fonts, ppi)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_filename(
            resolution,
            chrono::Utc::now().timestamp_millis(),
        )),
    };

    std::fs::write(&path, &png_data).map_err(RenderError::Io)?;
    log::info!(
        "Wrote {} ({} bytes, {}x{})",
        path.display(),
        png_data.len(),
        resolution.pixels(),
        resolution.pixels()
    );
    Ok(path)
}
