//! Background image loading.
//!
//! A background image source may be a local file path, an `http(s)://`
//! URL, or a `data:` URL. Bytes are decoded with the `image` crate into
//! straight-alpha RGBA.
//!
//! There are no retries: a failed load is reported once and the caller
//! degrades gracefully (the render proceeds without the image).

use crate::error::{RenderError, RenderResult};
use base64::Engine;

/// A decoded image ready to composite: straight-alpha RGBA8.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Load and decode an image from a file path, URL, or data URL.
pub fn load_image(source: &str) -> RenderResult<LoadedImage> {
    log::info!("Loading background image: {}", display_source(source));
    let bytes = fetch_bytes(source)?;
    decode_image(&bytes, source)
}

fn fetch_bytes(source: &str) -> RenderResult<Vec<u8>> {
    if let Some(rest) = source.strip_prefix("data:") {
        return decode_data_url(rest);
    }

    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::blocking::get(source)
            .map_err(|e| RenderError::ImageLoad(format!("{}: {}", source, e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::ImageLoad(format!(
                "{}: HTTP status {}",
                source, status
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| RenderError::ImageLoad(format!("{}: {}", source, e)))?;
        return Ok(bytes.to_vec());
    }

    let path = source.strip_prefix("file://").unwrap_or(source);
    std::fs::read(path).map_err(|e| RenderError::ImageLoad(format!("{}: {}", path, e)))
}

/// Decode the payload of a `data:[<mediatype>][;base64],<data>` URL.
fn decode_data_url(rest: &str) -> RenderResult<Vec<u8>> {
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(RenderError::ImageLoad("malformed data URL".to_string()));
    };

    if meta.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| RenderError::ImageLoad(format!("data URL base64: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

fn decode_image(bytes: &[u8], source: &str) -> RenderResult<LoadedImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| RenderError::ImageLoad(format!("{}: {}", display_source(source), e)))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Data URLs can be enormous; keep log lines readable.
fn display_source(source: &str) -> &str {
    if source.starts_with("data:") {
        "data: URL"
    } else {
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1x1 red PNG.
    const TINY_PNG_BASE64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

    #[test]
    fn test_load_data_url() {
        let source = format!("data:image/png;base64,{}", TINY_PNG_BASE64);
        let image = load_image(&source).unwrap();
        assert_eq!(image.width, 1);
        assert_eq!(image.height, 1);
        assert_eq!(image.data.len(), 4);
    }

    #[test]
    fn test_load_file() {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(TINY_PNG_BASE64)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, bytes).unwrap();

        let image = load_image(path.to_str().unwrap()).unwrap();
        assert_eq!((image.width, image.height), (1, 1));
    }

    #[test]
    fn test_missing_file_is_image_load_error() {
        let err = load_image("/no/such/file.png").unwrap_err();
        assert!(matches!(err, RenderError::ImageLoad(_)));
    }

    #[test]
    fn test_malformed_data_url() {
        assert!(load_image("data:image/png;base64").is_err());
        assert!(load_image("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_undecodable_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"hello").unwrap();
        assert!(load_image(path.to_str().unwrap()).is_err());
    }
}
