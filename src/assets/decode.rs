use std::sync::Arc;

use crate::foundation::error::{SubtitleError, SubtitleResult};

/// Decoded, immutable source raster in straight RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Wrap row-major straight RGBA8 pixels. Both dimensions must be non-zero.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SubtitleResult<Self> {
        if width == 0 || height == 0 {
            return Err(SubtitleError::decode("image dimensions must be > 0"));
        }
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(SubtitleError::decode("rgba8 byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major straight RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.rgba8.as_slice()
    }

    /// Borrow rows `y0..y1`.
    pub fn rows(&self, y0: u32, y1: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        &self.rgba8[y0 as usize * stride..y1 as usize * stride]
    }
}

/// Decode encoded image bytes (any format the `image` crate recognizes).
pub fn decode_image(bytes: &[u8]) -> SubtitleResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SubtitleError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

/// Guess an `image/*` media type from a file name's extension.
pub fn media_type_for_name(file_name: &str) -> Option<&'static str> {
    image::ImageFormat::from_path(file_name)
        .ok()
        .map(|f| f.to_mime_type())
}

/// Resolve the media type of an upload and reject anything that is not `image/*`.
///
/// A declared type (as a browser would report it) takes precedence over the extension guess.
pub fn classify_upload(file_name: &str, declared: Option<&str>) -> SubtitleResult<String> {
    let media_type = match declared.map(str::trim).filter(|s| !s.is_empty()) {
        Some(t) => t.to_ascii_lowercase(),
        None => media_type_for_name(file_name)
            .unwrap_or("application/octet-stream")
            .to_string(),
    };

    if !media_type.starts_with("image/") {
        return Err(SubtitleError::invalid_upload(format!(
            "'{file_name}' is {media_type}, please upload an image file"
        )));
    }
    Ok(media_type)
}

pub(crate) fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3] as u16;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let p = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    [p(px[0]), p(px[1]), p(px[2]), px[3]]
}

pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = px[3] as u16;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let u = |c: u8| ((c as u16 * 255 + a / 2) / a).min(255) as u8;
    [u(px[0]), u(px[1]), u(px[2]), px[3]]
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
