use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::{core::OutputRaster, error::SubtitleResult};

/// File name assumed for the source before anything was uploaded.
pub const DEFAULT_SOURCE_NAME: &str = "subtitle_image.png";

const DOWNLOAD_SUFFIX: &str = "_subtitle.png";

/// Download name for a render of `original`: `<basename>_subtitle.png`.
///
/// Only the last extension is stripped (`archive.tar.gz` -> `archive.tar`). A name without a
/// `.`, or one that would strip to nothing (`.bashrc`), is used whole.
pub fn download_name(original: &str) -> String {
    let base = match original.rfind('.') {
        Some(0) | None => original,
        Some(dot) => &original[..dot],
    };
    format!("{base}{DOWNLOAD_SUFFIX}")
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &OutputRaster) -> SubtitleResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.data.clone())
        .context("raster buffer does not match its dimensions")?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    tracing::debug!(
        width = raster.width,
        height = raster.height,
        bytes = out.get_ref().len(),
        "encoded png"
    );
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
