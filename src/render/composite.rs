use crate::{
    assets::decode::{SourceImage, premultiply, unpremultiply},
    foundation::core::{OutputRaster, StripRect},
    foundation::error::{SubtitleError, SubtitleResult},
};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Copy the whole source image to the canvas origin.
pub(crate) fn blit_source(canvas: &mut OutputRaster, source: &SourceImage) -> SubtitleResult<()> {
    if canvas.width != source.width() || canvas.height < source.height() {
        return Err(SubtitleError::render(
            "canvas is smaller than the source image",
        ));
    }
    let len = source.as_bytes().len();
    canvas.data[..len].copy_from_slice(source.as_bytes());
    Ok(())
}

/// Copy full-width rows `src` of the source image to `dst` on the canvas.
///
/// Rows of `src` outside the image are skipped and the destination shifts by the same amount,
/// matching a 1:1 `drawImage` with a partially out-of-range source rectangle. Rows that land
/// outside the canvas are dropped. Returns the number of rows written.
pub(crate) fn copy_strip(
    canvas: &mut OutputRaster,
    source: &SourceImage,
    src: StripRect,
    dst: StripRect,
) -> SubtitleResult<u32> {
    if src.x != 0 || dst.x != 0 || src.w != source.width() || dst.w != canvas.width {
        return Err(SubtitleError::render("strip copies must span the full width"));
    }
    if src.h != dst.h {
        return Err(SubtitleError::render("strip source and destination heights differ"));
    }

    let src_y0 = src.y.max(0);
    let src_y1 = src.bottom().min(i64::from(source.height()));
    if src_y1 <= src_y0 {
        return Ok(0);
    }
    let shift = src_y0 - src.y;
    let dst_y0 = dst.y + shift;
    let dst_y1 = (dst_y0 + (src_y1 - src_y0)).min(i64::from(canvas.height));
    if dst_y0 < 0 || dst_y1 <= dst_y0 {
        return Ok(0);
    }
    let rows = (dst_y1 - dst_y0) as u32;
    let src_y0 = src_y0 as u32;
    let dst_y0 = dst_y0 as u32;

    let stride = canvas.stride();
    let from = source.rows(src_y0, src_y0 + rows);
    let start = dst_y0 as usize * stride;
    canvas.data[start..start + rows as usize * stride].copy_from_slice(from);
    Ok(rows)
}

/// Composite a premultiplied layer over the straight-alpha canvas.
///
/// Pixels the layer leaves fully transparent are not touched, so they stay bit-identical.
pub(crate) fn over_layer_in_place(canvas: &mut [u8], layer_premul: &[u8]) -> SubtitleResult<()> {
    if canvas.len() != layer_premul.len() || !canvas.len().is_multiple_of(4) {
        return Err(SubtitleError::render(
            "over_layer_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in canvas.chunks_exact_mut(4).zip(layer_premul.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let dst = premultiply([d[0], d[1], d[2], d[3]]);
        let out = unpremultiply(over(dst, [s[0], s[1], s[2], s[3]]));
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
