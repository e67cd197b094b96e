//! Canvas geometry: output size, strip rectangles, text anchors and outline width.

use crate::{assets::decode::SourceImage, foundation::core::StripRect};

/// Output canvas size for `line_count` caption lines.
///
/// The first line reuses the image's own bottom strip, so only `line_count - 1` strips are
/// appended: `(W, H + max(0, line_count - 1) * subtitle_height)`.
pub fn compute_output_dimensions(
    source: &SourceImage,
    subtitle_height: u32,
    line_count: usize,
) -> (u32, u32) {
    output_dimensions(source.width(), source.height(), subtitle_height, line_count)
}

pub(crate) fn output_dimensions(
    width: u32,
    height: u32,
    subtitle_height: u32,
    line_count: usize,
) -> (u32, u32) {
    let appended = u32::try_from(line_count.saturating_sub(1)).unwrap_or(u32::MAX);
    (
        width,
        height.saturating_add(appended.saturating_mul(subtitle_height)),
    )
}

/// Vertical center of caption line `index`.
///
/// Line 0 sits inside the original bottom strip; line `i > 0` sits in appended strip `i`.
pub fn line_center_y(source_height: u32, subtitle_height: u32, index: usize) -> f64 {
    let h = f64::from(source_height);
    let sub = f64::from(subtitle_height);
    if index == 0 {
        h - sub / 2.0
    } else {
        h + (index as f64 - 1.0) * sub + sub / 2.0
    }
}

/// Outline width for a font size: `max(2, font_size / 15)`.
pub fn stroke_width(font_size: u32) -> f64 {
    (f64::from(font_size) / 15.0).max(2.0)
}

/// Source strip and the destinations it is cloned to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripPlan {
    /// Bottom `subtitle_height` rows of the original image. `y` is negative when the strip is
    /// taller than the image.
    pub source: StripRect,
    /// One rect per appended strip, top to bottom.
    pub destinations: Vec<StripRect>,
}

/// Strip copies for `line_count` lines. Every destination clones the same source strip.
pub fn plan_strips(
    source_width: u32,
    source_height: u32,
    subtitle_height: u32,
    line_count: usize,
) -> StripPlan {
    let h = i64::from(source_height);
    let sub = i64::from(subtitle_height);
    let source = StripRect::new(0, h - sub, source_width, subtitle_height);
    let destinations = (1..line_count)
        .map(|i| StripRect::new(0, h + (i as i64 - 1) * sub, source_width, subtitle_height))
        .collect();
    StripPlan {
        source,
        destinations,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
