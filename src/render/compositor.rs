//! Stitched-canvas compositor: base image, cloned bottom strips, outlined caption text.

use crate::{
    assets::{decode::SourceImage, fonts::FontBook, fonts::TextBrushRgba8},
    config::RenderConfig,
    foundation::core::OutputRaster,
    foundation::error::{SubtitleError, SubtitleResult},
    render::{
        composite::{blit_source, copy_strip, over_layer_in_place},
        cpu::{OutlineStyle, PlacedLine, TextRasterizer},
        layout::{line_center_y, output_dimensions, plan_strips, stroke_width},
    },
};

/// Largest canvas side the text rasterizer accepts.
const MAX_CANVAS_SIDE: u32 = u16::MAX as u32;

/// Render with a font book backed by the system fonts.
pub fn render(source: &SourceImage, config: &RenderConfig) -> SubtitleResult<OutputRaster> {
    let mut fonts = FontBook::new();
    render_with_fonts(source, config, &mut fonts)
}

/// Render `config.lines` onto a stitched canvas built from `source`.
///
/// Steps:
/// 1. allocate `W x (H + (n - 1) * subtitle_height)`;
/// 2. paint the source at the origin;
/// 3. clone the source's bottom strip under it once per extra line;
/// 4. paint each non-empty line centered on `W / 2` and its strip's center, outline first.
///
/// The same inputs (and fonts) always produce the same bytes.
#[tracing::instrument(
    skip_all,
    fields(
        width = source.width(),
        height = source.height(),
        lines = config.line_count(),
        subtitle_height = config.subtitle_height,
        font_color = %config.font_color.to_hex(),
        outline_color = %config.outline_color.to_hex(),
    )
)]
pub fn render_with_fonts(
    source: &SourceImage,
    config: &RenderConfig,
    fonts: &mut FontBook,
) -> SubtitleResult<OutputRaster> {
    config.validate()?;

    let (w, h) = (source.width(), source.height());
    let sub_h = config.subtitle_height;
    let line_count = config.line_count();
    let (out_w, out_h) = output_dimensions(w, h, sub_h, line_count);
    if out_w > MAX_CANVAS_SIDE || out_h > MAX_CANVAS_SIDE {
        return Err(SubtitleError::validation(format!(
            "output canvas {out_w}x{out_h} exceeds {MAX_CANVAS_SIDE}px per side"
        )));
    }

    let mut canvas = OutputRaster::transparent(out_w, out_h)?;
    blit_source(&mut canvas, source)?;

    let plan = plan_strips(w, h, sub_h, line_count);
    for dst in &plan.destinations {
        let rows = copy_strip(&mut canvas, source, plan.source, *dst)?;
        tracing::trace!(dst_y = dst.y, rows, "cloned bottom strip");
    }

    if fonts.falls_back(&config.font_family) {
        tracing::warn!(
            family = %config.font_family,
            "font family not found, falling back"
        );
    }

    let style = config.text_style();
    let brush = TextBrushRgba8::from(config.font_color.to_rgba8());
    let center_x = f64::from(w) / 2.0;
    let mut placed = Vec::with_capacity(line_count);
    for (index, text) in config.lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let shaped = fonts.layout_line(text, &style, brush)?;
        if !shaped.has_glyphs() && !text.trim().is_empty() {
            return Err(SubtitleError::render(format!(
                "no usable font for {:?} (stack: {})",
                config.font_family,
                fonts.font_stack(&config.font_family)
            )));
        }
        placed.push(PlacedLine {
            shaped,
            anchor: kurbo::Point::new(center_x, line_center_y(h, sub_h, index)),
        });
    }

    if !placed.is_empty() {
        let outline = OutlineStyle {
            color: config.outline_color,
            width: stroke_width(config.font_size),
        };
        let layer = TextRasterizer::new().paint_layer(out_w, out_h, &placed, outline)?;
        over_layer_in_place(&mut canvas.data, &layer)?;
    }

    tracing::debug!(out_w, out_h, painted = placed.len(), "rendered stitched canvas");
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
