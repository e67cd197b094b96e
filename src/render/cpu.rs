use std::collections::HashMap;

use crate::{
    assets::{color::ColorDef, fonts::ShapedLine},
    foundation::error::{SubtitleError, SubtitleResult},
};

/// One shaped caption line and the point its text is centered on.
pub(crate) struct PlacedLine {
    pub(crate) shaped: ShapedLine,
    pub(crate) anchor: kurbo::Point,
}

/// Outline and stroke settings shared by every line of a render.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OutlineStyle {
    pub(crate) color: ColorDef,
    pub(crate) width: f64,
}

/// Rasterizes outlined caption text into a transparent premultiplied RGBA8 layer.
#[derive(Default)]
pub(crate) struct TextRasterizer {
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl TextRasterizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Paint `lines` onto a `width x height` layer; stroke first, fill on top.
    pub(crate) fn paint_layer(
        &mut self,
        width: u32,
        height: u32,
        lines: &[PlacedLine],
        outline: OutlineStyle,
    ) -> SubtitleResult<Vec<u8>> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SubtitleError::validation("canvas width exceeds 65535"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SubtitleError::validation("canvas height exceeds 65535"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        let stroke = vello_cpu::kurbo::Stroke::new(outline.width)
            .with_join(vello_cpu::kurbo::Join::Miter)
            .with_miter_limit(10.0);

        for line in lines {
            self.draw_line(&mut ctx, line, &stroke, outline.color);
        }

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        line: &PlacedLine,
        stroke: &vello_cpu::kurbo::Stroke,
        outline: ColorDef,
    ) {
        let shaped = &line.shaped;
        let dx = line.anchor.x - f64::from(shaped.width) / 2.0;
        let dy = line.anchor.y - f64::from(shaped.middle_offset());

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));
        ctx.set_stroke(stroke.clone());

        for layout_line in shaped.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let font = {
                    let f = run.run().font();
                    self.font_cache
                        .entry((f.data.id(), f.index))
                        .or_insert_with(|| {
                            vello_cpu::peniko::FontData::new(
                                vello_cpu::peniko::Blob::from(f.data.data().to_vec()),
                                f.index,
                            )
                        })
                        .clone()
                };
                let font_size = run.run().font_size();
                // Layout coordinates: run offset plus advances along x, baseline on y.
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }

                ctx.set_paint(outline.to_cpu());
                ctx.glyph_run(&font)
                    .font_size(font_size)
                    .stroke_glyphs(glyphs.clone().into_iter());

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                ctx.glyph_run(&font)
                    .font_size(font_size)
                    .fill_glyphs(glyphs.into_iter());
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
