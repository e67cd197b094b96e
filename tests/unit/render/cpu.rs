use super::*;
use crate::{FontWeightToken, TextStyle, test_support::isolated_font_book};

const W: u32 = 400;
const H: u32 = 100;

fn paint(text: &str) -> (Vec<u8>, f32) {
    let (mut fonts, family) = isolated_font_book();
    let style = TextStyle {
        family,
        size_px: 40.0,
        weight: FontWeightToken::Normal,
    };
    let shaped = fonts.shape_line(text, &style).unwrap();
    let width = shaped.width;
    let line = PlacedLine {
        shaped,
        anchor: kurbo::Point::new(f64::from(W) / 2.0, f64::from(H) / 2.0),
    };
    let outline = OutlineStyle {
        color: ColorDef::black(),
        width: 2.0,
    };
    let layer = TextRasterizer::new()
        .paint_layer(W, H, &[line], outline)
        .unwrap();
    (layer, width)
}

/// Inclusive (first, last) column and row holding any ink.
fn ink_bounds(layer: &[u8]) -> ((u32, u32), (u32, u32)) {
    let inked: Vec<(u32, u32)> = layer
        .chunks_exact(4)
        .enumerate()
        .filter(|(_, px)| px[3] > 0)
        .map(|(i, _)| (i as u32 % W, i as u32 / W))
        .collect();
    assert!(!inked.is_empty(), "nothing was painted");
    let xs = inked.iter().map(|p| p.0);
    let ys = inked.iter().map(|p| p.1);
    (
        (xs.clone().min().unwrap(), xs.max().unwrap()),
        (ys.clone().min().unwrap(), ys.max().unwrap()),
    )
}

#[test]
fn glyphs_advance_across_the_line() {
    for text in ["WWWW", "Hello"] {
        let (layer, width) = paint(text);
        let ((x0, x1), _) = ink_bounds(&layer);
        let span = (x1 - x0 + 1) as f32;
        assert!(
            (span - width).abs() <= width * 0.15,
            "{text:?}: ink span {span} vs shaped width {width}"
        );
        let mid = (x0 + x1) as f32 / 2.0;
        assert!(
            (mid - W as f32 / 2.0).abs() <= 4.0,
            "{text:?}: ink centered on {mid}"
        );
    }
}

#[test]
fn text_sits_on_the_anchor_row() {
    let (layer, _) = paint("HEH");
    let (_, (y0, y1)) = ink_bounds(&layer);
    let mid = (y0 + y1) as f32 / 2.0;
    assert!(
        (mid - H as f32 / 2.0).abs() <= 4.0,
        "ink rows {y0}..={y1} centered on {mid}"
    );
}

#[test]
fn oversized_layer_is_rejected() {
    assert!(
        TextRasterizer::new()
            .paint_layer(70_000, 10, &[], OutlineStyle {
                color: ColorDef::black(),
                width: 2.0,
            })
            .is_err()
    );
}
