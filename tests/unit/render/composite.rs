use super::*;
use crate::test_support::row_coded_source;

#[test]
fn over_transparent_src_keeps_dst() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [200, 0, 0, 255]), [200, 0, 0, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 200, 255], [128, 0, 0, 128]);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 128);
    assert_eq!(out[2], ((200u32 * 127 + 127) / 255) as u8);
}

#[test]
fn blit_then_copy_clones_bottom_rows() {
    let src = row_coded_source(4, 10);
    let mut canvas = OutputRaster::transparent(4, 16).unwrap();
    blit_source(&mut canvas, &src).unwrap();
    let rows = copy_strip(
        &mut canvas,
        &src,
        StripRect::new(0, 7, 4, 3),
        StripRect::new(0, 10, 4, 3),
    )
    .unwrap();
    assert_eq!(rows, 3);
    assert_eq!(canvas.rows(10, 13), src.rows(7, 10));
    assert_eq!(canvas.rows(0, 10), src.as_bytes());
    assert!(canvas.rows(13, 16).iter().all(|&b| b == 0));
}

#[test]
fn tall_source_rect_is_clipped_and_shifted() {
    let src = row_coded_source(2, 4);
    let mut canvas = OutputRaster::transparent(2, 10).unwrap();
    blit_source(&mut canvas, &src).unwrap();
    let rows = copy_strip(
        &mut canvas,
        &src,
        StripRect::new(0, -2, 2, 6),
        StripRect::new(0, 4, 2, 6),
    )
    .unwrap();
    assert_eq!(rows, 4);
    // Two clipped rows at the top of the strip stay transparent.
    assert!(canvas.rows(4, 6).iter().all(|&b| b == 0));
    assert_eq!(canvas.rows(6, 10), src.as_bytes());
}

#[test]
fn copy_past_canvas_bottom_is_truncated() {
    let src = row_coded_source(2, 4);
    let mut canvas = OutputRaster::transparent(2, 5).unwrap();
    let rows = copy_strip(
        &mut canvas,
        &src,
        StripRect::new(0, 0, 2, 4),
        StripRect::new(0, 3, 2, 4),
    )
    .unwrap();
    assert_eq!(rows, 2);
    assert_eq!(canvas.rows(3, 5), src.rows(0, 2));
}

#[test]
fn copy_rejects_partial_width() {
    let src = row_coded_source(4, 4);
    let mut canvas = OutputRaster::transparent(4, 8).unwrap();
    assert!(
        copy_strip(
            &mut canvas,
            &src,
            StripRect::new(0, 0, 2, 2),
            StripRect::new(0, 4, 2, 2),
        )
        .is_err()
    );
}

#[test]
fn layer_leaves_untouched_pixels_identical() {
    let mut canvas = vec![1u8, 2, 3, 77, 9, 8, 7, 255];
    let layer = vec![0u8, 0, 0, 0, 255, 255, 255, 255];
    over_layer_in_place(&mut canvas, &layer).unwrap();
    assert_eq!(&canvas[..4], &[1, 2, 3, 77]);
    assert_eq!(&canvas[4..], &[255, 255, 255, 255]);
}

#[test]
fn layer_length_mismatch_is_error() {
    let mut canvas = vec![0u8; 8];
    assert!(over_layer_in_place(&mut canvas, &[0u8; 4]).is_err());
}
