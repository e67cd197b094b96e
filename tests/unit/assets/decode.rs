use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_rgba() {
    let buf = png_bytes(3, 2, [100, 50, 200, 128]);
    let img = decode_image(&buf).unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(&img.as_bytes()[..4], &[100, 50, 200, 128]);
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, SubtitleError::Decode(_)));
}

#[test]
fn from_rgba8_rejects_empty_and_mismatched() {
    assert!(SourceImage::from_rgba8(0, 1, vec![]).is_err());
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(SourceImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn media_type_guess_from_extension() {
    assert_eq!(media_type_for_name("photo.JPG"), Some("image/jpeg"));
    assert_eq!(media_type_for_name("a.png"), Some("image/png"));
    assert_eq!(media_type_for_name("notes.txt"), None);
    assert_eq!(media_type_for_name("README"), None);
}

#[test]
fn classify_upload_prefers_declared_type() {
    assert_eq!(
        classify_upload("weird.bin", Some("image/webp")).unwrap(),
        "image/webp"
    );
    let err = classify_upload("photo.png", Some("text/plain")).unwrap_err();
    assert!(matches!(err, SubtitleError::InvalidUpload(_)));
}

#[test]
fn classify_upload_falls_back_to_extension() {
    assert_eq!(classify_upload("x.gif", None).unwrap(), "image/gif");
    assert_eq!(classify_upload("x.gif", Some("  ")).unwrap(), "image/gif");
    assert!(matches!(
        classify_upload("x.pdf", None),
        Err(SubtitleError::InvalidUpload(_))
    ));
}

#[test]
fn premultiply_matches_rounding() {
    assert_eq!(
        premultiply([100, 50, 200, 128]),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(premultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_opaque_and_transparent_are_exact() {
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply([64, 0, 128, 128]), [128, 0, 255, 128]);
}
