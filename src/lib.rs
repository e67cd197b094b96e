//! subtitle-stitch turns an image plus a few caption lines into a single stacked image.
//!
//! The first caption line is drawn over the bottom strip of the original image. Every further
//! line gets its own strip, cloned from that same bottom edge and appended underneath, so the
//! result reads like a stack of movie frames sharing one picture.
//!
//! # Pipeline overview
//!
//! 1. **Upload**: classify and decode the input into a [`SourceImage`] ([`Session::upload`]).
//! 2. **Configure**: turn form-style settings into a [`RenderConfig`] ([`StyleSettings`]).
//! 3. **Render**: [`render`] sizes the canvas, clones strips and paints outlined text.
//! 4. **Export**: [`encode_png`] produces the bytes for `<name>_subtitle.png`.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same image, config and fonts always produce the same pixels.
//! - **No IO in the compositor**: decoding and font loading happen before [`render`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod export;
mod foundation;
mod render;
mod session;

pub use assets::color::ColorDef;
pub use assets::decode::{SourceImage, classify_upload, decode_image, media_type_for_name};
pub use assets::fonts::{FontBook, FontWeightToken, ShapedLine, TextStyle};
pub use config::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_SUBTITLE_HEIGHT, RenderConfig, StyleSettings,
    parse_px, split_caption_lines,
};
pub use export::{DEFAULT_SOURCE_NAME, download_name, encode_png};
pub use foundation::core::{OutputRaster, StripRect};
pub use foundation::error::{SubtitleError, SubtitleResult};
pub use render::compositor::{render, render_with_fonts};
pub use render::layout::{
    StripPlan, compute_output_dimensions, line_center_y, plan_strips, stroke_width,
};
pub use session::{Display, Session};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
