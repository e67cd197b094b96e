use crate::{
    assets::{
        decode::{SourceImage, classify_upload, decode_image},
        fonts::FontBook,
    },
    config::{StyleSettings, caption_is_blank, split_caption_lines},
    export::{DEFAULT_SOURCE_NAME, download_name, encode_png},
    foundation::{
        core::OutputRaster,
        error::{SubtitleError, SubtitleResult},
    },
    render::compositor::render_with_fonts,
};

/// What the session currently shows as its output raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    /// Nothing uploaded yet.
    Nothing,
    /// The uploaded image, unchanged.
    Original,
    /// A stitched render of the last caption.
    Rendered,
}

/// Upload / generate / export state for one image at a time.
///
/// Every operation either succeeds completely or leaves the session as it was.
#[derive(Debug)]
pub struct Session {
    image: Option<SourceImage>,
    file_name: String,
    output: Option<OutputRaster>,
    display: Display,
    fonts: FontBook,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Session resolving fonts through the system collection.
    pub fn new() -> Self {
        Self::with_fonts(FontBook::new())
    }

    /// Session using the given font book.
    pub fn with_fonts(fonts: FontBook) -> Self {
        Self {
            image: None,
            file_name: DEFAULT_SOURCE_NAME.to_string(),
            output: None,
            display: Display::Nothing,
            fonts,
        }
    }

    /// Accept an uploaded file and show it unchanged.
    ///
    /// `media_type` is the type the client declared, if any. Files that are not `image/*`
    /// or fail to decode are rejected without touching the current image.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn upload(
        &mut self,
        file_name: &str,
        media_type: Option<&str>,
        bytes: &[u8],
    ) -> SubtitleResult<&SourceImage> {
        let media_type = classify_upload(file_name, media_type)?;
        let image = decode_image(bytes)?;
        tracing::debug!(
            %media_type,
            width = image.width(),
            height = image.height(),
            "decoded upload"
        );

        self.output = Some(original_raster(&image)?);
        self.display = Display::Original;
        self.file_name = file_name.to_string();
        Ok(self.image.insert(image))
    }

    /// Render `caption` with `settings` and make it the displayed output.
    ///
    /// A caption that is empty, or a single blank line, shows the original image instead.
    pub fn generate(
        &mut self,
        caption: &str,
        settings: &StyleSettings,
    ) -> SubtitleResult<&OutputRaster> {
        let image = self.image.as_ref().ok_or(SubtitleError::NoImageLoaded)?;
        let lines = split_caption_lines(caption);

        let (raster, display) = if caption_is_blank(&lines) {
            tracing::debug!("blank caption, showing original image");
            (original_raster(image)?, Display::Original)
        } else {
            let config = settings.to_config(lines);
            (
                render_with_fonts(image, &config, &mut self.fonts)?,
                Display::Rendered,
            )
        };

        self.display = display;
        Ok(self.output.insert(raster))
    }

    /// PNG bytes of the displayed output together with its download name.
    pub fn export(&self) -> SubtitleResult<(String, Vec<u8>)> {
        let raster = self.output.as_ref().ok_or(SubtitleError::NothingToExport)?;
        let bytes = encode_png(raster)?;
        Ok((self.download_name(), bytes))
    }

    /// `<basename>_subtitle.png` for the current file name.
    pub fn download_name(&self) -> String {
        download_name(&self.file_name)
    }

    /// Uploaded image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Name of the uploaded file, or the default name before any upload.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Displayed raster, if any.
    pub fn output(&self) -> Option<&OutputRaster> {
        self.output.as_ref()
    }

    /// What [`Session::output`] currently holds.
    pub fn display(&self) -> Display {
        self.display
    }

    /// Font book used for rendering; register fonts here.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }
}

fn original_raster(image: &SourceImage) -> SubtitleResult<OutputRaster> {
    let mut raster = OutputRaster::transparent(image.width(), image.height())?;
    raster.data.copy_from_slice(image.as_bytes());
    Ok(raster)
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
