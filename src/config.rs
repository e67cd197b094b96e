//! Render configuration and the tolerant form-style settings it is built from.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::{color::ColorDef, fonts::FontWeightToken, fonts::TextStyle},
    foundation::error::{SubtitleError, SubtitleResult},
};

/// Strip height used when the setting is missing or not a positive integer.
pub const DEFAULT_SUBTITLE_HEIGHT: u32 = 80;
/// Font size used when the setting is missing or not a positive integer.
pub const DEFAULT_FONT_SIZE: u32 = 40;
/// Family used when none is configured.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Fully resolved input to one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Height of each caption strip in pixels.
    pub subtitle_height: u32,
    /// Font size in pixels.
    pub font_size: u32,
    /// Text fill color.
    pub font_color: ColorDef,
    /// Text outline (stroke) color.
    pub outline_color: ColorDef,
    /// Requested font family.
    pub font_family: String,
    /// Font weight token.
    pub font_weight: FontWeightToken,
    /// Caption lines, one strip each. Empty strings keep their strip.
    pub lines: Vec<String>,
}

impl RenderConfig {
    /// Config with every style field at its default.
    pub fn with_lines(lines: Vec<String>) -> Self {
        Self {
            subtitle_height: DEFAULT_SUBTITLE_HEIGHT,
            font_size: DEFAULT_FONT_SIZE,
            font_color: ColorDef::white(),
            outline_color: ColorDef::black(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeightToken::default(),
            lines,
        }
    }

    /// Number of caption strips.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check the invariants the compositor relies on.
    pub fn validate(&self) -> SubtitleResult<()> {
        if self.subtitle_height == 0 {
            return Err(SubtitleError::validation("subtitle_height must be > 0"));
        }
        if self.font_size == 0 {
            return Err(SubtitleError::validation("font_size must be > 0"));
        }
        if self.lines.is_empty() {
            return Err(SubtitleError::validation(
                "at least one caption line is required",
            ));
        }
        Ok(())
    }

    pub(crate) fn text_style(&self) -> TextStyle {
        TextStyle {
            family: self.font_family.clone(),
            size_px: self.font_size as f32,
            weight: self.font_weight,
        }
    }
}

/// Raw style settings as a form (or a JSON style file) delivers them.
///
/// Pixel fields accept numbers or strings and are parsed like `parseInt`; anything that does
/// not yield a positive integer falls back to the default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Strip height, e.g. `"80"` or `80`.
    #[serde(deserialize_with = "de_px")]
    pub subtitle_height: Option<String>,
    /// Font size, e.g. `"40px"` or `40`.
    #[serde(deserialize_with = "de_px")]
    pub font_size: Option<String>,
    /// Text fill color.
    pub font_color: Option<ColorDef>,
    /// Text outline color.
    pub outline_color: Option<ColorDef>,
    /// Font family name.
    pub font_family: Option<String>,
    /// Font weight token.
    pub font_weight: Option<FontWeightToken>,
}

impl StyleSettings {
    /// Load settings from a JSON file.
    pub fn from_json_path(path: &Path) -> SubtitleResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read style settings '{}'", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parse style settings '{}'", path.display()))?;
        Ok(settings)
    }

    /// Fields set in `over` win over fields set in `self`.
    pub fn merged_with(self, over: StyleSettings) -> Self {
        Self {
            subtitle_height: over.subtitle_height.or(self.subtitle_height),
            font_size: over.font_size.or(self.font_size),
            font_color: over.font_color.or(self.font_color),
            outline_color: over.outline_color.or(self.outline_color),
            font_family: over.font_family.or(self.font_family),
            font_weight: over.font_weight.or(self.font_weight),
        }
    }

    /// Resolve into a [`RenderConfig`] for `lines`, applying defaults.
    pub fn to_config(&self, lines: Vec<String>) -> RenderConfig {
        let mut config = RenderConfig::with_lines(lines);
        config.subtitle_height = self
            .subtitle_height
            .as_deref()
            .and_then(parse_px)
            .unwrap_or(DEFAULT_SUBTITLE_HEIGHT);
        config.font_size = self
            .font_size
            .as_deref()
            .and_then(parse_px)
            .unwrap_or(DEFAULT_FONT_SIZE);
        if let Some(c) = self.font_color {
            config.font_color = c;
        }
        if let Some(c) = self.outline_color {
            config.outline_color = c;
        }
        if let Some(f) = self.font_family.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            config.font_family = f.to_string();
        }
        if let Some(w) = self.font_weight {
            config.font_weight = w;
        }
        config
    }
}

fn de_px<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Repr>::deserialize(deserializer)? {
        None => None,
        Some(Repr::Int(v)) => Some(v.to_string()),
        Some(Repr::Float(v)) => Some(v.to_string()),
        Some(Repr::Text(s)) => Some(s),
    })
}

/// Parse a pixel value the way `parseInt(raw) || default` treats form input.
///
/// Leading whitespace and an optional sign are accepted, then the leading decimal digits are
/// taken and the rest ignored (`"12px"` is 12). Returns `None` for no digits, zero, negative or
/// out-of-range values.
pub fn parse_px(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: u32 = rest[..digits_len].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}

/// Split caption text into lines, keeping empty lines (including a trailing one).
///
/// A `\r` before each `\n` is dropped so CRLF input behaves like LF input.
pub fn split_caption_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect()
}

/// Whether caption input means "show the image without text".
pub(crate) fn caption_is_blank(lines: &[String]) -> bool {
    match lines {
        [] => true,
        [only] => only.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
