use std::{borrow::Cow, fmt, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{SubtitleError, SubtitleResult};

/// Generic CSS family keywords that must not be quoted in a font stack.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "emoji",
    "math",
];

/// Whether `name` is a generic family keyword such as `sans-serif` (case-insensitive).
pub(crate) fn is_generic_family(name: &str) -> bool {
    GENERIC_FAMILIES.contains(&name.trim().to_ascii_lowercase().as_str())
}

/// CSS-style font weight token (`normal`, `bold`, `lighter`, `bolder` or `1..=1000`).
///
/// Relative keywords resolve against a `normal` parent, as a lone canvas font string does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontWeightToken {
    /// 400.
    Normal,
    /// 700.
    #[default]
    Bold,
    /// 100 (relative to normal).
    Lighter,
    /// 700 (relative to normal).
    Bolder,
    /// Explicit numeric weight.
    Numeric(u16),
}

impl FontWeightToken {
    /// Numeric weight passed to the shaper.
    pub fn value(self) -> f32 {
        match self {
            Self::Normal => 400.0,
            Self::Bold | Self::Bolder => 700.0,
            Self::Lighter => 100.0,
            Self::Numeric(w) => f32::from(w),
        }
    }
}

impl FromStr for FontWeightToken {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "normal" => return Ok(Self::Normal),
            "bold" => return Ok(Self::Bold),
            "lighter" => return Ok(Self::Lighter),
            "bolder" => return Ok(Self::Bolder),
            _ => {}
        }
        match s.parse::<u16>() {
            Ok(w) if (1..=1000).contains(&w) => Ok(Self::Numeric(w)),
            _ => Err(SubtitleError::validation(format!(
                "font weight \"{s}\" must be normal, bold, lighter, bolder or 1..=1000"
            ))),
        }
    }
}

impl TryFrom<String> for FontWeightToken {
    type Error = SubtitleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FontWeightToken> for String {
    fn from(w: FontWeightToken) -> Self {
        w.to_string()
    }
}

impl fmt::Display for FontWeightToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Bold => f.write_str("bold"),
            Self::Lighter => f.write_str("lighter"),
            Self::Bolder => f.write_str("bolder"),
            Self::Numeric(w) => write!(f, "{w}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley runs (the fill color).
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Font selection for one caption line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Requested family name.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Weight token.
    pub weight: FontWeightToken,
}

/// A single shaped caption line plus the metrics needed to center it.
pub struct ShapedLine {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    /// Advance width of the line in pixels.
    pub width: f32,
    /// Ascent above the baseline (positive).
    pub ascent: f32,
    /// Descent below the baseline (positive).
    pub descent: f32,
    /// Baseline offset from the top of the layout.
    pub baseline: f32,
}

impl fmt::Debug for ShapedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapedLine")
            .field("width", &self.width)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl ShapedLine {
    /// Offset from the layout's top edge to the point a `middle` text baseline sits on.
    pub fn middle_offset(&self) -> f32 {
        self.baseline - (self.ascent - self.descent) / 2.0
    }

    /// Whether shaping produced at least one glyph.
    pub fn has_glyphs(&self) -> bool {
        self.layout.lines().any(|line| {
            line.items().any(|item| match item {
                parley::layout::PositionedLayoutItem::GlyphRun(run) => run.glyphs().next().is_some(),
                _ => false,
            })
        })
    }
}

/// Font collection plus Parley contexts used to shape caption lines.
///
/// Fonts registered explicitly are appended to every font stack ahead of the generic
/// `sans-serif` fallback, so output does not depend on which system fonts happen to exist.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: Vec<String>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontBook")
            .field("registered", &self.registered)
            .finish()
    }
}

impl FontBook {
    /// Font book backed by the system font collection.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    /// Font book that only sees explicitly registered fonts.
    pub fn isolated() -> Self {
        let collection = parley::fontique::Collection::new(parley::fontique::CollectionOptions {
            shared: false,
            system_fonts: false,
        });
        Self {
            font_ctx: parley::FontContext {
                collection,
                source_cache: parley::fontique::SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            registered: Vec::new(),
        }
    }

    /// Register font bytes (TTF/OTF/collection). Returns the family names found.
    pub fn register_font_bytes(&mut self, font_bytes: Vec<u8>) -> SubtitleResult<Vec<String>> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);

        let mut names = Vec::with_capacity(families.len());
        for (family_id, _) in families {
            let name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| SubtitleError::validation("registered font family has no name"))?
                .to_string();
            if !self.registered.contains(&name) {
                self.registered.push(name.clone());
            }
            names.push(name);
        }

        if names.is_empty() {
            return Err(SubtitleError::validation(
                "no font families registered from font bytes",
            ));
        }
        tracing::debug!(families = ?names, "registered font");
        Ok(names)
    }

    /// Read and register a font file.
    pub fn register_font_file(&mut self, path: &Path) -> SubtitleResult<Vec<String>> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.register_font_bytes(bytes)
    }

    /// Family names registered so far, in registration order.
    pub fn registered_families(&self) -> &[String] {
        &self.registered
    }

    /// Whether the collection knows `family` (registered or system).
    pub fn has_family(&mut self, family: &str) -> bool {
        self.font_ctx.collection.family_id(family).is_some()
    }

    /// Whether a named (non-generic) family is unknown and will fall back.
    pub(crate) fn falls_back(&mut self, family: &str) -> bool {
        !is_generic_family(family) && !self.has_family(family)
    }

    /// CSS font-family list: requested family, registered fallbacks, then `sans-serif`.
    pub fn font_stack(&self, family: &str) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.registered.len() + 2);
        let mut push = |name: &str| {
            let name = name.trim();
            if name.is_empty() {
                return;
            }
            let entry = if is_generic_family(name) {
                name.to_ascii_lowercase()
            } else {
                format!("\"{}\"", name.replace('"', ""))
            };
            if !parts.contains(&entry) {
                parts.push(entry);
            }
        };

        push(family);
        for name in &self.registered {
            push(name);
        }
        push("sans-serif");
        parts.join(", ")
    }

    /// Shape one caption line on a single unbroken line.
    pub fn shape_line(&mut self, text: &str, style: &TextStyle) -> SubtitleResult<ShapedLine> {
        self.layout_line(text, style, TextBrushRgba8::default())
    }

    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        style: &TextStyle,
        brush: TextBrushRgba8,
    ) -> SubtitleResult<ShapedLine> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(SubtitleError::validation(
                "font size must be finite and > 0",
            ));
        }

        let stack = self.font_stack(&style.family);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(style.weight.value()),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let (ascent, descent, baseline) = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                (m.ascent, m.descent, m.baseline)
            })
            .ok_or_else(|| SubtitleError::render(format!("no line produced for {text:?}")))?;
        let width = layout.width();

        Ok(ShapedLine {
            layout,
            width,
            ascent,
            descent,
            baseline,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
