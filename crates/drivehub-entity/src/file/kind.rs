//! File type derivation and the extension to glyph table.

use serde::{Deserialize, Serialize};

/// Glyph shown for folders.
pub const FOLDER_ICON: &str = "📁";
/// Glyph shown for drive nodes.
pub const DRIVE_ICON: &str = "💾";
/// Glyph shown for connected-account nodes.
pub const PROVIDER_ICON: &str = "🔌";
/// Glyph shown for files of an unknown type.
pub const FILE_ICON: &str = "📄";

/// Coarse document category, used for icons and search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Hangul word processor documents.
    Hwp,
    /// Word documents.
    Word,
    /// Spreadsheets.
    Excel,
    /// Slide decks.
    PowerPoint,
    /// Plain text.
    Text,
    /// Raster and vector images.
    Image,
    /// PDF documents.
    Pdf,
    /// Anything else.
    Other,
}

impl FileCategory {
    /// Categorize a lowercase extension (as produced by [`file_type_of`]).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "hwp" => Self::Hwp,
            "doc" | "docx" => Self::Word,
            "xls" | "xlsx" => Self::Excel,
            "ppt" | "pptx" => Self::PowerPoint,
            "txt" => Self::Text,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" => Self::Image,
            "pdf" => Self::Pdf,
            _ => Self::Other,
        }
    }

    /// Extensions matched when filtering by this category.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Hwp => &["hwp"],
            Self::Word => &["doc", "docx"],
            Self::Excel => &["xls", "xlsx"],
            Self::PowerPoint => &["ppt", "pptx"],
            Self::Text => &["txt"],
            Self::Image => &["jpg", "jpeg", "png", "gif", "bmp", "svg"],
            Self::Pdf => &["pdf"],
            Self::Other => &[],
        }
    }

    /// Glyph for files of this category.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Hwp | Self::Word => "📝",
            Self::Excel => "📊",
            Self::PowerPoint => "📈",
            Self::Text => "📃",
            Self::Image => "🖼️",
            Self::Pdf => "📕",
            Self::Other => FILE_ICON,
        }
    }

    /// Parse a user-facing category name (`"word"`, `"powerpoint"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hwp" => Some(Self::Hwp),
            "word" => Some(Self::Word),
            "excel" => Some(Self::Excel),
            "powerpoint" => Some(Self::PowerPoint),
            "txt" | "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "pdf" => Some(Self::Pdf),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Derive a file type from its name: the lowercase text after the last
/// `.`, or an empty string when there is no extension.
pub fn file_type_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Glyph for a file type as returned by [`file_type_of`].
pub fn icon_for_type(file_type: &str) -> &'static str {
    FileCategory::from_extension(file_type).icon()
}
