//! Optional formatting metadata carried by cells

/// Horizontal alignment of a cell's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// General alignment (reader default)
    #[default]
    General,
    /// Left aligned
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

/// Formatting a reader may attach to a cell
///
/// Readers that only see values (CSV) leave this unset; richer readers can
/// record what selections may want to filter on, such as bold header rows or
/// indented sub-category labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFormat {
    /// Bold font
    pub bold: bool,
    /// Italic font
    pub italic: bool,
    /// Underlined font
    pub underline: bool,
    /// Hyperlink target, if any
    pub hyperlink: Option<String>,
    /// Indent level
    pub indent: u8,
    /// Horizontal alignment
    pub alignment: HorizontalAlignment,
}

impl CellFormat {
    /// Create an empty format
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set underline
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Set the indent level
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Set the hyperlink target
    pub fn with_hyperlink(mut self, target: impl Into<String>) -> Self {
        self.hyperlink = Some(target.into());
        self
    }

    /// Set the horizontal alignment
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}
