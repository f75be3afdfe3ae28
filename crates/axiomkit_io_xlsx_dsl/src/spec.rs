//! Shared builder specification models.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;

use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::{
    BorderSide, EnumBorderStyle, EnumFit, EnumFontStyle, EnumForegroundFill, EnumKeyword,
    EnumOrientation, EnumPaper, EnumText, HorizontalAlignment, VerticalAlignment,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueSpecification

/// Declared cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
    /// Formula text, stored and emitted but never evaluated.
    Formula(String),
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        EnumCellValue::Number(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<i32> for EnumCellValue {
    fn from(value: i32) -> Self {
        EnumCellValue::Number(value as f64)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        EnumCellValue::Boolean(value)
    }
}

impl EnumCellValue {
    /// Text as displayed, used for width estimation.
    pub fn display_text(&self) -> String {
        match self {
            EnumCellValue::None => String::new(),
            EnumCellValue::String(s) => s.clone(),
            EnumCellValue::Number(n) => n.to_string(),
            EnumCellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            EnumCellValue::Formula(_) => String::new(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellStyleSpecification

/// Inline cell style.
///
/// Every field is optional; [`SpecCellStyle::merge`] overlays a patch with
/// right-side non-`None` overwrite semantics, font styles are unioned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellStyle {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Font color (`#RRGGBB`).
    pub font_color: Option<String>,
    /// Font style flags.
    pub font_styles: BTreeSet<EnumFontStyle>,

    /// Horizontal alignment.
    pub align: Option<EnumKeyword>,
    /// Vertical alignment.
    pub valign: Option<EnumKeyword>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Border style per side.
    pub borders: BTreeMap<BorderSide, EnumBorderStyle>,
    /// Border color for all configured sides.
    pub border_color: Option<String>,
    /// Border color overriding `border_color` for one side.
    pub border_colors: BTreeMap<BorderSide, String>,

    /// Fill pattern.
    pub fill: Option<EnumForegroundFill>,
    /// Pattern foreground color.
    pub foreground: Option<String>,
    /// Pattern background color.
    pub background: Option<String>,

    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellStyle {
    /// Return a new style by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellStyle) -> SpecCellStyle {
        self.merge(&patch)
    }

    /// Merge two styles with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellStyle) -> SpecCellStyle {
        SpecCellStyle {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
            font_styles: self.font_styles.union(&other.font_styles).copied().collect(),
            align: other.align.or(self.align),
            valign: other.valign.or(self.valign),
            text_wrap: other.text_wrap.or(self.text_wrap),
            borders: overlay_map(&self.borders, &other.borders),
            border_color: other
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            border_colors: overlay_map(&self.border_colors, &other.border_colors),
            fill: other.fill.or(self.fill),
            foreground: other.foreground.clone().or_else(|| self.foreground.clone()),
            background: other.background.clone().or_else(|| self.background.clone()),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        *self == SpecCellStyle::default()
    }

    /// Horizontal alignment as a family value.
    pub fn horizontal_alignment(&self) -> Option<HorizontalAlignment> {
        self.align.and_then(|kw| HorizontalAlignment::try_from(kw).ok())
    }

    /// Vertical alignment as a family value.
    pub fn vertical_alignment(&self) -> Option<VerticalAlignment> {
        self.valign.and_then(|kw| VerticalAlignment::try_from(kw).ok())
    }

    /// Border style configured for one side.
    pub fn border_of(&self, side: BorderSide) -> Option<EnumBorderStyle> {
        self.borders.get(&side).copied()
    }

    /// Border color of one side, falling back to the shared border color.
    pub fn border_color_of(&self, side: BorderSide) -> Option<&str> {
        self.border_colors
            .get(&side)
            .or(self.border_color.as_ref())
            .map(String::as_str)
    }

    /// Overlay the named styles `names` in order, starting from an empty style.
    pub fn from_named<S: AsRef<str>>(
        dict_styles: &IndexMap<String, SpecCellStyle>,
        names: &[S],
    ) -> XlsxDslResult<SpecCellStyle> {
        names.iter().try_fold(SpecCellStyle::default(), |acc, name| {
            let name = name.as_ref();
            dict_styles
                .get(name)
                .map(|style| acc.merge(style))
                .ok_or_else(|| EnumXlsxDslError::invalid(format!("style {name:?} is not defined")))
        })
    }

    // Builder-style setters used from cell callbacks.

    /// Set font family name.
    pub fn font_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set font size in points.
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        self.font_size = Some(size);
        self
    }

    /// Set font color.
    pub fn font_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.font_color = Some(color.into());
        self
    }

    /// Add a font style flag.
    pub fn font_style(&mut self, style: EnumFontStyle) -> &mut Self {
        self.font_styles.insert(style);
        self
    }

    /// Set horizontal and vertical alignment.
    pub fn align(
        &mut self,
        vertical: impl Into<VerticalAlignment>,
        horizontal: impl Into<HorizontalAlignment>,
    ) -> &mut Self {
        self.valign = Some(vertical.into().keyword());
        self.align = Some(horizontal.into().keyword());
        self
    }

    /// Set horizontal alignment only.
    pub fn align_horizontal(&mut self, horizontal: impl Into<HorizontalAlignment>) -> &mut Self {
        self.align = Some(horizontal.into().keyword());
        self
    }

    /// Set vertical alignment only.
    pub fn align_vertical(&mut self, vertical: impl Into<VerticalAlignment>) -> &mut Self {
        self.valign = Some(vertical.into().keyword());
        self
    }

    /// Enable text wrap.
    pub fn wrap(&mut self, _text: EnumText) -> &mut Self {
        self.text_wrap = Some(true);
        self
    }

    /// Set all four borders.
    pub fn border(&mut self, style: EnumBorderStyle) -> &mut Self {
        self.border_sides(BorderSide::members(), style)
    }

    /// Set the listed borders.
    pub fn border_sides<S>(
        &mut self,
        sides: impl IntoIterator<Item = S>,
        style: EnumBorderStyle,
    ) -> &mut Self
    where
        S: Into<BorderSide>,
    {
        for side in sides {
            self.borders.insert(side.into(), style);
        }
        self
    }

    /// Set border color for every configured side.
    pub fn border_color(&mut self, color: impl Into<String>) -> &mut Self {
        self.border_color = Some(color.into());
        self
    }

    /// Set the border color of one side.
    pub fn border_side_color(
        &mut self,
        side: impl Into<BorderSide>,
        color: impl Into<String>,
    ) -> &mut Self {
        self.border_colors.insert(side.into(), color.into());
        self
    }

    /// Set fill pattern.
    pub fn fill(&mut self, fill: EnumForegroundFill) -> &mut Self {
        self.fill = Some(fill);
        self
    }

    /// Set pattern foreground color; implies a solid fill if none is set.
    pub fn foreground(&mut self, color: impl Into<String>) -> &mut Self {
        self.foreground = Some(color.into());
        if self.fill.is_none() {
            self.fill = Some(EnumForegroundFill::SolidForeground);
        }
        self
    }

    /// Set pattern background color.
    pub fn background(&mut self, color: impl Into<String>) -> &mut Self {
        self.background = Some(color.into());
        self
    }

    /// Set number format code.
    pub fn format(&mut self, num_format: impl Into<String>) -> &mut Self {
        self.num_format = Some(num_format.into());
        self
    }
}

fn overlay_map<K: Ord + Copy, V: Clone>(
    base: &BTreeMap<K, V>,
    patch: &BTreeMap<K, V>,
) -> BTreeMap<K, V> {
    let mut merged = base.clone();
    merged.extend(patch.iter().map(|(k, v)| (*k, v.clone())));
    merged
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellExtrasSpecification

/// Cell comment (note).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellComment {
    /// Comment text.
    pub text: String,
    /// Comment author.
    pub author: Option<String>,
}

impl SpecCellComment {
    /// Set comment text.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Set comment author.
    pub fn author(&mut self, author: impl Into<String>) -> &mut Self {
        self.author = Some(author.into());
        self
    }
}

/// Hyperlink target of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellLink {
    /// Defined name inside the workbook.
    Name(String),
    /// File path.
    File(String),
    /// Web URL.
    Url(String),
    /// Mail address with optional header fields (`subject`, `body`, ...).
    Email {
        address: String,
        headers: Vec<(String, String)>,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PageSpecification

/// Print layout for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecPageDefinition {
    /// Page orientation.
    pub orientation: Option<EnumOrientation>,
    /// Paper size.
    pub paper: Option<EnumPaper>,
    /// Fit printed width to this many pages.
    pub fit_width: Option<u16>,
    /// Fit printed height to this many pages.
    pub fit_height: Option<u16>,
}

impl SpecPageDefinition {
    /// Overlay `other` onto `self`.
    pub fn merge(&self, other: &SpecPageDefinition) -> SpecPageDefinition {
        SpecPageDefinition {
            orientation: other.orientation.or(self.orientation),
            paper: other.paper.or(self.paper),
            fit_width: other.fit_width.or(self.fit_width),
            fit_height: other.fit_height.or(self.fit_height),
        }
    }

    pub(crate) fn fit_slot(&mut self, fit: EnumFit) -> &mut Option<u16> {
        match fit {
            EnumFit::Width => &mut self.fit_width,
            EnumFit::Height => &mut self.fit_height,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecification

/// Populated rectangle of a sheet: 1-based rows, 0-based columns, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecSheetExtent {
    /// First populated row number.
    pub row_first: usize,
    /// Last populated row number.
    pub row_last: usize,
    /// First populated column index.
    pub col_first: usize,
    /// Last populated column index.
    pub col_last: usize,
}

impl SpecSheetExtent {
    /// Grow the extent to cover a cell rectangle.
    pub fn include(
        extent: Option<SpecSheetExtent>,
        row_first: usize,
        row_last: usize,
        col_first: usize,
        col_last: usize,
    ) -> SpecSheetExtent {
        match extent {
            None => SpecSheetExtent {
                row_first,
                row_last,
                col_first,
                col_last,
            },
            Some(ext) => SpecSheetExtent {
                row_first: usize::min(ext.row_first, row_first),
                row_last: usize::max(ext.row_last, row_last),
                col_first: usize::min(ext.col_first, col_first),
                col_last: usize::max(ext.col_last, col_last),
            },
        }
    }
}

/// Inclusive column range grouped inside one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecColumnGroup {
    /// First grouped column index.
    pub col_first: usize,
    /// Last grouped column index.
    pub col_last: usize,
    /// Whether the group starts collapsed.
    pub if_collapsed: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriterOptions

/// Autofit policy for columns flagged as auto width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriterOptions {
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Replacement for illegal sheet-name characters.
    pub sheet_name_replace_to: String,
}

impl Default for SpecXlsxWriterOptions {
    fn default() -> Self {
        Self {
            policy_autofit: crate::conf::derive_default_autofit_policy(),
            sheet_name_replace_to: crate::conf::C_SHEET_NAME_REPLACE_TO.to_string(),
        }
    }
}

/// Options for appending a DataFrame to a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecFrameAppendOptions {
    /// Write one header row of column names before the records.
    pub if_header: bool,
    /// Inline style of header cells.
    pub style_header: SpecCellStyle,
    /// First column of the appended block.
    pub col_start: usize,
    /// Flag every written column for auto width.
    pub if_width_auto: bool,
}

impl Default for SpecFrameAppendOptions {
    fn default() -> Self {
        let mut style_header = SpecCellStyle::default();
        style_header.font_style(EnumFontStyle::Bold);
        Self {
            if_header: true,
            style_header,
            col_start: 0,
            if_width_auto: false,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
