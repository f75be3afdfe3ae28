//! XLSX output adapter over `rust_xlsxwriter`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, FormatPattern, FormatUnderline, Note, Url, Workbook,
    Worksheet,
};

use crate::adapter::{SheetOutputAdapter, WorkbookOutputAdapter};
use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::{
    BorderSide, EnumBorderStyle, EnumFontStyle, EnumForegroundFill, EnumKeyword, EnumOrientation,
    HorizontalAlignment, VerticalAlignment,
};
use crate::row::RowDefinition;
use crate::spec::{
    EnumCellLink, EnumCellValue, SpecAutofitCellsPolicy, SpecCellStyle, SpecPageDefinition, SpecSheetExtent,
    SpecXlsxWriterOptions,
};
use crate::util::{
    calculate_autofit_width, estimate_unicode_string_width, format_column_name,
    sanitize_sheet_name,
};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] or
/// [`Self::save_to_buffer`] is called.
pub struct XlsxWriter {
    path_file_out: Option<PathBuf>,
    workbook: Workbook,
    options: SpecXlsxWriterOptions,
    set_sheet_names_existing: BTreeSet<String>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to an output path.
    pub fn new(path_file_out: impl Into<PathBuf>, options: SpecXlsxWriterOptions) -> Self {
        Self {
            path_file_out: Some(path_file_out.into()),
            ..Self::in_memory(options)
        }
    }

    /// Create writer without output path; use [`Self::save_to_buffer`].
    pub fn in_memory(options: SpecXlsxWriterOptions) -> Self {
        Self {
            path_file_out: None,
            workbook: Workbook::new(),
            options,
            set_sheet_names_existing: BTreeSet::new(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> Option<String> {
        self.path_file_out
            .as_ref()
            .map(|path| path.to_string_lossy().to_string())
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> XlsxDslResult {
        if self.if_closed {
            return Ok(());
        }
        let Some(path_file_out) = &self.path_file_out else {
            return Err(EnumXlsxDslError::invalid(
                "writer has no output path; use save_to_buffer()",
            ));
        };
        self.workbook.save(path_file_out)?;
        tracing::debug!(path = %path_file_out.display(), "workbook saved");
        self.if_closed = true;
        Ok(())
    }

    /// Serialize workbook to bytes.
    pub fn save_to_buffer(&mut self) -> XlsxDslResult<Vec<u8>> {
        if self.if_closed {
            return Err(EnumXlsxDslError::Closed);
        }
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Excel compares sheet names case-insensitively.
    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        let c_key = name.to_lowercase();
        if !self.set_sheet_names_existing.contains(&c_key) {
            self.set_sheet_names_existing.insert(c_key);
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            let c_key = candidate.to_lowercase();
            if !self.set_sheet_names_existing.contains(&c_key) {
                self.set_sheet_names_existing.insert(c_key);
                return candidate;
            }
            n_idx += 1;
        }
    }
}

impl WorkbookOutputAdapter for XlsxWriter {
    type Sheet = XlsxSheetWriter;

    fn create_sheet(&mut self, name: &str) -> XlsxDslResult<XlsxSheetWriter> {
        if self.if_closed {
            return Err(EnumXlsxDslError::Closed);
        }
        validate_policy_autofit(&self.options.policy_autofit)?;
        let c_name_sanitized = sanitize_sheet_name(name, &self.options.sheet_name_replace_to);
        let c_name = self.derive_unique_sheet_name(&c_name_sanitized);
        if c_name != name {
            tracing::warn!(requested = name, written = %c_name, "worksheet renamed");
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(&c_name)?;
        Ok(XlsxSheetWriter::new(
            worksheet,
            c_name,
            self.options.policy_autofit.clone(),
        ))
    }

    fn finish_sheet(&mut self, sheet: XlsxSheetWriter) -> XlsxDslResult {
        if self.if_closed {
            return Err(EnumXlsxDslError::Closed);
        }
        let XlsxSheetWriter {
            worksheet,
            l_defined_names,
            ..
        } = sheet;
        self.workbook.push_worksheet(worksheet);
        for (name, formula) in &l_defined_names {
            tracing::debug!(name = %name, formula = %formula, "define name");
            self.workbook.define_name(name.as_str(), formula)?;
        }
        Ok(())
    }
}

/// Output side of one worksheet.
pub struct XlsxSheetWriter {
    worksheet: Worksheet,
    name: String,
    policy_autofit: SpecAutofitCellsPolicy,
    dict_width_by_col: BTreeMap<usize, usize>,
    l_defined_names: Vec<(String, String)>,
}

impl XlsxSheetWriter {
    fn new(worksheet: Worksheet, name: String, policy_autofit: SpecAutofitCellsPolicy) -> Self {
        Self {
            worksheet,
            name,
            policy_autofit,
            dict_width_by_col: BTreeMap::new(),
            l_defined_names: Vec::new(),
        }
    }

    /// Written sheet name (sanitized and made unique).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell names collected so far, as `(name, formula)` pairs.
    pub fn defined_names(&self) -> &[(String, String)] {
        &self.l_defined_names
    }

    /// Widest estimated content seen so far in `col_idx`.
    pub fn width_recorded(&self, col_idx: usize) -> usize {
        self.dict_width_by_col.get(&col_idx).copied().unwrap_or(0)
    }

    fn record_width(&mut self, col_idx: usize, value: &EnumCellValue) {
        let n_width = estimate_width_len(value);
        let n_width_recorded = self.dict_width_by_col.entry(col_idx).or_insert(0);
        *n_width_recorded = usize::max(*n_width_recorded, n_width);
    }
}

impl SheetOutputAdapter for XlsxSheetWriter {
    fn write_row(&mut self, row_number: usize, row: &RowDefinition) -> XlsxDslResult {
        let n_row_idx = cast_row_num(row_number - 1)?;
        if let Some(height) = row.get_height() {
            self.worksheet.set_row_height(n_row_idx, height)?;
        }

        for cell in row.cells() {
            let n_col_idx = cast_col_num(cell.column())?;
            let format = derive_rust_xlsx_format(cell.get_style());
            let value = cell.get_value();
            let if_merged = cell.get_colspan() > 1 || cell.get_rowspan() > 1;

            if if_merged {
                self.worksheet.merge_range(
                    n_row_idx,
                    n_col_idx,
                    cast_row_num(row_number - 1 + cell.get_rowspan() - 1)?,
                    cast_col_num(cell.column() + cell.get_colspan() - 1)?,
                    "",
                    &format,
                )?;
            } else {
                // Only unmerged cells drive column width.
                self.record_width(cell.column(), value);
            }

            if let Some(link) = cell.get_link() {
                let mut url = Url::new(derive_link_target(link));
                let c_text = value.display_text();
                if !c_text.is_empty() {
                    url = url.set_text(c_text);
                }
                self.worksheet
                    .write_url_with_format(n_row_idx, n_col_idx, url, &format)?;
            } else if !matches!(value, EnumCellValue::None)
                || (!if_merged && !cell.get_style().is_empty())
            {
                write_cell_with_format(&mut self.worksheet, n_row_idx, n_col_idx, value, &format)?;
            }

            if let Some(comment) = cell.get_comment() {
                let mut note = Note::new(comment.text.as_str());
                if let Some(author) = &comment.author {
                    note = note.set_author(author.as_str());
                }
                self.worksheet.insert_note(n_row_idx, n_col_idx, &note)?;
            }

            if let Some(name) = cell.get_name() {
                let c_formula = derive_defined_name_formula(&self.name, row_number, cell.column());
                self.l_defined_names.push((name.to_string(), c_formula));
            }

            if let Some(width) = cell.get_width() {
                self.worksheet.set_column_width(n_col_idx, width)?;
            }
        }
        Ok(())
    }

    fn apply_page(&mut self, page: &SpecPageDefinition) -> XlsxDslResult {
        match page.orientation {
            Some(EnumOrientation::Landscape) => {
                self.worksheet.set_landscape();
            }
            Some(EnumOrientation::Portrait) => {
                self.worksheet.set_portrait();
            }
            None => {}
        }
        if let Some(paper) = page.paper {
            self.worksheet.set_paper_size(paper.excel_code());
        }
        if page.fit_width.is_some() || page.fit_height.is_some() {
            // 0 leaves the other dimension unconstrained.
            self.worksheet.set_print_fit_to_pages(
                page.fit_width.unwrap_or(0),
                page.fit_height.unwrap_or(0),
            );
        }
        Ok(())
    }

    fn apply_row_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult {
        let n_row_first = cast_row_num(start - 1)?;
        let n_row_last = cast_row_num(end - 1)?;
        if collapsed {
            self.worksheet.group_rows_collapsed(n_row_first, n_row_last)?;
        } else {
            self.worksheet.group_rows(n_row_first, n_row_last)?;
        }
        Ok(())
    }

    fn apply_column_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult {
        let n_col_first = cast_col_num(start)?;
        let n_col_last = cast_col_num(end)?;
        if collapsed {
            self.worksheet
                .group_columns_collapsed(n_col_first, n_col_last)?;
        } else {
            self.worksheet.group_columns(n_col_first, n_col_last)?;
        }
        Ok(())
    }

    fn lock(&mut self) -> XlsxDslResult {
        self.worksheet.protect();
        Ok(())
    }

    fn show(&mut self) -> XlsxDslResult {
        self.worksheet.set_hidden(false);
        Ok(())
    }

    fn hide(&mut self) -> XlsxDslResult {
        self.worksheet.set_hidden(true);
        Ok(())
    }

    fn hide_completely(&mut self) -> XlsxDslResult {
        self.worksheet.set_very_hidden(true);
        Ok(())
    }

    fn apply_password(&mut self, password: &str) -> XlsxDslResult {
        self.worksheet.protect_with_password(password);
        Ok(())
    }

    fn apply_freeze(&mut self, column: usize, row: usize) -> XlsxDslResult {
        self.worksheet
            .set_freeze_panes(cast_row_num(row)?, cast_col_num(column)?)?;
        Ok(())
    }

    fn apply_automatic_filter(&mut self, extent: SpecSheetExtent) -> XlsxDslResult {
        self.worksheet.autofilter(
            cast_row_num(extent.row_first - 1)?,
            cast_col_num(extent.col_first)?,
            cast_row_num(extent.row_last - 1)?,
            cast_col_num(extent.col_last)?,
        )?;
        Ok(())
    }

    fn apply_auto_column(&mut self, column: usize) -> XlsxDslResult {
        let n_width_final = calculate_autofit_width(
            self.width_recorded(column),
            self.policy_autofit.width_cell_min,
            self.policy_autofit.width_cell_max,
            self.policy_autofit.width_cell_padding,
        );
        self.worksheet
            .set_column_width(cast_col_num(column)?, n_width_final as f64)?;
        Ok(())
    }
}

/// Estimate displayed width units for one cell value.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None | EnumCellValue::Formula(_) => 0,
        EnumCellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
            (*n as i64).to_string().len()
        }
        _ => estimate_unicode_string_width(&value.display_text()),
    }
}

fn derive_link_target(link: &EnumCellLink) -> String {
    match link {
        EnumCellLink::Name(name) => format!("internal:{name}"),
        EnumCellLink::File(path) => format!("file:///{path}"),
        EnumCellLink::Url(url) => url.clone(),
        EnumCellLink::Email { address, headers } => {
            let c_query = headers
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            if c_query.is_empty() {
                format!("mailto:{address}")
            } else {
                format!("mailto:{address}?{c_query}")
            }
        }
    }
}

/// Absolute reference formula for a defined name: `='Sheet'!$B$3`.
fn derive_defined_name_formula(sheet_name: &str, row_number: usize, col_idx: usize) -> String {
    format!(
        "='{}'!${}${row_number}",
        sheet_name.replace('\'', "''"),
        format_column_name(col_idx)
    )
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: u32,
    col_idx: u16,
    value: &EnumCellValue,
    format: &Format,
) -> XlsxDslResult {
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(row_idx, col_idx, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(row_idx, col_idx, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(row_idx, col_idx, *val, format)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(row_idx, col_idx, *val, format)?;
        }
        EnumCellValue::Formula(val) => {
            worksheet.write_formula_with_format(row_idx, col_idx, val.as_str(), format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(style: &SpecCellStyle) -> Format {
    let mut format = Format::new();

    if let Some(val) = &style.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = style.font_size {
        format = format.set_font_size(val);
    }
    if let Some(val) = &style.font_color {
        format = format.set_font_color(val.as_str());
    }
    for font_style in &style.font_styles {
        format = match font_style {
            EnumFontStyle::Bold => format.set_bold(),
            EnumFontStyle::Italic => format.set_italic(),
            EnumFontStyle::Strikeout => format.set_font_strikethrough(),
            EnumFontStyle::Underline => format.set_underline(FormatUnderline::Single),
        };
    }

    if let Some(val) = style.horizontal_alignment() {
        format = format.set_align(derive_format_align_horizontal(val));
    }
    if let Some(val) = style.vertical_alignment() {
        format = format.set_align(derive_format_align_vertical(val));
    }
    if style.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    if let Some(val) = style.border_of(BorderSide::TOP) {
        format = format.set_border_top(derive_format_border(val));
    }
    if let Some(val) = style.border_of(BorderSide::BOTTOM) {
        format = format.set_border_bottom(derive_format_border(val));
    }
    if let Some(val) = style.border_of(BorderSide::LEFT) {
        format = format.set_border_left(derive_format_border(val));
    }
    if let Some(val) = style.border_of(BorderSide::RIGHT) {
        format = format.set_border_right(derive_format_border(val));
    }
    if let Some(val) = &style.border_color {
        format = format.set_border_color(val.as_str());
    }
    // Per-side colors override the shared one.
    if let Some(val) = style.border_colors.get(&BorderSide::TOP) {
        format = format.set_border_top_color(val.as_str());
    }
    if let Some(val) = style.border_colors.get(&BorderSide::BOTTOM) {
        format = format.set_border_bottom_color(val.as_str());
    }
    if let Some(val) = style.border_colors.get(&BorderSide::LEFT) {
        format = format.set_border_left_color(val.as_str());
    }
    if let Some(val) = style.border_colors.get(&BorderSide::RIGHT) {
        format = format.set_border_right_color(val.as_str());
    }

    if let Some(val) = style.fill {
        format = format.set_pattern(derive_format_pattern(val));
    }
    if let Some(val) = &style.foreground {
        format = format.set_foreground_color(val.as_str());
    }
    if let Some(val) = &style.background {
        format = format.set_background_color(val.as_str());
    }

    if let Some(val) = &style.num_format {
        format = format.set_num_format(val.clone());
    }

    format
}

fn derive_format_border(border: EnumBorderStyle) -> FormatBorder {
    match border {
        EnumBorderStyle::None => FormatBorder::None,
        EnumBorderStyle::Thin => FormatBorder::Thin,
        EnumBorderStyle::Medium => FormatBorder::Medium,
        EnumBorderStyle::Dashed => FormatBorder::Dashed,
        EnumBorderStyle::Dotted => FormatBorder::Dotted,
        EnumBorderStyle::Thick => FormatBorder::Thick,
        EnumBorderStyle::Double => FormatBorder::Double,
        EnumBorderStyle::Hair => FormatBorder::Hair,
        EnumBorderStyle::MediumDashed => FormatBorder::MediumDashed,
        EnumBorderStyle::DashDot => FormatBorder::DashDot,
        EnumBorderStyle::MediumDashDot => FormatBorder::MediumDashDot,
        EnumBorderStyle::DashDotDot => FormatBorder::DashDotDot,
        EnumBorderStyle::MediumDashDotDot => FormatBorder::MediumDashDotDot,
        EnumBorderStyle::SlantedDashDot => FormatBorder::SlantDashDot,
    }
}

fn derive_format_pattern(fill: EnumForegroundFill) -> FormatPattern {
    match fill {
        EnumForegroundFill::NoFill => FormatPattern::None,
        EnumForegroundFill::SolidForeground => FormatPattern::Solid,
        EnumForegroundFill::FineDots => FormatPattern::MediumGray,
        EnumForegroundFill::AltBars => FormatPattern::DarkGray,
        EnumForegroundFill::SparseDots => FormatPattern::LightGray,
        EnumForegroundFill::ThickHorizontalBands => FormatPattern::DarkHorizontal,
        EnumForegroundFill::ThickVerticalBands => FormatPattern::DarkVertical,
        EnumForegroundFill::ThickBackwardDiagonals => FormatPattern::DarkDown,
        EnumForegroundFill::ThickForwardDiagonals => FormatPattern::DarkUp,
        EnumForegroundFill::BigSpots => FormatPattern::DarkGrid,
        EnumForegroundFill::Bricks => FormatPattern::DarkTrellis,
        EnumForegroundFill::ThinHorizontalBands => FormatPattern::LightHorizontal,
        EnumForegroundFill::ThinVerticalBands => FormatPattern::LightVertical,
        EnumForegroundFill::ThinBackwardDiagonals => FormatPattern::LightDown,
        EnumForegroundFill::ThinForwardDiagonals => FormatPattern::LightUp,
        EnumForegroundFill::Squares => FormatPattern::LightGrid,
        EnumForegroundFill::Diamonds => FormatPattern::LightTrellis,
        EnumForegroundFill::LessDots => FormatPattern::Gray125,
        EnumForegroundFill::LeastDots => FormatPattern::Gray0625,
    }
}

fn derive_format_align_horizontal(align: HorizontalAlignment) -> FormatAlign {
    match align.keyword() {
        EnumKeyword::Left => FormatAlign::Left,
        EnumKeyword::Right => FormatAlign::Right,
        EnumKeyword::Center => FormatAlign::Center,
        EnumKeyword::Justify => FormatAlign::Justify,
        EnumKeyword::Fill => FormatAlign::Fill,
        EnumKeyword::CenterSelection => FormatAlign::CenterAcross,
        EnumKeyword::General => FormatAlign::General,
        kw => unreachable!("{kw:?} is not a horizontal alignment"),
    }
}

fn derive_format_align_vertical(align: VerticalAlignment) -> FormatAlign {
    match align.keyword() {
        EnumKeyword::Top => FormatAlign::Top,
        EnumKeyword::Bottom => FormatAlign::Bottom,
        EnumKeyword::Center => FormatAlign::VerticalCenter,
        EnumKeyword::Justify => FormatAlign::VerticalJustify,
        EnumKeyword::Distributed => FormatAlign::VerticalDistributed,
        kw => unreachable!("{kw:?} is not a vertical alignment"),
    }
}

fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> XlsxDslResult {
    if policy_autofit.width_cell_min == 0 {
        return Err(EnumXlsxDslError::invalid(
            "policy_autofit.width_cell_min must be >= 1",
        ));
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(EnumXlsxDslError::invalid(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min",
        ));
    }
    Ok(())
}

fn cast_row_num(value: usize) -> XlsxDslResult<u32> {
    u32::try_from(value)
        .map_err(|_| EnumXlsxDslError::invalid(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> XlsxDslResult<u16> {
    u16::try_from(value)
        .map_err(|_| EnumXlsxDslError::invalid(format!("column index overflow: {value}")))
}
