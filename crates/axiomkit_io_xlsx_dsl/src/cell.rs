//! Cell definition: value, inline style and span of one cell slot.

use indexmap::IndexMap;

use crate::conf::{N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::configure::{ConfigureOutcome, run_configure};
use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::EnumAuto;
use crate::spec::{EnumCellLink, EnumCellValue, SpecCellComment, SpecCellStyle};

/// One addressable cell inside a row.
///
/// The effective style is layered at resolve time: named styles first, then
/// the inline style on top.
#[derive(Debug, Clone, PartialEq)]
pub struct CellDefinition {
    row: usize,
    column: usize,
    value: EnumCellValue,
    style: SpecCellStyle,
    l_style_names: Vec<String>,
    colspan: usize,
    rowspan: usize,
    if_width_auto: bool,
    width: Option<f64>,
    name: Option<String>,
    comment: Option<SpecCellComment>,
    link: Option<EnumCellLink>,
}

impl CellDefinition {
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            value: EnumCellValue::None,
            style: SpecCellStyle::default(),
            l_style_names: Vec::new(),
            colspan: 1,
            rowspan: 1,
            if_width_auto: false,
            width: None,
            name: None,
            comment: None,
            link: None,
        }
    }

    /// 1-based row number of this cell.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column index of this cell.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Set the cell value.
    pub fn value(&mut self, value: impl Into<EnumCellValue>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Store a formula; a leading `=` is optional.
    pub fn formula(&mut self, formula: impl AsRef<str>) -> &mut Self {
        let c_formula = formula.as_ref().trim();
        let c_formula = c_formula.strip_prefix('=').unwrap_or(c_formula);
        self.value = EnumCellValue::Formula(c_formula.to_string());
        self
    }

    /// Configure the inline style.
    pub fn style<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut SpecCellStyle) -> R,
        R: ConfigureOutcome,
    {
        run_configure(&mut self.style, configure)?;
        Ok(self)
    }

    /// Overlay a prepared style onto the inline style.
    pub fn apply_style(&mut self, style: &SpecCellStyle) -> &mut Self {
        self.style = self.style.merge(style);
        self
    }

    /// Use the workbook style `name` beneath the inline style.
    pub fn style_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.l_style_names.push(name.into());
        self
    }

    /// Use several workbook styles, later names overriding earlier ones.
    pub fn styles<S: AsRef<str>>(&mut self, names: &[S]) -> &mut Self {
        self.l_style_names
            .extend(names.iter().map(|name| name.as_ref().to_string()));
        self
    }

    /// Span the cell over `n` columns.
    pub fn colspan(&mut self, n: usize) -> XlsxDslResult<&mut Self> {
        if n == 0 {
            return Err(EnumXlsxDslError::invalid("colspan must be >= 1"));
        }
        match self.column.checked_add(n) {
            Some(n_col_end) if n_col_end <= N_NCOLS_EXCEL_MAX => {}
            _ => {
                return Err(EnumXlsxDslError::invalid(format!(
                    "colspan {n} from column {} exceeds {N_NCOLS_EXCEL_MAX} columns",
                    self.column
                )));
            }
        }
        self.colspan = n;
        Ok(self)
    }

    /// Span the cell over `n` rows.
    pub fn rowspan(&mut self, n: usize) -> XlsxDslResult<&mut Self> {
        if n == 0 {
            return Err(EnumXlsxDslError::invalid("rowspan must be >= 1"));
        }
        match self.row.checked_add(n - 1) {
            Some(n_row_last) if n_row_last <= N_NROWS_EXCEL_MAX => {}
            _ => {
                return Err(EnumXlsxDslError::invalid(format!(
                    "rowspan {n} from row {} exceeds {N_NROWS_EXCEL_MAX} rows",
                    self.row
                )));
            }
        }
        self.rowspan = n;
        Ok(self)
    }

    /// Register a workbook-level defined name pointing at this cell.
    pub fn name(&mut self, name: impl Into<String>) -> XlsxDslResult<&mut Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EnumXlsxDslError::invalid("cell name must not be empty"));
        }
        self.name = Some(name);
        Ok(self)
    }

    /// Attach a plain-text comment.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.comment = Some(SpecCellComment {
            text: text.into(),
            author: None,
        });
        self
    }

    /// Configure the comment (text and author).
    pub fn comment_with<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut SpecCellComment) -> R,
        R: ConfigureOutcome,
    {
        run_configure(self.comment.get_or_insert_with(SpecCellComment::default), configure)?;
        Ok(self)
    }

    /// Link to a defined name of the workbook.
    pub fn link_to_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.link = Some(EnumCellLink::Name(name.into()));
        self
    }

    /// Link to a file.
    pub fn link_to_file(&mut self, path: impl Into<String>) -> &mut Self {
        self.link = Some(EnumCellLink::File(path.into()));
        self
    }

    /// Link to a web URL.
    pub fn link_to_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.link = Some(EnumCellLink::Url(url.into()));
        self
    }

    /// Link to a mail address, optionally with header fields like `subject`.
    pub fn link_to_email<K, V>(
        &mut self,
        address: impl Into<String>,
        headers: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.link = Some(EnumCellLink::Email {
            address: address.into(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Fit the column width to content at resolve time.
    pub fn width_auto(&mut self, _auto: EnumAuto) -> &mut Self {
        self.if_width_auto = true;
        self
    }

    /// Fix the column width.
    pub fn width(&mut self, width: f64) -> &mut Self {
        self.width = Some(width);
        self
    }

    pub fn get_value(&self) -> &EnumCellValue {
        &self.value
    }

    pub fn get_style(&self) -> &SpecCellStyle {
        &self.style
    }

    pub fn get_colspan(&self) -> usize {
        self.colspan
    }

    pub fn get_rowspan(&self) -> usize {
        self.rowspan
    }

    pub fn get_width(&self) -> Option<f64> {
        self.width
    }

    pub fn is_width_auto(&self) -> bool {
        self.if_width_auto
    }

    /// Workbook styles requested for this cell, in application order.
    pub fn style_names(&self) -> &[String] {
        &self.l_style_names
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get_comment(&self) -> Option<&SpecCellComment> {
        self.comment.as_ref()
    }

    pub fn get_link(&self) -> Option<&EnumCellLink> {
        self.link.as_ref()
    }

    /// Replace the layered style by the effective one:
    /// `base`, then named styles, then the inline style.
    pub(crate) fn resolve_style(
        &mut self,
        base: &SpecCellStyle,
        dict_styles: &IndexMap<String, SpecCellStyle>,
    ) -> XlsxDslResult {
        let style_named = SpecCellStyle::from_named(dict_styles, &self.l_style_names)?;
        self.style = base.merge(&style_named).merge(&self.style);
        self.l_style_names.clear();
        Ok(())
    }
}
