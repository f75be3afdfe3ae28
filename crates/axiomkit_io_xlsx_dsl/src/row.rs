//! Row definition: a sparse, insertion-ordered set of cell slots.

use indexmap::IndexMap;

use crate::cell::CellDefinition;
use crate::conf::EnumColumnIdentifier;
use crate::configure::{ConfigureOutcome, run_configure};
use crate::error::XlsxDslResult;
use crate::spec::{EnumCellValue, SpecCellStyle, SpecColumnGroup};
use crate::util::{resolve_column, validate_column_index};

/// One addressable row of a sheet.
///
/// Cells are keyed by zero-based column index; a column is created at most
/// once and never discarded. The row keeps a convenience column cursor for
/// [`RowDefinition::cell`] / [`RowDefinition::cell_with`]; explicit
/// addressing through [`RowDefinition::cell_at`] moves it past the addressed
/// cell. A row style (named and inline) is the base every cell style is
/// layered on.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDefinition {
    number: usize,
    cells: IndexMap<usize, CellDefinition>,
    n_col_cursor: usize,
    height: Option<f64>,
    style: SpecCellStyle,
    l_style_names: Vec<String>,
    l_group_starts: Vec<usize>,
    l_column_groups: Vec<SpecColumnGroup>,
}

impl RowDefinition {
    pub(crate) fn new(number: usize) -> Self {
        Self {
            number,
            cells: IndexMap::new(),
            n_col_cursor: 0,
            height: None,
            style: SpecCellStyle::default(),
            l_style_names: Vec::new(),
            l_group_starts: Vec::new(),
            l_column_groups: Vec::new(),
        }
    }

    /// 1-based row number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Look up or create the cell at `column` (index or name like `"C"`).
    pub fn cell_at(
        &mut self,
        column: impl Into<EnumColumnIdentifier>,
    ) -> XlsxDslResult<&mut CellDefinition> {
        let n_col_idx = resolve_column(&column.into())?;
        self.n_col_cursor = n_col_idx + 1;
        Ok(self.find_or_create_cell(n_col_idx))
    }

    /// Look up or create the cell at `column` and configure it.
    pub fn cell_at_with<F, R>(
        &mut self,
        column: impl Into<EnumColumnIdentifier>,
        configure: F,
    ) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut CellDefinition) -> R,
        R: ConfigureOutcome,
    {
        let n_col_idx = resolve_column(&column.into())?;
        self.configure_cell(n_col_idx, configure)
    }

    /// Write `value` into the cell at the column cursor.
    pub fn cell(&mut self, value: impl Into<EnumCellValue>) -> XlsxDslResult<&mut Self> {
        let value = value.into();
        self.cell_with(|c| {
            c.value(value);
        })
    }

    /// Configure the cell at the column cursor.
    pub fn cell_with<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut CellDefinition) -> R,
        R: ConfigureOutcome,
    {
        let n_col_idx = validate_column_index(self.n_col_cursor)?;
        self.configure_cell(n_col_idx, configure)
    }

    /// Configure the inline row style inherited by every cell.
    pub fn style<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut SpecCellStyle) -> R,
        R: ConfigureOutcome,
    {
        run_configure(&mut self.style, configure)?;
        Ok(self)
    }

    /// Use the workbook style `name` for every cell of the row.
    pub fn style_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.l_style_names.push(name.into());
        self
    }

    /// Use several workbook styles for every cell of the row.
    pub fn styles<S: AsRef<str>>(&mut self, names: &[S]) -> &mut Self {
        self.l_style_names
            .extend(names.iter().map(|name| name.as_ref().to_string()));
        self
    }

    /// Run `configure` against this row and group the columns it appended.
    pub fn group<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> R,
        R: ConfigureOutcome,
    {
        self.create_group(false, configure)?;
        Ok(self)
    }

    /// Same as [`Self::group`] but the column group starts collapsed.
    pub fn collapse<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> R,
        R: ConfigureOutcome,
    {
        self.create_group(true, configure)?;
        Ok(self)
    }

    fn create_group<F, R>(&mut self, if_collapsed: bool, configure: F) -> XlsxDslResult
    where
        F: FnOnce(&mut Self) -> R,
        R: ConfigureOutcome,
    {
        let n_col_start = self.n_col_cursor;
        self.l_group_starts.push(n_col_start);
        let outcome = run_configure(self, configure);
        self.l_group_starts.pop();
        outcome?;

        // Spans of zero or one column are not grouped.
        if self.n_col_cursor.saturating_sub(n_col_start) > 1 {
            self.l_column_groups.push(SpecColumnGroup {
                col_first: n_col_start,
                col_last: self.n_col_cursor - 1,
                if_collapsed,
            });
        }
        Ok(())
    }

    /// Set the row height in points.
    pub fn height(&mut self, points: f64) -> &mut Self {
        self.height = Some(points);
        self
    }

    pub fn get_height(&self) -> Option<f64> {
        self.height
    }

    /// Cell at `col_idx`, if defined.
    pub fn get_cell(&self, col_idx: usize) -> Option<&CellDefinition> {
        self.cells.get(&col_idx)
    }

    /// Cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &CellDefinition> {
        self.cells.values()
    }

    /// Number of defined cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Inline row style.
    pub fn get_style(&self) -> &SpecCellStyle {
        &self.style
    }

    /// Column groups closed so far, inner groups first.
    pub fn column_groups(&self) -> &[SpecColumnGroup] {
        &self.l_column_groups
    }

    /// Number of currently open column groups.
    pub fn group_depth(&self) -> usize {
        self.l_group_starts.len()
    }

    /// Layer row and cell styles into each cell's effective style.
    pub(crate) fn resolve_styles(
        &mut self,
        dict_styles: &IndexMap<String, SpecCellStyle>,
    ) -> XlsxDslResult {
        let style_base =
            SpecCellStyle::from_named(dict_styles, &self.l_style_names)?.merge(&self.style);
        for cell in self.cells.values_mut() {
            cell.resolve_style(&style_base, dict_styles)?;
        }
        Ok(())
    }

    fn configure_cell<F, R>(&mut self, n_col_idx: usize, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut CellDefinition) -> R,
        R: ConfigureOutcome,
    {
        let cell = self.find_or_create_cell(n_col_idx);
        run_configure(cell, configure)?;
        // Span setters keep `n_col_idx + colspan` within the column limit.
        let n_colspan = cell.get_colspan();
        self.n_col_cursor = n_col_idx + n_colspan;
        Ok(self)
    }

    fn find_or_create_cell(&mut self, n_col_idx: usize) -> &mut CellDefinition {
        let n_row = self.number;
        self.cells
            .entry(n_col_idx)
            .or_insert_with(|| CellDefinition::new(n_row, n_col_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnumXlsxDslError;
    use crate::keywords::{BorderSide, EnumBorderStyle, EnumKeyword, kw};

    #[test]
    fn test_cell_at_is_idempotent_per_column() {
        let mut row = RowDefinition::new(1);
        row.cell_at(2).unwrap().value("first");
        row.cell_at("C").unwrap().width(12.0);

        assert_eq!(row.len(), 1);
        let cell = row.get_cell(2).unwrap();
        assert_eq!(cell.get_value(), &EnumCellValue::from("first"));
        assert_eq!(cell.get_width(), Some(12.0));
    }

    #[test]
    fn test_cells_keep_insertion_order_and_are_sparse() {
        let mut row = RowDefinition::new(4);
        row.cell_at(5).unwrap();
        row.cell_at(1).unwrap();
        row.cell_at(3).unwrap();

        let l_cols: Vec<usize> = row.cells().map(CellDefinition::column).collect();
        assert_eq!(l_cols, vec![5, 1, 3]);
        assert!(row.get_cell(0).is_none());
    }

    #[test]
    fn test_cursor_follows_explicit_address_and_colspan() {
        let mut row = RowDefinition::new(1);
        row.cell("One").unwrap();
        row.cell_with(|c| -> XlsxDslResult {
            c.value("Wide").colspan(2)?;
            Ok(())
        })
        .unwrap();
        row.cell("Four").unwrap();
        row.cell_at_with("G", |c| {
            c.value("G");
        })
        .unwrap();
        row.cell("H").unwrap();

        let l_cols: Vec<usize> = row.cells().map(CellDefinition::column).collect();
        assert_eq!(l_cols, vec![0, 1, 3, 6, 7]);
    }

    #[test]
    fn test_oversized_colspan_is_rejected_without_moving_cursor() {
        let mut row = RowDefinition::new(1);
        let result = row.cell_at_with(1, |c| c.colspan(usize::MAX).map(|_| ()));
        assert!(matches!(result, Err(EnumXlsxDslError::InvalidArgument(_))));

        assert_eq!(row.get_cell(1).unwrap().get_colspan(), 1);

        // The cursor did not move past the failed cell.
        row.cell("A").unwrap();
        let l_cols: Vec<usize> = row.cells().map(CellDefinition::column).collect();
        assert_eq!(l_cols, vec![1, 0]);
    }

    #[test]
    fn test_column_groups_nest_and_skip_single_columns() {
        let mut row = RowDefinition::new(1);
        row.cell("Headline 1").unwrap();
        row.group(|g| -> XlsxDslResult {
            g.cell("Headline 2")?.cell("Headline 3")?;
            g.collapse(|c| -> XlsxDslResult {
                c.cell("Headline 4")?.cell("Headline 5")?;
                Ok(())
            })?;
            g.cell("Headline 6")?;
            g.group(|single| single.cell("Headline 7").map(|_| ()))?;
            Ok(())
        })
        .unwrap();

        assert_eq!(
            row.column_groups(),
            &[
                SpecColumnGroup {
                    col_first: 3,
                    col_last: 4,
                    if_collapsed: true
                },
                SpecColumnGroup {
                    col_first: 1,
                    col_last: 6,
                    if_collapsed: false
                },
            ]
        );
        assert_eq!(row.group_depth(), 0);
    }

    #[test]
    fn test_failing_column_group_closes_without_recording() {
        let mut row = RowDefinition::new(1);
        let result = row.group(|g| -> XlsxDslResult {
            g.cell("A")?.cell("B")?;
            g.cell_at("1A")?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(row.group_depth(), 0);
        assert!(row.column_groups().is_empty());
    }

    #[test]
    fn test_row_style_is_base_of_cell_styles() {
        let mut dict_styles = IndexMap::new();
        let mut redfg = SpecCellStyle::default();
        redfg.foreground("#FF0000");
        dict_styles.insert("redfg".to_string(), redfg);
        let mut centered = SpecCellStyle::default();
        centered.align(kw::CENTER, kw::CENTER);
        dict_styles.insert("centered".to_string(), centered);

        let mut row = RowDefinition::new(4);
        row.style_named("redfg")
            .style(|st| {
                st.border(kw::THIN);
            })
            .unwrap();
        row.cell_with(|c| {
            c.value("RED").style_named("centered");
        })
        .unwrap();
        row.resolve_styles(&dict_styles).unwrap();

        let style = row.get_cell(0).unwrap().get_style();
        assert_eq!(style.foreground.as_deref(), Some("#FF0000"));
        assert_eq!(style.align, Some(EnumKeyword::Center));
        assert_eq!(style.border_of(BorderSide::LEFT), Some(EnumBorderStyle::Thin));
    }

    #[test]
    fn test_malformed_column_name_creates_nothing() {
        let mut row = RowDefinition::new(1);
        assert!(row.cell_at("1A").is_err());
        assert!(row.is_empty());
    }
}
