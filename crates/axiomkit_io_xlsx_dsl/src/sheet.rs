//! Sheet definition: row bookkeeping, grouping and deferred resolution.
//!
//! A sheet goes through two phases. During the build phase every operation is
//! synchronous: rows are looked up or created at the cursor, groups push and
//! pop the cursor, state/freeze/page effects go straight to the output adapter.
//! The resolve phase runs once, triggered by the owning workbook, and applies
//! the effects that need the complete tree: row materialization, then the
//! automatic filter, then auto column widths.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::adapter::SheetOutputAdapter;
use crate::conf::{EnumColumnIdentifier, N_NROWS_EXCEL_MAX, N_ROW_CURSOR_START};
use crate::configure::{ConfigureOutcome, run_configure};
use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::{EnumAuto, EnumSheetState};
use crate::page::PageDefinition;
use crate::row::RowDefinition;
use crate::spec::{SpecCellStyle, SpecPageDefinition, SpecSheetExtent};
use crate::util::{resolve_column, validate_row_number};

/// One sheet of a workbook definition.
pub struct SheetDefinition<A: SheetOutputAdapter> {
    name: String,
    adapter: A,
    rows: IndexMap<usize, RowDefinition>,
    n_row_next: usize,
    l_group_starts: Vec<usize>,
    set_auto_columns: BTreeSet<usize>,
    if_automatic_filter: bool,
    if_resolved: bool,
}

impl<A: SheetOutputAdapter> SheetDefinition<A> {
    pub(crate) fn new(name: impl Into<String>, adapter: A) -> Self {
        Self {
            name: name.into(),
            adapter,
            rows: IndexMap::new(),
            n_row_next: N_ROW_CURSOR_START,
            l_group_starts: Vec::new(),
            set_auto_columns: BTreeSet::new(),
            if_automatic_filter: false,
            if_resolved: false,
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region Rows

    /// Look up or create the row at the cursor, then advance the cursor.
    pub fn row(&mut self) -> XlsxDslResult<&mut RowDefinition> {
        let n_row = self.advance_cursor()?;
        Ok(self.find_or_create_row(n_row))
    }

    /// Look up or create the row at the cursor, configure it, advance once.
    pub fn row_with<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut RowDefinition) -> R,
        R: ConfigureOutcome,
    {
        let n_row = self.advance_cursor()?;
        run_configure(self.find_or_create_row(n_row), configure)?;
        Ok(self)
    }

    /// Move the cursor to `row_number` (1-based), look up or create that row
    /// and configure it.
    ///
    /// The cursor stays at `row_number`: the next implicit [`Self::row`]
    /// reuses this row and only then advances. Jumping backward is allowed.
    pub fn row_at<F, R>(&mut self, row_number: i64, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut RowDefinition) -> R,
        R: ConfigureOutcome,
    {
        let n_row = validate_row_number(row_number)?;
        self.n_row_next = n_row;
        run_configure(self.find_or_create_row(n_row), configure)?;
        Ok(self)
    }

    fn advance_cursor(&mut self) -> XlsxDslResult<usize> {
        let n_row = self.n_row_next;
        if n_row > N_NROWS_EXCEL_MAX {
            return Err(EnumXlsxDslError::invalid(format!(
                "sheet {:?} is full: row {n_row} exceeds {N_NROWS_EXCEL_MAX}",
                self.name
            )));
        }
        self.n_row_next += 1;
        Ok(n_row)
    }

    fn find_or_create_row(&mut self, n_row: usize) -> &mut RowDefinition {
        self.rows
            .entry(n_row)
            .or_insert_with(|| RowDefinition::new(n_row))
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Groups

    /// Run `configure` against this sheet and group the rows it appended.
    pub fn group<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> R,
        R: ConfigureOutcome,
    {
        self.create_group(false, configure)?;
        Ok(self)
    }

    /// Same as [`Self::group`] but the group starts collapsed.
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
        let n_row_start = self.n_row_next;
        self.l_group_starts.push(n_row_start);
        let outcome = run_configure(self, configure);
        self.l_group_starts.pop();
        outcome?;

        // Spans of zero or one row are not grouped.
        if self.n_row_next.saturating_sub(n_row_start) > 1 {
            let n_row_end = self.n_row_next - 1;
            tracing::debug!(
                sheet = %self.name,
                start = n_row_start,
                end = n_row_end,
                collapsed = if_collapsed,
                "apply row group"
            );
            self.adapter
                .apply_row_group(n_row_start, n_row_end, if_collapsed)?;
        }
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region SheetSettings

    /// Set protection/visibility state.
    pub fn state(&mut self, state: EnumSheetState) -> XlsxDslResult<&mut Self> {
        match state {
            EnumSheetState::Locked => self.adapter.lock()?,
            EnumSheetState::Visible => self.adapter.show()?,
            EnumSheetState::Hidden => self.adapter.hide()?,
            EnumSheetState::VeryHidden => self.adapter.hide_completely()?,
        }
        Ok(self)
    }

    /// Protect the sheet with a password.
    pub fn password(&mut self, password: &str) -> XlsxDslResult<&mut Self> {
        self.adapter.apply_password(password)?;
        Ok(self)
    }

    /// Freeze the first `column` columns and the first `row` rows.
    ///
    /// `column` is a count given as an index or a name (`"B"` freezes column
    /// A), `row` is a count where 0 freezes no rows: `freeze(1, 0)` keeps
    /// column A in view while scrolling.
    pub fn freeze(
        &mut self,
        column: impl Into<EnumColumnIdentifier>,
        row: usize,
    ) -> XlsxDslResult<&mut Self> {
        let n_col_idx = resolve_column(&column.into())?;
        if row >= N_NROWS_EXCEL_MAX {
            return Err(EnumXlsxDslError::invalid(format!(
                "freeze row out of range: {row} (max {})",
                N_NROWS_EXCEL_MAX - 1
            )));
        }
        self.adapter.apply_freeze(n_col_idx, row)?;
        Ok(self)
    }

    /// Request an automatic filter over the populated extent.
    pub fn filter(&mut self, _auto: EnumAuto) -> &mut Self {
        self.if_automatic_filter = true;
        self
    }

    /// Flag a column for width auto-fit.
    pub fn auto_column(
        &mut self,
        column: impl Into<EnumColumnIdentifier>,
    ) -> XlsxDslResult<&mut Self> {
        let n_col_idx = resolve_column(&column.into())?;
        self.set_auto_columns.insert(n_col_idx);
        Ok(self)
    }

    /// Configure the print layout.
    pub fn page<F, R>(&mut self, configure: F) -> XlsxDslResult<&mut Self>
    where
        F: FnOnce(&mut PageDefinition) -> R,
        R: ConfigureOutcome,
    {
        let mut page = PageDefinition::new();
        run_configure(&mut page, configure)?;
        self.adapter.apply_page(page.spec())?;
        Ok(self)
    }

    pub(crate) fn apply_page_spec(&mut self, page: &SpecPageDefinition) -> XlsxDslResult {
        self.adapter.apply_page(page)
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Resolution

    /// Apply deferred effects: materialize rows, automatic filter, auto columns.
    ///
    /// Named styles referenced by rows and cells are looked up in
    /// `dict_styles`; an unknown name fails the resolve.
    pub(crate) fn resolve(&mut self, dict_styles: &IndexMap<String, SpecCellStyle>) -> XlsxDslResult {
        if self.if_resolved {
            tracing::warn!(sheet = %self.name, "sheet already resolved, skipping");
            return Ok(());
        }

        let mut extent: Option<SpecSheetExtent> = None;
        for (n_row, row) in &mut self.rows {
            tracing::trace!(sheet = %self.name, row = *n_row, cells = row.len(), "materialize row");
            row.resolve_styles(dict_styles)?;
            self.adapter.write_row(*n_row, row)?;
            for group in row.column_groups() {
                tracing::debug!(
                    sheet = %self.name,
                    row = *n_row,
                    start = group.col_first,
                    end = group.col_last,
                    collapsed = group.if_collapsed,
                    "apply column group"
                );
                self.adapter
                    .apply_column_group(group.col_first, group.col_last, group.if_collapsed)?;
            }
            for cell in row.cells() {
                if cell.is_width_auto() {
                    self.set_auto_columns.insert(cell.column());
                }
                // Span setters keep both ends inside the sheet limits.
                extent = Some(SpecSheetExtent::include(
                    extent,
                    *n_row,
                    *n_row + cell.get_rowspan() - 1,
                    cell.column(),
                    cell.column() + cell.get_colspan() - 1,
                ));
            }
        }

        if self.if_automatic_filter {
            match extent {
                Some(extent) => {
                    tracing::debug!(sheet = %self.name, ?extent, "apply automatic filter");
                    self.adapter.apply_automatic_filter(extent)?;
                }
                None => {
                    tracing::warn!(sheet = %self.name, "automatic filter on empty sheet ignored");
                }
            }
        }

        for n_col_idx in &self.set_auto_columns {
            tracing::debug!(sheet = %self.name, column = *n_col_idx, "apply auto column");
            self.adapter.apply_auto_column(*n_col_idx)?;
        }

        self.if_resolved = true;
        Ok(())
    }

    pub(crate) fn into_adapter(self) -> A {
        self.adapter
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Accessors

    /// Sheet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next row number an implicit [`Self::row`] will use.
    pub fn next_row_number(&self) -> usize {
        self.n_row_next
    }

    /// Number of currently open groups.
    pub fn group_depth(&self) -> usize {
        self.l_group_starts.len()
    }

    /// Row with the given 1-based number, if defined.
    pub fn get_row(&self, row_number: usize) -> Option<&RowDefinition> {
        self.rows.get(&row_number)
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &RowDefinition> {
        self.rows.values()
    }

    /// Number of distinct rows defined.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns flagged for auto-fit so far.
    pub fn auto_columns(&self) -> &BTreeSet<usize> {
        &self.set_auto_columns
    }

    pub fn is_automatic_filter(&self) -> bool {
        self.if_automatic_filter
    }

    pub fn is_resolved(&self) -> bool {
        self.if_resolved
    }

    /// Output adapter of this sheet.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    // #endregion
}

impl<A: SheetOutputAdapter> std::fmt::Debug for SheetDefinition<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sheet[{}]", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::kw;
    use crate::testing::{EnumRecordedOp, RecordingSheetAdapter};
    use proptest::prelude::*;

    fn new_sheet() -> SheetDefinition<RecordingSheetAdapter> {
        SheetDefinition::new("test", RecordingSheetAdapter::default())
    }

    fn row_groups(sheet: &SheetDefinition<RecordingSheetAdapter>) -> Vec<(usize, usize, bool)> {
        sheet
            .adapter()
            .ops
            .iter()
            .filter_map(|op| match op {
                EnumRecordedOp::RowGroup {
                    start,
                    end,
                    collapsed,
                } => Some((*start, *end, *collapsed)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fresh_sheet_starts_at_row_one_with_empty_stack() {
        let sheet = new_sheet();
        assert_eq!(sheet.next_row_number(), 1);
        assert_eq!(sheet.group_depth(), 0);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_append_rows_are_distinct_and_sequential() {
        let mut sheet = new_sheet();
        let l_numbers: Vec<usize> = (0..5).map(|_| sheet.row().unwrap().number()).collect();

        assert_eq!(l_numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(sheet.len(), 5);
        assert_eq!(sheet.next_row_number(), 6);
    }

    #[test]
    fn test_row_with_runs_callback_and_advances_once() {
        let mut sheet = new_sheet();
        let mut n_calls = 0;
        sheet
            .row_with(|r| {
                n_calls += 1;
                r.cell("Hello World").map(|_| ())
            })
            .unwrap();

        assert_eq!(n_calls, 1);
        assert_eq!(sheet.next_row_number(), 2);
        assert_eq!(sheet.get_row(1).unwrap().len(), 1);
    }

    #[test]
    fn test_row_at_is_lookup_or_create() {
        let mut sheet = new_sheet();
        sheet
            .row_at(3, |r| r.cell_at(0).map(|c| { c.value("a"); }))
            .unwrap();
        sheet
            .row_at(3, |r| r.cell_at(1).map(|c| { c.value("b"); }))
            .unwrap();

        assert_eq!(sheet.len(), 1);
        let row = sheet.get_row(3).unwrap();
        assert_eq!(row.len(), 2);
        assert!(row.get_cell(0).is_some() && row.get_cell(1).is_some());
    }

    #[test]
    fn test_row_at_rejects_non_positive_without_creating() {
        let mut sheet = new_sheet();
        for n_bad in [0, -1] {
            let mut if_called = false;
            let result = sheet.row_at(n_bad, |_| if_called = true);
            assert!(matches!(result, Err(EnumXlsxDslError::InvalidArgument(_))));
            assert!(!if_called);
        }
        assert!(sheet.is_empty());
        assert_eq!(sheet.next_row_number(), 1);
    }

    #[test]
    fn test_row_at_leaves_cursor_for_next_append() {
        let mut sheet = new_sheet();
        sheet.row().unwrap();
        sheet.row().unwrap();
        sheet.row_at(5, |_| {}).unwrap();
        assert_eq!(sheet.next_row_number(), 5);

        // Next append reuses row 5, then advances.
        assert_eq!(sheet.row().unwrap().number(), 5);
        assert_eq!(sheet.next_row_number(), 6);

        // Jumping backward revisits an existing row.
        sheet.row_at(1, |_| {}).unwrap();
        assert_eq!(sheet.row().unwrap().number(), 1);
        assert_eq!(sheet.row().unwrap().number(), 2);
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn test_group_multi_row_applies_expanded_range() {
        let mut sheet = new_sheet();
        sheet.row().unwrap();
        sheet
            .group(|s| {
                s.row().map(|_| ())?;
                s.row().map(|_| ())?;
                s.row().map(|_| ())
            })
            .unwrap();

        assert_eq!(row_groups(&sheet), vec![(2, 4, false)]);
        assert_eq!(sheet.group_depth(), 0);
    }

    #[test]
    fn test_group_single_row_is_not_grouped() {
        let mut sheet = new_sheet();
        sheet.group(|s| s.row().map(|_| ())).unwrap();
        sheet.collapse(|_| {}).unwrap();

        assert!(row_groups(&sheet).is_empty());
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_collapse_applies_collapsed_range() {
        let mut sheet = new_sheet();
        sheet
            .collapse(|s| -> XlsxDslResult {
                s.row()?;
                s.row()?;
                Ok(())
            })
            .unwrap();

        assert_eq!(row_groups(&sheet), vec![(1, 2, true)]);
    }

    #[test]
    fn test_nested_groups_follow_cursor_positions() {
        let mut sheet = new_sheet();
        sheet
            .group(|outer| -> XlsxDslResult {
                outer.collapse(|inner| -> XlsxDslResult {
                    assert_eq!(inner.group_depth(), 2);
                    inner.row()?;
                    inner.row()?;
                    Ok(())
                })?;
                outer.row()?;
                outer.row()?;
                Ok(())
            })
            .unwrap();

        assert_eq!(row_groups(&sheet), vec![(1, 2, true), (1, 4, false)]);
        assert_eq!(sheet.group_depth(), 0);
    }

    #[test]
    fn test_failing_group_callback_restores_stack() {
        let mut sheet = new_sheet();
        let result = sheet.group(|s| -> XlsxDslResult {
            s.row()?;
            s.row()?;
            s.row_at(0, |_| {})?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(sheet.group_depth(), 0);
        assert!(row_groups(&sheet).is_empty());
    }

    #[test]
    fn test_state_dispatches_to_matching_primitive() {
        let mut sheet = new_sheet();
        for state in EnumSheetState::ALL {
            sheet.state(state).unwrap();
        }
        sheet.password("secret").unwrap();

        assert_eq!(
            sheet.adapter().ops,
            vec![
                EnumRecordedOp::Lock,
                EnumRecordedOp::Show,
                EnumRecordedOp::Hide,
                EnumRecordedOp::HideCompletely,
                EnumRecordedOp::Password("secret".to_string()),
            ]
        );
    }

    #[test]
    fn test_freeze_forwards_column_and_row_counts() {
        let mut sheet = new_sheet();
        sheet.freeze(1, 0).unwrap().freeze("B", 1).unwrap();
        sheet.freeze(0, N_NROWS_EXCEL_MAX - 1).unwrap();
        assert!(sheet.freeze("B2", 1).is_err());
        assert!(sheet.freeze(-1, 1).is_err());
        assert!(sheet.freeze("A", N_NROWS_EXCEL_MAX).is_err());

        assert_eq!(
            sheet.adapter().ops,
            vec![
                EnumRecordedOp::Freeze { column: 1, row: 0 },
                EnumRecordedOp::Freeze { column: 1, row: 1 },
                EnumRecordedOp::Freeze {
                    column: 0,
                    row: N_NROWS_EXCEL_MAX - 1
                },
            ]
        );
    }

    #[test]
    fn test_page_callback_configures_then_applies() {
        let mut sheet = new_sheet();
        sheet
            .page(|p| -> XlsxDslResult {
                p.paper(kw::A4).orientation(kw::LANDSCAPE).fit(kw::WIDTH, 1)?;
                Ok(())
            })
            .unwrap();

        let EnumRecordedOp::Page(page) = &sheet.adapter().ops[0] else {
            panic!("expected page op, got {:?}", sheet.adapter().ops);
        };
        assert_eq!(page.paper, Some(kw::A4));
        assert_eq!(page.fit_width, Some(1));
    }

    #[test]
    fn test_resolve_order_filter_then_auto_columns() {
        let mut sheet = new_sheet();
        sheet.filter(kw::AUTO);
        sheet.auto_column("D").unwrap();
        sheet
            .row_with(|r| -> XlsxDslResult {
                r.cell("One")?.cell("Two")?;
                r.cell_with(|c| {
                    c.value("Three").width_auto(kw::AUTO);
                })?;
                Ok(())
            })
            .unwrap();
        sheet
            .row_at(4, |r| r.cell_at(1).map(|c| { c.value(1.5); }))
            .unwrap();

        sheet.resolve(&IndexMap::new()).unwrap();
        sheet.resolve(&IndexMap::new()).unwrap();

        assert_eq!(
            sheet.adapter().ops,
            vec![
                EnumRecordedOp::WriteRow { row: 1, cells: 3 },
                EnumRecordedOp::WriteRow { row: 4, cells: 1 },
                EnumRecordedOp::AutomaticFilter(SpecSheetExtent {
                    row_first: 1,
                    row_last: 4,
                    col_first: 0,
                    col_last: 2,
                }),
                EnumRecordedOp::AutoColumn(2),
                EnumRecordedOp::AutoColumn(3),
            ]
        );
        assert!(sheet.is_resolved());
    }

    #[test]
    fn test_resolve_applies_styles_and_column_groups_per_row() {
        let mut dict_styles = IndexMap::new();
        let mut bold = SpecCellStyle::default();
        bold.font_style(kw::BOLD);
        dict_styles.insert("bold".to_string(), bold);

        let mut sheet = new_sheet();
        sheet
            .row_with(|r| -> XlsxDslResult {
                r.style_named("bold").cell("Headline 1")?;
                r.collapse(|g| -> XlsxDslResult {
                    g.cell("Headline 2")?.cell("Headline 3")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();
        sheet.resolve(&dict_styles).unwrap();

        assert_eq!(
            sheet.adapter().ops,
            vec![
                EnumRecordedOp::WriteRow { row: 1, cells: 3 },
                EnumRecordedOp::ColumnGroup {
                    start: 1,
                    end: 2,
                    collapsed: true
                },
            ]
        );
        let cell = sheet.get_row(1).unwrap().get_cell(2).unwrap();
        assert!(cell.get_style().font_styles.contains(&kw::BOLD));
    }

    #[test]
    fn test_resolve_fails_on_unknown_named_style() {
        let mut sheet = new_sheet();
        sheet
            .row_with(|r| r.cell_with(|c| {
                c.style_named("h1");
            }).map(|_| ()))
            .unwrap();
        assert!(matches!(
            sheet.resolve(&IndexMap::new()),
            Err(EnumXlsxDslError::InvalidArgument(_))
        ));
        assert!(!sheet.is_resolved());
    }

    #[test]
    fn test_resolve_skips_filter_on_empty_sheet() {
        let mut sheet = new_sheet();
        sheet.filter(kw::AUTO);
        sheet.resolve(&IndexMap::new()).unwrap();
        assert!(sheet.adapter().ops.is_empty());
    }

    proptest! {
        #[test]
        fn row_count_equals_distinct_numbers_touched(
            l_steps in prop::collection::vec(prop::option::of(1i64..40), 1..60)
        ) {
            let mut sheet = new_sheet();
            let mut set_touched = BTreeSet::new();
            for step in l_steps {
                match step {
                    None => {
                        set_touched.insert(sheet.row().unwrap().number());
                    }
                    Some(n_row) => {
                        sheet.row_at(n_row, |_| {}).unwrap();
                        set_touched.insert(n_row as usize);
                    }
                }
            }
            prop_assert_eq!(sheet.len(), set_touched.len());
            let l_numbers: BTreeSet<usize> = sheet.rows().map(RowDefinition::number).collect();
            prop_assert_eq!(l_numbers, set_touched);
        }
    }
}
