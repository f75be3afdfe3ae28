//! Output adapter traits consumed by the definition core.
//!
//! The core never talks to a concrete file format. A sheet definition owns one
//! [`SheetOutputAdapter`] and forwards every output-visible effect to it; the
//! workbook definition creates those adapters through a
//! [`WorkbookOutputAdapter`] and hands them back once each sheet resolved.

use crate::error::XlsxDslResult;
use crate::row::RowDefinition;
use crate::spec::{SpecPageDefinition, SpecSheetExtent};

/// Per-sheet output operations.
///
/// Row numbers are 1-based, column indices 0-based.
pub trait SheetOutputAdapter {
    /// Create or reuse the concrete row at `row_number` and write its content.
    fn write_row(&mut self, row_number: usize, row: &RowDefinition) -> XlsxDslResult;

    /// Apply a configured print layout.
    fn apply_page(&mut self, page: &SpecPageDefinition) -> XlsxDslResult;

    /// Group rows `[start, end]` (inclusive), optionally collapsed.
    fn apply_row_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult;

    /// Group columns `[start, end]` (inclusive, 0-based), optionally collapsed.
    fn apply_column_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult;

    /// Protect the sheet.
    fn lock(&mut self) -> XlsxDslResult;

    /// Make the sheet visible.
    fn show(&mut self) -> XlsxDslResult;

    /// Hide the sheet (user can unhide).
    fn hide(&mut self) -> XlsxDslResult;

    /// Hide the sheet so that it cannot be unhidden from the UI.
    fn hide_completely(&mut self) -> XlsxDslResult;

    /// Protect the sheet with a password.
    fn apply_password(&mut self, password: &str) -> XlsxDslResult;

    /// Freeze the first `column` columns and the first `row` rows.
    fn apply_freeze(&mut self, column: usize, row: usize) -> XlsxDslResult;

    /// Apply an automatic filter over `extent`.
    fn apply_automatic_filter(&mut self, extent: SpecSheetExtent) -> XlsxDslResult;

    /// Fit the width of `column` to its content.
    fn apply_auto_column(&mut self, column: usize) -> XlsxDslResult;
}

/// Workbook-level output operations.
pub trait WorkbookOutputAdapter {
    /// Adapter type produced per sheet.
    type Sheet: SheetOutputAdapter;

    /// Create the output side of a new sheet.
    fn create_sheet(&mut self, name: &str) -> XlsxDslResult<Self::Sheet>;

    /// Take back a sheet adapter once its definition resolved.
    fn finish_sheet(&mut self, sheet: Self::Sheet) -> XlsxDslResult;
}
