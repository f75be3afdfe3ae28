//! In-memory adapters that record every output call, for unit tests.

use crate::adapter::{SheetOutputAdapter, WorkbookOutputAdapter};
use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::row::RowDefinition;
use crate::spec::{SpecCellStyle, SpecPageDefinition, SpecSheetExtent};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EnumRecordedOp {
    WriteRow { row: usize, cells: usize },
    Page(SpecPageDefinition),
    RowGroup { start: usize, end: usize, collapsed: bool },
    ColumnGroup { start: usize, end: usize, collapsed: bool },
    Lock,
    Show,
    Hide,
    HideCompletely,
    Password(String),
    Freeze { column: usize, row: usize },
    AutomaticFilter(SpecSheetExtent),
    AutoColumn(usize),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSheetAdapter {
    pub name: String,
    pub ops: Vec<EnumRecordedOp>,
    /// Effective style of every written cell, in write order.
    pub styles: Vec<SpecCellStyle>,
    pub if_fail_page: bool,
}

impl SheetOutputAdapter for RecordingSheetAdapter {
    fn write_row(&mut self, row_number: usize, row: &RowDefinition) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::WriteRow {
            row: row_number,
            cells: row.len(),
        });
        self.styles
            .extend(row.cells().map(|cell| cell.get_style().clone()));
        Ok(())
    }

    fn apply_page(&mut self, page: &SpecPageDefinition) -> XlsxDslResult {
        if self.if_fail_page {
            return Err(EnumXlsxDslError::invalid("page rejected"));
        }
        self.ops.push(EnumRecordedOp::Page(*page));
        Ok(())
    }

    fn apply_row_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::RowGroup {
            start,
            end,
            collapsed,
        });
        Ok(())
    }

    fn apply_column_group(&mut self, start: usize, end: usize, collapsed: bool) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::ColumnGroup {
            start,
            end,
            collapsed,
        });
        Ok(())
    }

    fn lock(&mut self) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::Lock);
        Ok(())
    }

    fn show(&mut self) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::Show);
        Ok(())
    }

    fn hide(&mut self) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::Hide);
        Ok(())
    }

    fn hide_completely(&mut self) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::HideCompletely);
        Ok(())
    }

    fn apply_password(&mut self, password: &str) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::Password(password.to_string()));
        Ok(())
    }

    fn apply_freeze(&mut self, column: usize, row: usize) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::Freeze { column, row });
        Ok(())
    }

    fn apply_automatic_filter(&mut self, extent: SpecSheetExtent) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::AutomaticFilter(extent));
        Ok(())
    }

    fn apply_auto_column(&mut self, column: usize) -> XlsxDslResult {
        self.ops.push(EnumRecordedOp::AutoColumn(column));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingWorkbookAdapter {
    pub l_created: Vec<String>,
    pub l_finished: Vec<RecordingSheetAdapter>,
    /// Sheets created afterwards reject every page layout.
    pub if_fail_page: bool,
}

impl WorkbookOutputAdapter for RecordingWorkbookAdapter {
    type Sheet = RecordingSheetAdapter;

    fn create_sheet(&mut self, name: &str) -> XlsxDslResult<Self::Sheet> {
        self.l_created.push(name.to_string());
        Ok(RecordingSheetAdapter {
            name: name.to_string(),
            if_fail_page: self.if_fail_page,
            ..Default::default()
        })
    }

    fn finish_sheet(&mut self, sheet: Self::Sheet) -> XlsxDslResult {
        self.l_finished.push(sheet);
        Ok(())
    }
}
