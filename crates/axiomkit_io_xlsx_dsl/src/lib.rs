//! `axiomkit_io_xlsx_dsl` v1:
//! Declarative workbook builder with deferred sheet resolution.
//!
//! Architecture:
//! - `conf`      : constants and default presets
//! - `error`     : error taxonomy and result alias
//! - `keywords`  : keyword constants and capability families
//! - `spec`      : value models and options
//! - `configure` : configuration-callback protocol
//! - `adapter`   : output adapter traits
//! - `cell`      : cell definition (value, styles, span, name, comment, link)
//! - `row`       : row definition, row styles and column groups
//! - `page`      : page (print layout) definition
//! - `sheet`     : sheet definition, grouping and resolution
//! - `workbook`  : workbook definition and build entry point
//! - `frame`     : polars DataFrame ingestion
//! - `util`      : pure helper functions
//! - `writer`    : XLSX output adapter over `rust_xlsxwriter`
pub mod adapter;
pub mod cell;
pub mod conf;
pub mod configure;
pub mod error;
pub mod frame;
pub mod keywords;
pub mod page;
pub mod row;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod workbook;
pub mod writer;

#[cfg(test)]
mod testing;

pub use adapter::{SheetOutputAdapter, WorkbookOutputAdapter};
pub use cell::CellDefinition;
pub use conf::{
    EnumColumnIdentifier, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};
pub use configure::ConfigureOutcome;
pub use error::{EnumXlsxDslError, XlsxDslResult};
pub use frame::{append_dataframe, append_ipc_bytes};
pub use keywords::{
    BorderSide, EnumAuto, EnumBorderStyle, EnumFit, EnumFontStyle, EnumForegroundFill,
    EnumKeyword, EnumOrientation, EnumPaper, EnumSheetState, EnumText, FlagsCapability,
    HorizontalAlignment, VerticalAlignment, kw,
};
pub use page::PageDefinition;
pub use row::RowDefinition;
pub use sheet::SheetDefinition;
pub use spec::{
    EnumCellLink, EnumCellValue, SpecAutofitCellsPolicy, SpecCellComment, SpecCellStyle,
    SpecColumnGroup, SpecFrameAppendOptions, SpecPageDefinition, SpecSheetExtent,
    SpecXlsxWriterOptions,
};
pub use util::{format_column_name, parse_column_name, sanitize_sheet_name};
pub use workbook::WorkbookDefinition;
pub use writer::{XlsxSheetWriter, XlsxWriter};
