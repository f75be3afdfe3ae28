//! XLSX builder constants and default preset factories.

use crate::spec::{SpecAutofitCellsPolicy, SpecXlsxWriterOptions};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// First row number handed out by a fresh sheet cursor.
pub const N_ROW_CURSOR_START: usize = 1;

/// Replacement used when sanitizing illegal sheet-name characters.
pub const C_SHEET_NAME_REPLACE_TO: &str = "_";

/// Hard upper bound for a column width (Excel UI limit).
pub const N_WIDTH_CELL_EXCEL_MAX: usize = 255;

/// Column selector reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumColumnIdentifier {
    /// Select by column name (`"A"`, `"AB"`).
    Name(String),
    /// Select by zero-based column index.
    Index(usize),
    /// Negative index from a signed literal; rejected when resolved.
    Negative(i64),
}

impl From<&str> for EnumColumnIdentifier {
    fn from(value: &str) -> Self {
        EnumColumnIdentifier::Name(value.to_string())
    }
}

impl From<String> for EnumColumnIdentifier {
    fn from(value: String) -> Self {
        EnumColumnIdentifier::Name(value)
    }
}

impl From<usize> for EnumColumnIdentifier {
    fn from(value: usize) -> Self {
        EnumColumnIdentifier::Index(value)
    }
}

impl From<u16> for EnumColumnIdentifier {
    fn from(value: u16) -> Self {
        EnumColumnIdentifier::Index(usize::from(value))
    }
}

impl From<u32> for EnumColumnIdentifier {
    fn from(value: u32) -> Self {
        EnumColumnIdentifier::Index(value as usize)
    }
}

/// Untyped integer literals such as `cell_at(2)` infer as `i32`.
impl From<i32> for EnumColumnIdentifier {
    fn from(value: i32) -> Self {
        match usize::try_from(value) {
            Ok(idx) => EnumColumnIdentifier::Index(idx),
            Err(_) => EnumColumnIdentifier::Negative(i64::from(value)),
        }
    }
}

/// Build default autofit policy used by [`crate::writer::XlsxWriter`].
pub fn derive_default_autofit_policy() -> SpecAutofitCellsPolicy {
    SpecAutofitCellsPolicy::default()
}

/// Build default writer options.
pub fn derive_default_xlsx_writer_options() -> SpecXlsxWriterOptions {
    SpecXlsxWriterOptions::default()
}
