//! Stateless helper utilities used by the definitions and the writer.

use crate::conf::{
    EnumColumnIdentifier, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::error::{EnumXlsxDslError, XlsxDslResult};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnAddressing

/// Parse an alphabetic column name into a zero-based index.
///
/// `"A"` -> 0, `"Z"` -> 25, `"AA"` -> 26. Case-insensitive; surrounding
/// whitespace is ignored.
pub fn parse_column_name(name: &str) -> XlsxDslResult<usize> {
    let c_name = name.trim();
    if c_name.is_empty() {
        return Err(EnumXlsxDslError::invalid("column name must not be empty"));
    }

    let mut n_col_1based: usize = 0;
    for chr in c_name.chars() {
        if !chr.is_ascii_alphabetic() {
            return Err(EnumXlsxDslError::invalid(format!(
                "column name must be alphabetic: {name:?}"
            )));
        }
        let n_digit = (chr.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n_col_1based = n_col_1based
            .checked_mul(26)
            .and_then(|n| n.checked_add(n_digit))
            .filter(|n| *n <= N_NCOLS_EXCEL_MAX)
            .ok_or_else(|| {
                EnumXlsxDslError::invalid(format!("column name out of range: {name:?}"))
            })?;
    }

    Ok(n_col_1based - 1)
}

/// Format a zero-based column index as an alphabetic column name.
pub fn format_column_name(col_idx: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_rest = col_idx + 1;
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push((b'A' + n_rem as u8) as char);
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

/// Resolve a column selector to a validated zero-based index.
pub fn resolve_column(column: &EnumColumnIdentifier) -> XlsxDslResult<usize> {
    let n_col_idx = match column {
        EnumColumnIdentifier::Name(name) => parse_column_name(name)?,
        EnumColumnIdentifier::Index(idx) => *idx,
        EnumColumnIdentifier::Negative(idx) => {
            return Err(EnumXlsxDslError::invalid(format!(
                "column index must be >= 0. Got: {idx}"
            )));
        }
    };
    validate_column_index(n_col_idx)
}

/// Validate a zero-based column index against the Excel limit.
pub fn validate_column_index(col_idx: usize) -> XlsxDslResult<usize> {
    if col_idx >= N_NCOLS_EXCEL_MAX {
        return Err(EnumXlsxDslError::invalid(format!(
            "column index out of range: {col_idx} (max {})",
            N_NCOLS_EXCEL_MAX - 1
        )));
    }
    Ok(col_idx)
}

/// Validate a caller-supplied 1-based row number.
pub fn validate_row_number(row_number: i64) -> XlsxDslResult<usize> {
    if row_number <= 0 {
        return Err(EnumXlsxDslError::invalid(format!(
            "Row index is based on 1. Got: {row_number}"
        )));
    }
    let n_row = usize::try_from(row_number)
        .map_err(|_| EnumXlsxDslError::invalid(format!("row index overflow: {row_number}")))?;
    if n_row > N_NROWS_EXCEL_MAX {
        return Err(EnumXlsxDslError::invalid(format!(
            "row index out of range: {n_row} (max {N_NROWS_EXCEL_MAX})"
        )));
    }
    Ok(n_row)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate displayed width units for a text; wide glyphs count 1.6.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Clamp an observed width with padding into `[min, max]`.
pub fn calculate_autofit_width(
    width_recorded: usize,
    width_min: usize,
    width_max: usize,
    width_padding: usize,
) -> usize {
    let n_min = usize::max(1, width_min);
    let n_max = usize::min(
        crate::conf::N_WIDTH_CELL_EXCEL_MAX,
        usize::max(n_min, width_max),
    );
    usize::min(n_max, usize::max(n_min, width_recorded + width_padding))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
