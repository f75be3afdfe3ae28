//! DataFrame ingestion: append a polars frame to a sheet as rows.

use std::io::Cursor;

use polars::prelude::{AnyValue, DataFrame, IpcReader, SerReader};

use crate::adapter::SheetOutputAdapter;
use crate::conf::N_NCOLS_EXCEL_MAX;
use crate::error::{EnumXlsxDslError, XlsxDslResult};
use crate::keywords::EnumAuto;
use crate::sheet::SheetDefinition;
use crate::spec::{EnumCellValue, SpecFrameAppendOptions};

/// Append `df` at the sheet cursor: an optional header row of column names,
/// then one row per record.
///
/// Returns the number of rows appended (header included).
pub fn append_dataframe<A: SheetOutputAdapter>(
    sheet: &mut SheetDefinition<A>,
    df: &DataFrame,
    options: &SpecFrameAppendOptions,
) -> XlsxDslResult<usize> {
    let n_width_df = df.width();
    if options.col_start + n_width_df > N_NCOLS_EXCEL_MAX {
        return Err(EnumXlsxDslError::invalid(format!(
            "dataframe does not fit: {n_width_df} columns from column {}",
            options.col_start
        )));
    }

    let mut n_rows_appended = 0usize;

    if options.if_header {
        let l_colnames: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        sheet.row_with(|row| -> XlsxDslResult {
            for (n_idx_col, c_colname) in l_colnames.iter().enumerate() {
                let cell = row.cell_at(options.col_start + n_idx_col)?;
                cell.value(c_colname.as_str()).apply_style(&options.style_header);
                if options.if_width_auto {
                    cell.width_auto(EnumAuto::Auto);
                }
            }
            Ok(())
        })?;
        n_rows_appended += 1;
    }

    let l_cols = df.get_columns();
    for n_idx_row in 0..df.height() {
        sheet.row_with(|row| -> XlsxDslResult {
            for (n_idx_col, col) in l_cols.iter().enumerate() {
                let value = derive_cell_value_from_any_value(col.get(n_idx_row)?);
                let cell = row.cell_at(options.col_start + n_idx_col)?;
                cell.value(value);
                if options.if_width_auto {
                    cell.width_auto(EnumAuto::Auto);
                }
            }
            Ok(())
        })?;
        n_rows_appended += 1;
    }

    tracing::debug!(
        sheet = sheet.name(),
        rows = n_rows_appended,
        cols = n_width_df,
        "append dataframe"
    );
    Ok(n_rows_appended)
}

/// Append a frame given as Polars IPC bytes.
pub fn append_ipc_bytes<A: SheetOutputAdapter>(
    sheet: &mut SheetDefinition<A>,
    v_ipc_df: &[u8],
    options: &SpecFrameAppendOptions,
) -> XlsxDslResult<usize> {
    let df = derive_dataframe_from_ipc_bytes(v_ipc_df)?;
    append_dataframe(sheet, &df, options)
}

fn derive_dataframe_from_ipc_bytes(v_ipc_df: &[u8]) -> XlsxDslResult<DataFrame> {
    Ok(IpcReader::new(Cursor::new(v_ipc_df)).finish()?)
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int128(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}
