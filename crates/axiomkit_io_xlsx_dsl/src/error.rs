//! Error taxonomy for the workbook builder.

use thiserror::Error;

/// Builder and writer errors.
///
/// Every failure is synchronous and surfaced to the direct caller of the
/// operation that detected it. Bookkeeping is validated before it is mutated,
/// so an `Err` never leaves a half-applied definition behind.
#[derive(Debug, Error)]
pub enum EnumXlsxDslError {
    /// Caller supplied an out-of-domain value (row index, column name, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Writer was used after `close()`.
    #[error("cannot write after close()")]
    Closed,
    /// Failure reported by the XLSX serializer.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// Failure reading a DataFrame or its IPC payload.
    #[error("dataframe error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}

impl EnumXlsxDslError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EnumXlsxDslError::InvalidArgument(msg.into())
    }
}

/// Result alias used across the crate.
pub type XlsxDslResult<T = ()> = Result<T, EnumXlsxDslError>;
