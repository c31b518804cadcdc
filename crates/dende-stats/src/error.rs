use crate::value::ValueKind;

/// Errors reported by the statistics engine.
///
/// Every error is local to the query that produced it; the dataset and the
/// engine stay usable afterwards.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum StatsError {
    #[display("column '{column}' not found in dataset")]
    MissingColumn { column: String },
    #[display("column '{column}' holds a {found} value at index {index}, expected numeric")]
    TypeMismatch {
        column: String,
        index: usize,
        found: ValueKind,
    },
    #[display("column '{column}' is empty")]
    EmptyColumn { column: String },
    #[display(
        "columns '{left}' ({left_len} values) and '{right}' ({right_len} values) differ in length"
    )]
    LengthMismatch {
        left: String,
        right: String,
        left_len: usize,
        right_len: usize,
    },
    #[display("histogram needs at least one bin")]
    InvalidBinCount,
}

impl StatsError {
    pub(crate) fn missing_column(column: &str) -> Self {
        StatsError::MissingColumn {
            column: column.to_owned(),
        }
    }

    pub(crate) fn empty_column(column: &str) -> Self {
        StatsError::EmptyColumn {
            column: column.to_owned(),
        }
    }
}
