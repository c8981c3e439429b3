use thiserror::Error;

/// Errors that can occur while extracting records or deriving metrics.
///
/// Every variant is fatal for the poll cycle that raised it: the cycle
/// either produces its complete metric set or none at all. Unknown OID
/// suffixes are deliberately not represented here — they are logged and
/// skipped by the walk extractor.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("unknown source: {name}")]
    UnknownSource { name: String },

    #[error("unexpected table caption: {caption:?}")]
    UnexpectedTable { caption: String },

    #[error("unexpected row label: {label:?}")]
    UnexpectedField { label: String },

    #[error("row {label:?} has {cells} data cells, expected {columns}")]
    ColumnMismatch {
        label: String,
        cells: usize,
        columns: usize,
    },

    #[error("record is missing field {field:?}")]
    MissingField { field: &'static str },

    #[error("no counterpart row for index {index:?}")]
    JoinMismatch { index: String },

    #[error("field {field:?} has non-numeric value {value:?}")]
    MalformedValue { field: &'static str, value: String },
}
