use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The x field is neither numeric nor date-like and no type was declared.
    #[error("unsupported data type for field `{key}`: {value}")]
    UnsupportedDataType { key: String, value: String },

    /// Scale construction was attempted over zero usable records.
    #[error("cannot build a scale from an empty dataset")]
    EmptyDataset,

    /// A record does not carry the declared `group_key` field.
    #[error("record {row} is missing group field `{key}`")]
    MissingGroupField { key: String, row: usize },
}
