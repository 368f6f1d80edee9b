use thiserror::Error;

/// Failures while reading the source dataset. All of them are fatal to
/// pipeline construction.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("dataset header has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("missing Launch_Date at line {line}")]
    MissingDate { line: u64 },

    #[error("unparseable Launch_Date '{value}' at line {line}")]
    InvalidDate { line: u64, value: String },

    #[error("unrecognized Emerging_Trend_Flag '{value}' at line {line}")]
    InvalidFlag { line: u64, value: String },
}
