use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the results table. Any of these aborts the run
/// before a single chart is drawn.
#[derive(Debug, Error)]
pub enum TableError {
    /// The results file does not exist at the expected location.
    #[error("results file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// One or more required columns are absent from the header.
    #[error("missing required columns in results file: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The file exists but is not a readable delimited table.
    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
