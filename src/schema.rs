use crate::error::{Result, TableError};

/// Column names written by the benchmark harness. They must match its
/// output byte-for-byte.
pub const COL_ALGORITHM: &str = "algoritmo";
pub const COL_CORPUS: &str = "corpus";
pub const COL_SIZE_BYTES: &str = "tamano_bytes";
pub const COL_TIME_SECONDS: &str = "tiempo_s";
pub const COL_COMPARISONS: &str = "comparaciones";
pub const COL_SHIFTS: &str = "shifts";
pub const COL_PATTERN: &str = "patron";

/// Every column the harness contract guarantees, in reporting order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_ALGORITHM,
    COL_CORPUS,
    COL_SIZE_BYTES,
    COL_TIME_SECONDS,
    COL_COMPARISONS,
    COL_SHIFTS,
    COL_PATTERN,
];

/// Positions of the required columns within a header row.
///
/// Only obtainable through [`validate`], so holding one proves the header
/// carried every required column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub algorithm: usize,
    pub corpus: usize,
    pub size_bytes: usize,
    pub time_seconds: usize,
    pub comparisons: usize,
    pub shifts: usize,
    pub pattern: usize,
}

/// Check a header row against [`REQUIRED_COLUMNS`].
///
/// Reports every missing column at once, in the order of
/// [`REQUIRED_COLUMNS`]. Extra columns are ignored. If a name appears more
/// than once the first occurrence wins.
pub fn validate<S: AsRef<str>>(headers: &[S]) -> Result<ColumnIndex> {
    let position = |name: &str| headers.iter().position(|h| h.as_ref() == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| position(**name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(TableError::MissingColumns { missing });
    }

    let find = |name: &str| {
        position(name).ok_or_else(|| TableError::MissingColumns {
            missing: vec![name.to_string()],
        })
    };

    Ok(ColumnIndex {
        algorithm: find(COL_ALGORITHM)?,
        corpus: find(COL_CORPUS)?,
        size_bytes: find(COL_SIZE_BYTES)?,
        time_seconds: find(COL_TIME_SECONDS)?,
        comparisons: find(COL_COMPARISONS)?,
        shifts: find(COL_SHIFTS)?,
        pattern: find(COL_PATTERN)?,
    })
}
