use crate::error::{Result, TableError};
use crate::schema::{self, ColumnIndex};
use csv::StringRecord;
use std::path::Path;

/// One row of the results table, after schema validation.
///
/// Numeric fields that failed to parse are `None`. Such a row is kept in
/// the table but contributes no point to any chart that needs the field.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub corpus: String,
    pub size_bytes: Option<u64>,
    pub time_seconds: Option<f64>,
    pub comparisons: Option<u64>,
    pub shifts: Option<u64>,
    pub pattern: String,
}

impl BenchmarkRecord {
    fn from_record(record: &StringRecord, columns: &ColumnIndex) -> Self {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        Self {
            algorithm: field(columns.algorithm).to_string(),
            corpus: field(columns.corpus).to_string(),
            size_bytes: parse_size(field(columns.size_bytes)),
            time_seconds: parse_seconds(field(columns.time_seconds)),
            comparisons: parse_count(field(columns.comparisons)),
            shifts: parse_count(field(columns.shifts)),
            pattern: field(columns.pattern).to_string(),
        }
    }

    /// The (size, time) point this row contributes, if both fields parsed.
    pub fn point(&self) -> Option<(u64, f64)> {
        Some((self.size_bytes?, self.time_seconds?))
    }
}

/// The full, validated results table. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    records: Vec<BenchmarkRecord>,
}

impl ResultTable {
    /// Load the results file at `path`.
    ///
    /// Fails with [`TableError::NotFound`] if nothing exists at `path`, and
    /// with [`TableError::MissingColumns`] as soon as the header has been
    /// read, before any data row. Short rows are padded with missing
    /// values rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TableError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let csv_err = |source: csv::Error| TableError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_err)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = schema::validate(&headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(csv_err)?;
            records.push(BenchmarkRecord::from_record(&row, &columns));
        }

        Ok(Self { records })
    }

    pub fn from_records(records: Vec<BenchmarkRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BenchmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows that cannot be plotted because size or time failed to parse,
    /// with their 0-based data row index.
    pub fn unplottable(&self) -> impl Iterator<Item = (usize, &BenchmarkRecord)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.point().is_none())
    }
}

/// Parse a corpus size. Integral float text ("1024.0") is accepted since
/// spreadsheet round-trips tend to produce it.
fn parse_size(s: &str) -> Option<u64> {
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

fn parse_seconds(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|t| t.is_finite() && *t >= 0.0)
}

fn parse_count(s: &str) -> Option<u64> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "algoritmo,corpus,tamano_bytes,tiempo_s,comparaciones,shifts,patron";

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark.csv");

        match ResultTable::load(&path) {
            Err(TableError::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_message_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = ResultTable::load(&path).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_load_typed_records() {
        let file = write_csv(&format!(
            "{HEADER}\nBoyer-Moore,quijote.txt,102580,0.012,4410,1200,abc\nKMP,quijote.txt,102580,0.030,102600,0,abc\n"
        ));

        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert_eq!(first.algorithm, "Boyer-Moore");
        assert_eq!(first.corpus, "quijote.txt");
        assert_eq!(first.size_bytes, Some(102580));
        assert_eq!(first.time_seconds, Some(0.012));
        assert_eq!(first.comparisons, Some(4410));
        assert_eq!(first.shifts, Some(1200));
        assert_eq!(first.pattern, "abc");
        assert_eq!(first.point(), Some((102580, 0.012)));
    }

    #[test]
    fn test_unparsable_time_is_missing_not_error() {
        let file = write_csv(&format!(
            "{HEADER}\nKMP,a.txt,1000,error,1,1,abc\nKMP,a.txt,2000,,1,1,abc\nKMP,a.txt,3000,0.5,1,1,abc\n"
        ));

        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[0].time_seconds, None);
        assert_eq!(table.records()[1].time_seconds, None);
        assert_eq!(table.records()[2].time_seconds, Some(0.5));

        let bad: Vec<usize> = table.unplottable().map(|(i, _)| i).collect();
        assert_eq!(bad, vec![0, 1]);
    }

    #[test]
    fn test_columns_in_any_order() {
        let file = write_csv(
            "patron,tiempo_s,algoritmo,tamano_bytes,corpus,shifts,comparaciones,extra\n\
             abc,0.25,KMP,512000,big.txt,3,4,x\n",
        );

        let table = ResultTable::load(file.path()).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.algorithm, "KMP");
        assert_eq!(r.pattern, "abc");
        assert_eq!(r.size_bytes, Some(512000));
        assert_eq!(r.time_seconds, Some(0.25));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = write_csv(
            "algoritmo,corpus,tamano_bytes,comparaciones,shifts,patron\nKMP,a,1,1,1,abc\n",
        );

        match ResultTable::load(file.path()) {
            Err(TableError::MissingColumns { missing }) => assert_eq!(missing, vec!["tiempo_s"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column_wins_over_row_width() {
        // Six header columns, seven fields per row.
        let file = write_csv(
            "algoritmo,corpus,tamano_bytes,comparaciones,shifts,patron\n\
             KMP,a.txt,1000,0.1,1,1,abc\n\
             KMP,a.txt,2000,0.2,1,1,abc\n",
        );

        match ResultTable::load(file.path()) {
            Err(TableError::MissingColumns { missing }) => assert_eq!(missing, vec!["tiempo_s"]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let file = write_csv(&format!("{HEADER}\n"));
        let table = ResultTable::load(file.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let file = write_csv(&format!("{HEADER}\n KMP , a.txt , 1024.0 , 0.5 ,1,1, abc \n"));
        let table = ResultTable::load(file.path()).unwrap();
        let r = &table.records()[0];
        assert_eq!(r.algorithm, "KMP");
        assert_eq!(r.pattern, "abc");
        assert_eq!(r.size_bytes, Some(1024));
    }

    #[test]
    fn test_truncated_row_is_padded_with_missing() {
        let file = write_csv(&format!(
            "{HEADER}\nKMP,q.txt,1000,0.1,1,1,abc\nKMP,q.txt,5120\n"
        ));

        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].point(), Some((1000, 0.1)));

        let short = &table.records()[1];
        assert_eq!(short.size_bytes, Some(5120));
        assert_eq!(short.time_seconds, None);
        assert_eq!(short.pattern, "");
        assert_eq!(short.point(), None);
    }

    #[test]
    fn test_long_row_ignores_extra_fields() {
        let file = write_csv(&format!("{HEADER}\nKMP,q.txt,1000,0.1,1,1,abc,junk\n"));
        let table = ResultTable::load(file.path()).unwrap();
        assert_eq!(table.records()[0].pattern, "abc");
        assert_eq!(table.records()[0].point(), Some((1000, 0.1)));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("102580"), Some(102580));
        assert_eq!(parse_size("2048.0"), Some(2048));
        assert_eq!(parse_size("2048.5"), None);
        assert_eq!(parse_size("-1"), None);
        assert_eq!(parse_size("big"), None);
        assert_eq!(parse_size(""), None);
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.012"), Some(0.012));
        assert_eq!(parse_seconds("1e-3"), Some(0.001));
        assert_eq!(parse_seconds("NaN"), None);
        assert_eq!(parse_seconds("inf"), None);
        assert_eq!(parse_seconds("-0.5"), None);
        assert_eq!(parse_seconds("fast"), None);
    }
}
