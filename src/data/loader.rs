use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use walkdir::WalkDir;

use super::model::{Publication, PublicationTable};
use crate::error::DashboardError;

pub const AUTHORS: &str = "Authors";
pub const TITLE: &str = "Title";
pub const YEAR: &str = "Year";
pub const CITED_BY: &str = "Cited by";
pub const INDEX_KEYWORDS: &str = "Index Keywords";

const REQUIRED_COLUMNS: [&str; 5] = [AUTHORS, TITLE, YEAR, CITED_BY, INDEX_KEYWORDS];

const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "json", "parquet", "pq"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a publication table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – Scopus-style export with a header row
/// * `.json`    – `[{ "Authors": "...", "Year": 1992, ... }, ...]`
/// * `.parquet` – one column per field, string or numeric types
///
/// The returned table is sorted by citation count, highest first.
pub fn load_file(path: &Path) -> Result<PublicationTable> {
    let ext = extension_of(path);

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!(DashboardError::UnsupportedFormat(other.to_string())),
    };

    let total = rows.len();
    let publications: Vec<Publication> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row_no, raw)| raw.normalise(row_no))
        .collect();
    if publications.len() < total {
        log::warn!(
            "{}: dropped {} rows without a usable year",
            path.display(),
            total - publications.len()
        );
    }
    log::info!("Loaded {} publications from {}", publications.len(), path.display());

    Ok(PublicationTable::sorted_by_citations(publications))
}

/// List loadable datasets directly inside `dir`, sorted by path.
/// A missing directory yields an empty list.
pub fn discover_datasets(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        log::debug!("datasets directory {} not found", dir.display());
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("scanning {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
        {
            found.push(path.to_path_buf());
        }
    }
    found.sort();
    Ok(found)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn missing_column(path: &Path, column: &'static str) -> DashboardError {
    DashboardError::MissingColumn {
        path: path.to_path_buf(),
        column,
    }
}

// ---------------------------------------------------------------------------
// RawRow – one row before normalisation
// ---------------------------------------------------------------------------

/// A row as read from disk, before splitting and defaulting.
#[derive(Debug, Default)]
struct RawRow {
    authors: String,
    title: String,
    year: Option<i64>,
    cited_by: Option<i64>,
    index_keywords: String,
}

impl RawRow {
    /// Parse delimited cells and apply defaults. `None` when the year is unusable.
    fn normalise(self, row_no: usize) -> Option<Publication> {
        let year = match self.year.and_then(|y| i32::try_from(y).ok()) {
            Some(y) => y,
            None => {
                log::warn!("row {row_no}: missing or invalid year, skipping '{}'", self.title);
                return None;
            }
        };
        let cited_by = match self.cited_by {
            Some(c) if c >= 0 => c as u64,
            other => {
                log::debug!("row {row_no}: citation count {other:?} treated as 0");
                0
            }
        };
        Some(Publication {
            authors: split_authors(&self.authors),
            title: self.title,
            year,
            cited_by,
            index_keywords: split_keywords(&self.index_keywords),
        })
    }
}

/// `"Hart, G.W., Kern, E.C."` → `["Hart", "G.W.", "Kern", "E.C."]`
///
/// The first token is the chart label's author and is kept even when blank,
/// so `", Smith J."` labels as `", 1992"`. A blank cell has no authors.
fn split_authors(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',')
        .map(str::trim)
        .enumerate()
        .filter(|(i, a)| *i == 0 || !a.is_empty())
        .map(|(_, a)| a.to_string())
        .collect()
}

/// `"load; smart meters"` → `["load", "smart meters"]`. Tokens are kept as
/// written; case folding happens during aggregation.
fn split_keywords(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(';').map(|k| k.trim().to_string()).collect()
}

/// Integer text, or float text with an integral part (`"1992.0"`).
fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least the five required column names, in
/// any order. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut idx = [0usize; 5];
    for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| missing_column(path, column))?;
    }
    let [authors_idx, title_idx, year_idx, cited_idx, keywords_idx] = idx;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |i: usize| record.get(i).unwrap_or("");

        rows.push(RawRow {
            authors: cell(authors_idx).to_string(),
            title: cell(title_idx).to_string(),
            year: parse_integer(cell(year_idx)),
            cited_by: parse_integer(cell(cited_idx)),
            index_keywords: cell(keywords_idx).to_string(),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Authors": "Hart, G.W.",
///     "Title": "Nonintrusive appliance load monitoring",
///     "Year": 1992,
///     "Cited by": 1500,
///     "Index Keywords": "load monitoring;power meters"
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        // Schema check on the first record only; later rows may omit nulls.
        if i == 0 {
            if let Some(column) = REQUIRED_COLUMNS.iter().find(|c| !obj.contains_key(**c)) {
                bail!(missing_column(path, *column));
            }
        }

        rows.push(RawRow {
            authors: json_text(obj.get(AUTHORS)),
            title: json_text(obj.get(TITLE)),
            year: obj.get(YEAR).and_then(json_integer),
            cited_by: obj.get(CITED_BY).and_then(json_integer),
            index_keywords: json_text(obj.get(INDEX_KEYWORDS)),
        });
    }

    Ok(rows)
}

fn json_text(val: Option<&JsonValue>) -> String {
    match val {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn json_integer(val: &JsonValue) -> Option<i64> {
    match val {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        JsonValue::String(s) => parse_integer(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per required field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); Pandas stores a blank `Cited by` as a
/// float `NaN` column, which is handled.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let authors = batch_column(&batch, path, AUTHORS)?;
        let title = batch_column(&batch, path, TITLE)?;
        let year = batch_column(&batch, path, YEAR)?;
        let cited_by = batch_column(&batch, path, CITED_BY)?;
        let keywords = batch_column(&batch, path, INDEX_KEYWORDS)?;

        for row in 0..batch.num_rows() {
            rows.push(RawRow {
                authors: arrow_text(authors, row),
                title: arrow_text(title, row),
                year: arrow_integer(year, row),
                cited_by: arrow_integer(cited_by, row),
                index_keywords: arrow_text(keywords, row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(
    batch: &'a RecordBatch,
    path: &Path,
    name: &'static str,
) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| missing_column(path, name))?;
    Ok(batch.column(idx))
}

/// Read a string cell; nulls and non-string columns read as empty.
fn arrow_text(col: &Arc<dyn Array>, row: usize) -> String {
    if col.is_null(row) {
        return String::new();
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string())
            .unwrap_or_default(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => String::new(),
    }
}

/// Read an integer cell from an integer, float, or string column.
fn arrow_integer(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64)
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row))
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        DataType::Utf8 | DataType::LargeUtf8 => parse_integer(&arrow_text(col, row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const CSV: &str = "\
Authors,Title,Year,Source title,Cited by,Index Keywords
\"Doe, J.\",Y,1992,Journal,5,load
\"Hart, G.W.\",X,1992,Journal,100,load; Monitoring
\"Kim, H.\",Z,2011.0,Conf,,nan
\"Lee, S.\",W,,Conf,3,load
";

    #[test]
    fn test_load_csv_normalises_and_sorts() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "papers.csv", CSV);
        let table = load_file(&path).unwrap();

        // The row without a year is dropped.
        assert_eq!(table.len(), 3);
        let cites: Vec<u64> = table.iter().map(|p| p.cited_by).collect();
        assert_eq!(cites, vec![100, 5, 0]);

        let hart = &table.publications[0];
        assert_eq!(hart.authors, vec!["Hart", "G.W."]);
        assert_eq!(hart.label(), "Hart, 1992");
        assert_eq!(hart.index_keywords, vec!["load", "Monitoring"]);

        let kim = &table.publications[2];
        assert_eq!(kim.year, 2011);
        assert_eq!(kim.index_keywords, vec!["nan"]);
    }

    #[test]
    fn test_load_csv_blank_first_author() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "anon.csv",
            "Authors,Title,Year,Cited by,Index Keywords\n\", Smith J.\",T,1992,7,load\n",
        );
        let table = load_file(&path).unwrap();
        let p = &table.publications[0];
        assert_eq!(p.authors, vec!["", "Smith J."]);
        assert_eq!(p.first_author(), "");
        assert_eq!(p.label(), ", 1992");
    }

    #[test]
    fn test_load_csv_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "Authors,Title,Year,Index Keywords\n\"A, B\",T,2000,k\n");
        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<DashboardError>() {
            Some(DashboardError::MissingColumn { column, .. }) => assert_eq!(*column, CITED_BY),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "papers.json",
            r#"[
                {"Authors": "Doe, J.", "Title": "Y", "Year": 1992, "Cited by": 5, "Index Keywords": "load"},
                {"Authors": "Hart, G.W.", "Title": "X", "Year": 1992.0, "Cited by": 100, "Index Keywords": null},
                {"Authors": "Kim, H.", "Title": "Z", "Year": "2011", "Cited by": null, "Index Keywords": "a;b"}
            ]"#,
        );
        let table = load_file(&path).unwrap();
        let titles: Vec<&str> = table.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y", "Z"]);
        assert!(table.publications[0].index_keywords.is_empty());
        assert_eq!(table.publications[2].year, 2011);
        assert_eq!(table.publications[2].cited_by, 0);
    }

    #[test]
    fn test_load_json_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", r#"[{"Authors": "A", "Title": "T", "Year": 2000}]"#);
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::MissingColumn { .. })
        ));
    }

    fn write_parquet(dir: &TempDir, name: &str, batch: &RecordBatch) -> PathBuf {
        let path = dir.path().join(name);
        let file = fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn test_load_parquet() {
        let schema = Schema::new(vec![
            Field::new(AUTHORS, DataType::Utf8, true),
            Field::new(TITLE, DataType::Utf8, true),
            Field::new(YEAR, DataType::Int64, true),
            Field::new(CITED_BY, DataType::Float64, true),
            Field::new(INDEX_KEYWORDS, DataType::Utf8, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Doe, J.", "Kim, H.", "Hart, G.W."])),
            Arc::new(StringArray::from(vec!["Y", "Z", "X"])),
            Arc::new(Int64Array::from(vec![1992, 2011, 1992])),
            Arc::new(Float64Array::from(vec![5.0, f64::NAN, 100.0])),
            Arc::new(StringArray::from(vec![Some("load"), None, Some("a; b")])),
        ];
        let batch = RecordBatch::try_new(Arc::new(schema), columns).unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_parquet(&dir, "papers.parquet", &batch);
        let table = load_file(&path).unwrap();

        let titles: Vec<&str> = table.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["X", "Y", "Z"]);
        let cites: Vec<u64> = table.iter().map(|p| p.cited_by).collect();
        assert_eq!(cites, vec![100, 5, 0]);

        let kim = &table.publications[2];
        assert_eq!(kim.label(), "Kim, 2011");
        assert!(kim.index_keywords.is_empty());
        assert_eq!(table.publications[0].index_keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_load_parquet_missing_column() {
        let schema = Schema::new(vec![
            Field::new(AUTHORS, DataType::Utf8, true),
            Field::new(TITLE, DataType::Utf8, true),
            Field::new(YEAR, DataType::Int64, true),
            Field::new(INDEX_KEYWORDS, DataType::Utf8, true),
        ]);
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Doe, J."])),
            Arc::new(StringArray::from(vec!["Y"])),
            Arc::new(Int64Array::from(vec![1992])),
            Arc::new(StringArray::from(vec!["load"])),
        ];
        let batch = RecordBatch::try_new(Arc::new(schema), columns).unwrap();

        let dir = TempDir::new().unwrap();
        let path = write_parquet(&dir, "bad.pq", &batch);
        let err = load_file(&path).unwrap_err();
        match err.downcast_ref::<DashboardError>() {
            Some(DashboardError::MissingColumn { column, path: p }) => {
                assert_eq!(*column, CITED_BY);
                assert_eq!(p, &path);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "papers.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn test_discover_datasets() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.csv", CSV);
        write(&dir, "a.json", "[]");
        write(&dir, "notes.txt", "ignored");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir, "nested/c.csv", CSV);

        let found = discover_datasets(dir.path()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.csv"]);
    }

    #[test]
    fn test_discover_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(discover_datasets(&dir.path().join("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer(" 42 "), Some(42));
        assert_eq!(parse_integer("1992.0"), Some(1992));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("n/a"), None);
    }

    #[test]
    fn test_split_helpers() {
        assert_eq!(split_authors("Hart, G"), vec!["Hart", "G"]);
        assert!(split_authors("  ").is_empty());
        assert_eq!(split_authors(", Smith J."), vec!["", "Smith J."]);
        assert_eq!(split_authors("Hart, , G,"), vec!["Hart", "G"]);
        assert_eq!(split_keywords("a; b ;c"), vec!["a", "b", "c"]);
        assert!(split_keywords("").is_empty());
    }
}
