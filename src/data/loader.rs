use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, Weekday};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{parse_weekday_name, LoanCondition, LoanDataset, LoanRecord};
use crate::error::DashboardError;

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "id",
    "issue_date",
    "loan_amount",
    "interest_rate",
    "loan_condition",
    "grade",
    "term",
    "purpose",
];

/// Derived from `issue_date` when absent, verified when present.
pub const WEEKDAY_COLUMN: &str = "issue_weekday";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the loan table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – columns as written by `df.to_parquet()` (recommended)
/// * `.json`    – `[{ "id": ..., "issue_date": ..., ... }, ...]`
/// * `.csv`     – header row plus one loan per line
pub fn load_file(path: &Path) -> Result<LoanDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(DashboardError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading loan data from {}", path.display()))?;

    log::info!("Loaded {} loans from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell – a single untyped value before schema coercion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

type Row = BTreeMap<String, Cell>;

fn ensure_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), DashboardError> {
    let present: Vec<&str> = present.into_iter().collect();
    for col in REQUIRED_COLUMNS {
        if !present.contains(&col) {
            return Err(DashboardError::schema(col, "column is missing"));
        }
    }
    Ok(())
}

fn cell<'a>(row: &'a Row, col: &str, row_no: usize) -> Result<&'a Cell, DashboardError> {
    match row.get(col) {
        None | Some(Cell::Null) => Err(DashboardError::schema(col, format!("row {row_no}: missing value"))),
        Some(c) => Ok(c),
    }
}

fn text_of(row: &Row, col: &str, row_no: usize) -> Result<String, DashboardError> {
    match cell(row, col, row_no)? {
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Err(DashboardError::schema(col, format!("row {row_no}: empty value")))
            } else {
                Ok(s.to_string())
            }
        }
        Cell::Integer(i) => Ok(i.to_string()),
        // Ids exported from float columns keep their integer form.
        Cell::Float(f) if f.fract() == 0.0 => Ok(format!("{f:.0}")),
        Cell::Float(f) => Ok(f.to_string()),
        Cell::Null => Err(DashboardError::schema(col, format!("row {row_no}: missing value"))),
    }
}

fn number_of(row: &Row, col: &str, row_no: usize) -> Result<f64, DashboardError> {
    match cell(row, col, row_no)? {
        Cell::Float(f) => Ok(*f),
        Cell::Integer(i) => Ok(*i as f64),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| DashboardError::schema(col, format!("row {row_no}: '{s}' is not a number"))),
        Cell::Null => Err(DashboardError::schema(col, format!("row {row_no}: expected a number"))),
    }
}

fn date_of(row: &Row, col: &str, row_no: usize) -> Result<NaiveDate, DashboardError> {
    match cell(row, col, row_no)? {
        Cell::Text(s) => parse_date(s)
            .ok_or_else(|| DashboardError::schema(col, format!("row {row_no}: '{s}' is not a date"))),
        // `df.to_json()` writes datetimes as epoch milliseconds.
        Cell::Integer(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DashboardError::schema(col, format!("row {row_no}: timestamp {ms} out of range"))),
        Cell::Float(_) | Cell::Null => Err(DashboardError::schema(col, format!("row {row_no}: expected a date"))),
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Coerce one untyped row into a [`LoanRecord`].
fn record_from_row(row: &Row, row_no: usize) -> Result<LoanRecord, DashboardError> {
    let loan_condition = condition_of(&text_of(row, "loan_condition", row_no)?, row_no)?;

    let mut record = LoanRecord::new(
        text_of(row, "id", row_no)?,
        date_of(row, "issue_date", row_no)?,
        number_of(row, "loan_amount", row_no)?,
        number_of(row, "interest_rate", row_no)?,
        loan_condition,
        text_of(row, "grade", row_no)?,
        text_of(row, "term", row_no)?,
        text_of(row, "purpose", row_no)?,
    );

    if row.contains_key(WEEKDAY_COLUMN) {
        record.issue_weekday = weekday_of(&text_of(row, WEEKDAY_COLUMN, row_no)?, row_no)?;
    }

    Ok(record)
}

fn condition_of(label: &str, row_no: usize) -> Result<LoanCondition, DashboardError> {
    LoanCondition::from_label(label).ok_or_else(|| {
        DashboardError::schema("loan_condition", format!("row {row_no}: unknown condition '{label}'"))
    })
}

fn weekday_of(name: &str, row_no: usize) -> Result<Weekday, DashboardError> {
    parse_weekday_name(name).ok_or_else(|| {
        DashboardError::schema(WEEKDAY_COLUMN, format!("row {row_no}: '{name}' is not a weekday"))
    })
}

fn dataset_from_rows(rows: &[Row]) -> Result<LoanDataset, DashboardError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| record_from_row(row, i))
        .collect::<Result<Vec<_>, _>>()?;
    LoanDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "id": 1077501,
///     "issue_date": "2011-12-01",
///     "loan_amount": 5000,
///     "interest_rate": 10.65,
///     "loan_condition": "Good Loan",
///     "grade": "B",
///     "term": " 36 months",
///     "purpose": "credit_card"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LoanDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        ensure_columns(obj.keys().map(String::as_str))?;

        let row: Row = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        rows.push(row);
    }

    Ok(dataset_from_rows(&rows)?)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one loan per record.
/// Every cell is read as text and coerced per column.
fn load_csv(path: &Path) -> Result<LoanDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    ensure_columns(headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| {
                let value = if v.is_empty() {
                    Cell::Null
                } else {
                    Cell::Text(v.to_string())
                };
                (h.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(dataset_from_rows(&rows)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load the loan table from Parquet.
///
/// Columns are cast by role rather than matched on exact type, so files
/// from **Pandas** (categoricals become dictionaries, datetimes become
/// timestamps) and **Polars** both load:
/// - text columns: anything castable to `Utf8`
/// - `loan_amount`, `interest_rate`: anything castable to `Float64`
/// - `issue_date`: `Date32`, `Date64`, `Timestamp` or ISO strings
fn load_parquet(path: &Path) -> Result<LoanDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    // Checked on the file schema so that files without rows are validated too.
    ensure_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records: Vec<LoanRecord> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let first_row = records.len();
        records.extend(records_from_batch(&batch, first_row)?);
    }

    Ok(LoanDataset::from_records(records)?)
}

/// Build records straight from the typed columns of one batch.
/// `first_row` is the file-wide number of the batch's first row.
fn records_from_batch(batch: &RecordBatch, first_row: usize) -> Result<Vec<LoanRecord>, DashboardError> {
    let id = TextColumn::read(batch, "id")?;
    let issue_date = DateColumn::read(batch, "issue_date")?;
    let loan_amount = FloatColumn::read(batch, "loan_amount")?;
    let interest_rate = FloatColumn::read(batch, "interest_rate")?;
    let loan_condition = TextColumn::read(batch, "loan_condition")?;
    let grade = TextColumn::read(batch, "grade")?;
    let term = TextColumn::read(batch, "term")?;
    let purpose = TextColumn::read(batch, "purpose")?;
    let weekday = match batch.column_by_name(WEEKDAY_COLUMN) {
        Some(_) => Some(TextColumn::read(batch, WEEKDAY_COLUMN)?),
        None => None,
    };

    (0..batch.num_rows())
        .map(|i| {
            let row_no = first_row + i;
            let mut record = LoanRecord::new(
                id.value(i, row_no)?,
                issue_date.value(i, row_no)?,
                loan_amount.value(i, row_no)?,
                interest_rate.value(i, row_no)?,
                condition_of(&loan_condition.value(i, row_no)?, row_no)?,
                grade.value(i, row_no)?,
                term.value(i, row_no)?,
                purpose.value(i, row_no)?,
            );
            if let Some(weekday) = &weekday {
                record.issue_weekday = weekday_of(&weekday.value(i, row_no)?, row_no)?;
            }
            Ok(record)
        })
        .collect()
}

// -- Parquet / Arrow helpers --

const SECONDS_PER_DAY: i64 = 86_400;

fn cast_column(batch: &RecordBatch, name: &'static str, to: &DataType) -> Result<ArrayRef, DashboardError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DashboardError::schema(name, "column is missing"))?;
    cast(col, to).map_err(|e| {
        DashboardError::schema(name, format!("cannot read {:?} as {to:?}: {e}", col.data_type()))
    })
}

fn missing(name: &str, row_no: usize) -> DashboardError {
    DashboardError::schema(name, format!("row {row_no}: missing value"))
}

/// A column cast to `Utf8`.
struct TextColumn {
    name: &'static str,
    array: ArrayRef,
}

impl TextColumn {
    fn read(batch: &RecordBatch, name: &'static str) -> Result<Self, DashboardError> {
        Ok(TextColumn {
            name,
            array: cast_column(batch, name, &DataType::Utf8)?,
        })
    }

    fn value(&self, i: usize, row_no: usize) -> Result<String, DashboardError> {
        let strings = self.array.as_string::<i32>();
        if strings.is_null(i) {
            return Err(missing(self.name, row_no));
        }
        let s = strings.value(i).trim();
        if s.is_empty() {
            return Err(DashboardError::schema(self.name, format!("row {row_no}: empty value")));
        }
        Ok(s.to_string())
    }
}

/// A column cast to `Float64`.
struct FloatColumn {
    name: &'static str,
    array: ArrayRef,
}

impl FloatColumn {
    fn read(batch: &RecordBatch, name: &'static str) -> Result<Self, DashboardError> {
        Ok(FloatColumn {
            name,
            array: cast_column(batch, name, &DataType::Float64)?,
        })
    }

    fn value(&self, i: usize, row_no: usize) -> Result<f64, DashboardError> {
        let floats = self.array.as_primitive::<Float64Type>();
        if floats.is_null(i) {
            return Err(missing(self.name, row_no));
        }
        Ok(floats.value(i))
    }
}

/// A column cast to `Date32` (days since the epoch).
struct DateColumn {
    name: &'static str,
    array: ArrayRef,
}

impl DateColumn {
    fn read(batch: &RecordBatch, name: &'static str) -> Result<Self, DashboardError> {
        Ok(DateColumn {
            name,
            array: cast_column(batch, name, &DataType::Date32)?,
        })
    }

    fn value(&self, i: usize, row_no: usize) -> Result<NaiveDate, DashboardError> {
        let days = self.array.as_primitive::<Date32Type>();
        if days.is_null(i) {
            return Err(missing(self.name, row_no));
        }
        DateTime::from_timestamp(i64::from(days.value(i)) * SECONDS_PER_DAY, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| DashboardError::schema(self.name, format!("row {row_no}: date out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use chrono::Weekday;
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn schema_error(err: &anyhow::Error) -> Option<&DashboardError> {
        err.chain().find_map(|e| e.downcast_ref::<DashboardError>())
    }

    fn write_parquet(schema: Arc<Schema>, batches: &[RecordBatch]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        for batch in batches {
            writer.write(batch).unwrap();
        }
        writer.close().unwrap();
        file
    }

    fn loan_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("issue_date", DataType::Date32, true),
            Field::new("loan_amount", DataType::Float64, false),
            Field::new("interest_rate", DataType::Float64, false),
            Field::new("loan_condition", DataType::Utf8, false),
            Field::new("grade", DataType::Utf8, false),
            Field::new("term", DataType::Utf8, false),
            Field::new("purpose", DataType::Utf8, false),
        ]))
    }

    const CSV_HEADER: &str = "id,issue_date,issue_weekday,loan_amount,interest_rate,loan_condition,grade,term,purpose";

    #[test]
    fn loads_csv() {
        let content = format!(
            "{CSV_HEADER}\n\
             1,2020-01-01,Wednesday,100,10.5,Good Loan,B,36 months,car\n\
             2,2020-01-01 00:00:00,Wednesday,200,12.0,Bad Loan,A,60 months,credit_card\n\
             3,2020-01-02,Thursday,50,9.5,Good Loan,A,36 months,car\n"
        );
        let file = write_temp(".csv", &content);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        let first = &ds.records()[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.issue_weekday, Weekday::Wed);
        assert_eq!(first.loan_condition, LoanCondition::Good);
        assert_eq!(ds.records()[1].issue_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(ds.grades, vec!["A", "B"]);
    }

    #[test]
    fn csv_missing_column_names_it() {
        let file = write_temp(".csv", "id,issue_date,loan_amount\n1,2020-01-01,100\n");
        let err = load_file(file.path()).unwrap_err();
        match schema_error(&err) {
            Some(DashboardError::SchemaMismatch { column, .. }) => assert_eq!(column, "interest_rate"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn csv_bad_number_is_schema_mismatch() {
        let content = format!("{CSV_HEADER}\n1,2020-01-01,Wednesday,lots,10.5,Good Loan,B,36 months,car\n");
        let file = write_temp(".csv", &content);
        let err = load_file(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("loan_amount"), "{msg}");
        assert!(msg.contains("lots"), "{msg}");
    }

    #[test]
    fn csv_wrong_weekday_is_rejected() {
        let content = format!("{CSV_HEADER}\n1,2020-01-01,Monday,100,10.5,Good Loan,B,36 months,car\n");
        let file = write_temp(".csv", &content);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            Some(DashboardError::SchemaMismatch { column, .. }) if column == "issue_weekday"
        ));
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let content = format!("{CSV_HEADER}\n1,2020-01-01,Wednesday,100,10.5,Okay Loan,B,36 months,car\n");
        let file = write_temp(".csv", &content);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Okay Loan"));
    }

    #[test]
    fn loads_json_with_epoch_millis_and_no_weekday() {
        // 1577836800000 ms = 2020-01-01T00:00:00Z
        let content = r#"[
            {"id": 7, "issue_date": 1577836800000, "loan_amount": 1000.0, "interest_rate": 7.5,
             "loan_condition": "Bad Loan", "grade": "C", "term": "60 months", "purpose": "house"}
        ]"#;
        let file = write_temp(".json", content);
        let ds = load_file(file.path()).unwrap();
        let rec = &ds.records()[0];
        assert_eq!(rec.id, "7");
        assert_eq!(rec.issue_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(rec.issue_weekday, Weekday::Wed);
        assert_eq!(rec.loan_condition, LoanCondition::Bad);
    }

    #[test]
    fn json_null_value_is_reported() {
        let content = r#"[
            {"id": 7, "issue_date": "2020-01-01", "loan_amount": null, "interest_rate": 7.5,
             "loan_condition": "Bad Loan", "grade": "C", "term": "60 months", "purpose": "house"}
        ]"#;
        let file = write_temp(".json", content);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            schema_error(&err),
            Some(DashboardError::SchemaMismatch { column, .. }) if column == "loan_amount"
        ));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            schema_error(&err),
            Some(&DashboardError::UnsupportedFormat("xlsx".to_string()))
        );
    }

    #[test]
    fn unreadable_path_names_the_file() {
        let err = load_file(Path::new("/definitely/not/here/loan.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here/loan.csv"));
    }

    #[test]
    fn loads_parquet_with_int_ids_and_date32() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("issue_date", DataType::Date32, false),
            Field::new("loan_amount", DataType::Int64, false),
            Field::new("interest_rate", DataType::Float64, false),
            Field::new("loan_condition", DataType::Utf8, false),
            Field::new("grade", DataType::Utf8, false),
            Field::new("term", DataType::Utf8, false),
            Field::new("purpose", DataType::Utf8, false),
            Field::new("unused", DataType::Utf8, true),
        ]));
        // 18262 days after the epoch = 2020-01-01
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![10, 11])),
                Arc::new(Date32Array::from(vec![18262, 18263])),
                Arc::new(Int64Array::from(vec![100, 250])),
                Arc::new(Float64Array::from(vec![10.0, 11.0])),
                Arc::new(StringArray::from(vec!["Good Loan", "Bad Loan"])),
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec!["36 months", "60 months"])),
                Arc::new(StringArray::from(vec!["car", "car"])),
                Arc::new(StringArray::from(vec![None::<&str>, Some("x")])),
            ],
        )
        .unwrap();

        let file = write_parquet(schema, &[batch]);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].id, "10");
        assert_eq!(ds.records()[0].issue_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(ds.records()[1].issue_weekday, Weekday::Thu);
        assert_eq!(ds.records()[1].loan_amount, 250.0);
    }

    #[test]
    fn empty_parquet_still_checks_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new("foo", DataType::Utf8, true)]));
        let file = write_parquet(schema, &[]);

        let err = load_file(file.path()).unwrap_err();
        assert!(
            matches!(schema_error(&err), Some(DashboardError::SchemaMismatch { column, .. }) if column == "id"),
            "{err:#}"
        );
    }

    #[test]
    fn empty_parquet_with_full_schema_loads_empty() {
        let file = write_parquet(loan_schema(), &[]);
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn parquet_errors_use_file_wide_row_numbers() {
        // More rows than one default reader batch (1024); the last date is null.
        let n = 1501;
        let mut days: Vec<Option<i32>> = vec![Some(18262); n];
        days[n - 1] = None;
        let batch = RecordBatch::try_new(
            loan_schema(),
            vec![
                Arc::new(Int64Array::from_iter_values(0..n as i64)),
                Arc::new(Date32Array::from(days)),
                Arc::new(Float64Array::from(vec![100.0; n])),
                Arc::new(Float64Array::from(vec![10.0; n])),
                Arc::new(StringArray::from(vec!["Good Loan"; n])),
                Arc::new(StringArray::from(vec!["A"; n])),
                Arc::new(StringArray::from(vec!["36 months"; n])),
                Arc::new(StringArray::from(vec!["car"; n])),
            ],
        )
        .unwrap();
        let file = write_parquet(loan_schema(), &[batch]);

        let err = load_file(file.path()).unwrap_err();
        match schema_error(&err) {
            Some(DashboardError::SchemaMismatch { column, reason }) => {
                assert_eq!(column, "issue_date");
                assert_eq!(reason, "row 1500: missing value");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_date_accepts_datetime_prefix() {
        assert_eq!(parse_date("2019-03-04T00:00:00"), NaiveDate::from_ymd_opt(2019, 3, 4));
        assert_eq!(parse_date("2019-03-04"), NaiveDate::from_ymd_opt(2019, 3, 4));
        assert_eq!(parse_date("04/03/2019"), None);
    }
}
