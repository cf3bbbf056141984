use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const OUTPUT_PATH: &str = "data_input/loan_clean.parquet";
const ROWS: usize = 5_000;
const SEED: u64 = 42;

const GRADES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];
const TERMS: [&str; 2] = ["36 months", "60 months"];
const PURPOSES: [&str; 8] = [
    "debt_consolidation",
    "credit_card",
    "home_improvement",
    "other",
    "major_purchase",
    "small_business",
    "car",
    "medical",
];

/// One synthetic loan, before it is split into columns.
struct SampleLoan {
    id: String,
    issue_date: NaiveDate,
    loan_amount: f64,
    interest_rate: f64,
    loan_condition: &'static str,
    grade: &'static str,
    term: &'static str,
    purpose: &'static str,
}

fn sample_loan(rng: &mut StdRng, row: usize, first_day: NaiveDate) -> Result<SampleLoan> {
    let grade_idx = rng.gen_range(0..GRADES.len());
    // Worse grades pay more and default more often.
    let interest_rate = 6.0 + grade_idx as f64 * 3.2 + rng.gen_range(-1.0..1.0);
    let bad_probability = 0.04 + grade_idx as f64 * 0.045;

    let term = if rng.gen_bool(0.7) { TERMS[0] } else { TERMS[1] };
    let base = if term == TERMS[0] { 11_000.0 } else { 18_000.0 };
    let loan_amount = (base * rng.gen_range(0.1..2.2_f64) / 25.0).round() * 25.0;

    let offset = rng.gen_range(0..365 * 4);
    let issue_date = first_day
        .checked_add_signed(Duration::days(offset))
        .context("issue date out of range")?;

    Ok(SampleLoan {
        id: format!("{}", 1_000_000 + row),
        issue_date,
        loan_amount: loan_amount.max(500.0),
        interest_rate: (interest_rate * 100.0).round() / 100.0,
        loan_condition: if rng.gen_bool(bad_probability) { "Bad Loan" } else { "Good Loan" },
        grade: GRADES[grade_idx],
        term,
        purpose: PURPOSES.choose(rng).copied().unwrap_or("other"),
    })
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn to_batch(loans: &[SampleLoan]) -> Result<RecordBatch> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid epoch")?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("issue_date", DataType::Date32, false),
        Field::new("issue_weekday", DataType::Utf8, false),
        Field::new("loan_amount", DataType::Float64, false),
        Field::new("interest_rate", DataType::Float64, false),
        Field::new("loan_condition", DataType::Utf8, false),
        Field::new("grade", DataType::Utf8, false),
        Field::new("term", DataType::Utf8, false),
        Field::new("purpose", DataType::Utf8, false),
    ]));

    let days: Vec<i32> = loans
        .iter()
        .map(|l| (l.issue_date - epoch).num_days() as i32)
        .collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.id.as_str()))),
            Arc::new(Date32Array::from(days)),
            Arc::new(StringArray::from_iter_values(
                loans.iter().map(|l| weekday_name(l.issue_date.weekday())),
            )),
            Arc::new(Float64Array::from_iter_values(loans.iter().map(|l| l.loan_amount))),
            Arc::new(Float64Array::from_iter_values(loans.iter().map(|l| l.interest_rate))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.loan_condition))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.grade))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.term))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.purpose))),
        ],
    )?;
    Ok(batch)
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let first_day = NaiveDate::from_ymd_opt(2012, 1, 1).context("invalid start date")?;

    let loans = (0..ROWS)
        .map(|row| sample_loan(&mut rng, row, first_day))
        .collect::<Result<Vec<_>>>()?;
    let batch = to_batch(&loans)?;

    let output = Path::new(OUTPUT_PATH);
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = std::fs::File::create(output).with_context(|| format!("creating {OUTPUT_PATH}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    let bad = loans.iter().filter(|l| l.loan_condition == "Bad Loan").count();
    println!("Wrote {} loans ({bad} bad) to {OUTPUT_PATH}", loans.len());
    Ok(())
}
