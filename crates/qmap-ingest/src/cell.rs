//! Conversion of workbook cells to text.

use calamine::Data;
use chrono::NaiveTime;

/// Largest magnitude printed as an integer when a float has no fraction.
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// Text form of a workbook cell.
///
/// Integral floats drop their fraction (`3.0` becomes `3`), booleans become
/// `TRUE`/`FALSE`, and dates become ISO 8601 (`2024-03-01` or
/// `2024-03-01T09:30:00`).
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Float(value) => format_float(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => (if *value { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(err) => format!("#{err:?}"),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
            None => format_float(value.as_f64()),
        },
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < MAX_INTEGRAL_FLOAT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
