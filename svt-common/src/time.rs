//! Date stamps for run artifacts

use chrono::{Local, NaiveDate};

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prefix a file name with an ISO date, e.g. `2024-05-01_run.log`
pub fn dated_file_name(date: NaiveDate, suffix: &str) -> String {
    format!("{}_{}", date.format("%Y-%m-%d"), suffix)
}
