// crates/funnelscope-core/src/read_times.rs

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::Result;

/// Weekday labels in reporting order, Monday first.
pub const WEEKDAY_ORDER: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Hour-of-day label used in the hourly report, e.g. `07:00`.
pub fn hour_label(hour: i64) -> String {
    format!("{hour:02}:00")
}

/// Count read events per weekday, zero-filled across the whole week.
pub fn reads_by_weekday(filtered: &DataFrame) -> Result<DataFrame> {
    let days = filtered.column("read_day_of_week")?.str()?;

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for idx in 0..days.len() {
        if let Some(day) = days.get(idx) {
            *counts.entry(day).or_insert(0) += 1;
        }
    }

    let reads: Vec<i64> = WEEKDAY_ORDER
        .into_iter()
        .map(|day| counts.get(day).copied().unwrap_or(0))
        .collect();

    Ok(DataFrame::new(vec![
        Series::new("read_day_of_week".into(), WEEKDAY_ORDER.to_vec()).into(),
        Series::new("Reads".into(), reads).into(),
    ])?)
}

/// Count read events per hour of day, zero-filled across all 24 hours.
pub fn reads_by_hour(filtered: &DataFrame) -> Result<DataFrame> {
    let hours = filtered.column("read_hour")?.i64()?;

    let mut counts = [0i64; 24];
    for idx in 0..hours.len() {
        if let Some(hour) = hours.get(idx) {
            if (0..24).contains(&hour) {
                counts[hour as usize] += 1;
            }
        }
    }

    let labels: Vec<String> = (0..24).map(hour_label).collect();
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

    Ok(DataFrame::new(vec![
        Series::new("read_hour".into(), label_refs).into(),
        Series::new("Reads".into(), counts.to_vec()).into(),
    ])?)
}
