// crates/funnelscope-core/src/trend.rs

use polars::prelude::*;

use crate::error::Result;
use crate::types::TREND_STAGES;

/// Appends month-over-month percent-change columns to a monthly funnel table.
///
/// The input must carry the `Country` / `campaign_name` / `dispatched_month`
/// key columns plus the stage counts. Rows are ordered by those keys and each
/// `(Country, campaign_name)` pair is treated as its own series: the first
/// month of a series has no predecessor and reports `0.0`, and a division by a
/// zero baseline is also reported as `0.0` rather than an infinity or NaN.
pub fn add_month_over_month(aggregate: &DataFrame) -> Result<DataFrame> {
    let mut output = aggregate.sort(
        ["Country", "campaign_name", "dispatched_month"],
        SortMultipleOptions::default(),
    )?;

    let countries = output.column("Country")?.str()?.clone();
    let campaigns = output.column("campaign_name")?.str()?.clone();
    let height = output.height();

    let mut trend_columns: Vec<Column> = Vec::with_capacity(TREND_STAGES.len());
    for stage in TREND_STAGES {
        let counts = output.column(stage.column_name())?.i64()?;

        let mut changes: Vec<f64> = Vec::with_capacity(height);
        for idx in 0..height {
            let series_start = idx == 0
                || countries.get(idx) != countries.get(idx - 1)
                || campaigns.get(idx) != campaigns.get(idx - 1);
            if series_start {
                changes.push(0.0);
                continue;
            }

            let current = counts.get(idx).unwrap_or(0) as f64;
            let previous = counts.get(idx - 1).unwrap_or(0) as f64;
            let pct = (current - previous) / previous * 100.0;
            changes.push(if pct.is_finite() { pct } else { 0.0 });
        }

        trend_columns.push(Series::new(stage.trend_column_name().into(), changes).into());
    }

    output.hstack_mut(trend_columns.as_mut_slice())?;
    Ok(output)
}
