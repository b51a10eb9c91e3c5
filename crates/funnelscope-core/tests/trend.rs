use polars::prelude::*;

use funnelscope_core::error::Result;
use funnelscope_core::trend::add_month_over_month;

/// Builds a monthly aggregate table row-by-row:
/// `(country, campaign, month, dispatched, sent, delivered, read, clicked)`.
fn monthly_table(rows: &[(&str, &str, &str, i64, i64, i64, i64, i64)]) -> Result<DataFrame> {
    let countries: Vec<&str> = rows.iter().map(|row| row.0).collect();
    let campaigns: Vec<&str> = rows.iter().map(|row| row.1).collect();
    let months: Vec<&str> = rows.iter().map(|row| row.2).collect();
    let dispatched: Vec<i64> = rows.iter().map(|row| row.3).collect();
    let sent: Vec<i64> = rows.iter().map(|row| row.4).collect();
    let delivered: Vec<i64> = rows.iter().map(|row| row.5).collect();
    let read: Vec<i64> = rows.iter().map(|row| row.6).collect();
    let clicked: Vec<i64> = rows.iter().map(|row| row.7).collect();

    Ok(DataFrame::new(vec![
        Series::new("Country".into(), countries).into(),
        Series::new("campaign_name".into(), campaigns).into(),
        Series::new("dispatched_month".into(), months).into(),
        Series::new("Dispatched".into(), dispatched).into(),
        Series::new("Sent".into(), sent).into(),
        Series::new("Delivered".into(), delivered).into(),
        Series::new("Read".into(), read).into(),
        Series::new("Clicked".into(), clicked).into(),
    ])?)
}

fn trend_values(df: &DataFrame, column: &str) -> Vec<f64> {
    let values = df.column(column).unwrap().f64().unwrap();
    (0..values.len()).map(|idx| values.get(idx).unwrap()).collect()
}

#[test]
fn dispatched_series_reports_expected_percent_changes() -> Result<()> {
    let table = monthly_table(&[
        ("UAE", "Promo", "2024-01", 10, 1, 1, 1, 1),
        ("UAE", "Promo", "2024-02", 15, 1, 1, 1, 1),
        ("UAE", "Promo", "2024-03", 0, 1, 1, 1, 1),
        ("UAE", "Promo", "2024-04", 5, 1, 1, 1, 1),
    ])?;

    let with_trend = add_month_over_month(&table)?;

    // 10 -> 15 -> 0 -> 5: the zero baseline in March clamps April to 0.
    assert_eq!(
        trend_values(&with_trend, "Dispatched_MoM"),
        vec![0.0, 50.0, -100.0, 0.0]
    );
    assert_eq!(trend_values(&with_trend, "Sent_MoM"), vec![0.0, 0.0, 0.0, 0.0]);

    Ok(())
}

#[test]
fn first_month_of_each_series_reports_zero() -> Result<()> {
    let table = monthly_table(&[
        ("Egypt", "Promo", "2024-01", 8, 8, 8, 8, 2),
        ("UAE", "Promo", "2024-01", 10, 10, 10, 10, 4),
        ("UAE", "Promo", "2024-02", 20, 20, 20, 20, 8),
        ("UAE", "Spring Sale", "2024-02", 6, 6, 6, 6, 1),
    ])?;

    let with_trend = add_month_over_month(&table)?;

    // Rows 0, 1, and 3 each open their own (country, campaign) series.
    assert_eq!(
        trend_values(&with_trend, "Dispatched_MoM"),
        vec![0.0, 0.0, 100.0, 0.0]
    );
    assert_eq!(
        trend_values(&with_trend, "Clicked_MoM"),
        vec![0.0, 0.0, 100.0, 0.0]
    );

    Ok(())
}

#[test]
fn rows_are_reordered_by_key_before_differencing() -> Result<()> {
    // Same data as a sorted two-month series, deliberately scrambled.
    let table = monthly_table(&[
        ("UAE", "Promo", "2024-02", 15, 3, 3, 3, 3),
        ("Egypt", "Promo", "2024-01", 4, 4, 4, 4, 4),
        ("UAE", "Promo", "2024-01", 10, 2, 2, 2, 2),
    ])?;

    let with_trend = add_month_over_month(&table)?;

    let countries = with_trend.column("Country")?.str()?;
    let months = with_trend.column("dispatched_month")?.str()?;
    assert_eq!(countries.get(0), Some("Egypt"));
    assert_eq!(countries.get(1), Some("UAE"));
    assert_eq!(months.get(1), Some("2024-01"));
    assert_eq!(months.get(2), Some("2024-02"));

    assert_eq!(
        trend_values(&with_trend, "Dispatched_MoM"),
        vec![0.0, 0.0, 50.0]
    );

    Ok(())
}
