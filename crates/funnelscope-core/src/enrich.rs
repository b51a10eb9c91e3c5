use chrono::{NaiveDateTime, Timelike};
use funnelscope_parser::{CountryResolver, EventRecord};
use polars::prelude::*;

use crate::error::Result;
use crate::types::MISSING_MONTH;

/// Renders a timestamp's calendar month as `YYYY-MM`. Missing timestamps
/// bucket to the sentinel so they survive grouping as an ordinary category
/// instead of dropping rows.
pub fn month_bucket(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(value) => value.format("%Y-%m").to_string(),
        None => MISSING_MONTH.to_string(),
    }
}

/// Builds the enriched table: the seven export columns plus country, click
/// flag, per-stage month buckets and read-time derivations. One output row
/// per input record, in input order.
pub fn enrich_events(events: &[EventRecord], resolver: &dyn CountryResolver) -> Result<DataFrame> {
    let len = events.len();

    let mut customer_ids = Vec::with_capacity(len);
    let mut campaigns = Vec::with_capacity(len);
    let mut dispatched = Vec::with_capacity(len);
    let mut sent = Vec::with_capacity(len);
    let mut delivered = Vec::with_capacity(len);
    let mut read = Vec::with_capacity(len);
    let mut link_clicks: Vec<Option<&str>> = Vec::with_capacity(len);
    let mut countries: Vec<&str> = Vec::with_capacity(len);
    let mut clicked = Vec::with_capacity(len);
    let mut dispatched_month = Vec::with_capacity(len);
    let mut sent_month = Vec::with_capacity(len);
    let mut delivered_month = Vec::with_capacity(len);
    let mut read_month = Vec::with_capacity(len);
    let mut clicked_month = Vec::with_capacity(len);
    let mut read_day: Vec<Option<String>> = Vec::with_capacity(len);
    let mut read_hour: Vec<Option<i64>> = Vec::with_capacity(len);

    for event in events {
        customer_ids.push(event.customer_external_id.as_str());
        campaigns.push(event.campaign_name.as_str());
        dispatched.push(event.dispatched_at.map(micros));
        sent.push(event.sent_at.map(micros));
        delivered.push(event.delivered_at.map(micros));
        read.push(event.read_at.map(micros));
        link_clicks.push(event.link_clicks.as_deref());
        countries.push(resolver.resolve(&event.customer_external_id));
        clicked.push(event.clicked());
        dispatched_month.push(month_bucket(event.dispatched_at));
        sent_month.push(month_bucket(event.sent_at));
        delivered_month.push(month_bucket(event.delivered_at));
        read_month.push(month_bucket(event.read_at));
        // No click timestamp exists in the export; the dispatch moment
        // anchors the click bucket.
        clicked_month.push(month_bucket(event.dispatched_at));
        read_day.push(event.read_at.map(|ts| ts.format("%A").to_string()));
        read_hour.push(event.read_at.map(|ts| i64::from(ts.hour())));
    }

    let datetime_type = DataType::Datetime(TimeUnit::Microseconds, None);
    let dispatched_series = Series::new("dispatched_at".into(), dispatched).cast(&datetime_type)?;
    let sent_series = Series::new("sent_at".into(), sent).cast(&datetime_type)?;
    let delivered_series = Series::new("delivered_at".into(), delivered).cast(&datetime_type)?;
    let read_series = Series::new("read_at".into(), read).cast(&datetime_type)?;

    let read_day_utf8: Vec<Option<&str>> = read_day.iter().map(|v| v.as_deref()).collect();

    let df = DataFrame::new(vec![
        Series::new("customer_external_id".into(), customer_ids).into(),
        Series::new("campaign_name".into(), campaigns).into(),
        dispatched_series.into(),
        sent_series.into(),
        delivered_series.into(),
        read_series.into(),
        Series::new("link_clicks".into(), link_clicks).into(),
        Series::new("Country".into(), countries).into(),
        Series::new("Clicked".into(), clicked).into(),
        Series::new("dispatched_month".into(), dispatched_month).into(),
        Series::new("sent_month".into(), sent_month).into(),
        Series::new("delivered_month".into(), delivered_month).into(),
        Series::new("read_month".into(), read_month).into(),
        Series::new("clicked_month".into(), clicked_month).into(),
        Series::new("read_day_of_week".into(), read_day_utf8).into(),
        Series::new("read_hour".into(), read_hour).into(),
    ])?;

    Ok(df)
}

fn micros(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_micros()
}
