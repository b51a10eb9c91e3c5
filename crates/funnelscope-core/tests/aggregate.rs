use chrono::NaiveDateTime;
use polars::prelude::*;

use funnelscope_core::aggregate::aggregate_funnel;
use funnelscope_core::enrich::enrich_events;
use funnelscope_core::error::Result;
use funnelscope_core::types::GroupKey;
use funnelscope_parser::{resolver_for, EventRecord, ResolverKind};

fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn event(
    identifier: &str,
    campaign: &str,
    stages: [Option<&str>; 4],
    clicked: bool,
) -> EventRecord {
    let [dispatched, sent, delivered, read] = stages;
    EventRecord {
        customer_external_id: identifier.to_string(),
        campaign_name: campaign.to_string(),
        dispatched_at: dispatched.map(ts),
        sent_at: sent.map(ts),
        delivered_at: delivered.map(ts),
        read_at: read.map(ts),
        link_clicks: clicked.then(|| "https://example.com/c".to_string()),
    }
}

fn enriched_fixture() -> Result<DataFrame> {
    let events = vec![
        // UAE, January: full funnel with a click.
        event(
            "971501234567",
            "Promo",
            [
                Some("2024-01-05 09:00:00"),
                Some("2024-01-05 09:01:00"),
                Some("2024-01-05 09:02:00"),
                Some("2024-01-05 10:00:00"),
            ],
            true,
        ),
        // UAE, January: delivered but never read.
        event(
            "971509876543",
            "Promo",
            [
                Some("2024-01-20 12:00:00"),
                Some("2024-01-20 12:01:00"),
                Some("2024-01-20 12:02:00"),
                None,
            ],
            false,
        ),
        // UAE, February: sent only.
        event(
            "971501112233",
            "Promo",
            [Some("2024-02-02 08:00:00"), Some("2024-02-02 08:01:00"), None, None],
            false,
        ),
        // Egypt, February: dispatch only.
        event(
            "20100000000",
            "Promo",
            [Some("2024-02-10 08:00:00"), None, None, None],
            false,
        ),
        // Egypt, never dispatched: lands in the NaT bucket.
        event("20111111111", "Promo", [None, None, None, None], false),
    ];
    enrich_events(&events, resolver_for(ResolverKind::Prefix))
}

fn column_total(df: &DataFrame, name: &str) -> i64 {
    df.column(name).unwrap().i64().unwrap().sum().unwrap_or(0)
}

#[test]
fn monthly_aggregation_conserves_stage_totals() -> Result<()> {
    let enriched = enriched_fixture()?;
    let aggregate = aggregate_funnel(&enriched, GroupKey::CountryCampaignMonth)?;

    // One group per (country, campaign, month) including the NaT bucket.
    assert_eq!(aggregate.height(), 4);

    assert_eq!(column_total(&aggregate, "Dispatched"), 4);
    assert_eq!(column_total(&aggregate, "Sent"), 3);
    assert_eq!(column_total(&aggregate, "Delivered"), 2);
    assert_eq!(column_total(&aggregate, "Read"), 1);
    assert_eq!(column_total(&aggregate, "Clicked"), 1);

    Ok(())
}

#[test]
fn group_rows_sort_by_country_campaign_and_month() -> Result<()> {
    let enriched = enriched_fixture()?;
    let aggregate = aggregate_funnel(&enriched, GroupKey::CountryCampaignMonth)?;

    let countries = aggregate.column("Country")?.str()?;
    let months = aggregate.column("dispatched_month")?.str()?;

    assert_eq!(countries.get(0), Some("Egypt"));
    assert_eq!(months.get(0), Some("2024-02"));
    assert_eq!(countries.get(1), Some("Egypt"));
    assert_eq!(months.get(1), Some("NaT"));
    assert_eq!(countries.get(2), Some("UAE"));
    assert_eq!(months.get(2), Some("2024-01"));
    assert_eq!(countries.get(3), Some("UAE"));
    assert_eq!(months.get(3), Some("2024-02"));

    Ok(())
}

#[test]
fn country_grouping_collapses_campaigns_and_months() -> Result<()> {
    let enriched = enriched_fixture()?;
    let aggregate = aggregate_funnel(&enriched, GroupKey::Country)?;

    assert_eq!(aggregate.height(), 2);
    assert_eq!(
        aggregate.get_column_names_str(),
        ["Country", "Dispatched", "Sent", "Delivered", "Read", "Clicked"]
    );

    let countries = aggregate.column("Country")?.str()?;
    let dispatched = aggregate.column("Dispatched")?.i64()?;
    let read = aggregate.column("Read")?.i64()?;

    assert_eq!(countries.get(0), Some("Egypt"));
    assert_eq!(dispatched.get(0), Some(1));
    assert_eq!(read.get(0), Some(0));

    assert_eq!(countries.get(1), Some("UAE"));
    assert_eq!(dispatched.get(1), Some(3));
    assert_eq!(read.get(1), Some(1));

    Ok(())
}
