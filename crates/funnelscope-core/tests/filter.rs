use chrono::NaiveDateTime;
use polars::prelude::DataFrame;

use funnelscope_core::enrich::enrich_events;
use funnelscope_core::error::Result;
use funnelscope_core::filter::{apply_selection, CountryDefaults, FilterSelection};
use funnelscope_parser::{resolver_for, EventRecord, ResolverKind};

fn ts(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn event(identifier: &str, campaign: &str, dispatched: &str) -> EventRecord {
    EventRecord {
        customer_external_id: identifier.to_string(),
        campaign_name: campaign.to_string(),
        dispatched_at: Some(ts(dispatched)),
        sent_at: None,
        delivered_at: None,
        read_at: None,
        link_clicks: None,
    }
}

fn enriched_fixture() -> Result<DataFrame> {
    let events = vec![
        event("971501234567", "Spring Sale", "2024-01-05 09:00:00"),
        event("20100000000", "Spring Sale", "2024-02-01 10:00:00"),
        event("15551234567", "Winter Sale", "2024-02-14 11:00:00"), // resolves to Other
    ];
    enrich_events(&events, resolver_for(ResolverKind::Prefix))
}

#[test]
fn full_defaults_keep_every_row_and_are_idempotent() -> Result<()> {
    let enriched = enriched_fixture()?;

    let selection = FilterSelection::defaults(&enriched, CountryDefaults::AllObserved)?;
    let once = apply_selection(&enriched, &selection)?;
    assert_eq!(once.height(), enriched.height());

    let twice = apply_selection(&once, &selection)?;
    assert!(once.equals_missing(&twice));

    Ok(())
}

#[test]
fn gulf_levant_preset_drops_unlisted_countries() -> Result<()> {
    let enriched = enriched_fixture()?;

    let selection = FilterSelection::defaults(&enriched, CountryDefaults::GulfLevantPreset)?;
    let filtered = apply_selection(&enriched, &selection)?;

    let countries = filtered.column("Country")?.str()?;
    assert_eq!(filtered.height(), 2);
    assert_eq!(countries.get(0), Some("UAE"));
    assert_eq!(countries.get(1), Some("Egypt"));

    Ok(())
}

#[test]
fn empty_country_selection_yields_zero_rows() -> Result<()> {
    let enriched = enriched_fixture()?;

    let mut selection = FilterSelection::defaults(&enriched, CountryDefaults::AllObserved)?;
    selection.countries.clear();

    let filtered = apply_selection(&enriched, &selection)?;
    assert_eq!(filtered.height(), 0);
    assert_eq!(filtered.width(), enriched.width());

    Ok(())
}

#[test]
fn month_and_campaign_selections_restrict_rows() -> Result<()> {
    let enriched = enriched_fixture()?;

    let mut selection = FilterSelection::defaults(&enriched, CountryDefaults::AllObserved)?;
    selection.months.retain(|month| month == "2024-02");
    let filtered = apply_selection(&enriched, &selection)?;
    assert_eq!(filtered.height(), 2);

    selection.campaigns.retain(|campaign| campaign == "Winter Sale");
    let filtered = apply_selection(&enriched, &selection)?;
    assert_eq!(filtered.height(), 1);
    assert_eq!(
        filtered.column("customer_external_id")?.str()?.get(0),
        Some("15551234567")
    );

    Ok(())
}
