use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::Result;
use crate::types::GroupKey;

#[derive(Debug, Default)]
struct StageCounts {
    dispatched: i64,
    sent: i64,
    delivered: i64,
    read: i64,
    clicked: i64,
}

/// Groups filtered rows by the chosen key and counts funnel arrivals per
/// group: a non-null scan for each of the four stage timestamps, plus the
/// sum of click flags. Rows come out sorted by key, so repeated runs over
/// the same selection produce identical tables.
pub fn aggregate_funnel(filtered: &DataFrame, key: GroupKey) -> Result<DataFrame> {
    let len = filtered.height();

    let countries = filtered.column("Country")?.str()?;
    let campaigns = filtered.column("campaign_name")?.str()?;
    let months = filtered.column("dispatched_month")?.str()?;
    let dispatched = filtered.column("dispatched_at")?.datetime()?;
    let sent = filtered.column("sent_at")?.datetime()?;
    let delivered = filtered.column("delivered_at")?.datetime()?;
    let read = filtered.column("read_at")?.datetime()?;
    let clicked = filtered.column("Clicked")?.bool()?;

    let mut groups: BTreeMap<(String, String, String), StageCounts> = BTreeMap::new();

    for idx in 0..len {
        let group_key = match key {
            GroupKey::CountryCampaignMonth => (
                countries.get(idx).unwrap_or_default().to_string(),
                campaigns.get(idx).unwrap_or_default().to_string(),
                months.get(idx).unwrap_or_default().to_string(),
            ),
            GroupKey::Country => (
                countries.get(idx).unwrap_or_default().to_string(),
                String::new(),
                String::new(),
            ),
        };

        let counts = groups.entry(group_key).or_default();
        if dispatched.get(idx).is_some() {
            counts.dispatched += 1;
        }
        if sent.get(idx).is_some() {
            counts.sent += 1;
        }
        if delivered.get(idx).is_some() {
            counts.delivered += 1;
        }
        if read.get(idx).is_some() {
            counts.read += 1;
        }
        if clicked.get(idx).unwrap_or(false) {
            counts.clicked += 1;
        }
    }

    let mut country_col = Vec::with_capacity(groups.len());
    let mut campaign_col = Vec::with_capacity(groups.len());
    let mut month_col = Vec::with_capacity(groups.len());
    let mut dispatched_col = Vec::with_capacity(groups.len());
    let mut sent_col = Vec::with_capacity(groups.len());
    let mut delivered_col = Vec::with_capacity(groups.len());
    let mut read_col = Vec::with_capacity(groups.len());
    let mut clicked_col = Vec::with_capacity(groups.len());

    for ((country, campaign, month), counts) in &groups {
        country_col.push(country.as_str());
        campaign_col.push(campaign.as_str());
        month_col.push(month.as_str());
        dispatched_col.push(counts.dispatched);
        sent_col.push(counts.sent);
        delivered_col.push(counts.delivered);
        read_col.push(counts.read);
        clicked_col.push(counts.clicked);
    }

    let mut columns: Vec<Column> = vec![Series::new("Country".into(), country_col).into()];
    if key == GroupKey::CountryCampaignMonth {
        columns.push(Series::new("campaign_name".into(), campaign_col).into());
        columns.push(Series::new("dispatched_month".into(), month_col).into());
    }
    columns.extend([
        Series::new("Dispatched".into(), dispatched_col).into(),
        Series::new("Sent".into(), sent_col).into(),
        Series::new("Delivered".into(), delivered_col).into(),
        Series::new("Read".into(), read_col).into(),
        Series::new("Clicked".into(), clicked_col).into(),
    ]);

    Ok(DataFrame::new(columns)?)
}
