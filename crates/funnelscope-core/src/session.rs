// crates/funnelscope-core/src/session.rs

use blake3::Hasher;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use funnelscope_parser::{events_from_slice, resolver_for, ResolverKind};

use crate::aggregate::aggregate_funnel;
use crate::enrich::enrich_events;
use crate::error::Result;
use crate::export;
use crate::filter::{self, CountryDefaults, FilterSelection};
use crate::read_times;
use crate::trend::add_month_over_month;
use crate::types::GroupKey;

/// One loaded campaign export plus the enriched table derived from it.
///
/// Construction runs schema validation, record parsing, and enrichment once.
/// Every report afterwards is derived from the retained enriched table, so a
/// session can serve several selections without re-reading the export.
pub struct CampaignSession {
    enriched: DataFrame,
    record_count: usize,
    file_hash: String,
    resolver_name: &'static str,
}

impl CampaignSession {
    /// Parse and enrich a raw CSV export.
    ///
    /// Missing required columns fail here, before any row is parsed, so a
    /// malformed export never produces a partial session.
    pub fn load(bytes: &[u8], kind: ResolverKind) -> Result<Self> {
        let resolver = resolver_for(kind);
        let events = events_from_slice(bytes)?;
        let enriched = enrich_events(&events, resolver)?;
        let file_hash = compute_hash(bytes);

        info!(
            rows = events.len(),
            resolver = resolver.name(),
            file_hash = %file_hash,
            "Campaign export loaded"
        );

        Ok(Self {
            enriched,
            record_count: events.len(),
            file_hash,
            resolver_name: resolver.name(),
        })
    }

    pub fn enriched(&self) -> &DataFrame {
        &self.enriched
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn file_hash(&self) -> &str {
        &self.file_hash
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver_name
    }

    /// Selection prefilled from the loaded data under the given country policy.
    pub fn default_selection(&self, country_defaults: CountryDefaults) -> Result<FilterSelection> {
        FilterSelection::defaults(&self.enriched, country_defaults)
    }

    /// Country x campaign x month funnel with month-over-month columns.
    pub fn monthly_report(&self, selection: &FilterSelection) -> Result<DataFrame> {
        let filtered = filter::apply_selection(&self.enriched, selection)?;
        let aggregate = aggregate_funnel(&filtered, GroupKey::CountryCampaignMonth)?;
        add_month_over_month(&aggregate)
    }

    /// Funnel totals collapsed to one row per country.
    pub fn country_report(&self, selection: &FilterSelection) -> Result<DataFrame> {
        let filtered = filter::apply_selection(&self.enriched, selection)?;
        aggregate_funnel(&filtered, GroupKey::Country)
    }

    pub fn reads_by_weekday(&self, selection: &FilterSelection) -> Result<DataFrame> {
        let filtered = filter::apply_selection(&self.enriched, selection)?;
        read_times::reads_by_weekday(&filtered)
    }

    pub fn reads_by_hour(&self, selection: &FilterSelection) -> Result<DataFrame> {
        let filtered = filter::apply_selection(&self.enriched, selection)?;
        read_times::reads_by_hour(&filtered)
    }

    /// Enriched table serialized as CSV bytes.
    pub fn enriched_csv(&self) -> Result<Vec<u8>> {
        export::enriched_csv_bytes(&self.enriched)
    }

    /// Monthly report rendered as a single-sheet xlsx workbook.
    pub fn monthly_workbook(&self, selection: &FilterSelection) -> Result<Vec<u8>> {
        let report = self.monthly_report(selection)?;
        export::workbook_bytes(&report)
    }

    pub fn summary(&self, selection: &FilterSelection) -> Result<SessionSummary> {
        let filtered = filter::apply_selection(&self.enriched, selection)?;
        let groups = aggregate_funnel(&filtered, GroupKey::CountryCampaignMonth)?.height();

        Ok(SessionSummary {
            file_hash: self.file_hash.clone(),
            resolver: self.resolver_name.to_string(),
            rows: self.record_count,
            filtered_rows: filtered.height(),
            countries: filter::distinct_values(&filtered, "Country")?.len(),
            campaigns: filter::distinct_values(&filtered, "campaign_name")?.len(),
            months: filter::distinct_values(&filtered, "dispatched_month")?.len(),
            groups,
        })
    }
}

/// Headline numbers for one processed export.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub file_hash: String,
    pub resolver: String,
    pub rows: usize,
    pub filtered_rows: usize,
    pub countries: usize,
    pub campaigns: usize,
    pub months: usize,
    pub groups: usize,
}

fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
