use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use polars::prelude::*;

use crate::error::Result;

/// Countries the report defaults to when the operator has not picked any:
/// the Gulf and Levant markets the campaigns target. Both the ops-table
/// spelling (`UAE`) and the dialing-plan spelling are listed so the preset
/// works under either resolution strategy; intersecting with the observed
/// values drops whichever spelling is absent.
pub static GULF_LEVANT_PRESET: Lazy<BTreeSet<&'static str>> = Lazy::new(|| {
    [
        "UAE",
        "United Arab Emirates",
        "Saudi Arabia",
        "Egypt",
        "Bahrain",
        "Iraq",
        "Qatar",
        "Kuwait",
        "Oman",
        "Jordan",
        "Lebanon",
    ]
    .into_iter()
    .collect()
});

/// How the country dimension defaults when no explicit selection is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryDefaults {
    /// Narrow to the curated Gulf/Levant preset.
    #[default]
    GulfLevantPreset,
    /// Every country observed in the enriched table.
    AllObserved,
}

/// One value set per filter dimension; rows must match all three. Months
/// are keyed on the dispatch month, the axis the reports trend over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub months: BTreeSet<String>,
    pub campaigns: BTreeSet<String>,
}

impl FilterSelection {
    /// Distinct observed values per dimension, with the country dimension
    /// optionally narrowed to the curated preset.
    pub fn defaults(enriched: &DataFrame, country_defaults: CountryDefaults) -> Result<Self> {
        let observed = distinct_values(enriched, "Country")?;
        let countries = match country_defaults {
            CountryDefaults::AllObserved => observed,
            CountryDefaults::GulfLevantPreset => observed
                .into_iter()
                .filter(|country| GULF_LEVANT_PRESET.contains(country.as_str()))
                .collect(),
        };
        Ok(Self {
            countries,
            months: distinct_values(enriched, "dispatched_month")?,
            campaigns: distinct_values(enriched, "campaign_name")?,
        })
    }
}

pub(crate) fn distinct_values(df: &DataFrame, column: &str) -> Result<BTreeSet<String>> {
    let values = df.column(column)?.str()?;
    let mut set = BTreeSet::new();
    for value in values.into_iter().flatten() {
        set.insert(value.to_string());
    }
    Ok(set)
}

/// Keeps rows whose country, dispatch month and campaign all belong to the
/// selection. An empty set on any dimension keeps nothing.
pub fn apply_selection(enriched: &DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    let len = enriched.height();
    let countries = enriched.column("Country")?.str()?;
    let months = enriched.column("dispatched_month")?.str()?;
    let campaigns = enriched.column("campaign_name")?.str()?;

    let selected = |set: &BTreeSet<String>, value: Option<&str>| {
        value.is_some_and(|v| set.contains(v))
    };

    let mut keep = Vec::with_capacity(len);
    for idx in 0..len {
        keep.push(
            selected(&selection.countries, countries.get(idx))
                && selected(&selection.months, months.get(idx))
                && selected(&selection.campaigns, campaigns.get(idx)),
        );
    }

    let mask = Series::new("keep".into(), keep);
    Ok(enriched.filter(mask.bool()?)?)
}
