/// Month bucket written when a timestamp is missing or unparseable. The
/// sentinel takes part in grouping and filtering like any real month and
/// sorts after every `YYYY-MM` value.
pub const MISSING_MONTH: &str = "NaT";

/// Successive message-lifecycle milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStage {
    Dispatched,
    Sent,
    Delivered,
    Read,
    Clicked,
}

impl FunnelStage {
    pub fn column_name(&self) -> &'static str {
        match self {
            FunnelStage::Dispatched => "Dispatched",
            FunnelStage::Sent => "Sent",
            FunnelStage::Delivered => "Delivered",
            FunnelStage::Read => "Read",
            FunnelStage::Clicked => "Clicked",
        }
    }

    pub fn trend_column_name(&self) -> &'static str {
        match self {
            FunnelStage::Dispatched => "Dispatched_MoM",
            FunnelStage::Sent => "Sent_MoM",
            FunnelStage::Delivered => "Delivered_MoM",
            FunnelStage::Read => "Read_MoM",
            FunnelStage::Clicked => "Clicked_MoM",
        }
    }
}

/// Stages the month-over-month trend is computed for. `Delivered` stays in
/// the aggregate table but carries no trend column in the report format.
pub const TREND_STAGES: [FunnelStage; 4] = [
    FunnelStage::Dispatched,
    FunnelStage::Sent,
    FunnelStage::Read,
    FunnelStage::Clicked,
];

/// Grouping key for funnel aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// One row per country, campaign and dispatch month.
    CountryCampaignMonth,
    /// One row per country across all campaigns and months.
    Country,
}
