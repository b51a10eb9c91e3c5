use chrono::NaiveDateTime;

/// One row of a campaign event export. Each timestamp marks the moment the
/// message reached that funnel stage; a missing value means the stage was
/// never reached (or the export predates the stage being tracked).
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub customer_external_id: String,
    pub campaign_name: String,
    pub dispatched_at: Option<NaiveDateTime>,
    pub sent_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub read_at: Option<NaiveDateTime>,
    /// Raw click column content, kept verbatim. The upstream system writes
    /// the clicked URL here, so the column is presence-based rather than a
    /// boolean.
    pub link_clicks: Option<String>,
}

impl EventRecord {
    /// True iff the click column carried anything at all. The content is
    /// never inspected, so literal `"0"` or `"false"` still counts as a
    /// click; historical reports were produced under this rule and changing
    /// it would shift every Clicked total.
    pub fn clicked(&self) -> bool {
        self.link_clicks
            .as_deref()
            .is_some_and(|value| !value.is_empty())
    }
}
