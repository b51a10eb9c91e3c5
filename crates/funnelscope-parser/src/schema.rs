use csv::StringRecord;

use crate::errors::SchemaError;

/// Columns every campaign export must carry, in canonical order. Extra
/// columns are allowed and ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "customer_external_id",
    "campaign_name",
    "dispatched_at",
    "sent_at",
    "delivered_at",
    "read_at",
    "link_clicks",
];

/// Positions of the required columns within a validated header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnIndex {
    pub customer_external_id: usize,
    pub campaign_name: usize,
    pub dispatched_at: usize,
    pub sent_at: usize,
    pub delivered_at: usize,
    pub read_at: usize,
    pub link_clicks: usize,
}

/// Checks that the header row covers the required column set. The error
/// lists every absent column, not just the first, so one rejection tells the
/// operator everything wrong with the export.
pub fn validate_headers(headers: &StringRecord) -> Result<(), SchemaError> {
    let present = |name: &str| headers.iter().any(|header| header == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !present(name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { missing })
    }
}

pub(crate) fn index_headers(headers: &StringRecord) -> Result<ColumnIndex, SchemaError> {
    validate_headers(headers)?;

    let locate = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .expect("presence checked above")
    };
    Ok(ColumnIndex {
        customer_external_id: locate("customer_external_id"),
        campaign_name: locate("campaign_name"),
        dispatched_at: locate("dispatched_at"),
        sent_at: locate("sent_at"),
        delivered_at: locate("delivered_at"),
        read_at: locate("read_at"),
        link_clicks: locate("link_clicks"),
    })
}
