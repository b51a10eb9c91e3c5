use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};

use crate::errors::ParserError;
use crate::model::EventRecord;
use crate::schema::{index_headers, ColumnIndex};

/// Timestamp shapes observed across export generations, tried in order.
static FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Best-effort parse of one timestamp field. Unrecognized or empty text is
/// missing data, never an error: the row stays in the pipeline with the
/// field nulled.
pub fn parse_event_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    // Offset-bearing exports are normalized to naive UTC.
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    None
}

/// Reads a whole export into typed records. Validates the header row first;
/// a missing required column rejects the file before any row is parsed.
/// Rows shorter than the header are kept, with the absent fields treated as
/// missing data.
pub fn events_from_reader<R: Read>(input: R) -> Result<Vec<EventRecord>, ParserError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();
    let index = index_headers(&headers)?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        events.push(event_from_record(&record, &index));
    }
    Ok(events)
}

pub fn events_from_slice(bytes: &[u8]) -> Result<Vec<EventRecord>, ParserError> {
    events_from_reader(bytes)
}

fn event_from_record(record: &StringRecord, index: &ColumnIndex) -> EventRecord {
    let field = |idx: usize| record.get(idx).unwrap_or("");
    EventRecord {
        customer_external_id: field(index.customer_external_id).trim().to_string(),
        campaign_name: field(index.campaign_name).trim().to_string(),
        dispatched_at: parse_event_timestamp(field(index.dispatched_at)),
        sent_at: parse_event_timestamp(field(index.sent_at)),
        delivered_at: parse_event_timestamp(field(index.delivered_at)),
        read_at: parse_event_timestamp(field(index.read_at)),
        // Not trimmed: the click column is presence-based and whitespace
        // counts as presence.
        link_clicks: non_empty(field(index.link_clicks)),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
