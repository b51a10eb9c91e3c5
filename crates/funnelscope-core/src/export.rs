// crates/funnelscope-core/src/export.rs

use std::io::Cursor;

use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{PipelineError, Result};
use crate::types::{FunnelStage, TREND_STAGES};

/// Sheet name used for the published analysis workbook.
pub const WORKSHEET_NAME: &str = "Campaign Analysis";

/// Serialize the enriched event table to CSV bytes.
///
/// Timestamps are rendered as `YYYY-MM-DD HH:MM:SS`; null cells stay empty.
pub fn enriched_csv_bytes(enriched: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let mut clone = enriched.clone();
        CsvWriter::new(&mut cursor)
            .include_header(true)
            .with_datetime_format(Some("%Y-%m-%d %H:%M:%S".into()))
            .finish(&mut clone)?;
    }
    Ok(buffer)
}

/// Render an aggregate or trend table as a single-sheet xlsx workbook.
pub fn workbook_bytes(table: &DataFrame) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let columns = report_columns(table);
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *name, &header_format)?;
        worksheet.set_column_width(col as u16, (name.len() as f64 + 2.0).max(12.0))?;
    }

    for (col, name) in columns.iter().enumerate() {
        write_column(worksheet, table, name, col as u16)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Workbook column order: key columns first, then stage counts, then the
/// month-over-month columns. `Delivered` stays in the aggregate tables but is
/// not part of the published sheet.
fn report_columns(table: &DataFrame) -> Vec<&'static str> {
    let mut names = Vec::new();
    for key in ["Country", "campaign_name", "dispatched_month"] {
        if table.column(key).is_ok() {
            names.push(key);
        }
    }
    for stage in [
        FunnelStage::Dispatched,
        FunnelStage::Sent,
        FunnelStage::Read,
        FunnelStage::Clicked,
    ] {
        if table.column(stage.column_name()).is_ok() {
            names.push(stage.column_name());
        }
    }
    for stage in TREND_STAGES {
        if table.column(stage.trend_column_name()).is_ok() {
            names.push(stage.trend_column_name());
        }
    }
    names
}

fn write_column(worksheet: &mut Worksheet, table: &DataFrame, name: &str, col: u16) -> Result<()> {
    let column = table.column(name)?;
    match column.dtype() {
        DataType::String => {
            let values = column.str()?;
            for idx in 0..values.len() {
                if let Some(value) = values.get(idx) {
                    worksheet.write((idx + 1) as u32, col, value)?;
                }
            }
        }
        DataType::Int64 => {
            let values = column.i64()?;
            for idx in 0..values.len() {
                if let Some(value) = values.get(idx) {
                    worksheet.write((idx + 1) as u32, col, value)?;
                }
            }
        }
        DataType::Float64 => {
            let values = column.f64()?;
            for idx in 0..values.len() {
                if let Some(value) = values.get(idx) {
                    worksheet.write((idx + 1) as u32, col, value)?;
                }
            }
        }
        other => {
            return Err(PipelineError::Processing(format!(
                "unsupported workbook column type {other:?} for '{name}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn published_columns_follow_the_report_order() {
        let monthly = df![
            "Country" => ["UAE"],
            "campaign_name" => ["Promo"],
            "dispatched_month" => ["2024-01"],
            "Dispatched" => [4i64],
            "Sent" => [3i64],
            "Delivered" => [2i64],
            "Read" => [1i64],
            "Clicked" => [1i64],
            "Dispatched_MoM" => [0.0f64],
            "Sent_MoM" => [0.0f64],
            "Read_MoM" => [0.0f64],
            "Clicked_MoM" => [0.0f64],
        ]
        .expect("construct monthly trend frame");

        assert_eq!(
            report_columns(&monthly),
            [
                "Country",
                "campaign_name",
                "dispatched_month",
                "Dispatched",
                "Sent",
                "Read",
                "Clicked",
                "Dispatched_MoM",
                "Sent_MoM",
                "Read_MoM",
                "Clicked_MoM",
            ]
        );
        assert_eq!(WORKSHEET_NAME, "Campaign Analysis");
    }

    #[test]
    fn country_tables_publish_key_and_stage_counts_only() {
        let by_country = df![
            "Country" => ["UAE"],
            "Dispatched" => [4i64],
            "Sent" => [3i64],
            "Delivered" => [2i64],
            "Read" => [1i64],
            "Clicked" => [1i64],
        ]
        .expect("construct country frame");

        assert_eq!(
            report_columns(&by_country),
            ["Country", "Dispatched", "Sent", "Read", "Clicked"]
        );
    }
}
