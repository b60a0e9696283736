use std::path::Path;

use anyhow::{Context, Result};
use hearing_linkage::{MeetingRow, PrintedHearingFields};
use serde::Serialize;

/// Column order of the exported CSV.
pub const CSV_COLUMNS: [&str; 30] = [
    "eventId",
    "congress",
    "chamber",
    "meetingType",
    "meetingDateTime",
    "status",
    "committee_codes",
    "committee_names",
    "subcommittee_name",
    "title",
    "location_building",
    "location_room",
    "location_city",
    "location_state",
    "documents_count",
    "documents_list",
    "witnesses_count",
    "witnesses_list",
    "votes_list",
    "amendments_list",
    "related_bills_list",
    "related_items_count",
    "related_items_summary",
    "meeting_detail_url",
    "printed_hearing_pdf_url",
    "printed_hearing_match_method",
    "printed_hearing_match_confidence",
    "updateDate",
    "source_last_modified",
    "fetch_run_id",
];

/// One exported committee meeting. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeetingExportRow {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub congress: String,
    pub chamber: String,
    #[serde(rename = "meetingType")]
    pub meeting_type: String,
    #[serde(rename = "meetingDateTime")]
    pub meeting_date_time: String,
    pub status: String,
    pub committee_codes: String,
    pub committee_names: String,
    pub subcommittee_name: String,
    pub title: String,
    pub location_building: String,
    pub location_room: String,
    pub location_city: String,
    pub location_state: String,
    pub documents_count: usize,
    pub documents_list: String,
    pub witnesses_count: usize,
    pub witnesses_list: String,
    pub votes_list: String,
    pub amendments_list: String,
    pub related_bills_list: String,
    pub related_items_count: usize,
    pub related_items_summary: String,
    pub meeting_detail_url: String,
    pub printed_hearing_pdf_url: String,
    pub printed_hearing_match_method: String,
    pub printed_hearing_match_confidence: String,
    #[serde(rename = "updateDate")]
    pub update_date: String,
    pub source_last_modified: String,
    pub fetch_run_id: String,
}

impl MeetingExportRow {
    /// The view of this row that printed-hearing matching reads.
    pub fn as_meeting_row(&self) -> MeetingRow<'_> {
        MeetingRow {
            committee_codes: &self.committee_codes,
            meeting_date_time: &self.meeting_date_time,
            title: &self.title,
            witnesses_list: &self.witnesses_list,
            documents_list: &self.documents_list,
        }
    }

    pub fn attach_printed_hearing(&mut self, fields: PrintedHearingFields) {
        self.printed_hearing_pdf_url = fields.printed_hearing_pdf_url;
        self.printed_hearing_match_method = fields.printed_hearing_match_method;
        self.printed_hearing_match_confidence = fields.printed_hearing_match_confidence;
    }
}

/// Writes `rows` to `path` as CSV, creating parent directories as needed.
///
/// The header is written even when there are no rows.
pub fn write_csv(rows: &[MeetingExportRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    if rows.is_empty() {
        writer.write_record(CSV_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
