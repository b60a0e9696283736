//! Fetch, normalize, match and export one congress worth of committee meetings.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use congress_api::domain::Chamber;
use congress_api::{CongressClient, CongressURL, Throttler};
use hearing_linkage::payload::text_field;
use hearing_linkage::timestamp::parse_timestamp;
use hearing_linkage::{match_printed_hearing, HearingIndex};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::Opts;
use crate::config::Settings;
use crate::export::{write_csv, MeetingExportRow};
use crate::normalize::{normalize_meeting_detail, CommitteeLookup};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Which normalized rows make it into the export.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub since: Option<NaiveDate>,
    pub committee_code: Option<String>,
}

impl RowFilter {
    pub fn from_opts(opts: &Opts) -> Self {
        Self {
            since: opts.since,
            committee_code: opts.committee_code.clone(),
        }
    }

    pub fn accepts(&self, row: &MeetingExportRow) -> bool {
        self.is_since(&row.meeting_date_time) && self.has_committee(&row.committee_codes)
    }

    /// Missing or unparseable meeting dates are kept.
    fn is_since(&self, meeting_date_time: &str) -> bool {
        let Some(since) = self.since else {
            return true;
        };
        match parse_timestamp(meeting_date_time) {
            Some(meeting) => meeting.date_naive() >= since,
            None => true,
        }
    }

    fn has_committee(&self, committee_codes: &str) -> bool {
        let Some(wanted) = self.committee_code.as_deref() else {
            return true;
        };
        committee_codes
            .split(hearing_linkage::LIST_DELIMITER)
            .any(|code| !code.is_empty() && code.eq_ignore_ascii_case(wanted))
    }
}

/// Everything needed to turn one meeting detail payload into an export row.
pub struct RowBuilder<'a> {
    pub committees: &'a CommitteeLookup,
    pub index: &'a HearingIndex,
    pub filter: &'a RowFilter,
    pub congress: u32,
    pub fetch_run_id: &'a str,
}

impl RowBuilder<'_> {
    /// Normalizes, filters and links a meeting. `None` when the filter rejects it.
    pub fn build(&self, detail: &serde_json::Map<String, Value>) -> Option<MeetingExportRow> {
        let mut row = normalize_meeting_detail(detail, self.committees, self.congress);
        if !self.filter.accepts(&row) {
            return None;
        }

        let result = match_printed_hearing(&row.as_meeting_row(), self.index);
        row.attach_printed_hearing(result.export_fields());
        row.fetch_run_id = self.fetch_run_id.to_string();
        Some(row)
    }
}

pub async fn run(opts: &Opts, settings: &Settings) -> Result<ExportSummary> {
    let throttler = Arc::new(Throttler::new(settings.min_interval()));
    let client = CongressClient::new(
        settings.api_key.clone(),
        CongressURL::new(&settings.base_url),
        throttler,
    )?;
    let chambers = opts.chamber.expand();

    info!("Building committee lookup");
    let committees = committee_lookup(&client, opts.congress, &chambers).await?;

    info!("Enumerating committee meetings");
    let mut meeting_keys: Vec<(Chamber, String)> = Vec::new();
    for chamber in &chambers {
        let stubs = client
            .committee_meetings(opts.congress, *chamber, opts.meeting_type)
            .await
            .with_context(|| format!("Failed to list {} committee meetings", chamber))?;
        for stub in stubs.iter().filter_map(Value::as_object) {
            let event_id = text_field(stub, &["eventId", "eventID"]);
            if !event_id.is_empty() {
                meeting_keys.push((*chamber, event_id));
            }
        }
    }
    info!("Found {} meeting stubs", meeting_keys.len());

    info!("Fetching printed hearings");
    let mut hearings: Vec<Value> = Vec::new();
    for chamber in &chambers {
        hearings.extend(
            client
                .hearings(opts.congress, *chamber, None)
                .await
                .with_context(|| format!("Failed to list {} hearings", chamber))?,
        );
    }
    let index = HearingIndex::build(&hearings);
    info!(
        committees = index.len(),
        hearings = index.record_count(),
        "Built hearing index"
    );

    info!("Hydrating meeting details");
    let fetch_run_id = uuid::Uuid::new_v4().to_string();
    let filter = RowFilter::from_opts(opts);
    let builder = RowBuilder {
        committees: &committees,
        index: &index,
        filter: &filter,
        congress: opts.congress,
        fetch_run_id: &fetch_run_id,
    };

    let mut summary = ExportSummary::default();
    let mut rows: Vec<MeetingExportRow> = Vec::new();
    for (chamber, event_id) in &meeting_keys {
        let detail = match client
            .committee_meeting_detail(opts.congress, *chamber, event_id)
            .await
        {
            Ok(detail) => detail,
            Err(e) => {
                warn!("Failed to fetch meeting {}/{}: {}", chamber, event_id, e);
                summary.skipped += 1;
                continue;
            }
        };
        let Some(detail) = detail.as_object() else {
            warn!("Meeting {}/{} is not an object, skipping", chamber, event_id);
            summary.skipped += 1;
            continue;
        };

        if let Some(row) = builder.build(detail) {
            if !row.printed_hearing_pdf_url.is_empty() {
                summary.matched += 1;
            }
            rows.push(row);
        }
    }
    summary.exported = rows.len();
    info!(
        "Hydrated {} meetings, skipped {}, linked {} printed hearings",
        summary.exported, summary.skipped, summary.matched
    );

    let output_path = opts.output_path();
    info!("Writing CSV to {}", output_path.display());
    write_csv(&rows, &output_path)?;

    Ok(summary)
}

async fn committee_lookup(
    client: &CongressClient,
    congress: u32,
    chambers: &[Chamber],
) -> Result<CommitteeLookup> {
    let mut lookup = CommitteeLookup::new();
    for chamber in chambers {
        let committees = client
            .committees(congress, *chamber)
            .await
            .with_context(|| format!("Failed to list {} committees", chamber))?;
        for committee in committees.iter().filter_map(Value::as_object) {
            let system_code = text_field(committee, &["systemCode"]);
            if !system_code.is_empty() {
                lookup.insert(system_code, text_field(committee, &["name"]));
            }
        }
    }
    Ok(lookup)
}
