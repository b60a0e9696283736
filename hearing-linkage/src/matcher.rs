//! Links one meeting row to the printed hearing that transcribes it.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::index::{HearingIndex, HearingRecord};
use crate::payload::clean_text;
use crate::similarity::similarity;
use crate::timestamp::parse_timestamp;
use crate::types::{MatchMethod, MatchResult, MeetingRow};

/// Candidates dated further than this from the meeting are rejected.
pub const DATE_WINDOW_DAYS: i64 = 7;
/// Minimum confidence for a fuzzy candidate to be accepted.
pub const ACCEPT_THRESHOLD: f64 = 0.9;
/// Confidence added per shared witness name.
pub const WITNESS_BONUS: f64 = 0.05;

const EXPLICIT_CITATION_TYPE: &str = "printed hearing";

/// Decides which printed hearing, if any, belongs to `row`.
///
/// An explicit `Printed Hearing` citation in the row's documents wins outright.
/// Otherwise every hearing with a PDF filed under one of the row's committee
/// codes is scored, and the highest-scoring candidate at or above
/// [`ACCEPT_THRESHOLD`] is returned. Ties keep the first candidate seen, in
/// committee-code order then index order.
pub fn match_printed_hearing(row: &MeetingRow<'_>, index: &HearingIndex) -> MatchResult {
    if let Some(pdf_url) = explicit_citation(row) {
        return MatchResult::explicit(pdf_url);
    }

    let meeting = MeetingSignals::from_row(row);

    let mut best: Option<(&HearingRecord, MatchMethod, f64)> = None;
    for code in row.committee_codes() {
        for record in index.candidates(code).iter().filter(|r| r.is_candidate()) {
            let Some((method, confidence)) = meeting.score(record) else {
                continue;
            };
            if best.map_or(true, |(_, _, top)| confidence > top) {
                best = Some((record, method, confidence));
            }
        }
    }

    match best {
        Some((record, method, confidence)) => MatchResult {
            pdf_url: record.pdf_url.clone(),
            method,
            confidence: Some(confidence),
        },
        None => MatchResult::none(),
    }
}

/// First `Printed Hearing:<title>:<url>` segment of the row's documents, if any.
///
/// The type ends at the first colon and the URL is the last field, so titles
/// may contain colons. A URL whose scheme was split off (`https` + `//host`)
/// is rejoined. Segments with an empty URL are skipped.
pub fn explicit_citation<'a>(row: &MeetingRow<'a>) -> Option<&'a str> {
    row.citations().find_map(|segment| {
        let (doc_type, url) = split_citation(segment)?;

        let cites_printed_hearing = doc_type
            .trim()
            .to_lowercase()
            .starts_with(EXPLICIT_CITATION_TYPE);
        (cites_printed_hearing && !url.is_empty()).then_some(url)
    })
}

/// Splits `type:title:url` into its type and trimmed URL.
fn split_citation(segment: &str) -> Option<(&str, &str)> {
    let (doc_type, rest) = segment.split_once(':')?;
    let (title, mut url) = rest.rsplit_once(':')?;

    if url.starts_with("//") {
        // The scheme still needs a title field in front of it.
        let (before_scheme, _scheme) = title.rsplit_once(':')?;
        url = &rest[before_scheme.len() + 1..];
    }

    Some((doc_type, url.trim()))
}

/// Whether a fuzzy confidence clears the acceptance gate.
pub fn is_accepted(confidence: f64) -> bool {
    confidence >= ACCEPT_THRESHOLD
}

/// The parts of a meeting row used for fuzzy scoring, normalized once per row.
struct MeetingSignals {
    title: String,
    date: Option<DateTime<Utc>>,
    witnesses: HashSet<String>,
}

impl MeetingSignals {
    fn from_row(row: &MeetingRow<'_>) -> Self {
        Self {
            title: clean_text(row.title).to_lowercase(),
            date: parse_timestamp(row.meeting_date_time),
            witnesses: witness_set(row.witnesses()),
        }
    }

    /// Scores one candidate; `None` if it falls outside the date window or below the threshold.
    fn score(&self, record: &HearingRecord) -> Option<(MatchMethod, f64)> {
        let base = similarity(&self.title, &record.title.to_lowercase());

        if let (Some(meeting_date), Some(hearing_date)) = (self.date, record.date) {
            if outside_window(meeting_date, hearing_date) {
                return None;
            }
        }

        let overlap = if self.witnesses.is_empty() {
            0
        } else {
            witness_set(record.witnesses.iter().map(String::as_str))
                .intersection(&self.witnesses)
                .count()
        };

        let (method, confidence) = if overlap > 0 {
            let boosted = (base + WITNESS_BONUS * overlap as f64).min(1.0);
            (MatchMethod::FuzzyPlusWitness, boosted)
        } else {
            (MatchMethod::FuzzyDateTitle, base)
        };

        is_accepted(confidence).then_some((method, confidence))
    }
}

fn outside_window(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    let gap = if a > b { a - b } else { b - a };
    gap > Duration::days(DATE_WINDOW_DAYS)
}

fn witness_set<'a>(names: impl Iterator<Item = &'a str>) -> HashSet<String> {
    names
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect()
}
