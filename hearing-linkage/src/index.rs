use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::payload::{coerce_to_sequence, text_field, witness_name};
use crate::timestamp::parse_timestamp;

/// A published hearing transcript that a meeting may link to.
#[derive(Debug, Clone, PartialEq)]
pub struct HearingRecord {
    pub system_code: String,
    /// `None` when the payload date was missing or unparseable.
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    /// Empty means the record never competes in fuzzy matching.
    pub pdf_url: String,
    pub witnesses: Vec<String>,
}

impl HearingRecord {
    /// Builds a record from one raw hearing payload.
    ///
    /// Returns `None` for non-object payloads and payloads without a system code.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let payload = payload.as_object()?;

        let system_code = text_field(payload, &["systemCode"]);
        if system_code.is_empty() {
            return None;
        }

        let witnesses = coerce_to_sequence(payload.get("witnesses"))
            .into_iter()
            .map(witness_name)
            .collect();

        Some(Self {
            system_code,
            date: parse_timestamp(&text_field(payload, &["date"])),
            title: text_field(payload, &["title"]),
            pdf_url: text_field(payload, &["pdfUrl", "pdfURL"]),
            witnesses,
        })
    }

    pub fn is_candidate(&self) -> bool {
        !self.pdf_url.is_empty()
    }
}

/// Read-only lookup from committee system code to its hearing records.
///
/// Records keep their payload order within a code and are never deduplicated.
/// Built once per export run; share it by reference across matchers.
#[derive(Debug, Clone, Default)]
pub struct HearingIndex {
    by_code: HashMap<String, Vec<HearingRecord>>,
}

impl HearingIndex {
    /// Builds the index from raw payloads, silently dropping unusable ones.
    pub fn build<'a, I>(payloads: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut by_code: HashMap<String, Vec<HearingRecord>> = HashMap::new();
        for record in payloads.into_iter().filter_map(HearingRecord::from_payload) {
            by_code
                .entry(record.system_code.clone())
                .or_default()
                .push(record);
        }
        Self { by_code }
    }

    /// Records filed under `system_code`, empty if the code is unknown.
    pub fn candidates(&self, system_code: &str) -> &[HearingRecord] {
        self.by_code
            .get(system_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct system codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.by_code.values().map(Vec::len).sum()
    }
}

impl<'a> FromIterator<&'a Value> for HearingIndex {
    fn from_iter<T: IntoIterator<Item = &'a Value>>(iter: T) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    // One index is shared by reference across concurrent matchers.
    fn _assert_index_send_sync() {
        fn assert<T: Send + Sync>() {}
        assert::<HearingIndex>();
    }

    #[test]
    fn builds_record_from_full_payload() {
        let payload = json!({
            "systemCode": " hsju00 ",
            "title": "Oversight of the FBI",
            "pdfUrl": "https://www.congress.gov/118/chrg/CHRG-118hhrg1.pdf",
            "date": "2024-03-03T00:00:00Z",
            "witnesses": {"item": ["Jane Doe", {"name": " John Roe "}]}
        });

        let record = HearingRecord::from_payload(&payload).unwrap();

        assert_eq!(record.system_code, "hsju00");
        assert_eq!(record.title, "Oversight of the FBI");
        assert_eq!(
            record.pdf_url,
            "https://www.congress.gov/118/chrg/CHRG-118hhrg1.pdf"
        );
        assert_eq!(
            record.date,
            Some(Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap())
        );
        assert_eq!(record.witnesses, vec!["Jane Doe", "John Roe"]);
    }

    #[test]
    fn accepts_upper_case_pdf_key() {
        let payload = json!({"systemCode": "ssju00", "pdfURL": "http://x/doc.pdf"});
        let record = HearingRecord::from_payload(&payload).unwrap();
        assert_eq!(record.pdf_url, "http://x/doc.pdf");
        assert!(record.is_candidate());
    }

    #[test]
    fn unparseable_date_becomes_none() {
        let payload = json!({"systemCode": "ssju00", "date": "sometime in March"});
        let record = HearingRecord::from_payload(&payload).unwrap();
        assert_eq!(record.date, None);
    }

    #[test]
    fn witnesses_accept_bare_list_and_missing() {
        let listed = json!({"systemCode": "a", "witnesses": ["  A  ", "B"]});
        assert_eq!(
            HearingRecord::from_payload(&listed).unwrap().witnesses,
            vec!["A", "B"]
        );

        let missing = json!({"systemCode": "a"});
        assert!(HearingRecord::from_payload(&missing)
            .unwrap()
            .witnesses
            .is_empty());
    }

    #[test]
    fn drops_payloads_without_code_or_not_objects() {
        let payloads = vec![
            json!({"systemCode": "", "title": "x"}),
            json!({"systemCode": "  \u{0001} "}),
            json!({"title": "no code"}),
            json!("not an object"),
            json!(["also", "not"]),
            json!({"systemCode": "hsju00", "title": "kept"}),
        ];

        let index = HearingIndex::build(&payloads);

        assert_eq!(index.len(), 1);
        assert_eq!(index.record_count(), 1);
        assert_eq!(index.candidates("hsju00")[0].title, "kept");
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let payloads = vec![
            json!({"systemCode": "hsju00", "title": "first"}),
            json!({"systemCode": "ssju00", "title": "other"}),
            json!({"systemCode": "hsju00", "title": "second"}),
            json!({"systemCode": "hsju00", "title": "second"}),
        ];

        let index: HearingIndex = payloads.iter().collect();

        let titles: Vec<&str> = index
            .candidates("hsju00")
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second", "second"]);
        assert_eq!(index.record_count(), 4);
    }

    #[test]
    fn records_without_pdf_still_occupy_a_slot() {
        let payloads = vec![json!({"systemCode": "hsju00", "title": "no pdf"})];
        let index = HearingIndex::build(&payloads);
        let records = index.candidates("hsju00");
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_candidate());
    }

    #[test]
    fn unknown_code_has_no_candidates() {
        let index = HearingIndex::default();
        assert!(index.candidates("nope").is_empty());
        assert!(index.is_empty());
    }
}
