//! Meeting rows in, match decisions out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator used by every multi-valued column of an exported meeting row.
pub const LIST_DELIMITER: char = '|';

/// How a printed hearing was linked to a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// The meeting's own document list cites the printed hearing.
    Explicit,
    /// Title similarity within the date window.
    FuzzyDateTitle,
    /// Title similarity boosted by shared witnesses.
    FuzzyPlusWitness,
    None,
}

impl MatchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::Explicit => "explicit",
            MatchMethod::FuzzyDateTitle => "fuzzy_date_title",
            MatchMethod::FuzzyPlusWitness => "fuzzy_plus_witness",
            MatchMethod::None => "none",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown match method: {0}")]
pub struct ParseMatchMethodError(String);

impl FromStr for MatchMethod {
    type Err = ParseMatchMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explicit" => Ok(MatchMethod::Explicit),
            "fuzzy_date_title" => Ok(MatchMethod::FuzzyDateTitle),
            "fuzzy_plus_witness" => Ok(MatchMethod::FuzzyPlusWitness),
            "none" | "" => Ok(MatchMethod::None),
            other => Err(ParseMatchMethodError(other.to_string())),
        }
    }
}

/// The fields of an exported meeting row that matching reads.
///
/// Multi-valued fields are kept in their `|`-delimited export form.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeetingRow<'a> {
    pub committee_codes: &'a str,
    pub meeting_date_time: &'a str,
    pub title: &'a str,
    pub witnesses_list: &'a str,
    /// `type:title:url` citation segments.
    pub documents_list: &'a str,
}

impl<'a> MeetingRow<'a> {
    /// Committee codes in row order.
    pub fn committee_codes(&self) -> impl Iterator<Item = &'a str> {
        split_list(self.committee_codes)
    }

    pub fn witnesses(&self) -> impl Iterator<Item = &'a str> {
        split_list(self.witnesses_list)
    }

    pub fn citations(&self) -> impl Iterator<Item = &'a str> {
        split_list(self.documents_list)
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Outcome of matching one meeting against the hearing index.
///
/// `confidence` keeps full precision; rounding happens in [`MatchResult::export_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub pdf_url: String,
    pub method: MatchMethod,
    pub confidence: Option<f64>,
}

impl MatchResult {
    pub fn none() -> Self {
        Self {
            pdf_url: String::new(),
            method: MatchMethod::None,
            confidence: None,
        }
    }

    pub fn explicit(pdf_url: impl Into<String>) -> Self {
        Self {
            pdf_url: pdf_url.into(),
            method: MatchMethod::Explicit,
            confidence: Some(1.0),
        }
    }

    pub fn is_match(&self) -> bool {
        self.method != MatchMethod::None
    }

    /// Confidence rounded to three decimals.
    pub fn rounded_confidence(&self) -> Option<f64> {
        self.confidence.map(|c| (c * 1000.0).round() / 1000.0)
    }

    /// The three columns merged into the exported row. No match renders as empty strings.
    pub fn export_fields(&self) -> PrintedHearingFields {
        if !self.is_match() {
            return PrintedHearingFields::default();
        }

        PrintedHearingFields {
            printed_hearing_pdf_url: self.pdf_url.clone(),
            printed_hearing_match_method: self.method.to_string(),
            printed_hearing_match_confidence: self
                .rounded_confidence()
                .map(|c| format!("{c:.3}"))
                .unwrap_or_default(),
        }
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrintedHearingFields {
    pub printed_hearing_pdf_url: String,
    pub printed_hearing_match_method: String,
    pub printed_hearing_match_confidence: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_method_round_trips_through_strings() {
        for method in [
            MatchMethod::Explicit,
            MatchMethod::FuzzyDateTitle,
            MatchMethod::FuzzyPlusWitness,
            MatchMethod::None,
        ] {
            assert_eq!(method.to_string().parse::<MatchMethod>().unwrap(), method);
        }
        assert!("fuzzy".parse::<MatchMethod>().is_err());
    }

    #[test]
    fn match_method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchMethod::FuzzyPlusWitness).unwrap(),
            "\"fuzzy_plus_witness\""
        );
    }

    #[test]
    fn meeting_row_splits_lists() {
        let row = MeetingRow {
            committee_codes: "hsju00|hsju01||",
            witnesses_list: " Doe, Jane | Roe, John",
            documents_list: "Hearing Notice:Notice:http://a|Printed Hearing:Record:http://b",
            ..Default::default()
        };

        assert_eq!(row.committee_codes().collect::<Vec<_>>(), vec!["hsju00", "hsju01"]);
        assert_eq!(row.witnesses().collect::<Vec<_>>(), vec!["Doe, Jane", "Roe, John"]);
        assert_eq!(row.citations().count(), 2);
    }

    #[test]
    fn export_fields_for_no_match_are_empty() {
        assert_eq!(MatchResult::none().export_fields(), PrintedHearingFields::default());
    }

    #[test]
    fn export_fields_round_to_three_decimals() {
        let result = MatchResult {
            pdf_url: "http://x/doc.pdf".to_string(),
            method: MatchMethod::FuzzyDateTitle,
            confidence: Some(0.923_456),
        };

        let fields = result.export_fields();

        assert_eq!(fields.printed_hearing_pdf_url, "http://x/doc.pdf");
        assert_eq!(fields.printed_hearing_match_method, "fuzzy_date_title");
        assert_eq!(fields.printed_hearing_match_confidence, "0.923");
        assert_eq!(result.confidence, Some(0.923_456));
    }

    #[test]
    fn explicit_result_is_full_confidence() {
        let fields = MatchResult::explicit("http://x/doc.pdf").export_fields();
        assert_eq!(fields.printed_hearing_match_method, "explicit");
        assert_eq!(fields.printed_hearing_match_confidence, "1.000");
    }
}
