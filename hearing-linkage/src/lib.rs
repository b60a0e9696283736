//! Links committee meetings to their printed hearing transcripts.
//!
//! Build one [`HearingIndex`] per export run from the raw hearing payloads,
//! then call [`match_printed_hearing`] for each meeting row. Everything here
//! is pure computation over in-memory data: no I/O and no logging.
//!
//! ```
//! use hearing_linkage::{match_printed_hearing, HearingIndex, MatchMethod, MeetingRow};
//! use serde_json::json;
//!
//! let hearings = vec![json!({
//!     "systemCode": "hsju00",
//!     "title": "Markup of H.R. 1",
//!     "date": "2024-03-03",
//!     "pdfUrl": "https://example.org/chrg.pdf",
//! })];
//! let index = HearingIndex::build(&hearings);
//!
//! let row = MeetingRow {
//!     committee_codes: "hsju00",
//!     meeting_date_time: "2024-03-01T10:00:00Z",
//!     title: "Markup of H.R. 1",
//!     ..Default::default()
//! };
//! let result = match_printed_hearing(&row, &index);
//! assert_eq!(result.method, MatchMethod::FuzzyDateTitle);
//! ```

mod index;
mod matcher;
mod similarity;
mod types;

pub mod payload;
pub mod timestamp;

pub use index::{HearingIndex, HearingRecord};
pub use matcher::{
    explicit_citation, is_accepted, match_printed_hearing, ACCEPT_THRESHOLD, DATE_WINDOW_DAYS,
    WITNESS_BONUS,
};
pub use similarity::{similarity, WINKLER_PREFIX_CAP, WINKLER_SCALE};
pub use types::{
    MatchMethod, MatchResult, MeetingRow, ParseMatchMethodError, PrintedHearingFields,
    LIST_DELIMITER,
};
