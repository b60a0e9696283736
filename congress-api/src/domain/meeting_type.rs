use strum::{Display, EnumString};

/// Meeting-type filter accepted by the committee-meeting list endpoint.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum MeetingType {
    #[strum(ascii_case_insensitive, serialize = "hearing")]
    Hearing,
    #[strum(ascii_case_insensitive, serialize = "markup")]
    Markup,
    #[strum(ascii_case_insensitive, serialize = "business")]
    Business,
    #[strum(ascii_case_insensitive, serialize = "all")]
    All,
}

impl MeetingType {
    pub fn as_filter(&self) -> Option<String> {
        match self {
            MeetingType::All => None,
            other => Some(other.to_string()),
        }
    }
}
