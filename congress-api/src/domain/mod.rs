mod chamber;
mod meeting_type;

pub use chamber::*;
pub use meeting_type::*;
