use strum::{Display, EnumString};

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum Chamber {
    #[strum(ascii_case_insensitive, serialize = "house")]
    House,
    #[strum(ascii_case_insensitive, serialize = "senate")]
    Senate,
    #[strum(ascii_case_insensitive, serialize = "joint")]
    Joint,
    #[strum(ascii_case_insensitive, serialize = "all")]
    All,
}

impl Chamber {
    /// Value of the `chamber` query parameter; `All` sends none.
    pub fn as_filter(&self) -> Option<String> {
        match self {
            Chamber::All => None,
            other => Some(other.to_string()),
        }
    }

    /// The concrete chambers this selection covers.
    pub fn expand(self) -> Vec<Chamber> {
        match self {
            Chamber::All => vec![Chamber::House, Chamber::Senate, Chamber::Joint],
            other => vec![other],
        }
    }
}
