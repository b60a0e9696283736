use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use congress_api::domain::{Chamber, MeetingType};

#[derive(Debug, Parser)]
#[command(name = "committee-export")]
#[command(about = "Export committee meetings and link their printed hearings")]
pub struct Opts {
    /// Chamber to export: house, senate, joint or all
    #[arg(long, default_value = "all")]
    pub chamber: Chamber,

    /// Only keep meetings held by this committee system code
    #[arg(long = "committee-code")]
    pub committee_code: Option<String>,

    /// Meeting type: hearing, markup, business or all
    #[arg(long = "meeting-type", default_value = "all")]
    pub meeting_type: MeetingType,

    /// Lower bound meeting date (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    #[arg(long, default_value_t = 119)]
    pub congress: u32,

    /// Defaults to exports/committee_meetings_<congress>.csv
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Opts {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from("exports").join(format!("committee_meetings_{}.csv", self.congress))
        })
    }
}
