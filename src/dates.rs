use chrono::{DateTime, Days, NaiveDate, TimeZone};
use regex::Regex;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns "Posted 5 days ago" style labels into calendar dates.
pub struct DateResolver {
    days_regex: Regex,
}

impl DateResolver {
    pub fn new() -> Self {
        DateResolver {
            days_regex: Regex::new(r"\d+").expect("days-ago pattern"),
        }
    }

    /// First decimal integer in the label. Labels without one ("Posted today",
    /// "New") have no age we can trust.
    pub fn parse_days_ago(&self, label: &str) -> Option<u32> {
        self.days_regex.find(label)?.as_str().parse().ok()
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar date `days_ago` days before `reference`, in the reference's zone.
/// `None` only when the subtraction leaves chrono's supported range.
pub fn resolve_posted_date<Tz: TimeZone>(days_ago: u32, reference: &DateTime<Tz>) -> Option<NaiveDate> {
    reference
        .date_naive()
        .checked_sub_days(Days::new(u64::from(days_ago)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
