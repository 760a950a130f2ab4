use chrono::NaiveDate;
use serde::Serialize;

/// Marker written for optional fields the listing does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column order of the exported table.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "Job Title",
    "Company Name",
    "Location",
    "Salary",
    "Recruiter",
    "Job URL",
    "Description",
    "Date Posted",
];

/// One job posting, fully resolved at extraction time.
///
/// Field order matters: serialization follows it and must line up with
/// [`EXPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(skip)]
    pub salary_raw: String,
    #[serde(rename = "Salary")]
    pub salary_normalized: String,
    #[serde(rename = "Recruiter")]
    pub recruiter: String,
    #[serde(rename = "Job URL")]
    pub url: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(skip)]
    pub days_ago_raw: String,
    #[serde(rename = "Date Posted")]
    pub date_posted: NaiveDate,
}
