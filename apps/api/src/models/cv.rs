#![allow(dead_code)]

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Education institutions share the company shape.
pub type Institution = Company;

/// Accepts either a full company object or a bare name.
fn company_or_name<'de, D>(deserializer: D) -> Result<Company, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Name(String),
        Full(Company),
    }

    Ok(match Wire::deserialize(deserializer)? {
        Wire::Name(name) => Company {
            name,
            ..Default::default()
        },
        Wire::Full(company) => company,
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default, deserialize_with = "period_bound")]
    pub start: Option<NaiveDate>,
    /// `None` means the position is current.
    #[serde(default, deserialize_with = "period_bound")]
    pub end: Option<NaiveDate>,
}

/// Parses one period bound. Upstream profiles send RFC 3339 timestamps, plain
/// ISO dates, month-year labels such as "May 2022", or "Present".
/// Anything unrecognised becomes `None`; no highlight path reads periods.
pub fn parse_period_bound(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("present") {
        return None;
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(&format!("1 {raw}"), "%d %B %Y").ok()
}

fn period_bound<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_period_bound))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub title: String,
    #[serde(deserialize_with = "company_or_name")]
    pub company: Company,
    /// Contracting company when the role was staffed through an agency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor: Option<Company>,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: Institution,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub coming_soon: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A complete profile as supplied by the upstream data provider.
/// The matcher only ever reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_experience: Vec<WorkEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub personal_values: Vec<String>,
}

/// Public summary of a profile shown in search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CvSearchResult {
    pub username: String,
    pub full_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&CvRecord> for CvSearchResult {
    fn from(cv: &CvRecord) -> Self {
        Self {
            username: cv.username.clone(),
            full_name: cv.full_name.clone(),
            title: cv.title.clone(),
            avatar: cv.avatar.clone(),
        }
    }
}
