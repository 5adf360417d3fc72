//! Normalized profile record produced by both extraction engines.
//!
//! Field names serialize in camelCase; this JSON shape is the webhook
//! payload. Optional fields that were never located are omitted rather than
//! written as `null`.

use crate::form::FormMetadata;
use serde::{Deserialize, Serialize};

/// A complete extracted profile plus the caller's form metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    /// Target list chosen by the caller.
    pub list: String,
    /// Star rating chosen by the caller (0–5).
    pub rating: u8,
    /// Free-form notes from the caller.
    pub notes: String,
    pub person_blurb: String,
    pub person_name: String,
    /// Only the sales layout exposes an email address.
    pub email: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub company: String,
    pub job: String,
    /// Address of the page the record was extracted from.
    pub linkedin_url: String,
}

impl ProfileRecord {
    /// An empty record carrying the caller's metadata and the page address.
    pub fn new(form: &FormMetadata, url: &str) -> Self {
        Self {
            list: form.list.clone(),
            rating: form.stars,
            notes: form.notes.clone(),
            linkedin_url: url.to_string(),
            ..Self::default()
        }
    }
}

/// One employer in the work history, with one or more positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Aggregate tenure, present only for stacked multi-role entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<String>,
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl ExperienceEntry {
    /// Whether the entry carries a non-empty company or any position.
    pub fn has_signal(&self) -> bool {
        self.company.as_deref().is_some_and(|c| !c.is_empty()) || !self.positions.is_empty()
    }
}

/// A single role held at an employer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One institution in the education history.
///
/// Standard-layout entries set `university` and `subject`, plus `positions`
/// when the institution lists several programs. Sales-layout entries set
/// `university`, `subject`, `field_of_study` and `dates` and never `positions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<Program>>,
}

/// One program or degree within a multi-program education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}
