//! Human-readable preview of a record before it is sent.

use crate::form::MAX_STARS;
use crate::record::ProfileRecord;
use serde::Serialize;

/// Label shown next to each star count, indexed by rating.
pub const RATING_LABELS: [&str; 6] = [
    "Click to rate",
    "Poor",
    "Fair",
    "Good",
    "Very Good",
    "Excellent",
];

const NOT_FOUND: &str = "Not found";

/// Label for a star rating. Ratings above the maximum use the top label.
pub fn rating_label(stars: u8) -> &'static str {
    RATING_LABELS[usize::from(stars.min(MAX_STARS))]
}

/// Filled stars for the rating followed by empty stars up to the maximum.
pub fn rating_stars(stars: u8) -> String {
    let filled = stars.min(MAX_STARS);
    let mut out = "★".repeat(usize::from(filled));
    out.push_str(&"☆".repeat(usize::from(MAX_STARS - filled)));
    out
}

/// One row of the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub label: &'static str,
    pub value: String,
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Preview rows in display order.
pub fn preview_lines(record: &ProfileRecord) -> Vec<PreviewLine> {
    let line = |label, value| PreviewLine { label, value };
    vec![
        line("Name", or_default(&record.person_name, NOT_FOUND)),
        line("Job Title", or_default(&record.job, NOT_FOUND)),
        line("Company", or_default(&record.company, NOT_FOUND)),
        line("List", or_default(&record.list, "Not selected")),
        line("Rating", rating_stars(record.rating)),
        line("Notes", or_default(&record.notes, "No notes")),
        line("Experience Count", record.experience.len().to_string()),
        line("Education Count", record.education.len().to_string()),
        line("LinkedIn URL", record.linkedin_url.clone()),
    ]
}
