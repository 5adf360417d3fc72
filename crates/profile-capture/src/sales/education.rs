//! Education history in the sales variant layout.

use super::SalesSelectors;
use crate::diagnostics::{DiagnosticSink, Section, SkipReason};
use crate::page::{closest, next_element_sibling, text_content, ProfilePage};
use crate::record::EducationEntry;
use scraper::ElementRef;

const DEGREE_HEADING: &str = "Degree name";
const FIELD_HEADING: &str = "Field of study";

/// One entry per school-name heading, in document order.
pub(crate) fn extract_entries(
    page: &ProfilePage,
    selectors: &SalesSelectors,
    sink: &dyn DiagnosticSink,
) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    for (index, school) in page.select_all(&selectors.school_name).into_iter().enumerate() {
        match parse_entry(school, selectors) {
            Ok(entry) if has_any_field(&entry) => entries.push(entry),
            Ok(_) => {}
            Err(reason) => sink.skipped(Section::Education, index, None, reason),
        }
    }
    entries
}

/// Gather the fields of the list item that encloses a school-name heading.
pub fn parse_entry(
    school: ElementRef<'_>,
    selectors: &SalesSelectors,
) -> Result<EducationEntry, SkipReason> {
    let item = closest(school, "li").ok_or(SkipReason::missing("education list item"))?;

    let mut subject = String::new();
    let mut field_of_study = String::new();
    // Headings are not nested in their paragraphs once parsed, so scan the item.
    for heading in item.select(&selectors.field_heading) {
        let label = text_content(heading);
        let value = || {
            next_element_sibling(heading)
                .map(|v| text_content(v).trim().to_string())
                .unwrap_or_default()
        };
        if label.contains(DEGREE_HEADING) {
            subject = value();
        } else if label.contains(FIELD_HEADING) {
            field_of_study = value();
        }
    }

    let dates = item
        .select(&selectors.dates)
        .next()
        .map(|d| text_content(d).trim().to_string())
        .unwrap_or_default();

    Ok(EducationEntry {
        university: Some(text_content(school).trim().to_string()),
        subject: Some(subject),
        field_of_study: Some(field_of_study),
        dates: Some(dates),
        positions: None,
    })
}

fn has_any_field(entry: &EducationEntry) -> bool {
    [
        &entry.university,
        &entry.subject,
        &entry.field_of_study,
        &entry.dates,
    ]
    .into_iter()
    .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
}
