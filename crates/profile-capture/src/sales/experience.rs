//! Work history in the sales variant layout.

use super::SalesSelectors;
use crate::page::{first_text, inner_text, ProfilePage};
use crate::record::{ExperienceEntry, Position};
use scraper::ElementRef;

/// Every experience container on the page, in document order. Entries
/// without a company or any position are dropped.
pub(crate) fn extract_entries(page: &ProfilePage, selectors: &SalesSelectors) -> Vec<ExperienceEntry> {
    page.select_all(&selectors.experience_entry)
        .into_iter()
        .map(|entry| parse_entry(entry, selectors))
        .filter(ExperienceEntry::has_signal)
        .collect()
}

/// Parse one experience container without applying the drop rule.
pub fn parse_entry(entry: ElementRef<'_>, selectors: &SalesSelectors) -> ExperienceEntry {
    let company = first_text(entry, &selectors.company_name).unwrap_or_default();
    let titles: Vec<String> = entry.select(&selectors.job_title).map(inner_text).collect();
    let durations: Vec<String> = entry.select(&selectors.duration).map(inner_text).collect();

    ExperienceEntry {
        company: Some(company),
        total_duration: None,
        positions: pair_positions(titles, &durations),
    }
}

/// Pair titles with durations by index. A title past the end of the
/// durations gets ""; durations past the end of the titles are ignored.
fn pair_positions(titles: Vec<String>, durations: &[String]) -> Vec<Position> {
    titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| (title, durations.get(i).cloned().unwrap_or_default()))
        .filter(|(title, duration)| !title.is_empty() || !duration.is_empty())
        .map(|(title, duration)| Position {
            title: Some(title),
            duration: Some(duration),
            ..Position::default()
        })
        .collect()
}
