//! Experience entries in the standard layout.
//!
//! An entry is either a single role (one employer, one position) or a stacked
//! group of roles under one employer. [`classify_experience`] decides which,
//! and [`parse_experience_entry`] maps the shape to its parser.

use super::{data_container, StandardSelectors};
use crate::diagnostics::{DiagnosticSink, Section, SkipReason};
use crate::page::{children_named, first_text, has_class_between, inner_text, nth_child_named};
use crate::record::{ExperienceEntry, Position};
use scraper::ElementRef;

/// Separator between company name and employment type ("Acme · Full-time").
pub const COMPANY_SEPARATOR: char = '\u{b7}';

/// Index of the duration span among the light metadata spans.
pub const METADATA_DURATION_INDEX: usize = 0;
/// Index of the location span among the light metadata spans.
pub const METADATA_LOCATION_INDEX: usize = 1;

/// Wrapper class around nested sub-components of an entry.
const SUB_COMPONENTS_CLASS: &str = "pvs-entity__sub-components";

// ── Classification ───────────────────────────────────────────────────────────

/// Shape of a top-level experience entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceShape {
    SingleRole,
    MultiRole,
}

/// Where a collapsed "show more" description may live, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescriptionRule {
    /// Anywhere under the scope; the first block in document order.
    Anywhere,
    /// Inside the sub-components wrapper.
    SubComponents,
}

const DESCRIPTION_RULES: [DescriptionRule; 2] =
    [DescriptionRule::Anywhere, DescriptionRule::SubComponents];

impl DescriptionRule {
    fn accepts(self, block: ElementRef<'_>, scope: ElementRef<'_>) -> bool {
        match self {
            Self::Anywhere => true,
            Self::SubComponents => has_class_between(block, scope, SUB_COMPONENTS_CLASS),
        }
    }
}

/// Nested role items: the `li` children of the first `div > ul` chain
/// directly below the data container.
fn role_items<'a>(container: ElementRef<'a>) -> Option<Vec<ElementRef<'a>>> {
    children_named(container, "div")
        .find_map(|div| nth_child_named(div, "ul", 0))
        .map(|list| children_named(list, "li").collect())
}

/// An entry is multi-role iff at least one nested role item contains a
/// bolded title span. No nested items, or none with a bold title, means
/// single-role.
pub fn classify_experience(container: ElementRef<'_>, selectors: &StandardSelectors) -> ExperienceShape {
    let has_bold_role = role_items(container).is_some_and(|items| {
        items
            .iter()
            .any(|item| item.select(&selectors.bold_title).next().is_some())
    });
    if has_bold_role {
        ExperienceShape::MultiRole
    } else {
        ExperienceShape::SingleRole
    }
}

/// Parse one top-level list item of the experience section.
pub(crate) fn parse_experience_entry(
    item: ElementRef<'_>,
    selectors: &StandardSelectors,
    sink: &dyn DiagnosticSink,
    index: usize,
) -> Result<ExperienceEntry, SkipReason> {
    let container = data_container(item, selectors)?;
    match classify_experience(container, selectors) {
        ExperienceShape::SingleRole => Ok(parse_single_role_experience(container, selectors)),
        ExperienceShape::MultiRole => parse_multi_role_experience(container, selectors, sink, index),
    }
}

// ── Single-role entries ──────────────────────────────────────────────────────

/// Split a "Company · Employment type" line.
///
/// Two parts give company and employment type. A single part that differs
/// from the title is the company alone. Anything else yields neither.
pub fn split_company_line(line: &str, title: Option<&str>) -> (Option<String>, Option<String>) {
    let parts: Vec<&str> = line.split(COMPANY_SEPARATOR).map(str::trim).collect();
    match parts.as_slice() {
        [company, kind] => (Some(company.to_string()), Some(kind.to_string())),
        [company] if Some(*company) != title => (Some(company.to_string()), None),
        _ => (None, None),
    }
}

/// First collapsed description under `scope`, trying each rule in order.
fn find_description(scope: ElementRef<'_>, selectors: &StandardSelectors) -> Option<String> {
    let blocks: Vec<ElementRef<'_>> = scope.select(&selectors.collapsed_text).collect();
    DESCRIPTION_RULES.iter().find_map(|rule| {
        blocks
            .iter()
            .find(|block| rule.accepts(**block, scope))
            .map(|block| inner_text(*block))
    })
}

/// One employer, one position. Always yields exactly one position, even when
/// none of its fields could be located.
pub fn parse_single_role_experience(
    container: ElementRef<'_>,
    selectors: &StandardSelectors,
) -> ExperienceEntry {
    let mut entry = ExperienceEntry::default();
    let mut position = Position {
        title: first_text(container, &selectors.bold_title),
        ..Position::default()
    };

    if let Some(line) = first_text(container, &selectors.company_line) {
        let (company, employment_type) = split_company_line(&line, position.title.as_deref());
        entry.company = company;
        position.employment_type = employment_type;
    }

    let metadata: Vec<ElementRef<'_>> = container.select(&selectors.metadata).collect();
    position.duration = metadata.get(METADATA_DURATION_INDEX).map(|el| inner_text(*el));
    position.location = metadata.get(METADATA_LOCATION_INDEX).map(|el| inner_text(*el));
    position.description = find_description(container, selectors);

    entry.positions = vec![position];
    entry
}

// ── Multi-role entries ───────────────────────────────────────────────────────

/// Several positions stacked under one employer.
///
/// Fails only when the nested role list is missing altogether. Role items
/// whose data container cannot be found are reported and left out.
pub fn parse_multi_role_experience(
    container: ElementRef<'_>,
    selectors: &StandardSelectors,
    sink: &dyn DiagnosticSink,
    index: usize,
) -> Result<ExperienceEntry, SkipReason> {
    let mut entry = ExperienceEntry {
        company: first_text(container, &selectors.group_company),
        total_duration: first_text(container, &selectors.group_duration).filter(|d| !d.is_empty()),
        positions: Vec::new(),
    };

    let items = role_items(container).ok_or(SkipReason::missing("role list"))?;
    for (role_index, item) in items.into_iter().enumerate() {
        match parse_role(item, selectors) {
            Ok(position) => entry.positions.push(position),
            Err(reason) => sink.skipped(Section::Experience, index, Some(role_index), reason),
        }
    }
    Ok(entry)
}

fn parse_role(item: ElementRef<'_>, selectors: &StandardSelectors) -> Result<Position, SkipReason> {
    let role = item
        .select(&selectors.div)
        .next()
        .and_then(|top| nth_child_named(top, "div", 1))
        .ok_or(SkipReason::missing("role data container"))?;

    Ok(Position {
        title: first_text(role, &selectors.role_title),
        duration: first_text(role, &selectors.role_duration),
        description: find_description(item, selectors),
        ..Position::default()
    })
}
