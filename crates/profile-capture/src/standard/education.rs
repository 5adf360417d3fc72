//! Education entries in the standard layout.

use super::{data_container, StandardSelectors};
use crate::diagnostics::{DiagnosticSink, Section, SkipReason};
use crate::page::{children_named, inner_text, next_element_sibling, nth_child_named};
use crate::record::{EducationEntry, Program};
use scraper::ElementRef;

/// Number of nested programs from which an entry is parsed as complex.
pub const COMPLEX_PROGRAM_THRESHOLD: usize = 2;

// ── Classification ───────────────────────────────────────────────────────────

/// Shape of a top-level education entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationShape {
    /// One degree at one institution.
    Simple,
    /// Several programs listed under one institution.
    Complex,
}

/// Count the `li` children of the first list inside the data container:
/// fewer than [`COMPLEX_PROGRAM_THRESHOLD`] is simple, otherwise complex.
pub fn classify_education(container: ElementRef<'_>, selectors: &StandardSelectors) -> EducationShape {
    let programs = container
        .select(&selectors.list)
        .next()
        .map(|list| children_named(list, "li").count())
        .unwrap_or(0);
    if programs >= COMPLEX_PROGRAM_THRESHOLD {
        EducationShape::Complex
    } else {
        EducationShape::Simple
    }
}

/// Parse one top-level list item of the education section.
///
/// A complex entry whose program structure cannot be located is re-parsed
/// with the simple rules, and the fallback is reported to the sink.
pub(crate) fn parse_education_entry(
    item: ElementRef<'_>,
    selectors: &StandardSelectors,
    sink: &dyn DiagnosticSink,
    index: usize,
) -> Result<EducationEntry, SkipReason> {
    let container = data_container(item, selectors)?;
    match classify_education(container, selectors) {
        EducationShape::Simple => parse_simple_education(container, selectors),
        EducationShape::Complex => parse_complex_education(container, selectors, sink, index)
            .or_else(|reason| {
                sink.fell_back(Section::Education, index, reason);
                parse_simple_education(container, selectors)
            }),
    }
}

// ── Simple entries ───────────────────────────────────────────────────────────

/// Single degree: university name from the details block, subject from the
/// first span of the block that follows it.
pub fn parse_simple_education(
    container: ElementRef<'_>,
    selectors: &StandardSelectors,
) -> Result<EducationEntry, SkipReason> {
    let details = container
        .select(&selectors.div)
        .next()
        .and_then(|outer| outer.select(&selectors.div).next())
        .ok_or(SkipReason::missing("details container"))?;

    let university = details
        .select(&selectors.div)
        .next()
        .and_then(|name| name.select(&selectors.span).next())
        .map(inner_text);
    let subject = next_element_sibling(details)
        .and_then(|sibling| children_named(sibling, "span").next())
        .map(inner_text);

    Ok(EducationEntry {
        university,
        subject,
        ..EducationEntry::default()
    })
}

// ── Complex entries ──────────────────────────────────────────────────────────

/// Several programs: the container splits into a university half (child
/// div 0) and a programs half (child div 1).
pub fn parse_complex_education(
    container: ElementRef<'_>,
    selectors: &StandardSelectors,
    sink: &dyn DiagnosticSink,
    index: usize,
) -> Result<EducationEntry, SkipReason> {
    let university_half =
        nth_child_named(container, "div", 0).ok_or(SkipReason::missing("university details"))?;
    let programs_half =
        nth_child_named(container, "div", 1).ok_or(SkipReason::missing("programs container"))?;
    let program_list = programs_half
        .select(&selectors.list)
        .next()
        .ok_or(SkipReason::missing("program list"))?;

    let university = university_half
        .select(&selectors.div)
        .next()
        .and_then(|name| name.select(&selectors.span).next())
        .map(inner_text);
    let subject = linked_text(university_half, selectors);

    let mut programs = Vec::new();
    for (program_index, item) in children_named(program_list, "li").enumerate() {
        match parse_program(item, selectors) {
            Ok(program) => programs.push(program),
            Err(reason) => sink.skipped(Section::Education, index, Some(program_index), reason),
        }
    }

    Ok(EducationEntry {
        university,
        subject,
        positions: Some(programs),
        ..EducationEntry::default()
    })
}

fn parse_program(item: ElementRef<'_>, selectors: &StandardSelectors) -> Result<Program, SkipReason> {
    let program = item
        .select(&selectors.div)
        .next()
        .and_then(|top| nth_child_named(top, "div", 1))
        .ok_or(SkipReason::missing("program data container"))?;

    Ok(Program {
        title: program
            .select(&selectors.div)
            .next()
            .and_then(|title| title.select(&selectors.span).next())
            .map(inner_text),
        duration: linked_text(program, selectors),
    })
}

/// Text of the first span inside the first `a > span` of `scope`.
fn linked_text(scope: ElementRef<'_>, selectors: &StandardSelectors) -> Option<String> {
    scope
        .select(&selectors.link_span)
        .next()
        .and_then(|outer| outer.select(&selectors.span).next())
        .map(inner_text)
}
