//! Extraction engine for the standard profile layout.
//!
//! The standard layout carries no semantic attributes on the data we want.
//! Sections are found through id anchors, and fields are located by position
//! and utility class (`t-bold`, `t-14`, `t-black--light`). Every lookup is
//! therefore fallible. Each top-level entry is parsed into
//! `Result<_, SkipReason>`, and failures are reported to the diagnostics sink
//! instead of aborting the page.

pub mod education;
pub mod experience;

use crate::diagnostics::{DiagnosticSink, Section, SkipReason};
use crate::error::ExtractError;
use crate::form::FormMetadata;
use crate::page::{children_named, compile, inner_text, nth_child_named, ProfilePage};
use crate::record::{EducationEntry, ExperienceEntry, ProfileRecord};
use scraper::{ElementRef, Selector};
use tracing::{debug, info};

pub use education::{classify_education, EducationShape};
pub use experience::{classify_experience, split_company_line, ExperienceShape};

/// Anchor id preceding the experience section.
pub const EXPERIENCE_ANCHOR: &str = "experience";
/// Anchor id preceding the education section.
pub const EDUCATION_ANCHOR: &str = "education";
/// Anchor id preceding the about section.
pub const ABOUT_ANCHOR: &str = "about";

/// Compiled selectors used by the standard engine.
pub struct StandardSelectors {
    pub(crate) list: Selector,
    pub(crate) div: Selector,
    pub(crate) span: Selector,
    pub(crate) heading: Selector,
    /// Bolded title span; its presence inside a nested item marks a multi-role entry.
    pub(crate) bold_title: Selector,
    /// "Company · Employment type" line of a single-role entry.
    pub(crate) company_line: Selector,
    /// Light metadata spans: duration, then location.
    pub(crate) metadata: Selector,
    pub(crate) collapsed_text: Selector,
    pub(crate) group_company: Selector,
    pub(crate) group_duration: Selector,
    pub(crate) role_title: Selector,
    pub(crate) role_duration: Selector,
    pub(crate) link_span: Selector,
}

impl StandardSelectors {
    pub fn compile() -> Result<Self, ExtractError> {
        Ok(Self {
            list: compile("ul")?,
            div: compile("div")?,
            span: compile("span")?,
            heading: compile("h1")?,
            bold_title: compile(".t-bold span")?,
            company_line: compile("span.t-14.t-normal span")?,
            metadata: compile("span.t-14.t-normal.t-black--light span")?,
            collapsed_text: compile(".inline-show-more-text--is-collapsed")?,
            group_company: compile("a div span")?,
            group_duration: compile("span.t-14.t-normal")?,
            role_title: compile("div span")?,
            role_duration: compile("span.t-black--light span")?,
            link_span: compile("a > span")?,
        })
    }
}

/// Locate the data container of a top-level list item: the item's first
/// `div`, then that div's second child `div` (the first holds the logo).
pub(crate) fn data_container<'a>(
    item: ElementRef<'a>,
    selectors: &StandardSelectors,
) -> Result<ElementRef<'a>, SkipReason> {
    let top = item
        .select(&selectors.div)
        .next()
        .ok_or(SkipReason::missing("entry container"))?;
    nth_child_named(top, "div", 1).ok_or(SkipReason::missing("data container"))
}

/// Extractor for pages in the standard profile layout.
pub struct StandardProfileExtractor<'p> {
    page: &'p ProfilePage,
    selectors: StandardSelectors,
    sink: &'p dyn DiagnosticSink,
}

impl<'p> StandardProfileExtractor<'p> {
    pub fn new(page: &'p ProfilePage, sink: &'p dyn DiagnosticSink) -> Result<Self, ExtractError> {
        Ok(Self {
            page,
            selectors: StandardSelectors::compile()?,
            sink,
        })
    }

    /// Top-level list items of an anchored section, or `None` if the section
    /// or its list is absent.
    fn section_items(&self, anchor_id: &str) -> Option<Vec<ElementRef<'p>>> {
        let section = self.page.section_after_anchor(anchor_id)?;
        let list = section.select(&self.selectors.list).next()?;
        Some(children_named(list, "li").collect())
    }

    /// Work history, one entry per employer.
    ///
    /// A missing section yields an empty vector. Entries that cannot be parsed
    /// are reported to the sink and left out.
    pub fn extract_experience_data(&self) -> Vec<ExperienceEntry> {
        let Some(items) = self.section_items(EXPERIENCE_ANCHOR) else {
            debug!("no experience section on page");
            return Vec::new();
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match experience::parse_experience_entry(item, &self.selectors, self.sink, index) {
                Ok(entry) => entries.push(entry),
                Err(reason) => self.sink.skipped(Section::Experience, index, None, reason),
            }
        }
        debug!(count = entries.len(), "extracted experience entries");
        entries
    }

    /// Education history, one entry per institution.
    ///
    /// Same failure policy as [`extract_experience_data`](Self::extract_experience_data).
    pub fn extract_education_data(&self) -> Vec<EducationEntry> {
        let Some(items) = self.section_items(EDUCATION_ANCHOR) else {
            debug!("no education section on page");
            return Vec::new();
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match education::parse_education_entry(item, &self.selectors, self.sink, index) {
                Ok(entry) => entries.push(entry),
                Err(reason) => self.sink.skipped(Section::Education, index, None, reason),
            }
        }
        debug!(count = entries.len(), "extracted education entries");
        entries
    }

    /// Build the full record: name from the first `h1`, blurb from the about
    /// section, current company and job from the first experience entry.
    pub fn extract_complete_profile_data(
        &self,
        form: &FormMetadata,
    ) -> Result<ProfileRecord, ExtractError> {
        form.validate_rating()?;
        info!(url = self.page.url(), "extracting standard profile");

        let mut record = ProfileRecord::new(form, self.page.url());
        record.person_name = self
            .page
            .select_first(&self.selectors.heading)
            .map(inner_text)
            .unwrap_or_default();
        record.person_blurb = self
            .page
            .section_after_anchor(ABOUT_ANCHOR)
            .map(inner_text)
            .unwrap_or_default();
        record.experience = self.extract_experience_data();
        record.education = self.extract_education_data();

        if let Some(current) = record.experience.first() {
            record.company = current.company.clone().unwrap_or_default();
            record.job = current
                .positions
                .first()
                .and_then(|p| p.title.clone())
                .unwrap_or_default();
        }

        info!(
            experience = record.experience.len(),
            education = record.education.len(),
            "standard profile extracted"
        );
        Ok(record)
    }
}

/// Extract a full record from a standard-layout page.
pub fn extract_complete_profile_data(
    page: &ProfilePage,
    form: &FormMetadata,
    sink: &dyn DiagnosticSink,
) -> Result<ProfileRecord, ExtractError> {
    StandardProfileExtractor::new(page, sink)?.extract_complete_profile_data(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticKind, MemorySink, TracingSink};
    use crate::record::{Position, Program};

    const URL: &str = "https://www.linkedin.com/in/jane-doe";

    const PROFILE: &str = r#"
    <html><body><main>
      <section class="pv-top-card"><h1>  Jane   Doe </h1></section>

      <section>
        <div id="about" class="pv-profile-card__anchor"></div>
        <div class="pvs-header">About</div>
        <div class="display-flex"><span>Engineer who likes
          hard problems.</span></div>
      </section>

      <section>
        <div id="experience" class="pv-profile-card__anchor"></div>
        <div class="pvs-header">Experience</div>
        <div class="pvs-list__outer-container">
          <ul>
            <li class="artdeco-list__item">
              <div class="pvs-entity">
                <div class="logo"><a href="/company/acme"><img alt="Acme"></a></div>
                <div class="data">
                  <div class="head">
                    <div class="t-bold"><span>Staff Engineer</span></div>
                    <span class="t-14 t-normal"><span>Acme Corp · Full-time</span></span>
                    <span class="t-14 t-normal t-black--light"><span>Jan 2020 - Present · 4 yrs</span></span>
                    <span class="t-14 t-normal t-black--light"><span>Berlin, Germany</span></span>
                  </div>
                  <div class="pvs-entity__sub-components">
                    <ul><li><div class="inline-show-more-text--is-collapsed">Built the data platform.</div></li></ul>
                  </div>
                </div>
              </div>
            </li>
            <li class="artdeco-list__item">
              <div class="pvs-entity">
                <div class="logo"></div>
                <div class="data">
                  <a href="/company/globex">
                    <div class="t-bold"><span>Globex</span></div>
                    <span class="t-14 t-normal"><span>6 yrs</span></span>
                  </a>
                  <div class="pvs-entity__sub-components">
                    <ul>
                      <li>
                        <div class="pvs-entity">
                          <div class="logo"></div>
                          <div class="role">
                            <div class="t-bold"><span>Director</span></div>
                            <span class="t-14 t-normal t-black--light"><span>2021 - 2023</span></span>
                            <div class="inline-show-more-text--is-collapsed">Ran the org.</div>
                          </div>
                        </div>
                      </li>
                      <li>
                        <div class="pvs-entity">
                          <div class="logo"></div>
                          <div class="role">
                            <div class="t-bold"><span>Manager</span></div>
                            <span class="t-14 t-normal t-black--light"><span>2017 - 2021</span></span>
                          </div>
                        </div>
                      </li>
                    </ul>
                  </div>
                </div>
              </div>
            </li>
            <li class="artdeco-list__item"><span>broken entry</span></li>
          </ul>
        </div>
      </section>

      <section>
        <div id="education" class="pv-profile-card__anchor"></div>
        <div class="pvs-header">Education</div>
        <div class="pvs-list__outer-container">
          <ul>
            <li>
              <div class="pvs-entity">
                <div class="logo"></div>
                <div class="data">
                  <div class="link">
                    <div class="details"><div class="t-bold"><span>MIT</span></div></div>
                    <span class="t-14 t-normal"><span>BSc, Computer Science</span><span class="visually-hidden">BSc</span></span>
                  </div>
                </div>
              </div>
            </li>
            <li>
              <div class="pvs-entity">
                <div class="logo"></div>
                <div class="data">
                  <div class="school">
                    <div class="t-bold"><span>Stanford University</span></div>
                    <a href="/school/stanford"><span class="t-14"><span>Graduate School of Business</span></span></a>
                  </div>
                  <div class="programs">
                    <ul>
                      <li><div class="pvs-entity"><div class="logo"></div><div class="program">
                        <div class="t-bold"><span>MBA</span></div>
                        <a href="/details"><span class="t-14"><span>2015 - 2017</span></span></a>
                      </div></div></li>
                      <li><div class="pvs-entity"><div class="logo"></div><div class="program">
                        <div class="t-bold"><span>MS, Statistics</span></div>
                        <a href="/details"><span class="t-14"><span>2013 - 2015</span></span></a>
                      </div></div></li>
                    </ul>
                  </div>
                </div>
              </div>
            </li>
          </ul>
        </div>
      </section>
    </main></body></html>
    "#;

    fn form() -> FormMetadata {
        FormMetadata {
            list: "Founders".to_string(),
            stars: 4,
            notes: "intro via Sam".to_string(),
        }
    }

    #[test]
    fn test_extract_experience_data() {
        let page = ProfilePage::parse(PROFILE, URL);
        let sink = MemorySink::new();
        let extractor = StandardProfileExtractor::new(&page, &sink).unwrap();
        let experience = extractor.extract_experience_data();

        assert_eq!(experience.len(), 2);
        assert_eq!(
            experience[0],
            ExperienceEntry {
                company: Some("Acme Corp".to_string()),
                total_duration: None,
                positions: vec![Position {
                    title: Some("Staff Engineer".to_string()),
                    employment_type: Some("Full-time".to_string()),
                    duration: Some("Jan 2020 - Present · 4 yrs".to_string()),
                    location: Some("Berlin, Germany".to_string()),
                    description: Some("Built the data platform.".to_string()),
                }],
            }
        );

        let globex = &experience[1];
        assert_eq!(globex.company.as_deref(), Some("Globex"));
        assert_eq!(globex.total_duration.as_deref(), Some("6 yrs"));
        assert_eq!(globex.positions.len(), 2);
        assert_eq!(globex.positions[0].title.as_deref(), Some("Director"));
        assert_eq!(globex.positions[0].duration.as_deref(), Some("2021 - 2023"));
        assert_eq!(globex.positions[0].description.as_deref(), Some("Ran the org."));
        assert_eq!(globex.positions[1].title.as_deref(), Some("Manager"));
        assert!(globex.positions[1].description.is_none());

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].section, Section::Experience);
        assert_eq!(diagnostics[0].entry, 2);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Skipped);
        assert_eq!(diagnostics[0].reason, SkipReason::missing("entry container"));
    }

    #[test]
    fn test_extract_education_data() {
        let page = ProfilePage::parse(PROFILE, URL);
        let extractor = StandardProfileExtractor::new(&page, &TracingSink).unwrap();
        let education = extractor.extract_education_data();

        assert_eq!(education.len(), 2);
        assert_eq!(
            education[0],
            EducationEntry {
                university: Some("MIT".to_string()),
                subject: Some("BSc, Computer Science".to_string()),
                ..EducationEntry::default()
            }
        );
        assert_eq!(
            education[1],
            EducationEntry {
                university: Some("Stanford University".to_string()),
                subject: Some("Graduate School of Business".to_string()),
                positions: Some(vec![
                    Program {
                        title: Some("MBA".to_string()),
                        duration: Some("2015 - 2017".to_string()),
                    },
                    Program {
                        title: Some("MS, Statistics".to_string()),
                        duration: Some("2013 - 2015".to_string()),
                    },
                ]),
                ..EducationEntry::default()
            }
        );
    }

    #[test]
    fn test_extract_complete_profile_data() {
        let page = ProfilePage::parse(PROFILE, URL);
        let record = extract_complete_profile_data(&page, &form(), &TracingSink).unwrap();

        assert_eq!(record.person_name, "Jane Doe");
        assert_eq!(record.person_blurb, "Engineer who likes hard problems.");
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.job, "Staff Engineer");
        assert_eq!(record.email, "");
        assert_eq!(record.linkedin_url, URL);
        assert_eq!(record.list, "Founders");
        assert_eq!(record.rating, 4);
        assert_eq!(record.notes, "intro via Sam");
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.education.len(), 2);
    }

    #[test]
    fn test_missing_sections_yield_empty() {
        let page = ProfilePage::parse("<html><body><p>nothing here</p></body></html>", URL);
        let extractor = StandardProfileExtractor::new(&page, &TracingSink).unwrap();
        assert!(extractor.extract_experience_data().is_empty());
        assert!(extractor.extract_education_data().is_empty());

        let record = extractor.extract_complete_profile_data(&form()).unwrap();
        assert_eq!(record.person_name, "");
        assert_eq!(record.person_blurb, "");
        assert_eq!(record.company, "");
        assert_eq!(record.job, "");
        assert_eq!(record.linkedin_url, URL);
    }

    #[test]
    fn test_section_without_list_yields_empty() {
        let html = r#"<div id="experience"></div><div>Experience</div><div><p>none</p></div>"#;
        let page = ProfilePage::parse(html, URL);
        let extractor = StandardProfileExtractor::new(&page, &TracingSink).unwrap();
        assert!(extractor.extract_experience_data().is_empty());
    }

    #[test]
    fn test_invalid_rating_fails_whole_extraction() {
        let page = ProfilePage::parse(PROFILE, URL);
        let mut bad = form();
        bad.stars = 9;
        let err = extract_complete_profile_data(&page, &bad, &TracingSink).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidRating { got: 9, .. }));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let page = ProfilePage::parse(PROFILE, URL);
        let first = extract_complete_profile_data(&page, &form(), &TracingSink).unwrap();
        let second = extract_complete_profile_data(&page, &form(), &TracingSink).unwrap();
        assert_eq!(first, second);
    }
}
