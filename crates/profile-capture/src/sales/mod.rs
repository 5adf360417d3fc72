//! Extraction engine for the sales variant layout.
//!
//! The variant layout marks profile data with `data-anonymize` attributes,
//! so most fields are read from one attributed element each. Work history and
//! education still need some structure walking, done in the submodules.

pub mod education;
pub mod experience;

use crate::diagnostics::DiagnosticSink;
use crate::error::ExtractError;
use crate::form::FormMetadata;
use crate::page::{compile, text_content, ProfilePage};
use crate::record::{EducationEntry, ExperienceEntry, ProfileRecord};
use scraper::Selector;
use tracing::{debug, info};

/// Compiled selectors used by the sales variant engine.
pub struct SalesSelectors {
    pub(crate) person_name: Selector,
    pub(crate) job_title: Selector,
    pub(crate) company_name: Selector,
    pub(crate) email: Selector,
    pub(crate) person_blurb: Selector,
    pub(crate) experience_entry: Selector,
    pub(crate) duration: Selector,
    pub(crate) school_name: Selector,
    pub(crate) field_heading: Selector,
    pub(crate) dates: Selector,
}

impl SalesSelectors {
    pub fn compile() -> Result<Self, ExtractError> {
        Ok(Self {
            person_name: compile(r#"[data-anonymize="person-name"]"#)?,
            job_title: compile(r#"[data-anonymize="job-title"]"#)?,
            company_name: compile(r#"[data-anonymize="company-name"]"#)?,
            email: compile(r#"[data-anonymize="email"]"#)?,
            person_blurb: compile(r#"[data-anonymize="person-blurb"]"#)?,
            experience_entry: compile("._experience-entry_1irc72")?,
            duration: compile(".duration")?,
            school_name: compile(r#"h3[data-anonymize="education-name"]"#)?,
            field_heading: compile("h4")?,
            dates: compile(
                "p._bodyText_1e5nen._default_1i6ulk._sizeXSmall_1e5nen._lowEmphasis_1i6ulk > span + span",
            )?,
        })
    }
}

/// Extractor for pages in the sales variant layout.
pub struct SalesVariantExtractor<'p> {
    page: &'p ProfilePage,
    selectors: SalesSelectors,
    sink: &'p dyn DiagnosticSink,
}

impl<'p> SalesVariantExtractor<'p> {
    pub fn new(page: &'p ProfilePage, sink: &'p dyn DiagnosticSink) -> Result<Self, ExtractError> {
        Ok(Self {
            page,
            selectors: SalesSelectors::compile()?,
            sink,
        })
    }

    /// Trimmed text of the first element matching `selector`, or "".
    fn attributed_text(&self, selector: &Selector) -> String {
        self.page
            .select_first(selector)
            .map(|el| text_content(el).trim().to_string())
            .unwrap_or_default()
    }

    /// Work history. Entries with neither a company nor a position are dropped.
    pub fn extract_sales_navigator_experience_data(&self) -> Vec<ExperienceEntry> {
        let entries = experience::extract_entries(self.page, &self.selectors);
        debug!(count = entries.len(), "extracted sales experience entries");
        entries
    }

    /// Education history. Entries with no school, degree, field or dates are dropped.
    pub fn extract_sales_navigator_education_data(&self) -> Vec<EducationEntry> {
        let entries = education::extract_entries(self.page, &self.selectors, self.sink);
        debug!(count = entries.len(), "extracted sales education entries");
        entries
    }

    /// Build the full record. Name, job, company, email and blurb come
    /// straight from their attributed elements and default to "".
    pub fn extract_sales_navigator_profile_data(
        &self,
        form: &FormMetadata,
    ) -> Result<ProfileRecord, ExtractError> {
        form.validate_rating()?;
        info!(url = self.page.url(), "extracting sales profile");

        let mut record = ProfileRecord::new(form, self.page.url());
        record.person_name = self.attributed_text(&self.selectors.person_name);
        record.job = self.attributed_text(&self.selectors.job_title);
        record.company = self.attributed_text(&self.selectors.company_name);
        record.email = self.attributed_text(&self.selectors.email);
        record.person_blurb = self.attributed_text(&self.selectors.person_blurb);
        record.experience = self.extract_sales_navigator_experience_data();
        record.education = self.extract_sales_navigator_education_data();

        info!(
            experience = record.experience.len(),
            education = record.education.len(),
            "sales profile extracted"
        );
        Ok(record)
    }
}

/// Extract a full record from a sales variant page.
pub fn extract_sales_navigator_profile_data(
    page: &ProfilePage,
    form: &FormMetadata,
    sink: &dyn DiagnosticSink,
) -> Result<ProfileRecord, ExtractError> {
    SalesVariantExtractor::new(page, sink)?.extract_sales_navigator_profile_data(form)
}
