//! Profile Capture: turn rendered profile pages into structured records.
//!
//! A page snapshot is wrapped in a [`ProfilePage`] and handed to one of two
//! extraction engines: [`standard`] for public `/in/` profiles and [`sales`]
//! for sales lead pages. [`extract_profile`] picks the engine from the page
//! address. Items that cannot be parsed are skipped and reported to a
//! [`DiagnosticSink`]; only whole-page failures return [`ExtractError`].

pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod page;
pub mod preview;
pub mod record;
pub mod sales;
pub mod standard;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, MemorySink, Section, SkipReason, TracingSink};
pub use dispatch::{classify_profile_url, extract_profile, PageLayout, UrlRejection};
pub use error::ExtractError;
pub use form::{FormError, FormMetadata, MAX_STARS};
pub use page::ProfilePage;
pub use preview::{preview_lines, rating_label, rating_stars, PreviewLine};
pub use record::{EducationEntry, ExperienceEntry, Position, ProfileRecord, Program};
pub use sales::{extract_sales_navigator_profile_data, SalesVariantExtractor};
pub use standard::{extract_complete_profile_data, StandardProfileExtractor};
