//! Route a profile page to the engine for its layout.

use crate::diagnostics::DiagnosticSink;
use crate::error::ExtractError;
use crate::form::FormMetadata;
use crate::page::ProfilePage;
use crate::record::ProfileRecord;
use crate::{sales, standard};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

const SITE_DOMAIN: &str = "linkedin.com";

/// Which markup family a profile page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLayout {
    /// Public profile at `/in/<handle>`.
    Standard,
    /// Sales lead page at `/sales/lead/…` or `/sales/people/…`.
    SalesVariant,
}

/// Why a page address was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error("Please navigate to a LinkedIn profile page")]
    NotLinkedIn,
    #[error("Please navigate to a LinkedIn profile page (not feed, search, or company page)")]
    NotAProfile,
}

/// Classify a page address into a layout.
pub fn classify_profile_url(address: &str) -> Result<PageLayout, UrlRejection> {
    let url = Url::parse(address).map_err(|_| UrlRejection::NotLinkedIn)?;
    let host = url.host_str().unwrap_or_default().to_lowercase();
    let on_site = host == SITE_DOMAIN || host.ends_with(&format!(".{SITE_DOMAIN}"));
    if !on_site {
        return Err(UrlRejection::NotLinkedIn);
    }

    let path = url.path();
    if path.contains("/sales/lead/") || path.contains("/sales/people/") {
        return Ok(PageLayout::SalesVariant);
    }
    if path.contains("/in/") {
        return Ok(PageLayout::Standard);
    }
    Err(UrlRejection::NotAProfile)
}

/// Classify the page by its address and run the matching engine.
pub fn extract_profile(
    page: &ProfilePage,
    form: &FormMetadata,
    sink: &dyn DiagnosticSink,
) -> Result<ProfileRecord, ExtractError> {
    let layout = classify_profile_url(page.url())?;
    debug!(?layout, url = page.url(), "dispatching profile page");
    match layout {
        PageLayout::Standard => standard::extract_complete_profile_data(page, form, sink),
        PageLayout::SalesVariant => sales::extract_sales_navigator_profile_data(page, form, sink),
    }
}
