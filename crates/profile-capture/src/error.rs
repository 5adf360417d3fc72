//! Error types for whole-page extraction.

use crate::dispatch::UrlRejection;
use thiserror::Error;

/// A failure that aborts extraction of a whole page.
///
/// Problems confined to one experience or education item never surface here;
/// those are reported through a [`DiagnosticSink`](crate::diagnostics::DiagnosticSink)
/// and the item is skipped.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A built-in selector failed to compile.
    #[error("invalid selector `{css}`: {message}")]
    Selector { css: &'static str, message: String },

    /// The caller supplied a star rating outside `0..=max`.
    #[error("rating must be between 0 and {max}, got {got}")]
    InvalidRating { got: u8, max: u8 },

    /// The page address does not belong to a supported profile layout.
    #[error(transparent)]
    UnsupportedPage(#[from] UrlRejection),
}
