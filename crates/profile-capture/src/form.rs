//! Caller-supplied form metadata and its validation rules.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest star rating a caller can give.
pub const MAX_STARS: u8 = 5;

/// Metadata the caller attaches to an extraction: which list the profile goes
/// to, a star rating and free-form notes. Passed through into the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub list: String,
    pub stars: u8,
    #[serde(default)]
    pub notes: String,
}

/// Reasons a form cannot be sent yet. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please select an Affinity list")]
    MissingList,
    #[error("Please provide a rating")]
    MissingRating,
}

impl FormMetadata {
    /// Reject ratings above [`MAX_STARS`].
    pub fn validate_rating(&self) -> Result<(), ExtractError> {
        if self.stars > MAX_STARS {
            return Err(ExtractError::InvalidRating {
                got: self.stars,
                max: MAX_STARS,
            });
        }
        Ok(())
    }

    /// Sending requires a chosen list and a rating of at least one star.
    /// Previewing has no such requirement.
    pub fn validate_for_send(&self) -> Result<(), FormError> {
        if self.list.is_empty() {
            return Err(FormError::MissingList);
        }
        if self.stars == 0 {
            return Err(FormError::MissingRating);
        }
        Ok(())
    }
}
