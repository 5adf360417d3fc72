//! Request/response contract between the front end and the worker.
//!
//! The front end asks either for the extracted record or for the record to
//! be delivered. Every answer is an [`ActionResponse`] with a `success` flag
//! and either a message or the record.

use crate::delivery::WebhookDelivery;
use profile_capture::{ExtractError, ProfileRecord};
use serde::{Deserialize, Serialize};
use tracing::error;

/// A request to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    GetProfileData,
    SendToZapier,
}

/// Answer to an [`Action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProfileRecord>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_data(record: ProfileRecord) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(record),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Hand back the extracted record.
pub fn get_profile_data(extraction: Result<ProfileRecord, ExtractError>) -> ActionResponse {
    match extraction {
        Ok(record) => ActionResponse::with_data(record),
        Err(e) => {
            error!(error = %e, "profile extraction failed");
            ActionResponse::failure(format!("Failed to extract profile data: {e}"))
        }
    }
}

/// Deliver the extracted record. Nothing is sent when extraction failed.
pub async fn send_to_zapier(
    extraction: Result<ProfileRecord, ExtractError>,
    delivery: &WebhookDelivery,
) -> ActionResponse {
    let record = match extraction {
        Ok(record) => record,
        Err(e) => {
            error!(error = %e, "profile extraction failed, nothing sent");
            return ActionResponse::failure(format!("Profile data extraction failed: {e}"));
        }
    };
    match delivery.deliver(&record).await {
        Ok(outcome) => ActionResponse::ok(outcome.message()),
        Err(e) => {
            error!(error = %e, "webhook delivery failed");
            ActionResponse::failure(e.to_string())
        }
    }
}

/// Run an action against an extraction result.
pub async fn respond(
    action: Action,
    extraction: Result<ProfileRecord, ExtractError>,
    delivery: &WebhookDelivery,
) -> ActionResponse {
    match action {
        Action::GetProfileData => get_profile_data(extraction),
        Action::SendToZapier => send_to_zapier(extraction, delivery).await,
    }
}
