//! `send`: extract a saved page and deliver the record to the webhook.

use crate::actions::{self, ActionResponse};
use crate::commands::{load_page, report, PageArgs};
use crate::config::Config;
use crate::delivery::WebhookDelivery;
use anyhow::{Context, Result};
use profile_capture::{extract_profile, TracingSink};
use tracing::info;

pub async fn run(args: &PageArgs, config: &Config) -> Result<bool> {
    let form = args.form();
    if let Err(e) = form.validate_for_send() {
        return report(&ActionResponse::failure(e.to_string()));
    }

    // The parsed page is dropped before the request is awaited.
    let extraction = {
        let page = load_page(args)?;
        extract_profile(&page, &form, &TracingSink)
    };

    let delivery = WebhookDelivery::from_config(config).context("failed to set up webhook client")?;
    info!(list = %form.list, stars = form.stars, "sending profile");
    let response = actions::send_to_zapier(extraction, &delivery).await;
    report(&response)
}
