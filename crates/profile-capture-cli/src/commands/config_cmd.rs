//! `config`: show the effective configuration.

use crate::config::{default_config_path, Config};
use crate::output::{self, Styled};
use anyhow::Result;

pub fn run(config: &Config) -> Result<bool> {
    let webhook = config.redacted_webhook();
    let path = default_config_path();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "app_name": config.app_name,
            "webhook_url": webhook,
            "debug_mode": config.debug_mode,
            "timeout_secs": config.timeout_secs,
            "config_file": path.display().to_string(),
        }));
        return Ok(true);
    }

    let s = Styled::new();
    if !output::is_quiet() {
        output::print_header(&s, &config.app_name);
    }
    output::print_section(&s, "Configuration");
    match &webhook {
        Some(url) => output::print_field("Webhook", url),
        None => output::print_field("Webhook", &s.yellow("not configured")),
    }
    output::print_field("Debug mode", if config.debug_mode { "on" } else { "off" });
    output::print_field("Timeout", &format!("{}s", config.timeout_secs));
    let file_note = if path.exists() { "" } else { " (not found)" };
    output::print_field(
        "Config file",
        &s.dim(&format!("{}{file_note}", path.display())),
    );
    Ok(true)
}
