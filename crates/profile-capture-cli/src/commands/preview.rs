//! `preview`: extract a saved page and show what would be sent.

use crate::actions;
use crate::commands::{load_page, report, PageArgs};
use crate::config::Config;
use crate::output::{self, Styled};
use anyhow::Result;
use profile_capture::{extract_profile, preview_lines, rating_label, Diagnostic, MemorySink};

pub fn run(args: &PageArgs, config: &Config) -> Result<bool> {
    let page = load_page(args)?;
    let sink = MemorySink::new();
    let response = actions::get_profile_data(extract_profile(&page, &args.form(), &sink));
    let diagnostics = sink.diagnostics();

    if output::is_json() {
        let mut value = serde_json::to_value(&response)?;
        if output::is_verbose() {
            value["diagnostics"] = serde_json::to_value(&diagnostics)?;
        }
        output::print_json(&value);
        return Ok(response.success);
    }

    let Some(record) = &response.data else {
        return report(&response);
    };

    let s = Styled::new();
    if !output::is_quiet() {
        output::print_header(&s, &config.app_name);
    }
    output::print_section(&s, "Profile");
    for line in preview_lines(record) {
        if line.label == "Rating" {
            let label = rating_label(record.rating);
            output::print_field(line.label, &format!("{} {}", line.value, s.dim(label)));
        } else {
            output::print_field(line.label, &line.value);
        }
    }

    if !diagnostics.is_empty() {
        eprintln!();
        output::print_result(
            s.warn_sym(),
            &s.yellow(&format!("{} item(s) skipped or parsed by fallback", diagnostics.len())),
        );
        if output::is_verbose() {
            for d in &diagnostics {
                output::print_field(&describe_location(d), &d.reason.to_string());
            }
        }
    }
    Ok(true)
}

fn describe_location(d: &Diagnostic) -> String {
    let section = serde_json::to_value(d.section)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    match d.item {
        Some(item) => format!("{section}[{}].{item}", d.entry),
        None => format!("{section}[{}]", d.entry),
    }
}
