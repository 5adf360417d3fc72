//! CLI subcommand implementations.

pub mod config_cmd;
pub mod preview;
pub mod send;

use crate::actions::ActionResponse;
use crate::output::{self, Styled};
use anyhow::{Context, Result};
use clap::Args;
use profile_capture::{FormMetadata, ProfilePage, MAX_STARS};
use std::io::Read;
use std::path::PathBuf;

/// Page snapshot and form metadata shared by `preview` and `send`.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Saved HTML of the profile page, or `-` to read stdin
    #[arg(long)]
    pub page: PathBuf,

    /// Address the page was saved from
    #[arg(long)]
    pub url: String,

    /// Target list for the profile
    #[arg(long, default_value = "")]
    pub list: String,

    /// Star rating, 0 to 5
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_STARS)))]
    pub stars: u8,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl PageArgs {
    pub fn form(&self) -> FormMetadata {
        FormMetadata {
            list: self.list.clone(),
            stars: self.stars,
            notes: self.notes.clone(),
        }
    }
}

/// Read and parse the page snapshot named by `args`.
pub fn load_page(args: &PageArgs) -> Result<ProfilePage> {
    let html = if args.page.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read page from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.page)
            .with_context(|| format!("failed to read page {}", args.page.display()))?
    };
    Ok(ProfilePage::parse(&html, args.url.clone()))
}

/// Print a message-style response and return whether it succeeded.
pub fn report(response: &ActionResponse) -> Result<bool> {
    if output::is_json() {
        output::print_json(&serde_json::to_value(response)?);
        return Ok(response.success);
    }

    let s = Styled::new();
    let msg = response.message.as_deref().unwrap_or_default();
    if response.success {
        if !output::is_quiet() {
            output::print_result(s.ok_sym(), &s.green(msg));
        }
    } else {
        output::print_result(s.fail_sym(), &s.red(msg));
    }
    Ok(response.success)
}
