//! Command-line front end for Profile Capture.
//!
//! Loads configuration, reads a saved profile page, runs extraction through
//! the core library and either previews the record or delivers it to the
//! configured webhook.

pub mod actions;
pub mod commands;
pub mod config;
pub mod delivery;
pub mod output;

pub use actions::{Action, ActionResponse};
pub use config::{Config, ConfigError};
pub use delivery::{DeliveryError, DeliveryOutcome, WebhookDelivery};
