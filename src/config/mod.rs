//! Link settings loading and validation.
//!
//! This module is split into logical submodules:
//! - [`types`]: the settings record ([`LinkSettings`]) and file loading
//! - [`defaults`]: serde default values
//! - [`validation`]: startup checks collecting every problem at once

mod defaults;
pub(crate) mod types;
mod validation;

pub use types::LinkSettings;
pub use validation::validate;
