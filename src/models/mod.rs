//! Model settings and profile resolution.
//!
//! This module handles:
//! - Edit-format presets for known models (`settings`)
//! - Pattern rules applied to unknown model names (`rules`)
//! - Building a fully configured runtime profile (`profile`)
//! - Suggesting close model names for typos (`matcher`)

pub mod matcher;
pub mod profile;
pub mod rules;
pub mod settings;

pub use matcher::fuzzy_match_models;
pub use profile::{
    ModelProfile, ModelResolver, ResolveError, ResolveOptions, WeakModel, WeakModelChoice,
};
pub use rules::ProfileDefaults;
pub use settings::{EditFormat, ModelSettings, SettingsError, SettingsRegistry};
