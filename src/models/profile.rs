//! Resolved runtime profiles.
//!
//! `ModelResolver` turns a model name into a `ModelProfile`: it checks the
//! environment, pulls catalog metadata, applies the preset registry and the
//! name-rule cascade, and resolves the weak-model link. Profiles are built
//! once per request and treated as read-only afterwards.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::providers::{EnvironmentValidator, ModelCatalog, ModelInfo, TokenEncoder};
use crate::tokens;

use super::matcher::fuzzy_match_models;
use super::rules::{self, ProfileDefaults};
use super::settings::{EditFormat, SettingsRegistry};

/// Metadata threshold above which the chat history budget doubles.
const LARGE_CONTEXT_TOKENS: u64 = 32 * 1024;

fn suggestion_lines(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let mut out = String::from(", did you mean one of these?");
    for name in suggestions {
        out.push_str("\n- ");
        out.push_str(name);
    }
    out
}

/// Errors raised while resolving a model profile.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Required credentials are absent. Recoverable by setting the
    /// listed environment variables.
    #[error("to use model {model}, set these environment variables: {}", .missing.join(", "))]
    EnvironmentMissing { model: String, missing: Vec<String> },
    /// No metadata is available for the model.
    #[error("unknown model {model}{}", suggestion_lines(.suggestions))]
    ModelInfoUnavailable {
        model: String,
        suggestions: Vec<String>,
    },
}

/// Ownership of the weak-model link.
///
/// The self-reference case is explicit rather than an aliased pointer so
/// that "a model is its own weak model" never needs identity comparison.
#[derive(Debug, Clone)]
pub enum WeakModel {
    /// Caller disabled weak-model resolution
    Disabled,
    /// The profile is its own weak model
    SelfReference,
    /// A separately resolved profile, owned by its parent
    Distinct(Box<ModelProfile>),
}

/// Fully configured runtime profile for one model.
#[derive(Debug, Clone)]
pub struct ModelProfile {
    pub name: String,
    pub edit_format: EditFormat,
    pub use_repo_map: bool,
    pub send_undo_reply: bool,
    pub accepts_images: bool,
    pub weak_model_name: Option<String>,
    /// Coarse two-tier chat history budget, 1024 or 2048
    pub max_chat_history_tokens: usize,
    /// Provider metadata as reported by the catalog
    pub info: ModelInfo,
    pub weak_model: WeakModel,
}

impl ModelProfile {
    /// The profile to use for auxiliary tasks, if weak models are enabled.
    pub fn weak_model(&self) -> Option<&ModelProfile> {
        match &self.weak_model {
            WeakModel::Disabled => None,
            WeakModel::SelfReference => Some(self),
            WeakModel::Distinct(profile) => Some(profile),
        }
    }

    /// Token count for a plain string.
    pub fn token_count(&self, encoder: &dyn TokenEncoder, text: &str) -> usize {
        tokens::token_count(encoder, &self.name, text)
    }

    /// Token count for a message list, serialized to JSON first.
    pub fn token_count_messages(
        &self,
        encoder: &dyn TokenEncoder,
        messages: &[Value],
    ) -> serde_json::Result<usize> {
        tokens::token_count_messages(encoder, &self.name, messages)
    }

    /// Token cost of attaching the image at `path`, assuming high detail.
    pub fn token_count_for_image(&self, path: &Path) -> Result<u32, image::ImageError> {
        tokens::token_count_for_image(path)
    }
}

impl std::fmt::Display for ModelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Weak-model selection passed by the caller.
#[derive(Debug, Clone, Default)]
pub enum WeakModelChoice {
    /// Use the preset's weak model, or fall back to a self-reference
    #[default]
    Default,
    /// Do not resolve a weak model at all
    Disabled,
    /// Override the preset's weak-model name
    Named(String),
}

/// Flags controlling one resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub weak_model: WeakModelChoice,
    /// Fail when the catalog has no metadata for the model
    pub require_model_info: bool,
    /// Fail when required credentials are absent
    pub validate_environment: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            weak_model: WeakModelChoice::Default,
            require_model_info: true,
            validate_environment: true,
        }
    }
}

/// Builds `ModelProfile`s from a settings registry and external providers.
pub struct ModelResolver<'a> {
    registry: &'a SettingsRegistry,
    catalog: &'a dyn ModelCatalog,
    env: &'a dyn EnvironmentValidator,
    defaults: ProfileDefaults,
}

impl<'a> ModelResolver<'a> {
    pub fn new(
        registry: &'a SettingsRegistry,
        catalog: &'a dyn ModelCatalog,
        env: &'a dyn EnvironmentValidator,
    ) -> Self {
        Self {
            registry,
            catalog,
            env,
            defaults: ProfileDefaults::default(),
        }
    }

    /// Replace the default field values applied before preset/rule matching.
    pub fn with_defaults(mut self, defaults: ProfileDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolve a fully configured profile for `name`.
    pub fn resolve(&self, name: &str, opts: &ResolveOptions) -> Result<ModelProfile, ResolveError> {
        // 1. credentials
        let report = self.env.validate(name);
        if !report.missing_keys.is_empty() {
            if opts.validate_environment {
                return Err(ResolveError::EnvironmentMissing {
                    model: name.to_string(),
                    missing: report.missing_keys,
                });
            }
            debug!(model = name, "skipping environment validation");
        } else if !report.keys_in_environment {
            warn!(
                model = name,
                "unable to check environment variables for model"
            );
        }

        // 2. metadata
        let info = match self.catalog.model_info(name) {
            Some(info) => info.clone(),
            None => {
                if opts.require_model_info {
                    return Err(ResolveError::ModelInfoUnavailable {
                        model: name.to_string(),
                        suggestions: fuzzy_match_models(name, self.catalog),
                    });
                }
                ModelInfo::new()
            }
        };

        let mut profile = ModelProfile {
            name: name.to_string(),
            edit_format: self.defaults.edit_format,
            use_repo_map: self.defaults.use_repo_map,
            send_undo_reply: self.defaults.send_undo_reply,
            accepts_images: self.defaults.accepts_images,
            weak_model_name: self.defaults.weak_model_name.clone(),
            max_chat_history_tokens: self.defaults.max_chat_history_tokens,
            info,
            weak_model: WeakModel::Disabled,
        };

        // 3. chat history budget, two coarse tiers
        let max_input_tokens = profile
            .info
            .get("max_input_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        profile.max_chat_history_tokens = if max_input_tokens < LARGE_CONTEXT_TOKENS {
            1024
        } else {
            2 * 1024
        };

        // 4. preset or name-rule cascade
        self.configure_settings(&mut profile);

        // 5. weak model
        self.resolve_weak_model(&mut profile, opts)?;

        debug!(
            model = name,
            edit_format = %profile.edit_format,
            use_repo_map = profile.use_repo_map,
            "model profile resolved"
        );
        Ok(profile)
    }

    fn configure_settings(&self, profile: &mut ModelProfile) {
        if let Some(preset) = self.registry.lookup(&profile.name) {
            profile.edit_format = preset.edit_format;
            profile.weak_model_name = preset.weak_model_name.clone();
            profile.use_repo_map = preset.use_repo_map;
            profile.send_undo_reply = preset.send_undo_reply;
            profile.accepts_images = preset.accepts_images;
            return;
        }

        if let Some(rule) = rules::match_rule(&profile.name) {
            profile.edit_format = rule.effect.edit_format;
            profile.use_repo_map = rule.effect.use_repo_map;
            profile.send_undo_reply = rule.effect.send_undo_reply;
            return;
        }

        // defaults stay in effect; a diff default implies a repo map
        // (inert under the shipped defaults, kept for default changes)
        if profile.edit_format == EditFormat::Diff {
            profile.use_repo_map = true;
        }
    }

    fn resolve_weak_model(
        &self,
        profile: &mut ModelProfile,
        opts: &ResolveOptions,
    ) -> Result<(), ResolveError> {
        match &opts.weak_model {
            WeakModelChoice::Disabled => {
                profile.weak_model_name = None;
                profile.weak_model = WeakModel::Disabled;
                return Ok(());
            }
            WeakModelChoice::Named(name) => {
                profile.weak_model_name = Some(name.clone());
            }
            WeakModelChoice::Default => {}
        }

        let weak_name = profile
            .weak_model_name
            .as_deref()
            .filter(|n| !n.is_empty() && *n != profile.name);

        let Some(weak_name) = weak_name else {
            profile.weak_model = WeakModel::SelfReference;
            return Ok(());
        };

        // depth is exactly one: the weak profile never resolves its own
        // weak model, and its environment is not re-validated
        let weak = self.resolve(
            weak_name,
            &ResolveOptions {
                weak_model: WeakModelChoice::Disabled,
                require_model_info: opts.require_model_info,
                validate_environment: false,
            },
        )?;
        profile.weak_model = WeakModel::Distinct(Box::new(weak));
        Ok(())
    }
}
