//! Environment variable validation for model providers.
//!
//! Maps a model name to the credential keys its provider requires and
//! reports which of them are absent. A provider that cannot be recognized
//! from the name yields an "unable to determine" report rather than an
//! error; the resolver downgrades that to a warning.

use std::collections::HashMap;

use super::{EnvReport, EnvironmentValidator};

/// Required credentials for one provider.
///
/// A model matches when its name contains any of `patterns`. Each entry in
/// `any_of` is satisfied when at least one of its alternatives is set; the
/// first alternative is the one reported as missing.
struct ProviderKeys {
    patterns: &'static [&'static str],
    any_of: &'static [&'static [&'static str]],
}

const PROVIDER_KEYS: &[ProviderKeys] = &[
    ProviderKeys {
        patterns: &["gpt-3.5", "gpt-4", "openai/"],
        any_of: &[&["OPENAI_API_KEY"]],
    },
    ProviderKeys {
        patterns: &["claude-", "anthropic/"],
        any_of: &[&["ANTHROPIC_API_KEY"]],
    },
    ProviderKeys {
        patterns: &["gemini-", "gemini/"],
        any_of: &[&["GEMINI_API_KEY", "GOOGLE_API_KEY"]],
    },
    ProviderKeys {
        patterns: &["groq/"],
        any_of: &[&["GROQ_API_KEY"]],
    },
    ProviderKeys {
        patterns: &["command-r"],
        any_of: &[&["COHERE_API_KEY"]],
    },
];

/// Environment validator backed by process environment variables,
/// optionally overridden with in-memory values.
#[derive(Debug, Default)]
pub struct ProviderEnv {
    overrides: HashMap<String, String>,
    use_process_env: bool,
}

impl ProviderEnv {
    /// Validator that reads the process environment.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            use_process_env: true,
        }
    }

    /// Validator that only sees keys added via [`with_var`](Self::with_var).
    /// Useful for tests and sandboxed embedding.
    pub fn isolated() -> Self {
        Self {
            overrides: HashMap::new(),
            use_process_env: false,
        }
    }

    /// Add an in-memory key that shadows the process environment.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.overrides.insert(key.to_string(), value.to_string());
        self
    }

    fn key_present(&self, key: &str) -> bool {
        if self.overrides.contains_key(key) {
            return true;
        }
        self.use_process_env && std::env::var(key).is_ok()
    }
}

impl EnvironmentValidator for ProviderEnv {
    fn validate(&self, model_name: &str) -> EnvReport {
        let provider = PROVIDER_KEYS
            .iter()
            .find(|p| p.patterns.iter().any(|pat| model_name.contains(pat)));

        let Some(provider) = provider else {
            tracing::debug!(model = model_name, "no known provider for model name");
            return EnvReport {
                missing_keys: Vec::new(),
                keys_in_environment: false,
            };
        };

        let mut missing = Vec::new();
        for alternatives in provider.any_of {
            if !alternatives.iter().any(|key| self.key_present(key)) {
                missing.push(alternatives[0].to_string());
            }
        }

        tracing::debug!(
            model = model_name,
            missing = missing.len(),
            "environment check"
        );

        EnvReport {
            missing_keys: missing,
            keys_in_environment: true,
        }
    }
}
