//! Per-model edit-format presets.
//!
//! `SettingsRegistry` holds an ordered list of named presets: which edit
//! format a model speaks, whether it gets a repo map, and which cheaper
//! model handles auxiliary tasks. The built-in table can be extended from
//! a JSON file (`~/.modelpick/model_settings.json`); file entries override
//! built-ins by name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading settings files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config directory not found")]
    ConfigDirNotFound,
    #[error("Model settings entry has an empty name")]
    EmptyName,
}

/// Protocol a model uses when proposing file edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditFormat {
    /// Whole-file replacement
    #[default]
    Whole,
    /// Contextual search/replace diff
    Diff,
    /// Unified diff
    Udiff,
}

impl std::fmt::Display for EditFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditFormat::Whole => write!(f, "whole"),
            EditFormat::Diff => write!(f, "diff"),
            EditFormat::Udiff => write!(f, "udiff"),
        }
    }
}

/// Immutable preset for one named model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Model name, unique within a registry
    pub name: String,
    #[serde(default)]
    pub edit_format: EditFormat,
    /// Cheaper model consulted for auxiliary tasks
    #[serde(default)]
    pub weak_model_name: Option<String>,
    #[serde(default)]
    pub use_repo_map: bool,
    #[serde(default)]
    pub send_undo_reply: bool,
    #[serde(default)]
    pub accepts_images: bool,
}

fn ms(name: &str, edit_format: EditFormat, weak_model_name: &str) -> ModelSettings {
    ModelSettings {
        name: name.to_string(),
        edit_format,
        weak_model_name: Some(weak_model_name.to_string()),
        use_repo_map: false,
        send_undo_reply: false,
        accepts_images: false,
    }
}

/// Built-in presets in publication order.
fn builtin_settings() -> Vec<ModelSettings> {
    use EditFormat::{Diff, Udiff, Whole};

    vec![
        // gpt-3.5
        ms("gpt-3.5-turbo-0125", Whole, "gpt-3.5-turbo"),
        ms("gpt-3.5-turbo-1106", Whole, "gpt-3.5-turbo"),
        ms("gpt-3.5-turbo-0613", Whole, "gpt-3.5-turbo"),
        ms("gpt-3.5-turbo-16k-0613", Whole, "gpt-3.5-turbo"),
        // gpt-4
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            accepts_images: true,
            ..ms("gpt-4-turbo-2024-04-09", Udiff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            accepts_images: true,
            ..ms("gpt-4-turbo", Udiff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("gpt-4-0125-preview", Udiff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("gpt-4-1106-preview", Udiff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            accepts_images: true,
            ..ms("gpt-4-vision-preview", Diff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("gpt-4-0613", Diff, "gpt-3.5-turbo")
        },
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("gpt-4-32k-0613", Diff, "gpt-3.5-turbo")
        },
        // Claude
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("claude-3-opus-20240229", Diff, "claude-3-haiku-20240307")
        },
        ms("claude-3-sonnet-20240229", Whole, "claude-3-haiku-20240307"),
        // Cohere
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("command-r-plus", Whole, "command-r-plus")
        },
        // Groq llama3
        ModelSettings {
            use_repo_map: true,
            send_undo_reply: true,
            ..ms("groq/llama3-70b-8192", Diff, "groq/llama3-8b-8192")
        },
    ]
}

/// Ordered registry of model presets.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    entries: Vec<ModelSettings>,
}

impl SettingsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in presets.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_settings(),
        }
    }

    /// Exact-name lookup. Keys are unique, so order only matters for
    /// reproducibility of diagnostics.
    pub fn lookup(&self, name: &str) -> Option<&ModelSettings> {
        self.entries.iter().find(|s| s.name == name)
    }

    /// Add a preset, replacing any existing entry with the same name
    /// in place.
    pub fn add(&mut self, settings: ModelSettings) -> Result<(), SettingsError> {
        if settings.name.is_empty() {
            return Err(SettingsError::EmptyName);
        }
        match self.entries.iter_mut().find(|s| s.name == settings.name) {
            Some(existing) => *existing = settings,
            None => self.entries.push(settings),
        }
        Ok(())
    }

    /// Load presets from a JSON array of `ModelSettings`.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SettingsError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<ModelSettings> = serde_json::from_str(&content)?;

        let count = entries.len();
        for settings in entries {
            self.add(settings)?;
        }
        tracing::debug!(path = %path.display(), count, "model settings file merged");
        Ok(())
    }

    /// Load the user settings file from the config directory, if present.
    pub fn load_user_file(&mut self) -> Result<(), SettingsError> {
        let path = Self::config_dir()?.join("model_settings.json");
        if path.exists() {
            self.load_file(&path)?;
        }
        Ok(())
    }

    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::ConfigDirNotFound)?;
        Ok(home.join(".modelpick"))
    }

    /// All preset names, in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
