//! Built-in model catalog.
//!
//! `StaticCatalog` carries metadata for the models this crate knows about
//! out of the box and can be extended from a JSON file keyed by model name
//! (`~/.modelpick/catalog.json`). Entries keep insertion order so that
//! substring suggestions are reproducible.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use super::{ModelCatalog, ModelInfo};

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog file must be a JSON object keyed by model name")]
    NotAnObject,
}

/// Ordered, in-memory model catalog.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    entries: Vec<(String, ModelInfo)>,
}

fn info(max_input_tokens: u64, max_output_tokens: u64, provider: &str) -> ModelInfo {
    let mut m = ModelInfo::new();
    m.insert("max_input_tokens".to_string(), Value::from(max_input_tokens));
    m.insert(
        "max_output_tokens".to_string(),
        Value::from(max_output_tokens),
    );
    m.insert("litellm_provider".to_string(), Value::from(provider));
    m
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of built-in models with published context limits.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, entry) in [
            // gpt-3.5
            ("gpt-3.5-turbo", info(16_385, 4_096, "openai")),
            ("gpt-3.5-turbo-0125", info(16_385, 4_096, "openai")),
            ("gpt-3.5-turbo-1106", info(16_385, 4_096, "openai")),
            ("gpt-3.5-turbo-0613", info(4_096, 4_096, "openai")),
            ("gpt-3.5-turbo-16k-0613", info(16_385, 4_096, "openai")),
            // gpt-4
            ("gpt-4", info(8_192, 4_096, "openai")),
            ("gpt-4-0613", info(8_192, 4_096, "openai")),
            ("gpt-4-32k-0613", info(32_768, 4_096, "openai")),
            ("gpt-4-turbo", info(128_000, 4_096, "openai")),
            ("gpt-4-turbo-2024-04-09", info(128_000, 4_096, "openai")),
            ("gpt-4-0125-preview", info(128_000, 4_096, "openai")),
            ("gpt-4-1106-preview", info(128_000, 4_096, "openai")),
            ("gpt-4-vision-preview", info(128_000, 4_096, "openai")),
            // Anthropic
            ("claude-2", info(100_000, 8_191, "anthropic")),
            ("claude-3-opus-20240229", info(200_000, 4_096, "anthropic")),
            ("claude-3-sonnet-20240229", info(200_000, 4_096, "anthropic")),
            ("claude-3-haiku-20240307", info(200_000, 4_096, "anthropic")),
            // Cohere
            ("command-r-plus", info(128_000, 4_096, "cohere")),
            // Groq
            ("groq/llama3-70b-8192", info(8_192, 8_192, "groq")),
            ("groq/llama3-8b-8192", info(8_192, 8_192, "groq")),
            // Gemini
            ("gemini/gemini-1.5-pro", info(1_000_000, 8_192, "gemini")),
        ] {
            catalog.add(name, entry);
        }
        catalog
    }

    /// Add or replace an entry. Replacement keeps the original position.
    pub fn add(&mut self, name: &str, entry: ModelInfo) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name.to_string(), entry)),
        }
    }

    /// Merge entries from a JSON object keyed by model name.
    ///
    /// Non-object values are skipped; existing entries are replaced.
    pub fn load_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content)?;
        let map = parsed.as_object().ok_or(CatalogError::NotAnObject)?;

        let mut loaded = 0usize;
        for (name, value) in map {
            if let Some(entry) = value.as_object() {
                self.add(name, entry.clone());
                loaded += 1;
            }
        }
        tracing::debug!(path = %path.display(), loaded, "catalog file merged");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ModelCatalog for StaticCatalog {
    fn model_info(&self, name: &str) -> Option<&ModelInfo> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, info)| info)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Builtin Catalog Tests
    // =========================================================================

    #[test]
    fn test_builtin_not_empty() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.len() >= 20);
    }

    #[test]
    fn test_builtin_known_models() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.contains("gpt-4"));
        assert!(catalog.contains("claude-3-opus-20240229"));
        assert!(catalog.contains("groq/llama3-70b-8192"));
        assert!(!catalog.contains("gpt-9"));
    }

    #[test]
    fn test_model_info_fields() {
        let catalog = StaticCatalog::builtin();
        let entry = catalog.model_info("gpt-4-1106-preview").unwrap();
        assert_eq!(
            entry.get("max_input_tokens").and_then(Value::as_u64),
            Some(128_000)
        );
        assert_eq!(
            entry.get("litellm_provider").and_then(Value::as_str),
            Some("openai")
        );
    }

    #[test]
    fn test_names_order_is_stable() {
        let a = StaticCatalog::builtin();
        let b = StaticCatalog::builtin();
        assert_eq!(a.names(), b.names());
        assert_eq!(a.names()[0], "gpt-3.5-turbo");
    }

    // =========================================================================
    // Add/Replace Tests
    // =========================================================================

    #[test]
    fn test_add_replaces_in_place() {
        let mut catalog = StaticCatalog::new();
        catalog.add("a", info(100, 10, "x"));
        catalog.add("b", info(200, 20, "x"));
        catalog.add("a", info(300, 30, "y"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert_eq!(
            catalog
                .model_info("a")
                .unwrap()
                .get("max_input_tokens")
                .and_then(Value::as_u64),
            Some(300)
        );
    }

    #[test]
    fn test_unknown_model_is_none() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.model_info("no-such-model").is_none());
    }

    // =========================================================================
    // File Loading Tests
    // =========================================================================

    #[test]
    fn test_load_file_merges_entries() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"local/mistral-7b": {"max_input_tokens": 32768}}"#,
        )
        .unwrap();

        let mut catalog = StaticCatalog::builtin();
        catalog.load_file(&path).unwrap();
        assert!(catalog.contains("local/mistral-7b"));
    }

    #[test]
    fn test_load_file_overrides_existing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, r#"{"gpt-4": {"max_input_tokens": 1}}"#).unwrap();

        let mut catalog = StaticCatalog::builtin();
        let before = catalog.len();
        catalog.load_file(&path).unwrap();

        assert_eq!(catalog.len(), before);
        assert_eq!(
            catalog
                .model_info("gpt-4")
                .unwrap()
                .get("max_input_tokens")
                .and_then(Value::as_u64),
            Some(1)
        );
    }

    #[test]
    fn test_load_file_rejects_non_object() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, r#"["gpt-4"]"#).unwrap();

        let mut catalog = StaticCatalog::new();
        let result = catalog.load_file(&path);
        assert!(matches!(result, Err(CatalogError::NotAnObject)));
    }

    #[test]
    fn test_load_file_missing() {
        let mut catalog = StaticCatalog::new();
        let result = catalog.load_file(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
