//! Collaborator interfaces consumed during model resolution.
//!
//! The resolver core does not talk to inference backends, tokenizer
//! libraries, or the process environment directly. Each of those concerns
//! sits behind a narrow trait so callers can swap in their own providers:
//! - [`ModelCatalog`] - metadata for known model names
//! - [`EnvironmentValidator`] - credential checks for a model's provider
//! - [`TokenEncoder`] - text-to-token encoding

pub mod catalog;
pub mod env;
pub mod tokenizer;

pub use catalog::{CatalogError, StaticCatalog};
pub use env::ProviderEnv;
pub use tokenizer::CharChunkTokenizer;

use serde_json::{Map, Value};

/// Opaque metadata bag for a model, keyed by provider-defined fields
/// such as `max_input_tokens`.
pub type ModelInfo = Map<String, Value>;

/// Source of metadata for known model names.
///
/// `names()` must return a stable iteration order; substring suggestions
/// are reported in this order.
pub trait ModelCatalog {
    /// Metadata for `name`, or `None` when the model is unknown.
    fn model_info(&self, name: &str) -> Option<&ModelInfo>;

    /// All known model names, in catalog order.
    fn names(&self) -> Vec<&str>;
}

/// Result of checking whether a model's credentials are present.
#[derive(Debug, Clone, Default)]
pub struct EnvReport {
    /// Required keys that are absent, in the order the provider reports them.
    pub missing_keys: Vec<String>,
    /// False when the validator could not determine which keys the model
    /// needs. Only meaningful when `missing_keys` is empty.
    pub keys_in_environment: bool,
}

/// Checks whether the credentials a model needs are available.
pub trait EnvironmentValidator {
    fn validate(&self, model_name: &str) -> EnvReport;
}

/// Encodes text into tokens; the token count is the sequence length.
pub trait TokenEncoder {
    fn encode(&self, model_name: &str, text: &str) -> Vec<String>;
}
