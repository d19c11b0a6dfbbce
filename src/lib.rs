//! Modelpick
//!
//! Model selection, settings resolution, and token cost estimation for
//! AI coding assistants.
//!
//! ## Main Components
//!
//! - [`models`] - presets, the name-rule cascade, profile resolution, and
//!   close-name suggestions
//! - [`providers`] - collaborator traits (catalog, environment, tokenizer)
//!   with file-extensible default implementations
//! - [`tokens`] - text and image token cost estimation
//!
//! ## Quick Start
//!
//! ```no_run
//! use modelpick::{
//!     ModelResolver, ProviderEnv, ResolveOptions, SettingsRegistry, StaticCatalog,
//! };
//!
//! # fn main() -> Result<(), modelpick::ResolveError> {
//! let registry = SettingsRegistry::builtin();
//! let catalog = StaticCatalog::builtin();
//! let env = ProviderEnv::new();
//!
//! let resolver = ModelResolver::new(&registry, &catalog, &env);
//! let profile = resolver.resolve("gpt-4-1106-preview", &ResolveOptions::default())?;
//! println!("{} speaks {}", profile.name, profile.edit_format);
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod providers;
pub mod tokens;

// Re-export commonly used types
pub use models::{
    fuzzy_match_models, EditFormat, ModelProfile, ModelResolver, ModelSettings, ProfileDefaults,
    ResolveError, ResolveOptions, SettingsError, SettingsRegistry, WeakModel, WeakModelChoice,
};
pub use providers::{
    CatalogError, CharChunkTokenizer, EnvReport, EnvironmentValidator, ModelCatalog, ModelInfo,
    ProviderEnv, StaticCatalog, TokenEncoder,
};
pub use tokens::{image_size, image_token_cost, token_count_for_image};
