//! Shared types, error model, and configuration for pagegen.
//!
//! This crate is the foundation depended on by all other pagegen crates.
//! It provides:
//! - [`PageGenError`], the unified error type
//! - Domain types ([`RawProduct`], [`Product`], [`QuestionSet`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod text;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, OpenRouterConfig, PricingConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_key, validate_base_url,
};
pub use error::{PageGenError, Result};
pub use text::truncate_chars;
pub use types::{Product, QuestionCategory, QuestionSet, RAW_PRODUCT_KEYS, RawProduct};
