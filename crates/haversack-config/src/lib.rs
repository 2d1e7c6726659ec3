//! # haversack-config: Configurator Rule File
//!
//! Loads, validates and saves the dungeon master's customizations
//! (custom pack types, custom storage types, coin names, notes) and turns
//! them into the [`haversack_core::RuleTables`] every calculation reads.
//!
//! ## Usage
//! ```rust,no_run
//! use haversack_config::RulesetConfig;
//!
//! // Missing or broken files fall back to the built-in rules
//! let config = RulesetConfig::load_or_default(None);
//! let rules = config.rule_tables();
//! assert!(rules.pack_types().len() >= 10);
//! ```

pub mod config;
pub mod error;

pub use config::{RulesetConfig, RULES_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
