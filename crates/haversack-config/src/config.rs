//! # Ruleset Configuration
//!
//! The configurator's rule customizations, stored as TOML.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HAVERSACK_COIN_GOLD=Crowns                                         │
//! │     HAVERSACK_RULES_PATH=/campaigns/tomb/rules.toml                    │
//! │                                                                         │
//! │  2. TOML Rules File                                                    │
//! │     ~/.config/inventory/rules.toml (Linux)                             │
//! │     ~/Library/Application Support/com.haversack.inventory/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in tables only, Copper/Silver/Gold/Platinum                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules File Format
//! ```toml
//! notes = "Homebrew packs for the Tomb campaign"
//!
//! [coin_names]
//! copper = "Bits"
//! silver = "Shards"
//! gold = "Crowns"
//! platinum = "Suns"
//!
//! [[pack_types]]
//! id = "quiver-pack"
//! name = "Quiver Pack"
//! capacity = 12
//! utilitySlots = 2
//! weaponModifier = 1
//! utilityEquipRules = ["ammunition", "light-ammunition"]
//!
//! [[storage_types]]
//! id = "bag-of-holding"
//! name = "Bag of Holding"
//! capacity = 500
//! weaponSlots = 0
//! armorSlots = 0
//! coinCapacity = -1   # unlimited
//! ```
//!
//! Entries use the same field names as stored character records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use haversack_core::{
    CoinNames, Denomination, ExternalStorageType, PackType, RuleCustomizations, RuleTables,
};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming an alternative rules file.
pub const RULES_PATH_ENV: &str = "HAVERSACK_RULES_PATH";

/// Environment variable overriding one coin name.
fn coin_env_var(denomination: Denomination) -> &'static str {
    match denomination {
        Denomination::Copper => "HAVERSACK_COIN_COPPER",
        Denomination::Silver => "HAVERSACK_COIN_SILVER",
        Denomination::Gold => "HAVERSACK_COIN_GOLD",
        Denomination::Platinum => "HAVERSACK_COIN_PLATINUM",
    }
}

// =============================================================================
// Ruleset Config
// =============================================================================

/// Everything the configurator can change, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesetConfig {
    /// Free-text notes for the configurator.
    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub coin_names: CoinNames,

    /// Custom pack types, appended after the built-ins.
    #[serde(default)]
    pub pack_types: Vec<PackType>,

    /// Custom storage types, appended after the built-ins.
    #[serde(default)]
    pub storage_types: Vec<ExternalStorageType>,
}

impl RulesetConfig {
    /// Loads the ruleset from file, environment and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Rules file (explicit path, else `HAVERSACK_RULES_PATH`, else the
    ///    platform config dir)
    /// 3. Coin name environment variables
    ///
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::resolve_path(config_path) {
            if path.exists() {
                info!(?path, "Loading rules from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Rules file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads the ruleset or falls back to the built-ins if anything fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load rules: {}. Using built-in rules.", e);
            Self::default()
        })
    }

    /// Writes the ruleset as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        self.validate()?;
        let path = Self::resolve_path(config_path).ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Rules saved");
        Ok(())
    }

    /// Checks every custom entry and that no id is used twice.
    pub fn validate(&self) -> ConfigResult<()> {
        self.to_customizations().validate()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies coin name overrides from `lookup` (the process environment
    /// in production).
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for denomination in Denomination::ALL {
            let key = coin_env_var(denomination);
            if let Some(name) = lookup(key).filter(|n| !n.trim().is_empty()) {
                debug!(coin = denomination.key(), name = %name, "Overriding coin name from environment");
                *self.coin_names.name_mut(denomination) = name;
            }
        }
    }

    /// Explicit path, else `HAVERSACK_RULES_PATH`, else the platform default.
    pub fn resolve_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
        config_path
            .or_else(|| std::env::var_os(RULES_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// Returns the default rules file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "haversack", "inventory")
            .map(|dirs| dirs.config_dir().join("rules.toml"))
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    pub fn to_customizations(&self) -> RuleCustomizations {
        RuleCustomizations {
            custom_pack_types: self.pack_types.clone(),
            custom_storage_types: self.storage_types.clone(),
            coin_names: self.coin_names.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Active rule tables for a session.
    pub fn rule_tables(&self) -> RuleTables {
        RuleTables::from_customizations(&self.to_customizations())
    }
}

impl From<RuleCustomizations> for RulesetConfig {
    fn from(custom: RuleCustomizations) -> Self {
        RulesetConfig {
            notes: custom.notes,
            coin_names: custom.coin_names,
            pack_types: custom.custom_pack_types,
            storage_types: custom.custom_storage_types,
        }
    }
}
