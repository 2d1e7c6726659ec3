//! # haversack-core: Pure Inventory Rules for Haversack
//!
//! This crate is the **heart** of Haversack. It holds the inventory data
//! model and every bookkeeping rule as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Haversack Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (web extension / haversack-cli)          │   │
//! │  │    Pack tab ──► Storage tab ──► Search tab ──► DM configurator  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Inventory value in, Inventory out     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ haversack-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   rules   │  │   calc    │  │ container │  │ transfer  │  │   │
//! │  │   │ PackType  │  │  weights  │  │ Inventory │  │  search   │  │   │
//! │  │   │ StorageTy │  │  slots    │  │  items    │  │  nearby   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Collaborators (character store, rule file)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Data model (Item, Inventory, PackType, ...)
//! - [`currency`] - Coin purses and copper-piece valuation
//! - [`rules`] - Built-in and customized rule tables
//! - [`calc`] - Weight, slot and eligibility calculations plus advisories
//! - [`container`] - Inventory operations (items, equipment, vaults, storages)
//! - [`transfer`] - Moving items between the pack and external storages
//! - [`search`] - Multi-container item search
//! - [`player`] - Per-player record with favorites
//! - [`summary`] - One-shot inventory digest
//! - [`id`] - Unique id supply
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same inventory and rules in, same answer out
//! 2. **No I/O**: loading and saving characters is a collaborator's job
//! 3. **Integer Coins**: all values are u64 copper pieces
//! 4. **Advisory Limits**: attunement, coin carry and coin capacity are
//!    reported, never enforced
//!
//! ## Example Usage
//!
//! ```rust
//! use haversack_core::{calc, Inventory, ItemCategory, ItemDraft, RuleTables};
//!
//! let rules = RuleTables::default();
//! let mut inv = Inventory::default();
//! let mut next = 0;
//! let mut ids = || { next += 1; format!("item-{}", next) };
//!
//! let draft = ItemDraft::new("Greatsword", ItemCategory::TwoHandedWeapon).quantity(3);
//! inv.add_item(draft, &mut ids).unwrap();
//!
//! // Two-handed weapons weigh 4 units each by default
//! assert_eq!(calc::total_weight(&inv.items), 12.0);
//! assert_eq!(inv.current_pack_type(&rules).id, "standard-pack");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calc;
pub mod container;
pub mod currency;
pub mod error;
pub mod id;
pub mod player;
pub mod rules;
pub mod search;
pub mod summary;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use haversack_core::Currency` instead of
// `use haversack_core::currency::Currency`

pub use container::{UseOutcome, WealthBreakdown};
pub use currency::{CopperPieces, Currency, Denomination};
pub use error::{CoreError, CoreResult, ErrorCode, ValidationError};
pub use id::{IdGenerator, UuidGenerator};
pub use player::PlayerData;
pub use rules::{CoinNames, RuleCustomizations, RuleTables};
pub use search::SearchHit;
pub use summary::InventorySummary;
pub use transfer::{ContainerRef, TransferOutcome};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Attuned items a character should carry at most.
///
/// Exceeding it is flagged by [`calc::attunement_severity`], never blocked.
pub const MAX_ATTUNED_ITEMS: usize = 3;

/// Loose coins a character can comfortably carry.
pub const COIN_CARRY_CAP: u64 = 40;

/// Coins carried for free before they start to weigh anything.
pub const COIN_WEIGHT_THRESHOLD: u64 = 30;

/// Weight units added per started block of 10 coins above the threshold.
pub const COIN_WEIGHT_PENALTY_PER_10: u64 = 1;

/// Uses a fresh piece of camp gear starts with.
pub const CAMP_ITEM_MAX_USES: u8 = 15;

/// Weapon, armor, clothing and jewelry slots before pack modifiers.
pub const BASE_EQUIPMENT_SLOTS: u32 = 4;

/// Shortest query the global search answers.
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

/// Pack whose utility slots accept any light item instead of a category list.
pub const UTILITY_PACK_ID: &str = "utility-pack";

/// Utility-pack items must weigh strictly less than this per unit.
pub const UTILITY_PACK_MAX_UNIT_WEIGHT: f64 = 2.0;

/// Pack a new character starts with.
pub const DEFAULT_PACK_TYPE_ID: &str = "standard-pack";

/// Maximum length of any user-facing name.
pub const MAX_NAME_LEN: usize = 200;

/// Highest slot count `equip` will grow a single slot type to on its own.
pub const MAX_SLOTS_PER_TYPE: usize = 64;
