//! # Validation Module
//!
//! Input validation for item drafts, vault/storage forms and configurator
//! rule entries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end form                                               │
//! │  ├── Clamps negative coin counts to 0                                  │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization                                              │
//! │  └── Unknown categories / malformed coin capacity rejected             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Names present and bounded                                         │
//! │  ├── Quantities and weights sane                                       │
//! │  └── Camp uses within range                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator runs before the inventory is touched, so a rejected
//! operation leaves state unchanged.
//!
//! ## Usage
//! ```rust
//! use haversack_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("name", "Bag of Holding").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{ExternalStorageType, ItemCategory, PackType};
use crate::{CAMP_ITEM_MAX_USES, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user-facing name (item, vault, storage, rule entry).
///
/// ## Rules
/// - Must not be blank after trimming
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a rule-table id (pack type or storage type).
pub fn validate_rule_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stack quantity.
///
/// ## Rules
/// - Must be at least 1 (a zero stack is a deleted item)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-unit weight override.
///
/// Any finite number is fine: zero and negatives mean "use the category
/// default".
pub fn validate_weight(weight: f64) -> ValidationResult<()> {
    if !weight.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "weight".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(())
}

/// Validates remaining uses against the item category.
///
/// ## Rules
/// - Only `camp` items carry uses
/// - Uses lie within 0..=15
pub fn validate_uses(category: ItemCategory, uses: Option<u8>) -> ValidationResult<()> {
    let Some(uses) = uses else {
        return Ok(());
    };

    if category != ItemCategory::Camp {
        return Err(ValidationError::NotAllowed {
            field: "uses".to_string(),
            allowed: vec![ItemCategory::Camp.label().to_string()],
        });
    }

    if uses > CAMP_ITEM_MAX_USES {
        return Err(ValidationError::OutOfRange {
            field: "uses".to_string(),
            min: 0,
            max: i64::from(CAMP_ITEM_MAX_USES),
        });
    }

    Ok(())
}

/// Validates a sell quantity against the stack being sold from.
///
/// ## Rules
/// - `0 < qty <= available`
pub fn validate_sell_quantity(qty: u32, available: u32) -> ValidationResult<()> {
    if qty == 0 || qty > available {
        return Err(ValidationError::OutOfRange {
            field: "sell quantity".to_string(),
            min: 1,
            max: i64::from(available),
        });
    }

    Ok(())
}

// =============================================================================
// Rule Entry Validators
// =============================================================================

/// Validates a configurator pack type entry.
pub fn validate_pack_type(pack: &PackType) -> ValidationResult<()> {
    validate_rule_id(&pack.id)?;
    validate_name("pack name", &pack.name)
}

/// Validates a configurator storage type entry.
///
/// Coin capacity needs no check here: the `-1`-or-non-negative rule is
/// enforced when the value is parsed.
pub fn validate_storage_type(storage: &ExternalStorageType) -> ValidationResult<()> {
    validate_rule_id(&storage.id)?;
    validate_name("storage type name", &storage.name)
}

/// Rejects the first id that appears twice in `ids`.
pub fn validate_unique_ids<'a>(
    field: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> ValidationResult<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
