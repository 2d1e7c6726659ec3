//! # Error Types
//!
//! Domain-specific error types for haversack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  haversack-core errors (this file)                                     │
//! │  ├── CoreError        - Lookup misses, unusable items, bad transfers   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  haversack-config errors (separate crate)                              │
//! │  └── ConfigError      - Rule file load/save/validation failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ErrorCode (reason code for UI)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - A transfer involving a storage that is not nearby. That is an expected
//!   state and is reported through [`crate::transfer::TransferOutcome`].
//! - A pack type id missing from the rule tables. Lookups fall back to the
//!   first built-in entry instead.

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core rules-engine errors.
///
/// Every operation that returns one of these has left its input untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with this id in the addressed container.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// No vault with this id on the inventory.
    #[error("Vault not found: {0}")]
    VaultNotFound(String),

    /// No external storage with this id on the inventory.
    #[error("External storage not found: {0}")]
    StorageNotFound(String),

    /// No custom rule entry (pack type or storage type) with this id.
    ///
    /// Only the configurator's edit operations raise this; read paths
    /// fall back to a default entry.
    #[error("Custom {kind} not found: {id}")]
    RuleEntryNotFound { kind: &'static str, id: String },

    /// Id collision inside a single item sequence.
    ///
    /// ## When This Occurs
    /// - A faulty id generator handed out an id already in use
    /// - A transfer would land an item next to another with the same id
    #[error("Duplicate id {id} in {container}")]
    DuplicateId { id: String, container: String },

    /// Item category has no "use" action.
    ///
    /// Only consumables, ammunition and camp gear can be used.
    #[error("{name} ({category}) cannot be used")]
    NotUsable { name: String, category: String },

    /// Transfer request is malformed (e.g. source and destination are the
    /// same container).
    #[error("Invalid transfer: {reason}")]
    InvalidTransfer { reason: String },

    /// Slot type string did not name one of the five slot types.
    #[error("Unknown equipment slot type: {0}")]
    InvalidSlotType(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Machine-readable reason code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::ItemNotFound(_)
            | CoreError::VaultNotFound(_)
            | CoreError::StorageNotFound(_)
            | CoreError::RuleEntryNotFound { .. } => ErrorCode::NotFound,
            CoreError::DuplicateId { .. } => ErrorCode::DuplicateId,
            CoreError::NotUsable { .. } => ErrorCode::NotUsable,
            CoreError::InvalidTransfer { .. } => ErrorCode::InvalidTransfer,
            CoreError::InvalidSlotType(_) => ErrorCode::InvalidSlotType,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

/// Reason codes handed to the presentation layer.
///
/// ## Usage in a Front End
/// ```typescript
/// switch (err.code) {
///   case 'VALIDATION_ERROR': highlightForm(err.message); break;
///   case 'NOT_FOUND':        refreshInventory();         break;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced entity does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Item has no use action
    NotUsable,

    /// Transfer request is malformed
    InvalidTransfer,

    /// Id generator collision
    DuplicateId,

    /// Slot type argument was malformed
    InvalidSlotType,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any state is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a NaN weight).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field is only allowed in certain contexts.
    #[error("{field} is only allowed for: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. two custom pack types sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
