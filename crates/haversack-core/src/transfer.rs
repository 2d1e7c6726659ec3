//! # Item Transfer
//!
//! Moves a whole item stack between the player's pack and an external
//! storage (or between two storages).
//!
//! ## Transfer Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transfer_item(item, from, to)                                         │
//! │                                                                         │
//! │  1. from == to?                  → Err(InvalidTransfer)                 │
//! │  2. storage ids exist?           → Err(StorageNotFound)                 │
//! │  3. every storage involved nearby?                                     │
//! │        no                        → Ok(NotNearby), nothing changes       │
//! │  4. id already used in `to`?     → Err(DuplicateId)                     │
//! │  5. item in `from`?              → Err(ItemNotFound)                    │
//! │  6. remove from `from` (equipped refs cleared)                         │
//! │     is_attuned = false                                                 │
//! │     append to `to`               → Ok(Moved)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pack is always reachable. Attunement never survives a move: the
//! item has to be re-attuned at its destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Inventory;

// =============================================================================
// Container Reference
// =============================================================================

/// One end of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ContainerRef {
    /// The player's own pack (the root inventory).
    Pack,
    /// An external storage, by id.
    Storage(String),
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerRef::Pack => f.write_str("pack"),
            ContainerRef::Storage(id) => write!(f, "storage {}", id),
        }
    }
}

/// `"pack"` (any case) is the pack; anything else is a storage id.
impl std::str::FromStr for ContainerRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidTransfer {
                reason: "container reference is empty".to_string(),
            });
        }
        if s.eq_ignore_ascii_case("pack") {
            Ok(ContainerRef::Pack)
        } else {
            Ok(ContainerRef::Storage(s.to_string()))
        }
    }
}

// =============================================================================
// Transfer Outcome
// =============================================================================

/// Result of a transfer request that was well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TransferOutcome {
    /// The item now lives in the destination.
    Moved {
        #[serde(rename = "itemId")]
        item_id: String,
        /// True if the item was attuned before the move.
        #[serde(rename = "deAttuned")]
        de_attuned: bool,
    },
    /// A storage involved is not nearby. Nothing changed.
    NotNearby {
        #[serde(rename = "storageId")]
        storage_id: String,
    },
}

impl TransferOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, TransferOutcome::Moved { .. })
    }
}

// =============================================================================
// Transfer
// =============================================================================

impl Inventory {
    fn container(&self, at: &ContainerRef) -> CoreResult<&Inventory> {
        match at {
            ContainerRef::Pack => Ok(self),
            ContainerRef::Storage(id) => self
                .storage(id)
                .map(|s| &s.inventory)
                .ok_or_else(|| CoreError::StorageNotFound(id.clone())),
        }
    }

    fn container_mut(&mut self, at: &ContainerRef) -> CoreResult<&mut Inventory> {
        match at {
            ContainerRef::Pack => Ok(self),
            ContainerRef::Storage(id) => Ok(&mut self.storage_mut(id)?.inventory),
        }
    }

    /// First storage among `refs` that is not nearby.
    fn first_far_storage(&self, refs: [&ContainerRef; 2]) -> Option<String> {
        refs.into_iter().find_map(|r| match r {
            ContainerRef::Storage(id) => self
                .storage(id)
                .filter(|s| !s.nearby)
                .map(|s| s.id.clone()),
            ContainerRef::Pack => None,
        })
    }

    /// Moves item `item_id` from `from` to `to`.
    ///
    /// A storage that is not nearby is not an error: the call returns
    /// [`TransferOutcome::NotNearby`] and leaves everything as it was.
    pub fn transfer_item(
        &mut self,
        item_id: &str,
        from: &ContainerRef,
        to: &ContainerRef,
    ) -> CoreResult<TransferOutcome> {
        if from == to {
            return Err(CoreError::InvalidTransfer {
                reason: format!("source and destination are both {}", from),
            });
        }

        // Unknown storages fail before the nearby gate
        self.container(from)?;
        self.container(to)?;

        if let Some(storage_id) = self.first_far_storage([from, to]) {
            debug!(item_id, %from, %to, %storage_id, "Transfer blocked, storage not nearby");
            return Ok(TransferOutcome::NotNearby { storage_id });
        }

        if self.container(to)?.item(item_id).is_some() {
            return Err(CoreError::DuplicateId {
                id: item_id.to_string(),
                container: to.to_string(),
            });
        }

        let mut item = self.container_mut(from)?.remove_item(item_id)?;
        let de_attuned = item.is_attuned;
        item.is_attuned = false;
        self.container_mut(to)?.items.push(item);

        info!(item_id, %from, %to, de_attuned, "Item transferred");
        Ok(TransferOutcome::Moved {
            item_id: item_id.to_string(),
            de_attuned,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
