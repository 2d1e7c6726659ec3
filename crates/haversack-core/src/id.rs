//! # Id Supply
//!
//! New items, vaults, storages and custom rule entries need ids that are
//! unique within their sequence. The core never invents them itself; the
//! caller hands in an [`IdGenerator`].
//!
//! ```rust
//! use haversack_core::id::{IdGenerator, UuidGenerator};
//!
//! let mut ids = UuidGenerator;
//! assert_eq!(ids.next_id().len(), 36);
//!
//! // Any FnMut() -> String works too, which keeps tests deterministic.
//! let mut n = 0;
//! let mut counter = || { n += 1; format!("id-{}", n) };
//! assert_eq!(counter.next_id(), "id-1");
//! ```

use uuid::Uuid;

/// A source of fresh ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}
