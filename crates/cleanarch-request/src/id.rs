//! # Request Id Generation
//!
//! The builder draws request identifiers from an injected [`IdGenerator`].
//! Production code uses random v4 UUIDs; tests can plug in the
//! [`SequentialIdGenerator`] for deterministic ids.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use cleanarch_core::RequestId;

/// Source of request identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce the identifier for the next accepted request.
    fn next_id(&self) -> RequestId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> RequestId {
        RequestId(Uuid::new_v4())
    }
}

/// Monotonic ids `start, start + 1, ...` encoded as UUIDs.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> RequestId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        RequestId(Uuid::from_u128(u128::from(n)))
    }
}
