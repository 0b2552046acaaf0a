//! Entity id minting for synthesized document entities
//!
//! Ids combine a millisecond timestamp with a random base-36 suffix. This is
//! a non-cryptographic uniqueness guarantee: collisions are not fatal, only
//! vanishingly unlikely.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Default length of the random suffix
pub const DEFAULT_SUFFIX_LEN: usize = 9;

/// Source of fresh identifiers for derived entities
pub trait EntityIdMinter {
    fn mint(&mut self) -> String;
}

/// Mints `"{unix-millis}-{random base-36}"` ids
#[derive(Clone, Debug)]
pub struct TimestampIdMinter {
    suffix_len: usize,
}

impl TimestampIdMinter {
    pub fn new() -> Self {
        Self {
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }

    pub fn with_suffix_len(mut self, len: usize) -> Self {
        self.suffix_len = len.max(1);
        self
    }
}

impl Default for TimestampIdMinter {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIdMinter for TimestampIdMinter {
    fn mint(&mut self) -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..self.suffix_len)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        let id = format!("{}-{}", Utc::now().timestamp_millis(), suffix);
        tracing::trace!(id = %id, "Entity id minted");
        id
    }
}

/// Deterministic `"{prefix}-{n}"` ids, for replay and tests
#[derive(Clone, Debug)]
pub struct SequentialIdMinter {
    prefix: String,
    next: u64,
}

impl SequentialIdMinter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl EntityIdMinter for SequentialIdMinter {
    fn mint(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<M: EntityIdMinter + ?Sized> EntityIdMinter for &mut M {
    fn mint(&mut self) -> String {
        (**self).mint()
    }
}
