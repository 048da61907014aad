//! State Hashing for Verification
//!
//! Hashes run state so a replay can be checked against the live run.

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for run state.
///
/// Wraps SHA-256 with helpers for the value types the simulation stores.
/// Order of updates is significant.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for run state.
    pub fn for_run_state() -> Self {
        Self::new(b"RING_RUNNER_STATE_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 by bit pattern.
    ///
    /// `0.0` and `-0.0` hash differently.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    /// Update with a 3-component vector.
    #[inline]
    pub fn update_vec3(&mut self, value: [f32; 3]) {
        for v in value {
            self.update_f32(v);
        }
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for replay verification.
///
/// Tick and seed are always hashed first; the closure adds the rest.
pub fn compute_state_hash<F>(tick: u32, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_run_state();

    hasher.update_u32(tick);
    hasher.update_u64(rng_seed);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_run_state();
            hasher.update_u32(100);
            hasher.update_u64(12345);
            hasher.update_f32(5.5);
            hasher.update_vec3([1.0, 2.0, 3.0]);
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_signed_zero_differs() {
        let hash = |v: f32| {
            let mut h = StateHasher::new(b"zero");
            h.update_f32(v);
            h.finalize()
        };

        assert_ne!(hash(0.0), hash(-0.0));
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(100, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        let hash2 = compute_state_hash(100, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        assert_eq!(hash, hash2);

        let hash3 = compute_state_hash(101, 12345, |hasher| {
            hasher.update_f32(5.0);
            hasher.update_bool(true);
        });

        assert_ne!(hash, hash3);
    }
}
