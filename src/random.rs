// src/random.rs
//! Randomness as an injected capability
//!
//! Handlers never reach for a global RNG; they receive a `RandomSource`.
//! Production uses the thread-local CSPRNG, tests plug in a seeded one.

use std::collections::TryReserveError;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// A source of random bytes shared by all workers.
///
/// Implementations must be safe to call from many threads at once.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);

    fn random_bytes(&self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; len];
        self.fill_bytes(&mut bytes);
        bytes
    }

    /// Like `random_bytes`, but an allocation the process cannot satisfy is
    /// an error instead of an abort. Use for caller-chosen lengths.
    fn try_random_bytes(&self, len: usize) -> Result<Vec<u8>, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len)?;
        bytes.resize(len, 0);
        self.fill_bytes(&mut bytes);
        Ok(bytes)
    }
}

/// Process CSPRNG: rand's thread-local generator, seeded from the OS.
///
/// Each worker thread gets its own generator, so no locking is involved.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }
}

/// Deterministic source for tests. NOT for production keys.
#[derive(Debug)]
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(dest);
    }
}
