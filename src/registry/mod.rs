//! Shared file registry
//!
//! The authoritative record of which benchmark files currently exist,
//! without probing the filesystem, plus the dispenser of unique file
//! identifiers. Identifiers are monotonically assigned, never reused, and
//! name their file on disk as a decimal string.
//!
//! Concurrency discipline: random picks take the shared lock and may run
//! concurrently; `register` and `pick_and_remove` take the exclusive lock.
//! A delete's pick-then-remove happens inside one exclusive critical
//! section so the picked entry cannot be invalidated, double-removed, or
//! point at a different entry than the one chosen.

use crate::prng::Prng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;

/// No live files to pick from. Benign for operations that treat an empty
/// registry as a no-op.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no live files in registry")]
pub struct EmptyRegistry;

/// Registry of live file identifiers
#[derive(Debug)]
pub struct FileRegistry {
    /// Next identifier to hand out; fetch-and-increment only
    next_id: AtomicU64,
    /// Identifiers of files currently alive on disk. Order is incidental.
    live: RwLock<Vec<u64>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            live: RwLock::new(Vec::new()),
        }
    }

    /// Allocate a globally unique identifier. Two concurrent callers never
    /// receive the same value.
    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Append `id` to the live set
    pub fn register(&self, id: u64) {
        let mut live = self.live.write().expect("registry lock poisoned");
        live.push(id);
    }

    /// Uniformly pick a live identifier and its position
    pub fn pick_random(&self, prng: &mut Prng) -> Result<(u64, usize), EmptyRegistry> {
        let live = self.live.read().expect("registry lock poisoned");
        Self::pick(&live, prng)
    }

    /// Run `f` on a uniformly picked live identifier while the shared lock
    /// is still held.
    ///
    /// Read and append operations open the picked file inside `f`: a
    /// concurrent delete cannot remove the entry (and unlink the file)
    /// until the lock is released, so the open never races the unlink.
    pub fn with_random<R>(
        &self,
        prng: &mut Prng,
        f: impl FnOnce(u64) -> R,
    ) -> Result<R, EmptyRegistry> {
        let live = self.live.read().expect("registry lock poisoned");
        let (id, _) = Self::pick(&live, prng)?;
        Ok(f(id))
    }

    /// Pick a live identifier and remove it, in one exclusive critical
    /// section. The caller unlinks the file after the lock is dropped.
    pub fn pick_and_remove(&self, prng: &mut Prng) -> Result<u64, EmptyRegistry> {
        let mut live = self.live.write().expect("registry lock poisoned");
        let (id, index) = Self::pick(&live, prng)?;
        live.remove(index);
        Ok(id)
    }

    /// Number of live identifiers
    pub fn len(&self) -> usize {
        self.live.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pick(live: &[u64], prng: &mut Prng) -> Result<(u64, usize), EmptyRegistry> {
        if live.is_empty() {
            return Err(EmptyRegistry);
        }
        let index = prng.range(0, live.len() as u32) as usize;
        Ok((live[index], index))
    }
}

impl Default for FileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
