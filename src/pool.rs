//! Fixed-capacity FIFO object pool
//!
//! Entities are recycled through a [`Pool`] instead of being repeatedly
//! created and destroyed. The pool is the one ownership boundary in the
//! engine: an item is held by exactly one of a container's child sequence
//! or the pool, and [`Pool::insert`]/[`Pool::adopt`]/[`Pool::extract`] are
//! the only legal transfer points.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_POOL_CAPACITY;
use crate::error::StageError;

/// First-in, first-out reservoir with a hard capacity.
///
/// In the engine `T` is [`crate::NodeId`]; the pool is generic so tests and
/// embedders can reserve whatever they recycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    items: VecDeque<T>,
    capacity: usize,
    last_extracted: Option<T>,
}

impl<T: PartialEq + Clone> Pool<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            last_extracted: None,
        }
    }

    /// Invoke `produce` until the pool is full.
    ///
    /// The producer receives the held sequence and is expected to append
    /// newly constructed items to its back. A producer call that fails to
    /// grow the sequence ends the fill, so a no-op producer cannot hang
    /// the loop.
    pub fn fill(&mut self, mut produce: impl FnMut(&mut VecDeque<T>)) {
        while self.items.len() < self.capacity {
            let before = self.items.len();
            produce(&mut self.items);
            if self.items.len() <= before {
                log::warn!("pool fill producer added nothing, stopping at {}", before);
                break;
            }
        }
    }

    /// Remove and return the earliest-inserted item, recording it as the
    /// last extraction. `None` when the pool is empty.
    pub fn extract(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.last_extracted = Some(item.clone());
        Some(item)
    }

    /// Append `item`. A pool at capacity rejects the insert and hands the
    /// item back instead of raising.
    pub fn insert(&mut self, item: T) -> Result<(), T> {
        if self.items.len() >= self.capacity {
            return Err(item);
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Move `item` out of `source` and into the pool.
    ///
    /// Capacity is checked first: a full pool rejects with `Ok(false)` and
    /// leaves `source` untouched. Otherwise `item` must be a member of
    /// `source` (`Err(NotAMember)` when it is not), and on success the move
    /// is atomic - appended here, removed there - yielding `Ok(true)`.
    pub fn adopt(&mut self, item: &T, source: &mut Vec<T>) -> Result<bool, StageError> {
        if self.items.len() >= self.capacity {
            return Ok(false);
        }
        let index = source
            .iter()
            .position(|x| x == item)
            .ok_or(StageError::NotAMember)?;
        self.items.push_back(source.remove(index));
        Ok(true)
    }

    /// The most recently extracted item, if any extraction has happened.
    pub fn last_extracted(&self) -> Option<&T> {
        self.last_extracted.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}

impl<T: PartialEq + Clone> Default for Pool<T> {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
