/*
 * Created on Sun Feb 01 2026
 *
 * This file is a part of txset
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
*/

//! Pooled, never-freeing allocation for `Node`, `Desc` and `NodeDesc`
//! records (§4.A, §9 decision (a)).
//!
//! The algorithm's correctness depends on no record ever being reused
//! while another thread might still hold a transiently-read reference to
//! it. Rather than layer epoch-based reclamation under the allocator, this
//! pool sidesteps the question entirely: it performs a real heap
//! allocation per `alloc()` call, but only up to a capacity reserved at
//! construction time. Past that capacity, `alloc()` reports exhaustion
//! instead of growing, so a caller can size the pool once at startup and
//! trust it never silently degrades into unbounded memory growth.

use {
    crate::{error::Error, sync::atm::Owned},
    std::sync::atomic::{AtomicUsize, Ordering},
};

/// The kind of record a pool is backing, used only to make an exhaustion
/// error legible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Node,
    Desc,
    NodeDesc,
}

impl std::fmt::Display for PoolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Desc => write!(f, "desc"),
            Self::NodeDesc => write!(f, "node-desc"),
        }
    }
}

/// A bounded, never-freeing allocator for `T`.
pub struct Pool<T> {
    kind: PoolKind,
    capacity: usize,
    allocated: AtomicUsize,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Pool<T> {
    /// Reserves a pool able to hand out up to `capacity` records of `T`
    /// over its lifetime. This does not pre-touch `capacity * size_of::<T>()`
    /// bytes; it only reserves the right to allocate that many.
    pub fn with_capacity(kind: PoolKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            allocated: AtomicUsize::new(0),
            _marker: std::marker::PhantomData,
        }
    }

    /// Number of records handed out so far.
    pub fn in_use(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Allocates a new `T`, initialized to `value`, from this pool.
    ///
    /// The returned [`Owned`] is never destined to be dropped by this
    /// crate: it is always installed into the list via a CAS and then
    /// left in place (or abandoned, per §4.E) for the lifetime of the
    /// program.
    pub fn alloc(&self, value: T) -> Result<Owned<T>, Error> {
        // fetch_add is fine here: overshoot past capacity under race is
        // harmless, it just means a handful of threads racing at the
        // boundary all see exhaustion instead of exactly one of them.
        let prev = self.allocated.fetch_add(1, Ordering::Relaxed);
        if prev >= self.capacity {
            log::warn!("{} pool exhausted at capacity {}", self.kind, self.capacity);
            return Err(Error::PoolExhausted {
                kind: self.kind,
                capacity: self.capacity,
            });
        }
        Ok(Owned::new(value))
    }

    /// Convenience for allocation sites where exhaustion is understood to
    /// be the fatal configuration error described in §4.A/§7: the pool
    /// was sized wrong for the workload, and there is no sane recovery.
    pub fn alloc_or_abort(&self, value: T) -> Owned<T> {
        match self.alloc(value) {
            Ok(owned) => owned,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_up_to_capacity_succeeds() {
        let pool: Pool<u32> = Pool::with_capacity(PoolKind::Node, 3);
        for i in 0..3 {
            assert!(pool.alloc(i).is_ok());
        }
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn alloc_past_capacity_reports_exhaustion() {
        let pool: Pool<u32> = Pool::with_capacity(PoolKind::NodeDesc, 1);
        assert!(pool.alloc(1).is_ok());
        let err = pool.alloc(2).err().expect("pool should be exhausted");
        match err {
            Error::PoolExhausted { kind, capacity } => {
                assert_eq!(kind, PoolKind::NodeDesc);
                assert_eq!(capacity, 1);
            }
        }
    }
}
