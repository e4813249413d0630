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

//! Reference implementations of the same "multi-op transaction over a set
//! of `u32` keys" contract the lock-free list in `txset-core` implements,
//! so a benchmark can run the identical workload generator against all
//! three and compare:
//!
//! - [`stm::CoarseLockSet`]: the whole set behind one lock, transactions
//!   applied as a single critical section.
//! - [`hash::ShardedSet`]: a sharded hash table, one lock per shard,
//!   transactions spanning more than one shard lock those shards in a
//!   fixed global order.
//! - [`tl::LockFreeSet`]: a thin adapter over `txset_core::List`.

pub mod hash;
pub mod stm;
pub mod tl;

use txset_core::desc::Op;

/// The contract every peer (and the lock-free core, via [`tl::LockFreeSet`])
/// implements: run a batch of operations as one all-or-nothing transaction.
///
/// Semantics, matched across every implementation so a workload sees the
/// same outcomes regardless of which one is under test:
/// - an `Insert` of a key already present aborts the whole transaction,
/// - a `Delete` of an absent key is not a failure — it simply has no
///   further effect,
/// - a `Find` never causes an abort.
///
/// Returns `Ok(true)` iff every operation's effects were applied.
/// `Err` surfaces a resource failure underneath the implementation (for
/// [`tl::LockFreeSet`], pool exhaustion) — a condition the caller, not
/// this trait, decides how to handle.
pub trait TransactionalSet {
    fn execute_ops(&self, ops: &[Op]) -> Result<bool, txset_core::Error>;

    /// Read-through membership check, independent of any transaction.
    fn contains(&self, key: u32) -> bool;
}
