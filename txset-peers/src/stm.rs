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

//! The coarse-lock peer: one `parking_lot::Mutex` guarding the entire set.
//! Every transaction is a single critical section, so "all-or-nothing" is
//! free — there is nothing to roll back, because nothing outside the lock
//! ever observes an in-progress transaction.

use {
    crate::TransactionalSet,
    parking_lot::Mutex,
    std::collections::BTreeSet,
    txset_core::desc::{Op, OpKind},
    txset_core::Error,
};

/// A `BTreeSet<u32>` behind a single mutex. The simplest possible
/// transactional set: correctness comes entirely from serializing every
/// transaction through the lock, at the cost of zero intra-set
/// parallelism.
pub struct CoarseLockSet {
    inner: Mutex<BTreeSet<u32>>,
}

impl CoarseLockSet {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BTreeSet::new()),
        }
    }
}

impl Default for CoarseLockSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalSet for CoarseLockSet {
    fn execute_ops(&self, ops: &[Op]) -> Result<bool, Error> {
        let mut guard = self.inner.lock();
        // Work against a scratch copy so an aborted transaction never
        // needs to unwind partial mutations: nothing is written back to
        // `*guard` unless every op committed.
        let mut working = guard.clone();
        let mut committed = true;
        for op in ops {
            match op.kind {
                OpKind::Find => {}
                OpKind::Insert => {
                    if !working.insert(op.key) {
                        committed = false;
                        break;
                    }
                }
                OpKind::Delete => {
                    working.remove(&op.key);
                }
            }
        }
        if committed {
            *guard = working;
        } else {
            log::debug!("coarse-lock transaction aborted: insert of already-present key");
        }
        Ok(committed)
    }

    fn contains(&self, key: u32) -> bool {
        self.inner.lock().contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(kind: OpKind, key: u32) -> Op {
        Op { kind, key }
    }

    #[test]
    fn insert_then_find_commits() {
        let set = CoarseLockSet::new();
        assert!(set.execute_ops(&[b(OpKind::Insert, 1)]).unwrap());
        assert!(set.contains(1));
    }

    #[test]
    fn insert_present_key_aborts_whole_transaction() {
        let set = CoarseLockSet::new();
        assert!(set.execute_ops(&[b(OpKind::Insert, 1)]).unwrap());
        assert!(!set.execute_ops(&[b(OpKind::Insert, 2), b(OpKind::Insert, 1)]).unwrap());
        // the Insert(2) from the aborted transaction must not have stuck.
        assert!(!set.contains(2));
    }

    #[test]
    fn delete_of_absent_key_does_not_abort() {
        let set = CoarseLockSet::new();
        assert!(set.execute_ops(&[b(OpKind::Delete, 5)]).unwrap());
        assert!(!set.contains(5));
    }
}
