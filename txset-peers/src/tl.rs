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

//! Adapts `txset_core::List` to [`crate::TransactionalSet`] so the
//! benchmark harness can drive it with the same workload generator it
//! uses against the coarse-lock and sharded peers.

use {crate::TransactionalSet, txset_core::desc::Op, txset_core::List};

pub struct LockFreeSet {
    list: List,
}

impl LockFreeSet {
    pub fn new(node_capacity: usize, desc_capacity: usize, node_desc_capacity: usize) -> Self {
        Self {
            list: List::new(node_capacity, desc_capacity, node_desc_capacity),
        }
    }

    pub fn metrics(&self) -> txset_core::MetricsSnapshot {
        self.list.metrics()
    }
}

impl TransactionalSet for LockFreeSet {
    fn execute_ops(&self, ops: &[Op]) -> Result<bool, txset_core::Error> {
        let mut builder = self.list.allocate_desc(ops.len());
        for (opid, op) in ops.iter().enumerate() {
            builder.set(opid, op.kind, op.key);
        }
        // Pool exhaustion (the host sized a pool too small for the
        // workload it then threw at it) is propagated rather than
        // panicked on, so a caller — a benchmark harness, say — decides
        // whether to abort the run or keep going.
        self.list.execute_ops(builder)
    }

    fn contains(&self, key: u32) -> bool {
        self.list.contains(key)
    }
}
