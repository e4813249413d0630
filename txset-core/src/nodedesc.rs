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

use crate::desc::{Desc, Status};

/// The evidence record a node carries: which descriptor's which
/// operation last touched it (§3 invariant 3, §4.H). `desc` points at a
/// descriptor allocated from the never-reclaimed descriptor pool, so
/// dereferencing it is sound for as long as any `NodeDesc` referencing
/// it exists — which, under §9 decision (a), is forever.
pub struct NodeDesc {
    desc: *const Desc,
    opid: u32,
}

// SAFETY: `desc` only ever points at heap memory handed out by the
// descriptor pool, which never frees or moves what it allocates. The
// only mutable state reachable through the pointer is `Desc::status`,
// itself an atomic. There is therefore no data race hazard in sharing
// a `NodeDesc` (or the raw pointer inside it) across threads.
unsafe impl Send for NodeDesc {}
unsafe impl Sync for NodeDesc {}

impl NodeDesc {
    pub(crate) fn new(desc: *const Desc, opid: u32) -> Self {
        Self { desc, opid }
    }

    pub(crate) fn desc(&self) -> &Desc {
        // SAFETY: see the impl block comment above.
        unsafe { &*self.desc }
    }

    pub(crate) fn desc_ptr(&self) -> *const Desc {
        self.desc
    }

    pub(crate) fn opid(&self) -> u32 {
        self.opid
    }

    /// Whether `self` and `other` are evidence of the exact same
    /// operation (same descriptor, same op index).
    pub(crate) fn is_same_operation(&self, other: &NodeDesc) -> bool {
        self.desc == other.desc && self.opid == other.opid
    }

    /// Same as [`Self::is_same_operation`] but against a raw
    /// `(desc, opid)` pair rather than a freshly-built `NodeDesc`.
    pub(crate) fn is_same(&self, desc: *const Desc, opid: u32) -> bool {
        self.desc == desc && self.opid == opid
    }

    /// §3 invariant 4 — derives logical membership from the descriptor's
    /// status and the operation's kind, rather than storing it:
    /// `(status = Committed ∧ op = Insert) ∨ (status = Aborted ∧ op =
    /// Delete)`. A still-`Live` descriptor satisfies neither disjunct, so
    /// a node under a pending delete (or a pending insert) is not yet a
    /// member: the outcome is only known once the descriptor reaches a
    /// terminal state.
    pub(crate) fn is_key_exist(&self) -> bool {
        let op = self.desc().op(self.opid as usize);
        let status = self.desc().status();
        match op.kind {
            crate::desc::OpKind::Insert => status == Status::Committed,
            crate::desc::OpKind::Delete => status == Status::Aborted,
            crate::desc::OpKind::Find => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desc::{Op, OpKind};

    fn desc_with(kind: OpKind) -> Desc {
        let ops = vec![Op { kind, key: 1 }].into_boxed_slice();
        Desc::new(ops)
    }

    /// §3 invariant 4's truth table: membership is
    /// `(status = Committed ∧ insert) ∨ (status = Aborted ∧ delete)`. A
    /// still-`Live` descriptor is neither, for either op kind.
    #[test]
    fn membership_truth_table() {
        let live_insert = desc_with(OpKind::Insert);
        let nd = NodeDesc::new(&live_insert as *const Desc, 0);
        assert!(!nd.is_key_exist(), "a live insert is not yet a member");

        let committed_insert = desc_with(OpKind::Insert);
        assert!(committed_insert.try_commit());
        let nd = NodeDesc::new(&committed_insert as *const Desc, 0);
        assert!(nd.is_key_exist());

        let aborted_insert = desc_with(OpKind::Insert);
        assert!(aborted_insert.try_abort());
        let nd = NodeDesc::new(&aborted_insert as *const Desc, 0);
        assert!(!nd.is_key_exist());

        let live_delete = desc_with(OpKind::Delete);
        let nd = NodeDesc::new(&live_delete as *const Desc, 0);
        assert!(!nd.is_key_exist(), "a live delete already counts as gone");

        let committed_delete = desc_with(OpKind::Delete);
        assert!(committed_delete.try_commit());
        let nd = NodeDesc::new(&committed_delete as *const Desc, 0);
        assert!(!nd.is_key_exist());

        let aborted_delete = desc_with(OpKind::Delete);
        assert!(aborted_delete.try_abort());
        let nd = NodeDesc::new(&aborted_delete as *const Desc, 0);
        assert!(nd.is_key_exist(), "an aborted delete never took effect");
    }

    #[test]
    fn same_operation_identity() {
        let d = desc_with(OpKind::Find);
        let a = NodeDesc::new(&d as *const Desc, 0);
        let b = NodeDesc::new(&d as *const Desc, 0);
        assert!(a.is_same_operation(&b));
        assert!(a.is_same(&d as *const Desc, 0));
    }
}
