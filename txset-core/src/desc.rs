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

//! The transaction descriptor (`Desc`), the tri-state status it carries,
//! and the builder a caller uses to assemble one before submission
//! (§4.C, §6).

use std::sync::atomic::{AtomicU8, Ordering};

/// The kind of a single operation within a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Find,
    Insert,
    Delete,
}

/// One operation within a transaction: a kind and the key it targets.
#[derive(Debug, Clone, Copy)]
pub struct Op {
    pub kind: OpKind,
    pub key: u32,
}

/// The tri-state outcome of a transaction (§3, §4.C).
///
/// Once a descriptor leaves `Live` it never returns to it: the status
/// only ever advances `Live -> Committed` or `Live -> Aborted`, and both
/// terminal states are permanent for the lifetime of the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Live = 0,
    Committed = 1,
    Aborted = 2,
}

impl Status {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Status::Live,
            1 => Status::Committed,
            2 => Status::Aborted,
            _ => unreachable!("corrupt descriptor status byte"),
        }
    }
}

/// A submitted, immutable transaction descriptor.
///
/// `ops` is fixed at construction time; nothing in this crate ever
/// mutates it after a `Desc` is built, only the `status` field moves.
/// Descriptors are allocated once from the descriptor pool and never
/// reclaimed (§4.A, §9), so a `*const Desc` handed out by
/// [`crate::list::List::execute_ops`]'s helpers stays valid for the life
/// of the process.
pub struct Desc {
    status: AtomicU8,
    ops: Box<[Op]>,
}

impl Desc {
    pub(crate) fn new(ops: Box<[Op]>) -> Self {
        Self {
            status: AtomicU8::new(Status::Live as u8),
            ops,
        }
    }

    pub fn size(&self) -> usize {
        self.ops.len()
    }

    pub fn op(&self, opid: usize) -> Op {
        self.ops[opid]
    }

    pub fn status(&self) -> Status {
        Status::from_u8(self.status.load(Ordering::Acquire))
    }

    /// `Live -> Committed`, only ever attempted once per descriptor by
    /// the help routine that drove all of its operations to success.
    pub(crate) fn try_commit(&self) -> bool {
        self.status
            .compare_exchange(
                Status::Live as u8,
                Status::Committed as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// `Live -> Aborted`, attempted by whichever helper first observes a
    /// blocking condition (a cycle, or a kernel reporting failure).
    pub(crate) fn try_abort(&self) -> bool {
        self.status
            .compare_exchange(
                Status::Live as u8,
                Status::Aborted as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// Builds a `Desc` before submission. Returned by
/// [`crate::list::List::allocate_desc`]; the caller fills every slot
/// with [`DescBuilder::set`] (or the `find`/`insert`/`delete`
/// convenience wrappers) and then hands the builder to
/// [`crate::list::List::execute_ops`], which consumes it. There is no
/// way to mutate a submitted descriptor's operations afterward: the
/// builder is gone once `execute_ops` takes it by value.
pub struct DescBuilder {
    ops: Vec<Option<Op>>,
}

impl DescBuilder {
    pub(crate) fn with_capacity(size: usize) -> Self {
        assert!(size > 0, "a transaction must contain at least one operation");
        Self {
            ops: vec![None; size],
        }
    }

    /// Fills operation `opid` directly, mirroring the index-based
    /// `ops[opid] = ...` assembly described in §4.C.
    pub fn set(&mut self, opid: usize, kind: OpKind, key: u32) -> &mut Self {
        self.ops[opid] = Some(Op { kind, key });
        self
    }

    pub fn find(&mut self, opid: usize, key: u32) -> &mut Self {
        self.set(opid, OpKind::Find, key)
    }

    pub fn insert(&mut self, opid: usize, key: u32) -> &mut Self {
        self.set(opid, OpKind::Insert, key)
    }

    pub fn delete(&mut self, opid: usize, key: u32) -> &mut Self {
        self.set(opid, OpKind::Delete, key)
    }

    pub(crate) fn into_ops(self) -> Box<[Op]> {
        self.ops
            .into_iter()
            .enumerate()
            .map(|(i, o)| o.unwrap_or_else(|| panic!("operation slot {i} was never filled")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transitions_are_monotonic_and_terminal() {
        let d = Desc::new(vec![Op { kind: OpKind::Find, key: 1 }].into_boxed_slice());
        assert_eq!(d.status(), Status::Live);
        assert!(d.try_commit());
        assert_eq!(d.status(), Status::Committed);
        // a terminal status can never be displaced, by either CAS.
        assert!(!d.try_commit());
        assert!(!d.try_abort());
        assert_eq!(d.status(), Status::Committed);
    }

    #[test]
    fn builder_fills_every_slot_by_index() {
        let mut b = DescBuilder::with_capacity(3);
        b.find(1, 10).insert(0, 20).delete(2, 30);
        let ops = b.into_ops();
        assert_eq!(ops[0].kind, OpKind::Insert);
        assert_eq!(ops[1].kind, OpKind::Find);
        assert_eq!(ops[2].kind, OpKind::Delete);
        assert_eq!(ops[2].key, 30);
    }

    #[test]
    #[should_panic(expected = "operation slot")]
    fn builder_panics_on_unfilled_slot() {
        let b = DescBuilder::with_capacity(2);
        let _ = b.into_ops();
    }
}
