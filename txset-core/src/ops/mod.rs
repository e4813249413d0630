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

//! The three operation kernels (§4.E/F/G) and the `HelpOps` driver that
//! runs a descriptor's operations to completion, cooperating with
//! whichever other threads are helping the same descriptor (§4.D).

mod delete;
mod find;
mod insert;

use crate::{
    desc::{Desc, OpKind, Status},
    error::Result,
    list::List,
    node::Node,
    nodedesc::NodeDesc,
    sync::atm::{clr_mark, is_marked, set_mark, Guard, Shared},
};

/// The outcome of running one operation of a transaction.
pub(crate) enum OpOutcome<'g> {
    /// The operation succeeded. A delete that matched a previously-live
    /// node carries that node (and the op index that touched it) so the
    /// driver can finalize it once the whole transaction commits.
    Success(Option<(Shared<'g, Node>, u32)>),
    /// The operation failed; the whole transaction must abort.
    Failure,
}

/// Runs `desc`'s operations starting at `start_opid` to completion,
/// returning the transaction's final outcome (`true` = committed).
///
/// This is the public entry point other modules call; it wraps
/// [`help_ops_body`] in the per-thread cycle guard (§4.D). If this
/// thread is already helping `desc` somewhere up its own call stack,
/// helping it again here would close a cycle that can never resolve, so
/// `desc` is aborted instead of helped further.
pub(crate) fn help_ops(list: &List, desc: &Desc, start_opid: u32, guard: &Guard) -> Result<bool> {
    let desc_ptr = desc as *const Desc;
    match crate::help::with_help_frame(desc_ptr, || help_ops_body(list, desc, start_opid, guard)) {
        Some(r) => r,
        None => {
            log::debug!("help cycle detected on descriptor {desc_ptr:p}, forcing abort");
            if desc.try_abort() {
                list.metrics.abort();
            }
            Ok(false)
        }
    }
}

fn help_ops_body(list: &List, desc: &Desc, start_opid: u32, guard: &Guard) -> Result<bool> {
    let mut opid = start_opid;
    let mut ret = true;
    let mut finalize: Vec<(Shared<Node>, u32)> = Vec::new();

    while ret && desc.status() == Status::Live && (opid as usize) < desc.size() {
        let op = desc.op(opid as usize);
        let outcome = match op.kind {
            OpKind::Find => {
                let o = find::find(list, op.key, desc, opid, guard)?;
                list.metrics.find();
                o
            }
            OpKind::Insert => insert::insert(list, op.key, desc, opid, guard)?,
            OpKind::Delete => delete::delete(list, op.key, desc, opid, guard)?,
        };
        match outcome {
            OpOutcome::Success(deleted) => {
                if let Some(entry) = deleted {
                    finalize.push(entry);
                }
                opid += 1;
            }
            OpOutcome::Failure => ret = false,
        }
    }

    if ret {
        if desc.try_commit() {
            list.metrics.commit();
        }
        let desc_ptr = desc as *const Desc;
        for (node, node_opid) in finalize {
            finalize_deleted_node(node, desc_ptr, node_opid, guard);
        }
    } else if desc.try_abort() {
        list.metrics.abort();
    }

    Ok(desc.status() == Status::Committed)
}

/// Nudges a transaction whose evidence we just observed on a node
/// towards a conclusion before we act on that evidence (§4.H
/// `FinishPendingTxn`). This is how helping actually happens: a thread
/// blocked behind someone else's pending operation drives that
/// operation (and everything after it) forward instead of spinning.
fn finish_pending_txn(list: &List, observed: &NodeDesc, desc: &Desc, guard: &Guard) -> Result<()> {
    if observed.desc_ptr() == desc as *const Desc {
        return Ok(());
    }
    if observed.desc().status() == Status::Live {
        help_ops(list, observed.desc(), observed.opid() + 1, guard)?;
    }
    Ok(())
}

/// Marks a node that a committed delete removed: first the node's own
/// `node_desc` evidence slot (finalized-dead, §3 invariant 2), then its
/// `next` pointer (logically deleted, §3 invariant 1). Both marks are
/// applied via a small CAS retry loop rather than an unconditional
/// fetch-or, so a thread that loses the race to a concurrent finalizer
/// just observes the mark already set and stops.
fn finalize_deleted_node<'g>(node: Shared<'g, Node>, desc_ptr: *const Desc, opid: u32, guard: &'g Guard) {
    let node_ref = unsafe { node.deref() };
    loop {
        let current = node_ref.node_desc.ld_acq(guard);
        if is_marked(current) {
            break;
        }
        let evidence = unsafe { clr_mark(current).deref() };
        if !evidence.is_same(desc_ptr, opid) {
            // a later transaction has already overwritten this node's
            // evidence; finalizing it here would be finalizing someone
            // else's operation.
            break;
        }
        if node_ref.node_desc.cx_acr(current, set_mark(current), guard).is_ok() {
            break;
        }
    }
    loop {
        let next = node_ref.next.ld_acq(guard);
        if is_marked(next) {
            break;
        }
        if node_ref.next.cx_acr(next, set_mark(next), guard).is_ok() {
            break;
        }
    }
}
