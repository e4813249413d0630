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

use crate::{
    desc::{Desc, Status},
    error::Result,
    list::List,
    node::Node,
    nodedesc::NodeDesc,
    ops::{finish_pending_txn, OpOutcome},
    sync::atm::{clr_mark, is_marked, set_mark, Atomic, Guard},
};

/// §4.E — installs `key` if absent, or otherwise races to stamp its own
/// evidence onto the existing node, failing the whole transaction if
/// the key is already present under a settled membership state.
///
/// The two CAS-retry points below follow the restart policy the spec
/// spells out explicitly rather than always re-walking from `head`:
/// losing the `pred.next` race (step 2) resumes from `pred` unless the
/// observed value was mark-set, in which case `pred` itself is gone and
/// the walk restarts from `head`; losing the `curr.nodeDesc` race (step
/// 3) just rereads `curr`'s evidence and retries in place.
pub(crate) fn insert<'g>(list: &'g List, key: u32, desc: &Desc, opid: u32, guard: &'g Guard) -> Result<OpOutcome<'g>> {
    let desc_ptr = desc as *const Desc;
    let (mut pred, mut curr) = list.locate_pred(key, guard);
    loop {
        let curr_ref = unsafe { curr.deref() };

        if curr_ref.key != key {
            if desc.status() != Status::Live {
                return Ok(OpOutcome::Failure);
            }
            let pred_ref = unsafe { pred.deref() };
            let node_desc = list.node_desc_pool.alloc(NodeDesc::new(desc_ptr, opid))?;
            let node_desc = node_desc.into_shared(guard);
            let new_node = list
                .node_pool
                .alloc(Node::new(key, Atomic::from(curr), Atomic::from(node_desc)))?;
            match pred_ref.next.cx_acr(curr, new_node, guard) {
                Ok(_) => {
                    list.metrics.insert_new();
                    return Ok(OpOutcome::Success(None));
                }
                Err(e) => {
                    if is_marked(e.current) {
                        (pred, curr) = list.locate_pred(key, guard);
                    } else {
                        (pred, curr) = list.locate_pred_from(pred, key, guard);
                    }
                    continue;
                }
            }
        }

        let old_node_desc_raw = curr_ref.node_desc.ld_acq(guard);
        if is_marked(old_node_desc_raw) {
            let curr_next = curr_ref.next.ld_acq(guard);
            if !is_marked(curr_next) {
                let _ = curr_ref.next.cx_acr(curr_next, set_mark(curr_next), guard);
            }
            (pred, curr) = list.locate_pred(key, guard);
            continue;
        }

        let old_node_desc = unsafe { old_node_desc_raw.deref() };
        finish_pending_txn(list, old_node_desc, desc, guard)?;

        if old_node_desc.is_same(desc_ptr, opid) {
            return Ok(OpOutcome::Success(None));
        }
        if old_node_desc.is_key_exist() {
            return Ok(OpOutcome::Failure);
        }
        if desc.status() != Status::Live {
            return Ok(OpOutcome::Failure);
        }

        let new_node_desc = list.node_desc_pool.alloc(NodeDesc::new(desc_ptr, opid))?;
        let new_node_desc = new_node_desc.into_shared(guard);
        match curr_ref.node_desc.cx_acr(clr_mark(old_node_desc_raw), new_node_desc, guard) {
            Ok(_) => {
                list.metrics.insert_existing();
                return Ok(OpOutcome::Success(None));
            }
            // §4.E step 3: retry in place against the same `curr`, not a
            // fresh walk — only the node's own evidence changed.
            Err(_) => continue,
        }
    }
}
