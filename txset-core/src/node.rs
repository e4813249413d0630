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

use crate::{nodedesc::NodeDesc, sync::atm::Atomic};

/// A key below every possible user key, used for the head sentinel.
/// User keys must lie strictly between [`NEG_INF`] and [`POS_INF`]: the
/// two sentinel values (`0` and `0xffffffff`) are reserved and can never
/// be inserted, found or deleted as ordinary keys.
pub const NEG_INF: u32 = u32::MIN;
/// A key above every possible user key, used for the tail sentinel.
pub const POS_INF: u32 = u32::MAX;

/// A single list node (§3 Data model).
///
/// `next` carries the deletion mark in its low bit; `node_desc` carries
/// the independent finalized-dead mark in its low bit. Both are read and
/// written exclusively through the `sync::atm` helpers so the two bits
/// are never confused or forgotten.
pub struct Node {
    pub key: u32,
    pub next: Atomic<Node>,
    pub node_desc: Atomic<NodeDesc>,
}

impl Node {
    /// Builds a sentinel node (no node-descriptor; sentinels never
    /// participate in the logical-membership state machine of §4.H).
    pub fn sentinel(key: u32, next: Atomic<Node>) -> Self {
        Self {
            key,
            next,
            node_desc: Atomic::null(),
        }
    }

    /// Builds a regular node carrying the `NodeDesc` of the transaction
    /// that is installing it.
    pub fn new(key: u32, next: Atomic<Node>, node_desc: Atomic<NodeDesc>) -> Self {
        Self {
            key,
            next,
            node_desc,
        }
    }
}
