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

//! The sorted singly-linked list itself: construction, and the shared
//! predecessor/successor walk (`locate_pred`) every kernel builds on
//! top of (§4.B).

use crate::{
    desc::{Desc, DescBuilder},
    error::Result,
    node::{Node, NEG_INF, POS_INF},
    pool::{Pool, PoolKind},
    sync::atm::{clr_mark, cpin, is_marked, Atomic, Guard, Owned, Shared},
};

/// The list's two sentinels plus the pools every kernel allocates
/// through.
pub struct List {
    head: Atomic<Node>,
    pub(crate) node_pool: Pool<Node>,
    pub(crate) desc_pool: Pool<crate::desc::Desc>,
    pub(crate) node_desc_pool: Pool<crate::nodedesc::NodeDesc>,
    pub(crate) metrics: crate::metrics::Metrics,
}

impl List {
    /// Builds an empty list (just the two sentinels) with pools able to
    /// serve up to `node_capacity` / `desc_capacity` / `node_desc_capacity`
    /// allocations respectively over the list's lifetime (§4.A).
    pub fn new(node_capacity: usize, desc_capacity: usize, node_desc_capacity: usize) -> Self {
        let tail = Owned::new(Node::sentinel(POS_INF, Atomic::null()));
        // SAFETY: construction is single-threaded and precedes any
        // concurrent access to the list.
        let guard = unsafe { crossbeam_epoch::unprotected() };
        let tail_shared = tail.into_shared(guard);
        let head = Node::sentinel(NEG_INF, Atomic::from(tail_shared));
        List {
            head: Atomic::new_alloc(head),
            node_pool: Pool::with_capacity(PoolKind::Node, node_capacity),
            desc_pool: Pool::with_capacity(PoolKind::Desc, desc_capacity),
            node_desc_pool: Pool::with_capacity(PoolKind::NodeDesc, node_desc_capacity),
            metrics: crate::metrics::Metrics::default(),
        }
    }

    pub(crate) fn head<'g>(&self, guard: &'g Guard) -> Shared<'g, Node> {
        self.head.ld_acq(guard)
    }

    pub(crate) fn pin(&self) -> Guard {
        cpin()
    }

    /// `AllocateDesc` (§4.C, §6): hands the caller a builder with `size`
    /// writable op slots. The caller fills every slot (`DescBuilder::set`
    /// or the `find`/`insert`/`delete` shorthands) and submits the result
    /// to [`Self::execute_ops`]. Nothing here touches the descriptor
    /// pool yet — that only happens at submission, so a builder abandoned
    /// before `execute_ops` never consumes pool capacity.
    pub fn allocate_desc(&self, size: usize) -> DescBuilder {
        DescBuilder::with_capacity(size)
    }

    /// `ExecuteOps` (§4.C, §4.D, §6): allocates the submitted builder's
    /// `Desc` from the descriptor pool, then drives it to a terminal
    /// state through the helping engine. Returns `true` iff every op
    /// committed; `false` means none of the descriptor's ops took any
    /// lasting effect.
    pub fn execute_ops(&self, builder: DescBuilder) -> Result<bool> {
        let ops = builder.into_ops();
        let desc = self.desc_pool.alloc(Desc::new(ops))?;
        let guard = self.pin();
        let desc_shared = desc.into_shared(&guard);
        // SAFETY: the descriptor pool never reclaims, so this reference
        // stays valid for as long as the program runs, well past `guard`.
        let desc_ref = unsafe { desc_shared.deref() };
        crate::ops::help_ops(self, desc_ref, 0, &guard)
    }

    /// A snapshot of this list's debug-only operation counters (§4.A
    /// metrics, gated by `#[cfg(debug_assertions)]` internally — in a
    /// release build every field reads back as zero).
    pub fn metrics(&self) -> crate::metrics::MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Convenience for tests and callers that want a read-through
    /// membership check without assembling a `FIND`-only descriptor
    /// (§9 `Find` semantics open question: presence is a property of the
    /// list's current state, not of any op's boolean return).
    pub fn contains(&self, key: u32) -> bool {
        let guard = self.pin();
        let (_, curr) = self.locate_pred(key, &guard);
        let curr_ref = unsafe { curr.deref() };
        if curr_ref.key != key {
            return false;
        }
        let node_desc = curr_ref.node_desc.ld_acq(&guard);
        if is_marked(node_desc) {
            return false;
        }
        unsafe { clr_mark(node_desc).deref() }.is_key_exist()
    }

    /// Walks the list to find the pair of adjacent nodes `(pred, curr)`
    /// such that `pred.key < key <= curr.key`, opportunistically
    /// unlinking any run of logically-deleted nodes found strictly
    /// between them. Always starts the walk at `head`.
    ///
    /// Edge-case policy (§4.B): if the CAS that excises a marked run
    /// fails, the actually-observed value of `pred.next` decides what
    /// happens next — if that value is itself marked, `pred` has been
    /// deleted out from under us and the whole walk restarts from
    /// `head`; otherwise only the unlink attempt at this `pred` is
    /// retried.
    pub(crate) fn locate_pred<'g>(&self, key: u32, guard: &'g Guard) -> (Shared<'g, Node>, Shared<'g, Node>) {
        self.locate_pred_from(self.head(guard), key, guard)
    }

    /// Same walk as [`Self::locate_pred`], but resumes from a
    /// caller-supplied node instead of `head`. This is the "restart from
    /// `pred`" resume path §4.E/§4.F call for when a kernel's own CAS
    /// races and the observed value wasn't mark-set: there is no need to
    /// re-walk the whole list from the sentinel, only to re-derive
    /// `curr` from the `pred` the kernel already has in hand (mirroring
    /// `LocatePred(curr, key)`'s resume-from-passed-in-node behavior in
    /// the research prototype this algorithm is modeled on).
    ///
    /// If the walk discovers `start` itself has been unlinked out from
    /// under it, that is a structural change the resume path can't paper
    /// over, so it falls back to a full walk from `head`.
    pub(crate) fn locate_pred_from<'g>(
        &self,
        start: Shared<'g, Node>,
        key: u32,
        guard: &'g Guard,
    ) -> (Shared<'g, Node>, Shared<'g, Node>) {
        let mut curr = start;
        let mut pred = curr;
        loop {
            // SAFETY: every reachable node (sentinels included) is
            // backed by the never-reclaiming pools, so it outlives
            // every guard that could observe it.
            if unsafe { curr.deref() }.key >= key {
                return (pred, curr);
            }
            pred = curr;
            curr = match self.unlink_and_advance(pred, guard) {
                Some(c) => c,
                None => return self.locate_pred(key, guard),
            };
        }
    }

    /// Reads `pred.next`, skips past any run of logically-deleted nodes
    /// immediately following it, opportunistically CASing them out, and
    /// returns the first live successor. Returns `None` if the attempt
    /// discovers `pred` itself has been deleted, signalling the caller
    /// should restart its walk from `head`.
    fn unlink_and_advance<'g>(&self, pred: Shared<'g, Node>, guard: &'g Guard) -> Option<Shared<'g, Node>> {
        loop {
            let pred_ref = unsafe { pred.deref() };
            let pred_next_raw = pred_ref.next.ld_acq(guard);
            let pred_next = clr_mark(pred_next_raw);
            let mut c = pred_next;
            loop {
                let c_next = unsafe { c.deref() }.next.ld_acq(guard);
                if !is_marked(c_next) {
                    break;
                }
                c = clr_mark(c_next);
            }
            if c == pred_next {
                return Some(c);
            }
            match pred_ref.next.cx_acr(pred_next_raw, c, guard) {
                Ok(_) => return Some(c),
                Err(e) => {
                    if is_marked(e.current) {
                        return None;
                    }
                    // retry the unlink attempt at this same pred with
                    // the freshly-observed value
                    continue;
                }
            }
        }
    }

    /// Test-only: the keys of every physically-reachable, non-dead node
    /// between the sentinels, in list order. Walking with
    /// `unlink_and_advance` splices out any already-marked run along the
    /// way, so this is the right primitive for checking P1 (sortedness)
    /// and P2 (at-most-one-node-per-key) once a run is quiescent.
    #[cfg(test)]
    pub(crate) fn physical_keys(&self) -> Vec<u32> {
        'from_head: loop {
            let guard = self.pin();
            let mut keys = Vec::new();
            let mut pred = self.head(&guard);
            loop {
                match self.unlink_and_advance(pred, &guard) {
                    Some(next) => {
                        let next_ref = unsafe { next.deref() };
                        if next_ref.key == POS_INF {
                            return keys;
                        }
                        keys.push(next_ref.key);
                        pred = next;
                    }
                    None => continue 'from_head,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn assert_sorted_unique(keys: &[u32]) {
        for w in keys.windows(2) {
            assert!(w[0] < w[1], "list not sorted/unique: {keys:?}");
        }
    }

    #[test]
    fn empty_list_has_no_members() {
        let list = List::new(8, 8, 8);
        assert!(!list.contains(5));
        assert!(list.physical_keys().is_empty());
    }

    #[test]
    fn s5_disjoint_keyspace_from_many_threads() {
        const THREADS: u32 = 8;
        let list = Arc::new(List::new(4096, 4096, 4096));
        let mut handles = Vec::new();
        for i in 0..THREADS {
            let list = list.clone();
            handles.push(thread::spawn(move || {
                let base = i * 10;
                let mut b = list.allocate_desc(3);
                b.insert(0, base);
                b.insert(1, base + 1000);
                b.delete(2, base);
                assert!(list.execute_ops(b).unwrap());
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        for i in 0..THREADS {
            let base = i * 10;
            assert!(!list.contains(base));
            assert!(list.contains(base + 1000));
        }
        assert_sorted_unique(&list.physical_keys());
    }

    #[test]
    fn b2_concurrent_insert_same_key_exactly_one_survives() {
        const THREADS: usize = 8;
        let list = Arc::new(List::new(64, 64, 64));
        let mut handles = Vec::new();
        for _ in 0..THREADS {
            let list = list.clone();
            handles.push(thread::spawn(move || {
                let mut b = list.allocate_desc(1);
                b.insert(0, 99);
                list.execute_ops(b).unwrap()
            }));
        }
        let commits: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|committed| *committed)
            .count();
        assert_eq!(commits, 1);
        assert!(list.contains(99));
        assert_eq!(
            list.physical_keys().iter().filter(|&&k| k == 99).count(),
            1
        );
    }

    #[test]
    fn b3_cyclic_descriptors_do_not_deadlock() {
        let list = Arc::new(List::new(64, 64, 64));
        let l1 = list.clone();
        let t1 = thread::spawn(move || {
            let mut b = l1.allocate_desc(2);
            b.insert(0, 1);
            b.delete(1, 2);
            l1.execute_ops(b).unwrap()
        });
        let l2 = list.clone();
        let t2 = thread::spawn(move || {
            let mut b = l2.allocate_desc(2);
            b.insert(0, 2);
            b.delete(1, 1);
            l2.execute_ops(b).unwrap()
        });
        // the point of this scenario is absence of deadlock: both threads
        // must return (committed or aborted) without either blocking on
        // the other forever.
        let _ = (t1.join().unwrap(), t2.join().unwrap());
        assert_sorted_unique(&list.physical_keys());
    }

    #[test]
    fn s6_mutually_dependent_descriptors_never_duplicate_keys() {
        let list = Arc::new(List::new(512, 512, 512));
        for _ in 0..50 {
            let l1 = list.clone();
            let t1 = thread::spawn(move || {
                let mut b = l1.allocate_desc(2);
                b.insert(0, 1);
                b.delete(1, 2);
                l1.execute_ops(b)
            });
            let l2 = list.clone();
            let t2 = thread::spawn(move || {
                let mut b = l2.allocate_desc(2);
                b.insert(0, 2);
                b.delete(1, 1);
                l2.execute_ops(b)
            });
            t1.join().unwrap().unwrap();
            t2.join().unwrap().unwrap();
            assert_sorted_unique(&list.physical_keys());
        }
    }

    #[test]
    fn s4_finds_always_commit_alongside_racing_deletes() {
        // repeated deletes of an already-absent key still commit (§4.F
        // step 2 installs a fresh tombstone rather than failing), so the
        // property this scenario actually pins down is: FIND-only
        // descriptors always commit, and membership never comes back.
        let list = Arc::new(List::new(64, 4096, 64));
        let mut b = list.allocate_desc(1);
        b.insert(0, 5);
        assert!(list.execute_ops(b).unwrap());

        let deleter_list = list.clone();
        let deleter = thread::spawn(move || {
            for _ in 0..200 {
                let mut b = deleter_list.allocate_desc(1);
                b.delete(0, 5);
                assert!(deleter_list.execute_ops(b).unwrap());
            }
        });
        let finder_list = list.clone();
        let finder = thread::spawn(move || {
            for _ in 0..200 {
                let mut b = finder_list.allocate_desc(1);
                b.find(0, 5);
                assert!(finder_list.execute_ops(b).unwrap());
            }
        });
        deleter.join().unwrap();
        finder.join().unwrap();
        assert!(!list.contains(5));
    }

    /// Fuzzes a small keyspace with random insert/delete/find transactions
    /// from several threads, then checks P1/P2 hold once everything has
    /// quiesced. Not a proof of lock-freedom, but cheap insurance that no
    /// interleaving this run happens to hit leaves the list unsorted or
    /// carrying a duplicate key.
    #[test]
    fn random_mixed_workload_preserves_sortedness_and_uniqueness() {
        use rand::Rng;

        const KEYSPACE: u32 = 64;
        const THREADS: usize = 6;
        const TXNS_PER_THREAD: usize = 300;

        let list = Arc::new(List::new(8192, 8192, 8192));
        let mut handles = Vec::new();
        for _ in 0..THREADS {
            let list = list.clone();
            handles.push(thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..TXNS_PER_THREAD {
                    let ops_in_txn = rng.gen_range(1..=3);
                    let mut b = list.allocate_desc(ops_in_txn);
                    for opid in 0..ops_in_txn {
                        let key = rng.gen_range(0..KEYSPACE);
                        match rng.gen_range(0..3) {
                            0 => b.insert(opid, key),
                            1 => b.delete(opid, key),
                            _ => b.find(opid, key),
                        };
                    }
                    let _ = list.execute_ops(b).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_sorted_unique(&list.physical_keys());
    }
}
