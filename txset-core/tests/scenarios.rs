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

//! Scenario tests that only need the public surface (`List::allocate_desc`,
//! `List::execute_ops`, `List::contains`), run as a top-level integration
//! suite the way `server/src/engine/sync/queue.rs` runs its concurrency
//! scenarios: plain `#[test]` functions, real `std::thread`s, no harness.

use txset_core::List;

#[test]
fn s1_insert_into_empty() {
    let list = List::new(8, 8, 8);
    let mut b = list.allocate_desc(1);
    b.insert(0, 5);
    assert!(list.execute_ops(b).unwrap());
    assert!(list.contains(5));
}

#[test]
fn s2_insert_present_aborts() {
    let list = List::new(8, 8, 8);
    let mut b = list.allocate_desc(1);
    b.insert(0, 5);
    assert!(list.execute_ops(b).unwrap());

    let mut b = list.allocate_desc(1);
    b.insert(0, 5);
    assert!(!list.execute_ops(b).unwrap());
    assert!(list.contains(5));
}

#[test]
fn s3_delete_then_insert_same_desc_commits() {
    let list = List::new(8, 8, 8);
    let mut b = list.allocate_desc(1);
    b.insert(0, 5);
    assert!(list.execute_ops(b).unwrap());

    let mut b = list.allocate_desc(2);
    b.delete(0, 5);
    b.insert(1, 5);
    assert!(list.execute_ops(b).unwrap());
    assert!(list.contains(5));
}

#[test]
fn r1_insert_then_delete_restores_initial_absence() {
    let list = List::new(16, 16, 16);
    let mut b = list.allocate_desc(1);
    b.insert(0, 7);
    assert!(list.execute_ops(b).unwrap());
    let mut b = list.allocate_desc(1);
    b.delete(0, 7);
    assert!(list.execute_ops(b).unwrap());
    assert!(!list.contains(7));
}

#[test]
fn r2_insert_delete_same_desc_leaves_no_trace() {
    let list = List::new(16, 16, 16);
    let mut b = list.allocate_desc(2);
    b.insert(0, 9);
    b.delete(1, 9);
    assert!(list.execute_ops(b).unwrap());
    assert!(!list.contains(9));
}

#[test]
fn r3_delete_then_insert_absent_key_leaves_it_present() {
    let list = List::new(16, 16, 16);
    let mut b = list.allocate_desc(2);
    b.delete(0, 11);
    b.insert(1, 11);
    assert!(list.execute_ops(b).unwrap());
    assert!(list.contains(11));
}

#[test]
fn b1_single_op_descriptors() {
    let list = List::new(16, 16, 16);
    let mut b = list.allocate_desc(1);
    b.find(0, 42);
    assert!(list.execute_ops(b).unwrap());

    let mut b = list.allocate_desc(1);
    b.insert(0, 42);
    assert!(list.execute_ops(b).unwrap());

    let mut b = list.allocate_desc(1);
    b.delete(0, 42);
    assert!(list.execute_ops(b).unwrap());
    assert!(!list.contains(42));
}

#[test]
fn concurrent_disjoint_transactions_all_commit() {
    use std::{sync::Arc, thread};

    const THREADS: u32 = 8;
    let list = Arc::new(List::new(4096, 4096, 4096));
    let mut handles = Vec::new();
    for i in 0..THREADS {
        let list = list.clone();
        handles.push(thread::spawn(move || {
            let base = i * 10;
            let mut b = list.allocate_desc(2);
            b.insert(0, base);
            b.find(1, base);
            assert!(list.execute_ops(b).unwrap());
        }));
    }
    for h in handles {
        h.join().unwrap();
    }
    for i in 0..THREADS {
        assert!(list.contains(i * 10));
    }
}
