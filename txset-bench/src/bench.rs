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

use {
    crate::{
        cli::ImplChoice,
        config::BenchConfig,
        error::{BResult, Error},
        report::{AggregatedReport, Stat},
    },
    libstress::Workpool,
    rand::Rng,
    std::{
        sync::{
            atomic::{AtomicU64, Ordering},
            Arc, Mutex,
        },
        time::Instant,
    },
    txset_core::desc::{Op, OpKind},
    txset_peers::{hash::ShardedSet, stm::CoarseLockSet, tl::LockFreeSet, TransactionalSet},
};

/// Generates `cfg.ops` independent transactions, each carrying
/// `cfg.ops_per_txn` randomly-chosen operations over `0..cfg.keyspace`,
/// split across `Insert`/`Delete`/`Find` according to the configured
/// percentages. Generated once and then replayed identically against
/// every implementation under test, so a run's numbers are comparable
/// across impls.
pub fn generate_workload(cfg: &BenchConfig) -> Vec<Vec<Op>> {
    let mut rng = rand::thread_rng();
    (0..cfg.ops)
        .map(|_| {
            (0..cfg.ops_per_txn)
                .map(|_| {
                    let key = rng.gen_range(0..cfg.keyspace);
                    let roll = rng.gen_range(0..100u32);
                    let kind = if roll < cfg.insert_pct as u32 {
                        OpKind::Insert
                    } else if roll < cfg.insert_pct as u32 + cfg.delete_pct as u32 {
                        OpKind::Delete
                    } else {
                        OpKind::Find
                    };
                    Op { kind, key }
                })
                .collect()
        })
        .collect()
}

/// Runs `workload` against `set` using `cfg.threads` workers, returning
/// the throughput and commit/abort split observed.
fn run_against(
    name: &'static str,
    cfg: &BenchConfig,
    set: Arc<dyn TransactionalSet + Send + Sync>,
    workload: Arc<Vec<Vec<Op>>>,
) -> BResult<Stat> {
    let commits = Arc::new(AtomicU64::new(0));
    let aborts = Arc::new(AtomicU64::new(0));
    // Workpool's worker closure has no return channel, so a fatal error
    // from a worker thread (pool exhaustion inside the lock-free peer) is
    // stashed here and checked once every dispatched job has finished.
    let failure: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

    let pool = {
        let set = set.clone();
        let workload = workload.clone();
        let commits = commits.clone();
        let aborts = aborts.clone();
        let failure = failure.clone();
        Workpool::new(
            cfg.threads,
            || (),
            move |_: &mut (), idx: usize| match set.execute_ops(&workload[idx]) {
                Ok(true) => {
                    commits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(false) => {
                    aborts.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    log::error!("worker aborting run: {e}");
                    *failure.lock().unwrap() = Some(e.to_string());
                }
            },
            |_: &mut ()| {},
            false,
        )
    };

    let start = Instant::now();
    for idx in 0..workload.len() {
        pool.execute(idx);
    }
    // dropping the pool blocks until every dispatched transaction has
    // been run: each worker processes the channel strictly in send
    // order, and the per-worker shutdown sentinel is only enqueued after
    // every real job, so join() in `Drop` can't return early.
    drop(pool);
    let elapsed = start.elapsed();

    if let Some(msg) = failure.lock().unwrap().take() {
        return Err(Error::Runtime(msg));
    }

    Ok(Stat::new(
        name,
        elapsed.as_nanos(),
        commits.load(Ordering::Relaxed),
        aborts.load(Ordering::Relaxed),
    ))
}

fn pool_sizing(cfg: &BenchConfig) -> (usize, usize, usize) {
    // Generous headroom: every transaction could in principle install a
    // fresh node/descriptor/evidence record per op, and delete-of-absent
    // always allocates a tombstone node even when nothing logically
    // changes (see the delete kernel), so this sizes for the worst case
    // rather than the expected case.
    let worst_case = cfg.ops.saturating_mul(cfg.ops_per_txn).saturating_add(cfg.keyspace as usize);
    (worst_case, cfg.ops, worst_case)
}

pub fn run(cfg: &BenchConfig) -> BResult<AggregatedReport> {
    let workload = Arc::new(generate_workload(cfg));
    let mut report = AggregatedReport::new();

    let want_tl = matches!(cfg.r#impl, ImplChoice::Tl | ImplChoice::All);
    let want_stm = matches!(cfg.r#impl, ImplChoice::Stm | ImplChoice::All);
    let want_hash = matches!(cfg.r#impl, ImplChoice::Hash | ImplChoice::All);

    if want_tl {
        log::info!("running workload against the lock-free list");
        let (node_cap, desc_cap, node_desc_cap) = pool_sizing(cfg);
        let set = Arc::new(LockFreeSet::new(node_cap, desc_cap, node_desc_cap));
        report.push(run_against("tl", cfg, set, workload.clone())?);
    }
    if want_stm {
        log::info!("running workload against the coarse-lock set");
        let set = Arc::new(CoarseLockSet::new());
        report.push(run_against("stm", cfg, set, workload.clone())?);
    }
    if want_hash {
        log::info!("running workload against the sharded set");
        let set = Arc::new(ShardedSet::new());
        report.push(run_against("hash", cfg, set, workload.clone())?);
    }

    Ok(report)
}
