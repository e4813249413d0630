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

use core::cmp::Ordering;

/// One implementation's result for a single run: throughput plus the
/// commit/abort split the workload produced against it.
#[derive(serde::Serialize, Debug)]
pub struct Stat {
    name: &'static str,
    txns_per_sec: f64,
    commits: u64,
    aborts: u64,
}

impl Stat {
    pub fn new(name: &'static str, elapsed_nanos: u128, commits: u64, aborts: u64) -> Self {
        let total = commits + aborts;
        let txns_per_sec = total as f64 / (elapsed_nanos as f64 / 1_000_000_000_f64);
        Self {
            name,
            txns_per_sec,
            commits,
            aborts,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn txns_per_sec(&self) -> f64 {
        self.txns_per_sec
    }
}

impl PartialEq for Stat {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Stat {}

impl PartialOrd for Stat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name)
    }
}

/// The run's full report: one [`Stat`] per implementation that was
/// benchmarked, always emitted in a stable (lexicographic) order.
pub struct AggregatedReport {
    stats: Vec<Stat>,
}

impl AggregatedReport {
    pub fn new() -> Self {
        Self { stats: Vec::new() }
    }

    pub fn push(&mut self, stat: Stat) {
        self.stats.push(stat);
    }

    pub fn into_sorted(mut self) -> Vec<Stat> {
        self.stats.sort();
        self.stats
    }

    pub fn into_json(self) -> String {
        serde_json::to_string(&self.into_sorted()).unwrap()
    }
}

impl Default for AggregatedReport {
    fn default() -> Self {
        Self::new()
    }
}
