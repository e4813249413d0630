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

//! Debug-only operation counters. These mirror the `ASSERT_CODE`-gated
//! tallies of the research prototype: cheap enough to always compile,
//! but only ever incremented in debug builds, so release builds pay
//! nothing for them.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    pub commit: AtomicU64,
    pub abort: AtomicU64,
    pub insert_new: AtomicU64,
    pub insert_existing: AtomicU64,
    pub delete_existing: AtomicU64,
    pub delete_absent: AtomicU64,
    pub find: AtomicU64,
}

macro_rules! bump {
    ($name:ident) => {
        #[inline(always)]
        pub(crate) fn $name(&self) {
            #[cfg(debug_assertions)]
            {
                self.$name.fetch_add(1, Ordering::Relaxed);
            }
        }
    };
}

impl Metrics {
    bump!(commit);
    bump!(abort);
    bump!(insert_new);
    bump!(insert_existing);
    bump!(delete_existing);
    bump!(delete_absent);
    bump!(find);

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commit: self.commit.load(Ordering::Relaxed),
            abort: self.abort.load(Ordering::Relaxed),
            insert_new: self.insert_new.load(Ordering::Relaxed),
            insert_existing: self.insert_existing.load(Ordering::Relaxed),
            delete_existing: self.delete_existing.load(Ordering::Relaxed),
            delete_absent: self.delete_absent.load(Ordering::Relaxed),
            find: self.find.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub commit: u64,
    pub abort: u64,
    pub insert_new: u64,
    pub insert_existing: u64,
    pub delete_existing: u64,
    pub delete_absent: u64,
    pub find: u64,
}
