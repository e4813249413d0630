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

use {crate::pool::PoolKind, std::fmt::Display};

pub type Result<T> = std::result::Result<T, Error>;

/// Core library errors. The only fallible operation the core exposes is
/// allocation (§4.A) — transaction outcomes are communicated through the
/// plain `bool` returned by [`crate::List::execute_ops`], never through
/// this type.
#[derive(Debug)]
pub enum Error {
    /// A pool ran out of its pre-reserved capacity. This is a fatal
    /// configuration error (§7): the host sized the pool too small for
    /// its own workload.
    PoolExhausted { kind: PoolKind, capacity: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::PoolExhausted { kind, capacity } => {
                write!(f, "{kind} pool exhausted (capacity {capacity})")
            }
        }
    }
}

impl std::error::Error for Error {}
