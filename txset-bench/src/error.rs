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

use std::fmt::Display;

pub type BResult<T> = Result<T, Error>;

/// Benchmark harness errors.
pub enum Error {
    /// The CLI arguments describe an impossible workload (percentages that
    /// don't sum to 100, a zero thread count, and so on).
    Config(String),
    /// The lock-free peer reported a fatal error (pool exhaustion) while
    /// running the workload.
    Runtime(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config error: {e}"),
            Error::Runtime(e) => write!(f, "runtime error: {e}"),
        }
    }
}
