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
    cli::{Cli, ImplChoice},
    error::{BResult, Error},
};

#[derive(Clone)]
pub struct BenchConfig {
    pub threads: usize,
    pub ops: usize,
    pub keyspace: u32,
    pub ops_per_txn: usize,
    pub insert_pct: u8,
    pub delete_pct: u8,
    pub find_pct: u8,
    pub r#impl: ImplChoice,
    pub json: bool,
}

impl TryFrom<Cli> for BenchConfig {
    type Error = Error;

    fn try_from(cli: Cli) -> BResult<Self> {
        if cli.threads == 0 {
            return Err(Error::Config("`--threads` must be nonzero".into()));
        }
        if cli.ops_per_txn == 0 {
            return Err(Error::Config("`--ops-per-txn` must be nonzero".into()));
        }
        if cli.keyspace == 0 {
            return Err(Error::Config("`--keyspace` must be nonzero".into()));
        }
        let total_pct = cli.insert_pct as u32 + cli.delete_pct as u32 + cli.find_pct as u32;
        if total_pct != 100 {
            return Err(Error::Config(format!(
                "`--insert-pct`, `--delete-pct` and `--find-pct` must sum to 100, got {total_pct}"
            )));
        }
        Ok(Self {
            threads: cli.threads,
            ops: cli.ops,
            keyspace: cli.keyspace,
            ops_per_txn: cli.ops_per_txn,
            insert_pct: cli.insert_pct,
            delete_pct: cli.delete_pct,
            find_pct: cli.find_pct,
            r#impl: cli.r#impl,
            json: cli.json,
        })
    }
}
