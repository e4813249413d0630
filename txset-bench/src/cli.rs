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

use clap::{Parser, ValueEnum};

const HELP_TEMPLATE: &str = r#"
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImplChoice {
    /// the lock-free transactional linked-list
    Tl,
    /// the single-mutex `BTreeSet` peer
    Stm,
    /// the sharded, `RwLock`-per-shard peer
    Hash,
    /// run all three, one after another
    All,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, help_template = HELP_TEMPLATE)]
pub struct Cli {
    #[arg(
        long,
        help = "Number of worker threads generating transactions",
        default_value_t = 8,
        value_name = "COUNT"
    )]
    pub threads: usize,

    #[arg(
        long,
        help = "Total number of transactions to run",
        default_value_t = 1_000_000,
        value_name = "COUNT"
    )]
    pub ops: usize,

    #[arg(
        long,
        help = "Size of the key space transactions draw from",
        default_value_t = 1 << 16,
        value_name = "COUNT"
    )]
    pub keyspace: u32,

    #[arg(
        long,
        help = "Number of operations bundled into each transaction",
        default_value_t = 1,
        value_name = "COUNT"
    )]
    pub ops_per_txn: usize,

    #[arg(long, help = "Percentage of ops that are inserts", default_value_t = 40)]
    pub insert_pct: u8,

    #[arg(long, help = "Percentage of ops that are deletes", default_value_t = 40)]
    pub delete_pct: u8,

    #[arg(long, help = "Percentage of ops that are finds", default_value_t = 20)]
    pub find_pct: u8,

    #[arg(
        long,
        help = "Which implementation(s) to run",
        value_enum,
        default_value_t = ImplChoice::All
    )]
    pub r#impl: ImplChoice,

    #[arg(long, help = "Emit the report as JSON instead of text", default_value_t = false)]
    pub json: bool,
}
