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
    crate::{cli::Cli, config::BenchConfig, error::BResult},
    clap::Parser,
    env_logger::Builder,
    std::{env, process},
};

mod bench;
mod cli;
mod config;
mod error;
mod report;

fn main() {
    Builder::new()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    if let Err(e) = run() {
        log::error!("txset-bench exited with error: {e}");
        process::exit(0x01);
    }
}

fn run() -> BResult<()> {
    let cli = Cli::parse();
    let json = cli.json;
    let cfg: BenchConfig = cli.try_into()?;
    let report = bench::run(&cfg)?;

    if json {
        println!("{}", report.into_json());
    } else {
        for stat in report.into_sorted() {
            let _ = libsky::util::terminal::write_success(format!(
                "{:>5}: {:>12.2} txns/sec\n",
                stat.name(),
                stat.txns_per_sec()
            ));
        }
    }
    Ok(())
}
