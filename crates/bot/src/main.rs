// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tablestakes bot hand runner.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::error;

use tablestakes_bot::{AlwaysCallOrCheck, Config, RandomStrategy, core::DecisionSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Always call or check.
    Call,
    /// Call or check with some random folds and raises.
    Random,
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players.
    #[clap(long, short, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=6))]
    players: u8,
    /// The players starting chips.
    #[clap(long, default_value_t = 1_000)]
    stack: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    big_blind: u32,
    /// Maximum number of raises per betting round.
    #[clap(long, default_value_t = 4)]
    raise_limit: u32,
    /// Seed for the deck and the random strategy.
    #[clap(long)]
    seed: Option<u64>,
    /// The seat that sees its hole cards.
    #[clap(long)]
    observer: Option<usize>,
    /// The bots strategy.
    #[clap(long, short, value_enum, default_value_t = Strategy::Random)]
    strategy: Strategy,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let config = Config {
        players: cli.players as usize,
        stack: cli.stack.into(),
        big_blind: cli.big_blind.into(),
        raise_limit: cli.raise_limit,
        seed: cli.seed,
        observer: cli.observer,
    };

    let seed = cli.seed;
    let strategy = cli.strategy;
    let res = tablestakes_bot::run(config, |seat| -> Box<dyn DecisionSource> {
        match strategy {
            Strategy::Call => Box::new(AlwaysCallOrCheck),
            Strategy::Random => match seed {
                Some(seed) => Box::new(RandomStrategy::with_seed(seed.wrapping_add(seat as u64))),
                None => Box::new(RandomStrategy::new()),
            },
        }
    });

    if let Err(e) = &res {
        error!("Hand error: {e}");
    }

    res.map(|_| ())
}
