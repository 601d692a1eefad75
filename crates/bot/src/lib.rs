// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tablestakes Bot.
//!
//! Plays a hand between bots with a [DecisionSource] for each seat.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use log::info;

use tablestakes_core::{
    Chips, DecisionSource, Hand, HandConfig, HandEvent, HandResult, Player, ShuffledDeck,
};

mod strategy;
pub use strategy::{AlwaysCallOrCheck, RandomStrategy};

/// Re-export the core crate.
pub use tablestakes_core as core;

/// Bot hand configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of players.
    pub players: usize,
    /// The players starting chips.
    pub stack: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// The maximum number of raises per betting round.
    pub raise_limit: u32,
    /// The deck seed, a random deck if `None`.
    pub seed: Option<u64>,
    /// The seat that sees its hole cards.
    pub observer: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let hand = HandConfig::default();
        Self {
            players: 2,
            stack: Chips::new(1_000),
            big_blind: hand.big_blind,
            raise_limit: hand.raise_limit,
            seed: None,
            observer: None,
        }
    }
}

static NICKNAMES: &[&str] = &["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

/// Plays a hand given a config and a strategy factory called for each seat.
pub fn run<F, S>(config: Config, mut factory: F) -> Result<HandResult>
where
    F: FnMut(usize) -> S,
    S: DecisionSource + 'static,
{
    let hand_config = HandConfig {
        big_blind: config.big_blind,
        raise_limit: config.raise_limit,
        ..Default::default()
    };

    let supply = match config.seed {
        Some(seed) => ShuffledDeck::with_seed(seed),
        None => ShuffledDeck::new(),
    };

    let mut hand = Hand::new(hand_config, supply);
    if let Some(seat) = config.observer {
        hand = hand.with_observer(seat);
    }

    let players = (0..config.players)
        .map(|idx| Player::new(NICKNAMES[idx % NICKNAMES.len()], config.stack))
        .collect();
    hand.seat_players(players)?;

    let mut sources = (0..config.players)
        .map(|seat| Box::new(factory(seat)) as Box<dyn DecisionSource>)
        .collect::<Vec<_>>();

    let result = hand.play(&mut sources)?;

    let board = hand
        .drain_events()
        .filter_map(|event| match event {
            HandEvent::CommunityCard(card) => Some(card.to_string()),
            HandEvent::Finished(_) | HandEvent::Aborted(_) => None,
        })
        .collect::<Vec<_>>();
    info!("Board {}", board.join(" "));

    for shown in &result.showdown {
        info!("Seat {} {}", shown.seat, shown.strength);
    }

    for player in hand.players() {
        info!("{} has {} chips", player.name, player.chips);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_seeded_hand() {
        let config = Config {
            players: 4,
            seed: Some(42),
            observer: Some(0),
            ..Default::default()
        };

        let result = run(config.clone(), |_| AlwaysCallOrCheck).unwrap();
        assert_eq!(result.board.len(), 5);
        assert_eq!(result.showdown.len(), 4);

        let paid = result.payouts.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, config.big_blind * 4);

        // Same seed same hand.
        let again = run(config, |_| AlwaysCallOrCheck).unwrap();
        assert_eq!(result, again);
    }

    #[test]
    fn run_needs_two_players() {
        let config = Config {
            players: 1,
            ..Default::default()
        };

        let err = run(config, |_| AlwaysCallOrCheck).unwrap_err();
        assert!(err.to_string().contains("at least 2 players"));
    }
}
