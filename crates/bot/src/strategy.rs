// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use rand::prelude::*;

use tablestakes_core::{Action, ActionKind, ActionRequest, DecisionSource, Hand};

/// Calls any bet and checks when there is nothing to call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCallOrCheck;

impl DecisionSource for AlwaysCallOrCheck {
    fn decide(&mut self, _hand: &Hand, req: &ActionRequest) -> Action {
        if req.can_call() {
            Action::Call(req.call_amount)
        } else if req.can_check() {
            Action::Check
        } else if req.can_all_in() {
            Action::AllIn(req.stack)
        } else {
            Action::Fold
        }
    }
}

/// A strategy with some randomness.
///
/// Raises preflop with a pair, sometimes folds to a bet and sometimes raises
/// for no reason, otherwise calls or checks.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Creates a strategy with a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionSource for RandomStrategy {
    fn decide(&mut self, hand: &Hand, req: &ActionRequest) -> Action {
        let p = self.rng.random::<f64>();

        if let Some(player) = hand.player(req.seat) {
            let cards = player.cards();
            let pair = cards.len() == 2 && cards[0].rank() == cards[1].rank();

            // Raise preflop with a pair, once.
            if pair
                && hand.board().is_empty()
                && req.can_raise()
                && player.last_action != ActionKind::Raise
                && p > 0.2
            {
                return Action::Raise(req.min_raise_to);
            }
        }

        if p < 0.1 && !req.can_check() {
            Action::Fold
        } else if p > 0.95 && req.can_raise() {
            let to = self
                .rng
                .random_range(req.min_raise_to.amount()..=req.max_raise_to.amount());
            Action::Raise(to.into())
        } else if req.can_call() {
            Action::Call(req.call_amount)
        } else if req.can_check() {
            Action::Check
        } else if req.can_all_in() {
            Action::AllIn(req.stack)
        } else {
            Action::Fold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestakes_core::{Chips, HandConfig, Phase, Player, ShuffledDeck};

    fn hand(seed: u64, stacks: &[u32]) -> Hand {
        let mut hand = Hand::new(HandConfig::default(), ShuffledDeck::with_seed(seed));
        let players = stacks
            .iter()
            .enumerate()
            .map(|(idx, &chips)| Player::new(format!("Bot{idx}"), Chips::new(chips)))
            .collect();
        hand.seat_players(players).unwrap();
        hand
    }

    #[test]
    fn call_or_check_actions() {
        let mut hand = hand(1, &[1000, 1000]);
        hand.start().unwrap();

        let mut strategy = AlwaysCallOrCheck;
        let req = hand.awaiting().unwrap().clone();
        assert_eq!(
            strategy.decide(&hand, &req),
            Action::Call(Chips::new(10))
        );

        hand.submit(0, Action::Call(Chips::new(10))).unwrap();
        let req = hand.awaiting().unwrap().clone();
        assert_eq!(strategy.decide(&hand, &req), Action::Check);
    }

    #[test]
    fn call_or_check_goes_all_in_when_short() {
        let mut hand = hand(1, &[1000, 1000, 50]);
        hand.start().unwrap();
        hand.submit(0, Action::Raise(Chips::new(100))).unwrap();
        hand.submit(1, Action::Fold).unwrap();

        let mut strategy = AlwaysCallOrCheck;
        let req = hand.awaiting().unwrap().clone();
        assert_eq!(req.seat, 2);
        assert_eq!(strategy.decide(&hand, &req), Action::AllIn(Chips::new(30)));
    }

    #[test]
    fn random_strategy_plays_legal_actions() {
        for seed in 0..200 {
            let stacks = [200, 1000, 500, 60, 1000];
            let count = 2 + (seed as usize % 4);
            let mut hand = hand(seed, &stacks[..count]);

            let mut sources = (0..count)
                .map(|seat| {
                    Box::new(RandomStrategy::with_seed(seed * 10 + seat as u64))
                        as Box<dyn DecisionSource>
                })
                .collect::<Vec<_>>();

            hand.play(&mut sources).unwrap();
            assert_eq!(hand.phase(), Phase::Finished);

            let total = hand.players().iter().map(|p| p.chips).sum::<Chips>();
            let expected = stacks[..count].iter().map(|&c| Chips::new(c)).sum::<Chips>();
            assert_eq!(total, expected);
        }
    }
}
