// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pot accounting with side pots.
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::{
    error::HandError,
    poker::{Chips, HandStrength},
};

/// A pot level with the seats that can win it.
///
/// The first level is the main pot, each following level is a side pot whose
/// eligible seats are a subset of the previous level seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotLevel {
    /// The chips in this level.
    pub amount: Chips,
    /// The seats that can win this level, in seat order.
    pub eligible: Vec<usize>,
}

/// The chips won by a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The winner seat.
    pub seat: usize,
    /// The chips won.
    pub chips: Chips,
}

/// The chips bet in a hand.
///
/// The pot tracks each seat contribution for the whole hand, the pot levels
/// are computed from the contributions and the all in caps.
#[derive(Debug, Clone, Default)]
pub struct Pot {
    contributions: Vec<Chips>,
    folded: AHashSet<usize>,
    caps: Vec<Chips>,
}

impl Pot {
    /// Clears all bets.
    pub fn reset(&mut self) {
        self.contributions.clear();
        self.folded.clear();
        self.caps.clear();
    }

    /// Adds chips bet by a seat.
    pub fn add_bet(&mut self, seat: usize, amount: Chips) {
        if seat >= self.contributions.len() {
            self.contributions.resize(seat + 1, Chips::ZERO);
        }

        self.contributions[seat] += amount;
    }

    /// Removes a seat from all pots, its chips stay in the pot.
    pub fn fold(&mut self, seat: usize) {
        self.folded.insert(seat);
    }

    /// Caps a pot level at the given contribution.
    ///
    /// Contributions up to the cap go to the pot below it and the chips above
    /// it go to the next pot, calling this for many amounts nests levels.
    pub fn create_side_pot(&mut self, at: Chips) {
        if at.is_zero() {
            return;
        }

        if let Err(pos) = self.caps.binary_search(&at) {
            self.caps.insert(pos, at);
        }
    }

    /// The chips bet by a seat.
    pub fn contribution(&self, seat: usize) -> Chips {
        self.contributions.get(seat).copied().unwrap_or_default()
    }

    /// The total chips in the pot.
    pub fn total(&self) -> Chips {
        self.contributions.iter().sum()
    }

    /// The pot levels, main pot first.
    pub fn pots(&self) -> Vec<PotLevel> {
        let top = self.contributions.iter().max().copied().unwrap_or_default();
        if top.is_zero() {
            return Vec::new();
        }

        let mut levels = Vec::with_capacity(self.caps.len() + 1);
        let mut floor = Chips::ZERO;

        let caps = self.caps.iter().copied().filter(|&cap| cap < top);
        for cap in caps.chain(std::iter::once(top)) {
            let amount = self
                .contributions
                .iter()
                .map(|&c| c.min(cap) - c.min(floor))
                .sum();

            let eligible = self
                .contributions
                .iter()
                .enumerate()
                .filter(|&(seat, &c)| c >= cap && !self.folded.contains(&seat))
                .map(|(seat, _)| seat)
                .collect();

            levels.push(PotLevel { amount, eligible });
            floor = cap;
        }

        levels
    }

    /// Pays the pot to the winners.
    ///
    /// If `strengths` has a single seat with no strength that seat wins the
    /// whole pot, else each level goes to the eligible seats with the best
    /// strength. Split pots odd chips are paid one at a time in seat order
    /// starting after the button. A level nobody can win is added to the
    /// level below it.
    ///
    /// The pot is emptied only if the payouts match the collected chips, else
    /// [HandError::ChipsMismatch] is returned and nothing is paid.
    pub fn settle(
        &mut self,
        strengths: &AHashMap<usize, Option<HandStrength>>,
        button: usize,
        seats: usize,
    ) -> Result<Vec<Payout>, HandError> {
        let collected = self.total();
        let seats = seats.max(self.contributions.len()).max(1);
        let mut won = vec![Chips::ZERO; seats];

        let uncontested = match strengths.iter().next() {
            Some((&seat, None)) if strengths.len() == 1 && seat < seats => Some(seat),
            _ => None,
        };

        if let Some(seat) = uncontested {
            won[seat] = collected;
        } else {
            let mut carry = Chips::ZERO;

            // Top down so unclaimed chips fall into the next lower level.
            for level in self.pots().iter().rev() {
                let amount = level.amount + carry;
                let strength = |seat: &usize| strengths.get(seat).and_then(Option::as_ref);

                let Some(best) = level.eligible.iter().filter_map(strength).max() else {
                    carry = amount;
                    continue;
                };

                let mut winners = level
                    .eligible
                    .iter()
                    .copied()
                    .filter(|s| s < &seats && strength(s) == Some(best))
                    .collect::<Vec<_>>();
                winners.sort_by_key(|&s| (s + seats - button % seats - 1) % seats);

                let count = winners.len() as u32;
                let share = amount / count;
                let odd = (amount % count).amount() as usize;
                for (idx, seat) in winners.into_iter().enumerate() {
                    won[seat] += share;
                    if idx < odd {
                        won[seat] += Chips::new(1);
                    }
                }

                carry = Chips::ZERO;
            }
        }

        let paid: Chips = won.iter().sum();
        if paid != collected {
            return Err(HandError::ChipsMismatch { paid, collected });
        }

        self.reset();

        Ok(won
            .into_iter()
            .enumerate()
            .filter(|(_, chips)| !chips.is_zero())
            .map(|(seat, chips)| Payout { seat, chips })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use tablestakes_eval::HandRank;

    fn strength(rank: HandRank, cards: &str) -> Option<HandStrength> {
        let cards = cards
            .split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect();
        Some(HandStrength::new(rank, cards, vec![]))
    }

    fn chips(amount: u32) -> Chips {
        Chips::new(amount)
    }

    #[test]
    fn side_pot_levels() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(100));
        pot.add_bet(1, chips(100));
        pot.add_bet(2, chips(50));
        pot.create_side_pot(chips(50));

        let levels = pot.pots();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].amount, chips(150));
        assert_eq!(levels[0].eligible, vec![0, 1, 2]);
        assert_eq!(levels[1].amount, chips(100));
        assert_eq!(levels[1].eligible, vec![0, 1]);
        assert_eq!(pot.total(), chips(250));
    }

    #[test]
    fn short_stack_wins_main_pot() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(100));
        pot.add_bet(1, chips(100));
        pot.add_bet(2, chips(50));
        pot.create_side_pot(chips(50));

        let strengths = AHashMap::from_iter([
            (0, strength(HandRank::Pair, "QS QD")),
            (1, strength(HandRank::Pair, "JS JD")),
            (2, strength(HandRank::Pair, "AS AD")),
        ]);

        let payouts = pot.settle(&strengths, 0, 3).unwrap();
        assert_eq!(
            payouts,
            vec![
                Payout {
                    seat: 0,
                    chips: chips(100)
                },
                Payout {
                    seat: 2,
                    chips: chips(150)
                },
            ]
        );
        assert_eq!(pot.total(), Chips::ZERO);
    }

    #[test]
    fn folded_seat_is_not_eligible() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(40));
        pot.add_bet(1, chips(40));
        pot.add_bet(2, chips(20));
        pot.fold(2);

        let levels = pot.pots();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].amount, chips(100));
        assert_eq!(levels[0].eligible, vec![0, 1]);
    }

    #[test]
    fn single_survivor_takes_all() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(10));
        pot.add_bet(1, chips(60));
        pot.add_bet(2, chips(30));
        pot.create_side_pot(chips(30));
        pot.fold(0);
        pot.fold(2);

        let strengths = AHashMap::from_iter([(1, None)]);
        let payouts = pot.settle(&strengths, 0, 3).unwrap();
        assert_eq!(
            payouts,
            vec![Payout {
                seat: 1,
                chips: chips(100)
            }]
        );
    }

    #[test]
    fn odd_chips_start_after_button() {
        let mut pot = Pot::default();
        for seat in 0..3 {
            pot.add_bet(seat, chips(33));
        }
        pot.add_bet(3, chips(2));
        pot.fold(3);

        // 101 chips split by 3 seats, 2 odd chips.
        let tie = strength(HandRank::Straight, "9S 8D 7C 6H 5S");
        let strengths = AHashMap::from_iter([(0, tie.clone()), (1, tie.clone()), (2, tie)]);

        let payouts = pot.clone().settle(&strengths, 1, 4).unwrap();
        let won = payouts.iter().map(|p| (p.seat, p.chips.amount())).collect::<Vec<_>>();
        assert_eq!(won, vec![(0, 34), (1, 33), (2, 34)]);

        let payouts = pot.settle(&strengths, 3, 4).unwrap();
        let won = payouts.iter().map(|p| (p.seat, p.chips.amount())).collect::<Vec<_>>();
        assert_eq!(won, vec![(0, 34), (1, 34), (2, 33)]);
    }

    #[test]
    fn unclaimed_level_falls_to_lower_level() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(50));
        pot.add_bet(1, chips(80));
        pot.add_bet(2, chips(80));
        pot.create_side_pot(chips(50));
        pot.fold(1);
        pot.fold(2);

        let levels = pot.pots();
        assert_eq!(levels[1].eligible, Vec::<usize>::new());

        let strengths = AHashMap::from_iter([(0, strength(HandRank::HighCard, "AS"))]);
        let payouts = pot.settle(&strengths, 0, 3).unwrap();
        assert_eq!(
            payouts,
            vec![Payout {
                seat: 0,
                chips: chips(210)
            }]
        );
    }

    #[test]
    fn mismatch_keeps_the_chips() {
        let mut pot = Pot::default();
        pot.add_bet(0, chips(20));
        pot.add_bet(1, chips(20));
        pot.fold(0);
        pot.fold(1);

        let strengths = AHashMap::from_iter([(0, strength(HandRank::HighCard, "AS"))]);
        let res = pot.settle(&strengths, 0, 2);
        assert_eq!(
            res,
            Err(HandError::ChipsMismatch {
                paid: Chips::ZERO,
                collected: chips(40)
            })
        );
        assert_eq!(pot.total(), chips(40));
    }

    #[test]
    fn settlement_conserves_chips() {
        let ranks = [
            HandRank::HighCard,
            HandRank::Pair,
            HandRank::TwoPair,
            HandRank::Straight,
        ];
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..500 {
            let seats = rng.random_range(2..=6);
            let mut pot = Pot::default();
            let mut in_hand = Vec::new();

            for seat in 0..seats {
                let bet = chips(rng.random_range(1..=200));
                pot.add_bet(seat, bet);

                // All in players cap the pot at their bet.
                if rng.random_bool(0.3) {
                    pot.create_side_pot(bet);
                }

                if rng.random_bool(0.3) {
                    pot.fold(seat);
                } else {
                    in_hand.push(seat);
                }
            }

            // Make sure someone can win the top level.
            let top = (0..seats).max_by_key(|&s| pot.contribution(s)).unwrap();
            if !in_hand.contains(&top) {
                in_hand.push(top);
                pot.folded.remove(&top);
            }

            let strengths = in_hand
                .iter()
                .map(|&s| {
                    let rank = *ranks.choose(&mut rng).unwrap();
                    (s, strength(rank, "AS"))
                })
                .collect::<AHashMap<_, _>>();

            let total = pot.total();
            let levels_total: Chips = pot.pots().iter().map(|l| l.amount).sum();
            assert_eq!(levels_total, total);

            let button = rng.random_range(0..seats);
            let payouts = pot.settle(&strengths, button, seats).unwrap();
            let paid: Chips = payouts.iter().map(|p| p.chips).sum();
            assert_eq!(paid, total);
            assert!(payouts.iter().all(|p| strengths.contains_key(&p.seat)));
        }
    }
}
