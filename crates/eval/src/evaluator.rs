// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best hand evaluator.
//!
//! The evaluator enumerates all the hands of a given size that can be built
//! from a player private cards and the shared board cards, classifies each
//! combination into a [HandStrength] and returns the strongest one.
use tablestakes_cards::{Card, Rank};

use crate::strength::{HandRank, HandStrength};

/// Evaluates the best hand out of private and shared cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandEvaluator {
    hand_size: usize,
    min_private: usize,
    max_private: usize,
}

impl HandEvaluator {
    /// The number of cards in a poker hand.
    pub const HAND_SIZE: usize = 5;

    /// Creates an evaluator for hands with `hand_size` cards that use at least
    /// `min_private` and at most `max_private` private cards.
    ///
    /// Panics if `hand_size` is not 1 <= hand_size <= 5 or if `min_private` is
    /// greater than `max_private`.
    pub fn new(hand_size: usize, min_private: usize, max_private: usize) -> Self {
        assert!(
            (1..=Self::HAND_SIZE).contains(&hand_size),
            "1 <= hand_size <= {}",
            Self::HAND_SIZE
        );
        assert!(min_private <= max_private, "min_private <= max_private");

        Self {
            hand_size,
            min_private,
            max_private,
        }
    }

    /// Texas Hold'em evaluator, the best 5 cards using any of the two hole cards.
    pub fn holdem() -> Self {
        Self::new(Self::HAND_SIZE, 0, 2)
    }

    /// Returns the strongest hand that can be built from the given cards.
    ///
    /// If there are fewer cards than the hand size all cards are classified as
    /// a single hand. Returns `None` if there are no cards or no combination
    /// satisfies the private cards bounds.
    pub fn evaluate(&self, private: &[Card], shared: &[Card]) -> Option<HandStrength> {
        // Sort cards so that the result doesn't depend on the input order.
        let mut cards = private
            .iter()
            .map(|c| (*c, true))
            .chain(shared.iter().map(|c| (*c, false)))
            .collect::<Vec<_>>();
        cards.sort_by(|a, b| b.cmp(a));

        if cards.is_empty() {
            return None;
        }

        if cards.len() <= self.hand_size {
            let num_private = cards.iter().filter(|(_, private)| *private).count();
            if !(self.min_private..=self.max_private).contains(&num_private) {
                return None;
            }

            let hand = cards.iter().map(|(c, _)| *c).collect::<Vec<_>>();
            return Some(Self::classify(&hand));
        }

        let mut best: Option<HandStrength> = None;
        let mut hand = Vec::with_capacity(self.hand_size);
        let mut idx = (0..self.hand_size).collect::<Vec<_>>();

        loop {
            let num_private = idx.iter().filter(|&&i| cards[i].1).count();
            if (self.min_private..=self.max_private).contains(&num_private) {
                hand.clear();
                hand.extend(idx.iter().map(|&i| cards[i].0));

                let strength = Self::classify(&hand);
                if best.as_ref().is_none_or(|b| strength > *b) {
                    best = Some(strength);
                }
            }

            if !next_combination(&mut idx, cards.len()) {
                break;
            }
        }

        best
    }

    /// Classifies a hand of up to five cards.
    ///
    /// Straights and flushes need five cards, the ace plays both high and low
    /// so that A-2-3-4-5 is the lowest straight.
    ///
    /// Panics if `cards` is empty.
    pub fn classify(cards: &[Card]) -> HandStrength {
        assert!(!cards.is_empty(), "classify needs at least one card");

        let mut sorted = cards.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));

        // Group cards by rank, larger groups first and higher ranks first.
        let mut groups: Vec<Vec<Card>> = Vec::with_capacity(sorted.len());
        for card in &sorted {
            match groups.last_mut() {
                Some(group) if group[0].rank() == card.rank() => group.push(*card),
                _ => groups.push(vec![*card]),
            }
        }
        groups.sort_by(|a, b| b.len().cmp(&a.len()).then(b[0].rank().cmp(&a[0].rank())));

        let is_flush = sorted.len() == Self::HAND_SIZE
            && sorted.iter().all(|c| c.suit() == sorted[0].suit());

        // With a straight all ranks are distinct so only a flush can beat it.
        if let Some(straight) = straight_cards(&sorted, groups.len()) {
            let rank = if is_flush {
                HandRank::StraightFlush
            } else {
                HandRank::Straight
            };
            return HandStrength::new(rank, straight, vec![]);
        }

        let rest = |from: usize| groups[from..].concat();

        match (groups[0].len(), groups.get(1).map(Vec::len)) {
            (4, _) => HandStrength::new(HandRank::FourOfAKind, groups[0].clone(), rest(1)),
            (3, Some(2)) => HandStrength::new(HandRank::FullHouse, rest(0), vec![]),
            _ if is_flush => HandStrength::new(HandRank::Flush, sorted, vec![]),
            (3, _) => HandStrength::new(HandRank::ThreeOfAKind, groups[0].clone(), rest(1)),
            (2, Some(2)) => HandStrength::new(HandRank::TwoPair, rest(0)[..4].to_vec(), rest(2)),
            (2, _) => HandStrength::new(HandRank::Pair, groups[0].clone(), rest(1)),
            _ => HandStrength::new(HandRank::HighCard, groups[0].clone(), rest(1)),
        }
    }
}

/// Returns the straight cards from the highest to the lowest if the cards,
/// sorted by descending rank, make a straight.
fn straight_cards(sorted: &[Card], distinct_ranks: usize) -> Option<Vec<Card>> {
    if sorted.len() != HandEvaluator::HAND_SIZE || distinct_ranks != HandEvaluator::HAND_SIZE {
        return None;
    }

    let high = sorted[0].rank().value();
    let low = sorted[4].rank().value();
    if high - low == 4 {
        return Some(sorted.to_vec());
    }

    // The wheel, the ace moves to the bottom.
    if sorted[0].rank() == Rank::Ace && sorted[1].rank() == Rank::Five {
        let mut wheel = sorted.to_vec();
        wheel.rotate_left(1);
        return Some(wheel);
    }

    None
}

/// Advances `idx` to the next k-combination of `0..n` in lexicographic order,
/// returns false when all combinations have been visited.
fn next_combination(idx: &mut [usize], n: usize) -> bool {
    let k = idx.len();
    let Some(i) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
        return false;
    };

    idx[i] += 1;
    for j in (i + 1)..k {
        idx[j] = idx[j - 1] + 1;
    }

    true
}
