// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand strength types.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use tablestakes_cards::{Card, Rank};

/// The hand rank tier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    /// The rank label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The strength of a classified poker hand.
///
/// Hands are compared by rank tier first, then by the ranks of the primary
/// cards in their stored order and then by the ranks of the kickers. Suits are
/// never used to break ties so two hands with the same ranks compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandStrength {
    rank: HandRank,
    primary: Vec<Card>,
    kickers: Vec<Card>,
}

impl HandStrength {
    /// Creates a hand strength.
    ///
    /// The primary cards and kickers must be in order of significance.
    pub fn new(rank: HandRank, primary: Vec<Card>, kickers: Vec<Card>) -> Self {
        Self {
            rank,
            primary,
            kickers,
        }
    }

    /// The hand rank tier.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The cards that make the hand rank.
    pub fn primary(&self) -> &[Card] {
        &self.primary
    }

    /// The cards used only to break ties.
    pub fn kickers(&self) -> &[Card] {
        &self.kickers
    }

    /// All the hand cards, primary cards first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.primary.iter().chain(self.kickers.iter())
    }

    /// The rank of the first primary card.
    pub fn lowest_primary_rank(&self) -> Option<Rank> {
        self.primary.first().map(Card::rank)
    }
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| {
                let lhs = self.primary.iter().map(Card::rank);
                lhs.cmp(other.primary.iter().map(Card::rank))
            })
            .then_with(|| {
                let lhs = self.kickers.iter().map(Card::rank);
                lhs.cmp(other.kickers.iter().map(Card::rank))
            })
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;

        for card in &self.primary {
            write!(f, " {card}")?;
        }

        if !self.kickers.is_empty() {
            write!(f, ", kickers")?;
            for card in &self.kickers {
                write!(f, " {card}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn rank_tiers_order() {
        use HandRank::*;
        let tiers = [
            HighCard,
            Pair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ];
        assert!(tiers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tier_beats_cards() {
        let flush = HandStrength::new(HandRank::Flush, cards("7H 5H 4H 3H 2H"), vec![]);
        let straight = HandStrength::new(HandRank::Straight, cards("AS KD QC JH TS"), vec![]);
        assert!(flush > straight);
    }

    #[test]
    fn primary_then_kickers() {
        let aces = HandStrength::new(HandRank::Pair, cards("AS AD"), cards("9C 5D 2H"));
        let kings = HandStrength::new(HandRank::Pair, cards("KS KD"), cards("QC JD TH"));
        assert!(aces > kings);

        let aces_better_kicker =
            HandStrength::new(HandRank::Pair, cards("AH AC"), cards("9S 6D 2C"));
        assert!(aces_better_kicker > aces);
    }

    #[test]
    fn suits_do_not_break_ties() {
        let h1 = HandStrength::new(HandRank::Pair, cards("AS AD"), cards("9C 5D 2H"));
        let h2 = HandStrength::new(HandRank::Pair, cards("AH AC"), cards("9S 5C 2D"));
        assert_eq!(h1, h2);
        assert_eq!(h1.cmp(&h2), Ordering::Equal);
    }

    #[test]
    fn display() {
        let h = HandStrength::new(HandRank::ThreeOfAKind, cards("AH AS AD"), cards("5D 4C"));
        assert_eq!(h.to_string(), "Three of a Kind AH AS AD, kickers 5D 4C");
        assert_eq!(h.lowest_primary_rank(), Some(Rank::Ace));

        let h = HandStrength::new(HandRank::Straight, cards("5D 4C 3C 2C AD"), vec![]);
        assert_eq!(h.to_string(), "Straight 5D 4C 3C 2C AD");
        assert_eq!(h.cards().count(), 5);
    }
}
