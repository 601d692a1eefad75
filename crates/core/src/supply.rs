// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Card supplies used to deal a hand.
use rand::prelude::*;

use crate::poker::{Card, Deck};

/// A source of cards for a hand.
pub trait CardSupply {
    /// Gets a fresh sequence of cards with no repeated card.
    fn reset(&mut self);

    /// Deals the next card, returns `None` if there are no more cards.
    fn deal(&mut self, face_down: bool) -> Option<Card>;
}

/// A shuffled 52 cards deck.
#[derive(Debug)]
pub struct ShuffledDeck {
    rng: StdRng,
    deck: Deck,
}

impl ShuffledDeck {
    /// Creates a deck seeded from the system entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates a deck with a seed, for reproducible hands.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let deck = Deck::new_and_shuffled(&mut rng);
        Self { rng, deck }
    }

    /// The number of cards left.
    pub fn count(&self) -> usize {
        self.deck.count()
    }
}

impl Default for ShuffledDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSupply for ShuffledDeck {
    fn reset(&mut self) {
        self.deck = Deck::new_and_shuffled(&mut self.rng);
    }

    fn deal(&mut self, _face_down: bool) -> Option<Card> {
        self.deck.deal()
    }
}

/// Deals a fixed sequence of cards.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    cards: Vec<Card>,
    next: usize,
}

impl StackedDeck {
    /// Creates a deck that deals the cards in order.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, next: 0 }
    }
}

impl CardSupply for StackedDeck {
    fn reset(&mut self) {
        self.next = 0;
    }

    fn deal(&mut self, _face_down: bool) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn shuffled_deck_is_fresh_on_reset() {
        let mut supply = ShuffledDeck::with_seed(11);
        let first = (0..5).filter_map(|_| supply.deal(true)).collect::<Vec<_>>();
        assert_eq!(supply.count(), Deck::SIZE - 5);

        supply.reset();
        assert_eq!(supply.count(), Deck::SIZE);

        let mut seen = AHashSet::new();
        while let Some(card) = supply.deal(false) {
            assert!(seen.insert(card));
        }
        assert_eq!(seen.len(), Deck::SIZE);

        let mut other = ShuffledDeck::with_seed(11);
        let again = (0..5).filter_map(|_| other.deal(true)).collect::<Vec<_>>();
        assert_eq!(first, again);
    }

    #[test]
    fn stacked_deck_rewinds() {
        let cards = ["AS", "KD"]
            .iter()
            .map(|c| c.parse().unwrap())
            .collect::<Vec<Card>>();
        let mut supply = StackedDeck::new(cards.clone());
        assert_eq!(supply.deal(true), Some(cards[0]));
        assert_eq!(supply.deal(false), Some(cards[1]));
        assert_eq!(supply.deal(false), None);

        supply.reset();
        assert_eq!(supply.deal(true), Some(cards[0]));
    }
}
