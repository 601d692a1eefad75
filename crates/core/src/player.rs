// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand player types.
use serde::{Deserialize, Serialize};

use crate::{
    action::ActionKind,
    poker::{Card, Chips},
};

/// A card dealt to a player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleCard {
    /// The card value.
    pub card: Card,
    /// The card is hidden to the observer.
    pub face_down: bool,
}

/// A hand player state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// This player name.
    pub name: String,
    /// The chips behind.
    pub chips: Chips,
    /// The chips bet in the current round.
    pub round_bet: Chips,
    /// The chips put in the pot in this hand.
    pub in_pot: Chips,
    /// This player private cards.
    pub hole_cards: Vec<HoleCard>,
    /// The last player action in the current round.
    pub last_action: ActionKind,
    /// The player folded this hand.
    pub folded: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            round_bet: Chips::ZERO,
            in_pot: Chips::ZERO,
            hole_cards: Vec::new(),
            last_action: ActionKind::None,
            folded: false,
        }
    }

    /// The player can still make decisions in this hand.
    pub fn can_act(&self) -> bool {
        !self.folded && self.chips > Chips::ZERO
    }

    /// The player has not folded.
    pub fn is_in_hand(&self) -> bool {
        !self.folded
    }

    /// The player is in the hand with no chips behind.
    pub fn is_all_in(&self) -> bool {
        self.is_in_hand() && self.chips == Chips::ZERO
    }

    /// The private cards values.
    pub fn cards(&self) -> Vec<Card> {
        self.hole_cards.iter().map(|c| c.card).collect()
    }

    /// Moves chips from the stack to the round bet.
    ///
    /// Returns the chips moved, that are less than the amount if the player
    /// doesn't have enough chips.
    pub fn bet(&mut self, amount: Chips) -> Chips {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.round_bet += amount;
        self.in_pot += amount;
        amount
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
        self.last_action = ActionKind::Fold;
    }

    /// Reset state for a new hand, a player with no chips sits out.
    pub fn start_hand(&mut self) {
        self.folded = self.chips == Chips::ZERO;
        self.round_bet = Chips::ZERO;
        self.in_pot = Chips::ZERO;
        self.hole_cards.clear();
        self.last_action = ActionKind::None;
    }

    /// Reset state for a new betting round.
    pub fn start_round(&mut self) {
        self.round_bet = Chips::ZERO;
        if !self.folded {
            self.last_action = ActionKind::None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_caps_at_stack() {
        let mut p = Player::new("Alice", Chips::new(100));
        assert_eq!(p.bet(Chips::new(30)), Chips::new(30));
        assert_eq!(p.chips, Chips::new(70));
        assert_eq!(p.round_bet, Chips::new(30));

        assert_eq!(p.bet(Chips::new(500)), Chips::new(70));
        assert_eq!(p.chips, Chips::ZERO);
        assert_eq!(p.in_pot, Chips::new(100));
        assert!(p.is_all_in());
        assert!(!p.can_act());
        assert!(p.is_in_hand());
    }

    #[test]
    fn round_and_hand_reset() {
        let mut p = Player::new("Bob", Chips::new(100));
        p.bet(Chips::new(20));
        p.last_action = ActionKind::Call;

        p.start_round();
        assert_eq!(p.round_bet, Chips::ZERO);
        assert_eq!(p.in_pot, Chips::new(20));
        assert_eq!(p.last_action, ActionKind::None);

        p.fold();
        p.start_round();
        assert_eq!(p.last_action, ActionKind::Fold);
        assert!(!p.is_in_hand());
        assert!(!p.can_act());

        p.start_hand();
        assert!(p.can_act());
        assert_eq!(p.in_pot, Chips::ZERO);

        let mut broke = Player::new("Carol", Chips::ZERO);
        broke.start_hand();
        assert!(!broke.is_in_hand());
    }
}
