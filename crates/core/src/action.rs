// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions and action requests.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{hand::Hand, poker::Chips};

/// An action chosen by a player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Leave the hand.
    Fold,
    /// Pass without betting, only legal when there is nothing to call.
    Check,
    /// Match the round call amount, with the chips to add.
    Call(Chips),
    /// Raise the round bet to the given total.
    Raise(Chips),
    /// Bet the whole stack, with the chips to add.
    AllIn(Chips),
}

impl Action {
    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call(_) => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn(_) => ActionKind::AllIn,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold | Action::Check => write!(f, "{}", self.kind().label()),
            Action::Call(c) | Action::Raise(c) | Action::AllIn(c) => {
                write!(f, "{} {c}", self.kind().label())
            }
        }
    }
}

/// The last action recorded for a player.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// No action.
    #[default]
    None,
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player folds.
    Fold,
    /// Player checks.
    Check,
    /// Player calls.
    Call,
    /// Player raises.
    Raise,
    /// Player goes all in.
    AllIn,
}

impl ActionKind {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::SmallBlind => "SB",
            ActionKind::BigBlind => "BB",
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL-IN",
            ActionKind::None => "",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A request for a player to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The seat that must act.
    pub seat: usize,
    /// The legal actions for this seat.
    pub actions: Vec<ActionKind>,
    /// The chips the player has behind.
    pub stack: Chips,
    /// The chips the player has already bet in this round.
    pub round_bet: Chips,
    /// The chips needed to call, capped by the player stack.
    pub call_amount: Chips,
    /// The minimum total a raise must reach.
    pub min_raise_to: Chips,
    /// The maximum total a raise can reach, the player round bet plus stack.
    pub max_raise_to: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// The number of raises made in this round.
    pub raise_count: u32,
    /// A player went all in this round raising less than a full raise.
    ///
    /// The hand doesn't reopen or close the betting because of this, it is up
    /// to the decision source to decide what to do with it.
    pub short_all_in: bool,
}

impl ActionRequest {
    /// Checks if an action kind is legal for this request.
    pub fn can(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }

    /// Checks if the player can check.
    pub fn can_check(&self) -> bool {
        self.can(ActionKind::Check)
    }

    /// Checks if the player can call.
    pub fn can_call(&self) -> bool {
        self.can(ActionKind::Call)
    }

    /// Checks if the player can raise.
    pub fn can_raise(&self) -> bool {
        self.can(ActionKind::Raise)
    }

    /// Checks if the player can go all in.
    pub fn can_all_in(&self) -> bool {
        self.can(ActionKind::AllIn)
    }
}

/// A source of player decisions.
///
/// The hand asks the decision source for the awaited seat to choose an action
/// and submits it, see [Hand::play].
pub trait DecisionSource {
    /// Chooses an action for a request, the action must be legal.
    fn decide(&mut self, hand: &Hand, request: &ActionRequest) -> Action;
}

impl<D: DecisionSource + ?Sized> DecisionSource for Box<D> {
    fn decide(&mut self, hand: &Hand, request: &ActionRequest) -> Action {
        (**self).decide(hand, request)
    }
}
