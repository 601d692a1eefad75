// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand errors.
use thiserror::Error;

use crate::{action::Action, poker::Chips};

/// Errors returned by the hand operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    /// Less than two players can play the hand.
    #[error("a hand needs at least 2 players with chips, got {0}")]
    NotEnoughPlayers(usize),
    /// The hand configuration is not valid.
    #[error("invalid hand configuration: {0}")]
    InvalidConfig(String),
    /// An action was submitted while no player was asked to act.
    #[error("no player action is awaited")]
    NotAwaitingAction,
    /// An action was submitted for the wrong seat.
    #[error("seat {actual} acted out of turn, awaiting seat {expected}")]
    WrongSeat {
        /// The awaited seat.
        expected: usize,
        /// The seat that tried to act.
        actual: usize,
    },
    /// The submitted action is not legal for the awaited seat.
    #[error("illegal action {action} from seat {seat}: {reason}")]
    IllegalAction {
        /// The acting seat.
        seat: usize,
        /// The rejected action.
        action: Action,
        /// Why the action was rejected.
        reason: String,
    },
    /// There are no more cards to deal.
    #[error("the card supply is exhausted")]
    DeckExhausted,
    /// The pot settlement doesn't pay the chips that were bet.
    #[error("pot settlement pays {paid} chips but {collected} were collected")]
    ChipsMismatch {
        /// The chips paid to the winners.
        paid: Chips,
        /// The chips collected in the pot.
        collected: Chips,
    },
    /// The operation is not allowed while a hand is being played.
    #[error("a hand is already in progress")]
    HandInProgress,
    /// No decision source was given for a seat.
    #[error("no decision source for seat {0}")]
    NoDecisionSource(usize),
}
