// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tablestakes Poker Hold'em rules engine.
//!
//! The [Hand] type runs a hand for a table of players, asking a
//! [DecisionSource] for each player action:
//!
//! ```
//! # use tablestakes_core::*;
//! struct Caller;
//!
//! impl DecisionSource for Caller {
//!     fn decide(&mut self, _hand: &Hand, req: &ActionRequest) -> Action {
//!         if req.can_check() {
//!             Action::Check
//!         } else if req.can_call() {
//!             Action::Call(req.call_amount)
//!         } else {
//!             Action::AllIn(req.stack)
//!         }
//!     }
//! }
//!
//! let mut hand = Hand::new(HandConfig::default(), ShuffledDeck::with_seed(1));
//! hand.seat_players(vec![
//!     Player::new("Alice", Chips::new(1_000)),
//!     Player::new("Bob", Chips::new(1_000)),
//! ])
//! .unwrap();
//!
//! let mut sources: Vec<Box<dyn DecisionSource>> = vec![Box::new(Caller), Box::new(Caller)];
//! let result = hand.play(&mut sources).unwrap();
//! assert_eq!(result.board.len(), 5);
//!
//! let chips = hand.players().iter().map(|p| p.chips).sum::<Chips>();
//! assert_eq!(chips, Chips::new(2_000));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod action;
pub mod config;
pub mod error;
pub mod hand;
pub mod player;
pub mod poker;
pub mod pot;
pub mod supply;

pub use action::{Action, ActionKind, ActionRequest, DecisionSource};
pub use config::HandConfig;
pub use error::HandError;
pub use hand::{Hand, HandEvent, HandResult, Phase, ShowdownHand, Street};
pub use player::{HoleCard, Player};
pub use poker::{Card, Chips, Deck, HandEvaluator, HandRank, HandStrength, Rank, Suit};
pub use pot::{Payout, Pot, PotLevel};
pub use supply::{CardSupply, ShuffledDeck, StackedDeck};
