// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tablestakes Poker hand evaluator.
//!
//! Finds the best poker hand that can be built from a player private cards and
//! the shared board cards. To evaluate a hand create a [HandEvaluator] and
//! compare the resulting [HandStrength] values:
//!
//! ```
//! # use tablestakes_eval::*;
//! let cards = |s: &str| {
//!     s.split_whitespace()
//!         .map(|c| c.parse::<Card>().unwrap())
//!         .collect::<Vec<_>>()
//! };
//!
//! let board = cards("AD 7C 7S KH 2D");
//! let eval = HandEvaluator::holdem();
//! let v1 = eval.evaluate(&cards("AS QC"), &board).unwrap();
//! let v2 = eval.evaluate(&cards("KS KC"), &board).unwrap();
//! assert_eq!(v1.rank(), HandRank::TwoPair);
//! assert_eq!(v2.rank(), HandRank::FullHouse);
//! assert!(v2 > v1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod evaluator;
pub mod strength;

pub use evaluator::HandEvaluator;
pub use strength::{HandRank, HandStrength};

// Reexport cards types.
pub use tablestakes_cards::{Card, Deck, Rank, Suit};
