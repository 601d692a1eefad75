// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tablestakes Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use tablestakes_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards:
//!
//! ```
//! # use tablestakes_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let mut dealt = 0;
//! while let Some(_card) = deck.deal() {
//!     dealt += 1;
//! }
//! assert_eq!(dealt, Deck::SIZE);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, ParseCardError, Rank, Suit};
