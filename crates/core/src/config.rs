// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand configuration.
use serde::{Deserialize, Serialize};

use crate::{error::HandError, poker::Chips};

/// The parameters of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandConfig {
    /// The big blind, the small blind is half of it.
    pub big_blind: Chips,
    /// The maximum number of raises in a betting round.
    pub raise_limit: u32,
    /// The number of private cards dealt to each player.
    pub hole_cards: usize,
    /// The community cards dealt at the start of each betting round.
    pub community_cards: Vec<usize>,
    /// The index of the last betting round.
    pub river_round: usize,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            big_blind: Chips::new(20),
            raise_limit: 4,
            hole_cards: 2,
            community_cards: vec![0, 3, 1, 1],
            river_round: 3,
        }
    }
}

impl HandConfig {
    /// The small blind amount, half the big blind rounded down.
    pub fn small_blind(&self) -> Chips {
        self.big_blind / 2
    }

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), HandError> {
        if self.big_blind.is_zero() {
            return Err(HandError::InvalidConfig("big blind must not be zero".into()));
        }

        if self.hole_cards == 0 {
            return Err(HandError::InvalidConfig(
                "players need at least one hole card".into(),
            ));
        }

        if self.community_cards.len() <= self.river_round {
            return Err(HandError::InvalidConfig(format!(
                "community cards for {} rounds but river round is {}",
                self.community_cards.len(),
                self.river_round
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = HandConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.small_blind(), Chips::new(10));
        assert_eq!(config.community_cards.iter().sum::<usize>(), 5);
    }

    #[test]
    fn small_blind_truncates() {
        let config = HandConfig {
            big_blind: Chips::new(25),
            ..Default::default()
        };
        assert_eq!(config.small_blind(), Chips::new(12));
    }

    #[test]
    fn invalid_configs() {
        let config = HandConfig {
            big_blind: Chips::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(HandError::InvalidConfig(_))));

        let config = HandConfig {
            hole_cards: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(HandError::InvalidConfig(_))));

        let config = HandConfig {
            river_round: 4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(HandError::InvalidConfig(_))));
    }
}
