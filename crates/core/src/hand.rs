// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em hand state machine.
//!
//! A [Hand] deals the cards, posts the blinds and runs the betting rounds for
//! a table of [Player]s. The hand never blocks waiting for players, when a
//! player must act it stores an [ActionRequest] and returns, the caller then
//! submits the player action with [Hand::submit]. The [Hand::play] method
//! drives a whole hand with a [DecisionSource] for each seat.
use ahash::AHashMap;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    action::{Action, ActionKind, ActionRequest, DecisionSource},
    config::HandConfig,
    error::HandError,
    player::{HoleCard, Player},
    poker::{Card, Chips, HandEvaluator, HandStrength},
    pot::{Payout, Pot},
    supply::CardSupply,
};

/// The betting rounds of a standard Hold'em hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, blinds posted.
    Preflop,
    /// Three community cards.
    Flop,
    /// The fourth community card.
    Turn,
    /// The last community card.
    River,
}

impl Street {
    /// The street for a betting round index.
    pub fn from_round(round: usize) -> Option<Street> {
        match round {
            0 => Some(Street::Preflop),
            1 => Some(Street::Flop),
            2 => Some(Street::Turn),
            3 => Some(Street::River),
            _ => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };

        write!(f, "{name}")
    }
}

/// The hand phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The hand has not started.
    Idle,
    /// A betting round is in progress.
    Betting {
        /// The betting round index.
        round: usize,
    },
    /// The pot has been paid.
    Finished,
    /// The hand stopped on an error, the bets are still in the pot.
    Aborted,
}

/// A hand shown at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownHand {
    /// The player seat.
    pub seat: usize,
    /// The player best hand.
    pub strength: HandStrength,
}

/// The outcome of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The chips paid to each winner.
    pub payouts: Vec<Payout>,
    /// The hands shown, empty if the hand ended without a showdown.
    pub showdown: Vec<ShowdownHand>,
    /// The community cards.
    pub board: Vec<Card>,
}

impl HandResult {
    /// The chips won by a seat.
    pub fn won(&self, seat: usize) -> Chips {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.chips)
            .sum()
    }
}

/// Notifications for the hand observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandEvent {
    /// A community card was dealt.
    CommunityCard(Card),
    /// The hand is over.
    Finished(HandResult),
    /// The hand stopped on an error, [Hand::reset] gives the bets back.
    Aborted(HandError),
}

/// A Hold'em hand.
pub struct Hand {
    config: HandConfig,
    supply: Box<dyn CardSupply>,
    observer: Option<usize>,
    players: Vec<Player>,
    phase: Phase,
    button: usize,
    round: usize,
    action_seat: usize,
    last_bet_seat: usize,
    round_open: bool,
    round_call: Chips,
    previous_raise: Chips,
    raise_count: u32,
    short_all_in: bool,
    pot: Pot,
    board: Vec<Card>,
    pending: Option<ActionRequest>,
    events: Vec<HandEvent>,
    result: Option<HandResult>,
}

impl Hand {
    /// Creates a hand that deals cards from the given supply.
    pub fn new(config: HandConfig, supply: impl CardSupply + 'static) -> Self {
        Self {
            config,
            supply: Box::new(supply),
            observer: None,
            players: Vec::new(),
            phase: Phase::Idle,
            button: 0,
            round: 0,
            action_seat: 0,
            last_bet_seat: 0,
            round_open: false,
            round_call: Chips::ZERO,
            previous_raise: Chips::ZERO,
            raise_count: 0,
            short_all_in: false,
            pot: Pot::default(),
            board: Vec::new(),
            pending: None,
            events: Vec::new(),
            result: None,
        }
    }

    /// Sets the seat whose hole cards are dealt face up.
    pub fn with_observer(mut self, seat: usize) -> Self {
        self.observer = Some(seat);
        self
    }

    /// Seats the players for the next hand.
    ///
    /// Seat 0 has the button, if it has no chips the button goes to the next
    /// seat with chips.
    pub fn seat_players(&mut self, players: Vec<Player>) -> Result<(), HandError> {
        if self.is_in_progress() {
            return Err(HandError::HandInProgress);
        }

        if players.len() < 2 {
            error!("Cannot seat {} players, a hand needs 2 players", players.len());
            return Err(HandError::NotEnoughPlayers(players.len()));
        }

        self.return_bets();
        self.players = players;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// The hand configuration.
    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    /// The hand players.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Gets a player by seat.
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Gives the players back, the hand is left with no players.
    ///
    /// The players of an aborted hand get their bets back.
    pub fn take_players(&mut self) -> Result<Vec<Player>, HandError> {
        if self.is_in_progress() {
            return Err(HandError::HandInProgress);
        }

        self.return_bets();
        self.phase = Phase::Idle;
        Ok(std::mem::take(&mut self.players))
    }

    /// The hand phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The button seat.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The current betting round index.
    pub fn round(&self) -> usize {
        self.round
    }

    /// The chips a player must have bet in this round to call.
    pub fn round_call(&self) -> Chips {
        self.round_call
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The hand pot.
    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    /// The pending action request if a player must act.
    pub fn awaiting(&self) -> Option<&ActionRequest> {
        self.pending.as_ref()
    }

    /// The seat that must act.
    pub fn awaiting_seat(&self) -> Option<usize> {
        self.pending.as_ref().map(|r| r.seat)
    }

    /// The hand result once the hand is finished.
    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    /// Takes the events emitted since the last call.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, HandEvent> {
        self.events.drain(..)
    }

    fn is_in_progress(&self) -> bool {
        matches!(self.phase, Phase::Betting { .. })
    }

    /// Moves the bets of an unfinished hand from the pot back to the players.
    fn return_bets(&mut self) {
        if !matches!(self.phase, Phase::Betting { .. } | Phase::Aborted) {
            return;
        }

        for player in &mut self.players {
            player.chips += player.in_pot;
            player.in_pot = Chips::ZERO;
            player.round_bet = Chips::ZERO;
        }

        self.pot.reset();
        self.pending = None;
    }

    /// Resets the hand state for a new hand.
    ///
    /// If a hand was abandoned the players get their bets back.
    pub fn reset(&mut self) {
        self.return_bets();
        self.supply.reset();
        self.button = 0;
        self.round = 0;
        self.action_seat = 0;
        self.last_bet_seat = 0;
        self.round_open = false;
        self.round_call = Chips::ZERO;
        self.previous_raise = Chips::ZERO;
        self.raise_count = 0;
        self.short_all_in = false;
        self.pot.reset();
        self.board.clear();
        self.pending = None;
        self.events.clear();
        self.result = None;
        self.phase = Phase::Idle;

        self.players.iter_mut().for_each(Player::start_hand);
    }

    /// Starts a new hand.
    ///
    /// When this method returns the hand is either waiting for the first
    /// player action or, if no player can act, it is finished.
    pub fn start(&mut self) -> Result<(), HandError> {
        if self.is_in_progress() {
            return Err(HandError::HandInProgress);
        }

        self.config.validate()?;
        self.reset();

        let count = self.in_hand_count();
        if count < 2 {
            error!("Cannot start a hand with {count} players with chips");
            return Err(HandError::NotEnoughPlayers(count));
        }

        // The button skips the seats that sit out.
        self.button = self.next_n_acting_player_from(0, 0);

        info!(
            "Starting hand with {count} players, blinds {}/{}",
            self.config.small_blind(),
            self.config.big_blind
        );

        let res = self.start_betting_round(0).and_then(|_| self.advance());
        self.check_aborted(res)
    }

    /// Applies an action for the seat that must act.
    pub fn submit(&mut self, seat: usize, action: Action) -> Result<(), HandError> {
        let request = self.pending.as_ref().ok_or(HandError::NotAwaitingAction)?;
        if request.seat != seat {
            return Err(HandError::WrongSeat {
                expected: request.seat,
                actual: seat,
            });
        }

        check_action(request, action)?;

        self.pending = None;
        self.apply_action(seat, action);
        self.advance_action_seat();

        let res = self.advance();
        self.check_aborted(res)
    }

    /// Plays the hand to the end asking each seat decision source to act.
    ///
    /// Starts a new hand if no hand is in progress.
    pub fn play(
        &mut self,
        sources: &mut [Box<dyn DecisionSource>],
    ) -> Result<HandResult, HandError> {
        if !self.is_in_progress() {
            self.start()?;
        }

        while let Some(request) = self.pending.clone() {
            let source = sources
                .get_mut(request.seat)
                .ok_or(HandError::NoDecisionSource(request.seat))?;
            let action = source.decide(self, &request);
            self.submit(request.seat, action)?;
        }

        self.result.clone().ok_or(HandError::HandInProgress)
    }

    /// The minimum total for a raise in this round.
    pub fn round_min_raise_to(&self) -> Chips {
        (self.round_call + self.previous_raise).max(self.config.big_blind)
    }

    /// Finds the n-th seat after `from` that can act.
    ///
    /// With `n == 0` returns `from` if that seat can act. Returns `from` if no
    /// seat can act.
    pub fn next_n_acting_player_from(&self, from: usize, n: usize) -> usize {
        let count = self.players.len();
        if !self.players.iter().any(Player::can_act) {
            return from;
        }

        if n == 0 && self.players.get(from).is_some_and(Player::can_act) {
            return from;
        }

        let mut remaining = n.max(1);
        let mut seat = from;
        loop {
            seat = (seat + 1) % count;
            if self.players[seat].can_act() {
                remaining -= 1;
                if remaining == 0 {
                    return seat;
                }
            }
        }
    }

    fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    fn acting_count(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    fn check_aborted(&mut self, res: Result<(), HandError>) -> Result<(), HandError> {
        if let Err(e) = &res {
            error!("Hand aborted: {e}");
            self.pending = None;
            self.phase = Phase::Aborted;
            self.events.push(HandEvent::Aborted(e.clone()));
        }

        res
    }

    fn round_name(&self) -> String {
        Street::from_round(self.round)
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("round {}", self.round))
    }

    fn start_betting_round(&mut self, round: usize) -> Result<(), HandError> {
        self.round = round;
        self.phase = Phase::Betting { round };
        self.round_call = Chips::ZERO;
        self.previous_raise = Chips::ZERO;
        self.raise_count = 0;
        self.short_all_in = false;
        self.players.iter_mut().for_each(Player::start_round);

        if round == 0 {
            self.deal_hole_cards()?;
        }

        let community = self.config.community_cards.get(round).copied();
        for _ in 0..community.unwrap_or_default() {
            let card = self.supply.deal(false).ok_or(HandError::DeckExhausted)?;
            info!("Dealt {} card {card}", self.round_name());
            self.board.push(card);
            self.events.push(HandEvent::CommunityCard(card));
        }

        if round == 0 {
            self.post_blinds();
        } else {
            let seat = self.next_n_acting_player_from(self.button, 1);
            self.action_seat = seat;
            self.last_bet_seat = seat;
        }

        // Nobody to bet against if a single player can act and has called.
        let round_call = self.round_call;
        let must_call = self
            .players
            .iter()
            .any(|p| p.can_act() && p.round_bet < round_call);
        self.round_open = self.acting_count() > 1 || must_call;

        debug!(
            "Start {} action seat {} open {}",
            self.round_name(),
            self.action_seat,
            self.round_open
        );

        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), HandError> {
        let count = self.players.len();
        for _ in 0..self.config.hole_cards {
            for offset in 0..count {
                let seat = (self.button + offset) % count;
                if !self.players[seat].is_in_hand() {
                    continue;
                }

                let face_down = self.observer != Some(seat);
                let card = self.supply.deal(face_down).ok_or(HandError::DeckExhausted)?;

                let player = &mut self.players[seat];
                debug!("Dealt hole card {card} to {}", player.name);
                player.hole_cards.push(HoleCard { card, face_down });
            }
        }

        Ok(())
    }

    fn post_blinds(&mut self) {
        // Heads up the button posts the small blind.
        let shift = if self.in_hand_count() <= 2 { 0 } else { 1 };
        let sb_seat = self.next_n_acting_player_from(self.button, shift);
        let bb_seat = self.next_n_acting_player_from(sb_seat, 1);

        self.post_blind(sb_seat, self.config.small_blind(), ActionKind::SmallBlind);
        self.post_blind(bb_seat, self.config.big_blind, ActionKind::BigBlind);

        self.round_call = self.config.big_blind;
        self.previous_raise = self.config.big_blind;
        self.last_bet_seat = bb_seat;
        self.action_seat = self.next_n_acting_player_from(bb_seat, 1);
    }

    fn post_blind(&mut self, seat: usize, amount: Chips, kind: ActionKind) {
        let player = &mut self.players[seat];
        let paid = player.bet(amount);
        player.last_action = kind;
        self.pot.add_bet(seat, paid);

        info!("{} posts {kind} {paid}", player.name);

        if player.chips.is_zero() {
            self.pot.create_side_pot(player.in_pot);
        }
    }

    /// Finds the next player that must act in this round.
    fn next_request(&mut self) -> Option<ActionRequest> {
        while self.round_open {
            if self.in_hand_count() < 2 || self.acting_count() == 0 {
                self.round_open = false;
                break;
            }

            let player = &self.players[self.action_seat];
            if player.can_act()
                && (player.round_bet < self.round_call || self.round_call.is_zero())
            {
                return Some(self.action_request(self.action_seat));
            }

            self.advance_action_seat();
        }

        None
    }

    /// Moves the action to the next acting seat, the round ends when the action
    /// reaches or goes past the last player that bet.
    fn advance_action_seat(&mut self) {
        let from = self.action_seat;
        let to = self.next_n_acting_player_from(from, 1);

        // Distance in 1..=count, a seat is at the full table distance from itself.
        let count = self.players.len();
        let distance = |seat: usize| (seat + count - from - 1) % count + 1;

        if distance(self.last_bet_seat) <= distance(to) {
            debug!("Round closed at seat {to}, last bet seat {}", self.last_bet_seat);
            self.round_open = false;
        } else {
            self.action_seat = to;
        }
    }

    fn action_request(&self, seat: usize) -> ActionRequest {
        let player = &self.players[seat];
        let owed = self.round_call - player.round_bet;
        let min_raise_to = self.round_min_raise_to();
        let max_raise_to = player.round_bet + player.chips;

        // Raising makes sense only if someone else can still call it.
        let others_can_act = self
            .players
            .iter()
            .enumerate()
            .any(|(s, p)| s != seat && p.can_act());
        let can_raise = self.raise_count < self.config.raise_limit && others_can_act;

        let mut actions = vec![ActionKind::Fold];
        if owed.is_zero() {
            actions.push(ActionKind::Check);
        }

        if !owed.is_zero() && player.chips > owed {
            actions.push(ActionKind::Call);
        }

        if can_raise && max_raise_to >= min_raise_to {
            actions.push(ActionKind::Raise);
        }

        if !player.chips.is_zero() && (player.chips <= owed || can_raise) {
            actions.push(ActionKind::AllIn);
        }

        ActionRequest {
            seat,
            actions,
            stack: player.chips,
            round_bet: player.round_bet,
            call_amount: owed.min(player.chips),
            min_raise_to,
            max_raise_to,
            big_blind: self.config.big_blind,
            raise_count: self.raise_count,
            short_all_in: self.short_all_in,
        }
    }

    fn apply_action(&mut self, seat: usize, action: Action) {
        info!("{} {action}", self.players[seat].name);

        match action {
            Action::Fold => {
                self.players[seat].fold();
                self.pot.fold(seat);
            }
            Action::Check => {
                self.players[seat].last_action = ActionKind::Check;
            }
            Action::Call(amount) => self.place_bet(seat, amount, ActionKind::Call),
            Action::Raise(to) => {
                let amount = to - self.players[seat].round_bet;
                self.place_bet(seat, amount, ActionKind::Raise);
            }
            Action::AllIn(amount) => self.place_bet(seat, amount, ActionKind::AllIn),
        }
    }

    fn place_bet(&mut self, seat: usize, amount: Chips, kind: ActionKind) {
        let min_raise_to = self.round_min_raise_to();

        let player = &mut self.players[seat];
        let paid = player.bet(amount);
        let all_in = player.chips.is_zero();
        player.last_action = if all_in { ActionKind::AllIn } else { kind };
        self.pot.add_bet(seat, paid);

        let total = player.round_bet;
        if total > self.round_call {
            let increment = total - self.round_call;
            self.round_call = total;
            self.last_bet_seat = seat;

            if total >= min_raise_to {
                self.previous_raise = increment;
                self.raise_count += 1;
            } else {
                info!("{} all in for less than a full raise", player.name);
                self.short_all_in = true;
            }
        }

        if all_in {
            self.pot.create_side_pot(player.in_pot);
        }
    }

    /// Runs the betting rounds until a player must act or the hand is over.
    fn advance(&mut self) -> Result<(), HandError> {
        loop {
            if let Some(request) = self.next_request() {
                debug!(
                    "Awaiting seat {} actions {:?}",
                    request.seat, request.actions
                );
                self.pending = Some(request);
                return Ok(());
            }

            let next = self.round + 1;
            if next <= self.config.river_round && self.in_hand_count() > 1 {
                self.start_betting_round(next)?;
            } else {
                return self.finish();
            }
        }
    }

    /// Pays the pot at showdown or to the last player in the hand.
    fn finish(&mut self) -> Result<(), HandError> {
        let in_hand = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_in_hand())
            .map(|(seat, _)| seat)
            .collect::<Vec<_>>();

        let mut strengths = AHashMap::with_capacity(in_hand.len());
        let mut showdown = Vec::new();

        if in_hand.len() > 1 {
            let evaluator = HandEvaluator::holdem();
            for seat in in_hand {
                let player = &self.players[seat];
                let strength = evaluator.evaluate(&player.cards(), &self.board);
                if let Some(strength) = &strength {
                    info!("{} shows {strength}", player.name);
                    showdown.push(ShowdownHand {
                        seat,
                        strength: strength.clone(),
                    });
                }

                strengths.insert(seat, strength);
            }
        } else if let Some(&seat) = in_hand.first() {
            strengths.insert(seat, None);
        }

        let payouts = self
            .pot
            .settle(&strengths, self.button, self.players.len())
            .inspect_err(|e| error!("Pot settlement failed: {e}"))?;

        for payout in &payouts {
            let player = &mut self.players[payout.seat];
            player.chips += payout.chips;
            info!("{} wins {}", player.name, payout.chips);
        }

        let result = HandResult {
            payouts,
            showdown,
            board: self.board.clone(),
        };

        self.events.push(HandEvent::Finished(result.clone()));
        self.result = Some(result);
        self.phase = Phase::Finished;

        Ok(())
    }
}

/// Checks an action against the request legal actions and amounts.
fn check_action(request: &ActionRequest, action: Action) -> Result<(), HandError> {
    let reason = if !request.can(action.kind()) {
        Some(format!("{} is not a legal action", action.kind()))
    } else {
        match action {
            Action::Call(amount) if amount != request.call_amount => {
                Some(format!("call amount is {}", request.call_amount))
            }
            Action::Raise(to) if to < request.min_raise_to || to > request.max_raise_to => {
                Some(format!(
                    "raise must be between {} and {}",
                    request.min_raise_to, request.max_raise_to
                ))
            }
            Action::AllIn(amount) if amount != request.stack => {
                Some(format!("all in amount is {}", request.stack))
            }
            _ => None,
        }
    };

    match reason {
        Some(reason) => Err(HandError::IllegalAction {
            seat: request.seat,
            action,
            reason,
        }),
        None => Ok(()),
    }
}
