#![allow(dead_code)]

use unodeck::{ActiveCard, Card, Color, Game, GameBuilder, Hand, HeuristicPolicy, Policy, RandomSource};

pub fn filler() -> Card {
    Card::number(Color::Yellow, 0)
}

/// Deck whose top-down order is `top_down`, resting on `filler_count` Yellow zeros.
pub fn stacked_deck(top_down: &[Card], filler_count: usize) -> Vec<Card> {
    let mut deck = vec![filler(); filler_count];
    deck.extend(top_down.iter().rev().copied());
    deck
}

/// Started game with greedy players dealt from a stacked deck.
///
/// `top_down` lists the dealer draw (one card per seat), then the deal (one card
/// at a time starting left of the dealer), then the discard seed, then draws.
pub fn scripted_game(players: usize, hand_size: usize, top_down: &[Card]) -> Game {
    scripted_game_with(players, hand_size, top_down, |_| Box::new(HeuristicPolicy::with_wild_bias(0.0)))
}

pub fn scripted_game_with(
    players: usize,
    hand_size: usize,
    top_down: &[Card],
    policy: impl Fn(usize) -> Box<dyn Policy>,
) -> Game {
    game_from_deck(players, hand_size, stacked_deck(top_down, 20), policy)
}

/// Started game dealt from exactly `deck` (last card on top).
pub fn game_from_deck(
    players: usize,
    hand_size: usize,
    deck: Vec<Card>,
    policy: impl Fn(usize) -> Box<dyn Policy>,
) -> Game {
    let mut game = GameBuilder::new()
        .with_seed(17)
        .with_hand_size(hand_size)
        .with_source_deck(deck)
        .build()
        .expect("valid config");
    for seat in 0..players {
        game.add_player(format!("P{seat}"), policy(seat))
            .expect("seat available");
    }
    game.start_game().expect("game starts");
    game
}

pub fn red(value: u8) -> Card {
    Card::number(Color::Red, value)
}

pub fn blue(value: u8) -> Card {
    Card::number(Color::Blue, value)
}

pub fn green(value: u8) -> Card {
    Card::number(Color::Green, value)
}

pub fn yellow(value: u8) -> Card {
    Card::number(Color::Yellow, value)
}

/// Always tries the first card in hand, legal or not.
pub struct AlwaysFirst;

impl Policy for AlwaysFirst {
    fn label(&self) -> &str {
        "always-first"
    }

    fn select_card(
        &mut self,
        hand: &Hand,
        _active: ActiveCard,
        _rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        if hand.is_empty() { None } else { Some(0) }
    }
}

/// Randomness with fixed answers: shuffles are no-ops, choices return `choice`
/// (clamped into range) and every roll returns `chance`.
pub struct ScriptedRng {
    pub choice: usize,
    pub chance: bool,
}

impl RandomSource for ScriptedRng {
    fn shuffle(&mut self, _cards: &mut [Card]) {}

    fn uniform_choice(&mut self, len: usize) -> usize {
        self.choice.min(len.saturating_sub(1))
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chance
    }
}
