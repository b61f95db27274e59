//! Decision points reported to collaborators (renderers, loggers, score writers).
//!
//! The orchestrator appends events as it goes; callers drain them with
//! [`crate::Game::take_events`] after each call.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{ActiveCard, Card, Color};
use crate::ring::Direction;

/// State change caused by an action card.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum AppliedEffect {
    Skipped { player: PlayerId },
    Reversed { direction: Direction },
    ForcedDraw { player: PlayerId, count: usize },
    ColorChosen { color: Color },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
    },
    /// Every player's high-card draw, in seating order, and the resulting dealer.
    DealerSelected {
        dealer: PlayerId,
        draws: Vec<(PlayerId, Card)>,
    },
    CardsDealt {
        first: PlayerId,
        per_player: usize,
    },
    DiscardSeeded {
        card: Card,
    },
    TurnStarted {
        player: PlayerId,
        active: ActiveCard,
    },
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    CardDrawn {
        player: PlayerId,
        card: Card,
    },
    EffectApplied {
        source: Card,
        effect: AppliedEffect,
    },
    PlayRejected {
        player: PlayerId,
        card: Card,
        reason: String,
    },
    DrawStackReplenished {
        cards: usize,
    },
    /// Both stacks were exhausted and a fallback Wild was created.
    SyntheticCardMinted,
    RoundWon {
        round: u32,
        winner: PlayerId,
        points: u32,
        totals: Vec<u32>,
        cards_played: usize,
        turns: usize,
    },
    GameWon {
        winner: PlayerId,
        score: u32,
    },
}
