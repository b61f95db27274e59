use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::score::RoundSummary;

/// Zero-based seat index of a player within the game.
pub type PlayerId = usize;

/// What the active player ended up doing on their turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnAction {
    /// A card chosen from the hand was played.
    Played(Card),
    /// No card could be played; the drawn card was legal and played at once.
    DrewAndPlayed(Card),
    /// No card could be played; the drawn card was kept.
    Drew(Card),
}

/// Result of a completed turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub player: PlayerId,
    pub action: TurnAction,
    /// Set when this turn emptied the player's hand.
    pub round_over: Option<RoundSummary>,
}
