use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{ActiveCard, Card};
use crate::ring::Direction;

/// Lifecycle of a game: `Setup -> InProgress -> RoundOver -> (InProgress | GameOver)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    InProgress,
    RoundOver,
    GameOver,
}

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub winning_score: u32,
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub policy: String,
    pub hand_size: usize,
    pub score: u32,
    pub is_dealer: bool,
    pub is_current: bool,
}

/// Game state snapshot from one player's perspective.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: Phase,
    pub round: u32,
    pub direction: Direction,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub dealer: Option<PlayerId>,
    pub active: Option<ActiveCard>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}
