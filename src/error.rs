use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{ActiveCard, Card, Color};
use crate::state::Phase;

/// Errors that can occur when driving the game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("operation requires phase {expected:?} but game is in {actual:?}")]
    InvalidPhase { expected: Phase, actual: Phase },
    #[error("at least {required} players are needed, {registered} registered")]
    NotEnoughPlayers { required: usize, registered: usize },
    #[error("no more than {0} players may join")]
    TooManyPlayers(usize),
    #[error("game is already over")]
    GameOver,
    #[error("no player has emptied their hand")]
    RoundNotFinished,
    #[error("turn limit of {0} reached before the round ended")]
    TurnLimitExceeded(usize),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected plays.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("{card} cannot be played on {active}")]
    IllegalPlay { card: Card, active: ActiveCard },
    #[error("wild draw four is not allowed while holding a {color} card")]
    WildDrawFourWithMatchingColor { color: Color },
}
