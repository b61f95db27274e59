//! Multi-round shedding card game engine for automated players: dealer draw,
//! dealing, turn sequencing, action-card effects and cumulative scoring.

pub mod action;
pub mod card;
pub mod effects;
pub mod error;
pub mod event;
pub mod game;
pub mod player;
pub mod policies;
pub mod policy;
pub mod record;
pub mod ring;
pub mod rng;
pub mod score;
pub mod stacks;
pub mod state;
pub mod visualize;

mod table;

pub use crate::action::{PlayerId, TurnAction, TurnOutcome};
pub use crate::card::{ActiveCard, Card, Color, Kind, full_deck};
pub use crate::effects::{Effect, check_play, choose_color, effect_of, is_legal, legal_plays};
pub use crate::error::{GameError, InvalidAction};
pub use crate::event::{AppliedEffect, GameEvent};
pub use crate::game::{DealerRule, Game, GameBuilder, GameConfig};
pub use crate::player::{Hand, Player};
pub use crate::policies::registry::{create_policy_from_spec, label_for_spec};
pub use crate::policies::{HeuristicPolicy, RandomPolicy};
pub use crate::policy::Policy;
pub use crate::record::{RecordError, ScoreRecordWriter};
pub use crate::ring::{Direction, TurnOrder};
pub use crate::rng::{RandomSource, seeded};
pub use crate::score::{RoundSummary, ScoreLedger, round_points};
pub use crate::state::{GameSettings, GameStateView, Phase, PlayerPublicState};
pub use crate::visualize::{describe_event, render_state};
