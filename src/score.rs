//! Score ledger.
//!
//! Scoring rule: the round winner collects the point value of every card left in
//! the other players' hands. Totals only ever grow and persist across rounds.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::player::Player;

/// Result of one finished round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub winner: PlayerId,
    pub points: u32,
    /// Cumulative totals after this round, by seat.
    pub totals: Vec<u32>,
    pub cards_played: usize,
    pub turns: usize,
}

/// Points the round winner collects from everyone else's remaining cards.
pub fn round_points(players: &[Player], winner: PlayerId) -> u32 {
    players
        .iter()
        .filter(|player| player.id() != winner)
        .map(|player| player.hand().points())
        .sum()
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreLedger {
    totals: Vec<u32>,
    rounds: Vec<RoundSummary>,
}

impl ScoreLedger {
    pub fn new(players: usize) -> Self {
        Self {
            totals: vec![0; players],
            rounds: Vec::new(),
        }
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.totals.get(player).copied().unwrap_or(0)
    }

    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    pub fn rounds(&self) -> &[RoundSummary] {
        &self.rounds
    }

    /// Credit `points` to `winner` and archive the round. Returns the summary.
    pub fn record_round(
        &mut self,
        round: u32,
        winner: PlayerId,
        points: u32,
        cards_played: usize,
        turns: usize,
    ) -> RoundSummary {
        if winner >= self.totals.len() {
            self.totals.resize(winner + 1, 0);
        }
        self.totals[winner] = self.totals[winner].saturating_add(points);
        let summary = RoundSummary {
            round,
            winner,
            points,
            totals: self.totals.clone(),
            cards_played,
            turns,
        };
        self.rounds.push(summary.clone());
        summary
    }

    /// Highest-scoring player at or above `threshold`; the lowest seat wins ties.
    pub fn winner_at(&self, threshold: u32) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, u32)> = None;
        for (player, &score) in self.totals.iter().enumerate() {
            if score >= threshold && best.is_none_or(|(_, top)| score > top) {
                best = Some((player, score));
            }
        }
        best.map(|(player, _)| player)
    }
}
