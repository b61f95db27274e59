use crate::card::{ActiveCard, Kind};
use crate::effects::is_legal;
use crate::player::Hand;
use crate::policy::Policy;
use crate::rng::RandomSource;

/// Probability of dumping a Wild even when a colored play exists.
pub const DEFAULT_WILD_BIAS: f64 = 0.3;

/// Rule-based policy used by the automated players.
///
/// In order:
/// - With probability `wild_bias`, play a Wild (never a Wild Draw Four) if one is held.
/// - Otherwise play the legal card with the most points, excluding Wild Draw Four.
///   Ties go to the card that comes first in the hand.
/// - Otherwise play a Wild Draw Four if the active color is absent from the hand.
/// - Otherwise draw.
#[derive(Clone, Debug)]
pub struct HeuristicPolicy {
    wild_bias: f64,
    label: String,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self::with_wild_bias(DEFAULT_WILD_BIAS)
    }

    pub fn with_wild_bias(wild_bias: f64) -> Self {
        let wild_bias = wild_bias.clamp(0.0, 1.0);
        let label = if wild_bias == 0.0 {
            String::from("greedy")
        } else if wild_bias == DEFAULT_WILD_BIAS {
            String::from("heuristic")
        } else {
            format!("heuristic:{wild_bias}")
        };
        Self { wild_bias, label }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn label(&self) -> &str {
        &self.label
    }

    fn select_card(
        &mut self,
        hand: &Hand,
        active: ActiveCard,
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let cards = hand.cards();

        if let Some(wild) = cards.iter().position(|card| card.kind() == Kind::Wild) {
            if rng.chance(self.wild_bias) {
                return Some(wild);
            }
        }

        let mut best: Option<(usize, u32)> = None;
        for (index, card) in cards.iter().enumerate() {
            if card.kind() == Kind::WildDrawFour || !is_legal(hand, *card, active) {
                continue;
            }
            let points = card.points();
            if best.is_none_or(|(_, top)| points > top) {
                best = Some((index, points));
            }
        }
        if let Some((index, _)) = best {
            return Some(index);
        }

        cards.iter().position(|card| {
            card.kind() == Kind::WildDrawFour && is_legal(hand, *card, active)
        })
    }
}
