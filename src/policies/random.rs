use crate::card::ActiveCard;
use crate::effects::legal_plays;
use crate::player::Hand;
use crate::policy::Policy;
use crate::rng::RandomSource;

/// Baseline policy that picks uniformly among the legal plays.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for RandomPolicy {
    fn label(&self) -> &str {
        "random"
    }

    fn select_card(
        &mut self,
        hand: &Hand,
        active: ActiveCard,
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let legal = legal_plays(hand, active);
        if legal.is_empty() {
            return None;
        }
        Some(legal[rng.uniform_choice(legal.len())])
    }
}
