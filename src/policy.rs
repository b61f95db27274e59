use crate::card::ActiveCard;
use crate::player::Hand;
use crate::rng::RandomSource;

/// Card-selection strategy owned by a player.
pub trait Policy {
    /// Short name used in summaries and score records.
    fn label(&self) -> &str;

    /// Pick the hand index of the card to play on `active`, or `None` to draw.
    fn select_card(
        &mut self,
        hand: &Hand,
        active: ActiveCard,
        rng: &mut dyn RandomSource,
    ) -> Option<usize>;
}
