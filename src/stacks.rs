//! The three card stacks: source (fresh deck per round), draw and discard.
//!
//! All stacks keep their top card at the end of the backing `Vec`. Accessors hand
//! out slices or clones; nothing outside this module mutates the backing storage.

use serde::{Deserialize, Serialize};

use crate::card::{ActiveCard, Card, Color, Kind, full_deck};
use crate::rng::RandomSource;

/// Freshly assembled deck used for the dealer draw and the deal.
#[derive(Clone, Debug, Default)]
pub struct SourceStack {
    cards: Vec<Card>,
}

impl SourceStack {
    /// Assemble the full deck and shuffle it.
    pub fn assemble(rng: &mut dyn RandomSource) -> Self {
        let mut cards = full_deck();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Use a caller-supplied order. The last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put a card back underneath the stack.
    pub fn return_card(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        rng.shuffle(&mut self.cards);
    }

    /// Hand the remaining cards over to become the draw stack.
    pub fn into_draw_stack(self) -> DrawStack {
        DrawStack { cards: self.cards }
    }
}

/// Undealt and undrawn cards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DrawStack {
    cards: Vec<Card>,
}

impl DrawStack {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove the head card, `None` when empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove the head card that is not a Wild Draw Four, returning skipped cards
    /// and reshuffling until one is found. `None` if the stack holds only Wild Draw Fours.
    pub fn draw_seed(&mut self, rng: &mut dyn RandomSource) -> Option<Card> {
        if self.cards.iter().all(|card| card.kind() == Kind::WildDrawFour) {
            return None;
        }
        loop {
            let card = self.cards.pop()?;
            if card.kind() != Kind::WildDrawFour {
                return Some(card);
            }
            self.cards.insert(0, card);
            rng.shuffle(&mut self.cards);
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn refill(&mut self, mut cards: Vec<Card>, rng: &mut dyn RandomSource) {
        rng.shuffle(&mut cards);
        cards.append(&mut self.cards);
        self.cards = cards;
    }
}

/// Played cards; the top one is the active card.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiscardStack {
    cards: Vec<Card>,
    active_color: Option<Color>,
}

impl DiscardStack {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Place a card on top. A colored card sets the active color; a wild card leaves
    /// the active color unset until [`DiscardStack::set_active_color`] is called.
    pub fn push(&mut self, card: Card) {
        self.active_color = card.color();
        self.cards.push(card);
    }

    pub fn set_active_color(&mut self, color: Color) {
        self.active_color = Some(color);
    }

    /// The active card, `None` until the stack is seeded and the color is known.
    pub fn active(&self) -> Option<ActiveCard> {
        let card = *self.cards.last()?;
        let color = self.active_color?;
        Some(ActiveCard { card, color })
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Move every card except the top one into `draw`, shuffled. Returns the number
    /// of cards moved; zero when the discard holds one card or fewer.
    pub fn replenish(&mut self, draw: &mut DrawStack, rng: &mut dyn RandomSource) -> usize {
        if self.cards.len() <= 1 {
            return 0;
        }
        let top = self.cards.split_off(self.cards.len() - 1);
        let recycled = std::mem::replace(&mut self.cards, top);
        let moved = recycled.len();
        draw.refill(recycled, rng);
        moved
    }

    pub(crate) fn clear(&mut self) -> Vec<Card> {
        self.active_color = None;
        std::mem::take(&mut self.cards)
    }
}
