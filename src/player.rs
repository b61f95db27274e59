use std::fmt;

use crate::action::PlayerId;
use crate::card::{Card, Color};
use crate::error::InvalidAction;
use crate::policy::Policy;

/// Cards held by a single player. Order carries no game meaning but is stable,
/// which policies use for tie-breaks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, index: usize) -> Result<Card, InvalidAction> {
        if index >= self.cards.len() {
            return Err(InvalidAction::HandIndex(index));
        }
        Ok(self.cards.remove(index))
    }

    pub fn has_color(&self, color: Color) -> bool {
        self.cards.iter().any(|card| card.color() == Some(color))
    }

    /// Sum of the point values still held.
    pub fn points(&self) -> u32 {
        self.cards.iter().map(Card::points).sum()
    }

    pub(crate) fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }
}

/// A seat at the table: identity, hand, dealer flag and the selection policy.
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    is_dealer: bool,
    policy: Box<dyn Policy>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String, policy: Box<dyn Policy>) -> Self {
        Self {
            id,
            name,
            hand: Hand::new(),
            is_dealer: false,
            policy,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }

    pub fn policy_label(&self) -> &str {
        self.policy.label()
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub(crate) fn set_dealer(&mut self, is_dealer: bool) {
        self.is_dealer = is_dealer;
    }

    pub(crate) fn parts_mut(&mut self) -> (&Hand, &mut dyn Policy) {
        (&self.hand, self.policy.as_mut())
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("is_dealer", &self.is_dealer)
            .field("policy", &self.policy.label())
            .finish()
    }
}
