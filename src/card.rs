use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four suit colors. Wild-family cards carry no color of their own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
        };
        f.write_str(name)
    }
}

/// Closed set of card kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// Numbered card between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

/// Immutable card value. Colorless exactly when the kind is wild.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    color: Option<Color>,
    kind: Kind,
}

pub const MAX_NUMBER: u8 = 9;
pub const ACTION_POINTS: u32 = 20;
pub const WILD_POINTS: u32 = 50;
pub const DECK_SIZE: usize = 108;
pub const WILD_COPIES: usize = 4;
pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const WINNING_SCORE: u32 = 500;

impl Card {
    /// Numbered card.
    ///
    /// # Panics
    ///
    /// Panics if `value` is above 9; the catalog has no such card.
    pub fn number(color: Color, value: u8) -> Self {
        assert!(
            value <= MAX_NUMBER,
            "number cards run from 0 to {MAX_NUMBER}, got {value}"
        );
        Self {
            color: Some(color),
            kind: Kind::Number(value),
        }
    }

    pub fn skip(color: Color) -> Self {
        Self { color: Some(color), kind: Kind::Skip }
    }

    pub fn reverse(color: Color) -> Self {
        Self { color: Some(color), kind: Kind::Reverse }
    }

    pub fn draw_two(color: Color) -> Self {
        Self { color: Some(color), kind: Kind::DrawTwo }
    }

    pub fn wild() -> Self {
        Self { color: None, kind: Kind::Wild }
    }

    pub fn wild_draw_four() -> Self {
        Self { color: None, kind: Kind::WildDrawFour }
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self.kind, Kind::Wild | Kind::WildDrawFour)
    }

    /// Point value counted against a player still holding the card at round end.
    /// Doubles as the face value compared during the dealer draw.
    pub fn points(&self) -> u32 {
        match self.kind {
            Kind::Number(value) => value as u32,
            Kind::Skip | Kind::Reverse | Kind::DrawTwo => ACTION_POINTS,
            Kind::Wild | Kind::WildDrawFour => WILD_POINTS,
        }
    }

    /// Plain color/kind match against the active card, ignoring wild exemptions.
    #[inline]
    pub fn matches(&self, active: ActiveCard) -> bool {
        self.color == Some(active.color) || self.kind == active.card.kind
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Number(value) => value.to_string(),
            Kind::Skip => "Skip".to_string(),
            Kind::Reverse => "Reverse".to_string(),
            Kind::DrawTwo => "Draw Two".to_string(),
            Kind::Wild => "Wild".to_string(),
            Kind::WildDrawFour => "Wild Draw Four".to_string(),
        };
        match self.color {
            Some(color) => write!(f, "{color} {kind}"),
            None => f.write_str(&kind),
        }
    }
}

/// Top of the discard stack together with the color other plays must follow.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActiveCard {
    pub card: Card,
    pub color: Color,
}

impl fmt::Display for ActiveCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.card.is_wild() {
            write!(f, "{} ({})", self.card, self.color)
        } else {
            write!(f, "{}", self.card)
        }
    }
}

/// Builds the full 108-card deck in deterministic order (unshuffled).
///
/// Per color: one 0, two of each 1-9, two each of Skip, Reverse and Draw Two.
/// Plus four Wild and four Wild Draw Four.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        deck.push(Card::number(color, 0));
        for value in 1..=MAX_NUMBER {
            deck.push(Card::number(color, value));
            deck.push(Card::number(color, value));
        }
        for _ in 0..2 {
            deck.push(Card::skip(color));
            deck.push(Card::reverse(color));
            deck.push(Card::draw_two(color));
        }
    }
    for _ in 0..WILD_COPIES {
        deck.push(Card::wild());
        deck.push(Card::wild_draw_four());
    }
    deck
}
