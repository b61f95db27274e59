use serde::{Deserialize, Serialize};

use crate::action::PlayerId;

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Seating order plus direction; computes who acts next.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TurnOrder {
    seats: usize,
    direction: Direction,
}

impl TurnOrder {
    pub fn new(seats: usize) -> Self {
        debug_assert!(seats > 0);
        Self {
            seats,
            direction: Direction::Clockwise,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Player `steps` seats away from `from` in the current direction.
    pub fn step(&self, from: PlayerId, steps: usize) -> PlayerId {
        let steps = steps % self.seats;
        match self.direction {
            Direction::Clockwise => (from + steps) % self.seats,
            Direction::CounterClockwise => (from + self.seats - steps) % self.seats,
        }
    }

    pub fn next(&self, from: PlayerId) -> PlayerId {
        self.step(from, 1)
    }

    /// Flip the direction. Returns true when the flip left the upcoming player
    /// unchanged, in which case that player is passed over.
    pub fn reverse(&mut self, from: PlayerId) -> bool {
        let upcoming = self.next(from);
        self.direction = self.direction.flipped();
        self.next(from) == upcoming
    }
}
