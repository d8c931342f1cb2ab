use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat reached after moving `steps` seats from `from` at a table of `players`.
    pub fn step(self, from: PlayerId, steps: usize, players: usize) -> PlayerId {
        let steps = steps % players;
        match self {
            Direction::Clockwise => (from + steps) % players,
            Direction::CounterClockwise => (from + players - steps) % players,
        }
    }
}

/// Status of a single hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStatus {
    InProgress,
    Ended { winner: PlayerId },
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub is_current: bool,
    pub said_uno: bool,
}

/// Hand snapshot for one seat. Other players' cards are reduced to counts and
/// the draw pile is reduced to its size.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandView {
    pub status: HandStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub dealer: PlayerId,
    pub direction: Direction,
    /// `None` while the dealer still owes the opening color.
    pub active_color: Option<Color>,
    pub pending_draw: usize,
    pub draw_pile_count: usize,
    /// Full discard pile, top card last.
    pub discard_pile: Vec<Card>,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl HandView {
    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }
}

/// Outcome of a completed, scored hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub winner: PlayerId,
    pub points: u32,
}

/// Match snapshot for one seat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameView {
    pub players: Vec<String>,
    pub scores: Vec<u32>,
    pub target_score: u32,
    pub winner: Option<PlayerId>,
    pub hands_played: usize,
    pub hand_scored: bool,
    pub hand: HandView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_wraps_both_ways() {
        assert_eq!(Direction::Clockwise.step(3, 1, 4), 0);
        assert_eq!(Direction::Clockwise.step(1, 2, 4), 3);
        assert_eq!(Direction::CounterClockwise.step(0, 1, 4), 3);
        assert_eq!(Direction::CounterClockwise.step(1, 2, 4), 3);
        assert_eq!(Direction::CounterClockwise.step(0, 2, 2), 0);
    }
}
