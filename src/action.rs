use serde::{Deserialize, Serialize};

use crate::card::Color;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent within a hand.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand by index. `color` is required for wild cards.
    Play {
        card_index: usize,
        color: Option<Color>,
    },
    /// Draw one card, or the forced amount after a Draw-Two/Draw-Four.
    Draw,
    /// Dealer chooses the opening color after a wild is flipped.
    ChooseOpeningColor(Color),
    /// Announce one card left.
    SayUno,
    /// Accuse another player of not calling uno.
    CatchUnoFailure { accused: PlayerId },
}

impl Action {
    /// Returns the hand index if the action is a play.
    pub fn card_index(&self) -> Option<usize> {
        match self {
            Action::Play { card_index, .. } => Some(*card_index),
            _ => None,
        }
    }
}
