//! Scoring utilities.
//!
//! Scoring rule (winner-only):
//!   points = sum of the card values left in every opponent's hand
//! Numbers count face value, Skip/Reverse/DrawTwo count 20, wild cards count 50.

use crate::action::PlayerId;
use crate::card::Card;

/// Point value of the cards a player is still holding.
pub fn hand_points(cards: &[Card]) -> u32 {
    cards.iter().map(Card::points).sum()
}

/// Points awarded to `winner` given every player's remaining cards.
pub fn winner_points(hands: &[Vec<Card>], winner: PlayerId) -> u32 {
    hands
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != winner)
        .map(|(_, cards)| hand_points(cards))
        .sum()
}
