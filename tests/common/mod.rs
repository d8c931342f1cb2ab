#![allow(dead_code)]

use std::sync::Arc;

use unobot::card::{DECK_SIZE, full_deck};
use unobot::deck::is_standard_composition;
use unobot::{Card, GameError, Hand, IdentityShuffler, SharedShuffler};

pub fn names(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("P{index}")).collect()
}

/// Full deck order that deals `hands` (seat-indexed, equal sizes) starting
/// left of `dealer`, flips `top`, and leaves `draws` on top of the draw pile.
/// The remaining cards follow in canonical order.
pub fn stacked_deck(hands: &[Vec<Card>], dealer: usize, top: Card, draws: &[Card]) -> Vec<Card> {
    let count = hands.len();
    let per_player = hands[0].len();
    let first = (dealer + 1) % count;
    let mut order = Vec::with_capacity(DECK_SIZE);
    for offset in 0..per_player * count {
        let seat = (first + offset) % count;
        order.push(hands[seat][offset / count]);
    }
    order.push(top);
    order.extend_from_slice(draws);
    let mut rest = full_deck();
    for card in &order {
        let position = rest
            .iter()
            .position(|candidate| candidate == card)
            .expect("stacked card exceeds the deck composition");
        rest.remove(position);
    }
    order.extend(rest);
    order
}

/// Shuffler that lays out a fixed full deck and leaves reshuffles in order.
pub fn stacked_shuffler(order: Vec<Card>) -> SharedShuffler {
    Arc::new(move |cards: Vec<Card>| {
        if cards.len() == DECK_SIZE {
            order.clone()
        } else {
            cards
        }
    })
}

pub fn stacked_hand(
    hands: &[Vec<Card>],
    dealer: usize,
    top: Card,
    draws: &[Card],
) -> Result<Hand, GameError> {
    let order = stacked_deck(hands, dealer, top, draws);
    Hand::new(
        names(hands.len()),
        dealer,
        stacked_shuffler(order),
        hands[0].len(),
    )
}

pub fn identity_hand(players: usize, dealer: usize) -> Result<Hand, GameError> {
    Hand::new(names(players), dealer, Arc::new(IdentityShuffler), 7)
}

/// Every card is in exactly one place.
pub fn assert_full_composition(hand: &Hand) {
    let mut cards: Vec<Card> = Vec::with_capacity(DECK_SIZE);
    cards.extend_from_slice(hand.draw_pile());
    cards.extend_from_slice(hand.discard_pile());
    for seat in 0..hand.player_count() {
        cards.extend_from_slice(hand.player_hand(seat).expect("seat in range"));
    }
    assert!(is_standard_composition(&cards), "card multiset diverged");
}
