//! Deck construction and the injectable shuffling seam.
//!
//! The engine never touches a random number generator directly: every
//! permutation of cards goes through a [`Shuffler`].

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::card::{Card, full_deck};
use crate::error::DeckError;

/// Strategy producing a permutation of a card sequence.
pub trait Shuffler: Send + Sync {
    fn shuffle(&self, cards: Vec<Card>) -> Vec<Card>;
}

/// Shuffler handle shared between a game and every hand it deals.
pub type SharedShuffler = Arc<dyn Shuffler>;

impl<F> Shuffler for F
where
    F: Fn(Vec<Card>) -> Vec<Card> + Send + Sync,
{
    fn shuffle(&self, cards: Vec<Card>) -> Vec<Card> {
        self(cards)
    }
}

/// Shuffles with the thread-local OS-seeded generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardShuffler;

impl Shuffler for StandardShuffler {
    fn shuffle(&self, mut cards: Vec<Card>) -> Vec<Card> {
        cards.shuffle(&mut rand::thread_rng());
        cards
    }
}

/// Leaves the order untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&self, cards: Vec<Card>) -> Vec<Card> {
        cards
    }
}

/// Reproducible shuffler for simulations and replays.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&self, mut cards: Vec<Card>) -> Vec<Card> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        cards.shuffle(&mut *rng);
        cards
    }
}

/// Ordered sequence of cards. Index 0 is the dealing end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The full standard deck in canonical order.
    pub fn initial() -> Result<Self, DeckError> {
        let deck = Self { cards: full_deck() };
        if !is_standard_composition(&deck.cards) {
            return Err(DeckError::CompositionMismatch);
        }
        Ok(deck)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns a new deck permuted by `shuffler`; `self` is left as is.
    pub fn shuffled(&self, shuffler: &dyn Shuffler) -> Result<Self, DeckError> {
        let cards = shuffler.shuffle(self.cards.clone());
        if !same_multiset(&self.cards, &cards) {
            return Err(DeckError::ShuffleMismatch);
        }
        Ok(Self { cards })
    }

    /// Removes `count` cards from the dealing end.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
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

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Checks that `cards` is exactly the 108-card composition, in any order.
pub fn is_standard_composition(cards: &[Card]) -> bool {
    same_multiset(cards, &full_deck())
}

fn same_multiset(a: &[Card], b: &[Card]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left = a.to_vec();
    let mut right = b.to_vec();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Color, DECK_SIZE};

    #[test]
    fn identity_shuffle_preserves_order() -> Result<(), DeckError> {
        let deck = Deck::initial()?;
        let shuffled = deck.shuffled(&IdentityShuffler)?;
        assert_eq!(shuffled, deck);
        Ok(())
    }

    #[test]
    fn seeded_shuffle_preserves_multiset_and_input() -> Result<(), DeckError> {
        let deck = Deck::initial()?;
        let shuffled = deck.shuffled(&SeededShuffler::new(7))?;
        assert!(is_standard_composition(shuffled.cards()));
        assert_ne!(shuffled, deck);
        assert_eq!(deck.cards(), full_deck().as_slice());
        Ok(())
    }

    #[test]
    fn seeded_shufflers_are_reproducible() -> Result<(), DeckError> {
        let deck = Deck::initial()?;
        let a = deck.shuffled(&SeededShuffler::new(42))?;
        let b = deck.shuffled(&SeededShuffler::new(42))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn closure_shuffler_is_accepted() -> Result<(), DeckError> {
        let deck = Deck::initial()?;
        let reverse = |mut cards: Vec<Card>| {
            cards.reverse();
            cards
        };
        let shuffled = deck.shuffled(&reverse)?;
        assert_eq!(shuffled.cards()[0], Card::wild_draw_four());
        Ok(())
    }

    #[test]
    fn shuffler_that_drops_cards_is_rejected() -> Result<(), DeckError> {
        let deck = Deck::initial()?;
        let lossy = |mut cards: Vec<Card>| {
            cards.pop();
            cards
        };
        assert_eq!(deck.shuffled(&lossy), Err(DeckError::ShuffleMismatch));
        Ok(())
    }

    #[test]
    fn deal_takes_from_front() -> Result<(), DeckError> {
        let mut deck = Deck::initial()?;
        let dealt = deck.deal(3)?;
        assert_eq!(
            dealt,
            vec![
                Card::number(Color::Red, 0),
                Card::number(Color::Red, 1),
                Card::number(Color::Red, 1),
            ]
        );
        assert_eq!(deck.len(), DECK_SIZE - 3);
        Ok(())
    }

    #[test]
    fn deal_more_than_available_fails() {
        let mut deck = Deck::from_cards(vec![Card::wild()]);
        assert_eq!(
            deck.deal(2),
            Err(DeckError::InsufficientCards {
                requested: 2,
                available: 1
            })
        );
        assert_eq!(deck.len(), 1);
    }
}
