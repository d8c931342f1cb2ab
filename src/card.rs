use std::fmt;

use serde::{Deserialize, Serialize};

/// Card color. `None` only appears on wild cards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    None,
}

impl Color {
    /// The four colors a player can match or choose.
    pub const REAL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    #[inline]
    pub fn is_real(&self) -> bool {
        !matches!(self, Color::None)
    }
}

/// Card rank. Effects on turn order are dispatched by matching on this.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Numbered card between 0 and 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }

    /// Cards the next player is forced to draw when this rank is played.
    #[inline]
    pub fn forced_draw(&self) -> usize {
        match self {
            Rank::DrawTwo => 2,
            Rank::WildDrawFour => 4,
            Rank::Number(_) | Rank::Skip | Rank::Reverse | Rank::Wild => 0,
        }
    }
}

/// An immutable Uno card. Wild cards keep `Color::None` even after being played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

pub const MAX_CARD_VALUE: u8 = 9;
pub const COPIES_PER_NONZERO: usize = 2;
pub const COPIES_PER_ACTION: usize = 2;
pub const WILD_COUNT: usize = 4;
pub const WILD_DRAW_FOUR_COUNT: usize = 4;
pub const CARDS_PER_COLOR: usize = 1 + 9 * COPIES_PER_NONZERO + 3 * COPIES_PER_ACTION;
pub const DECK_SIZE: usize = CARDS_PER_COLOR * 4 + WILD_COUNT + WILD_DRAW_FOUR_COUNT;
pub const DEFAULT_CARDS_PER_PLAYER: usize = 7;

impl Card {
    #[inline]
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    #[inline]
    pub const fn number(color: Color, value: u8) -> Self {
        Self::new(color, Rank::Number(value))
    }

    #[inline]
    pub const fn wild() -> Self {
        Self::new(Color::None, Rank::Wild)
    }

    #[inline]
    pub const fn wild_draw_four() -> Self {
        Self::new(Color::None, Rank::WildDrawFour)
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    /// Checks whether the card may be played on top of `top` while `active_color` is in force.
    #[inline]
    pub fn playable_on(&self, top: &Card, active_color: Color) -> bool {
        self.is_wild() || self.color == active_color || self.rank == top.rank
    }

    /// Point value counted against a player still holding the card when a hand ends.
    pub fn points(&self) -> u32 {
        match self.rank {
            Rank::Number(value) => u32::from(value),
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => 20,
            Rank::Wild | Rank::WildDrawFour => 50,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Color::Red => "R",
            Color::Yellow => "Y",
            Color::Green => "G",
            Color::Blue => "B",
            Color::None => "",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Rank::Number(value) => write!(f, "{}{}", self.color, value),
            Rank::Skip => write!(f, "{}S", self.color),
            Rank::Reverse => write!(f, "{}R", self.color),
            Rank::DrawTwo => write!(f, "{}+2", self.color),
            Rank::Wild => f.write_str("W"),
            Rank::WildDrawFour => f.write_str("W+4"),
        }
    }
}

/// Builds the full 108-card deck in canonical order (unshuffled).
///
/// Per color, in the order red, yellow, green, blue: one 0, two each of 1-9,
/// two Skip, two Reverse, two DrawTwo. The four Wild and four WildDrawFour
/// cards come last.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::REAL {
        deck.push(Card::number(color, 0));
        for value in 1..=MAX_CARD_VALUE {
            deck.extend(std::iter::repeat(Card::number(color, value)).take(COPIES_PER_NONZERO));
        }
        for rank in [Rank::Skip, Rank::Reverse, Rank::DrawTwo] {
            deck.extend(std::iter::repeat(Card::new(color, rank)).take(COPIES_PER_ACTION));
        }
    }
    deck.extend(std::iter::repeat(Card::wild()).take(WILD_COUNT));
    deck.extend(std::iter::repeat(Card::wild_draw_four()).take(WILD_DRAW_FOUR_COUNT));
    deck
}
