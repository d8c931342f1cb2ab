use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("hand has already ended")]
    HandEnded,
    #[error("hand is still in progress")]
    HandInProgress,
    #[error("hand has not been scored yet")]
    HandNotScored,
    #[error("hand has already been scored")]
    AlreadyScored,
    #[error("match is already over")]
    MatchOver,
    #[error("at least 2 players are required, received {players}")]
    NotEnoughPlayers { players: usize },
    #[error("at most {max} players are supported, received {players}")]
    TooManyPlayers { players: usize, max: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Details of rejected player actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    InvalidCardIndex(usize),
    #[error("{card} cannot be played on {top} while the active color is {active_color:?}")]
    IllegalPlay {
        card: Card,
        top: Card,
        active_color: Color,
    },
    #[error("a color must be chosen when playing a wild card")]
    ColorRequired,
    #[error("{0:?} is not a color that can be chosen")]
    InvalidColor(Color),
    #[error("player must draw {count} cards before playing")]
    MustDraw { count: usize },
    #[error("the dealer has not chosen the opening color yet")]
    OpeningColorPending,
    #[error("the opening color is not open for choosing")]
    OpeningColorAlreadySet,
    #[error("only the dealer may choose the opening color")]
    NotDealer,
    #[error("player cannot call uno with this many cards")]
    UnoNotAllowed,
}

/// Failures of deck composition and dealing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("requested {requested} cards but only {available} remain")]
    InsufficientCards { requested: usize, available: usize },
    #[error("no cards left to draw or reshuffle")]
    DeckExhausted,
    #[error("deck does not match the standard composition")]
    CompositionMismatch,
    #[error("shuffler did not return a permutation of its input")]
    ShuffleMismatch,
}
