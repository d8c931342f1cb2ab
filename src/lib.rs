//! Uno rules engine: deck, hand state machine, and match scoring, plus bots
//! for driving simulations.
//!
//! The engine performs no I/O. All randomness flows through an injected
//! [`Shuffler`], so every hand and match can be replayed exactly.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod score;
pub mod state;

pub use crate::action::{Action, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{HeuristicBot, RandomBot};
pub use crate::card::{Card, Color, Rank};
pub use crate::deck::{
    Deck, IdentityShuffler, SeededShuffler, SharedShuffler, Shuffler, StandardShuffler,
};
pub use crate::error::{DeckError, GameError, InvalidAction};
pub use crate::game::{DEFAULT_TARGET_SCORE, Game, GameBuilder, GameConfig};
pub use crate::hand::{Hand, max_players};
pub use crate::score::{hand_points, winner_points};
pub use crate::state::{
    Direction, GameView, HandResult, HandStatus, HandView, PlayerPublicState,
};
