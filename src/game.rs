use std::sync::Arc;

use tracing::{debug, info};

use crate::action::PlayerId;
use crate::card::DEFAULT_CARDS_PER_PLAYER;
use crate::deck::{SeededShuffler, SharedShuffler, StandardShuffler, Shuffler};
use crate::error::GameError;
use crate::hand::{Hand, validate_table};
use crate::state::{GameView, HandResult};

pub const DEFAULT_TARGET_SCORE: u32 = 500;

/// Configuration required to bootstrap a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub target_score: u32,
    pub cards_per_player: usize,
    pub dealer: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
            dealer: 0,
        }
    }
}

/// Builder that enables deterministic shuffler injection for tests and simulations.
pub struct GameBuilder {
    players: Vec<String>,
    config: GameConfig,
    shuffler: Option<SharedShuffler>,
}

impl GameBuilder {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            config: GameConfig::default(),
            shuffler: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.config.target_score = target_score;
        self
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.config.cards_per_player = cards_per_player;
        self
    }

    pub fn with_dealer(mut self, dealer: PlayerId) -> Self {
        self.config.dealer = dealer;
        self
    }

    pub fn with_shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Some(Arc::new(shuffler));
        self
    }

    pub fn with_shared_shuffler(mut self, shuffler: SharedShuffler) -> Self {
        self.shuffler = Some(shuffler);
        self
    }

    /// Shorthand for a [`SeededShuffler`] so whole matches can be replayed.
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_shuffler(SeededShuffler::new(seed))
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// A match: successive hands scored until someone reaches the target.
pub struct Game {
    players: Vec<String>,
    scores: Vec<u32>,
    target_score: u32,
    cards_per_player: usize,
    dealer: PlayerId,
    shuffler: SharedShuffler,
    current_hand: Hand,
    hand_scored: bool,
    history: Vec<HandResult>,
}

impl Game {
    pub fn builder<I, S>(players: I) -> GameBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(players)
    }

    pub fn new<I, S>(players: I, config: GameConfig) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(players).with_config(config).build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            players,
            config,
            shuffler,
        } = builder;
        validate_table(players.len(), config.cards_per_player)?;
        if config.target_score == 0 {
            return Err(GameError::InvalidConfiguration(
                "target score must be positive",
            ));
        }
        if config.dealer >= players.len() {
            return Err(GameError::InvalidPlayer(config.dealer));
        }
        let shuffler = shuffler.unwrap_or_else(|| Arc::new(StandardShuffler) as SharedShuffler);
        let current_hand = Hand::new(
            players.clone(),
            config.dealer,
            Arc::clone(&shuffler),
            config.cards_per_player,
        )?;
        info!(
            players = players.len(),
            target_score = config.target_score,
            "match started"
        );
        Ok(Self {
            scores: vec![0; players.len()],
            players,
            target_score: config.target_score,
            cards_per_player: config.cards_per_player,
            dealer: config.dealer,
            shuffler,
            current_hand,
            hand_scored: false,
            history: Vec::new(),
        })
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    pub fn current_hand(&self) -> &Hand {
        &self.current_hand
    }

    /// Mutable access for routing player actions into the live hand.
    pub fn current_hand_mut(&mut self) -> &mut Hand {
        &mut self.current_hand
    }

    pub fn hand_scored(&self) -> bool {
        self.hand_scored
    }

    /// Winner and points of every hand scored so far, oldest first.
    pub fn history(&self) -> &[HandResult] {
        &self.history
    }

    /// Credits the current hand's winner with the points left in every other
    /// hand. May be called once per hand.
    pub fn update_scores(&mut self) -> Result<u32, GameError> {
        if self.hand_scored {
            return Err(GameError::AlreadyScored);
        }
        let (Some(winner), Some(points)) = (self.current_hand.winner(), self.current_hand.score())
        else {
            return Err(GameError::HandInProgress);
        };
        self.scores[winner] += points;
        self.hand_scored = true;
        self.history.push(HandResult { winner, points });
        debug!(winner, points, total = self.scores[winner], "hand scored");
        if let Some(match_winner) = self.winner() {
            info!(winner = match_winner, score = self.scores[match_winner], "match won");
        }
        Ok(points)
    }

    /// First player, by seat order, whose score reached the target.
    pub fn winner(&self) -> Option<PlayerId> {
        self.scores
            .iter()
            .position(|score| *score >= self.target_score)
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    /// Passes the deal one seat to the left and deals a fresh hand.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.winner().is_some() {
            return Err(GameError::MatchOver);
        }
        if !self.current_hand.has_ended() {
            return Err(GameError::HandInProgress);
        }
        if !self.hand_scored {
            return Err(GameError::HandNotScored);
        }
        let dealer = (self.dealer + 1) % self.players.len();
        let hand = Hand::new(
            self.players.clone(),
            dealer,
            Arc::clone(&self.shuffler),
            self.cards_per_player,
        )?;
        self.dealer = dealer;
        self.current_hand = hand;
        self.hand_scored = false;
        debug!(dealer, hand = self.history.len() + 1, "new hand started");
        Ok(())
    }

    pub fn view(&self, perspective: PlayerId) -> Result<GameView, GameError> {
        Ok(GameView {
            players: self.players.clone(),
            scores: self.scores.clone(),
            target_score: self.target_score,
            winner: self.winner(),
            hands_played: self.history.len(),
            hand_scored: self.hand_scored,
            hand: self.current_hand.view(perspective)?,
        })
    }
}
