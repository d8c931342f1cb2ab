//! A single round of play, from the deal until one player empties their hand.

use tracing::{debug, trace};

use crate::action::{Action, PlayerId};
use crate::card::{Card, Color, DECK_SIZE, Rank};
use crate::deck::{Deck, SharedShuffler};
use crate::error::{DeckError, GameError, InvalidAction};
use crate::score::winner_points;
use crate::state::{Direction, HandStatus, HandView, PlayerPublicState};

/// Most players a hand can seat when dealing `cards_per_player` each and
/// flipping one starting card.
pub fn max_players(cards_per_player: usize) -> usize {
    if cards_per_player == 0 {
        return 0;
    }
    (DECK_SIZE - 1) / cards_per_player
}

/// Validates a seating before any cards are touched.
pub(crate) fn validate_table(players: usize, cards_per_player: usize) -> Result<(), GameError> {
    if cards_per_player == 0 {
        return Err(GameError::InvalidConfiguration(
            "cards per player must be positive",
        ));
    }
    if players < 2 {
        return Err(GameError::NotEnoughPlayers { players });
    }
    let max = max_players(cards_per_player);
    if players > max {
        return Err(GameError::TooManyPlayers { players, max });
    }
    Ok(())
}

/// Round state machine: piles, held cards, and turn order.
#[derive(Clone)]
pub struct Hand {
    players: Vec<String>,
    dealer: PlayerId,
    shuffler: SharedShuffler,
    /// Index 0 is the top of the pile.
    draw_pile: Vec<Card>,
    /// Last element is the top of the pile.
    discard_pile: Vec<Card>,
    hands: Vec<Vec<Card>>,
    player_in_turn: PlayerId,
    direction: Direction,
    /// `Color::None` only while the dealer owes the opening color.
    active_color: Color,
    pending_draw: usize,
    status: HandStatus,
    uno_called: Vec<bool>,
    /// Player whose last play left them on one card without calling uno.
    uno_exposed: Option<PlayerId>,
}

impl Hand {
    /// Shuffles a fresh deck, deals `cards_per_player` to each seat starting
    /// left of the dealer, and flips the starting card.
    pub fn new(
        players: Vec<String>,
        dealer: PlayerId,
        shuffler: SharedShuffler,
        cards_per_player: usize,
    ) -> Result<Self, GameError> {
        let count = players.len();
        validate_table(count, cards_per_player)?;
        if dealer >= count {
            return Err(GameError::InvalidPlayer(dealer));
        }

        let mut deck = Deck::initial()?.shuffled(shuffler.as_ref())?;
        let first = Direction::Clockwise.step(dealer, 1, count);
        let mut hands = vec![Vec::with_capacity(cards_per_player); count];
        for (offset, card) in deck.deal(cards_per_player * count)?.into_iter().enumerate() {
            hands[(first + offset) % count].push(card);
        }
        let top = deck
            .deal(1)?
            .into_iter()
            .next()
            .ok_or(DeckError::DeckExhausted)?;

        let mut hand = Hand {
            players,
            dealer,
            shuffler,
            draw_pile: deck.into_cards(),
            discard_pile: vec![top],
            hands,
            player_in_turn: first,
            direction: Direction::Clockwise,
            active_color: top.color,
            pending_draw: 0,
            status: HandStatus::InProgress,
            uno_called: vec![false; count],
            uno_exposed: None,
        };
        hand.apply_opening_card(top);
        debug!(
            players = count,
            dealer,
            top = %top,
            first_to_act = hand.player_in_turn,
            "hand dealt"
        );
        Ok(hand)
    }

    fn apply_opening_card(&mut self, top: Card) {
        let count = self.players.len();
        match top.rank {
            Rank::Number(_) => {}
            Rank::Skip => {
                self.player_in_turn = self.direction.step(self.player_in_turn, 1, count);
            }
            Rank::Reverse => {
                self.direction = self.direction.reversed();
                self.player_in_turn = self.direction.step(self.dealer, 1, count);
            }
            Rank::DrawTwo => self.pending_draw = 2,
            Rank::Wild => {}
            Rank::WildDrawFour => self.pending_draw = 4,
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    pub fn player_in_turn(&self) -> PlayerId {
        self.player_in_turn
    }

    /// The seat expected to act next: the dealer while the opening color is
    /// pending, otherwise the player in turn.
    pub fn player_to_act(&self) -> PlayerId {
        if self.awaiting_opening_color() {
            self.dealer
        } else {
            self.player_in_turn
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_color(&self) -> Option<Color> {
        self.active_color.is_real().then_some(self.active_color)
    }

    pub fn awaiting_opening_color(&self) -> bool {
        !self.active_color.is_real() && !self.has_ended()
    }

    pub fn pending_draw(&self) -> usize {
        self.pending_draw
    }

    pub fn player_hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.hands.get(player).map(Vec::as_slice)
    }

    /// Draw pile, top card first.
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Discard pile, top card last.
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn has_ended(&self) -> bool {
        matches!(self.status, HandStatus::Ended { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            HandStatus::Ended { winner } => Some(winner),
            HandStatus::InProgress => None,
        }
    }

    pub fn said_uno(&self, player: PlayerId) -> bool {
        self.uno_called.get(player).copied().unwrap_or(false)
    }

    /// Points the winner collects from everyone else's remaining cards.
    pub fn score(&self) -> Option<u32> {
        self.winner().map(|winner| winner_points(&self.hands, winner))
    }

    /// Whether the player in turn may play the card at `card_index` right now.
    pub fn can_play(&self, card_index: usize) -> bool {
        if self.has_ended() || self.awaiting_opening_color() || self.pending_draw > 0 {
            return false;
        }
        let (Some(top), Some(card)) = (
            self.top_card(),
            self.hands[self.player_in_turn].get(card_index),
        ) else {
            return false;
        };
        card.playable_on(&top, self.active_color)
    }

    pub fn can_play_any(&self) -> bool {
        (0..self.hands[self.player_in_turn].len()).any(|index| self.can_play(index))
    }

    /// Plays the card at `card_index` from `player`'s hand. `chosen_color` is
    /// required for wild cards and ignored otherwise.
    pub fn play(
        &mut self,
        player: PlayerId,
        card_index: usize,
        chosen_color: Option<Color>,
    ) -> Result<(), GameError> {
        self.check_turn(player)?;
        if self.pending_draw > 0 {
            return Err(InvalidAction::MustDraw {
                count: self.pending_draw,
            }
            .into());
        }
        let card = *self.hands[player]
            .get(card_index)
            .ok_or(InvalidAction::InvalidCardIndex(card_index))?;
        let top = self.top_card().ok_or(DeckError::DeckExhausted)?;
        if !card.playable_on(&top, self.active_color) {
            return Err(InvalidAction::IllegalPlay {
                card,
                top,
                active_color: self.active_color,
            }
            .into());
        }
        let next_color = if card.is_wild() {
            match chosen_color {
                None => return Err(InvalidAction::ColorRequired.into()),
                Some(color) if !color.is_real() => {
                    return Err(InvalidAction::InvalidColor(color).into());
                }
                Some(color) => color,
            }
        } else {
            card.color
        };

        self.hands[player].remove(card_index);
        self.discard_pile.push(card);
        self.active_color = next_color;
        self.uno_exposed = None;
        trace!(player, card = %card, "card played");

        let remaining = self.hands[player].len();
        if remaining == 0 {
            self.status = HandStatus::Ended { winner: player };
            debug!(winner = player, "hand ended");
            return Ok(());
        }
        if remaining == 1 && !self.uno_called[player] {
            self.uno_exposed = Some(player);
        }

        let count = self.players.len();
        match card.rank {
            Rank::Number(_) | Rank::Wild => self.advance(1),
            Rank::Skip => self.advance(2),
            Rank::Reverse => {
                self.direction = self.direction.reversed();
                self.advance(if count == 2 { 2 } else { 1 });
            }
            Rank::DrawTwo | Rank::WildDrawFour => {
                self.pending_draw = card.rank.forced_draw();
                self.advance(1);
            }
        }
        Ok(())
    }

    /// Draws one card, or the pending forced amount, and passes the turn.
    pub fn draw(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_turn(player)?;
        let count = self.pending_draw.max(1);
        let drawn = self.take_cards(count)?;
        trace!(player, drawn = drawn.len(), forced = self.pending_draw > 0, "cards drawn");
        self.give(player, drawn);
        self.uno_exposed = None;
        self.pending_draw = 0;
        self.advance(1);
        Ok(())
    }

    /// Records the dealer's color choice after a wild was flipped to open the hand.
    pub fn choose_opening_color(&mut self, player: PlayerId, color: Color) -> Result<(), GameError> {
        self.check_player(player)?;
        if !self.awaiting_opening_color() {
            return Err(InvalidAction::OpeningColorAlreadySet.into());
        }
        if player != self.dealer {
            return Err(InvalidAction::NotDealer.into());
        }
        if !color.is_real() {
            return Err(InvalidAction::InvalidColor(color).into());
        }
        self.active_color = color;
        debug!(dealer = player, color = ?color, "opening color chosen");
        Ok(())
    }

    /// Whether `player` may announce uno right now: holding one card, or
    /// holding two while about to play.
    pub fn can_say_uno(&self, player: PlayerId) -> bool {
        if self.has_ended() || player >= self.players.len() || self.uno_called[player] {
            return false;
        }
        match self.hands[player].len() {
            1 => true,
            2 => {
                player == self.player_in_turn
                    && !self.awaiting_opening_color()
                    && self.pending_draw == 0
            }
            _ => false,
        }
    }

    pub fn say_uno(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_player(player)?;
        if !self.can_say_uno(player) {
            return Err(InvalidAction::UnoNotAllowed.into());
        }
        self.uno_called[player] = true;
        if self.uno_exposed == Some(player) {
            self.uno_exposed = None;
        }
        Ok(())
    }

    /// Player that could currently be caught for not calling uno.
    pub fn uno_exposed(&self) -> Option<PlayerId> {
        self.uno_exposed
    }

    /// Accuses `accused` of failing to call uno. On a valid catch the accused
    /// draws four cards and `true` is returned; otherwise nothing changes.
    pub fn catch_uno_failure(
        &mut self,
        accuser: PlayerId,
        accused: PlayerId,
    ) -> Result<bool, GameError> {
        self.check_player(accuser)?;
        self.check_player(accused)?;
        if accuser == accused || self.uno_exposed != Some(accused) {
            return Ok(false);
        }
        let penalty = self.take_cards(4)?;
        debug!(accuser, accused, "uno failure caught");
        self.give(accused, penalty);
        self.uno_exposed = None;
        Ok(true)
    }

    /// Actions `player` may take. Empty once the hand has ended.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.has_ended() {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        let mut actions = Vec::new();
        if self.can_say_uno(player) {
            actions.push(Action::SayUno);
        }
        if let Some(accused) = self.uno_exposed.filter(|accused| *accused != player) {
            actions.push(Action::CatchUnoFailure { accused });
        }
        if self.awaiting_opening_color() {
            if player == self.dealer {
                actions.extend(Color::REAL.into_iter().map(Action::ChooseOpeningColor));
            }
            return Ok(actions);
        }
        if player != self.player_in_turn {
            return Ok(actions);
        }
        if self.pending_draw == 0 {
            for (card_index, card) in self.hands[player].iter().enumerate() {
                if !self.can_play(card_index) {
                    continue;
                }
                if card.is_wild() {
                    actions.extend(Color::REAL.into_iter().map(|color| Action::Play {
                        card_index,
                        color: Some(color),
                    }));
                } else {
                    actions.push(Action::Play {
                        card_index,
                        color: None,
                    });
                }
            }
        }
        actions.push(Action::Draw);
        Ok(actions)
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        match action {
            Action::Play { card_index, color } => self.play(player, card_index, color),
            Action::Draw => self.draw(player),
            Action::ChooseOpeningColor(color) => self.choose_opening_color(player, color),
            Action::SayUno => self.say_uno(player),
            Action::CatchUnoFailure { accused } => {
                self.catch_uno_failure(player, accused).map(|_| ())
            }
        }
    }

    /// Snapshot from `perspective`'s seat.
    pub fn view(&self, perspective: PlayerId) -> Result<HandView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let to_act = self.player_to_act();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(id, name)| PlayerPublicState {
                id,
                name: name.clone(),
                hand_size: self.hands[id].len(),
                is_current: id == to_act,
                said_uno: self.uno_called[id],
            })
            .collect();
        Ok(HandView {
            status: self.status,
            self_player: perspective,
            current_player: to_act,
            dealer: self.dealer,
            direction: self.direction,
            active_color: self.active_color(),
            pending_draw: self.pending_draw,
            draw_pile_count: self.draw_pile.len(),
            discard_pile: self.discard_pile.clone(),
            players,
            hand: self.hands[perspective].clone(),
        })
    }

    fn check_player(&self, player: PlayerId) -> Result<(), GameError> {
        if self.has_ended() {
            return Err(GameError::HandEnded);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        Ok(())
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), GameError> {
        self.check_player(player)?;
        if self.awaiting_opening_color() {
            return Err(InvalidAction::OpeningColorPending.into());
        }
        if player != self.player_in_turn {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }

    fn advance(&mut self, steps: usize) {
        self.player_in_turn = self
            .direction
            .step(self.player_in_turn, steps, self.players.len());
    }

    fn give(&mut self, player: PlayerId, cards: Vec<Card>) {
        self.hands[player].extend(cards);
        if self.hands[player].len() > 1 {
            self.uno_called[player] = false;
        }
    }

    /// Takes up to `count` cards off the draw pile, rebuilding it from the
    /// discard pile (all but the top card) whenever it runs dry. Nothing is
    /// mutated unless the whole draw succeeds.
    fn take_cards(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        let reshuffleable = self.discard_pile.len().saturating_sub(1);
        if self.draw_pile.is_empty() && reshuffleable == 0 {
            return Err(DeckError::DeckExhausted.into());
        }
        let from_pile = count.min(self.draw_pile.len());
        let refill = if from_pile < count && reshuffleable > 0 {
            let rest = Deck::from_cards(self.discard_pile[..reshuffleable].to_vec());
            Some(rest.shuffled(self.shuffler.as_ref())?.into_cards())
        } else {
            None
        };

        let mut drawn: Vec<Card> = self.draw_pile.drain(..from_pile).collect();
        if let Some(fresh) = refill {
            self.discard_pile = self.discard_pile.split_off(reshuffleable);
            self.draw_pile = fresh;
            debug!(cards = self.draw_pile.len(), "reshuffled discard pile into draw pile");
            let more = (count - from_pile).min(self.draw_pile.len());
            drawn.extend(self.draw_pile.drain(..more));
        }
        Ok(drawn)
    }
}
