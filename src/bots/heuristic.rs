use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, Color};
use crate::state::HandView;

/// Rule-based bot that plays "sensible" moves without search or learning.
///
/// In plain English:
/// - Always call uno when allowed, and catch anyone who forgot to.
/// - Get rid of expensive cards first: action cards before high numbers before low numbers.
/// - Hold wild cards back until nothing else is playable.
/// - Name the color it holds the most of whenever a color must be chosen.
/// - Draw only when no card can be played.
#[derive(Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    /// Color most represented in `hand`, ignoring the card at `skip`.
    fn favorite_color(hand: &[Card], skip: Option<usize>) -> Color {
        let mut counts = [0usize; 4];
        for (index, card) in hand.iter().enumerate() {
            if Some(index) == skip {
                continue;
            }
            if let Some(slot) = Color::REAL.iter().position(|color| *color == card.color) {
                counts[slot] += 1;
            }
        }
        let mut best = 0;
        for slot in 1..counts.len() {
            if counts[slot] > counts[best] {
                best = slot;
            }
        }
        Color::REAL[best]
    }

    /// Larger is better. Wild cards sit below every colored card.
    fn score_play(card: &Card) -> i32 {
        if card.is_wild() {
            -100 + card.points() as i32 / 10
        } else {
            card.points() as i32
        }
    }
}

impl Bot for HeuristicBot {
    fn select_action(&mut self, state: &HandView, legal_actions: &[Action]) -> Action {
        if legal_actions.contains(&Action::SayUno) {
            return Action::SayUno;
        }
        if let Some(catch) = legal_actions
            .iter()
            .find(|action| matches!(action, Action::CatchUnoFailure { .. }))
        {
            return catch.clone();
        }
        if legal_actions
            .iter()
            .any(|action| matches!(action, Action::ChooseOpeningColor(_)))
        {
            return Action::ChooseOpeningColor(Self::favorite_color(&state.hand, None));
        }

        let best_play = legal_actions
            .iter()
            .filter_map(|action| match action {
                Action::Play { card_index, .. } => state
                    .hand
                    .get(*card_index)
                    .map(|card| (*card_index, Self::score_play(card))),
                _ => None,
            })
            .max_by_key(|(_, score)| *score);

        match best_play {
            Some((card_index, _)) => {
                let wild = state
                    .hand
                    .get(card_index)
                    .map(Card::is_wild)
                    .unwrap_or(false);
                let color = wild.then(|| Self::favorite_color(&state.hand, Some(card_index)));
                Action::Play { card_index, color }
            }
            None => Action::Draw,
        }
    }
}
