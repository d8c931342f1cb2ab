use crate::action::Action;
use crate::state::HandView;

/// Interface for defining custom Uno bots.
pub trait Bot {
    fn select_action(&mut self, state: &HandView, legal_actions: &[Action]) -> Action;
}
