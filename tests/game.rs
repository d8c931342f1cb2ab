mod common;

use common::{stacked_deck, stacked_shuffler};
use unobot::{
    Card, Color, Game, GameConfig, GameError, HandResult, IdentityShuffler, SharedShuffler,
};

/// Two seats holding one card each: seat 0 a green 5, seat 1 a red 3, on a red 7.
fn one_card_shuffler() -> SharedShuffler {
    stacked_shuffler(stacked_deck(
        &[vec![Card::number(Color::Green, 5)], vec![Card::number(Color::Red, 3)]],
        0,
        Card::number(Color::Red, 7),
        &[],
    ))
}

fn one_card_game(target_score: u32) -> Result<Game, GameError> {
    Game::builder(["Ann", "Bob"])
        .with_target_score(target_score)
        .with_cards_per_player(1)
        .with_shared_shuffler(one_card_shuffler())
        .build()
}

#[test]
fn new_game_starts_at_zero() -> Result<(), GameError> {
    let game = Game::builder(["Ann", "Bob", "Cy"])
        .with_shuffler(IdentityShuffler)
        .build()?;
    assert_eq!(game.players(), &["Ann", "Bob", "Cy"]);
    assert_eq!(game.scores(), &[0, 0, 0]);
    assert_eq!(game.target_score(), 500);
    assert_eq!(game.dealer(), 0);
    assert_eq!(game.winner(), None);
    assert!(!game.current_hand().has_ended());
    assert_eq!(game.current_hand().player_hand(1).map(<[Card]>::len), Some(7));
    assert!(game.history().is_empty());
    Ok(())
}

#[test]
fn construction_is_validated() {
    assert_eq!(
        Game::builder(["solo"]).build().err(),
        Some(GameError::NotEnoughPlayers { players: 1 })
    );
    let crowd: Vec<String> = (0..16).map(|i| format!("p{i}")).collect();
    assert_eq!(
        Game::builder(crowd).build().err(),
        Some(GameError::TooManyPlayers {
            players: 16,
            max: 15
        })
    );
    let crowd: Vec<String> = (0..11).map(|i| format!("p{i}")).collect();
    assert!(matches!(
        Game::builder(crowd).with_cards_per_player(10).build(),
        Err(GameError::TooManyPlayers { players: 11, max: 10 })
    ));
    assert!(matches!(
        Game::builder(["a", "b"]).with_target_score(0).build(),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert_eq!(
        Game::builder(["a", "b"]).with_dealer(2).build().err(),
        Some(GameError::InvalidPlayer(2))
    );
}

#[test]
fn config_defaults_match_builder() -> Result<(), GameError> {
    let config = GameConfig::default();
    assert_eq!(config.target_score, 500);
    assert_eq!(config.cards_per_player, 7);
    let game = Game::new(["a", "b"], GameConfig { dealer: 1, ..config })?;
    assert_eq!(game.dealer(), 1);
    assert_eq!(game.current_hand().dealer(), 1);

    let game = Game::builder(["a", "b"])
        .with_config(GameConfig { dealer: 1, ..config })
        .with_shuffler(IdentityShuffler)
        .build()?;
    assert_eq!(game.current_hand().player_in_turn(), 0);
    Ok(())
}

#[test]
fn scoring_requires_an_ended_hand() -> Result<(), GameError> {
    let mut game = one_card_game(500)?;
    assert_eq!(game.update_scores(), Err(GameError::HandInProgress));
    assert_eq!(game.start_new_hand(), Err(GameError::HandInProgress));
    assert_eq!(game.scores(), &[0, 0]);
    Ok(())
}

#[test]
fn winner_collects_opponent_points_once() -> Result<(), GameError> {
    let mut game = one_card_game(500)?;
    assert_eq!(game.current_hand().player_in_turn(), 1);
    game.current_hand_mut().play(1, 0, None)?;
    assert!(game.current_hand().has_ended());
    assert_eq!(game.start_new_hand(), Err(GameError::HandNotScored));

    assert_eq!(game.update_scores()?, 5);
    assert_eq!(game.scores(), &[0, 5]);
    assert_eq!(game.update_scores(), Err(GameError::AlreadyScored));
    assert_eq!(game.scores(), &[0, 5]);
    assert_eq!(game.history(), &[HandResult { winner: 1, points: 5 }]);
    assert_eq!(game.winner(), None);
    Ok(())
}

#[test]
fn new_hand_rotates_dealer() -> Result<(), GameError> {
    let mut game = one_card_game(500)?;
    game.current_hand_mut().play(1, 0, None)?;
    game.update_scores()?;
    game.start_new_hand()?;
    assert_eq!(game.dealer(), 1);
    assert!(!game.hand_scored());
    let hand = game.current_hand();
    assert!(!hand.has_ended());
    assert_eq!(hand.dealer(), 1);
    // Dealing now starts at seat 0, which receives the red 3.
    assert_eq!(hand.player_in_turn(), 0);
    assert_eq!(hand.player_hand(0), Some(&[Card::number(Color::Red, 3)][..]));

    game.current_hand_mut().play(0, 0, None)?;
    assert_eq!(game.update_scores()?, 5);
    assert_eq!(game.scores(), &[5, 5]);
    assert_eq!(game.history().len(), 2);
    Ok(())
}

#[test]
fn reaching_target_ends_match() -> Result<(), GameError> {
    let mut game = one_card_game(5)?;
    game.current_hand_mut().play(1, 0, None)?;
    game.update_scores()?;
    assert_eq!(game.winner(), Some(1));
    assert!(game.is_finished());
    assert_eq!(game.start_new_hand(), Err(GameError::MatchOver));
    Ok(())
}

#[test]
fn game_view_redacts_other_hands() -> Result<(), GameError> {
    let game = Game::builder(["Ann", "Bob"])
        .with_shuffler(IdentityShuffler)
        .build()?;
    let view = game.view(0)?;
    assert_eq!(view.players, vec!["Ann".to_string(), "Bob".to_string()]);
    assert_eq!(view.scores, vec![0, 0]);
    assert_eq!(view.winner, None);
    assert_eq!(view.hands_played, 0);
    assert_eq!(view.hand.hand.len(), 7);
    assert_eq!(view.hand.players[1].hand_size, 7);
    assert_eq!(view.hand.draw_pile_count, 108 - 15);
    assert_eq!(game.view(2).err(), Some(GameError::InvalidPlayer(2)));
    Ok(())
}

#[test]
fn seeded_games_replay_identically() -> Result<(), GameError> {
    let a = Game::builder(["a", "b", "c"]).with_seed(99).build()?;
    let b = Game::builder(["a", "b", "c"]).with_seed(99).build()?;
    assert_eq!(a.view(0)?, b.view(0)?);
    assert_eq!(a.current_hand().draw_pile(), b.current_hand().draw_pile());
    Ok(())
}
