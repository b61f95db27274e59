mod common;

use common::{red, stacked_deck};
use unodeck::{
    Card, Color, Game, GameBuilder, GameError, GameEvent, HeuristicPolicy, Phase, RandomPolicy,
    TurnAction,
};

/// Seat 0 deals and holds a lone Red 5; seat 1 holds a Blue Skip worth 20 points.
fn one_card_finish(winning_score: u32) -> Result<Game, GameError> {
    let deck = stacked_deck(
        &[red(9), red(1), Card::skip(Color::Blue), red(5), red(7)],
        20,
    );
    let mut game = GameBuilder::new()
        .with_seed(3)
        .with_hand_size(1)
        .with_winning_score(winning_score)
        .with_source_deck(deck)
        .build()?;
    game.add_player("Ann", Box::new(HeuristicPolicy::with_wild_bias(0.0)))?;
    game.add_player("Bob", Box::new(HeuristicPolicy::with_wild_bias(0.0)))?;
    game.start_game()?;
    Ok(game)
}

#[test]
fn emptying_a_hand_scores_the_opponents_cards() -> Result<(), GameError> {
    let mut game = one_card_finish(500)?;
    let outcome = game.handle_turn(0)?;
    assert_eq!(outcome.action, TurnAction::Played(red(5)));
    let summary = outcome.round_over.expect("round ends");
    assert_eq!(summary.winner, 0);
    assert_eq!(summary.points, 20);
    assert_eq!(summary.totals, vec![20, 0]);
    assert_eq!(summary.cards_played, 1);
    assert_eq!(summary.turns, 1);
    assert_eq!(game.score(0), 20);
    assert_eq!(game.phase(), Phase::RoundOver);
    assert!(!game.is_finished());
    assert!(matches!(game.handle_turn(1), Err(GameError::InvalidPhase { .. })));
    Ok(())
}

#[test]
fn next_round_rotates_the_deal_and_uses_a_fresh_deck() -> Result<(), GameError> {
    let mut game = one_card_finish(500)?;
    game.handle_turn(0)?;
    game.start_next_round()?;
    assert_eq!(game.round(), 2);
    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.dealer(), Some(1));
    assert!(game.players()[1].is_dealer());
    assert!(!game.players()[0].is_dealer());
    assert_eq!(game.card_count(), 108);
    assert_eq!(game.score(0), 20);
    Ok(())
}

#[test]
fn reaching_the_winning_score_ends_the_game() -> Result<(), GameError> {
    let mut game = one_card_finish(20)?;
    game.take_events();
    game.handle_turn(0)?;
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winner(), Some(0));
    let events = game.take_events();
    assert!(events.contains(&GameEvent::GameWon {
        winner: 0,
        score: 20
    }));
    assert!(matches!(game.handle_turn(1), Err(GameError::GameOver)));
    assert!(matches!(game.start_next_round(), Err(GameError::GameOver)));
    Ok(())
}

#[test]
fn full_game_keeps_every_card_accounted_for() -> Result<(), GameError> {
    for seed in [1_u64, 42, 2024] {
        let mut game = GameBuilder::new().with_seed(seed).build()?;
        game.add_player("A", Box::new(HeuristicPolicy::new()))?;
        game.add_player("B", Box::new(RandomPolicy::new()))?;
        game.add_player("C", Box::new(HeuristicPolicy::with_wild_bias(0.0)))?;
        game.start_game()?;
        while !game.is_finished() {
            if game.phase() == Phase::RoundOver {
                game.start_next_round()?;
            }
            let mut turns = 0;
            while game.phase() == Phase::InProgress {
                game.handle_turn(game.current_player())?;
                assert_eq!(game.synthetic_cards(), 0, "fallback wild minted");
                assert_eq!(game.card_count(), 108);
                turns += 1;
                assert!(turns < 5_000, "round did not finish");
            }
        }
        let winner = game.winner().expect("winner");
        assert!(game.score(winner) >= 500);
        let rounds = game.ledger().rounds();
        assert_eq!(rounds.len() as u32, game.round());
        let last = rounds.last().expect("at least one round");
        assert_eq!(last.totals, game.ledger().totals());
    }
    Ok(())
}

#[test]
fn play_game_returns_the_winner() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(8).with_winning_score(200).build()?;
    for name in ["A", "B", "C", "D"] {
        game.add_player(name, Box::new(HeuristicPolicy::new()))?;
    }
    let winner = game.play_game(5_000)?;
    assert_eq!(game.winner(), Some(winner));
    assert!(game.score(winner) >= 200);
    assert!(game
        .ledger()
        .totals()
        .iter()
        .enumerate()
        .all(|(seat, total)| seat == winner || *total <= game.score(winner)));
    Ok(())
}

#[test]
fn undrained_events_do_not_outlive_their_round() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(31).build()?;
    game.add_player("A", Box::new(HeuristicPolicy::new()))?;
    game.add_player("B", Box::new(HeuristicPolicy::new()))?;
    game.play_game(5_000)?;
    let events = game.take_events();
    assert_eq!(
        events.first(),
        Some(&GameEvent::RoundStarted {
            round: game.round()
        })
    );
    let round_starts = events
        .iter()
        .filter(|event| matches!(event, GameEvent::RoundStarted { .. }))
        .count();
    assert_eq!(round_starts, 1);
    assert!(matches!(events.last(), Some(GameEvent::GameWon { .. })));
    Ok(())
}

#[test]
fn same_seed_replays_the_same_game() -> Result<(), GameError> {
    let run = |seed: u64| -> Result<(Vec<u32>, u32), GameError> {
        let mut game = GameBuilder::new().with_seed(seed).build()?;
        game.add_player("A", Box::new(HeuristicPolicy::new()))?;
        game.add_player("B", Box::new(RandomPolicy::new()))?;
        game.play_game(5_000)?;
        Ok((game.ledger().totals().to_vec(), game.round()))
    };
    assert_eq!(run(99)?, run(99)?);
    Ok(())
}

#[test]
fn state_view_hides_other_hands() -> Result<(), GameError> {
    let game = one_card_finish(500)?;
    let view = game.state_view(1)?;
    assert_eq!(view.self_player, 1);
    assert_eq!(view.hand, vec![Card::skip(Color::Blue)]);
    assert_eq!(view.players[0].hand_size, 1);
    assert!(view.players[0].is_dealer);
    assert!(view.players[0].is_current);
    assert_eq!(view.active.map(|active| active.card), Some(red(7)));
    assert_eq!(view.draw_pile_count, 22);
    assert_eq!(view.discard_pile_count, 1);
    assert!(matches!(game.state_view(5), Err(GameError::InvalidPlayer(5))));
    Ok(())
}
