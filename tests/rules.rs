mod common;

use common::{blue, green, red, scripted_game};
use unodeck::{
    AppliedEffect, Card, Color, DealerRule, Game, GameBuilder, GameError, GameEvent, HeuristicPolicy, Phase,
    RandomPolicy,
};

fn seated_game(seed: u64, players: usize) -> Result<Game, GameError> {
    let mut game = GameBuilder::new().with_seed(seed).build()?;
    for seat in 0..players {
        game.add_player(format!("P{seat}"), Box::new(HeuristicPolicy::new()))?;
    }
    Ok(game)
}

#[test]
fn start_requires_two_players() -> Result<(), GameError> {
    let mut game = seated_game(1, 1)?;
    assert!(matches!(
        game.start_game(),
        Err(GameError::NotEnoughPlayers {
            required: 2,
            registered: 1
        })
    ));
    assert_eq!(game.phase(), Phase::Setup);
    Ok(())
}

#[test]
fn table_seats_at_most_four() -> Result<(), GameError> {
    let mut game = seated_game(1, 4)?;
    assert!(matches!(
        game.add_player("Extra", Box::new(RandomPolicy::new())),
        Err(GameError::TooManyPlayers(4))
    ));
    Ok(())
}

#[test]
fn zero_hand_size_is_rejected() {
    let built = GameBuilder::new().with_hand_size(0).build();
    assert!(matches!(built, Err(GameError::InvalidConfiguration(_))));
}

#[test]
fn players_cannot_join_after_start() -> Result<(), GameError> {
    let mut game = seated_game(3, 2)?;
    game.start_game()?;
    assert!(matches!(
        game.add_player("Late", Box::new(HeuristicPolicy::new())),
        Err(GameError::InvalidPhase {
            expected: Phase::Setup,
            actual: Phase::InProgress
        })
    ));
    assert!(matches!(game.start_game(), Err(GameError::InvalidPhase { .. })));
    Ok(())
}

#[test]
fn turns_require_a_running_round() -> Result<(), GameError> {
    let mut game = seated_game(5, 3)?;
    assert!(matches!(
        game.handle_turn(0),
        Err(GameError::InvalidPhase {
            expected: Phase::InProgress,
            actual: Phase::Setup
        })
    ));
    assert!(matches!(game.start_next_round(), Err(GameError::InvalidPhase { .. })));
    Ok(())
}

#[test]
fn only_the_current_player_may_act() -> Result<(), GameError> {
    let mut game = seated_game(9, 3)?;
    game.start_game()?;
    let current = game.current_player();
    let other = (current + 1) % 3;
    assert!(matches!(game.handle_turn(other), Err(GameError::NotPlayersTurn)));
    assert!(matches!(game.play_card(other, 0), Err(GameError::NotPlayersTurn)));
    assert!(matches!(game.handle_turn(7), Err(GameError::InvalidPlayer(7))));
    Ok(())
}

#[test]
fn round_cannot_end_while_hands_hold_cards() -> Result<(), GameError> {
    let mut game = seated_game(11, 2)?;
    game.start_game()?;
    assert!(matches!(game.end_round(), Err(GameError::RoundNotFinished)));
    assert_eq!(game.phase(), Phase::InProgress);
    Ok(())
}

#[test]
fn dealing_gives_every_player_seven_cards() -> Result<(), GameError> {
    for players in 2..=4 {
        let mut game = seated_game(21 + players as u64, players)?;
        game.start_game()?;
        let events = game.take_events();
        let dealer = game.dealer().expect("dealer chosen");
        let forced = events.iter().any(|event| {
            matches!(
                event,
                GameEvent::EffectApplied {
                    effect: AppliedEffect::ForcedDraw { .. },
                    ..
                }
            )
        });
        for player in game.players() {
            if forced && player.id() == dealer {
                continue;
            }
            assert_eq!(player.hand().len(), 7, "player {}", player.id());
        }
        assert_eq!(game.card_count(), 108);
        assert_eq!(game.expected_card_count(), 108);
        assert_eq!(game.discard_pile().len(), 1);
        assert_ne!(
            game.active_card().map(|active| active.card),
            Some(Card::wild_draw_four())
        );
    }
    Ok(())
}

#[test]
fn highest_draw_deals_and_starts() -> Result<(), GameError> {
    let game = scripted_game(
        3,
        1,
        &[red(1), blue(9), green(4), blue(1), blue(2), blue(3), red(7)],
    );
    assert_eq!(game.dealer(), Some(1));
    assert!(game.players()[1].is_dealer());
    assert!(!game.players()[0].is_dealer());
    assert_eq!(game.current_player(), 1);

    // A Wild outranks every colored card in the draw.
    let game = scripted_game(
        2,
        1,
        &[Card::skip(Color::Red), Card::wild(), blue(1), blue(2), red(7)],
    );
    assert_eq!(game.dealer(), Some(1));
    Ok(())
}

#[test]
fn dealer_draw_ties_go_to_the_first_seat_drawn() {
    let game = scripted_game(
        3,
        1,
        &[red(1), blue(9), green(9), blue(1), blue(2), blue(3), red(7)],
    );
    assert_eq!(game.dealer(), Some(1));
}

#[test]
fn deal_starts_left_of_the_dealer() {
    // Seat 1 deals, so seat 2 receives the first card.
    let mut game = scripted_game(
        3,
        2,
        &[
            red(1),
            blue(9),
            green(2),
            blue(1),
            blue(2),
            blue(3),
            green(1),
            green(2),
            green(3),
            red(7),
        ],
    );
    assert_eq!(game.players()[2].hand().cards(), &[blue(1), green(1)]);
    assert_eq!(game.players()[0].hand().cards(), &[blue(2), green(2)]);
    assert_eq!(game.players()[1].hand().cards(), &[blue(3), green(3)]);
    let events = game.take_events();
    assert!(events.contains(&GameEvent::CardsDealt {
        first: 2,
        per_player: 2
    }));
    assert!(events.contains(&GameEvent::DiscardSeeded { card: red(7) }));
}

#[test]
fn dealer_draw_cards_return_to_the_bottom() {
    let game = scripted_game(2, 1, &[red(9), red(1), blue(1), blue(2), red(7)]);
    // 20 filler cards plus the two dealer draw cards remain to be drawn.
    assert_eq!(game.draw_pile_len(), 22);
    assert_eq!(game.card_count(), 25);
}

#[test]
fn dealer_is_redrawn_each_round_when_configured() -> Result<(), GameError> {
    let mut game = GameBuilder::new()
        .with_seed(77)
        .with_winning_score(10_000)
        .with_dealer_rule(DealerRule::HighCardEachRound)
        .build()?;
    for seat in 0..3 {
        game.add_player(format!("P{seat}"), Box::new(HeuristicPolicy::new()))?;
    }
    game.start_game()?;
    game.play_round(5_000)?;
    game.take_events();
    game.start_next_round()?;
    let draws = game.take_events().into_iter().find_map(|event| match event {
        GameEvent::DealerSelected { draws, .. } => Some(draws),
        _ => None,
    });
    assert_eq!(draws.map(|draws| draws.len()), Some(3));
    Ok(())
}

#[test]
fn failed_start_leaves_the_game_in_setup() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(2).with_hand_size(30).build()?;
    for seat in 0..4 {
        game.add_player(format!("P{seat}"), Box::new(HeuristicPolicy::new()))?;
    }
    for _ in 0..2 {
        assert!(matches!(
            game.start_game(),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert_eq!(game.phase(), Phase::Setup);
        assert_eq!(game.round(), 0);
        assert_eq!(game.dealer(), None);
        assert!(game.players().iter().all(|player| player.hand().is_empty()));
        assert!(game.players().iter().all(|player| !player.is_dealer()));
        assert_eq!(game.card_count(), 0);
        assert!(game.take_events().is_empty());
    }
    assert!(matches!(
        game.handle_turn(0),
        Err(GameError::InvalidPhase {
            expected: Phase::InProgress,
            actual: Phase::Setup
        })
    ));
    Ok(())
}

#[test]
fn unseedable_deck_is_rejected_before_dealing() {
    // The dealer draw uses the two Wild Draw Fours, which then are all that is left to seed.
    let deck = common::stacked_deck(
        &[
            Card::wild_draw_four(),
            Card::wild_draw_four(),
            blue(1),
            blue(2),
        ],
        0,
    );
    let mut game = GameBuilder::new()
        .with_hand_size(1)
        .with_source_deck(deck)
        .build()
        .expect("valid config");
    game.add_player("A", Box::new(HeuristicPolicy::new()))
        .expect("seat available");
    game.add_player("B", Box::new(HeuristicPolicy::new()))
        .expect("seat available");
    assert!(matches!(
        game.start_game(),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert_eq!(game.phase(), Phase::Setup);
    assert!(game.players().iter().all(|player| player.hand().is_empty()));
}

#[test]
fn hand_size_must_leave_a_card_for_the_discard() {
    let built = GameBuilder::new().with_hand_size(54).build();
    assert!(matches!(built, Err(GameError::InvalidConfiguration(_))));
    assert!(GameBuilder::new().with_hand_size(53).build().is_ok());
}
