use std::fmt::Write;

use crate::event::{AppliedEffect, GameEvent};
use crate::ring::Direction;
use crate::state::{GameStateView, Phase};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_scores: bool,
    pub show_hand_indices: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_scores: true,
            show_hand_indices: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let phase = match state.phase {
        Phase::Setup => "Setup",
        Phase::InProgress => "In progress",
        Phase::RoundOver => "Round over",
        Phase::GameOver => "Game over",
    };
    let _ = writeln!(out, "Round {} - {phase}", state.round);
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(out, "Direction: {direction}");
    let active = state
        .active
        .map(|active| active.to_string())
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Active card: {active}  |  Draw pile: {}  |  Discard pile: {}",
        state.draw_pile_count, state.discard_pile_count
    );
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let dealer_tag = if player.is_dealer { " [dealer]" } else { "" };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let score = if options.show_scores {
            format!(" - score {}", player.score)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {}{}{} ({}){score}{}",
            player.name, label_you, dealer_tag, player.policy, current_tag
        );
        if player.id == state.self_player {
            if state.hand.is_empty() {
                let _ = writeln!(out, "    Hand: (empty)");
            } else {
                let entries: Vec<String> = state
                    .hand
                    .iter()
                    .enumerate()
                    .map(|(idx, card)| {
                        if options.show_hand_indices {
                            format!("{idx}:{card}")
                        } else {
                            card.to_string()
                        }
                    })
                    .collect();
                let _ = writeln!(out, "    Hand: {}", entries.join("  "));
            }
        } else {
            let _ = writeln!(out, "    Hand size: {}", player.hand_size);
        }
    }
    out
}

/// One-line description of an event; `names` maps seats to display names.
pub fn describe_event(event: &GameEvent, names: &[String]) -> String {
    let name = |player: usize| {
        names
            .get(player)
            .cloned()
            .unwrap_or_else(|| format!("Player {player}"))
    };
    match event {
        GameEvent::RoundStarted { round } => format!("=== Round {round} ==="),
        GameEvent::DealerSelected { dealer, draws } => {
            if draws.is_empty() {
                format!("{} deals this round", name(*dealer))
            } else {
                let shown: Vec<String> = draws
                    .iter()
                    .map(|(player, card)| format!("{} drew {card}", name(*player)))
                    .collect();
                format!("{}; {} deals and starts", shown.join(", "), name(*dealer))
            }
        }
        GameEvent::CardsDealt { first, per_player } => {
            format!("{per_player} cards dealt to each player, starting with {}", name(*first))
        }
        GameEvent::DiscardSeeded { card } => format!("Starting card: {card}"),
        GameEvent::TurnStarted { player, active } => {
            format!("{}'s turn on {active}", name(*player))
        }
        GameEvent::CardPlayed { player, card } => format!("{} plays {card}", name(*player)),
        GameEvent::CardDrawn { player, card } => format!("{} draws {card}", name(*player)),
        GameEvent::EffectApplied { source, effect } => match effect {
            AppliedEffect::Skipped { player } => {
                format!("{source}: {} is skipped", name(*player))
            }
            AppliedEffect::Reversed { direction } => {
                format!("{source}: direction is now {direction:?}")
            }
            AppliedEffect::ForcedDraw { player, count } => {
                format!("{source}: {} draws {count}", name(*player))
            }
            AppliedEffect::ColorChosen { color } => format!("{source}: color changes to {color}"),
        },
        GameEvent::PlayRejected {
            player,
            card,
            reason,
        } => format!("{} cannot play {card}: {reason}", name(*player)),
        GameEvent::DrawStackReplenished { cards } => {
            format!("Draw pile empty; {cards} discards shuffled back in")
        }
        GameEvent::SyntheticCardMinted => {
            String::from("Both piles exhausted; a spare Wild was put into play")
        }
        GameEvent::RoundWon {
            round,
            winner,
            points,
            totals,
            ..
        } => format!(
            "{} wins round {round} for {points} points (total {})",
            name(*winner),
            totals.get(*winner).copied().unwrap_or(0)
        ),
        GameEvent::GameWon { winner, score } => {
            format!("{} wins the game with {score} points", name(*winner))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Color};
    use crate::game::GameBuilder;
    use crate::policies::HeuristicPolicy;

    #[test]
    fn render_includes_expected_phrases() {
        let mut game = GameBuilder::new().with_seed(4).build().expect("game");
        game.add_player("Ann", Box::new(HeuristicPolicy::new()))
            .expect("add");
        game.add_player("Bob", Box::new(HeuristicPolicy::new()))
            .expect("add");
        game.start_game().expect("start");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Ann (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Hand size: 7"));
        assert!(text.contains("Round 1 - In progress"));
    }

    #[test]
    fn describes_effects_with_names() {
        let names = vec![String::from("Ann"), String::from("Bob")];
        let event = GameEvent::EffectApplied {
            source: Card::draw_two(Color::Red),
            effect: AppliedEffect::ForcedDraw {
                player: 1,
                count: 2,
            },
        };
        assert_eq!(describe_event(&event, &names), "Red Draw Two: Bob draws 2");
    }
}
