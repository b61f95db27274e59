//! Card legality and effect resolution.

use tracing::debug;

use crate::action::PlayerId;
use crate::card::{ActiveCard, Card, Color, Kind};
use crate::error::InvalidAction;
use crate::event::{AppliedEffect, GameEvent};
use crate::player::Hand;
use crate::rng::RandomSource;
use crate::table::Table;

/// State transition implied by a card kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    None,
    Skip,
    Reverse,
    /// The victim draws this many cards and loses their turn.
    DrawAndSkip(usize),
    /// The player picks the active color; a non-zero draw also penalizes the victim.
    ChooseColor { draw: usize },
}

pub fn effect_of(kind: Kind) -> Effect {
    match kind {
        Kind::Number(_) => Effect::None,
        Kind::Skip => Effect::Skip,
        Kind::Reverse => Effect::Reverse,
        Kind::DrawTwo => Effect::DrawAndSkip(2),
        Kind::Wild => Effect::ChooseColor { draw: 0 },
        Kind::WildDrawFour => Effect::ChooseColor { draw: 4 },
    }
}

/// Whether `card`, held in `hand`, may be played on `active`.
///
/// Plain cards must match color or kind. Wild is always allowed. Wild Draw Four is
/// only allowed while the hand holds no card of the active color.
pub fn check_play(hand: &Hand, card: Card, active: ActiveCard) -> Result<(), InvalidAction> {
    match card.kind() {
        Kind::Wild => Ok(()),
        Kind::WildDrawFour => {
            if hand.has_color(active.color) {
                Err(InvalidAction::WildDrawFourWithMatchingColor {
                    color: active.color,
                })
            } else {
                Ok(())
            }
        }
        _ if card.matches(active) => Ok(()),
        _ => Err(InvalidAction::IllegalPlay { card, active }),
    }
}

pub fn is_legal(hand: &Hand, card: Card, active: ActiveCard) -> bool {
    check_play(hand, card, active).is_ok()
}

/// Hand indices of every card that may currently be played.
pub fn legal_plays(hand: &Hand, active: ActiveCard) -> Vec<usize> {
    hand.cards()
        .iter()
        .enumerate()
        .filter(|(_, card)| is_legal(hand, **card, active))
        .map(|(index, _)| index)
        .collect()
}

/// Most frequent color in `hand`; ties and colorless hands are settled at random.
pub fn choose_color(hand: &Hand, rng: &mut dyn RandomSource) -> Color {
    let mut counts = [0usize; 4];
    for color in hand.cards().iter().filter_map(Card::color) {
        counts[color.index()] += 1;
    }
    let best = counts.iter().copied().max().unwrap_or(0);
    let tied: Vec<Color> = if best == 0 {
        Color::ALL.to_vec()
    } else {
        Color::ALL
            .into_iter()
            .filter(|color| counts[color.index()] == best)
            .collect()
    };
    if tied.len() == 1 {
        tied[0]
    } else {
        tied[rng.uniform_choice(tied.len())]
    }
}

/// Apply the effect of `card`, just played by `player`. Returns who acts next.
pub(crate) fn resolve_play(
    table: &mut Table,
    player: PlayerId,
    card: Card,
    rng: &mut dyn RandomSource,
) -> PlayerId {
    let order = table.order;
    match effect_of(card.kind()) {
        Effect::None => order.next(player),
        Effect::Skip => {
            skip(table, card, order.next(player));
            order.step(player, 2)
        }
        Effect::Reverse => {
            let passed_over = table.order.reverse(player);
            let direction = table.order.direction();
            table.emit(GameEvent::EffectApplied {
                source: card,
                effect: AppliedEffect::Reversed { direction },
            });
            if passed_over {
                let upcoming = table.order.next(player);
                skip(table, card, upcoming);
                table.order.step(player, 2)
            } else {
                table.order.next(player)
            }
        }
        Effect::DrawAndSkip(count) => {
            penalize(table, card, order.next(player), count, rng);
            order.step(player, 2)
        }
        Effect::ChooseColor { draw } => {
            pick_color(table, card, player, rng);
            if draw > 0 {
                penalize(table, card, order.next(player), draw, rng);
                order.step(player, 2)
            } else {
                order.next(player)
            }
        }
    }
}

/// Apply the effect of the card that seeded the discard stack. The starting
/// player is the one affected. Returns who takes the first turn.
pub(crate) fn resolve_seed(
    table: &mut Table,
    starter: PlayerId,
    card: Card,
    rng: &mut dyn RandomSource,
) -> PlayerId {
    match effect_of(card.kind()) {
        Effect::None => starter,
        Effect::Skip => {
            skip(table, card, starter);
            table.order.next(starter)
        }
        Effect::Reverse => {
            table.order.reverse(starter);
            let direction = table.order.direction();
            table.emit(GameEvent::EffectApplied {
                source: card,
                effect: AppliedEffect::Reversed { direction },
            });
            starter
        }
        Effect::DrawAndSkip(count) => {
            penalize(table, card, starter, count, rng);
            table.order.next(starter)
        }
        Effect::ChooseColor { draw } => {
            pick_color(table, card, starter, rng);
            if draw > 0 {
                penalize(table, card, starter, draw, rng);
                table.order.next(starter)
            } else {
                starter
            }
        }
    }
}

fn skip(table: &mut Table, source: Card, player: PlayerId) {
    debug!(player, "turn skipped");
    table.emit(GameEvent::EffectApplied {
        source,
        effect: AppliedEffect::Skipped { player },
    });
}

fn penalize(
    table: &mut Table,
    source: Card,
    victim: PlayerId,
    count: usize,
    rng: &mut dyn RandomSource,
) {
    table.deal_from_draw(victim, count, rng);
    table.emit(GameEvent::EffectApplied {
        source,
        effect: AppliedEffect::ForcedDraw {
            player: victim,
            count,
        },
    });
    skip(table, source, victim);
}

fn pick_color(table: &mut Table, source: Card, chooser: PlayerId, rng: &mut dyn RandomSource) {
    let color = choose_color(table.players[chooser].hand(), rng);
    table.discard.set_active_color(color);
    debug!(player = chooser, %color, "active color chosen");
    table.emit(GameEvent::EffectApplied {
        source,
        effect: AppliedEffect::ColorChosen { color },
    });
}
