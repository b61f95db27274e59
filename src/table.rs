use tracing::{debug, warn};

use crate::action::PlayerId;
use crate::card::Card;
use crate::event::GameEvent;
use crate::player::Player;
use crate::ring::TurnOrder;
use crate::rng::RandomSource;
use crate::stacks::{DiscardStack, DrawStack};

/// Everything mutated while a round is being played.
pub(crate) struct Table {
    pub(crate) players: Vec<Player>,
    pub(crate) order: TurnOrder,
    pub(crate) draw: DrawStack,
    pub(crate) discard: DiscardStack,
    pub(crate) synthetic_cards: usize,
    events: Vec<GameEvent>,
}

impl Table {
    pub(crate) fn new() -> Self {
        Self {
            players: Vec::new(),
            order: TurnOrder::new(1),
            draw: DrawStack::default(),
            discard: DiscardStack::default(),
            synthetic_cards: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draw one card, refilling from the discard stack when the draw stack runs dry.
    /// Mints a fallback Wild only when both stacks are exhausted.
    pub(crate) fn draw_card(&mut self, rng: &mut dyn RandomSource) -> Card {
        if let Some(card) = self.draw.draw() {
            return card;
        }
        let moved = self.discard.replenish(&mut self.draw, rng);
        if moved > 0 {
            debug!(cards = moved, "draw stack replenished from discard");
            self.emit(GameEvent::DrawStackReplenished { cards: moved });
        }
        if let Some(card) = self.draw.draw() {
            return card;
        }
        warn!(
            hands = self.cards_in_hands(),
            "draw and discard stacks exhausted; minting a fallback wild card"
        );
        self.synthetic_cards += 1;
        self.emit(GameEvent::SyntheticCardMinted);
        Card::wild()
    }

    /// Move `count` cards from the draw stack into a player's hand.
    pub(crate) fn deal_from_draw(
        &mut self,
        player: PlayerId,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let card = self.draw_card(rng);
            self.players[player].hand_mut().add(card);
            debug!(player, %card, "card drawn");
            self.emit(GameEvent::CardDrawn { player, card });
            drawn.push(card);
        }
        drawn
    }

    pub(crate) fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|player| player.hand().len()).sum()
    }

    /// Hands plus draw and discard stacks.
    pub(crate) fn card_count(&self) -> usize {
        self.cards_in_hands() + self.draw.len() + self.discard.len()
    }

    /// Clear hands, stacks and undrained events ahead of a new round.
    pub(crate) fn reset(&mut self) {
        for player in &mut self.players {
            player.hand_mut().take_all();
            player.set_dealer(false);
        }
        self.draw = DrawStack::default();
        self.discard.clear();
        self.order = TurnOrder::new(self.players.len().max(1));
        self.synthetic_cards = 0;
        self.events.clear();
    }
}
