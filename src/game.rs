use tracing::{debug, info};

use crate::action::{PlayerId, TurnAction, TurnOutcome};
use crate::card::{ActiveCard, Card, DECK_SIZE, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, WINNING_SCORE};
use crate::effects::{check_play, is_legal, resolve_play, resolve_seed};
use crate::error::{GameError, InvalidAction};
use crate::event::GameEvent;
use crate::player::{Hand, Player};
use crate::policy::Policy;
use crate::ring::{Direction, TurnOrder};
use crate::rng::{RandomSource, seeded};
use crate::score::{RoundSummary, ScoreLedger, round_points};
use crate::stacks::{DrawStack, SourceStack};
use crate::state::{GameSettings, GameStateView, Phase, PlayerPublicState};
use crate::table::Table;

const DEFAULT_SEED: u64 = 0x5EED_0C0D_E5EE_D0C0;

/// How the dealer is picked for each round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DealerRule {
    /// High-card draw for the first round, then the deal passes to the next seat.
    #[default]
    RotateAfterFirst,
    /// High-card draw before every round.
    HighCardEachRound,
}

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub winning_score: u32,
    pub hand_size: usize,
    pub dealer_rule: DealerRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            winning_score: WINNING_SCORE,
            hand_size: HAND_SIZE,
            dealer_rule: DealerRule::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.winning_score == 0 {
            return Err(GameError::InvalidConfiguration("winning score must be positive"));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if self.hand_size.saturating_mul(MIN_PLAYERS) >= DECK_SIZE {
            return Err(GameError::InvalidConfiguration(
                "hand size leaves no card to seed the discard stack",
            ));
        }
        Ok(())
    }
}

/// Builder that enables deterministic deck and randomness injection for tests.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
    rng: Option<Box<dyn RandomSource>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
            rng: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_winning_score(mut self, winning_score: u32) -> Self {
        self.config.winning_score = winning_score;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn with_dealer_rule(mut self, dealer_rule: DealerRule) -> Self {
        self.config.dealer_rule = dealer_rule;
        self
    }

    /// Replace the seeded default randomness.
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Use this exact card order for the first round (last card on top). The
    /// dealer draw returns its cards underneath without reshuffling so the deal
    /// stays predictable.
    pub fn with_source_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct RoundStats {
    cards_played: usize,
    turns: usize,
    deck_size: usize,
}

/// A fully dealt round that has not been committed to the table yet.
struct RoundSetup {
    deck_size: usize,
    dealer: PlayerId,
    draws: Vec<(PlayerId, Card)>,
    first: PlayerId,
    hands: Vec<Vec<Card>>,
    draw: DrawStack,
    seed: Card,
}

/// Round and game orchestrator: the single owner of all mutable game state.
pub struct Game {
    config: GameConfig,
    phase: Phase,
    round: u32,
    table: Table,
    dealer: Option<PlayerId>,
    current: PlayerId,
    ledger: ScoreLedger,
    stats: RoundStats,
    source_deck: Option<Vec<Card>>,
    winner: Option<PlayerId>,
    rng: Box<dyn RandomSource>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder::new().with_config(config).build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck, rng } = builder;
        config.validate()?;
        let rng = rng.unwrap_or_else(|| Box::new(seeded(config.seed)) as Box<dyn RandomSource>);
        Ok(Self {
            config,
            phase: Phase::Setup,
            round: 0,
            table: Table::new(),
            dealer: None,
            current: 0,
            ledger: ScoreLedger::new(0),
            stats: RoundStats::default(),
            source_deck: deck,
            winner: None,
            rng,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn dealer(&self) -> Option<PlayerId> {
        self.dealer
    }

    pub fn direction(&self) -> Direction {
        self.table.order.direction()
    }

    pub fn players(&self) -> &[Player] {
        &self.table.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.table
            .players
            .get(id)
            .ok_or(GameError::InvalidPlayer(id))
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.ledger.score(player)
    }

    pub fn active_card(&self) -> Option<ActiveCard> {
        self.table.discard.active()
    }

    pub fn draw_pile_len(&self) -> usize {
        self.table.draw.len()
    }

    pub fn discard_pile(&self) -> &[Card] {
        self.table.discard.cards()
    }

    /// Cards currently held in hands plus both live stacks.
    pub fn card_count(&self) -> usize {
        self.table.card_count()
    }

    /// Card count the current round must hold: the dealt deck plus any fallback
    /// cards minted after both stacks ran out.
    pub fn expected_card_count(&self) -> usize {
        self.stats.deck_size + self.table.synthetic_cards
    }

    pub fn synthetic_cards(&self) -> usize {
        self.table.synthetic_cards
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Drain the events recorded since the last call. Events still buffered when the
    /// next round starts are dropped, so the buffer never holds more than one round.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.table.take_events()
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            num_players: self.table.players.len(),
            hand_size: self.config.hand_size,
            winning_score: self.config.winning_score,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let me = self.player(perspective)?;
        let in_play = matches!(self.phase, Phase::InProgress);
        let players = self
            .table
            .players
            .iter()
            .map(|player| PlayerPublicState {
                id: player.id(),
                name: player.name().to_string(),
                policy: player.policy_label().to_string(),
                hand_size: player.hand().len(),
                score: self.ledger.score(player.id()),
                is_dealer: player.is_dealer(),
                is_current: in_play && player.id() == self.current,
            })
            .collect();
        Ok(GameStateView {
            settings: self.settings(),
            phase: self.phase,
            round: self.round,
            direction: self.direction(),
            self_player: perspective,
            current_player: self.current,
            dealer: self.dealer,
            active: self.active_card(),
            draw_pile_count: self.table.draw.len(),
            discard_pile_count: self.table.discard.len(),
            players,
            hand: me.hand().cards().to_vec(),
        })
    }

    /// Register a player. Only allowed before the game starts.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        policy: Box<dyn Policy>,
    ) -> Result<PlayerId, GameError> {
        self.ensure_phase(Phase::Setup)?;
        if self.table.players.len() >= MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(MAX_PLAYERS));
        }
        let id = self.table.players.len();
        self.table.players.push(Player::new(id, name.into(), policy));
        Ok(id)
    }

    /// Start the first round: dealer draw, deal and discard seeding.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.ensure_phase(Phase::Setup)?;
        let registered = self.table.players.len();
        if registered < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                registered,
            });
        }
        info!(players = registered, seed = self.config.seed, "starting game");
        self.start_round()?;
        self.ledger = ScoreLedger::new(registered);
        Ok(())
    }

    /// Begin the following round after a round ended without a game winner.
    pub fn start_next_round(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        self.ensure_phase(Phase::RoundOver)?;
        self.start_round()
    }

    /// Play one full turn for `player` using their policy.
    ///
    /// A play the rules reject falls through to drawing; a drawn card that fits is
    /// played at once.
    pub fn handle_turn(&mut self, player: PlayerId) -> Result<TurnOutcome, GameError> {
        let active = self.begin_turn(player)?;
        let choice = {
            let (hand, policy) = self.table.players[player].parts_mut();
            policy.select_card(hand, active, self.rng.as_mut())
        };

        if let Some(index) = choice {
            match self.commit_play(player, index, active) {
                Ok(card) => return self.finish_turn(player, TurnAction::Played(card)),
                Err(GameError::InvalidAction(
                    reason @ (InvalidAction::IllegalPlay { .. }
                    | InvalidAction::WildDrawFourWithMatchingColor { .. }),
                )) => {
                    let card = self.table.players[player]
                        .hand()
                        .get(index)
                        .ok_or(InvalidAction::HandIndex(index))?;
                    debug!(player, %card, %reason, "play rejected");
                    self.table.emit(GameEvent::PlayRejected {
                        player,
                        card,
                        reason: reason.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let drawn = self.table.deal_from_draw(player, 1, self.rng.as_mut());
        let card = drawn[0];
        let hand = self.table.players[player].hand();
        if is_legal(hand, card, active) {
            let index = hand.len() - 1;
            self.commit_play(player, index, active)?;
            self.finish_turn(player, TurnAction::DrewAndPlayed(card))
        } else {
            self.current = self.table.order.next(player);
            self.finish_turn(player, TurnAction::Drew(card))
        }
    }

    /// Play the card at `hand_index` for `player` as their whole turn.
    ///
    /// Illegal plays are rejected without touching any state, so the caller can
    /// pick again or fall back to [`Game::handle_turn`].
    pub fn play_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
    ) -> Result<TurnOutcome, GameError> {
        self.ensure_turn(player)?;
        let active = self.active()?;
        {
            let hand = self.table.players[player].hand();
            let card = hand
                .get(hand_index)
                .ok_or(InvalidAction::HandIndex(hand_index))?;
            check_play(hand, card, active)?;
        }
        self.begin_turn(player)?;
        let card = self.commit_play(player, hand_index, active)?;
        self.finish_turn(player, TurnAction::Played(card))
    }

    /// Score the round once a player has emptied their hand and decide whether
    /// the game is over.
    pub fn end_round(&mut self) -> Result<RoundSummary, GameError> {
        self.ensure_phase(Phase::InProgress)?;
        let winner = self
            .table
            .players
            .iter()
            .position(|player| player.hand().is_empty())
            .ok_or(GameError::RoundNotFinished)?;
        self.phase = Phase::RoundOver;

        let points = round_points(&self.table.players, winner);
        let summary = self.ledger.record_round(
            self.round,
            winner,
            points,
            self.stats.cards_played,
            self.stats.turns,
        );
        info!(
            round = self.round,
            winner,
            points,
            total = self.ledger.score(winner),
            "round won"
        );
        self.table.emit(GameEvent::RoundWon {
            round: summary.round,
            winner,
            points,
            totals: summary.totals.clone(),
            cards_played: summary.cards_played,
            turns: summary.turns,
        });

        if let Some(champion) = self.ledger.winner_at(self.config.winning_score) {
            let score = self.ledger.score(champion);
            self.phase = Phase::GameOver;
            self.winner = Some(champion);
            info!(winner = champion, score, rounds = self.round, "game won");
            self.table.emit(GameEvent::GameWon {
                winner: champion,
                score,
            });
        }
        Ok(summary)
    }

    /// Drive the current round to completion.
    pub fn play_round(&mut self, max_turns: usize) -> Result<RoundSummary, GameError> {
        for _ in 0..max_turns {
            let outcome = self.handle_turn(self.current)?;
            if let Some(summary) = outcome.round_over {
                return Ok(summary);
            }
        }
        Err(GameError::TurnLimitExceeded(max_turns))
    }

    /// Start (if needed) and play rounds until someone reaches the winning score.
    pub fn play_game(&mut self, max_turns_per_round: usize) -> Result<PlayerId, GameError> {
        if self.phase == Phase::Setup {
            self.start_game()?;
        }
        loop {
            match self.phase {
                Phase::InProgress => {
                    self.play_round(max_turns_per_round)?;
                }
                Phase::RoundOver => self.start_next_round()?,
                Phase::GameOver => return self.winner.ok_or(GameError::GameOver),
                Phase::Setup => {
                    return Err(GameError::InvalidPhase {
                        expected: Phase::InProgress,
                        actual: Phase::Setup,
                    });
                }
            }
        }
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if self.phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        self.ensure_phase(Phase::InProgress)?;
        if player >= self.table.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }

    fn active(&self) -> Result<ActiveCard, GameError> {
        self.table
            .discard
            .active()
            .ok_or(GameError::InvalidConfiguration("discard stack has no active card"))
    }

    fn begin_turn(&mut self, player: PlayerId) -> Result<ActiveCard, GameError> {
        self.ensure_turn(player)?;
        let active = self.active()?;
        debug!(round = self.round, player, %active, "turn started");
        self.table.emit(GameEvent::TurnStarted { player, active });
        Ok(active)
    }

    /// Validate, move the card from hand to discard and resolve its effect.
    fn commit_play(
        &mut self,
        player: PlayerId,
        index: usize,
        active: ActiveCard,
    ) -> Result<Card, GameError> {
        let hand = self.table.players[player].hand();
        let card = hand.get(index).ok_or(InvalidAction::HandIndex(index))?;
        check_play(hand, card, active)?;
        self.table.players[player].hand_mut().remove(index)?;
        self.table.discard.push(card);
        self.stats.cards_played += 1;
        debug!(player, %card, "card played");
        self.table.emit(GameEvent::CardPlayed { player, card });
        self.current = resolve_play(&mut self.table, player, card, self.rng.as_mut());
        Ok(card)
    }

    fn finish_turn(
        &mut self,
        player: PlayerId,
        action: TurnAction,
    ) -> Result<TurnOutcome, GameError> {
        self.stats.turns += 1;
        let round_over = if self.table.players[player].hand().is_empty() {
            Some(self.end_round()?)
        } else {
            None
        };
        Ok(TurnOutcome {
            player,
            action,
            round_over,
        })
    }

    /// Set up a round. Everything that can fail runs on local state first, so an
    /// error leaves the game exactly as it was.
    fn start_round(&mut self) -> Result<(), GameError> {
        let setup = self.prepare_round()?;
        let RoundSetup {
            deck_size,
            dealer,
            draws,
            first,
            hands,
            draw,
            seed,
        } = setup;

        self.source_deck = None;
        self.table.reset();
        self.round += 1;
        self.phase = Phase::InProgress;
        self.stats = RoundStats {
            deck_size,
            ..RoundStats::default()
        };
        info!(round = self.round, "round started");
        self.table.emit(GameEvent::RoundStarted { round: self.round });

        self.dealer = Some(dealer);
        self.table.players[dealer].set_dealer(true);
        info!(round = self.round, dealer, "dealer selected");
        self.table.emit(GameEvent::DealerSelected { dealer, draws });

        for (player, cards) in self.table.players.iter_mut().zip(hands) {
            *player.hand_mut() = Hand::from_cards(cards);
        }
        self.table.emit(GameEvent::CardsDealt {
            first,
            per_player: self.config.hand_size,
        });

        self.table.draw = draw;
        self.table.discard.push(seed);
        debug!(card = %seed, "discard stack seeded");
        self.table.emit(GameEvent::DiscardSeeded { card: seed });
        self.current = resolve_seed(&mut self.table, dealer, seed, self.rng.as_mut());
        Ok(())
    }

    /// Pick the dealer, deal and draw the discard seed without touching the table.
    fn prepare_round(&mut self) -> Result<RoundSetup, GameError> {
        let seats = self.table.players.len();
        let (mut source, arranged) = match &self.source_deck {
            Some(deck) => (SourceStack::from_cards(deck.clone()), true),
            None => (SourceStack::assemble(self.rng.as_mut()), false),
        };
        let deck_size = source.len();
        if self.config.hand_size.saturating_mul(seats) >= deck_size {
            return Err(GameError::InvalidConfiguration(
                "hand size leaves no card to seed the discard stack",
            ));
        }

        // Direction always starts clockwise for a new round.
        let order = TurnOrder::new(seats);
        let (dealer, draws) = match (self.config.dealer_rule, self.dealer) {
            (DealerRule::RotateAfterFirst, Some(previous)) => (order.next(previous), Vec::new()),
            _ => self.draw_for_dealer(&mut source, arranged)?,
        };

        let first = order.next(dealer);
        let mut hands = vec![Vec::with_capacity(self.config.hand_size); seats];
        for _ in 0..self.config.hand_size {
            for offset in 0..seats {
                let card = source.deal().ok_or(GameError::InvalidConfiguration(
                    "source deck exhausted while dealing",
                ))?;
                hands[order.step(first, offset)].push(card);
            }
        }

        let mut draw = source.into_draw_stack();
        let seed = draw
            .draw_seed(self.rng.as_mut())
            .ok_or(GameError::InvalidConfiguration(
                "no card can seed the discard stack",
            ))?;
        Ok(RoundSetup {
            deck_size,
            dealer,
            draws,
            first,
            hands,
            draw,
            seed,
        })
    }

    /// Every player draws one card; the first to show the highest value deals.
    fn draw_for_dealer(
        &mut self,
        source: &mut SourceStack,
        arranged: bool,
    ) -> Result<(PlayerId, Vec<(PlayerId, Card)>), GameError> {
        let seats = self.table.players.len();
        let mut draws = Vec::with_capacity(seats);
        for player in 0..seats {
            let card = source.deal().ok_or(GameError::InvalidConfiguration(
                "source deck exhausted during dealer draw",
            ))?;
            draws.push((player, card));
        }

        let mut dealer = 0;
        let mut best = 0;
        for &(player, card) in &draws {
            if player == 0 || card.points() > best {
                dealer = player;
                best = card.points();
            }
        }

        for &(_, card) in &draws {
            source.return_card(card);
        }
        if !arranged {
            source.shuffle(self.rng.as_mut());
        }
        Ok((dealer, draws))
    }
}

