//! Transaction engine: the turn state machine.
//!
//! `Game` owns the board, the players and the fixed turn order. Each
//! operation runs every check against the board (what is on display) and the
//! current player (what they own) before it mutates anything, so a rejected
//! operation leaves the game exactly as it was.
//!
//! ## Turn structure
//!
//! - The current player may trade or produce once per turn.
//! - Building activations are separate: each owned building can be
//!   activated once per turn, regardless of the turn action.
//! - `end_turn` rotates to the next player, refills the board and checks
//!   whether the new current player has reached the winning score. Once a
//!   winner is set every operation fails with `GameOver`.
//!
//! ## Example
//!
//! ```
//! use market_engine::cards::CardIdentity;
//! use market_engine::core::GameConfig;
//! use market_engine::rules::Game;
//! use market_engine::sample::sample_factory;
//!
//! let factory = sample_factory();
//! let mut game = Game::new(&factory, ["Ada", "Bo"], GameConfig::default(), 42).unwrap();
//!
//! // The first player in turn order starts with 3 coins.
//! let timber = CardIdentity::basic(1);
//! game.trade_by_coins(&[timber, timber, timber]).unwrap();
//! assert_eq!(game.current().coin(), 0);
//! assert_eq!(game.current().hand_size(), 3);
//!
//! game.end_turn().unwrap();
//! assert_eq!(game.current().coin(), 4);
//! ```

use im::Vector;
use tracing::{debug, info};

use crate::cards::{BuildingCard, Card, CardIdentity, DeckFactory, IdentityBounds};
use crate::core::action::{Action, ActionRecord, Identities};
use crate::core::config::GameConfig;
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::GameSnapshot;
use crate::error::{GameError, OwnedKind, Result, SetupError};
use crate::market::{CardBundle, GameBoard};
use crate::players::Player;

/// Checked but uncommitted exchange: cards to gain, hand cards to spend.
struct Exchange {
    gained: CardBundle,
    spent: Vec<EntityId>,
}

/// One game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    bounds: IdentityBounds,
    board: GameBoard,
    players: PlayerMap<Player>,
    turn_order: Vec<PlayerId>,
    current: usize,
    turn_number: u32,
    sequence: u32,
    winner: Option<PlayerId>,
    history: Vector<ActionRecord>,
    rng: GameRng,
}

impl Game {
    /// Start a game.
    ///
    /// Players get ids in join order. The turn order is shuffled once and
    /// never changes; coins are handed out along it, starting at
    /// `config.starting_coin` and rising by one per seat.
    pub fn new<I, S>(
        factory: &DeckFactory,
        player_names: I,
        config: GameConfig,
        seed: u64,
    ) -> std::result::Result<Self, SetupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = player_names.into_iter().map(Into::into).collect();
        let player_count = names.len();
        GameConfig::check_player_count(player_count)?;
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut turn_order: Vec<PlayerId> = PlayerId::all(player_count).collect();
        rng.for_context("seating").shuffle(&mut turn_order);

        let deck = factory.build_deck(player_count, &mut EntityAllocator::new(), &mut rng)?;
        let board = GameBoard::new(deck, player_count, &config, &mut rng)?;

        let mut players = PlayerMap::new(player_count, |id| Player::new(id, names[id.index()].clone(), 0));
        for (seat, id) in turn_order.iter().enumerate() {
            players[*id].receive_coin(config.starting_coin + seat as u32);
        }

        debug!(players = player_count, seed, ?turn_order, "game created");

        Ok(Self {
            config,
            bounds: factory.catalog().bounds(),
            board,
            players,
            turn_order,
            current: 0,
            turn_number: 1,
            sequence: 0,
            winner: None,
            history: Vector::new(),
            rng,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.current]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player()]
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn players_in_turn_order(&self) -> impl Iterator<Item = &Player> + '_ {
        self.turn_order.iter().map(move |id| &self.players[*id])
    }

    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Every successful operation, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Starts at 1 and increases with every `end_turn`.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.state(),
            players: self.players_in_turn_order().map(Player::view).collect(),
            turn_order: self.turn_order.clone(),
            current_player: self.current_player(),
            turn_number: self.turn_number,
            winner: self.winner,
        }
    }

    // === Operations ===

    /// Dispatch an action to its operation.
    pub fn apply(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::TradeByCoins { targets } => self.trade_by_coins(targets),
            Action::TradeByCards { payment, targets } => self.trade_by_cards(payment, targets),
            Action::ProduceBySpentCost { cost, product } => self.produce_by_spent_cost(cost, *product),
            Action::ProduceByOwningCapital { capital, product } => {
                self.produce_by_owning_capital(capital, *product)
            }
            Action::ActivateForPoints { building, cost } => {
                self.activate_building_for_points(*building, cost)
            }
            Action::ActivateToProduceBySpentCost { building, cost } => {
                self.activate_building_to_produce_by_spent_cost(*building, cost)
            }
            Action::ActivateToProduceByOwningCapital { building, capital } => {
                self.activate_building_to_produce_by_owning_capital(*building, capital)
            }
            Action::EndTurn => self.end_turn(),
        }
    }

    /// Buy displayed cards with coin. Spending empties the purse.
    pub fn trade_by_coins(&mut self, targets: &[CardIdentity]) -> Result<()> {
        self.ensure_can_act()?;
        self.validate(targets)?;
        self.ensure_hand_room(resource_count(targets), 0)?;
        let gained = self.available(targets)?;

        let required = gained.total_value();
        let offered = self.current().coin();
        if offered < required {
            return Err(GameError::PaymentInsufficient { offered, required });
        }

        let taken = self.board.take(&gained);
        let player = self.current_mut();
        player.take(taken);
        player.spend_coin();
        player.mark_acted();

        debug!(player = %self.current_player(), ?targets, paid = offered, "traded by coins");
        self.record(Action::TradeByCoins {
            targets: Identities::from_slice(targets),
        });
        Ok(())
    }

    /// Swap hand cards for displayed cards of no greater total value.
    ///
    /// Only one-to-many and many-to-one trades are allowed.
    pub fn trade_by_cards(&mut self, payment: &[CardIdentity], targets: &[CardIdentity]) -> Result<()> {
        self.ensure_can_act()?;
        if payment.len() != 1 && targets.len() != 1 {
            return Err(GameError::InvalidTradeShape);
        }
        self.validate(payment)?;
        self.validate(targets)?;
        self.ensure_hand_room(resource_count(targets), payment.len())?;
        let spent = self.owned_resources(payment)?;
        let gained = self.available(targets)?;

        let offered = self.current().resources_value(&spent);
        let required = gained.total_value();
        if offered < required {
            return Err(GameError::PaymentInsufficient { offered, required });
        }

        self.commit(Exchange { gained, spent });
        self.current_mut().mark_acted();

        debug!(player = %self.current_player(), ?payment, ?targets, "traded by cards");
        self.record(Action::TradeByCards {
            payment: Identities::from_slice(payment),
            targets: Identities::from_slice(targets),
        });
        Ok(())
    }

    /// Spend hand cards matching the product's cost to take the product.
    ///
    /// A building product is matched against its acquisition cost.
    pub fn produce_by_spent_cost(&mut self, cost: &[CardIdentity], product: CardIdentity) -> Result<()> {
        self.ensure_can_act()?;
        let exchange = self.check_spent_cost(cost, product, |card| card.cost().matches(cost))?;

        self.commit(exchange);
        self.current_mut().mark_acted();

        debug!(player = %self.current_player(), ?cost, %product, "produced by spent cost");
        self.record(Action::ProduceBySpentCost {
            cost: Identities::from_slice(cost),
            product,
        });
        Ok(())
    }

    /// Take the product for free by owning cards matching its capital.
    ///
    /// Capital cards stay in hand. Buildings have no capital.
    pub fn produce_by_owning_capital(&mut self, capital: &[CardIdentity], product: CardIdentity) -> Result<()> {
        self.ensure_can_act()?;
        let gained = self.check_capital(capital, product, |card| {
            card.capital().is_some_and(|required| required.matches(capital))
        })?;

        self.commit(Exchange {
            gained,
            spent: Vec::new(),
        });
        self.current_mut().mark_acted();

        debug!(player = %self.current_player(), ?capital, %product, "produced by owning capital");
        self.record(Action::ProduceByOwningCapital {
            capital: Identities::from_slice(capital),
            product,
        });
        Ok(())
    }

    /// Activate an owned building: spend its effect cost, score its points.
    pub fn activate_building_for_points(&mut self, building: CardIdentity, cost: &[CardIdentity]) -> Result<()> {
        self.ensure_running()?;
        let (building_id, card) = self.resolve_building(building)?;
        self.validate(cost)?;
        let spent = self.owned_resources(cost)?;
        if card.effect_points == 0 {
            return Err(GameError::CannotProducePoints);
        }
        if !card.effect_cost.matches(cost) {
            return Err(GameError::CostMismatch);
        }

        let player = self.current_mut();
        player.activate_building(building_id);
        player.add_points(card.effect_points);
        let returned = player.discard(&spent);
        self.board.discard(returned);

        debug!(
            player = %self.current_player(),
            %building,
            points = card.effect_points,
            "activated building for points"
        );
        self.record(Action::ActivateForPoints {
            building,
            cost: Identities::from_slice(cost),
        });
        Ok(())
    }

    /// Activate an owned building: spend its effect cost, take its product.
    pub fn activate_building_to_produce_by_spent_cost(
        &mut self,
        building: CardIdentity,
        cost: &[CardIdentity],
    ) -> Result<()> {
        self.ensure_running()?;
        let (building_id, card) = self.resolve_building(building)?;
        let product = card.effect_product.ok_or(GameError::CannotProduceProduct)?;
        let exchange = self.check_spent_cost(cost, product, |_| card.effect_cost.matches(cost))?;

        self.commit(exchange);
        self.current_mut().activate_building(building_id);

        debug!(player = %self.current_player(), %building, %product, "activated building to produce by spent cost");
        self.record(Action::ActivateToProduceBySpentCost {
            building,
            cost: Identities::from_slice(cost),
        });
        Ok(())
    }

    /// Activate an owned building: own its effect capital, take its product.
    pub fn activate_building_to_produce_by_owning_capital(
        &mut self,
        building: CardIdentity,
        capital: &[CardIdentity],
    ) -> Result<()> {
        self.ensure_running()?;
        let (building_id, card) = self.resolve_building(building)?;
        let product = card.effect_product.ok_or(GameError::CannotProduceProduct)?;
        let gained = self.check_capital(capital, product, |_| card.effect_capital.matches(capital))?;

        self.commit(Exchange {
            gained,
            spent: Vec::new(),
        });
        self.current_mut().activate_building(building_id);

        debug!(player = %self.current_player(), %building, %product, "activated building to produce by owning capital");
        self.record(Action::ActivateToProduceByOwningCapital {
            building,
            capital: Identities::from_slice(capital),
        });
        Ok(())
    }

    /// Hand the turn to the next player and check for a winner.
    pub fn end_turn(&mut self) -> Result<()> {
        self.ensure_running()?;

        let ending = self.current_player();
        self.players[ending].reset_activated_buildings();
        self.record(Action::EndTurn);

        self.current = (self.current + 1) % self.turn_order.len();
        self.board.refill(&mut self.rng);

        let next = self.current_player();
        self.players[next].reset_acted();
        self.turn_number += 1;
        self.sequence = 0;

        debug!(ended = %ending, next = %next, turn = self.turn_number, "turn ended");

        let score = self.players[next].score();
        if score >= self.config.winning_score {
            self.winner = Some(next);
            info!(winner = %next, score, turn = self.turn_number, "game over");
        }
        Ok(())
    }

    // === Checks ===

    fn current_mut(&mut self) -> &mut Player {
        let id = self.current_player();
        &mut self.players[id]
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// Running, and the current player has not traded or produced yet.
    fn ensure_can_act(&self) -> Result<()> {
        self.ensure_running()?;
        if self.current().has_acted() {
            return Err(GameError::AlreadyActed);
        }
        Ok(())
    }

    /// Non-empty, and every identity is known to the catalog.
    fn validate(&self, identities: &[CardIdentity]) -> Result<()> {
        if identities.is_empty() || !identities.iter().all(|identity| self.bounds.contains(*identity)) {
            return Err(GameError::InvalidIdentities);
        }
        Ok(())
    }

    fn ensure_hand_room(&self, take: usize, discard: usize) -> Result<()> {
        let limit = self.config.max_hand_size;
        if self.current().would_exceed_hand(take, discard, limit) {
            return Err(GameError::HandLimitExceeded { limit });
        }
        Ok(())
    }

    fn owned_resources(&self, identities: &[CardIdentity]) -> Result<Vec<EntityId>> {
        self.current()
            .equivalent_resources(identities)
            .ok_or(GameError::NotOwned(OwnedKind::Resource))
    }

    fn available(&self, identities: &[CardIdentity]) -> Result<CardBundle> {
        self.board.query(identities).ok_or(GameError::NotAvailable)
    }

    /// An owned, not yet activated copy of `identity`.
    fn resolve_building(&self, identity: CardIdentity) -> Result<(EntityId, BuildingCard)> {
        let owned = self.current().unactivated_building(identity)?;
        let card = owned
            .card
            .as_building()
            .ok_or(GameError::NotOwned(OwnedKind::Building))?;
        Ok((owned.entity_id, card.clone()))
    }

    /// Checks shared by both spend-to-produce operations.
    fn check_spent_cost(
        &self,
        cost: &[CardIdentity],
        product: CardIdentity,
        cost_matches: impl FnOnce(&Card) -> bool,
    ) -> Result<Exchange> {
        self.validate(cost)?;
        self.validate(&[product])?;
        self.ensure_hand_room(resource_count(&[product]), cost.len())?;
        let spent = self.owned_resources(cost)?;
        let gained = self.available(&[product])?;

        if !gained.iter().next().is_some_and(|card| cost_matches(&card.card)) {
            return Err(GameError::CostMismatch);
        }
        Ok(Exchange { gained, spent })
    }

    /// Checks shared by both capital operations.
    fn check_capital(
        &self,
        capital: &[CardIdentity],
        product: CardIdentity,
        capital_matches: impl FnOnce(&Card) -> bool,
    ) -> Result<CardBundle> {
        self.ensure_hand_room(resource_count(&[product]), 0)?;
        self.validate(capital)?;
        self.validate(&[product])?;
        if !self.current().owns_resources(capital) {
            return Err(GameError::NotOwned(OwnedKind::Resource));
        }
        let gained = self.available(&[product])?;

        if !gained.iter().next().is_some_and(|card| capital_matches(&card.card)) {
            return Err(GameError::CapitalMismatch);
        }
        Ok(gained)
    }

    // === Commit ===

    /// Board gives the gained cards; the spent cards go back to the board.
    fn commit(&mut self, exchange: Exchange) {
        let taken = self.board.take(&exchange.gained);
        let id = self.current_player();
        let player = &mut self.players[id];
        player.take(taken);
        let returned = player.discard(&exchange.spent);
        self.board.discard(returned);
    }

    fn record(&mut self, action: Action) {
        let record = ActionRecord::new(self.current_player(), action, self.turn_number, self.sequence);
        self.history.push_back(record);
        self.sequence += 1;
    }
}

fn resource_count(identities: &[CardIdentity]) -> usize {
    identities
        .iter()
        .filter(|identity| identity.category.is_resource())
        .count()
}
