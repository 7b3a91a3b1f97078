//! Transaction engine tests through the public API.
//!
//! Shuffles decide the turn order and the building deck, so these tests
//! only rely on what every seed guarantees for the sample catalog: all
//! basics and level-one identities on display, and with two players all
//! three starting buildings on display.

use market_engine::cards::{CardIdentity, Category};
use market_engine::core::{Action, GameConfig, GameSnapshot, PlayerId};
use market_engine::error::{ErrorKind, GameError, OwnedKind, SetupError};
use market_engine::rules::Game;
use market_engine::sample::sample_factory;

const TIMBER: CardIdentity = CardIdentity::basic(1);
const ORE: CardIdentity = CardIdentity::basic(2);
const GRAIN: CardIdentity = CardIdentity::basic(3);
const CLAY: CardIdentity = CardIdentity::basic(4);
const PLANK: CardIdentity = CardIdentity::level_one(1);
const INGOT: CardIdentity = CardIdentity::level_one(2);
const FLOUR: CardIdentity = CardIdentity::level_one(3);
const SAWMILL: CardIdentity = CardIdentity::building(1);

fn two_player(seed: u64) -> Game {
    Game::new(&sample_factory(), ["Ada", "Bo"], GameConfig::default(), seed).unwrap()
}

fn hand_of(game: &Game, player: PlayerId) -> Vec<CardIdentity> {
    let mut hand: Vec<_> = game
        .player(player)
        .unwrap()
        .resources()
        .iter()
        .map(|card| card.identity())
        .collect();
    hand.sort();
    hand
}

#[test]
fn test_setup_across_player_counts() {
    let names = ["Ada", "Bo", "Cy", "Di"];
    for player_count in 2..=4 {
        let game = Game::new(&sample_factory(), names[..player_count].iter().copied(), GameConfig::default(), 7)
            .unwrap();

        let coins: Vec<u32> = game.players_in_turn_order().map(|p| p.coin()).collect();
        let expected: Vec<u32> = (0..player_count as u32).map(|seat| 3 + seat).collect();
        assert_eq!(coins, expected);

        assert!(game.players_in_turn_order().all(|p| p.hand_size() == 0 && p.score() == 0));
        assert_eq!(game.turn_number(), 1);
        assert!(!game.is_over());

        let per_basic = [5, 6, 7][player_count - 2];
        let board = game.snapshot().board;
        assert_eq!(board.pile(Category::BasicResource).display_len(), 4 * per_basic);
        assert_eq!(board.pile(Category::LevelOneResource).display.len(), 5);
    }
}

#[test]
fn test_unsupported_player_counts() {
    let factory = sample_factory();

    assert_eq!(
        Game::new(&factory, ["Solo"], GameConfig::default(), 1).unwrap_err(),
        SetupError::UnsupportedPlayerCount(1)
    );
    assert_eq!(
        Game::new(&factory, ["A", "B", "C", "D", "E"], GameConfig::default(), 1).unwrap_err(),
        SetupError::UnsupportedPlayerCount(5)
    );
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig::default().with_unique_slots(0);
    assert!(matches!(
        Game::new(&sample_factory(), ["A", "B"], config, 1),
        Err(SetupError::InvalidConfig(_))
    ));
}

#[test]
fn test_trade_by_coins_spends_whole_purse() {
    let mut game = two_player(11);
    let first = game.current_player();

    game.trade_by_coins(&[TIMBER, ORE]).unwrap();

    let player = game.player(first).unwrap();
    assert_eq!(player.coin(), 0);
    assert!(player.has_acted());
    assert_eq!(hand_of(&game, first), vec![TIMBER, ORE]);
    assert_eq!(game.board().pile(Category::BasicResource).display_len(), 18);
}

#[test]
fn test_trade_by_coins_insufficient() {
    let mut game = two_player(12);

    assert_eq!(
        game.trade_by_coins(&[ORE, ORE, ORE, ORE]),
        Err(GameError::PaymentInsufficient { offered: 3, required: 4 })
    );
    assert_eq!(game.current().coin(), 3);
}

#[test]
fn test_one_turn_action_per_turn() {
    let mut game = two_player(13);

    game.trade_by_coins(&[GRAIN]).unwrap();

    assert_eq!(game.trade_by_coins(&[GRAIN]), Err(GameError::AlreadyActed));
    assert_eq!(game.trade_by_cards(&[GRAIN], &[ORE]), Err(GameError::AlreadyActed));
    assert_eq!(game.produce_by_spent_cost(&[GRAIN], FLOUR), Err(GameError::AlreadyActed));
    assert_eq!(game.produce_by_owning_capital(&[GRAIN], FLOUR), Err(GameError::AlreadyActed));
}

#[test]
fn test_end_turn_rotates_and_wraps() {
    let mut game = two_player(14);
    let order = game.turn_order().to_vec();

    game.trade_by_coins(&[CLAY]).unwrap();
    game.end_turn().unwrap();
    assert_eq!(game.current_player(), order[1]);
    assert!(!game.current().has_acted());
    assert_eq!(game.turn_number(), 2);

    game.end_turn().unwrap();
    assert_eq!(game.current_player(), order[0]);
    assert!(!game.current().has_acted(), "acted flag resets for the new turn");
    assert_eq!(game.turn_number(), 3);
}

#[test]
fn test_produce_by_owning_capital_keeps_capital() {
    let mut game = two_player(15);
    let first = game.current_player();

    game.trade_by_coins(&[ORE, ORE, ORE]).unwrap();
    game.end_turn().unwrap();
    game.end_turn().unwrap();

    assert_eq!(
        game.produce_by_owning_capital(&[ORE, ORE], INGOT),
        Err(GameError::CapitalMismatch)
    );
    game.produce_by_owning_capital(&[ORE, ORE, ORE], INGOT).unwrap();

    assert_eq!(hand_of(&game, first), vec![ORE, ORE, ORE, INGOT]);
    assert!(game.current().has_acted());
}

#[test]
fn test_produce_by_spent_cost_returns_payment() {
    let mut game = two_player(16);
    let first = game.current_player();

    game.trade_by_coins(&[TIMBER, CLAY]).unwrap();
    game.end_turn().unwrap();
    game.end_turn().unwrap();

    assert_eq!(
        game.produce_by_spent_cost(&[TIMBER, CLAY], FLOUR),
        Err(GameError::CostMismatch)
    );
    assert_eq!(
        game.produce_by_spent_cost(&[TIMBER, TIMBER], PLANK),
        Err(GameError::NotOwned(OwnedKind::Resource))
    );

    game.produce_by_spent_cost(&[CLAY, TIMBER], PLANK).unwrap();

    assert_eq!(hand_of(&game, first), vec![PLANK]);
    assert_eq!(game.board().pile(Category::BasicResource).display_len(), 20);
}

/// Second player buys the Sawmill inputs, then builds it on their next turn.
fn build_sawmill(game: &mut Game) -> PlayerId {
    game.end_turn().unwrap();
    let builder = game.current_player();
    game.trade_by_coins(&[TIMBER, TIMBER, ORE]).unwrap();
    game.end_turn().unwrap();
    game.end_turn().unwrap();
    game.produce_by_spent_cost(&[TIMBER, ORE, TIMBER], SAWMILL).unwrap();
    builder
}

#[test]
fn test_produce_building() {
    let mut game = two_player(17);
    let builder = build_sawmill(&mut game);

    let player = game.player(builder).unwrap();
    assert_eq!(player.buildings().len(), 1);
    assert_eq!(player.score(), 1);
    assert_eq!(player.hand_size(), 0);
    assert!(game.board().query(&[SAWMILL]).is_none());
}

#[test]
fn test_activation_needs_effect_cost_in_hand() {
    let mut game = two_player(18);
    build_sawmill(&mut game);

    assert_eq!(
        game.activate_building_to_produce_by_spent_cost(SAWMILL, &[TIMBER, TIMBER]),
        Err(GameError::NotOwned(OwnedKind::Resource))
    );
    assert_eq!(
        game.activate_building_for_points(CardIdentity::building(3), &[CLAY]),
        Err(GameError::NotOwned(OwnedKind::Building))
    );
}

#[test]
fn test_winner_stops_game() {
    let config = GameConfig::default().with_winning_score(1);
    let mut game = Game::new(&sample_factory(), ["Ada", "Bo"], config, 19).unwrap();
    let builder = build_sawmill(&mut game);

    game.end_turn().unwrap();
    assert!(!game.is_over(), "the other player has no points");
    game.end_turn().unwrap();

    assert_eq!(game.winner(), Some(builder));
    assert_eq!(game.snapshot().winner, Some(builder));
    assert_eq!(game.trade_by_coins(&[TIMBER]), Err(GameError::GameOver));
    assert_eq!(game.end_turn(), Err(GameError::GameOver));
    assert_eq!(GameError::GameOver.kind(), ErrorKind::Lifecycle);
}

#[test]
fn test_hand_limit() {
    let config = GameConfig::default().with_max_hand_size(2).with_starting_coin(5);
    let mut game = Game::new(&sample_factory(), ["Ada", "Bo"], config, 20).unwrap();

    assert_eq!(
        game.trade_by_coins(&[TIMBER, ORE, GRAIN]),
        Err(GameError::HandLimitExceeded { limit: 2 })
    );
    game.trade_by_coins(&[TIMBER, ORE]).unwrap();
    assert_eq!(game.current().hand_size(), 2);
}

#[test]
fn test_rejections_leave_state_unchanged() {
    let mut game = two_player(21);
    let before = game.snapshot();

    let errors = [
        game.trade_by_coins(&[]),
        game.trade_by_coins(&[CardIdentity::basic(9)]),
        game.trade_by_coins(&[TIMBER; 6]),
        game.trade_by_cards(&[TIMBER], &[ORE]),
        game.produce_by_spent_cost(&[TIMBER], CardIdentity::level_two(1)),
    ];

    assert_eq!(errors[0], Err(GameError::InvalidIdentities));
    assert_eq!(errors[1], Err(GameError::InvalidIdentities));
    assert_eq!(errors[2], Err(GameError::NotAvailable));
    assert_eq!(errors[3], Err(GameError::NotOwned(OwnedKind::Resource)));
    assert_eq!(errors[4], Err(GameError::NotOwned(OwnedKind::Resource)));
    assert_eq!(game.snapshot(), before);
    assert!(game.history().is_empty());
}

#[test]
fn test_apply_records_history() {
    let mut game = two_player(22);
    let first = game.current_player();

    game.apply(&Action::trade_by_coins([GRAIN, GRAIN])).unwrap();
    game.apply(&Action::EndTurn).unwrap();
    assert_eq!(game.apply(&Action::EndTurn), Ok(()));

    let history: Vec<_> = game.history().iter().cloned().collect();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].player, first);
    assert_eq!(history[0].action, Action::trade_by_coins([GRAIN, GRAIN]));
    assert_eq!((history[1].turn, history[1].sequence), (1, 1));
    assert_eq!((history[2].turn, history[2].sequence), (2, 0));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = two_player(23);
    let mut b = two_player(23);
    assert_eq!(a.snapshot(), b.snapshot());

    for game in [&mut a, &mut b] {
        game.trade_by_coins(&[PLANK]).unwrap();
        game.end_turn().unwrap();
        game.trade_by_coins(&[PLANK]).unwrap();
        game.end_turn().unwrap();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_serializes() {
    let mut game = two_player(24);
    game.trade_by_coins(&[CLAY]).unwrap();
    let snapshot = game.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(back, snapshot);
    assert_eq!(back.players.len(), 2);
    assert!(back.players[0].has_acted_this_turn);
}
