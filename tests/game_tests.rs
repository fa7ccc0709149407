//! Game contract verification tests.
//!
//! These tests check every bundled game against the invariants the search
//! engine relies on: actions exist exactly while the game runs, turns only
//! move forward, and clones are independent.

use rust_mcts::agents::{Player, RandomPlayer};
use rust_mcts::core::{GameRng, PlayerId, PlayerMap};
use rust_mcts::error::MctsError;
use rust_mcts::games::connect_four::ROWS;
use rust_mcts::games::{Backgammon, Checkers, ConnectFour, TicTacToe};
use rust_mcts::mcts::{result_to_rewards, MctsConfig};
use rust_mcts::rules::{Game, GameResult};

/// Play random games and check the contract after every move.
fn check_contract<G: Game>(new_game: impl Fn(u64) -> G, games: u64, max_moves: usize) {
    for seed in 0..games {
        let mut game = new_game(seed);
        let mut player = RandomPlayer::with_seed(seed);
        let mut moves = 0;

        while !game.is_terminal() {
            assert!(!game.all_actions().is_empty(), "running game without actions");
            assert!(game.current_player().is_valid(game.player_count()));

            let turn = game.current_turn();
            let before = game.to_string();
            let snapshot = game.clone();

            let action = player.get_action(&game).unwrap();
            game.apply(&action);

            assert!(game.current_turn() >= turn, "turn went backwards");
            assert_eq!(snapshot.to_string(), before, "clone changed by apply");

            moves += 1;
            assert!(moves < max_moves, "game did not end");
        }

        assert!(game.all_actions().is_empty());
        assert!(game.outcome().is_some());
        assert!(matches!(
            player.get_action(&game),
            Err(MctsError::NoActionAvailable)
        ));
    }
}

// =============================================================================
// Contract Tests
// =============================================================================

#[test]
fn test_tictactoe_contract() {
    check_contract(|_| TicTacToe::new(), 50, 10);
}

#[test]
fn test_connect_four_contract() {
    check_contract(|_| ConnectFour::new(), 30, 43);
}

#[test]
fn test_checkers_contract() {
    check_contract(|_| Checkers::new(), 10, 5_000);
}

#[test]
fn test_backgammon_contract() {
    check_contract(Backgammon::with_seed, 5, 50_000);
}

// =============================================================================
// Per-Game Properties
// =============================================================================

#[test]
fn test_connect_four_opening() {
    let game = ConnectFour::new();
    let actions = game.all_actions();

    assert_eq!(actions.len(), 7);
    for action in &actions {
        assert_eq!(action.row(), ROWS - 1);
    }
}

#[test]
fn test_connect_four_opening_moves_apply_to_independent_clones() {
    let game = ConnectFour::new();
    let original = game.clone();

    for (col, action) in game.all_actions().iter().enumerate() {
        let mut next = game.clone();
        next.apply(action);

        assert_eq!(action.column(), col);
        assert_eq!(next.at(col, ROWS - 1), 1);
        for row in 0..ROWS - 1 {
            assert_eq!(next.at(col, row), 0);
        }
        assert_eq!(next.current_player(), PlayerId::new(2));
        assert_eq!(next.current_turn(), 2);
    }

    assert_eq!(game, original);
    assert_eq!(game.current_turn(), 1);
}

#[test]
fn test_checkers_opening() {
    let game = Checkers::new();
    assert_eq!(game.all_actions().len(), 7);
    assert_eq!(game.current_player(), PlayerId::new(1));
}

#[test]
fn test_backgammon_initial_rolls_differ() {
    for seed in 0..500 {
        let [a, b] = Backgammon::with_seed(seed).roll();
        assert_ne!(a, b, "seed {seed} opened with doubles");
    }
}

#[test]
fn test_backgammon_is_nondeterministic() {
    let game = Backgammon::with_seed(1);
    assert!(game.is_nondeterministic());

    let fixed = game.clone_with_rng(GameRng::new(3)).unwrap();
    assert_eq!(fixed.roll(), game.roll());
    assert_eq!(fixed.current_turn(), game.current_turn());
}

#[test]
fn test_deterministic_games_clone_with_rng_is_plain_clone() {
    let game = TicTacToe::new();
    assert!(!game.is_nondeterministic());
    let copy = game.clone_with_rng(GameRng::new(1)).unwrap();
    assert_eq!(copy.to_string(), game.to_string());
}

// =============================================================================
// Rewards and Serialization
// =============================================================================

#[test]
fn test_rewards_for_outcomes() {
    let win = result_to_rewards(Some(&GameResult::Winner(PlayerId::new(2))), 2);
    assert_eq!(win.as_slice(), &[0.0, 1.0]);

    let draw = result_to_rewards(Some(&GameResult::Draw), 3);
    assert_eq!(draw.as_slice(), &[0.5, 0.5, 0.5]);

    let unset = result_to_rewards(None, 2);
    assert_eq!(unset.as_slice(), &[0.5, 0.5]);

    let out_of_range = result_to_rewards(Some(&GameResult::Winner(PlayerId::new(3))), 2);
    assert_eq!(out_of_range.as_slice(), &[0.5, 0.5]);
}

#[test]
fn test_config_serialization() {
    let config = MctsConfig::default().with_trials(250).with_trials_per_seed(5);

    let json = serde_json::to_string(&config).unwrap();
    let back: MctsConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(config, back);
}

#[test]
fn test_result_and_player_map_serialization() {
    let result = GameResult::Winner(PlayerId::new(2));
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(serde_json::from_str::<GameResult>(&json).unwrap(), result);

    let map: PlayerMap<u32> = PlayerMap::new(3, |p| u32::from(p.0) * 10);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(serde_json::from_str::<PlayerMap<u32>>(&json).unwrap(), map);
}
