//! Tic-tac-toe, plus a rule-based perfect player.

use std::fmt;

use crate::agents::Player;
use crate::core::{GameRng, PlayerId, TurnState};
use crate::error::MctsError;
use crate::rules::{Game, GameResult};

const LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2], [3, 4, 5], [6, 7, 8],
    // columns
    [0, 3, 6], [1, 4, 7], [2, 5, 8],
    // diagonals
    [0, 4, 8], [2, 4, 6],
];

/// Place a mark on a cell (0-based, row-major). Displayed 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    cell: u8,
}

impl Mark {
    #[must_use]
    pub fn new(cell: u8) -> Self {
        Self { cell }
    }

    #[must_use]
    pub fn cell(&self) -> u8 {
        self.cell
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cell + 1)
    }
}

/// 3x3 board; player 1 is X, player 2 is O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    turn: TurnState,
    board: [u8; 9],
}

impl TicTacToe {
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn: TurnState::new(2),
            board: [0; 9],
        }
    }

    /// Owner of each cell: 0 empty, else the player number.
    #[must_use]
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.board.iter().enumerate() {
            let c = match cell {
                1 => 'X',
                2 => 'O',
                _ => '.',
            };
            write!(f, "{c}")?;
            if i % 3 == 2 {
                writeln!(f)?;
            }
        }
        write!(f, "\n{}", self.turn)
    }
}

impl Game for TicTacToe {
    type Action = Mark;

    fn player_count(&self) -> usize {
        2
    }

    fn current_turn(&self) -> u32 {
        self.turn.turn()
    }

    fn current_player(&self) -> PlayerId {
        self.turn.player()
    }

    fn outcome(&self) -> Option<GameResult> {
        self.turn.outcome().cloned()
    }

    fn all_actions(&self) -> Vec<Mark> {
        if self.turn.is_over() {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&i| self.board[usize::from(i)] == 0)
            .map(Mark::new)
            .collect()
    }

    fn apply(&mut self, action: &Mark) {
        let player = self.turn.player();
        self.board[usize::from(action.cell)] = player.0;

        let won = LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.board[i] == player.0));
        if won {
            self.turn.finish(GameResult::Winner(player));
        } else if self.board.iter().all(|&c| c != 0) {
            self.turn.finish(GameResult::Draw);
        } else {
            self.turn.advance_turn();
        }
    }
}

/// Fork patterns: (shared cell, line one's other cells, line two's other cells).
const FORKS: [(usize, [usize; 2], [usize; 2]); 22] = [
    // row 1 + columns
    (0, [1, 2], [3, 6]), (1, [0, 2], [4, 7]), (2, [0, 1], [5, 8]),
    // row 1 + diagonals
    (0, [1, 2], [4, 8]), (2, [0, 1], [4, 6]),
    // row 2 + columns
    (3, [4, 5], [0, 6]), (4, [3, 5], [1, 7]), (5, [3, 4], [2, 8]),
    // row 2 + diagonals
    (4, [3, 5], [0, 8]), (4, [3, 5], [2, 6]),
    // row 3 + columns
    (6, [7, 8], [0, 3]), (7, [6, 8], [1, 4]), (8, [6, 7], [2, 5]),
    // row 3 + diagonals
    (8, [6, 7], [0, 4]), (6, [7, 8], [2, 4]),
    // column 1 + diagonals
    (0, [3, 6], [4, 8]), (6, [0, 3], [2, 4]),
    // column 2 + diagonals
    (4, [1, 7], [0, 8]), (4, [1, 7], [2, 6]),
    // column 3 + diagonals
    (8, [2, 5], [0, 4]), (2, [5, 8], [4, 6]),
    // diagonals
    (4, [0, 8], [2, 6]),
];

/// Rule-based perfect player (Crowley & Siegler, 1993).
///
/// In priority order: win, block, fork, block a fork (preferring a forcing
/// move), centre, opposite corner, empty corner, empty side. Ties within a
/// rule are broken at random.
#[derive(Clone, Debug)]
pub struct PerfectPlayer {
    rng: GameRng,
}

impl PerfectPlayer {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    fn win_moves(board: &[u8; 9], p: u8) -> Vec<usize> {
        LINES
            .iter()
            .filter_map(|line| {
                let mine = line.iter().filter(|&&i| board[i] == p).count();
                let empty = line.iter().rev().copied().find(|&i| board[i] == 0);
                if mine == 2 { empty } else { None }
            })
            .collect()
    }

    fn fork_moves(board: &[u8; 9], p: u8) -> Vec<usize> {
        let half_open = |[a, b]: [usize; 2]| {
            (board[a] == p && board[b] == 0) || (board[a] == 0 && board[b] == p)
        };
        FORKS
            .iter()
            .filter(|(shared, one, two)| board[*shared] == 0 && half_open(*one) && half_open(*two))
            .map(|(shared, _, _)| *shared)
            .collect()
    }

    /// Moves that make two in a row without handing the opponent a cell in
    /// `avoid` as the forced block.
    fn force_block_moves(board: &[u8; 9], p: u8, avoid: &[usize]) -> Vec<usize> {
        let mut moves = Vec::new();
        for line in &LINES {
            let mine = line.iter().filter(|&&i| board[i] == p).count();
            let empty: Vec<usize> = line.iter().copied().filter(|&i| board[i] == 0).collect();
            if mine == 1 && empty.len() == 2 {
                match (avoid.contains(&empty[0]), avoid.contains(&empty[1])) {
                    (true, false) => moves.push(empty[0]),
                    (false, true) => moves.push(empty[1]),
                    (false, false) => moves.extend_from_slice(&empty),
                    (true, true) => {}
                }
            }
        }
        moves
    }

    fn opposite_corner_moves(board: &[u8; 9], opponent: u8) -> Vec<usize> {
        [(0, 8), (2, 6), (8, 0), (6, 2)]
            .into_iter()
            .filter(|&(corner, opposite)| board[corner] == opponent && board[opposite] == 0)
            .map(|(_, opposite)| opposite)
            .collect()
    }

    fn empty_of(board: &[u8; 9], cells: [usize; 4]) -> Vec<usize> {
        cells.into_iter().filter(|&i| board[i] == 0).collect()
    }

    fn pick(&mut self, moves: &[usize]) -> Option<Mark> {
        self.rng.choose(moves).map(|&i| Mark::new(i as u8))
    }

    fn choose(&mut self, board: &[u8; 9], me: u8) -> Option<Mark> {
        let opponent = 3 - me;

        let wins = Self::win_moves(board, me);
        if !wins.is_empty() {
            return self.pick(&wins);
        }
        let blocks = Self::win_moves(board, opponent);
        if !blocks.is_empty() {
            return self.pick(&blocks);
        }
        let forks = Self::fork_moves(board, me);
        if !forks.is_empty() {
            return self.pick(&forks);
        }
        let their_forks = Self::fork_moves(board, opponent);
        if !their_forks.is_empty() {
            let forcing = Self::force_block_moves(board, me, &their_forks);
            if !forcing.is_empty() {
                return self.pick(&forcing);
            }
            return self.pick(&their_forks);
        }
        if board[4] == 0 {
            return Some(Mark::new(4));
        }
        let opposite = Self::opposite_corner_moves(board, opponent);
        if !opposite.is_empty() {
            return self.pick(&opposite);
        }
        let corners = Self::empty_of(board, [0, 2, 6, 8]);
        if !corners.is_empty() {
            return self.pick(&corners);
        }
        let sides = Self::empty_of(board, [1, 3, 5, 7]);
        self.pick(&sides)
    }
}

impl Player<TicTacToe> for PerfectPlayer {
    fn get_action(&mut self, game: &TicTacToe) -> Result<Mark, MctsError> {
        if game.is_terminal() {
            return Err(MctsError::NoActionAvailable);
        }
        self.choose(game.board(), game.current_player().0)
            .ok_or(MctsError::NoActionAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(cells: &[u8]) -> TicTacToe {
        let mut game = TicTacToe::new();
        for &cell in cells {
            game.apply(&Mark::new(cell));
        }
        game
    }

    #[test]
    fn test_empty_board_has_nine_actions() {
        let game = TicTacToe::new();
        assert_eq!(game.all_actions().len(), 9);
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.current_turn(), 1);
    }

    #[test]
    fn test_apply_advances_turn() {
        let game = play(&[4]);
        assert_eq!(game.board()[4], 1);
        assert_eq!(game.current_player(), PlayerId::new(2));
        assert_eq!(game.current_turn(), 2);
        assert_eq!(game.all_actions().len(), 8);
    }

    #[test]
    fn test_row_win() {
        let game = play(&[0, 3, 1, 4, 2]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(1))));
        assert!(game.all_actions().is_empty());
    }

    #[test]
    fn test_diagonal_win_for_o() {
        let game = play(&[0, 2, 1, 4, 8, 6]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(2))));
    }

    #[test]
    fn test_draw() {
        // X O X / X O O / O X X
        let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game.outcome(), Some(GameResult::Draw));
    }

    #[test]
    fn test_clone_is_independent() {
        let game = play(&[4]);
        let mut copy = game.clone();
        copy.apply(&Mark::new(0));
        assert_eq!(game.board()[0], 0);
        assert_eq!(copy.board()[0], 2);
    }

    #[test]
    fn test_display() {
        let game = play(&[0, 4]);
        assert_eq!(game.to_string(), "X..\n.O.\n...\n\ncurrentTurn 3 currentPlayer 1");
        assert_eq!(Mark::new(0).to_string(), "1");
    }

    #[test]
    fn test_perfect_player_wins_and_blocks() {
        let mut perfect = PerfectPlayer::new(GameRng::new(1));

        // X to move with 0, 1 taken: win at 2.
        let game = play(&[0, 3, 1, 4]);
        assert_eq!(perfect.get_action(&game).unwrap().cell(), 2);

        // O to move, X threatens 0-1-2.
        let game = play(&[0, 4, 1]);
        assert_eq!(perfect.get_action(&game).unwrap().cell(), 2);
    }

    #[test]
    fn test_perfect_player_takes_centre() {
        let mut perfect = PerfectPlayer::new(GameRng::new(1));
        let game = play(&[0]);
        assert_eq!(perfect.get_action(&game).unwrap().cell(), 4);
    }

    #[test]
    fn test_perfect_players_always_draw() {
        for seed in 0..20 {
            let mut game = TicTacToe::new();
            let mut players = [
                PerfectPlayer::new(GameRng::new(seed)),
                PerfectPlayer::new(GameRng::new(seed + 100)),
            ];
            while !game.is_terminal() {
                let idx = game.current_player().index();
                let action = players[idx].get_action(&game).unwrap();
                game.apply(&action);
            }
            assert_eq!(game.outcome(), Some(GameResult::Draw));
        }
    }
}
