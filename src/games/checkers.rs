//! Checkers (English draughts) on an 8x8 board.
//!
//! Player 1 starts on rows 0-2 and moves toward row 7; player 2 starts on
//! rows 5-7 and moves toward row 0. Jumps are forced, multi-jumps are taken
//! one hop per action by the same player, and promotion ends the turn.
//! A player with no legal move loses. The game is drawn once 40 turns pass
//! without a capture or a man moving.

use std::fmt;

use crate::core::{PlayerId, TurnState};
use crate::rules::{Game, GameResult};

const KING: u8 = 0x4;
const OWNER: u8 = 0x3;
const DRAW_AFTER_QUIET_TURNS: u32 = 40;

#[rustfmt::skip]
const INITIAL: [u8; 64] = [
    0, 1, 0, 1, 0, 1, 0, 1,
    1, 0, 1, 0, 1, 0, 1, 0,
    0, 1, 0, 1, 0, 1, 0, 1,
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    2, 0, 2, 0, 2, 0, 2, 0,
    0, 2, 0, 2, 0, 2, 0, 2,
    2, 0, 2, 0, 2, 0, 2, 0,
];

/// A step or a single jump. Squares are 0-based; displayed 1-based as
/// `from->to` or `from-[jumped]->to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckersMove {
    pub from: u8,
    pub jumped: Option<u8>,
    pub to: u8,
}

impl fmt::Display for CheckersMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from + 1)?;
        if let Some(j) = self.jumped {
            write!(f, "-[{}]", j + 1)?;
        }
        write!(f, "->{}", self.to + 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkers {
    turn: TurnState,
    board: [u8; 64],
    /// Square of the piece mid multi-jump.
    jumping: Option<u8>,
    last_quiet_reset: u32,
}

impl Checkers {
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn: TurnState::new(2),
            board: INITIAL,
            jumping: None,
            last_quiet_reset: 0,
        }
    }

    /// Piece code per square: 0 empty, 1/2 men, 5/6 kings.
    #[must_use]
    pub fn board(&self) -> &[u8; 64] {
        &self.board
    }

    /// Build a position directly. Used for puzzles and tests.
    #[must_use]
    pub fn from_board(board: [u8; 64], to_move: PlayerId) -> Self {
        let mut game = Self::new();
        game.board = board;
        game.turn.set_player(to_move);
        game
    }

    /// Diagonal offsets a piece may travel, as (row step, column step).
    fn directions(piece: u8) -> &'static [(isize, isize)] {
        const FORWARD: [(isize, isize); 2] = [(1, -1), (1, 1)];
        const BACKWARD: [(isize, isize); 2] = [(-1, -1), (-1, 1)];
        const BOTH: [(isize, isize); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];
        if piece & KING != 0 {
            &BOTH
        } else if piece & OWNER == 1 {
            &FORWARD
        } else {
            &BACKWARD
        }
    }

    fn offset(square: usize, dr: isize, dc: isize, steps: isize) -> Option<usize> {
        let r = (square / 8) as isize + dr * steps;
        let c = (square % 8) as isize + dc * steps;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some((r * 8 + c) as usize)
        } else {
            None
        }
    }

    fn jumps(&self, player: u8) -> Vec<CheckersMove> {
        let opponent = player % 2 + 1;
        let mut moves = Vec::new();
        for (sq, &piece) in self.board.iter().enumerate() {
            if piece & OWNER != player || self.jumping.is_some_and(|j| usize::from(j) != sq) {
                continue;
            }
            for &(dr, dc) in Self::directions(piece) {
                let (Some(over), Some(to)) = (Self::offset(sq, dr, dc, 1), Self::offset(sq, dr, dc, 2))
                else {
                    continue;
                };
                if self.board[over] & OWNER == opponent && self.board[to] == 0 {
                    moves.push(CheckersMove {
                        from: sq as u8,
                        jumped: Some(over as u8),
                        to: to as u8,
                    });
                }
            }
        }
        moves
    }

    fn steps(&self, player: u8) -> Vec<CheckersMove> {
        let mut moves = Vec::new();
        for (sq, &piece) in self.board.iter().enumerate() {
            if piece & OWNER != player {
                continue;
            }
            for &(dr, dc) in Self::directions(piece) {
                if let Some(to) = Self::offset(sq, dr, dc, 1) {
                    if self.board[to] == 0 {
                        moves.push(CheckersMove {
                            from: sq as u8,
                            jumped: None,
                            to: to as u8,
                        });
                    }
                }
            }
        }
        moves
    }

    fn legal_moves(&self) -> Vec<CheckersMove> {
        let player = self.turn.player().0;
        let jumps = self.jumps(player);
        if !jumps.is_empty() || self.jumping.is_some() {
            return jumps;
        }
        self.steps(player)
    }
}

impl Default for Checkers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Checkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, piece) in self.board.iter().enumerate() {
            let c = match piece {
                1 => 'x',
                2 => 'o',
                5 => 'X',
                6 => 'O',
                _ => '.',
            };
            write!(f, "{c}")?;
            if i % 8 == 7 {
                writeln!(f)?;
            }
        }
        write!(f, "\n{}", self.turn)
    }
}

impl Game for Checkers {
    type Action = CheckersMove;

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

    fn all_actions(&self) -> Vec<CheckersMove> {
        if self.turn.is_over() {
            return Vec::new();
        }
        self.legal_moves()
    }

    fn apply(&mut self, action: &CheckersMove) {
        let from = usize::from(action.from);
        let to = usize::from(action.to);
        let piece = self.board[from];

        if action.jumped.is_some() || piece & KING == 0 {
            self.last_quiet_reset = self.turn.turn();
        }

        self.board[to] = piece;
        self.board[from] = 0;
        if let Some(j) = action.jumped {
            self.board[usize::from(j)] = 0;
        }

        let promoted = match piece {
            1 if to >= 56 => true,
            2 if to < 8 => true,
            _ => false,
        };
        if promoted {
            self.board[to] = piece | KING;
        } else if action.jumped.is_some() {
            self.jumping = Some(action.to);
            if !self.jumps(self.turn.player().0).is_empty() {
                return;
            }
        }

        self.jumping = None;
        let mover = self.turn.player();
        self.turn.advance_turn();

        if self.legal_moves().is_empty() {
            self.turn.finish(GameResult::Winner(mover));
        } else if self.turn.turn() - self.last_quiet_reset > DRAW_AFTER_QUIET_TURNS {
            self.turn.finish(GameResult::Draw);
        }
    }
}
