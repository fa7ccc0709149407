//! Connect four on the standard 7-column, 6-row board.
//!
//! Cells are indexed `col + row * 7` with row 0 at the top, so a disc
//! dropped into a column lands on the highest-indexed empty row.

use std::fmt;

use crate::core::{PlayerId, TurnState};
use crate::rules::{Game, GameResult};

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;
const CELLS: usize = COLUMNS * ROWS;

/// Drop a disc; carries the landing cell. Displayed as the 1-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscDrop {
    cell: u8,
}

impl DiscDrop {
    #[must_use]
    pub fn cell(&self) -> usize {
        usize::from(self.cell)
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.cell() % COLUMNS
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.cell() / COLUMNS
    }
}

impl fmt::Display for DiscDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column() + 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectFour {
    turn: TurnState,
    board: [u8; CELLS],
}

impl ConnectFour {
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn: TurnState::new(2),
            board: [0; CELLS],
        }
    }

    /// Owner of the disc at (`col`, `row`), 0 when empty.
    #[must_use]
    pub fn at(&self, col: usize, row: usize) -> u8 {
        self.board[col + row * COLUMNS]
    }

    /// Drop into a column, if it has room.
    #[must_use]
    pub fn drop_in(&self, col: usize) -> Option<DiscDrop> {
        (0..ROWS)
            .rev()
            .map(|row| col + row * COLUMNS)
            .find(|&cell| self.board[cell] == 0)
            .map(|cell| DiscDrop { cell: cell as u8 })
    }

    fn count_from(&self, col: usize, row: usize, dc: isize, dr: isize, p: u8) -> usize {
        let mut n = 0;
        let (mut c, mut r) = (col as isize + dc, row as isize + dr);
        while (0..COLUMNS as isize).contains(&c)
            && (0..ROWS as isize).contains(&r)
            && self.board[c as usize + r as usize * COLUMNS] == p
        {
            n += 1;
            c += dc;
            r += dr;
        }
        n
    }

    fn connects_four(&self, cell: usize, p: u8) -> bool {
        let (col, row) = (cell % COLUMNS, cell / COLUMNS);
        [(1, 0), (0, 1), (1, 1), (1, -1)].iter().any(|&(dc, dr)| {
            1 + self.count_from(col, row, dc, dr, p) + self.count_from(col, row, -dc, -dr, p) >= 4
        })
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                let c = match self.at(col, row) {
                    1 => 'X',
                    2 => 'O',
                    _ => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "1234567\n{}", self.turn)
    }
}

impl Game for ConnectFour {
    type Action = DiscDrop;

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

    fn all_actions(&self) -> Vec<DiscDrop> {
        if self.turn.is_over() {
            return Vec::new();
        }
        (0..COLUMNS).filter_map(|col| self.drop_in(col)).collect()
    }

    fn apply(&mut self, action: &DiscDrop) {
        let player = self.turn.player();
        let cell = action.cell();
        self.board[cell] = player.0;

        if self.connects_four(cell, player.0) {
            self.turn.finish(GameResult::Winner(player));
        } else if self.board.iter().all(|&c| c != 0) {
            self.turn.finish(GameResult::Draw);
        } else {
            self.turn.advance_turn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(cols: &[usize]) -> ConnectFour {
        let mut game = ConnectFour::new();
        for &col in cols {
            let action = game.drop_in(col).unwrap();
            game.apply(&action);
        }
        game
    }

    #[test]
    fn test_opening_drops_land_on_bottom_row() {
        let game = ConnectFour::new();
        let actions = game.all_actions();
        assert_eq!(actions.len(), 7);
        for (col, action) in actions.iter().enumerate() {
            assert_eq!(action.column(), col);
            assert_eq!(action.row(), ROWS - 1);
        }
    }

    #[test]
    fn test_discs_stack() {
        let game = play(&[3, 3, 3]);
        assert_eq!(game.at(3, 5), 1);
        assert_eq!(game.at(3, 4), 2);
        assert_eq!(game.at(3, 3), 1);
        assert_eq!(game.drop_in(3).unwrap().row(), 2);
    }

    #[test]
    fn test_full_column_not_offered() {
        let game = play(&[0, 0, 0, 0, 0, 0]);
        assert!(game.drop_in(0).is_none());
        let actions = game.all_actions();
        assert_eq!(actions.len(), 6);
        assert!(actions.iter().all(|a| a.column() != 0));
    }

    #[test]
    fn test_horizontal_win() {
        let game = play(&[0, 0, 1, 1, 2, 2, 3]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(1))));
        assert!(game.all_actions().is_empty());
    }

    #[test]
    fn test_vertical_win() {
        let game = play(&[0, 1, 0, 1, 0, 1, 6, 1]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(2))));
    }

    #[test]
    fn test_diagonal_win() {
        // X climbs from (0,5) to (3,2).
        let game = play(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(1))));
    }

    #[test]
    fn test_anti_diagonal_win() {
        // Mirror of the diagonal case.
        let game = play(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3]);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(1))));
    }

    #[test]
    fn test_full_board_draw() {
        // Columns filled in pairs with a shifted pattern so no line of four forms.
        let mut game = ConnectFour::new();
        let order = [0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5, 4,
            5, 4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6];
        for col in order {
            assert!(!game.is_terminal(), "ended early at column {col}");
            let action = game.drop_in(col).unwrap();
            game.apply(&action);
        }
        assert_eq!(game.outcome(), Some(GameResult::Draw));
    }
}
