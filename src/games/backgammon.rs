//! Backgammon without the doubling cube.
//!
//! Each player's checkers live on their own track: index 0 is borne off,
//! 1..=24 are points counted from that player's home, 25 is the bar. Point
//! `p` on one track is point `25 - p` on the other.
//!
//! The dice make this game nondeterministic; it owns a [`GameRng`] and
//! supports `clone_with_rng` so search can fix the dice per determinization.

use std::fmt;

use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId, TurnState};
use crate::error::MctsError;
use crate::rules::{Game, GameResult};

const OFF: usize = 0;
const BAR: usize = 25;

#[rustfmt::skip]
const INITIAL_TRACK: [u8; 26] = [
//  off  1           6     8              13                      24  bar
    0,   0, 0, 0, 0, 0, 5, 0, 3, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0,
];

/// Who moves first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartRule {
    /// Player 1 always opens with the first roll.
    #[default]
    PlayerOne,
    /// Whoever's die shows higher on the opening roll moves first.
    HigherRoll,
}

/// Move one checker using one die, or pass when nothing is playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checker {
    NoPlay,
    Move {
        /// Index into the remaining dice.
        die: usize,
        from: u8,
        to: u8,
    },
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Checker::NoPlay => write!(f, "NO PLAY"),
            Checker::Move { from, to, .. } => {
                if usize::from(from) == BAR {
                    write!(f, "BAR")?;
                } else {
                    write!(f, "{from}")?;
                }
                if usize::from(to) == OFF {
                    write!(f, "->OFF")
                } else {
                    write!(f, "->{to}")
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backgammon {
    turn: TurnState,
    tracks: [[u8; 26]; 2],
    roll: [u8; 2],
    /// Dice still to be played this turn.
    moves: SmallVec<[u8; 4]>,
    rng: GameRng,
}

impl Backgammon {
    /// New game; the opening roll is re-rolled until the dice differ.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self::with_start_rule(rng, StartRule::PlayerOne)
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    #[must_use]
    pub fn with_start_rule(mut rng: GameRng, rule: StartRule) -> Self {
        let roll = loop {
            let roll = [rng.roll_die(6), rng.roll_die(6)];
            if roll[0] != roll[1] {
                break roll;
            }
        };

        let mut turn = TurnState::new(2);
        if rule == StartRule::HigherRoll && roll[1] > roll[0] {
            turn.set_player(PlayerId::new(2));
        }

        Self {
            turn,
            tracks: [INITIAL_TRACK; 2],
            roll,
            moves: SmallVec::from_slice(&roll),
            rng,
        }
    }

    /// The dice rolled for the current turn.
    #[must_use]
    pub fn roll(&self) -> [u8; 2] {
        self.roll
    }

    /// Dice not yet played this turn.
    #[must_use]
    pub fn remaining_dice(&self) -> &[u8] {
        &self.moves
    }

    /// Checker counts for `player`, indexed off / points 1-24 / bar.
    #[must_use]
    pub fn track(&self, player: PlayerId) -> &[u8; 26] {
        &self.tracks[player.index()]
    }

    fn split_tracks(&mut self, me: usize) -> (&mut [u8; 26], &mut [u8; 26]) {
        let [a, b] = &mut self.tracks;
        if me == 0 { (a, b) } else { (b, a) }
    }

    /// Dice worth generating moves for: doubles only need the first die.
    fn distinct_dice(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let first = self.moves.first().copied();
        self.moves
            .iter()
            .enumerate()
            .take_while(move |&(i, &m)| i == 0 || Some(m) != first)
            .map(|(i, &m)| (i, usize::from(m)))
    }

    fn legal_moves(&self) -> Vec<Checker> {
        let me = self.turn.player().index();
        let mine = &self.tracks[me];
        let theirs = &self.tracks[1 - me];
        let mut actions = Vec::new();
        let step = |die: usize, from: usize, to: usize| Checker::Move {
            die,
            from: from as u8,
            to: to as u8,
        };

        if mine[BAR] > 0 {
            for (i, m) in self.distinct_dice() {
                if theirs[m] < 2 {
                    actions.push(step(i, BAR, BAR - m));
                }
            }
        } else {
            for (i, m) in self.distinct_dice() {
                for from in (m + 1)..BAR {
                    if mine[from] > 0 && theirs[BAR - (from - m)] < 2 {
                        actions.push(step(i, from, from - m));
                    }
                }
            }

            let highest = (1..BAR).rev().find(|&p| mine[p] > 0);
            if let Some(highest) = highest.filter(|&h| h < 7) {
                for (i, m) in self.distinct_dice() {
                    if mine[m] > 0 {
                        actions.push(step(i, m, OFF));
                    } else if m > highest {
                        actions.push(step(i, highest, OFF));
                    }
                }
            }
        }

        if actions.is_empty() {
            actions.push(Checker::NoPlay);
        }
        actions
    }

    fn end_turn(&mut self) {
        self.turn.advance_turn();
        self.roll = [self.rng.roll_die(6), self.rng.roll_die(6)];
        self.moves = SmallVec::from_slice(&self.roll);
        if self.roll[0] == self.roll[1] {
            self.moves.extend_from_slice(&self.roll);
        }
    }
}

impl fmt::Display for Backgammon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, two] = &self.tracks;
        let point = |f: &mut fmt::Formatter<'_>, p: usize| {
            if one[p] > 0 {
                write!(f, "({})", one[p])
            } else if two[BAR - p] > 0 {
                write!(f, "[{}]", two[BAR - p])
            } else {
                write!(f, " . ")
            }
        };

        write!(f, "|")?;
        for p in 13..BAR {
            point(f, p)?;
            if p == 18 {
                write!(f, "|")?;
            }
        }
        writeln!(f, "|")?;
        if one[BAR] > 0 {
            write!(f, "({})", one[BAR])?;
        }
        if two[BAR] > 0 {
            write!(f, "[{}]", two[BAR])?;
        }
        write!(f, "\n|")?;
        for p in (1..=12).rev() {
            if p == 6 {
                write!(f, "|")?;
            }
            point(f, p)?;
        }
        writeln!(f, "|")?;

        let dice: Vec<String> = self.moves.iter().map(u8::to_string).collect();
        write!(
            f,
            "\n{}-{} ({})\n{}",
            self.roll[0],
            self.roll[1],
            dice.join(","),
            self.turn
        )
    }
}

impl Game for Backgammon {
    type Action = Checker;

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

    fn all_actions(&self) -> Vec<Checker> {
        if self.turn.is_over() {
            return Vec::new();
        }
        self.legal_moves()
    }

    fn apply(&mut self, action: &Checker) {
        let Checker::Move { die, from, to } = *action else {
            self.end_turn();
            return;
        };

        let player = self.turn.player();
        let (mine, theirs) = self.split_tracks(player.index());
        let (from, to) = (usize::from(from), usize::from(to));

        mine[from] -= 1;
        if to != OFF && theirs[BAR - to] > 0 {
            theirs[BAR - to] -= 1;
            theirs[BAR] += 1;
        }
        mine[to] += 1;
        let all_off = mine[1..=BAR].iter().all(|&n| n == 0);

        self.moves.remove(die);

        if all_off {
            self.turn.finish(GameResult::Winner(player));
        } else if self.moves.is_empty() {
            self.end_turn();
        }
    }

    fn is_nondeterministic(&self) -> bool {
        true
    }

    fn clone_with_rng(&self, rng: GameRng) -> Result<Self, MctsError> {
        let mut game = self.clone();
        game.rng = rng;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkers_on_board(game: &Backgammon, player: PlayerId) -> u32 {
        game.track(player)[1..].iter().map(|&n| u32::from(n)).sum()
    }

    #[test]
    fn test_initial_position() {
        let game = Backgammon::with_seed(7);
        for player in PlayerId::all(2) {
            assert_eq!(checkers_on_board(&game, player), 15);
            assert_eq!(game.track(player)[6], 5);
            assert_eq!(game.track(player)[24], 2);
        }
        assert_eq!(game.current_player(), PlayerId::new(1));
        assert_eq!(game.remaining_dice(), &game.roll());
    }

    #[test]
    fn test_opening_roll_never_doubles() {
        for seed in 0..200 {
            let [a, b] = Backgammon::with_seed(seed).roll();
            assert_ne!(a, b);
            assert!((1..=6).contains(&a) && (1..=6).contains(&b));
        }
    }

    #[test]
    fn test_higher_roll_start_rule() {
        for seed in 0..50 {
            let game = Backgammon::with_start_rule(GameRng::new(seed), StartRule::HigherRoll);
            let [a, b] = game.roll();
            let expected = if a > b { 1 } else { 2 };
            assert_eq!(game.current_player(), PlayerId::new(expected));
        }
    }

    #[test]
    fn test_always_offers_an_action() {
        let mut game = Backgammon::with_seed(11);
        for _ in 0..100_000 {
            if game.is_terminal() {
                break;
            }
            let actions = game.all_actions();
            assert!(!actions.is_empty());
            let total = checkers_on_board(&game, PlayerId::new(1))
                + u32::from(game.track(PlayerId::new(1))[OFF]);
            assert_eq!(total, 15);
            game.apply(&actions[0]);
        }
        assert!(matches!(game.outcome(), Some(GameResult::Winner(_))));
    }

    #[test]
    fn test_doubles_do_not_duplicate_actions() {
        let mut game = Backgammon::with_seed(1);
        game.moves = SmallVec::from_slice(&[3, 3, 3, 3]);
        let actions = game.all_actions();
        assert!(actions
            .iter()
            .all(|a| matches!(a, Checker::Move { die: 0, .. })));
    }

    #[test]
    fn test_bar_must_be_entered_first() {
        let mut game = Backgammon::with_seed(1);
        game.tracks[0][BAR] = 1;
        game.tracks[0][24] -= 1;
        game.moves = SmallVec::from_slice(&[1, 6]);
        // Opponent holds its 6-point, which is our 19-point entry for a 6.
        let actions = game.all_actions();
        assert_eq!(
            actions,
            vec![Checker::Move { die: 0, from: 25, to: 24 }]
        );
    }

    #[test]
    fn test_blocked_entry_is_no_play() {
        let mut game = Backgammon::with_seed(1);
        game.tracks[0][BAR] = 1;
        game.tracks[0][24] -= 1;
        game.moves = SmallVec::from_slice(&[6, 6, 6, 6]);
        assert_eq!(game.all_actions(), vec![Checker::NoPlay]);

        game.apply(&Checker::NoPlay);
        assert_eq!(game.current_player(), PlayerId::new(2));
        assert_eq!(game.current_turn(), 2);
    }

    #[test]
    fn test_hit_sends_checker_to_bar() {
        let mut game = Backgammon::with_seed(1);
        // Opponent blot on its 20-point, our 5-point.
        game.tracks[1][20] = 1;
        game.tracks[1][24] -= 1;
        game.moves = SmallVec::from_slice(&[1, 2]);

        game.apply(&Checker::Move { die: 0, from: 6, to: 5 });

        assert_eq!(game.tracks[1][20], 0);
        assert_eq!(game.tracks[1][BAR], 1);
        assert_eq!(game.tracks[0][5], 1);
        assert_eq!(game.remaining_dice(), &[2]);
        assert_eq!(game.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_bear_off_from_highest_point() {
        let mut game = Backgammon::with_seed(1);
        game.tracks[0] = [0; 26];
        game.tracks[0][3] = 1;
        game.moves = SmallVec::from_slice(&[5, 1]);

        let actions = game.all_actions();
        assert!(actions.contains(&Checker::Move { die: 0, from: 3, to: 0 }));
        assert!(actions.contains(&Checker::Move { die: 1, from: 3, to: 2 }));

        game.apply(&Checker::Move { die: 0, from: 3, to: 0 });
        assert_eq!(game.track(PlayerId::new(1))[OFF], 1);
        assert_eq!(game.outcome(), Some(GameResult::Winner(PlayerId::new(1))));
    }

    #[test]
    fn test_bear_off_counts_borne_off_checkers() {
        let mut game = Backgammon::with_seed(1);
        game.tracks[0] = [0; 26];
        game.tracks[0][3] = 2;
        game.moves = SmallVec::from_slice(&[3, 1]);

        game.apply(&Checker::Move { die: 0, from: 3, to: 0 });

        let track = game.track(PlayerId::new(1));
        assert_eq!(track[OFF], 1);
        assert_eq!(track[3], 1);
        assert!(!game.is_terminal());
        assert_eq!(game.remaining_dice(), &[1]);
    }

    #[test]
    fn test_clone_with_rng_fixes_the_dice() {
        let game = Backgammon::with_seed(5);
        let rolls = |mut g: Backgammon| {
            let mut seen = Vec::new();
            for _ in 0..30 {
                if g.is_terminal() {
                    break;
                }
                let action = g.all_actions()[0];
                g.apply(&action);
                seen.push(g.roll());
            }
            seen
        };

        let a = game.clone_with_rng(GameRng::new(99)).unwrap();
        let b = game.clone_with_rng(GameRng::new(99)).unwrap();
        let c = game.clone_with_rng(GameRng::new(100)).unwrap();
        assert_eq!(rolls(a.clone()), rolls(b));
        assert_ne!(rolls(a), rolls(c));
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Checker::NoPlay.to_string(), "NO PLAY");
        assert_eq!(Checker::Move { die: 0, from: 25, to: 20 }.to_string(), "BAR->20");
        assert_eq!(Checker::Move { die: 1, from: 4, to: 0 }.to_string(), "4->OFF");
    }
}
