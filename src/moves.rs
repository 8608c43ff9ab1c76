use std::fmt::{self, Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::data::{Dir, Pos};

/// A single push.
///
/// The player has to stand on `player_pos` which is next to `crate_from`,
/// the crate then slides to `crate_to` and the player ends up on `crate_from`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Pos, Pos, Pos)", into = "(Pos, Pos, Pos)")]
pub struct Move {
    pub player_pos: Pos,
    pub crate_from: Pos,
    pub crate_to: Pos,
}

impl Move {
    pub fn new(crate_pos: Pos, dir: Dir) -> Self {
        Move {
            player_pos: crate_pos - dir,
            crate_from: crate_pos,
            crate_to: crate_pos + dir,
        }
    }

    /// `None` if the triple doesn't describe a push by one cell
    pub fn dir(&self) -> Option<Dir> {
        let dir = self.crate_from.dir_to(self.crate_to)?;
        if self.player_pos + dir == self.crate_from {
            Some(dir)
        } else {
            None
        }
    }
}

impl From<(Pos, Pos, Pos)> for Move {
    fn from((player_pos, crate_from, crate_to): (Pos, Pos, Pos)) -> Self {
        Move {
            player_pos,
            crate_from,
            crate_to,
        }
    }
}

impl From<Move> for (Pos, Pos, Pos) {
    fn from(mov: Move) -> Self {
        (mov.player_pos, mov.crate_from, mov.crate_to)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.dir() {
            Some(dir) => write!(f, "{}", dir.to_string().to_uppercase()),
            None => write!(f, "?"),
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} (player {})",
            self, self.crate_from, self.crate_to, self.player_pos
        )
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn push_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_geometry() {
        let mov = Move::new(Pos::new(1, 1), Dir::Down);
        assert_eq!(mov.player_pos, Pos::new(0, 1));
        assert_eq!(mov.crate_to, Pos::new(2, 1));
        assert_eq!(mov.dir(), Some(Dir::Down));

        let bogus = Move::from((Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 1)));
        assert_eq!(bogus.dir(), None);
        assert_eq!(bogus.to_string(), "?");
    }

    #[test]
    fn formatting_moves() {
        let crate_pos = Pos::new(5, 5);
        let moves = Moves::new(vec![
            Move::new(crate_pos, Dir::Up),
            Move::new(crate_pos, Dir::Right),
            Move::new(crate_pos, Dir::Down),
            Move::new(crate_pos, Dir::Left),
        ]);
        assert_eq!(moves.to_string(), "URDL");
        assert_eq!(moves.push_cnt(), 4);
        assert!(!moves.is_empty());
        assert!(Moves::default().is_empty());
    }

    #[test]
    fn serialized_as_tuples() {
        let moves = Moves::new(vec![Move::new(Pos::new(1, 1), Dir::Down)]);
        let json = serde_json::to_string(&moves).unwrap();
        assert_eq!(json, "[[[0,1],[1,1],[2,1]]]");
        let back: Moves = serde_json::from_str(&json).unwrap();
        assert_eq!(back, moves);
    }
}
