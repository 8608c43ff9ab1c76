use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Pos;
use crate::map::{Map, MapCell};
use crate::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contents {
    Empty,
    Crate,
    Player,
}

/// XSB rendering of a map, optionally with a state on top of it.
pub struct MapFormatter<'a> {
    map: &'a Map,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a Map, state: Option<&'a State>) -> Self {
        Self { map, state }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let grid = self.map.grid();
        let mut state_grid = grid.scratchpad(Contents::Empty);
        if let Some(state) = self.state {
            for &c in state.crates() {
                state_grid[c] = Contents::Crate;
            }
            state_grid[state.player_pos()] = Contents::Player;
        }

        let bound = self.map.bound();
        for r in 0..bound.rows {
            // don't print trailing empty cells to match the input level strings
            let last_non_empty = (0..bound.cols).rev().find(|&c| {
                let pos = Pos::new(r, c);
                grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty
            });

            if let Some(last) = last_non_empty {
                for c in 0..=last {
                    let pos = Pos::new(r, c);
                    Self::write_cell_xsb(grid[pos], state_grid[pos], f)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_xsb(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Crate) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            // contract violation, still better to show it than to panic while printing
            (MapCell::Wall, Contents::Crate) => write!(f, "X"),
            (MapCell::Wall, _) => write!(f, "#"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Crate) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
