use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::fs;
use std::sync::Arc;

use crate::data::{Bound, Pos};
use crate::map::Map;
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::LoadLevel;

/// A level as supplied by a level source: the map plus the initial state.
#[derive(Clone, PartialEq, Eq)]
pub struct Level {
    state: State,
}

impl Level {
    /// Assumes the data is consistent - the player and crates are not on obstacles,
    /// crates are distinct and there are as many crates as targets.
    pub fn new<C, O, T>(player_pos: Pos, crates: C, obstacles: O, targets: T, bound: Bound) -> Self
    where
        C: IntoIterator<Item = Pos>,
        O: IntoIterator<Item = Pos>,
        T: IntoIterator<Item = Pos>,
    {
        let map = Arc::new(Map::new(bound, obstacles, targets));
        let state = State::new(map, player_pos, crates.into_iter().collect());
        Level { state }
    }

    pub fn map(&self) -> &Map {
        self.state.map()
    }

    pub fn initial_state(&self) -> State {
        self.state.clone()
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.state.xsb()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}

impl LoadLevel for str {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = fs::read_to_string(self)?;
        Ok(level.parse()?)
    }
}
