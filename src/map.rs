use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Bound, Pos};
use crate::map_formatter::MapFormatter;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Wall,
    Goal,
}

/// The parts of a level that never change during solving.
///
/// Shared by all states derived from one initial state.
#[derive(Clone, PartialEq, Eq)]
pub struct Map {
    grid: Vec2d<MapCell>,
    obstacles: Vec<Pos>,
    targets: Vec<Pos>,
}

impl Map {
    pub fn new<O, T>(bound: Bound, obstacles: O, targets: T) -> Self
    where
        O: IntoIterator<Item = Pos>,
        T: IntoIterator<Item = Pos>,
    {
        let mut grid = Vec2d::new(bound, MapCell::Empty);

        let mut obstacles: Vec<_> = obstacles.into_iter().filter(|&p| bound.contains(p)).collect();
        obstacles.sort();
        obstacles.dedup();
        for &pos in &obstacles {
            grid[pos] = MapCell::Wall;
        }

        // sorted so solved states can be detected by comparing with the (also sorted) crates
        let mut targets: Vec<_> = targets.into_iter().collect();
        targets.sort();
        targets.dedup();
        for &pos in &targets {
            if let Some(&MapCell::Empty) = grid.get(pos) {
                grid[pos] = MapCell::Goal;
            }
        }

        Map {
            grid,
            obstacles,
            targets,
        }
    }

    pub fn bound(&self) -> Bound {
        self.grid.bound()
    }

    pub fn obstacles(&self) -> &[Pos] {
        &self.obstacles
    }

    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub(crate) fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    /// Anything outside the bound counts as a wall
    /// so fields which are not fully enclosed are handled too.
    pub fn is_wall(&self, pos: Pos) -> bool {
        match self.grid.get(pos) {
            Some(&cell) => cell == MapCell::Wall,
            None => true,
        }
    }

    pub fn is_target(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Goal)
    }

    /// All in-bounds cells which are not obstacles
    pub fn free_squares(&self) -> impl Iterator<Item = Pos> + '_ {
        self.grid.positions().filter(move |&pos| !self.is_wall(pos))
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(self, None)
    }
}

impl Display for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Map {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}
