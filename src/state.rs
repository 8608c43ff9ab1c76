use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::data::{Pos, DIRECTIONS};
use crate::map::Map;
use crate::map_formatter::MapFormatter;
use crate::moves::Move;
use crate::vec2d::Vec2d;

/// One board configuration.
///
/// Immutable once created, every push produces a new `State`.
/// The map (obstacles and targets) is shared between all states of a level.
#[derive(Clone)]
pub struct State {
    map: Arc<Map>,
    player_pos: Pos,
    crates: Vec<Pos>,
}

impl State {
    pub fn new(map: Arc<Map>, player_pos: Pos, mut crates: Vec<Pos>) -> State {
        // sort to detect equal states when crates are reordered
        crates.sort();
        debug_assert!(
            crates.windows(2).all(|w| w[0] != w[1]),
            "crates must be pairwise distinct"
        );
        State {
            map,
            player_pos,
            crates,
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub(crate) fn shared_map(&self) -> &Arc<Map> {
        &self.map
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    /// Sorted
    pub fn crates(&self) -> &[Pos] {
        &self.crates
    }

    pub fn has_crate(&self, pos: Pos) -> bool {
        self.crates.binary_search(&pos).is_ok()
    }

    pub fn crates_on_target(&self) -> usize {
        self.crates
            .iter()
            .filter(|&&pos| self.map.is_target(pos))
            .count()
    }

    pub fn crates_off_target(&self) -> impl Iterator<Item = Pos> + '_ {
        self.crates
            .iter()
            .cloned()
            .filter(move |&pos| !self.map.is_target(pos))
    }

    /// Every crate is on a target and every target has a crate
    pub fn is_solved(&self) -> bool {
        self.crates[..] == *self.map.targets()
    }

    /// Cells the player can walk to without pushing anything
    pub(crate) fn reachable(&self) -> Vec2d<bool> {
        let mut reachable = self.map.grid().scratchpad(false);
        if !self.walkable(self.player_pos) {
            return reachable;
        }
        reachable[self.player_pos] = true;

        let mut to_visit = VecDeque::new();
        to_visit.push_back(self.player_pos);
        while let Some(cur) = to_visit.pop_front() {
            for &next in &cur.neighbors() {
                if self.walkable(next) && !reachable[next] {
                    reachable[next] = true;
                    to_visit.push_back(next);
                }
            }
        }

        reachable
    }

    fn walkable(&self, pos: Pos) -> bool {
        !self.map.is_wall(pos) && !self.has_crate(pos)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let reachable = self.reachable();

        let mut moves = Vec::new();
        for &crate_pos in &self.crates {
            for &dir in &DIRECTIONS {
                let mov = Move::new(crate_pos, dir);
                if reachable.get(mov.player_pos) == Some(&true)
                    && !self.map.is_wall(mov.crate_to)
                    && !self.has_crate(mov.crate_to)
                {
                    moves.push(mov);
                }
            }
        }
        moves
    }

    /// Doesn't check legality, use `legal_moves` for that
    pub fn apply(&self, mov: Move) -> State {
        let crates = self
            .crates
            .iter()
            .map(|&pos| if pos == mov.crate_from { mov.crate_to } else { pos })
            .collect();
        State::new(Arc::clone(&self.map), mov.crate_from, crates)
    }

    /// Inverse of `apply` - the player ends up where it stood before pushing.
    pub fn undo(&self, mov: Move) -> State {
        let crates = self
            .crates
            .iter()
            .map(|&pos| if pos == mov.crate_to { mov.crate_from } else { pos })
            .collect();
        State::new(Arc::clone(&self.map), mov.player_pos, crates)
    }

    pub fn successors(&self) -> Vec<(Move, State)> {
        self.legal_moves()
            .into_iter()
            .map(|mov| (mov, self.apply(mov)))
            .collect()
    }

    pub(crate) fn with_player(&self, player_pos: Pos) -> State {
        State {
            map: Arc::clone(&self.map),
            player_pos,
            crates: self.crates.clone(),
        }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.map, Some(self))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.player_pos == other.player_pos
            && self.crates == other.crates
            && (Arc::ptr_eq(&self.map, &other.map) || self.map == other.map)
    }
}

impl Eq for State {}

impl Hash for State {
    // the map is the same for all states in a search so leave it out
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.player_pos.hash(state);
        self.crates.hash(state);
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "player: {}, crates: {:?}", self.player_pos, self.crates)
    }
}
