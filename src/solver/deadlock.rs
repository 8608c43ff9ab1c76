use std::collections::VecDeque;
use std::sync::Arc;

use fnv::FnvHashSet;
use log::debug;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Map;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Detects states from which the level can't be solved anymore.
///
/// Sound but not complete: it never reports a solvable state
/// but it misses some deadlocks.
#[derive(Debug, Clone)]
pub struct DeadlockDetector {
    map: Arc<Map>,
    free_squares: Vec2d<bool>,
    dead_squares: Vec2d<bool>,
}

impl DeadlockDetector {
    pub fn new(map: &Arc<Map>) -> Self {
        let mut free_squares = map.grid().scratchpad(false);
        for pos in map.free_squares() {
            free_squares[pos] = true;
        }

        // pull a crate away from every target at once,
        // whatever is never reached can't be pushed onto any target
        let mut box_reachable = map.grid().scratchpad(false);
        let mut to_visit = VecDeque::new();
        for &target in map.targets() {
            if map.is_wall(target) || box_reachable[target] {
                continue;
            }
            box_reachable[target] = true;
            to_visit.push_back(target);
        }

        while let Some(cur) = to_visit.pop_front() {
            for &dir in &DIRECTIONS {
                let prev_crate_pos = cur - dir;
                let prev_player_pos = prev_crate_pos - dir;
                if !map.is_wall(prev_crate_pos)
                    && !map.is_wall(prev_player_pos)
                    && !box_reachable[prev_crate_pos]
                {
                    box_reachable[prev_crate_pos] = true;
                    to_visit.push_back(prev_crate_pos);
                }
            }
        }

        let mut dead_squares = map.grid().scratchpad(false);
        for pos in map.free_squares() {
            dead_squares[pos] = !box_reachable[pos];
        }

        let detector = DeadlockDetector {
            map: Arc::clone(map),
            free_squares,
            dead_squares,
        };
        debug!("Dead squares:\n{}", detector.dead_squares);
        detector
    }

    pub fn is_free_square(&self, pos: Pos) -> bool {
        self.free_squares.get(pos) == Some(&true)
    }

    pub fn is_dead_square(&self, pos: Pos) -> bool {
        self.dead_squares.get(pos) == Some(&true)
    }

    pub fn dead_squares(&self) -> impl Iterator<Item = Pos> + '_ {
        self.dead_squares
            .positions()
            .filter(move |&pos| self.dead_squares[pos])
    }

    /// Any crate which is not on a target and either sits on a dead square or is frozen.
    pub fn is_deadlock(&self, state: &State) -> bool {
        debug_assert!(Arc::ptr_eq(&self.map, state.shared_map()) || *self.map == *state.map());

        // the cheap static check first for all crates
        if state.crates_off_target().any(|pos| self.is_dead_square(pos)) {
            return true;
        }
        state
            .crates_off_target()
            .any(|pos| self.is_frozen(state, pos, &mut FnvHashSet::default()))
    }

    /// A crate is frozen if it can't be pushed along either axis.
    ///
    /// Crates already in `visited` are treated as blocking,
    /// that breaks cycles between crates blocking each other.
    pub fn is_frozen(&self, state: &State, crate_pos: Pos, visited: &mut FnvHashSet<Pos>) -> bool {
        if !visited.insert(crate_pos) {
            return true;
        }

        self.blocked_along(state, crate_pos, Dir::Left, visited)
            && self.blocked_along(state, crate_pos, Dir::Up, visited)
    }

    fn blocked_along(
        &self,
        state: &State,
        crate_pos: Pos,
        dir: Dir,
        visited: &mut FnvHashSet<Pos>,
    ) -> bool {
        let (a, b) = (crate_pos + dir, crate_pos - dir);

        if self.map.is_wall(a) || self.map.is_wall(b) {
            return true;
        }
        if self.is_dead_square(a) && self.is_dead_square(b) {
            return true;
        }
        (state.has_crate(a) && self.is_frozen(state, a, visited))
            || (state.has_crate(b) && self.is_frozen(state, b, visited))
    }
}
