mod backtracking;
mod cancel;
mod deadlock;
mod heuristic;
mod node;
mod stats;

use std::collections::{BinaryHeap, VecDeque};
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;
use log::debug;
use typed_arena::Arena;

use crate::config::{Method, Weights};
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;
use crate::Solve;

use self::backtracking::backtrack_path;
use self::heuristic::{greedy_cost, hybrid_cost};
use self::node::{Candidate, SearchNode};

pub use self::cancel::CancelToken;
pub use self::deadlock::DeadlockDetector;
pub use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    TimedOut,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::TimedOut => write!(f, "Search cancelled or timed out"),
        }
    }
}

impl Error for SolverErr {}

/// Path from the initial state to a solved one.
///
/// `states` has exactly one more element than `moves`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub states: Vec<State>,
    pub moves: Moves,
}

pub struct SolverOk {
    pub solution: Option<Solution>,
    pub stats: Stats,
    pub method: Method,
}

impl SolverOk {
    fn new(solution: Option<Solution>, stats: Stats, method: Method) -> Self {
        Self {
            solution,
            stats,
            method,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.solution {
            None => writeln!(f, "No solution")?,
            Some(ref solution) => writeln!(f, "{}: {}", self.method, solution.moves.push_cnt())?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, method: Method, cancel: &CancelToken) -> Result<SolverOk, SolverErr> {
        Solver::new(self).search(method, cancel)
    }
}

/// When the best-first searches drop deadlocked states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pruning {
    /// Insert every unvisited child, skip deadlocks when they come out of the heap
    OnPop,
    /// Never insert deadlocked children at all
    BeforeInsert,
}

/// Per-level search context.
///
/// Immutable during a search so independent runs can share one
/// or each thread can build its own.
#[derive(Debug, Clone)]
pub struct Solver {
    initial: State,
    deadlocks: DeadlockDetector,
    weights: Weights,
    /// Scales the crate terms of the hybrid cost
    df: i64,
}

impl Solver {
    pub fn new(level: &Level) -> Self {
        debug!("Preprocessing level...");
        let initial = level.initial_state();
        let deadlocks = DeadlockDetector::new(initial.shared_map());
        let df = i64::from(level.map().bound().max_dim());
        debug!("Preprocessed level");
        Solver {
            initial,
            deadlocks,
            weights: Weights::default(),
            df,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn deadlocks(&self) -> &DeadlockDetector {
        &self.deadlocks
    }

    pub fn search(&self, method: Method, cancel: &CancelToken) -> Result<SolverOk, SolverErr> {
        debug!("Search called with {}", method);
        match method {
            Method::Bfs => self.bfs(cancel),
            Method::HillClimbing => self.hill_climbing(cancel),
            Method::HybridHeuristic => self.hybrid_heuristic(cancel),
        }
    }

    /// Finds a solution with the fewest pushes. Doesn't prune deadlocks.
    pub fn bfs(&self, cancel: &CancelToken) -> Result<SolverOk, SolverErr> {
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut visited: FnvHashSet<&State> = FnvHashSet::default();
        let mut to_visit = VecDeque::new();

        let start: &SearchNode<'_> = arena.alloc(SearchNode::root(self.initial.clone()));
        stats.add_created(start.dist);
        // mark when enqueued so each state is in the queue at most once
        visited.insert(&start.state);
        to_visit.push_back(start);

        while let Some(cur_node) = to_visit.pop_front() {
            cancel.check()?;

            if stats.add_unique_visited(cur_node.dist) {
                debug!("Visited new depth: {}", cur_node.dist);
            }

            if cur_node.state.is_solved() {
                debug!("Solved, backtracking path");
                return Ok(SolverOk::new(
                    Some(backtrack_path(cur_node)),
                    stats,
                    Method::Bfs,
                ));
            }

            for (mov, state) in cur_node.state.successors() {
                if visited.contains(&state) {
                    stats.add_reached_duplicate(cur_node.dist + 1);
                    continue;
                }
                let next_node: &SearchNode<'_> = arena.alloc(cur_node.child(mov, state));
                stats.add_created(next_node.dist);
                visited.insert(&next_node.state);
                to_visit.push_back(next_node);
            }
        }

        Ok(SolverOk::new(None, stats, Method::Bfs))
    }

    /// Greedy best-first search on `greedy_cost`
    pub fn hill_climbing(&self, cancel: &CancelToken) -> Result<SolverOk, SolverErr> {
        let weights = self.weights;
        self.best_first(Method::HillClimbing, Pruning::OnPop, cancel, |state| {
            greedy_cost(state, &weights)
        })
    }

    /// Best-first search on `hybrid_cost`
    pub fn hybrid_heuristic(&self, cancel: &CancelToken) -> Result<SolverOk, SolverErr> {
        let df = self.df;
        self.best_first(
            Method::HybridHeuristic,
            Pruning::BeforeInsert,
            cancel,
            |state| hybrid_cost(state, df),
        )
    }

    fn best_first<Cost>(
        &self,
        method: Method,
        pruning: Pruning,
        cancel: &CancelToken,
        cost: Cost,
    ) -> Result<SolverOk, SolverErr>
    where
        Cost: Fn(&State) -> i64,
    {
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut visited: FnvHashSet<&State> = FnvHashSet::default();
        let mut to_visit = BinaryHeap::new();
        let mut counter = 0;

        let start: &SearchNode<'_> = arena.alloc(SearchNode::root(self.initial.clone()));
        stats.add_created(start.dist);
        to_visit.push(Candidate {
            node: start,
            cost: cost(&start.state),
            counter,
        });

        while let Some(Candidate { node: cur_node, .. }) = to_visit.pop() {
            cancel.check()?;

            if visited.contains(&cur_node.state) {
                stats.add_reached_duplicate(cur_node.dist);
                continue;
            }
            if pruning == Pruning::OnPop && self.deadlocks.is_deadlock(&cur_node.state) {
                stats.add_deadlock(cur_node.dist);
                continue;
            }

            // insert here and not as soon as we discover it
            visited.insert(&cur_node.state);
            if stats.add_unique_visited(cur_node.dist) {
                debug!("Visited new depth: {}", cur_node.dist);
            }

            if cur_node.state.is_solved() {
                debug!("Solved, backtracking path");
                return Ok(SolverOk::new(Some(backtrack_path(cur_node)), stats, method));
            }

            for (mov, state) in cur_node.state.successors() {
                let dist = cur_node.dist + 1;
                if visited.contains(&state) {
                    stats.add_reached_duplicate(dist);
                    continue;
                }
                if pruning == Pruning::BeforeInsert && self.deadlocks.is_deadlock(&state) {
                    stats.add_deadlock(dist);
                    continue;
                }

                counter += 1;
                let next_node: &SearchNode<'_> = arena.alloc(cur_node.child(mov, state));
                stats.add_created(next_node.dist);
                to_visit.push(Candidate {
                    node: next_node,
                    cost: cost(&next_node.state),
                    counter,
                });
            }
        }

        Ok(SolverOk::new(None, stats, method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use fnv::FnvHashMap;

    use crate::config::METHODS;
    use crate::data::{Bound, Pos};
    use crate::moves::Move;

    fn solve_all(level: &Level) -> Vec<SolverOk> {
        METHODS
            .iter()
            .map(|&method| level.solve(method, &CancelToken::new()).unwrap())
            .collect()
    }

    fn two_crates() -> Level {
        r"
#######
#     #
# $$  #
#  @  #
# ..  #
#######
"
        .parse()
        .unwrap()
    }

    #[test]
    fn open_room() {
        let level = Level::new(
            Pos::new(0, 0),
            vec![Pos::new(1, 1)],
            vec![],
            vec![Pos::new(2, 1)],
            Bound::new(3, 3),
        );
        let expected = Move {
            player_pos: Pos::new(0, 1),
            crate_from: Pos::new(1, 1),
            crate_to: Pos::new(2, 1),
        };
        for result in solve_all(&level) {
            let solution = result.solution.unwrap();
            assert_eq!(solution.moves.iter().cloned().collect::<Vec<_>>(), vec![expected]);
            assert_eq!(solution.states.len(), 2);
            assert!(solution.states[1].is_solved());
        }
    }

    #[test]
    fn one_way() {
        let level: Level = r"
###
#.#
# #
# #
#$#
#@#
###
"
        .parse()
        .unwrap();
        for result in solve_all(&level) {
            let solution = result.solution.unwrap();
            assert_eq!(solution.moves.to_string(), "UUU");
        }
    }

    #[test]
    fn bfs_is_push_optimal() {
        let level = two_crates();
        let cancel = CancelToken::new();
        let bfs = level.solve(Method::Bfs, &cancel).unwrap().solution.unwrap();
        assert_eq!(bfs.moves.push_cnt(), 4);
        for &method in &[Method::HillClimbing, Method::HybridHeuristic] {
            let other = level.solve(method, &cancel).unwrap().solution.unwrap();
            assert!(bfs.moves.push_cnt() <= other.moves.push_cnt());
            assert!(other.states.last().unwrap().is_solved());
        }
    }

    #[test]
    fn solution_path_is_consistent() {
        let level = two_crates();
        for result in solve_all(&level) {
            let solution = result.solution.unwrap();
            assert_eq!(solution.states.len(), solution.moves.push_cnt() + 1);
            assert_eq!(solution.states[0], level.initial_state());
            for (i, mov) in solution.moves.iter().enumerate() {
                assert!(solution.states[i].legal_moves().contains(mov));
                assert_eq!(solution.states[i].apply(*mov), solution.states[i + 1]);
            }
        }
    }

    #[test]
    fn deadlock_detection_is_sound() {
        let level = two_crates();
        let solver = Solver::new(&level);
        let solution = solver
            .bfs(&CancelToken::new())
            .unwrap()
            .solution
            .unwrap();
        for state in &solution.states {
            assert!(!solver.deadlocks().is_deadlock(state));
        }
    }

    /// Every state reachable from the start and the indices of its successors
    fn state_space(level: &Level) -> (Vec<State>, Vec<Vec<usize>>) {
        let mut states = vec![level.initial_state()];
        let mut indices = FnvHashMap::default();
        indices.insert(states[0].clone(), 0);

        let mut edges = Vec::new();
        let mut cur = 0;
        while cur < states.len() {
            let mut next_indices = Vec::new();
            for (_, next) in states[cur].successors() {
                let len = states.len();
                let index = *indices.entry(next.clone()).or_insert(len);
                if index == len {
                    states.push(next);
                }
                next_indices.push(index);
            }
            edges.push(next_indices);
            cur += 1;
        }
        (states, edges)
    }

    #[test]
    fn no_solvable_state_is_deadlocked() {
        let levels: Vec<Level> = vec![
            two_crates(),
            r"
########
#   .  #
# $$ # #
#  @ $ #
# ..   #
########
"
            .parse()
            .unwrap(),
            r"
######
#. . #
# $$ #
#@ $.#
######
"
            .parse()
            .unwrap(),
        ];

        let mut deadlocked_cnt = 0;
        for level in &levels {
            let solver = Solver::new(level);
            let (states, edges) = state_space(level);

            // solvable = solved or has a solvable successor
            let mut solvable: Vec<bool> = states.iter().map(State::is_solved).collect();
            let mut changed = true;
            while changed {
                changed = false;
                for i in 0..states.len() {
                    if !solvable[i] && edges[i].iter().any(|&next| solvable[next]) {
                        solvable[i] = true;
                        changed = true;
                    }
                }
            }
            assert!(solvable[0]);

            for (state, &solvable) in states.iter().zip(&solvable) {
                let deadlocked = solver.deadlocks().is_deadlock(state);
                assert!(!(solvable && deadlocked), "solvable state reported:\n{}", state.xsb());
                if deadlocked {
                    deadlocked_cnt += 1;
                }
            }
        }
        assert!(deadlocked_cnt > 0);
    }

    #[test]
    fn no_solution() {
        let level: Level = r"
#####
#$  #
# @.#
#####
"
        .parse()
        .unwrap();
        for result in solve_all(&level) {
            assert!(result.solution.is_none());
            assert!(format!("{:?}", result).starts_with("No solution\n"));
        }
    }

    #[test]
    fn already_solved() {
        let level: Level = r"
#####
#@* #
#####
"
        .parse()
        .unwrap();
        for result in solve_all(&level) {
            let solution = result.solution.unwrap();
            assert_eq!(solution.states, vec![level.initial_state()]);
            assert!(solution.moves.is_empty());
            assert_eq!(result.stats.total_unique_visited(), 1);
        }
    }

    #[test]
    fn pruning_stats() {
        let level = two_crates();
        let cancel = CancelToken::new();
        let bfs = level.solve(Method::Bfs, &cancel).unwrap();
        assert_eq!(bfs.stats.total_deadlocks(), 0);
        let hybrid = level.solve(Method::HybridHeuristic, &cancel).unwrap();
        assert!(hybrid.stats.total_created() >= hybrid.stats.total_unique_visited());
        assert!(format!("{:?}", hybrid).starts_with("hybrid-heuristic: "));
    }

    #[test]
    fn custom_weights() {
        let level = two_crates();
        let weights = Weights {
            player_distance: 0,
            ..Weights::default()
        };
        let solver = Solver::new(&level).with_weights(weights);
        let solution = solver
            .hill_climbing(&CancelToken::new())
            .unwrap()
            .solution
            .unwrap();
        assert!(solution.moves.push_cnt() >= 4);
        assert!(solution.states.last().unwrap().is_solved());
    }

    #[test]
    fn cancelled() {
        let level = two_crates();
        let cancel = CancelToken::new();
        cancel.cancel();
        for &method in &METHODS {
            assert_eq!(level.solve(method, &cancel).unwrap_err(), SolverErr::TimedOut);
        }
    }

    #[test]
    fn independent_runs() {
        let handles: Vec<_> = METHODS
            .iter()
            .map(|&method| {
                let level = two_crates();
                thread::spawn(move || {
                    level
                        .solve(method, &CancelToken::new())
                        .unwrap()
                        .solution
                        .map(|solution| solution.moves.push_cnt())
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap() >= 4);
        }
    }
}
