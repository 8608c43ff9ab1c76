use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Bfs,
    HillClimbing,
    HybridHeuristic,
}

pub const METHODS: [Method; 3] = [Method::Bfs, Method::HillClimbing, Method::HybridHeuristic];

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::Bfs => write!(f, "bfs"),
            Method::HillClimbing => write!(f, "hill-climbing"),
            Method::HybridHeuristic => write!(f, "hybrid-heuristic"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METHODS
            .iter()
            .cloned()
            .find(|method| method.to_string() == s)
            .ok_or_else(|| format!("Unknown method: {}", s))
    }
}

/// Coefficients of the hill-climbing cost.
///
/// Everything is an integer so the player distance (a tie-breaker)
/// is kept small relative to the crate terms by scaling those up instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights {
    /// Per unit of Manhattan distance between an unplaced crate and its nearest target
    pub distance: i64,
    pub unplaced_penalty: i64,
    pub placed_bonus: i64,
    /// Per unit of distance between the player and the nearest crate
    pub player_distance: i64,
    /// Cost of a solved state, must be lower than anything else
    pub solved: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            distance: 10,
            unplaced_penalty: 20,
            placed_bonus: 20,
            player_distance: 1,
            solved: -1_000_000_000,
        }
    }
}
