use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Pos;
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;

// Terminology:
// push = a move that changes a crate position
// step = the player walking one cell without pushing anything

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayErr {
    /// Index of the first push that can't be done
    IllegalMove(usize),
}

impl Display for ReplayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ReplayErr::IllegalMove(index) => write!(f, "Illegal push at index {}", index),
        }
    }
}

impl Error for ReplayErr {}

impl Level {
    /// Applies the pushes one by one and returns every state on the way,
    /// starting with the initial one.
    pub fn replay(&self, moves: &Moves) -> Result<Vec<State>, ReplayErr> {
        let mut states = vec![self.initial_state()];
        for (i, &mov) in moves.iter().enumerate() {
            let next = {
                let last = &states[states.len() - 1];
                if !last.legal_moves().contains(&mov) {
                    return Err(ReplayErr::IllegalMove(i));
                }
                last.apply(mov)
            };
            states.push(next);
        }
        Ok(states)
    }

    /// Full solution in LURD notation - lower case steps, upper case pushes
    pub fn lurd(&self, moves: &Moves) -> Result<String, ReplayErr> {
        let mut ret = String::new();
        for (i, (before, mov)) in self.replay(moves)?.iter().zip(moves).enumerate() {
            let path = player_path(before, mov.player_pos).ok_or(ReplayErr::IllegalMove(i))?;
            let mut cur = before.player_pos();
            for next in path {
                if let Some(dir) = cur.dir_to(next) {
                    ret.push_str(&dir.to_string());
                }
                cur = next;
            }
            ret.push_str(&mov.to_string());
        }
        Ok(ret)
    }

    pub fn format_solution(
        &self,
        moves: &Moves,
        include_steps: bool,
    ) -> Result<SolutionFormatter, ReplayErr> {
        let states = self.replay(moves)?;
        if !include_steps {
            return Ok(SolutionFormatter { boards: states });
        }

        let mut boards = vec![self.initial_state()];
        for (i, ((before, after), mov)) in states.iter().zip(&states[1..]).zip(moves).enumerate() {
            let path = player_path(before, mov.player_pos).ok_or(ReplayErr::IllegalMove(i))?;
            boards.extend(path.into_iter().map(|pos| before.with_player(pos)));
            boards.push(after.clone());
        }
        Ok(SolutionFormatter { boards })
    }
}

/// Shortest walk from the player to `dest`, without the starting position
fn player_path(state: &State, dest: Pos) -> Option<Vec<Pos>> {
    let src = state.player_pos();
    if src == dest {
        return Some(Vec::new());
    }

    let map = state.map();
    let mut prevs = map.grid().scratchpad(None);
    prevs[src] = Some(src);

    let mut to_visit = VecDeque::new();
    to_visit.push_back(src);
    'bfs: while let Some(cur) = to_visit.pop_front() {
        for &next in &cur.neighbors() {
            if map.is_wall(next) || state.has_crate(next) || prevs[next].is_some() {
                continue;
            }
            prevs[next] = Some(cur);
            if next == dest {
                break 'bfs;
            }
            to_visit.push_back(next);
        }
    }

    let mut path = Vec::new();
    let mut cur = dest;
    while cur != src {
        path.push(cur);
        cur = (*prevs.get(cur)?)?;
    }
    path.reverse();
    Some(path)
}

/// XSB boards of a solution, separated by empty lines
pub struct SolutionFormatter {
    boards: Vec<State>,
}

impl SolutionFormatter {
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl Display for SolutionFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for board in &self.boards {
            writeln!(f, "{}", board.xsb())?;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
