// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod cache;
pub mod catalog;
pub mod config;
pub mod data;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod solution_formatter;
pub mod solver;
pub mod state;

mod vec2d;

use std::error::Error;

use crate::config::Method;
use crate::level::Level;
use crate::solver::{CancelToken, SolverErr, SolverOk};

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, method: Method, cancel: &CancelToken) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::METHODS;

    #[test]
    fn test_levels() {
        // fewest pushes, `None` if there is no solution
        let levels = [
            ("00-solved.txt", Some(0)),
            ("01-simplest.txt", Some(1)),
            ("02-one-way.txt", Some(3)),
            ("03-two-crates.txt", Some(4)),
            ("no-solution.txt", None),
        ];

        for &(level_name, shortest) in &levels {
            let level_path = format!("levels/custom/{}", level_name);
            let level = level_path.as_str().load_level().unwrap();
            for &method in &METHODS {
                println!("Solving {} using {}", level_path, method);
                let result = level.solve(method, &CancelToken::new()).unwrap();
                println!("{:?}", result);

                let pushes = result.solution.map(|solution| {
                    let replayed = level.replay(&solution.moves).unwrap();
                    assert_eq!(replayed, solution.states);
                    solution.moves.push_cnt()
                });
                match (pushes, shortest) {
                    (None, None) => {}
                    (Some(pushes), Some(shortest)) if method == Method::Bfs => {
                        assert_eq!(pushes, shortest)
                    }
                    (Some(pushes), Some(shortest)) => assert!(pushes >= shortest),
                    _ => panic!("{} using {}: solvability changed", level_path, method),
                }
            }
        }
    }

    #[test]
    fn test_catalog() {
        let catalog = catalog::Catalog::load("levels/catalog.json").unwrap();
        let level = catalog.level("corridors", "level_02").unwrap();
        let solution = level
            .solve(Method::HybridHeuristic, &CancelToken::new())
            .unwrap()
            .solution
            .unwrap();
        assert_eq!(level.lurd(&solution.moves).unwrap(), "lLLL");
    }
}
