use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Search counters, kept per depth (number of pushes from the initial state).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    visited_states: Vec<i32>,
    duplicate_states: Vec<i32>,
    deadlocked_states: Vec<i32>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum::<i32>()
    }

    pub fn total_unique_visited(&self) -> i32 {
        self.visited_states.iter().sum::<i32>()
    }

    pub fn total_reached_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum::<i32>()
    }

    pub fn total_deadlocks(&self) -> i32 {
        self.deadlocked_states.iter().sum::<i32>()
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique_visited(&mut self, depth: u32) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn add_deadlock(&mut self, depth: u32) -> bool {
        Self::add(&mut self.deadlocked_states, depth)
    }

    /// Returns true if this is the first time the depth was reached
    fn add(counts: &mut Vec<i32>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because some depths might be skipped in a counter
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn depths(&self) -> usize {
        [
            &self.created_states,
            &self.visited_states,
            &self.duplicate_states,
            &self.deadlocked_states,
        ]
        .iter()
        .map(|counts| counts.len())
        .max()
        .unwrap_or(0)
    }

    fn depth_table(&self) -> Table {
        fn at(counts: &[i32], depth: usize) -> i32 {
            counts.get(depth).cloned().unwrap_or(0)
        }

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates", "Deadlocks"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));
        for depth in 0..self.depths() {
            let counts = [
                at(&self.created_states, depth),
                at(&self.visited_states, depth),
                at(&self.duplicate_states, depth),
                at(&self.deadlocked_states, depth),
            ];
            let mut cells = vec![Cell::new(&format!("{}:", depth))];
            cells.extend(counts.iter().map(|cnt| Cell::new(&cnt.separated_string())));
            table.add_row(Row::new(cells));
        }
        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "deadlocks by depth: {:?}", self.deadlocked_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total unique visited: {}", self.total_unique_visited().separated_string())?;
        writeln!(f, "total reached duplicates: {}", self.total_reached_duplicates().separated_string())?;
        writeln!(f, "total deadlocks: {}", self.total_deadlocks().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "Unique visited total: {}", self.total_unique_visited().separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.total_reached_duplicates().separated_string())?;
        writeln!(f, "Pruned deadlocks total: {}", self.total_deadlocks().separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.depth_table())
    }
}
