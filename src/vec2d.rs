use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::{Bound, Pos};

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    bound: Bound,
}

impl<T: Clone> Vec2d<T> {
    pub(crate) fn new(bound: Bound, default: T) -> Self {
        let len = bound.rows.max(0) as usize * bound.cols.max(0) as usize;
        Vec2d {
            data: vec![default; len],
            bound,
        }
    }
}

impl<T> Vec2d<T> {
    pub(crate) fn scratchpad<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d::new(self.bound, default)
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        self.bound.positions()
    }

    /// `None` outside the bound
    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.bound.contains(pos) {
            Some(&self.data[self.index_of(pos)])
        } else {
            None
        }
    }

    fn index_of(&self, pos: Pos) -> usize {
        pos.r as usize * self.bound.cols as usize + pos.c as usize
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.bound.rows {
            for c in 0..self.bound.cols {
                write!(f, "{}", if self[Pos::new(r, c)] { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &Self::Output {
        debug_assert!(self.bound.contains(pos), "{} out of bounds", pos);
        &self.data[self.index_of(pos)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        debug_assert!(self.bound.contains(pos), "{} out of bounds", pos);
        let index = self.index_of(pos);
        &mut self.data[index]
    }
}
