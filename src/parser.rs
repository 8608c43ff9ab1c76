use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{Bound, Pos};
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Empty,
    Pos(usize, usize),
    MultiplePlayers,
    NoPlayer,
    BoxesGoals(usize, usize),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Empty => write!(f, "Empty level"),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::BoxesGoals(boxes, goals) => write!(
                f,
                "Different number of boxes ({}) and goals ({})",
                boxes, goals
            ),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_xsb(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
pub(crate) fn parse_xsb(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();
    if level.is_empty() {
        return Err(ParserErr::Empty);
    }

    let mut walls = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;
    let mut rows = 0;
    let mut cols = 0;

    for (r, line) in level.lines().enumerate() {
        rows = r + 1;
        for (c, cur_char) in line.chars().enumerate() {
            cols = cols.max(c + 1);
            let pos = Pos::new(r as i32, c as i32);

            match cur_char {
                '#' => walls.push(pos),
                'p' | '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                }
                'P' | '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                }
                'b' | '$' => boxes.push(pos),
                'B' | '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                }
                '.' => goals.push(pos),
                ' ' | '-' | '_' => {}
                _ => return Err(ParserErr::Pos(r, c)),
            }
        }
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    if boxes.len() != goals.len() {
        return Err(ParserErr::BoxesGoals(boxes.len(), goals.len()));
    }

    Ok(Level::new(
        player_pos,
        boxes,
        walls,
        goals,
        Bound::new(rows as i32, cols as i32),
    ))
}
