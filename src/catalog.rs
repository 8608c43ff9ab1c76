//! Level catalog stored as JSON: `{ "<set>": { "<level id>": "<xsb level>" } }`.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::level::Level;
use crate::parser::ParserErr;

#[derive(Debug)]
pub enum CatalogErr {
    Io(io::Error),
    Json(serde_json::Error),
    UnknownSet(String),
    UnknownLevel(String, String),
    InvalidLevel(String, String, ParserErr),
}

impl Display for CatalogErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CatalogErr::Io(err) => write!(f, "Can't read catalog: {}", err),
            CatalogErr::Json(err) => write!(f, "Malformed catalog: {}", err),
            CatalogErr::UnknownSet(set) => write!(f, "Level set not found: {}", set),
            CatalogErr::UnknownLevel(set, id) => write!(f, "Level not found: {} in {}", id, set),
            CatalogErr::InvalidLevel(set, id, err) => {
                write!(f, "Invalid level {} in {}: {}", id, set, err)
            }
        }
    }
}

impl Error for CatalogErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CatalogErr::Io(err) => Some(err),
            CatalogErr::Json(err) => Some(err),
            CatalogErr::InvalidLevel(_, _, err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CatalogErr {
    fn from(err: io::Error) -> Self {
        CatalogErr::Io(err)
    }
}

impl From<serde_json::Error> for CatalogErr {
    fn from(err: serde_json::Error) -> Self {
        CatalogErr::Json(err)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sets: BTreeMap<String, BTreeMap<String, String>>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogErr> {
        let path = path.as_ref();
        debug!("Loading catalog {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogErr> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sets(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn levels(&self, set: &str) -> Result<impl Iterator<Item = &str>, CatalogErr> {
        let levels = self
            .sets
            .get(set)
            .ok_or_else(|| CatalogErr::UnknownSet(set.to_owned()))?;
        Ok(levels.keys().map(String::as_str))
    }

    pub fn level(&self, set: &str, id: &str) -> Result<Level, CatalogErr> {
        let levels = self
            .sets
            .get(set)
            .ok_or_else(|| CatalogErr::UnknownSet(set.to_owned()))?;
        let xsb = levels
            .get(id)
            .ok_or_else(|| CatalogErr::UnknownLevel(set.to_owned(), id.to_owned()))?;
        xsb.parse::<Level>()
            .map_err(|err| CatalogErr::InvalidLevel(set.to_owned(), id.to_owned(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r######"{
        "tiny": {
            "level_02": "#####\n#@$.#\n#####",
            "level_01": "#####\n#@*#\n#####",
            "broken": "#####\n#@$$.#\n#####"
        },
        "empty": {}
    }"######;

    #[test]
    fn lookup() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.sets().collect::<Vec<_>>(), vec!["empty", "tiny"]);
        assert_eq!(
            catalog.levels("tiny").unwrap().collect::<Vec<_>>(),
            vec!["broken", "level_01", "level_02"]
        );
        assert_eq!(catalog.levels("empty").unwrap().count(), 0);

        let level = catalog.level("tiny", "level_02").unwrap();
        assert_eq!(level.to_string(), "#####\n#@$.#\n#####\n");
    }

    #[test]
    fn errors() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        match catalog.level("huge", "level_01") {
            Err(CatalogErr::UnknownSet(set)) => assert_eq!(set, "huge"),
            other => panic!("unexpected {:?}", other),
        }
        match catalog.level("tiny", "level_99") {
            Err(CatalogErr::UnknownLevel(_, id)) => assert_eq!(id, "level_99"),
            other => panic!("unexpected {:?}", other),
        }
        match catalog.level("tiny", "broken") {
            Err(CatalogErr::InvalidLevel(_, _, err)) => assert_eq!(err, ParserErr::BoxesGoals(2, 1)),
            other => panic!("unexpected {:?}", other),
        }
        assert!(catalog.levels("huge").is_err());
        assert!(Catalog::from_json("[1, 2]").is_err());
    }

    #[test]
    fn bundled_catalog() {
        let catalog = Catalog::load("levels/catalog.json").unwrap();
        for set in catalog.sets() {
            for id in catalog.levels(set).unwrap() {
                catalog.level(set, id).unwrap();
            }
        }
    }
}
