//! Previously found solutions stored as JSON:
//! `{ "<set>": { "<level id>": { "<method>": [[[r, c], [r, c], [r, c]], ...] } } }`.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Method;
use crate::moves::Moves;

#[derive(Debug)]
pub enum CacheErr {
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for CacheErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CacheErr::Io(err) => write!(f, "Can't access solution cache: {}", err),
            CacheErr::Json(err) => write!(f, "Malformed solution cache: {}", err),
        }
    }
}

impl Error for CacheErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CacheErr::Io(err) => Some(err),
            CacheErr::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for CacheErr {
    fn from(err: io::Error) -> Self {
        CacheErr::Io(err)
    }
}

impl From<serde_json::Error> for CacheErr {
    fn from(err: serde_json::Error) -> Self {
        CacheErr::Json(err)
    }
}

type Entries = BTreeMap<String, BTreeMap<String, BTreeMap<String, Moves>>>;

#[derive(Debug, Clone)]
pub struct SolutionCache {
    path: PathBuf,
    entries: Entries,
}

impl SolutionCache {
    /// A missing file is an empty cache, it's created on `save`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheErr> {
        let path = path.as_ref().to_owned();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(ref err) if err.kind() == ErrorKind::NotFound => {
                debug!("No solution cache at {}, starting empty", path.display());
                Entries::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(SolutionCache { path, entries })
    }

    pub fn get(&self, set: &str, level: &str, method: Method) -> Option<&Moves> {
        self.entries.get(set)?.get(level)?.get(&method.to_string())
    }

    /// Any cached solution of the level, whichever method found it
    pub fn get_any(&self, set: &str, level: &str) -> Option<&Moves> {
        self.entries.get(set)?.get(level)?.values().next()
    }

    pub fn insert(&mut self, set: &str, level: &str, method: Method, moves: Moves) {
        self.entries
            .entry(set.to_owned())
            .or_insert_with(BTreeMap::new)
            .entry(level.to_owned())
            .or_insert_with(BTreeMap::new)
            .insert(method.to_string(), moves);
    }

    pub fn save(&self) -> Result<(), CacheErr> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush()?;
        info!("Saved solutions to {}", self.path.display());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CacheErr> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn from_json<P: AsRef<Path>>(path: P, json: &str) -> Result<Self, CacheErr> {
        Ok(SolutionCache {
            path: path.as_ref().to_owned(),
            entries: serde_json::from_str(json)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::env;
    use std::process;

    use crate::data::{Dir, Pos};
    use crate::moves::Move;

    fn moves() -> Moves {
        Moves::new(vec![Move::new(Pos::new(1, 1), Dir::Down)])
    }

    #[test]
    fn lookup() {
        let mut cache = SolutionCache::from_json("unused.json", "{}").unwrap();
        assert!(cache.get_any("tiny", "level_01").is_none());

        cache.insert("tiny", "level_01", Method::HybridHeuristic, moves());
        assert_eq!(cache.get("tiny", "level_01", Method::HybridHeuristic), Some(&moves()));
        assert_eq!(cache.get("tiny", "level_01", Method::Bfs), None);
        assert_eq!(cache.get_any("tiny", "level_01"), Some(&moves()));
        assert_eq!(
            cache.to_json().unwrap(),
            r#"{"tiny":{"level_01":{"hybrid-heuristic":[[[0,1],[1,1],[2,1]]]}}}"#
        );
    }

    #[test]
    fn saving_and_loading() {
        let path = env::temp_dir().join(format!("sokoban-planner-cache-{}.json", process::id()));
        let _ = fs::remove_file(&path);

        let mut cache = SolutionCache::open(&path).unwrap();
        assert!(cache.get_any("tiny", "level_01").is_none());
        cache.insert("tiny", "level_01", Method::Bfs, moves());
        cache.save().unwrap();

        let cache = SolutionCache::open(&path).unwrap();
        assert_eq!(cache.get("tiny", "level_01", Method::Bfs), Some(&moves()));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed() {
        match SolutionCache::from_json("unused.json", r#"{"tiny": [1]}"#) {
            Err(CacheErr::Json(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
