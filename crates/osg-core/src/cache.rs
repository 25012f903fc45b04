//! File-backed cache for the last resolved graph.
//!
//! One entry under a fixed key, no versioning and no expiry. Anything that
//! cannot be read back as a graph counts as "nothing cached".

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CacheError;
use crate::graph::SchemaGraph;

/// Storage key of the cached graph.
pub const GRAPH_DATA_KEY: &str = "graphData";

#[derive(Debug, Clone)]
pub struct GraphCache {
    dir: PathBuf,
}

impl GraphCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cache entry (`<dir>/graphData.json`).
    pub fn entry_path(&self) -> PathBuf {
        self.dir.join(format!("{GRAPH_DATA_KEY}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Restore the cached graph. Missing, unreadable and corrupt entries all yield `None`.
    pub fn load(&self) -> Option<SchemaGraph> {
        let path = self.entry_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("ignoring unreadable graph cache {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(graph) => Some(graph),
            Err(err) => {
                log::warn!("ignoring corrupt graph cache {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Write the graph, or remove the entry when there is none.
    pub fn store(&self, graph: Option<&SchemaGraph>) -> Result<(), CacheError> {
        let path = self.entry_path();
        match graph {
            Some(graph) => {
                fs::create_dir_all(&self.dir)?;
                fs::write(&path, serde_json::to_string(graph)?)?;
                log::debug!("cached graph at {}", path.display());
            }
            None => match fs::remove_file(&path) {
                Ok(()) => log::debug!("cleared graph cache {}", path.display()),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            },
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store(None)
    }
}
