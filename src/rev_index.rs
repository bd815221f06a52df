// rev_index.rs
//
// Reverse lookup table: trigger phrase -> card ids. Built offline from the
// card table and loaded once at startup.
use crate::card_dict::{CardId, ForwardMap};

use anyhow::Context;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexLoadError {
    #[error("reverse index not found at {0}")]
    Missing(PathBuf),
    #[error("failed to read reverse index {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse reverse index {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Trigger -> bucket of card ids.
///
/// Keys keep first-seen order and buckets keep append order. A card listed
/// twice under the same trigger appears twice in the bucket, which doubles its
/// weight during random selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReverseIndex {
    buckets: IndexMap<String, Vec<CardId>>,
}

impl ReverseIndex {
    pub fn build(forward: &ForwardMap) -> Self {
        let mut buckets: IndexMap<String, Vec<CardId>> = IndexMap::new();
        for (id, triggers) in forward {
            for trigger in triggers {
                buckets.entry(trigger.clone()).or_default().push(id.clone());
            }
        }
        debug!("Built reverse index: {} keys from {} cards", buckets.len(), forward.len());
        ReverseIndex { buckets }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[CardId]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Overwrites `path` with the pretty-printed index. Nothing is merged with
    /// what was there before.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write reverse index {}", path.display()))?;
        info!("Wrote reverse index with {} keys to {}", self.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, IndexLoadError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                IndexLoadError::Missing(path.to_path_buf())
            } else {
                IndexLoadError::Io { path: path.to_path_buf(), source: e }
            }
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| IndexLoadError::Parse { path: path.to_path_buf(), source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn forward(entries: &[(&str, &[&str])]) -> ForwardMap {
        entries
            .iter()
            .map(|(id, triggers)| (id.to_string(), triggers.iter().map(|t| t.to_string()).collect()))
            .collect()
    }

    #[test]
    fn buckets_preserve_card_order() {
        let index = ReverseIndex::build(&forward(&[
            ("001", &["strike"]),
            ("002", &["strike", "defend"]),
        ]));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("strike"), Some(&["001".to_string(), "002".to_string()][..]));
        assert_eq!(index.get("defend"), Some(&["002".to_string()][..]));
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["strike", "defend"]);
    }

    #[test]
    fn repeated_trigger_on_one_card_is_kept() {
        let index = ReverseIndex::build(&forward(&[("007", &["bash", "bash"])]));
        assert_eq!(index.get("bash").map(<[_]>::len), Some(2));
    }

    #[test]
    fn empty_forward_map_gives_empty_index() {
        let index = ReverseIndex::build(&ForwardMap::new());
        assert!(index.is_empty());
        assert_eq!(index.get("anything"), None);
    }

    #[test]
    fn written_index_loads_back_identically() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested/rev_index.json");
        let index = ReverseIndex::build(&forward(&[
            ("003", &["zap", "dualcast"]),
            ("001", &["strike"]),
            ("002", &["strike", "zap"]),
        ]));

        index.write_to(&path).expect("write");
        let loaded = ReverseIndex::load(&path).expect("load");

        assert_eq!(loaded, index);
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["zap", "dualcast", "strike"]);
        assert_eq!(loaded.get("zap"), Some(&["003".to_string(), "002".to_string()][..]));
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("rev_index.json");
        ReverseIndex::build(&forward(&[("001", &["old"])])).write_to(&path).expect("first");
        ReverseIndex::build(&forward(&[("002", &["new"])])).write_to(&path).expect("second");

        let loaded = ReverseIndex::load(&path).expect("load");
        assert_eq!(loaded.get("old"), None);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn load_distinguishes_missing_and_corrupt() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("missing.json");
        assert!(matches!(ReverseIndex::load(&missing), Err(IndexLoadError::Missing(_))));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{\"strike\": [").expect("write");
        assert!(matches!(ReverseIndex::load(&corrupt), Err(IndexLoadError::Parse { .. })));
    }
}
