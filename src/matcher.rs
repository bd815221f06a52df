// matcher.rs
//
// Longest-trigger-first lookup over the reverse index. Holds no mutable state
// after construction, so one instance can be shared across worker threads.
use crate::card_dict::CardId;
use crate::config::MatchConfig;
use crate::rev_index::ReverseIndex;

use log::{debug, error, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::borrow::Cow;
use std::cmp::Reverse;
use std::path::Path;

#[derive(Debug, Clone)]
struct PriorityKey {
    key: String,
    folded: String,
}

/// Outcome of a successful dispatch. Turning `card_id` into a file is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionRequest {
    pub matched_key: String,
    pub card_id: CardId,
}

#[derive(Debug, Default)]
pub struct MatcherState {
    index: ReverseIndex,
    keys: Vec<PriorityKey>,
}

impl MatcherState {
    /// Orders the keys by descending character count. The sort is stable, so
    /// keys of equal length keep the order in which the index first saw them.
    pub fn initialize(index: ReverseIndex) -> Self {
        let mut keys: Vec<PriorityKey> = index
            .keys()
            .map(|k| PriorityKey { key: k.to_string(), folded: k.to_lowercase() })
            .collect();
        keys.sort_by_key(|pk| Reverse(pk.key.chars().count()));

        if keys.is_empty() {
            info!("Matcher initialized with an empty index; no message will match");
        } else {
            info!("Matcher initialized: keys={}", keys.len());
        }
        MatcherState { index, keys }
    }

    /// Never fails: an unreadable index leaves the matcher empty.
    pub fn from_index_file(path: &Path) -> Self {
        match ReverseIndex::load(path) {
            Ok(index) => Self::initialize(index),
            Err(e) => {
                error!("Failed to load reverse index: {}", e);
                Self::initialize(ReverseIndex::default())
            }
        }
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Keys in the order they are tried.
    pub fn priority_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|pk| pk.key.as_str())
    }

    /// Returns `(matched_key, picked_id)` for the first key contained in
    /// `message`. Keys whose bucket turns out empty are skipped.
    pub fn pick_match<R: Rng + ?Sized>(
        &self,
        message: &str,
        case_sensitive: bool,
        rng: &mut R,
    ) -> Option<(&str, &str)> {
        if self.keys.is_empty() {
            return None;
        }

        let msg: Cow<'_, str> =
            if case_sensitive { Cow::Borrowed(message) } else { Cow::Owned(message.to_lowercase()) };

        for pk in &self.keys {
            let needle = if case_sensitive { &pk.key } else { &pk.folded };
            if needle.is_empty() || !msg.contains(needle.as_str()) {
                continue;
            }
            // Buckets are looked up by the original key, not the folded one.
            let ids = self.index.get(&pk.key).unwrap_or(&[]);
            match ids.choose(rng) {
                Some(id) => return Some((pk.key.as_str(), id.as_str())),
                None => {
                    debug!("Key {:?} matched but has no cards, trying next key", pk.key);
                    continue;
                }
            }
        }
        None
    }

    pub fn dispatch(&self, message: &str, session_id: &str, config: &MatchConfig) -> Option<EmissionRequest> {
        self.dispatch_with_rng(message, session_id, config, &mut rand::thread_rng())
    }

    pub fn dispatch_with_rng<R: Rng + ?Sized>(
        &self,
        message: &str,
        session_id: &str,
        config: &MatchConfig,
        rng: &mut R,
    ) -> Option<EmissionRequest> {
        if !config.enabled {
            return None;
        }
        if !config.allows_session(session_id) {
            return None;
        }
        if message.is_empty() {
            return None;
        }

        self.pick_match(message, config.case_sensitive, rng).map(|(key, id)| EmissionRequest {
            matched_key: key.to_string(),
            card_id: id.to_string(),
        })
    }
}
