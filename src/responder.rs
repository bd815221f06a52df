// responder.rs
use crate::card_store::CardStore;
use crate::config::ConfigStore;
use crate::matcher::MatcherState;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// What a chat connector hands over: the plain text and where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub text: String,
    pub session_id: String,
}

/// A card image that should be sent back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEmission {
    pub matched_key: String,
    pub card_id: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Responder {
    matcher: Arc<MatcherState>,
    config: ConfigStore,
    cards: CardStore,
}

impl Responder {
    pub fn new(matcher: Arc<MatcherState>, config: ConfigStore, cards: CardStore) -> Self {
        Responder { matcher, config, cards }
    }

    pub fn matcher(&self) -> &MatcherState {
        &self.matcher
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    /// At most one card per message. Every failure ends in `None`.
    pub fn respond(&self, message: &InboundMessage) -> Option<CardEmission> {
        let config = self.config.snapshot();
        let hit = self.matcher.dispatch(&message.text, &message.session_id, &config)?;

        let path = self.cards.path_for(&hit.card_id);
        if !path.is_file() {
            warn!(
                "Card image not found: {} (matched_key={:?}, id={:?})",
                path.display(),
                hit.matched_key,
                hit.card_id
            );
            return None;
        }

        info!(
            "Hit key={:?} -> id={:?} -> {}",
            hit.matched_key,
            hit.card_id,
            path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
        );
        Some(CardEmission { matched_key: hit.matched_key, card_id: hit.card_id, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_dict::ForwardMap;
    use crate::config::MatchConfig;
    use crate::rev_index::ReverseIndex;
    use tempfile::tempdir;

    fn responder(card_dir: &std::path::Path, entries: &[(&str, &[&str])]) -> Responder {
        let forward: ForwardMap = entries
            .iter()
            .map(|(id, triggers)| (id.to_string(), triggers.iter().map(|t| t.to_string()).collect()))
            .collect();
        let matcher = MatcherState::initialize(ReverseIndex::build(&forward));
        let config = ConfigStore::fixed(MatchConfig {
            session_whitelist: vec!["group".to_string()],
            ..MatchConfig::default()
        });
        Responder::new(Arc::new(matcher), config, CardStore::new(card_dir))
    }

    fn message(text: &str) -> InboundMessage {
        InboundMessage { text: text.to_string(), session_id: "group".to_string() }
    }

    #[test]
    fn emits_existing_card() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("001.png"), b"png").expect("write");
        let r = responder(dir.path(), &[("001", &["strike"])]);

        let emission = r.respond(&message("strike!")).expect("emission");
        assert_eq!(emission.card_id, "001");
        assert_eq!(emission.matched_key, "strike");
        assert_eq!(emission.path, dir.path().join("001.png"));
    }

    #[test]
    fn missing_card_image_drops_emission() {
        let dir = tempdir().expect("tempdir");
        let r = responder(dir.path(), &[("001", &["strike"])]);
        assert_eq!(r.respond(&message("strike")), None);
    }

    #[test]
    fn config_changes_apply_to_next_message() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("001.png"), b"png").expect("write");
        let r = responder(dir.path(), &[("001", &["strike"])]);
        assert!(r.respond(&message("strike")).is_some());

        r.config().replace(MatchConfig { enabled: false, ..r.config().snapshot() });
        assert_eq!(r.respond(&message("strike")), None);
    }
}
