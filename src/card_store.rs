// card_store.rs
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CARD_EXTENSION: &str = "png";

/// Card images on local disk, one `<id>.png` per card. Lookups always hit the
/// filesystem since files may be added or removed while running.
#[derive(Debug, Clone)]
pub struct CardStore {
    card_dir: PathBuf,
}

impl CardStore {
    pub fn new(card_dir: impl Into<PathBuf>) -> Self {
        CardStore { card_dir: card_dir.into() }
    }

    pub fn card_dir(&self) -> &Path {
        &self.card_dir
    }

    pub fn path_for(&self, card_id: &str) -> PathBuf {
        self.card_dir.join(format!("{}.{}", card_id, CARD_EXTENSION))
    }

    pub fn exists(&self, card_id: &str) -> bool {
        self.path_for(card_id).is_file()
    }

    pub async fn read(&self, card_id: &str) -> io::Result<Vec<u8>> {
        let path = self.path_for(card_id);
        let bytes = fs::read(&path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}
