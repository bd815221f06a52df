// card_dict.rs
use anyhow::Context;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::Path;

/// Card identifier as authored in the card table (e.g. `"001"`).
pub type CardId = String;

/// Forward table: card id -> ordered trigger phrases. Keeps file order.
pub type ForwardMap = IndexMap<CardId, Vec<String>>;

pub fn load_forward_map(path: &Path) -> anyhow::Result<ForwardMap> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read card table {}", path.display()))?;
    let forward: ForwardMap = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse card table {}", path.display()))?;
    debug!("Loaded {} cards from {}", forward.len(), path.display());
    Ok(forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn keeps_file_order_of_cards() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card_dict.json");
        fs::write(&path, r#"{"010": ["b"], "002": ["a", "c"], "001": []}"#).expect("write");

        let forward = load_forward_map(&path).expect("load");
        let ids: Vec<&str> = forward.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["010", "002", "001"]);
        assert_eq!(forward["002"], vec!["a", "c"]);
    }

    #[test]
    fn rejects_non_string_triggers() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("card_dict.json");
        fs::write(&path, r#"{"001": [1, 2]}"#).expect("write");

        let err = load_forward_map(&path).expect_err("numbers are not triggers");
        assert!(format!("{err:#}").contains("failed to parse card table"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nope.json");
        let err = load_forward_map(&path).expect_err("missing file");
        assert!(err.to_string().contains("nope.json"));
    }
}
