// build_rev_index.rs
//
// Offline step: invert the card table (card id -> triggers) into the reverse
// index the responder loads at startup. Re-running overwrites the output.
use playcards::logging_setup::init_env_logger;
use playcards::{load_forward_map, ReverseIndex};

use anyhow::Context;
use log::info;
use std::env;
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "intermediate/card_dict.json";
const DEFAULT_OUTPUT: &str = "data/rev_index.json";

fn main() -> anyhow::Result<()> {
    init_env_logger();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));

    let forward = load_forward_map(&input)?;
    let index = ReverseIndex::build(&forward);
    index
        .write_to(&output)
        .with_context(|| format!("building {} from {}", output.display(), input.display()))?;

    info!("Generated {} (cards={}, keys={})", output.display(), forward.len(), index.len());
    Ok(())
}
