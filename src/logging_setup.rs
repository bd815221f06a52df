// logging_setup.rs
use log::{info, warn};
use std::fs;
use std::path::Path;

const LOG4RS_CONFIG: &str = "log4rs.yaml";

/// log4rs from `log4rs.yaml` when present, otherwise env_logger at `info`.
pub fn setup_logging() -> anyhow::Result<()> {
    if Path::new(LOG4RS_CONFIG).exists() {
        // Create logs directory if it doesn't exist
        fs::create_dir_all("logs")?;
        match log4rs::init_file(LOG4RS_CONFIG, Default::default()) {
            Ok(()) => {
                info!("Logging configured from {}", LOG4RS_CONFIG);
                return Ok(());
            }
            Err(e) => {
                init_env_logger();
                warn!("Invalid {}: {}; falling back to env_logger", LOG4RS_CONFIG, e);
                return Ok(());
            }
        }
    }
    init_env_logger();
    Ok(())
}

pub fn init_env_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
