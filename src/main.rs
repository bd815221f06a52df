// main.rs
use playcards::config::{AppSettings, ConfigStore};
use playcards::{api_routes, interactive_mode, logging_setup};
use playcards::{CardStore, MatcherState, Responder};

use actix_web::{middleware, web, App, HttpServer};
use log::{error, info, warn};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = AppSettings::from_env();

    logging_setup::setup_logging()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!("Starting playcards responder");

    // Built once; every worker shares the same read-only matcher.
    let matcher = Arc::new(MatcherState::from_index_file(&settings.rev_index_path));
    let config = ConfigStore::load(&settings.match_config_path);
    let cards = CardStore::new(&settings.card_dir);
    info!(
        "loaded: keys={}, card_dir={}, config={}",
        matcher.key_count(),
        cards.card_dir().display(),
        config.path().display()
    );
    if !cards.card_dir().is_dir() {
        warn!("Card directory {} does not exist", cards.card_dir().display());
    }

    let responder = Responder::new(matcher, config, cards);

    if settings.interactive {
        let _console = interactive_mode::spawn(responder.clone(), settings.console_session_id.clone());
    }

    if settings.api_key.is_none() {
        warn!("API_KEY not set, /api is unauthenticated");
    }

    let data = web::Data::new(responder);
    let api_key = settings.api_key.clone();
    let server = HttpServer::new(move || {
        let api_key = api_key.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(|cfg| api_routes::configure(cfg, api_key))
    })
    .bind(&settings.bind_addr);

    match server {
        Ok(server) => {
            info!("Listening on {}", settings.bind_addr);
            server.run().await
        }
        Err(e) => {
            error!("Failed to bind {}: {}", settings.bind_addr, e);
            Err(e)
        }
    }
}
