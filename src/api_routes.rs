// api_routes.rs
use crate::api_auth::ApiKey;
use crate::responder::{InboundMessage, Responder};

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use log::{debug, error};
use serde_json::json;

// Set API Routes
pub fn configure(cfg: &mut web::ServiceConfig, api_key: Option<String>) {
    cfg.service(
        web::scope("/api")
            .wrap(ApiKey::new(api_key))
            .route("/message", web::post().to(message_route))
            .route("/health", web::get().to(health_route))
            .route("/config", web::get().to(config_route))
            .route("/config/reload", web::post().to(reload_route)),
    );
}

// One inbound chat message in, at most one card image out.
async fn message_route(msg: web::Json<InboundMessage>, responder: web::Data<Responder>) -> HttpResponse {
    debug!("Inbound message from session {}", msg.session_id);
    let Some(emission) = responder.respond(&msg) else {
        return HttpResponse::NoContent().finish();
    };

    match responder.cards().read(&emission.card_id).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("image/png")
            .insert_header(("X-Card-Id", emission.card_id.escape_default().to_string()))
            .insert_header(("X-Matched-Key", emission.matched_key.escape_default().to_string()))
            .body(bytes),
        Err(e) => {
            // The file vanished between the existence check and the read.
            error!("Failed to read card image {}: {}", emission.path.display(), e);
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body(format!("failed to read card {}", emission.card_id))
        }
    }
}

async fn health_route(responder: web::Data<Responder>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "keys": responder.matcher().key_count(),
    }))
}

async fn config_route(responder: web::Data<Responder>) -> HttpResponse {
    HttpResponse::Ok().json(responder.config().snapshot())
}

async fn reload_route(responder: web::Data<Responder>) -> HttpResponse {
    let config = responder.config().reload();
    HttpResponse::Ok().json(config)
}
