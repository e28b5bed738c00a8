use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cackalacky_core::health::{healthz, readyz};
use cackalacky_core::middleware::request_id_layer;

use crate::handlers::{
    badge::{register_badge, verify_badge},
    ctf::{ctf_access_point, ctf_flag_text, ctf_hello_world, ctf_serial, ctf_web_auth},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Badge pairing
        .route("/badge/register", post(register_badge))
        .route("/badge/verify", post(verify_badge))
        // CTF actions (paths match the badge firmware)
        .route("/capturetheflag/HelloWorld", get(ctf_hello_world))
        .route("/capturetheflag/Serial", get(ctf_serial))
        .route("/capturetheflag/APConn", get(ctf_access_point))
        .route("/capturetheflag/WebAuth", get(ctf_web_auth))
        .route("/capturetheflag/FlagTxt", get(ctf_flag_text))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
