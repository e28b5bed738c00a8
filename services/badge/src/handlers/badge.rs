use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::repository::EventPublisher;
use crate::domain::types::HIGH_SCORE_CHANNEL;
use crate::error::BadgeServiceError;
use crate::handlers::device::DeviceHeaders;
use crate::state::AppState;
use crate::usecase::registration::IssueRegistrationCodeUseCase;
use crate::usecase::resolve::ResolveBadgeUserUseCase;

#[derive(Serialize)]
pub struct RegistrationResponse {
    pub status: &'static str,
    pub registered: u8,
    pub registration_code: Option<String>,
}

// ── POST /badge/register ─────────────────────────────────────────────────────

pub async fn register_badge(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<RegistrationResponse>, BadgeServiceError> {
    registration_status(&state, &device).await.map(Json)
}

// ── POST /badge/verify ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct VerifyRequest {
    pub hs: Option<serde_json::Value>,
    pub status: Option<String>,
}

pub async fn verify_badge(
    device: DeviceHeaders,
    State(state): State<AppState>,
    body: Option<Json<VerifyRequest>>,
) -> Result<Json<RegistrationResponse>, BadgeServiceError> {
    let response = registration_status(&state, &device).await?;
    if response.registered == 1 {
        if let Some(Json(report)) = body {
            publish_badge_report(&state, &device, report).await;
        }
    }
    Ok(Json(response))
}

/// Shared register/verify body: a registered badge gets confirmation, an
/// unregistered one gets its (possibly freshly minted) pairing code.
async fn registration_status(
    state: &AppState,
    device: &DeviceHeaders,
) -> Result<RegistrationResponse, BadgeServiceError> {
    let Some(identity) = device.identity() else {
        return Ok(RegistrationResponse {
            status: "SUCCESS",
            registered: 0,
            registration_code: None,
        });
    };

    let resolver = ResolveBadgeUserUseCase {
        users: state.user_repo(),
    };
    if resolver.execute(&identity).await?.is_some() {
        return Ok(RegistrationResponse {
            status: "SUCCESS",
            registered: 1,
            registration_code: None,
        });
    }

    let codes = IssueRegistrationCodeUseCase {
        cache: state.registration_cache(),
    };
    let code = codes.issue_or_fetch(&identity).await?;
    Ok(RegistrationResponse {
        status: "SUCCESS",
        registered: 0,
        registration_code: Some(code),
    })
}

/// High-score / status report relayed from a registered badge to the
/// score-processor channel. Best-effort, like all publishes.
async fn publish_badge_report(state: &AppState, device: &DeviceHeaders, report: VerifyRequest) {
    let mut payload = json!({
        "user_uuid": device.device_id,
        "mac_address": device.device_mac,
    });
    if let Some(high_scores) = report.hs {
        payload["event"] = json!("high-score");
        payload["high_scores"] = high_scores;
    } else if let Some(status) = report.status {
        payload["event"] = json!("status");
        payload["status"] = json!(status);
    } else {
        return;
    }
    state
        .publisher()
        .publish(HIGH_SCORE_CHANNEL, &payload.to_string())
        .await;
}
