use axum::{Json, extract::State};
use serde::Serialize;

use crate::domain::catalog::{self, Achievement};
use crate::domain::types::ActionStatus;
use crate::error::BadgeServiceError;
use crate::handlers::device::DeviceHeaders;
use crate::state::AppState;
use crate::usecase::ctf_action::{CtfActionInput, CtfActionUseCase};

/// Event type recorded for trackable CTF actions.
const CTF_EVENT_TYPE_ID: i32 = 17;

#[derive(Serialize)]
pub struct CtfActionResponse {
    pub status: ActionStatus,
    pub message: String,
}

async fn run_action(
    state: AppState,
    device: DeviceHeaders,
    achievement: &'static Achievement,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    let usecase = CtfActionUseCase {
        users: state.user_repo(),
        events: state.event_repo(),
        unlocks: state.unlock_repo(),
        staff: state.staff_repo(),
        facts: state.fact_source(),
        gate: state.broadcast_gate(),
        publisher: state.publisher(),
    };
    let outcome = usecase
        .execute(CtfActionInput {
            device_id: device.device_id,
            device_mac: device.device_mac,
            event_type_id: CTF_EVENT_TYPE_ID,
            achievement,
        })
        .await?;
    Ok(Json(CtfActionResponse {
        status: outcome.status,
        message: outcome.message,
    }))
}

pub async fn ctf_hello_world(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    run_action(state, device, &catalog::HELLO_WORLD).await
}

pub async fn ctf_serial(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    run_action(state, device, &catalog::SERIAL_PORT_INTERACTION).await
}

pub async fn ctf_access_point(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    run_action(state, device, &catalog::BADGE_ACCESS_POINT).await
}

pub async fn ctf_web_auth(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    run_action(state, device, &catalog::BADGE_WEB_AUTH).await
}

pub async fn ctf_flag_text(
    device: DeviceHeaders,
    State(state): State<AppState>,
) -> Result<Json<CtfActionResponse>, BadgeServiceError> {
    run_action(state, device, &catalog::FLAG_TEXT).await
}
