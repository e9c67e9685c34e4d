use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::EventsServiceError;
use crate::handlers::extract::ApiJson;
use crate::state::AppState;
use crate::usecase::otp::{RequestOtpUseCase, VerifyOtpUseCase};

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub phone: String,
}

#[derive(Serialize)]
pub struct RequestOtpResponse {
    pub sent: bool,
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}

// ── POST /otp/request ────────────────────────────────────────────────────────

pub async fn request_otp(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RequestOtpRequest>,
) -> Result<Json<RequestOtpResponse>, EventsServiceError> {
    let uc = RequestOtpUseCase {
        otps: state.otp_repo(),
        throttle: state.otp_throttle(),
        sms: state.sms.clone(),
        admin_phones: state.admin_phones(),
    };
    uc.execute(&body.phone).await?;
    Ok(Json(RequestOtpResponse { sent: true }))
}

// ── POST /otp/verify ─────────────────────────────────────────────────────────

pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, EventsServiceError> {
    let uc = VerifyOtpUseCase {
        otps: state.otp_repo(),
        admin_phones: state.admin_phones(),
    };
    uc.execute(&body.phone, &body.code).await?;
    Ok(Json(VerifyOtpResponse { verified: true }))
}
