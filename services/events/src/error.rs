use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Events service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum EventsServiceError {
    #[error("event not found")]
    EventNotFound,
    #[error("award event not found")]
    AwardEventNotFound,
    #[error("attendee not found")]
    AttendeeNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("nominee not found")]
    NomineeNotFound,
    #[error("recipient not found")]
    RecipientNotFound,
    #[error("{0}")]
    Validation(String),
    #[error("voting is closed for this category")]
    VotingClosed,
    #[error("you have already voted; only one vote per phone number is allowed")]
    DuplicateVote,
    #[error("invalid invite code")]
    InvalidCode,
    #[error("invite code has already been used")]
    AlreadyUsed,
    #[error("attendee already checked in")]
    AlreadyCheckedIn,
    #[error("token has already been redeemed")]
    AlreadyRedeemed,
    #[error("please wait before requesting another code")]
    RateLimited,
    #[error("failed to send verification code")]
    SendFailed,
    #[error("invalid or expired code")]
    InvalidOrExpired,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl EventsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::AwardEventNotFound => "AWARD_EVENT_NOT_FOUND",
            Self::AttendeeNotFound => "ATTENDEE_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::NomineeNotFound => "NOMINEE_NOT_FOUND",
            Self::RecipientNotFound => "RECIPIENT_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::VotingClosed => "VOTING_CLOSED",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::InvalidCode => "INVALID_CODE",
            Self::AlreadyUsed => "ALREADY_USED",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::AlreadyRedeemed => "ALREADY_REDEEMED",
            Self::RateLimited => "RATE_LIMITED",
            Self::SendFailed => "SEND_FAILED",
            Self::InvalidOrExpired => "INVALID_OR_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<ovation_domain::phone::InvalidPhone> for EventsServiceError {
    fn from(e: ovation_domain::phone::InvalidPhone) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<ovation_domain::ticket::InvalidToken> for EventsServiceError {
    fn from(e: ovation_domain::ticket::InvalidToken) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for EventsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::EventNotFound
            | Self::AwardEventNotFound
            | Self::AttendeeNotFound
            | Self::CategoryNotFound
            | Self::NomineeNotFound
            | Self::RecipientNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidCode => StatusCode::BAD_REQUEST,
            Self::VotingClosed | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::DuplicateVote
            | Self::AlreadyUsed
            | Self::AlreadyCheckedIn
            | Self::AlreadyRedeemed => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::SendFailed => StatusCode::BAD_GATEWAY,
            Self::InvalidOrExpired => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
