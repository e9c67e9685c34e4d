use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use ovation_domain::phone::PhoneNumber;

use crate::domain::repository::{OtpRepository, OtpThrottle, SmsSender};
use crate::domain::types::{OTP_LEN, OTP_RESEND_COOLDOWN_SECS, OTP_TTL_SECS, Otp};
use crate::error::EventsServiceError;

pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

fn sms_body(code: &str) -> String {
    format!(
        "Your Ovation verification code is {code}. It expires in {} minutes.",
        OTP_TTL_SECS / 60
    )
}

// ── RequestOtp ───────────────────────────────────────────────────────────────

pub struct RequestOtpUseCase<O, T, S>
where
    O: OtpRepository,
    T: OtpThrottle,
    S: SmsSender,
{
    pub otps: O,
    pub throttle: T,
    pub sms: S,
    /// Normalized phones that never receive a code.
    pub admin_phones: Vec<String>,
}

impl<O, T, S> RequestOtpUseCase<O, T, S>
where
    O: OtpRepository,
    T: OtpThrottle,
    S: SmsSender,
{
    /// The cooldown is claimed before the code is stored. It is released if
    /// storing fails and kept if delivery fails.
    pub async fn execute(&self, raw_phone: &str) -> Result<(), EventsServiceError> {
        let phone = PhoneNumber::parse(raw_phone)?;
        if self.admin_phones.iter().any(|p| p == phone.as_str()) {
            tracing::info!("otp skipped for admin phone");
            return Ok(());
        }

        if !self
            .throttle
            .try_acquire(phone.as_str(), OTP_RESEND_COOLDOWN_SECS)
            .await?
        {
            return Err(EventsServiceError::RateLimited);
        }

        let now = Utc::now();
        let otp = Otp {
            id: Uuid::now_v7(),
            phone: phone.into_inner(),
            code: generate_otp(),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            verified: false,
            created_at: now,
        };
        if let Err(e) = self.otps.replace_for_phone(&otp).await {
            if let Err(release_err) = self.throttle.release(&otp.phone).await {
                tracing::warn!(error = %release_err, "otp cooldown not released");
            }
            return Err(e);
        }

        if let Err(e) = self.sms.send(&otp.phone, &sms_body(&otp.code)).await {
            tracing::warn!(error = %e, otp_id = %otp.id, "otp delivery failed");
            return Err(EventsServiceError::SendFailed);
        }
        tracing::info!(otp_id = %otp.id, "otp sent");
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpUseCase<O: OtpRepository> {
    pub otps: O,
    pub admin_phones: Vec<String>,
}

impl<O: OtpRepository> VerifyOtpUseCase<O> {
    /// Admin phones verify without a code.
    pub async fn execute(&self, raw_phone: &str, code: &str) -> Result<(), EventsServiceError> {
        let phone = PhoneNumber::parse(raw_phone)?;
        if self.admin_phones.iter().any(|p| p == phone.as_str()) {
            return Ok(());
        }

        let otp = self
            .otps
            .find_by_phone(phone.as_str())
            .await?
            .filter(|otp| otp.accepts(code.trim(), Utc::now()))
            .ok_or(EventsServiceError::InvalidOrExpired)?;
        if !self.otps.mark_verified(otp.id).await? {
            return Err(EventsServiceError::InvalidOrExpired);
        }
        tracing::info!(otp_id = %otp.id, "otp verified");
        Ok(())
    }
}
