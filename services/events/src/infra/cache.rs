use deadpool_redis::Pool;
use deadpool_redis::redis;

use crate::domain::repository::OtpThrottle;
use crate::error::EventsServiceError;

/// Resend cooldown shared by every service instance.
#[derive(Clone)]
pub struct RedisOtpThrottle {
    pub pool: Pool,
}

fn throttle_key(phone: &str) -> String {
    format!("otp_throttle:{phone}")
}

impl OtpThrottle for RedisOtpThrottle {
    async fn try_acquire(&self, phone: &str, ttl_secs: u64) -> Result<bool, EventsServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| EventsServiceError::Internal(e.into()))?;
        // SET NX replies OK when the key was created and nil when it already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(throttle_key(phone))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(|e: redis::RedisError| EventsServiceError::Internal(e.into()))?;
        Ok(reply.is_some())
    }

    async fn release(&self, phone: &str) -> Result<(), EventsServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| EventsServiceError::Internal(e.into()))?;
        let _: () = redis::cmd("DEL")
            .arg(throttle_key(phone))
            .query_async(&mut conn)
            .await
            .map_err(|e: redis::RedisError| EventsServiceError::Internal(e.into()))?;
        Ok(())
    }
}
