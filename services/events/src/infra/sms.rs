use serde::Serialize;

use crate::domain::repository::SmsSender;
use crate::error::EventsServiceError;

/// SMS gateway reached over HTTPS with a bearer API key.
#[derive(Clone)]
pub struct HttpSmsSender {
    pub client: reqwest::Client,
    pub gateway_url: String,
    pub api_key: String,
    pub sender_id: String,
}

#[derive(Serialize)]
struct SendSmsRequest<'a> {
    to: &'a str,
    from: &'a str,
    message: &'a str,
}

impl SmsSender for HttpSmsSender {
    async fn send(&self, phone: &str, body: &str) -> Result<(), EventsServiceError> {
        self.client
            .post(&self.gateway_url)
            .bearer_auth(&self.api_key)
            .json(&SendSmsRequest {
                to: phone,
                from: &self.sender_id,
                message: body,
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| EventsServiceError::Internal(e.into()))?;
        Ok(())
    }
}
