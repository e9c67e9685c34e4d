use serde::Deserialize;

use ovation_core::config::Config;
use ovation_domain::phone::PhoneNumber;

/// Events service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct EventsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis URL for the OTP resend throttle.
    pub redis_url: String,
    /// Value organizers send in `x-ovation-admin-key`.
    pub admin_key: String,
    /// Phones that skip OTP delivery and verify without a code. Comma-separated.
    #[serde(default)]
    pub admin_phones: Vec<String>,
    pub sms_gateway_url: String,
    pub sms_api_key: String,
    #[serde(default = "default_sms_sender_id")]
    pub sms_sender_id: String,
    /// TCP port for the HTTP server (default 3120). Env var: `EVENTS_PORT`.
    #[serde(default = "default_events_port")]
    pub events_port: u16,
    /// Timeout in seconds for connecting, acquiring a pooled connection, and
    /// each statement (Postgres `statement_timeout`).
    #[serde(default = "default_db_timeout_secs")]
    pub db_timeout_secs: u64,
}

fn default_sms_sender_id() -> String {
    "OVATION".to_owned()
}

fn default_events_port() -> u16 {
    3120
}

fn default_db_timeout_secs() -> u64 {
    5
}

impl Config for EventsConfig {}

impl EventsConfig {
    /// `database_url` with a server-side `statement_timeout` of
    /// `db_timeout_secs`. A statement that runs past it fails with an error.
    pub fn database_url_with_statement_timeout(&self) -> String {
        let separator = if self.database_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}options=-c%20statement_timeout%3D{}",
            self.database_url,
            self.db_timeout_secs * 1000
        )
    }

    /// Admin phones in normalized form. Entries that are not phone numbers are dropped.
    pub fn normalized_admin_phones(&self) -> Vec<String> {
        self.admin_phones
            .iter()
            .filter_map(|raw| match PhoneNumber::parse(raw) {
                Ok(p) => Some(p.into_inner()),
                Err(_) => {
                    tracing::warn!(entry = %raw, "ignoring malformed ADMIN_PHONES entry");
                    None
                }
            })
            .collect()
    }
}
