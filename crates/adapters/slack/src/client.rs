//! Slack Web API client acting as a single user.

use serde::Deserialize;
use serde_json::{Value, json};

use awaybot_app::ports::{DndState, PresenceConnector, PresenceService, ServiceError};
use awaybot_domain::duration::Minutes;
use awaybot_domain::presence::Presence;

use crate::error::SlackError;

/// Slack Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Connection settings shared by every client.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Base URL of the Web API, without a trailing slash.
    pub api_url: String,
    /// Log request parameters and raw responses at `debug` level.
    pub debug: bool,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debug: false,
        }
    }
}

/// Builds a [`SlackClient`] per resolved user token, sharing one HTTP pool.
#[derive(Clone)]
pub struct SlackConnector {
    http: reqwest::Client,
    config: SlackConfig,
}

impl SlackConnector {
    /// Create a connector with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("awaybot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SlackError::Http {
                method: "client",
                source,
            })?;
        Ok(Self { http, config })
    }
}

impl PresenceConnector for SlackConnector {
    type Service = SlackClient;

    fn connect(&self, token: String) -> SlackClient {
        SlackClient {
            http: self.http.clone(),
            config: self.config.clone(),
            token,
        }
    }
}

/// Slack Web API calls authenticated with one user token.
pub struct SlackClient {
    http: reqwest::Client,
    config: SlackConfig,
    token: String,
}

#[derive(Debug, Deserialize)]
struct DndInfo {
    #[serde(default)]
    snooze_enabled: bool,
}

impl SlackClient {
    fn url(&self, method: &str) -> String {
        format!("{}/{method}", self.config.api_url)
    }

    async fn post(
        &self,
        method: &'static str,
        form: &[(&str, String)],
    ) -> Result<Value, SlackError> {
        if self.config.debug {
            tracing::debug!(method, ?form, "slack request");
        }
        let request = self
            .http
            .post(self.url(method))
            .bearer_auth(&self.token)
            .form(form);
        self.send(method, request).await
    }

    async fn get(&self, method: &'static str, query: &[(&str, &str)]) -> Result<Value, SlackError> {
        if self.config.debug {
            tracing::debug!(method, ?query, "slack request");
        }
        let request = self
            .http
            .get(self.url(method))
            .bearer_auth(&self.token)
            .query(query);
        self.send(method, request).await
    }

    async fn send(
        &self,
        method: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, SlackError> {
        let http_err = |source| SlackError::Http { method, source };
        let body = request
            .send()
            .await
            .map_err(http_err)?
            .text()
            .await
            .map_err(http_err)?;
        if self.config.debug {
            tracing::debug!(method, %body, "slack response");
        }
        check_envelope(method, &body)
    }
}

/// Decode a Web API response, failing on `"ok": false`.
fn check_envelope(method: &'static str, body: &str) -> Result<Value, SlackError> {
    let value: Value =
        serde_json::from_str(body).map_err(|source| SlackError::Decode { method, source })?;
    if value.get("ok").and_then(Value::as_bool) == Some(true) {
        return Ok(value);
    }
    let code = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown_error")
        .to_string();
    Err(SlackError::Api { method, code })
}

/// Wire value for `users.setPresence`.
fn presence_param(presence: Presence) -> &'static str {
    match presence {
        Presence::Active => "auto",
        Presence::Away => "away",
    }
}

/// Unix timestamp at which a status set at `now` expires, `0` for never.
fn status_expiration(duration: Minutes, now: chrono::DateTime<chrono::Utc>) -> i64 {
    if duration.is_zero() {
        return 0;
    }
    let seconds = i64::try_from(duration.get().saturating_mul(60)).unwrap_or(i64::MAX);
    now.timestamp().saturating_add(seconds)
}

impl PresenceService for SlackClient {
    async fn set_presence(&self, presence: Presence) -> Result<(), ServiceError> {
        self.post(
            "users.setPresence",
            &[("presence", presence_param(presence).to_string())],
        )
        .await?;
        Ok(())
    }

    async fn set_status(
        &self,
        text: &str,
        emoji: &str,
        duration: Minutes,
    ) -> Result<(), ServiceError> {
        let profile = json!({
            "status_text": text,
            "status_emoji": emoji,
            "status_expiration": status_expiration(duration, chrono::Utc::now()),
        });
        self.post("users.profile.set", &[("profile", profile.to_string())])
            .await?;
        Ok(())
    }

    async fn get_dnd_state(&self, user_id: &str) -> Result<DndState, ServiceError> {
        const METHOD: &str = "dnd.info";
        let value = self.get(METHOD, &[("user", user_id)]).await?;
        let info: DndInfo = serde_json::from_value(value)
            .map_err(|source| SlackError::Decode { method: METHOD, source })?;
        Ok(DndState {
            snooze_enabled: info.snooze_enabled,
        })
    }

    async fn end_snooze(&self) -> Result<(), ServiceError> {
        self.post("dnd.endSnooze", &[]).await?;
        Ok(())
    }

    async fn set_snooze(&self, duration: Minutes) -> Result<(), ServiceError> {
        self.post("dnd.setSnooze", &[("num_minutes", duration.get().to_string())])
            .await?;
        Ok(())
    }
}
