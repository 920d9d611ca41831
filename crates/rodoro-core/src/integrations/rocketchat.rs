//! Rocket.Chat integration -- mirror the session state into the user's
//! chat availability ("busy" during work, "online" otherwise).

use std::error::Error;
use std::time::Duration;

use serde_json::json;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

use crate::config::PresenceConfig;
use crate::error::{ConfigError, CoreError};
use crate::session::{Presence, PresenceStatus};

/// Presence control against a Rocket.Chat server.
///
/// Requests are fired on the runtime and forgotten; the engine never waits
/// on the chat server. The client carries a short timeout so a dead server
/// cannot pile up requests.
pub struct RocketChatPresence {
    endpoint: Url,
    user_id: String,
    auth_token: String,
    client: reqwest::Client,
    runtime: Handle,
}

impl RocketChatPresence {
    pub fn new(config: &PresenceConfig, runtime: Handle) -> Result<Self, CoreError> {
        let base = Url::parse(&config.server).map_err(|e| ConfigError::InvalidValue {
            key: "presence.server".into(),
            message: e.to_string(),
        })?;
        let endpoint = base
            .join("api/v1/users.setStatus")
            .map_err(|e| ConfigError::InvalidValue {
                key: "presence.server".into(),
                message: e.to_string(),
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .map_err(|e| CoreError::Custom(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            endpoint,
            user_id: config.user_id.clone(),
            auth_token: config.auth_token.clone(),
            client,
            runtime,
        })
    }
}

impl Presence for RocketChatPresence {
    fn set_status(&self, status: PresenceStatus) -> Result<(), Box<dyn Error>> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .header("X-User-Id", self.user_id.as_str())
            .header("X-Auth-Token", self.auth_token.as_str())
            .json(&json!({
                "message": "",
                "status": status.as_str(),
            }));

        self.runtime.spawn(async move {
            match request.send().await {
                Ok(resp) if !resp.status().is_success() => {
                    warn!("Rocket.Chat users.setStatus error: HTTP {}", resp.status());
                }
                Ok(_) => debug!(status = status.as_str(), "presence updated"),
                Err(e) => warn!("Rocket.Chat users.setStatus failed: {e}"),
            }
        });
        Ok(())
    }
}
