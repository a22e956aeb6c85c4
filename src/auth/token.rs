use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ClientCredentials;

/// Yahoo access tokens live for one hour.
pub const DEFAULT_LIFETIME_SECS: i64 = 3600;

/// A token this close to expiry is treated as expired.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// OAuth2 credential as persisted in the token file.
///
/// Older token files record `token_time` (unix seconds at issue) and the
/// client as `consumer_key`/`consumer_secret`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub token_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(
        default,
        alias = "consumer_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_id: Option<String>,
    #[serde(
        default,
        alias = "consumer_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_secret: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of a successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub xoauth_yahoo_guid: Option<String>,
}

impl Credential {
    pub fn from_response(
        response: TokenResponse,
        client: &ClientCredentials,
        now: DateTime<Utc>,
    ) -> Self {
        let lifetime = response.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS);
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.filter(|t| !t.is_empty()),
            token_type: response.token_type.unwrap_or_else(default_token_type),
            expires_at: Some(now + Duration::seconds(lifetime)),
            token_time: None,
            guid: response.xoauth_yahoo_guid,
            client_id: Some(client.client_id.clone()),
            client_secret: Some(client.client_secret.clone()),
        }
    }

    /// Carry over what the provider omits on refresh.
    pub fn inheriting(mut self, previous: &Credential) -> Self {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
        if self.guid.is_none() {
            self.guid = previous.guid.clone();
        }
        self
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expires_at.or_else(|| {
            let issued = self.token_time?;
            let issued = Utc.timestamp_opt(issued as i64, 0).single()?;
            Some(issued + Duration::seconds(DEFAULT_LIFETIME_SECS))
        })
    }

    /// Unknown expiry counts as expired so the refresh path settles it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry() {
            Some(expiry) => now + Duration::seconds(EXPIRY_SKEW_SECS) >= expiry,
            None => true,
        }
    }

    pub fn client_credentials(&self) -> Option<ClientCredentials> {
        ClientCredentials::from_parts(self.client_id.clone(), self.client_secret.clone())
    }
}
