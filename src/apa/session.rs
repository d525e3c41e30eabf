//! Access-token session: trades the refresh token for short-lived access
//! tokens and renews them on expiry.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    apa::{
        http::{GraphqlClient, GraphqlRequest},
        queries::GENERATE_ACCESS_TOKEN,
        types::GenerateAccessTokenData,
    },
    error::{ApaError, Result},
};

#[cfg(test)]
mod tests;

/// Lifetime assumed for tokens whose expiry cannot be read.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 55 * 60;

/// A token this close to expiry is treated as already expired.
pub const REFRESH_MARGIN_SECS: i64 = 30;

/// Access token plus the moment it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Credentials for a token received just now. Expiry comes from the JWT
    /// `exp` claim, or [`DEFAULT_TOKEN_LIFETIME_SECS`] when there is none.
    pub fn issued_now(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();
        let expires_at = jwt_expiry(&access_token)
            .unwrap_or_else(|| Utc::now() + TimeDelta::seconds(DEFAULT_TOKEN_LIFETIME_SECS));
        Self {
            access_token,
            expires_at,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

#[derive(Deserialize)]
struct JwtClaims {
    exp: i64,
}

/// Read the `exp` claim from a JWT without verifying it.
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JwtClaims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Owns the refresh token and the cached access token.
///
/// The cache lock is held across a refresh, so concurrent callers that all
/// find the token expired wait for a single `generateAccessToken` call.
pub struct Session {
    client: GraphqlClient,
    refresh_token: String,
    credentials: Mutex<Option<Credentials>>,
}

impl Session {
    pub fn new(client: GraphqlClient, refresh_token: impl Into<String>) -> Self {
        Self {
            client,
            refresh_token: refresh_token.into(),
            credentials: Mutex::new(None),
        }
    }

    /// Seed the cache with an externally supplied access token.
    pub fn with_access_token(self, access_token: Option<String>) -> Self {
        match access_token {
            Some(token) => self.with_credentials(Credentials::issued_now(token)),
            None => self,
        }
    }

    pub fn with_credentials(self, credentials: Credentials) -> Self {
        debug!(expires_at = %credentials.expires_at, "seeding access token");
        Self {
            credentials: Mutex::new(Some(credentials)),
            ..self
        }
    }

    /// A non-expired access token, refreshing first if needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.credentials.lock().await;

        if let Some(credentials) = cached.as_ref().filter(|c| c.is_valid()) {
            return Ok(credentials.access_token.clone());
        }

        let fresh = self.refresh().await?;
        let token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    /// Snapshot of the cached credentials, if any.
    pub async fn credentials(&self) -> Option<Credentials> {
        self.credentials.lock().await.clone()
    }

    /// Forget `rejected` so the next call refreshes.
    ///
    /// A no-op when the cache already holds a different token, which happens
    /// when another request refreshed after `rejected` was handed out.
    pub async fn invalidate(&self, rejected: &str) {
        let mut cached = self.credentials.lock().await;
        if cached.as_ref().is_some_and(|c| c.access_token == rejected) {
            warn!("discarding cached access token");
            *cached = None;
        } else {
            debug!("rejected access token already replaced");
        }
    }

    /// One `generateAccessToken` round trip. No retry.
    async fn refresh(&self) -> Result<Credentials> {
        info!("refreshing APA access token");

        let request = GraphqlRequest::mutation(GENERATE_ACCESS_TOKEN)
            .variables(json!({ "refreshToken": self.refresh_token }));

        let data = self
            .client
            .execute(&request, None)
            .await
            .map_err(rejected_refresh)?;

        let payload: GenerateAccessTokenData =
            serde_json::from_value(data).map_err(rejected_refresh)?;

        let token = payload
            .generate_access_token
            .and_then(|p| p.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApaError::Authentication {
                message: "no access token found in response".to_string(),
            })?;

        let credentials = Credentials::issued_now(token);
        info!(expires_at = %credentials.expires_at, "access token refreshed");
        Ok(credentials)
    }
}

/// Anything but a transport failure means APA refused the refresh token.
fn rejected_refresh(err: impl Into<ApaError>) -> ApaError {
    match err.into() {
        e @ ApaError::Http(_) => e,
        e => {
            warn!(error = %e, "access token refresh rejected");
            ApaError::Authentication {
                message: e.to_string(),
            }
        }
    }
}
