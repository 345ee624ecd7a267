use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::error::{error_from_response, ApiError};
use crate::models::{Config, User};
use crate::utils::paths::get_session_path;

/// A signed-in session as cached on disk between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: User,
}

/// Client for the hosted auth provider. Sign-in uses the password grant;
/// sign-out revokes the token server-side.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let token: TokenResponse = response.json().await?;
        Ok(AuthSession {
            access_token: token.access_token,
            user: token.user,
        })
    }

    /// Fetch the identity behind a token. Used to confirm a cached session
    /// is still live.
    pub async fn fetch_user(&self, session: &AuthSession) -> Result<User, ApiError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json().await?)
    }

    pub async fn sign_out(&self, session: &AuthSession) -> Result<(), ApiError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }
}

pub fn load_session() -> Result<Option<AuthSession>> {
    let path = get_session_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let session = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Stored session is unreadable: {}. Run 'tally login'.", e))?;
    Ok(Some(session))
}

pub fn store_session(session: &AuthSession) -> Result<()> {
    let path = get_session_path()?;
    let contents = serde_json::to_string_pretty(session)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    let path = get_session_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn session_round_trips_through_json() {
        let session = AuthSession {
            access_token: "token-123".to_string(),
            user: User {
                id: Uuid::nil(),
                email: "dev@example.com".to_string(),
            },
        };

        let json = serde_json::to_string(&session).unwrap();
        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.access_token, "token-123");
        assert_eq!(back.user.email, "dev@example.com");
    }
}
