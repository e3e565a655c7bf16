//! Authorized-user credential material and token acquisition.
//!
//! Credentials arrive in Google's authorized-user JSON shape, either inline
//! from the settings tree or from a token file. The only OAuth interaction
//! this crate performs is a single refresh-token exchange at adapter
//! construction; the interactive authorization flow that produced the
//! refresh token is somebody else's job.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ToolError, ToolResult};

/// Google's OAuth 2.0 token endpoint.
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// The authorized-user token file shape.
///
/// All fields are optional at parse time; [`AuthorizedUser::bearer_token`]
/// decides whether the material on hand is actually usable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthorizedUser {
    /// A still-valid access token, if one was persisted.
    pub token: Option<String>,

    /// Long-lived refresh token.
    pub refresh_token: Option<String>,

    /// OAuth client id the refresh token was issued to.
    pub client_id: Option<String>,

    /// OAuth client secret.
    pub client_secret: Option<String>,

    /// Token endpoint override; defaults to [`GOOGLE_TOKEN_URL`].
    pub token_uri: Option<String>,
}

impl AuthorizedUser {
    /// Builds credentials from an already-parsed inline JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Reads credentials from a token file.
    pub fn from_file(path: &Path) -> ToolResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ToolError::CredentialFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ToolError::CredentialFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Produces a bearer token for API requests.
    ///
    /// An inline access token is used as-is; otherwise the refresh token is
    /// exchanged at the token endpoint. Fails with `NoCredentials` when the
    /// material on hand supports neither route.
    pub fn bearer_token(
        &self,
        http: &reqwest::blocking::Client,
        tool_name: &str,
    ) -> ToolResult<String> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            debug!("using access token from credential material");
            return Ok(token.to_string());
        }

        let (refresh_token, client_id, client_secret) = match (
            self.refresh_token.as_deref().filter(|t| !t.is_empty()),
            self.client_id.as_deref(),
            self.client_secret.as_deref(),
        ) {
            (Some(r), Some(i), Some(s)) => (r, i, s),
            _ => return Err(ToolError::NoCredentials(tool_name.to_string())),
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let endpoint = self.token_uri.as_deref().unwrap_or(GOOGLE_TOKEN_URL);
        let response = http
            .post(endpoint)
            .form(&params)
            .send()
            .map_err(ToolError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ToolError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ToolError::Backend {
                status: status.as_u16(),
                message: format!("token exchange failed: {body}"),
            });
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ToolError::InvalidResponse(format!("invalid token response: {e}")))?;

        info!("exchanged refresh token for access token");
        Ok(token_response.access_token)
    }
}

/// Response from the token endpoint. Expiry is irrelevant here: the token is
/// used for the lifetime of one adapter and never persisted.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use super::*;

    fn http() -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap()
    }

    #[test]
    fn from_value_accepts_authorized_user_shape() {
        let value = serde_json::json!({
            "token": "ya29.abc",
            "refresh_token": "1//refresh",
            "client_id": "id.apps.googleusercontent.com",
            "client_secret": "secret"
        });
        let creds = AuthorizedUser::from_value(value).unwrap();
        assert_eq!(creds.token.as_deref(), Some("ya29.abc"));
        assert_eq!(creds.refresh_token.as_deref(), Some("1//refresh"));
    }

    #[test]
    fn from_value_tolerates_extra_fields() {
        let value = serde_json::json!({
            "refresh_token": "1//refresh",
            "client_id": "id",
            "client_secret": "secret",
            "project_id": "dummy",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth"
        });
        assert!(AuthorizedUser::from_value(value).is_ok());
    }

    #[test]
    fn from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"token": "ya29.file"}"#).unwrap();

        let creds = AuthorizedUser::from_file(file.path()).unwrap();
        assert_eq!(creds.token.as_deref(), Some("ya29.file"));
    }

    #[test]
    fn from_file_missing_is_credential_file_error() {
        let err = AuthorizedUser::from_file(Path::new("/nonexistent/token.json")).unwrap_err();
        assert!(matches!(err, ToolError::CredentialFile { .. }));
    }

    #[test]
    fn bearer_token_prefers_inline_access_token() {
        // With an access token present, no network request is made.
        let creds = AuthorizedUser {
            token: Some("ya29.direct".to_string()),
            refresh_token: Some("1//unused".to_string()),
            ..Default::default()
        };
        let token = creds.bearer_token(&http(), "cal").unwrap();
        assert_eq!(token, "ya29.direct");
    }

    #[test]
    fn bearer_token_without_usable_material() {
        let creds = AuthorizedUser {
            // Refresh token alone is useless without client id/secret.
            refresh_token: Some("1//refresh".to_string()),
            ..Default::default()
        };
        let err = creds.bearer_token(&http(), "cal").unwrap_err();
        assert!(matches!(err, ToolError::NoCredentials(ref n) if n == "cal"));
    }

    #[test]
    fn token_response_ignores_extra_fields() {
        let json = r#"{"access_token": "ya29.new", "expires_in": 3599, "token_type": "Bearer"}"#;
        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "ya29.new");
    }
}
