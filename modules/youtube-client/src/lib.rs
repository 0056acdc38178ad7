pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{StoredToken, TokenResponse, UploadResponse, VideoMetadata};

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use tracing::{info, warn};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/youtube/v3/videos?uploadType=multipart&part=snippet,status";

pub struct YouTubeClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_path: PathBuf,
}

impl YouTubeClient {
    pub fn new(client_id: &str, client_secret: &str, token_path: &Path) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_path: token_path.to_path_buf(),
        }
    }

    /// Load the persisted token, refreshing and re-persisting it when
    /// expired. The initial token must already exist on disk; there is no
    /// interactive authorization here.
    pub async fn ensure_fresh_token(&self) -> Result<StoredToken> {
        let raw = std::fs::read_to_string(&self.token_path).map_err(|e| {
            YouTubeError::Auth(format!(
                "token file {} unreadable ({e}); authorize locally and deploy the token file",
                self.token_path.display()
            ))
        })?;
        let mut token: StoredToken = serde_json::from_str(&raw)?;

        if !token.is_expired(Utc::now()) {
            return Ok(token);
        }

        let refresh_token = token.refresh_token.clone().ok_or_else(|| {
            YouTubeError::Auth(
                "stored token is expired and has no refresh token; re-authorization required"
                    .to_string(),
            )
        })?;

        info!("Refreshing expired access token");
        let refreshed = self.refresh(&refresh_token).await?;
        token.access_token = refreshed.access_token;
        token.expiry = Some(Utc::now() + Duration::seconds(refreshed.expires_in));

        if let Err(e) = self.save_token(&token) {
            // A failed save only costs an extra refresh next run.
            warn!(error = %e, "Could not persist refreshed token");
        }

        Ok(token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let resp = self.client.post(TOKEN_URL).form(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Auth(format!(
                "token refresh rejected (status {status}): {message}; re-authorization required"
            )));
        }

        Ok(resp.json().await?)
    }

    fn save_token(&self, token: &StoredToken) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.token_path, json)?;
        Ok(())
    }

    /// Upload a video file with its metadata. Returns the new video id.
    pub async fn upload(&self, file: &Path, metadata: &VideoMetadata) -> Result<String> {
        let token = self.ensure_fresh_token().await?;

        let body = tokio::fs::read(file).await?;
        info!(
            file = %file.display(),
            bytes = body.len(),
            title = %metadata.title,
            "Starting video upload"
        );

        let meta_part = reqwest::multipart::Part::text(serde_json::to_string(
            &metadata.to_resource(),
        )?)
        .mime_str("application/json")
        .map_err(|e| YouTubeError::Parse(e.to_string()))?;

        let video_part = reqwest::multipart::Part::bytes(body)
            .mime_str("video/mp4")
            .map_err(|e| YouTubeError::Parse(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("metadata", meta_part)
            .part("video", video_part);

        let resp = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(&token.access_token)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = resp.json().await?;
        info!(
            video_id = %uploaded.id,
            watch_url = %format!("https://www.youtube.com/watch?v={}", uploaded.id),
            "Upload complete"
        );
        Ok(uploaded.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_file_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = YouTubeClient::new("id", "secret", &dir.path().join("absent.json"));
        let err = client.ensure_fresh_token().await.unwrap_err();
        assert!(matches!(err, YouTubeError::Auth(_)));
    }

    #[tokio::test]
    async fn test_unexpired_token_used_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let token = StoredToken {
            access_token: "live-token".to_string(),
            refresh_token: Some("r".to_string()),
            expiry: Some(Utc::now() + Duration::hours(1)),
        };
        std::fs::write(&path, serde_json::to_string(&token).unwrap()).unwrap();

        let client = YouTubeClient::new("id", "secret", &path);
        let loaded = client.ensure_fresh_token().await.unwrap();
        assert_eq!(loaded.access_token, "live-token");
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let token = StoredToken {
            access_token: "stale".to_string(),
            refresh_token: None,
            expiry: Some(Utc::now() - Duration::hours(1)),
        };
        std::fs::write(&path, serde_json::to_string(&token).unwrap()).unwrap();

        let client = YouTubeClient::new("id", "secret", &path);
        let err = client.ensure_fresh_token().await.unwrap_err();
        assert!(matches!(err, YouTubeError::Auth(_)));
    }
}
