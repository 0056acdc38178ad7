use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// OAuth token persisted between runs. Obtaining the initial token is an
/// interactive, local-only step; servers only ever load and refresh it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// A token with no recorded expiry is treated as expired; a minute of
    /// clock skew is allowed for.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => expiry <= now + Duration::seconds(60),
            None => true,
        }
    }
}

/// Response from the token-refresh exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// Upload metadata as the caller sees it.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
    pub privacy_status: String,
    pub made_for_kids: bool,
}

impl VideoMetadata {
    /// Category 27 is "Education".
    pub fn new(title: impl Into<String>, description: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
            category_id: "27".to_string(),
            privacy_status: "public".to_string(),
            made_for_kids: false,
        }
    }

    pub fn to_resource(&self) -> VideoResource {
        VideoResource {
            snippet: Snippet {
                title: self.title.clone(),
                description: self.description.clone(),
                tags: self.tags.clone(),
                category_id: self.category_id.clone(),
            },
            status: Status {
                privacy_status: self.privacy_status.clone(),
                made_for_kids: self.made_for_kids,
            },
        }
    }
}

/// Wire form of the video metadata part.
#[derive(Debug, Clone, Serialize)]
pub struct VideoResource {
    pub snippet: Snippet,
    pub status: Status,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Status {
    #[serde(rename = "privacyStatus")]
    pub privacy_status: String,
    #[serde(rename = "madeForKids")]
    pub made_for_kids: bool,
}

/// Response body of a completed upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        let fresh = StoredToken {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
            expiry: Some(now + Duration::hours(1)),
        };
        assert!(!fresh.is_expired(now));

        let stale = StoredToken {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
            expiry: Some(now - Duration::minutes(5)),
        };
        assert!(stale.is_expired(now));

        // Inside the skew window counts as expired.
        let nearly = StoredToken {
            access_token: "a".to_string(),
            refresh_token: Some("r".to_string()),
            expiry: Some(now + Duration::seconds(30)),
        };
        assert!(nearly.is_expired(now));

        let unknown = StoredToken {
            access_token: "a".to_string(),
            refresh_token: None,
            expiry: None,
        };
        assert!(unknown.is_expired(now));
    }

    #[test]
    fn test_video_resource_wire_shape() {
        let meta = VideoMetadata::new("Title", "Desc", vec!["VDR".to_string()]);
        let json = serde_json::to_value(meta.to_resource()).unwrap();
        assert_eq!(json["snippet"]["title"], "Title");
        assert_eq!(json["snippet"]["categoryId"], "27");
        assert_eq!(json["status"]["privacyStatus"], "public");
        assert_eq!(json["status"]["madeForKids"], false);
    }
}
