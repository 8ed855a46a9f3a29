use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostBody {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeState {
    pub is_liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowState {
    pub is_following: bool,
    pub follower_count: i64,
}

/// Error body the backend attaches to rejected requests (4xx JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    pub error: String,
}
