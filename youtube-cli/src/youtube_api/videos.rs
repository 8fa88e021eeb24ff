//! YouTube Videos API types and functionality.

use eyre::Context;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

/// Response structure for the `videos.list` API call.
///
/// Contains the [`Video`] resources that match the request criteria. IDs that do not exist are
/// left out rather than reported.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// A list of videos that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Video>,
}

/// A `video` resource represents a YouTube video.
///
/// Which of the optional parts are present depends on the `part` parameter of the request.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    /// Contains basic details about the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    /// Contains statistics about the video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    /// Contains upload, processing and privacy status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatus>,
}

/// Basic details about a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    /// The date and time that the video was published.
    pub published_at: Timestamp,
    /// The ID of the channel that the video was uploaded to.
    pub channel_id: String,
    pub title: String,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#status>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatus {
    pub privacy_status: PrivacyStatus,
}

/// Who can see a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#status.privacyStatus>
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyStatus {
    Public,
    Private,
    Unlisted,
}

impl fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivacyStatus::Public => write!(f, "public"),
            PrivacyStatus::Private => write!(f, "private"),
            PrivacyStatus::Unlisted => write!(f, "unlisted"),
        }
    }
}

/// The resource sent to `videos.insert` to describe a new upload.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/insert>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVideo {
    pub snippet: NewVideoSnippet,
    pub status: NewVideoStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideoSnippet {
    pub title: String,
    pub description: String,
    /// See `videoCategories.list` for the valid IDs; `22` is "People & Blogs".
    pub category_id: String,
    /// Left out of the request entirely when there are no tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideoStatus {
    pub privacy_status: PrivacyStatus,
}

/// What is read back from `videos.insert` once the file has been accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedVideo {
    /// The ID YouTube assigned to the new video.
    pub id: String,
}

/// A local video file ready to be streamed to the upload endpoint.
#[derive(Debug)]
pub struct Media {
    pub file: tokio::fs::File,
    pub content_type: &'static str,
    pub length: u64,
}

impl Media {
    /// Opens `path` for streaming.
    ///
    /// The file stays open until the [`Media`] is dropped, which happens once the upload
    /// request that consumed it completes.
    pub async fn open(path: &Path) -> eyre::Result<Self> {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Error opening {}", path.display()))?;
        let length = file
            .metadata()
            .await
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        Ok(Self {
            file,
            content_type: content_type_for(path),
            length,
        })
    }
}

/// Picks the MIME type announced for an upload from the file extension.
pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        Some("wmv") => "video/x-ms-wmv",
        Some("flv") => "video/x-flv",
        Some("mpg" | "mpeg") => "video/mpeg",
        Some("3gp") => "video/3gpp",
        _ => "application/octet-stream",
    }
}
