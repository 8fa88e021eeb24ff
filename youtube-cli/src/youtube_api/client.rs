//! Core YouTube API client functionality and authentication management.

use crate::oauth::OAuthManager;
use crate::youtube_api::{
    YouTubeApi,
    channels::{Channel, ChannelListResponse},
    playlist_items::{PlaylistItem, PlaylistItemListResponse},
    search::{SearchListResponse, SearchResult},
    types::Page,
    videos::{Media, NewVideo, UploadedVideo, Video, VideoListResponse},
};
use eyre::Context;
use http::Method;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use oauth2::TokenResponse;
use oauth2::basic::BasicTokenResponse;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tracing::instrument;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/youtube/v3";

#[derive(Debug, Clone)]
pub struct TimeBoundAccessToken {
    token: BasicTokenResponse,
    /// When the current access token expires (with safety buffer)
    expires_at: SystemTime,
}

impl TimeBoundAccessToken {
    /// Creates a new YouTube token that is already expired, forcing immediate refresh.
    ///
    /// This is useful when loading tokens from storage where you want to ensure
    /// they are validated before use.
    pub fn expired(token: BasicTokenResponse) -> Self {
        Self {
            expires_at: SystemTime::UNIX_EPOCH,
            token,
        }
    }

    /// Creates a new YouTube token with calculated expiry time.
    ///
    /// The expiry time is calculated from the token's `expires_in` field minus
    /// a 5-minute safety buffer to prevent edge-case failures.
    pub fn new(token: BasicTokenResponse) -> Self {
        Self {
            expires_at: Self::calculate_token_expiry(&token),
            token,
        }
    }

    pub fn raw_token(&self) -> &BasicTokenResponse {
        &self.token
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }

    /// Refreshes this token using the provided OAuth manager, preserving the refresh token.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Token was successfully refreshed
    /// * `Ok(false)` - Refresh failed (invalid grant, no refresh token, etc.)
    /// * `Err(_)` - Network or other error occurred
    pub async fn refresh(&mut self, oauth_manager: &OAuthManager) -> eyre::Result<bool> {
        tracing::trace!("refreshing token");
        match oauth_manager
            .refresh_token(self.token.clone())
            .await
            .context("refresh OAuth token")?
        {
            Some(new_token) => {
                let old_token = std::mem::replace(&mut self.token, new_token);

                // Google only hands out the refresh token on the initial exchange.
                if self.token.refresh_token().is_none() {
                    tracing::trace!("new token lacks refresh token, preserving original");
                    self.token
                        .set_refresh_token(old_token.refresh_token().cloned());
                }

                self.expires_at = Self::calculate_token_expiry(&self.token);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Uses the current time + expires_in duration - 5 minute safety buffer.
    /// If no expires_in is provided, assumes a conservative 55-minute lifetime.
    fn calculate_token_expiry(token: &BasicTokenResponse) -> SystemTime {
        let now = SystemTime::now();
        if let Some(expires_in) = token.expires_in() {
            (now + expires_in)
                .checked_sub(Duration::from_secs(300))
                .unwrap_or(now)
        } else {
            now + Duration::from_secs(3300)
        }
    }
}

/// Client for interacting with the YouTube Data API v3.
///
/// This client wraps an OAuth2 token and provides methods to call various YouTube API endpoints.
/// All API calls require a valid OAuth2 access token with appropriate scopes.
///
/// The client automatically refreshes expired access tokens before API calls using the stored
/// refresh token and OAuth manager.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    token: Arc<Mutex<TimeBoundAccessToken>>,
    oauth_manager: Arc<OAuthManager>,
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a new YouTube API client with the provided OAuth2 token, OAuth manager, and HTTP client.
    pub fn new(
        token: TimeBoundAccessToken,
        oauth_manager: Arc<OAuthManager>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            token: Arc::new(Mutex::new(token)),
            oauth_manager,
            client,
        }
    }

    /// Gets a guaranteed-fresh access token, refreshing if necessary.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn fresh_access_token(&self) -> eyre::Result<String> {
        let mut token = self.token.lock().await;

        if token.is_expired() {
            tracing::debug!("access token expired, attempting refresh");

            if token.refresh(&self.oauth_manager).await? {
                tracing::debug!("access token successfully refreshed");
            } else {
                tracing::error!("access token refresh failed, client is unusable");
                return Err(eyre::eyre!("Unable to refresh expired access token"));
            }
        }

        Ok(token.token.access_token().secret().to_string())
    }

    /// Starts a request carrying a fresh bearer token.
    async fn authorized(&self, method: Method, url: &str) -> eyre::Result<reqwest::RequestBuilder> {
        let access_token = self.fresh_access_token().await?;
        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token)))
    }

    /// Sends `request` and turns any non-success status into an error carrying the response body.
    async fn send(
        request: reqwest::RequestBuilder,
        method: &Method,
        url: &str,
    ) -> eyre::Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("send {} request to YouTube API: {}", method, url))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                method,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Makes an authenticated HTTP request to the YouTube API with common error handling.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method to use (GET, POST, etc.)
    /// * `url` - The API endpoint URL
    /// * `query_params` - Optional query parameters
    /// * `json_body` - Optional JSON body
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for method-specific JSON parsing.
    #[instrument(skip(self, json_body), level = tracing::Level::TRACE)]
    async fn make_authenticated_request(
        &self,
        method: Method,
        url: &str,
        query_params: Option<&[(&str, &str)]>,
        json_body: Option<&impl Serialize>,
    ) -> eyre::Result<reqwest::Response> {
        let mut request = self.authorized(method.clone(), url).await?;

        if let Some(params) = query_params {
            request = request.query(params);
        }

        if let Some(body) = json_body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        Self::send(request, &method, url).await
    }
}

impl YouTubeApi for YouTubeClient {
    /// Looks up a single channel by its ID, with its snippet, content details and statistics.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    async fn channel(&self, channel_id: &str) -> eyre::Result<Option<Channel>> {
        let url = format!("{API_BASE}/channels");
        let query_params = [
            ("part", "snippet,contentDetails,statistics"),
            ("id", channel_id),
        ];

        let response = self
            .make_authenticated_request(Method::GET, &url, Some(&query_params), None::<&()>)
            .await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .context("parse YouTube channels API response as JSON")?;

        tracing::debug!(
            channel_id,
            returned_items = channels.items.len(),
            "fetched channel"
        );

        Ok(channels.items.into_iter().next())
    }

    /// Searches for channels matching `query`, most relevant first.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    async fn search_channels(&self, query: &str) -> eyre::Result<Vec<SearchResult>> {
        let url = format!("{API_BASE}/search");
        let query_params = [("part", "snippet"), ("q", query), ("type", "channel")];

        let response = self
            .make_authenticated_request(Method::GET, &url, Some(&query_params), None::<&()>)
            .await?;

        let results: SearchListResponse = response
            .json()
            .await
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            total_results = results.page_info.total_results,
            returned_items = results.items.len(),
            "searched channels"
        );

        Ok(results.items.into())
    }

    /// Fetches one page of a playlist.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<Page<PlaylistItem>> {
        let url = format!("{API_BASE}/playlistItems");
        let max_results_string = max_results.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(token) = page_token {
            query_params.push(("pageToken", token));
        }

        let response = self
            .make_authenticated_request(Method::GET, &url, Some(&query_params), None::<&()>)
            .await?;

        let items: PlaylistItemListResponse = response
            .json()
            .await
            .context("parse YouTube playlistItems API response as JSON")?;

        tracing::debug!(
            total_results = items.page_info.total_results,
            returned_items = items.items.len(),
            has_next_page = items.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(Page {
            items: items.items.into(),
            next_page_token: items.next_page_token,
        })
    }

    /// Fetches the given `parts` of every video in `video_ids` in a single call.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    async fn videos(&self, video_ids: &[String], parts: &str) -> eyre::Result<Vec<Video>> {
        let url = format!("{API_BASE}/videos");
        let ids = video_ids.join(",");
        let query_params = [("part", parts), ("id", ids.as_str())];

        let response = self
            .make_authenticated_request(Method::GET, &url, Some(&query_params), None::<&()>)
            .await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .context("parse YouTube videos API response as JSON")?;

        tracing::debug!(
            requested = video_ids.len(),
            returned_items = videos.items.len(),
            "fetched videos"
        );

        Ok(videos.items.into())
    }

    /// Uploads a new video using the resumable upload protocol.
    ///
    /// The first request creates an upload session from the JSON metadata; the second streams
    /// the file to the session URI the first one returned. A failed upload is not resumed.
    ///
    /// # Required Scopes
    ///
    /// * `https://www.googleapis.com/auth/youtube.upload`
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/guides/using_resumable_upload_protocol>
    #[instrument(skip(self, media), fields(length = media.length, content_type = media.content_type))]
    async fn insert_video(&self, video: &NewVideo, media: Media) -> eyre::Result<UploadedVideo> {
        let url = format!("{UPLOAD_BASE}/videos");
        let length = media.length.to_string();
        let request = self
            .authorized(Method::POST, &url)
            .await?
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .header("X-Upload-Content-Type", media.content_type)
            .header("X-Upload-Content-Length", &length)
            .json(video);
        let session = Self::send(request, &Method::POST, &url)
            .await
            .context("start resumable upload session")?;

        let session_uri = session
            .headers()
            .get(LOCATION)
            .ok_or_else(|| eyre::eyre!("upload session response has no Location header"))?
            .to_str()
            .context("upload session URI is not valid UTF-8")?
            .to_string();
        tracing::debug!("started resumable upload session");

        let request = self
            .authorized(Method::PUT, &session_uri)
            .await?
            .header(CONTENT_TYPE, media.content_type)
            .header(CONTENT_LENGTH, &length)
            .body(reqwest::Body::from(media.file));
        let response = Self::send(request, &Method::PUT, "resumable upload session")
            .await
            .context("upload video file")?;

        // The file is already accepted at this point; only the ID is read back.
        let uploaded: UploadedVideo = response
            .json()
            .await
            .context("parse YouTube videos.insert response as JSON")?;

        tracing::debug!(video_id = %uploaded.id, "uploaded video");

        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(expires_in: u64) -> BasicTokenResponse {
        serde_json::from_value(serde_json::json!({
            "access_token": "ya29.access",
            "token_type": "Bearer",
            "expires_in": expires_in,
        }))
        .unwrap()
    }

    #[test]
    fn stored_tokens_start_out_expired() {
        assert!(TimeBoundAccessToken::expired(token(3599)).is_expired());
    }

    #[test]
    fn fresh_tokens_are_usable_until_close_to_expiry() {
        assert!(!TimeBoundAccessToken::new(token(3599)).is_expired());
        // Inside the safety buffer already.
        assert!(TimeBoundAccessToken::new(token(60)).is_expired());
    }
}
