//! YouTube Data API v3 client library.
//!
//! This module provides a typed client for the part of the YouTube Data API v3 the CLI uses:
//! channel lookups, channel search, playlist paging and video lookup and upload.
//!
//! Command handlers are written against the [`YouTubeApi`] trait rather than the concrete
//! [`YouTubeClient`], so they can run against any implementation of these calls.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_cli::youtube_api::{YouTubeApi, YouTubeClient};
//!
//! # async fn example(client: YouTubeClient) -> eyre::Result<()> {
//! if let Some(channel) = client.channel("UC_x5XG1OV2P6uZZ5FSM9Ttw").await? {
//!     println!("{} has uploads in {:?}", channel.snippet.title, channel.uploads_playlist());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod search;
pub mod types;
pub mod videos;

pub use client::{TimeBoundAccessToken, YouTubeClient};
pub use types::{Page, PageInfo};

pub use channels::{Channel, ChannelSnippet, ChannelStatistics};
pub use playlist_items::PlaylistItem;
pub use search::SearchResult;
pub use videos::{
    Media, NewVideo, NewVideoSnippet, NewVideoStatus, PrivacyStatus, UploadedVideo, Video,
    VideoSnippet, VideoStatistics, VideoStatus,
};

/// The YouTube API calls the CLI's commands are built from.
///
/// A "not found" is not an error at this level: lookups return `None` or an empty list and it is
/// up to the caller to decide what that means.
#[allow(async_fn_in_trait)]
pub trait YouTubeApi {
    /// Looks up a channel by ID, including content details and statistics.
    async fn channel(&self, channel_id: &str) -> eyre::Result<Option<Channel>>;

    /// Searches for channels matching `query`, most relevant first.
    async fn search_channels(&self, query: &str) -> eyre::Result<Vec<SearchResult>>;

    /// Fetches up to `max_results` items of a playlist, starting at `page_token`.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<Page<PlaylistItem>>;

    /// Fetches the requested `parts` (comma separated) of the given videos.
    ///
    /// Unknown IDs are silently left out of the result.
    async fn videos(&self, video_ids: &[String], parts: &str) -> eyre::Result<Vec<Video>>;

    /// Uploads `media` as a new video described by `video`, returning the new video's ID.
    async fn insert_video(&self, video: &NewVideo, media: Media) -> eyre::Result<UploadedVideo>;
}
