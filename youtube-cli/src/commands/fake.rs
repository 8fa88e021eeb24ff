//! An in-memory stand-in for the YouTube API used by the command tests.

use crate::youtube_api::{
    Channel, Media, NewVideo, Page, PlaylistItem, SearchResult, UploadedVideo, Video, YouTubeApi,
};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct FakeYouTube {
    pub channels: HashMap<String, Channel>,
    pub searches: HashMap<String, Vec<SearchResult>>,
    pub videos: HashMap<String, Video>,
    /// Keyed by playlist ID and the page token that fetches the page ("" for the first page).
    pub playlist_pages: HashMap<(String, String), Page<PlaylistItem>>,
    /// Every call made, in order, in a compact textual form.
    pub calls: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<(NewVideo, u64)>>,
}

impl FakeYouTube {
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.insert(channel.id.clone(), channel);
        self
    }

    pub fn with_video(mut self, video: Video) -> Self {
        self.videos.insert(video.id.clone(), video);
        self
    }

    pub fn with_search(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.searches.insert(query.to_string(), results);
        self
    }

    pub fn with_page(
        mut self,
        playlist_id: &str,
        page_token: &str,
        video_ids: &[&str],
        next_page_token: Option<&str>,
    ) -> Self {
        let items = video_ids.iter().map(|id| playlist_item(id)).collect();
        self.playlist_pages.insert(
            (playlist_id.to_string(), page_token.to_string()),
            Page {
                items,
                next_page_token: next_page_token.map(String::from),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl YouTubeApi for FakeYouTube {
    async fn channel(&self, channel_id: &str) -> eyre::Result<Option<Channel>> {
        self.record(format!("channel {channel_id}"));
        Ok(self.channels.get(channel_id).cloned())
    }

    async fn search_channels(&self, query: &str) -> eyre::Result<Vec<SearchResult>> {
        self.record(format!("search {query}"));
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<Page<PlaylistItem>> {
        let page_token = page_token.unwrap_or_default();
        self.record(format!(
            "playlist {playlist_id} max={max_results} token={page_token}"
        ));
        self.playlist_pages
            .get(&(playlist_id.to_string(), page_token.to_string()))
            .cloned()
            .ok_or_else(|| eyre::eyre!("no such playlist page"))
    }

    async fn videos(&self, video_ids: &[String], parts: &str) -> eyre::Result<Vec<Video>> {
        self.record(format!("videos {} {parts}", video_ids.join(",")));
        Ok(video_ids
            .iter()
            .filter_map(|id| self.videos.get(id).cloned())
            .collect())
    }

    async fn insert_video(&self, video: &NewVideo, media: Media) -> eyre::Result<UploadedVideo> {
        self.record(format!("insert {}", media.content_type));
        self.uploads.borrow_mut().push((video.clone(), media.length));
        Ok(UploadedVideo {
            id: "uploaded123".into(),
        })
    }
}

pub(crate) fn channel(id: &str, title: &str) -> Channel {
    serde_json::from_value(json!({
        "id": id,
        "snippet": {
            "title": title,
            "description": format!("All about {title}"),
            "publishedAt": "2015-05-15T00:00:00Z"
        },
        "contentDetails": {
            "relatedPlaylists": { "uploads": id.replacen("UC", "UU", 1) }
        },
        "statistics": {
            "viewCount": "1000",
            "subscriberCount": "100",
            "hiddenSubscriberCount": false,
            "videoCount": "10"
        }
    }))
    .expect("fixture channel is valid")
}

pub(crate) fn video(id: &str, title: &str) -> Video {
    video_on(id, title, "UC1")
}

pub(crate) fn video_on(id: &str, title: &str, channel_id: &str) -> Video {
    serde_json::from_value(json!({
        "id": id,
        "snippet": {
            "publishedAt": "2024-03-01T12:00:00Z",
            "channelId": channel_id,
            "title": title,
            "description": ""
        },
        "statistics": { "viewCount": "42", "likeCount": "7", "commentCount": "3" },
        "status": { "privacyStatus": "public", "uploadStatus": "processed" }
    }))
    .expect("fixture video is valid")
}

pub(crate) fn search_result(channel_id: &str, title: &str) -> SearchResult {
    serde_json::from_value(json!({
        "id": { "kind": "youtube#channel", "channelId": channel_id },
        "snippet": {
            "channelId": channel_id,
            "title": title,
            "description": format!("search snippet for {title}")
        }
    }))
    .expect("fixture search result is valid")
}

pub(crate) fn playlist_item(video_id: &str) -> PlaylistItem {
    serde_json::from_value(json!({
        "id": format!("item-{video_id}"),
        "snippet": {
            "title": video_id,
            "resourceId": { "kind": "youtube#video", "videoId": video_id }
        }
    }))
    .expect("fixture playlist item is valid")
}
