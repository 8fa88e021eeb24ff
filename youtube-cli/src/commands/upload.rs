//! `upload`: upload a local video file.

use crate::youtube_api::{Media, NewVideo, NewVideoSnippet, NewVideoStatus, PrivacyStatus, YouTubeApi};
use eyre::Context;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// Name of video file to upload
    #[arg(long)]
    pub filename: PathBuf,

    /// Video title
    #[arg(long, default_value = "Test Title")]
    pub title: String,

    /// Video description
    #[arg(long, default_value = "Test Description")]
    pub description: String,

    /// Video category
    #[arg(long, default_value = "22")]
    pub category: String,

    /// Comma separated list of video keywords
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Video privacy status
    #[arg(long, value_enum, default_value_t = PrivacyStatus::Unlisted)]
    pub privacy: PrivacyStatus,
}

impl Args {
    /// The resource describing this upload.
    pub fn new_video(&self) -> NewVideo {
        NewVideo {
            snippet: NewVideoSnippet {
                title: self.title.clone(),
                description: self.description.clone(),
                category_id: self.category.clone(),
                tags: parse_keywords(&self.keywords),
            },
            status: NewVideoStatus {
                privacy_status: self.privacy,
            },
        }
    }
}

/// Splits a comma-separated keyword list into tags.
///
/// Pieces are kept exactly as given, so `"a, b"` yields `"a"` and `" b"`. An empty list means no
/// tags at all.
pub fn parse_keywords(keywords: &str) -> Option<Vec<String>> {
    if keywords.is_empty() {
        return None;
    }
    Some(keywords.split(',').map(String::from).collect())
}

pub async fn run(yt: &impl YouTubeApi, args: &Args, out: &mut impl Write) -> eyre::Result<()> {
    let media = Media::open(&args.filename).await?;
    tracing::info!(
        file = %args.filename.display(),
        bytes = media.length,
        content_type = media.content_type,
        "uploading video"
    );

    let video = yt
        .insert_video(&args.new_video(), media)
        .await
        .context("Error making YouTube API call")?;

    writeln!(out, "Upload successful! Video ID: {}", video.id)?;
    Ok(())
}
