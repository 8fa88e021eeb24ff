//! `channel-info`: show the channel that owns a video.

use crate::commands::write_channel;
use crate::youtube_api::YouTubeApi;
use eyre::Context;
use std::io::Write;

#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// The ID of a video on the channel
    #[arg(long)]
    pub videoid: String,
}

pub async fn run(yt: &impl YouTubeApi, args: &Args, out: &mut impl Write) -> eyre::Result<()> {
    let videos = yt
        .videos(std::slice::from_ref(&args.videoid), "snippet")
        .await
        .context("get video info")?;
    let Some(video) = videos.into_iter().next() else {
        writeln!(out, "Could not find a video with that ID.")?;
        return Ok(());
    };
    let snippet = video
        .snippet
        .ok_or_else(|| eyre::eyre!("video {} was returned without a snippet", video.id))?;

    let Some(channel) = yt
        .channel(&snippet.channel_id)
        .await
        .context("get channel info")?
    else {
        writeln!(out, "Could not find a channel associated with that video.")?;
        return Ok(());
    };

    write_channel(out, &channel)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{self, FakeYouTube};
    use pretty_assertions::assert_eq;

    fn args(videoid: &str) -> Args {
        Args {
            videoid: videoid.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_video() {
        let yt = FakeYouTube::default();
        let mut out = Vec::new();
        run(&yt, &args("nope"), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not find a video with that ID.\n"
        );
        assert_eq!(yt.calls(), ["videos nope snippet"]);
    }

    #[tokio::test]
    async fn video_of_unknown_channel() {
        let yt = FakeYouTube::default().with_video(fake::video_on("vid1", "Orphan", "UCgone"));
        let mut out = Vec::new();
        run(&yt, &args("vid1"), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not find a channel associated with that video.\n"
        );
    }

    #[tokio::test]
    async fn resolves_owning_channel() {
        let yt = FakeYouTube::default()
            .with_video(fake::video_on("vid1", "Hello", "UC9"))
            .with_channel(fake::channel("UC9", "Nine"));
        let mut out = Vec::new();
        run(&yt, &args("vid1"), &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Channel ID: UC9\nTitle: Nine\n"), "{out}");
        assert_eq!(yt.calls(), ["videos vid1 snippet", "channel UC9"]);
    }

    #[tokio::test]
    async fn repeated_lookups_print_the_same() {
        let yt = FakeYouTube::default()
            .with_video(fake::video_on("vid1", "Hello", "UC9"))
            .with_channel(fake::channel("UC9", "Nine"));

        let mut first = Vec::new();
        run(&yt, &args("vid1"), &mut first).await.unwrap();
        let mut second = Vec::new();
        run(&yt, &args("vid1"), &mut second).await.unwrap();
        assert_eq!(first, second);
    }
}
