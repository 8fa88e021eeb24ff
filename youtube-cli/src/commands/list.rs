//! `list`: show a channel given either its ID or a username.

use crate::commands::write_channel;
use crate::youtube_api::{Channel, YouTubeApi};
use eyre::Context;
use std::io::Write;

#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// The channel ID or username to get information for
    #[arg(long)]
    pub query: String,
}

/// Resolves `query` to a channel, first as a channel ID and then as a search term.
///
/// When searching, the first (most relevant) channel wins and is re-fetched by ID so that the
/// result carries statistics and content details, which search results lack.
pub async fn resolve_channel(yt: &impl YouTubeApi, query: &str) -> eyre::Result<Option<Channel>> {
    if let Some(channel) = yt.channel(query).await.context("look up channel by ID")? {
        return Ok(Some(channel));
    }

    tracing::debug!(query, "no channel with that ID, searching instead");
    let results = yt
        .search_channels(query)
        .await
        .context("search for channel")?;
    let Some(first) = results.first() else {
        return Ok(None);
    };

    yt.channel(&first.snippet.channel_id)
        .await
        .context("look up channel found by search")
}

pub async fn run(yt: &impl YouTubeApi, args: &Args, out: &mut impl Write) -> eyre::Result<()> {
    match resolve_channel(yt, &args.query).await? {
        Some(channel) => write_channel(out, &channel)?,
        None => writeln!(out, "Could not find a channel with that ID or username.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{self, FakeYouTube};
    use pretty_assertions::assert_eq;

    fn args(query: &str) -> Args {
        Args {
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn direct_id_lookup() {
        let yt = FakeYouTube::default().with_channel(fake::channel("UC1", "One"));
        let mut out = Vec::new();
        run(&yt, &args("UC1"), &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Channel ID: UC1\n"));
        assert_eq!(yt.calls(), ["channel UC1"]);
    }

    #[tokio::test]
    async fn search_fallback_prints_refetched_channel() {
        let yt = FakeYouTube::default()
            .with_search(
                "rustlang",
                vec![
                    fake::search_result("UCrust", "Partial Title From Search"),
                    fake::search_result("UCnot", "Runner-up"),
                ],
            )
            .with_channel(fake::channel("UCrust", "Rust"))
            .with_channel(fake::channel("UCnot", "Runner-up"));

        let mut out = Vec::new();
        run(&yt, &args("rustlang"), &mut out).await.unwrap();

        let mut expected = Vec::new();
        write_channel(&mut expected, &fake::channel("UCrust", "Rust")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), String::from_utf8(expected).unwrap());
        assert_eq!(
            yt.calls(),
            ["channel rustlang", "search rustlang", "channel UCrust"]
        );
    }

    #[tokio::test]
    async fn neither_id_nor_username() {
        let yt = FakeYouTube::default();
        let mut out = Vec::new();
        run(&yt, &args("ghost"), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not find a channel with that ID or username.\n"
        );
    }

    #[tokio::test]
    async fn search_hit_that_vanished() {
        let yt = FakeYouTube::default()
            .with_search("stale", vec![fake::search_result("UCgone", "Gone")]);
        let mut out = Vec::new();
        run(&yt, &args("stale"), &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not find a channel with that ID or username.\n"
        );
    }
}
