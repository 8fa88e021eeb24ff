//! `find-channel`: search for a channel by username.

use crate::youtube_api::YouTubeApi;
use eyre::Context;
use std::io::Write;

#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// The username to search for
    #[arg(long)]
    pub username: String,
}

/// Prints the best search match for `username`.
///
/// Only the search snippet is shown; the channel itself is not fetched.
pub async fn run(yt: &impl YouTubeApi, args: &Args, out: &mut impl Write) -> eyre::Result<()> {
    let results = yt
        .search_channels(&args.username)
        .await
        .context("search for channel")?;

    // The most relevant match wins, even if there are several.
    let Some(channel) = results.first() else {
        writeln!(out, "Could not find a channel with that username.")?;
        return Ok(());
    };

    writeln!(out, "Found channel:")?;
    writeln!(out, "  Title: {}", channel.snippet.title)?;
    writeln!(out, "  Channel ID: {}", channel.snippet.channel_id)?;
    writeln!(out, "  Description: {}", channel.snippet.description)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{self, FakeYouTube};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn no_match() {
        let yt = FakeYouTube::default();
        let mut out = Vec::new();
        let args = Args {
            username: "nobody".into(),
        };
        run(&yt, &args, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not find a channel with that username.\n"
        );
    }

    #[tokio::test]
    async fn first_match_is_printed() {
        let yt = FakeYouTube::default().with_search(
            "jonhoo",
            vec![
                fake::search_result("UCjon", "Jon Gjengset"),
                fake::search_result("UCother", "Someone else"),
            ],
        );
        let mut out = Vec::new();
        let args = Args {
            username: "jonhoo".into(),
        };
        run(&yt, &args, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Found channel:\n\
             \x20 Title: Jon Gjengset\n\
             \x20 Channel ID: UCjon\n\
             \x20 Description: search snippet for Jon Gjengset\n"
        );
        assert_eq!(yt.calls(), ["search jonhoo"]);
    }
}
