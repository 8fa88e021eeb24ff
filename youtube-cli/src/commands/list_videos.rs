//! `list-videos`: page through a channel's uploads.

use crate::commands::write_video;
use crate::youtube_api::YouTubeApi;
use eyre::Context;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, clap::Args)]
pub struct Args {
    /// The YouTube channel ID to list videos for
    #[arg(long)]
    pub channelid: String,

    /// Display detailed video information (statistics, status, etc.)
    #[arg(long)]
    pub detailed: bool,

    /// The maximum number of results to display per page
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: u32,
}

/// Lists the channel's uploads one page at a time.
///
/// After every page that has a successor the user is asked whether to continue; anything but
/// `y` (in either case) on `input` ends the listing.
pub async fn run(
    yt: &impl YouTubeApi,
    args: &Args,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> eyre::Result<()> {
    let channel = yt
        .channel(&args.channelid)
        .await
        .context("find channel")?
        .ok_or_else(|| eyre::eyre!("channel not found: {}", args.channelid))?;
    let uploads = channel
        .uploads_playlist()
        .ok_or_else(|| eyre::eyre!("channel {} has no uploads playlist", channel.id))?;

    let mut page_token: Option<String> = None;
    loop {
        let page = yt
            .playlist_items(uploads, args.limit, page_token.as_deref())
            .await
            .context("get playlist items")?;

        if page.items.is_empty() {
            writeln!(out, "No videos found on this channel.")?;
            return Ok(());
        }

        let video_ids: Vec<String> = page
            .items
            .iter()
            .filter_map(|item| item.video_id())
            .map(String::from)
            .collect();
        let videos = if video_ids.is_empty() {
            Vec::new()
        } else {
            yt.videos(&video_ids, "snippet,statistics,status")
                .await
                .context("get video details")?
        };

        writeln!(out, "Displaying videos for channel {}:\n", args.channelid)?;
        for video in &videos {
            write_video(out, video, args.detailed)?;
        }

        let Some(next) = page.next_cursor() else {
            break;
        };
        page_token = Some(next.to_string());

        write!(out, "Show more? (y/n): ")?;
        out.flush()?;
        if !confirmed(input)? {
            break;
        }
    }

    Ok(())
}

/// Reads one answer from `input`; end of input counts as "no".
fn confirmed(input: &mut impl BufRead) -> eyre::Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer).context("read answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
