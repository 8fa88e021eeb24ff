//! The CLI's subcommands.
//!
//! Every handler writes its report to `out` and returns `Ok(())` both when it found what it was
//! looking for and when it did not; only failures to talk to the API (or to the terminal) are
//! errors.

use crate::youtube_api::{Channel, Video};
use std::io::{self, Write};

pub mod channel_info;
pub mod find_channel;
pub mod list;
pub mod list_videos;
pub mod upload;

#[cfg(test)]
pub(crate) mod fake;

/// Counts the API leaves out (e.g. hidden subscriber counts) are shown as zero.
fn count(value: Option<&str>) -> &str {
    value.unwrap_or("0")
}

pub(crate) fn write_channel(out: &mut impl Write, channel: &Channel) -> io::Result<()> {
    let stats = channel.statistics.as_ref();
    writeln!(out, "Channel ID: {}", channel.id)?;
    writeln!(out, "Title: {}", channel.snippet.title)?;
    writeln!(out, "Description: {}", channel.snippet.description)?;
    writeln!(
        out,
        "View Count: {}",
        count(stats.and_then(|s| s.view_count.as_deref()))
    )?;
    writeln!(
        out,
        "Subscriber Count: {}",
        count(stats.and_then(|s| s.subscriber_count.as_deref()))
    )?;
    writeln!(
        out,
        "Video Count: {}",
        count(stats.and_then(|s| s.video_count.as_deref()))
    )?;
    Ok(())
}

pub(crate) fn write_video(out: &mut impl Write, video: &Video, detailed: bool) -> io::Result<()> {
    let snippet = video.snippet.as_ref();
    writeln!(
        out,
        "Title: {}",
        snippet.map(|s| s.title.as_str()).unwrap_or_default()
    )?;
    writeln!(out, "Video ID: {}", video.id)?;
    match snippet {
        Some(snippet) => writeln!(out, "Published At: {}", snippet.published_at)?,
        None => writeln!(out, "Published At: ")?,
    }
    if detailed {
        let stats = video.statistics.as_ref();
        writeln!(
            out,
            "View Count: {}",
            count(stats.and_then(|s| s.view_count.as_deref()))
        )?;
        writeln!(
            out,
            "Like Count: {}",
            count(stats.and_then(|s| s.like_count.as_deref()))
        )?;
        writeln!(
            out,
            "Comment Count: {}",
            count(stats.and_then(|s| s.comment_count.as_deref()))
        )?;
        match &video.status {
            Some(status) => writeln!(out, "Privacy: {}", status.privacy_status)?,
            None => writeln!(out, "Privacy: ")?,
        }
    }
    writeln!(out, "{}", "-".repeat(50))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake;
    use pretty_assertions::assert_eq;

    #[test]
    fn channel_block() {
        let mut out = Vec::new();
        write_channel(&mut out, &fake::channel("UC1", "Rustaceans")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Channel ID: UC1\n\
             Title: Rustaceans\n\
             Description: All about Rustaceans\n\
             View Count: 1000\n\
             Subscriber Count: 100\n\
             Video Count: 10\n"
        );
    }

    #[test]
    fn hidden_subscriber_count_shows_as_zero() {
        let mut channel = fake::channel("UC1", "Shy");
        if let Some(stats) = channel.statistics.as_mut() {
            stats.subscriber_count = None;
        }
        let mut out = Vec::new();
        write_channel(&mut out, &channel).unwrap();
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("Subscriber Count: 0\n")
        );
    }

    #[test]
    fn video_block_details_only_when_asked() {
        let video = fake::video("vid1", "First video");

        let mut out = Vec::new();
        write_video(&mut out, &video, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "Title: First video\nVideo ID: vid1\nPublished At: 2024-03-01T12:00:00Z\n{}\n",
                "-".repeat(50)
            )
        );

        let mut out = Vec::new();
        write_video(&mut out, &video, true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "Title: First video\n\
                 Video ID: vid1\n\
                 Published At: 2024-03-01T12:00:00Z\n\
                 View Count: 42\n\
                 Like Count: 7\n\
                 Comment Count: 3\n\
                 Privacy: public\n\
                 {}\n",
                "-".repeat(50)
            )
        );
    }
}
