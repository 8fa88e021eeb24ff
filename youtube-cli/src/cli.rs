//! Command-line surface: argument parsing and dispatch to the command handlers.

use crate::commands::{channel_info, find_channel, list, list_videos, upload};
use crate::config::GlobalArgs;
use crate::oauth::{YOUTUBE_READONLY_SCOPE, YOUTUBE_UPLOAD_SCOPE};
use crate::youtube_api::YouTubeApi;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

#[derive(Debug, Parser)]
#[command(
    name = "youtube-cli",
    version,
    about = "A command-line tool for interacting with the YouTube API"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Get information about the channel that uploaded a video
    ChannelInfo(channel_info::Args),
    /// Find a YouTube channel by username
    FindChannel(find_channel::Args),
    /// List details of a channel given its ID or a username
    List(list::Args),
    /// List videos from a YouTube channel
    ListVideos(list_videos::Args),
    /// Upload a video to YouTube
    Upload(upload::Args),
}

impl Command {
    /// The OAuth scopes this command needs.
    pub fn scopes(&self) -> &'static [&'static str] {
        match self {
            Command::Upload(_) => &[YOUTUBE_UPLOAD_SCOPE, YOUTUBE_READONLY_SCOPE],
            Command::ChannelInfo(_)
            | Command::FindChannel(_)
            | Command::List(_)
            | Command::ListVideos(_) => &[YOUTUBE_READONLY_SCOPE],
        }
    }

    /// Runs the command, printing to `out` and reading any answers from `input`.
    pub async fn run(
        &self,
        yt: &impl YouTubeApi,
        out: &mut impl Write,
        input: &mut impl BufRead,
    ) -> eyre::Result<()> {
        match self {
            Command::ChannelInfo(args) => channel_info::run(yt, args, out).await,
            Command::FindChannel(args) => find_channel::run(yt, args, out).await,
            Command::List(args) => list::run(yt, args, out).await,
            Command::ListVideos(args) => list_videos::run(yt, args, out, input).await,
            Command::Upload(args) => upload::run(yt, args, out).await,
        }
    }
}
