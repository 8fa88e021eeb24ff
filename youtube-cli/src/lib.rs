//! A command-line client for the YouTube Data API v3.
//!
//! The binary parses a [`cli::Cli`], resolves a [`config::Config`], obtains an authorized
//! [`youtube_api::YouTubeClient`] with [`authorize`] and hands it to the chosen command.

use crate::config::Config;
use crate::oauth::{CachedToken, OAuthManager};
use crate::youtube_api::{TimeBoundAccessToken, YouTubeClient};
use eyre::Context;
use std::sync::Arc;

pub mod cli;
pub mod commands;
pub mod config;
pub mod oauth;
pub mod secrets;
pub mod youtube_api;

/// Produces a client authorized for `scopes`.
///
/// A cached token that was granted every requested scope is refreshed and reused; otherwise the
/// user is sent through the browser authorization flow. Either way the resulting token is written
/// back to the cache. Problems reading or writing the cache file are logged and otherwise ignored,
/// but a refresh that fails for any reason other than a rejected grant is fatal.
pub async fn authorize(config: &Config, scopes: &[&str]) -> eyre::Result<YouTubeClient> {
    let secret = secrets::read_application_secret(&config.secrets).await?;
    let oauth = Arc::new(OAuthManager::new(secret, scopes));

    let cached = match CachedToken::load(&config.token_cache).await {
        Ok(cached) => cached,
        Err(e) => {
            tracing::warn!("ignoring unusable token cache: {e:#}");
            None
        }
    };

    let (token, granted) = match reuse_cached_token(&oauth, cached).await? {
        Some(reused) => reused,
        None => {
            let token = oauth
                .authenticate()
                .await
                .context("Unable to retrieve token from web")?;
            (TimeBoundAccessToken::new(token), oauth.scopes().to_vec())
        }
    };

    let to_cache = CachedToken {
        scopes: granted,
        token: token.raw_token().clone(),
    };
    if let Err(e) = to_cache.store(&config.token_cache).await {
        tracing::warn!("could not save OAuth token: {e:#}");
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build HTTP client")?;

    Ok(YouTubeClient::new(token, oauth, client))
}

/// Refreshes `cached` if it covers the manager's scopes.
///
/// Returns the refreshed token along with the scopes it was originally granted, or `None` when
/// the user has to authorize again: no cached token, too few scopes, or a refresh grant the
/// server rejected.
async fn reuse_cached_token(
    oauth: &OAuthManager,
    cached: Option<CachedToken>,
) -> eyre::Result<Option<(TimeBoundAccessToken, Vec<String>)>> {
    let Some(cached) = cached else {
        return Ok(None);
    };
    if !cached.covers(oauth.scopes()) {
        tracing::info!("cached OAuth token lacks required scopes, re-authorizing");
        return Ok(None);
    }

    let mut token = TimeBoundAccessToken::expired(cached.token);
    if token
        .refresh(oauth)
        .await
        .context("refresh cached OAuth token")?
    {
        tracing::debug!("reusing cached OAuth token");
        Ok(Some((token, cached.scopes)))
    } else {
        tracing::info!("cached OAuth token was rejected, re-authorizing");
        Ok(None)
    }
}
