//! Loading of the OAuth client secrets file issued by the Google Cloud console.
//!
//! The console hands out a JSON descriptor with either an `installed` (desktop app) or a `web`
//! section. Both carry the same fields as far as we are concerned, so they are parsed into a
//! single [`ApplicationSecret`].

use eyre::Context;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The parts of an OAuth application descriptor needed to run the authorization-code flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationSecret {
    /// The client ID issued for the application.
    pub client_id: String,
    /// The client secret; embedded in installed applications and not actually secret.
    pub client_secret: String,
    /// Endpoint the user is sent to in order to grant access.
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    /// Endpoint used to exchange authorization codes and refresh tokens.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Top-level shape of a `client_secret_*.json` file.
#[derive(Debug, Deserialize)]
struct ConsoleApplicationSecret {
    installed: Option<ApplicationSecret>,
    web: Option<ApplicationSecret>,
}

/// Parses the contents of a client secrets file.
pub fn parse_application_secret(bytes: &[u8]) -> eyre::Result<ApplicationSecret> {
    let console: ConsoleApplicationSecret =
        serde_json::from_slice(bytes).context("parse client secret file as JSON")?;
    console
        .installed
        .or(console.web)
        .ok_or_else(|| eyre::eyre!("client secret file has neither an `installed` nor a `web` section"))
}

/// Reads and parses the client secrets file at `path`.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub async fn read_application_secret(path: &Path) -> eyre::Result<ApplicationSecret> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Unable to read client secret file {}", path.display()))?;
    let secret = parse_application_secret(&bytes)
        .context("Unable to parse client secret file to config")?;
    tracing::debug!(client_id = %secret.client_id, "loaded client secrets");
    Ok(secret)
}
