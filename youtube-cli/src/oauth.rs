//! OAuth 2.0 management for YouTube API authentication.
//!
//! This module encapsulates all OAuth-related operations for authenticating with the YouTube API,
//! including initial user authorization, token refresh, and persisting the token between
//! invocations of the CLI.

use crate::secrets::ApplicationSecret;
use eyre::Context;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::service_fn;
use hyper::{Request, Response, body};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    RedirectUrl, Scope, TokenResponse, TokenUrl, reqwest,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Scope for read-only access to the account's YouTube data.
pub const YOUTUBE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/youtube.readonly";

/// Scope for uploading videos.
pub const YOUTUBE_UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

const OAUTH_DONE_HTML: &str = "<!DOCTYPE html>
<html>
<head><title>youtube-cli</title></head>
<body><p>Authorization complete. You can close this window and return to the terminal.</p></body>
</html>
";

/// Manages OAuth 2.0 authentication flows for YouTube API access.
///
/// The manager holds the application's client secrets and the scopes the current command needs,
/// and uses them for both the initial user authorization and later token refreshes.
#[derive(Debug, Clone)]
pub struct OAuthManager {
    secret: ApplicationSecret,
    scopes: Vec<String>,
}

impl OAuthManager {
    /// Creates a new OAuth manager for the given application and requested scopes.
    pub fn new(secret: ApplicationSecret, scopes: &[&str]) -> Self {
        Self {
            secret,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The scopes this manager requests during authorization.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    fn token_url(&self) -> eyre::Result<TokenUrl> {
        TokenUrl::new(self.secret.token_uri.clone()).context("parse token endpoint URL")
    }

    fn http_client() -> eyre::Result<reqwest::Client> {
        reqwest::ClientBuilder::new()
            // SSRF no thank you.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build OAuth HTTP client")
    }

    /// Performs a complete OAuth 2.0 authorization flow to obtain a new access token.
    ///
    /// This method initiates the full OAuth flow, including:
    /// 1. Printing the authorization URL and opening the user's browser
    /// 2. Setting up a local HTTP server to receive the authorization callback
    /// 3. Exchanging the authorization code for an access token
    pub async fn authenticate(&self) -> eyre::Result<BasicTokenResponse> {
        let csrf = CsrfToken::new_random();
        let (redirect_url, eventually_authorization_code) = self
            .setup_redirect(csrf.clone())
            .await
            .context("set up redirect endpoint")?;

        let auth_url =
            AuthUrl::new(self.secret.auth_uri.clone()).context("parse authorization endpoint URL")?;
        let client = BasicClient::new(ClientId::new(self.secret.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.secret.client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(self.token_url()?)
            .set_redirect_uri(redirect_url);

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
        let (auth_url, _csrf_token) = client
            // We never re-use the CSRF since we only go through the flow exactly once.
            .authorize_url(move || csrf.clone())
            .add_scopes(self.scopes.iter().cloned().map(Scope::new))
            // Without offline access Google won't hand out a refresh token.
            .add_extra_param("access_type", "offline")
            .set_pkce_challenge(pkce_challenge)
            .url();

        tracing::info!(url = %auth_url, "asking user to follow OAuth flow");
        eprintln!("Go to the following link in your browser to authorize access:\n\n{auth_url}\n");
        if let Err(e) = webbrowser::open(auth_url.as_str()) {
            tracing::warn!("could not open browser, follow the printed link instead: {e}");
        }
        let authorization_code = eventually_authorization_code
            .await
            .context("await user authorization code")?;

        let http_client = Self::http_client()?;
        let token_result = client
            .exchange_code(authorization_code)
            .set_pkce_verifier(pkce_verifier)
            .request_async(&http_client)
            .await
            .context("exchange authorization code with access token")?;

        Ok(token_result)
    }

    /// Attempts to refresh an existing OAuth token using its refresh token.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(new_token))` - Refresh succeeded, new token is available
    /// * `Ok(None)` - The grant was rejected or no refresh token is available
    /// * `Err(_)` - Network or other error occurred during refresh attempt
    ///
    /// When refresh yields `None`, the user has to go through [`Self::authenticate`] again.
    pub async fn refresh_token(
        &self,
        token: BasicTokenResponse,
    ) -> eyre::Result<Option<BasicTokenResponse>> {
        let Some(refresh_token) = token.refresh_token() else {
            tracing::warn!("no refresh token available, cannot refresh");
            return Ok(None);
        };

        tracing::debug!("attempting to refresh OAuth token");

        // No redirect URL is needed to refresh
        let client = BasicClient::new(ClientId::new(self.secret.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.secret.client_secret.clone()))
            .set_token_uri(self.token_url()?);

        let http_client = Self::http_client()?;

        match client
            .exchange_refresh_token(refresh_token)
            .request_async(&http_client)
            .await
        {
            Ok(new_token) => {
                tracing::debug!("successfully refreshed OAuth token");
                Ok(Some(new_token))
            }
            Err(ref e @ oauth2::RequestTokenError::ServerResponse(ref sr))
                if matches!(
                    sr.error(),
                    oauth2::basic::BasicErrorResponseType::InvalidGrant
                ) =>
            {
                tracing::warn!("OAuth refresh token considered invalid grant: {}", e);
                Ok(None)
            }
            Err(e) => Err(e).context("exchange refresh token"),
        }
    }

    /// Sets up a local HTTP server to receive the OAuth authorization callback.
    ///
    /// The server listens on a random loopback port, validates the CSRF token and extracts the
    /// authorization code from the one redirect it accepts.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// - The redirect URL to use in the OAuth flow
    /// - A future that resolves to the authorization code when the callback is received
    async fn setup_redirect(
        &self,
        csrf: CsrfToken,
    ) -> eyre::Result<(
        RedirectUrl,
        impl Future<Output = eyre::Result<AuthorizationCode>>,
    )> {
        let socket = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind to localhost")?;
        let addr = socket.local_addr().context("get local address")?;
        let url = RedirectUrl::new(format!("http://{}:{}", addr.ip(), addr.port()))
            .context("construct redirect url")?;
        let (tx, rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            let r = async move {
                let (conn, _) = socket.accept().await.context("accept")?;
                let conn = hyper_util::rt::TokioIo::new(conn);
                let (got, mut gotten) = tokio::sync::mpsc::channel(1);
                let service = service_fn(move |req: Request<body::Incoming>| {
                    let csrf = csrf.clone();
                    let got = got.clone();
                    async move {
                        let mut presented_state = None;
                        let mut presented_code = None;
                        for (k, v) in
                            form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
                        {
                            match &*k {
                                "state" => presented_state = Some(v),
                                "code" => presented_code = Some(v),
                                _ => {}
                            }
                        }
                        if presented_state.as_deref() != Some(csrf.secret().as_str()) {
                            return Err("invalid csrf token");
                        }
                        let Some(code) = presented_code else {
                            return Err("no authorization code found");
                        };
                        let code = AuthorizationCode::new(code.into_owned());
                        if got.send(code).await.is_err() {
                            return Err("authorization code receiver went away");
                        }
                        Ok(Response::new(Full::<Bytes>::from(OAUTH_DONE_HTML)))
                    }
                });
                let mut serve = std::pin::pin!(
                    hyper::server::conn::http1::Builder::new().serve_connection(conn, service)
                );

                tokio::select! {
                    exit = &mut serve => {
                        if let Err(e) = exit {
                            Err(e).context("redirect server got bad request")
                        } else {
                            eyre::bail!("redirect server exit prematurely");
                        }
                    }
                    code = gotten.recv() => {
                        serve.as_mut().graceful_shutdown();
                        code.ok_or_else(|| eyre::eyre!("redirect server dropped the authorization code"))
                    }
                }
            };
            let _ = tx.send(r.await);
        });
        Ok((url, async move {
            rx.await.context("redirect future dropped prematurely")?
        }))
    }
}

/// An OAuth token persisted between invocations, along with the scopes it was granted for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedToken {
    pub scopes: Vec<String>,
    pub token: BasicTokenResponse,
}

impl CachedToken {
    /// Whether this token was granted every one of `scopes`.
    pub fn covers(&self, scopes: &[String]) -> bool {
        scopes.iter().all(|wanted| self.scopes.contains(wanted))
    }

    /// Loads the cached token at `path`, if there is one.
    pub async fn load(path: &Path) -> eyre::Result<Option<Self>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read token cache {}", path.display()));
            }
        };
        let cached = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse token cache {}", path.display()))?;
        Ok(Some(cached))
    }

    /// Writes this token to `path`, readable only by the current user where supported.
    ///
    /// The token is written to a new file next to `path` which then replaces it, so whatever
    /// permissions an earlier cache file had are not carried over.
    pub async fn store(&self, path: &Path) -> eyre::Result<()> {
        use tokio::io::AsyncWriteExt;

        let json = serde_json::to_vec_pretty(self).context("serialize OAuth token")?;

        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        match tokio::fs::remove_file(&staging).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("remove stale {}", staging.display()));
            }
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options
            .open(&staging)
            .await
            .with_context(|| format!("create {}", staging.display()))?;
        file.write_all(&json)
            .await
            .with_context(|| format!("write {}", staging.display()))?;
        file.sync_all().await.context("flush token cache")?;
        drop(file);

        tokio::fs::rename(&staging, path)
            .await
            .with_context(|| format!("replace token cache {}", path.display()))?;
        Ok(())
    }
}
