//! Process configuration resolved from global command-line flags and the environment.

use std::path::PathBuf;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Path to your client secrets file
    #[arg(long, global = true, env = "YOUTUBE_SECRETS")]
    pub secrets: Option<PathBuf>,

    /// Where to keep the OAuth token between invocations
    #[arg(
        long,
        global = true,
        env = "YOUTUBE_TOKEN_CACHE",
        default_value = "youtube-cli-token.json"
    )]
    pub token_cache: PathBuf,
}

/// Configuration handed to the authorization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the OAuth client secrets file.
    pub secrets: PathBuf,
    /// Location of the cached OAuth token.
    pub token_cache: PathBuf,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> eyre::Result<Self> {
        let Some(secrets) = args.secrets.clone() else {
            eyre::bail!(
                "Please provide the path to your client secrets file with the --secrets flag or YOUTUBE_SECRETS env var"
            );
        };
        Ok(Self {
            secrets,
            token_cache: args.token_cache.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn secrets_path_is_required() {
        let args = GlobalArgs {
            secrets: None,
            token_cache: "token.json".into(),
        };
        let err = Config::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("--secrets"), "{err:?}");
    }

    #[test]
    fn config_carries_both_paths() {
        let args = GlobalArgs {
            secrets: Some("client_secret.json".into()),
            token_cache: "token.json".into(),
        };
        assert_eq!(
            Config::from_args(&args).unwrap(),
            Config {
                secrets: "client_secret.json".into(),
                token_cache: "token.json".into(),
            }
        );
    }
}
