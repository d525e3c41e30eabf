//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser};

use crate::{
    apa::http::{DEFAULT_API_HOST, DEFAULT_API_PROTOCOL},
    ACCESS_TOKEN_ENV_VAR, REFRESH_TOKEN_ENV_VAR,
};

/// Where the APA GraphQL endpoint lives.
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// APA API hostname.
    #[clap(long, env = "APA_API_HOST", default_value = DEFAULT_API_HOST)]
    pub api_host: String,

    /// Protocol used to reach the API (`https`, or `http` for local mocks).
    #[clap(long, env = "APA_API_PROTOCOL", default_value = DEFAULT_API_PROTOCOL)]
    pub api_protocol: String,

    /// Optional base path segment in front of the GraphQL route.
    #[clap(long, env = "APA_API_BASE")]
    pub api_base: Option<String>,

    /// Optional API version segment (e.g. `v1`).
    #[clap(long, env = "APA_API_VERSION")]
    pub api_version: Option<String>,
}

#[derive(Debug, Parser)]
#[clap(name = "apa-stats", about = "APA league statistics web site")]
pub struct ApaStats {
    /// Long-lived refresh token (or set `APA_REFRESH_TOKEN`).
    #[clap(long, env = REFRESH_TOKEN_ENV_VAR, hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Optional access token to use until it expires (or set `APA_ACCESS_TOKEN`).
    #[clap(long, env = ACCESS_TOKEN_ENV_VAR, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Interface to bind.
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[clap(long, short, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    #[clap(flatten)]
    pub api: ApiArgs,
}
