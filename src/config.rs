//! Startup configuration, validated once before the server binds.

use crate::{
    apa::http::GraphqlEndpoint,
    cli::ApaStats,
    error::{ApaError, Result},
    REFRESH_TOKEN_ENV_VAR,
};

/// Everything the server needs to run.
#[derive(Debug, Clone)]
pub struct Config {
    pub refresh_token: String,
    pub access_token: Option<String>,
    pub endpoint: GraphqlEndpoint,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Address string handed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TryFrom<ApaStats> for Config {
    type Error = ApaError;

    fn try_from(args: ApaStats) -> Result<Self> {
        let refresh_token = resolve_refresh_token(args.refresh_token)?;
        let access_token = args.access_token.filter(|t| !t.trim().is_empty());

        let endpoint = GraphqlEndpoint::new(args.api.api_protocol, args.api.api_host)
            .with_base_path(args.api.api_base)
            .with_version(args.api.api_version);

        Ok(Self {
            refresh_token,
            access_token,
            endpoint,
            host: args.host,
            port: args.port,
        })
    }
}

/// Require a non-blank refresh token.
pub fn resolve_refresh_token(refresh_token: Option<String>) -> Result<String> {
    match refresh_token.map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApaError::Configuration {
            env_var: REFRESH_TOKEN_ENV_VAR.to_string(),
        }),
    }
}
