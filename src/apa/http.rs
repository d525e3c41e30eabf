//! GraphQL transport for the APA API.

use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::{ApaError, Result};


pub const DEFAULT_API_HOST: &str = "gql.poolplayers.com";
pub const DEFAULT_API_PROTOCOL: &str = "https";

const GRAPHQL_ROUTE: &str = "graphql";
const USER_AGENT: &str = concat!("apa-stats/", env!("CARGO_PKG_VERSION"));

/// Location of the GraphQL endpoint.
///
/// Builds `{protocol}://{host}/[{base}/][{version}/]graphql`. Empty
/// segments are skipped and stray slashes trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlEndpoint {
    protocol: String,
    host: String,
    base_path: Option<String>,
    version: Option<String>,
}

impl GraphqlEndpoint {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            base_path: None,
            version: None,
        }
    }

    pub fn with_base_path(mut self, base_path: Option<String>) -> Self {
        self.base_path = clean_segment(base_path);
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = clean_segment(version);
        self
    }

    /// Root URL with a trailing slash, before the GraphQL route.
    pub fn base_url(&self) -> String {
        let mut url = format!("{}://{}/", self.protocol, self.host.trim_end_matches('/'));
        for segment in [&self.base_path, &self.version].into_iter().flatten() {
            url.push_str(segment);
            url.push('/');
        }
        url
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url(), GRAPHQL_ROUTE)
    }
}

impl Default for GraphqlEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_PROTOCOL, DEFAULT_API_HOST)
    }
}

fn clean_segment(segment: Option<String>) -> Option<String> {
    segment
        .map(|s| s.trim().trim_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

/// JSON body of a GraphQL call.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<&'a str>,
}

impl<'a> GraphqlRequest<'a> {
    pub fn query(document: &'a str) -> Self {
        Self {
            query: document,
            variables: Value::Object(Map::new()),
            operation_name: None,
        }
    }

    /// Mutations go over the wire exactly like queries.
    pub fn mutation(document: &'a str) -> Self {
        Self::query(document)
    }

    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    pub fn operation_name(mut self, name: &'a str) -> Self {
        self.operation_name = Some(name);
        self
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

/// One-request-per-call GraphQL client.
///
/// No retries and no timeout tuning beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: GraphqlEndpoint,
    url: String,
}

impl GraphqlClient {
    pub fn new(endpoint: GraphqlEndpoint) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: Client, endpoint: GraphqlEndpoint) -> Self {
        let url = endpoint.url();
        Self {
            http,
            endpoint,
            url,
        }
    }

    pub fn endpoint(&self) -> &GraphqlEndpoint {
        &self.endpoint
    }

    /// POST `request` and return the `data` object of the response.
    ///
    /// `access_token` is sent as a bearer token when present.
    pub async fn execute(
        &self,
        request: &GraphqlRequest<'_>,
        access_token: Option<&str>,
    ) -> Result<Value> {
        let operation = request.operation_name.unwrap_or("anonymous");
        debug!(url = %self.url, operation, "sending GraphQL request");

        let mut builder = self
            .http
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            error!(url = %self.url, operation, error = %e, "request failed");
            ApaError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            error!(
                url = %self.url,
                operation,
                status = status.as_u16(),
                %reason,
                "APA API returned an error status"
            );
            return Err(ApaError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text().await?;
        let envelope: GraphqlResponse = serde_json::from_str(&body).map_err(|e| {
            error!(url = %self.url, operation, error = %e, "bad JSON in response");
            ApaError::from(e)
        })?;

        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            error!(operation, %message, "GraphQL errors in response");
            return Err(ApaError::GraphQl { message });
        }

        debug!(operation, status = status.as_u16(), "GraphQL request succeeded");
        envelope.data.filter(|d| !d.is_null()).ok_or(ApaError::NoData)
    }
}
