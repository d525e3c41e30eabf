//! Everything that talks to the APA API
//!
//! - `http`: GraphQL transport and endpoint URL building
//! - `session`: refresh/access token handling
//! - `stats`: the queries behind each page
//! - `types`: records decoded from responses

pub mod http;
pub mod queries;
pub mod session;
pub mod stats;
pub mod types;

pub use http::{GraphqlClient, GraphqlEndpoint, GraphqlRequest};
pub use session::{Credentials, Session};
pub use stats::StatsApi;
