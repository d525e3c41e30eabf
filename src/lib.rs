//! APA league statistics site
//!
//! A small web front end over the American Poolplayers Association GraphQL
//! API: it trades a refresh token for access tokens, runs a handful of
//! statistics queries, and renders the results as HTML.
//!
//! ## Features
//!
//! - **Token handling**: access tokens are refreshed on expiry, once, even
//!   under concurrent requests
//! - **GraphQL adapter**: one POST per page, JSON decoded into plain records
//! - **Pages**: division standings, weekly results, team rosters, player records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apa_stats::{apa::StatsApi, web, Config, DivisionId};
//! use apa_stats::cli::ApaStats;
//! use clap::Parser;
//!
//! # async fn example() -> apa_stats::Result<()> {
//! let config = Config::try_from(ApaStats::parse())?;
//! let api = StatsApi::from_config(&config)?;
//!
//! // Fetch standings directly...
//! let division = api.division(DivisionId::new(4321)).await?;
//! println!("{} has {} teams", division.name, division.teams.len());
//!
//! // ...or serve the pages
//! let app = web::router(web::AppState::new(api));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export APA_REFRESH_TOKEN=...   # required
//! export APA_ACCESS_TOKEN=...    # optional, used until it expires
//! ```

pub mod apa;
pub mod cli;
pub mod config;
pub mod error;
pub mod web;

// Re-export commonly used types
pub use cli::types::{DivisionId, PlayerId, TeamId, Week};
pub use config::Config;
pub use error::{ApaError, Result};

pub const REFRESH_TOKEN_ENV_VAR: &str = "APA_REFRESH_TOKEN";
pub const ACCESS_TOKEN_ENV_VAR: &str = "APA_ACCESS_TOKEN";
