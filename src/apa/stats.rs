//! Statistics queries: one authenticated GraphQL call per page.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    apa::{
        http::{GraphqlClient, GraphqlRequest},
        queries::{self, operation},
        session::Session,
        types::{
            Division, DivisionEnvelope, DivisionWeek, DivisionWeekEnvelope, Player,
            PlayerEnvelope, Team, TeamEnvelope,
        },
    },
    cli::types::{DivisionId, PlayerId, TeamId, Week},
    config::Config,
    error::{ApaError, Result},
};

/// Adapter between the web pages and the APA API.
pub struct StatsApi {
    client: GraphqlClient,
    session: Session,
}

impl StatsApi {
    pub fn new(client: GraphqlClient, session: Session) -> Self {
        Self { client, session }
    }

    /// Build the client and session described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GraphqlClient::new(config.endpoint.clone())?;
        let session = Session::new(client.clone(), config.refresh_token.clone())
            .with_access_token(config.access_token.clone());
        Ok(Self::new(client, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn division(&self, id: DivisionId) -> Result<Division> {
        let envelope: DivisionEnvelope = self
            .fetch(
                queries::DIVISION_STANDINGS,
                operation::DIVISION_STANDINGS,
                json!({ "id": id }),
            )
            .await?;
        envelope.division.ok_or(ApaError::NoData)
    }

    /// Division header plus the matches of `week`.
    pub async fn division_week(&self, id: DivisionId, week: Week) -> Result<DivisionWeek> {
        let envelope: DivisionWeekEnvelope = self
            .fetch(
                queries::DIVISION_WEEK,
                operation::DIVISION_WEEK,
                json!({ "id": id, "week": week }),
            )
            .await?;
        envelope.division.ok_or(ApaError::NoData)
    }

    pub async fn team(&self, id: TeamId) -> Result<Team> {
        let envelope: TeamEnvelope = self
            .fetch(queries::TEAM_ROSTER, operation::TEAM_ROSTER, json!({ "id": id }))
            .await?;
        envelope.team.ok_or(ApaError::NoData)
    }

    pub async fn player(&self, id: PlayerId) -> Result<Player> {
        let envelope: PlayerEnvelope = self
            .fetch(queries::PLAYER_STATS, operation::PLAYER_STATS, json!({ "id": id }))
            .await?;
        envelope.player.ok_or(ApaError::NoData)
    }

    /// Run one query with a valid access token and decode its `data`.
    ///
    /// A 401 drops the cached token; the failure itself is still returned.
    async fn fetch<T: DeserializeOwned>(
        &self,
        document: &str,
        operation_name: &str,
        variables: Value,
    ) -> Result<T> {
        let token = self.session.access_token().await?;
        let request = GraphqlRequest::query(document)
            .variables(variables)
            .operation_name(operation_name);

        match self.client.execute(&request, Some(&token)).await {
            Ok(data) => {
                info!(operation = operation_name, "fetched APA data");
                Ok(serde_json::from_value(data)?)
            }
            Err(e) if e.is_unauthorized() => {
                warn!(operation = operation_name, "access token rejected");
                self.session.invalidate(&token).await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
