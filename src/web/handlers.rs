//! Route handlers: parse parameters, call the stats API, render a page.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    cli::types::{DivisionId, PlayerId, TeamId, Week},
    error::ApaError,
    web::{render, AppState},
};

/// Error rendered as an HTML page.
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: String,
}

impl PageError {
    pub fn new(status: StatusCode, title: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            title,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Not found",
            "There is no page at this address.",
        )
    }
}

impl From<ApaError> for PageError {
    fn from(err: ApaError) -> Self {
        let (status, title) = match &err {
            e if e.is_bad_input() => (StatusCode::BAD_REQUEST, "Bad request"),
            ApaError::NoData => (StatusCode::NOT_FOUND, "Not found"),
            ApaError::Authentication { .. } => (StatusCode::BAD_GATEWAY, "Authentication failed"),
            e if e.is_request_error() => (StatusCode::BAD_GATEWAY, "Upstream request failed"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };
        Self::new(status, title, err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, "rendering error page");
        } else {
            warn!(status = self.status.as_u16(), message = %self.message, "rendering error page");
        }
        let html = render::error_page(self.status.as_u16(), self.title, &self.message);
        (self.status, Html(html)).into_response()
    }
}

/// Blank form fields arrive as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub division: Option<String>,
    pub week: Option<String>,
    pub team: Option<String>,
    pub player: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeekParams {
    pub week: Option<String>,
}

pub async fn index() -> Html<String> {
    Html(render::index_page())
}

/// Turn the index forms into canonical page URLs.
pub async fn lookup(Query(params): Query<LookupParams>) -> Result<Redirect, PageError> {
    if let Some(division) = non_empty(params.division) {
        let division: DivisionId = division.parse()?;
        return Ok(match non_empty(params.week) {
            Some(week) => {
                let week: Week = week.parse()?;
                Redirect::to(&format!("/divisions/{}/weeks/{}", division, week))
            }
            None => Redirect::to(&format!("/divisions/{}", division)),
        });
    }
    if let Some(team) = non_empty(params.team) {
        let team: TeamId = team.parse()?;
        return Ok(Redirect::to(&format!("/teams/{}", team)));
    }
    if let Some(player) = non_empty(params.player) {
        let player: PlayerId = player.parse()?;
        return Ok(Redirect::to(&format!("/players/{}", player)));
    }

    Err(PageError::new(
        StatusCode::BAD_REQUEST,
        "Bad request",
        "Enter a division, team, or player ID.",
    ))
}

pub async fn division(
    State(state): State<AppState>,
    Path(division_id): Path<String>,
    Query(params): Query<WeekParams>,
) -> Result<Response, PageError> {
    let division_id: DivisionId = division_id.parse()?;

    if let Some(week) = non_empty(params.week) {
        let week: Week = week.parse()?;
        let target = format!("/divisions/{}/weeks/{}", division_id, week);
        return Ok(Redirect::to(&target).into_response());
    }

    info!(%division_id, "division standings requested");
    let division = state.api.division(division_id).await?;
    Ok(Html(render::division_page(&division)).into_response())
}

pub async fn division_week(
    State(state): State<AppState>,
    Path((division_id, week)): Path<(String, String)>,
) -> Result<Html<String>, PageError> {
    let division_id: DivisionId = division_id.parse()?;
    let week: Week = week.parse()?;

    info!(%division_id, %week, "division week requested");
    let division = state.api.division_week(division_id, week).await?;
    Ok(Html(render::division_week_page(&division, week)))
}

pub async fn team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let team_id: TeamId = team_id.parse()?;

    info!(%team_id, "team roster requested");
    let team = state.api.team(team_id).await?;
    Ok(Html(render::team_page(&team)))
}

pub async fn player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let player_id: PlayerId = player_id.parse()?;

    info!(%player_id, "player stats requested");
    let player = state.api.player(player_id).await?;
    Ok(Html(render::player_page(&player)))
}

pub async fn not_found() -> PageError {
    PageError::not_found()
}
