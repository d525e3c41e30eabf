//! Records decoded from APA GraphQL responses.

use crate::cli::types::{DivisionId, PlayerId, TeamId, Week};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;


/// Percentage of `won` over `played`, `None` before anything was played.
pub fn win_percentage(won: u32, played: u32) -> Option<f64> {
    (played > 0).then(|| f64::from(won) * 100.0 / f64::from(played))
}

/// GraphQL sends `null` for a selected field with no value; read it as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn saturating_total(counts: impl Iterator<Item = u32>) -> u32 {
    counts.fold(0, u32::saturating_add)
}

/// `data` of the `generateAccessToken` mutation
#[derive(Debug, Deserialize)]
pub struct GenerateAccessTokenData {
    #[serde(rename = "generateAccessToken")]
    pub generate_access_token: Option<AccessTokenPayload>,
}

#[derive(Debug, Deserialize)]
pub struct AccessTokenPayload {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

/// Session a division plays in (e.g. "Spring 2025")
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub year: Option<u16>,
}

/// Short division reference embedded in team and player records
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DivisionRef {
    pub id: DivisionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
}

/// Short team reference embedded in matches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
}

/// One row of a division's standings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamStanding {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u32,
}

impl TeamStanding {
    pub fn matches_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    pub fn win_percentage(&self) -> Option<f64> {
        win_percentage(self.wins, self.matches_played())
    }
}

/// Division with its standings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Division {
    pub id: DivisionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub session: Option<SessionInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<TeamStanding>,
}

impl Division {
    /// Teams ordered by points, then wins, then name.
    pub fn standings(&self) -> Vec<&TeamStanding> {
        let mut teams: Vec<&TeamStanding> = self.teams.iter().collect();
        teams.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.wins.cmp(&a.wins))
                .then_with(|| a.name.cmp(&b.name))
        });
        teams
    }
}

/// One scheduled or played match
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Match {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "homeTeam")]
    pub home_team: TeamRef,
    #[serde(rename = "awayTeam")]
    pub away_team: TeamRef,
    #[serde(rename = "homePoints", default)]
    pub home_points: Option<u32>,
    #[serde(rename = "awayPoints", default)]
    pub away_points: Option<u32>,
}

impl Match {
    /// Winning team once both scores are in; `None` for ties and unplayed matches.
    pub fn winner(&self) -> Option<&TeamRef> {
        match (self.home_points, self.away_points) {
            (Some(home), Some(away)) => match home.cmp(&away) {
                Ordering::Greater => Some(&self.home_team),
                Ordering::Less => Some(&self.away_team),
                Ordering::Equal => None,
            },
            _ => None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.home_points.is_some() && self.away_points.is_some()
    }
}

/// Matches for one week of a division
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeekSchedule {
    pub week: Week,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<Match>,
}

/// Division header plus one week of matches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DivisionWeek {
    pub id: DivisionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    pub schedule: Option<WeekSchedule>,
}

/// Player as listed on a team roster
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterPlayer {
    pub id: PlayerId,
    #[serde(rename = "displayName", default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(rename = "skillLevel", default)]
    pub skill_level: Option<u8>,
    #[serde(rename = "matchesWon", default, deserialize_with = "null_as_default")]
    pub matches_won: u32,
    #[serde(rename = "matchesPlayed", default, deserialize_with = "null_as_default")]
    pub matches_played: u32,
}

impl RosterPlayer {
    pub fn matches_lost(&self) -> u32 {
        self.matches_played.saturating_sub(self.matches_won)
    }

    pub fn win_percentage(&self) -> Option<f64> {
        win_percentage(self.matches_won, self.matches_played)
    }
}

/// Team with its roster
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub division: Option<DivisionRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roster: Vec<RosterPlayer>,
}

impl Team {
    pub fn total_matches_won(&self) -> u32 {
        saturating_total(self.roster.iter().map(|p| p.matches_won))
    }

    pub fn total_matches_played(&self) -> u32 {
        saturating_total(self.roster.iter().map(|p| p.matches_played))
    }

    pub fn total_matches_lost(&self) -> u32 {
        saturating_total(self.roster.iter().map(RosterPlayer::matches_lost))
    }
}

/// A player's record on one team
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerTeam {
    pub id: TeamId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(rename = "skillLevel", default)]
    pub skill_level: Option<u8>,
    #[serde(rename = "matchesWon", default, deserialize_with = "null_as_default")]
    pub matches_won: u32,
    #[serde(rename = "matchesPlayed", default, deserialize_with = "null_as_default")]
    pub matches_played: u32,
    #[serde(default)]
    pub division: Option<DivisionRef>,
}

impl PlayerTeam {
    pub fn matches_lost(&self) -> u32 {
        self.matches_played.saturating_sub(self.matches_won)
    }

    pub fn win_percentage(&self) -> Option<f64> {
        win_percentage(self.matches_won, self.matches_played)
    }
}

/// Player profile
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "displayName", default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(rename = "memberNumber", default)]
    pub member_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<PlayerTeam>,
}

impl Player {
    /// "City, ST" when known.
    pub fn location(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }
}

/// Top-level envelopes for each query's `data`
#[derive(Debug, Deserialize)]
pub struct DivisionEnvelope {
    pub division: Option<Division>,
}

#[derive(Debug, Deserialize)]
pub struct DivisionWeekEnvelope {
    pub division: Option<DivisionWeek>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEnvelope {
    pub team: Option<Team>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerEnvelope {
    pub player: Option<Player>,
}
