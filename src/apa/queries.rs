//! GraphQL documents sent to the APA API.

pub const GENERATE_ACCESS_TOKEN: &str = r#"
mutation GenerateAccessTokenMutation($refreshToken: String!) {
  generateAccessToken(refreshToken: $refreshToken) {
    accessToken
    __typename
  }
}
"#;

pub const DIVISION_STANDINGS: &str = r#"
query DivisionStandings($id: Int!) {
  division(id: $id) {
    id
    name
    number
    session { name year }
    teams {
      id
      name
      number
      wins
      losses
      points
    }
  }
}
"#;

pub const DIVISION_WEEK: &str = r#"
query DivisionWeek($id: Int!, $week: Int!) {
  division(id: $id) {
    id
    name
    number
    schedule(week: $week) {
      week
      date
      matches {
        id
        status
        homeTeam { id name number }
        awayTeam { id name number }
        homePoints
        awayPoints
      }
    }
  }
}
"#;

pub const TEAM_ROSTER: &str = r#"
query TeamRoster($id: Int!) {
  team(id: $id) {
    id
    name
    number
    division { id name number }
    roster {
      id
      displayName
      skillLevel
      matchesWon
      matchesPlayed
    }
  }
}
"#;

pub const PLAYER_STATS: &str = r#"
query PlayerStats($id: Int!) {
  player(id: $id) {
    id
    displayName
    memberNumber
    city
    state
    teams {
      id
      name
      number
      skillLevel
      matchesWon
      matchesPlayed
      division { id name number }
    }
  }
}
"#;

/// Operation names, matching the documents above.
pub mod operation {
    pub const DIVISION_STANDINGS: &str = "DivisionStandings";
    pub const DIVISION_WEEK: &str = "DivisionWeek";
    pub const TEAM_ROSTER: &str = "TeamRoster";
    pub const PLAYER_STATS: &str = "PlayerStats";
}
