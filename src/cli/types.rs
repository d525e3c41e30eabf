//! Type-safe wrappers for APA identifiers taken from URLs.

use crate::error::{ApaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// Largest ID the API accepts; GraphQL `Int` is a signed 32-bit value.
pub const MAX_ID: u32 = i32::MAX as u32;

fn parse_id(s: &str) -> Result<u32> {
    let id: u32 = s.trim().parse()?;
    if id > MAX_ID {
        return Err(ApaError::IdOutOfRange { id });
    }
    Ok(id)
}

/// Type-safe wrapper for APA division IDs.
///
/// Keeps division IDs from being mixed up with team or player IDs when
/// they travel from a URL into a GraphQL variable.
///
/// # Examples
///
/// ```rust
/// use apa_stats::DivisionId;
///
/// let division_id: DivisionId = "4321".parse().unwrap();
/// assert_eq!(division_id.as_u32(), 4321);
/// assert_eq!(division_id.to_string(), "4321");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionId(pub u32);

impl DivisionId {
    /// Create a new DivisionId from a u32 value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DivisionId {
    type Err = ApaError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(parse_id(s)?))
    }
}

/// Type-safe wrapper for APA team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = ApaError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(parse_id(s)?))
    }
}

/// Type-safe wrapper for APA player IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = ApaError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(parse_id(s)?))
    }
}

/// Week of a division's session. Weeks are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Week(pub u16);

impl Week {
    /// Create a week, rejecting week 0.
    pub fn new(week: u16) -> Result<Self> {
        if week == 0 {
            return Err(ApaError::InvalidWeek { week });
        }
        Ok(Self(week))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The week before this one, if any.
    pub fn previous(&self) -> Option<Week> {
        (self.0 > 1).then(|| Week(self.0 - 1))
    }

    pub fn next(&self) -> Week {
        Week(self.0.saturating_add(1))
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Week {
    type Error = ApaError;

    fn try_from(week: u16) -> Result<Self> {
        Week::new(week)
    }
}

impl From<Week> for u16 {
    fn from(week: Week) -> u16 {
        week.0
    }
}

impl FromStr for Week {
    type Err = ApaError;

    fn from_str(s: &str) -> Result<Self> {
        Week::new(s.trim().parse()?)
    }
}
