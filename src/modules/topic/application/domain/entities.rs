use std::fmt;

use serde::Serialize;
use uuid::Uuid;

//
// ──────────────────────────────────────────────────────────
// Id validation
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidId {
    #[error("id is missing")]
    Missing,

    #[error("id \"{0}\" is not numeric")]
    NotNumeric(String),

    #[error("id must be a positive number, got {0}")]
    NotPositive(i64),
}

fn parse_positive(raw: &str) -> Result<i64, InvalidId> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(InvalidId::Missing);
    }

    let value: i64 = raw
        .parse()
        .map_err(|_| InvalidId::NotNumeric(raw.to_string()))?;

    if value <= 0 {
        return Err(InvalidId::NotPositive(value));
    }

    Ok(value)
}

//
// ──────────────────────────────────────────────────────────
// Topic / board ids
// ──────────────────────────────────────────────────────────
//

/// Database id of a topic. Constructing one validates it, so every port
/// taking a `TopicId` can rely on it being positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopicId(i64);

impl TopicId {
    pub fn new(value: i64) -> Result<Self, InvalidId> {
        if value <= 0 {
            return Err(InvalidId::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parse a raw id as it arrives from a route segment or form field.
    pub fn parse(raw: &str) -> Result<Self, InvalidId> {
        parse_positive(raw).map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoardId(i64);

impl BoardId {
    pub fn new(value: i64) -> Result<Self, InvalidId> {
        if value <= 0 {
            return Err(InvalidId::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidId> {
        parse_positive(raw).map(Self)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//
// ──────────────────────────────────────────────────────────
// User identity
// ──────────────────────────────────────────────────────────
//

/// Identity of a user acting on or referenced by a topic (author,
/// moderator). Owned by the surrounding application; opaque here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<UserId> for Uuid {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
