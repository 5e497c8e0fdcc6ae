use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier of a game entry.
///
/// Ids are assigned by the store at creation time from a monotonically
/// increasing counter and are never reassigned or reused within one data
/// file. On the wire and in the durable snapshot a `GameId` is a bare JSON
/// number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for GameId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_route_segment() {
        let id: GameId = "42".parse().unwrap();
        assert_eq!(id, GameId::new(42));
    }

    #[test]
    fn rejects_non_numeric() {
        let err = "abc".parse::<GameId>().unwrap_err();
        assert_eq!(err, TypeError::InvalidId("abc".to_string()));
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&GameId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: GameId = serde_json::from_str("7").unwrap();
        assert_eq!(back, GameId::new(7));
    }

    #[test]
    fn display_matches_value() {
        assert_eq!(GameId::new(1234).to_string(), "1234");
    }
}
