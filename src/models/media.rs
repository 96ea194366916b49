use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a media record.
///
/// Only `Collected` records have a file on disk, so only they participate in
/// version reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaState {
    Wanted,
    Scraping,
    Checking,
    Sleeping,
    Unreleased,
    Blacklisted,
    Upgrading,
    Collected,
}

impl MediaState {
    pub const ALL: [Self; 8] = [
        Self::Wanted,
        Self::Scraping,
        Self::Checking,
        Self::Sleeping,
        Self::Unreleased,
        Self::Blacklisted,
        Self::Upgrading,
        Self::Collected,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wanted => "Wanted",
            Self::Scraping => "Scraping",
            Self::Checking => "Checking",
            Self::Sleeping => "Sleeping",
            Self::Unreleased => "Unreleased",
            Self::Blacklisted => "Blacklisted",
            Self::Upgrading => "Upgrading",
            Self::Collected => "Collected",
        }
    }
}

impl fmt::Display for MediaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("unknown media state '{s}'"))
    }
}

/// A media library record as the reconciliation core sees it.
///
/// `filled_by_file` and `state` are read; `version` is the only field the
/// core ever writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: i64,
    pub title: String,
    pub filled_by_file: Option<String>,
    pub version: Option<String>,
    pub state: String,
    pub added_at: String,
    pub last_updated: Option<String>,
}

impl MediaRecord {
    #[must_use]
    pub fn is_collected(&self) -> bool {
        self.state == MediaState::Collected.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        for state in MediaState::ALL {
            assert_eq!(state.as_str().parse::<MediaState>(), Ok(state));
        }
    }

    #[test]
    fn test_unknown_state_rejected() {
        assert!("Downloaded".parse::<MediaState>().is_err());
    }
}
