use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::date::NormalizedDate;

/// Which listing page a pipeline handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Fixtures,
    Results,
}

impl ListingKind {
    pub fn label(self) -> &'static str {
        match self {
            ListingKind::Fixtures => "fixtures",
            ListingKind::Results => "results",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled match, as written to the fixtures artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRecord {
    pub date: NaiveDate,
    #[serde(rename = "matchType")]
    pub match_type: String,
    pub home: String,
    pub away: String,
    pub venue: String,
    /// `HH:MM` or empty.
    #[serde(rename = "ko")]
    pub kickoff: String,
}

/// A completed match, as written to the results artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub date: NaiveDate,
    #[serde(rename = "matchType")]
    pub match_type: String,
    pub home: String,
    pub away: String,
    #[serde(rename = "hs")]
    pub home_score: u32,
    #[serde(rename = "as")]
    pub away_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Fields recovered from one row or card before the mandatory-field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCandidate {
    pub date: NormalizedDate,
    pub match_type: String,
    pub home: String,
    pub away: String,
    pub venue: String,
    pub kickoff: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCandidate {
    pub date: NormalizedDate,
    pub match_type: String,
    pub home: String,
    pub away: String,
    pub score: Option<Score>,
}
