use std::fmt;
use tracing::debug;

use crate::types::{FixtureCandidate, FixtureRecord, ResultCandidate, ResultRecord};

/// The first mandatory field a candidate was found to lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Date,
    Home,
    Away,
    Score,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::Date => "date",
            MissingField::Home => "home",
            MissingField::Away => "away",
            MissingField::Score => "score",
        };
        f.write_str(name)
    }
}

/// A partially extracted record that becomes a real one only if its mandatory fields are present.
pub trait Candidate {
    type Record;

    fn into_record(self) -> Result<Self::Record, MissingField>;
}

impl Candidate for FixtureCandidate {
    type Record = FixtureRecord;

    fn into_record(self) -> Result<FixtureRecord, MissingField> {
        let date = self.date.date().ok_or(MissingField::Date)?;
        require(&self.home, MissingField::Home)?;
        require(&self.away, MissingField::Away)?;
        Ok(FixtureRecord {
            date,
            match_type: self.match_type,
            home: self.home,
            away: self.away,
            venue: self.venue,
            kickoff: self.kickoff,
        })
    }
}

impl Candidate for ResultCandidate {
    type Record = ResultRecord;

    fn into_record(self) -> Result<ResultRecord, MissingField> {
        let date = self.date.date().ok_or(MissingField::Date)?;
        require(&self.home, MissingField::Home)?;
        require(&self.away, MissingField::Away)?;
        let score = self.score.ok_or(MissingField::Score)?;
        Ok(ResultRecord {
            date,
            match_type: self.match_type,
            home: self.home,
            away: self.away,
            home_score: score.home,
            away_score: score.away,
        })
    }
}

fn require(value: &str, field: MissingField) -> Result<(), MissingField> {
    if value.is_empty() {
        Err(field)
    } else {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Assembly<R> {
    pub records: Vec<R>,
    pub skipped: usize,
}

/// Keeps the candidates that satisfy their mandatory fields, in encounter order.
pub fn assemble<C, I>(candidates: I) -> Assembly<C::Record>
where
    C: Candidate,
    I: IntoIterator<Item = C>,
{
    let mut records = Vec::new();
    let mut skipped = 0;
    for (index, candidate) in candidates.into_iter().enumerate() {
        match candidate.into_record() {
            Ok(record) => records.push(record),
            Err(missing) => {
                debug!(index, %missing, "Dropping candidate without mandatory field");
                skipped += 1;
            }
        }
    }
    Assembly { records, skipped }
}
