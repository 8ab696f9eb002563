use once_cell::sync::Lazy;
use regex::Regex;

use super::Extractor;
use crate::constants::{MIN_RESULT_CELLS, RESULT_CARD_SELECTOR};
use crate::date::{find_date, normalize_date};
use crate::strategy::{Strategy, StrategyChain};
use crate::text::tidy;
use crate::types::{ListingKind, ResultCandidate, Score};

/// Column holding the score (or the home score, when split across columns).
const SCORE_CELL: usize = 3;
/// Column holding the away score when split across columns.
const AWAY_SCORE_CELL: usize = 5;

static SCORE_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[-–]\s*(\d+)").expect("valid regex"));

static SCORE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s+(\d+)\s*[-–]\s*(\d+)\s+(.+)$").expect("valid regex")
});

pub fn extractor() -> Extractor<ResultCandidate> {
    Extractor::new(
        ListingKind::Results,
        RESULT_CARD_SELECTOR,
        StrategyChain::new().with(ResultRow::new()),
        StrategyChain::new().with(ResultCard),
    )
}

/// First `<int> - <int>` (hyphen or en-dash) pair in the text.
pub fn parse_score_pair(text: &str) -> Option<Score> {
    let caps = SCORE_PAIR.captures(text)?;
    Some(Score {
        home: caps[1].parse().ok()?,
        away: caps[2].parse().ok()?,
    })
}

/// Score written in one cell, e.g. `2 - 0` or `3–1`.
pub struct DashedScore;

impl Strategy<[String]> for DashedScore {
    type Output = Score;

    fn name(&self) -> &'static str {
        "dashed_score_cell"
    }

    fn attempt(&self, cells: &[String]) -> Option<Score> {
        cells.get(SCORE_CELL).and_then(|cell| parse_score_pair(cell))
    }
}

/// Home and away scores in their own columns.
pub struct SplitScoreColumns;

impl Strategy<[String]> for SplitScoreColumns {
    type Output = Score;

    fn name(&self) -> &'static str {
        "split_score_columns"
    }

    fn attempt(&self, cells: &[String]) -> Option<Score> {
        Some(Score {
            home: cells.get(SCORE_CELL)?.parse().ok()?,
            away: cells.get(AWAY_SCORE_CELL)?.parse().ok()?,
        })
    }
}

/// Positional row: `[date, matchType, home, score, away, …]`.
///
/// The score is read by a dashed pair in cell 3 first, then by separate
/// numeric columns 3 and 5.
pub struct ResultRow {
    scores: StrategyChain<[String], Score>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self {
            scores: StrategyChain::new()
                .with(DashedScore)
                .with(SplitScoreColumns),
        }
    }
}

impl Default for ResultRow {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy<[String]> for ResultRow {
    type Output = ResultCandidate;

    fn name(&self) -> &'static str {
        "result_table_row"
    }

    fn attempt(&self, cells: &[String]) -> Option<ResultCandidate> {
        if cells.len() < MIN_RESULT_CELLS {
            return None;
        }
        Some(ResultCandidate {
            date: normalize_date(&cells[0]),
            match_type: cells[1].clone(),
            home: cells[2].clone(),
            away: cells[4].clone(),
            score: self.scores.first_match(cells),
        })
    }
}

/// Free text such as `07/09/2025 Team A 2 - 1 Team B`.
///
/// The date token is cut out first; the remainder must read
/// `home <int> - <int> away`.
pub struct ResultCard;

impl Strategy<str> for ResultCard {
    type Output = ResultCandidate;

    fn name(&self) -> &'static str {
        "result_card_score_line"
    }

    fn attempt(&self, text: &str) -> Option<ResultCandidate> {
        let (span, date) = find_date(text)?;
        let rest = tidy(&format!("{} {}", &text[..span.start], &text[span.end..]));
        let caps = SCORE_LINE.captures(&rest)?;
        Some(ResultCandidate {
            date,
            match_type: String::new(),
            home: tidy(&caps[1]),
            away: tidy(&caps[4]),
            score: Some(Score {
                home: caps[2].parse().ok()?,
                away: caps[3].parse().ok()?,
            }),
        })
    }
}
