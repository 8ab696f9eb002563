use once_cell::sync::Lazy;
use regex::Regex;

use super::Extractor;
use crate::constants::{FIXTURE_CARD_SELECTOR, MIN_FIXTURE_CELLS};
use crate::date::{date_spans, find_date, normalize_date};
use crate::strategy::{Strategy, StrategyChain};
use crate::text::tidy;
use crate::types::{FixtureCandidate, ListingKind};

static KICKOFF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}:\d{2})\b").expect("valid regex"));

static VERSUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+vs?\.?\s+").expect("valid regex"));

pub fn extractor() -> Extractor<FixtureCandidate> {
    Extractor::new(
        ListingKind::Fixtures,
        FIXTURE_CARD_SELECTOR,
        StrategyChain::new().with(FixtureRow),
        StrategyChain::new().with(FixtureCard),
    )
}

/// First `H:MM`/`HH:MM` token in the text, or empty.
pub fn kickoff(text: &str) -> String {
    KICKOFF
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Positional row: `[date, matchType, home, away, venue, kickoff?]`.
pub struct FixtureRow;

impl Strategy<[String]> for FixtureRow {
    type Output = FixtureCandidate;

    fn name(&self) -> &'static str {
        "fixture_table_row"
    }

    fn attempt(&self, cells: &[String]) -> Option<FixtureCandidate> {
        if cells.len() < MIN_FIXTURE_CELLS {
            return None;
        }
        Some(FixtureCandidate {
            date: normalize_date(&cells[0]),
            match_type: cells[1].clone(),
            home: cells[2].clone(),
            away: cells[3].clone(),
            venue: cells[4].clone(),
            kickoff: cells.get(5).map(|c| kickoff(c)).unwrap_or_default(),
        })
    }
}

/// Free text such as `Sun 07 Sep 2025 Team A v Team B 15:00`.
///
/// Teams sit either side of the first `v`/`vs` separator; date and kickoff
/// tokens bound them.
pub struct FixtureCard;

impl Strategy<str> for FixtureCard {
    type Output = FixtureCandidate;

    fn name(&self) -> &'static str {
        "fixture_card_versus"
    }

    fn attempt(&self, text: &str) -> Option<FixtureCandidate> {
        let (_, date) = find_date(text)?;
        let versus = VERSUS.find(text)?;

        let mut tokens = date_spans(text);
        tokens.extend(KICKOFF.find_iter(text).map(|m| m.range()));

        let home_start = tokens
            .iter()
            .map(|span| span.end)
            .filter(|&end| end <= versus.start())
            .max()
            .unwrap_or(0);
        let away_end = tokens
            .iter()
            .map(|span| span.start)
            .filter(|&start| start >= versus.end())
            .min()
            .unwrap_or(text.len());

        Some(FixtureCandidate {
            date,
            match_type: String::new(),
            home: tidy(&text[home_start..versus.start()]),
            away: tidy(&text[versus.end()..away_end]),
            venue: String::new(),
            kickoff: kickoff(text),
        })
    }
}
