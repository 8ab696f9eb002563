use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// A weekday written in full or abbreviated, as a whole word.
const WEEKDAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues?|wed|thu(?:rs?)?|fri|sat|sun)\b";

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));

static DAY_FIRST_SLASHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"));

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{WEEKDAY}\.?,?\s+)?(\d{{1,2}})\s+([a-z]{{3,}})\.?\s+(\d{{4}})\b"
    ))
    .expect("valid regex")
});

/// A date token inside free text: the slash form or the (weekday) day-month-year form.
static DATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:\d{{1,2}}/\d{{1,2}}/\d{{4}}|(?:(?P<weekday>{WEEKDAY})\.?,?\s+)?(?P<dmy>\d{{1,2}}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{{4}}))\b"
    ))
    .expect("valid regex")
});

/// Outcome of normalizing a textual date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedDate {
    Parsed(NaiveDate),
    Unparseable,
}

impl NormalizedDate {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Parsed(date) => Some(date),
            NormalizedDate::Unparseable => None,
        }
    }
}

#[cfg(test)]
impl NormalizedDate {
    pub(crate) fn to_iso(self) -> Option<String> {
        self.date().map(|d| d.format("%Y-%m-%d").to_string())
    }
}

impl From<Option<NaiveDate>> for NormalizedDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(NormalizedDate::Unparseable, NormalizedDate::Parsed)
    }
}

/// Normalizes one of the recognized date spellings into a calendar date.
///
/// Recognized forms, first match wins:
/// 1. `YYYY-MM-DD`
/// 2. `D/M/YYYY` or `DD/MM/YYYY` (day first)
/// 3. `[Weekday] D Mon YYYY`, month keyed on its first three letters
///
/// Anything else, including impossible calendar dates, is `Unparseable`.
pub fn normalize_date(raw: &str) -> NormalizedDate {
    let s = raw.trim();
    if s.is_empty() {
        return NormalizedDate::Unparseable;
    }

    if let Some(caps) = ISO_DATE.captures(s) {
        return calendar_date(&caps[1], month_from_digits(&caps[2]), &caps[3]);
    }

    if let Some(caps) = DAY_FIRST_SLASHED.captures(s) {
        return calendar_date(&caps[3], month_from_digits(&caps[2]), &caps[1]);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(s) {
        return calendar_date(&caps[3], month_from_name(&caps[2]), &caps[1]);
    }

    NormalizedDate::Unparseable
}

/// Finds the first date token in free text, returning its byte span and normalized value.
pub fn find_date(text: &str) -> Option<(Range<usize>, NormalizedDate)> {
    DATE_TOKEN.captures(text).and_then(|caps| date_token(&caps))
}

/// Byte spans of every date token in free text.
pub fn date_spans(text: &str) -> Vec<Range<usize>> {
    DATE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| date_token(&caps))
        .map(|(span, _)| span)
        .collect()
}

/// A leading weekday belongs to the token only when it agrees with the date;
/// otherwise it is part of the surrounding text (`Sheffield Wednesday 7 Sep 2025`).
fn date_token(caps: &Captures) -> Option<(Range<usize>, NormalizedDate)> {
    let whole = caps.get(0)?;
    let date = normalize_date(whole.as_str());
    let span = match (caps.name("weekday"), caps.name("dmy"), date.date()) {
        (Some(weekday), Some(dmy), Some(day)) if !falls_on(weekday.as_str(), day) => dmy.range(),
        _ => whole.range(),
    };
    Some((span, date))
}

fn falls_on(weekday: &str, date: NaiveDate) -> bool {
    let prefix = weekday.get(..3).map(str::to_ascii_lowercase);
    WEEKDAYS
        .iter()
        .position(|w| Some(*w) == prefix.as_deref())
        .is_some_and(|idx| idx as u32 == date.weekday().num_days_from_monday())
}

fn calendar_date(year: &str, month: Option<u32>, day: &str) -> NormalizedDate {
    let date = month.and_then(|month| {
        let year: i32 = year.parse().ok()?;
        let day: u32 = day.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });
    date.into()
}

fn month_from_digits(month: &str) -> Option<u32> {
    month.parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn iso(raw: &str) -> Option<String> {
        normalize_date(raw).to_iso()
    }

    #[test]
    fn test_canonical_passes_through() {
        assert_eq!(iso("2025-09-07").as_deref(), Some("2025-09-07"));
        assert_eq!(iso("  2025-09-07 ").as_deref(), Some("2025-09-07"));
    }

    #[test]
    fn test_every_day_first_date_of_a_leap_year() {
        let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        while day.format("%Y").to_string() == "2024" {
            let expected = day.format("%Y-%m-%d").to_string();
            assert_eq!(iso(&day.format("%d/%m/%Y").to_string()), Some(expected.clone()));
            assert_eq!(iso(&day.format("%-d/%-m/%Y").to_string()), Some(expected));
            day += Duration::days(1);
        }
    }

    #[test]
    fn test_idempotent_on_canonical_output() {
        for raw in ["07/09/2025", "Sun 07 Sep 2025", "2025-09-07", "1/1/2030"] {
            let once = iso(raw).unwrap();
            assert_eq!(iso(&once), Some(once.clone()));
        }
    }

    #[test]
    fn test_impossible_dates_are_unparseable() {
        assert_eq!(normalize_date("31/02/2025"), NormalizedDate::Unparseable);
        assert_eq!(normalize_date("31/09/2025"), NormalizedDate::Unparseable);
        assert_eq!(normalize_date("29/02/2025"), NormalizedDate::Unparseable);
        assert_eq!(normalize_date("2025-02-30"), NormalizedDate::Unparseable);
        assert_eq!(normalize_date("01/13/2025"), NormalizedDate::Unparseable);
        assert_eq!(normalize_date("Mon 31 Jun 2025"), NormalizedDate::Unparseable);
    }

    #[test]
    fn test_weekday_month_form() {
        assert_eq!(iso("Sun 07 Sep 2025").as_deref(), Some("2025-09-07"));
        assert_eq!(iso("sun 7 sep 2025").as_deref(), Some("2025-09-07"));
        assert_eq!(iso("Sunday 7 September 2025").as_deref(), Some("2025-09-07"));
        assert_eq!(iso("7 Sep 2025").as_deref(), Some("2025-09-07"));
        assert_eq!(iso("Sat 01 NOV 2025 10:30").as_deref(), Some("2025-11-01"));
    }

    #[test]
    fn test_unrecognized_forms_are_not_guessed() {
        for raw in ["", "TBC", "Sep 7 2025", "2025/09/07", "07-09-2025", "7 Foo 2025", "07/09/25"] {
            assert_eq!(normalize_date(raw), NormalizedDate::Unparseable, "{raw}");
        }
    }

    #[test]
    fn test_find_date_in_free_text() {
        let text = "Team A v Team B 7 Sep 2025 15:00 Ground 2";
        let (span, date) = find_date(text).unwrap();
        assert_eq!(&text[span], "7 Sep 2025");
        assert_eq!(date.to_iso().as_deref(), Some("2025-09-07"));

        let text = "Sun 07 Sep 2025 Team A 2 - 1 Team B";
        let (span, _) = find_date(text).unwrap();
        assert_eq!(&text[span], "Sun 07 Sep 2025");

        let (span, date) = find_date("Played 07/09/2025 at home").unwrap();
        assert_eq!(span, 7..17);
        assert!(date.date().is_some());

        assert!(find_date("Team A v Team B").is_none());
    }

    #[test]
    fn test_weekday_lookalike_team_names_stay_outside_the_token() {
        for (text, token) in [
            ("Team A v Thurmaston 7 Sep 2025", "7 Sep 2025"),
            ("Sunderland 7 Sep 2025", "7 Sep 2025"),
            ("Sheffield Wednesday 7 Sep 2025", "7 Sep 2025"),
            ("Monarchs 14 Sep 2025", "14 Sep 2025"),
            ("Thurs 11 Sep 2025", "Thurs 11 Sep 2025"),
            ("Sunday 7 Sep 2025", "Sunday 7 Sep 2025"),
        ] {
            let (span, date) = find_date(text).unwrap();
            assert_eq!(&text[span], token, "{text}");
            assert!(date.date().is_some());
        }
        assert_eq!(
            date_spans("Sheffield Wednesday 7 Sep 2025 v Sun 14 Sep 2025"),
            [20..30, 33..48]
        );
    }
}
