//! Date grammar for work history and education lines.
//!
//! Recognized forms: `2019`, `Jan 2020`, `January 2020`, `Mar 3, 2021`, with
//! an optional range tail (`- 2021`, `– Present`, `to June 2022`). Missing
//! precision rounds down: a bare year is January 1st, a month-year is the
//! 1st of the month. Ongoing markers (`Present`, `current`, ...) set the
//! `current` flag and leave the end date open.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::WorkExperience;

/// Years outside this window are treated as ordinary numbers (zip codes,
/// phone fragments, headcounts), not dates.
const YEAR_MIN: i32 = 1950;
const YEAR_MAX: i32 = 2100;

static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(?:\d{1,2},?\s+)?)?(\d{4})\b",
    )
    .unwrap()
});

static PRESENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:present|current|now|ongoing)\b").unwrap());

/// A date range pulled out of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub current: bool,
}

/// A [`DateRange`] plus the text around it, so callers can decide whether
/// the line is purely a date line or a combined `Title | dates` line.
#[derive(Debug, Clone, PartialEq)]
pub struct DateExtraction {
    pub range: DateRange,
    /// Text before the first date token, separators trimmed.
    pub prefix: String,
    /// Text after the last date token, separators trimmed.
    pub trailing: String,
}

impl DateExtraction {
    /// True when the line carries nothing but the dates (a couple of stray
    /// characters tolerated).
    pub fn is_pure_date_line(&self) -> bool {
        alnum_count(&self.prefix) <= 2 && alnum_count(&self.trailing) <= 2
    }

    /// True when the dates sit at the end of the line, as in
    /// `Software Engineer | Jan 2020 – Present`.
    pub fn is_end_anchored(&self) -> bool {
        alnum_count(&self.trailing) <= 2
    }
}

/// Scans one line for dates and ongoing markers. Returns `None` when the
/// line contains neither.
pub fn extract_dates(line: &str) -> Option<DateExtraction> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut dates: Vec<NaiveDate> = Vec::new();

    for cap in DATE_TOKEN_RE.captures_iter(line) {
        let year: i32 = match cap[2].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            continue;
        }
        let month = cap
            .get(1)
            .and_then(|m| month_number(m.as_str()))
            .unwrap_or(1);
        let Some(date) = NaiveDate::from_ymd_opt(year, month, 1) else {
            continue;
        };
        if let Some(whole) = cap.get(0) {
            spans.push((whole.start(), whole.end()));
            dates.push(date);
        }
    }

    let present_span = PRESENT_RE.find(line).map(|m| (m.start(), m.end()));
    if dates.is_empty() && present_span.is_none() {
        return None;
    }
    if let Some(span) = present_span {
        spans.push(span);
    }

    let first = spans.iter().map(|s| s.0).min().unwrap_or(0);
    let last = spans.iter().map(|s| s.1).max().unwrap_or(line.len());

    let current = present_span.is_some();
    let range = DateRange {
        start: dates.first().copied(),
        end: if current { None } else { dates.get(1).copied() },
        current,
    };

    Some(DateExtraction {
        range,
        prefix: trim_separators(&line[..first]),
        trailing: trim_separators(&line[last..]),
    })
}

/// Total years of experience: employment intervals merged so overlapping
/// jobs are not double-counted, then summed. Entries without an end date
/// run to `reference` (ongoing roles often omit both the end date and the
/// word "Present"). Rounded to one decimal.
pub fn total_experience_years(experiences: &[WorkExperience], reference: NaiveDate) -> f32 {
    let mut intervals: Vec<(NaiveDate, NaiveDate)> = experiences
        .iter()
        .filter_map(|e| {
            let start = e.start_date?;
            let end = e.end_date.unwrap_or(reference).min(reference);
            (end >= start).then_some((start, end))
        })
        .collect();

    if intervals.is_empty() {
        return 0.0;
    }
    intervals.sort();

    let mut total_days: i64 = 0;
    let (mut span_start, mut span_end) = intervals[0];
    for (start, end) in intervals.into_iter().skip(1) {
        if start <= span_end {
            span_end = span_end.max(end);
        } else {
            total_days += (span_end - span_start).num_days();
            span_start = start;
            span_end = end;
        }
    }
    total_days += (span_end - span_start).num_days();

    round_tenth(total_days as f32 / 365.25)
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: &[&str] = &[
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| lower.starts_with(m))
        .map(|i| i as u32 + 1)
}

fn trim_separators(text: &str) -> String {
    text.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '-' | '–' | '—' | '|' | ',' | '(' | ')' | ':' | '·')
    })
    .to_string()
}

fn alnum_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
