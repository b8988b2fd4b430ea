// 🎿 Race File Parser - Tab-delimited results → performance records
// One pass per race export: field extraction, row filtering,
// bib-level deduplication, name cleaning, time parsing.
//
// Problem solved:
// - Timing exports repeat each athlete in an "Overall" section and again
//   in per-category sections → first record per bib wins
// - Rows are noisy (header lines, section banners, blank lines) → any row
//   that does not look like a result is silently dropped, never an error

use serde::{Deserialize, Serialize};

// ============================================================================
// COLUMN LAYOUT
// ============================================================================

// 0-based positions in the tab-separated export
const COL_BIB: usize = 1;
const COL_FIRST_NAME: usize = 3;
const COL_LAST_NAME: usize = 4;
const COL_CATEGORY: usize = 7;
const COL_GENDER: usize = 8;
const COL_TIME: usize = 9;

/// A result row must carry at least this many fields to be considered
const MIN_FIELDS: usize = 10;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parse the gender column. The export writes exactly "Male" or
    /// "Female" for scored rows; anything else ("M", "male", team relays)
    /// marks a row we do not score.
    pub fn from_field(raw: &str) -> Option<Gender> {
        match raw.trim() {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

// ============================================================================
// PERFORMANCE RECORD
// ============================================================================

/// One athlete's result in one race file
///
/// Immutable after parsing. The bib number is consumed during
/// deduplication and not carried further: identity across files and
/// seasons is the normalized name key, never the bib.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// First name, trimmed, parenthetical annotations stripped
    pub first: String,

    /// Last name, trimmed, parenthetical annotations stripped
    pub last: String,

    /// Identity key: lowercase "first|last" (see identity module)
    pub key: String,

    /// Male or Female; rows with any other value never become records
    pub gender: Gender,

    /// Free-text division string, e.g. "High School Male"
    pub category: String,

    /// Elapsed race time in seconds; None = DNS / no time recorded
    pub elapsed_secs: Option<f64>,
}

// ============================================================================
// PARSE STATS
// ============================================================================

/// Counters for one file's parse pass
///
/// Skipping stays silent row by row (the exports are noisy by design);
/// these counters exist so the run summary can account for every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Rows seen in the file
    pub rows: usize,

    /// Rows that became records
    pub kept: usize,

    /// Rows with fewer than MIN_FIELDS fields (headers, banners, blanks)
    pub skipped_short: usize,

    /// Rows whose bib field is not an integer
    pub skipped_bib: usize,

    /// Rows repeating a bib already seen in this file
    pub skipped_duplicate_bib: usize,

    /// Rows excluded by the category filter
    pub skipped_category: usize,

    /// Rows whose gender column is not exactly Male/Female
    pub skipped_gender: usize,

    /// Rows with an empty first or last name after cleaning
    pub skipped_name: usize,
}

impl ParseStats {
    /// Total rows dropped, across all reasons
    pub fn skipped(&self) -> usize {
        self.skipped_short
            + self.skipped_bib
            + self.skipped_duplicate_bib
            + self.skipped_category
            + self.skipped_gender
            + self.skipped_name
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows → {} records ({} skipped: {} short, {} bib, {} dup, {} category, {} gender, {} name)",
            self.rows,
            self.kept,
            self.skipped(),
            self.skipped_short,
            self.skipped_bib,
            self.skipped_duplicate_bib,
            self.skipped_category,
            self.skipped_gender,
            self.skipped_name,
        )
    }
}

/// Output of one file's parse pass: records in first-occurrence order
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub records: Vec<PerformanceRecord>,
    pub stats: ParseStats,
}

// ============================================================================
// FIELD CLEANING
// ============================================================================

/// Strip every parenthesized annotation, then trim
///
/// Rosters decorate names with grade or eligibility notes:
/// - "Smith (Soph)" → "Smith"
/// - "  Jones  " → "Jones"
///
/// The whitespace run immediately before a "(...)" goes with it. An
/// unmatched "(" is left as-is.
pub fn clean_name(raw: &str) -> String {
    let mut s = raw.to_string();
    while let Some(open) = s.find('(') {
        let Some(close) = s[open..].find(')') else {
            break;
        };
        let start = s[..open].trim_end().len();
        s.replace_range(start..open + close + 1, "");
    }
    s.trim().to_string()
}

/// Parse an elapsed time string into seconds
///
/// Accepts "MM:SS" or "MM:SS.sss" (fractional seconds optional):
/// - "5:23.4" → 323.4
/// - "12:00"  → 720.0
///
/// Empty strings, "DNS", "-", and anything else that does not match the
/// digit pattern all mean "no time recorded" and return None. Unparseable
/// times are never an error.
pub fn parse_elapsed(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "DNS" || s == "-" {
        return None;
    }

    let (minutes, seconds) = s.split_once(':')?;
    if !is_digits(minutes) || !is_seconds(seconds) {
        return None;
    }

    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes * 60.0 + seconds)
}

/// True for a non-empty run of ASCII digits (no signs, no whitespace)
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True for "SS" or "SS.sss" (fractional part may be empty: "23." is fine)
fn is_seconds(s: &str) -> bool {
    match s.split_once('.') {
        None => is_digits(s),
        Some((whole, frac)) => is_digits(whole) && frac.bytes().all(|b| b.is_ascii_digit()),
    }
}

// ============================================================================
// ROW FILTERS
// ============================================================================

/// Short-course races are a different distance; their rows never score
fn is_short_course(category: &str) -> bool {
    category.to_lowercase().contains("short course")
}

/// Only high-school and no-score divisions are in scope;
/// elite/open divisions are excluded
fn is_scored_division(category: &str) -> bool {
    let lower = category.to_lowercase();
    lower.contains("high school") || lower.contains("no score")
}

// ============================================================================
// RACE FILE PARSER
// ============================================================================

/// Parse the raw text of one race export into performance records
///
/// Pure given the text: reading the file is the caller's job. Rows are
/// consumed as tab-separated fields with no header or quoting assumptions;
/// every row that fails a check is dropped silently and counted.
///
/// Record order = first-occurrence order in the file, post-filtering.
pub fn parse_race_file(content: &str) -> ParsedFile {
    use csv::ReaderBuilder;
    use std::collections::HashSet;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    let mut stats = ParseStats::default();
    let mut seen_bibs: HashSet<i64> = HashSet::new();

    for row in reader.records() {
        // With quoting off and flexible widths the reader only fails on
        // byte-level problems; such rows are noise like any other
        let Ok(row) = row else {
            stats.rows += 1;
            stats.skipped_short += 1;
            continue;
        };
        stats.rows += 1;

        if row.len() < MIN_FIELDS {
            stats.skipped_short += 1;
            continue;
        }

        let Ok(bib) = row.get(COL_BIB).unwrap_or("").trim().parse::<i64>() else {
            stats.skipped_bib += 1;
            continue;
        };

        // First record per bib wins; the repeats are the same result
        // re-listed under a category section
        if !seen_bibs.insert(bib) {
            stats.skipped_duplicate_bib += 1;
            continue;
        }

        let category = row.get(COL_CATEGORY).unwrap_or("").trim().to_string();
        if is_short_course(&category) || !is_scored_division(&category) {
            stats.skipped_category += 1;
            continue;
        }

        let Some(gender) = Gender::from_field(row.get(COL_GENDER).unwrap_or("")) else {
            stats.skipped_gender += 1;
            continue;
        };

        let first = clean_name(row.get(COL_FIRST_NAME).unwrap_or(""));
        let last = clean_name(row.get(COL_LAST_NAME).unwrap_or(""));
        if first.is_empty() || last.is_empty() {
            stats.skipped_name += 1;
            continue;
        }

        let key = crate::identity::athlete_key(&first, &last);
        let elapsed_secs = parse_elapsed(row.get(COL_TIME).unwrap_or(""));

        records.push(PerformanceRecord {
            first,
            last,
            key,
            gender,
            category,
            elapsed_secs,
        });
        stats.kept += 1;
    }

    ParsedFile { records, stats }
}

// ============================================================================
// TESTS
// ============================================================================
