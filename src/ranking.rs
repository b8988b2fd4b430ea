// 🏆 Rank Engine - Ordinal ranks within one partition
// Ranks every timed record of one (event, gender, season) partition and
// builds the combined two-event ranking for a season.
//
// Ranking rules:
// - 1 = fastest; rank is the 1-based position after a stable ascending
//   sort by elapsed time
// - Records without a time get no rank entry at all (absence = unranked,
//   never a sentinel rank)
// - When two bibs in one partition resolve to the same identity key, the
//   first occurrence wins everywhere (key-first-wins)

use crate::parser::PerformanceRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Identity key → 1-based ordinal rank over the timed records of one partition
pub type RankedSet = HashMap<String, u32>;

/// Identity key → representative record within one partition
pub type RecordLookup<'a> = HashMap<&'a str, &'a PerformanceRecord>;

// ============================================================================
// PER-EVENT RANKS
// ============================================================================

/// Rank one partition's records by elapsed time
///
/// Filters to records with a recorded time, stable-sorts ascending and
/// assigns 1-based ranks. Ties keep input order; there is no further
/// tie-break rule.
pub fn build_rank(records: &[PerformanceRecord]) -> RankedSet {
    let mut timed: Vec<(&str, f64)> = records
        .iter()
        .filter_map(|r| r.elapsed_secs.map(|secs| (r.key.as_str(), secs)))
        .collect();

    // Vec::sort_by is stable, so equal times keep their input order
    timed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = RankedSet::new();
    for (position, (key, _)) in timed.iter().enumerate() {
        ranks.entry((*key).to_string()).or_insert(position as u32 + 1);
    }
    ranks
}

// ============================================================================
// RECORD LOOKUP
// ============================================================================

/// Map each identity key to its representative record, first occurrence wins
///
/// Bib-level dedup already ran during parsing; this collapses the residual
/// case of two different bibs resolving to the same name key.
pub fn build_lookup(records: &[PerformanceRecord]) -> RecordLookup<'_> {
    let mut lookup = RecordLookup::new();
    for record in records {
        lookup.entry(record.key.as_str()).or_insert(record);
    }
    lookup
}

/// Union of two partitions' identity keys, first-seen order, deduplicated
///
/// Insertion order matters: it is the stable-sort tie-break order for the
/// combined ranking and the base order of the final output.
pub fn key_union(a: &[PerformanceRecord], b: &[PerformanceRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut keys = Vec::new();
    for record in a.iter().chain(b.iter()) {
        if seen.insert(record.key.as_str()) {
            keys.push(record.key.clone());
        }
    }
    keys
}

// ============================================================================
// COMBINED RANKS
// ============================================================================

/// One athlete's two-event total for a season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedScore {
    /// 1-based rank by total time
    pub rank: u32,

    /// Sum of both events' elapsed seconds
    pub total_secs: f64,
}

/// Build the combined two-event ranking for one season
///
/// An athlete gets a combined score only with a recorded time in *both*
/// events; skipping or not finishing either event excludes the athlete
/// from the combined ranking entirely. Totals are stable-sorted ascending
/// over the supplied key order and ranked 1-based.
pub fn build_combined_rank(
    freestyle: &RecordLookup<'_>,
    classic: &RecordLookup<'_>,
    keys: &[String],
) -> HashMap<String, CombinedScore> {
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for key in keys {
        let (Some(fs), Some(cl)) = (freestyle.get(key.as_str()), classic.get(key.as_str())) else {
            continue;
        };
        let (Some(fs_secs), Some(cl_secs)) = (fs.elapsed_secs, cl.elapsed_secs) else {
            continue;
        };
        totals.push((key.as_str(), fs_secs + cl_secs));
    }

    totals.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut combined = HashMap::new();
    for (position, (key, total_secs)) in totals.iter().enumerate() {
        combined.entry((*key).to_string()).or_insert(CombinedScore {
            rank: position as u32 + 1,
            total_secs: *total_secs,
        });
    }
    combined
}

// ============================================================================
// TESTS
// ============================================================================
