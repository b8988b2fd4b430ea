// ⛷️ Season Standings - Cross-year join into one leaderboard per gender
// Joins both seasons' per-event and combined rankings into one row per
// athlete, keeping only athletes who raced in both seasons.
//
// Join rules:
// - Identity = name key; an athlete present in either 2025 event and
//   either 2026 event makes the cut, everyone else is dropped
// - Every (event, season) slot is optional: a skipped race is a null
//   time and a null rank, never a zero
// - Final order = ascending 2026 combined rank, athletes without one
//   after all who have one, stable otherwise

use crate::parser::{Gender, PerformanceRecord};
use crate::ranking::{build_combined_rank, build_lookup, build_rank, key_union, RecordLookup};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sort sentinel for athletes without a current-season combined rank.
/// Never serialized: output rows keep `None`.
const UNRANKED: u32 = u32::MAX;

// ============================================================================
// OUTPUT ROWS
// ============================================================================

/// Final leaderboard row: one athlete across both seasons
///
/// Field names are the published document schema; the site reads them
/// by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRow {
    /// Display name, "First Last"
    pub name: String,
    pub first: String,
    pub last: String,

    // 2025 season
    pub fs25_time: Option<f64>,
    pub fs25_rank: Option<u32>,
    pub cl25_time: Option<f64>,
    pub cl25_rank: Option<u32>,
    pub comb25_time: Option<f64>,
    pub comb25_rank: Option<u32>,

    // 2026 season
    pub fs26_time: Option<f64>,
    pub fs26_rank: Option<u32>,
    pub cl26_time: Option<f64>,
    pub cl26_rank: Option<u32>,
    pub comb26_time: Option<f64>,
    pub comb26_rank: Option<u32>,
}

/// The complete output document: one ranked leaderboard per gender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub boys: Vec<AthleteRow>,
    pub girls: Vec<AthleteRow>,
}

// ============================================================================
// GENDER STANDINGS BUILDER
// ============================================================================

/// All four race files' records, parsed, one season pair per year
#[derive(Debug, Clone, Copy)]
pub struct SeasonRecords<'a> {
    pub freestyle_2025: &'a [PerformanceRecord],
    pub classic_2025: &'a [PerformanceRecord],
    pub freestyle_2026: &'a [PerformanceRecord],
    pub classic_2026: &'a [PerformanceRecord],
}

/// Build one gender's leaderboard from all four files
///
/// Partitions each file by gender, ranks each partition, builds both
/// seasons' combined rankings, intersects the two seasons' athletes and
/// assembles the rows.
pub fn build_gender_standings(gender: Gender, records: SeasonRecords<'_>) -> Vec<AthleteRow> {
    let fs25 = filter_gender(records.freestyle_2025, gender);
    let cl25 = filter_gender(records.classic_2025, gender);
    let fs26 = filter_gender(records.freestyle_2026, gender);
    let cl26 = filter_gender(records.classic_2026, gender);

    let fs25_ranks = build_rank(&fs25);
    let cl25_ranks = build_rank(&cl25);
    let fs26_ranks = build_rank(&fs26);
    let cl26_ranks = build_rank(&cl26);

    let fs25_map = build_lookup(&fs25);
    let cl25_map = build_lookup(&cl25);
    let fs26_map = build_lookup(&fs26);
    let cl26_map = build_lookup(&cl26);

    let keys_2025 = key_union(&fs25, &cl25);
    let keys_2026 = key_union(&fs26, &cl26);

    let comb25 = build_combined_rank(&fs25_map, &cl25_map, &keys_2025);
    let comb26 = build_combined_rank(&fs26_map, &cl26_map, &keys_2026);

    // Only athletes on both seasons' start lists make the leaderboard,
    // in 2025 first-seen order
    let current: HashSet<&str> = keys_2026.iter().map(String::as_str).collect();
    let both_keys = keys_2025
        .iter()
        .filter(|key| current.contains(key.as_str()));

    let mut rows = Vec::new();
    for key in both_keys {
        // Representative record for the display name, fixed precedence
        let Some(rep) = first_available(key, [&fs25_map, &cl25_map, &fs26_map, &cl26_map]) else {
            continue;
        };

        let comb25_entry = comb25.get(key);
        let comb26_entry = comb26.get(key);

        rows.push(AthleteRow {
            name: format!("{} {}", rep.first, rep.last),
            first: rep.first.clone(),
            last: rep.last.clone(),
            fs25_time: time_of(&fs25_map, key),
            fs25_rank: fs25_ranks.get(key).copied(),
            cl25_time: time_of(&cl25_map, key),
            cl25_rank: cl25_ranks.get(key).copied(),
            comb25_time: comb25_entry.map(|c| c.total_secs),
            comb25_rank: comb25_entry.map(|c| c.rank),
            fs26_time: time_of(&fs26_map, key),
            fs26_rank: fs26_ranks.get(key).copied(),
            cl26_time: time_of(&cl26_map, key),
            cl26_rank: cl26_ranks.get(key).copied(),
            comb26_time: comb26_entry.map(|c| c.total_secs),
            comb26_rank: comb26_entry.map(|c| c.rank),
        });
    }

    // Stable sort: unranked athletes sink below every ranked one and keep
    // their relative order
    rows.sort_by_key(|row| row.comb26_rank.unwrap_or(UNRANKED));
    rows
}

fn filter_gender(records: &[PerformanceRecord], gender: Gender) -> Vec<PerformanceRecord> {
    records
        .iter()
        .filter(|r| r.gender == gender)
        .cloned()
        .collect()
}

fn first_available<'a>(
    key: &str,
    lookups: [&RecordLookup<'a>; 4],
) -> Option<&'a PerformanceRecord> {
    lookups.iter().find_map(|lookup| lookup.get(key).copied())
}

fn time_of(lookup: &RecordLookup<'_>, key: &str) -> Option<f64> {
    lookup.get(key).and_then(|r| r.elapsed_secs)
}

// ============================================================================
// TESTS
// ============================================================================
