// 🔁 Season Pipeline - Four raw exports in, one standings document out
// One synchronous batch pass: parse → rank → join. The pipeline itself
// never touches the filesystem; `SeasonInputs::load` is the single I/O
// seam and a missing or unreadable file aborts the whole run.

use crate::config::SourceConfig;
use crate::parser::{parse_race_file, Gender, ParseStats};
use crate::standings::{build_gender_standings, SeasonRecords, Standings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// ============================================================================
// SEASON INPUTS
// ============================================================================

/// Raw text of the four race exports
#[derive(Debug, Clone, Default)]
pub struct SeasonInputs {
    pub freestyle_2025: String,
    pub classic_2025: String,
    pub freestyle_2026: String,
    pub classic_2026: String,
}

impl SeasonInputs {
    /// Read all four exports from a data directory
    ///
    /// Fatal on the first missing or unreadable file: a partial season
    /// pair cannot produce a correct leaderboard, so there is no
    /// recovery and no partial output.
    pub fn load(config: &SourceConfig, data_dir: &Path) -> Result<Self> {
        let read = |source: &crate::config::RaceSource| -> Result<String> {
            let path = source.path_in(data_dir);
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {} results: {}", source.label(), path.display()))
        };

        Ok(SeasonInputs {
            freestyle_2025: read(&config.freestyle_2025)?,
            classic_2025: read(&config.classic_2025)?,
            freestyle_2026: read(&config.freestyle_2026)?,
            classic_2026: read(&config.classic_2026)?,
        })
    }
}

// ============================================================================
// PIPELINE RESULT
// ============================================================================

/// Standings plus the per-file parse accounting for the run summary
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub standings: Standings,
    pub freestyle_2025: ParseStats,
    pub classic_2025: ParseStats,
    pub freestyle_2026: ParseStats,
    pub classic_2026: ParseStats,
}

impl PipelineResult {
    /// Per-file stats with their season labels, in pipeline order
    pub fn file_stats(&self) -> [(&'static str, &ParseStats); 4] {
        [
            ("2025 freestyle", &self.freestyle_2025),
            ("2025 classic", &self.classic_2025),
            ("2026 freestyle", &self.freestyle_2026),
            ("2026 classic", &self.classic_2026),
        ]
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run the whole pipeline over the four raw exports
///
/// Pure given the inputs: parsing, ranking and joining build fresh
/// immutable maps at every step, so re-running over identical text
/// yields identical standings.
pub fn run(inputs: &SeasonInputs) -> PipelineResult {
    let fs25 = parse_race_file(&inputs.freestyle_2025);
    let cl25 = parse_race_file(&inputs.classic_2025);
    let fs26 = parse_race_file(&inputs.freestyle_2026);
    let cl26 = parse_race_file(&inputs.classic_2026);

    let records = SeasonRecords {
        freestyle_2025: &fs25.records,
        classic_2025: &cl25.records,
        freestyle_2026: &fs26.records,
        classic_2026: &cl26.records,
    };

    let standings = Standings {
        boys: build_gender_standings(Gender::Male, records),
        girls: build_gender_standings(Gender::Female, records),
    };

    PipelineResult {
        standings,
        freestyle_2025: fs25.stats,
        classic_2025: cl25.stats,
        freestyle_2026: fs26.stats,
        classic_2026: cl26.stats,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bib: u32, first: &str, last: &str, category: &str, gender: &str, time: &str) -> String {
        format!("1\t{bib}\tTeam\t{first}\t{last}\t17\tTown\t{category}\t{gender}\t{time}")
    }

    fn inputs(fs25: &str, cl25: &str, fs26: &str, cl26: &str) -> SeasonInputs {
        SeasonInputs {
            freestyle_2025: fs25.to_string(),
            classic_2025: cl25.to_string(),
            freestyle_2026: fs26.to_string(),
            classic_2026: cl26.to_string(),
        }
    }

    #[test]
    fn test_end_to_end_combined_rank() {
        // John Doe races both 2025 events; Jane Roe skips the classic
        let fs25 = format!(
            "{}\n{}\n",
            row(1, "John", "Doe", "High School", "Male", "10:00"),
            row(2, "Jane", "Roe", "High School", "Female", "11:30"),
        );
        let cl25 = row(1, "John", "Doe", "High School", "Male", "12:00");
        let fs26 = format!(
            "{}\n{}\n",
            row(1, "John", "Doe", "High School", "Male", "9:50"),
            row(2, "Jane", "Roe", "High School", "Female", "11:20"),
        );
        let cl26 = row(1, "John", "Doe", "High School", "Male", "11:50");

        let result = run(&inputs(&fs25, &cl25, &fs26, &cl26));

        let boys = &result.standings.boys;
        assert_eq!(boys.len(), 1);
        assert_eq!(boys[0].name, "John Doe");
        assert_eq!(boys[0].comb25_time, Some(1320.0));
        assert_eq!(boys[0].comb25_rank, Some(1));

        // Jane raced both years (freestyle only) → joined, but never combined
        let girls = &result.standings.girls;
        assert_eq!(girls.len(), 1);
        assert_eq!(girls[0].name, "Jane Roe");
        assert_eq!(girls[0].comb25_rank, None);
        assert_eq!(girls[0].comb26_rank, None);
    }

    #[test]
    fn test_athlete_absent_from_one_year_excluded() {
        let fs25 = row(1, "Old", "Grad", "High School", "Male", "10:00");
        let fs26 = row(2, "New", "Frosh", "High School", "Male", "10:10");

        let result = run(&inputs(&fs25, "", &fs26, ""));

        assert!(result.standings.boys.is_empty());
        assert!(result.standings.girls.is_empty());
    }

    #[test]
    fn test_stats_reported_per_file() {
        let fs25 = format!(
            "{}\n{}\nnoise line\n",
            row(1, "John", "Doe", "High School", "Male", "10:00"),
            row(1, "John", "Doe", "High School", "Male", "10:00"),
        );

        let result = run(&inputs(&fs25, "", "", ""));

        assert_eq!(result.freestyle_2025.kept, 1);
        assert_eq!(result.freestyle_2025.skipped_duplicate_bib, 1);
        assert_eq!(result.freestyle_2025.skipped_short, 1);
        assert_eq!(result.classic_2025.rows, 0);

        let labels: Vec<&str> = result.file_stats().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["2025 freestyle", "2025 classic", "2026 freestyle", "2026 classic"]
        );
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let fs25 = format!(
            "{}\n{}\n",
            row(1, "John", "Doe", "High School", "Male", "10:00"),
            row(2, "Sam", "Hill", "High School", "Male", "10:00"),
        );
        let cl25 = format!(
            "{}\n{}\n",
            row(1, "John", "Doe", "High School", "Male", "12:00"),
            row(2, "Sam", "Hill", "High School", "Male", "12:00"),
        );
        let season = inputs(&fs25, &cl25, &fs25, &cl25);

        let first = run(&season);
        let second = run(&season);

        assert_eq!(first.standings, second.standings);
        // Tied totals: first-seen athlete keeps the better rank
        assert_eq!(first.standings.boys[0].name, "John Doe");
        assert_eq!(first.standings.boys[0].comb26_rank, Some(1));
        assert_eq!(first.standings.boys[1].comb26_rank, Some(2));
    }

    #[test]
    fn test_output_document_shape() {
        let fs25 = row(1, "John", "Doe", "High School", "Male", "10:00");
        let fs26 = row(1, "John", "Doe", "High School", "Male", "9:55");

        let result = run(&inputs(&fs25, "", &fs26, ""));
        let json = serde_json::to_value(&result.standings).unwrap();

        assert!(json["boys"].is_array());
        assert!(json["girls"].is_array());
        assert_eq!(json["boys"][0]["fs25_time"], 600.0);
        assert!(json["boys"][0]["comb26_rank"].is_null());
    }
}
