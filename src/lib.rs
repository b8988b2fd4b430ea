// Nordic Standings - Core Library
// Exposes all pipeline components for use in the CLI and tests

pub mod config;
pub mod identity;
pub mod parser;
pub mod pipeline;
pub mod ranking;
pub mod standings;

// Re-export commonly used types
pub use config::{RaceEvent, RaceSource, SourceConfig};
pub use identity::athlete_key;
pub use parser::{
    clean_name, parse_elapsed, parse_race_file,
    Gender, ParsedFile, ParseStats, PerformanceRecord,
};
pub use pipeline::{PipelineResult, SeasonInputs};
pub use ranking::{
    build_combined_rank, build_lookup, build_rank, key_union,
    CombinedScore, RankedSet, RecordLookup,
};
pub use standings::{build_gender_standings, AthleteRow, SeasonRecords, Standings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
