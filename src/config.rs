// 🗂️ Source Configuration - The four race exports that feed a season pair
// Enumerates (year, event, file name) for each input instead of burying
// paths in the pipeline, so the core stays testable with fixture text.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// RACE EVENT
// ============================================================================

/// The two distance-paired techniques raced each season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceEvent {
    Freestyle,
    Classic,
}

impl RaceEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceEvent::Freestyle => "freestyle",
            RaceEvent::Classic => "classic",
        }
    }
}

// ============================================================================
// RACE SOURCE
// ============================================================================

/// One race export: which season, which event, which file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSource {
    pub year: u16,
    pub event: RaceEvent,
    pub file_name: String,
}

impl RaceSource {
    pub fn new(year: u16, event: RaceEvent, file_name: &str) -> Self {
        RaceSource {
            year,
            event,
            file_name: file_name.to_string(),
        }
    }

    /// Human-readable label for run summaries, e.g. "2026 freestyle"
    pub fn label(&self) -> String {
        format!("{} {}", self.year, self.event.as_str())
    }

    /// Full path of this export under a data directory
    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file_name)
    }
}

// ============================================================================
// SOURCE CONFIG
// ============================================================================

/// The four exports of a season pair, in pipeline order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub freestyle_2025: RaceSource,
    pub classic_2025: RaceSource,
    pub freestyle_2026: RaceSource,
    pub classic_2026: RaceSource,
}

impl SourceConfig {
    /// The state-championship exports as published by the timing company
    pub fn state_championships() -> Self {
        SourceConfig {
            freestyle_2025: RaceSource::new(
                2025,
                RaceEvent::Freestyle,
                "2025 State Championship 5k Freestyle.txt",
            ),
            classic_2025: RaceSource::new(
                2025,
                RaceEvent::Classic,
                "2025 State Championship 4k Classic.txt",
            ),
            freestyle_2026: RaceSource::new(2026, RaceEvent::Freestyle, "2026 STATE FRIDAY 5K FS.txt"),
            classic_2026: RaceSource::new(
                2026,
                RaceEvent::Classic,
                "2026 STATE SATURDAY 4K CLASSIC.txt",
            ),
        }
    }

    /// All four sources, in pipeline order
    pub fn sources(&self) -> [&RaceSource; 4] {
        [
            &self.freestyle_2025,
            &self.classic_2025,
            &self.freestyle_2026,
            &self.classic_2026,
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_names_all_four_files() {
        let config = SourceConfig::state_championships();
        let names: Vec<&str> = config
            .sources()
            .iter()
            .map(|s| s.file_name.as_str())
            .collect();

        assert_eq!(names.len(), 4);
        assert!(names[0].contains("2025"));
        assert!(names[3].contains("CLASSIC"));
    }

    #[test]
    fn test_source_labels() {
        let config = SourceConfig::state_championships();

        assert_eq!(config.freestyle_2025.label(), "2025 freestyle");
        assert_eq!(config.classic_2026.label(), "2026 classic");
    }

    #[test]
    fn test_path_resolution() {
        let source = RaceSource::new(2026, RaceEvent::Freestyle, "race.txt");
        let path = source.path_in(Path::new("data"));

        assert_eq!(path, Path::new("data").join("race.txt"));
    }

    #[test]
    fn test_sources_pipeline_order() {
        let config = SourceConfig::state_championships();
        let years: Vec<u16> = config.sources().iter().map(|s| s.year).collect();

        assert_eq!(years, vec![2025, 2025, 2026, 2026]);
    }
}
