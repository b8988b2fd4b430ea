use anyhow::Result;
use std::env;
use std::io::Write;
use std::path::Path;

// Use library instead of local modules
use nordic_standings::{pipeline, SeasonInputs, SourceConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    // Optional data directory, default "data"
    let data_dir = args.get(1).map(String::as_str).unwrap_or("data");

    run_standings(Path::new(data_dir))
}

fn run_standings(data_dir: &Path) -> Result<()> {
    // Progress goes to stderr: stdout is the output document
    eprintln!("🎿 Nordic Standings - season leaderboard builder");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Read the four race exports
    eprintln!("\n📂 Reading race files from {}...", data_dir.display());
    let config = SourceConfig::state_championships();
    let inputs = SeasonInputs::load(&config, data_dir)?;

    // 2. Parse, rank, join
    eprintln!("\n🔧 Building standings...");
    let result = pipeline::run(&inputs);
    for (label, stats) in result.file_stats() {
        eprintln!("✓ {}: {}", label, stats.summary());
    }

    // 3. Emit the document
    let standings = &result.standings;
    eprintln!(
        "\n💾 Writing standings: {} boys, {} girls",
        standings.boys.len(),
        standings.girls.len()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, standings)?;
    out.flush()?;

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("✅ Done");

    Ok(())
}
