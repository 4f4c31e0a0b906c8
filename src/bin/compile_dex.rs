//! Compile the dex tables from the configured PokeAPI snapshot.
//! Run: cargo run --bin compile_dex [config.yaml]

use std::path::PathBuf;

use retrodex::cli::init_tracing;
use retrodex::config::CompileConfig;
use retrodex::data::collect;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = CompileConfig::load(config_path.as_deref())?;

    let summary = collect::run(&config)?;
    println!(
        "Compiled {} creatures, {} moves, {} traits ({} moves, {} traits skipped) -> {}",
        summary.creatures,
        summary.moves,
        summary.traits,
        summary.skipped_moves.len(),
        summary.skipped_traits.len(),
        config.out_dir.display()
    );
    Ok(())
}
