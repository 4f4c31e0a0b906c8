//! Validate data registry: check that each compiled table it lists exists and is loadable.
//! Run: cargo run --bin validate_data

use retrodex::config::CompileConfig;
use retrodex::data::registry::{check_registry, load_registry, REGISTRY_FILE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CompileConfig::load(None)?;
    let registry_path = config.out_dir.join(REGISTRY_FILE);

    if !registry_path.exists() {
        eprintln!("Registry not found: {}", registry_path.display());
        eprintln!("Run the compiler first: cargo run --bin compile_dex");
        std::process::exit(1);
    }

    let registry = load_registry(&config.out_dir)?;
    let (ok, problems) = check_registry(&config.out_dir, &registry);
    for problem in &problems {
        eprintln!("[{}] {}", problem.dataset, problem.message);
    }

    println!("Validated {} datasets, {} ok, {} errors", registry.len(), ok, problems.len());
    if !problems.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
