use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{bind_address, parse_id_list, CompileConfig};
use crate::data::codec::Generation;
use crate::data::collect;
use crate::data::registry::{check_registry, load_registry};
use crate::data::store::{read_tables, DexStore};
use crate::data::validate::{validate_tables, ValidationSeverity};
use crate::error::{Error, Result};
use crate::server::{self, AppState};
use crate::view::creature_view;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "retrodex=info";

#[derive(Debug, Parser)]
#[command(name = "retrodex")]
#[command(about = "Compile and query first-to-third generation creature data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Compile a PokeAPI snapshot into the dex tables
    Compile {
        /// YAML config file (defaults to retrodex.yaml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Comma-separated creature ids, e.g. 1,4,7
        #[arg(long)]
        ids: Option<String>,
    },
    /// Print a creature resolved at one generation
    Show {
        /// Creature name or id
        creature: String,
        #[arg(long, short, default_value_t = 3)]
        generation: u8,
        #[arg(long)]
        tables: Option<PathBuf>,
    },
    /// Check compiled tables and their registry
    Validate {
        #[arg(long)]
        tables: Option<PathBuf>,
    },
    /// Serve the tables over HTTP (bind address from RETRODEX_BIND)
    Serve {
        #[arg(long)]
        tables: Option<PathBuf>,
    },
}

pub fn parse_command(args: &[String]) -> std::result::Result<Command, clap::Error> {
    Cli::try_parse_from(args).map(|cli| cli.command)
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_with_args(args: &[String]) -> i32 {
    let command = match parse_command(args) {
        Ok(command) => command,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };
    match command {
        Command::Compile {
            config,
            data_dir,
            out_dir,
            ids,
        } => handle_compile(config.as_deref(), data_dir, out_dir, ids.as_deref()),
        Command::Show {
            creature,
            generation,
            tables,
        } => handle_show(&creature, generation, tables),
        Command::Validate { tables } => handle_validate(tables),
        Command::Serve { tables } => handle_serve(tables),
    }
}

fn fail(err: &Error) -> i32 {
    eprintln!("error: {err}");
    1
}

/// Tables directory: the flag, else the configured output directory.
fn tables_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(dir) => Ok(dir),
        None => Ok(CompileConfig::load(None)?.out_dir),
    }
}

fn handle_compile(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    ids: Option<&str>,
) -> i32 {
    let mut config = match CompileConfig::load(config_path) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    if let Some(out_dir) = out_dir {
        config.out_dir = out_dir;
    }
    if let Some(raw) = ids {
        match parse_id_list(raw) {
            Ok(ids) => config.creature_ids = Some(ids),
            Err(err) => {
                eprintln!("usage: retrodex compile --ids <id,id,...> ({err})");
                return 2;
            }
        }
    }

    match collect::run(&config) {
        Ok(summary) => {
            println!(
                "compiled {} creatures, {} moves, {} traits into {}",
                summary.creatures,
                summary.moves,
                summary.traits,
                config.out_dir.display()
            );
            if !summary.skipped_moves.is_empty() || !summary.skipped_traits.is_empty() {
                println!(
                    "skipped {} moves, {} traits",
                    summary.skipped_moves.len(),
                    summary.skipped_traits.len()
                );
            }
            0
        }
        Err(err) => fail(&err),
    }
}

fn handle_show(creature: &str, generation: u8, tables: Option<PathBuf>) -> i32 {
    let Some(generation) = Generation::new(generation) else {
        eprintln!("usage: retrodex show <name-or-id> --generation <1|2|3>");
        return 2;
    };
    let store = match tables_dir(tables).and_then(|dir| DexStore::load(&dir)) {
        Ok(store) => store,
        Err(err) => return fail(&err),
    };
    let Some(found) = store.find_creature(creature) else {
        eprintln!("unknown creature: {creature}");
        return 1;
    };
    match serde_json::to_string_pretty(&creature_view(&store, found, generation)) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize creature: {err}");
            1
        }
    }
}

fn handle_validate(tables: Option<PathBuf>) -> i32 {
    let dir = match tables_dir(tables) {
        Ok(dir) => dir,
        Err(err) => return fail(&err),
    };
    let compiled = match read_tables(&dir) {
        Ok(compiled) => compiled,
        Err(err) => return fail(&err),
    };

    let report = validate_tables(&compiled);
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    let mut failed = report.has_errors();

    match load_registry(&dir) {
        Ok(registry) => {
            let (ok, problems) = check_registry(&dir, &registry);
            for problem in &problems {
                println!("[error] registry[{}]: {}", problem.dataset, problem.message);
            }
            println!("Validated {} datasets, {} ok, {} errors", registry.len(), ok, problems.len());
            failed |= !problems.is_empty();
        }
        Err(err) => println!("[warning] registry: {err}"),
    }

    println!(
        "{} errors, {} warnings, {} info",
        report.count(ValidationSeverity::Error),
        report.count(ValidationSeverity::Warning),
        report.count(ValidationSeverity::Info)
    );
    i32::from(failed)
}

fn handle_serve(tables: Option<PathBuf>) -> i32 {
    let state = match tables_dir(tables).and_then(|dir| AppState::load(&dir)) {
        Ok(state) => state,
        Err(err) => return fail(&err),
    };
    match server::run_server(&bind_address(), state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_show_with_defaults() {
        let command = parse_command(&args(&["retrodex", "show", "bulbasaur"])).unwrap();
        assert_eq!(
            command,
            Command::Show {
                creature: "bulbasaur".to_string(),
                generation: 3,
                tables: None,
            }
        );
    }

    #[test]
    fn parses_compile_flags() {
        let command = parse_command(&args(&[
            "retrodex", "compile", "--data-dir", "snap", "--ids", "1,4,7",
        ]))
        .unwrap();
        let Command::Compile { data_dir, ids, .. } = command else {
            panic!("expected compile");
        };
        assert_eq!(data_dir, Some(PathBuf::from("snap")));
        assert_eq!(ids.as_deref(), Some("1,4,7"));
    }

    #[test]
    fn unknown_subcommand_is_a_usage_error() {
        let err = parse_command(&args(&["retrodex", "simulate"])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
