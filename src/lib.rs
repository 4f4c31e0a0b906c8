//! Historical creature, move and trait tables for the first three game
//! generations: a compiler from PokeAPI snapshots and a per-generation resolver.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod history;
pub mod server;
pub mod view;

pub use data::codec::{DamageCategory, ElementType, GameVersion, Generation};
pub use data::model::{CompiledTables, Creature, Move, Trait};
pub use data::store::DexStore;
pub use error::{Error, Result};
