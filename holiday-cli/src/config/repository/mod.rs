//! Repository layer for locally persisted state

pub mod cache;
pub mod state;

pub use state::{MemoryStateStore, SqliteStateStore, StateStore};
