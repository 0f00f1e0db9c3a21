//! Call history persistence: load/save with atomic rewrites.

pub mod store;

pub use store::{HISTORY_FILENAME, HistoryStore, MAX_RECORDS};
