//! In-memory records and relation targets, for tests, fixtures and the CLI.

mod fixture;
mod record;
mod store;

pub use fixture::Fixture;
pub use record::{Column, JournalEntry, MemoryRecord};
pub use store::{MemoryStore, MemoryTable};
