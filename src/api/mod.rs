pub mod client;
pub mod journal;
pub mod project;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::*;
pub use journal::JournalApi;
pub use project::ProjectApi;
pub use types::*;
