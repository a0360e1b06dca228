// Participant Directory Module - injected storage seam
//
// The original held all collections in a process-wide reactive store
// with direct mutation; here storage is an explicit repository trait
// injected into callers, with an in-memory default.

pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use memory::InMemoryDirectory;
pub use traits::{DirectoryError, ParticipantDirectory};
