//! Secrets Management
//!
//! Secret entries, key rules, and the encrypted store.

mod entry;
mod store;

pub use entry::*;
pub use store::*;
