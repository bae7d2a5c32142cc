//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The validator
//! depends only on these traits, not on concrete implementations.

mod username_lookup;

pub use username_lookup::UsernameLookup;
