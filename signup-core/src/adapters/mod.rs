//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - HTTP user directory client for UsernameLookup
//! - In-memory account list for UsernameLookup (reserved names, tests)

pub mod http;
pub mod memory;

#[cfg(test)]
pub mod users_mock;
