//! Fixtures shared by unit and integration tests

mod fixtures;
mod keychain;

pub use fixtures::*;
