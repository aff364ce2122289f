//! Utilities shared by the StudySphere binaries and their tests.

pub mod logger;
pub mod time;
