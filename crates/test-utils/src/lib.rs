//! Crate-agnostic test fixtures for the xbridge workspace.
//!
//! Provides the on-disk inputs (witness configs, node configs, bootstrap documents) that several
//! crates need for testing. This crate does not depend on any other crate in the workspace so
//! that it can be used as a dev-dependency everywhere without pulling in a second copy of the
//! crate under test.

pub mod configs;
pub mod fs;
