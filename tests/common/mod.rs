//! Common test utilities for stackctl CLI tests.
//!
//! `TestEnv` gives every test its own home directory (via
//! `STACKCTL_TEST_HOME`) and project directory, and clears the client
//! environment variables so the developer's setup never leaks in.

#![allow(dead_code)]

pub mod env;

pub use env::*;
