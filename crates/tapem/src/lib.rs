//! tapem library
//!
//! This module exports the command's configuration and run loop for use in
//! integration tests and by the binary.

pub mod app;
pub mod config;
