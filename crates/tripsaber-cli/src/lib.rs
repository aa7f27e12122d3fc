//! tripsaber CLI library.
//!
//! This crate provides the command implementations behind the `tripsaber`
//! binary: configuration loading, logging setup, and the `convert` and
//! `inspect` commands.

pub mod commands;
pub mod config;
pub mod logging;
