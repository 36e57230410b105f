//! data_access library - parameterized SQL over pluggable connection providers
//!
//! Compiles structured search specs and records into PostgreSQL-dialect
//! statements with positional parameters, executes them through a
//! `ConnectionProvider` (live PostgreSQL or a canned stub), and layers a
//! typed user repository and service on top.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod db;
pub mod output;
pub mod queries;
pub mod users;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
