//! Stockroom: inventory items and suppliers in a local SQLite database
//!
//! The library holds the reusable core (store, repositories, validation,
//! snapshots, dashboard metrics); the `stockroom` binary is a thin
//! command-line front end over it.

pub mod cli;
pub mod core;
pub mod entities;
