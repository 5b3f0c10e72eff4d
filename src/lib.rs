//! Robot Payback — a small top-down survival game.
//!
//! - `entities`: plain data for the player, doors, monsters, coins, session
//! - `compute`: pure per-tick rules, spawner and screen state machine
//! - `collision`: the one overlap test every entity pair uses
//! - `config`: rule variants and sprite sizes, optionally from JSON
//! - `error`: bootstrap / terminal failures
//!
//! Terminal I/O lives in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
