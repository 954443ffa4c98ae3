//! # Connect Four
//!
//! Connect Four rules with a depth-limited negamax opponent, playable from a
//! terminal session.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, flat state codes, outcome scan
//! - [`ai`] — Agent trait, line heuristic, negamax search, random baseline
//! - [`session`] — One game with its play mode and AI opponent
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Logger setup for the binaries
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
