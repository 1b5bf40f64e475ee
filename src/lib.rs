//! handpoke - deterministic near-field poke interaction
//!
//! Headless runner pieces: scene files, scripted probe paths and the replay loop.

pub mod config;
pub mod headless;
pub mod scripted_probe;
