//! Swarmwatch Core
//!
//! Core types and classification logic for the swarm job lifecycle monitor.
//!
//! This crate contains:
//! - Domain types: the job handle, task states, and per-poll observations
//! - Classification: mapping a set of observations to a terminal outcome
//!   and an outcome to a process exit code

pub mod classify;
pub mod domain;
