//! Core domain types
//!
//! This module contains the domain structures shared between the engine
//! client (which produces observations from the wire format) and the
//! lifecycle monitor (which consumes them to reach a decision).

pub mod handle;
pub mod outcome;
pub mod task;
