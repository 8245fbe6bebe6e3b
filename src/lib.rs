//! Affinity Engine - Personality Compatibility Scoring
//!
//! This crate ranks a pool of candidates against one target person by
//! blending trait similarity, type-code chemistry and activity parity.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
