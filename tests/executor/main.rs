//! Executor Layer Tests
//!
//! End-to-end tests across the OrbisDB crates:
//! - TRUNCATE RECORD against in-memory storage
//! - verb resolution over the composed core + graph registry
//! - numeric coercion methods inside parsed requests
//! - graph verbs and the graph session bridge
//! - configuration and replication wiring

mod common;

mod config;
mod graph;
mod methods;
mod registry;
mod truncate_record;
