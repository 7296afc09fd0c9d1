//! staffdir: a live employee directory aggregation service.
//!
//! Loads a flat employee roster from an external directory list, enriches it
//! with volatile presence information under per-employee failure isolation,
//! derives a reporting tree from flat manager references, and maintains a
//! filtered view under composable predicates. Presence is re-polled on a
//! fixed period without re-fetching the directory list.

pub mod api;
pub mod engine;
pub mod models;
pub mod render;
pub mod sources;
