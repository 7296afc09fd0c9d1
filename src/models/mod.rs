//! Domain models for staffdir.
//!
//! # Core Concepts
//!
//! ## Roster Data
//!
//! - [`Employee`]: One personnel record as loaded from the directory list,
//!   carrying a volatile [`Presence`] attribute that is rewritten on every
//!   enrichment pass.
//! - [`Criteria`]: The active combination of filter predicates applied to the
//!   roster. All active predicates combine with logical AND.
//!
//! ## Derived Views
//!
//! Derived structures are rebuilt from the roster on demand and never mutated
//! in place:
//!
//! - [`OrgNode`]: One node of the reporting tree, derived from flat
//!   manager-email references. Discarded when the view closes.

mod criteria;
mod employee;
mod org;

pub use criteria::*;
pub use employee::*;
pub use org::*;
