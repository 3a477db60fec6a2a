//! Funding-match core: ranks a catalog of funding sources against a single
//! applicant profile, producing a scored, explained shortlist.
//!
//! The matching engine itself is synchronous and side-effect-free; the HTTP
//! router and catalog importer around it are thin adapters.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
