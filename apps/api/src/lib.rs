//! Resume ATS analyzer.
//!
//! The scoring core is three pure functions:
//! [`scoring::skill_extractor::extract_skills`], [`scoring::role_matcher::match_roles`]
//! and [`scoring::report::compose_report`]. Everything else is the HTTP host around
//! them, served by the `ats-api` binary.

pub mod analysis;
pub mod chart;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod taxonomy;
