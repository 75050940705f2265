//! Eligibility matching over historical admission cutoffs.
//!
//! The [`admissions`] module holds the score calculator and the matching
//! engine; everything else is configuration, telemetry and HTTP plumbing
//! around it.

pub mod admissions;
pub mod config;
pub mod error;
pub mod registration;
pub mod telemetry;
