//! Cluster points scoring and programme eligibility for university placement.

pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod scoring;
pub mod telemetry;
