//! Gym operating audit: turns self-reported answers into KPIs, pillar scores
//! and a ranked list of improvement recommendations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
