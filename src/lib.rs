//! Impactor - Asteroid Impact Effects Estimator
//!
//! A library crate that turns an impactor description into crater, thermal,
//! blast, wind and seismic effects, overlays them on population density to
//! estimate casualties, and evaluates deflection campaigns.

pub mod cache;
pub mod casualty;
pub mod config;
pub mod display;
pub mod error;
pub mod geocode;
pub mod mitigation;
pub mod physics;
pub mod population;
pub mod service;
pub mod types;

pub use error::ImpactError;
pub use service::{ImpactReport, ImpactRequest, ImpactService, MitigationRequest, Response};

#[cfg(test)]
pub mod test_utils;
