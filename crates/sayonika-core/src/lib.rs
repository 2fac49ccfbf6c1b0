//! Plumbing shared by the Sayonika microservices: environment config,
//! health probes, request ids and tracing setup.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
