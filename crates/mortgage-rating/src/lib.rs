//! Credit rating engine for mortgage portfolios.
//!
//! The [`rating`] module holds the pure engine (risk factors, classification, aggregation)
//! and the call/response boundary. The [`book`] module is the storage-facing collaborator
//! that keeps submitted mortgages and attaches a single-loan rating to each of them.

pub mod book;
pub mod config;
pub mod error;
pub mod rating;
pub mod telemetry;
