//! Core types for Non-ASN attendance administration.
//!
//! The employee registry, the filter evaluator and the view materializer,
//! plus the small read models the dashboard screens derive from them. This
//! crate has no terminal, network or storage dependencies; everything lives
//! in memory.

pub mod attendance;
pub mod error;
pub mod export;
pub mod filter;
pub mod notify;
pub mod record;
pub mod registry;
pub mod seed;
pub mod stats;
pub mod store;
pub mod view;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
