//! Generic plumbing for scoring submitted documents and serving the scores.
//!
//! A domain crate supplies an [`model::Importable`] payload that validates into
//! a typed value, and a [`scorers::Scorer`] for that value. This crate wires
//! them to a [`storage::ScoreStorage`] through the [`processor::Processor`] and
//! exposes the result over HTTP via [`executable_utils`].
pub mod error;
pub mod executable_utils;
pub mod model;
pub mod processor;
pub mod scorers;
pub mod storage;
