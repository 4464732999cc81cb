//! Core library for the `barrage` CLI.
//!
//! `barrage` fires a fixed number of HTTP GET requests at one URL while
//! keeping at most `concurrency` of them in flight, records every outcome,
//! and summarizes latency, status codes and errors. The binary wires these
//! pieces together; the modules here hold the argument types, config
//! loading, the request worker, the scheduler, and the statistics.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod shutdown;
