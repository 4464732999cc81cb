//! HTTP transport and the single-request worker.
mod client;
mod transport;
mod worker;


pub use client::{HttpTransport, build_client};
pub use transport::{Transport, TransportError};
pub use worker::perform_request;
