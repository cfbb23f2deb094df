//! Presentation Layer
//!
//! Connection acceptor, routing table and the HTTP resources registered on it.

pub mod http;
