//! HTTP Module
//!
//! Transport-neutral request/response types, the routing table, the axum
//! adapter and the connection acceptor.

pub mod adapter;
pub mod request;
pub mod resources;
pub mod response;
pub mod router;
pub mod server;

pub use adapter::create_router;
pub use request::Request;
pub use response::Response;
pub use router::RouteTable;
pub use server::ConnectionAcceptor;
