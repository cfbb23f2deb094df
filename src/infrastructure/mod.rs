//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Password hashing and message encryption
//! - Database pool and migrations (PostgreSQL)
//! - Repositories (PostgreSQL and in-memory)
//! - Prometheus metrics

pub mod crypto;
pub mod database;
pub mod metrics;
pub mod repositories;
