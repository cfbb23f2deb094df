//! API tests
//!
//! - `user_tests` - registration and login
//! - `message_tests` - sending encrypted messages
//! - `acceptor_tests` - raw TCP behaviour of the connection acceptor

mod acceptor_tests;
mod message_tests;
mod user_tests;
