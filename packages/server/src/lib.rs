//! TCP chat server library for Irori.
//!
//! This library provides the connection lifecycle and broadcast engine for a
//! line-oriented TCP chat: accepting connections, tracking live sessions,
//! relaying text, and tearing sessions down on disconnect or quit.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
