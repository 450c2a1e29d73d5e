//! cfos-swift: OpenStack Swift adapter for cfos
//!
//! This crate provides the implementation of the ContainerStore trait
//! over the Swift HTTP API. It is the only crate that makes HTTP requests.

pub mod auth;
pub mod client;

pub use auth::Session;
pub use client::SwiftClient;
