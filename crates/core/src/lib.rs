//! cfos-core: Core library for the cfos container management CLI
//!
//! This crate provides the core functionality for cfos, including:
//! - Configuration and service management
//! - Header token parsing and shorthand expansion
//! - ContainerStore trait for Swift container operations
//! - The container commands (list, inspect, create, delete, update, rename)
//!
//! This crate is independent of any HTTP client, allowing the commands to be
//! tested against a mocked store.

pub mod config;
pub mod container;
pub mod error;
pub mod headers;
pub mod service;
pub mod traits;

pub use config::{ColorMode, Config, ConfigManager, Defaults, OutputFormat};
pub use container::Report;
pub use error::{Action, Error, Result};
pub use headers::{Headers, SHORT_HEADERS};
pub use service::{AuthVersion, Service, ServiceManager, TimeoutConfig};
pub use traits::{ContainerInfo, ContainerStore, StageReporter};
