//! ContainerStore trait definition
//!
//! This trait defines the interface for Swift-compatible container operations.
//! It allows the container commands to be decoupled from the HTTP client that
//! talks to the storage service.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::headers::Headers;

/// Summary of a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container name
    pub name: String,

    /// Number of objects in the container
    pub object_count: u64,

    /// Total size of all objects in bytes
    pub bytes_used: u64,

    /// Human-readable size
    pub size_human: String,

    /// Creation time, when reported by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl ContainerInfo {
    /// Create a new ContainerInfo
    pub fn new(name: impl Into<String>, object_count: u64, bytes_used: u64) -> Self {
        Self {
            name: name.into(),
            object_count,
            bytes_used,
            size_human: humansize::format_size(bytes_used, humansize::BINARY),
            created: None,
        }
    }
}

/// Trait for Swift-compatible container operations
///
/// This trait is implemented by the Swift adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerStore: Send + Sync {
    /// List the names of all containers
    async fn list_container_names(&self) -> Result<Vec<String>>;

    /// Get a container summary and its metadata headers
    async fn get_container(&self, name: &str) -> Result<(ContainerInfo, Headers)>;

    /// Create a container, or update the headers of an existing one
    async fn create_container(&self, name: &str, headers: &Headers) -> Result<()>;

    /// Delete an empty container
    async fn delete_container(&self, name: &str) -> Result<()>;

    /// List the names of all objects in a container
    async fn list_object_names(&self, container: &str) -> Result<Vec<String>>;

    /// Delete an object
    async fn delete_object(&self, container: &str, object: &str) -> Result<()>;

    /// Move an object, possibly into another container
    async fn move_object(
        &self,
        src_container: &str,
        src_object: &str,
        dst_container: &str,
        dst_object: &str,
    ) -> Result<()>;
}

/// Receives the name of the stage an operation is in, for progress display
pub trait StageReporter: Send + Sync {
    fn set_stage(&self, stage: &str);
}
