//! Show a container's summary and headers

use std::fmt;

use serde::Serialize;

use super::{Report, check_container_name, container_arg, required_arg};
use crate::error::{Action, RemoteContext, Result};
use crate::headers::Headers;
use crate::traits::{ContainerInfo, ContainerStore, StageReporter};

/// Arguments: `<service> <container>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectRequest {
    pub service: String,
    pub container: String,
}

impl InspectRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self {
            service: required_arg(args, 2, "service")?,
            container: container_arg(args, 3, "container")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    #[serde(flatten)]
    pub info: ContainerInfo,
    pub headers: Headers,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.info.name)?;
        writeln!(f, "number of objects: {}", self.info.object_count)?;
        write!(f, "Size: {} bytes", self.info.bytes_used)?;
        if self.info.bytes_used >= 1024 {
            write!(f, " ({})", self.info.size_human)?;
        }
        if let Some(created) = &self.info.created {
            write!(f, "\nCreated: {}", created.strftime("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        write!(f, "\nHeaders:")?;
        for (name, value) in &self.headers {
            write!(f, "\n\tName: {name} Value: {value}")?;
        }
        Ok(())
    }
}

impl Report for InspectReport {}

/// Fetch a container's summary and metadata headers
pub async fn inspect_container(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &InspectRequest,
) -> Result<InspectReport> {
    reporter.set_stage("Fetching container info");
    check_container_name(&request.container)?;

    let (info, headers) = store
        .get_container(&request.container)
        .await
        .remote_context(Action::GetContainer, &request.container)?;
    tracing::debug!(container = %info.name, headers = headers.len(), "fetched container");

    Ok(InspectReport { info, headers })
}
