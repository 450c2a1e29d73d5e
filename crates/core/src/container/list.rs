//! List the containers of a service

use std::fmt;

use serde::Serialize;

use super::{Report, required_arg};
use crate::error::{Action, RemoteContext, Result};
use crate::traits::{ContainerStore, StageReporter};

/// Arguments: `<service>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub service: String,
}

impl ListRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self {
            service: required_arg(args, 2, "service")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub service: String,
    pub containers: Vec<String>,
}

impl fmt::Display for ListReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Containers in OS {}: [{}]",
            self.service,
            self.containers.join(" ")
        )
    }
}

impl Report for ListReport {}

/// List every container name in the service
pub async fn list_containers(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &ListRequest,
) -> Result<ListReport> {
    reporter.set_stage("Displaying containers");

    let containers = store
        .list_container_names()
        .await
        .remote_context(Action::ListContainers, &request.service)?;
    tracing::debug!(service = %request.service, count = containers.len(), "listed containers");

    Ok(ListReport {
        service: request.service.clone(),
        containers,
    })
}
