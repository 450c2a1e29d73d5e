//! Rename a container by recreating it and moving its objects

use std::fmt;

use serde::Serialize;

use super::create::{CreateRequest, create_container};
use super::delete::{DeleteRequest, delete_container};
use super::{Report, check_container_name, container_arg, required_arg};
use crate::error::{Action, RemoteContext, Result};
use crate::headers::to_tokens;
use crate::traits::{ContainerStore, StageReporter};

/// Arguments: `<service> <container> <new-container>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub service: String,
    pub container: String,
    pub new_container: String,
}

impl RenameRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self {
            service: required_arg(args, 2, "service")?,
            container: container_arg(args, 3, "container")?,
            new_container: container_arg(args, 4, "new container")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    pub service: String,
    pub container: String,
    pub new_container: String,
    pub objects_moved: usize,
}

impl fmt::Display for RenameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Renamed container {} to {}",
            self.container, self.new_container
        )
    }
}

impl Report for RenameReport {}

/// Rename a container
///
/// Steps run strictly in order and stop at the first failure: copy the
/// headers into a new container, move every object across, then delete the
/// old container. Nothing is rolled back, so a failed move leaves both
/// containers in place with the objects split between them.
pub async fn rename_container(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &RenameRequest,
) -> Result<RenameReport> {
    let old = request.container.as_str();
    let new = request.new_container.as_str();
    check_container_name(old)?;
    check_container_name(new)?;

    reporter.set_stage("Renaming container");

    let (_, headers) = store
        .get_container(old)
        .await
        .remote_context(Action::GetContainer, old)?;

    let create = CreateRequest {
        service: request.service.clone(),
        container: new.to_string(),
        headers: to_tokens(&headers),
    };
    create_container(store, reporter, &create).await?;

    reporter.set_stage("Renaming container");

    let objects = store
        .list_object_names(old)
        .await
        .remote_context(Action::ListObjects, old)?;

    let mut objects_moved = 0;
    for object in &objects {
        store
            .move_object(old, object, new, object)
            .await
            .remote_context(Action::MoveObject, object)?;
        objects_moved += 1;
    }
    tracing::debug!(from = old, to = new, objects_moved, "moved objects");

    let delete = DeleteRequest {
        service: request.service.clone(),
        container: old.to_string(),
        force: false,
    };
    delete_container(store, reporter, &delete).await?;

    Ok(RenameReport {
        service: request.service.clone(),
        container: request.container.clone(),
        new_container: request.new_container.clone(),
        objects_moved,
    })
}
