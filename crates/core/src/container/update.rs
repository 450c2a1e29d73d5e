//! Update the headers of an existing container

use std::fmt;

use serde::Serialize;

use super::create::{CreateRequest, create_container};
use super::inspect::{InspectRequest, inspect_container};
use super::{Report, container_arg, required_arg};
use crate::error::Result;
use crate::headers::Headers;
use crate::traits::{ContainerStore, StageReporter};

/// Arguments: `<service> <container> [header...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub service: String,
    pub container: String,
    pub headers: Vec<String>,
}

impl UpdateRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self {
            service: required_arg(args, 2, "service")?,
            container: container_arg(args, 3, "container")?,
            headers: args.get(4..).unwrap_or_default().to_vec(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub service: String,
    pub container: String,
    pub headers: Headers,
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated container {} in OS {}",
            self.container, self.service
        )
    }
}

impl Report for UpdateReport {}

/// Update a container's headers
///
/// The container is inspected first so that a missing container is reported
/// instead of silently created. The headers are then sent through
/// [`create_container`]; Swift applies a create on an existing container as a
/// metadata update and leaves headers that are not mentioned untouched.
pub async fn update_container(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &UpdateRequest,
) -> Result<UpdateReport> {
    reporter.set_stage("Updating container");

    let inspect = InspectRequest {
        service: request.service.clone(),
        container: request.container.clone(),
    };
    inspect_container(store, reporter, &inspect).await?;

    let create = CreateRequest {
        service: request.service.clone(),
        container: request.container.clone(),
        headers: request.headers.clone(),
    };
    let created = create_container(store, reporter, &create).await?;

    Ok(UpdateReport {
        service: created.service,
        container: created.container,
        headers: created.headers,
    })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::container::testing::{RecordingReporter, args};
    use crate::error::{Action, Error};
    use crate::traits::{ContainerInfo, MockContainerStore};

    #[tokio::test]
    async fn test_update_inspects_then_creates() {
        let mut store = MockContainerStore::new();
        let mut seq = Sequence::new();
        store
            .expect_get_container()
            .withf(|name| name == "photos")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|name| Ok((ContainerInfo::new(name, 0, 0), Headers::new())));
        store
            .expect_create_container()
            .withf(|name, headers| {
                name == "photos"
                    && headers.get("X-Remove-Container-Read").map(String::as_str) == Some("1")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        let reporter = RecordingReporter::default();

        let request = UpdateRequest::from_args(&args(&[
            "cf",
            "update-container",
            "svcA",
            "photos",
            "-rm-gr",
        ]))
        .unwrap();
        let report = update_container(&store, &reporter, &request).await.unwrap();

        assert_eq!(report.to_string(), "Updated container photos in OS svcA");
        assert_eq!(
            reporter.stages(),
            vec![
                "Updating container",
                "Fetching container info",
                "Creating container"
            ]
        );
    }

    #[tokio::test]
    async fn test_update_missing_container_is_not_created() {
        let mut store = MockContainerStore::new();
        store
            .expect_get_container()
            .returning(|name| Err(Error::NotFound(name.to_string())));
        store.expect_create_container().times(0);

        let request = UpdateRequest {
            service: "svcA".into(),
            container: "ghost".into(),
            headers: vec!["X-Container-Meta-A:1".into()],
        };
        let err = update_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Remote {
                action: Action::GetContainer,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_bad_header_after_existence_check() {
        let mut store = MockContainerStore::new();
        store
            .expect_get_container()
            .times(1)
            .returning(|name| Ok((ContainerInfo::new(name, 0, 0), Headers::new())));
        store.expect_create_container().times(0);

        let request = UpdateRequest {
            service: "svcA".into(),
            container: "photos".into(),
            headers: vec!["no-separator".into()],
        };
        let err = update_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HeaderParse { .. }));
    }
}
