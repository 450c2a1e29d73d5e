//! Delete a container, optionally removing its objects first

use std::fmt;

use serde::Serialize;

use super::{FORCE_FLAG, Report, check_container_name, container_arg, required_arg};
use crate::error::{Action, RemoteContext, Result};
use crate::traits::{ContainerStore, StageReporter};

/// Arguments: `<service> <container> [-f]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub service: String,
    pub container: String,
    pub force: bool,
}

impl DeleteRequest {
    /// Force is only recognised as the single trailing argument
    pub fn from_args(args: &[String]) -> Result<Self> {
        let service = required_arg(args, 2, "service")?;
        let container = container_arg(args, 3, "container")?;
        let force = args.len() == 5 && args[4] == FORCE_FLAG;
        if args.len() > 4 && !force {
            tracing::warn!(extra = ?&args[4..], "ignoring unrecognised arguments");
        }

        Ok(Self {
            service,
            container,
            force,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub service: String,
    pub container: String,
    pub objects_deleted: usize,
}

impl fmt::Display for DeleteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deleted container {} from OS {}",
            self.container, self.service
        )
    }
}

impl Report for DeleteReport {}

/// Delete a container
///
/// With `force`, every object is deleted one at a time first and the first
/// failure aborts the command. Without it the store is expected to refuse
/// deleting a container that still holds objects.
pub async fn delete_container(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &DeleteRequest,
) -> Result<DeleteReport> {
    let container = request.container.as_str();
    check_container_name(container)?;
    let mut objects_deleted = 0;

    if request.force {
        reporter.set_stage("Deleting objects in container");

        let objects = store
            .list_object_names(container)
            .await
            .remote_context(Action::ListObjects, container)?;

        for object in &objects {
            store
                .delete_object(container, object)
                .await
                .remote_context(Action::DeleteObject, object)?;
            objects_deleted += 1;
        }
        tracing::debug!(container, objects_deleted, "emptied container");
    }

    reporter.set_stage("Deleting container");

    store
        .delete_container(container)
        .await
        .remote_context(Action::DeleteContainer, container)?;
    tracing::debug!(container, "deleted container");

    Ok(DeleteReport {
        service: request.service.clone(),
        container: request.container.clone(),
        objects_deleted,
    })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::container::testing::{RecordingReporter, args};
    use crate::error::Error;
    use crate::traits::MockContainerStore;

    #[test]
    fn test_delete_request_force_flag() {
        let request =
            DeleteRequest::from_args(&args(&["cf", "delete-container", "svcA", "box", "-f"]))
                .unwrap();
        assert!(request.force);

        let request =
            DeleteRequest::from_args(&args(&["cf", "delete-container", "svcA", "box"])).unwrap();
        assert!(!request.force);

        let request = DeleteRequest::from_args(&args(&[
            "cf",
            "delete-container",
            "svcA",
            "box",
            "-f",
            "extra",
        ]))
        .unwrap();
        assert!(!request.force);

        let request =
            DeleteRequest::from_args(&args(&["cf", "delete-container", "svcA", "box", "-x"]))
                .unwrap();
        assert!(!request.force);
    }

    #[tokio::test]
    async fn test_force_delete_removes_objects_then_container() {
        let mut store = MockContainerStore::new();
        let mut seq = Sequence::new();
        store
            .expect_list_object_names()
            .withf(|c| c == "box")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec!["a".to_string(), "b".to_string()]));
        store
            .expect_delete_object()
            .withf(|c, o| c == "box" && o == "a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_delete_object()
            .withf(|c, o| c == "box" && o == "b")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        store
            .expect_delete_container()
            .withf(|c| c == "box")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let reporter = RecordingReporter::default();

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "box".into(),
            force: true,
        };
        let report = delete_container(&store, &reporter, &request).await.unwrap();

        assert_eq!(report.objects_deleted, 2);
        assert_eq!(report.to_string(), "Deleted container box from OS svcA");
        assert_eq!(
            reporter.stages(),
            vec!["Deleting objects in container", "Deleting container"]
        );
    }

    #[tokio::test]
    async fn test_force_delete_stops_at_first_object_failure() {
        let mut store = MockContainerStore::new();
        store
            .expect_list_object_names()
            .returning(|_| Ok(vec!["a".to_string(), "b".to_string()]));
        store
            .expect_delete_object()
            .withf(|_, o| o == "a")
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_delete_object()
            .withf(|_, o| o == "b")
            .times(1)
            .returning(|_, _| Err(Error::Network("timeout".into())));
        store.expect_delete_container().times(0);

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "box".into(),
            force: true,
        };
        let err = delete_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to delete object b: Network error: timeout");
    }

    #[tokio::test]
    async fn test_delete_without_force_never_touches_objects() {
        let mut store = MockContainerStore::new();
        store.expect_list_object_names().times(0);
        store.expect_delete_object().times(0);
        store
            .expect_delete_container()
            .times(1)
            .returning(|_| Ok(()));
        let reporter = RecordingReporter::default();

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "box".into(),
            force: false,
        };
        let report = delete_container(&store, &reporter, &request).await.unwrap();

        assert_eq!(report.objects_deleted, 0);
        assert_eq!(reporter.stages(), vec!["Deleting container"]);
    }

    #[tokio::test]
    async fn test_delete_non_empty_container_conflict() {
        let mut store = MockContainerStore::new();
        store
            .expect_delete_container()
            .returning(|_| Err(Error::Conflict("container not empty".into())));

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "box".into(),
            force: false,
        };
        let err = delete_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 6);
        assert!(err.to_string().starts_with("Failed to delete container box"));
    }

    #[tokio::test]
    async fn test_force_delete_listing_failure() {
        let mut store = MockContainerStore::new();
        store
            .expect_list_object_names()
            .returning(|c| Err(Error::NotFound(c.to_string())));
        store.expect_delete_object().times(0);
        store.expect_delete_container().times(0);

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "ghost".into(),
            force: true,
        };
        let err = delete_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Remote {
                action: Action::ListObjects,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_dot_segment_container_makes_no_calls() {
        let mut store = MockContainerStore::new();
        store.expect_list_object_names().times(0);
        store.expect_delete_object().times(0);
        store.expect_delete_container().times(0);

        let request = DeleteRequest {
            service: "svcA".into(),
            container: "..".into(),
            force: true,
        };
        let err = delete_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidName { ref name } if name == ".."));
    }
}
