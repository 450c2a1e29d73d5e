//! Create a container with optional headers

use std::fmt;

use serde::Serialize;

use super::{Report, check_container_name, container_arg, required_arg};
use crate::error::{Action, RemoteContext, Result};
use crate::headers::{Headers, parse_headers};
use crate::traits::{ContainerStore, StageReporter};

/// Arguments: `<service> <container> [header...]`
///
/// Header tokens are kept raw; they are only parsed when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub service: String,
    pub container: String,
    pub headers: Vec<String>,
}

impl CreateRequest {
    pub fn from_args(args: &[String]) -> Result<Self> {
        Ok(Self {
            service: required_arg(args, 2, "service")?,
            container: container_arg(args, 3, "container")?,
            headers: args.get(4..).unwrap_or_default().to_vec(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
    pub service: String,
    pub container: String,
    pub headers: Headers,
}

impl fmt::Display for CreateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created container {} in OS {}",
            self.container, self.service
        )
    }
}

impl Report for CreateReport {}

/// Create a container, sending all parsed headers in one call
///
/// Every header token is parsed before the store is contacted.
pub async fn create_container(
    store: &dyn ContainerStore,
    reporter: &dyn StageReporter,
    request: &CreateRequest,
) -> Result<CreateReport> {
    reporter.set_stage("Creating container");

    check_container_name(&request.container)?;
    let headers = parse_headers(&request.headers)?;

    store
        .create_container(&request.container, &headers)
        .await
        .remote_context(Action::CreateContainer, &request.container)?;
    tracing::debug!(container = %request.container, headers = headers.len(), "created container");

    Ok(CreateReport {
        service: request.service.clone(),
        container: request.container.clone(),
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::testing::{RecordingReporter, args};
    use crate::error::Error;
    use crate::traits::MockContainerStore;

    #[tokio::test]
    async fn test_create_with_shorthand_header() {
        let mut store = MockContainerStore::new();
        store
            .expect_create_container()
            .withf(|name, headers| {
                name == "mybucket"
                    && headers.len() == 1
                    && headers.get("X-Container-Read").map(String::as_str) == Some(".r:*")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let reporter = RecordingReporter::default();

        let request = CreateRequest::from_args(&args(&[
            "ignored", "ignored", "svcA", "mybucket", "-gr",
        ]))
        .unwrap();
        let report = create_container(&store, &reporter, &request).await.unwrap();

        let message = report.render();
        assert!(message.contains("mybucket"));
        assert!(message.contains("svcA"));
        assert_eq!(reporter.stages(), vec!["Creating container"]);
    }

    #[tokio::test]
    async fn test_create_without_headers() {
        let mut store = MockContainerStore::new();
        store
            .expect_create_container()
            .withf(|name, headers| name == "plain" && headers.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let request =
            CreateRequest::from_args(&args(&["cf", "create-container", "svcA", "plain"])).unwrap();
        assert!(request.headers.is_empty());

        let report = create_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap();
        assert_eq!(report.to_string(), "Created container plain in OS svcA");
    }

    #[tokio::test]
    async fn test_create_malformed_header_makes_no_remote_call() {
        // No expectations: any store call would panic.
        let store = MockContainerStore::new();

        let request = CreateRequest::from_args(&args(&[
            "cf",
            "create-container",
            "svcA",
            "mybucket",
            "X-Container-Meta-Ok:1",
            "badheader",
        ]))
        .unwrap();
        let err = create_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HeaderParse { ref header } if header == "badheader"));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_create_remote_failure() {
        let mut store = MockContainerStore::new();
        store
            .expect_create_container()
            .returning(|_, _| Err(Error::Network("connection refused".into())));

        let request = CreateRequest {
            service: "svcA".into(),
            container: "mybucket".into(),
            headers: vec![],
        };
        let err = create_container(&store, &RecordingReporter::default(), &request)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to create container mybucket: Network error: connection refused"
        );
    }
}
