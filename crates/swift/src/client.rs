//! Swift client implementation
//!
//! Talks to the Swift object storage API over reqwest and implements the
//! ContainerStore trait from cfos-core.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use cfos_core::container::check_container_name;
use cfos_core::{ContainerInfo, ContainerStore, Error, Headers, Result, Service};

use crate::auth::{Session, authenticate};

/// Maximum number of names requested per listing page
const LISTING_LIMIT: usize = 10_000;

const OBJECT_COUNT: &str = "x-container-object-count";
const BYTES_USED: &str = "x-container-bytes-used";
const TIMESTAMP: &str = "x-timestamp";

/// Swift client wrapper
pub struct SwiftClient {
    http: Client,
    session: Session,
}

impl SwiftClient {
    /// Create a new client by authenticating against a configured service
    pub async fn new(service: Service) -> Result<Self> {
        let timeout = service.timeout_config();
        let http = Client::builder()
            .connect_timeout(Duration::from_millis(timeout.connect_ms))
            .timeout(Duration::from_millis(timeout.read_ms))
            .danger_accept_invalid_certs(service.insecure)
            .build()
            .map_err(|e| Error::General(format!("Failed to build HTTP client: {e}")))?;

        let session = authenticate(&http, &service).await?;

        Ok(Self { http, session })
    }

    /// Get the account URL requests are made against
    pub fn storage_url(&self) -> &Url {
        &self.session.storage_url
    }

    fn container_url(&self, container: &str) -> Result<Url> {
        resource_url(&self.session.storage_url, container, None)
    }

    fn object_url(&self, container: &str, object: &str) -> Result<Url> {
        resource_url(&self.session.storage_url, container, Some(object))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Auth-Token", &self.session.token)
    }

    /// Send a request, turning transport failures and error statuses into errors
    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(resource, status = status.as_u16(), "swift response");
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(status_error(status, resource, &body))
        }
    }

    /// Fetch every name of a paginated JSON listing
    async fn list_names(&self, url: Url, resource: &str) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Entry {
            name: String,
        }

        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut page_url = url.clone();
            {
                let mut query = page_url.query_pairs_mut();
                query
                    .append_pair("format", "json")
                    .append_pair("limit", &LISTING_LIMIT.to_string());
                if let Some(marker) = &marker {
                    query.append_pair("marker", marker);
                }
            }

            let response = self
                .send(self.request(Method::GET, page_url), resource)
                .await?;
            if response.status() == StatusCode::NO_CONTENT {
                break;
            }

            let page: Vec<Entry> = response
                .json()
                .await
                .map_err(|e| Error::General(format!("Invalid listing for {resource}: {e}")))?;
            let full_page = page.len() >= LISTING_LIMIT;
            marker = page.last().map(|entry| entry.name.clone());
            names.extend(page.into_iter().map(|entry| entry.name));

            if !full_page {
                break;
            }
        }

        Ok(names)
    }
}

#[async_trait]
impl ContainerStore for SwiftClient {
    async fn list_container_names(&self) -> Result<Vec<String>> {
        let url = self.session.storage_url.clone();
        self.list_names(url, "account").await
    }

    async fn get_container(&self, name: &str) -> Result<(ContainerInfo, Headers)> {
        let url = self.container_url(name)?;
        let response = self.send(self.request(Method::HEAD, url), name).await?;
        let headers = response.headers();

        let mut info = ContainerInfo::new(
            name,
            header_u64(headers, OBJECT_COUNT),
            header_u64(headers, BYTES_USED),
        );
        info.created = headers
            .get(TIMESTAMP)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_timestamp);

        Ok((info, container_metadata(headers)))
    }

    async fn create_container(&self, name: &str, headers: &Headers) -> Result<()> {
        let url = self.container_url(name)?;
        let header_map = to_header_map(headers)?;
        self.send(
            self.request(Method::PUT, url)
                .headers(header_map)
                .header("Content-Length", "0"),
            name,
        )
        .await?;
        Ok(())
    }

    async fn delete_container(&self, name: &str) -> Result<()> {
        let url = self.container_url(name)?;
        self.send(self.request(Method::DELETE, url), name).await?;
        Ok(())
    }

    async fn list_object_names(&self, container: &str) -> Result<Vec<String>> {
        let url = self.container_url(container)?;
        self.list_names(url, container).await
    }

    async fn delete_object(&self, container: &str, object: &str) -> Result<()> {
        let url = self.object_url(container, object)?;
        let resource = format!("{container}/{object}");
        self.send(self.request(Method::DELETE, url), &resource)
            .await?;
        Ok(())
    }

    async fn move_object(
        &self,
        src_container: &str,
        src_object: &str,
        dst_container: &str,
        dst_object: &str,
    ) -> Result<()> {
        let src_url = self.object_url(src_container, src_object)?;
        let dst_url = self.object_url(dst_container, dst_object)?;
        let copy_from = copy_from_path(&self.session.storage_url, &src_url);
        let resource = format!("{src_container}/{src_object}");

        // Server-side copy, then remove the source.
        self.send(
            self.request(Method::PUT, dst_url)
                .header("X-Copy-From", copy_from)
                .header("Content-Length", "0"),
            &resource,
        )
        .await?;
        self.send(self.request(Method::DELETE, src_url), &resource)
            .await?;
        Ok(())
    }
}

/// Map an unsuccessful HTTP status to an error
pub(crate) fn status_error(status: StatusCode, resource: &str, body: &str) -> Error {
    let detail = if body.trim().is_empty() {
        format!("{resource} ({status})")
    } else {
        format!("{resource} ({status}): {}", body.trim())
    };
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(detail),
        StatusCode::NOT_FOUND => Error::NotFound(detail),
        StatusCode::CONFLICT => Error::Conflict(detail),
        _ => Error::Network(detail),
    }
}

/// Append a container and optional object to the account URL
///
/// The container is one path segment; slashes in an object name are kept as
/// separators. URL parsing removes `.` and `..` segments (encoded or not), so
/// a name containing one cannot be addressed and is rejected rather than
/// sent to a different path.
fn resource_url(storage_url: &Url, container: &str, object: Option<&str>) -> Result<Url> {
    check_container_name(container)?;
    if let Some(object) = object
        && object.split('/').any(is_dot_segment)
    {
        return Err(Error::InvalidName {
            name: object.to_string(),
        });
    }

    let mut url = storage_url.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid storage URL: {storage_url}")))?;
        segments.pop_if_empty().push(container);
        if let Some(object) = object {
            segments.extend(object.split('/'));
        }
    }
    Ok(url)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Value of `X-Copy-From`: the source path relative to the account
fn copy_from_path(storage_url: &Url, src_url: &Url) -> String {
    let account = storage_url.path().trim_end_matches('/');
    src_url
        .path()
        .strip_prefix(account)
        .unwrap_or(src_url.path())
        .to_string()
}

/// Whether a response header is container metadata that can be set on create
fn is_container_metadata(name: &str) -> bool {
    if name == OBJECT_COUNT || name == BYTES_USED {
        return false;
    }
    name.starts_with("x-container-")
        || name.starts_with("x-versions-")
        || name == "x-history-location"
        || name == "x-storage-policy"
}

/// Collect settable container headers with canonical names
fn container_metadata(headers: &HeaderMap) -> Headers {
    headers
        .iter()
        .filter(|(name, _)| is_container_metadata(name.as_str()))
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (canonical_header_name(name.as_str()), v.to_string()))
        })
        .collect()
}

/// `x-container-meta-foo` -> `X-Container-Meta-Foo`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::General(format!("Invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| Error::General(format!("Invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn header_u64(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Parse Swift's `X-Timestamp` (fractional seconds since the epoch)
fn parse_timestamp(value: &str) -> Option<jiff::Timestamp> {
    let seconds: f64 = value.parse().ok()?;
    jiff::Timestamp::from_second(seconds.trunc() as i64).ok()
}
