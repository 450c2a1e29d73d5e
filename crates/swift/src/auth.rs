//! Token authentication against the service's identity endpoint
//!
//! Produces the storage URL and token that every Swift request is made with.

use cfos_core::{AuthVersion, Error, Result, Service};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::client::status_error;

/// Catalog type of the Swift endpoint
const OBJECT_STORE_TYPE: &str = "object-store";

/// Storage URL and token obtained from the identity service
#[derive(Clone)]
pub struct Session {
    /// Account URL, e.g. `https://swift.example.com/v1/AUTH_abc`
    pub storage_url: Url,
    /// Value for the `X-Auth-Token` header
    pub token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("storage_url", &self.storage_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Authenticate with the identity API the service is configured for
pub async fn authenticate(http: &Client, service: &Service) -> Result<Session> {
    tracing::debug!(
        service = %service.name,
        auth_url = %service.auth_url,
        version = %service.auth_version,
        "authenticating"
    );
    match service.auth_version {
        AuthVersion::V1 => authenticate_v1(http, service).await,
        AuthVersion::V3 => authenticate_v3(http, service).await,
    }
}

async fn authenticate_v1(http: &Client, service: &Service) -> Result<Session> {
    let response = http
        .get(&service.auth_url)
        .header("X-Auth-User", &service.username)
        .header("X-Auth-Key", &service.password)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &service.auth_url, &body));
    }

    let headers = response.headers();
    let storage_url = header_str(headers, "x-storage-url")
        .ok_or_else(|| Error::Auth("response is missing X-Storage-Url".into()))?;
    let token = header_str(headers, "x-auth-token")
        .ok_or_else(|| Error::Auth("response is missing X-Auth-Token".into()))?;

    Ok(Session {
        storage_url: Url::parse(storage_url).map_err(|e| Error::Auth(e.to_string()))?,
        token: token.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Token,
}

#[derive(Debug, Deserialize)]
struct Token {
    #[serde(default)]
    catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    interface: String,
    #[serde(default)]
    region: Option<String>,
    url: String,
}

async fn authenticate_v3(http: &Client, service: &Service) -> Result<Session> {
    let url = tokens_url(&service.auth_url)?;

    let mut body = json!({
        "auth": {
            "identity": {
                "methods": ["password"],
                "password": {
                    "user": {
                        "name": service.username,
                        "domain": { "name": service.domain_name },
                        "password": service.password,
                    }
                }
            }
        }
    });
    if let Some(project_id) = &service.project_id {
        body["auth"]["scope"] = json!({ "project": { "id": project_id } });
    }

    let response = http
        .post(url.clone())
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, url.as_str(), &body));
    }

    let token = header_str(response.headers(), "x-subject-token")
        .ok_or_else(|| Error::Auth("response is missing X-Subject-Token".into()))?
        .to_string();
    let parsed: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Auth(format!("invalid token response: {e}")))?;

    let storage_url = object_store_url(&parsed.token.catalog, service.region.as_deref())?;
    tracing::debug!(storage_url = %storage_url, "resolved object-store endpoint");

    Ok(Session { storage_url, token })
}

/// Build the Keystone v3 token URL from a configured identity URL
fn tokens_url(auth_url: &str) -> Result<Url> {
    let base = auth_url.trim_end_matches('/');
    let full = if base.ends_with("/auth/tokens") {
        base.to_string()
    } else if base.ends_with("/v3") {
        format!("{base}/auth/tokens")
    } else {
        format!("{base}/v3/auth/tokens")
    };
    Url::parse(&full).map_err(|e| Error::Config(format!("Invalid auth URL '{auth_url}': {e}")))
}

/// Pick the public object-store endpoint, restricted to `region` when given
fn object_store_url(catalog: &[CatalogEntry], region: Option<&str>) -> Result<Url> {
    let endpoint = catalog
        .iter()
        .filter(|entry| entry.kind == OBJECT_STORE_TYPE)
        .flat_map(|entry| entry.endpoints.iter())
        .filter(|ep| ep.interface == "public")
        .find(|ep| match region {
            Some(region) => ep.region.as_deref() == Some(region),
            None => true,
        })
        .ok_or_else(|| {
            Error::Auth(match region {
                Some(region) => format!("no public object-store endpoint in region '{region}'"),
                None => "no public object-store endpoint in service catalog".to_string(),
            })
        })?;

    Url::parse(&endpoint.url).map_err(|e| Error::Auth(format!("invalid endpoint URL: {e}")))
}

fn header_str<'a>(headers: &'a reqwest::header::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
