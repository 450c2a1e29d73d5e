//! Service management
//!
//! Services are named references to Swift-compatible object storage
//! endpoints, including authentication details and credentials. The service
//! name is what container commands take as their first argument.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Identity API used to obtain a token and storage URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthVersion {
    /// Swift TempAuth (`X-Auth-User` / `X-Auth-Key`)
    V1,
    /// Keystone v3 password authentication
    #[default]
    V3,
}

impl fmt::Display for AuthVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthVersion::V1 => f.write_str("v1"),
            AuthVersion::V3 => f.write_str("v3"),
        }
    }
}

impl std::str::FromStr for AuthVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(AuthVersion::V1),
            "v3" | "3" => Ok(AuthVersion::V3),
            other => Err(Error::Config(format!(
                "Unsupported auth version '{other}' (expected v1 or v3)"
            ))),
        }
    }
}

/// Timeout configuration for a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_ms: u64,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            read_ms: default_read_timeout(),
        }
    }
}

/// A named Swift-compatible object storage service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique name for this service
    pub name: String,

    /// Identity endpoint, e.g. `https://identity.example.com/v3`
    pub auth_url: String,

    /// Identity API version
    #[serde(default)]
    pub auth_version: AuthVersion,

    /// User name (v3) or `account:user` (v1)
    pub username: String,

    /// Password (v3) or key (v1)
    pub password: String,

    /// Project to scope the token to (v3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Domain of the user (v3)
    #[serde(default = "default_domain")]
    pub domain_name: String,

    /// Region of the object-store endpoint (v3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Allow insecure TLS connections
    #[serde(default)]
    pub insecure: bool,

    /// Timeout configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

fn default_domain() -> String {
    "Default".to_string()
}

impl Service {
    /// Create a new service with required fields
    pub fn new(
        name: impl Into<String>,
        auth_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            auth_url: auth_url.into(),
            auth_version: AuthVersion::default(),
            username: username.into(),
            password: password.into(),
            project_id: None,
            domain_name: default_domain(),
            region: None,
            insecure: false,
            timeout: None,
        }
    }

    /// Get the effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }
}

/// Manager for service operations
pub struct ServiceManager {
    config_manager: ConfigManager,
}

impl ServiceManager {
    /// Create a new ServiceManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ServiceManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured services
    pub fn list(&self) -> Result<Vec<Service>> {
        let config = self.config_manager.load()?;
        Ok(config.services)
    }

    /// Get a service by name
    pub fn get(&self, name: &str) -> Result<Service> {
        let config = self.config_manager.load()?;
        config
            .services
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::ServiceNotFound(name.to_string()))
    }

    /// Add or update a service
    pub fn set(&self, service: Service) -> Result<()> {
        let mut config = self.config_manager.load()?;

        config.services.retain(|s| s.name != service.name);
        config.services.push(service);

        self.config_manager.save(&config)
    }

    /// Remove a service
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.services.len();

        config.services.retain(|s| s.name != name);

        if config.services.len() == original_len {
            return Err(Error::ServiceNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }

    /// Check if a service exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let config = self.config_manager.load()?;
        Ok(config.services.iter().any(|s| s.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_service_manager() -> (ServiceManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_manager = ConfigManager::with_path(config_path);
        let service_manager = ServiceManager::with_config_manager(config_manager);
        (service_manager, temp_dir)
    }

    #[test]
    fn test_service_new() {
        let service = Service::new("os", "https://identity.example.com/v3", "user", "pw");
        assert_eq!(service.name, "os");
        assert_eq!(service.auth_version, AuthVersion::V3);
        assert_eq!(service.domain_name, "Default");
        assert!(service.project_id.is_none());
        assert!(!service.insecure);
        assert_eq!(service.timeout_config().connect_ms, 5000);
    }

    #[test]
    fn test_auth_version_parse() {
        assert_eq!("v1".parse::<AuthVersion>().unwrap(), AuthVersion::V1);
        assert_eq!("V3".parse::<AuthVersion>().unwrap(), AuthVersion::V3);
        assert!("v2".parse::<AuthVersion>().is_err());
        assert_eq!(AuthVersion::V1.to_string(), "v1");
    }

    #[test]
    fn test_service_toml_defaults() {
        let service: Service = toml::from_str(
            r#"
            name = "os"
            auth_url = "http://127.0.0.1:8080/auth/v1.0"
            auth_version = "v1"
            username = "test:tester"
            password = "testing"
            "#,
        )
        .unwrap();
        assert_eq!(service.auth_version, AuthVersion::V1);
        assert_eq!(service.domain_name, "Default");
        assert!(service.timeout.is_none());
    }

    #[test]
    fn test_service_manager_set_and_get() {
        let (manager, _temp_dir) = temp_service_manager();

        let service = Service::new("os", "https://identity.example.com/v3", "user", "pw");
        manager.set(service).unwrap();

        let retrieved = manager.get("os").unwrap();
        assert_eq!(retrieved.name, "os");
        assert_eq!(retrieved.auth_url, "https://identity.example.com/v3");
    }

    #[test]
    fn test_service_manager_list() {
        let (manager, _temp_dir) = temp_service_manager();

        manager
            .set(Service::new("a", "http://a/v3", "a", "a"))
            .unwrap();
        manager
            .set(Service::new("b", "http://b/v3", "b", "b"))
            .unwrap();

        assert_eq!(manager.list().unwrap().len(), 2);
    }

    #[test]
    fn test_service_manager_remove() {
        let (manager, _temp_dir) = temp_service_manager();

        manager
            .set(Service::new("os", "http://a/v3", "a", "b"))
            .unwrap();
        assert!(manager.exists("os").unwrap());

        manager.remove("os").unwrap();
        assert!(!manager.exists("os").unwrap());
    }

    #[test]
    fn test_service_manager_not_found() {
        let (manager, _temp_dir) = temp_service_manager();

        assert!(matches!(
            manager.remove("nonexistent"),
            Err(Error::ServiceNotFound(_))
        ));
        assert!(matches!(
            manager.get("nonexistent"),
            Err(Error::ServiceNotFound(_))
        ));
    }

    #[test]
    fn test_service_update_existing() {
        let (manager, _temp_dir) = temp_service_manager();

        manager
            .set(Service::new("os", "http://old/v3", "a", "b"))
            .unwrap();
        manager
            .set(Service::new("os", "http://new/v3", "c", "d"))
            .unwrap();

        let services = manager.list().unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].auth_url, "http://new/v3");
    }
}
