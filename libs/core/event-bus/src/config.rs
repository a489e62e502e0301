//! Publisher configuration.

use core_config::{env_or_default, ConfigError, FromEnv};

/// Sentinel environment value that selects the logging publisher.
pub const LOCAL_ENVIRONMENT: &str = "local";

/// Configuration for publisher selection and bus-name derivation.
///
/// The bus name is a pure function of the two inputs and is fixed at
/// publisher construction for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Deployment environment flag ("local" or unset selects the
    /// logging publisher)
    pub environment: String,

    /// Name of the publishing service (becomes the event source)
    pub service_name: String,
}

impl PublisherConfig {
    pub fn new(environment: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            service_name: service_name.into(),
        }
    }

    /// Whether this configuration selects the logging publisher.
    pub fn is_local(&self) -> bool {
        self.environment.is_empty() || self.environment == LOCAL_ENVIRONMENT
    }

    /// Derived bus name: `{environment}-{serviceName}-events`.
    pub fn bus_name(&self) -> String {
        format!("{}-{}-events", self.environment, self.service_name)
    }
}

impl FromEnv for PublisherConfig {
    /// Reads from environment variables:
    /// - `ENVIRONMENT`: deployment flag (default "local")
    /// - `SERVICE_NAME`: publishing service name (default "api-svc-a")
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: env_or_default("ENVIRONMENT", LOCAL_ENVIRONMENT),
            service_name: env_or_default("SERVICE_NAME", "api-svc-a"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_name_derivation() {
        let config = PublisherConfig::new("prod", "api-svc-a");
        assert_eq!(config.bus_name(), "prod-api-svc-a-events");
    }

    #[test]
    fn test_bus_name_is_deterministic() {
        let config = PublisherConfig::new("dev", "worker-d");
        assert_eq!(config.bus_name(), config.bus_name());
        assert_eq!(config.bus_name(), "dev-worker-d-events");
    }

    #[test]
    fn test_local_sentinel() {
        assert!(PublisherConfig::new("local", "svc").is_local());
        assert!(PublisherConfig::new("", "svc").is_local());
        assert!(!PublisherConfig::new("prod", "svc").is_local());
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [("ENVIRONMENT", None::<&str>), ("SERVICE_NAME", None)],
            || {
                let config = PublisherConfig::from_env().unwrap();
                assert!(config.is_local());
                assert_eq!(config.service_name, "api-svc-a");
            },
        );
    }

    #[test]
    fn test_from_env_deployed() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", Some("prod")),
                ("SERVICE_NAME", Some("api-svc-a")),
            ],
            || {
                let config = PublisherConfig::from_env().unwrap();
                assert!(!config.is_local());
                assert_eq!(config.bus_name(), "prod-api-svc-a-events");
            },
        );
    }
}
