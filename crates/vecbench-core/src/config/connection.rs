use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A credential value that never leaks through logging or serialization.
///
/// `Debug` prints a fixed mask and there is no `Display` implementation, so
/// the only way to read the value is an explicit [`Secret::expose`] call at
/// the driver boundary.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    /// Read the underlying value. Call sites are the audit trail.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(****)")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("****")
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

/// How to reach the server: TCP or a local socket, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Address {
    Tcp { host: String, port: u16 },
    Socket { path: String },
}

impl Address {
    /// Build an address from loosely-typed flag/env input.
    ///
    /// Exactly one of `host` and `socket` must be non-empty; supplying both
    /// or neither is a configuration error.
    pub fn from_parts(host: Option<&str>, port: u16, socket: Option<&str>) -> Result<Self> {
        let host = host.filter(|h| !h.is_empty());
        let socket = socket.filter(|s| !s.is_empty());
        match (host, socket) {
            (Some(host), None) => Ok(Address::Tcp {
                host: host.to_string(),
                port,
            }),
            (None, Some(path)) => Ok(Address::Socket {
                path: path.to_string(),
            }),
            (Some(_), Some(_)) => Err(BenchError::Config(
                "host and unix socket are mutually exclusive; supply exactly one".to_string(),
            )),
            (None, None) => Err(BenchError::Config(
                "no server address: supply a host or a unix socket path".to_string(),
            )),
        }
    }
}

/// Connection settings for one backend instance.
///
/// Immutable once built; shared read-only by the client across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub address: Address,
    pub user: String,
    pub password: Secret,
    pub database: String,
}

impl ConnectionConfig {
    pub fn new(
        address: Address,
        user: impl Into<String>,
        password: Secret,
        database: impl Into<String>,
    ) -> Self {
        Self {
            address,
            user: user.into(),
            password,
            database: database.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_tcp() {
        let addr = Address::from_parts(Some("10.0.0.1"), 2881, None).unwrap();
        assert_eq!(
            addr,
            Address::Tcp {
                host: "10.0.0.1".to_string(),
                port: 2881
            }
        );
    }

    #[test]
    fn test_address_socket() {
        let addr = Address::from_parts(None, 2881, Some("/tmp/ob.sock")).unwrap();
        assert_eq!(
            addr,
            Address::Socket {
                path: "/tmp/ob.sock".to_string()
            }
        );
    }

    #[test]
    fn test_address_both_rejected() {
        let result = Address::from_parts(Some("10.0.0.1"), 2881, Some("/tmp/ob.sock"));
        assert!(matches!(result, Err(BenchError::Config(_))));
    }

    #[test]
    fn test_address_neither_rejected() {
        let result = Address::from_parts(None, 2881, None);
        assert!(matches!(result, Err(BenchError::Config(_))));

        // Empty strings count as absent, the way flag defaults arrive.
        let result = Address::from_parts(Some(""), 2881, Some(""));
        assert!(matches!(result, Err(BenchError::Config(_))));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let cfg = ConnectionConfig::new(
            Address::from_parts(Some("localhost"), 2881, None).unwrap(),
            "root@perf",
            Secret::new("hunter2"),
            "bench",
        );
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Secret(****)"));
    }

    #[test]
    fn test_secret_serialize_is_masked() {
        let secret = Secret::new("hunter2");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"****\"");
    }

    #[test]
    fn test_secret_deserialize_reads_plain_string() {
        let secret: Secret = serde_json::from_str("\"hunter2\"").unwrap();
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn test_secret_expose_returns_value() {
        let secret = Secret::new("hunter2");
        assert_eq!(secret.expose(), "hunter2");
    }
}
