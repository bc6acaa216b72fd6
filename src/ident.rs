//! Monitor identity.
//!
//! A monitor is addressed by name within a device partition. The identity is
//! fixed at creation; the engine never renames a monitor in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a monitor on the appliance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonitorIdent {
    /// The monitor name.
    name: String,
    /// The device partition holding the monitor.
    partition: String,
}

impl MonitorIdent {
    /// Create a new identity from a name and partition.
    pub fn new(name: impl Into<String>, partition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition: partition.into(),
        }
    }

    /// Create an identity in the default `Common` partition.
    pub fn in_common(name: impl Into<String>) -> Self {
        Self::new(name, "Common")
    }

    /// Get the monitor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the partition.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Get the fully qualified path, `/partition/name`.
    pub fn full_path(&self) -> String {
        format!("/{}/{}", self.partition, self.name)
    }
}

impl fmt::Display for MonitorIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.partition, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_paths() {
        let ident = MonitorIdent::new("web_health", "Tenant1");
        assert_eq!(ident.name(), "web_health");
        assert_eq!(ident.partition(), "Tenant1");
        assert_eq!(ident.full_path(), "/Tenant1/web_health");
        assert_eq!(ident.to_string(), "/Tenant1/web_health");
    }

    #[test]
    fn test_default_partition() {
        let ident = MonitorIdent::in_common("web_health");
        assert_eq!(ident.partition(), "Common");
        assert_eq!(ident.to_string(), "/Common/web_health");
    }
}
