//! Desired-state model for SNMP data-collecting-agent monitors.
//!
//! [`MonitorParams`] holds raw user- or device-supplied field values and
//! exposes each validated field through a lazy resolver. Construction never
//! fails; a bad raw value surfaces as [`MonitorError::InvalidValue`] the
//! first time the field is read. The same type models both desired state
//! (caller input) and live state (deserialized `load` response).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{MonitorError, MonitorResult};
use crate::value::FieldValue;

/// Wire-name to canonical-name mapping.
///
/// Every wire name maps to exactly one canonical name; uniqueness in both
/// directions is asserted by a test. Fields absent from this table use the
/// same name on both sides.
pub const API_MAP: &[(&str, &str)] = &[
    ("timeUntilUp", "time_until_up"),
    ("defaultsFrom", "parent"),
    ("destination", "ip"),
    ("agentType", "agent_type"),
    ("cpuCoefficient", "cpu_coefficient"),
    ("cpuThreshold", "cpu_threshold"),
    ("memoryCoefficient", "memory_coefficient"),
    ("memoryThreshold", "memory_threshold"),
    ("diskCoefficient", "disk_coefficient"),
    ("diskThreshold", "disk_threshold"),
];

/// Fields serialized to the device, by wire name, in declared order.
pub const API_ATTRIBUTES: &[&str] = &[
    "timeUntilUp",
    "defaultsFrom",
    "interval",
    "timeout",
    "destination",
    "community",
    "version",
    "agentType",
    "cpuCoefficient",
    "cpuThreshold",
    "memoryCoefficient",
    "memoryThreshold",
    "diskCoefficient",
    "diskThreshold",
];

/// Fields included in the caller-facing report, by canonical name.
pub const RETURNABLES: &[&str] = &[
    "parent",
    "ip",
    "interval",
    "timeout",
    "time_until_up",
    "description",
    "community",
    "version",
    "agent_type",
    "cpu_coefficient",
    "cpu_threshold",
    "memory_coefficient",
    "memory_threshold",
    "disk_coefficient",
    "disk_threshold",
];

/// Fields the difference engine iterates, in declared order.
///
/// The fixed order makes validation errors deterministic across runs.
pub const UPDATABLES: &[&str] = &[
    "parent",
    "ip",
    "interval",
    "timeout",
    "time_until_up",
    "description",
    "community",
    "version",
    "agent_type",
    "cpu_coefficient",
    "cpu_threshold",
    "memory_coefficient",
    "memory_threshold",
    "disk_coefficient",
    "disk_threshold",
];

/// Translate a wire name to its canonical name, or pass it through.
pub fn canonical_name(key: &str) -> &str {
    API_MAP
        .iter()
        .find(|(wire, _)| *wire == key)
        .map_or(key, |entry| entry.1)
}

/// Translate a canonical name to its wire name, or pass it through.
pub fn wire_name(canonical: &str) -> &str {
    API_MAP
        .iter()
        .find(|(_, c)| *c == canonical)
        .map_or(canonical, |entry| entry.0)
}

/// Creation-time defaults for every field the user may leave unset.
///
/// Applied explicitly by the reconciler's create branch, never implicitly
/// during reads.
pub fn creation_defaults() -> Vec<(&'static str, FieldValue)> {
    vec![
        ("parent", FieldValue::from("/Common/snmp_dca")),
        ("interval", FieldValue::from(10)),
        ("timeout", FieldValue::from(30)),
        ("time_until_up", FieldValue::from(0)),
        ("community", FieldValue::from("public")),
        ("version", FieldValue::from("v1")),
        ("agent_type", FieldValue::from("UCD")),
        ("cpu_coefficient", FieldValue::from(1.5)),
        ("cpu_threshold", FieldValue::from(80.0)),
        ("memory_coefficient", FieldValue::from(1.0)),
        ("memory_threshold", FieldValue::from(70.0)),
        ("disk_coefficient", FieldValue::from(2.0)),
        ("disk_threshold", FieldValue::from(90.0)),
    ]
}

/// SNMP protocol version spoken to the monitored host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnmpVersion {
    V1,
    V2c,
}

impl FromStr for SnmpVersion {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(SnmpVersion::V1),
            "v2c" => Ok(SnmpVersion::V2c),
            _ => Err(MonitorError::invalid_value(
                "version",
                "must be one of: v1, v2c",
            )),
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpVersion::V1 => write!(f, "v1"),
            SnmpVersion::V2c => write!(f, "v2c"),
        }
    }
}

/// SNMP agent type running on the monitored host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    Ucd,
    Win2000,
    Generic,
}

impl FromStr for AgentType {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UCD" => Ok(AgentType::Ucd),
            "WIN2000" => Ok(AgentType::Win2000),
            "GENERIC" => Ok(AgentType::Generic),
            _ => Err(MonitorError::invalid_value(
                "agent_type",
                "must be one of: UCD, WIN2000, GENERIC",
            )),
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentType::Ucd => write!(f, "UCD"),
            AgentType::Win2000 => write!(f, "WIN2000"),
            AgentType::Generic => write!(f, "GENERIC"),
        }
    }
}

/// A named, partitioned monitor configuration record.
#[derive(Debug, Clone, Default)]
pub struct MonitorParams {
    raw: HashMap<String, FieldValue>,
}

impl MonitorParams {
    /// Build a record from raw key/value pairs.
    ///
    /// Keys may be canonical or wire names; wire names are remapped on
    /// ingest. Values are stored as given and validated lazily.
    pub fn new(raw: HashMap<String, FieldValue>) -> Self {
        let mut params = Self::default();
        params.apply(raw);
        params
    }

    /// Merge additional raw values into the record.
    pub fn apply(&mut self, raw: HashMap<String, FieldValue>) {
        for (key, value) in raw {
            self.set(&key, value);
        }
    }

    /// Set a single raw value, remapping wire names.
    pub fn set(&mut self, key: &str, value: FieldValue) {
        self.raw.insert(canonical_name(key).to_string(), value);
    }

    /// Get a raw value by canonical name, without validation.
    pub fn raw(&self, field: &str) -> Option<&FieldValue> {
        self.raw.get(field)
    }

    /// The monitor name, if supplied.
    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(FieldValue::as_str)
    }

    /// The device partition, defaulting to `Common`.
    pub fn partition(&self) -> &str {
        self.raw
            .get("partition")
            .and_then(FieldValue::as_str)
            .unwrap_or("Common")
    }

    /// Check interval frequency, in seconds.
    pub fn interval(&self) -> MonitorResult<Option<i64>> {
        let Some(raw) = self.raw.get("interval") else {
            return Ok(None);
        };
        let value = raw.to_integer().ok_or_else(|| {
            MonitorError::invalid_value("interval", "must be a valid integer")
        })?;
        if !(1..=86400).contains(&value) {
            return Err(MonitorError::invalid_value(
                "interval",
                "must be between 1 and 86400",
            ));
        }
        Ok(Some(value))
    }

    /// Response timeout, in seconds.
    pub fn timeout(&self) -> MonitorResult<Option<i64>> {
        self.integer_field("timeout")
    }

    /// Delay before a responding resource is marked up, in seconds.
    pub fn time_until_up(&self) -> MonitorResult<Option<i64>> {
        self.integer_field("time_until_up")
    }

    /// Parent template, normalized to a fully qualified `/partition/name`
    /// path. Derivation uses this record's partition, so `/Other/snmp_dca`
    /// re-homes to the record's own partition.
    pub fn parent(&self) -> MonitorResult<Option<String>> {
        let Some(raw) = self.raw.get("parent") else {
            return Ok(None);
        };
        let value = raw
            .as_str()
            .ok_or_else(|| MonitorError::invalid_value("parent", "must be a string"))?;
        let basename = if value.starts_with('/') {
            value.rsplit('/').next().unwrap_or(value)
        } else {
            value
        };
        Ok(Some(format!("/{}/{}", self.partition(), basename)))
    }

    /// SNMP version of the monitored host.
    pub fn version(&self) -> MonitorResult<Option<SnmpVersion>> {
        let Some(raw) = self.raw.get("version") else {
            return Ok(None);
        };
        let value = raw
            .as_str()
            .ok_or_else(|| MonitorError::invalid_value("version", "must be a string"))?;
        value.parse().map(Some)
    }

    /// SNMP agent type of the monitored host.
    pub fn agent_type(&self) -> MonitorResult<Option<AgentType>> {
        let Some(raw) = self.raw.get("agent_type") else {
            return Ok(None);
        };
        let value = raw
            .as_str()
            .ok_or_else(|| MonitorError::invalid_value("agent_type", "must be a string"))?;
        value.parse().map(Some)
    }

    /// Resolve a coefficient or threshold field to a float.
    pub fn numeric(&self, field: &str) -> MonitorResult<Option<f64>> {
        let Some(raw) = self.raw.get(field) else {
            return Ok(None);
        };
        raw.to_float()
            .map(Some)
            .ok_or_else(|| MonitorError::invalid_value(field, "must be a valid number"))
    }

    fn integer_field(&self, field: &str) -> MonitorResult<Option<i64>> {
        let Some(raw) = self.raw.get(field) else {
            return Ok(None);
        };
        raw.to_integer()
            .map(Some)
            .ok_or_else(|| MonitorError::invalid_value(field, "must be a valid integer"))
    }

    /// Resolve a field by canonical name through its validating accessor.
    ///
    /// `Ok(None)` means the raw value is absent; `Err` carries the field
    /// name and the violated constraint.
    pub fn resolve(&self, field: &str) -> MonitorResult<Option<FieldValue>> {
        match field {
            "interval" => Ok(self.interval()?.map(FieldValue::Integer)),
            "timeout" => Ok(self.timeout()?.map(FieldValue::Integer)),
            "time_until_up" => Ok(self.time_until_up()?.map(FieldValue::Integer)),
            "parent" => Ok(self.parent()?.map(FieldValue::String)),
            "version" => Ok(self.version()?.map(|v| FieldValue::String(v.to_string()))),
            "agent_type" => Ok(self.agent_type()?.map(|v| FieldValue::String(v.to_string()))),
            "cpu_coefficient" | "cpu_threshold" | "memory_coefficient" | "memory_threshold"
            | "disk_coefficient" | "disk_threshold" => {
                Ok(self.numeric(field)?.map(FieldValue::Float))
            }
            // Plain string fields pass through unvalidated.
            _ => Ok(self.raw.get(field).cloned()),
        }
    }

    /// Serialize for the wire: every field in [`API_ATTRIBUTES`], keyed by
    /// wire name, with null fields omitted. Validation errors propagate.
    pub fn api_params(&self) -> MonitorResult<HashMap<String, FieldValue>> {
        let mut result = HashMap::new();
        for wire in API_ATTRIBUTES {
            if let Some(value) = self.resolve(canonical_name(wire))? {
                result.insert((*wire).to_string(), value);
            }
        }
        Ok(result)
    }

    /// Serialize for the caller-facing report: every field in
    /// [`RETURNABLES`], with null fields omitted.
    ///
    /// Never fails: a field whose resolver errors is treated as not
    /// reportable and dropped, per field, without aborting the rest.
    pub fn to_report(&self) -> HashMap<String, FieldValue> {
        let mut result = HashMap::new();
        for field in RETURNABLES {
            if let Ok(Some(value)) = self.resolve(field) {
                result.insert((*field).to_string(), value);
            }
        }
        result
    }
}
