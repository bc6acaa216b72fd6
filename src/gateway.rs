//! Remote resource gateway trait.
//!
//! The transport to the appliance lives behind this trait; the engine only
//! sequences calls and interprets the documented failure conditions. At most
//! one call is outstanding at a time and every call is awaited before the
//! next is issued.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::MonitorResult;
use crate::ident::MonitorIdent;
use crate::params::MonitorParams;
use crate::value::FieldValue;

/// Operations the appliance must expose for one monitor type.
///
/// Contract notes:
/// - `exists` must return `Ok(false)` for an absent monitor, never an error.
/// - `load` fails with [`crate::MonitorError::RemoteNotFound`] for an absent
///   monitor and otherwise returns the full live record; a partial record is
///   a gateway bug, not an engine state.
/// - `create` fails with [`crate::MonitorError::RemoteAlreadyExists`] when
///   another writer got there first.
/// - `delete` fails with [`crate::MonitorError::RemoteNotFound`] when the
///   monitor is already gone; the caller treats that as satisfied.
/// - Any other failure is reported through the engine's error taxonomy,
///   typically [`crate::MonitorError::Gateway`] with operation context.
#[async_trait]
pub trait MonitorGateway: Send + Sync {
    /// Check whether the named monitor exists on the device.
    async fn exists(&self, ident: &MonitorIdent) -> MonitorResult<bool>;

    /// Load the live configuration of the named monitor.
    async fn load(&self, ident: &MonitorIdent) -> MonitorResult<MonitorParams>;

    /// Create the monitor with the given wire-named fields.
    ///
    /// Returns the identity of the created monitor.
    async fn create(
        &self,
        ident: &MonitorIdent,
        fields: HashMap<String, FieldValue>,
    ) -> MonitorResult<MonitorIdent>;

    /// Apply the given wire-named field changes to the existing monitor.
    async fn modify(
        &self,
        ident: &MonitorIdent,
        fields: HashMap<String, FieldValue>,
    ) -> MonitorResult<()>;

    /// Delete the monitor from the device.
    async fn delete(&self, ident: &MonitorIdent) -> MonitorResult<()>;
}
