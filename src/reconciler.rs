//! Reconciliation orchestrator.
//!
//! Sequences existence checks, creation, update, and removal for one named
//! monitor per invocation. Dry-run computes the same changed/unchanged
//! verdict as a real run without issuing any mutating gateway call. The
//! orchestrator holds no state across invocations; all memory of prior
//! configuration lives on the device and is read fresh each time.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::diff::Difference;
use crate::error::{MonitorError, MonitorResult};
use crate::gateway::MonitorGateway;
use crate::ident::MonitorIdent;
use crate::params::{creation_defaults, wire_name, MonitorParams, RETURNABLES, UPDATABLES};
use crate::value::FieldValue;

/// Target state for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// The monitor should exist with the desired configuration.
    Present,
    /// The monitor should not exist.
    Absent,
}

impl FromStr for TargetState {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(TargetState::Present),
            "absent" => Ok(TargetState::Absent),
            _ => Err(MonitorError::invalid_value(
                "state",
                "must be one of: present, absent",
            )),
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetState::Present => write!(f, "present"),
            TargetState::Absent => write!(f, "absent"),
        }
    }
}

/// Result of one reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Whether the run changed (or, in dry-run, would change) the device.
    pub changed: bool,
    /// The new values the run intends to apply, by canonical field name.
    pub report: HashMap<String, FieldValue>,
}

/// Orchestrates one monitor's convergence toward its desired state.
pub struct Reconciler {
    gateway: Arc<dyn MonitorGateway>,
}

impl Reconciler {
    /// Create a reconciler over the given gateway.
    pub fn new(gateway: Arc<dyn MonitorGateway>) -> Self {
        Self { gateway }
    }

    /// Converge the monitor described by `fields` toward `target`.
    ///
    /// `fields` is the raw desired-state mapping and must include `name`;
    /// `partition` defaults to `Common`. Validation and constraint errors
    /// surface before any mutating gateway call.
    pub async fn reconcile(
        &self,
        target: TargetState,
        fields: HashMap<String, FieldValue>,
        dry_run: bool,
    ) -> MonitorResult<ReconcileOutcome> {
        let mut want = MonitorParams::new(fields);
        let ident = MonitorIdent::new(
            want.name()
                .ok_or_else(|| MonitorError::invalid_value("name", "is required"))?,
            want.partition(),
        );

        let mut changes = HashMap::new();
        let changed = match target {
            TargetState::Present => {
                self.present(&ident, &mut want, &mut changes, dry_run)
                    .await?
            }
            TargetState::Absent => self.absent(&ident, dry_run).await?,
        };

        // The change record is merged into the report and discarded. Parent
        // derivation depends on the partition, which a change record never
        // carries, so it is restored before resolving.
        let mut record = MonitorParams::new(changes);
        record.set("partition", FieldValue::from(ident.partition()));
        let report = record.to_report();
        Ok(ReconcileOutcome { changed, report })
    }

    async fn present(
        &self,
        ident: &MonitorIdent,
        want: &mut MonitorParams,
        changes: &mut HashMap<String, FieldValue>,
        dry_run: bool,
    ) -> MonitorResult<bool> {
        if self.gateway.exists(ident).await? {
            self.update(ident, want, changes, dry_run).await
        } else {
            self.create(ident, want, changes, dry_run).await
        }
    }

    async fn create(
        &self,
        ident: &MonitorIdent,
        want: &mut MonitorParams,
        changes: &mut HashMap<String, FieldValue>,
        dry_run: bool,
    ) -> MonitorResult<bool> {
        // Defaults are applied explicitly here, never implicitly at read
        // time, so the change record shows exactly what the device gets.
        for (field, value) in creation_defaults() {
            if want.resolve(field)?.is_none() {
                want.set(field, value);
            }
        }

        if let (Some(interval), Some(timeout)) = (want.interval()?, want.timeout()?) {
            if interval >= timeout {
                return Err(MonitorError::constraint(
                    "parameter 'interval' must be less than 'timeout'",
                ));
            }
        }

        for field in RETURNABLES {
            if let Some(value) = want.resolve(field)? {
                changes.insert((*field).to_string(), value);
            }
        }

        if dry_run {
            tracing::info!(monitor = %ident, "Dry run: monitor would be created");
            return Ok(true);
        }

        let fields = want.api_params()?;
        match self.gateway.create(ident, fields).await {
            Ok(_) => {
                tracing::info!(monitor = %ident, "Created monitor");
                Ok(true)
            }
            // Creation race: another writer created it first. The goal is
            // already achieved, so this run made no change of its own.
            Err(MonitorError::RemoteAlreadyExists { .. }) => {
                tracing::info!(monitor = %ident, "Monitor already exists, creation skipped");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    async fn update(
        &self,
        ident: &MonitorIdent,
        want: &MonitorParams,
        changes: &mut HashMap<String, FieldValue>,
        dry_run: bool,
    ) -> MonitorResult<bool> {
        let have = self.gateway.load(ident).await?;
        let diff = Difference::new(want, Some(&have));

        for field in UPDATABLES {
            if let Some(value) = diff.compare(field)? {
                changes.insert((*field).to_string(), value);
            }
        }

        if changes.is_empty() {
            tracing::debug!(monitor = %ident, "Monitor already converged");
            return Ok(false);
        }
        if dry_run {
            tracing::info!(
                monitor = %ident,
                fields = changes.len(),
                "Dry run: monitor would be modified"
            );
            return Ok(true);
        }

        // Only the change record goes to the device, keyed by wire name.
        let fields = changes
            .iter()
            .map(|(field, value)| (wire_name(field).to_string(), value.clone()))
            .collect();
        self.gateway.modify(ident, fields).await?;
        tracing::info!(monitor = %ident, fields = changes.len(), "Modified monitor");
        Ok(true)
    }

    async fn absent(&self, ident: &MonitorIdent, dry_run: bool) -> MonitorResult<bool> {
        if !self.gateway.exists(ident).await? {
            return Ok(false);
        }
        if dry_run {
            tracing::info!(monitor = %ident, "Dry run: monitor would be removed");
            return Ok(true);
        }

        match self.gateway.delete(ident).await {
            Ok(()) => {}
            // Deleted out from under us since the existence check; the goal
            // is satisfied either way.
            Err(MonitorError::RemoteNotFound { .. }) => {
                tracing::info!(monitor = %ident, "Monitor already removed");
            }
            Err(err) => return Err(err),
        }

        if self.gateway.exists(ident).await? {
            return Err(MonitorError::postcondition(
                ident.clone(),
                "failed to delete the monitor",
            ));
        }
        tracing::info!(monitor = %ident, "Removed monitor");
        Ok(true)
    }
}
