//! # ADC Monitor Reconciliation
//!
//! Idempotent reconciliation engine for network-health monitors on a
//! load-balancing appliance.
//!
//! The engine converges a remote, API-managed monitor toward a declared
//! desired state in three stages: describe the desired state, read the live
//! state, compute a minimal diff, and apply only the diff.
//!
//! ## Architecture
//!
//! - [`MonitorParams`] - desired/live state with deferred per-field
//!   validation and canonical↔wire name mapping
//! - [`Difference`] - per-field change computation with custom comparators
//!   for identity and ordering-constrained fields
//! - [`Reconciler`] - the state machine: existence check → create, update,
//!   or remove, with dry-run parity
//! - [`MonitorGateway`] - trait boundary to the appliance transport
//!
//! ## Example
//!
//! ```ignore
//! use adc_monitor::prelude::*;
//!
//! let reconciler = Reconciler::new(gateway);
//! let mut fields = HashMap::new();
//! fields.insert("name".to_string(), FieldValue::from("web_health"));
//! fields.insert("interval".to_string(), FieldValue::from(10));
//!
//! let outcome = reconciler
//!     .reconcile(TargetState::Present, fields, false)
//!     .await?;
//! assert!(outcome.changed);
//! ```
//!
//! Each run reconciles exactly one named monitor and assumes no concurrent
//! external mutation during its own execution; creation races are tolerated
//! as already-achieved outcomes rather than prevented.
//!
//! ## Crate Organization
//!
//! - [`ident`] - monitor identity (`name` + `partition`)
//! - [`value`] - raw/resolved field values
//! - [`error`] - error taxonomy with benign-condition classification
//! - [`params`] - desired-state model and field catalogue
//! - [`diff`] - difference engine
//! - [`gateway`] - remote resource gateway trait
//! - [`reconciler`] - reconciliation orchestrator

pub mod diff;
pub mod error;
pub mod gateway;
pub mod ident;
pub mod params;
pub mod reconciler;
pub mod value;

pub use diff::Difference;
pub use error::{MonitorError, MonitorResult};
pub use gateway::MonitorGateway;
pub use ident::MonitorIdent;
pub use params::MonitorParams;
pub use reconciler::{ReconcileOutcome, Reconciler, TargetState};
pub use value::FieldValue;

/// Prelude module for convenient imports.
///
/// ```
/// use adc_monitor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::diff::Difference;
    pub use crate::error::{MonitorError, MonitorResult};
    pub use crate::gateway::MonitorGateway;
    pub use crate::ident::MonitorIdent;
    pub use crate::params::{AgentType, MonitorParams, SnmpVersion};
    pub use crate::reconciler::{ReconcileOutcome, Reconciler, TargetState};
    pub use crate::value::FieldValue;
}

// Re-export async_trait for gateway implementors
pub use async_trait::async_trait;
