//! Difference engine.
//!
//! Computes, per updatable field, whether the live monitor must change and
//! what the new value is. Most fields share the default "only change what is
//! explicitly requested and different from live" semantics; identity and
//! ordering-constrained fields override by name.

use crate::error::{MonitorError, MonitorResult};
use crate::params::MonitorParams;
use crate::value::FieldValue;

/// Field-by-field comparison between desired and live state.
pub struct Difference<'a> {
    want: &'a MonitorParams,
    have: Option<&'a MonitorParams>,
}

impl<'a> Difference<'a> {
    /// Create a comparison. `have` is `None` before the monitor exists.
    pub fn new(want: &'a MonitorParams, have: Option<&'a MonitorParams>) -> Self {
        Self { want, have }
    }

    /// Compare one field by canonical name.
    ///
    /// Returns `Ok(Some(value))` when the field must change to `value`,
    /// `Ok(None)` when no change is needed, and an error when the requested
    /// combination is invalid.
    pub fn compare(&self, field: &str) -> MonitorResult<Option<FieldValue>> {
        match field {
            "parent" => self.compare_parent(),
            "interval" => self.compare_interval(),
            "ip" => self.compare_ip(),
            _ => self.compare_default(field),
        }
    }

    /// The parent template is immutable once the monitor exists. Requesting
    /// a different parent than the live one is a hard failure, never a
    /// silent change.
    fn compare_parent(&self) -> MonitorResult<Option<FieldValue>> {
        let Some(want) = self.want.parent()? else {
            return Ok(None);
        };
        if let Some(have) = self.have {
            if let Some(have_parent) = have.parent()? {
                if want != have_parent {
                    return Err(MonitorError::constraint(
                        "the parent monitor cannot be changed",
                    ));
                }
            }
        }
        Ok(None)
    }

    /// Interval must stay strictly below timeout, whichever side each value
    /// comes from; only then does the ordinary value comparison apply.
    fn compare_interval(&self) -> MonitorResult<Option<FieldValue>> {
        let want_interval = self.want.interval()?;
        let want_timeout = self.want.timeout()?;

        match (want_interval, want_timeout) {
            (Some(interval), Some(timeout)) => {
                Self::check_ordering(interval, timeout)?;
            }
            (None, Some(timeout)) => {
                if let Some(interval) = self.have_interval()? {
                    Self::check_ordering(interval, timeout)?;
                }
            }
            (Some(interval), None) => {
                if let Some(timeout) = self.have_timeout()? {
                    Self::check_ordering(interval, timeout)?;
                }
            }
            (None, None) => {}
        }

        match want_interval {
            Some(interval) if self.have_interval()? != Some(interval) => {
                Ok(Some(FieldValue::Integer(interval)))
            }
            _ => Ok(None),
        }
    }

    /// The destination address only participates when explicitly requested.
    fn compare_ip(&self) -> MonitorResult<Option<FieldValue>> {
        if self.want.resolve("ip")?.is_none() {
            return Ok(None);
        }
        self.compare_default("ip")
    }

    fn compare_default(&self, field: &str) -> MonitorResult<Option<FieldValue>> {
        let Some(want) = self.want.resolve(field)? else {
            return Ok(None);
        };
        match self.have {
            Some(have) if have.resolve(field)? == Some(want.clone()) => Ok(None),
            _ => Ok(Some(want)),
        }
    }

    fn check_ordering(interval: i64, timeout: i64) -> MonitorResult<()> {
        if interval >= timeout {
            return Err(MonitorError::constraint(
                "parameter 'interval' must be less than 'timeout'",
            ));
        }
        Ok(())
    }

    fn have_interval(&self) -> MonitorResult<Option<i64>> {
        match self.have {
            Some(have) => have.interval(),
            None => Ok(None),
        }
    }

    fn have_timeout(&self) -> MonitorResult<Option<i64>> {
        match self.have {
            Some(have) => have.timeout(),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params(pairs: &[(&str, FieldValue)]) -> MonitorParams {
        MonitorParams::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    fn live() -> MonitorParams {
        params(&[
            ("defaultsFrom", FieldValue::from("/Common/snmp_dca")),
            ("interval", FieldValue::from(10)),
            ("timeout", FieldValue::from(30)),
            ("community", FieldValue::from("public")),
            ("cpuThreshold", FieldValue::from(80)),
        ])
    }

    #[test]
    fn test_default_no_change_when_unset() {
        let want = MonitorParams::new(HashMap::new());
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(diff.compare("community").unwrap(), None);
    }

    #[test]
    fn test_default_no_change_when_equal() {
        let want = params(&[("community", FieldValue::from("public"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(diff.compare("community").unwrap(), None);
    }

    #[test]
    fn test_default_change_when_different() {
        let want = params(&[("community", FieldValue::from("secret"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(
            diff.compare("community").unwrap(),
            Some(FieldValue::String("secret".into()))
        );
    }

    #[test]
    fn test_numeric_equality_across_representations() {
        // Desired "80" (string) against live 80 (integer): no change.
        let want = params(&[("cpu_threshold", FieldValue::from("80"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(diff.compare("cpu_threshold").unwrap(), None);
    }

    #[test]
    fn test_interval_ordering_both_desired() {
        let want = params(&[
            ("interval", FieldValue::from(30)),
            ("timeout", FieldValue::from(20)),
        ]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        let err = diff.compare("interval").unwrap_err();
        assert!(matches!(err, MonitorError::ConstraintViolation { .. }));
    }

    #[test]
    fn test_interval_ordering_against_live_interval() {
        // Desired timeout 5 would fall below the live interval of 10.
        let want = params(&[("timeout", FieldValue::from(5))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert!(diff.compare("interval").is_err());
    }

    #[test]
    fn test_interval_ordering_against_live_timeout() {
        // Desired interval 30 meets the live timeout of 30: not strictly less.
        let want = params(&[("interval", FieldValue::from(30))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert!(diff.compare("interval").is_err());
    }

    #[test]
    fn test_interval_change() {
        let want = params(&[("interval", FieldValue::from(15))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(
            diff.compare("interval").unwrap(),
            Some(FieldValue::Integer(15))
        );
    }

    #[test]
    fn test_parent_same_is_no_change() {
        let want = params(&[("parent", FieldValue::from("snmp_dca"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(diff.compare("parent").unwrap(), None);
    }

    #[test]
    fn test_parent_change_rejected() {
        let want = params(&[("parent", FieldValue::from("snmp_dca_custom"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        let err = diff.compare("parent").unwrap_err();
        assert!(matches!(err, MonitorError::ConstraintViolation { .. }));
        assert!(err.to_string().contains("parent"));
    }

    #[test]
    fn test_ip_skipped_when_unset() {
        let want = MonitorParams::new(HashMap::new());
        let have = params(&[("destination", FieldValue::from("10.0.0.1"))]);
        let diff = Difference::new(&want, Some(&have));
        assert_eq!(diff.compare("ip").unwrap(), None);
    }

    #[test]
    fn test_no_live_state_returns_desired() {
        let want = params(&[("community", FieldValue::from("secret"))]);
        let diff = Difference::new(&want, None);
        assert_eq!(
            diff.compare("community").unwrap(),
            Some(FieldValue::String("secret".into()))
        );
    }

    #[test]
    fn test_invalid_desired_value_surfaces_field() {
        let want = params(&[("interval", FieldValue::from("soon"))]);
        let have = live();
        let diff = Difference::new(&want, Some(&have));
        let err = diff.compare("interval").unwrap_err();
        assert!(matches!(err, MonitorError::InvalidValue { .. }));
    }
}
