//! Grouping of raw measurements into per-group mean records.
//!
//! Data-loading stages hand over either ready-made `{group_id, value, n}`
//! records or raw `(group_id, value)` measurements. The latter are folded
//! into [`GroupRecord`]s here, preserving first-seen group order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One group's summary: mean `value` of `n` measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Group identifier (county, district, ...)
    pub group_id: String,
    /// Mean of the group's measurements
    pub value: f64,
    /// Number of measurements behind `value`
    pub n: u32,
}

impl GroupRecord {
    /// Create a record from its parts.
    #[must_use]
    pub fn new(group_id: impl Into<String>, value: f64, n: u32) -> Self {
        Self {
            group_id: group_id.into(),
            value,
            n,
        }
    }
}

/// Fold raw `(group_id, value)` measurements into per-group means.
///
/// Groups appear in the order they are first seen.
///
/// # Example
///
/// ```
/// use conjugate_normal::stats::group_measurements;
///
/// let records = group_measurements(&[("A", 1.0), ("B", 4.0), ("A", 3.0)]);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].group_id, "A");
/// assert_eq!(records[0].n, 2);
/// assert!((records[0].value - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn group_measurements<S: AsRef<str>>(measurements: &[(S, f64)]) -> Vec<GroupRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<(String, f64, u32)> = Vec::new();

    for (id, value) in measurements {
        let id = id.as_ref();
        match index.get(id) {
            Some(&i) => {
                sums[i].1 += value;
                sums[i].2 += 1;
            }
            None => {
                index.insert(id, sums.len());
                sums.push((id.to_string(), *value, 1));
            }
        }
    }

    sums.into_iter()
        .map(|(group_id, sum, n)| GroupRecord {
            group_id,
            value: sum / f64::from(n),
            n,
        })
        .collect()
}
