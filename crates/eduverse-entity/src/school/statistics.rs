//! School statistics projection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counts for a school, recomputed on demand.
///
/// A read-only projection over current active rows; never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolStatistics {
    /// Active user count per role name.
    pub users_by_role: BTreeMap<String, i64>,
    /// Number of active subjects.
    pub subject_count: i64,
    /// Number of active class groups.
    pub class_count: i64,
    /// Payment counts by status.
    pub payments_by_status: BTreeMap<String, i64>,
}
