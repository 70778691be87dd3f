//! Key ordering planner
//!
//! A range scan only prunes on a table's leading key component. To filter on
//! component `p[i]`, a query must run against a duplicate table whose
//! physical key starts with `p[i]`. The planner assigns each component its
//! canonical ordering:
//!
//! - leading component `p[0]`: the declared order, unchanged
//! - any other `p[i]`: `p[i]` moved to the front, the rest keeping their
//!   declared relative order
//!
//! The planner records logical orderings only. Provisioning the duplicate
//! tables is the caller's job.

use std::collections::HashMap;

/// Map each key component to the full ordering that places it first
pub fn plan_pivot_orderings(keys: &[String]) -> HashMap<String, Vec<String>> {
    let mut orderings = HashMap::with_capacity(keys.len());
    for (index, pivot) in keys.iter().enumerate() {
        let mut order = Vec::with_capacity(keys.len());
        order.push(pivot.clone());
        order.extend(
            keys.iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, k)| k.clone()),
        );
        orderings.insert(pivot.clone(), order);
    }
    orderings
}
