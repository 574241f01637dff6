//! Diff command - reconcile two identifier sets

use std::collections::BTreeSet;

use gwsync::core::services::reconcile;
use gwsync::output::{DiffResult, OutputMode};

/// Print what must be added and removed to turn `existing` into `wanted`
pub fn diff(wanted: &[String], existing: &[String], mode: OutputMode) -> anyhow::Result<()> {
    let to_set = |ids: &[String]| -> BTreeSet<String> {
        ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()).map(String::from).collect()
    };
    let plan = reconcile(&to_set(wanted), &to_set(existing));

    DiffResult {
        to_add: plan.to_add.into_iter().collect(),
        to_remove: plan.to_remove.into_iter().collect(),
        unchanged: plan.unchanged.into_iter().collect(),
    }
    .render(mode);
    Ok(())
}
