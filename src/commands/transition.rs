//! Transition command - show the lifecycle calls between two states

use gwsync::core::models::LifecycleState;
use gwsync::core::services::plan_transition;
use gwsync::output::{OutputMode, TransitionResult};

/// Print the calls needed to move a frontend from one state to another
pub fn transition(from: &str, to: &str, mode: OutputMode) -> anyhow::Result<()> {
    let from: LifecycleState = from.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let to: LifecycleState = to.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    TransitionResult {
        from: from.to_string(),
        to: to.to_string(),
        operations: plan_transition(from, to).iter().map(ToString::to_string).collect(),
    }
    .render(mode);
    Ok(())
}
