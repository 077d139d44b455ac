//! Pre/post capture page conditioning.
//!
//! Captures need transient page mutations for stable pixels: scrollbars
//! hidden, optionally animations and the caret suppressed, optionally
//! fixed-position elements pinned. [`before_screenshot`] applies every
//! enabled mutation and records the previous values;
//! [`after_screenshot`] reverses exactly what was applied, in reverse
//! order, and is safe to call again after a successful restore.
//!
//! Callers invoke the restore on every exit path, including error exits;
//! the capture engines treat it as mandatory cleanup, not best effort.

use tracing::debug;

use crate::error::Result;
use crate::options::ScreenshotOptions;
use crate::probe::{Probe, StyleTarget, bounded};

// ============================================================================
// ConditioningState
// ============================================================================

/// One style mutation applied by [`before_screenshot`].
#[derive(Debug, Clone)]
struct AppliedStyle {
    target: StyleTarget,
    property: String,
    previous: String,
}

/// Record of every mutation applied to the page, consumed by the
/// matching [`after_screenshot`].
///
/// Created at capture start, drained exactly once by the restore.
/// Never persisted.
#[derive(Debug)]
pub struct ConditioningState {
    mutations: Vec<AppliedStyle>,
    timeout_ms: u64,
}

impl ConditioningState {
    /// Returns the number of mutations not yet restored.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.mutations.len()
    }

    /// Returns `true` once every mutation has been restored.
    #[inline]
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.mutations.is_empty()
    }
}

// ============================================================================
// before_screenshot
// ============================================================================

/// Applies every enabled conditioning mutation.
///
/// Mutations are applied in a fixed order (scrollbars, animations,
/// fixed elements) and each previous value is recorded in the returned
/// state. If a mutation fails partway, the ones already applied are
/// rolled back before the error propagates.
pub async fn before_screenshot(
    probe: &dyn Probe,
    options: &ScreenshotOptions,
) -> Result<ConditioningState> {
    let mut planned: Vec<(StyleTarget, &str, &str)> = Vec::new();

    if options.hide_scrollbars {
        planned.push((StyleTarget::Document, "overflow", "hidden"));
    }
    if options.disable_animations {
        planned.push((StyleTarget::Document, "animation", "none"));
        planned.push((StyleTarget::Document, "transition", "none"));
        planned.push((StyleTarget::Document, "caret-color", "transparent"));
    }
    if options.freeze_fixed_elements {
        planned.push((StyleTarget::FixedElements, "position", "absolute"));
    }

    let mut state = ConditioningState {
        mutations: Vec::with_capacity(planned.len()),
        timeout_ms: options.remote_timeout_ms,
    };

    for (target, property, value) in planned {
        let applied = bounded(
            "apply conditioning",
            state.timeout_ms,
            probe.mutate_style(target, property, value),
        )
        .await;

        match applied {
            Ok(previous) => {
                debug!(?target, property, value, previous = %previous, "Applied conditioning");
                state.mutations.push(AppliedStyle {
                    target,
                    property: property.to_string(),
                    previous,
                });
            }
            Err(e) => {
                let _ = after_screenshot(probe, &mut state).await;
                return Err(e);
            }
        }
    }

    Ok(state)
}

// ============================================================================
// after_screenshot
// ============================================================================

/// Restores every mutation recorded in `state`, in reverse order.
///
/// Idempotent: once the state is drained, calling again is a no-op.
/// If a restore round-trip fails, the failed mutation stays in the
/// state so a retry can pick it up, and the error propagates.
pub async fn after_screenshot(probe: &dyn Probe, state: &mut ConditioningState) -> Result<()> {
    while let Some(mutation) = state.mutations.pop() {
        let restored = bounded(
            "restore conditioning",
            state.timeout_ms,
            probe.mutate_style(mutation.target, &mutation.property, &mutation.previous),
        )
        .await;

        if let Err(e) = restored {
            state.mutations.push(mutation);
            return Err(e);
        }

        debug!(
            target = ?mutation.target,
            property = %mutation.property,
            previous = %mutation.previous,
            "Restored conditioning"
        );
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
