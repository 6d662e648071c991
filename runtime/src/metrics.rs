//! Metric names and descriptions recorded by the [`Store`](crate::store::Store).
//!
//! Counters go through the `metrics` facade. Nothing is recorded unless the
//! embedding application installs a recorder.

use metrics::describe_counter;

// Re-export metrics macros for use in other modules
pub use metrics::counter;

/// Actions run through a reducer, including feedback actions.
pub const ACTIONS_PROCESSED: &str = "store.actions.processed";

/// Effects executed, labelled with `type` = effect kind.
pub const EFFECTS_EXECUTED: &str = "store.effects.executed";

/// Actions fed back into the store by effects.
pub const FEEDBACK_ACTIONS: &str = "store.actions.feedback";

/// `send` calls aborted by the feedback limit.
pub const FEEDBACK_LIMIT_HITS: &str = "store.feedback.limit_exceeded";

/// Register all metric descriptions.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn describe_metrics() {
    describe_counter!(
        ACTIONS_PROCESSED,
        "Total number of actions processed by the reducer"
    );
    describe_counter!(EFFECTS_EXECUTED, "Total number of effects executed");
    describe_counter!(
        FEEDBACK_ACTIONS,
        "Total number of actions produced by effects and fed back"
    );
    describe_counter!(
        FEEDBACK_LIMIT_HITS,
        "Total number of sends aborted by the feedback limit"
    );
}
