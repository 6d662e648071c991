//! # Seatwise Testing
//!
//! Testing utilities and helpers for the Seatwise reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: effect assertions
//! - [`run_effects`]: executes effects and collects the actions they feed back
//! - [`init_test_tracing`]: routes `tracing` output through the test harness
//!
//! ## Example
//!
//! ```ignore
//! use seatwise_testing::ReducerTest;
//!
//! ReducerTest::new(SeatReducer::new())
//!     .with_env(test_environment())
//!     .given_state(SeatState::fresh())
//!     .when_action(SeatAction::ClearSelection)
//!     .then_state(|state| assert_eq!(state.grid.summary().selected, 0))
//!     .run();
//! ```

mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

use seatwise_core::effect::Effect;

/// Execute effects in order and collect the actions they produce
///
/// Mirrors what the runtime store does with a reducer's effects, without
/// feeding the actions back into a reducer.
pub fn run_effects<A, I>(effects: I) -> Vec<A>
where
    I: IntoIterator<Item = Effect<A>>,
{
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::None => None,
            Effect::Run(thunk) => thunk(),
        })
        .collect()
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .try_init();
}
