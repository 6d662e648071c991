//! # Seatwise Runtime
//!
//! Synchronous runtime for the Seatwise reducer architecture.
//!
//! ## Core Components
//!
//! - **Store**: Owns the current state, runs the reducer and executes effects
//! - **Feedback Loop**: Actions produced by effects are queued and reduced in
//!   FIFO order until the queue drains
//!
//! There is exactly one writer: `send` takes `&mut self`, so no lock guards
//! the state and no action observes a half-applied transition.
//!
//! ## Example
//!
//! ```ignore
//! use seatwise_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use seatwise_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Metric names recorded by the store
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured limit
        ///
        /// The state reflects every action processed before the limit was
        /// reached; the remaining queued actions are dropped.
        #[error("Feedback loop exceeded {limit} actions in a single send")]
        FeedbackLimitExceeded {
            /// The configured `max_actions_per_send`
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on actions reduced by one `send`, counting the initial action
    pub max_actions_per_send: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_actions_per_send: usize) -> Self {
        Self {
            max_actions_per_send,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_actions_per_send(mut self, limit: usize) -> Self {
        self.max_actions_per_send = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_actions_per_send: 64,
        }
    }
}

/// Store module - the runtime coordinator
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};
    use crate::metrics::{
        ACTIONS_PROCESSED, EFFECTS_EXECUTED, FEEDBACK_ACTIONS, FEEDBACK_LIMIT_HITS, counter,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, replaced by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces the action, executes the returned effects in order, and
        /// keeps reducing any actions those effects produce until none are left.
        ///
        /// Returns the number of actions reduced, the initial one included.
        ///
        /// # Errors
        ///
        /// [`StoreError::FeedbackLimitExceeded`] when more than
        /// `max_actions_per_send` actions would be reduced.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut processed = 0usize;

            while let Some(action) = queue.pop_front() {
                if processed >= self.config.max_actions_per_send {
                    counter!(FEEDBACK_LIMIT_HITS).increment(1);
                    tracing::error!(
                        limit = self.config.max_actions_per_send,
                        dropped = queue.len() + 1,
                        "Feedback loop limit reached, dropping queued actions"
                    );
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_actions_per_send,
                    });
                }

                processed += 1;
                counter!(ACTIONS_PROCESSED).increment(1);

                let effects = self
                    .reducer
                    .reduce(&mut self.state, action, &self.environment);

                for effect in effects {
                    if let Some(next) = Self::execute_effect(effect) {
                        counter!(FEEDBACK_ACTIONS).increment(1);
                        queue.push_back(next);
                    }
                }
            }

            tracing::trace!(processed, "Action queue drained");
            Ok(processed)
        }

        /// Read the current state through a closure
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Consume the store and return its final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        fn execute_effect(effect: Effect<A>) -> Option<A> {
            counter!(EFFECTS_EXECUTED, "type" => effect.kind()).increment(1);
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    None
                },
                Effect::Run(thunk) => {
                    tracing::trace!("Executing Effect::Run");
                    thunk()
                },
            }
        }
    }
}

pub use store::Store;
