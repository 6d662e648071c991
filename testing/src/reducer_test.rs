//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use seatwise_core::{effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Type alias for feedback assertion functions
type FeedbackAssertion<A> = Box<dyn FnOnce(&[A])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Effect assertions see the effects as returned. Feedback assertions run
/// after that: every `Effect::Run` is executed and the actions it produced
/// are handed to the assertion, so collaborators in the environment are
/// exercised exactly once.
///
/// # Example
///
/// ```ignore
/// use seatwise_testing::ReducerTest;
///
/// ReducerTest::new(SeatReducer::new())
///     .with_env(env)
///     .given_state(SeatState::fresh())
///     .when_action(SeatAction::BookSelected)
///     .then_feedback(|actions| {
///         assert!(matches!(actions, [SeatAction::BookingConfirmed { .. }]));
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
    feedback_assertions: Vec<FeedbackAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
            feedback_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the actions the effects feed back (Then)
    #[must_use]
    pub fn then_feedback<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[A]) + 'static,
    {
        self.feedback_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let effects = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }

        if self.feedback_assertions.is_empty() {
            return;
        }

        let feedback = crate::run_effects(effects);
        for assertion in self.feedback_assertions {
            assertion(&feedback);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use seatwise_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect other than `Effect::None` is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one `Run` effect
    ///
    /// # Panics
    ///
    /// Panics if no `Run` effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_run_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::Run(_))),
            "Expected at least one Run effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatwise_core::{SmallVec, smallvec};

    #[derive(Clone, Debug, Default)]
    struct Door {
        inside: Vec<String>,
        turned_away: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum DoorAction {
        Arrive(String),
        TurnedAway(String),
    }

    struct DoorReducer;

    struct DoorEnv {
        capacity: usize,
    }

    impl Reducer for DoorReducer {
        type State = Door;
        type Action = DoorAction;
        type Environment = DoorEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                DoorAction::Arrive(guest) if state.inside.len() < env.capacity => {
                    state.inside.push(guest);
                    smallvec![Effect::None]
                },
                DoorAction::Arrive(guest) => {
                    smallvec![Effect::run(move || Some(DoorAction::TurnedAway(guest)))]
                },
                DoorAction::TurnedAway(guest) => {
                    state.turned_away.push(guest);
                    smallvec![]
                },
            }
        }
    }

    fn door_with(guests: &[&str]) -> Door {
        Door {
            inside: guests.iter().map(ToString::to_string).collect(),
            turned_away: Vec::new(),
        }
    }

    #[test]
    fn test_state_changes_without_effects() {
        ReducerTest::new(DoorReducer)
            .with_env(DoorEnv { capacity: 2 })
            .given_state(door_with(&["ada"]))
            .when_action(DoorAction::Arrive("grace".to_string()))
            .then_state(|door| {
                assert_eq!(door.inside, vec!["ada".to_string(), "grace".to_string()]);
                assert!(door.turned_away.is_empty());
            })
            .then_effects(|effects| {
                assertions::assert_no_effects(effects);
            })
            .run();
    }

    #[test]
    fn test_feedback_runs_the_effect() {
        ReducerTest::new(DoorReducer)
            .with_env(DoorEnv { capacity: 1 })
            .given_state(door_with(&["ada"]))
            .when_action(DoorAction::Arrive("linus".to_string()))
            .then_state(|door| {
                assert_eq!(door.inside.len(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_has_run_effect(effects);
                assertions::assert_effects_count(effects, 1);
            })
            .then_feedback(|actions| {
                assert_eq!(actions, &[DoorAction::TurnedAway("linus".to_string())]);
            })
            .run();
    }

    #[test]
    fn test_empty_feedback_for_events() {
        ReducerTest::new(DoorReducer)
            .with_env(DoorEnv { capacity: 0 })
            .given_state(Door::default())
            .when_action(DoorAction::TurnedAway("linus".to_string()))
            .then_state(|door| {
                assert_eq!(door.turned_away, vec!["linus".to_string()]);
            })
            .then_feedback(|actions| {
                assert!(actions.is_empty());
            })
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<DoorAction>(&[Effect::None]);
        assertions::assert_no_effects::<DoorAction>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<DoorAction>::None], 1);
        assertions::assert_effects_count::<DoorAction>(&[], 0);
    }
}
