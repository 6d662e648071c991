//! Seat reducer: turns user commands into grid snapshots and effects.
//!
//! Commands are validated by the [`PolicyEngine`] against the current
//! snapshot. Anything that needs the outside world (prompts, notifications,
//! storage) is returned as an [`Effect::Run`]; prompts feed their answer back
//! as an event action, which completes the two-phase booking and reset flows.

use crate::environment::BookingEnvironment;
use crate::grid::Grid;
use crate::policy::{BookingQuote, Decision, PolicyEngine, Rejection};
use crate::store::BookingStore;
use crate::types::{SeatId, SeatPosition, SeatStatus};
use seatwise_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::collections::BTreeSet;
use std::sync::Arc;

// ============================================================================
// Actions (Commands + Events)
// ============================================================================

/// Actions for the seat reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatAction {
    // Commands
    /// Read persisted bookings and merge them into the grid
    LoadBookings,
    /// Select an Available seat or release a Selected one
    ToggleSeat {
        /// Seat to toggle
        position: SeatPosition,
    },
    /// Quote the current selection and ask for confirmation
    BookSelected,
    /// Release every Selected seat
    ClearSelection,
    /// Ask for confirmation, then erase every booking
    ResetAll,

    // Events
    /// Persisted bookings were read
    BookingsLoaded {
        /// Identifiers read from storage
        ids: BTreeSet<SeatId>,
    },
    /// The user accepted the booking prompt
    BookingConfirmed {
        /// Quote the user accepted
        quote: BookingQuote,
    },
    /// The user declined the booking prompt
    BookingDeclined {
        /// Quote the user declined
        quote: BookingQuote,
    },
    /// The user accepted the reset prompt
    ResetConfirmed,
    /// The user declined the reset prompt
    ResetDeclined,
}

impl SeatAction {
    /// Check if this is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::LoadBookings
                | Self::ToggleSeat { .. }
                | Self::BookSelected
                | Self::ClearSelection
                | Self::ResetAll
        )
    }

    /// Check if this is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

// ============================================================================
// State
// ============================================================================

/// State owned by the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatState {
    /// Current snapshot
    pub grid: Grid,
    /// Why the most recent command was refused, cleared by the next accepted one
    pub last_rejection: Option<Rejection>,
    /// Quote waiting on the booking prompt
    pub pending_quote: Option<BookingQuote>,
}

impl SeatState {
    /// All seats Available, nothing pending
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            grid: Grid::initialize(),
            last_rejection: None,
            pending_quote: None,
        }
    }
}

impl Default for SeatState {
    fn default() -> Self {
        Self::fresh()
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the seat grid
#[derive(Clone, Copy, Debug, Default)]
pub struct SeatReducer;

impl SeatReducer {
    /// Creates a new `SeatReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn reject(
        state: &mut SeatState,
        rejection: Rejection,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<SeatAction>; 4]> {
        state.last_rejection = Some(rejection);

        let Some(message) = rejection.user_message() else {
            tracing::debug!(%rejection, "Command rejected silently");
            return SmallVec::new();
        };
        tracing::warn!(%rejection, "Command rejected");

        let confirmation = Arc::clone(&env.confirmation);
        smallvec![Effect::run(move || {
            confirmation.notify(message);
            None
        })]
    }

    /// Commits `quote` and returns how many seats actually became Booked
    fn commit(state: &mut SeatState, quote: &BookingQuote) -> usize {
        let before = state.grid.count_by_status(SeatStatus::Booked);
        state.grid = PolicyEngine::commit_booking(&state.grid, quote);
        state.pending_quote = None;
        state.grid.count_by_status(SeatStatus::Booked) - before
    }

    fn persist(grid: &Grid, env: &BookingEnvironment) -> Effect<SeatAction> {
        // Serialized here so the write sees this exact snapshot.
        let payload = BookingStore::serialize(grid);
        let storage = Arc::clone(&env.storage);
        Effect::run(move || {
            if let Err(error) = storage.save(&payload) {
                tracing::warn!(error = %error, "Failed to persist bookings");
            }
            None
        })
    }

    fn toggle(
        state: &mut SeatState,
        position: SeatPosition,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<SeatAction>; 4]> {
        match PolicyEngine::toggle(&state.grid, position) {
            Ok(Decision::Accepted(next)) => {
                state.grid = next;
                state.last_rejection = None;
                tracing::debug!(seat = %position, "Seat toggled");
                SmallVec::new()
            },
            Ok(Decision::Rejected(rejection)) => Self::reject(state, rejection, env),
            Err(error) => {
                tracing::error!(error = %error, "Toggle outside the seat grid");
                SmallVec::new()
            },
        }
    }

    fn book_selected(
        state: &mut SeatState,
        env: &BookingEnvironment,
    ) -> SmallVec<[Effect<SeatAction>; 4]> {
        let selected = state.grid.selected_positions();
        let quote = match PolicyEngine::quote_booking(&state.grid, &selected) {
            Ok(Decision::Accepted(quote)) => quote,
            Ok(Decision::Rejected(rejection)) => return Self::reject(state, rejection, env),
            Err(error) => {
                tracing::error!(error = %error, "Selection could not be priced");
                return SmallVec::new();
            },
        };

        state.last_rejection = None;
        state.pending_quote = Some(quote.clone());
        tracing::debug!(count = quote.count, total_price = quote.total_price, "Booking quoted");

        let confirmation = Arc::clone(&env.confirmation);
        smallvec![Effect::run(move || {
            if confirmation.confirm_booking(quote.count, quote.total_price) {
                Some(SeatAction::BookingConfirmed { quote })
            } else {
                Some(SeatAction::BookingDeclined { quote })
            }
        })]
    }
}

impl Reducer for SeatReducer {
    type State = SeatState;
    type Action = SeatAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            SeatAction::LoadBookings => {
                let storage = Arc::clone(&env.storage);
                smallvec![Effect::run(move || {
                    Some(SeatAction::BookingsLoaded { ids: storage.load() })
                })]
            },

            SeatAction::ToggleSeat { position } => Self::toggle(state, position, env),

            SeatAction::BookSelected => Self::book_selected(state, env),

            SeatAction::ClearSelection => {
                state.grid = PolicyEngine::clear_selection(&state.grid);
                state.last_rejection = None;
                tracing::debug!("Selection cleared");
                SmallVec::new()
            },

            SeatAction::ResetAll => {
                let confirmation = Arc::clone(&env.confirmation);
                smallvec![Effect::run(move || {
                    if confirmation.confirm_reset() {
                        Some(SeatAction::ResetConfirmed)
                    } else {
                        Some(SeatAction::ResetDeclined)
                    }
                })]
            },

            // ========== Events ==========
            SeatAction::BookingsLoaded { ids } => {
                state.grid = state.grid.merge_booked_ids(&ids);
                tracing::info!(
                    persisted = ids.len(),
                    booked = state.grid.booked_ids().len(),
                    "Persisted bookings loaded"
                );
                SmallVec::new()
            },

            SeatAction::BookingConfirmed { quote } => {
                let booked = Self::commit(state, &quote);
                tracing::info!(
                    booked,
                    quoted = quote.count,
                    total_price = quote.total_price,
                    "Seats booked"
                );
                smallvec![Self::persist(&state.grid, env)]
            },

            SeatAction::BookingDeclined { quote } => {
                state.pending_quote = None;
                tracing::debug!(count = quote.count, "Booking declined");
                SmallVec::new()
            },

            SeatAction::ResetConfirmed => {
                *state = SeatState {
                    grid: PolicyEngine::reset(),
                    last_rejection: None,
                    pending_quote: None,
                };
                tracing::info!("All bookings reset");

                let storage = Arc::clone(&env.storage);
                smallvec![Effect::run(move || {
                    if let Err(error) = storage.clear() {
                        tracing::warn!(error = %error, "Failed to clear persisted bookings");
                    }
                    None
                })]
            },

            SeatAction::ResetDeclined => {
                tracing::debug!("Reset declined");
                SmallVec::new()
            },
        }
    }
}
