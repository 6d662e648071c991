//! # Seatwise Booking
//!
//! Seat reservation engine for a fixed 8x10 single-screen venue.
//!
//! ## Components
//!
//! - [`grid`]: immutable seat grid snapshots and read queries
//! - [`policy`]: pure validation of toggles, booking quotes and commits
//! - [`store`]: persistence of the booked-seat set through a key-value backend
//! - [`reducer`]: [`SeatReducer`] wiring policy, prompts and persistence into effects
//! - [`environment`]: injected collaborators (confirmation prompts, storage)
//! - [`config`]: environment-variable configuration for the binary
//! - [`display`]: plain-text rendering of a snapshot
//!
//! ## Example
//!
//! ```
//! use seatwise_booking::environment::mocks::ScriptedConfirmation;
//! use seatwise_booking::{
//!     BookingEnvironment, BookingStore, InMemoryStore, SeatAction, SeatPosition, SeatReducer,
//!     SeatState, SeatStatus,
//! };
//! use seatwise_runtime::Store;
//! use std::sync::Arc;
//!
//! let env = BookingEnvironment::new(
//!     Arc::new(ScriptedConfirmation::accepting()),
//!     BookingStore::new(Arc::new(InMemoryStore::new())),
//! );
//! let mut store = Store::new(SeatState::fresh(), SeatReducer::new(), env);
//!
//! store.send(SeatAction::ToggleSeat { position: SeatPosition::new(0, 0) })?;
//! store.send(SeatAction::BookSelected)?;
//!
//! let booked = store.state(|s| s.grid.count_by_status(SeatStatus::Booked));
//! assert_eq!(booked, 1);
//! # Ok::<(), seatwise_runtime::StoreError>(())
//! ```

pub mod config;
pub mod display;
pub mod environment;
pub mod error;
pub mod grid;
pub mod policy;
pub mod reducer;
pub mod store;
pub mod types;

pub use config::Config;
pub use environment::{BookingEnvironment, Confirmation};
pub use error::{ConfigError, GridError, PersistenceError};
pub use grid::{Grid, GridSummary, price_for_row};
pub use policy::{BookingQuote, Decision, PolicyEngine, Rejection};
pub use reducer::{SeatAction, SeatReducer, SeatState};
pub use store::{BookingStore, FileStore, InMemoryStore, KeyValueStore, STORAGE_KEY};
pub use types::{
    MAX_SEATS_PER_BOOKING, PriceTier, ROWS, SEATS_PER_ROW, Seat, SeatId, SeatPosition, SeatStatus,
    TOTAL_SEATS,
};
