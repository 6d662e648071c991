//! Booking policy: decides whether a proposed transition is legal.
//!
//! Every function here is pure. A policy rejection is an ordinary value
//! ([`Decision::Rejected`]), never an `Err`; `Err` is reserved for caller
//! contract violations such as positions off the grid.
//!
//! Rules enforced:
//! - Booked seats cannot be toggled.
//! - At most [`MAX_SEATS_PER_BOOKING`] seats may be Selected at once.
//! - A toggle may not leave the toggled seat Available with both immediate
//!   row neighbours Selected or Booked (no single orphan seat).

use crate::error::GridError;
use crate::grid::{Grid, price_for_row};
use crate::types::{MAX_SEATS_PER_BOOKING, SeatPosition, SeatStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a transition was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The seat is already Booked; toggling it is a silent no-op
    SeatAlreadyBooked,
    /// The selection would exceed the per-booking limit
    CapacityExceeded,
    /// The toggle would strand a single Available seat between blockers
    WouldOrphanSeat,
    /// A booking was requested with nothing Selected
    NothingSelected,
}

impl Rejection {
    /// Message to show the user, if this rejection is user-facing
    #[must_use]
    pub const fn user_message(self) -> Option<&'static str> {
        match self {
            Self::CapacityExceeded => {
                Some("You can book a maximum of 8 seats per transaction.")
            },
            Self::WouldOrphanSeat => {
                Some("You cannot leave a single available seat between selected/booked seats.")
            },
            Self::SeatAlreadyBooked | Self::NothingSelected => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeatAlreadyBooked => write!(f, "seat already booked"),
            Self::CapacityExceeded => {
                write!(f, "more than {MAX_SEATS_PER_BOOKING} seats in one booking")
            },
            Self::WouldOrphanSeat => write!(f, "would leave an orphaned seat"),
            Self::NothingSelected => write!(f, "no seats selected"),
        }
    }
}

/// Outcome of a policy check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision<T> {
    /// The transition is legal; carries its result
    Accepted(T),
    /// The transition is refused; the caller keeps its current state
    Rejected(Rejection),
}

impl<T> Decision<T> {
    /// True for [`Decision::Accepted`]
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The accepted value, if any
    #[must_use]
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection reason, if any
    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Price quote for a pending booking, shown to the user before committing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    /// Seats the quote covers, row-major
    pub seats: Vec<SeatPosition>,
    /// Number of seats
    pub count: usize,
    /// Sum of the seats' tier prices
    pub total_price: u32,
}

/// Policy checks over grid snapshots
#[derive(Clone, Copy, Debug, Default)]
pub struct PolicyEngine;

impl PolicyEngine {
    /// Validates toggling one seat between Available and Selected
    ///
    /// On acceptance the decision carries the resulting grid; on rejection the
    /// caller's grid is the one to keep.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] when the position is off the grid.
    pub fn toggle(grid: &Grid, position: SeatPosition) -> Result<Decision<Grid>, GridError> {
        let target = match grid.seat(position)?.status() {
            SeatStatus::Booked => return Ok(Decision::Rejected(Rejection::SeatAlreadyBooked)),
            SeatStatus::Available => SeatStatus::Selected,
            SeatStatus::Selected => SeatStatus::Available,
        };

        if target == SeatStatus::Selected
            && grid.count_by_status(SeatStatus::Selected) >= MAX_SEATS_PER_BOOKING
        {
            return Ok(Decision::Rejected(Rejection::CapacityExceeded));
        }

        let next = grid.apply_status(position, target)?;
        if Self::is_orphaned(&next, position)? {
            return Ok(Decision::Rejected(Rejection::WouldOrphanSeat));
        }

        Ok(Decision::Accepted(next))
    }

    /// True when the seat is Available and both immediate row neighbours block
    ///
    /// Seats at either end of a row have a missing neighbour and are never
    /// orphaned.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] when the position is off the grid.
    pub fn is_orphaned(grid: &Grid, position: SeatPosition) -> Result<bool, GridError> {
        if grid.seat(position)?.status() != SeatStatus::Available {
            return Ok(false);
        }
        let (Some(left), Some(right)) = (position.left(), position.right()) else {
            return Ok(false);
        };
        Ok(grid.seat(left)?.status().is_blocking() && grid.seat(right)?.status().is_blocking())
    }

    /// Validates a booking request and prices it
    ///
    /// `selected` is normally `grid.selected_positions()`; it is re-validated
    /// against the limit regardless of how it was gathered.
    ///
    /// # Errors
    ///
    /// - [`GridError::OutOfBounds`] when a position is off the grid
    /// - [`GridError::InvalidRow`] when a row has no price tier
    pub fn quote_booking(
        grid: &Grid,
        selected: &[SeatPosition],
    ) -> Result<Decision<BookingQuote>, GridError> {
        if selected.is_empty() {
            return Ok(Decision::Rejected(Rejection::NothingSelected));
        }
        if selected.len() > MAX_SEATS_PER_BOOKING {
            return Ok(Decision::Rejected(Rejection::CapacityExceeded));
        }

        let mut total_price = 0;
        for position in selected {
            grid.seat(*position)?;
            total_price += price_for_row(position.row)?;
        }

        Ok(Decision::Accepted(BookingQuote {
            seats: selected.to_vec(),
            count: selected.len(),
            total_price,
        }))
    }

    /// Promotes the quoted seats that are still Selected to Booked
    ///
    /// Seats whose status changed since the quote are left as they are.
    #[must_use]
    pub fn commit_booking(grid: &Grid, quote: &BookingQuote) -> Grid {
        grid.remap(|seat| {
            (seat.status() == SeatStatus::Selected && quote.seats.contains(&seat.position()))
                .then_some(SeatStatus::Booked)
        })
    }

    /// Returns every Selected seat to Available
    #[must_use]
    pub fn clear_selection(grid: &Grid) -> Grid {
        grid.remap(|seat| (seat.status() == SeatStatus::Selected).then_some(SeatStatus::Available))
    }

    /// A fresh grid; the caller also erases persisted bookings
    #[must_use]
    pub fn reset() -> Grid {
        Grid::initialize()
    }
}
