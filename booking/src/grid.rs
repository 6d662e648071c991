//! The seat grid: canonical state holder and query surface.
//!
//! A [`Grid`] is an immutable snapshot. Every transition returns a new grid;
//! rows that did not change are shared with the previous snapshot through
//! `Arc<[Seat]>`, and nothing can mutate a snapshot once it has been handed
//! out.

use crate::error::GridError;
use crate::types::{PriceTier, ROWS, SEATS_PER_ROW, Seat, SeatId, SeatPosition, SeatStatus};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Tier price for a row index
///
/// # Errors
///
/// [`GridError::InvalidRow`] when `row` is outside the grid.
pub fn price_for_row(row: usize) -> Result<u32, GridError> {
    PriceTier::for_row(row).map(PriceTier::unit_price)
}

/// Derived counts and the running total, as shown by a renderer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GridSummary {
    /// Seats free to select
    pub available: usize,
    /// Seats in the current selection
    pub selected: usize,
    /// Confirmed seats
    pub booked: usize,
    /// Price of the current selection
    pub total_price: u32,
}

/// Immutable 8x10 snapshot of the venue, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Arc<[Seat]>>,
}

impl Grid {
    /// Fresh grid with every seat Available
    #[must_use]
    pub fn initialize() -> Self {
        let rows = (0..ROWS)
            .map(|row| {
                (0..SEATS_PER_ROW)
                    .map(|column| Seat::new(SeatPosition::new(row, column), SeatStatus::Available))
                    .collect::<Arc<[Seat]>>()
            })
            .collect();
        Self { rows }
    }

    /// Rows front to back
    pub fn rows(&self) -> impl Iterator<Item = &[Seat]> {
        self.rows.iter().map(|row| &**row)
    }

    /// All seats in row-major order
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// The seat at a position
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] when the position is off the grid.
    pub fn seat(&self, position: SeatPosition) -> Result<&Seat, GridError> {
        self.rows
            .get(position.row)
            .and_then(|row| row.get(position.column))
            .ok_or(GridError::OutOfBounds {
                row: position.row,
                column: position.column,
            })
    }

    /// Number of seats with the given status
    #[must_use]
    pub fn count_by_status(&self, status: SeatStatus) -> usize {
        self.seats().filter(|seat| seat.status() == status).count()
    }

    /// Sum of tier prices over every Selected seat
    #[must_use]
    pub fn total_price(&self) -> u32 {
        self.seats()
            .filter(|seat| seat.status() == SeatStatus::Selected)
            .map(|seat| seat.price_tier().unit_price())
            .sum()
    }

    /// Positions of the Selected seats, row-major
    #[must_use]
    pub fn selected_positions(&self) -> Vec<SeatPosition> {
        self.seats()
            .filter(|seat| seat.status() == SeatStatus::Selected)
            .map(Seat::position)
            .collect()
    }

    /// Identifiers of the Booked seats, row-major
    #[must_use]
    pub fn booked_ids(&self) -> Vec<SeatId> {
        self.seats()
            .filter(|seat| seat.status() == SeatStatus::Booked)
            .map(Seat::id)
            .collect()
    }

    /// Counts and total in one scan
    #[must_use]
    pub fn summary(&self) -> GridSummary {
        self.seats().fold(GridSummary::default(), |mut summary, seat| {
            match seat.status() {
                SeatStatus::Available => summary.available += 1,
                SeatStatus::Selected => {
                    summary.selected += 1;
                    summary.total_price += seat.price_tier().unit_price();
                },
                SeatStatus::Booked => summary.booked += 1,
            }
            summary
        })
    }

    /// New snapshot with one seat's status replaced
    ///
    /// No policy is applied here; callers go through the policy engine.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] when the position is off the grid.
    pub fn apply_status(&self, position: SeatPosition, status: SeatStatus) -> Result<Self, GridError> {
        self.seat(position)?;
        Ok(self.remap(|seat| (seat.position() == position).then_some(status)))
    }

    /// New snapshot with persisted bookings restored
    ///
    /// Only Available seats whose identifier is in `ids` become Booked;
    /// unknown identifiers and Selected or Booked seats are left alone.
    #[must_use]
    pub fn merge_booked_ids(&self, ids: &BTreeSet<SeatId>) -> Self {
        if ids.is_empty() {
            return self.clone();
        }
        self.remap(|seat| {
            (seat.status() == SeatStatus::Available && ids.contains(&seat.id()))
                .then_some(SeatStatus::Booked)
        })
    }

    /// Rebuilds only the rows where `change` yields a different status
    pub(crate) fn remap<F>(&self, change: F) -> Self
    where
        F: Fn(&Seat) -> Option<SeatStatus>,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let touched = row
                    .iter()
                    .any(|seat| change(seat).is_some_and(|status| status != seat.status()));
                if !touched {
                    return Arc::clone(row);
                }
                row.iter()
                    .map(|seat| change(seat).map_or(*seat, |status| seat.with_status(status)))
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::initialize()
    }
}
