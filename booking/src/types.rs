//! Domain types for the seat reservation engine.
//!
//! Value objects for seats, their positions and identifiers, statuses and
//! price tiers, plus the fixed venue constants.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Venue constants
// ============================================================================

/// Number of rows in the venue
pub const ROWS: usize = 8;

/// Number of seats in every row
pub const SEATS_PER_ROW: usize = 10;

/// Total seats in the venue
pub const TOTAL_SEATS: usize = ROWS * SEATS_PER_ROW;

/// Most seats a single booking may hold
pub const MAX_SEATS_PER_BOOKING: usize = 8;

/// Currency symbol used in prompts and the rendered price panel
pub const CURRENCY_SYMBOL: &str = "₹";

/// Display letters for rows, front to back
const ROW_LETTERS: [char; ROWS] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Display letter for a row index, `None` outside the grid
#[must_use]
pub const fn row_letter(row: usize) -> Option<char> {
    if row < ROWS { Some(ROW_LETTERS[row]) } else { None }
}

// ============================================================================
// Seat status
// ============================================================================

/// Reservation status of a single seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    /// Free to select
    Available,
    /// Held in the current, unconfirmed selection
    Selected,
    /// Confirmed reservation; only a full reset frees it
    Booked,
}

impl SeatStatus {
    /// Selected and Booked seats both block their neighbours for the continuity rule
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Selected | Self::Booked)
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Selected => write!(f, "selected"),
            Self::Booked => write!(f, "booked"),
        }
    }
}

// ============================================================================
// Price tiers
// ============================================================================

/// Pricing category, determined by row alone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    /// Rows A-C
    Premium,
    /// Rows D-F
    Standard,
    /// Rows G-H
    Economy,
}

impl PriceTier {
    /// All tiers, front of house first
    pub const ALL: [Self; 3] = [Self::Premium, Self::Standard, Self::Economy];

    /// Tier for a row index
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidRow`] when `row` is outside the grid.
    pub const fn for_row(row: usize) -> Result<Self, GridError> {
        match row {
            0..=2 => Ok(Self::Premium),
            3..=5 => Ok(Self::Standard),
            6..=7 => Ok(Self::Economy),
            _ => Err(GridError::InvalidRow(row)),
        }
    }

    /// Unit price in rupees
    #[must_use]
    pub const fn unit_price(self) -> u32 {
        match self {
            Self::Premium => 1000,
            Self::Standard => 750,
            Self::Economy => 500,
        }
    }

    /// First and last row index covered by the tier
    #[must_use]
    pub const fn rows(self) -> (usize, usize) {
        match self {
            Self::Premium => (0, 2),
            Self::Standard => (3, 5),
            Self::Economy => (6, 7),
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Premium => write!(f, "Premium"),
            Self::Standard => write!(f, "Standard"),
            Self::Economy => write!(f, "Economy"),
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Zero-based grid coordinates of a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatPosition {
    /// Row index, 0 at the front
    pub row: usize,
    /// Column index, 0 on the left
    pub column: usize,
}

impl SeatPosition {
    /// Creates a position; bounds are checked by the grid operations
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// True when the position lies on the fixed grid
    #[must_use]
    pub const fn is_in_bounds(self) -> bool {
        self.row < ROWS && self.column < SEATS_PER_ROW
    }

    /// Persisted identifier, `"<row>-<column>"`
    #[must_use]
    pub fn id(self) -> SeatId {
        SeatId::from(self)
    }

    /// Neighbour to the left in the same row, if any
    #[must_use]
    pub const fn left(self) -> Option<Self> {
        if self.column == 0 {
            None
        } else {
            Some(Self::new(self.row, self.column - 1))
        }
    }

    /// Neighbour to the right in the same row, if any
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        if self.column + 1 >= SEATS_PER_ROW {
            None
        } else {
            Some(Self::new(self.row, self.column + 1))
        }
    }

    /// Human label: row letter plus one-based seat number, e.g. `A1`
    ///
    /// Positions off the grid fall back to their identifier form.
    #[must_use]
    pub fn label(self) -> String {
        match row_letter(self.row) {
            Some(letter) if self.is_in_bounds() => format!("{letter}{}", self.column + 1),
            _ => self.id().into_string(),
        }
    }

    /// Parses a label such as `A1`, `d7` or `H10`
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidLabel`] if the text is not a letter followed by a number
    /// - [`GridError::OutOfBounds`] if the label names a seat off the grid
    pub fn from_label(label: &str) -> Result<Self, GridError> {
        let trimmed = label.trim();
        let invalid = || GridError::InvalidLabel(trimmed.to_string());

        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(invalid());
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: usize = digits.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }

        let row = usize::from(letter as u8 - b'A');
        let position = Self::new(row, number - 1);
        if !position.is_in_bounds() {
            return Err(GridError::OutOfBounds {
                row: position.row,
                column: position.column,
            });
        }
        Ok(position)
    }
}

impl fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Persisted seat identifier
///
/// Well-formed identifiers are `"<row>-<column>"`, but values read back from
/// storage are kept verbatim; identifiers that name no seat are ignored when
/// merged into a grid.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Borrow the identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the identifier text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<SeatPosition> for SeatId {
    fn from(position: SeatPosition) -> Self {
        Self(format!("{}-{}", position.row, position.column))
    }
}

impl From<String> for SeatId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SeatId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Seat
// ============================================================================

/// One bookable seat
///
/// Only the status changes over a seat's life; position, identifier and tier
/// are fixed (the last two derived from the position on demand).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seat {
    position: SeatPosition,
    status: SeatStatus,
}

impl Seat {
    pub(crate) const fn new(position: SeatPosition, status: SeatStatus) -> Self {
        Self { position, status }
    }

    /// Grid coordinates
    #[must_use]
    pub const fn position(&self) -> SeatPosition {
        self.position
    }

    /// Row index
    #[must_use]
    pub const fn row(&self) -> usize {
        self.position.row
    }

    /// Column index
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> SeatStatus {
        self.status
    }

    /// Persisted identifier
    #[must_use]
    pub fn id(&self) -> SeatId {
        self.position.id()
    }

    /// Price tier of the seat's row
    ///
    /// Seats only exist inside the grid, so every row has a tier.
    #[must_use]
    pub fn price_tier(&self) -> PriceTier {
        PriceTier::for_row(self.position.row).unwrap_or(PriceTier::Economy)
    }

    pub(crate) const fn with_status(self, status: SeatStatus) -> Self {
        Self {
            position: self.position,
            status,
        }
    }
}
