//! Plain-text rendering of a grid snapshot.
//!
//! Read-only: the renderer consumes a [`Grid`] and its [`GridSummary`] and
//! never decides anything about seats.

use crate::grid::Grid;
use crate::types::{CURRENCY_SYMBOL, PriceTier, SEATS_PER_ROW, SeatStatus, row_letter};
use std::fmt;

/// Cell marker for a status
#[must_use]
pub const fn marker(status: SeatStatus) -> char {
    match status {
        SeatStatus::Available => 'o',
        SeatStatus::Selected => '*',
        SeatStatus::Booked => 'x',
    }
}

/// One-line tier price note, e.g. `Premium (A-C): ₹1000 | ...`
#[must_use]
pub fn price_note() -> String {
    PriceTier::ALL
        .iter()
        .map(|tier| {
            let (first, last) = tier.rows();
            let first = row_letter(first).unwrap_or('?');
            let last = row_letter(last).unwrap_or('?');
            format!("{tier} ({first}-{last}): {CURRENCY_SYMBOL}{}", tier.unit_price())
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Display adapter over a snapshot
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a>(pub &'a Grid);

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0.summary();

        writeln!(
            f,
            "Available: {} | Selected: {} | Booked: {}",
            summary.available, summary.selected, summary.booked
        )?;
        writeln!(
            f,
            "Legend: {} Available  {} Selected  {} Booked",
            marker(SeatStatus::Available),
            marker(SeatStatus::Selected),
            marker(SeatStatus::Booked)
        )?;
        writeln!(f)?;

        write!(f, "   ")?;
        for number in 1..=SEATS_PER_ROW {
            write!(f, "{number:>3}")?;
        }
        writeln!(f)?;

        for (row, seats) in self.0.rows().enumerate() {
            write!(f, "{:>2} ", row_letter(row).unwrap_or('?'))?;
            for seat in seats {
                write!(f, "{:>3}", marker(seat.status()))?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Selected Seats Total: {CURRENCY_SYMBOL}{}", summary.total_price)?;
        write!(f, "{}", price_note())
    }
}

/// Renders the summary panel, legend, seat map and price panel
#[must_use]
pub fn render(grid: &Grid) -> String {
    GridView(grid).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::types::SeatPosition;

    #[test]
    fn test_price_note() {
        assert_eq!(
            price_note(),
            "Premium (A-C): ₹1000 | Standard (D-F): ₹750 | Economy (G-H): ₹500"
        );
    }

    #[test]
    fn test_render_fresh_grid() {
        let rendered = render(&Grid::initialize());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Available: 80 | Selected: 0 | Booked: 0");
        assert_eq!(lines[3], "     1  2  3  4  5  6  7  8  9 10");
        assert_eq!(lines[4], " A   o  o  o  o  o  o  o  o  o  o");
        assert_eq!(lines[11], " H   o  o  o  o  o  o  o  o  o  o");
        assert!(rendered.contains("Selected Seats Total: ₹0"));
    }

    #[test]
    fn test_render_marks_statuses() -> Result<(), GridError> {
        let grid = Grid::initialize()
            .apply_status(SeatPosition::new(0, 0), SeatStatus::Selected)?
            .apply_status(SeatPosition::new(0, 9), SeatStatus::Booked)?;

        let rendered = render(&grid);

        assert!(rendered.contains(" A   *  o  o  o  o  o  o  o  o  x"));
        assert!(rendered.starts_with("Available: 78 | Selected: 1 | Booked: 1"));
        assert!(rendered.contains("Selected Seats Total: ₹1000"));
        Ok(())
    }
}
