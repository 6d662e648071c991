//! Property tests for the booking policy over random command sequences.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use seatwise_booking::{
    Decision, Grid, MAX_SEATS_PER_BOOKING, PolicyEngine, ROWS, Rejection, SEATS_PER_ROW,
    SeatPosition, SeatStatus, TOTAL_SEATS,
};

// =============================================================================
// Strategies
// =============================================================================

#[derive(Clone, Copy, Debug)]
enum Op {
    Toggle(SeatPosition),
    Book,
    Clear,
}

fn arb_position() -> impl Strategy<Value = SeatPosition> {
    (0..ROWS, 0..SEATS_PER_ROW).prop_map(|(row, column)| SeatPosition::new(row, column))
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => arb_position().prop_map(Op::Toggle),
        1 => Just(Op::Book),
        1 => Just(Op::Clear),
    ]
}

/// Applies an op the way the reducer does, with every booking confirmed
fn apply(grid: &Grid, op: Op) -> Grid {
    match op {
        Op::Toggle(position) => match PolicyEngine::toggle(grid, position).unwrap() {
            Decision::Accepted(next) => next,
            Decision::Rejected(_) => grid.clone(),
        },
        Op::Book => {
            match PolicyEngine::quote_booking(grid, &grid.selected_positions()).unwrap() {
                Decision::Accepted(quote) => PolicyEngine::commit_booking(grid, &quote),
                Decision::Rejected(_) => grid.clone(),
            }
        },
        Op::Clear => PolicyEngine::clear_selection(grid),
    }
}

fn replay(ops: &[Op]) -> Grid {
    ops.iter().fold(Grid::initialize(), |grid, op| apply(&grid, *op))
}

// =============================================================================
// Capacity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn selection_never_exceeds_capacity(ops in prop::collection::vec(arb_op(), 0..120)) {
        let mut grid = Grid::initialize();
        for op in ops {
            grid = apply(&grid, op);
            prop_assert!(grid.count_by_status(SeatStatus::Selected) <= MAX_SEATS_PER_BOOKING);
        }
    }

    #[test]
    fn full_selection_rejects_any_new_seat(
        ops in prop::collection::vec(arb_op(), 0..80),
        candidates in prop::collection::vec(arb_position(), 1..40),
    ) {
        let mut grid = replay(&ops);
        for position in &candidates {
            if grid.count_by_status(SeatStatus::Selected) == MAX_SEATS_PER_BOOKING {
                break;
            }
            grid = apply(&grid, Op::Toggle(*position));
        }
        prop_assume!(grid.count_by_status(SeatStatus::Selected) == MAX_SEATS_PER_BOOKING);

        let available = grid
            .seats()
            .find(|seat| seat.status() == SeatStatus::Available)
            .map(|seat| seat.position());
        prop_assume!(available.is_some());

        let decision = PolicyEngine::toggle(&grid, available.unwrap()).unwrap();
        prop_assert_eq!(decision, Decision::Rejected(Rejection::CapacityExceeded));
    }
}

// =============================================================================
// Continuity
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn accepted_toggle_never_orphans_the_toggled_seat(
        ops in prop::collection::vec(arb_op(), 0..100),
        position in arb_position(),
    ) {
        let grid = replay(&ops);

        match PolicyEngine::toggle(&grid, position).unwrap() {
            Decision::Accepted(next) => {
                prop_assert!(!PolicyEngine::is_orphaned(&next, position).unwrap());
                let changed = grid
                    .seats()
                    .zip(next.seats())
                    .filter(|(before, after)| before.status() != after.status())
                    .count();
                prop_assert_eq!(changed, 1);
            },
            Decision::Rejected(Rejection::WouldOrphanSeat) => {
                let released = grid.apply_status(position, SeatStatus::Available).unwrap();
                prop_assert!(PolicyEngine::is_orphaned(&released, position).unwrap());
            },
            Decision::Rejected(_) => {},
        }
    }
}

// =============================================================================
// Booked seats and derived counts
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn booked_seats_stay_booked(
        prefix in prop::collection::vec(arb_op(), 0..80),
        suffix in prop::collection::vec(arb_op(), 0..80),
    ) {
        let grid = replay(&prefix);
        let booked = grid.booked_ids();

        let later = suffix.iter().fold(grid, |grid, op| apply(&grid, *op));

        for id in booked {
            let still_booked = later
                .seats()
                .any(|seat| seat.id() == id && seat.status() == SeatStatus::Booked);
            prop_assert!(still_booked, "seat {} lost its booking", id);
        }
    }

    #[test]
    fn summary_matches_a_full_scan(ops in prop::collection::vec(arb_op(), 0..120)) {
        let grid = replay(&ops);
        let summary = grid.summary();

        prop_assert_eq!(summary.available, grid.count_by_status(SeatStatus::Available));
        prop_assert_eq!(summary.selected, grid.count_by_status(SeatStatus::Selected));
        prop_assert_eq!(summary.booked, grid.count_by_status(SeatStatus::Booked));
        prop_assert_eq!(summary.total_price, grid.total_price());
        prop_assert_eq!(summary.available + summary.selected + summary.booked, TOTAL_SEATS);
    }

    #[test]
    fn clearing_twice_equals_clearing_once(ops in prop::collection::vec(arb_op(), 0..80)) {
        let once = PolicyEngine::clear_selection(&replay(&ops));
        let twice = PolicyEngine::clear_selection(&once);

        prop_assert_eq!(twice, once);
    }
}
