//! Injected collaborators for the seat reducer.
//!
//! The reducer never talks to the user or the disk directly. It returns
//! effects that call into a [`BookingEnvironment`], so tests swap in
//! [`mocks::ScriptedConfirmation`] and an in-memory backend.

use crate::store::BookingStore;
use crate::types::CURRENCY_SYMBOL;
use std::sync::Arc;

/// Prompts and notifications shown to the user
///
/// Calls are synchronous; the runtime processes nothing else until they
/// return.
pub trait Confirmation: Send + Sync {
    /// Ask the user to confirm booking `count` seats for `total_price`
    fn confirm_booking(&self, count: usize, total_price: u32) -> bool;

    /// Ask the user to confirm erasing every booking
    fn confirm_reset(&self) -> bool;

    /// Fire-and-forget message, e.g. why a selection was refused
    fn notify(&self, message: &str);
}

/// Prompt shown before erasing every booking
pub const RESET_PROMPT: &str = "This will clear all bookings and reset all seats. Continue?";

/// Prompt shown before booking `count` seats for `total_price`
#[must_use]
pub fn booking_prompt(count: usize, total_price: u32) -> String {
    format!(
        "You are about to book {count} seat(s) for a total of {CURRENCY_SYMBOL}{total_price}.\nDo you want to proceed?"
    )
}

/// Dependencies of [`crate::reducer::SeatReducer`]
#[derive(Clone)]
pub struct BookingEnvironment {
    /// User prompts and notifications
    pub confirmation: Arc<dyn Confirmation>,
    /// Persisted bookings
    pub storage: Arc<BookingStore>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(confirmation: Arc<dyn Confirmation>, storage: BookingStore) -> Self {
        Self {
            confirmation,
            storage: Arc::new(storage),
        }
    }
}

/// Scripted collaborators for tests
pub mod mocks {
    use super::Confirmation;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Confirmation that answers from a script and records what it was asked
    #[derive(Debug)]
    pub struct ScriptedConfirmation {
        accept_booking: AtomicBool,
        accept_reset: AtomicBool,
        booking_prompts: Mutex<Vec<(usize, u32)>>,
        reset_prompts: AtomicUsize,
        notifications: Mutex<Vec<String>>,
    }

    impl ScriptedConfirmation {
        /// Answers yes to every prompt
        #[must_use]
        pub fn accepting() -> Self {
            Self::new(true, true)
        }

        /// Answers no to every prompt
        #[must_use]
        pub fn declining() -> Self {
            Self::new(false, false)
        }

        /// Fixed answers for booking and reset prompts
        #[must_use]
        pub fn new(accept_booking: bool, accept_reset: bool) -> Self {
            Self {
                accept_booking: AtomicBool::new(accept_booking),
                accept_reset: AtomicBool::new(accept_reset),
                booking_prompts: Mutex::new(Vec::new()),
                reset_prompts: AtomicUsize::new(0),
                notifications: Mutex::new(Vec::new()),
            }
        }

        /// Change the answer to later booking prompts
        pub fn set_accept_booking(&self, accept: bool) {
            self.accept_booking.store(accept, Ordering::SeqCst);
        }

        /// Change the answer to later reset prompts
        pub fn set_accept_reset(&self, accept: bool) {
            self.accept_reset.store(accept, Ordering::SeqCst);
        }

        /// `(count, total_price)` of every booking prompt, oldest first
        #[must_use]
        pub fn booking_prompts(&self) -> Vec<(usize, u32)> {
            self.booking_prompts
                .lock()
                .map(|prompts| prompts.clone())
                .unwrap_or_default()
        }

        /// Number of reset prompts shown
        #[must_use]
        pub fn reset_prompts(&self) -> usize {
            self.reset_prompts.load(Ordering::SeqCst)
        }

        /// Every notification, oldest first
        #[must_use]
        pub fn notifications(&self) -> Vec<String> {
            self.notifications
                .lock()
                .map(|messages| messages.clone())
                .unwrap_or_default()
        }
    }

    impl Default for ScriptedConfirmation {
        fn default() -> Self {
            Self::accepting()
        }
    }

    impl Confirmation for ScriptedConfirmation {
        fn confirm_booking(&self, count: usize, total_price: u32) -> bool {
            if let Ok(mut prompts) = self.booking_prompts.lock() {
                prompts.push((count, total_price));
            }
            self.accept_booking.load(Ordering::SeqCst)
        }

        fn confirm_reset(&self) -> bool {
            self.reset_prompts.fetch_add(1, Ordering::SeqCst);
            self.accept_reset.load(Ordering::SeqCst)
        }

        fn notify(&self, message: &str) {
            if let Ok(mut messages) = self.notifications.lock() {
                messages.push(message.to_string());
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_prompt_shows_count_and_total() {
        assert_eq!(
            booking_prompt(2, 1500),
            "You are about to book 2 seat(s) for a total of ₹1500.\nDo you want to proceed?"
        );
    }
}
