//! Terminal seat booking shell.
//!
//! Renders the grid after every command and prompts on stdin for booking and
//! reset confirmations.

use seatwise_booking::{
    BookingEnvironment, BookingStore, Confirmation, GridError, SeatAction, SeatPosition,
    SeatReducer, SeatState, config::Config, display,
    environment::{RESET_PROMPT, booking_prompt},
};
use seatwise_runtime::{Store, StoreConfig};
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  <seat>          toggle a seat, e.g. A1 or h10
  toggle <seat>   same as above
  book            book the selected seats
  clear           release the selected seats
  reset           erase every booking
  show            print the seat map
  help            print this help
  quit            leave";

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Toggle(SeatPosition),
    Book,
    Clear,
    Reset,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error(transparent)]
    Seat(#[from] GridError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let first = words.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match (first.as_str(), rest.as_slice()) {
            ("book", []) => Self::Book,
            ("clear", []) => Self::Clear,
            ("reset", []) => Self::Reset,
            ("show" | "", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            ("toggle", [label]) => Self::Toggle(SeatPosition::from_label(label)?),
            (label, []) if label.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                match SeatPosition::from_label(label) {
                    Ok(position) => Self::Toggle(position),
                    Err(GridError::InvalidLabel(_)) => {
                        return Err(CommandError::Unknown(line.trim().to_string()));
                    },
                    Err(error) => return Err(error.into()),
                }
            },
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(command)
    }
}

impl Command {
    fn action(self) -> Option<SeatAction> {
        match self {
            Self::Toggle(position) => Some(SeatAction::ToggleSeat { position }),
            Self::Book => Some(SeatAction::BookSelected),
            Self::Clear => Some(SeatAction::ClearSelection),
            Self::Reset => Some(SeatAction::ResetAll),
            Self::Show | Self::Help | Self::Quit => None,
        }
    }
}

/// Confirmation over stdin/stdout
struct TerminalConfirmation;

impl TerminalConfirmation {
    fn ask(prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if let Err(error) = io::stdout().flush() {
            tracing::warn!(error = %error, "Failed to flush prompt");
        }

        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(error) => {
                tracing::warn!(error = %error, "Failed to read confirmation, treating as no");
                false
            },
        }
    }
}

impl Confirmation for TerminalConfirmation {
    fn confirm_booking(&self, count: usize, total_price: u32) -> bool {
        Self::ask(&booking_prompt(count, total_price))
    }

    fn confirm_reset(&self) -> bool {
        Self::ask(RESET_PROMPT)
    }

    fn notify(&self, message: &str) {
        println!("! {message}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log.filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    seatwise_runtime::metrics::describe_metrics();

    info!(
        backend = %config.storage.backend,
        path = %config.storage.path.display(),
        "Configuration loaded"
    );

    let env = BookingEnvironment::new(
        Arc::new(TerminalConfirmation),
        BookingStore::new(config.storage.open()),
    );
    let mut store = Store::with_config(
        SeatState::fresh(),
        SeatReducer::new(),
        env,
        StoreConfig::new(config.runtime.max_actions_per_send),
    );
    store.send(SeatAction::LoadBookings)?;

    println!("=== Seat Booking ===\n");
    println!("{}\n", store.state(|s| display::render(&s.grid)));
    println!("{HELP}\n");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let command = match input.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => println!("{}", store.state(|s| display::render(&s.grid))),
            _ => {
                if let Some(action) = command.action() {
                    store.send(action)?;
                }
                println!("{}", store.state(|s| display::render(&s.grid)));
            },
        }
        println!();
    }

    println!("Goodbye!");
    Ok(())
}
