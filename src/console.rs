//! Operator console loop.
//!
//! Runs on the foreground task while the connection's receive loop runs
//! in the background. Every idle interval it prints a 3-option menu and
//! blocks on one line of stdin. Invalid input falls through silently;
//! the menu simply reappears after the next wait.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::domain::DoorState;
use crate::error::SimulatorError;
use crate::ws::DoorConnection;

/// What a line of operator input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    /// Send the given door status.
    Send(DoorState),
    /// Leave the loop and proceed to teardown.
    Exit,
    /// Anything unrecognized; silently ignored.
    Ignore,
}

/// Maps one line of input to a menu action.
fn parse_choice(input: &str) -> MenuAction {
    match input.trim() {
        "1" => MenuAction::Send(DoorState::Opened),
        "2" => MenuAction::Send(DoorState::Closed),
        "3" => MenuAction::Exit,
        _ => MenuAction::Ignore,
    }
}

/// Prints the operator menu and the input prompt.
///
/// # Errors
///
/// Returns [`SimulatorError::Io`] if stdout cannot be flushed.
fn print_menu() -> Result<(), SimulatorError> {
    println!("\nOptions:");
    println!("1. Simulate door opened");
    println!("2. Simulate door closed");
    println!("3. Exit");
    print!("Enter choice (1-3): ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Runs the operator menu loop until the operator exits, interrupts, or
/// stdin reaches end of file.
///
/// Send failures after the connection has died are logged as warnings
/// and the loop keeps running; the operator decides when to leave.
///
/// # Errors
///
/// Returns [`SimulatorError::Io`] if reading stdin or writing stdout
/// fails.
pub async fn run(
    connection: &DoorConnection,
    interval: Duration,
) -> Result<(), SimulatorError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received");
                break;
            }
        }

        print_menu()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received");
                break;
            }
        };

        // None is stdin EOF: the operator is gone, leave cleanly.
        let Some(line) = line else { break };

        match parse_choice(&line) {
            MenuAction::Send(state) => {
                if let Err(e) = connection.send_status(state) {
                    tracing::warn!(error = %e, "failed to send status");
                }
            }
            MenuAction::Exit => break,
            MenuAction::Ignore => {}
        }
    }

    Ok(())
}
