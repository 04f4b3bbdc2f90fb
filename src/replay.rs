//! Scripted events for driving a terminal from the command line.
//!
//! A script is JSON lines, one event per line, tagged by `"event"`:
//!
//! ```text
//! {"event": "host", "message": {"message_class": "Terminal Command", "command_code": "Go in-service"}}
//! {"event": "key", "key": "A"}
//! {"event": "card", "track2": ";4575270595153145=20012211998522600001?"}
//! {"event": "timeout"}
//! {"event": "cancel"}
//! ```

use serde::{Deserialize, Serialize};

use crate::buffers::Buffers;
use crate::card::CardData;
use crate::fdk::FdkSet;
use crate::host::{HostMessage, Response, TerminalStatus};
use crate::states::StateNumber;
use crate::terminal::{KeyPress, Terminal};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Host { message: HostMessage },
    Key { key: char },
    Card { track2: String },
    Timeout,
    Cancel,
}

/// What an event produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Response { response: Response },
    /// Host message without a message class.
    NoResponse,
    Key { key: char, press: KeyPress },
    Card { card: Option<CardData> },
    Transition { next_state: Option<StateNumber> },
    Error { message: String },
}

/// One output line: the outcome plus a snapshot of the terminal afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub status: TerminalStatus,
    pub state: Option<StateNumber>,
    pub active_fdks: FdkSet,
    pub buffers: Buffers,
}

/// Apply one event to `terminal`.
pub fn apply(terminal: &mut Terminal, event: ReplayEvent) -> ReplayReport {
    let outcome = match event {
        ReplayEvent::Host { message } => match terminal.process_host_message(&message) {
            Some(response) => Outcome::Response { response },
            None => Outcome::NoResponse,
        },
        ReplayEvent::Key { key } => match terminal.press_key(key) {
            Ok(press) => Outcome::Key { key, press },
            Err(err) => Outcome::Error {
                message: err.to_string(),
            },
        },
        ReplayEvent::Card { track2 } => Outcome::Card {
            card: terminal.parse_track2(&track2),
        },
        ReplayEvent::Timeout => transition(terminal.timeout()),
        ReplayEvent::Cancel => transition(terminal.cancel()),
    };

    ReplayReport {
        outcome,
        status: terminal.status(),
        state: terminal.current_state(),
        active_fdks: terminal.active_fdks(),
        buffers: terminal.buffers().clone(),
    }
}

fn transition<E: std::fmt::Display>(result: Result<Option<StateNumber>, E>) -> Outcome {
    match result {
        Ok(next_state) => Outcome::Transition { next_state },
        Err(err) => Outcome::Error {
            message: err.to_string(),
        },
    }
}
