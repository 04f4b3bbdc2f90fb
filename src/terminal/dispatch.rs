//! Host message processing.

use serde_json::Value;

use super::{Terminal, STATE_TABLES_KEY};
use crate::host::{classify, HostCommand, HostMessage, Response, StatesPayload, TerminalStatus};
use crate::states::{StateNumber, StateParseError, StateTable};

impl Terminal {
    /// Process one host message.
    ///
    /// Returns `None` when the message has no `message_class`; otherwise a
    /// Ready or Command Reject status response. Status only changes on the
    /// two recognised Terminal Commands.
    pub fn process_host_message(&mut self, message: &HostMessage) -> Option<Response> {
        let Some(command) = classify(message) else {
            tracing::debug!("Host message without message class ignored");
            return None;
        };

        let response = match command {
            HostCommand::GoOutOfService => {
                self.set_status(TerminalStatus::OutOfService);
                Response::ready()
            }
            HostCommand::GoInService => {
                self.set_status(TerminalStatus::InService);
                self.enter_initial_state();
                Response::ready()
            }
            HostCommand::LoadStateTables(states) => match self.load_state_tables(states) {
                Ok(()) => Response::ready(),
                Err(err) => {
                    tracing::warn!(error = %err, "State tables load rejected");
                    Response::command_reject()
                }
            },
            HostCommand::Reject(reason) => {
                tracing::warn!(%reason, "Host message rejected");
                Response::command_reject()
            }
        };

        Some(response)
    }

    fn set_status(&mut self, status: TerminalStatus) {
        if self.status != status {
            tracing::info!(old_status = %self.status, new_status = %status, "Terminal status changed");
        }
        self.status = status;
    }

    /// Replace the installed table. A malformed payload leaves the current
    /// table, current state and key history untouched.
    fn load_state_tables(&mut self, states: &StatesPayload) -> Result<(), StateParseError> {
        let table = StateTable::parse(states.chunks())?;

        self.settings.set(
            STATE_TABLES_KEY,
            Value::from(table.records().to_vec()),
        );
        tracing::info!(states = table.len(), "State tables installed");

        self.install(table);
        Ok(())
    }

    fn install(&mut self, table: StateTable) {
        self.state_table = table;
        self.current_state = None;
        self.buttons_pressed.clear();
    }

    /// Reinstall the table persisted by a previous load. Anything other than
    /// a list of record strings (including the empty default) is ignored.
    pub(super) fn restore_state_tables(&mut self) {
        let Value::Array(items) = self.settings.get(STATE_TABLES_KEY) else {
            return;
        };
        let records: Vec<String> = items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();

        match StateTable::parse(records.iter().map(String::as_str)) {
            Ok(table) => {
                tracing::info!(states = table.len(), "State tables restored from settings");
                self.install(table);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Persisted state tables ignored");
            }
        }
    }

    fn enter_initial_state(&mut self) {
        let Ok(initial) = self.config.initial_state.parse::<StateNumber>() else {
            return;
        };
        if !self.state_table.contains(initial) {
            tracing::debug!(state = %initial, "Initial state not loaded, staying idle");
            return;
        }
        if let Err(err) = self.enter_state(initial) {
            tracing::warn!(state = %initial, error = %err, "Initial state could not be executed");
        }
    }
}
