//! State-transition loop: entering states, key presses, timeouts and cancel.

use serde::Serialize;

use super::Terminal;
use crate::buffers::Buffers;
use crate::fdk::{Fdk, FdkSet};
use crate::states::{execute, InterpreterError, StateEntry, StateNumber, Transition};

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum KeyPress {
    /// Not a key letter, or the key is not active. History is unchanged.
    Ignored,
    /// Accepted; the terminal stays in its current state.
    Stayed,
    /// Accepted and the terminal moved to `state`.
    Moved { state: StateNumber },
}

impl Terminal {
    /// Make `number` the current state and execute it with an empty key
    /// history, which applies the state's active keys.
    ///
    /// On error nothing changes: the previous state stays current.
    pub fn enter_state(&mut self, number: StateNumber) -> Result<Transition, InterpreterError> {
        let mut buffers = self.buffers.clone();
        let mut active_fdks = self.active_fdks;
        let transition = self.run_state(number, &[], &mut buffers, &mut active_fdks)?;

        self.commit_entry(number, buffers, active_fdks);
        Ok(transition)
    }

    /// Handle a function key press.
    ///
    /// Inactive keys are ignored. An accepted key runs the current state
    /// with the key appended to the history; a resulting transition also
    /// runs the next state. Buffers, active keys, history and the current
    /// state are only updated once every step has succeeded.
    pub fn press_key(&mut self, letter: char) -> Result<KeyPress, InterpreterError> {
        let Some(key) = Fdk::from_letter(letter).filter(|key| self.active_fdks.contains(*key))
        else {
            tracing::debug!(%letter, "Inactive key ignored");
            return Ok(KeyPress::Ignored);
        };

        let Some(current) = self.current_state else {
            self.buttons_pressed.push(key);
            self.buffers.fdk.push(key.letter());
            return Ok(KeyPress::Stayed);
        };

        let mut pressed = self.buttons_pressed.clone();
        pressed.push(key);
        let mut buffers = self.buffers.clone();
        buffers.fdk.push(key.letter());
        let mut active_fdks = self.active_fdks;
        let rejected = |err: &InterpreterError| {
            tracing::warn!(state = %current, %key, error = %err, "Key press rejected");
        };

        let transition = self
            .run_state(current, &pressed, &mut buffers, &mut active_fdks)
            .inspect_err(rejected)?;

        match transition {
            Transition::Stay => {
                self.buttons_pressed = pressed;
                self.buffers = buffers;
                self.active_fdks = active_fdks;
                Ok(KeyPress::Stayed)
            }
            Transition::Next(next) => {
                self.run_state(next, &[], &mut buffers, &mut active_fdks)
                    .inspect_err(rejected)?;
                self.commit_entry(next, buffers, active_fdks);
                Ok(KeyPress::Moved { state: next })
            }
        }
    }

    /// Follow the current state's timeout path.
    pub fn timeout(&mut self) -> Result<Option<StateNumber>, InterpreterError> {
        self.follow(StateEntry::timeout_next_state)
    }

    /// Follow the current state's cancel path.
    pub fn cancel(&mut self) -> Result<Option<StateNumber>, InterpreterError> {
        self.follow(StateEntry::cancel_next_state)
    }

    fn follow(
        &mut self,
        path: fn(&StateEntry) -> Option<StateNumber>,
    ) -> Result<Option<StateNumber>, InterpreterError> {
        let Some(next) = self
            .current_state
            .and_then(|current| self.state_table.get(current))
            .and_then(path)
        else {
            return Ok(None);
        };

        self.enter_state(next)?;
        Ok(Some(next))
    }

    /// Execute state `number` against staged registers.
    fn run_state(
        &self,
        number: StateNumber,
        pressed: &[Fdk],
        buffers: &mut Buffers,
        active_fdks: &mut FdkSet,
    ) -> Result<Transition, InterpreterError> {
        let entry = self
            .state_table
            .get(number)
            .ok_or(InterpreterError::UnknownState(number))?;
        let extension = self.state_table.extension_for(entry);
        execute(entry, extension, pressed, buffers, active_fdks)
    }

    fn commit_entry(&mut self, number: StateNumber, buffers: Buffers, active_fdks: FdkSet) {
        tracing::debug!(state = %number, active = %active_fdks, "Entered state");
        self.current_state = Some(number);
        self.buttons_pressed.clear();
        self.buffers = buffers;
        self.active_fdks = active_fdks;
    }
}
