//! One self-service terminal instance.
//!
//! [`Terminal`] owns all mutable state of a terminal: status, buffers, active
//! keys, pressed-key history, the installed state table and the current state.
//! Every operation takes `&mut self` and runs to completion, so two events
//! never interleave on the same instance. Nothing here is global; separate
//! instances share only the settings store they are given.

mod dispatch;
mod flow;

pub use flow::KeyPress;

use std::sync::Arc;

use crate::buffers::{BufferError, Buffers};
use crate::card::{parse_track2, CardData};
use crate::config::TerminalConfig;
use crate::fdk::{parse_mask, Fdk, FdkSet, MaskError};
use crate::host::TerminalStatus;
use crate::settings::Settings;
use crate::states::{execute, ExtensionState, InterpreterError, StateEntry, StateNumber, StateTable, Transition};

/// Settings key holding the raw records of the installed state table.
pub const STATE_TABLES_KEY: &str = "state_tables";

pub struct Terminal {
    status: TerminalStatus,
    buffers: Buffers,
    active_fdks: FdkSet,
    buttons_pressed: Vec<Fdk>,
    state_table: StateTable,
    current_state: Option<StateNumber>,
    settings: Arc<dyn Settings>,
    config: TerminalConfig,
}

impl Terminal {
    pub fn new(settings: Arc<dyn Settings>) -> Self {
        Self::with_config(settings, TerminalConfig::default())
    }

    pub fn with_config(settings: Arc<dyn Settings>, config: TerminalConfig) -> Self {
        let mut terminal = Self {
            status: TerminalStatus::default(),
            buffers: Buffers::new(),
            active_fdks: FdkSet::empty(),
            buttons_pressed: Vec::new(),
            state_table: StateTable::default(),
            current_state: None,
            settings,
            config,
        };
        if terminal.config.restore_state_tables {
            terminal.restore_state_tables();
        }
        terminal
    }

    pub fn status(&self) -> TerminalStatus {
        self.status
    }

    pub fn buffers(&self) -> &Buffers {
        &self.buffers
    }

    pub fn active_fdks(&self) -> FdkSet {
        self.active_fdks
    }

    /// Keys pressed since the last committed transition.
    pub fn buttons_pressed(&self) -> &[Fdk] {
        &self.buttons_pressed
    }

    pub fn state_table(&self) -> &StateTable {
        &self.state_table
    }

    pub fn current_state(&self) -> Option<StateNumber> {
        self.current_state
    }

    /// Reset every buffer to its nominal value. Safe to call at any time;
    /// it cannot fail, so there is no result to check.
    pub fn init_buffers(&mut self) {
        self.buffers.reset();
    }

    /// Write `value` into the amount buffer. `None` leaves it unchanged.
    pub fn set_amount_buffer(&mut self, value: Option<&str>) -> Result<(), BufferError> {
        let Some(value) = value else {
            return Ok(());
        };
        self.buffers.amount.set(value).inspect_err(|err| {
            tracing::warn!(error = %err, "Amount buffer left unchanged");
        })
    }

    /// Replace the active key set from a 3- or 10-character mask. An invalid
    /// mask keeps the previous set.
    pub fn set_fdks_active_mask(&mut self, mask: &str) -> Result<(), MaskError> {
        match parse_mask(mask) {
            Ok(set) => {
                self.active_fdks = set;
                tracing::debug!(mask, active = %set, "Active FDKs updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(mask, error = %err, "Invalid FDK mask, keeping active FDKs");
                Err(err)
            }
        }
    }

    /// Case-insensitive check of a key letter against the active set.
    /// `None` when no letter is given.
    pub fn is_fdk_button_active(&self, letter: Option<char>) -> Option<bool> {
        let letter = letter?;
        Some(Fdk::from_letter(letter).is_some_and(|key| self.active_fdks.contains(key)))
    }

    /// Decode track 2 data. `None` for anything malformed.
    pub fn parse_track2(&self, track2: &str) -> Option<CardData> {
        match parse_track2(track2) {
            Ok(card) => {
                tracing::info!(
                    pan = %card.masked_number(),
                    service_code = %card.service_code,
                    "Card read"
                );
                Some(card)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Invalid track 2 data");
                None
            }
        }
    }

    /// Record a key press without executing anything.
    pub fn record_key(&mut self, key: Fdk) {
        self.buttons_pressed.push(key);
    }

    /// Execute `entry` against this terminal's buffers, active keys and key
    /// history. The history is not cleared and no transition is committed.
    pub fn execute_state(
        &mut self,
        entry: &StateEntry,
        extension: Option<&ExtensionState>,
    ) -> Result<Transition, InterpreterError> {
        execute(
            entry,
            extension,
            &self.buttons_pressed,
            &mut self.buffers,
            &mut self.active_fdks,
        )
    }
}
