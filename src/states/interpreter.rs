//! State execution.
//!
//! [`execute`] runs one state entry against the pressed-key history and the
//! terminal registers. It is deterministic and has no side effects beyond the
//! two `&mut` registers it is handed. Every check that can fail happens before
//! the first write, so an `Err` always leaves the registers untouched.
//!
//! The pressed-key history is read, never cleared; the caller clears it once
//! a transition is committed.

use thiserror::Error;

use super::types::{
    ExtensionState, FdkInformationEntry, FourFdkSelection, StateEntry, StateNumber, TargetBuffer,
};
use crate::buffers::{AmountBuffer, BufferLocation, Buffers};
use crate::fdk::{parse_mask, Fdk, FdkSet};

/// Next-state decision of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Remain in the current state (waiting for input).
    Stay,
    Next(StateNumber),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error("state {0} is not in the loaded state table")]
    UnknownState(StateNumber),

    #[error("state {state} links extension state {extension}, which is not available")]
    MissingExtension {
        state: StateNumber,
        extension: StateNumber,
    },

    #[error("extension state {extension} has no entry for key {key}")]
    MissingEntry { extension: StateNumber, key: Fdk },

    #[error("state {state}: value '{value}' does not fit the amount buffer")]
    AmountOverflow { state: StateNumber, value: String },

    #[error("state {state} of type '{type_code}' cannot be executed")]
    Unsupported { state: StateNumber, type_code: char },
}

/// Execute `entry` once.
///
/// `extension` is the entry's linked extension state, required by type `X`
/// as soon as a key has been pressed. `pressed` is the key history since the
/// last committed transition; only its most recent key is consulted.
pub fn execute(
    entry: &StateEntry,
    extension: Option<&ExtensionState>,
    pressed: &[Fdk],
    buffers: &mut Buffers,
    active_fdks: &mut FdkSet,
) -> Result<Transition, InterpreterError> {
    match entry {
        StateEntry::FdkInformation(state) => {
            execute_fdk_information(state, extension, pressed, buffers, active_fdks)
        }
        StateEntry::FourFdkSelection(state) => {
            Ok(execute_four_fdk_selection(state, pressed, buffers, active_fdks))
        }
        StateEntry::Extension(_) | StateEntry::Opaque(_) => Err(InterpreterError::Unsupported {
            state: entry.number(),
            type_code: entry.type_code(),
        }),
    }
}

/// Composed write of a type `X` state, validated before commit.
enum PendingWrite {
    Amount(AmountBuffer),
    B(String),
    C(String),
}

fn execute_fdk_information(
    state: &FdkInformationEntry,
    extension: Option<&ExtensionState>,
    pressed: &[Fdk],
    buffers: &mut Buffers,
    active_fdks: &mut FdkSet,
) -> Result<Transition, InterpreterError> {
    let mask = match parse_mask(&state.fdk_active_mask) {
        Ok(mask) => Some(mask),
        Err(err) => {
            tracing::warn!(
                state = %state.number,
                mask = %state.fdk_active_mask,
                error = %err,
                "Invalid FDK active mask, keeping active keys"
            );
            None
        }
    };

    let pending = match pressed.last() {
        Some(&key) => Some(compose_write(state, extension, key, &buffers.amount)?),
        None => None,
    };

    if let Some(mask) = mask {
        *active_fdks = mask;
    }

    let Some(pending) = pending else {
        return Ok(Transition::Stay);
    };

    match pending {
        PendingWrite::Amount(amount) => buffers.amount = amount,
        PendingWrite::B(value) => buffers.buffer_b = value,
        PendingWrite::C(value) => buffers.buffer_c = value,
    }
    tracing::debug!(
        state = %state.number,
        next_state = %state.fdk_next_state,
        "FDK information entry stored"
    );
    Ok(Transition::Next(state.fdk_next_state))
}

fn compose_write(
    state: &FdkInformationEntry,
    extension: Option<&ExtensionState>,
    key: Fdk,
    current_amount: &AmountBuffer,
) -> Result<PendingWrite, InterpreterError> {
    let extension = extension.ok_or(InterpreterError::MissingExtension {
        state: state.number,
        extension: state.extension_state,
    })?;
    let literal = extension
        .entry_for(key)
        .ok_or(InterpreterError::MissingEntry {
            extension: extension.number,
            key,
        })?;

    let value = format!(
        "{}{}",
        literal,
        "0".repeat(usize::from(state.buffer_id.zeros))
    );

    Ok(match state.buffer_id.target {
        TargetBuffer::Amount => {
            let mut amount = current_amount.clone();
            amount
                .set(&value)
                .map_err(|_| InterpreterError::AmountOverflow {
                    state: state.number,
                    value,
                })?;
            PendingWrite::Amount(amount)
        }
        TargetBuffer::B => PendingWrite::B(value),
        TargetBuffer::C => PendingWrite::C(value),
    })
}

fn execute_four_fdk_selection(
    state: &FourFdkSelection,
    pressed: &[Fdk],
    buffers: &mut Buffers,
    active_fdks: &mut FdkSet,
) -> Transition {
    *active_fdks = FourFdkSelection::KEYS
        .into_iter()
        .zip(state.fdk_next_states)
        .filter(|(_, next)| next.is_some())
        .map(|(key, _)| key)
        .collect();

    let Some(&key) = pressed.last() else {
        return Transition::Stay;
    };
    if !FourFdkSelection::KEYS.contains(&key) {
        return Transition::Stay;
    }

    match state.buffer_location.parse::<BufferLocation>() {
        Ok(location) => {
            if let Err(err) = buffers.opcode.write(location, key.letter()) {
                tracing::warn!(state = %state.number, error = %err, "Opcode write rejected");
            }
        }
        Err(err) => {
            tracing::warn!(
                state = %state.number,
                error = %err,
                "Opcode buffer left unchanged"
            );
        }
    }

    state
        .next_state_for(key)
        .map_or(Transition::Stay, Transition::Next)
}
