//! Terminal data buffers.
//!
//! State execution reads and writes these fixed-format cells. Widths are
//! enforced by the cell types themselves: the amount buffer is always 12
//! digits and the opcode buffer is always 8 characters.

mod amount;
mod opcode;

pub use amount::{AmountBuffer, AMOUNT_WIDTH};
pub use opcode::{BufferLocation, OpcodeBuffer, OPCODE_WIDTH};

use serde::Serialize;
use thiserror::Error;

/// Rejected buffer writes. The target buffer is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("amount '{0}' is not a digit string")]
    NonDigitAmount(String),

    #[error("amount '{value}' does not fit in {width} digits")]
    AmountTooLong { value: String, width: usize },

    #[error("buffer location '{0}' is outside 0-7")]
    InvalidLocation(String),

    #[error("'{0}' cannot be stored in the opcode buffer")]
    InvalidOpcodeChar(char),
}

/// All buffers of one terminal instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Buffers {
    /// Entered PIN digits.
    pub pin: String,
    /// General purpose buffer B.
    pub buffer_b: String,
    /// General purpose buffer C.
    pub buffer_c: String,
    pub amount: AmountBuffer,
    pub opcode: OpcodeBuffer,
    /// Function keys pressed so far, as letters.
    pub fdk: String,
}

impl Buffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every buffer to its nominal value. Idempotent.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
