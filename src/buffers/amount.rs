use std::fmt;

use serde::Serialize;

use super::BufferError;

/// Number of digits held by the amount buffer.
pub const AMOUNT_WIDTH: usize = 12;

const RESET_VALUE: &str = "000000000000";

/// Amount buffer: exactly [`AMOUNT_WIDTH`] digits, zero-padded on the left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AmountBuffer(String);

impl AmountBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store `digits` right-aligned. Values longer than the buffer or with
    /// non-digit characters are rejected; nothing is truncated.
    pub fn set(&mut self, digits: &str) -> Result<(), BufferError> {
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BufferError::NonDigitAmount(digits.to_string()));
        }
        if digits.len() > AMOUNT_WIDTH {
            return Err(BufferError::AmountTooLong {
                value: digits.to_string(),
                width: AMOUNT_WIDTH,
            });
        }

        self.0 = format!("{:0>width$}", digits, width = AMOUNT_WIDTH);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.0 = RESET_VALUE.to_string();
    }
}

impl Default for AmountBuffer {
    fn default() -> Self {
        Self(RESET_VALUE.to_string())
    }
}

impl fmt::Display for AmountBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for AmountBuffer {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AmountBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
