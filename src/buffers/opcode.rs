use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::BufferError;

/// Number of character positions in the opcode buffer.
pub const OPCODE_WIDTH: usize = 8;

/// Opcode buffer position. Location 0 is the rightmost character, 7 the leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLocation(u8);

impl BufferLocation {
    pub fn new(index: u8) -> Option<Self> {
        (usize::from(index) < OPCODE_WIDTH).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    fn offset(self) -> usize {
        OPCODE_WIDTH - 1 - usize::from(self.0)
    }
}

/// Parses the 3-digit location code carried by state records (`"000"`-`"007"`).
impl FromStr for BufferLocation {
    type Err = BufferError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let invalid = || BufferError::InvalidLocation(code.to_string());

        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: u8 = code.parse().map_err(|_| invalid())?;
        Self::new(index).ok_or_else(invalid)
    }
}

/// Eight-character opcode buffer, space-filled when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeBuffer([u8; OPCODE_WIDTH]);

impl OpcodeBuffer {
    pub fn as_str(&self) -> &str {
        // Only printable ASCII is ever written.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Set one position, leaving the others untouched.
    pub fn write(&mut self, location: BufferLocation, c: char) -> Result<(), BufferError> {
        if !(c.is_ascii_graphic() || c == ' ') {
            return Err(BufferError::InvalidOpcodeChar(c));
        }
        self.0[location.offset()] = c as u8;
        Ok(())
    }

    /// Character at `location`.
    pub fn get(&self, location: BufferLocation) -> char {
        char::from(self.0[location.offset()])
    }

    pub fn clear(&mut self) {
        self.0 = [b' '; OPCODE_WIDTH];
    }
}

impl Default for OpcodeBuffer {
    fn default() -> Self {
        Self([b' '; OPCODE_WIDTH])
    }
}

impl fmt::Display for OpcodeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for OpcodeBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for OpcodeBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for OpcodeBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
