//! FDK active-mask codec.
//!
//! Two encodings are accepted, told apart by length:
//!
//! - 3 characters: decimal `000`-`255`, read as 8 bits MSB first and mapped to
//!   `A B C D F G H I`. `E` has no bit in this form.
//! - 10 characters: a placeholder followed by nine `0`/`1` flags for `A`-`I`.

use thiserror::Error;

use super::{Fdk, FdkSet};

const DECIMAL_LEN: usize = 3;
const BINARY_LEN: usize = 10;

const DECIMAL_ORDER: [Fdk; 8] = [
    Fdk::A,
    Fdk::B,
    Fdk::C,
    Fdk::D,
    Fdk::F,
    Fdk::G,
    Fdk::H,
    Fdk::I,
];

/// Reasons a mask is rejected. A rejected mask never changes the active set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaskError {
    #[error("FDK mask must be 3 or 10 characters, got {0}")]
    InvalidLength(usize),

    #[error("decimal FDK mask '{0}' is not a number in 0-255")]
    InvalidDecimal(String),

    #[error("binary FDK mask '{0}' contains characters other than 0 and 1")]
    InvalidBinary(String),
}

/// Decode a mask into the set of keys it enables.
pub fn parse_mask(mask: &str) -> Result<FdkSet, MaskError> {
    match mask.chars().count() {
        DECIMAL_LEN => parse_decimal(mask),
        BINARY_LEN => parse_binary(mask),
        other => Err(MaskError::InvalidLength(other)),
    }
}

fn parse_decimal(mask: &str) -> Result<FdkSet, MaskError> {
    let invalid = || MaskError::InvalidDecimal(mask.to_string());

    if !mask.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: u16 = mask.parse().map_err(|_| invalid())?;
    let value = u8::try_from(value).map_err(|_| invalid())?;

    Ok(DECIMAL_ORDER
        .into_iter()
        .enumerate()
        .filter(|(bit, _)| value & (0x80 >> bit) != 0)
        .map(|(_, key)| key)
        .collect())
}

fn parse_binary(mask: &str) -> Result<FdkSet, MaskError> {
    let mut set = FdkSet::empty();
    for (key, flag) in Fdk::ALL.into_iter().zip(mask.chars().skip(1)) {
        match flag {
            '1' => set.insert(key),
            '0' => {}
            _ => return Err(MaskError::InvalidBinary(mask.to_string())),
        }
    }
    Ok(set)
}
