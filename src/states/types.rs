use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::parser::StateParseError;
use crate::fdk::Fdk;

/// Three-digit state number (`000`-`999`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateNumber(u16);

impl StateNumber {
    pub fn new(value: u16) -> Option<Self> {
        (value <= 999).then_some(Self(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl FromStr for StateNumber {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StateParseError::StateNumber(s.to_string()));
        }
        s.parse()
            .map(Self)
            .map_err(|_| StateParseError::StateNumber(s.to_string()))
    }
}

impl fmt::Display for StateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl Serialize for StateNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Buffer written by an FDK information entry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetBuffer {
    B,
    C,
    Amount,
}

/// Decoded `buffer_id` field: marker digit, target buffer, zero count.
///
/// `033` targets the amount buffer and appends three zeros to the literal;
/// `010` targets buffer B with no zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferId {
    pub target: TargetBuffer,
    pub zeros: u8,
}

impl FromStr for BufferId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[marker, target, zeros] = s.as_bytes() else {
            return Err(());
        };
        if !marker.is_ascii_digit() || !zeros.is_ascii_digit() {
            return Err(());
        }
        let target = match target {
            b'1' => TargetBuffer::B,
            b'2' => TargetBuffer::C,
            b'3' => TargetBuffer::Amount,
            _ => return Err(()),
        };
        Ok(Self {
            target,
            zeros: zeros - b'0',
        })
    }
}

/// Type `X`: FDK information entry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdkInformationEntry {
    pub number: StateNumber,
    pub screen_number: String,
    pub timeout_next_state: StateNumber,
    pub cancel_next_state: StateNumber,
    pub fdk_next_state: StateNumber,
    pub extension_state: StateNumber,
    pub buffer_id: BufferId,
    /// Decimal active mask, decoded on execution.
    pub fdk_active_mask: String,
}

/// Type `E`: four FDK selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FourFdkSelection {
    pub number: StateNumber,
    pub screen_number: String,
    pub timeout_next_state: StateNumber,
    pub cancel_next_state: StateNumber,
    /// Next states for keys A-D. `None` marks a key disabled (`255`).
    pub fdk_next_states: [Option<StateNumber>; 4],
    /// Raw opcode buffer location code. Out-of-range codes are tolerated
    /// and simply skip the opcode write.
    pub buffer_location: String,
}

impl FourFdkSelection {
    pub const KEYS: [Fdk; 4] = [Fdk::A, Fdk::B, Fdk::C, Fdk::D];

    pub fn next_state_for(&self, key: Fdk) -> Option<StateNumber> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .and_then(|slot| self.fdk_next_states[slot])
    }
}

/// Type `Z`: extension state holding eight literal entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionState {
    pub number: StateNumber,
    pub entries: [String; 8],
}

impl ExtensionState {
    /// Literal for a key, looked up by key rank.
    pub fn entry_for(&self, key: Fdk) -> Option<&str> {
        self.entries.get(key.rank()).map(String::as_str)
    }
}

/// A record of a type the interpreter does not execute. Loadable so a full
/// host table can be installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueState {
    pub number: StateNumber,
    pub type_code: char,
    pub fields: [String; 8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEntry {
    FdkInformation(FdkInformationEntry),
    FourFdkSelection(FourFdkSelection),
    Extension(ExtensionState),
    Opaque(OpaqueState),
}

impl StateEntry {
    pub fn number(&self) -> StateNumber {
        match self {
            StateEntry::FdkInformation(s) => s.number,
            StateEntry::FourFdkSelection(s) => s.number,
            StateEntry::Extension(s) => s.number,
            StateEntry::Opaque(s) => s.number,
        }
    }

    pub fn type_code(&self) -> char {
        match self {
            StateEntry::FdkInformation(_) => 'X',
            StateEntry::FourFdkSelection(_) => 'E',
            StateEntry::Extension(_) => 'Z',
            StateEntry::Opaque(s) => s.type_code,
        }
    }

    pub fn timeout_next_state(&self) -> Option<StateNumber> {
        match self {
            StateEntry::FdkInformation(s) => Some(s.timeout_next_state),
            StateEntry::FourFdkSelection(s) => Some(s.timeout_next_state),
            StateEntry::Extension(_) | StateEntry::Opaque(_) => None,
        }
    }

    pub fn cancel_next_state(&self) -> Option<StateNumber> {
        match self {
            StateEntry::FdkInformation(s) => Some(s.cancel_next_state),
            StateEntry::FourFdkSelection(s) => Some(s.cancel_next_state),
            StateEntry::Extension(_) | StateEntry::Opaque(_) => None,
        }
    }

    /// Number of the linked extension state, for types that have one.
    pub fn extension_state(&self) -> Option<StateNumber> {
        match self {
            StateEntry::FdkInformation(s) => Some(s.extension_state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_number_round_trip_display() {
        let n: StateNumber = "037".parse().unwrap();
        assert_eq!(n.value(), 37);
        assert_eq!(n.to_string(), "037");
    }

    #[test]
    fn test_state_number_rejects_bad_input() {
        assert!("37".parse::<StateNumber>().is_err());
        assert!("0370".parse::<StateNumber>().is_err());
        assert!("03A".parse::<StateNumber>().is_err());
        assert!(StateNumber::new(1000).is_none());
    }

    #[test]
    fn test_buffer_id_decoding() {
        assert_eq!(
            "033".parse::<BufferId>(),
            Ok(BufferId {
                target: TargetBuffer::Amount,
                zeros: 3
            })
        );
        assert_eq!(
            "010".parse::<BufferId>(),
            Ok(BufferId {
                target: TargetBuffer::B,
                zeros: 0
            })
        );
        assert_eq!(
            "021".parse::<BufferId>(),
            Ok(BufferId {
                target: TargetBuffer::C,
                zeros: 1
            })
        );
        assert!("040".parse::<BufferId>().is_err());
        assert!("03X".parse::<BufferId>().is_err());
        assert!("03".parse::<BufferId>().is_err());
    }
}
