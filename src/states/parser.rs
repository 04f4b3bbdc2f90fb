//! Raw state record parsing.
//!
//! A record is 28 characters: a 3-digit state number, a type character and
//! eight 3-character fields. Several records may share one string when
//! separated by the ASCII field separator.

use thiserror::Error;

use super::types::{
    BufferId, ExtensionState, FdkInformationEntry, FourFdkSelection, OpaqueState, StateEntry,
    StateNumber,
};

/// Length of one state record.
pub const RECORD_LEN: usize = 28;

const FIELD_LEN: usize = 3;
const FIELD_COUNT: usize = 8;
const FIELD_SEPARATOR: char = '\u{1c}';

/// Next-state value meaning "key disabled" in selection states.
pub const DISABLED_NEXT_STATE: &str = "255";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateParseError {
    #[error("state record '{record}' must be 28 ASCII characters, got {len}")]
    Length { record: String, len: usize },

    #[error("invalid state number '{0}'")]
    StateNumber(String),

    #[error("state {state}: invalid buffer id '{value}'")]
    BufferId { state: StateNumber, value: String },

    #[error("state {state}: invalid {field} '{value}'")]
    Field {
        state: StateNumber,
        field: &'static str,
        value: String,
    },

    #[error("state table payload is empty")]
    Empty,
}

/// Split a payload string into its records, skipping empty pieces.
pub fn split_records(payload: &str) -> impl Iterator<Item = &str> {
    payload
        .split(FIELD_SEPARATOR)
        .map(|record| record.trim_end_matches(['\r', '\n']))
        .filter(|record| !record.is_empty())
}

/// Parse one 28-character record.
pub fn parse_record(record: &str) -> Result<StateEntry, StateParseError> {
    if !record.is_ascii() || record.len() != RECORD_LEN {
        return Err(StateParseError::Length {
            record: record.to_string(),
            len: record.chars().count(),
        });
    }

    let number: StateNumber = record[..3].parse()?;
    let type_code = char::from(record.as_bytes()[3]);
    let fields: [&str; FIELD_COUNT] = std::array::from_fn(|i| {
        let start = 4 + i * FIELD_LEN;
        &record[start..start + FIELD_LEN]
    });

    let next = |field: &'static str, value: &str| -> Result<StateNumber, StateParseError> {
        value.parse().map_err(|_| StateParseError::Field {
            state: number,
            field,
            value: value.to_string(),
        })
    };

    let entry = match type_code {
        'X' => StateEntry::FdkInformation(FdkInformationEntry {
            number,
            screen_number: fields[0].to_string(),
            timeout_next_state: next("timeout next state", fields[1])?,
            cancel_next_state: next("cancel next state", fields[2])?,
            fdk_next_state: next("FDK next state", fields[3])?,
            extension_state: next("extension state", fields[4])?,
            buffer_id: fields[5]
                .parse::<BufferId>()
                .map_err(|_| StateParseError::BufferId {
                    state: number,
                    value: fields[5].to_string(),
                })?,
            fdk_active_mask: fields[6].to_string(),
        }),
        'E' => {
            let selectable = |field: &'static str, value: &str| {
                if value == DISABLED_NEXT_STATE {
                    Ok(None)
                } else {
                    next(field, value).map(Some)
                }
            };
            StateEntry::FourFdkSelection(FourFdkSelection {
                number,
                screen_number: fields[0].to_string(),
                timeout_next_state: next("timeout next state", fields[1])?,
                cancel_next_state: next("cancel next state", fields[2])?,
                fdk_next_states: [
                    selectable("FDK A next state", fields[3])?,
                    selectable("FDK B next state", fields[4])?,
                    selectable("FDK C next state", fields[5])?,
                    selectable("FDK D next state", fields[6])?,
                ],
                buffer_location: fields[7].to_string(),
            })
        }
        'Z' => StateEntry::Extension(ExtensionState {
            number,
            entries: fields.map(str::to_string),
        }),
        other => StateEntry::Opaque(OpaqueState {
            number,
            type_code: other,
            fields: fields.map(str::to_string),
        }),
    };

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdk::Fdk;
    use crate::states::types::TargetBuffer;

    #[test]
    fn test_parse_fdk_information_entry() {
        let entry = parse_record("037X037002131038050033255000").unwrap();
        let StateEntry::FdkInformation(state) = entry else {
            panic!("expected type X");
        };
        assert_eq!(state.number.to_string(), "037");
        assert_eq!(state.screen_number, "037");
        assert_eq!(state.timeout_next_state.to_string(), "002");
        assert_eq!(state.cancel_next_state.to_string(), "131");
        assert_eq!(state.fdk_next_state.to_string(), "038");
        assert_eq!(state.extension_state.to_string(), "050");
        assert_eq!(state.buffer_id.target, TargetBuffer::Amount);
        assert_eq!(state.buffer_id.zeros, 3);
        assert_eq!(state.fdk_active_mask, "255");
    }

    #[test]
    fn test_parse_four_fdk_selection_with_disabled_keys() {
        let entry = parse_record("141E141002131255255571132000").unwrap();
        let StateEntry::FourFdkSelection(state) = entry else {
            panic!("expected type E");
        };
        assert_eq!(state.next_state_for(Fdk::A), None);
        assert_eq!(state.next_state_for(Fdk::B), None);
        assert_eq!(state.next_state_for(Fdk::C).unwrap().to_string(), "571");
        assert_eq!(state.next_state_for(Fdk::D).unwrap().to_string(), "132");
        assert_eq!(state.next_state_for(Fdk::E), None);
        assert_eq!(state.buffer_location, "000");
    }

    #[test]
    fn test_out_of_range_location_still_parses() {
        let entry = parse_record("141E141002131255255571132008").unwrap();
        assert_eq!(entry.type_code(), 'E');
    }

    #[test]
    fn test_parse_extension_state() {
        let entry = parse_record("050Z150250400600000100050020").unwrap();
        let StateEntry::Extension(state) = entry else {
            panic!("expected type Z");
        };
        assert_eq!(state.entry_for(Fdk::A), Some("150"));
        assert_eq!(state.entry_for(Fdk::H), Some("020"));
        assert_eq!(state.entry_for(Fdk::I), None);
    }

    #[test]
    fn test_unknown_type_is_opaque() {
        let entry = parse_record("001K003004004127127127127127").unwrap();
        assert_eq!(entry.type_code(), 'K');
        assert_eq!(entry.number().value(), 1);
        assert_eq!(entry.timeout_next_state(), None);
    }

    #[test]
    fn test_wrong_length() {
        assert!(matches!(
            parse_record("001K003004"),
            Err(StateParseError::Length { len: 10, .. })
        ));
    }

    #[test]
    fn test_bad_state_number() {
        assert_eq!(
            parse_record("0A1K003004004127127127127127"),
            Err(StateParseError::StateNumber("0A1".to_string()))
        );
    }

    #[test]
    fn test_bad_buffer_id() {
        assert!(matches!(
            parse_record("037X037002131038050093255000"),
            Err(StateParseError::BufferId { .. })
        ));
    }

    #[test]
    fn test_bad_next_state() {
        assert!(matches!(
            parse_record("141E14100213125525557113X000"),
            Err(StateParseError::Field {
                field: "FDK D next state",
                ..
            })
        ));
    }

    #[test]
    fn test_split_records() {
        let payload = "001K003004004127127127127127\u{1c}050Z150250400600000100050020\r\n";
        let records: Vec<&str> = split_records(payload).collect();
        assert_eq!(
            records,
            vec!["001K003004004127127127127127", "050Z150250400600000100050020"]
        );
    }
}
