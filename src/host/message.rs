use serde::{Deserialize, Serialize};

pub const TERMINAL_COMMAND: &str = "Terminal Command";
pub const DATA_COMMAND: &str = "Data Command";
pub const GO_OUT_OF_SERVICE: &str = "Go out-of-service";
pub const GO_IN_SERVICE: &str = "Go in-service";
pub const CUSTOMIZATION_COMMAND: &str = "Customization Command";
pub const STATE_TABLES_LOAD: &str = "State Tables load";

const SOLICITED: &str = "Solicited";
const STATUS: &str = "Status";

/// Inbound host message, already decoded from the wire.
///
/// Every field is optional: which ones are required depends on the class,
/// and a missing field is a rejection, never a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_subclass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<StatesPayload>,
}

impl HostMessage {
    /// Terminal Command with the given command code.
    pub fn terminal_command(command_code: &str) -> Self {
        Self {
            message_class: Some(TERMINAL_COMMAND.to_string()),
            command_code: Some(command_code.to_string()),
            ..Self::default()
        }
    }

    /// Customization Data Command carrying state table records.
    pub fn state_tables_load(states: impl Into<StatesPayload>) -> Self {
        Self {
            message_class: Some(DATA_COMMAND.to_string()),
            message_subclass: Some(CUSTOMIZATION_COMMAND.to_string()),
            message_identifier: Some(STATE_TABLES_LOAD.to_string()),
            states: Some(states.into()),
            ..Self::default()
        }
    }
}

/// State records as sent by the host: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatesPayload {
    Single(String),
    Many(Vec<String>),
}

impl StatesPayload {
    pub fn chunks(&self) -> Vec<&str> {
        match self {
            StatesPayload::Single(records) => vec![records.as_str()],
            StatesPayload::Many(records) => records.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.chunks().iter().all(|chunk| chunk.trim().is_empty())
    }
}

impl From<&str> for StatesPayload {
    fn from(records: &str) -> Self {
        StatesPayload::Single(records.to_string())
    }
}

impl From<Vec<String>> for StatesPayload {
    fn from(records: Vec<String>) -> Self {
        StatesPayload::Many(records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusDescriptor {
    Ready,
    #[serde(rename = "Command Reject")]
    CommandReject,
}

/// Solicited status message sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub message_class: String,
    pub message_subclass: String,
    pub status_descriptor: StatusDescriptor,
}

impl Response {
    fn solicited_status(status_descriptor: StatusDescriptor) -> Self {
        Self {
            message_class: SOLICITED.to_string(),
            message_subclass: STATUS.to_string(),
            status_descriptor,
        }
    }

    pub fn ready() -> Self {
        Self::solicited_status(StatusDescriptor::Ready)
    }

    pub fn command_reject() -> Self {
        Self::solicited_status(StatusDescriptor::CommandReject)
    }
}
