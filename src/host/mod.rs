//! Host protocol surface: inbound messages, outbound status responses,
//! terminal status and the message classifier.

mod classifier;
mod message;
mod status;

pub use classifier::{classify, HostCommand, Rejection};
pub use message::{
    HostMessage, Response, StatesPayload, StatusDescriptor, CUSTOMIZATION_COMMAND, DATA_COMMAND,
    GO_IN_SERVICE, GO_OUT_OF_SERVICE, STATE_TABLES_LOAD, TERMINAL_COMMAND,
};
pub use status::TerminalStatus;
