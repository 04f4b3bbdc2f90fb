//! Host message classifier: turns a decoded message into the command the terminal acts on.

use thiserror::Error;

use super::message::{
    HostMessage, StatesPayload, CUSTOMIZATION_COMMAND, DATA_COMMAND, GO_IN_SERVICE,
    GO_OUT_OF_SERVICE, STATE_TABLES_LOAD, TERMINAL_COMMAND,
};

/// A classified host message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand<'a> {
    GoOutOfService,
    GoInService,
    LoadStateTables(&'a StatesPayload),
    /// Recognised shape but not acceptable; answered with Command Reject.
    Reject(Rejection),
}

/// Why a message is answered with Command Reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown terminal command {0:?}")]
    UnknownTerminalCommand(Option<String>),

    #[error("data command without a subclass")]
    MissingSubclass,

    #[error("unknown data command subclass '{0}'")]
    UnknownSubclass(String),

    #[error("unknown customization command {0:?}")]
    UnknownIdentifier(Option<String>),

    #[error("state tables load without state records")]
    MissingStates,

    #[error("unknown message class '{0}'")]
    UnknownClass(String),
}

/// Classify a message. `None` means the message has no `message_class` and
/// is not answered at all.
pub fn classify(message: &HostMessage) -> Option<HostCommand<'_>> {
    let class = message.message_class.as_deref()?;

    let command = match class {
        TERMINAL_COMMAND => match message.command_code.as_deref() {
            Some(GO_OUT_OF_SERVICE) => HostCommand::GoOutOfService,
            Some(GO_IN_SERVICE) => HostCommand::GoInService,
            other => HostCommand::Reject(Rejection::UnknownTerminalCommand(
                other.map(str::to_string),
            )),
        },
        DATA_COMMAND => classify_data_command(message),
        other => HostCommand::Reject(Rejection::UnknownClass(other.to_string())),
    };
    Some(command)
}

fn classify_data_command(message: &HostMessage) -> HostCommand<'_> {
    match message.message_subclass.as_deref() {
        None => HostCommand::Reject(Rejection::MissingSubclass),
        Some(CUSTOMIZATION_COMMAND) => match message.message_identifier.as_deref() {
            Some(STATE_TABLES_LOAD) => match &message.states {
                Some(states) if !states.is_blank() => HostCommand::LoadStateTables(states),
                _ => HostCommand::Reject(Rejection::MissingStates),
            },
            other => HostCommand::Reject(Rejection::UnknownIdentifier(other.map(str::to_string))),
        },
        Some(other) => HostCommand::Reject(Rejection::UnknownSubclass(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(class: &str) -> HostMessage {
        HostMessage {
            message_class: Some(class.to_string()),
            ..HostMessage::default()
        }
    }

    #[test]
    fn test_no_class_is_not_classified() {
        assert_eq!(classify(&HostMessage::default()), None);
    }

    #[test]
    fn test_terminal_commands() {
        assert_eq!(
            classify(&HostMessage::terminal_command("Go out-of-service")),
            Some(HostCommand::GoOutOfService)
        );
        assert_eq!(
            classify(&HostMessage::terminal_command("Go in-service")),
            Some(HostCommand::GoInService)
        );
        assert_eq!(
            classify(&HostMessage::terminal_command("IDDQD")),
            Some(HostCommand::Reject(Rejection::UnknownTerminalCommand(Some(
                "IDDQD".to_string()
            ))))
        );
        assert_eq!(
            classify(&message("Terminal Command")),
            Some(HostCommand::Reject(Rejection::UnknownTerminalCommand(None)))
        );
    }

    #[test]
    fn test_data_command_without_subclass() {
        let mut msg = message("Data Command");
        msg.command_code = Some("IDDQD".to_string());
        assert_eq!(
            classify(&msg),
            Some(HostCommand::Reject(Rejection::MissingSubclass))
        );
    }

    #[test]
    fn test_customization_without_identifier() {
        let mut msg = message("Data Command");
        msg.message_subclass = Some("Customization Command".to_string());
        assert_eq!(
            classify(&msg),
            Some(HostCommand::Reject(Rejection::UnknownIdentifier(None)))
        );
    }

    #[test]
    fn test_state_tables_load_requires_records() {
        let mut msg = HostMessage::state_tables_load("001K003004004127127127127127");
        assert!(matches!(
            classify(&msg),
            Some(HostCommand::LoadStateTables(_))
        ));

        msg.states = None;
        assert_eq!(
            classify(&msg),
            Some(HostCommand::Reject(Rejection::MissingStates))
        );

        msg.states = Some(StatesPayload::from(""));
        assert_eq!(
            classify(&msg),
            Some(HostCommand::Reject(Rejection::MissingStates))
        );
    }

    #[test]
    fn test_unknown_subclass_and_class() {
        let mut msg = message("Data Command");
        msg.message_subclass = Some("Interactive Transaction Response".to_string());
        assert!(matches!(
            classify(&msg),
            Some(HostCommand::Reject(Rejection::UnknownSubclass(_)))
        ));
        assert!(matches!(
            classify(&message("Transaction Reply")),
            Some(HostCommand::Reject(Rejection::UnknownClass(_)))
        ));
    }
}
