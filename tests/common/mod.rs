//! Shared test fixtures.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use ndc_terminal::host::{HostMessage, Response};
use ndc_terminal::settings::MemorySettings;
use ndc_terminal::states::{parse_record, ExtensionState, StateEntry};
use ndc_terminal::terminal::Terminal;

/// FDK information entry state writing the amount buffer with three zeros.
pub const ENTRY_STATE: &str = "037X037002131038050033255000";
/// Extension entries: A=150 B=250 C=400 D=600 E=000 F=100 G=050 H=020.
pub const EXTENSION_STATE: &str = "050Z150250400600000100050020";
/// Four FDK selection state with A and B disabled.
pub const SELECTION_STATE: &str = "141E141002131255255571132000";
/// A card-read (FIT switch) record the interpreter does not execute.
pub const FIT_SWITCH_STATE: &str = "001K003004004127127127127127";

/// Terminal with its own in-memory settings.
pub fn terminal() -> Terminal {
    Terminal::new(Arc::new(MemorySettings::new()))
}

/// Terminal sharing `settings`.
pub fn terminal_with(settings: &MemorySettings) -> Terminal {
    Terminal::new(Arc::new(settings.clone()))
}

pub fn status_ready() -> Response {
    Response::ready()
}

pub fn command_reject() -> Response {
    Response::command_reject()
}

pub fn message(class: &str) -> HostMessage {
    HostMessage {
        message_class: Some(class.to_string()),
        ..HostMessage::default()
    }
}

pub fn state(record: &str) -> StateEntry {
    parse_record(record).expect("fixture record must parse")
}

/// Type X record with the given buffer id, linked to [`EXTENSION_STATE`].
pub fn entry_state_with_buffer_id(buffer_id: &str) -> StateEntry {
    state(&format!("037X037002131038050{}255000", buffer_id))
}

/// Type E record with the given buffer location.
pub fn selection_state_with_location(location: &str) -> StateEntry {
    state(&format!("141E141002131255255571132{}", location))
}

pub fn extension() -> ExtensionState {
    match state(EXTENSION_STATE) {
        StateEntry::Extension(extension) => extension,
        other => panic!("expected extension state, got {:?}", other),
    }
}

/// Write `contents` to a fresh `config.toml` in a temporary directory.
pub fn temp_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}
