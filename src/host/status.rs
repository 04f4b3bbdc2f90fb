use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational status of the terminal as seen by the host.
///
/// Only the host message dispatcher changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalStatus {
    #[default]
    Offline,
    Online,
    #[serde(rename = "In-Service")]
    InService,
    #[serde(rename = "Out-Of-Service")]
    OutOfService,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
            Self::InService => "In-Service",
            Self::OutOfService => "Out-Of-Service",
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
