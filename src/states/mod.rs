//! Host-downloaded state tables and their interpreter.
//!
//! Records arrive as fixed-width text, are parsed into a closed set of typed
//! entries ([`StateEntry`]), and are executed by [`execute`]. Only the FDK
//! information entry (`X`) and four FDK selection (`E`) types are executable;
//! extension (`Z`) records supply data to them, and any other type is kept as
//! an opaque record.

mod interpreter;
mod parser;
mod table;
mod types;

pub use interpreter::{execute, InterpreterError, Transition};
pub use parser::{parse_record, split_records, StateParseError, DISABLED_NEXT_STATE, RECORD_LEN};
pub use table::StateTable;
pub use types::{
    BufferId, ExtensionState, FdkInformationEntry, FourFdkSelection, OpaqueState, StateEntry,
    StateNumber, TargetBuffer,
};
