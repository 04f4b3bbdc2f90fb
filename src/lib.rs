//! Control core of an NDC-style self-service terminal.
//!
//! The crate interprets host protocol messages and host-downloaded state
//! tables. It keeps the terminal's data buffers, decodes FDK active masks and
//! parses magnetic stripe track 2 data. Transport, rendering and device I/O
//! live elsewhere; messages reach [`terminal::Terminal`] already decoded.

pub mod buffers;
pub mod card;
pub mod config;
pub mod fdk;
pub mod host;
pub mod logging;
pub mod replay;
pub mod settings;
pub mod states;
pub mod terminal;
