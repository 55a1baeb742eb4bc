//! IPC listener that accepts actions over a Unix socket.
//!
//! External tools (compositor key binds, scripts, status bars) can connect
//! to the socket and send newline-delimited actions.

pub mod listener;
