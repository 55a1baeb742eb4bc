//! Unix-socket [`ActionSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as an action.
//!
//! # Wire format
//!
//! Every message is a single line followed by `\n` — either a bare
//! identifier or a JSON string:
//!
//! ```text
//! left
//! swap-screen
//! "fullscreen"
//! ```
//!
//! This makes `echo left | socat - UNIX-CONNECT:$XDG_RUNTIME_DIR/hyprshift.sock`
//! a complete hotkey binding.

use crate::command::Action;
use crate::traits::ActionSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// An [`ActionSource`] that listens on a Unix stream socket for
/// newline-delimited actions.
///
/// Each accepted connection can send multiple actions.  When the
/// connection closes, the listener waits for the next one.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum UnixSocketError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](ActionSource::run) is
    /// called; a stale file from a previous run is removed first.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse one wire line: a bare identifier, falling back to a JSON string.
fn parse_line(line: &str) -> Option<Action> {
    line.parse::<Action>()
        .ok()
        .or_else(|| serde_json::from_str::<Action>(line).ok())
}

impl ActionSource for UnixSocketListener {
    type Error = UnixSocketError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** indefinitely.  Run it on a dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<Action>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    let reader = BufReader::new(stream);
                    for line in reader.lines() {
                        match line {
                            Ok(ref text) if text.trim().is_empty() => continue,
                            Ok(text) => match parse_line(&text) {
                                Some(action) => {
                                    debug!("received {}", action);
                                    if sink.send(action).is_err() {
                                        info!("sink closed, shutting down");
                                        return Ok(());
                                    }
                                }
                                None => {
                                    error!("bad action: {:?}", text);
                                }
                            },
                            Err(e) => {
                                error!("read error: {}", e);
                                break;
                            }
                        }
                    }
                    debug!("client disconnected");
                }
                Err(e) => {
                    error!("accept error: {}", e);
                }
            }
        }
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::unix::net::UnixStream;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    /// Helper: create a unique temporary socket path for each test.
    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir();
        dir.join(format!("hyprshift-test-{}-{}.sock", std::process::id(), id))
    }

    #[test]
    fn parse_line_accepts_bare_and_json_forms() {
        assert_eq!(parse_line("left"), Some(Action::Left));
        assert_eq!(parse_line("swap-screen"), Some(Action::SwapScreen));
        assert_eq!(parse_line(r#""fullscreen""#), Some(Action::FullScreen));
        assert_eq!(parse_line("nonsense"), None);
    }

    #[test]
    fn round_trip_actions_over_socket() {
        let path = tmp_socket_path();
        let path_clone = path.clone();

        let (tx, rx) = mpsc::channel();

        // Run listener in a background thread.
        let _handle = std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path_clone);
            let _ = listener.run(tx);
        });

        // Give the listener a moment to bind.
        std::thread::sleep(std::time::Duration::from_millis(150));

        // Connect and send actions in both wire forms.
        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, "left").unwrap();
            writeln!(stream, r#""swap-screen""#).unwrap();
            writeln!(stream, "FullScreen").unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        // Collect actions (give the listener a moment to process).
        std::thread::sleep(std::time::Duration::from_millis(150));
        let actions: Vec<Action> = rx.try_iter().collect();

        assert_eq!(actions, vec![Action::Left, Action::SwapScreen, Action::FullScreen]);

        // Clean up.
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_lines_do_not_crash() {
        let path = tmp_socket_path();
        let path2 = path.clone();
        let (tx, rx) = mpsc::channel();

        let _handle = std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path2);
            let _ = listener.run(tx);
        });

        std::thread::sleep(std::time::Duration::from_millis(150));

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, "not an action at all").unwrap();
            writeln!(stream).unwrap();
            writeln!(stream, "center").unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        std::thread::sleep(std::time::Duration::from_millis(150));
        let actions: Vec<Action> = rx.try_iter().collect();
        // Only the valid action should have arrived.
        assert_eq!(actions, vec![Action::Center]);

        let _ = std::fs::remove_file(&path);
    }
}
