//! Core traits that decouple hyprshift from any specific window system or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test
//! harness, …) implements one of these traits.  The
//! [`ActionDispatcher`](crate::dispatcher::ActionDispatcher) only depends
//! on these abstractions.

use crate::command::{Action, DisplayInfo, WindowInfo};
use crate::geometry::Rect;
use std::sync::mpsc;

/// Abstraction over a window system that can report and move windows.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.  The dispatcher queries it fresh on every
/// action — implementations must not require any call ordering.
pub trait WindowSystem {
    /// The error type produced by this window system.
    type Error: std::error::Error + Send + 'static;

    /// Return the ordered list of displays.
    ///
    /// The order must be stable across calls within one session; it
    /// defines what "next display" means for the swap-screen action.
    fn displays(&self) -> Result<Vec<DisplayInfo>, Self::Error>;

    /// Return the currently focused window, or `None` if nothing is
    /// focused (e.g. the desktop has focus).  Must not block indefinitely.
    fn focused_window(&self) -> Result<Option<WindowInfo>, Self::Error>;

    /// Return the window's current frame in the shared coordinate space,
    /// or `None` if the window does not expose standard geometry (some
    /// windows refuse size queries — those are skipped, not errors).
    fn frame(&self, window: &WindowInfo) -> Result<Option<Rect>, Self::Error>;

    /// Ask the window system to move/resize `window` to `frame` on
    /// `display`.
    ///
    /// Fire-and-forget: the dispatcher never re-queries to verify the
    /// request was honoured exactly (window systems may apply minimum-size
    /// or tiling constraints of their own).
    fn set_frame(
        &self,
        window: &WindowInfo,
        frame: Rect,
        display: &DisplayInfo,
    ) -> Result<(), Self::Error>;
}

/// A source of [`Action`]s.
///
/// Implementations listen on some transport — a Unix socket, an in-memory
/// channel, … — and forward parsed actions into the provided
/// [`mpsc::Sender`].  The dispatcher end drains the channel strictly in
/// arrival order, which is what keeps repeat-press cycling predictable.
///
/// # Contract
///
/// * [`run`](ActionSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Each received action must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
pub trait ActionSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Action`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Action>) -> Result<(), Self::Error>;
}
