//! Actions and the data types shared across the crate.
//!
//! [`Action`] is the closed set of layout operations the dispatcher can
//! perform; [`DisplayInfo`] and [`WindowInfo`] carry the window-system
//! state those operations work on.
//!
//! Action sources forward raw strings; the daemon parses identifiers
//! case-insensitively, with or without separators ("fullscreen",
//! "full-screen", "FullScreen" are all accepted).

use crate::geometry::Rect;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A window layout action.
///
/// The set is fixed and small: dispatch is an exhaustive `match`, not a
/// lookup.  Actions carry no data beyond their identity — the geometry
/// they produce depends only on the live window and display state at the
/// moment they are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    /// Snap to the left edge, cycling through the configured widths.
    Left,
    /// Snap to the right edge, cycling through the configured widths.
    Right,
    /// Snap to the top edge, cycling through the configured heights.
    Top,
    /// Snap to the bottom edge, cycling through the configured heights.
    Bottom,
    /// Fill the display's entire usable area.
    FullScreen,
    /// Center the window, keeping its size.
    Center,
    /// Move the window to the next display, preserving relative placement.
    SwapScreen,
}

impl Action {
    /// All actions, in menu order.
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::Top,
        Action::Bottom,
        Action::FullScreen,
        Action::Center,
        Action::SwapScreen,
    ];

    /// Presentation metadata for this action.
    pub fn info(self) -> ActionInfo {
        match self {
            Action::Left => ActionInfo::new("left", "Left", 1),
            Action::Right => ActionInfo::new("right", "Right", 2),
            Action::Top => ActionInfo::new("top", "Top", 3),
            Action::Bottom => ActionInfo::new("bottom", "Bottom", 4),
            Action::FullScreen => ActionInfo::new("fullscreen", "Full Screen", 5),
            Action::Center => ActionInfo::new("center", "Center", 6),
            Action::SwapScreen => ActionInfo::new("swap-screen", "Swap Screen", 7),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().identifier)
    }
}

/// Parse an action identifier (case-insensitive; separators ignored).
fn parse_action(s: &str) -> Option<Action> {
    let normalized: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect();
    match normalized.as_str() {
        "left" => Some(Action::Left),
        "right" => Some(Action::Right),
        "top" => Some(Action::Top),
        "bottom" => Some(Action::Bottom),
        "fullscreen" => Some(Action::FullScreen),
        "center" => Some(Action::Center),
        "swapscreen" => Some(Action::SwapScreen),
        _ => None,
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_action(s).ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// Error from parsing an action identifier.
#[derive(Debug, thiserror::Error)]
#[error("unknown action: {0:?}")]
pub struct ParseActionError(String);

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_action(&s).ok_or_else(|| DeError::custom(format!("invalid action: {:?}", s)))
    }
}

/// Presentation metadata for one action: a stable identifier, a
/// human-readable label, and an ordinal tag for menu items.
///
/// Pure passthrough for a status-item front end; nothing in the engine
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionInfo {
    pub identifier: &'static str,
    pub label: &'static str,
    pub ui_tag: i32,
}

impl ActionInfo {
    fn new(identifier: &'static str, label: &'static str, ui_tag: i32) -> Self {
        Self {
            identifier,
            label,
            ui_tag,
        }
    }
}

/// A display known to the window system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Unique name the window system uses for this display (e.g. `"DP-1"`).
    pub name: String,
    /// Full bounds on the virtual desktop.
    pub bounds: Rect,
    /// Bounds minus system-reserved areas (bars, docks).  All window
    /// placement happens within these.
    pub usable: Rect,
}

/// Minimal identity of the currently focused window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window system address / id.
    pub address: String,
    /// Human-readable title.
    pub title: String,
    /// Name of the display the window is on (e.g. `"DP-1"`).
    pub monitor: String,
}
