//! [`WindowSystem`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.
//!
//! Display usable bounds come from the `reserved` insets Hyprland reports
//! per monitor (bars, notches).  Frames are applied with addressed
//! `movewindowpixel` / `resizewindowpixel` dispatches; Hyprland may
//! re-tile a non-floating window afterwards, which the dispatcher accepts
//! as compositor behaviour.

use crate::command::{DisplayInfo, WindowInfo};
use crate::geometry::Rect;
use crate::traits::WindowSystem;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window system.
///
/// All communication happens over Hyprland's IPC socket.  No child
/// processes are spawned; each method call opens a short-lived request.
pub struct HyprlandWindowSystem;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl Default for HyprlandWindowSystem {
    fn default() -> Self {
        Self
    }
}

impl HyprlandWindowSystem {
    /// Create a new handle.
    ///
    /// No connection is opened eagerly; each method call opens a
    /// short-lived IPC request.
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    id: i64,
    name: String,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    /// Insets reserved for bars etc.: `[left, top, right, bottom]`.
    #[serde(default)]
    reserved: [i32; 4],
}

impl MonitorJson {
    fn into_display(self) -> DisplayInfo {
        let bounds = Rect::new(self.x, self.y, self.width, self.height);
        let [l, t, r, b] = self.reserved;
        DisplayInfo {
            name: self.name,
            bounds,
            usable: Rect::new(bounds.x + l, bounds.y + t, bounds.w - l - r, bounds.h - t - b),
        }
    }
}

/// Subset of the JSON object returned by `j/activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    address: String,
    title: String,
    monitor: i64,
}

/// Subset of the JSON objects returned by `j/clients`.
#[derive(Deserialize)]
struct ClientJson {
    address: String,
    at: [i32; 2],
    size: [i32; 2],
}

fn monitors_json() -> Result<Vec<MonitorJson>, HyprlandError> {
    let json = ipc_json("monitors")?;
    serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))
}

/// Resolve a Hyprland monitor numeric id to its name by querying
/// `j/monitors`.
fn monitor_name_by_id(id: i64) -> Result<String, HyprlandError> {
    monitors_json()?
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.clone())
        .ok_or_else(|| HyprlandError(format!("unknown monitor id: {}", id)))
}

//  WindowSystem implementation

impl WindowSystem for HyprlandWindowSystem {
    type Error = HyprlandError;

    fn displays(&self) -> Result<Vec<DisplayInfo>, Self::Error> {
        Ok(monitors_json()?
            .into_iter()
            .map(MonitorJson::into_display)
            .collect())
    }

    fn focused_window(&self) -> Result<Option<WindowInfo>, Self::Error> {
        let json = ipc_json("activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let w: ActiveWindowJson =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        let monitor_name = monitor_name_by_id(w.monitor)?;
        Ok(Some(WindowInfo {
            address: w.address,
            title: w.title,
            monitor: monitor_name,
        }))
    }

    fn frame(&self, window: &WindowInfo) -> Result<Option<Rect>, Self::Error> {
        let json = ipc_json("clients")?;
        let clients: Vec<ClientJson> =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        // A window that vanished between queries, or one reporting a
        // degenerate size, has no usable geometry.
        Ok(clients
            .into_iter()
            .find(|c| c.address == window.address)
            .filter(|c| c.size[0] > 0 && c.size[1] > 0)
            .map(|c| Rect::new(c.at[0], c.at[1], c.size[0], c.size[1])))
    }

    fn set_frame(
        &self,
        window: &WindowInfo,
        frame: Rect,
        _display: &DisplayInfo,
    ) -> Result<(), Self::Error> {
        // Hyprland's coordinate space is global, so the target display is
        // implicit in the coordinates.
        ipc_dispatch(&format!(
            "movewindowpixel exact {} {},address:{}",
            frame.x, frame.y, window.address
        ))?;
        ipc_dispatch(&format!(
            "resizewindowpixel exact {} {},address:{}",
            frame.w, frame.h, window.address
        ))
    }
}
