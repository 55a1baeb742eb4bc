//! Entry point for the **hyprshift** daemon.
//!
//! Spawns the configured [`ActionSource`](hyprshift::traits::ActionSource)s
//! on background threads and processes incoming actions on the main
//! thread, strictly in arrival order — the size cycle depends on each
//! action seeing the result of the previous one.

use hyprshift::command::Action;
use hyprshift::config::Config;
use hyprshift::dispatcher::ActionDispatcher;
use hyprshift::hyprland::ws::HyprlandWindowSystem;
use hyprshift::ipc::listener::UnixSocketListener;
use hyprshift::traits::{ActionSource, WindowSystem};
use log::{error, info};
use std::sync::mpsc;

/// Default socket path for the action listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/hyprshift.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprshift`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("hyprshift")
}

/// Try to load the config from `$XDG_CONFIG_HOME/hyprshift/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();

    let ws = HyprlandWindowSystem::new();
    match ws.displays() {
        Ok(d) => info!("found {} display(s)", d.len()),
        Err(e) => {
            error!("failed to query displays: {}", e);
            std::process::exit(1);
        }
    }

    let mut dispatcher = ActionDispatcher::new(ws);
    dispatcher.set_cycle_config(config.cycle.clone());

    let (action_tx, action_rx) = mpsc::channel::<Action>();
    spawn_action_sources(action_tx, &config);

    info!("hyprshift running");
    for action in action_rx {
        if let Err(e) = dispatcher.perform(action) {
            error!("action error: {}", e);
        }
    }
    info!("all action sources closed, exiting");
}

fn spawn_action_sources(tx: mpsc::Sender<Action>, config: &Config) {
    let path = config
        .socket
        .path
        .clone()
        .unwrap_or_else(default_socket_path);
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
