//! The orchestrator that ties actions, the geometry engine, and the window
//! system together.
//!
//! [`ActionDispatcher`] reacts to each [`Action`] by fetching the live
//! window and display state, invoking the matching [`geometry`] function,
//! and applying the returned frame.  State is never cached between
//! actions — the user may have moved or resized the window in the
//! meantime, and classification must see the real frame.

use crate::command::{Action, DisplayInfo, WindowInfo};
use crate::config::CycleConfig;
use crate::geometry::{self, Anchor, Edge, Rect};
use crate::traits::WindowSystem;
use log::{debug, info};

/// Possible errors from the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatcherError {
    /// The window system returned an error.
    #[error("window system error: {0}")]
    WindowSystem(String),
}

/// Performs one fetch → compute → apply sequence per action.
///
/// The dispatcher is generic over any [`WindowSystem`] implementation,
/// making it completely independent of Hyprland or any other concrete
/// backend.
///
/// "Nothing to do" cases — no focused window, a window that refuses
/// geometry queries, swap-screen with a single display — are silent
/// no-ops: the user simply sees nothing happen.  Only transport failures
/// surface as [`DispatcherError`], and the action is abandoned for that
/// invocation; the next one starts a fresh query.
///
/// # Typical usage
///
/// ```ignore
/// let ws = HyprlandWindowSystem::new();
/// let dispatcher = ActionDispatcher::new(ws);
/// dispatcher.perform(Action::Left)?;
/// ```
pub struct ActionDispatcher<W: WindowSystem> {
    ws: W,
    cycle: CycleConfig,
}

impl<W: WindowSystem> ActionDispatcher<W> {
    /// Create a new dispatcher with the default size cycle.
    pub fn new(ws: W) -> Self {
        Self {
            ws,
            cycle: CycleConfig::default(),
        }
    }

    /// Set the size-cycle configuration (fractions and snap tolerance).
    pub fn set_cycle_config(&mut self, cycle: CycleConfig) {
        self.cycle = cycle;
    }

    /// Perform a single [`Action`] against the currently focused window.
    pub fn perform(&self, action: Action) -> Result<(), DispatcherError> {
        let window = match self.ws.focused_window().map_err(Self::ws_err)? {
            Some(w) => w,
            None => {
                debug!("no focused window, nothing to do");
                return Ok(());
            }
        };

        let frame = match self.ws.frame(&window).map_err(Self::ws_err)? {
            Some(f) => f,
            None => {
                debug!("window {} does not expose geometry, skipping", window.address);
                return Ok(());
            }
        };

        let displays = self.ws.displays().map_err(Self::ws_err)?;
        let source = match owning_display(&displays, &window, frame) {
            Some(d) => d,
            None => {
                debug!("no displays reported, nothing to do");
                return Ok(());
            }
        };

        let fractions = &self.cycle.fractions;
        let tolerance = self.cycle.tolerance_px;
        let usable = source.usable;

        let (target, display) = match action {
            Action::Left => (
                geometry::edge_snap(frame, usable, Edge::Left, fractions, tolerance),
                source,
            ),
            Action::Right => (
                geometry::edge_snap(frame, usable, Edge::Right, fractions, tolerance),
                source,
            ),
            Action::Top => (
                geometry::edge_snap(frame, usable, Edge::Top, fractions, tolerance),
                source,
            ),
            Action::Bottom => (
                geometry::edge_snap(frame, usable, Edge::Bottom, fractions, tolerance),
                source,
            ),
            Action::FullScreen => (geometry::full_screen(usable), source),
            Action::Center => (geometry::center_in(frame, usable), source),
            Action::SwapScreen => match geometry::next_display(&displays, &source.name) {
                Some(next) => (geometry::swap_target(frame, usable, next.usable), next),
                None => {
                    debug!("single display, swap-screen is a no-op");
                    return Ok(());
                }
            },
        };

        info!(
            "{} {} -> {:?} on {}",
            action, window.address, target, display.name
        );
        self.ws
            .set_frame(&window, target, display)
            .map_err(Self::ws_err)
    }

    fn ws_err(e: W::Error) -> DispatcherError {
        DispatcherError::WindowSystem(e.to_string())
    }
}

/// Resolve the display a window belongs to.
///
/// Prefers the window system's own report (monitor name), then the display
/// containing the frame's center — the name can go stale if focus moved
/// between queries — then the first display.
fn owning_display<'a>(
    displays: &'a [DisplayInfo],
    window: &WindowInfo,
    frame: Rect,
) -> Option<&'a DisplayInfo> {
    displays
        .iter()
        .find(|d| d.name == window.monitor)
        .or_else(|| {
            let (cx, cy) = frame.anchor_point(Anchor::Center);
            displays.iter().find(|d| d.bounds.contains_point(cx, cy))
        })
        .or_else(|| displays.first())
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Record-keeping mock window system.
    ///
    /// With `feedback` enabled, applied frames become the window's new
    /// frame — modelling the real loop where the next key press sees the
    /// result of the previous one.
    #[derive(Debug)]
    struct RecorderWs {
        displays: Vec<DisplayInfo>,
        focused: Option<WindowInfo>,
        frame: RefCell<Option<Rect>>,
        applied: RefCell<Vec<(Rect, String)>>,
        feedback: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recorder error")]
    struct RecorderErr;

    impl RecorderWs {
        fn single_display() -> Self {
            Self::with_displays(vec![DisplayInfo {
                name: "DP-1".into(),
                bounds: Rect::new(0, 0, 1000, 830),
                usable: Rect::new(0, 30, 1000, 800),
            }])
        }

        fn two_displays() -> Self {
            Self::with_displays(vec![
                DisplayInfo {
                    name: "DP-1".into(),
                    bounds: Rect::new(0, 0, 1000, 830),
                    usable: Rect::new(0, 30, 1000, 800),
                },
                DisplayInfo {
                    name: "HDMI-A-1".into(),
                    bounds: Rect::new(1000, 0, 1920, 1080),
                    usable: Rect::new(1000, 0, 1920, 1080),
                },
            ])
        }

        fn with_displays(displays: Vec<DisplayInfo>) -> Self {
            Self {
                displays,
                focused: Some(WindowInfo {
                    address: "0xbeef".into(),
                    title: "test".into(),
                    monitor: "DP-1".into(),
                }),
                frame: RefCell::new(Some(Rect::new(120, 90, 640, 480))),
                applied: RefCell::new(Vec::new()),
                feedback: true,
            }
        }
    }

    impl WindowSystem for RecorderWs {
        type Error = RecorderErr;

        fn displays(&self) -> Result<Vec<DisplayInfo>, RecorderErr> {
            Ok(self.displays.clone())
        }

        fn focused_window(&self) -> Result<Option<WindowInfo>, RecorderErr> {
            Ok(self.focused.clone())
        }

        fn frame(&self, _window: &WindowInfo) -> Result<Option<Rect>, RecorderErr> {
            Ok(*self.frame.borrow())
        }

        fn set_frame(
            &self,
            _window: &WindowInfo,
            frame: Rect,
            display: &DisplayInfo,
        ) -> Result<(), RecorderErr> {
            self.applied.borrow_mut().push((frame, display.name.clone()));
            if self.feedback {
                *self.frame.borrow_mut() = Some(frame);
            }
            Ok(())
        }
    }

    fn make_dispatcher(ws: RecorderWs) -> ActionDispatcher<RecorderWs> {
        ActionDispatcher::new(ws)
    }

    #[test]
    fn no_focused_window_is_a_silent_noop() {
        let mut ws = RecorderWs::single_display();
        ws.focused = None;
        let d = make_dispatcher(ws);
        d.perform(Action::Left).unwrap();
        assert!(d.ws.applied.borrow().is_empty());
    }

    #[test]
    fn geometry_refusing_window_is_a_silent_noop() {
        let ws = RecorderWs::single_display();
        *ws.frame.borrow_mut() = None;
        let d = make_dispatcher(ws);
        d.perform(Action::FullScreen).unwrap();
        assert!(d.ws.applied.borrow().is_empty());
    }

    #[test]
    fn left_snaps_to_half_of_usable() {
        let d = make_dispatcher(RecorderWs::single_display());
        d.perform(Action::Left).unwrap();
        let applied = d.ws.applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0], (Rect::new(0, 30, 500, 800), "DP-1".into()));
    }

    #[test]
    fn repeated_left_cycles_through_sizes() {
        // Each press sees the previous press's result via feedback, so the
        // widths must walk the whole cycle and wrap.
        let d = make_dispatcher(RecorderWs::single_display());
        for _ in 0..4 {
            d.perform(Action::Left).unwrap();
        }
        let widths: Vec<i32> = d.ws.applied.borrow().iter().map(|(r, _)| r.w).collect();
        assert_eq!(widths, vec![500, 667, 333, 500]);
    }

    #[test]
    fn all_edge_actions_stay_within_usable() {
        for action in [Action::Left, Action::Right, Action::Top, Action::Bottom] {
            let d = make_dispatcher(RecorderWs::single_display());
            d.perform(action).unwrap();
            let usable = d.ws.displays[0].usable;
            let rect = d.ws.applied.borrow()[0].0;
            assert!(usable.contains(&rect), "{} escaped usable: {:?}", action, rect);
        }
    }

    #[test]
    fn fullscreen_fills_the_usable_bounds() {
        let d = make_dispatcher(RecorderWs::single_display());
        d.perform(Action::FullScreen).unwrap();
        let rect = d.ws.applied.borrow()[0].0;
        assert_eq!(rect, Rect::new(0, 30, 1000, 800));
    }

    #[test]
    fn center_keeps_the_window_size() {
        let d = make_dispatcher(RecorderWs::single_display());
        d.perform(Action::Center).unwrap();
        let rect = d.ws.applied.borrow()[0].0;
        assert_eq!((rect.w, rect.h), (640, 480));
        assert_eq!(rect, Rect::new(180, 190, 640, 480));
    }

    #[test]
    fn swap_screen_with_single_display_is_a_noop() {
        let d = make_dispatcher(RecorderWs::single_display());
        d.perform(Action::SwapScreen).unwrap();
        assert!(d.ws.applied.borrow().is_empty());
    }

    #[test]
    fn swap_screen_targets_the_next_display() {
        let d = make_dispatcher(RecorderWs::two_displays());
        d.perform(Action::SwapScreen).unwrap();
        let applied = d.ws.applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].1, "HDMI-A-1");
        let target_usable = d.ws.displays[1].usable;
        assert!(target_usable.contains(&applied[0].0));
    }

    #[test]
    fn swap_screen_preserves_relative_placement() {
        let ws = RecorderWs::two_displays();
        // Left half of DP-1's usable bounds.
        *ws.frame.borrow_mut() = Some(Rect::new(0, 30, 500, 800));
        let d = make_dispatcher(ws);
        d.perform(Action::SwapScreen).unwrap();
        let rect = d.ws.applied.borrow()[0].0;
        assert_eq!(rect, Rect::new(1000, 0, 960, 1080));
    }

    #[test]
    fn swap_screen_wraps_from_the_last_display() {
        let mut ws = RecorderWs::two_displays();
        ws.frame.replace(Some(Rect::new(1200, 100, 640, 480)));
        if let Some(w) = ws.focused.as_mut() {
            w.monitor = "HDMI-A-1".into();
        }
        let d = make_dispatcher(ws);
        d.perform(Action::SwapScreen).unwrap();
        assert_eq!(d.ws.applied.borrow()[0].1, "DP-1");
    }

    #[test]
    fn stale_monitor_name_falls_back_to_frame_center() {
        let mut ws = RecorderWs::two_displays();
        if let Some(w) = ws.focused.as_mut() {
            w.monitor = "GONE-9".into();
        }
        // Frame centered on HDMI-A-1.
        ws.frame.replace(Some(Rect::new(1500, 200, 640, 480)));
        let d = make_dispatcher(ws);
        d.perform(Action::FullScreen).unwrap();
        let (rect, name) = d.ws.applied.borrow()[0].clone();
        assert_eq!(name, "HDMI-A-1");
        assert_eq!(rect, d.ws.displays[1].usable);
    }

    #[test]
    fn custom_cycle_config_is_used() {
        let mut d = make_dispatcher(RecorderWs::single_display());
        d.set_cycle_config(CycleConfig {
            fractions: vec![0.25],
            tolerance_px: 8,
        });
        d.perform(Action::Left).unwrap();
        let rect = d.ws.applied.borrow()[0].0;
        assert_eq!(rect.w, 250);
    }

    //  Error propagation

    /// Window system whose queries always fail.
    struct FailingWs;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct FailingErr;

    impl WindowSystem for FailingWs {
        type Error = FailingErr;

        fn displays(&self) -> Result<Vec<DisplayInfo>, FailingErr> {
            Err(FailingErr)
        }

        fn focused_window(&self) -> Result<Option<WindowInfo>, FailingErr> {
            Err(FailingErr)
        }

        fn frame(&self, _: &WindowInfo) -> Result<Option<Rect>, FailingErr> {
            Err(FailingErr)
        }

        fn set_frame(&self, _: &WindowInfo, _: Rect, _: &DisplayInfo) -> Result<(), FailingErr> {
            Err(FailingErr)
        }
    }

    #[test]
    fn window_system_failure_surfaces_once() {
        let d = ActionDispatcher::new(FailingWs);
        let err = d.perform(Action::Left).unwrap_err();
        assert!(matches!(err, DispatcherError::WindowSystem(_)));
        assert_eq!(err.to_string(), "window system error: connection refused");
    }
}
