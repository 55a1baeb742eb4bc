//! Window geometry engine.
//!
//! Everything in this module is a pure function: given the focused window's
//! current frame and its display's usable bounds, compute the target frame.
//! No I/O, no window-system calls, no state between invocations.
//!
//! Repeat-press cycling works by *classifying* the current frame against
//! the known cycle steps instead of remembering anything: a window that is
//! already snapped to an edge at step `k`'s size advances to step `k + 1`.
//! Classification uses a pixel tolerance so that rounding applied by the
//! compositor on a previous snap does not break the cycle.

use crate::command::DisplayInfo;

/// Default size cycle for the edge actions: half, two thirds, one third.
pub const SIZE_CYCLE: [f64; 3] = [1.0 / 2.0, 2.0 / 3.0, 1.0 / 3.0];

/// Default snap tolerance in pixels, for both anchor-point proximity and
/// cycle-step classification.
pub const SNAP_TOLERANCE: i32 = 8;

/// Rectangle in pixel coordinates.
///
/// One shared coordinate space with the origin at the top-left of the
/// primary display and y growing downward.  Used for window frames and
/// display bounds alike.  `Rect` is a value type: every operation returns
/// a new rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The right edge coordinate.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// The bottom edge coordinate.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// The pixel position of the given anchor of this rectangle.
    pub fn anchor_point(&self, anchor: Anchor) -> (i32, i32) {
        match anchor {
            Anchor::TopLeft => (self.x, self.y),
            Anchor::TopRight => (self.right(), self.y),
            Anchor::BottomRight => (self.right(), self.bottom()),
            Anchor::BottomLeft => (self.x, self.bottom()),
            Anchor::Center => (self.x + self.w / 2, self.y + self.h / 2),
        }
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the point `(px, py)` lies within this rectangle.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// A named corner (or the center) of a rectangle.
///
/// Used both to pin a window to a point on the display and to classify a
/// window's current position for cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Center,
}

/// Display edge targeted by the four directional snap actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Whether `frame`'s `anchor` point lies within `tolerance` pixels of
/// `point` on both axes.
///
/// This is the snap predicate the cycle classification is built on: "is
/// this window already pinned here".
pub fn is_origin_near(frame: Rect, anchor: Anchor, point: (i32, i32), tolerance: i32) -> bool {
    let (ax, ay) = frame.anchor_point(anchor);
    (ax - point.0).abs() <= tolerance && (ay - point.1).abs() <= tolerance
}

/// Scale `len` by `fraction`, rounding to the nearest pixel.
fn scaled(len: i32, fraction: f64) -> i32 {
    (len as f64 * fraction).round() as i32
}

/// The rectangle for one cycle step: `fraction` of the usable width (Left/
/// Right) or height (Top/Bottom), full size on the other axis, pinned to
/// the edge.
fn edge_rect(usable: Rect, edge: Edge, fraction: f64) -> Rect {
    match edge {
        Edge::Left => Rect::new(usable.x, usable.y, scaled(usable.w, fraction), usable.h),
        Edge::Right => {
            let w = scaled(usable.w, fraction);
            Rect::new(usable.right() - w, usable.y, w, usable.h)
        }
        Edge::Top => Rect::new(usable.x, usable.y, usable.w, scaled(usable.h, fraction)),
        Edge::Bottom => {
            let h = scaled(usable.h, fraction);
            Rect::new(usable.x, usable.bottom() - h, usable.w, h)
        }
    }
}

/// The display anchor a frame must sit at to count as snapped to `edge`.
fn edge_anchor(usable: Rect, edge: Edge) -> (Anchor, (i32, i32)) {
    match edge {
        Edge::Left | Edge::Top => (Anchor::TopLeft, (usable.x, usable.y)),
        Edge::Right => (Anchor::TopRight, (usable.right(), usable.y)),
        Edge::Bottom => (Anchor::BottomLeft, (usable.x, usable.bottom())),
    }
}

/// Classify `frame` as one of the cycle steps for `edge`, or `None` if it
/// is not currently snapped there.
///
/// A frame is "at step k" when its edge anchor is within `tolerance`
/// pixels of the display's corresponding anchor *and* its edge-aligned
/// dimension is within `tolerance` pixels of step k's exact value.
fn classify_step(
    frame: Rect,
    usable: Rect,
    edge: Edge,
    fractions: &[f64],
    tolerance: i32,
) -> Option<usize> {
    let (anchor, point) = edge_anchor(usable, edge);
    if !is_origin_near(frame, anchor, point, tolerance) {
        return None;
    }
    let (dim, total) = match edge {
        Edge::Left | Edge::Right => (frame.w, usable.w),
        Edge::Top | Edge::Bottom => (frame.h, usable.h),
    };
    fractions
        .iter()
        .position(|f| (dim - scaled(total, *f)).abs() <= tolerance)
}

/// Snap `frame` to `edge` of `usable`, cycling through `fractions` on
/// repeated invocation.
///
/// A frame not currently at the edge produces the first step; a frame
/// matching step `k` produces step `k + 1`, wrapping back to the first.
pub fn edge_snap(frame: Rect, usable: Rect, edge: Edge, fractions: &[f64], tolerance: i32) -> Rect {
    // An empty cycle would make the action dead; fall back to the default.
    let fractions: &[f64] = if fractions.is_empty() {
        &SIZE_CYCLE
    } else {
        fractions
    };
    let step = match classify_step(frame, usable, edge, fractions, tolerance) {
        Some(k) => (k + 1) % fractions.len(),
        None => 0,
    };
    edge_rect(usable, edge, fractions[step])
}

/// Occupy the entire usable area of the display.
pub fn full_screen(usable: Rect) -> Rect {
    usable
}

/// Center `frame` within `usable`, keeping its size.
///
/// A dimension larger than the usable bounds is clamped to it, so the
/// result never extends outside the display.
pub fn center_in(frame: Rect, usable: Rect) -> Rect {
    let w = frame.w.min(usable.w);
    let h = frame.h.min(usable.h);
    Rect::new(
        usable.x + (usable.w - w) / 2,
        usable.y + (usable.h - h) / 2,
        w,
        h,
    )
}

/// Re-place `frame` from `source` usable bounds into `target` usable
/// bounds, preserving its fractional position and size.
///
/// A window occupying the left half of a 2560-wide display lands on the
/// left half of a 1920-wide one.  The result is clamped into the target,
/// so a frame hanging off the source display cannot land outside the
/// target.
pub fn swap_target(frame: Rect, source: Rect, target: Rect) -> Rect {
    if source.w <= 0 || source.h <= 0 {
        // Degenerate source bounds: nothing meaningful to preserve.
        return target;
    }
    let fx = (frame.x - source.x) as f64 / source.w as f64;
    let fy = (frame.y - source.y) as f64 / source.h as f64;
    let fw = frame.w as f64 / source.w as f64;
    let fh = frame.h as f64 / source.h as f64;

    let w = scaled(target.w, fw).clamp(1, target.w);
    let h = scaled(target.h, fh).clamp(1, target.h);
    let x = (target.x + scaled(target.w, fx)).clamp(target.x, target.right() - w);
    let y = (target.y + scaled(target.h, fy)).clamp(target.y, target.bottom() - h);
    Rect::new(x, y, w, h)
}

/// The display after `source` in the ordered list, wrapping to the first.
///
/// Returns `None` when fewer than two displays exist (swap-screen is then
/// a no-op) or when `source` is not in the list.
pub fn next_display<'a>(displays: &'a [DisplayInfo], source: &str) -> Option<&'a DisplayInfo> {
    if displays.len() < 2 {
        return None;
    }
    let idx = displays.iter().position(|d| d.name == source)?;
    Some(&displays[(idx + 1) % displays.len()])
}

//  Tests
