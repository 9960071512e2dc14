//! # Corner positioning
//!
//! Places a menu surface next to its anchor by pinning one corner of the menu
//! to one corner of the anchor:
//!
//! 1. Seed `(top, left)` from the anchor corner.
//! 2. Pull the point back by the menu's width and/or height when the menu
//!    corner sits on the end edge.
//! 3. Add the caller's offsets.
//!
//! There is no viewport collision handling: a menu larger than the space left
//! in the viewport overflows it. Renderers that need flipping or clamping do it
//! on top of the computed position.
//!
//! ```rust
//! use folio_core::Rect;
//! use folio_menu::{Corner, compute_position};
//!
//! let anchor = Rect::from_edges(100.0, 50.0, 150.0, 130.0);
//! let menu = Rect::new(0.0, 0.0, 80.0, 40.0);
//! let p = compute_position(anchor, menu, Corner::StartEnd, Corner::StartEnd);
//! assert_eq!((p.y, p.x), (100.0, 70.0));
//! ```

use folio_core::{Rect, Transform, Vec2};

use crate::shared::{Corner, PositionMode, Positioning};

/// Source of element bounds (a host's `getBoundingClientRect`).
///
/// Either side may be missing before the element is mounted and measured.
pub trait Measure {
    fn anchor_rect(&self) -> Option<Rect>;
    fn menu_rect(&self) -> Option<Rect>;
}

/// Fixed rects, for hosts that measure ahead of time and for tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticMeasure {
    pub anchor: Option<Rect>,
    pub menu: Option<Rect>,
}

impl Measure for StaticMeasure {
    fn anchor_rect(&self) -> Option<Rect> {
        self.anchor
    }
    fn menu_rect(&self) -> Option<Rect> {
        self.menu
    }
}

/// Placement handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuPosition {
    pub top: f32,
    pub left: f32,
    pub mode: PositionMode,
    pub transform: Transform,
}

impl MenuPosition {
    pub fn origin(mode: PositionMode) -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            mode,
            transform: Transform::identity(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionOptions {
    pub positioning: Positioning,
    pub anchor_corner: Corner,
    pub menu_corner: Corner,
    pub x_offset: f32,
    pub y_offset: f32,
}

/// Pure corner arithmetic; `x` is `left`, `y` is `top`.
pub fn compute_position(anchor: Rect, menu: Rect, anchor_corner: Corner, menu_corner: Corner) -> Vec2 {
    let mut top = if anchor_corner.block_is_end() {
        anchor.bottom()
    } else {
        anchor.top()
    };
    let mut left = if anchor_corner.inline_is_end() {
        anchor.right()
    } else {
        anchor.left()
    };

    if menu_corner.block_is_end() {
        top -= menu.h;
    }
    if menu_corner.inline_is_end() {
        left -= menu.w;
    }

    Vec2 { x: left, y: top }
}

/// Keeps the last computed placement for one menu.
#[derive(Clone, Debug)]
pub struct MenuPositioner {
    options: PositionOptions,
    current: MenuPosition,
}

impl MenuPositioner {
    pub fn new(options: PositionOptions) -> Self {
        Self {
            current: MenuPosition::origin(PositionMode::for_positioning(options.positioning)),
            options,
        }
    }

    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    pub fn position(&self) -> MenuPosition {
        self.current
    }

    /// Recomputes from fresh measurements. Returns `false`, leaving the previous
    /// position untouched, when either rect is unavailable.
    pub fn update(&mut self, anchor: Option<Rect>, menu: Option<Rect>) -> bool {
        let (Some(anchor), Some(menu)) = (anchor, menu) else {
            log::trace!("menu position skipped: element not measured yet");
            return false;
        };
        let o = &self.options;
        let p = compute_position(anchor, menu, o.anchor_corner, o.menu_corner);
        self.current = MenuPosition {
            top: p.y + o.y_offset,
            left: p.x + o.x_offset,
            mode: PositionMode::for_positioning(o.positioning),
            transform: Transform::identity(),
        };
        log::debug!(
            "menu positioned at top={} left={} ({:?})",
            self.current.top,
            self.current.left,
            self.current.mode
        );
        true
    }

    pub fn update_from(&mut self, measure: &dyn Measure) -> bool {
        self.update(measure.anchor_rect(), measure.menu_rect())
    }
}
