use std::time::Duration;

use crate::position::PositionOptions;
use crate::shared::{Corner, DEFAULT_TYPEAHEAD_BUFFER_TIME, FocusState, Positioning};

/// Construction-time properties of a menu.
///
/// ```rust
/// use folio_menu::{Corner, FocusState, MenuConfig};
///
/// let config = MenuConfig::default()
///     .anchor_corner("end-start".parse().unwrap())
///     .default_focus(FocusState::FirstItem)
///     .quick(true);
/// assert_eq!(config.anchor_corner, Corner::EndStart);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MenuConfig {
    /// Start open.
    pub open: bool,
    /// Skip the open/close animation.
    pub quick: bool,
    pub positioning: Positioning,
    /// Corner of the anchor the menu attaches to.
    pub anchor_corner: Corner,
    /// Corner of the menu that sits on the anchor corner.
    pub menu_corner: Corner,
    /// Let content such as submenus spill outside the surface.
    pub has_overflow: bool,
    /// Inline offset in pixels.
    pub x_offset: f32,
    /// Block offset in pixels.
    pub y_offset: f32,
    pub default_focus: FocusState,
    pub stay_open_on_outside_click: bool,
    pub stay_open_on_focusout: bool,
    pub typeahead_window: Duration,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            open: false,
            quick: false,
            positioning: Positioning::Absolute,
            anchor_corner: Corner::StartEnd,
            menu_corner: Corner::StartStart,
            has_overflow: false,
            x_offset: 0.0,
            y_offset: 0.0,
            default_focus: FocusState::None,
            stay_open_on_outside_click: false,
            stay_open_on_focusout: false,
            typeahead_window: DEFAULT_TYPEAHEAD_BUFFER_TIME,
        }
    }
}

impl MenuConfig {
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    pub fn quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }

    pub fn positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    pub fn anchor_corner(mut self, corner: Corner) -> Self {
        self.anchor_corner = corner;
        self
    }

    pub fn menu_corner(mut self, corner: Corner) -> Self {
        self.menu_corner = corner;
        self
    }

    pub fn has_overflow(mut self, has_overflow: bool) -> Self {
        self.has_overflow = has_overflow;
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn default_focus(mut self, focus: FocusState) -> Self {
        self.default_focus = focus;
        self
    }

    pub fn stay_open_on_outside_click(mut self, stay: bool) -> Self {
        self.stay_open_on_outside_click = stay;
        self
    }

    pub fn stay_open_on_focusout(mut self, stay: bool) -> Self {
        self.stay_open_on_focusout = stay;
        self
    }

    pub fn typeahead_window(mut self, window: Duration) -> Self {
        self.typeahead_window = window;
        self
    }

    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            positioning: self.positioning,
            anchor_corner: self.anchor_corner,
            menu_corner: self.menu_corner,
            x_offset: self.x_offset,
            y_offset: self.y_offset,
        }
    }
}
