//! Tokens shared by the menu components, spelled the way the host markup
//! spells them (`"start-end"`, `"first-item"`, ...).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use folio_core::ParseError;

/// How long typed characters keep extending the typeahead buffer.
pub const DEFAULT_TYPEAHEAD_BUFFER_TIME: Duration = Duration::from_millis(1000);
/// Delay between the pointer entering a submenu trigger and the submenu opening.
pub const DEFAULT_HOVER_OPEN_DELAY: Duration = Duration::from_millis(400);
/// Delay between the pointer leaving a submenu trigger and the submenu closing.
pub const DEFAULT_HOVER_CLOSE_DELAY: Duration = Duration::from_millis(400);

macro_rules! tokens {
    ($ty:ident, $kind:literal, { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $token),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($ty::$variant),)+
                    "" => Err(ParseError::Empty {
                        kind: $kind,
                        expected: concat!($($token, " "),+),
                    }),
                    other => Err(ParseError::unknown($kind, other)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Which corner of the anchor (or of the menu) to align. Block axis first,
/// inline axis second: `StartEnd` is the top-right corner in LTR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Corner {
    StartStart,
    StartEnd,
    EndStart,
    EndEnd,
}

tokens!(Corner, "corner", {
    StartStart => "start-start",
    StartEnd => "start-end",
    EndStart => "end-start",
    EndEnd => "end-end",
});

impl Corner {
    pub fn block_is_end(self) -> bool {
        matches!(self, Corner::EndStart | Corner::EndEnd)
    }

    pub fn inline_is_end(self) -> bool {
        matches!(self, Corner::StartEnd | Corner::EndEnd)
    }
}

/// What receives focus when a menu opens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FocusState {
    #[default]
    None,
    ListRoot,
    FirstItem,
    LastItem,
}

tokens!(FocusState, "focus state", {
    None => "none",
    ListRoot => "list-root",
    FirstItem => "first-item",
    LastItem => "last-item",
});

/// Positioning strategy requested by the embedder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Positioning {
    /// Relative to the anchor's offset parent.
    #[default]
    Absolute,
    /// Relative to the window.
    Fixed,
    /// Relative to the document.
    Document,
    /// Top layer (popover API).
    Popover,
}

tokens!(Positioning, "positioning", {
    Absolute => "absolute",
    Fixed => "fixed",
    Document => "document",
    Popover => "popover",
});

/// CSS `position` the renderer applies to the menu surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionMode {
    #[default]
    Absolute,
    Fixed,
}

impl PositionMode {
    pub fn for_positioning(positioning: Positioning) -> Self {
        match positioning {
            Positioning::Document | Positioning::Popover => PositionMode::Fixed,
            Positioning::Absolute | Positioning::Fixed => PositionMode::Absolute,
        }
    }
}

/// Why a menu closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    ClickSelection,
    Keydown(folio_core::Key),
    FocusOut,
    OutsideClick,
    HoverOut,
}

/// Axis along which a segmented set lays out (and navigates) its buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

tokens!(Orientation, "orientation", {
    Horizontal => "horizontal",
    Vertical => "vertical",
});
