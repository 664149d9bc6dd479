//! Input and window-state vocabulary
//!
//! Keys, buttons, actions and event payloads are the `glfw` crate's own types so
//! that values move across the native boundary unchanged. The enums defined
//! here give names to the integer selectors the native API uses for input modes
//! and window attributes.

pub use glfw::{Action, CursorMode, Key, Modifiers, MouseButton, Scancode, StandardCursor, WindowEvent};

/// Selector for [`InputMode`] queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputModeKind {
    /// Cursor visibility and capture
    Cursor,
    /// Key presses are remembered until polled
    StickyKeys,
    /// Button presses are remembered until polled
    StickyMouseButtons,
    /// Modifier bits include Caps Lock and Num Lock
    LockKeyMods,
    /// Unscaled, unaccelerated mouse motion while the cursor is disabled
    RawMouseMotion,
}

/// Value of one input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Cursor visibility and capture
    Cursor(CursorMode),
    /// Key presses are remembered until polled
    StickyKeys(bool),
    /// Button presses are remembered until polled
    StickyMouseButtons(bool),
    /// Modifier bits include Caps Lock and Num Lock
    LockKeyMods(bool),
    /// Unscaled, unaccelerated mouse motion while the cursor is disabled
    RawMouseMotion(bool),
}

impl InputMode {
    /// Which mode this value belongs to
    pub const fn kind(&self) -> InputModeKind {
        match self {
            Self::Cursor(_) => InputModeKind::Cursor,
            Self::StickyKeys(_) => InputModeKind::StickyKeys,
            Self::StickyMouseButtons(_) => InputModeKind::StickyMouseButtons,
            Self::LockKeyMods(_) => InputModeKind::LockKeyMods,
            Self::RawMouseMotion(_) => InputModeKind::RawMouseMotion,
        }
    }

    /// Value a freshly created window reports for `kind`
    pub const fn initial(kind: InputModeKind) -> Self {
        match kind {
            InputModeKind::Cursor => Self::Cursor(CursorMode::Normal),
            InputModeKind::StickyKeys => Self::StickyKeys(false),
            InputModeKind::StickyMouseButtons => Self::StickyMouseButtons(false),
            InputModeKind::LockKeyMods => Self::LockKeyMods(false),
            InputModeKind::RawMouseMotion => Self::RawMouseMotion(false),
        }
    }
}

/// Boolean window attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAttribute {
    /// Window has input focus
    Focused,
    /// Window is iconified
    Iconified,
    /// Window is maximized
    Maximized,
    /// Cursor is over the content area
    Hovered,
    /// Window is visible
    Visible,
    /// User can resize the window
    Resizable,
    /// Window has decorations
    Decorated,
    /// Full screen window iconifies on focus loss
    AutoIconify,
    /// Window is always on top
    Floating,
    /// Framebuffer is transparent
    TransparentFramebuffer,
    /// Window is focused when shown
    FocusOnShow,
}

impl WindowAttribute {
    /// Whether the attribute can be changed after creation
    pub const fn is_settable(self) -> bool {
        matches!(
            self,
            Self::Resizable | Self::Decorated | Self::AutoIconify | Self::Floating | Self::FocusOnShow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_mode_kind_round_trip() {
        for kind in [
            InputModeKind::Cursor,
            InputModeKind::StickyKeys,
            InputModeKind::StickyMouseButtons,
            InputModeKind::LockKeyMods,
            InputModeKind::RawMouseMotion,
        ] {
            assert_eq!(InputMode::initial(kind).kind(), kind);
        }
    }

    #[test]
    fn test_only_mutable_attributes_are_settable() {
        assert!(WindowAttribute::Floating.is_settable());
        assert!(WindowAttribute::Decorated.is_settable());
        assert!(!WindowAttribute::Focused.is_settable());
        assert!(!WindowAttribute::Hovered.is_settable());
    }
}
