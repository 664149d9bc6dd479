//! Per-window callback slots and event dispatch
//!
//! Each window has at most one callback per event class. Registering a new one
//! replaces the old one and hands it back to the caller. Events drained from
//! the native layer are routed here by [`Context`](crate::Context).

use crate::geometry::{ContentScale, Position, Size};
use crate::handle::Handle;
use crate::input::{Action, Key, Modifiers, MouseButton, Scancode, WindowEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Key press, repeat or release
pub type KeyCallback = dyn FnMut(Key, Scancode, Action, Modifiers);
/// Unicode character input
pub type CharCallback = dyn FnMut(char);
/// Unicode character input with the active modifiers
pub type CharModsCallback = dyn FnMut(char, Modifiers);
/// Mouse button press or release
pub type MouseButtonCallback = dyn FnMut(MouseButton, Action, Modifiers);
/// Cursor moved, in content-area coordinates
pub type CursorPositionCallback = dyn FnMut(Position<f64>);
/// Cursor entered (`true`) or left (`false`) the content area
pub type CursorEnterCallback = dyn FnMut(bool);
/// Scroll offsets
pub type ScrollCallback = dyn FnMut(f64, f64);
/// Paths dropped onto the window
pub type DropCallback = dyn FnMut(&[PathBuf]);
/// Window moved
pub type PositionCallback = dyn FnMut(Position<i32>);
/// Window resized, in screen coordinates
pub type SizeCallback = dyn FnMut(Size<i32>);
/// Framebuffer resized, in pixels
pub type FramebufferSizeCallback = dyn FnMut(Size<i32>);
/// Focus gained (`true`) or lost
pub type FocusCallback = dyn FnMut(bool);
/// Iconified (`true`) or restored
pub type IconifyCallback = dyn FnMut(bool);
/// Maximized (`true`) or restored
pub type MaximizeCallback = dyn FnMut(bool);
/// User asked to close the window
pub type CloseCallback = dyn FnMut();
/// Content area needs redrawing
pub type RefreshCallback = dyn FnMut();
/// Content scale changed
pub type ContentScaleCallback = dyn FnMut(ContentScale);

/// Callback slots of one window
#[derive(Default)]
pub(crate) struct WindowCallbacks {
    pub key: Option<Box<KeyCallback>>,
    pub char: Option<Box<CharCallback>>,
    pub char_mods: Option<Box<CharModsCallback>>,
    pub mouse_button: Option<Box<MouseButtonCallback>>,
    pub cursor_position: Option<Box<CursorPositionCallback>>,
    pub cursor_enter: Option<Box<CursorEnterCallback>>,
    pub scroll: Option<Box<ScrollCallback>>,
    pub drop: Option<Box<DropCallback>>,
    pub position: Option<Box<PositionCallback>>,
    pub size: Option<Box<SizeCallback>>,
    pub framebuffer_size: Option<Box<FramebufferSizeCallback>>,
    pub focus: Option<Box<FocusCallback>>,
    pub iconify: Option<Box<IconifyCallback>>,
    pub maximize: Option<Box<MaximizeCallback>>,
    pub close: Option<Box<CloseCallback>>,
    pub refresh: Option<Box<RefreshCallback>>,
    pub content_scale: Option<Box<ContentScaleCallback>>,
}

impl WindowCallbacks {
    /// Number of slots holding a callback
    pub fn registered(&self) -> usize {
        [
            self.key.is_some(),
            self.char.is_some(),
            self.char_mods.is_some(),
            self.mouse_button.is_some(),
            self.cursor_position.is_some(),
            self.cursor_enter.is_some(),
            self.scroll.is_some(),
            self.drop.is_some(),
            self.position.is_some(),
            self.size.is_some(),
            self.framebuffer_size.is_some(),
            self.focus.is_some(),
            self.iconify.is_some(),
            self.maximize.is_some(),
            self.close.is_some(),
            self.refresh.is_some(),
            self.content_scale.is_some(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }
}

/// Selects one slot out of a window's callbacks
pub(crate) type SlotSelector<F> = fn(&mut WindowCallbacks) -> &mut Option<Box<F>>;

/// Slots of one window plus a counter bumped each time they are freed
#[derive(Default)]
struct WindowEntry {
    slots: WindowCallbacks,
    generation: u64,
}

/// Callback slots of every live window in a session
///
/// Callbacks leaving the registry are handed back to the caller instead of
/// being dropped in place, since dropping one may drop a `Window` that needs
/// the registry again.
#[derive(Default)]
pub(crate) struct CallbackRegistry {
    windows: HashMap<Handle, WindowEntry>,
}

impl CallbackRegistry {
    /// Start tracking a window
    pub fn register_window(&mut self, window: Handle) {
        self.windows.entry(window).or_default();
    }

    /// Stop tracking a window, returning its callbacks
    #[must_use]
    pub fn remove_window(&mut self, window: Handle) -> Option<WindowCallbacks> {
        self.windows.remove(&window).map(|entry| entry.slots)
    }

    /// Install `callback` in the selected slot, returning the one it replaces
    pub fn replace<F: ?Sized>(
        &mut self,
        window: Handle,
        select: SlotSelector<F>,
        callback: Option<Box<F>>,
    ) -> Option<Box<F>> {
        let entry = self.windows.entry(window).or_default();
        std::mem::replace(select(&mut entry.slots), callback)
    }

    /// Empty every slot of a window, returning the callbacks that were set
    ///
    /// A callback of this window that is running right now is not put back
    /// when it returns.
    #[must_use]
    pub fn free_window(&mut self, window: Handle) -> WindowCallbacks {
        self.windows.get_mut(&window).map_or_else(WindowCallbacks::default, |entry| {
            entry.generation += 1;
            std::mem::take(&mut entry.slots)
        })
    }

    /// Number of callbacks currently set for a window
    #[cfg(test)]
    pub fn registered(&self, window: Handle) -> usize {
        self.windows.get(&window).map_or(0, |entry| entry.slots.registered())
    }
}

/// Run the selected callback of `window`, if any
///
/// The callback is moved out of the registry while it runs so that it may
/// register, replace or free callbacks itself. It is put back only if the
/// window still exists, was not freed meanwhile and its slot is still empty.
/// Otherwise it is dropped after the registry borrow ends.
fn invoke<F: ?Sized>(
    registry: &RefCell<CallbackRegistry>,
    window: Handle,
    select: SlotSelector<F>,
    call: impl FnOnce(&mut F),
) -> bool {
    let taken = {
        let mut registry = registry.borrow_mut();
        registry.windows.get_mut(&window).and_then(|entry| {
            let generation = entry.generation;
            select(&mut entry.slots).take().map(|callback| (callback, generation))
        })
    };

    let Some((mut callback, generation)) = taken else {
        return false;
    };

    call(&mut *callback);

    let leftover = {
        let mut registry = registry.borrow_mut();
        let slot = registry
            .windows
            .get_mut(&window)
            .filter(|entry| entry.generation == generation)
            .map(|entry| select(&mut entry.slots))
            .filter(|slot| slot.is_none());
        match slot {
            Some(slot) => {
                *slot = Some(callback);
                None
            }
            None => Some(callback),
        }
    };
    drop(leftover);
    true
}

/// Route one native event to the callback registered for its class
///
/// Returns whether a callback ran.
pub(crate) fn dispatch(registry: &RefCell<CallbackRegistry>, window: Handle, event: WindowEvent) -> bool {
    log::trace!("Dispatching {:?} to {:?}", event, window);

    match event {
        WindowEvent::Key(key, scancode, action, mods) => {
            invoke(registry, window, |c| &mut c.key, |cb| cb(key, scancode, action, mods))
        }
        WindowEvent::Char(character) => invoke(registry, window, |c| &mut c.char, |cb| cb(character)),
        WindowEvent::CharModifiers(character, mods) => {
            invoke(registry, window, |c| &mut c.char_mods, |cb| cb(character, mods))
        }
        WindowEvent::MouseButton(button, action, mods) => {
            invoke(registry, window, |c| &mut c.mouse_button, |cb| cb(button, action, mods))
        }
        WindowEvent::CursorPos(x, y) => {
            invoke(registry, window, |c| &mut c.cursor_position, |cb| cb(Position::new(x, y)))
        }
        WindowEvent::CursorEnter(entered) => invoke(registry, window, |c| &mut c.cursor_enter, |cb| cb(entered)),
        WindowEvent::Scroll(x, y) => invoke(registry, window, |c| &mut c.scroll, |cb| cb(x, y)),
        WindowEvent::FileDrop(paths) => invoke(registry, window, |c| &mut c.drop, |cb| cb(&paths)),
        WindowEvent::Pos(x, y) => invoke(registry, window, |c| &mut c.position, |cb| cb(Position::new(x, y))),
        WindowEvent::Size(w, h) => invoke(registry, window, |c| &mut c.size, |cb| cb(Size::new(w, h))),
        WindowEvent::FramebufferSize(w, h) => {
            invoke(registry, window, |c| &mut c.framebuffer_size, |cb| cb(Size::new(w, h)))
        }
        WindowEvent::Focus(focused) => invoke(registry, window, |c| &mut c.focus, |cb| cb(focused)),
        WindowEvent::Iconify(iconified) => invoke(registry, window, |c| &mut c.iconify, |cb| cb(iconified)),
        WindowEvent::Maximize(maximized) => invoke(registry, window, |c| &mut c.maximize, |cb| cb(maximized)),
        WindowEvent::Close => invoke(registry, window, |c| &mut c.close, |cb| cb()),
        WindowEvent::Refresh => invoke(registry, window, |c| &mut c.refresh, |cb| cb()),
        WindowEvent::ContentScale(x, y) => {
            invoke(registry, window, |c| &mut c.content_scale, |cb| cb(ContentScale::new(x, y)))
        }
        #[allow(unreachable_patterns)]
        _ => false,
    }
}
