//! Windows and their OpenGL contexts
//!
//! [`Window`] owns one native window. Every method is a single call into the
//! session's [`Platform`](crate::platform::Platform); nothing is cached on this
//! side, so queries always reflect what the native layer reports. Calls made
//! after [`destroy`](Destroyable::destroy) reach the native layer with a stale
//! handle and are reported there.

use crate::callbacks::{
    CharCallback, CharModsCallback, CloseCallback, ContentScaleCallback, CursorEnterCallback, CursorPositionCallback,
    DropCallback, FocusCallback, FramebufferSizeCallback, IconifyCallback, KeyCallback, MaximizeCallback,
    MouseButtonCallback, PositionCallback, RefreshCallback, ScrollCallback, SizeCallback,
};
use crate::config::WindowConfig;
use crate::context::Context;
use crate::cursor::{Cursor, Image};
use crate::destroy::{Destroyable, ReleaseGuard};
use crate::error::FacadeResult;
use crate::geometry::{ContentScale, FrameSize, Geometry, Position, Size};
use crate::handle::{Handle, NativeHandle, PointerHandle};
use crate::input::{Action, InputMode, InputModeKind, Key, Modifiers, MouseButton, Scancode, WindowAttribute};
use crate::monitor::Monitor;
use std::path::PathBuf;

/// Generates one setter per callback slot
///
/// Each setter installs the callback for its event class and returns the one
/// it replaced.
macro_rules! callback_setters {
    ($($(#[$meta:meta])* $setter:ident => $slot:ident: $alias:ident($($arg:ty),*);)*) => {
        $(
            $(#[$meta])*
            pub fn $setter<F>(&mut self, callback: F) -> Option<Box<$alias>>
            where
                F: FnMut($($arg),*) + 'static,
            {
                let callback: Box<$alias> = Box::new(callback);
                self.context
                    .callbacks()
                    .replace(self.handle(), |slots| &mut slots.$slot, Some(callback))
            }
        )*
    };
}

/// A native window with its OpenGL or OpenGL ES context
///
/// Released by [`Destroyable::destroy`] or on drop; both also drop the
/// window's callbacks.
#[derive(Debug)]
pub struct Window {
    context: Context,
    pointer: PointerHandle,
    guard: ReleaseGuard,
}

impl Window {
    /// Create a windowed window using the session's current hints
    pub fn new(context: &Context, width: i32, height: i32, title: &str) -> FacadeResult<Self> {
        Self::create(context, width, height, title, None, None)
    }

    /// Create a window from a [`WindowConfig`]
    pub fn with_config(context: &Context, config: &WindowConfig) -> FacadeResult<Self> {
        Self::new(context, config.width, config.height, &config.title)
    }

    /// Create a full screen window on `monitor`
    pub fn new_on_monitor(
        context: &Context,
        width: i32,
        height: i32,
        title: &str,
        monitor: &Monitor,
    ) -> FacadeResult<Self> {
        Self::create(context, width, height, title, Some(monitor), None)
    }

    /// Create a windowed window whose context shares objects with `share`
    pub fn new_shared(context: &Context, width: i32, height: i32, title: &str, share: &Self) -> FacadeResult<Self> {
        Self::create(context, width, height, title, None, Some(share))
    }

    /// Create a window
    ///
    /// Full screen on `monitor` when given; shares context objects with
    /// `share` when given. Fails with
    /// [`FacadeError::CreationFailed`](crate::FacadeError::CreationFailed)
    /// when the native layer returns no window.
    pub fn create(
        context: &Context,
        width: i32,
        height: i32,
        title: &str,
        monitor: Option<&Monitor>,
        share: Option<&Self>,
    ) -> FacadeResult<Self> {
        let monitor = monitor.map_or(Handle::NULL, NativeHandle::handle);
        let share = share.map_or(Handle::NULL, NativeHandle::handle);

        let handle = context.platform().create_window(width, height, title, monitor, share);
        let pointer = PointerHandle::created(handle, "window")?;
        context.callbacks().register_window(handle);

        log::debug!("Created window {:?} \"{}\" ({}x{})", handle, title, width, height);
        Ok(Self {
            context: context.clone(),
            pointer,
            guard: ReleaseGuard::new(),
        })
    }

    /// Session this window belongs to
    pub const fn context(&self) -> &Context {
        &self.context
    }

    // Lifecycle

    /// Close flag, set when the user asks to close the window
    pub fn should_close(&self) -> bool {
        self.context.platform().window_should_close(self.handle())
    }

    /// Set or clear the close flag
    pub fn set_should_close(&mut self, value: bool) {
        self.context.platform().set_window_should_close(self.handle(), value);
    }

    /// Drop every registered callback
    pub fn free_callbacks(&mut self) {
        let freed = self.context.callbacks().free_window(self.handle());
        log::debug!("Freed {} callbacks of window {:?}", freed.registered(), self.handle());
        drop(freed);
    }

    // Appearance

    /// Change the title
    pub fn set_title(&mut self, title: &str) {
        self.context.platform().set_window_title(self.handle(), title);
    }

    /// Set icon candidates; the closest size is picked. An empty slice restores the default.
    pub fn set_icon(&mut self, images: &[Image]) {
        self.context.platform().set_window_icon(self.handle(), images);
    }

    /// Whole-window opacity in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        self.context.platform().window_opacity(self.handle())
    }

    /// Set whole-window opacity
    pub fn set_opacity(&mut self, opacity: f32) {
        self.context.platform().set_window_opacity(self.handle(), opacity);
    }

    // Geometry

    /// Content area position in screen coordinates
    pub fn position(&self) -> Position<i32> {
        self.context.platform().window_pos(self.handle()).into()
    }

    /// Move the content area
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.context.platform().set_window_pos(self.handle(), x, y);
    }

    /// Content area size in screen coordinates
    pub fn size(&self) -> Size<i32> {
        self.context.platform().window_size(self.handle()).into()
    }

    /// Resize the content area
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.context.platform().set_window_size(self.handle(), width, height);
    }

    /// Content area position and size
    pub fn geometry(&self) -> Geometry<i32> {
        Geometry::from_parts(self.position(), self.size())
    }

    /// Move and resize the content area
    pub fn set_geometry(&mut self, geometry: Geometry<i32>) {
        self.set_position(geometry.x(), geometry.y());
        self.set_size(geometry.width(), geometry.height());
    }

    /// Size of the decorations around the content area
    pub fn frame_size(&self) -> FrameSize {
        self.context.platform().window_frame_size(self.handle()).into()
    }

    /// Framebuffer size in pixels
    pub fn framebuffer_size(&self) -> Size<i32> {
        self.context.platform().framebuffer_size(self.handle()).into()
    }

    /// Ratio between the current DPI and the platform default
    pub fn content_scale(&self) -> ContentScale {
        self.context.platform().window_content_scale(self.handle()).into()
    }

    /// Constrain the content area size; `None` leaves a bound open
    pub fn set_size_limits(&mut self, min: Option<Size<u32>>, max: Option<Size<u32>>) {
        let min = min.map(|s| (s.width, s.height));
        let max = max.map(|s| (s.width, s.height));
        self.context.platform().set_window_size_limits(self.handle(), min, max);
    }

    /// Constrain the content area to `numerator:denominator`; `None` removes the constraint
    pub fn set_aspect_ratio(&mut self, ratio: Option<(u32, u32)>) {
        self.context.platform().set_window_aspect_ratio(self.handle(), ratio);
    }

    // State

    /// Iconify (minimise)
    pub fn iconify(&mut self) {
        self.context.platform().iconify_window(self.handle());
    }

    /// Restore from iconified or maximized
    pub fn restore(&mut self) {
        self.context.platform().restore_window(self.handle());
    }

    /// Maximize
    pub fn maximize(&mut self) {
        self.context.platform().maximize_window(self.handle());
    }

    /// Make visible
    pub fn show(&mut self) {
        self.context.platform().show_window(self.handle());
    }

    /// Hide
    pub fn hide(&mut self) {
        self.context.platform().hide_window(self.handle());
    }

    /// Bring to front and take input focus
    pub fn focus(&mut self) {
        self.context.platform().focus_window(self.handle());
    }

    /// Ask for the user's attention without taking focus
    pub fn request_attention(&mut self) {
        self.context.platform().request_window_attention(self.handle());
    }

    /// Boolean window attribute
    pub fn attribute(&self, attribute: WindowAttribute) -> bool {
        self.context.platform().window_attrib(self.handle(), attribute)
    }

    /// Change an attribute; only [settable](WindowAttribute::is_settable) ones are accepted
    pub fn set_attribute(&mut self, attribute: WindowAttribute, value: bool) {
        self.context.platform().set_window_attrib(self.handle(), attribute, value);
    }

    /// Application value attached to the window
    pub fn user_pointer(&self) -> usize {
        self.context.platform().window_user_pointer(self.handle())
    }

    /// Attach an application value to the window
    pub fn set_user_pointer(&mut self, pointer: usize) {
        self.context.platform().set_window_user_pointer(self.handle(), pointer);
    }

    // Monitor association

    /// Monitor of a full screen window, `None` when windowed
    pub fn monitor(&self) -> Option<Monitor> {
        let handle = self.context.platform().window_monitor(self.handle());
        Monitor::from_handle(&self.context, handle)
    }

    /// Switch between windowed and full screen
    ///
    /// With a monitor, `geometry` gives the video mode size and its position is
    /// ignored. Without one, the window becomes windowed at `geometry` and
    /// `refresh_rate` is ignored.
    pub fn set_monitor(&mut self, monitor: Option<&Monitor>, geometry: Geometry<i32>, refresh_rate: Option<u32>) {
        let monitor = monitor.map_or(Handle::NULL, NativeHandle::handle);
        self.context.platform().set_window_monitor(
            self.handle(),
            monitor,
            geometry.x(),
            geometry.y(),
            geometry.width(),
            geometry.height(),
            refresh_rate,
        );
    }

    // Context

    /// Make this window's context current on the calling thread
    ///
    /// The first call in a session also applies the configured swap interval.
    pub fn make_context_current(&self) {
        let mut platform = self.context.platform();
        platform.make_context_current(self.handle());
        if let Some(interval) = self.context.take_pending_swap_interval() {
            platform.set_swap_interval(interval);
        }
    }

    /// Swap front and back buffers
    pub fn swap_buffers(&mut self) {
        self.context.platform().swap_buffers(self.handle());
    }

    // Input

    /// Current value of an input mode
    pub fn input_mode(&self, kind: InputModeKind) -> InputMode {
        self.context.platform().input_mode(self.handle(), kind)
    }

    /// Change an input mode
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.context.platform().set_input_mode(self.handle(), mode);
    }

    /// Last reported state of a key
    pub fn key(&self, key: Key) -> Action {
        self.context.platform().key(self.handle(), key)
    }

    /// Last reported state of a mouse button
    pub fn mouse_button(&self, button: MouseButton) -> Action {
        self.context.platform().mouse_button(self.handle(), button)
    }

    /// Cursor position relative to the content area
    pub fn cursor_position(&self) -> Position<f64> {
        self.context.platform().cursor_pos(self.handle()).into()
    }

    /// Move the cursor within the content area
    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.context.platform().set_cursor_pos(self.handle(), x, y);
    }

    /// Cursor shown over the content area; `None` restores the default arrow
    pub fn set_cursor(&mut self, cursor: Option<&Cursor>) {
        let cursor = cursor.map_or(Handle::NULL, NativeHandle::handle);
        self.context.platform().set_cursor(self.handle(), cursor);
    }

    /// Clipboard contents
    pub fn clipboard_string(&self) -> Option<String> {
        self.context.platform().clipboard_string(self.handle())
    }

    /// Replace the clipboard contents
    pub fn set_clipboard_string(&mut self, value: &str) {
        self.context.platform().set_clipboard_string(self.handle(), value);
    }

    // Callbacks

    callback_setters! {
        /// Key pressed, repeated or released
        set_key_callback => key: KeyCallback(Key, Scancode, Action, Modifiers);
        /// Unicode character typed
        set_char_callback => char: CharCallback(char);
        /// Unicode character typed, with modifiers
        set_char_mods_callback => char_mods: CharModsCallback(char, Modifiers);
        /// Mouse button pressed or released
        set_mouse_button_callback => mouse_button: MouseButtonCallback(MouseButton, Action, Modifiers);
        /// Cursor moved over the content area
        set_cursor_position_callback => cursor_position: CursorPositionCallback(Position<f64>);
        /// Cursor entered or left the content area
        set_cursor_enter_callback => cursor_enter: CursorEnterCallback(bool);
        /// Scrolled
        set_scroll_callback => scroll: ScrollCallback(f64, f64);
        /// Files dropped onto the window
        set_drop_callback => drop: DropCallback(&[PathBuf]);
        /// Window moved
        set_position_callback => position: PositionCallback(Position<i32>);
        /// Window resized
        set_size_callback => size: SizeCallback(Size<i32>);
        /// Framebuffer resized
        set_framebuffer_size_callback => framebuffer_size: FramebufferSizeCallback(Size<i32>);
        /// Focus gained or lost
        set_focus_callback => focus: FocusCallback(bool);
        /// Iconified or restored
        set_iconify_callback => iconify: IconifyCallback(bool);
        /// Maximized or restored
        set_maximize_callback => maximize: MaximizeCallback(bool);
        /// Close requested; runs after the close flag is set
        set_close_callback => close: CloseCallback();
        /// Content needs redrawing
        set_refresh_callback => refresh: RefreshCallback();
        /// Content scale changed
        set_content_scale_callback => content_scale: ContentScaleCallback(ContentScale);
    }
}

impl NativeHandle for Window {
    fn handle(&self) -> Handle {
        self.pointer.handle()
    }
}

impl Destroyable for Window {
    fn is_destroyed(&self) -> bool {
        self.guard.is_released()
    }

    fn destroy(&mut self) {
        if self.guard.release() {
            let callbacks = self.context.callbacks().remove_window(self.handle());
            self.context.platform().destroy_window(self.handle());
            log::debug!("Destroyed window {:?}", self.handle());
            // Callbacks may own other windows
            drop(callbacks);
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FacadeError;
    use crate::input::{CursorMode, StandardCursor, WindowEvent};
    use crate::platform::HeadlessPlatform;
    use approx::assert_relative_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn session() -> (HeadlessPlatform, Context) {
        crate::logging::try_init();
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        (platform, context)
    }

    #[test]
    fn test_create_yields_live_handle() {
        let (platform, context) = session();
        let window = Window::new(&context, 640, 480, "Test").unwrap();

        assert!(!window.handle().is_null());
        assert_ne!(window.handle(), Handle::NULL);
        assert_eq!(window.size(), Size::new(640, 480));
        assert_eq!(platform.window_title(window.handle()).as_deref(), Some("Test"));
    }

    #[test]
    fn test_null_handle_is_creation_failure() {
        let (platform, context) = session();
        platform.fail_next_window_creation();

        let result = Window::new(&context, 640, 480, "Test");
        assert!(matches!(result, Err(FacadeError::CreationFailed("window"))));
        assert!(Window::new(&context, 640, 480, "Test").is_ok());
    }

    #[test]
    fn test_invalid_size_is_creation_failure() {
        let (_platform, context) = session();
        assert!(Window::new(&context, 0, 480, "Test").is_err());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        assert!(!window.is_destroyed());
        window.destroy();
        assert!(window.is_destroyed());
        window.destroy();
        assert!(window.is_destroyed());

        assert_eq!(platform.window_count(), 0);
        assert!(platform.errors().is_empty());
    }

    #[test]
    fn test_drop_destroys_window() {
        let (platform, context) = session();
        drop(Window::new(&context, 640, 480, "Test").unwrap());
        assert_eq!(platform.window_count(), 0);
    }

    #[test]
    fn test_use_after_destroy_is_reported_by_native_layer() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        window.destroy();

        assert_eq!(window.size(), Size::new(0, 0));
        assert_eq!(platform.errors().len(), 1);
    }

    #[test]
    fn test_geometry_round_trip() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 320, 240, "Test").unwrap();

        window.set_geometry(Geometry::new(100, 100, 640, 480));
        assert_eq!(window.geometry(), Geometry::new(100, 100, 640, 480));
    }

    #[test]
    fn test_frame_and_framebuffer() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        assert_eq!(window.framebuffer_size(), Size::new(640, 480));
        assert!(window.frame_size().top > 0);

        window.set_attribute(WindowAttribute::Decorated, false);
        assert_eq!(window.frame_size(), FrameSize::default());
        assert!(!window.attribute(WindowAttribute::Decorated));

        window.set_attribute(WindowAttribute::Focused, false);
        assert_eq!(platform.errors().len(), 1);
    }

    #[test]
    fn test_size_limits_use_min_then_max() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        window.set_size_limits(Some(Size::new(200, 100)), Some(Size::new(400, 300)));
        assert_eq!(window.size(), Size::new(400, 300));
        window.set_size(50, 50);
        assert_eq!(window.size(), Size::new(200, 100));
    }

    #[test]
    fn test_key_callback_supersedes_previous() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = Rc::clone(&first);
        assert!(window.set_key_callback(move |_, _, _, _| counter.set(counter.get() + 1)).is_none());
        let counter = Rc::clone(&second);
        assert!(window.set_key_callback(move |_, _, _, _| counter.set(counter.get() + 1)).is_some());

        platform.press_key(window.handle(), Key::A);
        context.poll_events();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_returned_callback_can_be_called() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        window.set_scroll_callback(move |_, y| counter.set(counter.get() + y as i32));
        let mut previous = window.set_scroll_callback(|_, _| {}).unwrap();
        previous(0.0, 3.0);

        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_close_callback_sees_flag() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let closed = Rc::new(Cell::new(false));

        let flag = Rc::clone(&closed);
        window.set_close_callback(move || flag.set(true));
        platform.request_close(window.handle());

        assert_eq!(context.poll_events(), 1);
        assert!(closed.get());
        assert!(window.should_close());

        window.set_should_close(false);
        assert!(!window.should_close());
    }

    #[test]
    fn test_programmatic_changes_reach_callbacks() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let positions = Rc::new(RefCell::new(Vec::new()));
        let iconified = Rc::new(Cell::new(false));

        let sink = Rc::clone(&sizes);
        window.set_size_callback(move |size| sink.borrow_mut().push(size));
        let sink = Rc::clone(&positions);
        window.set_position_callback(move |position| sink.borrow_mut().push(position));
        let sink = Rc::clone(&iconified);
        window.set_iconify_callback(move |value| sink.set(value));

        window.set_size(800, 600);
        window.set_position(10, 20);
        window.iconify();
        context.poll_events();

        assert_eq!(*sizes.borrow(), vec![Size::new(800, 600)]);
        assert_eq!(*positions.borrow(), vec![Position::new(10, 20)]);
        assert!(iconified.get());
        assert!(window.attribute(WindowAttribute::Iconified));

        window.restore();
        context.poll_events();
        assert!(!iconified.get());
    }

    #[test]
    fn test_free_callbacks_silences_window() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let seen = Rc::new(Cell::new(0));

        let counter = Rc::clone(&seen);
        window.set_mouse_button_callback(move |_, _, _| counter.set(counter.get() + 1));
        window.free_callbacks();

        platform.press_button(window.handle(), MouseButton::Button1);
        assert_eq!(context.poll_events(), 0);
        assert_eq!(seen.get(), 0);
        assert_eq!(window.mouse_button(MouseButton::Button1), Action::Press);
    }

    #[test]
    fn test_callback_may_reenter_wrapper() {
        let (platform, context) = session();
        let window = Rc::new(RefCell::new(Window::new(&context, 640, 480, "Test").unwrap()));
        let handle = window.borrow().handle();

        let inner = Rc::clone(&window);
        window.borrow_mut().set_cursor_enter_callback(move |_| {
            let title = format!("{:?}", inner.borrow().cursor_position());
            inner.borrow_mut().set_title(&title);
        });
        platform.move_cursor(handle, 3.0, 4.0);
        platform.push_event(handle, WindowEvent::CursorEnter(true));
        context.poll_events();

        assert_eq!(platform.window_title(handle).as_deref(), Some("Position { x: 3.0, y: 4.0 }"));
        assert!(window.borrow().attribute(WindowAttribute::Hovered));
    }

    #[test]
    fn test_drop_callback_receives_paths() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let dropped = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&dropped);
        window.set_drop_callback(move |paths: &[PathBuf]| sink.borrow_mut().extend_from_slice(paths));
        platform.drop_files(window.handle(), vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        context.poll_events();

        assert_eq!(dropped.borrow().len(), 2);
    }

    #[test]
    fn test_destroy_drops_pending_events_and_callbacks() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let seen = Rc::new(Cell::new(false));

        let flag = Rc::clone(&seen);
        window.set_refresh_callback(move || flag.set(true));
        platform.push_event(window.handle(), WindowEvent::Refresh);
        window.destroy();

        assert_eq!(context.poll_events(), 0);
        assert!(!seen.get());
    }

    #[test]
    fn test_destroy_releases_window_owned_by_callback() {
        let (platform, context) = session();
        let child = Window::new(&context, 320, 240, "Child").unwrap();
        let mut parent = Window::new(&context, 640, 480, "Parent").unwrap();
        parent.set_close_callback(move || log::debug!("closing with {:?}", child.handle()));
        assert_eq!(platform.window_count(), 2);

        parent.destroy();
        assert_eq!(platform.window_count(), 0);
    }

    #[test]
    fn test_free_callbacks_releases_window_owned_by_callback() {
        let (platform, context) = session();
        let child = Window::new(&context, 320, 240, "Child").unwrap();
        let mut parent = Window::new(&context, 640, 480, "Parent").unwrap();
        parent.set_close_callback(move || log::debug!("closing with {:?}", child.handle()));

        parent.free_callbacks();
        assert_eq!(platform.window_count(), 1);
        assert!(!parent.is_destroyed());
    }

    #[test]
    fn test_free_callbacks_from_own_callback() {
        let (platform, context) = session();
        let window = Rc::new(RefCell::new(Window::new(&context, 640, 480, "Test").unwrap()));
        let handle = window.borrow().handle();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let weak = Rc::downgrade(&window);
        window.borrow_mut().set_key_callback(move |_, _, _, _| {
            counter.set(counter.get() + 1);
            if let Some(window) = weak.upgrade() {
                window.borrow_mut().free_callbacks();
            }
        });

        platform.press_key(handle, Key::A);
        context.poll_events();
        platform.release_key(handle, Key::A);
        context.poll_events();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_full_screen_round_trip() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let primary = Monitor::primary(&context).unwrap();

        assert!(window.monitor().is_none());
        window.set_monitor(Some(&primary), Geometry::new(0, 0, 1280, 720), Some(60));
        assert_eq!(window.monitor(), Some(primary.clone()));
        assert_eq!(Monitor::window_monitor(&window), Some(primary.clone()));
        assert_eq!(primary.video_mode().map(|m| m.size()), Some(Size::new(1280, 720)));

        window.set_monitor(None, Geometry::new(50, 60, 640, 480), None);
        assert!(window.monitor().is_none());
        assert_eq!(window.geometry(), Geometry::new(50, 60, 640, 480));
    }

    #[test]
    fn test_new_on_monitor_and_shared() {
        let (platform, context) = session();
        let primary = Monitor::primary(&context).unwrap();

        let full = Window::new_on_monitor(&context, 800, 600, "Full", &primary).unwrap();
        assert_eq!(full.monitor(), Some(primary));

        let shared = Window::new_shared(&context, 320, 200, "Shared", &full).unwrap();
        assert_eq!(platform.window_share(shared.handle()), full.handle());
    }

    #[test]
    fn test_with_config() {
        let (platform, context) = session();
        let window = Window::with_config(&context, &WindowConfig::default()).unwrap();
        assert_eq!(window.size(), Size::new(640, 480));
        assert_eq!(platform.window_title(window.handle()).as_deref(), Some("GLFW Window"));
    }

    #[test]
    fn test_input_modes() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        assert_eq!(window.input_mode(InputModeKind::Cursor), InputMode::Cursor(CursorMode::Normal));
        window.set_input_mode(InputMode::Cursor(CursorMode::Disabled));
        window.set_input_mode(InputMode::StickyKeys(true));
        assert_eq!(window.input_mode(InputModeKind::Cursor), InputMode::Cursor(CursorMode::Disabled));
        assert_eq!(window.input_mode(InputModeKind::StickyKeys), InputMode::StickyKeys(true));
    }

    #[test]
    fn test_cursor_install_and_destroy() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let mut cursor = Cursor::standard(&context, StandardCursor::Crosshair).unwrap();

        window.set_cursor(Some(&cursor));
        assert_eq!(platform.window_cursor(window.handle()), cursor.handle());

        cursor.destroy();
        assert!(platform.window_cursor(window.handle()).is_null());

        window.set_cursor_position(12.5, 7.0);
        assert_eq!(window.cursor_position(), Position::new(12.5, 7.0));
    }

    #[test]
    fn test_clipboard_and_user_pointer() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        window.set_clipboard_string("copied");
        assert_eq!(window.clipboard_string().as_deref(), Some("copied"));

        window.set_user_pointer(0x1234);
        assert_eq!(window.user_pointer(), 0x1234);
    }

    #[test]
    fn test_visibility_and_opacity() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        window.hide();
        assert!(!window.attribute(WindowAttribute::Visible));
        window.show();
        assert!(window.attribute(WindowAttribute::Visible));

        window.set_opacity(0.5);
        assert_relative_eq!(window.opacity(), 0.5);
        window.set_opacity(2.0);
        assert_relative_eq!(window.opacity(), 0.5);

        window.request_attention();
        assert!(platform.attention_requested(window.handle()));

        window.set_aspect_ratio(Some((16, 9)));
        assert_eq!(platform.aspect_ratio(window.handle()), Some((16, 9)));

        window.set_icon(&[Image::solid(16, 16, [0, 0, 0, 255]), Image::solid(32, 32, [0, 0, 0, 255])]);
        assert_eq!(platform.icon_count(window.handle()), 2);
    }

    #[test]
    fn test_maximize_fills_workarea() {
        let (_platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        let workarea = Monitor::primary(&context).unwrap().workarea();

        window.maximize();
        assert!(window.attribute(WindowAttribute::Maximized));
        assert_eq!(window.geometry(), workarea);

        window.restore();
        assert!(!window.attribute(WindowAttribute::Maximized));
    }

    #[test]
    fn test_focus_moves_between_windows() {
        let (_platform, context) = session();
        let mut first = Window::new(&context, 640, 480, "First").unwrap();
        let second = Window::new(&context, 640, 480, "Second").unwrap();

        assert!(second.attribute(WindowAttribute::Focused));
        first.focus();
        assert!(first.attribute(WindowAttribute::Focused));
        assert!(!second.attribute(WindowAttribute::Focused));
    }

    #[test]
    fn test_swap_buffers_counts() {
        let (platform, context) = session();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();

        window.make_context_current();
        window.swap_buffers();
        window.swap_buffers();
        assert_eq!(platform.swap_count(window.handle()), 2);
        assert_relative_eq!(window.content_scale().x_scale, 1.0);
    }

    #[test]
    #[ignore = "requires a display"]
    fn test_glfw_window_creation() {
        let context = Context::glfw(&crate::config::FacadeConfig::default()).unwrap();
        let mut window = Window::new(&context, 640, 480, "Test").unwrap();
        assert!(!window.handle().is_null());

        window.destroy();
        window.destroy();
        assert!(window.is_destroyed());
    }
}
