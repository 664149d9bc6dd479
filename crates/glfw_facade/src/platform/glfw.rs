//! GLFW-backed native layer
//!
//! Windows and cursors are owned by generational slot maps and exported as the
//! slot key's FFI value, so handles are never zero and never reused. Monitors
//! are not owned by the `glfw` crate outside of a borrow scope; their handles
//! are 1-based positions in the connected-monitor list, primary first.
//!
//! Errors raised by GLFW itself go through `glfw::log_errors` to the `log`
//! facade. Stale handles are reported the same way and answered with zeroed
//! output, matching what GLFW does for invalid arguments.

use crate::config::{ClientApi, OpenGlProfile, WindowHints};
use crate::cursor::Image;
use crate::error::{FacadeError, FacadeResult};
use crate::handle::Handle;
use crate::input::{Action, InputMode, InputModeKind, Key, MouseButton, StandardCursor, WindowAttribute, WindowEvent};
use crate::monitor::{GammaRamp, VideoMode};
use crate::platform::Platform;
use glfw::Context as _;
use slotmap::{DefaultKey, Key as _, KeyData, SlotMap};
use std::borrow::Borrow;
use std::collections::HashMap;

/// A native window plus the receiver its events arrive on
struct NativeWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    user_pointer: usize,
    cursor: Handle,
}

/// The `glfw` crate moves a cursor into the window that shows it
enum NativeCursor {
    Idle(glfw::Cursor),
    InstalledOn(Handle),
}

/// Native layer on top of the `glfw` crate
pub struct GlfwPlatform {
    glfw: glfw::Glfw,
    windows: SlotMap<DefaultKey, NativeWindow>,
    cursors: SlotMap<DefaultKey, NativeCursor>,
    monitor_user_pointers: HashMap<Handle, usize>,
}

fn handle_of(key: DefaultKey) -> Handle {
    Handle::from_raw(key.data().as_ffi())
}

fn key_of(handle: Handle) -> DefaultKey {
    KeyData::from_ffi(handle.raw()).into()
}

fn monitor_handle(index: usize) -> Handle {
    Handle::from_raw(index as u64 + 1)
}

fn monitor_index(handle: Handle) -> Option<usize> {
    usize::try_from(handle.raw()).ok()?.checked_sub(1)
}

/// Pick a monitor out of whatever slice shape `with_connected_monitors` yields
fn nth_monitor<M: Borrow<glfw::Monitor>>(monitors: &[M], handle: Handle) -> Option<&glfw::Monitor> {
    monitor_index(handle).and_then(|index| monitors.get(index)).map(Borrow::borrow)
}

fn as_monitor<M: Borrow<glfw::Monitor>>(monitor: &M) -> &glfw::Monitor {
    monitor.borrow()
}

fn same_monitor(a: &glfw::Monitor, b: &glfw::Monitor) -> bool {
    a.get_pos() == b.get_pos() && a.get_name() == b.get_name()
}

fn to_u32(value: i32) -> Option<u32> {
    u32::try_from(value).ok()
}

fn video_mode(mode: glfw::VidMode) -> VideoMode {
    VideoMode {
        width: mode.width,
        height: mode.height,
        red_bits: mode.red_bits,
        green_bits: mode.green_bits,
        blue_bits: mode.blue_bits,
        refresh_rate: mode.refresh_rate,
    }
}

impl GlfwPlatform {
    /// Initialise GLFW
    ///
    /// Only one instance should exist per process.
    pub fn init() -> FacadeResult<Self> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| FacadeError::InitializationFailed(format!("{:?}", e)))?;

        log::info!("GLFW {} initialized", glfw::get_version_string());

        Ok(Self {
            glfw,
            windows: SlotMap::new(),
            cursors: SlotMap::new(),
            monitor_user_pointers: HashMap::new(),
        })
    }

    fn window(&self, window: Handle) -> Option<&NativeWindow> {
        let found = self.windows.get(key_of(window));
        if found.is_none() {
            log::warn!("GLFW: invalid window handle {:?}", window);
        }
        found
    }

    fn window_mut(&mut self, window: Handle) -> Option<&mut NativeWindow> {
        let found = self.windows.get_mut(key_of(window));
        if found.is_none() {
            log::warn!("GLFW: invalid window handle {:?}", window);
        }
        found
    }

    /// Run `query` against a connected monitor, or log and return `fallback`
    fn with_monitor<T>(&mut self, monitor: Handle, fallback: T, query: impl FnOnce(&glfw::Monitor) -> T) -> T {
        self.glfw.with_connected_monitors(|_, monitors| match nth_monitor(monitors, monitor) {
            Some(found) => query(found),
            None => {
                log::warn!("GLFW: invalid monitor handle {:?}", monitor);
                fallback
            }
        })
    }

    /// Run a mutating operation on the primary monitor
    ///
    /// The `glfw` crate only hands out owned monitors for the primary one.
    fn with_primary_monitor_mut(&mut self, monitor: Handle, op: impl FnOnce(&mut glfw::Monitor)) {
        if monitor_index(monitor) != Some(0) || self.monitors().is_empty() {
            log::warn!("GLFW: gamma changes are only available for the primary monitor, got {:?}", monitor);
            return;
        }
        self.glfw.with_primary_monitor(|_, primary| {
            if let Some(primary) = primary {
                op(primary);
            }
        });
    }

    fn drain(&mut self) -> Vec<(Handle, WindowEvent)> {
        let mut drained = Vec::new();
        for (key, native) in &self.windows {
            let handle = handle_of(key);
            drained.extend(glfw::flush_messages(&native.events).map(|(_, event)| (handle, event)));
        }
        drained
    }

    /// Window currently showing `cursor`, if any
    fn installed_on(&self, cursor: Handle) -> Option<Handle> {
        match self.cursors.get(key_of(cursor)) {
            Some(NativeCursor::InstalledOn(window)) => Some(*window),
            _ => None,
        }
    }

    /// Take a cursor back from the window that currently shows it
    fn reclaim_cursor(&mut self, window: Handle) {
        let Some(native) = self.windows.get_mut(key_of(window)) else {
            return;
        };
        let installed = std::mem::replace(&mut native.cursor, Handle::NULL);
        let returned = native.window.set_cursor(None);
        if let (Some(cursor), Some(slot)) = (returned, self.cursors.get_mut(key_of(installed))) {
            *slot = NativeCursor::Idle(cursor);
        }
    }
}

impl Platform for GlfwPlatform {
    fn default_window_hints(&mut self) {
        self.glfw.default_window_hints();
    }

    fn window_hints(&mut self, hints: &WindowHints) {
        use glfw::WindowHint;

        self.glfw.window_hint(WindowHint::Visible(hints.visible));
        self.glfw.window_hint(WindowHint::Resizable(hints.resizable));
        self.glfw.window_hint(WindowHint::Decorated(hints.decorated));
        self.glfw.window_hint(WindowHint::Focused(hints.focused));
        self.glfw.window_hint(WindowHint::Floating(hints.floating));
        self.glfw.window_hint(WindowHint::Maximized(hints.maximized));
        self.glfw.window_hint(WindowHint::TransparentFramebuffer(hints.transparent_framebuffer));
        self.glfw.window_hint(WindowHint::ScaleToMonitor(hints.scale_to_monitor));
        self.glfw.window_hint(WindowHint::Samples(hints.samples));
        self.glfw.window_hint(WindowHint::RefreshRate(hints.refresh_rate));
        self.glfw.window_hint(WindowHint::ClientApi(match hints.client_api {
            ClientApi::OpenGl => glfw::ClientApiHint::OpenGl,
            ClientApi::OpenGlEs => glfw::ClientApiHint::OpenGlEs,
            ClientApi::NoApi => glfw::ClientApiHint::NoApi,
        }));
        if let Some((major, minor)) = hints.context_version {
            self.glfw.window_hint(WindowHint::ContextVersion(major, minor));
        }
        self.glfw.window_hint(WindowHint::OpenGlProfile(match hints.opengl_profile {
            OpenGlProfile::Any => glfw::OpenGlProfileHint::Any,
            OpenGlProfile::Core => glfw::OpenGlProfileHint::Core,
            OpenGlProfile::Compat => glfw::OpenGlProfileHint::Compat,
        }));
        self.glfw.window_hint(WindowHint::OpenGlForwardCompat(hints.opengl_forward_compat));
        self.glfw.window_hint(WindowHint::SRgbCapable(hints.srgb_capable));
        self.glfw.window_hint(WindowHint::DoubleBuffer(hints.double_buffer));
    }

    fn poll_events(&mut self) -> Vec<(Handle, WindowEvent)> {
        self.glfw.poll_events();
        self.drain()
    }

    fn wait_events(&mut self) -> Vec<(Handle, WindowEvent)> {
        self.glfw.wait_events();
        self.drain()
    }

    fn wait_events_timeout(&mut self, timeout: f64) -> Vec<(Handle, WindowEvent)> {
        self.glfw.wait_events_timeout(timeout);
        self.drain()
    }

    fn post_empty_event(&mut self) {
        self.glfw.post_empty_event();
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn set_time(&mut self, time: f64) {
        self.glfw.set_time(time);
    }

    fn set_swap_interval(&mut self, interval: u32) {
        let interval = if interval == 0 {
            glfw::SwapInterval::None
        } else {
            glfw::SwapInterval::Sync(interval)
        };
        self.glfw.set_swap_interval(interval);
    }

    fn create_window(&mut self, width: i32, height: i32, title: &str, monitor: Handle, share: Handle) -> Handle {
        let (Some(width), Some(height)) = (to_u32(width), to_u32(height)) else {
            log::warn!("GLFW: invalid window size {}x{}", width, height);
            return Handle::NULL;
        };

        let windows = &self.windows;
        let created = self.glfw.with_connected_monitors(|glfw, monitors| {
            let mode = match nth_monitor(monitors, monitor) {
                Some(found) => glfw::WindowMode::FullScreen(found),
                None => glfw::WindowMode::Windowed,
            };
            if share.is_null() {
                glfw.create_window(width, height, title, mode)
            } else {
                windows
                    .get(key_of(share))
                    .and_then(|parent| parent.window.create_shared(width, height, title, mode))
            }
        });

        let Some((mut window, events)) = created else {
            return Handle::NULL;
        };
        window.set_all_polling(true);

        let key = self.windows.insert(NativeWindow {
            window,
            events,
            user_pointer: 0,
            cursor: Handle::NULL,
        });
        handle_of(key)
    }

    fn destroy_window(&mut self, window: Handle) {
        self.reclaim_cursor(window);
        if self.windows.remove(key_of(window)).is_none() {
            log::warn!("GLFW: destroying unknown window {:?}", window);
        }
    }

    fn window_should_close(&self, window: Handle) -> bool {
        self.window(window).is_some_and(|w| w.window.should_close())
    }

    fn set_window_should_close(&mut self, window: Handle, value: bool) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_should_close(value);
        }
    }

    fn set_window_title(&mut self, window: Handle, title: &str) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_title(title);
        }
    }

    fn set_window_icon(&mut self, window: Handle, images: &[Image]) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_icon_from_pixels(images.iter().map(Image::to_pixel_image).collect());
        }
    }

    fn window_pos(&self, window: Handle) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| w.window.get_pos())
    }

    fn set_window_pos(&mut self, window: Handle, x: i32, y: i32) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_pos(x, y);
        }
    }

    fn window_size(&self, window: Handle) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| w.window.get_size())
    }

    fn set_window_size(&mut self, window: Handle, width: i32, height: i32) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_size(width, height);
        }
    }

    fn set_window_size_limits(&mut self, window: Handle, min: Option<(u32, u32)>, max: Option<(u32, u32)>) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_size_limits(
                min.map(|(width, _)| width),
                min.map(|(_, height)| height),
                max.map(|(width, _)| width),
                max.map(|(_, height)| height),
            );
        }
    }

    fn set_window_aspect_ratio(&mut self, window: Handle, ratio: Option<(u32, u32)>) {
        if let Some(w) = self.window_mut(window) {
            // u32::MAX reaches GLFW as GLFW_DONT_CARE (-1)
            let (numer, denom) = ratio.unwrap_or((u32::MAX, u32::MAX));
            w.window.set_aspect_ratio(numer, denom);
        }
    }

    fn framebuffer_size(&self, window: Handle) -> (i32, i32) {
        self.window(window).map_or((0, 0), |w| w.window.get_framebuffer_size())
    }

    fn window_frame_size(&self, window: Handle) -> (i32, i32, i32, i32) {
        self.window(window).map_or((0, 0, 0, 0), |w| w.window.get_frame_size())
    }

    fn window_content_scale(&self, window: Handle) -> (f32, f32) {
        self.window(window).map_or((0.0, 0.0), |w| w.window.get_content_scale())
    }

    fn window_opacity(&self, window: Handle) -> f32 {
        self.window(window).map_or(0.0, |w| w.window.get_opacity())
    }

    fn set_window_opacity(&mut self, window: Handle, opacity: f32) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_opacity(opacity);
        }
    }

    fn iconify_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.iconify();
        }
    }

    fn restore_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.restore();
        }
    }

    fn maximize_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.maximize();
        }
    }

    fn show_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.show();
        }
    }

    fn hide_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.hide();
        }
    }

    fn focus_window(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.focus();
        }
    }

    fn request_window_attention(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.request_attention();
        }
    }

    fn window_monitor(&mut self, window: Handle) -> Handle {
        let Some(native) = self.windows.get(key_of(window)) else {
            log::warn!("GLFW: invalid window handle {:?}", window);
            return Handle::NULL;
        };
        // Two connected monitors never share both name and origin
        self.glfw.with_connected_monitors(|_, monitors| {
            native.window.with_window_mode(|mode| match mode {
                glfw::WindowMode::FullScreen(current) => monitors
                    .iter()
                    .position(|candidate| same_monitor(as_monitor(candidate), current))
                    .map_or(Handle::NULL, monitor_handle),
                glfw::WindowMode::Windowed => Handle::NULL,
            })
        })
    }

    fn set_window_monitor(
        &mut self,
        window: Handle,
        monitor: Handle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        refresh_rate: Option<u32>,
    ) {
        let (Some(width), Some(height)) = (to_u32(width), to_u32(height)) else {
            log::warn!("GLFW: invalid window size {}x{}", width, height);
            return;
        };
        let Some(native) = self.windows.get_mut(key_of(window)) else {
            log::warn!("GLFW: invalid window handle {:?}", window);
            return;
        };
        self.glfw.with_connected_monitors(|_, monitors| {
            let mode = match nth_monitor(monitors, monitor) {
                Some(found) => glfw::WindowMode::FullScreen(found),
                None => glfw::WindowMode::Windowed,
            };
            native.window.set_monitor(mode, x, y, width, height, refresh_rate);
        });
    }

    fn window_attrib(&self, window: Handle, attribute: WindowAttribute) -> bool {
        let Some(native) = self.window(window) else {
            return false;
        };
        let w = &native.window;
        match attribute {
            WindowAttribute::Focused => w.is_focused(),
            WindowAttribute::Iconified => w.is_iconified(),
            WindowAttribute::Maximized => w.is_maximized(),
            WindowAttribute::Hovered => w.is_hovered(),
            WindowAttribute::Visible => w.is_visible(),
            WindowAttribute::Resizable => w.is_resizable(),
            WindowAttribute::Decorated => w.is_decorated(),
            WindowAttribute::AutoIconify => w.is_auto_iconify(),
            WindowAttribute::Floating => w.is_floating(),
            WindowAttribute::TransparentFramebuffer => w.is_framebuffer_transparent(),
            WindowAttribute::FocusOnShow => w.is_focus_on_show(),
        }
    }

    fn set_window_attrib(&mut self, window: Handle, attribute: WindowAttribute, value: bool) {
        let Some(native) = self.window_mut(window) else {
            return;
        };
        let w = &mut native.window;
        match attribute {
            WindowAttribute::Resizable => w.set_resizable(value),
            WindowAttribute::Decorated => w.set_decorated(value),
            WindowAttribute::AutoIconify => w.set_auto_iconify(value),
            WindowAttribute::Floating => w.set_floating(value),
            WindowAttribute::FocusOnShow => w.set_focus_on_show(value),
            other => log::warn!("GLFW: invalid window attribute {:?} for setting", other),
        }
    }

    fn window_user_pointer(&self, window: Handle) -> usize {
        self.window(window).map_or(0, |w| w.user_pointer)
    }

    fn set_window_user_pointer(&mut self, window: Handle, pointer: usize) {
        if let Some(w) = self.window_mut(window) {
            w.user_pointer = pointer;
        }
    }

    fn make_context_current(&mut self, window: Handle) {
        if window.is_null() {
            glfw::make_context_current(None);
        } else if let Some(w) = self.window_mut(window) {
            w.window.make_current();
        }
    }

    fn swap_buffers(&mut self, window: Handle) {
        if let Some(w) = self.window_mut(window) {
            w.window.swap_buffers();
        }
    }

    fn input_mode(&self, window: Handle, kind: InputModeKind) -> InputMode {
        let Some(native) = self.window(window) else {
            return InputMode::initial(kind);
        };
        let w = &native.window;
        match kind {
            InputModeKind::Cursor => InputMode::Cursor(w.get_cursor_mode()),
            InputModeKind::StickyKeys => InputMode::StickyKeys(w.has_sticky_keys()),
            InputModeKind::StickyMouseButtons => InputMode::StickyMouseButtons(w.has_sticky_mouse_buttons()),
            InputModeKind::LockKeyMods => InputMode::LockKeyMods(w.does_store_lock_key_mods()),
            InputModeKind::RawMouseMotion => InputMode::RawMouseMotion(w.uses_raw_mouse_motion()),
        }
    }

    fn set_input_mode(&mut self, window: Handle, mode: InputMode) {
        let Some(native) = self.window_mut(window) else {
            return;
        };
        let w = &mut native.window;
        match mode {
            InputMode::Cursor(cursor_mode) => w.set_cursor_mode(cursor_mode),
            InputMode::StickyKeys(value) => w.set_sticky_keys(value),
            InputMode::StickyMouseButtons(value) => w.set_sticky_mouse_buttons(value),
            InputMode::LockKeyMods(value) => w.set_store_lock_key_mods(value),
            InputMode::RawMouseMotion(value) => w.set_raw_mouse_motion(value),
        }
    }

    fn key(&self, window: Handle, key: Key) -> Action {
        self.window(window).map_or(Action::Release, |w| w.window.get_key(key))
    }

    fn mouse_button(&self, window: Handle, button: MouseButton) -> Action {
        self.window(window).map_or(Action::Release, |w| w.window.get_mouse_button(button))
    }

    fn cursor_pos(&self, window: Handle) -> (f64, f64) {
        self.window(window).map_or((0.0, 0.0), |w| w.window.get_cursor_pos())
    }

    fn set_cursor_pos(&mut self, window: Handle, x: f64, y: f64) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_cursor_pos(x, y);
        }
    }

    fn set_cursor(&mut self, window: Handle, cursor: Handle) {
        if self.window(window).is_none() {
            return;
        }
        self.reclaim_cursor(window);
        if cursor.is_null() {
            return;
        }

        // A cursor shown elsewhere is moved to this window
        if let Some(other) = self.installed_on(cursor) {
            self.reclaim_cursor(other);
        }

        let Some(slot) = self.cursors.get_mut(key_of(cursor)) else {
            log::warn!("GLFW: invalid cursor handle {:?}", cursor);
            return;
        };
        let NativeCursor::Idle(native_cursor) = std::mem::replace(slot, NativeCursor::InstalledOn(window)) else {
            return;
        };
        if let Some(w) = self.windows.get_mut(key_of(window)) {
            w.cursor = cursor;
            w.window.set_cursor(Some(native_cursor));
        }
    }

    fn clipboard_string(&self, window: Handle) -> Option<String> {
        self.window(window).and_then(|w| w.window.get_clipboard_string())
    }

    fn set_clipboard_string(&mut self, window: Handle, value: &str) {
        if let Some(w) = self.window_mut(window) {
            w.window.set_clipboard_string(value);
        }
    }

    fn create_cursor(&mut self, image: &Image, hot_x: u32, hot_y: u32) -> Handle {
        let cursor = glfw::Cursor::create_from_pixels(image.to_pixel_image(), hot_x, hot_y);
        handle_of(self.cursors.insert(NativeCursor::Idle(cursor)))
    }

    fn create_standard_cursor(&mut self, shape: StandardCursor) -> Handle {
        let cursor = glfw::Cursor::standard(shape);
        handle_of(self.cursors.insert(NativeCursor::Idle(cursor)))
    }

    fn destroy_cursor(&mut self, cursor: Handle) {
        if !self.cursors.contains_key(key_of(cursor)) {
            log::warn!("GLFW: destroying unknown cursor {:?}", cursor);
            return;
        }
        if let Some(window) = self.installed_on(cursor) {
            self.reclaim_cursor(window);
        }
        self.cursors.remove(key_of(cursor));
    }

    fn monitors(&mut self) -> Vec<Handle> {
        self.glfw
            .with_connected_monitors(|_, monitors| (0..monitors.len()).map(monitor_handle).collect())
    }

    fn primary_monitor(&mut self) -> Handle {
        self.monitors().first().copied().unwrap_or(Handle::NULL)
    }

    fn monitor_pos(&mut self, monitor: Handle) -> (i32, i32) {
        self.with_monitor(monitor, (0, 0), glfw::Monitor::get_pos)
    }

    fn monitor_physical_size(&mut self, monitor: Handle) -> (i32, i32) {
        self.with_monitor(monitor, (0, 0), glfw::Monitor::get_physical_size)
    }

    fn monitor_workarea(&mut self, monitor: Handle) -> (i32, i32, i32, i32) {
        self.with_monitor(monitor, (0, 0, 0, 0), glfw::Monitor::get_workarea)
    }

    fn monitor_content_scale(&mut self, monitor: Handle) -> (f32, f32) {
        self.with_monitor(monitor, (0.0, 0.0), glfw::Monitor::get_content_scale)
    }

    fn monitor_name(&mut self, monitor: Handle) -> Option<String> {
        self.with_monitor(monitor, None, glfw::Monitor::get_name)
    }

    fn video_mode(&mut self, monitor: Handle) -> Option<VideoMode> {
        self.with_monitor(monitor, None, |m| m.get_video_mode().map(video_mode))
    }

    fn video_modes(&mut self, monitor: Handle) -> Vec<VideoMode> {
        self.with_monitor(monitor, Vec::new(), |m| m.get_video_modes().into_iter().map(video_mode).collect())
    }

    fn set_gamma(&mut self, monitor: Handle, gamma: f32) {
        self.with_primary_monitor_mut(monitor, |m| m.set_gamma(gamma));
    }

    fn gamma_ramp(&mut self, monitor: Handle) -> Option<GammaRamp> {
        let mut ramp = None;
        self.with_primary_monitor_mut(monitor, |m| {
            let native = m.get_gamma_ramp();
            ramp = GammaRamp::new(native.red, native.green, native.blue);
        });
        ramp
    }

    fn set_gamma_ramp(&mut self, monitor: Handle, ramp: &GammaRamp) {
        let mut native = glfw::GammaRamp {
            red: ramp.red().to_vec(),
            green: ramp.green().to_vec(),
            blue: ramp.blue().to_vec(),
        };
        self.with_primary_monitor_mut(monitor, |m| m.set_gamma_ramp(&mut native));
    }

    fn monitor_user_pointer(&self, monitor: Handle) -> usize {
        self.monitor_user_pointers.get(&monitor).copied().unwrap_or(0)
    }

    fn set_monitor_user_pointer(&mut self, monitor: Handle, pointer: usize) {
        self.monitor_user_pointers.insert(monitor, pointer);
    }
}
