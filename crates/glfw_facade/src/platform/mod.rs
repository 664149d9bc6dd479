//! The native layer
//!
//! [`Platform`] is the seam between the object wrappers and the library that
//! actually owns windows, monitors and cursors. It speaks in raw [`Handle`]s
//! and plain values, one method per native call, and reports failures the way
//! the native library does: sentinel return values plus its own error
//! callback, never `Result`.
//!
//! Two implementations are provided:
//!
//! - [`GlfwPlatform`]: the real thing, backed by the `glfw` crate
//! - [`HeadlessPlatform`]: an in-memory stand-in used by tests and tooling
//!
//! Methods taking a window, monitor or cursor handle must tolerate handles that
//! are stale or null: the native library answers such calls with zeroed
//! output and an error report.

pub mod glfw;
pub mod headless;

pub use self::glfw::GlfwPlatform;
pub use self::headless::{HeadlessMonitor, HeadlessPlatform};

use crate::config::WindowHints;
use crate::cursor::Image;
use crate::handle::Handle;
use crate::input::{Action, InputMode, InputModeKind, Key, MouseButton, StandardCursor, WindowAttribute, WindowEvent};
use crate::monitor::{GammaRamp, VideoMode};

/// Native window, monitor, cursor and event API
///
/// All methods are main-thread only unless stated otherwise.
pub trait Platform {
    /// Reset all window hints to their defaults
    fn default_window_hints(&mut self);

    /// Set the hints used by the next window creation
    fn window_hints(&mut self, hints: &WindowHints);

    /// Process pending events and return them in arrival order
    fn poll_events(&mut self) -> Vec<(Handle, WindowEvent)>;

    /// Block until at least one event arrives, then behave like `poll_events`
    fn wait_events(&mut self) -> Vec<(Handle, WindowEvent)>;

    /// Like `wait_events` with an upper bound in seconds
    fn wait_events_timeout(&mut self, timeout: f64) -> Vec<(Handle, WindowEvent)>;

    /// Wake a thread blocked in `wait_events`. May be called from any thread.
    fn post_empty_event(&mut self);

    /// Seconds since initialisation, or since the last `set_time`
    fn time(&self) -> f64;

    /// Reset the timer
    fn set_time(&mut self, time: f64);

    /// Swap interval for the current context
    fn set_swap_interval(&mut self, interval: u32);

    // Windows

    /// Create a window and its context; [`Handle::NULL`] on failure
    ///
    /// A non-null `monitor` creates a full screen window on it, a non-null
    /// `share` shares context objects with that window.
    fn create_window(&mut self, width: i32, height: i32, title: &str, monitor: Handle, share: Handle) -> Handle;

    /// Destroy a window and its context
    fn destroy_window(&mut self, window: Handle);

    /// Close flag
    fn window_should_close(&self, window: Handle) -> bool;

    /// Set the close flag
    fn set_window_should_close(&mut self, window: Handle, value: bool);

    /// Set the title
    fn set_window_title(&mut self, window: Handle, title: &str);

    /// Set icon candidates; an empty slice restores the default icon
    fn set_window_icon(&mut self, window: Handle, images: &[Image]);

    /// Content area position
    fn window_pos(&self, window: Handle) -> (i32, i32);

    /// Move the content area
    fn set_window_pos(&mut self, window: Handle, x: i32, y: i32);

    /// Content area size
    fn window_size(&self, window: Handle) -> (i32, i32);

    /// Resize the content area
    fn set_window_size(&mut self, window: Handle, width: i32, height: i32);

    /// Size limits; `None` leaves a bound unconstrained
    fn set_window_size_limits(
        &mut self,
        window: Handle,
        min: Option<(u32, u32)>,
        max: Option<(u32, u32)>,
    );

    /// Required aspect ratio; `None` removes the constraint
    fn set_window_aspect_ratio(&mut self, window: Handle, ratio: Option<(u32, u32)>);

    /// Framebuffer size in pixels
    fn framebuffer_size(&self, window: Handle) -> (i32, i32);

    /// Frame edge sizes (left, top, right, bottom)
    fn window_frame_size(&self, window: Handle) -> (i32, i32, i32, i32);

    /// Content scale of the window
    fn window_content_scale(&self, window: Handle) -> (f32, f32);

    /// Whole-window opacity in `[0, 1]`
    fn window_opacity(&self, window: Handle) -> f32;

    /// Set whole-window opacity
    fn set_window_opacity(&mut self, window: Handle, opacity: f32);

    /// Iconify
    fn iconify_window(&mut self, window: Handle);

    /// Restore from iconified or maximized
    fn restore_window(&mut self, window: Handle);

    /// Maximize
    fn maximize_window(&mut self, window: Handle);

    /// Make visible
    fn show_window(&mut self, window: Handle);

    /// Hide
    fn hide_window(&mut self, window: Handle);

    /// Bring to front and give input focus
    fn focus_window(&mut self, window: Handle);

    /// Ask the user for attention without stealing focus
    fn request_window_attention(&mut self, window: Handle);

    /// Monitor a full screen window is on; [`Handle::NULL`] when windowed
    fn window_monitor(&mut self, window: Handle) -> Handle;

    /// Switch between windowed and full screen in one step
    ///
    /// With a null `monitor` the window becomes windowed at the given position
    /// and size and `refresh_rate` is ignored.
    fn set_window_monitor(
        &mut self,
        window: Handle,
        monitor: Handle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        refresh_rate: Option<u32>,
    );

    /// Boolean attribute
    fn window_attrib(&self, window: Handle, attribute: WindowAttribute) -> bool;

    /// Change a settable attribute
    fn set_window_attrib(&mut self, window: Handle, attribute: WindowAttribute, value: bool);

    /// Application value attached to the window. May be called from any thread.
    fn window_user_pointer(&self, window: Handle) -> usize;

    /// Attach an application value to the window. May be called from any thread.
    fn set_window_user_pointer(&mut self, window: Handle, pointer: usize);

    /// Make the window's context current on this thread. May be called from any thread.
    fn make_context_current(&mut self, window: Handle);

    /// Swap front and back buffers. May be called from any thread.
    fn swap_buffers(&mut self, window: Handle);

    // Input

    /// Current value of an input mode
    fn input_mode(&self, window: Handle, kind: InputModeKind) -> InputMode;

    /// Change an input mode
    fn set_input_mode(&mut self, window: Handle, mode: InputMode);

    /// Last reported state of a key
    fn key(&self, window: Handle, key: Key) -> Action;

    /// Last reported state of a mouse button
    fn mouse_button(&self, window: Handle, button: MouseButton) -> Action;

    /// Cursor position relative to the content area
    fn cursor_pos(&self, window: Handle) -> (f64, f64);

    /// Move the cursor
    fn set_cursor_pos(&mut self, window: Handle, x: f64, y: f64);

    /// Use a cursor over the window; null restores the default arrow
    fn set_cursor(&mut self, window: Handle, cursor: Handle);

    /// System clipboard contents as UTF-8
    fn clipboard_string(&self, window: Handle) -> Option<String>;

    /// Replace the system clipboard contents
    fn set_clipboard_string(&mut self, window: Handle, value: &str);

    // Cursors

    /// Create a cursor from RGBA pixels; the pixels are copied
    fn create_cursor(&mut self, image: &Image, hot_x: u32, hot_y: u32) -> Handle;

    /// Create a cursor with a platform-provided shape
    fn create_standard_cursor(&mut self, shape: StandardCursor) -> Handle;

    /// Destroy a cursor; windows using it revert to the default arrow
    fn destroy_cursor(&mut self, cursor: Handle);

    // Monitors

    /// Connected monitors, primary first
    fn monitors(&mut self) -> Vec<Handle>;

    /// Primary monitor, [`Handle::NULL`] when none is connected
    fn primary_monitor(&mut self) -> Handle;

    /// Virtual position of the monitor's upper-left corner
    fn monitor_pos(&mut self, monitor: Handle) -> (i32, i32);

    /// Physical size in millimetres
    fn monitor_physical_size(&mut self, monitor: Handle) -> (i32, i32);

    /// Area not covered by task bars (x, y, width, height)
    fn monitor_workarea(&mut self, monitor: Handle) -> (i32, i32, i32, i32);

    /// Content scale
    fn monitor_content_scale(&mut self, monitor: Handle) -> (f32, f32);

    /// Human-readable name
    fn monitor_name(&mut self, monitor: Handle) -> Option<String>;

    /// Current video mode
    fn video_mode(&mut self, monitor: Handle) -> Option<VideoMode>;

    /// Supported video modes in ascending order
    fn video_modes(&mut self, monitor: Handle) -> Vec<VideoMode>;

    /// Generate and apply a gamma ramp from an exponent
    fn set_gamma(&mut self, monitor: Handle, gamma: f32);

    /// Current gamma ramp
    fn gamma_ramp(&mut self, monitor: Handle) -> Option<GammaRamp>;

    /// Apply a gamma ramp
    fn set_gamma_ramp(&mut self, monitor: Handle, ramp: &GammaRamp);

    /// Application value attached to the monitor. May be called from any thread.
    fn monitor_user_pointer(&self, monitor: Handle) -> usize;

    /// Attach an application value to the monitor. May be called from any thread.
    fn set_monitor_user_pointer(&mut self, monitor: Handle, pointer: usize);
}
