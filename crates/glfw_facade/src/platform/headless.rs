//! In-memory native layer
//!
//! `HeadlessPlatform` keeps windows, monitors and cursors as plain data and
//! behaves the way GLFW does where that is observable through the wrapper:
//! programmatic changes emit the matching events, events update window state
//! when they are polled, sticky keys latch, full screen windows report their
//! monitor, and misuse is reported (here: logged and recorded) rather than
//! returned.
//!
//! The platform is a cheap handle onto shared state. Keep a clone after handing
//! one to a [`Context`](crate::Context) to inject input and inspect results.

use crate::config::{ClientApi, WindowHints};
use crate::cursor::Image;
use crate::handle::Handle;
use crate::input::{
    Action, CursorMode, InputMode, InputModeKind, Key, Modifiers, MouseButton, StandardCursor, WindowAttribute,
    WindowEvent,
};
use crate::monitor::{GammaRamp, VideoMode};
use crate::platform::Platform;
use slotmap::{DefaultKey, Key as _, KeyData, SlotMap};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

/// Frame edges reported for decorated windowed windows (left, top, right, bottom)
const DECORATION: (i32, i32, i32, i32) = (1, 30, 1, 1);

/// Entries in a freshly generated gamma ramp
const GAMMA_RAMP_SIZE: usize = 256;

/// Description of a simulated display
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMonitor {
    /// Human-readable name
    pub name: String,
    /// Virtual position of the upper-left corner
    pub position: (i32, i32),
    /// Physical size in millimetres
    pub physical_size: (i32, i32),
    /// Area not covered by task bars (x, y, width, height)
    pub workarea: (i32, i32, i32, i32),
    /// Content scale
    pub content_scale: (f32, f32),
    /// Current video mode
    pub current_mode: VideoMode,
    /// Supported video modes
    pub video_modes: Vec<VideoMode>,
}

fn millimetres_at_96_dpi(pixels: u32) -> i32 {
    i32::try_from(i64::from(pixels) * 254 / 960).unwrap_or(i32::MAX)
}

impl HeadlessMonitor {
    /// A 60 Hz, 24-bit display at the origin with the given resolution
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        let current_mode = VideoMode::new(width, height, 60);
        let mut video_modes: Vec<VideoMode> = [(640, 480), (800, 600), (1280, 720), (1920, 1080)]
            .into_iter()
            .filter(|&(w, h)| w <= width && h <= height)
            .map(|(w, h)| VideoMode::new(w, h, 60))
            .collect();
        video_modes.push(current_mode);
        video_modes.sort_by_key(VideoMode::sort_key);
        video_modes.dedup();

        let (w, h) = (i32::try_from(width).unwrap_or(i32::MAX), i32::try_from(height).unwrap_or(i32::MAX));
        Self {
            name: name.into(),
            position: (0, 0),
            physical_size: (millimetres_at_96_dpi(width), millimetres_at_96_dpi(height)),
            workarea: (0, 0, w, h),
            current_mode,
            video_modes,
            content_scale: (1.0, 1.0),
        }
    }

    /// Move the monitor in the virtual desktop; the work area follows
    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        let (wx, wy, ww, wh) = self.workarea;
        self.workarea = (wx - self.position.0 + x, wy - self.position.1 + y, ww, wh);
        self.position = (x, y);
        self
    }

    /// Override the work area
    #[must_use]
    pub const fn with_workarea(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.workarea = (x, y, width, height);
        self
    }

    /// Override the content scale
    #[must_use]
    pub const fn with_content_scale(mut self, x: f32, y: f32) -> Self {
        self.content_scale = (x, y);
        self
    }

    /// Override the physical size
    #[must_use]
    pub const fn with_physical_size(mut self, width_mm: i32, height_mm: i32) -> Self {
        self.physical_size = (width_mm, height_mm);
        self
    }
}

impl Default for HeadlessMonitor {
    fn default() -> Self {
        Self::new("Headless Display", 1920, 1080)
    }
}

struct MonitorEntry {
    desc: HeadlessMonitor,
    gamma_ramp: GammaRamp,
    user_pointer: usize,
}

struct HeadlessWindow {
    title: String,
    pos: (i32, i32),
    size: (i32, i32),
    min_size: Option<(u32, u32)>,
    max_size: Option<(u32, u32)>,
    aspect_ratio: Option<(u32, u32)>,
    opacity: f32,
    visible: bool,
    iconified: bool,
    maximized: bool,
    focused: bool,
    focus_on_create: bool,
    hovered: bool,
    resizable: bool,
    decorated: bool,
    auto_iconify: bool,
    floating: bool,
    transparent: bool,
    focus_on_show: bool,
    has_context: bool,
    should_close: bool,
    attention_requested: bool,
    monitor: Handle,
    share: Handle,
    user_pointer: usize,
    cursor_mode: CursorMode,
    sticky_keys: bool,
    sticky_buttons: bool,
    lock_key_mods: bool,
    raw_mouse_motion: bool,
    keys: Vec<(Key, Action)>,
    buttons: Vec<(MouseButton, Action)>,
    stuck_keys: Vec<Key>,
    stuck_buttons: Vec<MouseButton>,
    cursor_pos: (f64, f64),
    cursor: Handle,
    icons: usize,
    swaps: u64,
}

impl HeadlessWindow {
    fn new(title: &str, pos: (i32, i32), size: (i32, i32), hints: &WindowHints) -> Self {
        Self {
            title: title.to_string(),
            pos,
            size,
            min_size: None,
            max_size: None,
            aspect_ratio: None,
            opacity: 1.0,
            visible: hints.visible,
            iconified: false,
            maximized: false,
            focused: false,
            focus_on_create: hints.focused,
            hovered: false,
            resizable: hints.resizable,
            decorated: hints.decorated,
            auto_iconify: true,
            floating: hints.floating,
            transparent: hints.transparent_framebuffer,
            focus_on_show: true,
            has_context: hints.client_api != ClientApi::NoApi,
            should_close: false,
            attention_requested: false,
            monitor: Handle::NULL,
            share: Handle::NULL,
            user_pointer: 0,
            cursor_mode: CursorMode::Normal,
            sticky_keys: false,
            sticky_buttons: false,
            lock_key_mods: false,
            raw_mouse_motion: false,
            keys: Vec::new(),
            buttons: Vec::new(),
            stuck_keys: Vec::new(),
            stuck_buttons: Vec::new(),
            cursor_pos: (0.0, 0.0),
            cursor: Handle::NULL,
            icons: 0,
            swaps: 0,
        }
    }

    fn clamp_size(&self, width: i32, height: i32) -> (i32, i32) {
        let clamp = |value: i32, min: Option<u32>, max: Option<u32>| {
            let value = i64::from(value);
            let value = min.map_or(value, |min| value.max(i64::from(min)));
            let value = max.map_or(value, |max| value.min(i64::from(max)));
            i32::try_from(value).unwrap_or(i32::MAX)
        };
        (
            clamp(width, self.min_size.map(|s| s.0), self.max_size.map(|s| s.0)),
            clamp(height, self.min_size.map(|s| s.1), self.max_size.map(|s| s.1)),
        )
    }
}

#[derive(Debug)]
struct HeadlessCursor {
    shape: Option<StandardCursor>,
}

struct HeadlessState {
    hints: WindowHints,
    windows: SlotMap<DefaultKey, HeadlessWindow>,
    cursors: SlotMap<DefaultKey, HeadlessCursor>,
    monitors: SlotMap<DefaultKey, MonitorEntry>,
    monitor_order: Vec<DefaultKey>,
    pending: VecDeque<(Handle, WindowEvent)>,
    clipboard: Option<String>,
    current_context: Handle,
    swap_interval: u32,
    timer_origin: Instant,
    timer_offset: f64,
    window_failures: usize,
    cursor_failures: usize,
    errors: Vec<String>,
}

fn handle_of(key: DefaultKey) -> Handle {
    Handle::from_raw(key.data().as_ffi())
}

fn key_of(handle: Handle) -> DefaultKey {
    KeyData::from_ffi(handle.raw()).into()
}

fn set_action<T: Copy + PartialEq>(states: &mut Vec<(T, Action)>, item: T, action: Action) {
    let action = if action == Action::Repeat { Action::Press } else { action };
    match states.iter_mut().find(|(existing, _)| *existing == item) {
        Some(entry) => entry.1 = action,
        None => states.push((item, action)),
    }
}

fn get_action<T: Copy + PartialEq>(states: &[(T, Action)], stuck: &mut Vec<T>, item: T) -> Action {
    if let Some(index) = stuck.iter().position(|&s| s == item) {
        stuck.swap_remove(index);
        return Action::Press;
    }
    states
        .iter()
        .find(|(existing, _)| *existing == item)
        .map_or(Action::Release, |&(_, action)| action)
}

impl HeadlessState {
    fn new() -> Self {
        Self {
            hints: WindowHints::default(),
            windows: SlotMap::new(),
            cursors: SlotMap::new(),
            monitors: SlotMap::new(),
            monitor_order: Vec::new(),
            pending: VecDeque::new(),
            clipboard: None,
            current_context: Handle::NULL,
            swap_interval: 0,
            timer_origin: Instant::now(),
            timer_offset: 0.0,
            window_failures: 0,
            cursor_failures: 0,
            errors: Vec::new(),
        }
    }

    fn report(&mut self, message: String) {
        log::warn!("GLFW (headless): {}", message);
        self.errors.push(message);
    }

    fn window(&mut self, window: Handle) -> Option<&HeadlessWindow> {
        if self.windows.contains_key(key_of(window)) {
            self.windows.get(key_of(window))
        } else {
            self.report(format!("Invalid window handle {:?}", window));
            None
        }
    }

    fn window_mut(&mut self, window: Handle) -> Option<&mut HeadlessWindow> {
        if self.windows.contains_key(key_of(window)) {
            self.windows.get_mut(key_of(window))
        } else {
            self.report(format!("Invalid window handle {:?}", window));
            None
        }
    }

    fn monitor_mut(&mut self, monitor: Handle) -> Option<&mut MonitorEntry> {
        if self.monitors.contains_key(key_of(monitor)) {
            self.monitors.get_mut(key_of(monitor))
        } else {
            self.report(format!("Invalid monitor handle {:?}", monitor));
            None
        }
    }

    fn primary(&self) -> Option<&MonitorEntry> {
        self.monitor_order.first().and_then(|&key| self.monitors.get(key))
    }

    fn emit(&mut self, window: Handle, event: WindowEvent) {
        self.pending.push_back((window, event));
    }

    fn content_scale_of(&self, window: &HeadlessWindow) -> (f32, f32) {
        self.monitors
            .get(key_of(window.monitor))
            .or_else(|| self.primary())
            .map_or((1.0, 1.0), |entry| entry.desc.content_scale)
    }

    fn resize(&mut self, window: Handle, width: i32, height: i32) {
        let Some(w) = self.window_mut(window) else {
            return;
        };
        let size = w.clamp_size(width, height);
        if w.size == size {
            return;
        }
        w.size = size;
        let scale = self.content_scale_of(&self.windows[key_of(window)]);
        self.emit(window, WindowEvent::Size(size.0, size.1));
        self.emit(window, WindowEvent::FramebufferSize(scaled(size.0, scale.0), scaled(size.1, scale.1)));
    }

    fn reposition(&mut self, window: Handle, x: i32, y: i32) {
        let Some(w) = self.window_mut(window) else {
            return;
        };
        if w.pos != (x, y) {
            w.pos = (x, y);
            self.emit(window, WindowEvent::Pos(x, y));
        }
    }

    fn focus(&mut self, window: Handle) {
        let previous: Vec<Handle> = self
            .windows
            .iter()
            .filter(|(key, w)| w.focused && handle_of(*key) != window)
            .map(|(key, _)| handle_of(key))
            .collect();
        for other in previous {
            self.windows[key_of(other)].focused = false;
            self.emit(other, WindowEvent::Focus(false));
        }
        if let Some(w) = self.window_mut(window) {
            if !w.focused {
                w.focused = true;
                self.emit(window, WindowEvent::Focus(true));
            }
        }
    }

    /// Pick the supported mode closest to the request, as GLFW does for full screen
    fn switch_mode(&mut self, monitor: Handle, width: i32, height: i32, refresh_rate: Option<u32>) {
        let Some(entry) = self.monitors.get_mut(key_of(monitor)) else {
            return;
        };
        let wanted_rate = refresh_rate.unwrap_or(entry.desc.current_mode.refresh_rate);
        let best = entry.desc.video_modes.iter().copied().min_by_key(|mode| {
            let dw = i64::from(mode.width) - i64::from(width);
            let dh = i64::from(mode.height) - i64::from(height);
            let dr = i64::from(mode.refresh_rate) - i64::from(wanted_rate);
            (dw * dw + dh * dh, dr.abs())
        });
        if let Some(mode) = best {
            entry.desc.current_mode = mode;
        }
    }

    /// Apply the side effects of an event as GLFW does while processing it
    fn apply(&mut self, window: Handle, event: &WindowEvent) {
        let Some(w) = self.windows.get_mut(key_of(window)) else {
            return;
        };
        match *event {
            WindowEvent::Key(key, _, action, _) => {
                if action == Action::Release && w.sticky_keys && get_action(&w.keys, &mut Vec::new(), key) == Action::Press {
                    w.stuck_keys.push(key);
                }
                set_action(&mut w.keys, key, action);
            }
            WindowEvent::MouseButton(button, action, _) => {
                if action == Action::Release
                    && w.sticky_buttons
                    && get_action(&w.buttons, &mut Vec::new(), button) == Action::Press
                {
                    w.stuck_buttons.push(button);
                }
                set_action(&mut w.buttons, button, action);
            }
            WindowEvent::CursorPos(x, y) => w.cursor_pos = (x, y),
            WindowEvent::CursorEnter(entered) => w.hovered = entered,
            WindowEvent::Focus(focused) => w.focused = focused,
            WindowEvent::Iconify(iconified) => w.iconified = iconified,
            WindowEvent::Maximize(maximized) => w.maximized = maximized,
            WindowEvent::Pos(x, y) => w.pos = (x, y),
            WindowEvent::Size(width, height) => w.size = (width, height),
            WindowEvent::Close => w.should_close = true,
            _ => {}
        }
    }

    fn drain(&mut self) -> Vec<(Handle, WindowEvent)> {
        let mut delivered = Vec::with_capacity(self.pending.len());
        while let Some((window, event)) = self.pending.pop_front() {
            if !self.windows.contains_key(key_of(window)) {
                continue;
            }
            self.apply(window, &event);
            delivered.push((window, event));
        }
        delivered
    }
}

fn scaled(value: i32, scale: f32) -> i32 {
    (f64::from(value) * f64::from(scale)).round() as i32
}

/// In-memory [`Platform`] for tests and tooling
#[derive(Clone)]
pub struct HeadlessPlatform {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessPlatform {
    /// A platform with one 1920x1080 primary monitor
    pub fn new() -> Self {
        let platform = Self::without_monitors();
        platform.add_monitor(HeadlessMonitor::default());
        platform
    }

    /// A platform with no monitors connected
    pub fn without_monitors() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState::new())),
        }
    }

    /// Connect a monitor; the first one connected is the primary
    pub fn add_monitor(&self, monitor: HeadlessMonitor) -> Handle {
        let mut state = self.state.borrow_mut();
        let key = state.monitors.insert(MonitorEntry {
            desc: monitor,
            gamma_ramp: GammaRamp::linear(GAMMA_RAMP_SIZE),
            user_pointer: 0,
        });
        state.monitor_order.push(key);
        handle_of(key)
    }

    /// Disconnect a monitor; full screen windows on it become windowed
    pub fn disconnect_monitor(&self, monitor: Handle) {
        let mut state = self.state.borrow_mut();
        if state.monitors.remove(key_of(monitor)).is_none() {
            return;
        }
        state.monitor_order.retain(|&key| key != key_of(monitor));
        for (_, window) in &mut state.windows {
            if window.monitor == monitor {
                window.monitor = Handle::NULL;
            }
        }
    }

    /// Queue an event for the next poll
    pub fn push_event(&self, window: Handle, event: WindowEvent) {
        self.state.borrow_mut().emit(window, event);
    }

    /// Queue a key press
    pub fn press_key(&self, window: Handle, key: Key) {
        self.push_event(window, WindowEvent::Key(key, 0, Action::Press, Modifiers::empty()));
    }

    /// Queue a key release
    pub fn release_key(&self, window: Handle, key: Key) {
        self.push_event(window, WindowEvent::Key(key, 0, Action::Release, Modifiers::empty()));
    }

    /// Queue a mouse button press
    pub fn press_button(&self, window: Handle, button: MouseButton) {
        self.push_event(window, WindowEvent::MouseButton(button, Action::Press, Modifiers::empty()));
    }

    /// Queue a mouse button release
    pub fn release_button(&self, window: Handle, button: MouseButton) {
        self.push_event(window, WindowEvent::MouseButton(button, Action::Release, Modifiers::empty()));
    }

    /// Queue cursor motion
    pub fn move_cursor(&self, window: Handle, x: f64, y: f64) {
        self.push_event(window, WindowEvent::CursorPos(x, y));
    }

    /// Queue a file drop
    pub fn drop_files(&self, window: Handle, paths: Vec<PathBuf>) {
        self.push_event(window, WindowEvent::FileDrop(paths));
    }

    /// Queue a user close request
    pub fn request_close(&self, window: Handle) {
        self.push_event(window, WindowEvent::Close);
    }

    /// Make the next window creation fail
    pub fn fail_next_window_creation(&self) {
        self.state.borrow_mut().window_failures += 1;
    }

    /// Make the next cursor creation fail
    pub fn fail_next_cursor_creation(&self) {
        self.state.borrow_mut().cursor_failures += 1;
    }

    /// Errors reported so far
    pub fn errors(&self) -> Vec<String> {
        self.state.borrow().errors.clone()
    }

    /// Forget reported errors
    pub fn clear_errors(&self) {
        self.state.borrow_mut().errors.clear();
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    /// Number of live cursors
    pub fn cursor_count(&self) -> usize {
        self.state.borrow().cursors.len()
    }

    /// Events queued and not yet polled
    pub fn pending_event_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Title of a live window
    pub fn window_title(&self, window: Handle) -> Option<String> {
        self.state.borrow().windows.get(key_of(window)).map(|w| w.title.clone())
    }

    /// Window whose context is current
    pub fn current_context(&self) -> Handle {
        self.state.borrow().current_context
    }

    /// Last swap interval set
    pub fn swap_interval(&self) -> u32 {
        self.state.borrow().swap_interval
    }

    /// Buffer swaps performed on a window
    pub fn swap_count(&self, window: Handle) -> u64 {
        self.state.borrow().windows.get(key_of(window)).map_or(0, |w| w.swaps)
    }

    /// Cursor shown over a window
    pub fn window_cursor(&self, window: Handle) -> Handle {
        self.state.borrow().windows.get(key_of(window)).map_or(Handle::NULL, |w| w.cursor)
    }

    /// Number of icon candidates set on a window
    pub fn icon_count(&self, window: Handle) -> usize {
        self.state.borrow().windows.get(key_of(window)).map_or(0, |w| w.icons)
    }

    /// Window a context was shared with at creation
    pub fn window_share(&self, window: Handle) -> Handle {
        self.state.borrow().windows.get(key_of(window)).map_or(Handle::NULL, |w| w.share)
    }

    /// Current aspect ratio constraint of a window
    pub fn aspect_ratio(&self, window: Handle) -> Option<(u32, u32)> {
        self.state.borrow().windows.get(key_of(window)).and_then(|w| w.aspect_ratio)
    }

    /// Whether attention was requested for a window
    pub fn attention_requested(&self, window: Handle) -> bool {
        self.state.borrow().windows.get(key_of(window)).is_some_and(|w| w.attention_requested)
    }

    /// Standard shape of a live cursor, `None` for custom images
    pub fn cursor_shape(&self, cursor: Handle) -> Option<StandardCursor> {
        self.state.borrow().cursors.get(key_of(cursor)).and_then(|c| c.shape)
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn default_window_hints(&mut self) {
        self.state.borrow_mut().hints = WindowHints::default();
    }

    fn window_hints(&mut self, hints: &WindowHints) {
        self.state.borrow_mut().hints = hints.clone();
    }

    fn poll_events(&mut self) -> Vec<(Handle, WindowEvent)> {
        self.state.borrow_mut().drain()
    }

    fn wait_events(&mut self) -> Vec<(Handle, WindowEvent)> {
        // Nothing can arrive while blocked, so waiting degenerates to polling
        self.state.borrow_mut().drain()
    }

    fn wait_events_timeout(&mut self, timeout: f64) -> Vec<(Handle, WindowEvent)> {
        let mut state = self.state.borrow_mut();
        if !(timeout.is_finite() && timeout >= 0.0) {
            state.report(format!("Invalid time {}", timeout));
            return Vec::new();
        }
        state.drain()
    }

    fn post_empty_event(&mut self) {}

    fn time(&self) -> f64 {
        let state = self.state.borrow();
        state.timer_offset + state.timer_origin.elapsed().as_secs_f64()
    }

    fn set_time(&mut self, time: f64) {
        let mut state = self.state.borrow_mut();
        if !(time.is_finite() && (0.0..18_446_744_073.0).contains(&time)) {
            state.report(format!("Invalid time {}", time));
            return;
        }
        state.timer_origin = Instant::now();
        state.timer_offset = time;
    }

    fn set_swap_interval(&mut self, interval: u32) {
        let mut state = self.state.borrow_mut();
        if state.current_context.is_null() {
            state.report("Cannot set swap interval without a current OpenGL or OpenGL ES context".to_string());
            return;
        }
        state.swap_interval = interval;
    }

    fn create_window(&mut self, width: i32, height: i32, title: &str, monitor: Handle, share: Handle) -> Handle {
        let mut state = self.state.borrow_mut();

        if width <= 0 || height <= 0 {
            state.report(format!("Invalid window size {}x{}", width, height));
            return Handle::NULL;
        }
        if !monitor.is_null() && !state.monitors.contains_key(key_of(monitor)) {
            state.report(format!("Invalid monitor handle {:?}", monitor));
            return Handle::NULL;
        }
        if !share.is_null() && !state.windows.contains_key(key_of(share)) {
            state.report(format!("Invalid share window handle {:?}", share));
            return Handle::NULL;
        }
        if state.window_failures > 0 {
            state.window_failures -= 1;
            state.report("Platform error: failed to create window".to_string());
            return Handle::NULL;
        }

        let hints = state.hints.clone();
        let origin = state.primary().map_or((0, 0), |m| (m.desc.workarea.0, m.desc.workarea.1));
        let mut window = HeadlessWindow::new(title, origin, (width, height), &hints);
        window.share = share;

        if let Some(entry) = state.monitors.get(key_of(monitor)) {
            window.monitor = monitor;
            window.pos = entry.desc.position;
        } else if hints.maximized {
            if let Some(primary) = state.primary() {
                let (x, y, w, h) = primary.desc.workarea;
                window.pos = (x, y);
                window.size = (w, h);
                window.maximized = true;
            }
        }

        let handle = handle_of(state.windows.insert(window));
        if !monitor.is_null() {
            state.switch_mode(monitor, width, height, hints.refresh_rate);
        }
        if hints.visible && hints.focused {
            state.focus(handle);
        }
        log::debug!("Headless window {:?} created ({}x{}, \"{}\")", handle, width, height, title);
        handle
    }

    fn destroy_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        if state.windows.remove(key_of(window)).is_none() {
            state.report(format!("Invalid window handle {:?}", window));
            return;
        }
        if state.current_context == window {
            state.current_context = Handle::NULL;
        }
        state.pending.retain(|(target, _)| *target != window);
    }

    fn window_should_close(&self, window: Handle) -> bool {
        self.state.borrow_mut().window(window).is_some_and(|w| w.should_close)
    }

    fn set_window_should_close(&mut self, window: Handle, value: bool) {
        if let Some(w) = self.state.borrow_mut().window_mut(window) {
            w.should_close = value;
        }
    }

    fn set_window_title(&mut self, window: Handle, title: &str) {
        if let Some(w) = self.state.borrow_mut().window_mut(window) {
            w.title = title.to_string();
        }
    }

    fn set_window_icon(&mut self, window: Handle, images: &[Image]) {
        if let Some(w) = self.state.borrow_mut().window_mut(window) {
            w.icons = images.len();
        }
    }

    fn window_pos(&self, window: Handle) -> (i32, i32) {
        self.state.borrow_mut().window(window).map_or((0, 0), |w| w.pos)
    }

    fn set_window_pos(&mut self, window: Handle, x: i32, y: i32) {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_some_and(|w| !w.monitor.is_null()) {
            return;
        }
        state.reposition(window, x, y);
    }

    fn window_size(&self, window: Handle) -> (i32, i32) {
        self.state.borrow_mut().window(window).map_or((0, 0), |w| w.size)
    }

    fn set_window_size(&mut self, window: Handle, width: i32, height: i32) {
        let mut state = self.state.borrow_mut();
        if width <= 0 || height <= 0 {
            state.report(format!("Invalid window size {}x{}", width, height));
            return;
        }
        let monitor = state.window(window).map(|w| w.monitor);
        if let Some(monitor) = monitor.filter(|m| !m.is_null()) {
            state.switch_mode(monitor, width, height, None);
        }
        state.resize(window, width, height);
    }

    fn set_window_size_limits(&mut self, window: Handle, min: Option<(u32, u32)>, max: Option<(u32, u32)>) {
        let mut state = self.state.borrow_mut();
        if let (Some(min), Some(max)) = (min, max) {
            if max.0 < min.0 || max.1 < min.1 {
                state.report(format!("Invalid window maximum size {:?} below minimum {:?}", max, min));
                return;
            }
        }
        let Some(w) = state.window_mut(window) else {
            return;
        };
        w.min_size = min;
        w.max_size = max;
        let (width, height) = w.size;
        state.resize(window, width, height);
    }

    fn set_window_aspect_ratio(&mut self, window: Handle, ratio: Option<(u32, u32)>) {
        let mut state = self.state.borrow_mut();
        if ratio.is_some_and(|(numer, denom)| numer == 0 || denom == 0) {
            state.report(format!("Invalid window aspect ratio {:?}", ratio));
            return;
        }
        if let Some(w) = state.window_mut(window) {
            w.aspect_ratio = ratio;
        }
    }

    fn framebuffer_size(&self, window: Handle) -> (i32, i32) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window(window) else {
            return (0, 0);
        };
        let (width, height) = w.size;
        let scale = state.content_scale_of(&state.windows[key_of(window)]);
        (scaled(width, scale.0), scaled(height, scale.1))
    }

    fn window_frame_size(&self, window: Handle) -> (i32, i32, i32, i32) {
        self.state
            .borrow_mut()
            .window(window)
            .filter(|w| w.decorated && w.monitor.is_null())
            .map_or((0, 0, 0, 0), |_| DECORATION)
    }

    fn window_content_scale(&self, window: Handle) -> (f32, f32) {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_none() {
            return (0.0, 0.0);
        }
        state.content_scale_of(&state.windows[key_of(window)])
    }

    fn window_opacity(&self, window: Handle) -> f32 {
        self.state.borrow_mut().window(window).map_or(0.0, |w| w.opacity)
    }

    fn set_window_opacity(&mut self, window: Handle, opacity: f32) {
        let mut state = self.state.borrow_mut();
        if !(0.0..=1.0).contains(&opacity) {
            state.report(format!("Invalid window opacity {}", opacity));
            return;
        }
        if let Some(w) = state.window_mut(window) {
            w.opacity = opacity;
        }
    }

    fn iconify_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        if let Some(w) = state.window_mut(window) {
            if !w.iconified {
                w.iconified = true;
                state.emit(window, WindowEvent::Iconify(true));
            }
        }
    }

    fn restore_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window_mut(window) else {
            return;
        };
        let (was_iconified, was_maximized) = (w.iconified, w.maximized);
        if was_iconified {
            w.iconified = false;
            state.emit(window, WindowEvent::Iconify(false));
        } else if was_maximized {
            w.maximized = false;
            state.emit(window, WindowEvent::Maximize(false));
        }
    }

    fn maximize_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window_mut(window) else {
            return;
        };
        if w.maximized || !w.monitor.is_null() {
            return;
        }
        w.maximized = true;
        state.emit(window, WindowEvent::Maximize(true));
        if let Some((x, y, width, height)) = state.primary().map(|m| m.desc.workarea) {
            state.reposition(window, x, y);
            state.resize(window, width, height);
        }
    }

    fn show_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window_mut(window) else {
            return;
        };
        if w.visible {
            return;
        }
        w.visible = true;
        if w.focus_on_show && w.focus_on_create {
            state.focus(window);
        }
    }

    fn hide_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window_mut(window) else {
            return;
        };
        w.visible = false;
        if w.focused {
            w.focused = false;
            state.emit(window, WindowEvent::Focus(false));
        }
    }

    fn focus_window(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_some_and(|w| w.visible && !w.iconified) {
            state.focus(window);
        }
    }

    fn request_window_attention(&mut self, window: Handle) {
        if let Some(w) = self.state.borrow_mut().window_mut(window) {
            w.attention_requested = true;
        }
    }

    fn window_monitor(&mut self, window: Handle) -> Handle {
        self.state.borrow_mut().window(window).map_or(Handle::NULL, |w| w.monitor)
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
        let mut state = self.state.borrow_mut();
        if width <= 0 || height <= 0 {
            state.report(format!("Invalid window size {}x{}", width, height));
            return;
        }
        if !monitor.is_null() && state.monitor_mut(monitor).is_none() {
            return;
        }
        let Some(w) = state.window_mut(window) else {
            return;
        };
        w.monitor = monitor;
        w.maximized = false;

        if monitor.is_null() {
            state.reposition(window, x, y);
        } else {
            let origin = state.monitors[key_of(monitor)].desc.position;
            state.switch_mode(monitor, width, height, refresh_rate);
            state.reposition(window, origin.0, origin.1);
        }
        state.resize(window, width, height);
    }

    fn window_attrib(&self, window: Handle, attribute: WindowAttribute) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window(window) else {
            return false;
        };
        match attribute {
            WindowAttribute::Focused => w.focused,
            WindowAttribute::Iconified => w.iconified,
            WindowAttribute::Maximized => w.maximized,
            WindowAttribute::Hovered => w.hovered,
            WindowAttribute::Visible => w.visible,
            WindowAttribute::Resizable => w.resizable,
            WindowAttribute::Decorated => w.decorated,
            WindowAttribute::AutoIconify => w.auto_iconify,
            WindowAttribute::Floating => w.floating,
            WindowAttribute::TransparentFramebuffer => w.transparent,
            WindowAttribute::FocusOnShow => w.focus_on_show,
        }
    }

    fn set_window_attrib(&mut self, window: Handle, attribute: WindowAttribute, value: bool) {
        let mut state = self.state.borrow_mut();
        if !attribute.is_settable() {
            state.report(format!("Invalid window attribute {:?}", attribute));
            return;
        }
        let Some(w) = state.window_mut(window) else {
            return;
        };
        match attribute {
            WindowAttribute::Resizable => w.resizable = value,
            WindowAttribute::Decorated => w.decorated = value,
            WindowAttribute::AutoIconify => w.auto_iconify = value,
            WindowAttribute::Floating => w.floating = value,
            WindowAttribute::FocusOnShow => w.focus_on_show = value,
            _ => {}
        }
    }

    fn window_user_pointer(&self, window: Handle) -> usize {
        self.state.borrow_mut().window(window).map_or(0, |w| w.user_pointer)
    }

    fn set_window_user_pointer(&mut self, window: Handle, pointer: usize) {
        if let Some(w) = self.state.borrow_mut().window_mut(window) {
            w.user_pointer = pointer;
        }
    }

    fn make_context_current(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        if !window.is_null() {
            match state.window(window).map(|w| w.has_context) {
                None => return,
                Some(false) => {
                    state.report(format!(
                        "Cannot make current with a window that has no OpenGL or OpenGL ES context ({:?})",
                        window
                    ));
                    return;
                }
                Some(true) => {}
            }
        }
        state.current_context = window;
    }

    fn swap_buffers(&mut self, window: Handle) {
        let mut state = self.state.borrow_mut();
        match state.window(window).map(|w| w.has_context) {
            Some(true) => state.windows[key_of(window)].swaps += 1,
            Some(false) => state.report(format!(
                "Cannot swap buffers of a window that has no OpenGL or OpenGL ES context ({:?})",
                window
            )),
            None => {}
        }
    }

    fn input_mode(&self, window: Handle, kind: InputModeKind) -> InputMode {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window(window) else {
            return InputMode::initial(kind);
        };
        match kind {
            InputModeKind::Cursor => InputMode::Cursor(w.cursor_mode),
            InputModeKind::StickyKeys => InputMode::StickyKeys(w.sticky_keys),
            InputModeKind::StickyMouseButtons => InputMode::StickyMouseButtons(w.sticky_buttons),
            InputModeKind::LockKeyMods => InputMode::LockKeyMods(w.lock_key_mods),
            InputModeKind::RawMouseMotion => InputMode::RawMouseMotion(w.raw_mouse_motion),
        }
    }

    fn set_input_mode(&mut self, window: Handle, mode: InputMode) {
        let mut state = self.state.borrow_mut();
        let Some(w) = state.window_mut(window) else {
            return;
        };
        match mode {
            InputMode::Cursor(cursor_mode) => w.cursor_mode = cursor_mode,
            InputMode::StickyKeys(value) => {
                w.sticky_keys = value;
                if !value {
                    w.stuck_keys.clear();
                }
            }
            InputMode::StickyMouseButtons(value) => {
                w.sticky_buttons = value;
                if !value {
                    w.stuck_buttons.clear();
                }
            }
            InputMode::LockKeyMods(value) => w.lock_key_mods = value,
            InputMode::RawMouseMotion(value) => w.raw_mouse_motion = value,
        }
    }

    fn key(&self, window: Handle, key: Key) -> Action {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_none() {
            return Action::Release;
        }
        let w = &mut state.windows[key_of(window)];
        get_action(&w.keys, &mut w.stuck_keys, key)
    }

    fn mouse_button(&self, window: Handle, button: MouseButton) -> Action {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_none() {
            return Action::Release;
        }
        let w = &mut state.windows[key_of(window)];
        get_action(&w.buttons, &mut w.stuck_buttons, button)
    }

    fn cursor_pos(&self, window: Handle) -> (f64, f64) {
        self.state.borrow_mut().window(window).map_or((0.0, 0.0), |w| w.cursor_pos)
    }

    fn set_cursor_pos(&mut self, window: Handle, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        if !(x.is_finite() && y.is_finite()) {
            state.report(format!("Invalid cursor position {}, {}", x, y));
            return;
        }
        if let Some(w) = state.window_mut(window) {
            w.cursor_pos = (x, y);
        }
    }

    fn set_cursor(&mut self, window: Handle, cursor: Handle) {
        let mut state = self.state.borrow_mut();
        if !cursor.is_null() && !state.cursors.contains_key(key_of(cursor)) {
            state.report(format!("Invalid cursor handle {:?}", cursor));
            return;
        }
        if let Some(w) = state.window_mut(window) {
            w.cursor = cursor;
        }
    }

    fn clipboard_string(&self, window: Handle) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.window(window)?;
        if state.clipboard.is_none() {
            state.report("Clipboard is empty".to_string());
        }
        state.clipboard.clone()
    }

    fn set_clipboard_string(&mut self, window: Handle, value: &str) {
        let mut state = self.state.borrow_mut();
        if state.window(window).is_some() {
            state.clipboard = Some(value.to_string());
        }
    }

    fn create_cursor(&mut self, image: &Image, hot_x: u32, hot_y: u32) -> Handle {
        let mut state = self.state.borrow_mut();
        if image.width() == 0 || image.height() == 0 {
            state.report(format!("Invalid image dimensions for cursor: {}x{}", image.width(), image.height()));
            return Handle::NULL;
        }
        if state.cursor_failures > 0 {
            state.cursor_failures -= 1;
            state.report("Platform error: failed to create cursor".to_string());
            return Handle::NULL;
        }
        log::debug!("Headless cursor {}x{} with hotspot ({}, {})", image.width(), image.height(), hot_x, hot_y);
        handle_of(state.cursors.insert(HeadlessCursor { shape: None }))
    }

    fn create_standard_cursor(&mut self, shape: StandardCursor) -> Handle {
        let mut state = self.state.borrow_mut();
        if state.cursor_failures > 0 {
            state.cursor_failures -= 1;
            state.report("Platform error: failed to create standard cursor".to_string());
            return Handle::NULL;
        }
        handle_of(state.cursors.insert(HeadlessCursor { shape: Some(shape) }))
    }

    fn destroy_cursor(&mut self, cursor: Handle) {
        let mut state = self.state.borrow_mut();
        if state.cursors.remove(key_of(cursor)).is_none() {
            state.report(format!("Invalid cursor handle {:?}", cursor));
            return;
        }
        for (_, window) in &mut state.windows {
            if window.cursor == cursor {
                window.cursor = Handle::NULL;
            }
        }
    }

    fn monitors(&mut self) -> Vec<Handle> {
        self.state.borrow().monitor_order.iter().map(|&key| handle_of(key)).collect()
    }

    fn primary_monitor(&mut self) -> Handle {
        self.state.borrow().monitor_order.first().map_or(Handle::NULL, |&key| handle_of(key))
    }

    fn monitor_pos(&mut self, monitor: Handle) -> (i32, i32) {
        self.state.borrow_mut().monitor_mut(monitor).map_or((0, 0), |m| m.desc.position)
    }

    fn monitor_physical_size(&mut self, monitor: Handle) -> (i32, i32) {
        self.state.borrow_mut().monitor_mut(monitor).map_or((0, 0), |m| m.desc.physical_size)
    }

    fn monitor_workarea(&mut self, monitor: Handle) -> (i32, i32, i32, i32) {
        self.state.borrow_mut().monitor_mut(monitor).map_or((0, 0, 0, 0), |m| m.desc.workarea)
    }

    fn monitor_content_scale(&mut self, monitor: Handle) -> (f32, f32) {
        self.state.borrow_mut().monitor_mut(monitor).map_or((0.0, 0.0), |m| m.desc.content_scale)
    }

    fn monitor_name(&mut self, monitor: Handle) -> Option<String> {
        self.state.borrow_mut().monitor_mut(monitor).map(|m| m.desc.name.clone())
    }

    fn video_mode(&mut self, monitor: Handle) -> Option<VideoMode> {
        self.state.borrow_mut().monitor_mut(monitor).map(|m| m.desc.current_mode)
    }

    fn video_modes(&mut self, monitor: Handle) -> Vec<VideoMode> {
        self.state.borrow_mut().monitor_mut(monitor).map_or_else(Vec::new, |m| m.desc.video_modes.clone())
    }

    fn set_gamma(&mut self, monitor: Handle, gamma: f32) {
        let mut state = self.state.borrow_mut();
        let Some(ramp) = GammaRamp::from_exponent(gamma, GAMMA_RAMP_SIZE) else {
            state.report(format!("Invalid gamma value {}", gamma));
            return;
        };
        if let Some(m) = state.monitor_mut(monitor) {
            m.gamma_ramp = ramp;
        }
    }

    fn gamma_ramp(&mut self, monitor: Handle) -> Option<GammaRamp> {
        self.state.borrow_mut().monitor_mut(monitor).map(|m| m.gamma_ramp.clone())
    }

    fn set_gamma_ramp(&mut self, monitor: Handle, ramp: &GammaRamp) {
        let mut state = self.state.borrow_mut();
        let Some(m) = state.monitor_mut(monitor) else {
            return;
        };
        if m.gamma_ramp.len() != ramp.len() {
            let message = format!("Gamma ramp size must match current ramp size ({} != {})", ramp.len(), m.gamma_ramp.len());
            state.report(message);
            return;
        }
        m.gamma_ramp = ramp.clone();
    }

    fn monitor_user_pointer(&self, monitor: Handle) -> usize {
        self.state.borrow_mut().monitor_mut(monitor).map_or(0, |m| m.user_pointer)
    }

    fn set_monitor_user_pointer(&mut self, monitor: Handle, pointer: usize) {
        if let Some(m) = self.state.borrow_mut().monitor_mut(monitor) {
            m.user_pointer = pointer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(platform: &mut HeadlessPlatform) -> Handle {
        platform.create_window(640, 480, "Test", Handle::NULL, Handle::NULL)
    }

    #[test]
    fn test_physical_size_of_huge_monitor() {
        let monitor = HeadlessMonitor::new("Wall", u32::MAX, 1080);
        assert_eq!(monitor.physical_size, (1_136_376_763, 285));
        assert_eq!(HeadlessMonitor::default().physical_size, (508, 285));
    }

    #[test]
    fn test_programmatic_resize_emits_size_events() {
        let mut platform = HeadlessPlatform::new();
        let handle = window(&mut platform);
        platform.poll_events();

        platform.set_window_size(handle, 800, 600);
        let events = platform.poll_events();

        assert!(events.contains(&(handle, WindowEvent::Size(800, 600))));
        assert!(events.contains(&(handle, WindowEvent::FramebufferSize(800, 600))));
    }

    #[test]
    fn test_size_limits_clamp_current_size() {
        let mut platform = HeadlessPlatform::new();
        let handle = window(&mut platform);

        platform.set_window_size_limits(handle, Some((100, 100)), Some((320, 240)));
        assert_eq!(platform.window_size(handle), (320, 240));

        platform.set_window_size(handle, 10, 10);
        assert_eq!(platform.window_size(handle), (100, 100));
    }

    #[test]
    fn test_sticky_key_latches_until_queried() {
        let mut platform = HeadlessPlatform::new();
        let handle = window(&mut platform);
        platform.set_input_mode(handle, InputMode::StickyKeys(true));

        platform.press_key(handle, Key::Space);
        platform.release_key(handle, Key::Space);
        platform.poll_events();

        assert_eq!(platform.key(handle, Key::Space), Action::Press);
        assert_eq!(platform.key(handle, Key::Space), Action::Release);
    }

    #[test]
    fn test_repeat_reports_as_pressed() {
        let mut platform = HeadlessPlatform::new();
        let handle = window(&mut platform);

        platform.push_event(handle, WindowEvent::Key(Key::A, 0, Action::Repeat, Modifiers::empty()));
        platform.poll_events();

        assert_eq!(platform.key(handle, Key::A), Action::Press);
    }

    #[test]
    fn test_close_event_sets_flag_when_polled() {
        let mut platform = HeadlessPlatform::new();
        let handle = window(&mut platform);

        platform.request_close(handle);
        assert!(!platform.window_should_close(handle));
        platform.poll_events();
        assert!(platform.window_should_close(handle));
    }

    #[test]
    fn test_full_screen_switch_picks_closest_mode() {
        let mut platform = HeadlessPlatform::new();
        let monitor = platform.primary_monitor();
        let handle = window(&mut platform);

        platform.set_window_monitor(handle, monitor, 0, 0, 1270, 715, None);

        assert_eq!(platform.window_monitor(handle), monitor);
        let mode = platform.video_mode(monitor).unwrap();
        assert_eq!((mode.width, mode.height), (1280, 720));
        assert_eq!(platform.window_frame_size(handle), (0, 0, 0, 0));
    }

    #[test]
    fn test_invalid_handles_are_reported_not_fatal() {
        let mut platform = HeadlessPlatform::new();
        let stale = window(&mut platform);
        platform.destroy_window(stale);

        assert_eq!(platform.window_size(stale), (0, 0));
        platform.set_window_title(stale, "gone");
        assert_eq!(platform.errors().len(), 2);
    }

    #[test]
    fn test_swap_interval_requires_current_context() {
        let mut platform = HeadlessPlatform::new();
        platform.set_swap_interval(1);
        assert_eq!(platform.errors().len(), 1);

        let handle = window(&mut platform);
        platform.make_context_current(handle);
        platform.set_swap_interval(1);
        assert_eq!(platform.swap_interval(), 1);
    }

    #[test]
    fn test_no_api_window_has_no_context() {
        let mut platform = HeadlessPlatform::new();
        platform.window_hints(&WindowHints {
            client_api: ClientApi::NoApi,
            ..WindowHints::default()
        });
        let handle = window(&mut platform);

        platform.make_context_current(handle);
        assert!(platform.current_context().is_null());
        assert_eq!(platform.errors().len(), 1);
    }

    #[test]
    fn test_gamma_ramp_size_must_match() {
        let mut platform = HeadlessPlatform::new();
        let monitor = platform.primary_monitor();

        platform.set_gamma_ramp(monitor, &GammaRamp::linear(16));
        assert_eq!(platform.errors().len(), 1);
        assert_eq!(platform.gamma_ramp(monitor).unwrap().len(), GAMMA_RAMP_SIZE);
    }

    #[test]
    fn test_monitor_builder_moves_workarea() {
        let monitor = HeadlessMonitor::new("Side", 1280, 1024).at(1920, 0);
        assert_eq!(monitor.position, (1920, 0));
        assert_eq!(monitor.workarea, (1920, 0, 1280, 1024));
        assert!(monitor.video_modes.windows(2).all(|pair| pair[0].sort_key() <= pair[1].sort_key()));
    }
}
