//! The native session
//!
//! A [`Context`] stands for one initialised native library. It owns the
//! [`Platform`] and the callback registry, and every [`Window`](crate::Window),
//! [`Monitor`](crate::Monitor) and [`Cursor`](crate::Cursor) keeps a clone of
//! it. Contexts are single-threaded (`!Send`), matching the main-thread rule of
//! the native library.

use crate::callbacks::{self, CallbackRegistry};
use crate::config::{FacadeConfig, WindowHints};
use crate::error::FacadeResult;
use crate::handle::Handle;
use crate::input::WindowEvent;
use crate::platform::{GlfwPlatform, HeadlessPlatform, Platform};
use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

struct Session {
    platform: RefCell<Box<dyn Platform>>,
    callbacks: RefCell<CallbackRegistry>,
    pending_swap_interval: Cell<Option<u32>>,
}

/// Shared handle to a native session
#[derive(Clone)]
pub struct Context {
    session: Rc<Session>,
}

impl Context {
    /// Wrap an already initialised platform
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self {
            session: Rc::new(Session {
                platform: RefCell::new(Box::new(platform)),
                callbacks: RefCell::new(CallbackRegistry::default()),
                pending_swap_interval: Cell::new(None),
            }),
        }
    }

    /// Wrap a platform and apply session settings
    ///
    /// The swap interval is deferred until a window first makes its context
    /// current, since it applies to the current context.
    pub fn with_config(platform: impl Platform + 'static, config: &FacadeConfig) -> Self {
        let context = Self::new(platform);
        context.apply_window_hints(&config.hints);
        context.session.pending_swap_interval.set(config.swap_interval);
        context
    }

    /// Initialise GLFW
    pub fn glfw(config: &FacadeConfig) -> FacadeResult<Self> {
        let platform = GlfwPlatform::init()?;
        Ok(Self::with_config(platform, config))
    }

    /// A session backed by a fresh in-memory platform with one monitor
    pub fn headless() -> Self {
        Self::new(HeadlessPlatform::new())
    }

    /// Reset window creation hints to their defaults
    pub fn default_window_hints(&self) {
        self.platform().default_window_hints();
    }

    /// Hints used by subsequent window creations
    pub fn apply_window_hints(&self, hints: &WindowHints) {
        self.platform().window_hints(hints);
    }

    /// Process pending events and run their callbacks
    ///
    /// Returns the number of callbacks that ran.
    pub fn poll_events(&self) -> usize {
        let events = self.platform().poll_events();
        self.dispatch(events)
    }

    /// Sleep until at least one event arrives, then behave like [`poll_events`](Self::poll_events)
    pub fn wait_events(&self) -> usize {
        let events = self.platform().wait_events();
        self.dispatch(events)
    }

    /// Like [`wait_events`](Self::wait_events), giving up after `timeout` seconds
    pub fn wait_events_timeout(&self, timeout: f64) -> usize {
        let events = self.platform().wait_events_timeout(timeout);
        self.dispatch(events)
    }

    /// Wake up a pending [`wait_events`](Self::wait_events)
    pub fn post_empty_event(&self) {
        self.platform().post_empty_event();
    }

    /// Swap interval for the current context
    pub fn set_swap_interval(&self, interval: u32) {
        self.session.pending_swap_interval.set(None);
        self.platform().set_swap_interval(interval);
    }

    /// Seconds since initialisation or the last [`set_time`](Self::set_time)
    pub fn time(&self) -> f64 {
        self.platform().time()
    }

    /// Reset the timer
    pub fn set_time(&self, time: f64) {
        self.platform().set_time(time);
    }

    /// Detach the current context from this thread
    pub fn clear_current_context(&self) {
        self.platform().make_context_current(Handle::NULL);
    }

    /// Exclusive access to the native layer
    ///
    /// Must not be held across user callbacks.
    pub(crate) fn platform(&self) -> RefMut<'_, Box<dyn Platform>> {
        self.session.platform.borrow_mut()
    }

    pub(crate) fn callbacks(&self) -> RefMut<'_, CallbackRegistry> {
        self.session.callbacks.borrow_mut()
    }

    /// Swap interval from the session config, if not applied yet
    pub(crate) fn take_pending_swap_interval(&self) -> Option<u32> {
        self.session.pending_swap_interval.take()
    }

    fn dispatch(&self, events: Vec<(Handle, WindowEvent)>) -> usize {
        let mut ran = 0;
        for (window, event) in events {
            if callbacks::dispatch(&self.session.callbacks, window, event) {
                ran += 1;
            }
        }
        ran
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("references", &Rc::strong_count(&self.session))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientApi;
    use crate::window::Window;
    use approx::assert_relative_eq;

    #[test]
    fn test_poll_without_windows_is_empty() {
        let context = Context::headless();
        assert_eq!(context.poll_events(), 0);
        assert_eq!(context.wait_events_timeout(0.1), 0);
    }

    #[test]
    fn test_set_time_resets_timer() {
        let context = Context::headless();
        context.set_time(10.0);
        let now = context.time();
        assert!(now >= 10.0);
        assert_relative_eq!(now, 10.0, epsilon = 1.0);
    }

    #[test]
    fn test_hints_apply_to_next_window() {
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        context.apply_window_hints(&WindowHints {
            client_api: ClientApi::NoApi,
            ..WindowHints::default()
        });

        let window = Window::new(&context, 320, 240, "No context").unwrap();
        window.make_context_current();
        assert!(platform.current_context().is_null());

        context.default_window_hints();
        let window = Window::new(&context, 320, 240, "Context").unwrap();
        window.make_context_current();
        assert_eq!(platform.current_context(), crate::handle::NativeHandle::handle(&window));
    }

    #[test]
    fn test_configured_swap_interval_waits_for_context() {
        let platform = HeadlessPlatform::new();
        let config = FacadeConfig {
            swap_interval: Some(1),
            ..FacadeConfig::default()
        };
        let context = Context::with_config(platform.clone(), &config);
        assert_eq!(platform.swap_interval(), 0);

        let window = Window::new(&context, 640, 480, "Vsync").unwrap();
        window.make_context_current();
        assert_eq!(platform.swap_interval(), 1);
        assert!(platform.errors().is_empty());
    }

    #[test]
    fn test_clear_current_context() {
        let platform = HeadlessPlatform::new();
        let context = Context::new(platform.clone());
        let window = Window::new(&context, 640, 480, "Current").unwrap();

        window.make_context_current();
        context.clear_current_context();
        assert!(platform.current_context().is_null());
    }
}
