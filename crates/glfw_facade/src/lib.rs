//! # GLFW Facade
//!
//! Handle-owning `Window`, `Monitor` and `Cursor` objects over GLFW.
//!
//! ## Features
//!
//! - **Explicit session**: every object is created against a [`Context`]
//!   instead of process-wide native state
//! - **Idempotent destroy**: windows and cursors release their native resource
//!   once, on [`Destroyable::destroy`] or on drop
//! - **Replaceable callbacks**: one closure per window and event class, the
//!   previous one handed back on replacement
//! - **Headless backend**: [`HeadlessPlatform`] runs everything in memory for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glfw_facade::prelude::*;
//!
//! fn main() -> Result<(), FacadeError> {
//!     let context = Context::glfw(&FacadeConfig::default())?;
//!     let mut window = Window::new(&context, 640, 480, "Hello")?;
//!     window.set_key_callback(|key, _, action, _| {
//!         if key == Key::Escape && action == Action::Release {
//!             log::info!("escape released");
//!         }
//!     });
//!     window.make_context_current();
//!     while !window.should_close() {
//!         window.swap_buffers();
//!         context.poll_events();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod callbacks;
pub mod config;
pub mod context;
pub mod cursor;
pub mod destroy;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod input;
pub mod logging;
pub mod monitor;
pub mod platform;
pub mod window;

pub use context::Context;
pub use cursor::{Cursor, Image};
pub use destroy::{Destroyable, ReleaseGuard};
pub use error::{FacadeError, FacadeResult};
pub use geometry::{ContentScale, FrameSize, Geometry, Position, Size};
pub use handle::{Handle, NativeHandle, PointerHandle};
pub use monitor::{GammaRamp, Monitor, VideoMode};
pub use platform::{GlfwPlatform, HeadlessMonitor, HeadlessPlatform, Platform};
pub use window::Window;

/// Common imports for facade users
pub mod prelude {
    pub use crate::{
        config::{ClientApi, Config, FacadeConfig, OpenGlProfile, WindowConfig, WindowHints},
        input::{
            Action, CursorMode, InputMode, InputModeKind, Key, Modifiers, MouseButton, StandardCursor,
            WindowAttribute,
        },
        ContentScale, Context, Cursor, Destroyable, FacadeError, FacadeResult, FrameSize, Geometry, Image, Monitor,
        NativeHandle, Position, Size, VideoMode, Window,
    };
}
