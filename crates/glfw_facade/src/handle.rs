//! Opaque native handles
//!
//! Every wrapper in this crate owns exactly one value handed out by the native
//! layer. The value is pointer-sized and carries no meaning on this side of the
//! [`Platform`](crate::platform::Platform) boundary beyond identity.

use crate::error::{FacadeError, FacadeResult};
use std::fmt;

/// Identifier of a native window, monitor or cursor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Handle(u64);

impl Handle {
    /// The "no handle" sentinel returned by failed native calls
    pub const NULL: Self = Self(0);

    /// Wrap a raw handle value
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the sentinel
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Handle(NULL)")
        } else {
            write!(f, "Handle({:#x})", self.0)
        }
    }
}

/// Anything backed by a single native handle
pub trait NativeHandle {
    /// The handle passed to native calls on behalf of this object
    fn handle(&self) -> Handle;
}

/// Owner of one native handle
///
/// Wrappers embed this rather than storing a bare [`Handle`] so that creation
/// failure is checked in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerHandle {
    handle: Handle,
}

impl PointerHandle {
    /// Take ownership of a handle produced by a native creation call
    ///
    /// Fails with [`FacadeError::CreationFailed`] when the native layer
    /// returned [`Handle::NULL`].
    pub fn created(handle: Handle, resource: &'static str) -> FacadeResult<Self> {
        if handle.is_null() {
            log::error!("Native {} creation returned a null handle", resource);
            return Err(FacadeError::CreationFailed(resource));
        }
        Ok(Self { handle })
    }

    /// Wrap a handle returned by a native lookup, `None` for the sentinel
    pub fn try_new(handle: Handle) -> Option<Self> {
        (!handle.is_null()).then_some(Self { handle })
    }

    /// Current handle value
    pub const fn handle(&self) -> Handle {
        self.handle
    }

    /// Replace the handle value
    ///
    /// Only meant for bookkeeping; the previous handle is not released.
    pub fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }
}

impl NativeHandle for PointerHandle {
    fn handle(&self) -> Handle {
        self.handle
    }
}
