//! Destroy-once semantics shared by owning wrappers

use std::sync::atomic::{AtomicBool, Ordering};

/// A wrapper whose native resource can be released explicitly
///
/// `destroy` is idempotent: the first call releases the native resource and
/// every later call does nothing.
pub trait Destroyable {
    /// Whether the native resource has been released
    fn is_destroyed(&self) -> bool;

    /// Release the native resource if it has not been released yet
    fn destroy(&mut self);
}

/// "Already released" flag for a single native resource
///
/// Destruction is expected to happen on the owning thread; the atomic swap
/// only guarantees that one caller observes the transition.
#[derive(Debug, Default)]
pub struct ReleaseGuard {
    released: AtomicBool,
}

impl ReleaseGuard {
    /// A guard in the live state
    pub const fn new() -> Self {
        Self {
            released: AtomicBool::new(false),
        }
    }

    /// Mark as released, returning `true` only for the first caller
    pub fn release(&self) -> bool {
        !self.released.swap(true, Ordering::AcqRel)
    }

    /// Whether [`release`](Self::release) has been called
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_happens_once() {
        let guard = ReleaseGuard::new();
        assert!(!guard.is_released());

        assert!(guard.release());
        assert!(guard.is_released());

        assert!(!guard.release());
        assert!(!guard.release());
        assert!(guard.is_released());
    }
}
