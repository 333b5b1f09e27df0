//! Subscription handles for event source listeners
//!
//! Registering a listener on an event source returns a [`Subscription`].
//! Cancelling the handle removes the listener; dropping it does the same.
//! Cancel is idempotent, so an explicit cancel followed by drop (or a
//! second cancel) is a no-op.

use std::sync::Mutex;

type CancelFn = Box<dyn FnOnce() + Send>;

/// Handle for a registered listener
pub struct Subscription {
    cancel: Mutex<Option<CancelFn>>,
}

impl Subscription {
    /// Wrap a cancel closure into a handle
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// A handle that is already cancelled
    ///
    /// Useful as a placeholder when a listener could not be registered
    /// but the caller still expects a handle.
    pub fn inert() -> Self {
        Self {
            cancel: Mutex::new(None),
        }
    }

    /// Remove the listener. Safe to call more than once.
    pub fn cancel(&self) {
        let cancel = self.cancel.lock().unwrap().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.cancel.lock().unwrap().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
