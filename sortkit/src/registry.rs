//! Single-instance registry for widgets that must never appear twice.

use std::sync::{Arc, RwLock};

/// Something that tears itself down when replaced or cleared.
pub trait Destroy {
    fn destroy(&mut self);
}

/// Holds at most one live `T`.
///
/// Installing a new instance destroys the previous one first. Clones share
/// the slot, so a timer task can clear the instance it was started for.
///
/// ```
/// use sortkit::registry::{Destroy, Singleton};
///
/// struct Toast(&'static str);
/// impl Destroy for Toast {
///     fn destroy(&mut self) {}
/// }
///
/// let slot = Singleton::new();
/// slot.replace(Toast("first"));
/// slot.replace(Toast("second"));
/// assert_eq!(slot.with(|t| t.0), Some("second"));
/// ```
pub struct Singleton<T> {
    slot: Arc<RwLock<Option<T>>>,
}

impl<T> Clone for Singleton<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }
}

impl<T> std::fmt::Debug for Singleton<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Singleton")
            .field(
                "occupied",
                &self.slot.read().map(|g| g.is_some()).unwrap_or(false),
            )
            .finish()
    }
}

impl<T: Destroy> Singleton<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the current instance, if any, and install `instance`.
    pub fn replace(&self, instance: T) {
        if let Ok(mut guard) = self.slot.write() {
            if let Some(mut previous) = guard.take() {
                previous.destroy();
            }
            *guard = Some(instance);
        }
    }

    /// Destroy and remove the current instance.
    pub fn clear(&self) -> bool {
        self.clear_if(|_| true)
    }

    /// Destroy and remove the current instance when `predicate` holds.
    pub fn clear_if(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        let Ok(mut guard) = self.slot.write() else {
            return false;
        };
        if !guard.as_ref().is_some_and(predicate) {
            return false;
        }
        if let Some(mut current) = guard.take() {
            current.destroy();
        }
        true
    }

    pub fn is_occupied(&self) -> bool {
        self.slot.read().map(|g| g.is_some()).unwrap_or(false)
    }

    /// Read the current instance.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.slot.read().ok().and_then(|g| g.as_ref().map(f))
    }

    /// Mutate the current instance.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.slot.write().ok().and_then(|mut g| g.as_mut().map(f))
    }
}
